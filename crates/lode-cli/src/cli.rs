use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lode",
    about = "Inspect values in a content-addressed chunk store",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Chunk store directory (one file per ref)
    #[arg(short, long, global = true, default_value = ".")]
    pub store: String,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode a value and pretty-print it
    Show(ShowArgs),
    /// Write a blob's raw bytes to stdout
    Cat(CatArgs),
    /// List refs present in the store
    Refs(RefsArgs),
}

#[derive(Args)]
pub struct ShowArgs {
    /// Ref of the chunk to decode
    pub target: String,
    /// Resolve lazy references this many levels deep
    #[arg(long, default_value = "0")]
    pub depth: usize,
}

#[derive(Args)]
pub struct CatArgs {
    /// Ref of the blob to write out
    pub target: String,
}

#[derive(Args)]
pub struct RefsArgs {}
