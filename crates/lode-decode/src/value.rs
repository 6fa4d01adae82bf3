use bytes::Bytes;

use crate::lazy::LazyRef;
use crate::number::Number;

/// A decoded value.
///
/// Every variant is an immutable snapshot owned by whoever ran the decode
/// that produced it. Lazy references are the one deliberate hole in
/// eagerness: they hold a ref and a fetcher capability, nothing else,
/// until [`LazyRef::deref`] is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Width-tagged numeric value.
    Number(Number),
    /// Boolean.
    Bool(bool),
    /// UTF-8 text.
    String(String),
    /// Ordered sequence; insertion order is meaningful, duplicates allowed.
    List(Vec<Value>),
    /// Unordered collection, deduplicated by value equality.
    Set(ValueSet),
    /// Value-to-value mapping, keys unique by value equality.
    Map(ValueMap),
    /// Unresolved reference to another chunk.
    Ref(LazyRef),
    /// Immutable byte sequence, possibly reassembled from many chunks.
    Blob(Bytes),
    /// Type descriptor record.
    Type(TypeDesc),
}

impl Value {
    /// Short static name of this value's kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
            Value::Ref(_) => "ref",
            Value::Blob(_) => "blob",
            Value::Type(_) => "type",
        }
    }

    /// The boolean, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The string slice, if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The number, if this is a `Number`.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// The elements, if this is a `List`.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// The blob bytes, if this is a `Blob`.
    pub fn as_blob(&self) -> Option<&Bytes> {
        match self {
            Value::Blob(data) => Some(data),
            _ => None,
        }
    }

    /// The lazy reference, if this is a `Ref`.
    pub fn as_ref_value(&self) -> Option<&LazyRef> {
        match self {
            Value::Ref(r) => Some(r),
            _ => None,
        }
    }
}

/// Unordered collection of values, deduplicated by value equality.
///
/// Backed by an insertion-order `Vec` with linear-scan dedup: collection
/// sizes are bounded by what fits in one chunk, and `Value` carries no
/// hash. Iteration order is not significant; equality ignores it.
#[derive(Debug, Clone, Default)]
pub struct ValueSet {
    items: Vec<Value>,
}

impl ValueSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value. Returns `false` if an equal value was already
    /// present (the set is unchanged).
    pub fn insert(&mut self, value: Value) -> bool {
        if self.contains(&value) {
            false
        } else {
            self.items.push(value);
            true
        }
    }

    /// Membership by value equality.
    pub fn contains(&self, value: &Value) -> bool {
        self.items.iter().any(|v| v == value)
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the set holds no values.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate the values in insertion order (not significant).
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }
}

impl PartialEq for ValueSet {
    fn eq(&self, other: &Self) -> bool {
        // Both sides are deduplicated, so equal length plus containment
        // one way is set equality.
        self.len() == other.len() && self.items.iter().all(|v| other.contains(v))
    }
}

impl Eq for ValueSet {}

impl FromIterator<Value> for ValueSet {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut set = ValueSet::new();
        for v in iter {
            set.insert(v);
        }
        set
    }
}

/// Value-to-value mapping with keys unique by value equality.
///
/// Built positionally from the flat `[k1,v1,k2,v2,...]` wire encoding; a
/// repeated key replaces the earlier entry. Entry order is preserved for
/// iteration but is not significant for equality.
#[derive(Debug, Clone, Default)]
pub struct ValueMap {
    entries: Vec<(Value, Value)>,
}

impl ValueMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key-value pair, returning the previous value for an equal
    /// key (last occurrence wins).
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        for entry in &mut self.entries {
            if entry.0 == key {
                return Some(std::mem::replace(&mut entry.1, value));
            }
        }
        self.entries.push((key, value));
        None
    }

    /// Look up a value by key equality.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order (not significant).
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl PartialEq for ValueMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for ValueMap {}

/// Type descriptor record.
///
/// `kind` is an opaque width-tagged integer whose meaning lives in an
/// external type-kind registry; the decoder carries it through without
/// interpretation. Kinds with composite structure carry exactly one of
/// `desc` (inline component description, whose elements may themselves be
/// lazy refs) or `pkg_ref` (lazy ref to an externally defined package
/// chunk); simple kinds carry neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDesc {
    /// Opaque kind tag.
    pub kind: Number,
    /// Type name.
    pub name: String,
    /// Inline component description, if present.
    pub desc: Option<Box<Value>>,
    /// Reference to the defining package chunk, if present.
    pub pkg_ref: Option<LazyRef>,
}
