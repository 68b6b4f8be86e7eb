//! Proof witness: the ordered private inputs fed to the proving backend.

use num_bigint::BigInt;

/// A single witness signal value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignalValue {
    Str(String),
    Int(i64),
    /// Arbitrary-precision integer; canonicalized to a decimal string
    /// before hashing or serialization.
    Big(BigInt),
}

impl SignalValue {
    fn canonical(&self) -> serde_json::Value {
        match self {
            SignalValue::Str(s) => serde_json::Value::String(s.clone()),
            SignalValue::Int(i) => serde_json::Value::from(*i),
            SignalValue::Big(b) => serde_json::Value::String(b.to_str_radix(10)),
        }
    }
}

impl From<&str> for SignalValue {
    fn from(s: &str) -> Self {
        SignalValue::Str(s.to_string())
    }
}

impl From<String> for SignalValue {
    fn from(s: String) -> Self {
        SignalValue::Str(s)
    }
}

impl From<i64> for SignalValue {
    fn from(i: i64) -> Self {
        SignalValue::Int(i)
    }
}

impl From<BigInt> for SignalValue {
    fn from(b: BigInt) -> Self {
        SignalValue::Big(b)
    }
}

/// Ordered mapping from signal name to value.
///
/// Insertion order is preserved because circuits read signals positionally.
/// The cache key is computed over a name-sorted canonical form, so two
/// witnesses with identical logical content always produce the same key
/// regardless of insertion order or numeric representation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProofWitness {
    signals: Vec<(String, SignalValue)>,
}

impl ProofWitness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<SignalValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a signal; replaces an existing signal of the same name in
    /// place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<SignalValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.signals.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.signals.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&SignalValue> {
        self.signals
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Signals in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SignalValue)> {
        self.signals.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Deterministic serialization: entries sorted by signal name,
    /// arbitrary-precision integers rendered as decimal strings.
    pub fn canonical_json(&self) -> String {
        let mut entries: Vec<&(String, SignalValue)> = self.signals.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        let mut map = serde_json::Map::new();
        for (name, value) in entries {
            map.insert(name.clone(), value.canonical());
        }
        serde_json::Value::Object(map).to_string()
    }

    /// Cache key: blake3 hex digest of the canonical serialization.
    pub fn cache_key(&self) -> String {
        blake3::hash(self.canonical_json().as_bytes())
            .to_hex()
            .to_string()
    }
}
