//! Claim set carried inside a token payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::clock::MICROS_PER_SECOND;

/// Subject: the authenticated principal's identifier
pub const SUB: &str = "sub";
/// Issuer
pub const ISS: &str = "iss";
/// Audience
pub const AUD: &str = "aud";
/// Expiry (Unix timestamp)
pub const EXP: &str = "exp";
/// Issued at (Unix timestamp)
pub const IAT: &str = "iat";
/// Not before (Unix timestamp)
pub const NBF: &str = "nbf";
/// Issued at, in microseconds; orders a token against a logout in the same second
pub const IAT_MICROS: &str = "iat_us";
/// Token id, used for revocation bookkeeping
pub const JTI: &str = "jti";
/// Concrete principal type, present only in model-safe mode
pub const MODEL: &str = "model";

/// Mapping from claim name to JSON value
///
/// Backed by a `BTreeMap`, so serialization always emits claims in the same
/// (lexicographic) order and identical claim sets produce identical payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(BTreeMap<String, Value>);

impl ClaimSet {
    /// Creates an empty claim set
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a claim, replacing any previous value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Copies every claim of `other` into `self`; on a name collision the value from `other` wins
    pub fn merge(&mut self, other: ClaimSet) {
        self.0.extend(other.0);
    }

    /// Subject as a string; numeric subjects are rendered in decimal
    pub fn subject(&self) -> Option<String> {
        match self.get(SUB)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn jti(&self) -> Option<&str> {
        self.str_claim(JTI).filter(|s| !s.is_empty())
    }

    pub fn issuer(&self) -> Option<&str> {
        self.str_claim(ISS)
    }

    /// Audience values; a single string and an array of strings are both accepted
    pub fn audiences(&self) -> Vec<&str> {
        match self.get(AUD) {
            Some(Value::String(s)) => vec![s.as_str()],
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn expires_at(&self) -> Option<i64> {
        self.timestamp_claim(EXP)
    }

    pub fn issued_at(&self) -> Option<i64> {
        self.timestamp_claim(IAT)
    }

    /// Issue time in microseconds, from `iat_us` or else the start of the `iat` second
    pub fn issued_at_micros(&self) -> Option<i64> {
        self.get(IAT_MICROS)
            .and_then(Value::as_i64)
            .or_else(|| self.issued_at()?.checked_mul(MICROS_PER_SECOND))
    }

    pub fn not_before(&self) -> Option<i64> {
        self.timestamp_claim(NBF)
    }

    pub fn model(&self) -> Option<&str> {
        self.str_claim(MODEL)
    }

    fn str_claim(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    fn timestamp_claim(&self, name: &str) -> Option<i64> {
        let value = self.get(name)?;
        value
            .as_i64()
            .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
    }
}

impl From<BTreeMap<String, Value>> for ClaimSet {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ClaimSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for ClaimSet {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
