//! Read-only view over a flat JSON override object such as
//! `{"density": 0.3, "harmony": "triadic", "stroke": false}`.
//!
//! Lookups never fail: a missing key, or a value of the wrong JSON type or
//! out of range for the target field, leaves the caller's current value.
//! Name lookups report an unknown name through a caller-supplied resolver.

use serde_json::Value;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy)]
pub struct Overrides<'a> {
    params: &'a Value,
}

impl<'a> Overrides<'a> {
    pub fn new(params: &'a Value) -> Self {
        Self { params }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.params.get(key)
    }

    /// Any JSON number, integers included.
    pub fn f64(&self, key: &str, current: f64) -> f64 {
        self.get(key).and_then(Value::as_f64).unwrap_or(current)
    }

    pub fn u64(&self, key: &str, current: u64) -> u64 {
        self.get(key).and_then(Value::as_u64).unwrap_or(current)
    }

    /// Non-negative integers that fit in `u32`; anything else keeps `current`.
    pub fn u32(&self, key: &str, current: u32) -> u32 {
        self.get(key)
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(current)
    }

    pub fn bool(&self, key: &str, current: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(current)
    }

    /// Non-empty string under `key`.
    pub fn name(&self, key: &str) -> Option<&'a str> {
        self.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Resolves the name under `key` with `lookup`.
    ///
    /// `Ok(None)` when the key is absent, [`ConfigError::UnknownMode`] when the
    /// name is present but `lookup` rejects it.
    pub fn mode<T>(
        &self,
        key: &'static str,
        lookup: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>, ConfigError> {
        match self.name(key) {
            None => Ok(None),
            Some(name) => lookup(name).map(Some).ok_or_else(|| ConfigError::UnknownMode {
                kind: key,
                name: name.to_string(),
            }),
        }
    }
}
