//! Bidirectional mapping between the configuration model and the
//! remote-store wire records.
//!
//! The wire shape is a nested [`serde_json::Value`] tree. `decode` is
//! total: every field has a hard-coded default applied when absent,
//! mistyped, or when an enumerated value fails to match any known member.
//! `encode` is the exact structural inverse, so `decode(encode(c)) == c`
//! for any well-formed `c`.

mod decode;
mod encode;
pub mod legacy;

pub use decode::{decode, decode_profile};
pub use encode::{encode, encode_profile};

/// Tolerant accessors over wire records.
///
/// The remote store is shared with older schema versions, so every read
/// degrades to a default instead of erroring.
pub(crate) mod wire {
    use serde_json::Value;

    /// Child value under `key`, whatever its type.
    pub fn field<'a>(value: &'a Value, key: &str) -> &'a Value {
        value.get(key).unwrap_or(&Value::Null)
    }

    pub fn str_or(value: &Value, key: &str, default: &str) -> String {
        value
            .get(key)
            .and_then(Value::as_str)
            .map_or_else(|| default.to_string(), ToString::to_string)
    }

    pub fn bool_or(value: &Value, key: &str, default: bool) -> bool {
        value.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    pub fn u32_or(value: &Value, key: &str, default: u32) -> u32 {
        value
            .get(key)
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(default)
    }

    pub fn i32_or(value: &Value, key: &str, default: i32) -> i32 {
        value
            .get(key)
            .and_then(Value::as_i64)
            .and_then(|n| i32::try_from(n).ok())
            .unwrap_or(default)
    }

    pub fn f64_or(value: &Value, key: &str, default: f64) -> f64 {
        value.get(key).and_then(Value::as_f64).unwrap_or(default)
    }

}
