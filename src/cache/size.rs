//! Size Estimation Module
//!
//! Heuristic byte estimates for cached values. These feed the memory-pressure
//! policy and the `memory_usage` statistic; only their relative ordering
//! matters, not the exact counts.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Serialize;

/// Estimate used when a value cannot be serialized.
pub const FALLBACK_ESTIMATE: usize = 1000;

/// Cost of any numeric value.
pub const NUMBER_ESTIMATE: usize = 8;

/// Cost of a boolean.
pub const BOOL_ESTIMATE: usize = 4;

// == Size Estimate Trait ==
/// Values that can report an approximate in-memory footprint.
pub trait SizeEstimate {
    /// Approximate size of the value in bytes.
    fn estimated_size(&self) -> usize;
}

/// Two bytes per UTF-16 code unit.
pub fn estimate_str(s: &str) -> usize {
    s.encode_utf16().count() * 2
}

/// Two bytes per UTF-16 code unit of the JSON serialization, or
/// [`FALLBACK_ESTIMATE`] when serialization fails.
pub fn estimate_serialized<T: Serialize + ?Sized>(value: &T) -> usize {
    match serde_json::to_string(value) {
        Ok(json) => estimate_str(&json),
        Err(_) => FALLBACK_ESTIMATE,
    }
}

impl SizeEstimate for str {
    fn estimated_size(&self) -> usize {
        estimate_str(self)
    }
}

impl SizeEstimate for String {
    fn estimated_size(&self) -> usize {
        estimate_str(self)
    }
}

impl SizeEstimate for bool {
    fn estimated_size(&self) -> usize {
        BOOL_ESTIMATE
    }
}

impl SizeEstimate for () {
    fn estimated_size(&self) -> usize {
        0
    }
}

macro_rules! impl_number_estimate {
    ($($ty:ty),*) => {
        $(
            impl SizeEstimate for $ty {
                fn estimated_size(&self) -> usize {
                    NUMBER_ESTIMATE
                }
            }
        )*
    };
}

impl_number_estimate!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl<T: SizeEstimate> SizeEstimate for Option<T> {
    fn estimated_size(&self) -> usize {
        self.as_ref().map_or(0, SizeEstimate::estimated_size)
    }
}

impl<T: SizeEstimate + ?Sized> SizeEstimate for Arc<T> {
    fn estimated_size(&self) -> usize {
        (**self).estimated_size()
    }
}

impl<T: Serialize> SizeEstimate for Vec<T> {
    fn estimated_size(&self) -> usize {
        estimate_serialized(self)
    }
}

impl<K: Serialize, T: Serialize> SizeEstimate for HashMap<K, T> {
    fn estimated_size(&self) -> usize {
        estimate_serialized(self)
    }
}

impl<K: Serialize, T: Serialize> SizeEstimate for BTreeMap<K, T> {
    fn estimated_size(&self) -> usize {
        estimate_serialized(self)
    }
}

impl SizeEstimate for serde_json::Value {
    fn estimated_size(&self) -> usize {
        use serde_json::Value;

        match self {
            Value::Null => 0,
            Value::Bool(_) => BOOL_ESTIMATE,
            Value::Number(_) => NUMBER_ESTIMATE,
            Value::String(s) => estimate_str(s),
            Value::Array(_) | Value::Object(_) => estimate_serialized(self),
        }
    }
}
