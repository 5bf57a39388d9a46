use std::fmt::Display;

use custody_primitives::Address;

/// One `key: value` line.
pub(crate) fn porcelain_field<T: Display>(key: &str, value: T) -> String {
    format!("{key}: {value}")
}

/// Full hex form. `Display` on addresses is truncated.
pub(crate) fn full_hex(addr: &Address) -> String {
    format!("{addr:?}")
}

pub(crate) fn porcelain_optional(key: &str, value: Option<impl Display>) -> String {
    match value {
        Some(v) => porcelain_field(key, v),
        None => porcelain_field(key, "none"),
    }
}
