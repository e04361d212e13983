//! Derivation of external option names from field identifiers.
//!
//! Identifiers are split into words at case transitions and joined with
//! hyphens. Acronyms stay together, so `HTTPServer` becomes `http-server`.
//! Underscores count as separators, which lets `snake_case` Rust fields and
//! `MixedCase` identifiers map onto the same option name.

use heck::{ToKebabCase, ToShoutySnakeCase};

/// Separator placed between the words of a derived name.
pub const SEPARATOR: char = '-';

/// Converts an identifier into its external option name.
///
/// Words are split at case transitions and underscores, lowercased and
/// joined with [`SEPARATOR`]. A leading `r#` raw-identifier marker is
/// ignored.
///
/// # Examples
///
/// ```
/// use optbind::derive_name;
///
/// assert_eq!(derive_name("MaxRetryCount"), "max-retry-count");
/// assert_eq!(derive_name("HTTPServer"), "http-server");
/// assert_eq!(derive_name("listen_addr"), "listen-addr");
/// ```
#[must_use]
pub fn derive_name(identifier: &str) -> String {
    identifier
        .strip_prefix("r#")
        .unwrap_or(identifier)
        .to_kebab_case()
}

/// Builds the environment variable consulted for a derived option name.
///
/// The name is upper-cased, separators become underscores and `prefix` is
/// prepended verbatim.
///
/// # Examples
///
/// ```
/// use optbind::env_key;
///
/// assert_eq!(env_key("max-retry-count", None), "MAX_RETRY_COUNT");
/// assert_eq!(env_key("port", Some("APP_")), "APP_PORT");
/// ```
#[must_use]
pub fn env_key(name: &str, prefix: Option<&str>) -> String {
    let body = name.to_shouty_snake_case();
    match prefix {
        Some(prefix) => format!("{prefix}{body}"),
        None => body,
    }
}
