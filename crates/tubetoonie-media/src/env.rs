//! Environment access.

/// Lookup of configuration values by variable name.
///
/// Production code passes [`process_env`]; tests pass a closure over a map.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Read a variable from the process environment.
///
/// Unset and non-unicode variables both read as `None`.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Trimmed, non-empty value of `name`.
pub(crate) fn non_empty(env: EnvLookup<'_>, name: &str) -> Option<String> {
    env(name).map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}
