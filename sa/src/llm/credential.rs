//! API credential resolution

use tracing::debug;

/// Pick the credential to use
///
/// An explicit, non-blank value wins. Otherwise each variable in `env_vars`
/// is read in order and the first non-blank value is taken.
pub fn resolve_credential(explicit: Option<&str>, env_vars: &[String]) -> Option<String> {
    resolve_credential_with(explicit, env_vars, |name| std::env::var(name).ok())
}

/// Same as [`resolve_credential`] with an injectable variable lookup
pub fn resolve_credential_with<F>(explicit: Option<&str>, env_vars: &[String], lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = explicit.map(str::trim).filter(|v| !v.is_empty()) {
        debug!("resolve_credential: using explicit value");
        return Some(value.to_string());
    }

    for name in env_vars {
        if let Some(value) = lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            debug!(%name, "resolve_credential: using environment variable");
            return Some(value);
        }
        debug!(%name, "resolve_credential: variable unset or blank");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars() -> Vec<String> {
        vec!["GEMINI_API_KEY".to_string(), "GOOGLE_API_KEY".to_string()]
    }

    #[test]
    fn test_explicit_wins() {
        let env = HashMap::from([("GEMINI_API_KEY", "from-env")]);
        let got = resolve_credential_with(Some("typed-in"), &vars(), |n| env.get(n).map(|v| v.to_string()));
        assert_eq!(got.as_deref(), Some("typed-in"));
    }

    #[test]
    fn test_env_order() {
        let env = HashMap::from([("GEMINI_API_KEY", "gemini"), ("GOOGLE_API_KEY", "google")]);
        let got = resolve_credential_with(None, &vars(), |n| env.get(n).map(|v| v.to_string()));
        assert_eq!(got.as_deref(), Some("gemini"));
    }

    #[test]
    fn test_blank_values_fall_through() {
        let env = HashMap::from([("GEMINI_API_KEY", "  "), ("GOOGLE_API_KEY", "google")]);
        let got = resolve_credential_with(Some(""), &vars(), |n| env.get(n).map(|v| v.to_string()));
        assert_eq!(got.as_deref(), Some("google"));
    }

    #[test]
    fn test_nothing_found() {
        let got = resolve_credential_with(None, &vars(), |_| None);
        assert!(got.is_none());
    }
}
