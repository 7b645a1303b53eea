//! # Credential Resolution
//!
//! Decides which Gemini API key a generation call runs with. A key configured
//! for the deployment always wins; a caller-held key is used only when the
//! deployment has none. Blank strings count as absent.

use crate::errors::GenerationError;

fn present(key: Option<&str>) -> Option<&str> {
    key.map(str::trim).filter(|k| !k.is_empty())
}

/// Returns the key to use, or `MissingApiKey` when neither source has one.
pub fn resolve_api_key(
    deployment_key: Option<&str>,
    supplied_key: Option<&str>,
) -> Result<String, GenerationError> {
    present(deployment_key)
        .or_else(|| present(supplied_key))
        .map(str::to_string)
        .ok_or(GenerationError::MissingApiKey)
}

/// Whether the deployment carries its own key.
pub fn is_server_key_set(deployment_key: Option<&str>) -> bool {
    present(deployment_key).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deployment_key_takes_precedence() {
        let key = resolve_api_key(Some("server-key"), Some("user-key")).unwrap();
        assert_eq!(key, "server-key");
    }

    #[test]
    fn supplied_key_is_the_fallback() {
        assert_eq!(resolve_api_key(None, Some("user-key")).unwrap(), "user-key");
        assert_eq!(
            resolve_api_key(Some("   "), Some("user-key")).unwrap(),
            "user-key"
        );
    }

    #[test]
    fn no_key_anywhere_is_a_configuration_fault() {
        let err = resolve_api_key(None, Some("")).unwrap_err();
        assert!(matches!(err, GenerationError::MissingApiKey));
        assert!(!is_server_key_set(Some("")));
        assert!(is_server_key_set(Some("abc")));
    }
}
