//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// An unset variable without a default is an error naming `field`.
/// Strings without `${` are returned unchanged, so a bare `$` is kept as is.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var).map(Some).map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of a variable that was referenced but not set.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("MOSAIC_TEST_SNAPSHOT_DIR", "/srv/content");
        }
        let result = expand_env("${MOSAIC_TEST_SNAPSHOT_DIR}/entries.json", "content.snapshot");
        assert_eq!(result.unwrap(), "/srv/content/entries.json");
        unsafe {
            std::env::remove_var("MOSAIC_TEST_SNAPSHOT_DIR");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MOSAIC_TEST_UNSET_OUT");
        }
        let result = expand_env("${MOSAIC_TEST_UNSET_OUT:-generated}", "output.dir").unwrap();
        assert_eq!(result, "generated");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MOSAIC_TEST_MISSING");
        }
        let err = expand_env("${MOSAIC_TEST_MISSING}", "media.output_prefix").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("MOSAIC_TEST_MISSING"));
        assert!(msg.contains("media.output_prefix"));
    }

    #[test]
    fn test_literal_and_bare_dollar_unchanged() {
        assert_eq!(expand_env("content.json", "f").unwrap(), "content.json");
        assert_eq!(expand_env("/price/$5", "f").unwrap(), "/price/$5");
    }
}
