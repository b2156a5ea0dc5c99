//! Required-key validation.

use crate::error::{Error, Result};
use crate::tree::Tree;

/// Checks that required keys are present in an assembled tree.
///
/// # Examples
///
/// ```
/// use tiers::config::ConfigValidator;
/// use tiers::Tree;
///
/// let mut tree = Tree::new();
/// tree.set_path("app.version", "1.0.0").unwrap();
///
/// let err = ConfigValidator::validate_required(&tree, &["app.name", "server.host"])
///     .unwrap_err();
/// assert_eq!(err.missing_keys(), ["app.name", "server.host"]);
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Fail with every missing key at once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] listing the missing keys in the order
    /// they were given.
    pub fn validate_required<S: AsRef<str>>(tree: &Tree, required: &[S]) -> Result<()> {
        let missing = Self::missing_keys(tree, required);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::missing(missing))
        }
    }

    /// The required keys that cannot be resolved.
    #[must_use]
    pub fn missing_keys<S: AsRef<str>>(tree: &Tree, required: &[S]) -> Vec<String> {
        required
            .iter()
            .map(AsRef::as_ref)
            .filter(|key| tree.get_path(key).is_none())
            .map(str::to_string)
            .collect()
    }
}
