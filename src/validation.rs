//! Input validation for names that end up in file paths.
//!
//! Agent names are joined onto the agents directory as `<name>.md`, so they
//! are checked before use to rule out path traversal. Anything else is a
//! legal file name and is allowed, dots included.

use anyhow::{bail, Result};

/// Validates that a name is safe to join onto a directory path.
///
/// A name is rejected if it is empty, contains a path separator (`/` or `\`),
/// or contains `..`.
///
/// # Examples
///
/// ```
/// use maestro::validation::validate_name;
///
/// assert!(validate_name("coder").is_ok());
/// assert!(validate_name("ux.designer").is_ok());
/// assert!(validate_name("").is_err());
/// assert!(validate_name("../etc/passwd").is_err());
/// ```
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("Name cannot be empty");
    }

    if name.contains(['/', '\\']) {
        bail!("Name '{name}' contains a path separator");
    }

    if name.contains("..") {
        bail!("Name '{name}' contains '..'");
    }

    Ok(())
}
