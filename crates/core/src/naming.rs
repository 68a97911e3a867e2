//! Machine-name normalization for template and region identifiers.
//!
//! The layout editor front end addresses templates and regions through CSS
//! class fragments (`twocol-bricks`, `first-above`), while the catalog uses
//! machine names (`twocol_bricks`, `first_above`). Everything submitted by the
//! editor passes through [`machine_name`] before it is stored or looked up.

/// Convert an editor-supplied identifier into catalog machine-name form.
///
/// Hyphens become underscores and surrounding whitespace is trimmed. Other
/// characters are left alone so ids that are already valid pass through
/// unchanged.
pub fn machine_name(raw: &str) -> String {
    raw.trim().replace('-', "_")
}

/// Whether `name` is a well-formed machine name: non-empty, lowercase ASCII
/// letters, digits and underscores only.
pub fn is_machine_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
