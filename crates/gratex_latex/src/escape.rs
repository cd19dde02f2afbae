//! Backslash escaping for LaTeX that is about to be interpolated into a
//! generated script or JSON payload.
//!
//! One level of string-literal quoting eats one level of backslashes, so
//! `\sin` must travel as `\\sin` to arrive intact.

/// Double every backslash. Nothing else is altered.
pub fn escape_for_embedding(latex: &str) -> String {
    latex.replace('\\', "\\\\")
}

/// Inverse of [`escape_for_embedding`]: collapse each doubled backslash
/// back into one.
pub fn unescape_embedded(escaped: &str) -> String {
    escaped.replace("\\\\", "\\")
}
