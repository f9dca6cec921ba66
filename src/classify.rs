//! Export-style detection.
//!
//! Plain substring checks over the file text. Matches inside comments or
//! string literals count the same as real export statements.

use memchr::memmem;
use serde::Serialize;
use std::fmt;

/// How a component file exposes its component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    /// The file contains `export default`
    Default,
    /// The file exports the component by name
    Named,
    /// Neither pattern was found
    Unknown,
}

impl ExportKind {
    /// Returns the lower-case label of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Named => "named",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies the export style of a component file.
///
/// Rules are checked in order and the first hit wins:
/// 1. `export default` anywhere → [`ExportKind::Default`]
/// 2. `export {`, `export const <name>` or `export function <name>` →
///    [`ExportKind::Named`]
/// 3. otherwise [`ExportKind::Unknown`]
///
/// # Examples
///
/// ```
/// use barrel_gen::{classify_export, ExportKind};
///
/// assert_eq!(classify_export("export default function Foo(){}", "Foo"), ExportKind::Default);
/// assert_eq!(classify_export("export const Button = () => {}", "Button"), ExportKind::Named);
/// assert_eq!(classify_export("const x = 1;", "X"), ExportKind::Unknown);
/// ```
#[must_use]
pub fn classify_export(text: &str, component_name: &str) -> ExportKind {
    let haystack = text.as_bytes();
    let contains = |needle: &str| memmem::find(haystack, needle.as_bytes()).is_some();

    if contains("export default") {
        return ExportKind::Default;
    }

    if contains("export {")
        || contains(&format!("export const {component_name}"))
        || contains(&format!("export function {component_name}"))
    {
        return ExportKind::Named;
    }

    ExportKind::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_export() {
        assert_eq!(
            classify_export("export default function Foo(){}", "Foo"),
            ExportKind::Default
        );
    }

    #[test]
    fn test_named_exports() {
        assert_eq!(
            classify_export("export const Button = () => {}", "Button"),
            ExportKind::Named
        );
        assert_eq!(
            classify_export("export function Modal() { return null }", "Modal"),
            ExportKind::Named
        );
        assert_eq!(
            classify_export("const a = 1;\nexport { a as Card };", "Other"),
            ExportKind::Named
        );
    }

    #[test]
    fn test_unknown_export() {
        assert_eq!(classify_export("const x = 1;", "X"), ExportKind::Unknown);
        assert_eq!(
            classify_export("export const Other = 1;", "Button"),
            ExportKind::Unknown
        );
    }

    #[test]
    fn test_default_wins_over_named() {
        let text = "export { helper };\nexport default Card;";
        assert_eq!(classify_export(text, "Card"), ExportKind::Default);
    }

    #[test]
    fn test_prefix_match_on_component_name() {
        assert_eq!(
            classify_export("export const ButtonGroup = 1;", "Button"),
            ExportKind::Named
        );
    }

    #[test]
    fn test_matches_inside_comments() {
        let text = "// export default is handled elsewhere\nconst x = 1;";
        assert_eq!(classify_export(text, "X"), ExportKind::Default);
    }

    #[test]
    fn test_whitespace_sensitive() {
        assert_eq!(classify_export("export  default X", "X"), ExportKind::Unknown);
        assert_eq!(classify_export("export{ X }", "X"), ExportKind::Unknown);
    }
}
