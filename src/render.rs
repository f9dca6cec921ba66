//! Index file rendering.

use crate::{
    classify::ExportKind,
    component::ComponentDescriptor,
    config::{ExportStyle, ModuleExtension},
    scanner::ScanResult,
};

/// Renders the content of one index file.
///
/// Components are sorted by name for [`ExportStyle::Named`] and by relative
/// path for [`ExportStyle::Reexport`]. Lines are joined with `\n` and the
/// text has no trailing newline. The module extension only names the index
/// file, so it does not change the output.
///
/// # Examples
///
/// ```
/// use barrel_gen::{render_index, ComponentDescriptor, ExportKind, ExportStyle, ModuleExtension};
/// use std::path::PathBuf;
///
/// let card = ComponentDescriptor::new(
///     PathBuf::from("ui"),
///     PathBuf::from("ui/calendar-card.jsx"),
///     "calendar-card.jsx",
///     "CalendarCard".to_string(),
///     ExportKind::Default,
/// );
///
/// let text = render_index(&[card], ExportStyle::Named, ModuleExtension::Ts);
/// assert_eq!(text, "export { default as CalendarCard } from './calendar-card'");
/// ```
#[must_use]
pub fn render_index(
    components: &[ComponentDescriptor],
    style: ExportStyle,
    _module_extension: ModuleExtension,
) -> String {
    let mut sorted: Vec<&ComponentDescriptor> = components.iter().collect();
    match style {
        ExportStyle::Named => sorted.sort_by(|a, b| a.component_name.cmp(&b.component_name)),
        ExportStyle::Reexport => sorted.sort_by(|a, b| a.relative_path.cmp(&b.relative_path)),
    }

    sorted
        .into_iter()
        .map(|component| export_line(component, style))
        .collect::<Vec<_>>()
        .join("\n")
}

fn export_line(component: &ComponentDescriptor, style: ExportStyle) -> String {
    let specifier = component.module_specifier();
    match (style, component.export_kind) {
        (ExportStyle::Named, ExportKind::Default) => format!(
            "export {{ default as {} }} from '{}'",
            component.component_name, specifier
        ),
        (ExportStyle::Named, ExportKind::Named | ExportKind::Unknown) => format!(
            "export {{ {} }} from '{}'",
            component.component_name, specifier
        ),
        (ExportStyle::Reexport, _) => format!("export * from '{specifier}'"),
    }
}

/// Renders every non-empty root and joins the blocks with a blank line.
///
/// Roots appear in scan order; roots without components are left out.
#[must_use]
pub fn render_preview(
    scan: &ScanResult,
    style: ExportStyle,
    module_extension: ModuleExtension,
) -> String {
    scan.iter()
        .filter(|entry| !entry.components.is_empty())
        .map(|entry| render_index(&entry.components, style, module_extension))
        .collect::<Vec<_>>()
        .join("\n\n")
}
