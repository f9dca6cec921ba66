//! Component name derivation from file names.

/// Splits a file name into stem and extension.
///
/// Leading dots belong to the stem, so `.eslintrc` has no extension and
/// `.eslintrc.js` has stem `.eslintrc`.
#[must_use]
pub(crate) fn split_extension(name: &str) -> (&str, &str) {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(pos) => name.split_at(leading + pos),
        None => (name, ""),
    }
}

/// Strips the extension from the last segment of a `/`-separated path.
#[must_use]
pub(crate) fn strip_extension(path: &str) -> &str {
    let start = path.rfind('/').map_or(0, |pos| pos + 1);
    let (stem, _) = split_extension(&path[start..]);
    &path[..start + stem.len()]
}

/// Derives a component identifier from a file name.
///
/// The extension is dropped, `-` and `_` act as word separators and each
/// word gets an upper-case first character; the rest of the word is kept
/// as written.
///
/// # Examples
///
/// ```
/// use barrel_gen::derive_component_name;
///
/// assert_eq!(derive_component_name("user-profile-card.tsx"), "UserProfileCard");
/// assert_eq!(derive_component_name("nav_bar.jsx"), "NavBar");
/// assert_eq!(derive_component_name("--.tsx"), "");
/// ```
#[must_use]
pub fn derive_component_name(file_name: &str) -> String {
    let (stem, _) = split_extension(file_name);

    stem.replace(['-', '_'], " ")
        .split_whitespace()
        .map(capitalize_first)
        .collect()
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
