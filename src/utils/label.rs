//! Filename-safe batch labels
//!
//! Labels are embedded verbatim in batch filenames, so anything derived from
//! user input (search keywords) goes through [`sanitize_label`] first.

/// Make a label safe to embed in a filename.
///
/// Path separators and reserved characters are replaced with `_` and
/// whitespace runs collapse to a single `_`. An input that sanitizes to
/// nothing but dots and underscores becomes `"untitled"`.
///
/// # Examples
/// ```
/// # use storefront_harvest::utils::label::sanitize_label;
/// assert_eq!(sanitize_label("search_star wars"), "search_star_wars");
/// assert_eq!(sanitize_label("genre_sci-fi"), "genre_sci-fi");
/// assert_eq!(sanitize_label("../../etc"), ".._.._etc");
/// ```
#[must_use]
pub fn sanitize_label(label: &str) -> String {
    let options = sanitize_filename::Options {
        truncate: true,
        windows: true,
        replacement: "_",
    };
    let cleaned = sanitize_filename::sanitize_with_options(label.trim(), options);
    let joined = cleaned.split_whitespace().collect::<Vec<_>>().join("_");

    if joined.chars().all(|c| c == '.' || c == '_') {
        "untitled".to_string()
    } else {
        joined
    }
}
