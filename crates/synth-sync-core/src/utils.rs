//! Utility functions shared across modules.

/// Turn a catalog file name into a file name that is valid in the staging
/// directory on any host OS.
///
/// Reserved and control characters become `_`. A name that would resolve to
/// the directory itself becomes `_`.
///
/// ```
/// use synth_sync_core::utils::sanitize_filename;
///
/// assert_eq!(sanitize_filename("a:b?.synth"), "a_b_.synth");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let cleaned = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string();

    match cleaned.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => cleaned,
    }
}

/// Whether `name` names a file directly inside a folder.
///
/// Separators, `.`, `..` and blank names would escape the folder or never
/// show up in its listing.
pub fn is_bare_file_name(name: &str) -> bool {
    !name.contains(['/', '\\']) && !matches!(name.trim(), "" | "." | "..")
}
