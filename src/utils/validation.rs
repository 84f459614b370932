use std::path::Path;

/// Extension to MIME type table used when serving stored solutions
const CONTENT_TYPES: &[(&str, &str)] = &[
    ("js", "application/javascript"),
    ("ts", "application/typescript"),
    ("py", "text/x-python"),
    ("java", "text/x-java-source"),
    ("cpp", "text/x-c++src"),
    ("c", "text/x-csrc"),
    ("html", "text/html"),
    ("css", "text/css"),
    ("json", "application/json"),
    ("txt", "text/plain"),
];

pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Replaces every character outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Rejects names that could escape the storage directory.
pub fn is_safe_filename(filename: &str) -> bool {
    !(filename.contains("..") || filename.contains('/') || filename.contains('\\'))
}

/// A sanitized name that is empty or only dots can't be stored as a regular file.
pub fn is_storable_filename(filename: &str) -> bool {
    !filename.is_empty() && !filename.chars().all(|c| c == '.')
}

pub fn content_type_for(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    extension
        .and_then(|ext| {
            CONTENT_TYPES
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, mime)| *mime)
        })
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}
