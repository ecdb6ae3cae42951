use std::path::Path;

/// Clean a filename by removing characters that are invalid on common
/// filesystems: `/`, `\`, `:`, `*`, `?`, `"`, `<`, `>`, `|`.
pub fn clean_filename(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .collect()
}

/// Add a string suffix before the file extension.
///
/// For example, `"photo.jpg"` with suffix `"2"` becomes `"photo-2.jpg"`.
pub fn insert_suffix(path: &str, suffix: &str) -> String {
    match path.rfind('.') {
        Some(dot_pos) => {
            let (stem, ext) = path.split_at(dot_pos);
            let mut result = String::with_capacity(stem.len() + 1 + suffix.len() + ext.len());
            result.push_str(stem);
            result.push('-');
            result.push_str(suffix);
            result.push_str(ext);
            result
        }
        None => {
            let mut result = String::with_capacity(path.len() + 1 + suffix.len());
            result.push_str(path);
            result.push('-');
            result.push_str(suffix);
            result
        }
    }
}

/// Derive the library filename for a captured photo from its source path.
///
/// Falls back to `photo.jpg` when the source has no usable name.
pub fn asset_filename(source: &Path) -> String {
    let name = source
        .file_name()
        .map(|n| clean_filename(&n.to_string_lossy()))
        .unwrap_or_default();
    if name.is_empty() {
        return "photo.jpg".to_string();
    }
    name
}
