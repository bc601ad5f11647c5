//! Path utilities for library file paths that arrive as plain strings.
//!
//! Paths handed to the parser may come from any platform, so these helpers
//! never touch the filesystem and treat both `/` and `\` as separators. All
//! functions work on normalized paths (forward slashes only).

use log::trace;

/// Path separator used after normalization.
const SEPARATOR: char = '/';

/// Folder names (or name prefixes) created by NAS snapshots, recycle bins and
/// macOS metadata, which never hold real library content.
const BLACKLISTED_FOLDERS: &[&str] = &["__MACOSX", ".qpkg", ".yacreaderlibrary", ".caltrash"];
const BLACKLISTED_PREFIXES: &[&str] = &["@Recently-Snapshot", "@recycle", "#recycle", "._"];

/// Normalizes the separators in a path to `/` and collapses doubled slashes.
///
/// # Arguments
///
/// * `path` - The path to normalize
///
/// # Returns
///
/// * `String` - The path with forward slashes only
pub fn normalize_path(path: &str) -> String {
    let replaced = path.replace('\\', "/");
    let mut normalized = String::with_capacity(replaced.len());
    for c in replaced.chars() {
        if c == SEPARATOR && normalized.ends_with(SEPARATOR) {
            continue;
        }
        normalized.push(c);
    }
    normalized
}

/// Gets the last segment of a path, including its extension.
///
/// # Arguments
///
/// * `path` - The path to extract the file name from
///
/// # Returns
///
/// * `String` - The file name, empty if the path ends with a separator
pub fn file_name(path: &str) -> String {
    let normalized = normalize_path(path);
    match normalized.rfind(SEPARATOR) {
        Some(index) => normalized[index + 1..].to_string(),
        None => normalized,
    }
}

/// Gets the file name without its last extension.
///
/// A leading dot is part of the name, so `.hidden` keeps its full name.
pub fn file_stem(path: &str) -> String {
    let name = file_name(path);
    match name.rfind('.') {
        Some(index) if index > 0 => name[..index].to_string(),
        _ => name,
    }
}

/// Gets the lowercased extension of a path including the dot, e.g. `".cbz"`.
/// Returns an empty string when the file name has no extension.
pub fn extension(path: &str) -> String {
    let name = file_name(path);
    match name.rfind('.') {
        Some(index) if index > 0 => name[index..].to_lowercase(),
        _ => String::new(),
    }
}

/// Lists the folders between `root_path` and the file at `file_path`,
/// starting with the file's own folder and ending with the top-most folder
/// right below the root.
///
/// # Arguments
///
/// * `root_path` - The library root
/// * `file_path` - A file somewhere below the root
///
/// # Returns
///
/// * `Vec<String>` - Folder names, closest first. Empty when the file sits
///   directly in the root or is not below it.
pub fn folders_till_root(root_path: &str, file_path: &str) -> Vec<String> {
    let root = normalize_path(root_path);
    let root = root.trim_end_matches(SEPARATOR);
    let path = normalize_path(file_path);

    let Some(relative) = path.strip_prefix(root) else {
        trace!("'{}' is not below root '{}'", file_path, root_path);
        return Vec::new();
    };
    if !root.is_empty() && !relative.starts_with(SEPARATOR) {
        trace!("'{}' is not below root '{}'", file_path, root_path);
        return Vec::new();
    }

    let mut segments: Vec<&str> = relative
        .split(SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect();
    // Drop the file itself
    segments.pop();
    segments.into_iter().rev().map(str::to_string).collect()
}

/// Checks whether a path lives in (or is) a folder that never holds real
/// library content, such as `__MACOSX` or a NAS recycle bin, or points at a
/// macOS `._` metadata file.
pub fn has_blacklisted_folder_in_path(path: &str) -> bool {
    let normalized = normalize_path(path);
    BLACKLISTED_FOLDERS
        .iter()
        .any(|folder| normalized.contains(folder))
        || BLACKLISTED_PREFIXES
            .iter()
            .any(|prefix| normalized.starts_with(prefix))
        || file_name(&normalized).starts_with("._")
}
