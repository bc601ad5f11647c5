//! File classification by extension.

use lazy_static::lazy_static;
use regex::Regex;

use crate::path_utils::{extension, file_name, file_stem};
use crate::types::MangaFormat;

/// Archive extensions, matched against the end of the file name.
pub const ARCHIVE_EXTENSIONS: &[&str] = &[
    ".cbz", ".zip", ".rar", ".cbr", ".tar.gz", ".7zip", ".7z", ".cb7", ".cbt",
];

pub const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpeg", ".jpg", ".webp", ".gif", ".avif"];

lazy_static! {
    static ref COVER_IMAGE_REGEX: Regex = Regex::new(r"(?i)(cover|folder)").unwrap();
}

pub fn is_archive(path: &str) -> bool {
    let name = file_name(path).to_lowercase();
    ARCHIVE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

pub fn is_image(path: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&extension(path).as_str())
}

pub fn is_epub(path: &str) -> bool {
    extension(path) == ".epub"
}

pub fn is_pdf(path: &str) -> bool {
    extension(path) == ".pdf"
}

/// Epubs and pdfs.
pub fn is_book(path: &str) -> bool {
    is_epub(path) || is_pdf(path)
}

/// Classifies a path. Archives win over the other formats.
pub fn parse_format(path: &str) -> MangaFormat {
    if is_archive(path) {
        MangaFormat::Archive
    } else if is_image(path) {
        MangaFormat::Image
    } else if is_epub(path) {
        MangaFormat::Epub
    } else if is_pdf(path) {
        MangaFormat::Pdf
    } else {
        MangaFormat::Unknown
    }
}

/// Tests whether the file is a cover image: an image whose name contains a
/// standalone `cover` or `folder` word. Back covers (`backcover`,
/// `back_cover`, `back-cover`) are not covers.
pub fn is_cover_image(path: &str) -> bool {
    if !is_image(path) {
        return false;
    }
    let stem = file_stem(path).to_lowercase();
    COVER_IMAGE_REGEX.find_iter(&stem).any(|found| {
        let before = &stem[..found.start()];
        let followed_by_word = stem[found.end()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_');
        let back_cover = ["back", "back_", "back-"]
            .iter()
            .any(|prefix| before.ends_with(prefix));
        !followed_by_word && !back_cover
    })
}
