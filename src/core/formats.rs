//! Filename-based format routing: which files count as photos, which can
//! carry an embedded tag block, and how sidecars pair up with photos.

pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "tiff", "tif", "heic", "heif", "avif", "raw",
    "cr2", "nef", "arw", "dng", "orf", "rw2",
];

pub const SIDECAR_EXTENSION: &str = "xmp";

fn extension(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}

pub fn is_image(name: &str) -> bool {
    extension(name).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Only JPEG carries an embedded tag block; every other recognized format
/// uses the sidecar path exclusively.
pub fn supports_embedded_tags(name: &str) -> bool {
    matches!(extension(name).as_deref(), Some("jpg") | Some("jpeg"))
}

/// Canonical sidecar filename for a photo: `<original-filename>.xmp`.
pub fn sidecar_name(photo_name: &str) -> String {
    format!("{photo_name}.{SIDECAR_EXTENSION}")
}

/// The photo name a sidecar belongs to, if the file is a sidecar at all.
pub fn sidecar_base(sidecar_name: &str) -> Option<&str> {
    let stem = sidecar_name
        .strip_suffix(".xmp")
        .or_else(|| sidecar_name.strip_suffix(".XMP"))?;
    Some(stem)
}

/// Splits `img1.jpg` into `("img1", Some("jpg"))`, keeping the original case
/// of the extension for re-attachment.
pub fn split_name(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jpeg_is_the_only_embedded_format() {
        assert!(supports_embedded_tags("photo.jpg"));
        assert!(supports_embedded_tags("photo.JPEG"));
        assert!(!supports_embedded_tags("photo.png"));
        assert!(!supports_embedded_tags("photo.nef"));
        assert!(!supports_embedded_tags("photo"));
    }

    #[test]
    fn recognizes_image_extensions() {
        assert!(is_image("a.png"));
        assert!(is_image("b.CR2"));
        assert!(!is_image("notes.txt"));
        assert!(!is_image("photo.jpg.xmp"));
    }

    #[test]
    fn sidecar_names_keep_the_full_photo_name() {
        assert_eq!(sidecar_name("img1.png"), "img1.png.xmp");
        assert_eq!(sidecar_base("img1.png.xmp"), Some("img1.png"));
        assert_eq!(sidecar_base("img1.png.XMP"), Some("img1.png"));
        assert_eq!(sidecar_base("img1.png"), None);
    }

    #[test]
    fn split_name_keeps_extension_case() {
        assert_eq!(split_name("img1.JPG"), ("img1", Some("JPG")));
        assert_eq!(split_name("noext"), ("noext", None));
        assert_eq!(split_name(".hidden"), (".hidden", None));
    }
}
