use serde::{Deserialize, Serialize};

/// Fallback name when a photo URL has no usable last segment.
const FALLBACK_FILENAME: &str = "image";

/// One photo to download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoEntry {
    pub image_url: String,
    pub filename: String,
}

impl PhotoEntry {
    /// Build an entry whose filename is the last segment of `name_source`
    /// (a CDN path or an absolute URL).
    pub fn new(image_url: impl Into<String>, name_source: &str) -> Self {
        Self {
            image_url: image_url.into(),
            filename: filename_from_path(name_source),
        }
    }

    /// Build an entry from an absolute URL, naming it after the URL itself.
    pub fn from_url(image_url: impl Into<String>) -> Self {
        let image_url = image_url.into();
        let filename = filename_from_path(&image_url);
        Self {
            image_url,
            filename,
        }
    }
}

/// Last `/`-separated segment of a path or URL, with any query string or
/// fragment removed.
///
/// Segments that would escape the target folder (`.`, `..`) or are empty
/// fall back to `image`.
pub fn filename_from_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segment = path.rsplit('/').next().unwrap_or_default();
    let segment = segment.rsplit('\\').next().unwrap_or_default();
    if segment.is_empty() || segment == "." || segment == ".." {
        return FALLBACK_FILENAME.to_owned();
    }
    segment.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cdn_path() {
        assert_eq!(
            filename_from_path("/carpicture02/pic3812/38123456_001.jpg"),
            "38123456_001.jpg"
        );
    }

    #[test]
    fn absolute_url_with_query() {
        assert_eq!(
            filename_from_path("https://img.heydealer.com/cars/a/1.jpg?w=1200#top"),
            "1.jpg"
        );
    }

    #[test]
    fn degenerate_segments() {
        assert_eq!(filename_from_path("https://img.example.com/cars/"), "image");
        assert_eq!(filename_from_path("/a/.."), "image");
        assert_eq!(filename_from_path(""), "image");
        assert_eq!(filename_from_path("/a/..\\evil.jpg"), "evil.jpg");
    }

    #[test]
    fn entry_keeps_full_url_but_short_name() {
        let entry = PhotoEntry::new(
            "https://ci.encar.com/p/1.jpg?impolicy=heightRate",
            "/p/1.jpg",
        );
        assert_eq!(entry.filename, "1.jpg");
        assert!(entry.image_url.ends_with("impolicy=heightRate"));
    }
}
