use serde::{Deserialize, Serialize};

/// Character caps applied to incoming image fields before they reach any
/// markup. Oversized values are truncated, not rejected.
pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_ALT_CHARS: usize = 100;
pub const MAX_SRC_CHARS: usize = 500;
pub const MAX_DESCRIPTION_CHARS: usize = 200;

const DEFAULT_ALT: &str = "Gallery image";

/// One entry of `images.json`, exactly as it arrives. Every field is
/// optional and untrusted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageDescriptor {
    pub title: Option<String>,
    pub alt: Option<String>,
    pub src: Option<String>,
    pub description: Option<String>,
}

/// A descriptor after boundary sanitization. Immutable for the lifetime of
/// one page view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryImage {
    pub title: String,
    pub alt: String,
    pub src: String,
    pub description: String,
}

impl ImageDescriptor {
    /// Coerce missing fields to safe defaults and cap every string.
    /// The alt text falls back to the title, then to a generic label.
    pub fn sanitize(self) -> GalleryImage {
        let title = cap(self.title.unwrap_or_default(), MAX_TITLE_CHARS);
        let alt_source = self
            .alt
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| {
                if title.trim().is_empty() {
                    DEFAULT_ALT.to_string()
                } else {
                    title.clone()
                }
            });
        GalleryImage {
            alt: cap(alt_source, MAX_ALT_CHARS),
            src: cap(self.src.unwrap_or_default(), MAX_SRC_CHARS),
            description: cap(self.description.unwrap_or_default(), MAX_DESCRIPTION_CHARS),
            title,
        }
    }
}

/// Truncate to at most `max` characters, never splitting a code point.
fn cap(s: String, max: usize) -> String {
    if s.chars().count() <= max {
        return s;
    }
    s.chars().take(max).collect()
}
