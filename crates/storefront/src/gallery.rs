//! Product image gallery.
//!
//! The selected image travels in the `image` query parameter, so switching
//! images is a plain link and works without JavaScript.

use driftwood_core::VariantId;

use crate::product::product_href;
use crate::saleor::Media;

/// The large image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryImage {
    pub url: String,
    pub alt: String,
}

/// A thumbnail link below the main image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub url: String,
    pub alt: String,
    pub href: String,
    pub current: bool,
}

/// Everything the gallery partial renders.
///
/// `main` is `None` when the product has no media; the template then shows
/// a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    pub main: Option<GalleryImage>,
    pub thumbnails: Vec<Thumbnail>,
}

/// Clamp a requested image index into the media list.
#[must_use]
pub fn selected_index(requested: Option<usize>, len: usize) -> usize {
    requested.filter(|&i| i < len).unwrap_or(0)
}

impl GalleryView {
    #[must_use]
    pub fn build(
        media: &[Media],
        requested: Option<usize>,
        channel: &str,
        slug: &str,
        variant: Option<&VariantId>,
    ) -> Self {
        let selected = selected_index(requested, media.len());

        let main = media.get(selected).map(|m| GalleryImage {
            url: m.url.clone(),
            alt: alt_or(m.alt.as_deref(), || "Product image".to_string()),
        });

        let base = product_href(channel, slug);
        let thumbnails = media
            .iter()
            .enumerate()
            .map(|(index, m)| {
                let href = match variant {
                    Some(id) => format!(
                        "{base}?variant={}&image={index}",
                        urlencoding::encode(id.as_str())
                    ),
                    None => format!("{base}?image={index}"),
                };
                Thumbnail {
                    url: m.url.clone(),
                    alt: alt_or(m.alt.as_deref(), || format!("Thumbnail {}", index + 1)),
                    href,
                    current: index == selected,
                }
            })
            .collect();

        Self { main, thumbnails }
    }
}

fn alt_or(alt: Option<&str>, fallback: impl FnOnce() -> String) -> String {
    match alt {
        Some(alt) if !alt.is_empty() => alt.to_string(),
        _ => fallback(),
    }
}
