//! Product image gallery.

use crate::view::{GalleryView, ThumbnailView};

#[derive(Debug, Clone, Default)]
pub struct Gallery {
    images: Vec<String>,
    active: usize,
}

impl Gallery {
    #[must_use]
    pub const fn new(images: Vec<String>) -> Self {
        Self { images, active: 0 }
    }

    /// Show the thumbnail at `index` as the main image.
    ///
    /// Out-of-range indexes are ignored. Returns `true` if the main image changed.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.images.len() || index == self.active {
            return false;
        }
        self.active = index;
        true
    }

    #[must_use]
    pub fn main_image(&self) -> Option<&str> {
        self.images.get(self.active).map(String::as_str)
    }

    #[must_use]
    pub fn view(&self) -> GalleryView {
        GalleryView {
            main_image: self.main_image().map(str::to_string),
            thumbnails: self
                .images
                .iter()
                .enumerate()
                .map(|(index, url)| ThumbnailView {
                    url: url.clone(),
                    active: index == self.active,
                })
                .collect(),
        }
    }
}
