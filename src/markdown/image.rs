//! Embedded image extraction.

use crate::error::{Error, Result};
use crate::ir::ImageBlob;

/// An image pulled out of the document during conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Assigned file name, e.g. `img_0.png`.
    pub filename: String,
    pub bytes: Vec<u8>,
    /// MIME type as reported by the source.
    pub content_type: String,
}

/// File extension for a supported image MIME type.
///
/// # Examples
///
/// ```
/// use mdmaker::markdown::image_extension;
///
/// assert_eq!(image_extension("image/png").unwrap(), ".png");
/// assert_eq!(image_extension("image/jpeg").unwrap(), ".jpg");
/// assert!(image_extension("application/pdf").is_err());
/// ```
pub fn image_extension(content_type: &str) -> Result<&'static str> {
    let lower = content_type.to_ascii_lowercase();
    if lower.ends_with("/png") {
        Ok(".png")
    } else if lower.ends_with("/gif") {
        Ok(".gif")
    } else if lower.ends_with("/jpg") || lower.ends_with("/jpeg") {
        Ok(".jpg")
    } else {
        Err(Error::UnsupportedImageType(content_type.to_string()))
    }
}

/// Assigns sequential file names to images and collects their bytes.
///
/// One extractor is shared by every section of a conversion so numbering
/// continues from header to body to footer.
#[derive(Debug, Clone)]
pub struct ImageExtractor {
    prefix: String,
    counter: usize,
    images: Vec<ImageRecord>,
}

impl Default for ImageExtractor {
    fn default() -> Self {
        Self::new("img_")
    }
}

impl ImageExtractor {
    /// Create an extractor naming files `<prefix><n><ext>`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
            images: Vec::new(),
        }
    }

    /// Record an image and return its Markdown reference.
    ///
    /// Fails with [`Error::UnsupportedImageType`] for anything but
    /// png, gif and jpeg.
    pub fn extract(&mut self, blob: &ImageBlob) -> Result<String> {
        let ext = image_extension(&blob.content_type)?;
        let filename = format!("{}{}{}", self.prefix, self.counter, ext);
        self.counter += 1;

        log::debug!(
            "extracted {filename} ({}, {} bytes)",
            blob.content_type,
            blob.bytes.len()
        );

        let reference = format!("![image alt text]({filename})");
        self.images.push(ImageRecord {
            filename,
            bytes: blob.bytes.clone(),
            content_type: blob.content_type.clone(),
        });
        Ok(reference)
    }

    /// Number of images extracted so far.
    pub fn count(&self) -> usize {
        self.counter
    }

    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    pub fn into_images(self) -> Vec<ImageRecord> {
        self.images
    }
}
