//! Image handles and the decode service
//!
//! Decoding and texture upload belong to the host; the toolkit only needs a
//! sized handle to lay out and hand back to the canvas.

use std::collections::HashMap;
use std::path::Path;

use log::{debug, warn};
use slotmap::{new_key_type, SlotMap};

use crate::error::{WidgetError, WidgetResult};

/// Decoded image reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    /// Source path, also the texture key for the canvas
    pub path: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Image decode service
pub trait ImageDecoder {
    /// Decode `path`, or report why it could not be read
    fn decode(&self, path: &str) -> WidgetResult<ImageHandle>;
}

/// Reads image headers from disk with the `image` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImageDecoder;

impl ImageDecoder for FileImageDecoder {
    fn decode(&self, path: &str) -> WidgetResult<ImageHandle> {
        let (width, height) = image::image_dimensions(Path::new(path)).map_err(|e| {
            warn!("Failed to decode image {}: {}", path, e);
            WidgetError::ImageDecode {
                path: path.to_string(),
                reason: e.to_string(),
            }
        })?;
        debug!("Decoded image {}x{} from {}", width, height, path);
        Ok(ImageHandle {
            path: path.to_string(),
            width,
            height,
        })
    }
}

new_key_type! {
    /// Key of a cached image in an [`IconRegistry`]
    pub struct IconId;
}

/// Decode-once cache of images shared by widgets
pub struct IconRegistry {
    decoder: Box<dyn ImageDecoder>,
    images: SlotMap<IconId, ImageHandle>,
    by_path: HashMap<String, IconId>,
}

impl IconRegistry {
    /// Registry backed by `decoder`
    pub fn new(decoder: Box<dyn ImageDecoder>) -> Self {
        Self {
            decoder,
            images: SlotMap::with_key(),
            by_path: HashMap::new(),
        }
    }

    /// Decode `path` unless it is already cached
    pub fn load(&mut self, path: &str) -> WidgetResult<IconId> {
        if let Some(&id) = self.by_path.get(path) {
            return Ok(id);
        }
        let image = self.decoder.decode(path)?;
        let id = self.images.insert(image);
        self.by_path.insert(path.to_string(), id);
        Ok(id)
    }

    /// Cached image
    pub fn get(&self, id: IconId) -> Option<&ImageHandle> {
        self.images.get(id)
    }

    /// Load and clone the handle in one step
    pub fn handle(&mut self, path: &str) -> WidgetResult<ImageHandle> {
        let id = self.load(path)?;
        self.images
            .get(id)
            .cloned()
            .ok_or_else(|| WidgetError::ImageDecode {
                path: path.to_string(),
                reason: "evicted".to_string(),
            })
    }

    /// Drop a cached image
    pub fn remove(&mut self, id: IconId) -> Option<ImageHandle> {
        let image = self.images.remove(id)?;
        self.by_path.remove(&image.path);
        Some(image)
    }

    /// Number of cached images
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether nothing is cached
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl Default for IconRegistry {
    fn default() -> Self {
        Self::new(Box::new(FileImageDecoder))
    }
}
