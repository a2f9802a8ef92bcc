//! Image history store
//!
//! Mirrors the text history engine for encoded-image tokens: ordered,
//! deduplicated, bounded by its own `max_images_size`. No pin or filter
//! concept; identity is exact token equality, so a pixel-identical image
//! re-encoded through a different path may legitimately produce a new entry.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::error::ClipmateError;
use crate::events::{SubscriptionId, Subscribers};
use crate::settings::{self, SettingsStore};

use super::image::{decode_image, encode_image};

pub struct ImageStore {
    settings: Arc<SettingsStore>,
    images: Vec<String>,
    max_size: usize,
    subscribers: Subscribers<Vec<String>>,
}

impl ImageStore {
    /// Build the store from the persisted document.
    pub fn new(settings: Arc<SettingsStore>) -> Self {
        let images = settings.string_list(settings::KEY_IMAGES);
        let max_size = settings.max_images_size().max(1);

        info!(images_len = images.len(), max_size, "Image store loaded");

        ImageStore {
            settings,
            images,
            max_size,
            subscribers: Subscribers::new(),
        }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Notifications carry the full ordered token list.
    pub fn subscribe(
        &self,
        callback: impl Fn(&Vec<String>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    /// Encode a bitmap and add its token to the front of the list.
    ///
    /// Returns `Err` when encoding fails (nothing changed), `Ok(false)` when
    /// the token is already present, `Ok(true)` when the entry was added.
    pub fn add(&mut self, image: &arboard::ImageData) -> Result<bool> {
        let token = encode_image(image).ok_or_else(|| {
            ClipmateError::ImageEncode(format!("{}x{} bitmap", image.width, image.height))
        })?;

        if self.images.iter().any(|entry| *entry == token) {
            debug!("Image already in history, ignoring");
            return Ok(false);
        }

        self.images.insert(0, token);
        self.images.truncate(self.max_size);
        debug!(
            width = image.width,
            height = image.height,
            images_len = self.images.len(),
            "Added image entry to history"
        );
        self.commit();
        Ok(true)
    }

    /// Delete a token if present; reports whether anything was removed.
    pub fn remove(&mut self, token: &str) -> bool {
        let before = self.images.len();
        self.images.retain(|entry| entry != token);
        if self.images.len() == before {
            return false;
        }
        self.commit();
        true
    }

    pub fn clear(&mut self) {
        self.images.clear();
        self.commit();
    }

    /// Update the bound; truncates immediately when now over.
    /// Non-positive bounds are clamped to 1.
    pub fn set_max_size(&mut self, new_size: usize) {
        self.max_size = new_size.max(1);
        if self.images.len() > self.max_size {
            self.images.truncate(self.max_size);
            self.commit();
        }
    }

    /// Decode a token for display or paste.
    ///
    /// Never fails: malformed tokens resolve to the empty sentinel bitmap.
    pub fn resolve(&self, token: &str) -> arboard::ImageData<'static> {
        decode_image(token)
    }

    fn commit(&self) {
        self.settings
            .set_string_list(settings::KEY_IMAGES, &self.images);
        self.subscribers.emit(&self.images);
    }
}
