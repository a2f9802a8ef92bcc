//! System clipboard access
//!
//! `ClipboardProvider` is the seam between the change detector and the OS
//! clipboard; `SystemClipboard` implements it over `arboard`. "No content of
//! this type" is normalized to an empty/None payload so callers only see
//! hard platform failures as errors.

use anyhow::{Context, Result};
use arboard::ImageData;

use crate::error::ClipmateError;

pub trait ClipboardProvider {
    /// Current text payload; empty string when the clipboard holds no text.
    fn read_text(&mut self) -> Result<String>;
    /// Current image payload; None when the clipboard holds no image.
    fn read_image(&mut self) -> Result<Option<ImageData<'static>>>;
    fn write_text(&mut self, text: &str) -> Result<()>;
    fn write_image(&mut self, image: &ImageData) -> Result<()>;
}

pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new().context("Failed to create clipboard instance")?;
        Ok(SystemClipboard { inner })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn read_text(&mut self) -> Result<String> {
        match self.inner.get_text() {
            Ok(text) => Ok(text),
            Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
            Err(e) => Err(ClipmateError::Clipboard(e.to_string()).into()),
        }
    }

    fn read_image(&mut self) -> Result<Option<ImageData<'static>>> {
        match self.inner.get_image() {
            Ok(image) => Ok(Some(image)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(ClipmateError::Clipboard(e.to_string()).into()),
        }
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text.to_string())
            .map_err(|e| ClipmateError::Clipboard(e.to_string()).into())
    }

    fn write_image(&mut self, image: &ImageData) -> Result<()> {
        let borrowed = ImageData {
            width: image.width,
            height: image.height,
            bytes: std::borrow::Cow::Borrowed(image.bytes.as_ref()),
        };
        self.inner
            .set_image(borrowed)
            .map_err(|e| ClipmateError::Clipboard(e.to_string()).into())
    }
}
