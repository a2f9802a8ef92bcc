//! Clipboard image encoding and decoding
//!
//! Converts clipboard bitmaps to/from the self-describing transport format
//! stored in the settings document: `data:image/png;base64,<payload>`.
//! PNG keeps the round-trip lossless.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::borrow::Cow;
use std::io::Cursor;
use tracing::warn;

/// MIME-style prefix for encoded clipboard images
pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Encode a clipboard bitmap as a data-URI PNG token.
///
/// Returns None on an empty bitmap or serialization failure, never panics.
pub fn encode_image(image: &arboard::ImageData) -> Option<String> {
    if image.width == 0 || image.height == 0 || image.bytes.is_empty() {
        return None;
    }

    let rgba = image::RgbaImage::from_raw(
        image.width as u32,
        image.height as u32,
        image.bytes.to_vec(),
    )?;

    let mut png_data = Vec::new();
    let mut cursor = Cursor::new(&mut png_data);
    if let Err(e) = rgba.write_to(&mut cursor, image::ImageFormat::Png) {
        warn!(error = %e, "Failed to encode clipboard image as PNG");
        return None;
    }

    Some(format!("{}{}", DATA_URI_PREFIX, BASE64.encode(&png_data)))
}

/// Decode an encoded-image token back to a bitmap, if well-formed.
///
/// The data-URI prefix is stripped when present (everything up to and
/// including the first comma), so bare base64 payloads also decode.
pub fn try_decode_image(token: &str) -> Option<arboard::ImageData<'static>> {
    let payload = match token.split_once(',') {
        Some((_, rest)) => rest,
        None => token,
    };

    let png_bytes = BASE64.decode(payload).ok()?;
    let decoded =
        image::load_from_memory_with_format(&png_bytes, image::ImageFormat::Png).ok()?;
    let rgba = decoded.to_rgba8();

    Some(arboard::ImageData {
        width: rgba.width() as usize,
        height: rgba.height() as usize,
        bytes: rgba.into_raw().into(),
    })
}

/// Decode an encoded-image token, falling back to the empty sentinel bitmap.
///
/// Callers can always check [`is_empty_image`] instead of null-handling.
pub fn decode_image(token: &str) -> arboard::ImageData<'static> {
    match try_decode_image(token) {
        Some(image) => image,
        None => {
            warn!(
                token_len = token.len(),
                "Malformed encoded image, returning empty bitmap"
            );
            empty_image()
        }
    }
}

/// The 0x0 sentinel bitmap
pub fn empty_image() -> arboard::ImageData<'static> {
    arboard::ImageData {
        width: 0,
        height: 0,
        bytes: Cow::Owned(Vec::new()),
    }
}

/// Whether a bitmap is the empty sentinel (not paintable)
pub fn is_empty_image(image: &arboard::ImageData) -> bool {
    image.width == 0 || image.height == 0 || image.bytes.is_empty()
}

/// Compute a cheap similarity fingerprint of a bitmap for change detection.
///
/// Dimensions plus a bounded sample of the pixel bytes. Collisions are
/// acceptable: this is a change filter, not a content key.
pub fn image_fingerprint(image: &arboard::ImageData) -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    image.width.hash(&mut hasher);
    image.height.hash(&mut hasher);

    // Hash first 1KB of pixels for quick comparison
    let sample_size = 1024.min(image.bytes.len());
    image.bytes[..sample_size].hash(&mut hasher);

    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_bitmap() -> arboard::ImageData<'static> {
        arboard::ImageData {
            width: 2,
            height: 2,
            bytes: vec![
                255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255, 255, 255, 255, 255,
            ]
            .into(),
        }
    }

    #[test]
    fn test_encode_produces_data_uri() {
        let encoded = encode_image(&test_bitmap()).expect("Should encode");
        assert!(
            encoded.starts_with(DATA_URI_PREFIX),
            "token should carry the data-URI prefix: {}",
            &encoded[..40.min(encoded.len())]
        );
    }

    #[test]
    fn test_round_trip_is_pixel_identical() {
        let original = test_bitmap();
        let encoded = encode_image(&original).expect("Should encode");
        let decoded = decode_image(&encoded);

        assert_eq!(original.width, decoded.width);
        assert_eq!(original.height, decoded.height);
        assert_eq!(original.bytes.as_ref(), decoded.bytes.as_ref());
    }

    #[test]
    fn test_encode_empty_bitmap_returns_none() {
        assert!(encode_image(&empty_image()).is_none());

        let zero_width = arboard::ImageData {
            width: 0,
            height: 4,
            bytes: vec![0u8; 16].into(),
        };
        assert!(encode_image(&zero_width).is_none());
    }

    #[test]
    fn test_encode_truncated_pixel_buffer_returns_none() {
        let bad = arboard::ImageData {
            width: 100,
            height: 100,
            bytes: vec![0u8; 12].into(),
        };
        assert!(encode_image(&bad).is_none(), "row data too short for dims");
    }

    #[test]
    fn test_decode_malformed_returns_empty_sentinel() {
        let decoded = decode_image("data:image/png;base64,!!!not-base64!!!");
        assert!(is_empty_image(&decoded));

        let decoded = decode_image("no prefix and not base64 at all");
        assert!(is_empty_image(&decoded));
    }

    #[test]
    fn test_decode_accepts_bare_base64_payload() {
        let encoded = encode_image(&test_bitmap()).unwrap();
        let payload = encoded.strip_prefix(DATA_URI_PREFIX).unwrap();

        let decoded = decode_image(payload);
        assert_eq!(decoded.width, 2);
        assert_eq!(decoded.height, 2);
    }

    #[test]
    fn test_fingerprint_deterministic() {
        let image = test_bitmap();
        assert_eq!(image_fingerprint(&image), image_fingerprint(&image));
    }

    #[test]
    fn test_fingerprint_differs_on_content_and_dims() {
        let image = test_bitmap();

        let mut other_bytes = image.bytes.to_vec();
        other_bytes[0] = 1;
        let other = arboard::ImageData {
            width: 2,
            height: 2,
            bytes: other_bytes.into(),
        };
        assert_ne!(image_fingerprint(&image), image_fingerprint(&other));

        let transposed = arboard::ImageData {
            width: 1,
            height: 4,
            bytes: image.bytes.to_vec().into(),
        };
        assert_ne!(image_fingerprint(&image), image_fingerprint(&transposed));
    }
}
