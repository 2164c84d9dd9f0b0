//! Photo handling around the store: turning an image file into the `data:`
//! URI an item carries, shrinking oversized photos before they are stored, and
//! writing a stored photo back out so the system viewer can open it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use tracing::{debug, warn};

use crate::models::WardrobeItem;

/// Largest file accepted for import.
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;
/// Photos at or above this size get re-encoded before storage.
pub const COMPRESS_THRESHOLD_BYTES: usize = 500 * 1024;
/// Bounding box for compressed photos.
pub const MAX_DIMENSION: u32 = 1200;
/// Quality used when re-encoding compressed photos.
pub const JPEG_QUALITY: u8 = 70;

/// Read an image file and return it as a `data:` URI ready for
/// [`WardrobeItem::new`]. Large photos are compressed on the way; if that
/// fails the original bytes are kept.
pub fn load_data_uri(path: &Path) -> Result<String> {
    let metadata =
        fs::metadata(path).with_context(|| format!("failed to read {}", path.display()))?;
    if !metadata.is_file() {
        bail!("{} is not a file", path.display());
    }
    if metadata.len() > MAX_IMAGE_BYTES {
        bail!("Image must be smaller than 10MB.");
    }

    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let format = image::guess_format(&bytes).map_err(|_| anyhow!("Please choose an image file."))?;

    let (mime, payload) = match compress(&bytes) {
        Ok(Some(jpeg)) => {
            debug!(
                path = %path.display(),
                original = bytes.len(),
                compressed = jpeg.len(),
                "photo compressed"
            );
            ("image/jpeg", jpeg)
        }
        Ok(None) => (format.to_mime_type(), bytes),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "compression failed, keeping original");
            (format.to_mime_type(), bytes)
        }
    };

    Ok(encode_data_uri(mime, &payload))
}

/// Shrink a photo to fit [`MAX_DIMENSION`] and re-encode it as JPEG. Returns
/// `None` when the photo is already small enough to store as is.
pub fn compress(bytes: &[u8]) -> Result<Option<Vec<u8>>> {
    if bytes.len() < COMPRESS_THRESHOLD_BYTES {
        return Ok(None);
    }

    let img = image::load_from_memory(bytes).context("failed to decode image")?;
    let img = if img.width() > MAX_DIMENSION || img.height() > MAX_DIMENSION {
        img.resize(MAX_DIMENSION, MAX_DIMENSION, FilterType::Triangle)
    } else {
        img
    };

    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
    DynamicImage::ImageRgb8(img.to_rgb8())
        .write_with_encoder(encoder)
        .context("failed to encode JPEG")?;

    Ok(Some(buf))
}

/// Wrap raw image bytes in a base64 `data:` URI.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Split a base64 `data:` URI into its mime type and decoded bytes.
pub fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>)> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| anyhow!("photo is not a data URI"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| anyhow!("photo data URI has no payload"))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| anyhow!("photo data URI is not base64 encoded"))?;
    let bytes = STANDARD
        .decode(payload.trim())
        .context("photo payload is not valid base64")?;
    Ok((mime.to_string(), bytes))
}

/// Write the item's photo into `cache_dir` and return the file path.
pub fn export_for_viewing(item: &WardrobeItem, cache_dir: &Path) -> Result<PathBuf> {
    let (mime, bytes) = decode_data_uri(&item.image_base64)?;
    let extension = ImageFormat::from_mime_type(&mime)
        .and_then(|format| format.extensions_str().first().copied())
        .unwrap_or("img");

    fs::create_dir_all(cache_dir)
        .with_context(|| format!("failed to create {}", cache_dir.display()))?;
    let path = cache_dir.join(format!("{}.{extension}", file_stem(&item.id)));
    fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Delete every exported copy of the photo for `id`. A missing cache folder
/// counts as nothing to remove.
pub fn remove_exported(id: &str, cache_dir: &Path) -> Result<usize> {
    let stem = file_stem(id);
    remove_cached(cache_dir, |path| {
        path.file_stem().and_then(|s| s.to_str()) == Some(stem.as_str())
    })
}

/// Empty the export folder, leaving the folder itself in place.
pub fn clear_exported(cache_dir: &Path) -> Result<usize> {
    remove_cached(cache_dir, |_| true)
}

fn remove_cached(cache_dir: &Path, matches: impl Fn(&Path) -> bool) -> Result<usize> {
    let entries = match fs::read_dir(cache_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", cache_dir.display()))
        }
    };

    let mut removed = 0;
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to read {}", cache_dir.display()))?
            .path();
        if !path.is_file() || !matches(&path) {
            continue;
        }
        fs::remove_file(&path).with_context(|| format!("failed to remove {}", path.display()))?;
        removed += 1;
    }
    debug!(dir = %cache_dir.display(), removed, "pruned exported photos");
    Ok(removed)
}

fn file_stem(id: &str) -> String {
    id.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{GenericImageView, Rgb, RgbImage};

    use super::*;
    use crate::models::{Category, Season};

    fn png_bytes(img: RgbImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    fn noisy_png(width: u32, height: u32) -> Vec<u8> {
        png_bytes(RgbImage::from_fn(width, height, |x, y| {
            let v = (x.wrapping_mul(2_654_435_761) ^ y.wrapping_mul(40_503))
                .wrapping_mul(2_246_822_519);
            Rgb([v as u8, (v >> 8) as u8, (v >> 16) as u8])
        }))
    }

    #[test]
    fn small_png_becomes_png_data_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shirt.png");
        fs::write(&path, png_bytes(RgbImage::new(4, 4))).unwrap();

        let uri = load_data_uri(&path).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));

        let (mime, bytes) = decode_data_uri(&uri).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(image::load_from_memory(&bytes).unwrap().dimensions(), (4, 4));
    }

    #[test]
    fn large_photo_is_resized_to_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coat.png");
        let original = noisy_png(1500, 700);
        assert!(original.len() >= COMPRESS_THRESHOLD_BYTES);
        fs::write(&path, original).unwrap();

        let uri = load_data_uri(&path).unwrap();
        let (mime, bytes) = decode_data_uri(&uri).unwrap();
        assert_eq!(mime, "image/jpeg");
        let (w, h) = image::load_from_memory(&bytes).unwrap().dimensions();
        assert!(w <= MAX_DIMENSION && h <= MAX_DIMENSION);
        assert_eq!(w, MAX_DIMENSION);
    }

    #[test]
    fn non_image_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "just some text").unwrap();

        let err = load_data_uri(&path).unwrap_err();
        assert_eq!(err.to_string(), "Please choose an image file.");
    }

    #[test]
    fn oversized_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.png");
        let file = fs::File::create(&path).unwrap();
        file.set_len(MAX_IMAGE_BYTES + 1).unwrap();

        let err = load_data_uri(&path).unwrap_err();
        assert_eq!(err.to_string(), "Image must be smaller than 10MB.");
    }

    #[test]
    fn malformed_data_uris_are_errors() {
        assert!(decode_data_uri("image/png;base64,AAAA").is_err());
        assert!(decode_data_uri("data:image/png;base64").is_err());
        assert!(decode_data_uri("data:image/png,plain").is_err());
    }

    #[test]
    fn export_writes_file_named_after_item() {
        let dir = tempfile::tempdir().unwrap();
        let uri = encode_data_uri("image/png", &png_bytes(RgbImage::new(2, 2)));
        let mut item = WardrobeItem::new(Season::Winter, Category::Shoes, "boots", uri);
        item.id = "a/b".into();

        let path = export_for_viewing(&item, &dir.path().join("images")).unwrap();
        assert_eq!(path.file_name().unwrap(), "a_b.png");
        assert!(path.is_file());
    }

    #[test]
    fn pruning_removes_only_matching_exports() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("images");
        let uri = encode_data_uri("image/png", &png_bytes(RgbImage::new(2, 2)));
        let mut boots = WardrobeItem::new(Season::Winter, Category::Shoes, "", uri.clone());
        boots.id = "boots".into();
        let mut skirt = WardrobeItem::new(Season::Summer, Category::Skirts, "", uri);
        skirt.id = "skirt".into();
        let boots_path = export_for_viewing(&boots, &cache).unwrap();
        let skirt_path = export_for_viewing(&skirt, &cache).unwrap();

        assert_eq!(remove_exported("boots", &cache).unwrap(), 1);
        assert!(!boots_path.exists());
        assert!(skirt_path.is_file());

        assert_eq!(clear_exported(&cache).unwrap(), 1);
        assert!(!skirt_path.exists());
        assert!(cache.is_dir());
    }

    #[test]
    fn pruning_a_missing_cache_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("never-created");
        assert_eq!(remove_exported("boots", &cache).unwrap(), 0);
        assert_eq!(clear_exported(&cache).unwrap(), 0);
    }
}
