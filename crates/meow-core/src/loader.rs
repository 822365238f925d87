//! The fallback loader.
//!
//! A MEOW file is, at the container level, an ordinary image: any viewer
//! unaware of the hidden payload renders it correctly, and MEOW-aware
//! callers degrade gracefully on non-MEOW or corrupted files. Only I/O and
//! undecodable-image failures surface as errors here; a missing payload
//! never does.

use std::fs::File;
use std::path::Path;

use image::{ImageError, ImageFormat, RgbaImage};

use crate::error::MeowError;
use crate::extractor::{self, ExtractConfig, PayloadOutcome};
use crate::result::Result;

/// Load any valid image file as a displayable pixel buffer.
pub fn load(path: &Path) -> Result<RgbaImage> {
    let decoded = image::open(path).map_err(|e| {
        log::error!("cannot open {path:?} as an image: {e}");
        match e {
            ImageError::IoError(source) => MeowError::ReadError { source },
            _ => MeowError::InvalidImageMedia,
        }
    })?;

    Ok(decoded.to_rgba8())
}

/// Load an image and attempt payload recovery with the default
/// configuration. An absent payload is not an error.
pub fn load_with_payload(path: &Path) -> Result<(RgbaImage, PayloadOutcome)> {
    load_with_payload_using(path, &ExtractConfig::default())
}

/// Load an image and attempt payload recovery with an explicit
/// configuration.
pub fn load_with_payload_using(
    path: &Path,
    config: &ExtractConfig,
) -> Result<(RgbaImage, PayloadOutcome)> {
    let image = load(path)?;
    let outcome = extractor::extract_with_config(&image, config);
    Ok((image, outcome))
}

/// Save a pixel buffer as PNG, staged through a temporary file in the
/// destination directory and renamed into place, so no observer ever sees
/// a partially written carrier.
pub fn save_png_atomic(image: &RgbaImage, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = tempfile::Builder::new()
        .prefix(".meow-staged")
        .suffix(".png")
        .tempfile_in(dir)
        .map_err(|source| MeowError::WriteError { source })?;

    write_png(image, staged.as_file_mut())?;

    staged.persist(path).map_err(|e| MeowError::WriteError {
        source: e.error,
    })?;

    Ok(())
}

fn write_png(image: &RgbaImage, file: &mut File) -> Result<()> {
    image.write_to(file, ImageFormat::Png).map_err(|e| {
        log::error!("PNG encoding failed: {e}");
        match e {
            ImageError::IoError(source) => MeowError::WriteError { source },
            _ => MeowError::ImageEncodingError,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder::{embed, EmbedConfig};
    use crate::extractor::MissingReason;
    use crate::test_utils::{prepare_noise_image, sample_payload};
    use tempfile::TempDir;

    #[test]
    fn saved_images_load_back_bit_identical() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("carrier.png");

        let image = prepare_noise_image(32, 32);
        save_png_atomic(&image, &path).unwrap();

        assert_eq!(load(&path).unwrap(), image);
    }

    #[test]
    fn a_plain_image_loads_with_absent_payload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.png");

        let image = prepare_noise_image(48, 48);
        save_png_atomic(&image, &path).unwrap();

        let (loaded, outcome) = load_with_payload(&path).unwrap();
        assert_eq!(loaded, image);
        assert_eq!(outcome, PayloadOutcome::Missing(MissingReason::NotPresent));
    }

    #[test]
    fn a_meow_file_loads_with_its_payload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cat.meow");

        let payload = sample_payload();
        let stego = embed(
            &prepare_noise_image(96, 96),
            &payload,
            &EmbedConfig::default(),
        )
        .unwrap();
        save_png_atomic(&stego, &path).unwrap();

        let (_, outcome) = load_with_payload(&path).unwrap();
        assert_eq!(outcome, PayloadOutcome::Recovered(payload));
    }

    #[test]
    fn a_missing_file_is_an_io_error() {
        let result = load(Path::new("does/not/exist.png"));
        assert!(matches!(result, Err(MeowError::ReadError { .. })));
    }

    #[test]
    fn a_non_image_file_is_invalid_media() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"definitely not pixels").unwrap();

        let result = load(&path);
        assert!(matches!(result, Err(MeowError::InvalidImageMedia)));
    }

    #[test]
    fn staging_leaves_no_temp_files_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.png");

        save_png_atomic(&prepare_noise_image(16, 16), &path).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("out.png")]);
    }
}
