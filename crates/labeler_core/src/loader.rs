use anyhow::{Context, Result};
use image::{DynamicImage, ImageDecoder, ImageReader, RgbImage};
use std::path::Path;

/// Turns an image file into displayable pixels.
pub trait ImageLoader {
    fn load(&self, path: &Path) -> Result<RgbImage>;
}

/// Decodes with the `image` crate, applies the EXIF orientation and converts
/// to 8-bit RGB.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrientedRgbLoader;

impl ImageLoader for OrientedRgbLoader {
    fn load(&self, path: &Path) -> Result<RgbImage> {
        let mut decoder = ImageReader::open(path)
            .with_context(|| format!("cannot open image: {}", path.display()))?
            .with_guessed_format()
            .with_context(|| format!("cannot detect image format: {}", path.display()))?
            .into_decoder()
            .with_context(|| format!("cannot decode image: {}", path.display()))?;
        let orientation = decoder
            .orientation()
            .with_context(|| format!("cannot read EXIF orientation: {}", path.display()))?;
        let mut img = DynamicImage::from_decoder(decoder)
            .with_context(|| format!("cannot decode image: {}", path.display()))?;
        img.apply_orientation(orientation);
        Ok(img.to_rgb8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn loads_png_as_rgb() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("tiny.png");
        RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 128])).save(&path)?;

        let img = OrientedRgbLoader.load(&path)?;
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30]);
        Ok(())
    }

    #[test]
    fn garbage_file_fails_to_load() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image")?;
        assert!(OrientedRgbLoader.load(&path).is_err());
        Ok(())
    }
}
