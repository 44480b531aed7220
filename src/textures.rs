//! Food icon textures.
//!
//! Icons are PNG or JPEG files in the asset directory, decoded to RGBA8 with
//! the `image` crate. A missing or broken icon is replaced by a procedural
//! "plate" (a soft-edged disc) so the field always has something to draw.
//!
//! # Supported Formats
//!
//! - PNG (recommended, keeps transparency)
//! - JPEG

use std::path::{Path, PathBuf};

use crate::error::TextureError;

/// Default icons, in texture-slot order.
pub const DEFAULT_ICONS: [&str; 3] = ["soup.png", "persimmon.png", "onigiri.png"];

/// Side length of generated fallback textures.
const PLATE_SIZE: u32 = 64;

/// Filter mode for texture sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Smooth linear filtering (default).
    #[default]
    Linear,
    /// Sharp nearest-neighbor filtering.
    Nearest,
}

/// Decoded RGBA8 image for one texture slot.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodTexture {
    /// File name or generator name, used in logs and labels.
    pub name: String,
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub filter: FilterMode,
}

impl FoodTexture {
    /// Wrap raw RGBA data.
    ///
    /// # Panics
    ///
    /// Panics if `data` is not `width * height * 4` bytes.
    pub fn from_rgba(name: impl Into<String>, data: Vec<u8>, width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width * height * 4) as usize,
            "RGBA data size mismatch"
        );
        Self {
            name: name.into(),
            data,
            width,
            height,
            filter: FilterMode::Linear,
        }
    }

    /// Decode an image file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let img = image::load_from_memory(&bytes)?.into_rgba8();
        let (width, height) = img.dimensions();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::from_rgba(name, img.into_raw(), width, height))
    }

    /// A disc of `color` fading to transparent at the rim.
    pub fn plate(name: impl Into<String>, color: [u8; 4]) -> Self {
        let size = PLATE_SIZE;
        let centre = (size as f32 - 1.0) / 2.0;
        let radius = size as f32 / 2.0;
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 - centre;
                let dy = y as f32 - centre;
                let d = (dx * dx + dy * dy).sqrt() / radius;
                // 1 inside, ramps to 0 over the outer tenth.
                let coverage = ((1.0 - d) * 10.0).clamp(0.0, 1.0);
                // Slight rim shading so plates read as round.
                let shade = 1.0 - 0.25 * d.min(1.0);
                data.push((color[0] as f32 * shade) as u8);
                data.push((color[1] as f32 * shade) as u8);
                data.push((color[2] as f32 * shade) as u8);
                data.push((color[3] as f32 * coverage).round() as u8);
            }
        }
        Self::from_rgba(name, data, size, size)
    }

    /// Fallback plate for a given slot, tinted per slot.
    pub fn fallback(slot: usize) -> Self {
        const TINTS: [[u8; 4]; 3] = [
            [232, 140, 60, 255],  // soup
            [240, 110, 40, 255],  // persimmon
            [245, 245, 235, 255], // onigiri
        ];
        Self::plate(format!("plate-{}", slot), TINTS[slot % TINTS.len()])
    }

    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }
}

/// Load every icon in `names` from `dir`, substituting fallbacks for failures.
///
/// Never empty: an empty `names` yields a single fallback plate.
pub fn load_icons<S: AsRef<str>>(dir: &Path, names: &[S]) -> Vec<FoodTexture> {
    if names.is_empty() {
        return vec![FoodTexture::fallback(0)];
    }
    names
        .iter()
        .enumerate()
        .map(|(slot, name)| {
            let path: PathBuf = dir.join(name.as_ref());
            match FoodTexture::load(&path) {
                Ok(texture) => {
                    tracing::debug!(path = %path.display(), texture.width, texture.height, "loaded food icon");
                    texture
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "food icon unavailable, using plate");
                    FoodTexture::fallback(slot)
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plate_is_round() {
        let plate = FoodTexture::plate("test", [255, 0, 0, 255]);
        assert_eq!(plate.data.len(), (plate.width * plate.height * 4) as usize);

        let alpha = |x: u32, y: u32| plate.data[((y * plate.width + x) * 4 + 3) as usize];
        assert_eq!(alpha(0, 0), 0);
        assert_eq!(alpha(plate.width / 2, plate.height / 2), 255);
    }

    #[test]
    #[should_panic(expected = "RGBA data size mismatch")]
    fn test_from_rgba_checks_size() {
        FoodTexture::from_rgba("bad", vec![0; 3], 1, 1);
    }

    #[test]
    fn test_missing_icons_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let icons = load_icons(dir.path(), &DEFAULT_ICONS);
        assert_eq!(icons.len(), 3);
        assert_eq!(icons[0].name, "plate-0");
        assert_eq!(icons[2].name, "plate-2");
    }

    #[test]
    fn test_loads_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        image::RgbaImage::from_pixel(2, 3, image::Rgba([1, 2, 3, 4]))
            .save(&path)
            .unwrap();

        let icons = load_icons(dir.path(), &["dot.png"]);
        assert_eq!(icons[0].name, "dot.png");
        assert_eq!((icons[0].width, icons[0].height), (2, 3));
        assert_eq!(&icons[0].data[..4], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_corrupt_file_is_image_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(matches!(FoodTexture::load(&path), Err(TextureError::ImageLoad(_))));
    }

    #[test]
    fn test_empty_names_still_yield_a_texture() {
        let names: [&str; 0] = [];
        assert_eq!(load_icons(Path::new("."), &names).len(), 1);
    }
}
