// Window icon loading
//
// The icon is cosmetic: callers log a failure and carry on without one.

use crate::error::IconError;
use png::{ColorType, Transformations};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use winit::window::Icon;

/// Decoded RGBA8 icon image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl IconImage {
    /// Convert into a winit window icon
    pub fn into_icon(self) -> Result<Icon, IconError> {
        Ok(Icon::from_rgba(self.rgba, self.width, self.height)?)
    }
}

/// Decode a PNG file into RGBA8
///
/// # Arguments
/// * `path` - Path to a PNG image
pub fn load_png<P: AsRef<Path>>(path: P) -> Result<IconImage, IconError> {
    let file = File::open(path)?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(Transformations::normalize_to_color8());

    let mut reader = decoder.read_info()?;
    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };

    // Large enough for RGBA8, the widest output after normalisation
    let mut buf = vec![0u8; width as usize * height as usize * 4];
    let frame = reader.next_frame(&mut buf)?;
    buf.truncate(frame.buffer_size());

    let rgba = match frame.color_type {
        ColorType::Rgba => buf,
        ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 0xFF])
            .collect(),
        ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 0xFF]).collect(),
        other => return Err(IconError::UnsupportedColor(other)),
    };

    Ok(IconImage {
        width,
        height,
        rgba,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufWriter;

    fn write_png(path: &Path, color: ColorType, data: &[u8], width: u32, height: u32) {
        let file = File::create(path).unwrap();
        let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("dg_icon_{}_{}.png", name, std::process::id()))
    }

    #[test]
    fn test_load_rgb_png_adds_alpha() {
        let path = temp_path("rgb");
        write_png(&path, ColorType::Rgb, &[255, 0, 0, 0, 255, 0], 2, 1);

        let icon = load_png(&path).unwrap();
        assert_eq!((icon.width, icon.height), (2, 1));
        assert_eq!(icon.rgba, vec![255, 0, 0, 255, 0, 255, 0, 255]);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_grayscale_png() {
        let path = temp_path("gray");
        write_png(&path, ColorType::Grayscale, &[10, 200], 1, 2);

        let icon = load_png(&path).unwrap();
        assert_eq!(icon.rgba, vec![10, 10, 10, 255, 200, 200, 200, 255]);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file() {
        let result = load_png("definitely/not/here.png");
        assert!(matches!(result, Err(IconError::Io(_))));
    }
}
