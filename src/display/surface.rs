// Display surface - zero-copy view over the engine's framebuffer
//
// The engine owns its framebuffer and rewrites it every frame. The surface
// only remembers where it lives and how it is laid out, so whatever the
// engine drew last is what the next paint shows. Nothing here copies or
// frees that memory.

use super::palette::{Palette, Rgb, PALETTE_SIZE};
use crate::error::SurfaceError;
use serde::{Deserialize, Serialize};
use std::ptr::NonNull;
use tracing::debug;

/// Pixel layout of the engine framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    /// 32-bit `0x00RRGGBB` words in native byte order
    Rgb32,
    /// 8-bit palette indices
    Indexed8,
}

impl PixelFormat {
    /// Size of one pixel in bytes
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb32 => 4,
            PixelFormat::Indexed8 => 1,
        }
    }
}

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Rectangle at the origin covering this size
    pub fn rect(self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Overlap of two rectangles (empty when they do not touch)
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= x || bottom <= y {
            return Rect::new(x, y, 0, 0);
        }
        Rect::new(x, y, right - x, bottom - y)
    }
}

/// View over an externally owned framebuffer
///
/// Holds a raw pointer because the engine keeps writing to the buffer for
/// as long as the surface exists. All access happens on the engine thread,
/// between engine frames.
pub struct Surface {
    buffer: NonNull<u8>,
    size: Size,
    stride: usize,
    format: PixelFormat,
    palette: Palette,
}

impl Surface {
    /// Wrap the engine framebuffer without copying it
    ///
    /// # Arguments
    /// * `buffer` - First byte of the framebuffer
    /// * `width`, `height` - Resolution in pixels
    /// * `format` - Pixel layout
    /// * `stride` - Bytes between the starts of consecutive rows
    ///
    /// # Safety
    /// `buffer` must point to at least `stride * height` readable bytes that
    /// stay valid, and are not written concurrently with a paint, for the
    /// whole lifetime of the surface.
    pub unsafe fn wrap(
        buffer: *const u8,
        width: u32,
        height: u32,
        format: PixelFormat,
        stride: usize,
    ) -> Result<Self, SurfaceError> {
        let buffer = NonNull::new(buffer as *mut u8).ok_or(SurfaceError::NullBuffer)?;

        if width == 0 || height == 0 {
            return Err(SurfaceError::EmptySize { width, height });
        }

        let row_bytes = width as usize * format.bytes_per_pixel();
        if stride < row_bytes {
            return Err(SurfaceError::StrideTooSmall { stride, row_bytes });
        }

        Ok(Self {
            buffer,
            size: Size::new(width, height),
            stride,
            format,
            palette: Palette::new(),
        })
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Raw framebuffer bytes as they are right now
    fn bytes(&self) -> &[u8] {
        // SAFETY: `wrap`'s contract guarantees `stride * height` valid bytes
        unsafe {
            std::slice::from_raw_parts(
                self.buffer.as_ptr(),
                self.stride * self.size.height as usize,
            )
        }
    }

    /// Decode one row into `out`, one colour per source pixel
    fn decode_row(&self, bytes: &[u8], y: u32, out: &mut [Rgb]) {
        let row = &bytes[y as usize * self.stride..];

        match self.format {
            PixelFormat::Rgb32 => {
                for (color, px) in out.iter_mut().zip(row.chunks_exact(4)) {
                    *color = Rgb::from_xrgb(u32::from_ne_bytes([px[0], px[1], px[2], px[3]]));
                }
            }
            PixelFormat::Indexed8 => {
                for (color, &index) in out.iter_mut().zip(row) {
                    *color = self.palette.get(index);
                }
            }
        }
    }

    /// Colour of the pixel at (x, y)
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        assert!(x < self.size.width, "X coordinate {} out of bounds", x);
        assert!(y < self.size.height, "Y coordinate {} out of bounds", y);

        let offset = y as usize * self.stride + x as usize * self.format.bytes_per_pixel();
        let bytes = self.bytes();

        match self.format {
            PixelFormat::Rgb32 => {
                let px = &bytes[offset..offset + 4];
                Rgb::from_xrgb(u32::from_ne_bytes([px[0], px[1], px[2], px[3]]))
            }
            PixelFormat::Indexed8 => self.palette.get(bytes[offset]),
        }
    }

    /// Draw the surface stretched over `dest` in an RGBA8 target
    ///
    /// Uses nearest-neighbour sampling. Only pixels inside `dest`, `clip`
    /// and the target itself are written.
    ///
    /// # Arguments
    /// * `target` - RGBA8 pixels, `target_size.width * 4` bytes per row
    /// * `target_size` - Dimensions of `target`
    /// * `dest` - Where the whole surface should land
    /// * `clip` - Damage rectangle; pixels outside it are left untouched
    ///
    /// # Panics
    /// Panics if `target` is smaller than `target_size` requires
    pub fn present_scaled(&self, target: &mut [u8], target_size: Size, dest: Rect, clip: Rect) {
        assert!(
            target.len() >= target_size.width as usize * target_size.height as usize * 4,
            "Output buffer too small for RGBA conversion"
        );

        let area = dest.intersect(&clip).intersect(&target_size.rect());
        if area.is_empty() || dest.is_empty() {
            return;
        }

        let src = self.size;

        // Source column for every destination column in the painted area
        let columns: Vec<usize> = (area.x..area.right())
            .map(|x| ((x - dest.x) as u64 * src.width as u64 / dest.width as u64) as usize)
            .collect();

        let bytes = self.bytes();
        let mut row = vec![Rgb::default(); src.width as usize];
        let mut decoded_y = None;

        for y in area.y..area.bottom() {
            let src_y = ((y - dest.y) as u64 * src.height as u64 / dest.height as u64) as u32;
            if decoded_y != Some(src_y) {
                self.decode_row(bytes, src_y, &mut row);
                decoded_y = Some(src_y);
            }

            let start = (y as usize * target_size.width as usize + area.x as usize) * 4;
            let out = &mut target[start..start + columns.len() * 4];
            for (px, &src_x) in out.chunks_exact_mut(4).zip(&columns) {
                px.copy_from_slice(&row[src_x].to_rgba());
            }
        }
    }

    /// Replace the whole palette; pixel indices are not touched
    pub fn set_palette(&mut self, colors: &[Rgb; PALETTE_SIZE]) {
        if self.format != PixelFormat::Indexed8 {
            debug!("palette change ignored for true-colour surface");
            return;
        }
        self.palette.set_all(colors);
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("buffer", &self.buffer)
            .field("size", &self.size)
            .field("stride", &self.stride)
            .field("format", &self.format)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: u32 = 0x00FF0000;
    const BLUE: u32 = 0x000000FF;

    fn rgb32_surface(buffer: &mut [u32], width: u32, height: u32) -> Surface {
        unsafe {
            Surface::wrap(
                buffer.as_mut_ptr().cast(),
                width,
                height,
                PixelFormat::Rgb32,
                width as usize * 4,
            )
            .unwrap()
        }
    }

    fn rgba_at(target: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * width + x) * 4) as usize;
        [target[i], target[i + 1], target[i + 2], target[i + 3]]
    }

    #[test]
    fn test_wrap_rejects_bad_layout() {
        let mut buffer = vec![0u8; 16];
        let ptr = buffer.as_mut_ptr();

        let err = unsafe { Surface::wrap(std::ptr::null(), 4, 4, PixelFormat::Indexed8, 4) };
        assert_eq!(err.unwrap_err(), SurfaceError::NullBuffer);

        let err = unsafe { Surface::wrap(ptr, 0, 4, PixelFormat::Indexed8, 4) };
        assert!(matches!(err, Err(SurfaceError::EmptySize { .. })));

        let err = unsafe { Surface::wrap(ptr, 4, 4, PixelFormat::Rgb32, 8) };
        assert_eq!(
            err.unwrap_err(),
            SurfaceError::StrideTooSmall {
                stride: 8,
                row_bytes: 16
            }
        );
    }

    #[test]
    fn test_engine_writes_are_visible_without_handoff() {
        let mut buffer = vec![0u32; 4 * 2];
        let ptr = buffer.as_mut_ptr();
        let surface = rgb32_surface(&mut buffer, 4, 2);
        assert_eq!(surface.pixel(1, 1), Rgb::new(0, 0, 0));

        // The engine draws its next frame into the same memory
        unsafe { *ptr.add(5) = RED };
        assert_eq!(surface.pixel(1, 1), Rgb::new(0xFF, 0, 0));
    }

    #[test]
    fn test_present_scaled_doubles_pixels() {
        let mut buffer = vec![RED, BLUE, BLUE, RED];
        let surface = rgb32_surface(&mut buffer, 2, 2);

        let size = Size::new(4, 4);
        let mut target = vec![0u8; 4 * 4 * 4];
        surface.present_scaled(&mut target, size, size.rect(), size.rect());

        assert_eq!(rgba_at(&target, 4, 0, 0), [0xFF, 0, 0, 0xFF]);
        assert_eq!(rgba_at(&target, 4, 1, 1), [0xFF, 0, 0, 0xFF]);
        assert_eq!(rgba_at(&target, 4, 2, 0), [0, 0, 0xFF, 0xFF]);
        assert_eq!(rgba_at(&target, 4, 0, 3), [0, 0, 0xFF, 0xFF]);
        assert_eq!(rgba_at(&target, 4, 3, 3), [0xFF, 0, 0, 0xFF]);
    }

    #[test]
    fn test_present_scaled_non_integer_factor() {
        let mut buffer = vec![RED, BLUE];
        let surface = rgb32_surface(&mut buffer, 2, 1);

        let size = Size::new(3, 1);
        let mut target = vec![0u8; 3 * 4];
        surface.present_scaled(&mut target, size, size.rect(), size.rect());

        // 0*2/3 = 0, 1*2/3 = 0, 2*2/3 = 1
        assert_eq!(rgba_at(&target, 3, 0, 0)[0], 0xFF);
        assert_eq!(rgba_at(&target, 3, 1, 0)[0], 0xFF);
        assert_eq!(rgba_at(&target, 3, 2, 0)[2], 0xFF);
    }

    #[test]
    fn test_present_respects_clip() {
        let mut buffer = vec![RED; 4];
        let surface = rgb32_surface(&mut buffer, 2, 2);

        let size = Size::new(4, 4);
        let mut target = vec![0u8; 4 * 4 * 4];
        surface.present_scaled(&mut target, size, size.rect(), Rect::new(2, 2, 2, 2));

        assert_eq!(rgba_at(&target, 4, 0, 0), [0, 0, 0, 0]);
        assert_eq!(rgba_at(&target, 4, 1, 3), [0, 0, 0, 0]);
        assert_eq!(rgba_at(&target, 4, 2, 2), [0xFF, 0, 0, 0xFF]);
        assert_eq!(rgba_at(&target, 4, 3, 3), [0xFF, 0, 0, 0xFF]);
    }

    #[test]
    fn test_present_into_offset_dest() {
        let mut buffer = vec![BLUE];
        let surface = rgb32_surface(&mut buffer, 1, 1);

        let size = Size::new(3, 3);
        let mut target = vec![0u8; 3 * 3 * 4];
        surface.present_scaled(&mut target, size, Rect::new(1, 1, 5, 5), size.rect());

        assert_eq!(rgba_at(&target, 3, 0, 0), [0, 0, 0, 0]);
        assert_eq!(rgba_at(&target, 3, 1, 1), [0, 0, 0xFF, 0xFF]);
        assert_eq!(rgba_at(&target, 3, 2, 2), [0, 0, 0xFF, 0xFF]);
    }

    #[test]
    fn test_stride_padding_is_skipped() {
        // 2x2 indexed image with two bytes of padding per row
        let mut buffer = vec![1u8, 2, 0xEE, 0xEE, 3, 4, 0xEE, 0xEE];
        let surface =
            unsafe { Surface::wrap(buffer.as_mut_ptr(), 2, 2, PixelFormat::Indexed8, 4).unwrap() };

        assert_eq!(surface.pixel(0, 1), Rgb::new(3, 3, 3));
        assert_eq!(surface.pixel(1, 1), Rgb::new(4, 4, 4));
    }

    #[test]
    fn test_palette_change_keeps_indices() {
        let mut buffer = vec![0u8, 1, 1, 0];
        let mut surface =
            unsafe { Surface::wrap(buffer.as_mut_ptr(), 2, 2, PixelFormat::Indexed8, 2).unwrap() };

        let mut table = [Rgb::default(); PALETTE_SIZE];
        table[0] = Rgb::new(10, 0, 0);
        table[1] = Rgb::new(0, 20, 0);
        surface.set_palette(&table);

        let size = Size::new(2, 2);
        let mut target = vec![0u8; 2 * 2 * 4];
        surface.present_scaled(&mut target, size, size.rect(), size.rect());
        assert_eq!(rgba_at(&target, 2, 0, 0), [10, 0, 0, 0xFF]);
        assert_eq!(rgba_at(&target, 2, 1, 0), [0, 20, 0, 0xFF]);

        table[1] = Rgb::new(0, 0, 30);
        surface.set_palette(&table);
        surface.present_scaled(&mut target, size, size.rect(), size.rect());
        assert_eq!(rgba_at(&target, 2, 1, 0), [0, 0, 30, 0xFF]);
        assert_eq!(rgba_at(&target, 2, 0, 1), [0, 0, 30, 0xFF]);
        assert_eq!(buffer, vec![0, 1, 1, 0]);
    }

    #[test]
    fn test_palette_ignored_for_rgb32() {
        let mut buffer = vec![RED];
        let mut surface = rgb32_surface(&mut buffer, 1, 1);
        surface.set_palette(&[Rgb::new(1, 2, 3); PALETTE_SIZE]);
        assert_eq!(surface.pixel(0, 0), Rgb::from_xrgb(RED));
    }

    #[test]
    fn test_rect_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Rect::new(5, 5, 5, 5));
        assert!(a.intersect(&Rect::new(20, 20, 1, 1)).is_empty());
    }
}
