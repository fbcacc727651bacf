// Indexed-colour palette
//
// In 8-bit mode the engine's framebuffer holds palette indices (0-255).
// The engine pushes its current palette whenever it changes (damage flash,
// item pickup, menus); the surface keeps its own copy.

/// Number of entries in an indexed-colour palette
pub const PALETTE_SIZE: usize = 256;

/// 24-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a colour from its components
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decode the engine's 32-bit `0x00RRGGBB` pixel value
    #[inline]
    pub fn from_xrgb(value: u32) -> Self {
        Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        }
    }

    /// Convert to RGBA format expected by pixels crate
    #[inline]
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xFF]
    }
}

/// 256-entry colour table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb; PALETTE_SIZE],
}

impl Palette {
    /// Create a greyscale ramp, used until the engine sets its palette
    pub fn new() -> Self {
        let mut colors = [Rgb::default(); PALETTE_SIZE];
        for (i, color) in colors.iter_mut().enumerate() {
            *color = Rgb::new(i as u8, i as u8, i as u8);
        }
        Self { colors }
    }

    /// Colour at `index`
    #[inline]
    pub fn get(&self, index: u8) -> Rgb {
        self.colors[index as usize]
    }

    /// Replace every entry
    pub fn set_all(&mut self, colors: &[Rgb; PALETTE_SIZE]) {
        self.colors = *colors;
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_xrgb() {
        assert_eq!(Rgb::from_xrgb(0x00FF8040), Rgb::new(0xFF, 0x80, 0x40));
        // The unused top byte is ignored
        assert_eq!(Rgb::from_xrgb(0xAB000001), Rgb::new(0, 0, 1));
    }

    #[test]
    fn test_to_rgba() {
        assert_eq!(Rgb::new(1, 2, 3).to_rgba(), [1, 2, 3, 0xFF]);
    }

    #[test]
    fn test_default_is_greyscale() {
        let palette = Palette::new();
        assert_eq!(palette.get(0), Rgb::new(0, 0, 0));
        assert_eq!(palette.get(128), Rgb::new(128, 128, 128));
        assert_eq!(palette.get(255), Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_set_all_is_idempotent() {
        let mut table = [Rgb::default(); PALETTE_SIZE];
        table[3] = Rgb::new(200, 0, 0);

        let mut palette = Palette::new();
        palette.set_all(&table);
        let once = palette.clone();
        palette.set_all(&table);

        assert_eq!(palette, once);
        assert_eq!(palette.get(3), Rgb::new(200, 0, 0));
    }
}
