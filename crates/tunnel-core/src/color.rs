use std::fmt;

/// 24-bit sRGB colour stored as `0xRRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xffffff);

    #[inline]
    pub fn hex(self) -> u32 {
        self.0 & 0xff_ffff
    }

    /// Components in \[0, 1\], still sRGB-encoded.
    pub fn srgb(self) -> [f32; 3] {
        let h = self.hex();
        [
            ((h >> 16) & 0xff) as f32 / 255.0,
            ((h >> 8) & 0xff) as f32 / 255.0,
            (h & 0xff) as f32 / 255.0,
        ]
    }

    /// Linear-light components for an sRGB render target.
    pub fn linear(self) -> [f32; 3] {
        self.srgb().map(srgb_to_linear)
    }

    pub fn linear_rgba(self, alpha: f32) -> [f32; 4] {
        let [r, g, b] = self.linear();
        [r, g, b, alpha]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06x}", self.hex())
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
