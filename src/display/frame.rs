use core::{convert::Infallible, fmt};

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

pub const WIDTH: u32 = 128;
pub const HEIGHT: u32 = 64;

const STRIDE: usize = WIDTH as usize / 8;
const BYTES: usize = STRIDE * HEIGHT as usize;

/// 1 bit per pixel framebuffer, row major, MSB first
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    bits: [u8; BYTES],
}

impl Default for Bitmap {
    fn default() -> Self {
        Self::new()
    }
}

impl Bitmap {
    pub const fn new() -> Self {
        Self { bits: [0; BYTES] }
    }

    #[allow(clippy::cast_sign_loss)]
    fn index(x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some((y * STRIDE + x / 8, 0x80 >> (x % 8)))
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        Self::index(x, y).is_some_and(|(byte, mask)| self.bits[byte] & mask != 0)
    }

    pub fn set(&mut self, x: i32, y: i32, on: bool) {
        if let Some((byte, mask)) = Self::index(x, y) {
            if on {
                self.bits[byte] |= mask;
            } else {
                self.bits[byte] &= !mask;
            }
        }
    }

    pub fn is_blank(&self) -> bool {
        self.bits.iter().all(|&byte| byte == 0)
    }

    /// Number of lit pixels
    pub fn lit_count(&self) -> u32 {
        self.bits.iter().map(|byte| byte.count_ones()).sum()
    }

    /// Lit pixels inside the rows `top..bottom`
    pub fn lit_in_rows(&self, top: i32, bottom: i32) -> impl Iterator<Item = Point> + '_ {
        (top.max(0)..bottom.min(HEIGHT as i32)).flat_map(move |y| {
            (0..WIDTH as i32)
                .filter(move |&x| self.get(x, y))
                .map(move |x| Point::new(x, y))
        })
    }

    /// Every lit pixel, ready for another draw target
    #[allow(clippy::cast_possible_wrap)]
    pub fn lit_pixels(&self) -> impl Iterator<Item = Pixel<BinaryColor>> + '_ {
        self.lit_in_rows(0, HEIGHT as i32)
            .map(|point| Pixel(point, BinaryColor::On))
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("lit", &self.lit_count())
            .finish()
    }
}

impl OriginDimensions for Bitmap {
    fn size(&self) -> Size {
        Size::new(WIDTH, HEIGHT)
    }
}

impl DrawTarget for Bitmap {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}

/// Where the center message was placed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CenterLayout {
    /// No message
    #[default]
    Empty,
    /// Fits the panel and is drawn centered at `x`
    Static { x: i32 },
    /// Wider than the panel; first copy drawn at `offset`
    Scrolling { offset: i32, width: i32 },
}

/// One composed OLED frame together with the text it shows
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub bitmap: Bitmap,
    pub clock: heapless::String<8>,
    pub climate: heapless::String<24>,
    pub message: String,
    pub center: CenterLayout,
    pub footer: String,
}

impl Frame {
    /// All pixels off, no text
    pub fn blank() -> Self {
        Self::default()
    }

    /// One-line textual rendition for log output
    pub fn summary(&self) -> String {
        let message: String = self.message.chars().take(20).collect();
        format!(
            "{} | {} | {} | {}",
            self.clock, self.climate, message, self.footer
        )
    }
}
