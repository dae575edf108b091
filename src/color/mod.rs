mod utils;
mod wheel;

use smart_leds::RGB8;
pub use utils::{
    BLACK, WHITE, blend_colors, clamp_rgb, dim, percent_to_level, rgb_from_u32, scale_percent,
    to_triple,
};
pub use wheel::wheel;

pub type Rgb = RGB8;
