use crate::{
    color::Rgb,
    math8::{blend8, scale8},
};

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

/// Blend two RGB colors
///
/// # Arguments
/// * `a` - First color
/// * `b` - Second color
/// * `amount_of_b` - Blend factor (0 = all a, 255 = all b)
#[inline]
pub fn blend_colors(a: Rgb, b: Rgb, amount_of_b: u8) -> Rgb {
    Rgb {
        r: blend8(a.r, b.r, amount_of_b),
        g: blend8(a.g, b.g, amount_of_b),
        b: blend8(a.b, b.b, amount_of_b),
    }
}

/// Dim a color by a device level (0-255). Level 255 leaves it unchanged.
#[inline]
pub const fn dim(color: Rgb, level: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, level),
        g: scale8(color.g, level),
        b: scale8(color.b, level),
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Build a color from wide integer channels, clamping each into 0-255.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp_rgb(r: i64, g: i64, b: i64) -> Rgb {
    let channel = |value: i64| value.clamp(0, 255) as u8;
    Rgb {
        r: channel(r),
        g: channel(g),
        b: channel(b),
    }
}

/// Scale every channel by a whole percentage, truncating.
///
/// Values above 100 are treated as 100.
#[allow(clippy::cast_possible_truncation)]
pub fn scale_percent(color: Rgb, percent: u8) -> Rgb {
    let percent = u16::from(percent.min(100));
    let channel = |value: u8| (u16::from(value) * percent / 100) as u8;
    Rgb {
        r: channel(color.r),
        g: channel(color.g),
        b: channel(color.b),
    }
}

/// Map a brightness percentage to the device's 0-255 range.
///
/// The input is clamped into 0-100 first and the result rounded to the
/// nearest level, so 50 maps to 128 and 78 maps to 199.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percent_to_level(percent: f64) -> u8 {
    if percent.is_nan() {
        return 255;
    }
    let percent = percent.clamp(0.0, 100.0);
    (percent * 255.0 / 100.0).round() as u8
}

/// Channels as a plain array, the shape used in JSON replies.
pub const fn to_triple(color: Rgb) -> [u8; 3] {
    [color.r, color.g, color.b]
}
