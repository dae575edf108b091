use super::Rgb;

/// Classic three-segment color wheel.
///
/// Position 0 is green, 85 is red and 170 is blue; every channel moves
/// in steps of 3.
pub const fn wheel(pos: u8) -> Rgb {
    match pos {
        0..85 => Rgb {
            r: pos * 3,
            g: 255 - pos * 3,
            b: 0,
        },
        85..170 => {
            let pos = pos - 85;
            Rgb {
                r: 255 - pos * 3,
                g: 0,
                b: pos * 3,
            }
        }
        _ => {
            let pos = pos - 170;
            Rgb {
                r: 0,
                g: pos * 3,
                b: 255 - pos * 3,
            }
        }
    }
}
