mod tests {
    use desk_buddy::color::{
        Rgb, blend_colors, clamp_rgb, dim, percent_to_level, rgb_from_u32, scale_percent,
        to_triple, wheel,
    };

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    #[test]
    fn test_blend_colors() {
        assert_eq!(blend_colors(RED, BLUE, 0), RED);
        assert_eq!(blend_colors(RED, BLUE, 255), BLUE);
        assert_eq!(
            blend_colors(RED, BLUE, 128),
            Rgb {
                r: 127,
                g: 0,
                b: 128
            }
        );

        assert_eq!(
            blend_colors(BLACK, WHITE, 128),
            Rgb {
                r: 128,
                g: 128,
                b: 128
            }
        );
        assert_eq!(blend_colors(WHITE, BLACK, 255), BLACK);
        assert_eq!(blend_colors(WHITE, BLACK, 0), WHITE);
    }

    #[test]
    fn test_wheel_segments() {
        assert_eq!(wheel(0), GREEN);
        assert_eq!(wheel(85), RED);
        assert_eq!(wheel(170), BLUE);
        assert_eq!(wheel(255), GREEN);
        assert_eq!(wheel(16), Rgb::new(48, 207, 0));
        assert_eq!(wheel(100), Rgb::new(210, 0, 45));
        assert_eq!(wheel(200), Rgb::new(0, 90, 165));
    }

    #[test]
    fn test_clamp_rgb() {
        assert_eq!(clamp_rgb(-5, 300, 128), Rgb::new(0, 255, 128));
        assert_eq!(clamp_rgb(10, 20, 30), Rgb::new(10, 20, 30));
        assert_eq!(clamp_rgb(i64::MIN, i64::MAX, 0), Rgb::new(0, 255, 0));
    }

    #[test]
    fn test_scale_percent() {
        let energy = Rgb::new(255, 50, 0);
        assert_eq!(scale_percent(energy, 0), BLACK);
        assert_eq!(scale_percent(energy, 50), Rgb::new(127, 25, 0));
        assert_eq!(scale_percent(energy, 100), energy);
        assert_eq!(scale_percent(energy, 250), energy);
    }

    #[test]
    fn test_percent_to_level() {
        assert_eq!(percent_to_level(0.0), 0);
        assert_eq!(percent_to_level(50.0), 128);
        assert_eq!(percent_to_level(78.0), 199);
        assert_eq!(percent_to_level(100.0), 255);
        assert_eq!(percent_to_level(150.0), 255);
        assert_eq!(percent_to_level(-5.0), 0);
    }

    #[test]
    fn test_rgb_from_u32() {
        assert_eq!(rgb_from_u32(0x00_78_FF), Rgb::new(0, 120, 255));
        assert_eq!(to_triple(rgb_from_u32(0xFF_69_B4)), [255, 105, 180]);
    }

    #[test]
    fn test_dim_by_device_level() {
        let orange = Rgb::new(255, 128, 0);
        assert_eq!(dim(orange, 255), orange);
        assert_eq!(dim(orange, 0), BLACK);
        assert_eq!(dim(orange, percent_to_level(78.0)), Rgb::new(199, 100, 0));
        assert_eq!(dim(WHITE, percent_to_level(50.0)), Rgb::new(128, 128, 128));
    }
}
