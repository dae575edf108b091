mod tests {
    use chrono::NaiveTime;
    use desk_buddy::{
        DisplayRenderer, DisplayState, SensorReading,
        display::{
            CLEARED_STATUS, CenterLayout, Footer, FooterMode, IDLE_PHRASES, QuoteRotation,
            STARTUP_MESSAGE, STARTUP_STATUS, climate_label, message_width,
        },
        mock::MockPanel,
    };
    use embassy_time::{Duration, Instant};
    use tokio::sync::watch;

    const LONG_MESSAGE: &str = "This message is far too long to fit on the panel";

    fn clock() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 34, 56).unwrap_or_default()
    }

    fn reading(temperature: f32, humidity: f32) -> SensorReading {
        SensorReading {
            temperature_c: Some(temperature),
            humidity: Some(humidity),
            success: true,
            ..SensorReading::baseline()
        }
    }

    fn at(secs: u64) -> Instant {
        Instant::from_secs(secs)
    }

    #[test]
    fn test_startup_state() {
        let mut state = DisplayState::new(at(0));
        assert_eq!(state.message(), STARTUP_MESSAGE);
        assert_eq!(state.active_status(at(1)), Some(STARTUP_STATUS));

        let frame = state.compose(at(1), clock(), &reading(23.7, 48.2));
        assert_eq!(frame.clock.as_str(), "12:34");
        assert_eq!(frame.climate.as_str(), "23°C 48%");
        assert_eq!(frame.footer, STARTUP_STATUS);
        assert!(!frame.bitmap.is_blank());
    }

    #[test]
    fn test_climate_label_without_reading() {
        let missing = SensorReading {
            temperature_c: None,
            ..SensorReading::baseline()
        };
        assert_eq!(climate_label(&missing).as_str(), "--°C --%");
    }

    #[test]
    fn test_climate_label_clamps_out_of_range() {
        assert_eq!(climate_label(&reading(1.0e9, 250.0)).as_str(), "80°C 100%");
        assert_eq!(climate_label(&reading(-300.0, -5.0)).as_str(), "-40°C 0%");
        assert_eq!(climate_label(&reading(f32::NAN, 40.0)).as_str(), "--°C --%");
        assert_eq!(
            climate_label(&reading(20.0, f32::INFINITY)).as_str(),
            "--°C --%"
        );
    }

    #[test]
    fn test_short_message_is_centered() {
        let mut state = DisplayState::new(at(0));
        state.set_message("Hi");
        let width = message_width("Hi");
        assert_eq!(width, 18);

        for _ in 0..3 {
            let frame = state.compose(at(1), clock(), &reading(20.0, 40.0));
            assert_eq!(frame.center, CenterLayout::Static { x: 55 });
            assert_eq!(state.scroll_offset(), 0);
            assert!(
                frame
                    .bitmap
                    .lit_in_rows(25, 40)
                    .all(|point| (55..55 + width).contains(&point.x))
            );
        }
    }

    #[test]
    fn test_long_message_scrolls_and_wraps() {
        let mut state = DisplayState::new(at(0));
        state.set_message(LONG_MESSAGE);
        let width = message_width(LONG_MESSAGE);
        assert!(width > 128);
        let period = width + 30;

        for k in 0..(period + 10) {
            let frame = state.compose(at(1), clock(), &reading(20.0, 40.0));
            assert_eq!(
                frame.center,
                CenterLayout::Scrolling {
                    offset: -(k % period),
                    width
                }
            );
        }
    }

    #[test]
    fn test_new_message_resets_scroll() {
        let mut state = DisplayState::new(at(0));
        state.set_message(LONG_MESSAGE);
        for _ in 0..5 {
            state.compose(at(1), clock(), &reading(20.0, 40.0));
        }
        assert_eq!(state.scroll_offset(), -5);

        state.set_message(LONG_MESSAGE);
        assert_eq!(state.scroll_offset(), 0);
    }

    #[test]
    fn test_status_expires_into_rotation() {
        let mut state = DisplayState::new(at(0));
        let now = at(10);
        state.set_status("LED turned on", Duration::from_secs(2), now);

        let frame = state.compose(now + Duration::from_secs(1), clock(), &reading(20.0, 40.0));
        assert_eq!(frame.footer, "LED turned on");
        assert_eq!(state.active_status(now + Duration::from_secs(2)), Some("LED turned on"));

        let later = now + Duration::from_millis(2100);
        let frame = state.compose(later, clock(), &reading(20.0, 40.0));
        assert_eq!(frame.footer, IDLE_PHRASES[0]);
        assert_eq!(state.footer_mode(), &FooterMode::Rotating);
        assert_eq!(state.active_status(later), None);
    }

    #[test]
    fn test_status_replaces_status() {
        let mut footer = Footer::new(QuoteRotation::new(&IDLE_PHRASES, Duration::from_secs(60)));
        footer.set_status("first", Duration::from_secs(5), at(0));
        footer.set_status("second", Duration::from_secs(1), at(1));
        assert_eq!(footer.text(at(2)), "second");
        assert_eq!(footer.text(at(3)), IDLE_PHRASES[0]);
    }

    #[test]
    fn test_rotation_waits_for_interval() {
        let mut rotation = QuoteRotation::new(&IDLE_PHRASES, Duration::from_secs(60));
        assert_eq!(rotation.current(at(100)), IDLE_PHRASES[0]);
        assert_eq!(rotation.current(at(159)), IDLE_PHRASES[0]);
        assert_eq!(rotation.current(at(160)), IDLE_PHRASES[1]);
        assert_eq!(rotation.current(at(161)), IDLE_PHRASES[1]);
        assert_eq!(rotation.current(at(220)), IDLE_PHRASES[2]);
    }

    #[test]
    fn test_rotation_wraps_around() {
        let mut rotation = QuoteRotation::new(&IDLE_PHRASES, Duration::from_secs(1));
        for (i, secs) in (0..7).map(|i| (i, 10 + i as u64)) {
            assert_eq!(rotation.current(at(secs)), IDLE_PHRASES[i % IDLE_PHRASES.len()]);
        }
    }

    #[test]
    fn test_rotation_survives_clock_going_backwards() {
        let mut rotation = QuoteRotation::new(&IDLE_PHRASES, Duration::from_secs(60));
        assert_eq!(rotation.current(at(100)), IDLE_PHRASES[0]);
        assert_eq!(rotation.current(at(50)), IDLE_PHRASES[0]);
        assert_eq!(rotation.current(at(109)), IDLE_PHRASES[0]);
        assert_eq!(rotation.current(at(110)), IDLE_PHRASES[1]);
    }

    #[test]
    fn test_clear() {
        let mut state = DisplayState::new(at(0));
        state.set_message(LONG_MESSAGE);
        state.compose(at(1), clock(), &reading(20.0, 40.0));
        state.clear(at(10));

        assert_eq!(state.message(), "");
        assert_eq!(state.scroll_offset(), 0);
        let frame = state.compose(at(11), clock(), &reading(20.0, 40.0));
        assert_eq!(frame.center, CenterLayout::Empty);
        assert_eq!(frame.footer, CLEARED_STATUS);
        assert_eq!(frame.bitmap.lit_in_rows(20, 45).count(), 0);
    }

    #[test]
    fn test_renderer_pushes_frames() {
        let panel = MockPanel::new();
        let (readings, rx) = watch::channel(reading(21.9, 44.4));
        let renderer = DisplayRenderer::new(Box::new(panel.clone()), rx);

        renderer.set_message("Hello");
        let frame = renderer.render_once(Instant::now(), clock());
        assert_eq!(frame.message, "Hello");
        assert_eq!(frame.climate.as_str(), "21°C 44%");
        assert_eq!(panel.frames_shown(), 1);

        readings.send_replace(reading(25.0, 60.0));
        renderer.render_once(Instant::now(), clock());
        let shown = panel.last_frame().map(|frame| frame.climate.to_string());
        assert_eq!(shown.as_deref(), Some("25°C 60%"));
    }

    #[test]
    fn test_renderer_clear_pushes_blank_frame() {
        let panel = MockPanel::new();
        let (_readings, rx) = watch::channel(SensorReading::baseline());
        let renderer = DisplayRenderer::new(Box::new(panel.clone()), rx);

        assert!(renderer.clear());
        assert!(panel.last_frame().is_some_and(|frame| frame.bitmap.is_blank()));

        let snapshot = renderer.snapshot();
        assert_eq!(snapshot.message, "");
        assert_eq!(snapshot.status.as_deref(), Some(CLEARED_STATUS));

        panel.set_failing(true);
        assert!(!renderer.clear());
        assert_eq!(panel.frames_shown(), 1);
    }
}
