mod tests {
    use desk_buddy::{color::Rgb, math8::blend8, transition::SteppedTransition};
    use embassy_time::Duration;

    #[test]
    fn test_stepped_transition_u8() {
        let mut transition =
            SteppedTransition::new(0, 100, 4, Duration::from_millis(100), blend8);
        assert_eq!(transition.step_duration(), Duration::from_millis(25));
        assert_eq!(transition.is_finished(), false);

        assert_eq!(transition.next_value(), Some(0));
        assert_eq!(transition.next_value(), Some(25));
        assert_eq!(transition.next_value(), Some(50));
        assert_eq!(transition.next_value(), Some(75));
        assert_eq!(transition.next_value(), None);
        assert_eq!(transition.is_finished(), true);
        assert_eq!(transition.target(), 100);
    }

    #[test]
    fn test_stepped_transition_rgb() {
        let black = Rgb::new(0, 0, 0);
        let white = Rgb::new(255, 255, 255);
        let mut transition =
            SteppedTransition::new_rgb(black, white, 30, Duration::from_millis(1000));

        let values: Vec<Rgb> = std::iter::from_fn(|| transition.next_value()).collect();
        assert_eq!(values.len(), 30);
        assert_eq!(values[0], black);
        assert!(values.windows(2).all(|pair| pair[0].r <= pair[1].r));
        assert!(values[29].r < 255);
        assert_eq!(transition.target(), white);
    }

    #[test]
    fn test_zero_steps_is_finished() {
        let mut transition = SteppedTransition::new(0, 9, 0, Duration::from_millis(10), blend8);
        assert_eq!(transition.step_duration(), Duration::from_millis(0));
        assert_eq!(transition.next_value(), None);
        assert_eq!(transition.target(), 9);
    }
}
