mod tests {
    use std::{fs, path::PathBuf};

    use clap::Parser;
    use desk_buddy::{
        ClimateSensor, Config, DeviceKind, Devices, DeviceError, LedDriver,
        device::{IioClimateSensor, SimulatedStrip},
    };

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("desk-buddy-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_iio_sensor_reads_milli_units() {
        let dir = scratch_dir("iio-ok");
        fs::write(dir.join("in_temp_input"), "23460\n").unwrap();
        fs::write(dir.join("in_humidityrelative_input"), "48120\n").unwrap();

        let mut sensor = IioClimateSensor::detect(&dir).unwrap();
        assert_eq!(sensor.kind(), DeviceKind::Physical);
        let climate = sensor.read().unwrap();
        assert_eq!(climate.temperature_c, 23.5);
        assert_eq!(climate.humidity, 48.1);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_iio_sensor_rejects_garbage() {
        let dir = scratch_dir("iio-bad");
        fs::write(dir.join("in_temp_input"), "n/a").unwrap();
        fs::write(dir.join("in_humidityrelative_input"), "48120").unwrap();

        let mut sensor = IioClimateSensor::detect(&dir).unwrap();
        assert!(matches!(
            sensor.read(),
            Err(DeviceError::InvalidReading { source_name: "in_temp_input", .. })
        ));

        fs::remove_file(dir.join("in_temp_input")).unwrap();
        assert!(matches!(sensor.read(), Err(DeviceError::Io(_))));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_iio_detect_needs_both_channels() {
        let dir = scratch_dir("iio-missing");
        fs::write(dir.join("in_temp_input"), "23450").unwrap();
        assert!(IioClimateSensor::detect(&dir).is_none());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_simulated_devices_report_unavailable() {
        let devices = Devices::simulated(8);
        let availability = devices.availability();
        assert!(!availability.led);
        assert!(!availability.oled);
        assert!(!availability.dht);
        assert_eq!(devices.strip.led_count(), 8);
    }

    #[test]
    fn test_detect_with_simulate_flag() {
        let config = Config {
            simulate: true,
            led_count: 4,
            ..Config::default()
        };
        let devices = Devices::detect(&config);
        assert_eq!(devices.strip.kind(), DeviceKind::Simulated);
        assert_eq!(devices.sensor.kind(), DeviceKind::Simulated);
    }

    #[test]
    fn test_detect_falls_back_per_capability() {
        let dir = scratch_dir("detect");
        fs::write(dir.join("in_temp_input"), "20000").unwrap();
        fs::write(dir.join("in_humidityrelative_input"), "40000").unwrap();
        let config = Config {
            sensor_dir: dir.clone(),
            spi_device: dir.join("no-spidev"),
            i2c_device: dir.join("no-i2c"),
            ..Config::default()
        };

        let availability = Devices::detect(&config).availability();
        assert!(!availability.led);
        assert!(!availability.oled);
        assert!(availability.dht);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_simulated_strip_accepts_writes() {
        let mut strip = SimulatedStrip::new(3);
        assert!(strip.write(&[desk_buddy::Rgb::new(1, 2, 3); 3]).is_ok());
        assert!(strip.set_brightness(10).is_ok());
        assert_eq!(strip.kind(), DeviceKind::Simulated);
    }

    #[test]
    fn test_config_from_args() {
        let config = Config::try_parse_from([
            "desk-buddy",
            "--bind",
            "127.0.0.1:8080",
            "--led-count",
            "30",
            "--brightness",
            "40",
            "--simulate",
        ])
        .unwrap();
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.led_count, 30);
        assert_eq!(config.brightness, 40);
        assert!(config.simulate);

        assert!(Config::try_parse_from(["desk-buddy", "--brightness", "120"]).is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.led_count, 16);
        assert_eq!(config.brightness, 78);
        assert_eq!(config.bind.port(), 5001);
        assert_eq!(config.sensor_interval().as_secs(), 30);
    }
}
