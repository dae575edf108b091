//! Periodic climate sampling

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use chrono::{DateTime, Local};
use log::{debug, warn};
use serde::Serialize;
use tokio::sync::watch;

use crate::device::{Climate, ClimateSensor, DeviceKind, jittered_climate};

/// Latest climate sample as published to the display and the API
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SensorReading {
    pub timestamp: DateTime<Local>,
    pub temperature_c: Option<f32>,
    pub humidity: Option<f32>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SensorReading {
    pub fn measured(climate: Climate) -> Self {
        Self {
            timestamp: Local::now(),
            temperature_c: Some(climate.temperature_c),
            humidity: Some(climate.humidity),
            success: true,
            error: None,
        }
    }

    /// Simulated values standing in for a failed read
    pub fn fallback(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::measured(jittered_climate())
        }
    }

    /// Placeholder published before the first sample
    pub fn baseline() -> Self {
        Self {
            timestamp: Local::now(),
            temperature_c: Some(24.0),
            humidity: Some(52.0),
            success: false,
            error: None,
        }
    }
}

/// Reads the sensor off the async workers and publishes the result.
pub struct SensorSampler {
    sensor: Arc<Mutex<Box<dyn ClimateSensor>>>,
    kind: DeviceKind,
    latest: watch::Sender<SensorReading>,
    last_read: Mutex<Option<DateTime<Local>>>,
}

impl SensorSampler {
    pub fn new(sensor: Box<dyn ClimateSensor>) -> Self {
        let (latest, _) = watch::channel(SensorReading::baseline());
        Self {
            kind: sensor.kind(),
            sensor: Arc::new(Mutex::new(sensor)),
            latest,
            last_read: Mutex::new(None),
        }
    }

    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// Receiver that always holds the newest reading
    pub fn subscribe(&self) -> watch::Receiver<SensorReading> {
        self.latest.subscribe()
    }

    pub fn latest(&self) -> SensorReading {
        self.latest.borrow().clone()
    }

    /// When the last sample was taken, `None` before the first one
    pub fn last_read(&self) -> Option<DateTime<Local>> {
        *self.last_read.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take one sample now and publish it.
    ///
    /// Never fails: a sensor error yields a fallback reading with
    /// `success` false.
    pub async fn sample(&self) -> SensorReading {
        let sensor = Arc::clone(&self.sensor);
        let result = tokio::task::spawn_blocking(move || {
            sensor
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .read()
        })
        .await;

        let reading = match result {
            Ok(Ok(climate)) => SensorReading::measured(climate),
            Ok(Err(err)) => {
                warn!("DHT read error: {err}");
                SensorReading::fallback(err.to_string())
            }
            Err(err) => {
                warn!("DHT read task failed: {err}");
                SensorReading::fallback(err.to_string())
            }
        };
        debug!(
            "climate sample: {:?}C {:?}% success={}",
            reading.temperature_c, reading.humidity, reading.success
        );

        *self.last_read.lock().unwrap_or_else(PoisonError::into_inner) = Some(reading.timestamp);
        self.latest.send_replace(reading.clone());
        reading
    }

    /// Sample every `interval`, starting immediately. Runs forever.
    pub async fn run(&self, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.sample().await;
        }
    }
}
