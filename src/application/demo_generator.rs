// Demo generator - synthetic IMU samples from closed-form time functions
use crate::domain::telemetry::{Attitude, TelemetrySample, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

pub const DEMO_PERIOD: Duration = Duration::from_millis(100);

/// Stands in for a live device. Each sample is a function of wall-clock
/// time plus bounded uniform jitter.
pub struct DemoGenerator {
    rng: StdRng,
}

impl DemoGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    #[cfg(test)]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn sample_at(&mut self, now_millis: i64) -> TelemetrySample {
        let t = now_millis as f64 / 1000.0;

        let accel = Vector3::fixed(
            round_to((t * 0.1).sin() * 0.5 + self.jitter(0.1), 3),
            round_to((t * 0.15).cos() * 0.3 + self.jitter(0.1), 3),
            round_to(1.0 + (t * 0.05).sin() * 0.1 + self.jitter(0.05), 3),
            3,
        );
        let gyro = Vector3::fixed(
            round_to((t * 0.3).sin() * 20.0 + self.jitter(5.0), 3),
            round_to((t * 0.25).cos() * 15.0 + self.jitter(3.0), 3),
            round_to((t * 0.2).sin() * 10.0 + self.jitter(2.0), 3),
            3,
        );
        let attitude = Attitude {
            roll: round_to((t * 0.1).sin() * 30.0, 2),
            pitch: round_to((t * 0.08).cos() * 20.0, 2),
            yaw: round_to((t * 5.0) % 360.0, 2),
        };
        let temperature = round_to(25.0 + self.rng.random::<f64>() * 5.0, 2);

        TelemetrySample {
            timestamp_millis: now_millis,
            accel,
            gyro,
            attitude: Some(attitude),
            temperature: Some(temperature),
        }
    }

    /// Uniform in [-width/2, width/2).
    fn jitter(&mut self, width: f64) -> f64 {
        self.rng.random::<f64>() * width - width / 2.0
    }
}

impl Default for DemoGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}
