use std::time::Instant;

const DEFAULT_SMOOTHING: f64 = 0.1;

/// Measures the acquisition rate of a live producer from the arrival time of
/// each sample.
///
/// The filter itself does not care about timing; this is only a diagnostic
/// for how far the real rate drifts from the nominal one the coefficients
/// were designed for.
#[derive(Debug, Clone)]
pub struct SampleRateMonitor {
    smoothing: f64,
    last: Option<Instant>,
    instantaneous: Option<f64>,
    average: Option<f64>,
}

impl SampleRateMonitor {
    pub fn new() -> Self {
        Self::with_smoothing(DEFAULT_SMOOTHING)
    }

    /// `smoothing` is the weight of the newest rate in the moving average,
    /// clamped to (0, 1]. Non-finite weights fall back to the default.
    pub fn with_smoothing(smoothing: f64) -> Self {
        let smoothing = if smoothing.is_finite() {
            smoothing.clamp(f64::EPSILON, 1.0)
        } else {
            DEFAULT_SMOOTHING
        };

        SampleRateMonitor {
            smoothing,
            last: None,
            instantaneous: None,
            average: None,
        }
    }

    /// Records a sample arriving at `at` and returns the instantaneous rate in Hz.
    pub fn update(&mut self, at: Instant) -> Option<f64> {
        let Some(last) = self.last else {
            self.last = Some(at);
            return None;
        };

        // out-of-order or duplicate timestamps carry no rate information
        let dt = match at.checked_duration_since(last) {
            Some(dt) if !dt.is_zero() => dt.as_secs_f64(),
            _ => return self.instantaneous,
        };

        let rate = 1.0 / dt;
        self.last = Some(at);
        self.instantaneous = Some(rate);
        self.average = Some(match self.average {
            Some(avg) => avg + self.smoothing * (rate - avg),
            None => rate,
        });

        self.instantaneous
    }

    pub fn instantaneous(&self) -> Option<f64> {
        self.instantaneous
    }

    pub fn average(&self) -> Option<f64> {
        self.average
    }

    pub fn reset(&mut self) {
        self.last = None;
        self.instantaneous = None;
        self.average = None;
    }
}

impl Default for SampleRateMonitor {
    fn default() -> Self {
        Self::new()
    }
}
