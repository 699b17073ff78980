use colored::Colorize;
use rand::rngs::ThreadRng;
use rand::Rng;
use std::error::Error;
use std::f64::consts::PI;
use std::thread;

use crate::config::Config;
use crate::processing::{ProcessedSample, SignalProcessor, SignalProcessorConfig};

// -----------------------------------------------------------------------------
// SIMULATED SOURCE
// -----------------------------------------------------------------------------

const BASELINE_AMPLITUDE: f64 = 70.0;
const SLOW_FREQ: f64 = 0.2;
const FAST_FREQ: f64 = 6.0;
const NOISE: f64 = 8.0;

/// Stand-in for a live acquisition source: a slow swing around a baseline
/// with a fast ripple and uniform noise on top.
pub struct SimulatedSource {
    fs: f64,
    index: usize,
    rng: ThreadRng,
}

impl SimulatedSource {
    pub fn new(fs: f64) -> Self {
        Self {
            fs,
            index: 0,
            rng: rand::thread_rng(),
        }
    }
}

impl Iterator for SimulatedSource {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let time = self.index as f64 / self.fs;
        self.index += 1;

        Some(
            BASELINE_AMPLITUDE
                + 30.0 * (2.0 * PI * SLOW_FREQ * time).sin()
                + 10.0 * (2.0 * PI * FAST_FREQ * time).sin()
                + self.rng.gen_range(-NOISE..NOISE),
        )
    }
}

// -----------------------------------------------------------------------------
// TERMINAL SINK
// -----------------------------------------------------------------------------

const MAX_BAR: usize = 120;

fn bar_len(value: f64) -> usize {
    if value.is_finite() {
        (value.max(0.0) as usize).min(MAX_BAR)
    } else {
        0
    }
}

/// One line of output: raw value as white bars, filtered value as red bars,
/// shortest first so both stay visible.
pub fn render_line(processed: &ProcessedSample) -> String {
    let raw_string = "|".repeat(bar_len(processed.raw));
    let filtered_string = "|".repeat(bar_len(processed.filtered));

    let rate = match processed.sample_rate {
        Some(rate) => format!("{:6.1} Hz ", rate),
        None => "   --- Hz ".to_string(),
    };

    let bars = if processed.raw < processed.filtered {
        format!("{}{}", raw_string.white(), filtered_string.red())
    } else {
        format!("{}{}", filtered_string.red(), raw_string.white())
    };

    format!("{}{:>8.2} {}", rate.dimmed(), processed.filtered, bars)
}

// -----------------------------------------------------------------------------
// RUN CODE
// -----------------------------------------------------------------------------

pub fn run(config: &Config, samples: Option<usize>) -> Result<(), Box<dyn Error>> {
    let fs = config.processor.fs;
    let period = config.processor.sample_period()?;

    let mut processor = SignalProcessor::new(
        config.build_filter()?,
        SignalProcessorConfig::from_config(config),
    );

    println!(
        "{} order {} at {} Hz, white = raw, red = filtered",
        config.filter.id.bold(),
        processor.filter().order(),
        fs
    );

    let source = SimulatedSource::new(fs);
    let source: Box<dyn Iterator<Item = f64>> = match samples {
        Some(n) => Box::new(source.take(n)),
        None => Box::new(source),
    };

    for sample in source {
        let processed = processor.process_sample(sample);
        println!("{}", render_line(&processed));
        thread::sleep(period);
    }

    if let Some(rate) = processor.sample_rate() {
        println!("Average acquisition rate: {:.2} Hz (nominal {} Hz)", rate, fs);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_stays_near_baseline() {
        let source = SimulatedSource::new(30.0);
        for sample in source.take(300) {
            assert!((BASELINE_AMPLITUDE - 50.0..=BASELINE_AMPLITUDE + 50.0).contains(&sample));
        }
    }

    #[test]
    fn default_lowpass_removes_fast_ripple() {
        let config = Config::default();
        let mut filter = config.build_filter().unwrap();
        let filtered: Vec<f64> = SimulatedSource::new(config.processor.fs)
            .take(600)
            .map(|x| filter.filter(x))
            .collect();

        // after settling, sample-to-sample jumps come from the slow swing only
        let max_step = filtered[300..]
            .windows(2)
            .map(|w| (w[1] - w[0]).abs())
            .fold(0.0, f64::max);
        assert!(max_step < 3.0, "max step {}", max_step);
    }

    #[test]
    fn bars_are_clamped() {
        let line = render_line(&ProcessedSample {
            index: 0,
            raw: 1e9,
            filtered: f64::NAN,
            sample_rate: None,
        });
        assert_eq!(line.matches('|').count(), MAX_BAR);

        let line = render_line(&ProcessedSample {
            index: 1,
            raw: 12.0,
            filtered: -4.0,
            sample_rate: Some(30.0),
        });
        assert_eq!(line.matches('|').count(), 12);
        assert!(line.contains("30.0 Hz"));
    }

    #[test]
    fn tiny_sampling_rate_is_an_error() {
        let mut config = Config::default();
        config.processor.fs = 1e-20;
        let err = run(&config, Some(1)).unwrap_err();
        assert!(err.to_string().contains("too low"), "{}", err);
    }
}
