use super::sample_rate::SampleRateMonitor;
use crate::config::Config;
use crate::filters::IirFilter;
use crate::utils::log::{log_csv, log_to_file};

use std::time::Instant;

// -----------------------------------------------------------------------------
// SIGNAL PROCESSOR
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SignalProcessorConfig {
    pub id: String,
    pub fs: f64,
    pub enable_debug_logging: bool,
}

impl SignalProcessorConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            id: config.filter.id.clone(),
            fs: config.processor.fs,
            enable_debug_logging: config.processor.enable_debug_logging,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessedSample {
    pub index: usize,
    pub raw: f64,
    pub filtered: f64,
    /// Measured acquisition rate in Hz, once two samples have arrived.
    pub sample_rate: Option<f64>,
}

/// Drives one filter cascade from a live sample stream.
///
/// The cascade is handed in at construction and owned here, so every
/// channel gets its own processor and its own filter state.
pub struct SignalProcessor {
    index: usize,
    filter: IirFilter,
    sample_rate: SampleRateMonitor,
    config: SignalProcessorConfig,
    log_file: String,
    csv_file: String,
}

impl SignalProcessor {
    pub fn new(filter: IirFilter, config: SignalProcessorConfig) -> Self {
        let log_file = format!("{}.log", config.id);
        let csv_file = format!("{}.csv", config.id);

        if config.enable_debug_logging {
            report_log_error(log_to_file(
                &log_file,
                &format!(
                    "processor {} started: order {}, nominal fs {} Hz",
                    config.id,
                    filter.order(),
                    config.fs
                ),
            ));
        }

        SignalProcessor {
            index: 0,
            filter,
            sample_rate: SampleRateMonitor::new(),
            config,
            log_file,
            csv_file,
        }
    }

    pub fn process_sample(&mut self, sample: f64) -> ProcessedSample {
        self.process_sample_at(sample, Instant::now())
    }

    /// Filters `sample`, which the producer acquired at `at`.
    pub fn process_sample_at(&mut self, sample: f64, at: Instant) -> ProcessedSample {
        let filtered = self.filter.filter(sample);
        let sample_rate = self.sample_rate.update(at);

        let processed = ProcessedSample {
            index: self.index,
            raw: sample,
            filtered,
            sample_rate,
        };

        if self.config.enable_debug_logging {
            self.log_sample(&processed);
        }

        self.index += 1;
        processed
    }

    pub fn reset(&mut self) {
        self.filter.reset();
        self.sample_rate.reset();
        self.index = 0;
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn filter(&self) -> &IirFilter {
        &self.filter
    }

    pub fn config(&self) -> &SignalProcessorConfig {
        &self.config
    }

    /// Moving average of the measured acquisition rate.
    pub fn sample_rate(&self) -> Option<f64> {
        self.sample_rate.average()
    }

    fn log_sample(&self, processed: &ProcessedSample) {
        let index = processed.index.to_string();
        let raw = processed.raw.to_string();
        let filtered = processed.filtered.to_string();
        let rate = processed
            .sample_rate
            .map(|r| format!("{:.3}", r))
            .unwrap_or_default();

        report_log_error(log_csv(
            &self.csv_file,
            &["index", "raw", "filtered", "sample_rate"],
            &[index.as_str(), raw.as_str(), filtered.as_str(), rate.as_str()],
        ));

        if !processed.filtered.is_finite() {
            report_log_error(log_to_file(
                &self.log_file,
                &format!(
                    "index {}: non-finite output {} for input {}",
                    processed.index, processed.filtered, processed.raw
                ),
            ));
        }
    }
}

// Logging must never stall the sample loop
fn report_log_error(result: std::io::Result<()>) {
    if let Err(e) = result {
        eprintln!("Failed to write debug log: {}", e);
    }
}
