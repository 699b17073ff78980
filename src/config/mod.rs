// src/config/mod.rs
use crate::filters::{FilterResult, IirFilter, SosCoefficients};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub processor: ProcessorConfig,
    pub filter: FilterConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProcessorConfig {
    pub fs: f64,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub enable_debug_logging: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FilterConfig {
    pub id: String,
    pub sos: Vec<SosCoefficients>,
}

impl ProcessorConfig {
    /// Time between two samples at the nominal rate `fs`.
    pub fn sample_period(&self) -> Result<Duration, String> {
        if !(self.fs > 0.0 && self.fs.is_finite()) {
            return Err(format!("Sampling rate must be positive and finite, got {}", self.fs));
        }
        Duration::try_from_secs_f64(1.0 / self.fs)
            .map_err(|_| format!("Sampling rate {} Hz is too low to give a sample period", self.fs))
    }
}

impl Config {
    pub fn build_filter(&self) -> FilterResult<IirFilter> {
        IirFilter::new(&self.filter.sos)
    }
}

impl Default for Config {
    // 4th order Butterworth lowpass, 1 Hz cutoff at fs = 30 Hz
    fn default() -> Self {
        Self {
            processor: ProcessorConfig {
                fs: 30.0,
                verbose: true,
                enable_debug_logging: false,
            },
            filter: FilterConfig {
                id: "lowpass_1hz".to_string(),
                sos: vec![
                    SosCoefficients::new(
                        9.276462029231156e-05,
                        1.855292405846231e-04,
                        9.276462029231156e-05,
                        -1.6410697372354206,
                        0.6777322113802571,
                    ),
                    SosCoefficients::new(1.0, 2.0, 1.0, -1.8121154003511892, 0.8525991363591154),
                ],
            },
        }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, String> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file: {}", e))?;

    serde_yaml::from_str(&config_str)
        .map_err(|e| format!("Failed to parse config file: {}", e))
}

pub fn save_config<P: AsRef<Path>>(config: &Config, path: P) -> Result<(), String> {
    let yaml = serde_yaml::to_string(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;

    fs::write(path, yaml)
        .map_err(|e| format!("Failed to write config file: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn parses_sos_rows() {
        let yaml = r#"
processor:
  fs: 512.0
  verbose: false
filter:
  id: cascade
  sos:
    - [1.2, 2.3, 3.4, 1.0, 5.0, 6.0]
    - [3.21, 4.56, 6.31, 1.0, 7.0, 9.0]
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.processor.fs, 512.0);
        assert!(!config.processor.enable_debug_logging);

        let mut filter = config.build_filter().unwrap();
        assert_eq!(filter.len(), 2);
        assert_abs_diff_eq!(filter.filter(4.0), 15.408, epsilon = 1e-4);
    }

    #[test]
    fn rejects_malformed_rows() {
        let yaml = r#"
processor:
  fs: 30.0
filter:
  id: broken
  sos:
    - [1.0, 2.0, 1.0, 1.0, 0.5]
"#;
        let err = serde_yaml::from_str::<Config>(yaml).unwrap_err();
        assert!(err.to_string().contains("expected 6 coefficients"));
    }

    #[test]
    fn empty_sos_list_fails_to_build() {
        let mut config = Config::default();
        config.filter.sos.clear();
        assert!(config.build_filter().is_err());
    }

    #[test]
    fn default_lowpass_has_unity_dc_gain() {
        let mut filter = Config::default().build_filter().unwrap();
        let mut y = 0.0;
        for _ in 0..600 {
            y = filter.filter(1.0);
        }
        assert_abs_diff_eq!(y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let config = Config::default();
        save_config(&config, &path).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn sample_period_from_fs() {
        let mut processor = Config::default().processor;
        assert_eq!(processor.sample_period().unwrap(), Duration::from_secs_f64(1.0 / 30.0));

        for fs in [0.0, -30.0, f64::NAN, f64::INFINITY] {
            processor.fs = fs;
            let err = processor.sample_period().unwrap_err();
            assert!(err.starts_with("Sampling rate must be positive"), "{}", err);
        }

        processor.fs = 1e-20;
        let err = processor.sample_period().unwrap_err();
        assert!(err.contains("too low"), "{}", err);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_config("does/not/exist.yaml").unwrap_err();
        assert!(err.starts_with("Failed to read config file"));
    }
}
