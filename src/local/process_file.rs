use std::error::Error;
use std::path::Path;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::config::Config;
use crate::processing::{SignalProcessor, SignalProcessorConfig};
use crate::utils::log::log_with_header;

#[derive(Debug, Clone, PartialEq)]
pub struct FileSummary {
    pub channels: usize,
    pub samples: usize,
    pub elapsed: Duration,
}

struct Channel {
    name: String,
    samples: Vec<f64>,
}

fn read_channels(path: &Path) -> Result<Vec<Channel>, Box<dyn Error>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut channels: Vec<Channel> = rdr
        .headers()?
        .iter()
        .map(|name| Channel {
            name: name.trim().to_string(),
            samples: Vec::new(),
        })
        .collect();

    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        for (channel, value) in channels.iter_mut().zip(record.iter()) {
            let sample: f64 = value.trim().parse().map_err(|e| {
                format!(
                    "row {}, column '{}': cannot parse '{}' as a sample: {}",
                    row + 1,
                    channel.name,
                    value,
                    e
                )
            })?;
            channel.samples.push(sample);
        }
    }

    Ok(channels)
}

fn channel_id(config: &Config, index: usize, channel: &Channel) -> String {
    format!("{}_{}_{}", config.filter.id, index, channel.name)
}

// Each channel runs through its own cascade; samples are stamped at the
// nominal rate since a recording carries no arrival times.
fn filter_channel(config: &Config, index: usize, channel: &Channel) -> Result<Vec<f64>, String> {
    let fs = config.processor.fs;
    config.processor.sample_period()?;

    let start = Instant::now();
    let span = Duration::try_from_secs_f64(channel.samples.len() as f64 / fs)
        .ok()
        .and_then(|span| start.checked_add(span));
    if span.is_none() {
        return Err(format!(
            "{} samples at {} Hz do not fit on the clock",
            channel.samples.len(),
            fs
        ));
    }

    let processor_config = SignalProcessorConfig {
        id: channel_id(config, index, channel),
        ..SignalProcessorConfig::from_config(config)
    };
    let filter = config.build_filter().map_err(|e| e.to_string())?;
    let mut processor = SignalProcessor::new(filter, processor_config);

    Ok(channel
        .samples
        .iter()
        .enumerate()
        .map(|(i, &sample)| {
            let at = start + Duration::from_secs_f64(i as f64 / fs);
            processor.process_sample_at(sample, at).filtered
        })
        .collect())
}

pub fn run<P, Q>(config: &Config, input: P, output: Q) -> Result<FileSummary, Box<dyn Error>>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    if !input.exists() {
        return Err(format!("Data file not found at path: {}", input.display()).into());
    }
    config.processor.sample_period()?;

    let start_time = Instant::now();

    let channels = read_channels(input)?;
    let filtered = channels
        .par_iter()
        .enumerate()
        .map(|(index, channel)| filter_channel(config, index, channel))
        .collect::<Result<Vec<_>, String>>()?;

    let mut wtr = csv::Writer::from_path(output.as_ref())?;

    let mut header = vec!["index".to_string()];
    for channel in &channels {
        header.push(channel.name.clone());
        header.push(format!("{}_filtered", channel.name));
    }
    wtr.write_record(&header)?;

    let samples = channels.first().map_or(0, |c| c.samples.len());
    for i in 0..samples {
        let mut record = Vec::with_capacity(header.len());
        record.push(i.to_string());
        for (channel, filtered) in channels.iter().zip(&filtered) {
            record.push(channel.samples[i].to_string());
            record.push(filtered[i].to_string());
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;

    let summary = FileSummary {
        channels: channels.len(),
        samples,
        elapsed: start_time.elapsed(),
    };

    if config.processor.verbose {
        println!(
            "Filtered {} channel(s) x {} samples in {:?} -> {}",
            summary.channels,
            summary.samples,
            summary.elapsed,
            output.as_ref().display()
        );
    }

    if config.processor.enable_debug_logging {
        let message = format!(
            "input: {}\noutput: {}\nchannels: {}\nsamples: {}\nelapsed: {:?}",
            input.display(),
            output.as_ref().display(),
            summary.channels,
            summary.samples,
            summary.elapsed
        );
        if let Err(e) = log_with_header(&format!("{}.log", config.filter.id), "file run", &message) {
            eprintln!("Failed to write debug log: {}", e);
        }
    }

    Ok(summary)
}
