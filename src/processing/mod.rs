pub mod sample_rate;
pub mod signal_processor;

pub use sample_rate::SampleRateMonitor;
pub use signal_processor::{ProcessedSample, SignalProcessor, SignalProcessorConfig};
