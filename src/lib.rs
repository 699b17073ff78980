pub mod bindings;
pub mod config;
pub mod filters;
pub mod local;
pub mod processing;
pub mod utils;

pub use filters::{FilterError, IirFilter, SecondOrderFilter, SosCoefficients};
