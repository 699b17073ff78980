pub mod biquad;
pub mod cascade;
pub mod coefficients;
pub mod error;

pub use biquad::SecondOrderFilter;
pub use cascade::IirFilter;
pub use coefficients::{SosCoefficients, SOS_ROW_LEN};
pub use error::{FilterError, FilterResult};
