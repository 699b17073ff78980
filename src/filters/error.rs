use thiserror::Error;

/// Construction-time failures. Filtering itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("{}expected 6 coefficients [b0, b1, b2, a0, a1, a2], got {len}", section_prefix(.section))]
    InvalidCoefficients { section: Option<usize>, len: usize },

    #[error("a filter cascade needs at least one second-order section")]
    EmptyCascade,
}

fn section_prefix(section: &Option<usize>) -> String {
    match section {
        Some(index) => format!("section {}: ", index),
        None => String::new(),
    }
}

pub type FilterResult<T> = Result<T, FilterError>;
