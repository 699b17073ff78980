use crate::config::load_config;
use crate::filters::{FilterError, IirFilter};

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

impl From<FilterError> for PyErr {
    fn from(e: FilterError) -> Self {
        PyValueError::new_err(e.to_string())
    }
}

/// Sample-by-sample IIR filter built from SOS rows, e.g. the output of
/// `scipy.signal.butter(..., output='sos')`.
#[pyclass(name = "IirFilter")]
pub struct PyIirFilter {
    filter: IirFilter,
}

#[pymethods]
impl PyIirFilter {
    #[new]
    pub fn new(sos: Vec<Vec<f64>>) -> PyResult<Self> {
        Ok(PyIirFilter {
            filter: IirFilter::from_sos(&sos)?,
        })
    }

    #[staticmethod]
    pub fn from_config(path: &str) -> PyResult<Self> {
        let config = load_config(path).map_err(PyIOError::new_err)?;
        Ok(PyIirFilter {
            filter: config.build_filter()?,
        })
    }

    pub fn filter(&mut self, sample: f64) -> f64 {
        self.filter.filter(sample)
    }

    pub fn reset(&mut self) {
        self.filter.reset();
    }

    #[getter]
    pub fn order(&self) -> usize {
        self.filter.order()
    }

    pub fn __len__(&self) -> usize {
        self.filter.len()
    }
}

/// A Python module implemented in Rust.
#[pymodule]
pub fn realtime_iir(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyIirFilter>()?;
    Ok(())
}
