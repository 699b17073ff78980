use super::biquad::SecondOrderFilter;
use super::coefficients::SosCoefficients;
use super::error::{FilterError, FilterResult};

/// IIR filter of any even order, run as a cascade of second-order sections.
///
/// Each sample goes through the sections in the order they were given; the
/// output of the last section is the filter output. Section count and order
/// are fixed once built.
#[derive(Debug, Clone)]
pub struct IirFilter {
    sections: Vec<SecondOrderFilter>,
}

impl IirFilter {
    pub fn new(sos: &[SosCoefficients]) -> FilterResult<Self> {
        if sos.is_empty() {
            return Err(FilterError::EmptyCascade);
        }

        Ok(IirFilter {
            sections: sos.iter().copied().map(SecondOrderFilter::new).collect(),
        })
    }

    /// Build from flat SOS rows (`[b0, b1, b2, a0, a1, a2]` each), the layout
    /// filter-design tools emit.
    pub fn from_sos<R: AsRef<[f64]>>(sos: &[R]) -> FilterResult<Self> {
        let coeffs = sos
            .iter()
            .enumerate()
            .map(|(index, row)| {
                SosCoefficients::from_slice(row.as_ref()).map_err(|_| {
                    FilterError::InvalidCoefficients {
                        section: Some(index),
                        len: row.as_ref().len(),
                    }
                })
            })
            .collect::<FilterResult<Vec<_>>>()?;

        Self::new(&coeffs)
    }

    #[inline]
    pub fn filter(&mut self, sample: f64) -> f64 {
        self.sections
            .iter_mut()
            .fold(sample, |acc, section| section.filter(acc))
    }

    pub fn reset(&mut self) {
        self.sections.iter_mut().for_each(SecondOrderFilter::reset);
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn order(&self) -> usize {
        2 * self.sections.len()
    }

    pub fn sections(&self) -> &[SecondOrderFilter] {
        &self.sections
    }

    pub fn coefficients(&self) -> Vec<SosCoefficients> {
        self.sections.iter().map(|s| s.coefficients()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn matches_reference_outputs() {
        let cases: [([[f64; 6]; 2], [f64; 4], [f64; 4]); 2] = [
            (
                [[1.2, 2.3, 3.4, 1.0, 5.0, 6.0], [3.21, 4.56, 6.31, 1.0, 7.0, 9.0]],
                [4.0, 6.0, 1.0, 0.0],
                [15.408, -110.364, 750.846, -4525.681],
            ),
            (
                [[1.7, 1.3, 1.4, 1.0, 9.0, 6.0], [1.6, 1.3, 3.5, 1.0, 5.9, 2.7]],
                [4.0, 2.0, 3.0, 7.0],
                [10.88, -139.512, 1462.6048, -13743.3559],
            ),
        ];

        for (sos, input, expected) in cases {
            let mut filter = IirFilter::from_sos(&sos).unwrap();
            for (&x, &want) in input.iter().zip(expected.iter()) {
                assert_abs_diff_eq!(filter.filter(x), want, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn empty_cascade_is_rejected() {
        assert_eq!(IirFilter::new(&[]).unwrap_err(), FilterError::EmptyCascade);
        let rows: [[f64; 6]; 0] = [];
        assert_eq!(IirFilter::from_sos(&rows).unwrap_err(), FilterError::EmptyCascade);
    }

    #[test]
    fn malformed_row_reports_section_index() {
        let rows: Vec<Vec<f64>> = vec![vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0], vec![1.0, 0.0, 0.0, 1.0, 0.0]];
        let err = IirFilter::from_sos(&rows).unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidCoefficients {
                section: Some(1),
                len: 5
            }
        );
        assert_eq!(
            err.to_string(),
            "section 1: expected 6 coefficients [b0, b1, b2, a0, a1, a2], got 5"
        );
    }

    #[test]
    fn single_section_cascade_equals_section() {
        let sos = [5.7, 7.3, 3.4, 1.0, 9.0, 6.0];
        let mut cascade = IirFilter::from_sos(&[sos]).unwrap();
        let mut section = SecondOrderFilter::from_slice(&sos).unwrap();

        for x in [4.0, 2.0, 3.0, 7.0, -1.5] {
            assert_eq!(cascade.filter(x), section.filter(x));
        }
    }

    #[test]
    fn keeps_construction_order() {
        let first = SosCoefficients::new(1.2, 2.3, 3.4, 5.0, 6.0);
        let second = SosCoefficients::new(3.21, 4.56, 6.31, 7.0, 9.0);

        let filter = IirFilter::new(&[first, second]).unwrap();
        assert_eq!(filter.coefficients(), vec![first, second]);
        assert_eq!(filter.sections()[0].coefficients(), first);
        assert_eq!(filter.sections()[1].coefficients(), second);
        assert_eq!(filter.len(), 2);
        assert_eq!(filter.order(), 4);
        assert!(!filter.is_empty());
    }

    #[test]
    fn reset_clears_every_section() {
        let mut filter = IirFilter::from_sos(&[
            [1.7, 1.3, 1.4, 1.0, 9.0, 6.0],
            [1.6, 1.3, 3.5, 1.0, 5.9, 2.7],
        ])
        .unwrap();

        let input = [4.0, 2.0, 3.0, 7.0];
        let first: Vec<f64> = input.iter().map(|&x| filter.filter(x)).collect();
        filter.reset();
        let second: Vec<f64> = input.iter().map(|&x| filter.filter(x)).collect();

        assert_eq!(first, second);
    }
}
