use super::coefficients::SosCoefficients;
use super::error::FilterResult;

/// Second-order IIR section (biquad), Direct Form II.
///
/// Holds two delay registers that start at zero and advance by one step per
/// call to [`SecondOrderFilter::filter`]. There is no clamping: unstable
/// coefficients grow without bound and NaN/inf inputs propagate.
#[derive(Debug, Clone)]
pub struct SecondOrderFilter {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
    w1: f64,
    w2: f64,
}

impl SecondOrderFilter {
    pub fn new(coeffs: SosCoefficients) -> Self {
        SecondOrderFilter {
            b0: coeffs.b0,
            b1: coeffs.b1,
            b2: coeffs.b2,
            a1: coeffs.a1,
            a2: coeffs.a2,
            w1: 0.0,
            w2: 0.0,
        }
    }

    /// Build from a flat `[b0, b1, b2, a0, a1, a2]` row.
    pub fn from_slice(s: &[f64]) -> FilterResult<Self> {
        SosCoefficients::from_slice(s).map(Self::new)
    }

    // Filter one input sample and advance the delay registers
    #[inline]
    pub fn filter(&mut self, sample: f64) -> f64 {
        // feedback
        let w0 = sample - self.a1 * self.w1 - self.a2 * self.w2;
        // feedforward, reads the registers before they move
        let output = self.b1 * self.w1 + self.b2 * self.w2 + self.b0 * w0;

        self.w2 = self.w1;
        self.w1 = w0;

        output
    }

    pub fn reset(&mut self) {
        self.w1 = 0.0;
        self.w2 = 0.0;
    }

    pub fn coefficients(&self) -> SosCoefficients {
        SosCoefficients::new(self.b0, self.b1, self.b2, self.a1, self.a2)
    }
}
