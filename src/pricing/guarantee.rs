//! Government-style guarantee strength and the rate discount it earns

use serde::{Deserialize, Serialize};

/// Guarantee term (years) at which strength reaches 1.0
pub const FULL_GUARANTEE_TERM_YEARS: f64 = 50.0;

/// Discount (percentage points) granted at full guarantee strength
pub const MAX_GUARANTEE_DISCOUNT: f64 = 0.6;

/// Guarantee backing a loan
///
/// Neither field is clamped; the 0.6 point ceiling on the discount only holds
/// while `term_years <= 50` and `coverage_percent <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Guarantee {
    /// Years of the loan term covered by the guarantee
    pub term_years: f64,

    /// Share of the balance covered (0-100)
    pub coverage_percent: f64,
}

impl Guarantee {
    pub fn new(term_years: f64, coverage_percent: f64) -> Self {
        Self {
            term_years,
            coverage_percent,
        }
    }

    /// No guarantee at all
    pub fn none() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Normalized strength in [0, 1] for in-range inputs
    pub fn strength(&self) -> f64 {
        (self.term_years / FULL_GUARANTEE_TERM_YEARS) * (self.coverage_percent / 100.0)
    }

    /// Rate discount in percentage points
    pub fn discount(&self) -> f64 {
        self.strength() * MAX_GUARANTEE_DISCOUNT
    }
}

impl Default for Guarantee {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_full_guarantee_hits_cap() {
        let g = Guarantee::new(50.0, 100.0);
        assert_relative_eq!(g.strength(), 1.0);
        assert_relative_eq!(g.discount(), MAX_GUARANTEE_DISCOUNT);
    }

    #[test]
    fn test_no_guarantee() {
        assert_eq!(Guarantee::none().discount(), 0.0);
        assert_eq!(Guarantee::new(30.0, 0.0).discount(), 0.0);
        assert_eq!(Guarantee::new(0.0, 90.0).discount(), 0.0);
    }

    #[test]
    fn test_example_discount() {
        // 30 of 50 years at 85% coverage
        let g = Guarantee::new(30.0, 85.0);
        assert_relative_eq!(g.discount(), 0.306, epsilon = 1e-12);
    }

    #[test]
    fn test_monotone_in_term_and_coverage() {
        let coverages = [0.0, 10.0, 25.0, 50.0, 85.0, 100.0];
        let terms = [0.0, 5.0, 15.0, 30.0, 45.0, 50.0];

        for &coverage in &coverages {
            let mut prev = f64::NEG_INFINITY;
            for &term in &terms {
                let d = Guarantee::new(term, coverage).discount();
                assert!(d >= prev, "discount fell at term={} coverage={}", term, coverage);
                assert!(d <= MAX_GUARANTEE_DISCOUNT + 1e-12);
                prev = d;
            }
        }

        for &term in &terms {
            let mut prev = f64::NEG_INFINITY;
            for &coverage in &coverages {
                let d = Guarantee::new(term, coverage).discount();
                assert!(d >= prev, "discount fell at term={} coverage={}", term, coverage);
                prev = d;
            }
        }
    }

    #[test]
    fn test_out_of_range_not_clamped() {
        // 60-year guarantee exceeds the nominal ceiling
        let g = Guarantee::new(60.0, 100.0);
        assert!(g.discount() > MAX_GUARANTEE_DISCOUNT);
    }
}
