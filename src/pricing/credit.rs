//! Credit score tiers and their rate adjustments

use serde::{Deserialize, Serialize};

/// Credit tier used to price the borrower's score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditTier {
    /// Below 680
    Subprime,
    /// [680, 740)
    NearPrime,
    /// [740, 800)
    Prime,
    /// 800 and above
    SuperPrime,
}

impl CreditTier {
    /// Determine tier from a credit score.
    /// Boundaries are exclusive on the upper side, so 680 is NearPrime and 740 is Prime.
    pub fn from_score(score: u16) -> Self {
        if score < 680 {
            CreditTier::Subprime
        } else if score < 740 {
            CreditTier::NearPrime
        } else if score < 800 {
            CreditTier::Prime
        } else {
            CreditTier::SuperPrime
        }
    }

    /// Rate adjustment in percentage points
    pub fn adjustment(&self) -> f64 {
        match self {
            CreditTier::Subprime => 0.5,
            CreditTier::NearPrime => 0.25,
            CreditTier::Prime => 0.0,
            CreditTier::SuperPrime => -0.15,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CreditTier::Subprime => "[300, 680)",
            CreditTier::NearPrime => "[680, 740)",
            CreditTier::Prime => "[740, 800)",
            CreditTier::SuperPrime => "[800, 850]",
        }
    }
}

/// Rate adjustment (percentage points) for a credit score
pub fn credit_adjustment(score: u16) -> f64 {
    CreditTier::from_score(score).adjustment()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(CreditTier::from_score(300), CreditTier::Subprime);
        assert_eq!(CreditTier::from_score(679), CreditTier::Subprime);
        assert_eq!(CreditTier::from_score(680), CreditTier::NearPrime);
        assert_eq!(CreditTier::from_score(739), CreditTier::NearPrime);
        assert_eq!(CreditTier::from_score(740), CreditTier::Prime);
        assert_eq!(CreditTier::from_score(799), CreditTier::Prime);
        assert_eq!(CreditTier::from_score(800), CreditTier::SuperPrime);
        assert_eq!(CreditTier::from_score(850), CreditTier::SuperPrime);
    }

    #[test]
    fn test_step_adjustments() {
        assert_eq!(credit_adjustment(679), 0.5);
        assert_eq!(credit_adjustment(680), 0.25);
        assert_eq!(credit_adjustment(739), 0.25);
        assert_eq!(credit_adjustment(740), 0.0);
        assert_eq!(credit_adjustment(799), 0.0);
        assert_eq!(credit_adjustment(800), -0.15);
    }
}
