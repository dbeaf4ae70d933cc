//! Loyalty Points

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Kind of a loyalty ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// Points awarded for a completed checkout.
    Earned,

    /// Points spent against a checkout.
    Redeemed,

    /// Points granted by staff.
    Bonus,
}

impl TransactionKind {
    /// Stable storage label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Earned => "earned",
            Self::Redeemed => "redeemed",
            Self::Bonus => "bonus",
        }
    }

    /// Signed ledger value of `points` for this kind.
    ///
    /// Redemptions are stored negative so the balance is a plain sum.
    pub fn signed_points(self, points: u32) -> i64 {
        match self {
            Self::Earned | Self::Bonus => i64::from(points),
            Self::Redeemed => -i64::from(points),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown transaction kind label.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown loyalty transaction kind \"{0}\"")]
pub struct UnknownTransactionKind(pub String);

impl FromStr for TransactionKind {
    type Err = UnknownTransactionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "earned" => Ok(Self::Earned),
            "redeemed" => Ok(Self::Redeemed),
            "bonus" => Ok(Self::Bonus),
            other => Err(UnknownTransactionKind(other.to_string())),
        }
    }
}

/// Aggregate view of a customer's ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoyaltySummary {
    /// Current balance: the sum of all entries.
    pub total_points: i64,

    /// Sum of positive entries.
    pub total_earned: i64,

    /// Absolute sum of negative entries.
    pub total_redeemed: i64,
}

impl LoyaltySummary {
    /// Fold signed ledger entries into a summary.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        points
            .into_iter()
            .fold(Self::default(), |mut summary, entry| {
                summary.total_points += entry;

                if entry > 0 {
                    summary.total_earned += entry;
                } else {
                    summary.total_redeemed += entry.abs();
                }

                summary
            })
    }

    /// Whether the balance covers a redemption.
    pub fn covers(&self, points: u32) -> bool {
        self.total_points >= i64::from(points)
    }
}

/// Redemption larger than the available balance.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("cannot redeem {requested} points with a balance of {available}")]
pub struct InsufficientPoints {
    /// Points asked for.
    pub requested: u32,

    /// Current balance.
    pub available: i64,
}

/// Reject redemptions that would take the balance below zero.
///
/// # Errors
///
/// Returns [`InsufficientPoints`] when `requested` exceeds the balance.
pub fn ensure_redeemable(summary: &LoyaltySummary, requested: u32) -> Result<(), InsufficientPoints> {
    if summary.covers(requested) {
        Ok(())
    } else {
        Err(InsufficientPoints {
            requested,
            available: summary.total_points,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn redeemed_points_are_negative() {
        assert_eq!(TransactionKind::Redeemed.signed_points(500), -500);
        assert_eq!(TransactionKind::Earned.signed_points(11), 11);
        assert_eq!(TransactionKind::Bonus.signed_points(50), 50);
    }

    #[test]
    fn summary_splits_earned_and_redeemed() {
        let summary = LoyaltySummary::from_points([120, -50, 11, 25, -30]);

        assert_eq!(
            summary,
            LoyaltySummary {
                total_points: 76,
                total_earned: 156,
                total_redeemed: 80,
            }
        );
    }

    #[test]
    fn empty_ledger_has_zero_balance() {
        assert_eq!(
            LoyaltySummary::from_points(Vec::new()),
            LoyaltySummary::default()
        );
    }

    #[test]
    fn redemption_up_to_balance_is_allowed() -> TestResult {
        let summary = LoyaltySummary::from_points([500]);

        ensure_redeemable(&summary, 500)?;
        ensure_redeemable(&summary, 0)?;

        Ok(())
    }

    #[test]
    fn redemption_above_balance_is_rejected() {
        let summary = LoyaltySummary::from_points([100, -40]);

        assert_eq!(
            ensure_redeemable(&summary, 61),
            Err(InsufficientPoints {
                requested: 61,
                available: 60,
            })
        );
    }

    #[test]
    fn kind_labels_parse() -> TestResult {
        for kind in [
            TransactionKind::Earned,
            TransactionKind::Redeemed,
            TransactionKind::Bonus,
        ] {
            assert_eq!(kind.as_str().parse::<TransactionKind>()?, kind);
        }

        assert!("refund".parse::<TransactionKind>().is_err());

        Ok(())
    }
}
