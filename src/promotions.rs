//! Promo Codes
//!
//! Eligibility and discount rules for promo codes. Usage counting is a
//! storage concern; the rules here only read `used_count`.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

/// How a promo code discount is calculated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountKind {
    /// `value` percent of the subtotal, optionally capped.
    Percentage,

    /// A flat `value` off, not capped at the subtotal.
    Fixed,
}

impl DiscountKind {
    /// Stable storage label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
        }
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown discount kind label.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown discount kind \"{0}\"")]
pub struct UnknownDiscountKind(pub String);

impl FromStr for DiscountKind {
    type Err = UnknownDiscountKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(Self::Percentage),
            "fixed" => Ok(Self::Fixed),
            other => Err(UnknownDiscountKind(other.to_string())),
        }
    }
}

/// What to do with a code that cannot be applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromoPolicy {
    /// Inapplicable codes contribute a zero discount and checkout continues.
    #[default]
    Lenient,

    /// Inapplicable codes abort checkout.
    Strict,
}

/// Why a promo code was not applied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Ineligibility {
    /// No code with this exact value exists.
    #[error("promo code does not exist")]
    Unknown,

    /// The code has been switched off.
    #[error("promo code is inactive")]
    Inactive,

    /// `valid_from` is still in the future.
    #[error("promo code is not valid yet")]
    NotYetValid,

    /// `valid_until` has passed.
    #[error("promo code has expired")]
    Expired,

    /// The subtotal does not reach the minimum order amount.
    #[error("order subtotal is below the minimum of {minimum}")]
    BelowMinimum {
        /// Required subtotal.
        minimum: Decimal,
    },

    /// `used_count` has reached `usage_limit`.
    #[error("promo code usage limit reached")]
    UsageLimitReached,
}

/// Promo code rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoCode {
    /// Case-sensitive code value.
    pub code: String,

    /// Discount calculation.
    pub kind: DiscountKind,

    /// Percentage points or flat amount, depending on `kind`.
    pub value: Decimal,

    /// Minimum subtotal required.
    pub min_order_amount: Option<Decimal>,

    /// Cap on percentage discounts.
    pub max_discount: Option<Decimal>,

    /// Start of the validity window (inclusive).
    pub valid_from: Option<Timestamp>,

    /// End of the validity window (inclusive).
    pub valid_until: Option<Timestamp>,

    /// Maximum number of successful applications.
    pub usage_limit: Option<u32>,

    /// Successful applications so far.
    pub used_count: u32,

    /// Whether the code is switched on.
    pub active: bool,
}

impl PromoCode {
    /// Check whether the code applies to a subtotal at `now`.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`Ineligibility`] rule.
    pub fn check_eligibility(&self, subtotal: Decimal, now: Timestamp) -> Result<(), Ineligibility> {
        if !self.active {
            return Err(Ineligibility::Inactive);
        }

        if self.valid_from.is_some_and(|from| now < from) {
            return Err(Ineligibility::NotYetValid);
        }

        if self.valid_until.is_some_and(|until| now > until) {
            return Err(Ineligibility::Expired);
        }

        if let Some(minimum) = self.min_order_amount {
            if subtotal < minimum {
                return Err(Ineligibility::BelowMinimum { minimum });
            }
        }

        if self.is_exhausted() {
            return Err(Ineligibility::UsageLimitReached);
        }

        Ok(())
    }

    /// Whether the usage limit has been reached.
    pub fn is_exhausted(&self) -> bool {
        self.usage_limit.is_some_and(|limit| self.used_count >= limit)
    }

    /// Discount amount for a subtotal, ignoring eligibility.
    pub fn discount_for(&self, subtotal: Decimal) -> Decimal {
        match self.kind {
            DiscountKind::Percentage => {
                let discount = subtotal * self.value / Decimal::ONE_HUNDRED;

                self.max_discount
                    .map_or(discount, |cap| discount.min(cap))
            }
            DiscountKind::Fixed => self.value,
        }
    }

    /// Eligibility check followed by the discount amount.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`Ineligibility`] rule.
    pub fn evaluate(&self, subtotal: Decimal, now: Timestamp) -> Result<Decimal, Ineligibility> {
        self.check_eligibility(subtotal, now)?;

        Ok(self.discount_for(subtotal))
    }
}

/// Result of looking at the promo code supplied with a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromoOutcome {
    /// No code was supplied.
    NotRequested,

    /// The code applies and contributes `discount`.
    Applied {
        /// Code value.
        code: String,

        /// Discount amount.
        discount: Decimal,
    },

    /// The code was supplied but does not apply.
    NotApplied {
        /// Code value.
        code: String,

        /// Reason it was skipped.
        reason: Ineligibility,
    },
}

impl PromoOutcome {
    /// Evaluate an optional, already looked-up code.
    ///
    /// `requested` is the code value the customer supplied and `found` the
    /// stored code with that exact value, if any.
    pub fn evaluate(
        requested: Option<&str>,
        found: Option<&PromoCode>,
        subtotal: Decimal,
        now: Timestamp,
    ) -> Self {
        let Some(code) = requested else {
            return Self::NotRequested;
        };

        let result = found
            .ok_or(Ineligibility::Unknown)
            .and_then(|promo| promo.evaluate(subtotal, now));

        match result {
            Ok(discount) => Self::Applied {
                code: code.to_string(),
                discount,
            },
            Err(reason) => Self::NotApplied {
                code: code.to_string(),
                reason,
            },
        }
    }

    /// Discount contributed to the order.
    pub fn discount(&self) -> Decimal {
        match self {
            Self::Applied { discount, .. } => *discount,
            Self::NotRequested | Self::NotApplied { .. } => Decimal::ZERO,
        }
    }

    /// Whether the usage counter must be incremented.
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}
