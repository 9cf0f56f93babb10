//! Core savings goal domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error, UserID,
    money::{add_amount, round_money},
};

/// Database identifier for a savings goal.
pub type SavingId = i64;

/// Database identifier for a deposit into a savings goal.
pub type SavingDepositId = i64;

/// An amount a user is saving towards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Saving {
    pub id: SavingId,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub target_date: Option<Date>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub user_id: UserID,
}

/// Money put towards a savings goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingDeposit {
    pub id: SavingDepositId,
    pub amount: Decimal,
    pub date: Date,
    pub note: Option<String>,
    pub saving_id: SavingId,
}

/// A savings goal together with its deposits, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingWithDeposits {
    #[serde(flatten)]
    pub saving: Saving,
    pub deposits: Vec<SavingDeposit>,
}

/// A validated savings goal that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSaving {
    pub name: String,
    pub target_amount: Decimal,
    pub target_date: Option<Date>,
    pub description: Option<String>,
    pub color: Option<String>,
}

/// A validated deposit that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSavingDeposit {
    pub amount: Decimal,
    pub date: Date,
    pub note: Option<String>,
}

/// The request body for creating a savings goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingInput {
    pub name: String,
    pub target_amount: Decimal,
    pub target_date: Option<Date>,
    pub description: Option<String>,
    pub color: Option<String>,
}

/// The request body for recording a deposit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingDepositInput {
    pub amount: Decimal,
    pub date: Date,
    pub note: Option<String>,
}

/// Totals over all of a user's savings goals.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingSummary {
    pub total_savings: u64,
    pub total_target: Decimal,
    pub total_current: Decimal,
    pub total_remaining: Decimal,
    /// Progress towards all targets combined, from 0 to 100.
    pub percent_complete: Decimal,
}

impl SavingSummary {
    /// Summarise `savings`.
    ///
    /// Goals that have been overshot do not count towards the remaining total.
    ///
    /// # Errors
    ///
    /// Returns an [Error::AmountOverflow] if a total does not fit in a [Decimal].
    pub fn from_savings(savings: &[Saving]) -> Result<Self, Error> {
        let mut summary = SavingSummary::default();

        for saving in savings {
            summary.total_savings += 1;
            summary.total_target = add_amount(summary.total_target, saving.target_amount)?;
            summary.total_current = add_amount(summary.total_current, saving.current_amount)?;
            summary.total_remaining = add_amount(
                summary.total_remaining,
                (saving.target_amount - saving.current_amount).max(Decimal::ZERO),
            )?;
        }

        if summary.total_target > Decimal::ZERO {
            let progress = summary
                .total_current
                .checked_div(summary.total_target)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::ONE_HUNDRED);
            summary.percent_complete = round_money(progress.min(Decimal::ONE_HUNDRED));
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::{Error, UserID};

    use super::{Saving, SavingSummary};

    fn saving(target: i64, current: i64) -> Saving {
        Saving {
            id: 1,
            name: "Holiday".to_owned(),
            target_amount: Decimal::from(target),
            current_amount: Decimal::from(current),
            target_date: Some(date!(2025 - 12 - 01)),
            description: None,
            color: None,
            user_id: UserID::new(1),
        }
    }

    #[test]
    fn summary_of_no_savings_is_zero() {
        assert_eq!(SavingSummary::from_savings(&[]), Ok(SavingSummary::default()));
    }

    #[test]
    fn summary_totals_goals() {
        let summary = SavingSummary::from_savings(&[saving(1000, 250), saving(500, 500)]).unwrap();

        assert_eq!(summary.total_savings, 2);
        assert_eq!(summary.total_target, Decimal::from(1500));
        assert_eq!(summary.total_current, Decimal::from(750));
        assert_eq!(summary.total_remaining, Decimal::from(750));
        assert_eq!(summary.percent_complete, Decimal::from(50));
    }

    #[test]
    fn overshot_goal_does_not_reduce_remaining() {
        let summary = SavingSummary::from_savings(&[saving(100, 150), saving(100, 0)]).unwrap();

        assert_eq!(summary.total_remaining, Decimal::from(100));
        assert_eq!(summary.percent_complete, Decimal::from(75));
    }

    #[test]
    fn far_overshot_goal_is_complete() {
        let goal = Saving {
            target_amount: Decimal::new(1, 2),
            current_amount: Decimal::MAX,
            ..saving(0, 0)
        };

        let summary = SavingSummary::from_savings(&[goal]).unwrap();

        assert_eq!(summary.percent_complete, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn unrepresentable_total_is_an_error() {
        let goal = Saving {
            current_amount: Decimal::MAX,
            ..saving(100, 0)
        };

        let summary = SavingSummary::from_savings(&[goal.clone(), goal]);

        assert_eq!(summary, Err(Error::AmountOverflow));
    }
}
