//! Monetary amounts.
//!
//! Amounts are exact decimals. They are stored as text in SQLite and summed
//! in Rust so that no precision is lost to floating point arithmetic.

use rust_decimal::{Decimal, RoundingStrategy};
use rusqlite::{Row, types::Type};

use crate::Error;

/// The number of decimal places amounts are reported with.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// The largest amount a single record may carry.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Round `amount` to whole cents, rounding half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(
        MONEY_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Check that `amount` is a strictly positive amount of money.
///
/// # Errors
///
/// Returns an [Error::Validation] naming `field` if `amount` is zero or
/// negative, larger than [MAX_AMOUNT], or has more than
/// [MONEY_DECIMAL_PLACES] decimal places.
pub fn require_positive(field: &'static str, amount: Decimal) -> Result<Decimal, Error> {
    if amount <= Decimal::ZERO {
        return Err(Error::validation(field, "must be greater than zero"));
    }

    if amount > MAX_AMOUNT {
        return Err(Error::validation(
            field,
            format!("must not be greater than {MAX_AMOUNT}"),
        ));
    }

    if amount.normalize().scale() > MONEY_DECIMAL_PLACES {
        return Err(Error::validation(
            field,
            format!("must have at most {MONEY_DECIMAL_PLACES} decimal places"),
        ));
    }

    Ok(amount)
}

/// Check that `amount` is zero or greater and no larger than [MAX_AMOUNT].
///
/// # Errors
///
/// Returns an [Error::Validation] naming `field` if `amount` is out of range.
pub fn require_non_negative(field: &'static str, amount: Decimal) -> Result<Decimal, Error> {
    if amount < Decimal::ZERO {
        return Err(Error::validation(field, "must not be negative"));
    }

    if amount > MAX_AMOUNT {
        return Err(Error::validation(
            field,
            format!("must not be greater than {MAX_AMOUNT}"),
        ));
    }

    Ok(amount)
}

/// Add `amount` to `total`.
///
/// # Errors
///
/// Returns an [Error::AmountOverflow] if the sum does not fit in a [Decimal].
pub fn add_amount(total: Decimal, amount: Decimal) -> Result<Decimal, Error> {
    total.checked_add(amount).ok_or(Error::AmountOverflow)
}

/// Sum `amounts`, failing instead of overflowing.
pub fn sum_amounts<'a>(amounts: impl IntoIterator<Item = &'a Decimal>) -> Result<Decimal, Error> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| add_amount(total, *amount))
}

/// Read a decimal stored as text from column `index` of `row`.
pub(crate) fn get_decimal(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let text: String = row.get(index)?;

    text.parse()
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error)))
}

/// Read a nullable decimal stored as text from column `index` of `row`.
pub(crate) fn get_optional_decimal(
    row: &Row,
    index: usize,
) -> Result<Option<Decimal>, rusqlite::Error> {
    let text: Option<String> = row.get(index)?;

    text.map(|text| {
        text.parse().map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error))
        })
    })
    .transpose()
}
