use rust_decimal::Decimal;

use crate::domain::errors::SalesError;

/// Trims surrounding whitespace and rejects empty text.
pub fn required_text(field: &str, value: &str) -> Result<String, SalesError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SalesError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Amounts are stored as `NUMERIC(12, 2)`.
const AMOUNT_DECIMALS: u32 = 2;
const AMOUNT_LIMIT: i64 = 10_000_000_000;

pub fn positive_amount(amount: Decimal) -> Result<Decimal, SalesError> {
    if amount <= Decimal::ZERO {
        return Err(SalesError::validation(format!(
            "amount must be greater than zero, got {amount}"
        )));
    }
    if amount.normalize().scale() > AMOUNT_DECIMALS {
        return Err(SalesError::validation(format!(
            "amount must have at most {AMOUNT_DECIMALS} decimal places, got {amount}"
        )));
    }
    if amount >= Decimal::from(AMOUNT_LIMIT) {
        return Err(SalesError::validation(format!(
            "amount must be below {AMOUNT_LIMIT}, got {amount}"
        )));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        for raw in ["", "   ", "\t\n"] {
            let err = required_text("name", raw).unwrap_err();
            assert_eq!(err, SalesError::validation("name must not be empty"));
        }
        assert_eq!(required_text("name", "  Ana ").unwrap(), "Ana");
    }

    #[test]
    fn zero_and_negative_amounts_are_rejected() {
        assert!(positive_amount(Decimal::ZERO).unwrap_err().is_validation());
        assert!(positive_amount(Decimal::new(-1, 2)).unwrap_err().is_validation());
        assert_eq!(
            positive_amount(Decimal::new(1, 2)).unwrap(),
            Decimal::new(1, 2)
        );
    }

    #[test]
    fn sub_cent_amounts_are_rejected() {
        for raw in [Decimal::new(1, 3), Decimal::new(4, 3), Decimal::new(5, 3)] {
            let err = positive_amount(raw).unwrap_err();
            assert!(err.to_string().contains("decimal places"), "got: {err}");
        }
        assert_eq!(
            positive_amount(Decimal::new(1500, 3)).unwrap(),
            Decimal::new(150, 2)
        );
    }

    #[test]
    fn amounts_beyond_the_column_are_rejected() {
        for raw in [
            Decimal::from(10_000_000_000i64),
            Decimal::from(100_000_000_000i64),
            Decimal::MAX,
        ] {
            let err = positive_amount(raw).unwrap_err();
            assert!(err.to_string().contains("must be below"), "got: {err}");
        }
        assert!(positive_amount(Decimal::new(999_999_999_999, 2)).is_ok());
    }
}
