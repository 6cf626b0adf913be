use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::domain::errors::SalesError;

/// Whether the customer pays once or on a subscription basis. No subscription
/// lifecycle is tracked, the flag only labels the sale.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SaleKind {
    #[default]
    OneTime,
    Recurring,
}

impl SaleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleKind::OneTime => "OneTime",
            SaleKind::Recurring => "Recurring",
        }
    }
}

impl TryFrom<&str> for SaleKind {
    type Error = SalesError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "OneTime" => Ok(SaleKind::OneTime),
            "Recurring" => Ok(SaleKind::Recurring),
            _ => Err(SalesError::Validation(format!("unknown kind: {value:?}"))),
        }
    }
}

impl Display for SaleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
