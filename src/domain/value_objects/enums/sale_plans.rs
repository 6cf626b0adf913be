use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::domain::errors::SalesError;

/// Billing period a sale was closed under. Stored as its label text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SalePlan {
    Monthly,
    Bimonthly,
    Quarterly,
    #[serde(rename = "Four-monthly")]
    FourMonthly,
    Semiannual,
    Annual,
}

impl SalePlan {
    pub const ALL: [SalePlan; 6] = [
        SalePlan::Monthly,
        SalePlan::Bimonthly,
        SalePlan::Quarterly,
        SalePlan::FourMonthly,
        SalePlan::Semiannual,
        SalePlan::Annual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SalePlan::Monthly => "Monthly",
            SalePlan::Bimonthly => "Bimonthly",
            SalePlan::Quarterly => "Quarterly",
            SalePlan::FourMonthly => "Four-monthly",
            SalePlan::Semiannual => "Semiannual",
            SalePlan::Annual => "Annual",
        }
    }
}

impl TryFrom<&str> for SalePlan {
    type Error = SalesError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        SalePlan::ALL
            .into_iter()
            .find(|plan| plan.as_str() == value)
            .ok_or_else(|| SalesError::Validation(format!("unknown plan: {value:?}")))
    }
}

impl Display for SalePlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
