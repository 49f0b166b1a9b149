//! Payment method attached to an expense.

use serde::{Deserialize, Serialize};

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Upi,
    Card,
    Cash,
    Bank,
}

impl PaymentMethod {
    /// Returns the canonical method string used by the store and the API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upi => "upi",
            Self::Card => "card",
            Self::Cash => "cash",
            Self::Bank => "bank",
        }
    }

    /// Returns the display label (first letter uppercased).
    pub fn label(self) -> &'static str {
        match self {
            Self::Upi => "Upi",
            Self::Card => "Card",
            Self::Cash => "Cash",
            Self::Bank => "Bank",
        }
    }
}

impl TryFrom<&str> for PaymentMethod {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "upi" => Ok(Self::Upi),
            "card" => Ok(Self::Card),
            "cash" => Ok(Self::Cash),
            "bank" => Ok(Self::Bank),
            other => Err(EngineError::Validation(format!(
                "invalid payment method: {other}"
            ))),
        }
    }
}
