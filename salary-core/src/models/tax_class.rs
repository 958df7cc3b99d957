use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Relief for single parents, deducted from taxable income in class II.
pub const SINGLE_PARENT_ALLOWANCE: Decimal = dec!(4260);

/// German payroll tax class (Steuerklasse). Serialized as its number 1–6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaxClass {
    I,
    II,
    III,
    IV,
    V,
    VI,
}

/// How a tax class adjusts the income tax computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxClassRules {
    /// Subtracted from taxable income before the tariff is applied.
    pub allowance_adjustment: Decimal,
    /// Applied to the tariff result; above one for classes V and VI.
    pub multiplier: Decimal,
    /// Joint taxation: tariff on half the income, doubled.
    pub use_splitting: bool,
}

impl TaxClass {
    pub const ALL: [TaxClass; 6] = [Self::I, Self::II, Self::III, Self::IV, Self::V, Self::VI];

    pub fn number(&self) -> u8 {
        match self {
            Self::I => 1,
            Self::II => 2,
            Self::III => 3,
            Self::IV => 4,
            Self::V => 5,
            Self::VI => 6,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::I),
            2 => Some(Self::II),
            3 => Some(Self::III),
            4 => Some(Self::IV),
            5 => Some(Self::V),
            6 => Some(Self::VI),
            _ => None,
        }
    }

    pub fn rules(&self) -> TaxClassRules {
        let (allowance_adjustment, multiplier, use_splitting) = match self {
            Self::I | Self::IV => (Decimal::ZERO, Decimal::ONE, false),
            Self::II => (SINGLE_PARENT_ALLOWANCE, Decimal::ONE, false),
            Self::III => (Decimal::ZERO, Decimal::ONE, true),
            Self::V => (Decimal::ZERO, dec!(1.3), false),
            Self::VI => (Decimal::ZERO, dec!(1.35), false),
        };

        TaxClassRules {
            allowance_adjustment,
            multiplier,
            use_splitting,
        }
    }
}

impl TryFrom<u8> for TaxClass {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::from_number(n).ok_or_else(|| format!("tax class must be between 1 and 6, got {n}"))
    }
}

impl From<TaxClass> for u8 {
    fn from(class: TaxClass) -> Self {
        class.number()
    }
}
