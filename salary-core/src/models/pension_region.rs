use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::TaxYearConfig;

/// Employee share of the statutory pension insurance rate, in percent.
pub const PENSION_RATE: Decimal = dec!(9.3);

/// Pension insurance region. Selects the pension and unemployment
/// contribution cap; `Exempt` (`"None"` on the wire) disables pension
/// insurance entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PensionRegion {
    West,
    East,
    #[serde(rename = "None")]
    Exempt,
}

impl PensionRegion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::West => "West",
            Self::East => "East",
            Self::Exempt => "None",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "West" => Some(Self::West),
            "East" => Some(Self::East),
            "None" => Some(Self::Exempt),
            _ => None,
        }
    }

    /// Pension insurance rate in percent.
    pub fn pension_rate(&self) -> Decimal {
        match self {
            Self::West | Self::East => PENSION_RATE,
            Self::Exempt => Decimal::ZERO,
        }
    }

    /// Annual cap shared by pension and unemployment insurance.
    ///
    /// `Exempt` still resolves to the West cap: unemployment insurance is
    /// owed regardless of pension exemption.
    pub fn contribution_cap(
        &self,
        config: &TaxYearConfig,
    ) -> Decimal {
        match self {
            Self::East => config.contribution_cap_pension_east,
            Self::West | Self::Exempt => config.contribution_cap_pension_west,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn exempt_region_has_zero_pension_rate() {
        assert_eq!(PensionRegion::Exempt.pension_rate(), Decimal::ZERO);
        assert_eq!(PensionRegion::West.pension_rate(), dec!(9.3));
        assert_eq!(PensionRegion::East.pension_rate(), dec!(9.3));
    }

    #[test]
    fn contribution_cap_follows_region() {
        let config = TaxYearConfig::for_2024();

        assert_eq!(PensionRegion::West.contribution_cap(&config), dec!(90600));
        assert_eq!(PensionRegion::East.contribution_cap(&config), dec!(89400));
        assert_eq!(PensionRegion::Exempt.contribution_cap(&config), dec!(90600));
    }

    #[test]
    fn parse_accepts_wire_names() {
        assert_eq!(PensionRegion::parse("West"), Some(PensionRegion::West));
        assert_eq!(PensionRegion::parse("East"), Some(PensionRegion::East));
        assert_eq!(PensionRegion::parse("None"), Some(PensionRegion::Exempt));
        assert_eq!(PensionRegion::parse("Exempt"), None);
    }

    #[test]
    fn exempt_serializes_as_none() {
        let json = serde_json::to_string(&PensionRegion::Exempt).unwrap();
        assert_eq!(json, "\"None\"");
    }
}
