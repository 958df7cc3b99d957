use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::PensionRegion;

/// German federal state (Bundesland), identified on the wire by its
/// two-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FederalState {
    #[serde(rename = "BW")]
    BadenWuerttemberg,
    #[serde(rename = "BY")]
    Bavaria,
    #[serde(rename = "BE")]
    Berlin,
    #[serde(rename = "BB")]
    Brandenburg,
    #[serde(rename = "HB")]
    Bremen,
    #[serde(rename = "HH")]
    Hamburg,
    #[serde(rename = "HE")]
    Hesse,
    #[serde(rename = "MV")]
    MecklenburgVorpommern,
    #[serde(rename = "NI")]
    LowerSaxony,
    #[serde(rename = "NW")]
    NorthRhineWestphalia,
    #[serde(rename = "RP")]
    RhinelandPalatinate,
    #[serde(rename = "SL")]
    Saarland,
    #[serde(rename = "SN")]
    Saxony,
    #[serde(rename = "ST")]
    SaxonyAnhalt,
    #[serde(rename = "SH")]
    SchleswigHolstein,
    #[serde(rename = "TH")]
    Thuringia,
}

impl FederalState {
    pub const ALL: [FederalState; 16] = [
        Self::BadenWuerttemberg,
        Self::Bavaria,
        Self::Berlin,
        Self::Brandenburg,
        Self::Bremen,
        Self::Hamburg,
        Self::Hesse,
        Self::MecklenburgVorpommern,
        Self::LowerSaxony,
        Self::NorthRhineWestphalia,
        Self::RhinelandPalatinate,
        Self::Saarland,
        Self::Saxony,
        Self::SaxonyAnhalt,
        Self::SchleswigHolstein,
        Self::Thuringia,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::BadenWuerttemberg => "BW",
            Self::Bavaria => "BY",
            Self::Berlin => "BE",
            Self::Brandenburg => "BB",
            Self::Bremen => "HB",
            Self::Hamburg => "HH",
            Self::Hesse => "HE",
            Self::MecklenburgVorpommern => "MV",
            Self::LowerSaxony => "NI",
            Self::NorthRhineWestphalia => "NW",
            Self::RhinelandPalatinate => "RP",
            Self::Saarland => "SL",
            Self::Saxony => "SN",
            Self::SaxonyAnhalt => "ST",
            Self::SchleswigHolstein => "SH",
            Self::Thuringia => "TH",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.code() == s)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::BadenWuerttemberg => "Baden-Württemberg",
            Self::Bavaria => "Bavaria",
            Self::Berlin => "Berlin",
            Self::Brandenburg => "Brandenburg",
            Self::Bremen => "Bremen",
            Self::Hamburg => "Hamburg",
            Self::Hesse => "Hesse",
            Self::MecklenburgVorpommern => "Mecklenburg-Vorpommern",
            Self::LowerSaxony => "Lower Saxony",
            Self::NorthRhineWestphalia => "North Rhine-Westphalia",
            Self::RhinelandPalatinate => "Rhineland-Palatinate",
            Self::Saarland => "Saarland",
            Self::Saxony => "Saxony",
            Self::SaxonyAnhalt => "Saxony-Anhalt",
            Self::SchleswigHolstein => "Schleswig-Holstein",
            Self::Thuringia => "Thuringia",
        }
    }

    /// Church tax as a fraction of income tax: 8% in Bavaria and
    /// Baden-Württemberg, 9% everywhere else.
    pub fn church_tax_rate(&self) -> Decimal {
        match self {
            Self::Bavaria | Self::BadenWuerttemberg => dec!(0.08),
            _ => dec!(0.09),
        }
    }

    /// Pension region a resident of this state is usually insured in.
    pub fn pension_region(&self) -> PensionRegion {
        match self {
            Self::Berlin
            | Self::Brandenburg
            | Self::MecklenburgVorpommern
            | Self::Saxony
            | Self::SaxonyAnhalt
            | Self::Thuringia => PensionRegion::East,
            _ => PensionRegion::West,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_every_code() {
        for state in FederalState::ALL {
            assert_eq!(FederalState::parse(state.code()), Some(state));
        }
    }

    #[test]
    fn parse_rejects_unknown_and_lowercase_codes() {
        assert_eq!(FederalState::parse("XX"), None);
        assert_eq!(FederalState::parse("be"), None);
        assert_eq!(FederalState::parse(""), None);
    }

    #[test]
    fn church_tax_rate_is_lower_in_bavaria_and_baden_wuerttemberg() {
        assert_eq!(FederalState::Bavaria.church_tax_rate(), dec!(0.08));
        assert_eq!(FederalState::BadenWuerttemberg.church_tax_rate(), dec!(0.08));
        assert_eq!(FederalState::Berlin.church_tax_rate(), dec!(0.09));
        assert_eq!(FederalState::Hamburg.church_tax_rate(), dec!(0.09));
    }

    #[test]
    fn eastern_states_default_to_east_pension_region() {
        let east: Vec<_> = FederalState::ALL
            .into_iter()
            .filter(|s| s.pension_region() == PensionRegion::East)
            .map(|s| s.code())
            .collect();

        assert_eq!(east, vec!["BE", "BB", "MV", "SN", "ST", "TH"]);
    }

    #[test]
    fn serializes_as_state_code() {
        let json = serde_json::to_string(&FederalState::NorthRhineWestphalia).unwrap();
        assert_eq!(json, "\"NW\"");

        let state: FederalState = serde_json::from_str("\"SH\"").unwrap();
        assert_eq!(state, FederalState::SchleswigHolstein);
    }
}
