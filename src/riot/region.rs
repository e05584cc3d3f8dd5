use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Regional routing values for Riot API (Account-v1, Match-v5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Americas,
    Asia,
    Europe,
    Sea,
}

impl Region {
    pub fn base_url(&self) -> String {
        format!("https://{}.api.riotgames.com", self.as_str())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Americas => "americas",
            Self::Asia => "asia",
            Self::Europe => "europe",
            Self::Sea => "sea",
        }
    }
}

/// Accepts either a regional route or a platform shorthand (`EUW`, `NA1`, ...)
/// which is folded into the region serving its match history.
impl FromStr for Region {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AMERICAS" | "BR" | "BR1" | "LAN" | "LA1" | "LAS" | "LA2" | "NA" | "NA1" => {
                Ok(Self::Americas)
            }
            "ASIA" | "JP" | "JP1" | "KR" => Ok(Self::Asia),
            "EUROPE" | "EUNE" | "EUN" | "EUN1" | "EUW" | "EUW1" | "ME" | "ME1" | "RU" | "TR"
            | "TR1" => Ok(Self::Europe),
            "SEA" | "OCE" | "OC" | "OC1" | "PH" | "PH2" | "SG" | "SG2" | "TH" | "TH2" | "TW"
            | "TW2" | "VN" | "VN2" => Ok(Self::Sea),
            _ => Err(AppError::InvalidRegion(s.to_string())),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_regional_routes_case_insensitively() {
        assert_eq!("europe".parse::<Region>().unwrap(), Region::Europe);
        assert_eq!("Americas".parse::<Region>().unwrap(), Region::Americas);
        assert_eq!(" sea ".parse::<Region>().unwrap(), Region::Sea);
    }

    #[test]
    fn folds_platforms_into_their_region() {
        assert_eq!("EUW1".parse::<Region>().unwrap(), Region::Europe);
        assert_eq!("na".parse::<Region>().unwrap(), Region::Americas);
        assert_eq!("KR".parse::<Region>().unwrap(), Region::Asia);
        assert_eq!("oce".parse::<Region>().unwrap(), Region::Sea);
    }

    #[test]
    fn rejects_unknown_region() {
        let err = "mars".parse::<Region>().unwrap_err();
        assert!(matches!(err, AppError::InvalidRegion(r) if r == "mars"));
    }

    #[test]
    fn base_url_uses_regional_host() {
        assert_eq!(
            Region::Europe.base_url(),
            "https://europe.api.riotgames.com"
        );
    }

    #[test]
    fn displays_as_routing_value() {
        assert_eq!(Region::Sea.to_string(), "sea");
        assert_eq!(format!("{}", Region::Americas), "americas");
    }
}
