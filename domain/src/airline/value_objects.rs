//! Airline value objects: closed vocabularies used across the dataset.
//!
//! All enums serialize to the snake_case strings used by the airline JSON
//! dataset, so a loaded dataset round-trips without translation.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Cabin class of a reservation or of a seat/price figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CabinClass {
    BasicEconomy,
    Economy,
    Business,
}

impl CabinClass {
    pub const ALL: [CabinClass; 3] = [
        CabinClass::BasicEconomy,
        CabinClass::Economy,
        CabinClass::Business,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CabinClass::BasicEconomy => "basic_economy",
            CabinClass::Economy => "economy",
            CabinClass::Business => "business",
        }
    }
}

impl std::fmt::Display for CabinClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CabinClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown cabin class: {}", s))
    }
}

/// Trip shape of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightType {
    OneWay,
    RoundTrip,
}

impl FlightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightType::OneWay => "one_way",
            FlightType::RoundTrip => "round_trip",
        }
    }
}

impl FromStr for FlightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one_way" => Ok(FlightType::OneWay),
            "round_trip" => Ok(FlightType::RoundTrip),
            other => Err(format!("unknown flight type: {}", other)),
        }
    }
}

/// Travel insurance flag, stored as `"yes"` / `"no"` in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Insurance {
    Yes,
    No,
}

impl Insurance {
    pub fn is_insured(&self) -> bool {
        matches!(self, Insurance::Yes)
    }
}

impl FromStr for Insurance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(Insurance::Yes),
            "no" => Ok(Insurance::No),
            other => Err(format!("unknown insurance value: {}", other)),
        }
    }
}

/// Lifecycle status of a reservation.
///
/// The dataset omits the `status` key for active reservations, so `Active`
/// is the serde default and is skipped on output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Active,
    Cancelled,
}

impl ReservationStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, ReservationStatus::Active)
    }
}

/// Loyalty tier of a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Membership {
    Gold,
    Silver,
    #[default]
    Regular,
}

/// A per-cabin figure (available seats or price).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CabinFigures<T> {
    pub basic_economy: T,
    pub economy: T,
    pub business: T,
}

impl<T: Copy> CabinFigures<T> {
    pub fn get(&self, cabin: CabinClass) -> T {
        match cabin {
            CabinClass::BasicEconomy => self.basic_economy,
            CabinClass::Economy => self.economy,
            CabinClass::Business => self.business,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cabin_class_round_trip_strings() {
        for cabin in CabinClass::ALL {
            assert_eq!(cabin.as_str().parse::<CabinClass>().unwrap(), cabin);
        }
        assert!("first".parse::<CabinClass>().is_err());
    }

    #[test]
    fn test_cabin_class_serializes_snake_case() {
        let json = serde_json::to_string(&CabinClass::BasicEconomy).unwrap();
        assert_eq!(json, "\"basic_economy\"");
    }

    #[test]
    fn test_cabin_figures_lookup() {
        let prices = CabinFigures {
            basic_economy: 50.0,
            economy: 120.0,
            business: 400.0,
        };
        assert_eq!(prices.get(CabinClass::Economy), 120.0);
        assert_eq!(prices.get(CabinClass::Business), 400.0);
    }

    #[test]
    fn test_reservation_status_default_is_active() {
        assert!(ReservationStatus::default().is_active());
        assert!(!ReservationStatus::Cancelled.is_active());
    }
}
