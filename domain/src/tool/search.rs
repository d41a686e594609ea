//! Read-only lookup tools: airports and flight search.
//!
//! Search results are the flight record without its `dates` table, merged
//! with the status entry of the searched date:
//!
//! ```text
//! { flight_number, origin, destination,
//!   scheduled_departure_time_est, scheduled_arrival_time_est,
//!   status: "available", available_seats: {..}, prices: {..},
//!   date?  // one-stop legs only
//! }
//! ```

use super::entities::ToolDefinition;
use super::entities::ToolParameter;
use super::traits::{AirlineTool, parse_args};
use super::value_objects::{ToolError, ToolOutcome};
use crate::airline::{AirlineData, Flight, FlightDateStatus};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const LIST_ALL_AIRPORTS: &str = "list_all_airports";
pub const SEARCH_DIRECT_FLIGHT: &str = "search_direct_flight";
pub const SEARCH_ONESTOP_FLIGHT: &str = "search_onestop_flight";

/// IATA code → city served by the airline.
pub const AIRPORTS: [(&str, &str); 20] = [
    ("SFO", "San Francisco"),
    ("JFK", "New York"),
    ("LAX", "Los Angeles"),
    ("ORD", "Chicago"),
    ("DFW", "Dallas"),
    ("DEN", "Denver"),
    ("SEA", "Seattle"),
    ("ATL", "Atlanta"),
    ("MIA", "Miami"),
    ("BOS", "Boston"),
    ("PHX", "Phoenix"),
    ("IAH", "Houston"),
    ("LAS", "Las Vegas"),
    ("MCO", "Orlando"),
    ("EWR", "Newark"),
    ("CLT", "Charlotte"),
    ("MSP", "Minneapolis"),
    ("DTW", "Detroit"),
    ("PHL", "Philadelphia"),
    ("LGA", "LaGuardia"),
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A flight as seen on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSearchResult {
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub scheduled_departure_time_est: String,
    pub scheduled_arrival_time_est: String,
    #[serde(flatten)]
    pub status: FlightDateStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl FlightSearchResult {
    fn from_flight(flight: &Flight, status: &FlightDateStatus) -> Self {
        Self {
            flight_number: flight.flight_number.clone(),
            origin: flight.origin.clone(),
            destination: flight.destination.clone(),
            scheduled_departure_time_est: flight.scheduled_departure_time_est.clone(),
            scheduled_arrival_time_est: flight.scheduled_arrival_time_est.clone(),
            status: status.clone(),
            date: None,
        }
    }

    fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListAllAirportsArgs {}

pub fn list_all_airports(_data: &AirlineData, _args: &ListAllAirportsArgs) -> ToolOutcome {
    let airports: Map<String, Value> = AIRPORTS
        .iter()
        .map(|(code, city)| (code.to_string(), Value::String(city.to_string())))
        .collect();
    Ok(serde_json::to_string(&airports)?)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightSearchArgs {
    pub origin: String,
    pub destination: String,
    pub date: String,
}

/// Bookable status of `flight` on `date`, if any.
fn available_on<'a>(flight: &'a Flight, date: &str) -> Option<&'a FlightDateStatus> {
    flight.on_date(date).filter(|status| status.is_available())
}

/// Direct flights on the route that are bookable on the date.
pub fn search_direct_flight(data: &AirlineData, args: &FlightSearchArgs) -> ToolOutcome {
    let results: Vec<FlightSearchResult> = data
        .flights
        .values()
        .filter(|f| f.origin == args.origin && f.destination == args.destination)
        .filter_map(|f| available_on(f, &args.date).map(|s| FlightSearchResult::from_flight(f, s)))
        .collect();
    Ok(serde_json::to_string(&results)?)
}

fn next_day(date: &str) -> Result<String, ToolError> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .ok()
        .and_then(|d| d.checked_add_days(Days::new(1)))
        .map(|d| d.format(DATE_FORMAT).to_string())
        .ok_or_else(|| ToolError::InvalidDate(date.to_string()))
}

/// Two-leg itineraries through any connecting airport.
///
/// The second leg departs on the following day when the first leg lands
/// after midnight, and must not depart before the first leg arrives.
pub fn search_onestop_flight(data: &AirlineData, args: &FlightSearchArgs) -> ToolOutcome {
    let mut results: Vec<[FlightSearchResult; 2]> = Vec::new();

    for first in data.flights.values().filter(|f| f.origin == args.origin) {
        let Some(first_status) = available_on(first, &args.date) else {
            continue;
        };
        let second_date = if first.arrives_next_day() {
            next_day(&args.date)?
        } else {
            args.date.clone()
        };

        for second in data
            .flights
            .values()
            .filter(|f| f.origin == first.destination && f.destination == args.destination)
        {
            if first.scheduled_arrival_time_est > second.scheduled_departure_time_est {
                continue;
            }
            let Some(second_status) = available_on(second, &second_date) else {
                continue;
            };
            results.push([
                FlightSearchResult::from_flight(first, first_status).with_date(&args.date),
                FlightSearchResult::from_flight(second, second_status).with_date(&second_date),
            ]);
        }
    }

    Ok(serde_json::to_string(&results)?)
}

pub struct ListAllAirports;

impl AirlineTool for ListAllAirports {
    fn name(&self) -> &'static str {
        LIST_ALL_AIRPORTS
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(LIST_ALL_AIRPORTS, "List all airports and their cities.")
    }

    fn invoke(&self, data: &mut AirlineData, kwargs: &Value) -> ToolOutcome {
        list_all_airports(data, &parse_args(LIST_ALL_AIRPORTS, kwargs)?)
    }
}

fn search_definition(name: &str, description: &str) -> ToolDefinition {
    ToolDefinition::new(name, description)
        .with_parameter(ToolParameter::new(
            "origin",
            "The origin city airport in three letters, such as 'JFK'.",
            true,
        ))
        .with_parameter(ToolParameter::new(
            "destination",
            "The destination city airport in three letters, such as 'LAX'.",
            true,
        ))
        .with_parameter(ToolParameter::new(
            "date",
            "The date of the flight in the format 'YYYY-MM-DD', such as '2024-01-01'.",
            true,
        ))
}

pub struct SearchDirectFlight;

impl AirlineTool for SearchDirectFlight {
    fn name(&self) -> &'static str {
        SEARCH_DIRECT_FLIGHT
    }

    fn definition(&self) -> ToolDefinition {
        search_definition(
            SEARCH_DIRECT_FLIGHT,
            "Search direct flights between two cities on a specific date.",
        )
    }

    fn invoke(&self, data: &mut AirlineData, kwargs: &Value) -> ToolOutcome {
        search_direct_flight(data, &parse_args(SEARCH_DIRECT_FLIGHT, kwargs)?)
    }
}

pub struct SearchOnestopFlight;

impl AirlineTool for SearchOnestopFlight {
    fn name(&self) -> &'static str {
        SEARCH_ONESTOP_FLIGHT
    }

    fn definition(&self) -> ToolDefinition {
        search_definition(
            SEARCH_ONESTOP_FLIGHT,
            "Search one-stop flights between two cities on a specific date.",
        )
    }

    fn invoke(&self, data: &mut AirlineData, kwargs: &Value) -> ToolOutcome {
        search_onestop_flight(data, &parse_args(SEARCH_ONESTOP_FLIGHT, kwargs)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::fixtures::sample_data;

    fn search(origin: &str, destination: &str, date: &str) -> FlightSearchArgs {
        FlightSearchArgs {
            origin: origin.into(),
            destination: destination.into(),
            date: date.into(),
        }
    }

    #[test]
    fn test_list_all_airports() {
        let out = list_all_airports(&sample_data(), &ListAllAirportsArgs {}).unwrap();
        let parsed: Map<String, Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.len(), 20);
        assert_eq!(parsed["LGA"], "LaGuardia");
        assert_eq!(parsed["SFO"], "San Francisco");
    }

    #[test]
    fn test_search_direct_flight_merges_date_entry() {
        let out = search_direct_flight(&sample_data(), &search("JFK", "LAX", "2024-05-16")).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        let results = parsed.as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["flight_number"], "HAT001");
        assert_eq!(results[0]["status"], "available");
        assert_eq!(results[0]["prices"]["economy"], 150.0);
        assert!(results[0].get("dates").is_none());
        assert!(results[0].get("date").is_none());
    }

    #[test]
    fn test_search_direct_flight_skips_unavailable_dates() {
        let data = sample_data();
        // landed
        assert_eq!(
            search_direct_flight(&data, &search("JFK", "LAX", "2024-05-10")).unwrap(),
            "[]"
        );
        // cancelled
        assert_eq!(
            search_direct_flight(&data, &search("ATL", "MIA", "2024-05-20")).unwrap(),
            "[]"
        );
    }

    #[test]
    fn test_search_onestop_flight() {
        let out = search_onestop_flight(&sample_data(), &search("JFK", "LAX", "2024-05-16")).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        let pairs = parsed.as_array().unwrap();

        let legs: Vec<(String, String, String, String)> = pairs
            .iter()
            .map(|pair| {
                (
                    pair[0]["flight_number"].as_str().unwrap().to_string(),
                    pair[0]["date"].as_str().unwrap().to_string(),
                    pair[1]["flight_number"].as_str().unwrap().to_string(),
                    pair[1]["date"].as_str().unwrap().to_string(),
                )
            })
            .collect();

        assert_eq!(
            legs,
            vec![
                (
                    "HAT010".to_string(),
                    "2024-05-16".to_string(),
                    "HAT011".to_string(),
                    "2024-05-16".to_string()
                ),
                (
                    "HAT020".to_string(),
                    "2024-05-16".to_string(),
                    "HAT021".to_string(),
                    "2024-05-17".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_search_onestop_flight_requires_connection_time() {
        let mut data = sample_data();
        if let Some(second) = data.flights.get_mut("HAT011") {
            second.scheduled_departure_time_est = "09:30:00".into();
        }
        let out = search_onestop_flight(&data, &search("JFK", "LAX", "2024-05-16")).unwrap();
        assert!(!out.contains("HAT011"));
    }

    #[test]
    fn test_next_day_rolls_over_month() {
        assert_eq!(next_day("2024-05-31").unwrap(), "2024-06-01");
        assert_eq!(
            next_day("yesterday"),
            Err(ToolError::InvalidDate("yesterday".into()))
        );
    }

    #[test]
    fn test_invoke_rejects_missing_arguments() {
        let mut data = sample_data();
        let err = SearchDirectFlight
            .invoke(&mut data, &serde_json::json!({"origin": "JFK"}))
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
    }
}
