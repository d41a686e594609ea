//! Shared sample dataset for tool tests.

use crate::airline::{AirlineData, Payment, Reservation};

pub const SAMPLE_DATA: &str = include_str!("../../../data/airline.json");

pub fn sample_data() -> AirlineData {
    serde_json::from_str(SAMPLE_DATA).expect("sample dataset parses")
}

pub fn reservation<'a>(data: &'a AirlineData, id: &str) -> &'a Reservation {
    &data.reservations[id]
}

pub fn ledger_sum(history: &[Payment]) -> f64 {
    history.iter().map(|p| p.amount).sum()
}
