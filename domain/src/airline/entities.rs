//! Airline dataset entities
//!
//! [`AirlineData`] is the in-memory dataset every tool mutates. Maps are
//! ordered so that serializing the dataset is canonical (sorted keys), which
//! the reward hash and the diff reconciliation both depend on.

use super::value_objects::{
    CabinClass, CabinFigures, FlightType, Insurance, Membership, ReservationStatus,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// The complete airline dataset: flights, reservations and users keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirlineData {
    #[serde(default)]
    pub flights: BTreeMap<String, Flight>,
    #[serde(default)]
    pub reservations: BTreeMap<String, Reservation>,
    #[serde(default)]
    pub users: BTreeMap<String, User>,
}

impl AirlineData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flight(mut self, flight: Flight) -> Self {
        self.flights.insert(flight.flight_number.clone(), flight);
        self
    }

    pub fn with_reservation(mut self, reservation: Reservation) -> Self {
        self.reservations
            .insert(reservation.reservation_id.clone(), reservation);
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.user_id.clone(), user);
        self
    }

    /// JSON tree view of the dataset, used for diffing.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Hex SHA-256 of the canonical (sorted-key) JSON serialization.
    pub fn data_hash(&self) -> String {
        hash_value(&self.to_value())
    }
}

/// Hex SHA-256 of a JSON value's compact serialization.
///
/// `serde_json::Map` keeps keys sorted, so equal trees hash equally.
pub fn hash_value(value: &serde_json::Value) -> String {
    let canonical = serde_json::to_string(value).unwrap_or_default();
    hex::encode(Sha256::digest(canonical.as_bytes()))
}

/// A scheduled flight with its per-date operating status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub scheduled_departure_time_est: String,
    /// May carry a `+1` suffix when the flight lands the next day.
    pub scheduled_arrival_time_est: String,
    #[serde(default)]
    pub dates: BTreeMap<String, FlightDateStatus>,
}

impl Flight {
    /// Whether the scheduled arrival falls on the day after departure.
    pub fn arrives_next_day(&self) -> bool {
        self.scheduled_arrival_time_est.contains("+1")
    }

    pub fn on_date(&self, date: &str) -> Option<&FlightDateStatus> {
        self.dates.get(date)
    }
}

/// Operating status of a flight on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum FlightDateStatus {
    #[serde(rename = "available")]
    Available {
        available_seats: CabinFigures<u32>,
        prices: CabinFigures<f64>,
    },
    #[serde(rename = "landed")]
    Landed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        actual_departure_time_est: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        actual_arrival_time_est: Option<String>,
    },
    #[serde(rename = "flying")]
    Flying {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        actual_departure_time_est: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        estimated_arrival_time_est: Option<String>,
    },
    #[serde(rename = "delayed")]
    Delayed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        estimated_departure_time_est: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        estimated_arrival_time_est: Option<String>,
    },
    #[serde(rename = "on time")]
    OnTime {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        estimated_departure_time_est: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        estimated_arrival_time_est: Option<String>,
    },
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl FlightDateStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, FlightDateStatus::Available { .. })
    }

    /// Seats left in `cabin`, or `None` when the flight is not bookable.
    pub fn seats(&self, cabin: CabinClass) -> Option<u32> {
        match self {
            FlightDateStatus::Available {
                available_seats, ..
            } => Some(available_seats.get(cabin)),
            _ => None,
        }
    }

    /// Price for `cabin`, or `None` when the flight is not bookable.
    pub fn price(&self, cabin: CabinClass) -> Option<f64> {
        match self {
            FlightDateStatus::Available { prices, .. } => Some(prices.get(cabin)),
            _ => None,
        }
    }
}

/// A flight segment inside a reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservedFlight {
    pub origin: String,
    pub destination: String,
    pub flight_number: String,
    pub date: String,
    pub price: f64,
}

/// A traveller on a reservation or saved on a user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
}

impl Passenger {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            dob: None,
        }
    }

    pub fn with_dob(mut self, dob: impl Into<String>) -> Self {
        self.dob = Some(dob.into());
        self
    }
}

/// One signed entry of a reservation's payment ledger.
///
/// Positive amounts are charges, negative amounts are refunds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: String,
    pub amount: f64,
}

impl Payment {
    pub fn new(payment_id: impl Into<String>, amount: f64) -> Self {
        Self {
            payment_id: payment_id.into(),
            amount,
        }
    }

    /// The refund entry that cancels this payment.
    pub fn refund(&self) -> Self {
        Self {
            payment_id: self.payment_id.clone(),
            amount: -self.amount,
        }
    }
}

/// A booking of one or more flight segments for a set of passengers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub reservation_id: String,
    pub user_id: String,
    pub origin: String,
    pub destination: String,
    pub flight_type: FlightType,
    pub cabin: CabinClass,
    #[serde(default)]
    pub flights: Vec<ReservedFlight>,
    #[serde(default)]
    pub passengers: Vec<Passenger>,
    /// Append-only ledger: entries are never removed or rewritten.
    #[serde(default)]
    pub payment_history: Vec<Payment>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub total_baggages: u32,
    #[serde(default)]
    pub nonfree_baggages: u32,
    pub insurance: Insurance,
    #[serde(default, skip_serializing_if = "ReservationStatus::is_active")]
    pub status: ReservationStatus,
}

impl Reservation {
    /// Total fare currently held by the segments, for all passengers.
    pub fn fare_total(&self) -> f64 {
        self.flights.iter().map(|f| f.price).sum::<f64>() * self.passengers.len() as f64
    }

    /// Sum of all ledger entries (charges minus refunds).
    pub fn net_paid(&self) -> f64 {
        self.payment_history.iter().map(|p| p.amount).sum()
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.status, ReservationStatus::Cancelled)
    }
}

/// A stored payment instrument, tagged by `source` in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard {
        #[serde(default)]
        brand: String,
        #[serde(default)]
        last_four: String,
        id: String,
    },
    GiftCard {
        amount: f64,
        id: String,
    },
    Certificate {
        amount: f64,
        id: String,
    },
}

impl PaymentMethod {
    pub fn certificate(id: impl Into<String>, amount: f64) -> Self {
        PaymentMethod::Certificate {
            amount,
            id: id.into(),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            PaymentMethod::CreditCard { id, .. }
            | PaymentMethod::GiftCard { id, .. }
            | PaymentMethod::Certificate { id, .. } => id,
        }
    }

    /// Remaining balance for stored-value instruments; `None` for credit cards.
    pub fn balance(&self) -> Option<f64> {
        match self {
            PaymentMethod::CreditCard { .. } => None,
            PaymentMethod::GiftCard { amount, .. } | PaymentMethod::Certificate { amount, .. } => {
                Some(*amount)
            }
        }
    }

    pub fn is_gift_card(&self) -> bool {
        matches!(self, PaymentMethod::GiftCard { .. })
    }

    pub fn is_certificate(&self) -> bool {
        matches!(self, PaymentMethod::Certificate { .. })
    }
}

/// Name block of a user profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonName {
    pub first_name: String,
    pub last_name: String,
}

/// Postal address of a user profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub country: String,
    pub province: String,
    pub zip: String,
}

/// A customer account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    #[serde(default)]
    pub name: PersonName,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub payment_methods: BTreeMap<String, PaymentMethod>,
    #[serde(default)]
    pub saved_passengers: Vec<Passenger>,
    #[serde(default)]
    pub membership: Membership,
    #[serde(default)]
    pub reservations: Vec<String>,
}

impl User {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: PersonName::default(),
            address: Address::default(),
            email: String::new(),
            dob: String::new(),
            payment_methods: BTreeMap::new(),
            saved_passengers: Vec::new(),
            membership: Membership::default(),
            reservations: Vec::new(),
        }
    }

    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_methods.insert(method.id().to_string(), method);
        self
    }
}
