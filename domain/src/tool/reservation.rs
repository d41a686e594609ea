//! Reservation tools: lookup, cancellation and in-place updates.
//!
//! Every tool here validates fully before touching the dataset, so an `Err`
//! always leaves `data` exactly as it was.

use super::entities::{ParamType, ToolDefinition, ToolParameter};
use super::pricing::{self, FlightRef};
use super::traits::{AirlineTool, parse_args};
use super::value_objects::{ToolError, ToolOutcome};
use crate::airline::{AirlineData, CabinClass, Passenger, Payment, ReservationStatus};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const CANCEL_RESERVATION: &str = "cancel_reservation";
pub const GET_RESERVATION_DETAILS: &str = "get_reservation_details";
pub const UPDATE_RESERVATION_BAGGAGES: &str = "update_reservation_baggages";
pub const UPDATE_RESERVATION_FLIGHTS: &str = "update_reservation_flights";
pub const UPDATE_RESERVATION_PASSENGERS: &str = "update_reservation_passengers";

fn reservation_id_param(description: &str) -> ToolParameter {
    ToolParameter::new("reservation_id", description, true)
}

fn payment_id_param() -> ToolParameter {
    ToolParameter::new(
        "payment_id",
        "The payment id stored in user profile, such as 'credit_card_7815826', 'gift_card_7815826', 'certificate_7815826'.",
        true,
    )
}

// ==================== cancel_reservation ====================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelReservationArgs {
    pub reservation_id: String,
}

/// Cancel the whole reservation.
///
/// Every existing ledger entry gets a negated twin appended, so the ledger
/// nets to zero while keeping the original charges.
pub fn cancel_reservation(data: &mut AirlineData, args: &CancelReservationArgs) -> ToolOutcome {
    let reservation = data
        .reservations
        .get_mut(&args.reservation_id)
        .ok_or(ToolError::ReservationNotFound)?;

    let refunds: Vec<Payment> = reservation
        .payment_history
        .iter()
        .map(Payment::refund)
        .collect();
    reservation.payment_history.extend(refunds);
    reservation.status = ReservationStatus::Cancelled;

    Ok(serde_json::to_string(reservation)?)
}

pub struct CancelReservation;

impl AirlineTool for CancelReservation {
    fn name(&self) -> &'static str {
        CANCEL_RESERVATION
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(CANCEL_RESERVATION, "Cancel the whole reservation.")
            .with_parameter(reservation_id_param("The reservation ID, such as 'ZFA04Y'."))
    }

    fn invoke(&self, data: &mut AirlineData, kwargs: &Value) -> ToolOutcome {
        cancel_reservation(data, &parse_args(CANCEL_RESERVATION, kwargs)?)
    }
}

// ==================== get_reservation_details ====================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetReservationDetailsArgs {
    pub reservation_id: String,
}

pub fn get_reservation_details(data: &AirlineData, args: &GetReservationDetailsArgs) -> ToolOutcome {
    let reservation = data
        .reservations
        .get(&args.reservation_id)
        .ok_or(ToolError::ReservationNotFound)?;
    Ok(serde_json::to_string(reservation)?)
}

pub struct GetReservationDetails;

impl AirlineTool for GetReservationDetails {
    fn name(&self) -> &'static str {
        GET_RESERVATION_DETAILS
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(GET_RESERVATION_DETAILS, "Get the details of a reservation.")
            .with_parameter(reservation_id_param(
                "The reservation id, such as '8JX2WO'.",
            ))
    }

    fn invoke(&self, data: &mut AirlineData, kwargs: &Value) -> ToolOutcome {
        get_reservation_details(data, &parse_args(GET_RESERVATION_DETAILS, kwargs)?)
    }
}

// ==================== update_reservation_baggages ====================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReservationBaggagesArgs {
    pub reservation_id: String,
    pub total_baggages: u32,
    pub nonfree_baggages: u32,
    pub payment_id: String,
}

/// Update the baggage counts, charging for added non-free bags.
pub fn update_reservation_baggages(
    data: &mut AirlineData,
    args: &UpdateReservationBaggagesArgs,
) -> ToolOutcome {
    let reservation = data
        .reservations
        .get_mut(&args.reservation_id)
        .ok_or(ToolError::ReservationNotFound)?;
    let user = data
        .users
        .get_mut(&reservation.user_id)
        .ok_or(ToolError::UserNotFound)?;

    let added = args.nonfree_baggages.saturating_sub(reservation.nonfree_baggages);
    let total_price = pricing::NONFREE_BAGGAGE_FEE * f64::from(added);

    pricing::check_update_payment(user, &args.payment_id, total_price)?;

    reservation.total_baggages = args.total_baggages;
    reservation.nonfree_baggages = args.nonfree_baggages;
    pricing::debit_gift_card(user, &args.payment_id, total_price);
    if total_price != 0.0 {
        reservation
            .payment_history
            .push(Payment::new(&args.payment_id, total_price));
    }

    Ok(serde_json::to_string(reservation)?)
}

pub struct UpdateReservationBaggages;

impl AirlineTool for UpdateReservationBaggages {
    fn name(&self) -> &'static str {
        UPDATE_RESERVATION_BAGGAGES
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            UPDATE_RESERVATION_BAGGAGES,
            "Update the baggage information of a reservation.",
        )
        .with_parameter(reservation_id_param("The reservation ID, such as 'ZFA04Y'."))
        .with_parameter(
            ToolParameter::new(
                "total_baggages",
                "The updated total number of baggage items included in the reservation.",
                true,
            )
            .with_type(ParamType::Integer),
        )
        .with_parameter(
            ToolParameter::new(
                "nonfree_baggages",
                "The updated number of non-free baggage items included in the reservation.",
                true,
            )
            .with_type(ParamType::Integer),
        )
        .with_parameter(payment_id_param())
    }

    fn invoke(&self, data: &mut AirlineData, kwargs: &Value) -> ToolOutcome {
        update_reservation_baggages(data, &parse_args(UPDATE_RESERVATION_BAGGAGES, kwargs)?)
    }
}

// ==================== update_reservation_flights ====================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReservationFlightsArgs {
    pub reservation_id: String,
    pub cabin: CabinClass,
    /// The entire new itinerary, unchanged segments included.
    pub flights: Vec<FlightRef>,
    pub payment_id: String,
}

/// Replace the itinerary (and cabin) of a reservation.
///
/// Segments already on the reservation keep their booked price when the cabin
/// is unchanged; new segments are priced from the flight data. The difference
/// against the old fare is charged (or refunded when negative).
pub fn update_reservation_flights(
    data: &mut AirlineData,
    args: &UpdateReservationFlightsArgs,
) -> ToolOutcome {
    let reservation = data
        .reservations
        .get_mut(&args.reservation_id)
        .ok_or(ToolError::ReservationNotFound)?;
    let passengers = reservation.passengers.len();
    let same_cabin = args.cabin == reservation.cabin;

    let mut segments = Vec::with_capacity(args.flights.len());
    for requested in &args.flights {
        let kept = reservation.flights.iter().find(|f| {
            same_cabin && f.flight_number == requested.flight_number && f.date == requested.date
        });
        let segment = match kept {
            Some(existing) => existing.clone(),
            None => pricing::price_segment(&data.flights, requested, args.cabin, passengers)?,
        };
        segments.push(segment);
    }

    let new_fare: f64 = segments.iter().map(|s| s.price).sum::<f64>() * passengers as f64;
    let total_price = new_fare - reservation.fare_total();

    let user = data
        .users
        .get_mut(&reservation.user_id)
        .ok_or(ToolError::UserNotFound)?;
    pricing::check_update_payment(user, &args.payment_id, total_price)?;

    pricing::debit_gift_card(user, &args.payment_id, total_price);
    reservation.flights = segments;
    reservation.cabin = args.cabin;
    if total_price != 0.0 {
        reservation
            .payment_history
            .push(Payment::new(&args.payment_id, total_price));
    }

    Ok(serde_json::to_string(reservation)?)
}

pub struct UpdateReservationFlights;

impl AirlineTool for UpdateReservationFlights {
    fn name(&self) -> &'static str {
        UPDATE_RESERVATION_FLIGHTS
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            UPDATE_RESERVATION_FLIGHTS,
            "Update the flight information of a reservation.",
        )
        .with_parameter(reservation_id_param("The reservation ID, such as 'ZFA04Y'."))
        .with_parameter(
            ToolParameter::new("cabin", "The cabin class of the reservation", true)
                .with_enum(&["basic_economy", "economy", "business"]),
        )
        .with_parameter(
            ToolParameter::new(
                "flights",
                "An array of objects containing details about each piece of flight in the ENTIRE new reservation. Even if the a flight segment is not changed, it should still be included in the array.",
                true,
            )
            .with_items(json!({
                "type": "object",
                "properties": {
                    "flight_number": {"type": "string", "description": "Flight number, such as 'HAT001'."},
                    "date": {"type": "string", "description": "The date for the flight in the format 'YYYY-MM-DD', such as '2024-05-01'."},
                },
                "required": ["flight_number", "date"],
            })),
        )
        .with_parameter(payment_id_param())
    }

    fn invoke(&self, data: &mut AirlineData, kwargs: &Value) -> ToolOutcome {
        update_reservation_flights(data, &parse_args(UPDATE_RESERVATION_FLIGHTS, kwargs)?)
    }
}

// ==================== update_reservation_passengers ====================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReservationPassengersArgs {
    pub reservation_id: String,
    pub passengers: Vec<Passenger>,
}

/// Replace passenger details; the passenger count cannot change.
pub fn update_reservation_passengers(
    data: &mut AirlineData,
    args: &UpdateReservationPassengersArgs,
) -> ToolOutcome {
    let reservation = data
        .reservations
        .get_mut(&args.reservation_id)
        .ok_or(ToolError::ReservationNotFound)?;

    if args.passengers.len() != reservation.passengers.len() {
        return Err(ToolError::PassengerCountMismatch);
    }
    reservation.passengers = args.passengers.clone();

    Ok(serde_json::to_string(reservation)?)
}

pub struct UpdateReservationPassengers;

impl AirlineTool for UpdateReservationPassengers {
    fn name(&self) -> &'static str {
        UPDATE_RESERVATION_PASSENGERS
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            UPDATE_RESERVATION_PASSENGERS,
            "Update the passenger information of a reservation.",
        )
        .with_parameter(reservation_id_param("The reservation ID, such as 'ZFA04Y'."))
        .with_parameter(
            ToolParameter::new(
                "passengers",
                "An array of objects containing details about each passenger.",
                true,
            )
            .with_items(json!({
                "type": "object",
                "properties": {
                    "first_name": {"type": "string", "description": "The first name of the passenger, such as 'Noah'."},
                    "last_name": {"type": "string", "description": "The last name of the passenger, such as 'Brown'."},
                    "dob": {"type": "string", "description": "The date of birth of the passenger in the format 'YYYY-MM-DD', such as '1990-01-01'."},
                },
                "required": ["first_name", "last_name", "dob"],
            })),
        )
    }

    fn invoke(&self, data: &mut AirlineData, kwargs: &Value) -> ToolOutcome {
        update_reservation_passengers(data, &parse_args(UPDATE_RESERVATION_PASSENGERS, kwargs)?)
    }
}
