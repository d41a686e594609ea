//! `book_reservation`: create a new reservation and settle its payment.

use super::entities::{ParamType, ToolDefinition, ToolParameter};
use super::pricing::{self, FlightRef};
use super::traits::{AirlineTool, parse_args};
use super::value_objects::{ToolError, ToolOutcome};
use crate::airline::{
    AirlineData, CabinClass, FlightType, Insurance, Passenger, Payment, PaymentMethod,
    Reservation, ReservationStatus,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const BOOK_RESERVATION: &str = "book_reservation";

/// Reservation ids handed out by booking, in order.
///
/// A task books at most a handful of reservations, so a fixed pool keeps
/// ids deterministic between the agent run and the ground-truth replay.
pub const RESERVATION_ID_POOL: [&str; 3] = ["HATHAT", "HATHAU", "HATHAV"];

/// Creation timestamp stamped on every booked reservation.
pub const BOOKING_TIMESTAMP: &str = "2024-05-15T15:00:00";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookReservationArgs {
    pub user_id: String,
    pub origin: String,
    pub destination: String,
    pub flight_type: FlightType,
    pub cabin: CabinClass,
    pub flights: Vec<FlightRef>,
    pub passengers: Vec<Passenger>,
    pub payment_methods: Vec<Payment>,
    pub total_baggages: u32,
    pub nonfree_baggages: u32,
    pub insurance: Insurance,
}

/// Book a reservation.
///
/// Total = Σ segment price × passengers, plus insurance per passenger, plus
/// non-free bag fees. Stored-value instruments must cover their share and
/// the split must add up to the total exactly. Gift cards are debited and
/// certificates consumed.
pub fn book_reservation(data: &mut AirlineData, args: &BookReservationArgs) -> ToolOutcome {
    let user = data.users.get(&args.user_id).ok_or(ToolError::UserNotFound)?;

    let reservation_id = RESERVATION_ID_POOL
        .iter()
        .find(|id| !data.reservations.contains_key(**id))
        .ok_or(ToolError::ReservationIdsExhausted)?;

    let passengers = args.passengers.len();
    let mut segments = Vec::with_capacity(args.flights.len());
    let mut total_price = 0.0;
    for requested in &args.flights {
        let segment = pricing::price_segment(&data.flights, requested, args.cabin, passengers)?;
        total_price += segment.price * passengers as f64;
        segments.push(segment);
    }
    if args.insurance.is_insured() {
        total_price += pricing::INSURANCE_FEE_PER_PASSENGER * passengers as f64;
    }
    total_price += pricing::NONFREE_BAGGAGE_FEE * f64::from(args.nonfree_baggages);

    for payment in &args.payment_methods {
        let method = user
            .payment_methods
            .get(&payment.payment_id)
            .ok_or_else(|| ToolError::UnknownPaymentMethod(payment.payment_id.clone()))?;
        if let Some(balance) = method.balance()
            && balance < payment.amount
        {
            return Err(ToolError::InsufficientBalance(payment.payment_id.clone()));
        }
    }

    let paid: f64 = args.payment_methods.iter().map(|p| p.amount).sum();
    if !pricing::amounts_equal(paid, total_price) {
        return Err(ToolError::PaymentMismatch {
            total: total_price,
            paid,
        });
    }

    let reservation = Reservation {
        reservation_id: reservation_id.to_string(),
        user_id: args.user_id.clone(),
        origin: args.origin.clone(),
        destination: args.destination.clone(),
        flight_type: args.flight_type,
        cabin: args.cabin,
        flights: segments,
        passengers: args.passengers.clone(),
        payment_history: args.payment_methods.clone(),
        created_at: BOOKING_TIMESTAMP.to_string(),
        total_baggages: args.total_baggages,
        nonfree_baggages: args.nonfree_baggages,
        insurance: args.insurance,
        status: ReservationStatus::Active,
    };

    let user = data
        .users
        .get_mut(&args.user_id)
        .ok_or(ToolError::UserNotFound)?;
    for payment in &args.payment_methods {
        match user.payment_methods.get(&payment.payment_id) {
            Some(PaymentMethod::GiftCard { .. }) => {
                pricing::debit_gift_card(user, &payment.payment_id, payment.amount)
            }
            Some(PaymentMethod::Certificate { .. }) => {
                user.payment_methods.remove(&payment.payment_id);
            }
            _ => {}
        }
    }
    user.reservations.push(reservation.reservation_id.clone());

    let payload = serde_json::to_string(&reservation)?;
    data.reservations
        .insert(reservation.reservation_id.clone(), reservation);
    Ok(payload)
}

pub struct BookReservation;

impl AirlineTool for BookReservation {
    fn name(&self) -> &'static str {
        BOOK_RESERVATION
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(BOOK_RESERVATION, "Book a reservation.")
            .with_parameter(ToolParameter::new(
                "user_id",
                "The ID of the user to book the reservation, such as 'sara_doe_496'.",
                true,
            ))
            .with_parameter(ToolParameter::new(
                "origin",
                "The IATA code for the origin city, such as 'SFO'.",
                true,
            ))
            .with_parameter(ToolParameter::new(
                "destination",
                "The IATA code for the destination city, such as 'JFK'.",
                true,
            ))
            .with_parameter(
                ToolParameter::new("flight_type", "The type of the trip.", true)
                    .with_enum(&["one_way", "round_trip"]),
            )
            .with_parameter(
                ToolParameter::new("cabin", "The cabin class.", true)
                    .with_enum(&["basic_economy", "economy", "business"]),
            )
            .with_parameter(
                ToolParameter::new(
                    "flights",
                    "An array of objects containing details about each piece of flight.",
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
            .with_parameter(
                ToolParameter::new(
                    "passengers",
                    "An array of objects containing details about each passenger.",
                    true,
                )
                .with_items(json!({
                    "type": "object",
                    "properties": {
                        "first_name": {"type": "string"},
                        "last_name": {"type": "string"},
                        "dob": {"type": "string", "description": "Date of birth in the format 'YYYY-MM-DD'."},
                    },
                    "required": ["first_name", "last_name", "dob"],
                })),
            )
            .with_parameter(
                ToolParameter::new(
                    "payment_methods",
                    "An array of objects containing details about each payment method.",
                    true,
                )
                .with_items(json!({
                    "type": "object",
                    "properties": {
                        "payment_id": {"type": "string", "description": "The payment id stored in user profile, such as 'credit_card_7815826', 'gift_card_7815826', 'certificate_7815826'."},
                        "amount": {"type": "number", "description": "The amount to be paid."},
                    },
                    "required": ["payment_id", "amount"],
                })),
            )
            .with_parameter(
                ToolParameter::new("total_baggages", "The total number of baggage items included in the reservation.", true)
                    .with_type(ParamType::Integer),
            )
            .with_parameter(
                ToolParameter::new("nonfree_baggages", "The number of non-free baggage items included in the reservation.", true)
                    .with_type(ParamType::Integer),
            )
            .with_parameter(
                ToolParameter::new("insurance", "Whether travel insurance is bought.", true)
                    .with_enum(&["yes", "no"]),
            )
    }

    fn invoke(&self, data: &mut AirlineData, kwargs: &Value) -> ToolOutcome {
        book_reservation(data, &parse_args(BOOK_RESERVATION, kwargs)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::fixtures::sample_data;

    fn args(payments: Vec<Payment>) -> BookReservationArgs {
        BookReservationArgs {
            user_id: "chen_jackson_3290".into(),
            origin: "JFK".into(),
            destination: "LAX".into(),
            flight_type: FlightType::OneWay,
            cabin: CabinClass::Economy,
            flights: vec![FlightRef::new("HAT001", "2024-05-17")],
            passengers: vec![
                Passenger::new("Chen", "Jackson").with_dob("1956-07-07"),
                Passenger::new("Amelia", "Jackson").with_dob("1990-02-14"),
            ],
            payment_methods: payments,
            total_baggages: 2,
            nonfree_baggages: 1,
            insurance: Insurance::Yes,
        }
    }

    // 2 × 160 fare + 2 × 30 insurance + 1 × 50 bag
    const TOTAL: f64 = 430.0;

    #[test]
    fn test_book_with_credit_card() {
        let mut data = sample_data();
        let out = book_reservation(
            &mut data,
            &args(vec![Payment::new("credit_card_4421486", TOTAL)]),
        )
        .unwrap();

        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["reservation_id"], "HATHAT");
        assert_eq!(parsed["created_at"], BOOKING_TIMESTAMP);
        assert_eq!(parsed["flights"][0]["price"], 160.0);
        assert_eq!(parsed["flights"][0]["origin"], "JFK");

        assert!(data.reservations.contains_key("HATHAT"));
        assert_eq!(
            data.users["chen_jackson_3290"].reservations,
            vec!["4WQ150".to_string(), "HATHAT".to_string()]
        );
    }

    #[test]
    fn test_book_allocates_next_free_id() {
        let mut data = sample_data();
        let payment = vec![Payment::new("credit_card_4421486", TOTAL)];
        book_reservation(&mut data, &args(payment.clone())).unwrap();
        let out = book_reservation(&mut data, &args(payment)).unwrap();
        assert!(out.contains("\"reservation_id\":\"HATHAU\""));
    }

    #[test]
    fn test_book_debits_gift_card_and_consumes_certificate() {
        let mut data = sample_data();
        book_reservation(
            &mut data,
            &args(vec![
                Payment::new("certificate_7504069", 250.0),
                Payment::new("gift_card_3576581", 180.0),
            ]),
        )
        .unwrap();

        let methods = &data.users["chen_jackson_3290"].payment_methods;
        assert!(!methods.contains_key("certificate_7504069"));
        assert_eq!(methods["gift_card_3576581"].balance(), Some(120.0));
    }

    #[test]
    fn test_book_payment_mismatch() {
        let mut data = sample_data();
        let original = data.clone();
        let err = book_reservation(
            &mut data,
            &args(vec![Payment::new("credit_card_4421486", 400.0)]),
        )
        .unwrap_err();
        assert_eq!(
            err.to_wire(),
            "Error: payment amount does not add up, total price is 430, but paid 400"
        );
        assert_eq!(data, original);
    }

    #[test]
    fn test_book_balance_and_lookup_errors() {
        let mut data = sample_data();
        assert_eq!(
            book_reservation(&mut data, &args(vec![Payment::new("gift_card_3576581", TOTAL)])),
            Err(ToolError::InsufficientBalance("gift_card_3576581".into()))
        );
        assert_eq!(
            book_reservation(&mut data, &args(vec![Payment::new("credit_card_0", TOTAL)])),
            Err(ToolError::UnknownPaymentMethod("credit_card_0".into()))
        );

        let mut unknown_user = args(vec![]);
        unknown_user.user_id = "nobody".into();
        assert_eq!(
            book_reservation(&mut data, &unknown_user),
            Err(ToolError::UserNotFound)
        );
    }

    #[test]
    fn test_book_rejects_unavailable_flight() {
        let mut data = sample_data();
        let mut request = args(vec![]);
        request.flights = vec![FlightRef::new("HAT030", "2024-05-20")];
        assert_eq!(
            book_reservation(&mut data, &request).unwrap_err().to_wire(),
            "Error: flight HAT030 not available on date 2024-05-20"
        );

        request.flights = vec![FlightRef::new("HAT030", "2024-05-21")];
        assert_eq!(
            book_reservation(&mut data, &request),
            Err(ToolError::NotEnoughSeats("HAT030".into()))
        );
    }

    #[test]
    fn test_book_exhausts_id_pool() {
        let mut data = sample_data();
        let payment = vec![Payment::new("credit_card_4421486", TOTAL)];
        for _ in 0..RESERVATION_ID_POOL.len() {
            book_reservation(&mut data, &args(payment.clone())).unwrap();
        }
        assert_eq!(
            book_reservation(&mut data, &args(payment)),
            Err(ToolError::ReservationIdsExhausted)
        );
    }
}
