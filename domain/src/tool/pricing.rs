//! Fare and payment rules shared by the booking and update tools.

use super::value_objects::ToolError;
use crate::airline::{CabinClass, Flight, PaymentMethod, ReservedFlight, User};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fee per passenger when travel insurance is bought.
pub const INSURANCE_FEE_PER_PASSENGER: f64 = 30.0;

/// Fee per non-free checked bag.
pub const NONFREE_BAGGAGE_FEE: f64 = 50.0;

const AMOUNT_EPSILON: f64 = 1e-6;

/// A flight segment as requested by the caller: number and date only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRef {
    pub flight_number: String,
    pub date: String,
}

impl FlightRef {
    pub fn new(flight_number: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            flight_number: flight_number.into(),
            date: date.into(),
        }
    }
}

/// Price a requested segment for `cabin`, checking it can seat `passengers`.
pub fn price_segment(
    flights: &BTreeMap<String, Flight>,
    requested: &FlightRef,
    cabin: CabinClass,
    passengers: usize,
) -> Result<ReservedFlight, ToolError> {
    let flight = flights
        .get(&requested.flight_number)
        .ok_or_else(|| ToolError::FlightNotFound(requested.flight_number.clone()))?;

    let status = flight
        .on_date(&requested.date)
        .ok_or_else(|| ToolError::FlightNotOnDate {
            flight_number: requested.flight_number.clone(),
            date: requested.date.clone(),
        })?;

    let (Some(seats), Some(price)) = (status.seats(cabin), status.price(cabin)) else {
        return Err(ToolError::FlightNotAvailable {
            flight_number: requested.flight_number.clone(),
            date: requested.date.clone(),
        });
    };

    if (seats as usize) < passengers {
        return Err(ToolError::NotEnoughSeats(requested.flight_number.clone()));
    }

    Ok(ReservedFlight {
        origin: flight.origin.clone(),
        destination: flight.destination.clone(),
        flight_number: requested.flight_number.clone(),
        date: requested.date.clone(),
        price,
    })
}

/// Check that `payment_id` may pay `amount` on an existing reservation.
///
/// Certificates are rejected outright; gift cards must cover the amount.
pub fn check_update_payment<'a>(
    user: &'a User,
    payment_id: &str,
    amount: f64,
) -> Result<&'a PaymentMethod, ToolError> {
    let method = user
        .payment_methods
        .get(payment_id)
        .ok_or(ToolError::PaymentMethodNotFound)?;

    match method {
        PaymentMethod::Certificate { .. } => Err(ToolError::CertificateNotAllowed),
        PaymentMethod::GiftCard { amount: balance, .. } if *balance < amount => {
            Err(ToolError::GiftCardBalanceTooLow)
        }
        _ => Ok(method),
    }
}

/// Debit a gift card by `amount`; other instruments are charged externally.
pub fn debit_gift_card(user: &mut User, payment_id: &str, amount: f64) {
    if let Some(PaymentMethod::GiftCard { amount: balance, .. }) =
        user.payment_methods.get_mut(payment_id)
    {
        *balance -= amount;
    }
}

/// Money comparison tolerant of float accumulation.
pub fn amounts_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < AMOUNT_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airline::{CabinFigures, FlightDateStatus};

    fn flights() -> BTreeMap<String, Flight> {
        let mut dates = BTreeMap::new();
        dates.insert(
            "2024-05-16".to_string(),
            FlightDateStatus::Available {
                available_seats: CabinFigures {
                    basic_economy: 5,
                    economy: 1,
                    business: 0,
                },
                prices: CabinFigures {
                    basic_economy: 80.0,
                    economy: 150.0,
                    business: 500.0,
                },
            },
        );
        dates.insert("2024-05-17".to_string(), FlightDateStatus::Cancelled);
        let flight = Flight {
            flight_number: "HAT001".to_string(),
            origin: "JFK".to_string(),
            destination: "LAX".to_string(),
            scheduled_departure_time_est: "06:00:00".to_string(),
            scheduled_arrival_time_est: "09:00:00".to_string(),
            dates,
        };
        BTreeMap::from([(flight.flight_number.clone(), flight)])
    }

    #[test]
    fn test_price_segment_ok() {
        let segment = price_segment(
            &flights(),
            &FlightRef::new("HAT001", "2024-05-16"),
            CabinClass::Economy,
            1,
        )
        .unwrap();
        assert_eq!(segment.price, 150.0);
        assert_eq!(segment.origin, "JFK");
        assert_eq!(segment.destination, "LAX");
    }

    #[test]
    fn test_price_segment_errors() {
        let flights = flights();
        assert_eq!(
            price_segment(&flights, &FlightRef::new("HAT999", "2024-05-16"), CabinClass::Economy, 1),
            Err(ToolError::FlightNotFound("HAT999".into()))
        );
        assert_eq!(
            price_segment(&flights, &FlightRef::new("HAT001", "2024-05-30"), CabinClass::Economy, 1),
            Err(ToolError::FlightNotOnDate {
                flight_number: "HAT001".into(),
                date: "2024-05-30".into()
            })
        );
        assert_eq!(
            price_segment(&flights, &FlightRef::new("HAT001", "2024-05-17"), CabinClass::Economy, 1),
            Err(ToolError::FlightNotAvailable {
                flight_number: "HAT001".into(),
                date: "2024-05-17".into()
            })
        );
        assert_eq!(
            price_segment(&flights, &FlightRef::new("HAT001", "2024-05-16"), CabinClass::Economy, 2),
            Err(ToolError::NotEnoughSeats("HAT001".into()))
        );
    }

    #[test]
    fn test_check_update_payment() {
        let user = User::new("u")
            .with_payment_method(PaymentMethod::GiftCard {
                amount: 40.0,
                id: "gift_card_1".into(),
            })
            .with_payment_method(PaymentMethod::certificate("certificate_1", 500.0));

        assert!(check_update_payment(&user, "gift_card_1", 40.0).is_ok());
        assert_eq!(
            check_update_payment(&user, "gift_card_1", 50.0).unwrap_err(),
            ToolError::GiftCardBalanceTooLow
        );
        assert_eq!(
            check_update_payment(&user, "certificate_1", 0.0).unwrap_err(),
            ToolError::CertificateNotAllowed
        );
        assert_eq!(
            check_update_payment(&user, "credit_card_1", 0.0).unwrap_err(),
            ToolError::PaymentMethodNotFound
        );
    }

    #[test]
    fn test_debit_gift_card() {
        let mut user = User::new("u").with_payment_method(PaymentMethod::GiftCard {
            amount: 100.0,
            id: "gift_card_1".into(),
        });
        debit_gift_card(&mut user, "gift_card_1", 30.0);
        assert_eq!(user.payment_methods["gift_card_1"].balance(), Some(70.0));
    }
}
