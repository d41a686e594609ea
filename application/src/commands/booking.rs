//! `book_reservation` command.

use super::AirlineCommand;
use super::fields::{self, FLIGHT_TYPES, INSURANCE, empty_list, put_or, put_required};
use airline_domain::command::{CommandError, CommandSignature, FieldConstraint, FieldSpec};
use airline_domain::tool::booking::BOOK_RESERVATION;
use serde_json::{Map, Value, json};

pub struct BookReservationCommand;

impl AirlineCommand for BookReservationCommand {
    fn name(&self) -> &'static str {
        BOOK_RESERVATION
    }

    fn signature(&self) -> CommandSignature {
        CommandSignature::new(
            BOOK_RESERVATION,
            "Book a flight reservation with passengers, flights, and payment details",
        )
        .with_input(fields::user_id("The ID of the user booking the reservation"))
        .with_input(fields::airport("origin", "Origin airport IATA code", &["JFK", "LAX", "ATL"]))
        .with_input(fields::airport(
            "destination",
            "Destination airport IATA code",
            &["LAX", "MIA", "DFW"],
        ))
        .with_input(
            FieldSpec::new("flight_type", "Type of flight booking")
                .with_constraint(FieldConstraint::one_of(FLIGHT_TYPES))
                .with_examples(FLIGHT_TYPES),
        )
        .with_input(fields::cabin("Cabin class for the reservation"))
        .with_input(
            FieldSpec::new("flights", "List of flights for the reservation")
                .with_examples(&[r#"[{"flight_number": "HAT001", "date": "2024-05-16"}]"#])
                .available_from(&["search_direct_flight", "search_onestop_flight"]),
        )
        .with_input(
            FieldSpec::new("passengers", "List of passengers for the reservation").with_examples(
                &[r#"[{"first_name": "John", "last_name": "Doe", "dob": "1990-01-01"}]"#],
            ),
        )
        .with_input(
            FieldSpec::new("payment_methods", "List of payment methods and amounts")
                .with_examples(&[r#"[{"payment_id": "credit_card_7815826", "amount": 250.0}]"#])
                .available_from(&["get_user_details"]),
        )
        .with_input(fields::baggage_count("total_baggages", "Total number of baggage items"))
        .with_input(fields::baggage_count(
            "nonfree_baggages",
            "Number of non-free baggage items",
        ))
        .with_input(
            FieldSpec::new("insurance", "Whether to include travel insurance")
                .with_constraint(FieldConstraint::one_of(INSURANCE))
                .with_examples(INSURANCE),
        )
        .with_output("reservation_details")
        .with_utterances(&[
            "I want to book a round trip flight from JFK to LAX on May 16th for myself.",
            "Can you help me book a one-way business class flight from ATL to MIA on 2024-05-20?",
            "I need to book a reservation for two passengers from BOS to DFW on May 25th with economy class.",
            "Book me a direct flight from LAS to PHX on 2024-05-18 in basic economy, no insurance needed.",
            "I'd like to reserve seats on flight HAT001 for May 22nd, business class with travel insurance.",
            "Can you book me on flight HAT170 from MIA to BOS on May 17th? I'll need 2 checked bags.",
        ])
    }

    fn tool_kwargs(&self, params: &Value) -> Result<Value, CommandError> {
        let mut kwargs = Map::new();
        for name in ["user_id", "origin", "destination", "flight_type", "cabin"] {
            put_required(&mut kwargs, params, name)?;
        }
        put_or(&mut kwargs, params, "flights", empty_list());
        put_or(&mut kwargs, params, "passengers", empty_list());
        put_or(&mut kwargs, params, "payment_methods", empty_list());
        put_or(&mut kwargs, params, "total_baggages", json!(0));
        put_or(&mut kwargs, params, "nonfree_baggages", json!(0));
        put_required(&mut kwargs, params, "insurance")?;
        Ok(Value::Object(kwargs))
    }

    fn response_prefix(&self) -> &'static str {
        "Reservation booked successfully: "
    }
}
