//! Reservation commands: lookup, cancellation and updates.

use super::AirlineCommand;
use super::fields::{self, empty_list, put_or, put_required, required_kwargs};
use airline_domain::command::{CommandError, CommandSignature, FieldSpec};
use airline_domain::tool::reservation::{
    CANCEL_RESERVATION, GET_RESERVATION_DETAILS, UPDATE_RESERVATION_BAGGAGES,
    UPDATE_RESERVATION_FLIGHTS, UPDATE_RESERVATION_PASSENGERS,
};
use serde_json::{Map, Value, json};

pub struct CancelReservationCommand;

impl AirlineCommand for CancelReservationCommand {
    fn name(&self) -> &'static str {
        CANCEL_RESERVATION
    }

    fn signature(&self) -> CommandSignature {
        CommandSignature::new(CANCEL_RESERVATION, "Cancel the whole reservation")
            .with_input(fields::reservation_id(
                "The reservation ID to cancel",
                &["get_user_details", "get_reservation_details"],
            ))
            .with_output("cancellation_status")
            .with_utterances(&[
                "I want to cancel my reservation.",
                "Please cancel my flight booking.",
                "Can you cancel my entire reservation?",
                "I need to cancel my flight.",
                "Cancel my booking please.",
                "Please cancel reservation 4WQ150.",
                "I want to cancel my whole trip.",
            ])
    }

    fn tool_kwargs(&self, params: &Value) -> Result<Value, CommandError> {
        required_kwargs(params, &["reservation_id"])
    }

    fn response_prefix(&self) -> &'static str {
        "Cancellation result: "
    }
}

pub struct GetReservationDetailsCommand;

impl AirlineCommand for GetReservationDetailsCommand {
    fn name(&self) -> &'static str {
        GET_RESERVATION_DETAILS
    }

    fn signature(&self) -> CommandSignature {
        CommandSignature::new(GET_RESERVATION_DETAILS, "Get reservation details")
            .with_input(fields::reservation_id(
                "The reservation ID to get details for",
                &["get_user_details", "search_direct_flight", "search_onestop_flight"],
            ))
            .with_output("reservation_details")
            .with_utterances(&[
                "Can you show me my reservation details?",
                "I want to see the details of my booking.",
                "What information do you have about my reservation?",
                "Can you pull up my flight reservation?",
                "Show me my flight information.",
                "retrieve reservation details",
            ])
    }

    fn tool_kwargs(&self, params: &Value) -> Result<Value, CommandError> {
        required_kwargs(params, &["reservation_id"])
    }

    fn response_prefix(&self) -> &'static str {
        "Response: "
    }
}

pub struct UpdateReservationBaggagesCommand;

impl AirlineCommand for UpdateReservationBaggagesCommand {
    fn name(&self) -> &'static str {
        UPDATE_RESERVATION_BAGGAGES
    }

    fn signature(&self) -> CommandSignature {
        CommandSignature::new(
            UPDATE_RESERVATION_BAGGAGES,
            "Update the baggage information of a reservation",
        )
        .with_input(fields::reservation_id(
            "The reservation ID",
            &["get_reservation_details"],
        ))
        .with_input(fields::baggage_count(
            "total_baggages",
            "The updated total number of baggage items included in the reservation",
        ))
        .with_input(fields::baggage_count(
            "nonfree_baggages",
            "The updated number of non-free baggage items included in the reservation",
        ))
        .with_input(fields::payment_id("The payment method ID for baggage fees"))
        .with_output("status")
        .with_utterances(&[
            "I need to add more baggage to my reservation.",
            "Can I update the number of bags on my booking?",
            "I want to modify the baggage count on my reservation.",
            "I need to increase the number of checked bags on my flight.",
            "Can I change my baggage from 2 bags to 5 bags?",
        ])
    }

    fn tool_kwargs(&self, params: &Value) -> Result<Value, CommandError> {
        let mut kwargs = Map::new();
        put_required(&mut kwargs, params, "reservation_id")?;
        put_or(&mut kwargs, params, "total_baggages", json!(0));
        put_or(&mut kwargs, params, "nonfree_baggages", json!(0));
        put_required(&mut kwargs, params, "payment_id")?;
        Ok(Value::Object(kwargs))
    }

    fn response_prefix(&self) -> &'static str {
        "Response: Baggage update result: "
    }
}

pub struct UpdateReservationFlightsCommand;

impl AirlineCommand for UpdateReservationFlightsCommand {
    fn name(&self) -> &'static str {
        UPDATE_RESERVATION_FLIGHTS
    }

    fn signature(&self) -> CommandSignature {
        CommandSignature::new(
            UPDATE_RESERVATION_FLIGHTS,
            "Update the flight information of a reservation",
        )
        .with_input(fields::reservation_id(
            "The reservation ID",
            &["get_reservation_details"],
        ))
        .with_input(
            fields::cabin("The cabin class for the reservation")
                .available_from(&["get_reservation_details"]),
        )
        .with_input(
            FieldSpec::new(
                "flights",
                "Every flight in the ENTIRE new reservation, unchanged segments included",
            )
            .with_examples(&[r#"[{"flight_number": "HAT170", "date": "2024-05-22"}]"#]),
        )
        .with_input(fields::payment_id(
            "The payment method ID for price differences",
        ))
        .with_output("status")
        .with_utterances(&[
            "I need to change my flight reservation to different flights.",
            "Can I update the flights on my booking to new ones?",
            "Please change my flight details to new flight numbers and dates.",
            "I need to change my flight times and upgrade my cabin class.",
            "Can I switch my flights to different dates and flight numbers?",
        ])
    }

    fn tool_kwargs(&self, params: &Value) -> Result<Value, CommandError> {
        let mut kwargs = Map::new();
        put_required(&mut kwargs, params, "reservation_id")?;
        put_or(&mut kwargs, params, "cabin", json!("economy"));
        put_or(&mut kwargs, params, "flights", empty_list());
        put_required(&mut kwargs, params, "payment_id")?;
        Ok(Value::Object(kwargs))
    }

    fn response_prefix(&self) -> &'static str {
        "Response: Flight update result: "
    }
}

pub struct UpdateReservationPassengersCommand;

impl AirlineCommand for UpdateReservationPassengersCommand {
    fn name(&self) -> &'static str {
        UPDATE_RESERVATION_PASSENGERS
    }

    fn signature(&self) -> CommandSignature {
        CommandSignature::new(
            UPDATE_RESERVATION_PASSENGERS,
            "Update the passenger information of a reservation",
        )
        .with_input(fields::reservation_id(
            "The reservation ID",
            &["get_reservation_details"],
        ))
        .with_input(
            FieldSpec::new(
                "passengers",
                "An array of objects containing details about each passenger",
            )
            .with_examples(&[
                r#"[{"first_name": "Noah", "last_name": "Brown", "dob": "1990-01-01"}]"#,
            ]),
        )
        .with_output("status")
        .with_utterances(&[
            "I need to update the passenger information on my reservation.",
            "Can I change the passenger details for my booking?",
            "Please update the names and dates of birth for the travelers on my reservation.",
            "How can I update the passenger details for my airline reservation?",
        ])
    }

    fn tool_kwargs(&self, params: &Value) -> Result<Value, CommandError> {
        let mut kwargs = Map::new();
        put_required(&mut kwargs, params, "reservation_id")?;
        put_or(&mut kwargs, params, "passengers", empty_list());
        Ok(Value::Object(kwargs))
    }

    fn response_prefix(&self) -> &'static str {
        "Response: Update result: "
    }
}
