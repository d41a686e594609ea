//! Airport listing and flight search commands.

use super::AirlineCommand;
use super::fields::{self, required_kwargs};
use airline_domain::command::{CommandError, CommandSignature};
use airline_domain::tool::search::{LIST_ALL_AIRPORTS, SEARCH_DIRECT_FLIGHT, SEARCH_ONESTOP_FLIGHT};
use serde_json::{Value, json};

const SEARCH_FIELDS: [&str; 3] = ["origin", "destination", "date"];

fn search_signature(name: &'static str, description: &'static str) -> CommandSignature {
    CommandSignature::new(name, description)
        .with_input(fields::airport(
            "origin",
            "The origin city airport code in three letters",
            &["JFK", "LAX", "ATL"],
        ))
        .with_input(fields::airport(
            "destination",
            "The destination city airport code in three letters",
            &["LAX", "JFK", "MIA"],
        ))
        .with_input(fields::date("The date of the flight in YYYY-MM-DD format"))
        .with_output("flight_results")
}

pub struct ListAllAirportsCommand;

impl AirlineCommand for ListAllAirportsCommand {
    fn name(&self) -> &'static str {
        LIST_ALL_AIRPORTS
    }

    fn signature(&self) -> CommandSignature {
        CommandSignature::new(LIST_ALL_AIRPORTS, "List all airports")
            .with_output("status")
            .with_utterances(&[
                "What airports do you fly to?",
                "Can you show me all airports you serve?",
                "What are all the airports in your network?",
                "Which airports can I fly from or to?",
                "What cities do you have flights to?",
                "List all airports and cities you serve.",
            ])
    }

    fn tool_kwargs(&self, _params: &Value) -> Result<Value, CommandError> {
        Ok(json!({}))
    }

    fn response_prefix(&self) -> &'static str {
        "Available airports: "
    }
}

pub struct SearchDirectFlightCommand;

impl AirlineCommand for SearchDirectFlightCommand {
    fn name(&self) -> &'static str {
        SEARCH_DIRECT_FLIGHT
    }

    fn signature(&self) -> CommandSignature {
        search_signature(
            SEARCH_DIRECT_FLIGHT,
            "Search for direct flights between two cities on a specific date",
        )
        .with_utterances(&[
            "Are there any direct flights from JFK to LAX on May 16th, 2024?",
            "Find me a nonstop flight from ATL to MIA on 2024-05-20.",
            "I'm looking for direct flights from BOS to DFW on May 25th.",
            "Search nonstop flights from SEA to LAX on 2024-05-17.",
        ])
    }

    fn tool_kwargs(&self, params: &Value) -> Result<Value, CommandError> {
        required_kwargs(params, &SEARCH_FIELDS)
    }

    fn response_prefix(&self) -> &'static str {
        "Direct flight search results: "
    }
}

pub struct SearchOnestopFlightCommand;

impl AirlineCommand for SearchOnestopFlightCommand {
    fn name(&self) -> &'static str {
        SEARCH_ONESTOP_FLIGHT
    }

    fn signature(&self) -> CommandSignature {
        search_signature(
            SEARCH_ONESTOP_FLIGHT,
            "Search for one-stop flights between two cities on a specific date",
        )
        .with_utterances(&[
            "I need to find one-stop flights from JFK to LAX on May 16th, 2024.",
            "Can you search for connecting flights from ATL to MIA on 2024-05-20?",
            "Find me flights with one connection from LAS to PHX on 2024-05-18.",
            "Can you find flights with a layover from MIA to BOS on May 17th?",
            "I want to book a connecting flight from LAX to ATL on 2024-05-21.",
        ])
    }

    fn tool_kwargs(&self, params: &Value) -> Result<Value, CommandError> {
        required_kwargs(params, &SEARCH_FIELDS)
    }

    fn response_prefix(&self) -> &'static str {
        "One-stop flight search results: "
    }
}
