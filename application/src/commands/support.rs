//! `calculate` and `transfer_to_human_agents` commands.

use super::AirlineCommand;
use super::fields::required_kwargs;
use airline_domain::command::{CommandError, CommandSignature, FieldSpec};
use airline_domain::tool::calculate::CALCULATE;
use airline_domain::tool::support::TRANSFER_TO_HUMAN_AGENTS;
use serde_json::Value;

pub struct CalculateCommand;

impl AirlineCommand for CalculateCommand {
    fn name(&self) -> &'static str {
        CALCULATE
    }

    fn signature(&self) -> CommandSignature {
        CommandSignature::new(CALCULATE, "Calculate the result of a mathematical expression")
            .with_input(
                FieldSpec::new(
                    "expression",
                    "Arithmetic over numbers, + - * /, parentheses and spaces",
                )
                .with_examples(&["2 + 2", "(150 + 155) * 2", "305 - 50"]),
            )
            .with_output("result")
            .with_utterances(&[
                "How much is 150 plus 155?",
                "What is the total for two tickets at 305 each?",
                "Calculate the refund for three passengers.",
            ])
    }

    fn tool_kwargs(&self, params: &Value) -> Result<Value, CommandError> {
        required_kwargs(params, &["expression"])
    }

    fn response_prefix(&self) -> &'static str {
        "Result: "
    }
}

pub struct TransferToHumanAgentsCommand;

impl AirlineCommand for TransferToHumanAgentsCommand {
    fn name(&self) -> &'static str {
        TRANSFER_TO_HUMAN_AGENTS
    }

    fn signature(&self) -> CommandSignature {
        CommandSignature::new(
            TRANSFER_TO_HUMAN_AGENTS,
            "Transfer the user to a human agent with a summary of the issue",
        )
        .with_input(
            FieldSpec::new("summary", "A summary of the user's issue")
                .with_examples(&["User wants to change a basic economy flight."]),
        )
        .with_output("result")
        .with_utterances(&[
            "I want to talk to a human.",
            "Can you transfer me to a real agent?",
            "Let me speak with a supervisor.",
        ])
    }

    fn tool_kwargs(&self, params: &Value) -> Result<Value, CommandError> {
        required_kwargs(params, &["summary"])
    }

    fn response_prefix(&self) -> &'static str {
        ""
    }
}
