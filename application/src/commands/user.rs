//! User profile commands.

use super::AirlineCommand;
use super::fields::{self, required_kwargs};
use airline_domain::command::{CommandError, CommandSignature, FieldConstraint, FieldSpec};
use airline_domain::tool::user::{GET_USER_DETAILS, SEND_CERTIFICATE};
use serde_json::Value;

pub const MIN_CERTIFICATE_AMOUNT: f64 = 1.0;
pub const MAX_CERTIFICATE_AMOUNT: f64 = 1000.0;

pub struct GetUserDetailsCommand;

impl AirlineCommand for GetUserDetailsCommand {
    fn name(&self) -> &'static str {
        GET_USER_DETAILS
    }

    fn signature(&self) -> CommandSignature {
        CommandSignature::new(GET_USER_DETAILS, "Get the details of a user")
            .with_input(fields::user_id("The user ID to look up"))
            .with_output("user_details")
            .with_utterances(&[
                "Can you look up my profile? My user id is mia_li_3668.",
                "What payment methods do I have on file?",
                "Show me my account details.",
                "Which reservations are on my account?",
            ])
    }

    fn tool_kwargs(&self, params: &Value) -> Result<Value, CommandError> {
        required_kwargs(params, &["user_id"])
    }

    fn response_prefix(&self) -> &'static str {
        "Response: "
    }
}

pub struct SendCertificateCommand;

impl AirlineCommand for SendCertificateCommand {
    fn name(&self) -> &'static str {
        SEND_CERTIFICATE
    }

    fn signature(&self) -> CommandSignature {
        CommandSignature::new(SEND_CERTIFICATE, "Send a gift certificate to a user")
            .with_input(fields::user_id("The user ID to send the certificate to"))
            .with_input(
                FieldSpec::new("amount", "Certificate amount in dollars")
                    .with_constraint(FieldConstraint::range(
                        MIN_CERTIFICATE_AMOUNT,
                        MAX_CERTIFICATE_AMOUNT,
                    ))
                    .with_examples(&["50", "100", "200"])
                    .required(),
            )
            .with_output("result")
            .with_utterances(&[
                "Send a gift certificate to Sara",
                "I'd like to issue a certificate for $100",
                "Give a travel voucher to user john_smith_238",
                "Send a $50 gift certificate to this account",
                "Create a flight certificate for $200",
                "Issue a travel credit as compensation",
            ])
    }

    fn tool_kwargs(&self, params: &Value) -> Result<Value, CommandError> {
        required_kwargs(params, &["user_id", "amount"])
    }

    fn response_prefix(&self) -> &'static str {
        "Success! "
    }

    fn respond(&self, params: &Value, text: &str, success: bool) -> String {
        if !success {
            return format!("Failed to send certificate: {text}");
        }
        let amount = params.get("amount").map(Value::to_string).unwrap_or_default();
        format!(
            "{}{text}\n\nA gift certificate worth ${amount} has been added to the user's payment methods and is ready to use for booking flights.",
            self.response_prefix()
        )
    }
}
