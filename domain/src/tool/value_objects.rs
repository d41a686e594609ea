//! Tool domain value objects: the typed failure side of a tool invocation.
//!
//! Tools return `Result<String, ToolError>`: the `Ok` side is the JSON payload
//! of the affected entity, the `Err` side one of the variants below. At the
//! wire boundary (command responses, trace events, environment observations)
//! errors are rendered with the fixed [`ERROR_PREFIX`], so a consumer that
//! only sees text can still tell success from failure.

use thiserror::Error;

/// Prefix that marks a tool failure in rendered text.
pub const ERROR_PREFIX: &str = "Error: ";

/// Outcome of one tool invocation.
pub type ToolOutcome = Result<String, ToolError>;

/// Failure of a tool invocation.
///
/// Messages match the airline tool vocabulary exactly; they are part of the
/// observable output scored by the benchmark.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    #[error("user not found")]
    UserNotFound,

    #[error("reservation not found")]
    ReservationNotFound,

    #[error("flight {0} not found")]
    FlightNotFound(String),

    #[error("flight {flight_number} not found on date {date}")]
    FlightNotOnDate { flight_number: String, date: String },

    #[error("flight {flight_number} not available on date {date}")]
    FlightNotAvailable { flight_number: String, date: String },

    #[error("not enough seats on flight {0}")]
    NotEnoughSeats(String),

    /// Booking-time lookup names the missing method.
    #[error("payment method {0} not found")]
    UnknownPaymentMethod(String),

    /// Update-time lookup does not.
    #[error("payment method not found")]
    PaymentMethodNotFound,

    #[error("not enough balance in payment method {0}")]
    InsufficientBalance(String),

    #[error("payment amount does not add up, total price is {total}, but paid {paid}")]
    PaymentMismatch { total: f64, paid: f64 },

    #[error("certificate cannot be used to update reservation")]
    CertificateNotAllowed,

    #[error("gift card balance is not enough")]
    GiftCardBalanceTooLow,

    #[error("number of passengers does not match")]
    PassengerCountMismatch,

    #[error("too many reservations for this task")]
    ReservationIdsExhausted,

    #[error("too many certificates for user {0}")]
    CertificateIdsExhausted(String),

    #[error("invalid date {0}")]
    InvalidDate(String),

    #[error("invalid characters in expression")]
    InvalidExpression,

    #[error("{0}")]
    Calculation(String),

    #[error("invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("unknown tool {0}")]
    UnknownTool(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ToolError {
    pub fn invalid_arguments(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Text form with the [`ERROR_PREFIX`].
    pub fn to_wire(&self) -> String {
        format!("{}{}", ERROR_PREFIX, self)
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::Serialization(err.to_string())
    }
}

/// Render an outcome as wire text: the payload, or the prefixed error.
pub fn render_outcome(outcome: &ToolOutcome) -> String {
    match outcome {
        Ok(payload) => payload.clone(),
        Err(err) => err.to_wire(),
    }
}

/// Whether wire text denotes a tool failure.
pub fn is_error_text(text: &str) -> bool {
    text.starts_with(ERROR_PREFIX.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_prefix() {
        assert_eq!(
            ToolError::ReservationNotFound.to_wire(),
            "Error: reservation not found"
        );
        assert_eq!(
            render_outcome(&Err(ToolError::UserNotFound)),
            "Error: user not found"
        );
        assert_eq!(render_outcome(&Ok("{}".to_string())), "{}");
    }

    #[test]
    fn test_payment_mismatch_prints_whole_amounts_plainly() {
        let err = ToolError::PaymentMismatch {
            total: 530.0,
            paid: 500.0,
        };
        assert_eq!(
            err.to_string(),
            "payment amount does not add up, total price is 530, but paid 500"
        );
    }

    #[test]
    fn test_is_error_text() {
        assert!(is_error_text("Error: user not found"));
        assert!(!is_error_text("{\"user_id\": \"x\"}"));
        assert!(!is_error_text("Certificate certificate_1 added"));
    }
}
