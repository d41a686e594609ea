//! Command wrappers
//!
//! Each wrapper guards exactly one airline tool: it declares a
//! [`CommandSignature`], maps validated parameters to the tool's keyword
//! arguments, and renders the tool's wire text as a response.
//!
//! | Command | Response |
//! |---------|----------|
//! | `book_reservation` | `Reservation booked successfully: …` |
//! | `cancel_reservation` | `Cancellation result: …` |
//! | `get_reservation_details` | `Response: …` |
//! | `get_user_details` | `Response: …` |
//! | `list_all_airports` | `Available airports: …` |
//! | `search_direct_flight` | `Direct flight search results: …` |
//! | `search_onestop_flight` | `One-stop flight search results: …` |
//! | `send_certificate` | `Success! …` / `Failed to send certificate: …` |
//! | `update_reservation_baggages` | `Response: Baggage update result: …` |
//! | `update_reservation_flights` | `Response: Flight update result: …` |
//! | `update_reservation_passengers` | `Response: Update result: …` |
//! | `calculate` | `Result: …` |
//! | `transfer_to_human_agents` | `…` |

pub mod booking;
pub mod fields;
pub mod lookup;
pub mod registry;
pub mod reservation;
pub mod support;
pub mod user;

pub use registry::CommandRegistry;

use airline_domain::command::{CommandError, CommandSignature};
use serde_json::Value;

/// A schema-validated entry point to one tool.
pub trait AirlineCommand: Send + Sync {
    /// Command name, as used in trace events
    fn name(&self) -> &'static str;

    fn signature(&self) -> CommandSignature;

    /// Tool this command delegates to.
    fn tool_name(&self) -> &'static str {
        self.name()
    }

    /// Build the tool's keyword arguments from validated parameters.
    ///
    /// Fields the tool cannot do without yield
    /// [`CommandError::MissingParameter`]; others fall back to defaults.
    fn tool_kwargs(&self, params: &Value) -> Result<Value, CommandError>;

    fn response_prefix(&self) -> &'static str;

    /// Render wire text (tool payload or `Error: …`) as the response.
    fn respond(&self, _params: &Value, text: &str, _success: bool) -> String {
        format!("{}{}", self.response_prefix(), text)
    }
}
