//! Tool domain module
//!
//! The airline **tool set**: pure functions over the in-memory
//! [`AirlineData`](crate::airline::AirlineData). Each tool performs at most one
//! state transition and answers with the JSON of the affected entity, or a
//! typed [`ToolError`].
//!
//! ```text
//! kwargs (JSON) ──▶ parse_args ──▶ typed Args ──▶ fn(&mut AirlineData, &Args)
//!                                                        │
//!                                   Ok(json) / Err(ToolError) ──▶ "Error: <msg>"
//! ```
//!
//! # Tools
//!
//! | Tool | Mutates | Module |
//! |------|---------|--------|
//! | `book_reservation` | yes | [`booking`] |
//! | `cancel_reservation` | yes | [`reservation`] |
//! | `get_reservation_details` | no | [`reservation`] |
//! | `update_reservation_baggages` | yes | [`reservation`] |
//! | `update_reservation_flights` | yes | [`reservation`] |
//! | `update_reservation_passengers` | yes | [`reservation`] |
//! | `get_user_details` | no | [`user`] |
//! | `send_certificate` | yes | [`user`] |
//! | `list_all_airports` | no | [`search`] |
//! | `search_direct_flight` | no | [`search`] |
//! | `search_onestop_flight` | no | [`search`] |
//! | `calculate` | no | [`calculate`] |
//! | `think` | no | [`support`] |
//! | `transfer_to_human_agents` | no (terminal) | [`support`] |
//!
//! # Failure semantics
//!
//! Validation always precedes mutation: a tool that returns `Err` leaves the
//! dataset untouched. At the wire boundary errors are rendered with
//! [`ERROR_PREFIX`](value_objects::ERROR_PREFIX).

pub mod booking;
pub mod calculate;
pub mod entities;
pub mod pricing;
pub mod registry;
pub mod reservation;
pub mod search;
pub mod support;
pub mod traits;
pub mod user;
pub mod value_objects;

#[cfg(test)]
mod fixtures;

pub use entities::{ParamType, ToolDefinition, ToolParameter};
pub use pricing::FlightRef;
pub use registry::ToolRegistry;
pub use traits::{AirlineTool, parse_args};
pub use value_objects::{ERROR_PREFIX, ToolError, ToolOutcome, is_error_text, render_outcome};
