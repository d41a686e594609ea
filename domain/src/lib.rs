//! Domain layer for airline-bench
//!
//! This crate contains the airline dataset model, the tool functions that
//! mutate it, the command signatures that guard them, and the benchmark
//! vocabulary. It has no dependencies on infrastructure or presentation
//! concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Tools
//!
//! Pure single-step functions over [`AirlineData`]: booking, cancellation,
//! updates, search, and a few conversation helpers. Errors are typed
//! ([`ToolError`]) and rendered as `Error: <msg>` only at the wire.
//!
//! ## Commands
//!
//! Schema-validated entry points ([`CommandSignature`]) that each reach
//! exactly one tool. The `NOT_FOUND` sentinel maps to "no value".
//!
//! ## Bench
//!
//! Tasks, ground-truth actions, trace events, rewards and the
//! [`SolveResult`] produced per task.

pub mod airline;
pub mod bench;
pub mod command;
pub mod config;
pub mod tool;

// Re-export commonly used types
pub use airline::{
    AirlineData, CabinClass, Flight, FlightDateStatus, FlightType, Insurance, Passenger, Payment,
    PaymentMethod, Reservation, ReservationStatus, User, hash_value,
};
pub use bench::{
    Action, CommandOutput, CommandResponse, CommandTraceEvent, DataDiff, EnvInfo, EnvResponse,
    ExecutedAction, Message, RESPOND_ACTION_FIELD_NAME, RESPOND_ACTION_NAME, RewardInfo,
    RewardResult, Role, RunInfo, STOP_TOKEN, ScriptStep, SolveInfo, SolveResult, Task,
    TraceDirection, collect_diffs,
};
pub use command::{CommandError, CommandOutcome, CommandSignature, FieldConstraint, FieldSpec, NOT_FOUND};
pub use config::OutputFormat;
pub use tool::{
    AirlineTool, ERROR_PREFIX, FlightRef, ToolDefinition, ToolError, ToolOutcome, ToolParameter,
    ToolRegistry, is_error_text, render_outcome,
};
