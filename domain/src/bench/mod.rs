//! Benchmark domain module
//!
//! Vocabulary shared by the adapter loop and the environment: tasks and
//! their ground-truth actions, the workflow's trace and output items, and
//! the shape of a solve result.
//!
//! ```text
//!  workflow ──trace──▶ CommandTraceEvent ──▶ ExecutedAction ──▶ env.step(Action)
//!           ──output─▶ CommandOutput ──────▶ Action::respond ─▶ env.step ─▶ user reply
//!                                                                  │
//!                            SolveResult { reward, messages, info } ◀┘
//! ```

pub mod diff;
pub mod entities;
pub mod value_objects;

pub use diff::{DataDiff, collect_diffs};
pub use entities::{
    Action, Message, RESPOND_ACTION_FIELD_NAME, RESPOND_ACTION_NAME, Role, RunInfo, STOP_TOKEN,
    ScriptStep, SolveInfo, SolveResult, Task,
};
pub use value_objects::{
    CommandOutput, CommandResponse, CommandTraceEvent, EnvInfo, EnvResponse, ExecutedAction,
    RewardInfo, RewardResult, TraceDirection,
};
