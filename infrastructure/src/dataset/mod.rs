//! Dataset, task and policy file loading.

mod loader;

pub use loader::{DEFAULT_WIKI, LoadError, load_airline_data, load_tasks, load_wiki};
