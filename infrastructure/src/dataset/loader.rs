//! JSON file loaders for the airline dataset and task lists.

use airline_domain::{AirlineData, Task};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Built-in airline agent policy.
pub const DEFAULT_WIKI: &str = include_str!("../../../data/wiki.md");

/// Errors that can occur while loading bench files
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No tasks in {0}")]
    NoTasks(PathBuf),
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse<T: serde::de::DeserializeOwned>(path: &Path, content: &str) -> Result<T, LoadError> {
    serde_json::from_str(content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load an airline dataset (`flights`, `reservations`, `users`).
pub fn load_airline_data(path: impl AsRef<Path>) -> Result<AirlineData, LoadError> {
    let path = path.as_ref();
    let data: AirlineData = parse(path, &read(path)?)?;
    debug!(
        "Loaded {} flights, {} reservations, {} users from {}",
        data.flights.len(),
        data.reservations.len(),
        data.users.len(),
        path.display()
    );
    Ok(data)
}

/// Load a non-empty JSON array of tasks.
pub fn load_tasks(path: impl AsRef<Path>) -> Result<Vec<Task>, LoadError> {
    let path = path.as_ref();
    let tasks: Vec<Task> = parse(path, &read(path)?)?;
    if tasks.is_empty() {
        return Err(LoadError::NoTasks(path.to_path_buf()));
    }
    debug!("Loaded {} tasks from {}", tasks.len(), path.display());
    Ok(tasks)
}

/// Load the policy document, falling back to [`DEFAULT_WIKI`].
pub fn load_wiki(path: Option<&Path>) -> Result<String, LoadError> {
    match path {
        Some(path) => read(path),
        None => Ok(DEFAULT_WIKI.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/airline.json");
    const TASKS_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/tasks.json");

    #[test]
    fn test_load_sample_dataset() {
        let data = load_airline_data(DATA_PATH).unwrap();
        assert!(data.reservations.contains_key("4WQ150"));
        assert!(data.users.contains_key("mia_li_3668"));
    }

    #[test]
    fn test_load_sample_tasks() {
        let tasks = load_tasks(TASKS_PATH).unwrap();
        assert!(!tasks.is_empty());
        assert!(tasks.iter().all(|t| !t.instruction.is_empty()));
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = load_airline_data("/nonexistent/airline.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/airline.json"));
    }

    #[test]
    fn test_empty_task_list_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "[]").unwrap();
        assert!(matches!(load_tasks(&path), Err(LoadError::NoTasks(_))));
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("airline.json");
        fs::write(&path, "{\"flights\": [").unwrap();
        assert!(matches!(load_airline_data(&path), Err(LoadError::Parse { .. })));
    }

    #[test]
    fn test_default_wiki() {
        let wiki = load_wiki(None).unwrap();
        assert!(wiki.contains("Cancel"));
    }
}
