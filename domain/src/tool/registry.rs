//! Name-keyed dispatch over the airline tool set.

use super::booking::BookReservation;
use super::calculate::Calculate;
use super::entities::ToolDefinition;
use super::reservation::{
    CancelReservation, GetReservationDetails, UpdateReservationBaggages, UpdateReservationFlights,
    UpdateReservationPassengers,
};
use super::search::{ListAllAirports, SearchDirectFlight, SearchOnestopFlight};
use super::support::{Think, TransferToHumanAgents};
use super::traits::AirlineTool;
use super::user::{GetUserDetails, SendCertificate};
use super::value_objects::{ToolError, ToolOutcome};
use crate::airline::AirlineData;
use crate::bench::Action;
use serde_json::Value;

/// Registry of tools, looked up by canonical name.
pub struct ToolRegistry {
    tools: Vec<Box<dyn AirlineTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// All fourteen airline tools, in alphabetical order.
    pub fn airline() -> Self {
        Self::new()
            .register(BookReservation)
            .register(Calculate)
            .register(CancelReservation)
            .register(GetReservationDetails)
            .register(GetUserDetails)
            .register(ListAllAirports)
            .register(SearchDirectFlight)
            .register(SearchOnestopFlight)
            .register(SendCertificate)
            .register(Think)
            .register(TransferToHumanAgents)
            .register(UpdateReservationBaggages)
            .register(UpdateReservationFlights)
            .register(UpdateReservationPassengers)
    }

    pub fn register(mut self, tool: impl AirlineTool + 'static) -> Self {
        self.tools.push(Box::new(tool));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn AirlineTool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn is_terminal(&self, name: &str) -> bool {
        self.get(name).is_some_and(|t| t.is_terminal())
    }

    /// Run the named tool against `data`.
    pub fn invoke(&self, name: &str, data: &mut AirlineData, kwargs: &Value) -> ToolOutcome {
        self.get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?
            .invoke(data, kwargs)
    }

    /// Apply `actions` to `data` in order, skipping terminal and unknown
    /// tools.
    ///
    /// A failing action does not stop the replay; failures are returned
    /// with the action name.
    pub fn replay(&self, data: &mut AirlineData, actions: &[Action]) -> Vec<(String, ToolError)> {
        let mut failures = Vec::new();
        for action in actions {
            if !self.contains(&action.name) || self.is_terminal(&action.name) {
                continue;
            }
            if let Err(e) = self.invoke(&action.name, data, &action.kwargs) {
                failures.push((action.name.clone(), e));
            }
        }
        failures
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tools.iter().map(|t| t.name())
    }

    /// Names of the tools that end a conversation.
    pub fn terminate_tools(&self) -> Vec<&'static str> {
        self.tools
            .iter()
            .filter(|t| t.is_terminal())
            .map(|t| t.name())
            .collect()
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::airline()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
