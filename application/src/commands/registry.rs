//! Command lookup and execution.

use super::AirlineCommand;
use super::booking::BookReservationCommand;
use super::lookup::{ListAllAirportsCommand, SearchDirectFlightCommand, SearchOnestopFlightCommand};
use super::reservation::{
    CancelReservationCommand, GetReservationDetailsCommand, UpdateReservationBaggagesCommand,
    UpdateReservationFlightsCommand, UpdateReservationPassengersCommand,
};
use super::support::{CalculateCommand, TransferToHumanAgentsCommand};
use super::user::{GetUserDetailsCommand, SendCertificateCommand};
use airline_domain::command::{CommandError, CommandOutcome, CommandSignature, validate};
use airline_domain::tool::{ToolRegistry, render_outcome};
use airline_domain::AirlineData;
use serde_json::Value;
use tracing::debug;

/// All commands of the airline workflow, backed by the tool registry.
pub struct CommandRegistry {
    commands: Vec<Box<dyn AirlineCommand>>,
    tools: ToolRegistry,
}

impl CommandRegistry {
    pub fn new(tools: ToolRegistry) -> Self {
        Self {
            commands: Vec::new(),
            tools,
        }
    }

    /// The thirteen airline commands over the airline tool set.
    pub fn airline() -> Self {
        Self::new(ToolRegistry::airline())
            .register(BookReservationCommand)
            .register(CalculateCommand)
            .register(CancelReservationCommand)
            .register(GetReservationDetailsCommand)
            .register(GetUserDetailsCommand)
            .register(ListAllAirportsCommand)
            .register(SearchDirectFlightCommand)
            .register(SearchOnestopFlightCommand)
            .register(SendCertificateCommand)
            .register(TransferToHumanAgentsCommand)
            .register(UpdateReservationBaggagesCommand)
            .register(UpdateReservationFlightsCommand)
            .register(UpdateReservationPassengersCommand)
    }

    pub fn register(mut self, command: impl AirlineCommand + 'static) -> Self {
        self.commands.push(Box::new(command));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn AirlineCommand> {
        self.commands
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|c| c.name())
    }

    pub fn signatures(&self) -> Vec<CommandSignature> {
        self.commands.iter().map(|c| c.signature()).collect()
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Validate `params`, run the command's tool against `data`, and render
    /// the response.
    ///
    /// Never fails: rejections become unsuccessful outcomes whose response
    /// carries the `Error: …` text.
    pub fn execute(&self, name: &str, data: &mut AirlineData, params: &Value) -> CommandOutcome {
        let Some(command) = self.get(name) else {
            return CommandOutcome::rejected(&CommandError::UnknownCommand(name.to_string()));
        };

        let kwargs = match validate(&command.signature(), params)
            .and_then(|()| command.tool_kwargs(params))
        {
            Ok(kwargs) => kwargs,
            Err(e) => {
                debug!("Command {} rejected: {}", name, e);
                return CommandOutcome::failure(command.respond(params, &e.to_wire(), false));
            }
        };

        let outcome = self.tools.invoke(command.tool_name(), data, &kwargs);
        let success = outcome.is_ok();
        if let Err(e) = &outcome {
            debug!("Tool {} failed: {}", command.tool_name(), e);
        }
        let response = command.respond(params, &render_outcome(&outcome), success);

        let result = if success {
            CommandOutcome::success(response)
        } else {
            CommandOutcome::failure(response)
        };
        result.with_tool(command.tool_name(), kwargs)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::airline()
    }
}
