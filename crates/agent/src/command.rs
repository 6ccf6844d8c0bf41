//! Line-oriented operator console.
//!
//! Each stdin line is one command (`auto`, `manual`, `toggle`,
//! `safe` / `caution` / `danger` optionally prefixed by `scenario`,
//! `sos`, `status`, `quit`). Unknown input is logged and ignored.

use std::str::FromStr;

use heatguard_core::mode::SimulationMode;
use heatguard_core::scenario::ScenarioKind;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;

use crate::monitor::HeatMonitor;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorCommand {
    SetMode(SimulationMode),
    ToggleMode,
    Scenario(ScenarioKind),
    Alert,
    Status,
    Quit,
}

impl FromStr for OperatorCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(first) = words.next() else {
            return Err(CommandError::Empty);
        };
        let verb = first.to_ascii_lowercase();

        let command = match verb.as_str() {
            "auto" => Self::SetMode(SimulationMode::Auto),
            "manual" => Self::SetMode(SimulationMode::Manual),
            "toggle" => Self::ToggleMode,
            "sos" | "alert" => Self::Alert,
            "status" => Self::Status,
            "quit" | "exit" => Self::Quit,
            "scenario" => {
                let kind = words.next().unwrap_or_default();
                let kind = kind
                    .parse()
                    .map_err(|_| CommandError::InvalidScenario(kind.to_string()))?;
                Self::Scenario(kind)
            }
            other => match other.parse::<ScenarioKind>() {
                Ok(kind) => Self::Scenario(kind),
                Err(_) => return Err(CommandError::Unknown(first.to_string())),
            },
        };
        Ok(command)
    }
}

/// Carry out one command. Returns `false` when the console should stop.
pub async fn execute(monitor: &HeatMonitor, command: OperatorCommand) -> bool {
    match command {
        OperatorCommand::SetMode(mode) => monitor.set_mode(mode).await,
        OperatorCommand::ToggleMode => {
            monitor.toggle_mode().await;
        }
        OperatorCommand::Scenario(kind) => {
            monitor.apply_scenario(kind).await;
        }
        OperatorCommand::Alert => {
            // Fire-and-forget; the presenter reports the outcome.
            let handle = monitor.trigger_alert().await;
            tracing::debug!(alert_id = %handle.alert_id(), "Alert handed off");
        }
        OperatorCommand::Status => {
            monitor.render_current().await;
        }
        OperatorCommand::Quit => return false,
    }
    true
}

/// Why the console loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleExit {
    Quit,
    InputClosed,
    Cancelled,
}

/// Read commands from `input` until EOF, `quit`, or cancellation.
pub async fn run_console<R>(
    monitor: &HeatMonitor,
    input: R,
    cancel: CancellationToken,
) -> ConsoleExit
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => return ConsoleExit::Cancelled,
            line = lines.next_line() => line,
        };

        match line {
            Ok(Some(line)) if line.trim().is_empty() => continue,
            Ok(Some(line)) => match line.parse::<OperatorCommand>() {
                Ok(command) => {
                    tracing::debug!(?command, "Operator command");
                    if !execute(monitor, command).await {
                        tracing::info!("Quit requested");
                        return ConsoleExit::Quit;
                    }
                }
                Err(e) => tracing::warn!(error = %e, input = %line.trim(), "Ignoring command"),
            },
            Ok(None) => {
                tracing::info!("Operator input closed");
                return ConsoleExit::InputClosed;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read operator input");
                return ConsoleExit::InputClosed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mode_commands() {
        assert_eq!(
            "auto".parse::<OperatorCommand>(),
            Ok(OperatorCommand::SetMode(SimulationMode::Auto))
        );
        assert_eq!(
            "MANUAL".parse::<OperatorCommand>(),
            Ok(OperatorCommand::SetMode(SimulationMode::Manual))
        );
        assert_eq!("toggle".parse::<OperatorCommand>(), Ok(OperatorCommand::ToggleMode));
    }

    #[test]
    fn parses_scenarios_with_and_without_prefix() {
        assert_eq!(
            "danger".parse::<OperatorCommand>(),
            Ok(OperatorCommand::Scenario(ScenarioKind::Danger))
        );
        assert_eq!(
            "scenario caution".parse::<OperatorCommand>(),
            Ok(OperatorCommand::Scenario(ScenarioKind::Caution))
        );
        assert_eq!(
            "  Scenario   SAFE ".parse::<OperatorCommand>(),
            Ok(OperatorCommand::Scenario(ScenarioKind::Safe))
        );
    }

    #[test]
    fn parses_alert_aliases() {
        assert_eq!("sos".parse::<OperatorCommand>(), Ok(OperatorCommand::Alert));
        assert_eq!("alert".parse::<OperatorCommand>(), Ok(OperatorCommand::Alert));
        assert_eq!("exit".parse::<OperatorCommand>(), Ok(OperatorCommand::Quit));
        assert_eq!("status".parse::<OperatorCommand>(), Ok(OperatorCommand::Status));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!("".parse::<OperatorCommand>(), Err(CommandError::Empty));
        assert_eq!(
            "reboot".parse::<OperatorCommand>(),
            Err(CommandError::Unknown("reboot".to_string()))
        );
        assert_eq!(
            "scenario meltdown".parse::<OperatorCommand>(),
            Err(CommandError::InvalidScenario("meltdown".to_string()))
        );
        assert_eq!(
            "scenario".parse::<OperatorCommand>(),
            Err(CommandError::InvalidScenario(String::new()))
        );
    }
}
