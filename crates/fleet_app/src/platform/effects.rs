use chrono::Utc;
use fleet_core::{CommandSummary, Effect, Msg};
use fleet_logging::{fleet_error, fleet_info};
use serde::Serialize;

/// Request handed to the dispatch backend, one JSON object per line on stdout.
#[derive(Debug, Serialize)]
struct DispatchRequest<'a> {
    command_id: u64,
    action: &'a str,
    hosts: &'a [String],
    requested_at: String,
}

#[derive(Debug, Serialize)]
struct OnboardingRequest<'a> {
    host: &'a str,
    step: fleet_engine::LifecycleStep,
}

pub struct EffectRunner {
    confirm: bool,
    next_command_id: u64,
    faults: Vec<String>,
}

impl EffectRunner {
    /// With `confirm` unset, confirmations are shown but never dispatched.
    pub fn new(confirm: bool) -> Self {
        Self {
            confirm,
            next_command_id: 1,
            faults: Vec::new(),
        }
    }

    pub fn faults(&self) -> &[String] {
        &self.faults
    }

    /// Runs `effects` and returns the messages they produce for the session.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut replies = Vec::new();
        for effect in effects {
            match effect {
                Effect::ConfirmAction {
                    action,
                    verb,
                    hosts,
                } => {
                    println!("{verb}: {} eligible host(s)", hosts.len());
                    for host in &hosts {
                        println!("  {host}");
                    }
                    if !self.confirm {
                        continue;
                    }
                    let command = if hosts.is_empty() {
                        None
                    } else {
                        let id = self.dispatch(&action, &hosts);
                        Some(CommandSummary {
                            id,
                            message: format!("{verb} requested for {} host(s)", hosts.len()),
                        })
                    };
                    replies.push(Msg::ActionConfirmed { command });
                }
                Effect::OpenCommand { command } => {
                    println!("command {}: {}", command.id, command.message);
                }
                Effect::OpenOnboarding { host, step } => {
                    self.emit(&OnboardingRequest { host: &host, step });
                }
                Effect::DispatchFallback { host, action } => {
                    self.dispatch(&action, &[host]);
                }
                Effect::ReportFault { message } => {
                    eprintln!("error: {message}");
                    self.faults.push(message);
                }
            }
        }
        replies
    }

    fn dispatch(&mut self, action: &str, hosts: &[String]) -> u64 {
        let command_id = self.next_command_id;
        self.next_command_id += 1;
        fleet_info!(
            "Dispatching {} to {} host(s) as command {}",
            action,
            hosts.len(),
            command_id
        );
        self.emit(&DispatchRequest {
            command_id,
            action,
            hosts,
            requested_at: Utc::now().to_rfc3339(),
        });
        command_id
    }

    fn emit<T: Serialize>(&self, request: &T) {
        match serde_json::to_string(request) {
            Ok(line) => println!("{line}"),
            Err(err) => fleet_error!("Failed to serialize request: {}", err),
        }
    }
}
