use fleet_engine::LifecycleStep;

/// Opaque reference to a command started by a dispatched action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSummary {
    pub id: u64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the operator to confirm `action` for the listed host identities.
    ConfirmAction {
        action: String,
        verb: String,
        hosts: Vec<String>,
    },
    OpenCommand { command: CommandSummary },
    OpenOnboarding { host: String, step: LifecycleStep },
    /// No onboarding applies; dispatch the action to the host directly.
    DispatchFallback { host: String, action: String },
    ReportFault { message: String },
}
