//! Decides which onboarding step an override action opens for a host.

use serde::Serialize;

use crate::action::ActionDescriptor;
use crate::types::{HostRecord, InstallMethod, STATE_REMOVED};

/// Verb of the removal action that bypasses onboarding entirely.
pub const FORCE_REMOVE_VERB: &str = "Force Remove";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleStep {
    /// Credentials or setup must be entered first.
    Add,
    /// Credentials exist; show deployment progress.
    Status,
    /// Host can be configured; the operator picks a server profile.
    SelectProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Override {
    Onboard(LifecycleStep),
    /// Dispatch the action normally.
    Fallback,
}

/// True for state-changing actions that do not remove the host.
pub fn is_override_candidate(action: &ActionDescriptor) -> bool {
    let transitions = action
        .state
        .as_deref()
        .is_some_and(|state| state != STATE_REMOVED);
    transitions && action.verb != FORCE_REMOVE_VERB
}

/// Recomputed from the record on every call; the record may have changed since the last one.
pub fn resolve_override(host: &HostRecord, action: &ActionDescriptor) -> Override {
    if !is_override_candidate(action) {
        return Override::Fallback;
    }

    let undeployed = host.is_undeployed();
    if !undeployed && !host.profile_unconfigured() {
        return Override::Fallback;
    }

    let step = if host.install_method != InstallMethod::ExistingKeysChoice {
        LifecycleStep::Add
    } else if undeployed {
        LifecycleStep::Status
    } else {
        LifecycleStep::SelectProfile
    };
    Override::Onboard(step)
}
