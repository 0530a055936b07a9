//! Bulk action descriptors, the action catalog and the eligibility resolver.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use fleet_logging::{fleet_debug, ENGINE_TARGET};
use thiserror::Error;

use crate::types::{HostRecord, SelectionSet, STATE_REMOVED};

/// Returns `true` when the action must not be sent to the host.
pub type HostPredicate = Arc<dyn Fn(&HostRecord) -> bool + Send + Sync>;

#[derive(Clone)]
pub enum Eligibility {
    Always,
    DisabledWhen(HostPredicate),
}

impl Eligibility {
    pub fn is_disabled(&self, host: &HostRecord) -> bool {
        match self {
            Eligibility::Always => false,
            Eligibility::DisabledWhen(predicate) => predicate(host),
        }
    }
}

impl fmt::Debug for Eligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eligibility::Always => write!(f, "Always"),
            Eligibility::DisabledWhen(_) => write!(f, "DisabledWhen(..)"),
        }
    }
}

impl PartialEq for Eligibility {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Eligibility::Always, Eligibility::Always) => true,
            (Eligibility::DisabledWhen(a), Eligibility::DisabledWhen(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

impl Eq for Eligibility {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDescriptor {
    /// Lookup token, unique within a catalog.
    pub value: String,
    /// Label shown to the operator.
    pub verb: String,
    /// Lifecycle state the host transitions to, for state-changing actions.
    pub state: Option<String>,
    pub eligibility: Eligibility,
}

impl ActionDescriptor {
    pub fn new(value: impl Into<String>, verb: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            verb: verb.into(),
            state: None,
            eligibility: Eligibility::Always,
        }
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn disabled_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&HostRecord) -> bool + Send + Sync + 'static,
    {
        self.eligibility = Eligibility::DisabledWhen(Arc::new(predicate));
        self
    }

    pub fn is_disabled_for(&self, host: &HostRecord) -> bool {
        self.eligibility.is_disabled(host)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no action registered for value {value:?}")]
pub struct ActionNotFound {
    pub value: String,
}

/// Ordered action list with a lookup index by value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionCatalog {
    actions: Vec<ActionDescriptor>,
    index: HashMap<String, usize>,
}

impl ActionCatalog {
    pub fn new(actions: impl IntoIterator<Item = ActionDescriptor>) -> Self {
        let mut catalog = Self::default();
        for action in actions {
            catalog.push(action);
        }
        catalog
    }

    /// Appends an action. If the value is already registered the first entry keeps the lookup.
    pub fn push(&mut self, action: ActionDescriptor) {
        self.index
            .entry(action.value.clone())
            .or_insert(self.actions.len());
        self.actions.push(action);
    }

    pub fn lookup(&self, value: &str) -> Result<&ActionDescriptor, ActionNotFound> {
        self.index
            .get(value)
            .map(|&idx| &self.actions[idx])
            .ok_or_else(|| ActionNotFound {
                value: value.to_string(),
            })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ActionDescriptor> {
        self.actions.iter()
    }

    /// The bulk actions offered on the server table.
    pub fn server_actions() -> Self {
        Self::new([
            ActionDescriptor::new("detect_file_systems", "Detect File Systems")
                .disabled_when(HostRecord::is_undeployed),
            ActionDescriptor::new("rewrite_target_configuration", "Re-write Target Configuration")
                .disabled_when(HostRecord::is_undeployed),
            ActionDescriptor::new("install_updates", "Install Updates")
                .disabled_when(|host| !host.needs_update || host.is_undeployed()),
            ActionDescriptor::new("deploy_agent", "Deploy Agent")
                .with_state("deployed")
                .disabled_when(|host| !host.is_undeployed()),
            ActionDescriptor::new("reboot", "Reboot").disabled_when(HostRecord::is_undeployed),
            ActionDescriptor::new("shutdown", "Shutdown").disabled_when(HostRecord::is_undeployed),
            ActionDescriptor::new("remove", "Remove")
                .with_state(STATE_REMOVED)
                .disabled_when(|host| host.state == STATE_REMOVED),
            ActionDescriptor::new("force_remove", "Force Remove"),
        ])
    }
}

impl<'a> IntoIterator for &'a ActionCatalog {
    type Item = &'a ActionDescriptor;
    type IntoIter = std::slice::Iter<'a, ActionDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Hosts that are both selected and not disabled for `action`, in `filtered` order.
pub fn eligible_hosts<'a>(
    action: &ActionDescriptor,
    filtered: &[&'a HostRecord],
    selection: &SelectionSet,
) -> Vec<&'a HostRecord> {
    filtered
        .iter()
        .copied()
        .filter(|host| selection.is_selected(host.identity()))
        .filter(|host| !action.is_disabled_for(host))
        .collect()
}

/// Looks `value` up in `catalog` and resolves its eligible hosts.
pub fn resolve_eligible<'a>(
    catalog: &ActionCatalog,
    value: &str,
    filtered: &[&'a HostRecord],
    selection: &SelectionSet,
) -> Result<Vec<&'a HostRecord>, ActionNotFound> {
    let action = catalog.lookup(value)?;
    let eligible = eligible_hosts(action, filtered, selection);
    fleet_debug!(
        target: ENGINE_TARGET,
        "{} eligible for {} of {} filtered hosts",
        action.verb,
        eligible.len(),
        filtered.len()
    );
    Ok(eligible)
}
