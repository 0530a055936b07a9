use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a host that has been registered but has no agent yet.
pub const STATE_UNDEPLOYED: &str = "undeployed";
/// Lifecycle state of a host that is being, or has been, removed.
pub const STATE_REMOVED: &str = "removed";
/// Initial state of a server profile that still needs configuration.
pub const PROFILE_UNCONFIGURED: &str = "unconfigured";

/// How the manager reaches a host when deploying its agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallMethod {
    /// Keys already present on the manager; no credentials need to be entered.
    ExistingKeysChoice,
    IdPasswordRoot,
    PrivateKeyChoice,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerProfile {
    pub name: String,
    #[serde(default)]
    pub ui_name: String,
    pub initial_state: String,
    #[serde(default)]
    pub managed: bool,
    #[serde(default)]
    pub worker: bool,
}

/// A host as pushed by the host data source. Never mutated by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    pub id: i32,
    pub fqdn: String,
    pub address: String,
    #[serde(default)]
    pub nodename: String,
    pub state: String,
    pub install_method: InstallMethod,
    #[serde(default)]
    pub server_profile: Option<ServerProfile>,
    #[serde(default)]
    pub needs_update: bool,
}

impl HostRecord {
    /// Key the hostlist filter and the natural sort project on.
    pub fn match_key(&self) -> &str {
        &self.address
    }

    /// Key of the selection store.
    pub fn identity(&self) -> &str {
        &self.fqdn
    }

    pub fn is_undeployed(&self) -> bool {
        self.state == STATE_UNDEPLOYED
    }

    pub fn profile_unconfigured(&self) -> bool {
        self.server_profile
            .as_ref()
            .is_some_and(|profile| profile.initial_state == PROFILE_UNCONFIGURED)
    }
}

/// Bulk selection operations offered by the table header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleType {
    All,
    None,
    Invert,
}

/// Host identity -> selected flag.
///
/// Owned by the session; the resolvers in this crate only read it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionSet {
    selected: HashMap<String, bool>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, identity: &str) -> bool {
        self.selected.get(identity).copied().unwrap_or(false)
    }

    pub fn set(&mut self, identity: impl Into<String>, selected: bool) {
        self.selected.insert(identity.into(), selected);
    }

    /// Flips the flag for `identity` and returns the new value.
    pub fn toggle(&mut self, identity: &str) -> bool {
        let entry = self.selected.entry(identity.to_string()).or_insert(false);
        *entry = !*entry;
        *entry
    }

    /// Registers hosts seen for the first time as unselected. Existing flags are kept.
    pub fn add_new_hosts(&mut self, hosts: &[HostRecord]) -> usize {
        let mut added = 0;
        for host in hosts {
            if !self.selected.contains_key(host.identity()) {
                self.selected.insert(host.identity().to_string(), false);
                added += 1;
            }
        }
        added
    }

    pub fn apply<'a>(&mut self, toggle: ToggleType, hosts: impl IntoIterator<Item = &'a HostRecord>) {
        for host in hosts {
            let identity = host.identity().to_string();
            let next = match toggle {
                ToggleType::All => true,
                ToggleType::None => false,
                ToggleType::Invert => !self.is_selected(&identity),
            };
            self.selected.insert(identity, next);
        }
    }
}

impl FromIterator<(String, bool)> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}
