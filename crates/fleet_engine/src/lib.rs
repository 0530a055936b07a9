//! Fleet engine: hostlist parsing, natural ordering, host filtering and the
//! action/lifecycle resolvers.
//!
//! Everything here is a pure function of its inputs. Callers recompute on
//! every read instead of caching filter results.
mod action;
mod filter;
mod hostlist;
mod lifecycle;
mod natural;
mod types;

pub use action::{
    eligible_hosts, resolve_eligible, ActionCatalog, ActionDescriptor, ActionNotFound,
    Eligibility, HostPredicate,
};
pub use filter::{filter_by_key, filter_hosts, total_by_key, total_items, MatchMode};
pub use hostlist::{parse, HostlistParser, HostnameSet, ParseError, DEFAULT_MAX_HOSTS};
pub use lifecycle::{
    is_override_candidate, resolve_override, LifecycleStep, Override, FORCE_REMOVE_VERB,
};
pub use natural::{natural_cmp, natural_sort_by_key, natural_sorted, SortDirection};
pub use types::{
    HostRecord, InstallMethod, SelectionSet, ServerProfile, ToggleType, PROFILE_UNCONFIGURED,
    STATE_REMOVED, STATE_UNDEPLOYED,
};
