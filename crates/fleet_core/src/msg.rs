use fleet_engine::{HostRecord, ToggleType};

use crate::CommandSummary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Live push delivered a fresh host snapshot.
    HostsReceived(Vec<HostRecord>),
    /// Live push delivered an error instead of data.
    PushFailed(String),
    /// User edited the hostlist expression.
    ExpressionChanged(String),
    FuzzyToggled(bool),
    SortToggled,
    PageSelected(usize),
    ItemsPerPageChanged(usize),
    /// User clicked the checkbox of the host with this identity.
    HostToggled(String),
    SelectionToggled(ToggleType),
    /// User picked a bulk action; the table enters edit mode for it.
    EditActionSelected(String),
    EditCancelled,
    /// User asked to run the bulk action with this value on the selection.
    RunActionClicked(String),
    /// Confirmation workflow finished. `None` when nothing was started.
    ActionConfirmed { command: Option<CommandSummary> },
    /// User clicked a row-level action for a single host.
    OverrideActionClicked { host: String, action: String },
    /// UI/render tick to coalesce rendering.
    Tick,
    NoOp,
}
