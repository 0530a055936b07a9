//! Fleet core: the session state machine and view-model helpers sitting on
//! top of the pure engine.
mod effect;
mod msg;
mod settings;
mod state;
mod update;
mod view_model;

pub use effect::{CommandSummary, Effect};
pub use msg::Msg;
pub use settings::{SessionSettings, DEFAULT_ITEMS_PER_PAGE, DEFAULT_MAX_SIZE};
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, HostRowView};
