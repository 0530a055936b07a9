use fleet_engine::{SortDirection, DEFAULT_MAX_HOSTS};

pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;
/// Number of page links the pager shows at once.
pub const DEFAULT_MAX_SIZE: usize = 10;

/// Initial view settings for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub items_per_page: usize,
    pub max_size: usize,
    pub fuzzy: bool,
    pub direction: SortDirection,
    /// Expansion limit handed to the hostlist parser.
    pub max_hosts: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            max_size: DEFAULT_MAX_SIZE,
            fuzzy: false,
            direction: SortDirection::Ascending,
            max_hosts: DEFAULT_MAX_HOSTS,
        }
    }
}
