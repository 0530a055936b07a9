use fleet_engine::{
    filter_hosts, resolve_eligible, total_items, ActionCatalog, ActionNotFound, HostRecord,
    HostlistParser, HostnameSet, MatchMode, ParseError, SelectionSet, SortDirection, ToggleType,
};

use crate::view_model::{AppViewModel, HostRowView};
use crate::SessionSettings;

/// Mutable view state of one operator session.
///
/// Matches are never cached: every read filters the current snapshot again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    settings: SessionSettings,
    parser: HostlistParser,
    catalog: ActionCatalog,
    hosts: Vec<HostRecord>,
    selection: SelectionSet,
    expression: String,
    hostnames: HostnameSet,
    parse_error: Option<ParseError>,
    fuzzy: bool,
    direction: SortDirection,
    current_page: usize,
    items_per_page: usize,
    edit_name: Option<String>,
    pending_action: Option<String>,
    push_error: Option<String>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(SessionSettings::default())
    }

    pub fn with_settings(settings: SessionSettings) -> Self {
        Self::with_catalog(ActionCatalog::server_actions(), settings)
    }

    pub fn with_catalog(catalog: ActionCatalog, settings: SessionSettings) -> Self {
        Self {
            settings,
            parser: HostlistParser::with_max_hosts(settings.max_hosts),
            catalog,
            hosts: Vec::new(),
            selection: SelectionSet::new(),
            expression: String::new(),
            hostnames: HostnameSet::new(),
            parse_error: None,
            fuzzy: settings.fuzzy,
            direction: settings.direction,
            current_page: 1,
            items_per_page: settings.items_per_page.max(1),
            edit_name: None,
            pending_action: None,
            push_error: None,
            dirty: false,
        }
    }

    pub fn hosts(&self) -> &[HostRecord] {
        &self.hosts
    }

    pub fn catalog(&self) -> &ActionCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn hostnames(&self) -> &HostnameSet {
        &self.hostnames
    }

    pub fn parse_error(&self) -> Option<&ParseError> {
        self.parse_error.as_ref()
    }

    pub fn fuzzy(&self) -> bool {
        self.fuzzy
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn editable(&self) -> bool {
        self.edit_name.is_some()
    }

    pub fn edit_name(&self) -> Option<&str> {
        self.edit_name.as_deref()
    }

    pub fn pending_action(&self) -> Option<&str> {
        self.pending_action.as_deref()
    }

    fn match_mode(&self) -> MatchMode {
        MatchMode::from_fuzzy(self.fuzzy)
    }

    /// Current matches in display order.
    pub fn filtered_hosts(&self) -> Vec<&HostRecord> {
        filter_hosts(&self.hosts, &self.hostnames, self.match_mode(), self.direction)
    }

    pub fn total_items(&self) -> usize {
        total_items(&self.hosts, &self.hostnames, self.match_mode())
    }

    pub fn page_count(&self) -> usize {
        self.total_items().div_ceil(self.items_per_page).max(1)
    }

    /// Filtered, selected hosts that the action with `value` may be sent to.
    pub fn eligible_hosts(&self, value: &str) -> Result<Vec<&HostRecord>, ActionNotFound> {
        resolve_eligible(&self.catalog, value, &self.filtered_hosts(), &self.selection)
    }

    pub fn find_host(&self, identity: &str) -> Option<&HostRecord> {
        self.hosts.iter().find(|host| host.identity() == identity)
    }

    pub fn view(&self) -> AppViewModel {
        let filtered = self.filtered_hosts();
        let edit_action = self
            .edit_name
            .as_deref()
            .and_then(|value| self.catalog.lookup(value).ok());

        let rows = filtered
            .iter()
            .skip((self.current_page - 1) * self.items_per_page)
            .take(self.items_per_page)
            .map(|host| HostRowView {
                id: host.id,
                fqdn: host.fqdn.clone(),
                address: host.address.clone(),
                state: host.state.clone(),
                selected: self.selection.is_selected(host.identity()),
                disabled: edit_action.is_some_and(|action| action.is_disabled_for(host)),
            })
            .collect();

        let eligible_count = edit_action.map(|action| {
            fleet_engine::eligible_hosts(action, &filtered, &self.selection).len()
        });

        AppViewModel {
            expression: self.expression.clone(),
            parse_error: self.parse_error.as_ref().map(ToString::to_string),
            hostname_count: self.hostnames.len(),
            fuzzy: self.fuzzy,
            sort_class: sort_class(self.direction),
            total_items: filtered.len(),
            current_page: self.current_page,
            page_count: filtered.len().div_ceil(self.items_per_page).max(1),
            items_per_page: self.items_per_page,
            max_size: self.settings.max_size,
            rows,
            selected_count: filtered
                .iter()
                .filter(|host| self.selection.is_selected(host.identity()))
                .count(),
            editable: self.editable(),
            edit_name: self.edit_name.clone(),
            eligible_count,
            push_error: self.push_error.clone(),
            dirty: self.dirty,
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn replace_hosts(&mut self, hosts: Vec<HostRecord>) -> usize {
        let added = self.selection.add_new_hosts(&hosts);
        self.hosts = hosts;
        self.push_error = None;
        self.clamp_page();
        added
    }

    pub(crate) fn set_push_error(&mut self, message: String) {
        self.push_error = Some(message);
    }

    /// Parses and applies a new expression. A malformed expression leaves the
    /// filter inactive and keeps the raw text for display.
    pub(crate) fn apply_expression(&mut self, expression: String) -> Result<(), ParseError> {
        let parsed = self.parser.parse(&expression);
        self.expression = expression;
        self.current_page = 1;
        match parsed {
            Ok(hostnames) => {
                self.hostnames = hostnames;
                self.parse_error = None;
                Ok(())
            }
            Err(err) => {
                self.hostnames = HostnameSet::new();
                self.parse_error = Some(err.clone());
                Err(err)
            }
        }
    }

    pub(crate) fn set_fuzzy(&mut self, fuzzy: bool) {
        self.fuzzy = fuzzy;
        self.clamp_page();
    }

    pub(crate) fn reverse_sort(&mut self) {
        self.direction = self.direction.reversed();
    }

    pub(crate) fn set_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.page_count());
    }

    pub(crate) fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page.max(1);
        self.clamp_page();
    }

    pub(crate) fn toggle_host(&mut self, identity: &str) -> bool {
        self.selection.toggle(identity)
    }

    /// Applies a bulk toggle to the hosts currently matching the filter.
    pub(crate) fn toggle_filtered(&mut self, toggle: ToggleType) {
        let mode = self.match_mode();
        let filtered = filter_hosts(&self.hosts, &self.hostnames, mode, self.direction);
        self.selection.apply(toggle, filtered);
    }

    pub(crate) fn set_edit_name(&mut self, name: Option<String>) {
        self.edit_name = name;
    }

    pub(crate) fn set_pending_action(&mut self, value: Option<String>) {
        self.pending_action = value;
    }

    fn clamp_page(&mut self) {
        self.current_page = self.current_page.clamp(1, self.page_count());
    }
}

fn sort_class(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Descending => "fa-sort-asc",
        SortDirection::Ascending => "fa-sort-desc",
    }
}
