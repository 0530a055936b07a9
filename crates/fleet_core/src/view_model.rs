#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub expression: String,
    /// Shown next to the raw expression when it failed to parse.
    pub parse_error: Option<String>,
    pub hostname_count: usize,
    pub fuzzy: bool,
    pub sort_class: &'static str,
    pub total_items: usize,
    /// 1-based.
    pub current_page: usize,
    pub page_count: usize,
    pub items_per_page: usize,
    pub max_size: usize,
    pub rows: Vec<HostRowView>,
    pub selected_count: usize,
    pub editable: bool,
    pub edit_name: Option<String>,
    /// Hosts the action being edited would be sent to.
    pub eligible_count: Option<usize>,
    pub push_error: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRowView {
    pub id: i32,
    pub fqdn: String,
    pub address: String,
    pub state: String,
    pub selected: bool,
    /// The action being edited cannot be sent to this host.
    pub disabled: bool,
}
