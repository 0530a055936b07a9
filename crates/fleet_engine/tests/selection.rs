use fleet_engine::{HostRecord, InstallMethod, SelectionSet, ToggleType};

fn host(fqdn: &str) -> HostRecord {
    HostRecord {
        id: 0,
        fqdn: fqdn.to_string(),
        address: fqdn.to_string(),
        nodename: String::new(),
        state: "managed".to_string(),
        install_method: InstallMethod::Other,
        server_profile: None,
        needs_update: false,
    }
}

#[test]
fn new_hosts_start_unselected_and_keep_existing_flags() {
    let mut selection = SelectionSet::new();
    selection.set("a", true);

    let added = selection.add_new_hosts(&[host("a"), host("b")]);

    assert_eq!(added, 1);
    assert!(selection.is_selected("a"));
    assert!(!selection.is_selected("b"));
}

#[test]
fn toggle_flips_and_reports_new_value() {
    let mut selection = SelectionSet::new();
    assert!(selection.toggle("a"));
    assert!(!selection.toggle("a"));
    assert!(!selection.is_selected("a"));
}

#[test]
fn bulk_toggles_only_touch_given_hosts() {
    let hosts = vec![host("a"), host("b")];
    let mut selection = SelectionSet::new();
    selection.set("c", true);
    selection.set("a", true);

    selection.apply(ToggleType::Invert, &hosts);
    assert!(!selection.is_selected("a"));
    assert!(selection.is_selected("b"));
    assert!(selection.is_selected("c"));

    selection.apply(ToggleType::All, &hosts);
    assert!(["a", "b", "c"].iter().all(|id| selection.is_selected(id)));

    selection.apply(ToggleType::None, &hosts);
    assert!(!selection.is_selected("a"));
    assert!(!selection.is_selected("b"));
    assert!(selection.is_selected("c"));
}
