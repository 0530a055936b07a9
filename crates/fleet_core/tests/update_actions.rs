use std::sync::Once;

use fleet_core::{update, AppState, CommandSummary, Effect, Msg};
use fleet_engine::{HostRecord, InstallMethod, LifecycleStep, ServerProfile, ToggleType};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(fleet_logging::initialize_for_tests);
}

fn host(fqdn: &str, state: &str, install_method: InstallMethod) -> HostRecord {
    HostRecord {
        id: 0,
        fqdn: fqdn.to_string(),
        address: fqdn.to_string(),
        nodename: fqdn.to_string(),
        state: state.to_string(),
        install_method,
        server_profile: None,
        needs_update: false,
    }
}

fn fleet() -> AppState {
    let mut configurable = host("oss3", "deployed", InstallMethod::ExistingKeysChoice);
    configurable.server_profile = Some(ServerProfile {
        name: "base_managed".into(),
        ui_name: "Managed Storage Server".into(),
        initial_state: "unconfigured".into(),
        managed: true,
        worker: false,
    });
    let hosts = vec![
        host("oss1", "managed", InstallMethod::ExistingKeysChoice),
        host("oss2", "undeployed", InstallMethod::IdPasswordRoot),
        configurable,
        host("mds1", "managed", InstallMethod::ExistingKeysChoice),
    ];
    let (state, _) = update(AppState::new(), Msg::HostsReceived(hosts));
    state
}

#[test]
fn run_action_confirms_selected_enabled_filtered_hosts() {
    init_logging();
    let (state, _) = update(fleet(), Msg::ExpressionChanged("oss[1-3]".into()));
    let (state, _) = update(state, Msg::SelectionToggled(ToggleType::All));
    let (state, _) = update(state, Msg::HostToggled("oss3".into()));

    let (state, effects) = update(state, Msg::RunActionClicked("reboot".into()));

    assert_eq!(
        effects,
        vec![Effect::ConfirmAction {
            action: "reboot".into(),
            verb: "Reboot".into(),
            hosts: vec!["oss1".into()],
        }]
    );
    assert_eq!(state.pending_action(), Some("reboot"));
}

#[test]
fn unfiltered_selected_hosts_are_not_confirmed() {
    init_logging();
    let (state, _) = update(fleet(), Msg::HostToggled("mds1".into()));
    let (state, _) = update(state, Msg::ExpressionChanged("oss1".into()));
    let (_, effects) = update(state, Msg::RunActionClicked("force_remove".into()));

    assert_eq!(
        effects,
        vec![Effect::ConfirmAction {
            action: "force_remove".into(),
            verb: "Force Remove".into(),
            hosts: Vec::new(),
        }]
    );
}

#[test]
fn unknown_action_is_reported_not_swallowed() {
    init_logging();
    let (state, effects) = update(fleet(), Msg::RunActionClicked("defragment".into()));

    assert_eq!(effects.len(), 1);
    assert!(matches!(
        &effects[0],
        Effect::ReportFault { message } if message.contains("defragment")
    ));
    assert_eq!(state.pending_action(), None);
}

#[test]
fn edit_mode_tracks_action_and_disabled_rows() {
    init_logging();
    let (state, _) = update(fleet(), Msg::SelectionToggled(ToggleType::All));
    let (state, effects) = update(state, Msg::EditActionSelected("deploy_agent".into()));
    assert!(effects.is_empty());

    let view = state.view();
    assert!(view.editable);
    assert_eq!(view.edit_name.as_deref(), Some("deploy_agent"));
    assert_eq!(view.eligible_count, Some(1));
    let disabled: Vec<(String, bool)> = view
        .rows
        .iter()
        .map(|row| (row.fqdn.clone(), row.disabled))
        .collect();
    assert_eq!(
        disabled,
        vec![
            ("mds1".to_string(), true),
            ("oss1".to_string(), true),
            ("oss2".to_string(), false),
            ("oss3".to_string(), true),
        ]
    );

    let (state, _) = update(state, Msg::EditCancelled);
    assert!(!state.view().editable);
}

#[test]
fn confirmation_leaves_edit_mode_and_opens_command() {
    init_logging();
    let (state, _) = update(fleet(), Msg::EditActionSelected("reboot".into()));
    let (state, _) = update(state, Msg::RunActionClicked("reboot".into()));
    let command = CommandSummary {
        id: 42,
        message: "Rebooting 1 server".into(),
    };

    let (state, effects) = update(
        state,
        Msg::ActionConfirmed {
            command: Some(command.clone()),
        },
    );

    assert_eq!(effects, vec![Effect::OpenCommand { command }]);
    assert!(!state.editable());
    assert_eq!(state.pending_action(), None);

    let (_, effects) = update(state, Msg::ActionConfirmed { command: None });
    assert!(effects.is_empty());
}

#[test]
fn override_opens_onboarding_step() {
    init_logging();
    let cases = [
        ("oss2", LifecycleStep::Add),
        ("oss3", LifecycleStep::SelectProfile),
    ];
    for (fqdn, step) in cases {
        let (_, effects) = update(
            fleet(),
            Msg::OverrideActionClicked {
                host: fqdn.into(),
                action: "deploy_agent".into(),
            },
        );
        assert_eq!(
            effects,
            vec![Effect::OpenOnboarding {
                host: fqdn.into(),
                step,
            }]
        );
    }
}

#[test]
fn override_falls_back_for_removal_and_managed_hosts() {
    init_logging();
    for (fqdn, action) in [("oss2", "force_remove"), ("oss2", "remove"), ("oss1", "deploy_agent")] {
        let (_, effects) = update(
            fleet(),
            Msg::OverrideActionClicked {
                host: fqdn.into(),
                action: action.into(),
            },
        );
        assert_eq!(
            effects,
            vec![Effect::DispatchFallback {
                host: fqdn.into(),
                action: action.into(),
            }]
        );
    }
}

#[test]
fn override_for_vanished_host_is_ignored() {
    init_logging();
    let (_, effects) = update(
        fleet(),
        Msg::OverrideActionClicked {
            host: "oss9".into(),
            action: "deploy_agent".into(),
        },
    );
    assert!(effects.is_empty());
}
