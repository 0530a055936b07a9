use fleet_engine::{resolve_override, Override};
use fleet_logging::{fleet_debug, fleet_error, fleet_info, fleet_warn, SESSION_TARGET};

use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::HostsReceived(hosts) => {
            let count = hosts.len();
            let added = state.replace_hosts(hosts);
            fleet_debug!(
                target: SESSION_TARGET,
                "host snapshot replaced: {} hosts, {} new",
                count,
                added
            );
            state.mark_dirty();
            Vec::new()
        }
        Msg::PushFailed(message) => {
            fleet_error!(target: SESSION_TARGET, "host push failed: {}", message);
            state.set_push_error(message.clone());
            state.mark_dirty();
            vec![Effect::ReportFault { message }]
        }
        Msg::ExpressionChanged(expression) => {
            if expression == state.expression() && state.parse_error().is_none() {
                return (state, Vec::new());
            }
            if let Err(err) = state.apply_expression(expression) {
                // Filter stays inactive until the expression is fixed.
                fleet_info!(target: SESSION_TARGET, "ignoring hostlist filter: {}", err);
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::FuzzyToggled(fuzzy) => {
            if fuzzy != state.fuzzy() {
                state.set_fuzzy(fuzzy);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SortToggled => {
            state.reverse_sort();
            state.mark_dirty();
            Vec::new()
        }
        Msg::PageSelected(page) => {
            state.set_page(page);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ItemsPerPageChanged(items_per_page) => {
            if items_per_page == 0 {
                fleet_warn!(target: SESSION_TARGET, "ignoring zero items per page");
                return (state, Vec::new());
            }
            state.set_items_per_page(items_per_page);
            state.mark_dirty();
            Vec::new()
        }
        Msg::HostToggled(identity) => {
            state.toggle_host(&identity);
            state.mark_dirty();
            Vec::new()
        }
        Msg::SelectionToggled(toggle) => {
            state.toggle_filtered(toggle);
            state.mark_dirty();
            Vec::new()
        }
        Msg::EditActionSelected(value) => {
            if let Err(err) = state.catalog().lookup(&value).map(|_| ()) {
                return (state, vec![fault(err)]);
            }
            state.set_edit_name(Some(value));
            state.mark_dirty();
            Vec::new()
        }
        Msg::EditCancelled => {
            state.set_edit_name(None);
            state.set_pending_action(None);
            state.mark_dirty();
            Vec::new()
        }
        Msg::RunActionClicked(value) => {
            let confirm = state.catalog().lookup(&value).and_then(|action| {
                let hosts = state
                    .eligible_hosts(&value)?
                    .into_iter()
                    .map(|host| host.identity().to_string())
                    .collect::<Vec<_>>();
                Ok(Effect::ConfirmAction {
                    action: action.value.clone(),
                    verb: action.verb.clone(),
                    hosts,
                })
            });
            match confirm {
                Ok(effect) => {
                    state.set_pending_action(Some(value));
                    vec![effect]
                }
                Err(err) => vec![fault(err)],
            }
        }
        Msg::ActionConfirmed { command } => {
            state.set_edit_name(None);
            state.set_pending_action(None);
            state.mark_dirty();
            command
                .map(|command| vec![Effect::OpenCommand { command }])
                .unwrap_or_default()
        }
        Msg::OverrideActionClicked { host, action } => {
            let Some(record) = state.find_host(&host) else {
                // Host can disappear between render and click via the live push.
                fleet_warn!(target: SESSION_TARGET, "override for unknown host {}", host);
                return (state, Vec::new());
            };
            match state.catalog().lookup(&action) {
                Ok(descriptor) => match resolve_override(record, descriptor) {
                    Override::Onboard(step) => vec![Effect::OpenOnboarding { host, step }],
                    Override::Fallback => vec![Effect::DispatchFallback { host, action }],
                },
                Err(err) => vec![fault(err)],
            }
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn fault(err: impl std::fmt::Display) -> Effect {
    fleet_error!(target: SESSION_TARGET, "{}", err);
    Effect::ReportFault {
        message: err.to_string(),
    }
}
