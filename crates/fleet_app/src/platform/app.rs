use std::collections::VecDeque;
use std::path::Path;

use anyhow::{bail, Context};
use fleet_core::{update, AppState, Msg, SessionSettings, DEFAULT_ITEMS_PER_PAGE};
use fleet_engine::{natural_sorted, parse, ActionCatalog, SortDirection, ToggleType};
use fleet_logging::fleet_debug;

use super::cli::{CommandLine, Commands, ExpandOrder, FilterArgs};
use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::persistence::{self, Preferences};
use super::snapshot;
use super::ui;

pub fn run_app() -> anyhow::Result<()> {
    let cli = CommandLine::parse_args();

    let destination = if cli.log_file {
        LogDestination::Both
    } else {
        LogDestination::Terminal
    };
    logging::initialize(destination, cli.verbose);

    match cli.command {
        Commands::Expand { expression, order } => expand(&expression, order),
        Commands::List {
            filter,
            page,
            per_page,
            save,
        } => list(&cli.prefs_dir, &filter, page, per_page, save),
        Commands::Eligible {
            filter,
            action,
            selected,
            select_all,
            confirm,
        } => eligible(&cli.prefs_dir, &filter, &action, &selected, select_all, confirm),
        Commands::Step {
            hosts,
            host,
            action,
        } => step(&hosts, host, action),
        Commands::Actions => {
            for action in &ActionCatalog::server_actions() {
                println!(
                    "{:<30} {:<30} {}",
                    action.value,
                    action.verb,
                    action.state.as_deref().unwrap_or("-")
                );
            }
            Ok(())
        }
    }
}

/// Owns the session state and feeds effect replies back into `update`.
struct Session {
    state: AppState,
    runner: EffectRunner,
}

impl Session {
    fn new(settings: SessionSettings, runner: EffectRunner) -> Self {
        Self {
            state: AppState::with_settings(settings),
            runner,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            fleet_debug!("dispatch {:?}", msg);
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            inbox.extend(self.runner.run(effects));
        }
    }

    fn fail_on_faults(&self) -> anyhow::Result<()> {
        match self.runner.faults() {
            [] => Ok(()),
            faults => bail!(faults.join("; ")),
        }
    }
}

fn expand(expression: &str, order: ExpandOrder) -> anyhow::Result<()> {
    for hostname in expanded_hostnames(expression, order)? {
        println!("{hostname}");
    }
    Ok(())
}

fn expanded_hostnames(expression: &str, order: ExpandOrder) -> anyhow::Result<Vec<String>> {
    let set = parse(expression).with_context(|| format!("cannot expand {expression:?}"))?;
    let hostnames = set.hostnames().to_vec();
    Ok(match order {
        ExpandOrder::Expression => hostnames,
        ExpandOrder::Asc => natural_sorted(hostnames, SortDirection::Ascending),
        ExpandOrder::Desc => natural_sorted(hostnames, SortDirection::Descending),
    })
}

/// Builds a session over the snapshot with the filter from the command line,
/// falling back to saved preferences.
fn filtered_session(
    prefs: &Preferences,
    filter: &FilterArgs,
    per_page: Option<usize>,
    runner: EffectRunner,
) -> anyhow::Result<Session> {
    let hosts = snapshot::load_hosts(&filter.hosts)?;

    let settings = SessionSettings {
        items_per_page: per_page
            .or(prefs.items_per_page)
            .unwrap_or(DEFAULT_ITEMS_PER_PAGE),
        fuzzy: filter.fuzzy || prefs.fuzzy,
        direction: if filter.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
        ..SessionSettings::default()
    };

    let mut session = Session::new(settings, runner);
    session.dispatch(Msg::HostsReceived(hosts));
    let expression = filter
        .expr
        .clone()
        .unwrap_or_else(|| prefs.expression.clone());
    session.dispatch(Msg::ExpressionChanged(expression));
    Ok(session)
}

fn list(
    prefs_dir: &Path,
    filter: &FilterArgs,
    page: usize,
    per_page: Option<usize>,
    save: bool,
) -> anyhow::Result<()> {
    let prefs = persistence::load_preferences(prefs_dir);
    let mut session = filtered_session(&prefs, filter, per_page, EffectRunner::new(false))?;
    session.dispatch(Msg::PageSelected(page));

    for line in ui::render::render(&session.state.view()) {
        println!("{line}");
    }

    if save {
        persistence::save_preferences(
            prefs_dir,
            &Preferences {
                expression: session.state.expression().to_string(),
                fuzzy: session.state.fuzzy(),
                items_per_page: Some(session.state.items_per_page()),
            },
        );
    }
    Ok(())
}

fn eligible(
    prefs_dir: &Path,
    filter: &FilterArgs,
    action: &str,
    selected: &[String],
    select_all: bool,
    confirm: bool,
) -> anyhow::Result<()> {
    let prefs = persistence::load_preferences(prefs_dir);
    let mut session = filtered_session(&prefs, filter, None, EffectRunner::new(confirm))?;

    if select_all {
        session.dispatch(Msg::SelectionToggled(ToggleType::All));
    }
    for identity in selected {
        if !session.state.selection().is_selected(identity) {
            session.dispatch(Msg::HostToggled(identity.clone()));
        }
    }

    session.dispatch(Msg::RunActionClicked(action.to_string()));
    session.fail_on_faults()
}

fn step(hosts_path: &Path, host: String, action: String) -> anyhow::Result<()> {
    let hosts = snapshot::load_hosts(hosts_path)?;
    let mut session = Session::new(SessionSettings::default(), EffectRunner::new(true));
    session.dispatch(Msg::HostsReceived(hosts));

    if session.state.find_host(&host).is_none() {
        bail!("no host with fqdn {host:?} in {hosts_path:?}");
    }
    session.dispatch(Msg::OverrideActionClicked { host, action });
    session.fail_on_faults()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn expand_orders_hostnames_as_requested() {
        let expression = "n10,n9,n[1-2]";
        assert_eq!(
            expanded_hostnames(expression, ExpandOrder::Expression).expect("valid"),
            vec!["n10", "n9", "n1", "n2"]
        );
        assert_eq!(
            expanded_hostnames(expression, ExpandOrder::Asc).expect("valid"),
            vec!["n1", "n2", "n9", "n10"]
        );
        assert_eq!(
            expanded_hostnames(expression, ExpandOrder::Desc).expect("valid"),
            vec!["n10", "n9", "n2", "n1"]
        );
    }

    #[test]
    fn expand_reports_malformed_expression() {
        assert!(expanded_hostnames("n[3-1]", ExpandOrder::Asc).is_err());
    }
}
