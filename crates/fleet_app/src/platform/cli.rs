use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "fleetsel")]
#[command(about = "Select and act on hosts with hostlist expressions.")]
pub struct CommandLine {
    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write logs to ./fleetsel.log
    #[arg(long, global = true)]
    pub log_file: bool,

    /// Directory holding the preferences file
    #[arg(long, global = true, default_value = ".")]
    pub prefs_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Expand a hostlist expression
    #[command(alias = "x")]
    Expand {
        expression: String,
        /// Output order of the expanded hostnames
        #[arg(long, value_enum, default_value_t = ExpandOrder::Expression)]
        order: ExpandOrder,
    },
    /// Show one page of the filtered host table
    #[command(alias = "l")]
    List {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        per_page: Option<usize>,
        /// Remember expression, fuzzy flag and page size for next time
        #[arg(long)]
        save: bool,
    },
    /// Resolve which selected hosts a bulk action would reach
    #[command(alias = "e")]
    Eligible {
        #[command(flatten)]
        filter: FilterArgs,
        /// Action value, see `fleetsel actions`
        #[arg(long)]
        action: String,
        /// Select a host by fqdn (repeatable)
        #[arg(long = "select")]
        selected: Vec<String>,
        /// Select every filtered host
        #[arg(long)]
        select_all: bool,
        /// Dispatch the action instead of only showing the confirmation
        #[arg(long)]
        confirm: bool,
    },
    /// Resolve the onboarding step a row action opens for one host
    #[command(alias = "s")]
    Step {
        #[arg(long)]
        hosts: PathBuf,
        /// Host fqdn
        #[arg(long)]
        host: String,
        #[arg(long)]
        action: String,
    },
    /// List the available bulk actions
    #[command(alias = "a")]
    Actions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExpandOrder {
    /// Order in which the expression generated them
    Expression,
    /// Natural ascending
    Asc,
    /// Natural descending
    Desc,
}

#[derive(Args)]
pub struct FilterArgs {
    /// JSON host snapshot, either `{"objects": [...]}` or a bare array
    #[arg(long)]
    pub hosts: PathBuf,
    /// Hostlist expression, e.g. "oss[01-04,07],mds1"
    #[arg(long)]
    pub expr: Option<String>,
    /// Substring matching instead of exact hostnames
    #[arg(long)]
    pub fuzzy: bool,
    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_order(args: &[&str]) -> ExpandOrder {
        let cli = CommandLine::try_parse_from(args.iter().copied()).expect("valid command line");
        match cli.command {
            Commands::Expand { order, .. } => order,
            _ => panic!("expected expand"),
        }
    }

    #[test]
    fn expand_order_defaults_to_expression_order() {
        assert_eq!(expand_order(&["fleetsel", "expand", "n[1-2]"]), ExpandOrder::Expression);
    }

    #[test]
    fn expand_order_accepts_both_natural_directions() {
        assert_eq!(
            expand_order(&["fleetsel", "expand", "n1", "--order", "asc"]),
            ExpandOrder::Asc
        );
        assert_eq!(
            expand_order(&["fleetsel", "x", "n1", "--order", "desc"]),
            ExpandOrder::Desc
        );
        assert!(CommandLine::try_parse_from(["fleetsel", "expand", "n1", "--order", "up"]).is_err());
    }
}
