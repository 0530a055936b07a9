use fleet_logging::{fleet_trace, ENGINE_TARGET};

use crate::hostlist::HostnameSet;
use crate::natural::{natural_sort_by_key, SortDirection};
use crate::types::HostRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Byte-wise equality against the hostname index.
    #[default]
    Exact,
    /// Case-insensitive substring containment of any hostname in the key.
    Fuzzy,
}

impl MatchMode {
    pub fn from_fuzzy(fuzzy: bool) -> Self {
        if fuzzy {
            MatchMode::Fuzzy
        } else {
            MatchMode::Exact
        }
    }
}

enum Matcher<'s> {
    All,
    Exact(&'s HostnameSet),
    Fuzzy(Vec<String>),
}

impl<'s> Matcher<'s> {
    fn new(set: &'s HostnameSet, mode: MatchMode) -> Self {
        if set.is_empty() {
            return Matcher::All;
        }
        match mode {
            MatchMode::Exact => Matcher::Exact(set),
            MatchMode::Fuzzy => Matcher::Fuzzy(set.iter().map(|name| name.to_lowercase()).collect()),
        }
    }

    fn matches(&self, key: &str) -> bool {
        match self {
            Matcher::All => true,
            Matcher::Exact(set) => set.contains(key),
            Matcher::Fuzzy(needles) => {
                let key = key.to_lowercase();
                needles.iter().any(|needle| key.contains(needle.as_str()))
            }
        }
    }
}

/// Keeps the items whose key matches `set`, naturally sorted by that key.
///
/// An empty set means no filter is active and every item passes.
pub fn filter_by_key<'a, T, F>(
    items: &'a [T],
    set: &HostnameSet,
    key: F,
    mode: MatchMode,
    direction: SortDirection,
) -> Vec<&'a T>
where
    F: Fn(&T) -> &str,
{
    let matcher = Matcher::new(set, mode);
    let mut matched: Vec<&'a T> = items.iter().filter(|item| matcher.matches(key(*item))).collect();
    natural_sort_by_key(&mut matched, |item| key(*item), direction);

    fleet_trace!(
        target: ENGINE_TARGET,
        "{:?} filter kept {} of {} items",
        mode,
        matched.len(),
        items.len()
    );
    matched
}

pub fn filter_hosts<'a>(
    hosts: &'a [HostRecord],
    set: &HostnameSet,
    mode: MatchMode,
    direction: SortDirection,
) -> Vec<&'a HostRecord> {
    filter_by_key(hosts, set, HostRecord::match_key, mode, direction)
}

/// Number of items the filter would return, without sorting.
pub fn total_by_key<T, F>(items: &[T], set: &HostnameSet, key: F, mode: MatchMode) -> usize
where
    F: Fn(&T) -> &str,
{
    if set.is_empty() {
        return items.len();
    }
    let matcher = Matcher::new(set, mode);
    items.iter().filter(|item| matcher.matches(key(*item))).count()
}

pub fn total_items(hosts: &[HostRecord], set: &HostnameSet, mode: MatchMode) -> usize {
    total_by_key(hosts, set, HostRecord::match_key, mode)
}
