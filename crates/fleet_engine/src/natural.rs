//! Natural ("numeric aware") string ordering.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Compares two strings, treating runs of ASCII digits as numbers.
///
/// Digit runs with equal numeric value fall back to their text, so `"02"`
/// and `"2"` still compare unequal and the order stays total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks { rest: a };
    let mut right = Chunks { rest: b };

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ordering = compare_chunks(l, r);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

/// Stable in-place sort of `items` by the natural order of `key`.
pub fn natural_sort_by_key<T, F>(items: &mut [T], key: F, direction: SortDirection)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| direction.apply(natural_cmp(key(a), key(b))));
}

pub fn natural_sorted(mut names: Vec<String>, direction: SortDirection) -> Vec<String> {
    natural_sort_by_key(&mut names, String::as_str, direction);
    names
}

#[derive(Clone, Copy)]
struct Chunk<'a> {
    text: &'a str,
    numeric: bool,
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let numeric = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, ch)| ch.is_ascii_digit() != numeric)
            .map_or(self.rest.len(), |(idx, _)| idx);
        let (text, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(Chunk { text, numeric })
    }
}

fn compare_chunks(left: Chunk<'_>, right: Chunk<'_>) -> Ordering {
    if left.numeric && right.numeric {
        compare_digits(left.text, right.text).then_with(|| left.text.cmp(right.text))
    } else {
        left.text.cmp(right.text)
    }
}

/// Numeric comparison of two digit runs of any length.
fn compare_digits(left: &str, right: &str) -> Ordering {
    let left = left.trim_start_matches('0');
    let right = right.trim_start_matches('0');
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_runs_compare_numerically() {
        assert_eq!(natural_cmp("node2", "node10"), Ordering::Less);
        assert_eq!(natural_cmp("node10", "node9"), Ordering::Greater);
        assert_eq!(natural_cmp("a99999999999999999999999", "a100000000000000000000000"), Ordering::Less);
    }

    #[test]
    fn equal_values_tie_break_on_text() {
        assert_eq!(natural_cmp("node02", "node2"), Ordering::Less);
        assert_eq!(natural_cmp("node2", "node02"), Ordering::Greater);
        assert_eq!(natural_cmp("node02", "node02"), Ordering::Equal);
    }

    #[test]
    fn shorter_token_sequence_sorts_first() {
        assert_eq!(natural_cmp("node", "node1"), Ordering::Less);
        assert_eq!(natural_cmp("", "a"), Ordering::Less);
    }
}
