//! Hostlist expression parser.
//!
//! Grammar, informally:
//!
//! ```text
//! expression := term ("," term)*
//! term       := ["-"] segment+
//! segment    := literal | "[" item ("," item)* "]"
//! item       := number | number "-" number
//! ```
//!
//! Terms are applied left to right. A term prefixed with `-` removes the
//! hostnames it expands to from whatever has been accumulated so far.

use std::collections::HashSet;

use fleet_logging::{fleet_debug, ENGINE_TARGET};
use thiserror::Error;

/// Upper bound on the number of hostnames a single expression may expand to.
pub const DEFAULT_MAX_HOSTS: usize = 100_000;

const NEGATION_MARKER: char = '-';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Byte offset into the expression and a human readable description.
    #[error("malformed hostlist expression at offset {0}: {1}")]
    Malformed(usize, String),
}

impl ParseError {
    fn malformed(position: usize, detail: impl Into<String>) -> Self {
        ParseError::Malformed(position, detail.into())
    }

    pub fn position(&self) -> usize {
        match self {
            ParseError::Malformed(position, _) => *position,
        }
    }
}

/// Ordered, deduplicated hostnames plus a presence index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostnameSet {
    hostnames: Vec<String>,
    index: HashSet<String>,
}

impl HostnameSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hostnames(&self) -> &[String] {
        &self.hostnames
    }

    pub fn contains(&self, hostname: &str) -> bool {
        self.index.contains(hostname)
    }

    pub fn len(&self) -> usize {
        self.hostnames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hostnames.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.hostnames.iter()
    }

    fn insert(&mut self, hostname: String) {
        if self.index.insert(hostname.clone()) {
            self.hostnames.push(hostname);
        }
    }

    fn remove_all(&mut self, hostnames: &[String]) {
        let mut removed = false;
        for hostname in hostnames {
            removed |= self.index.remove(hostname);
        }
        if removed {
            let index = &self.index;
            self.hostnames.retain(|hostname| index.contains(hostname));
        }
    }
}

impl<'a> IntoIterator for &'a HostnameSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Expands hostlist expressions, enforcing an expansion limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostlistParser {
    max_hosts: usize,
}

impl Default for HostlistParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HostlistParser {
    pub fn new() -> Self {
        Self::with_max_hosts(DEFAULT_MAX_HOSTS)
    }

    pub fn with_max_hosts(max_hosts: usize) -> Self {
        Self { max_hosts }
    }

    /// Parses `expression` into a [`HostnameSet`].
    ///
    /// An empty (or all-whitespace) expression yields an empty set, which
    /// callers treat as "no filter active".
    pub fn parse(&self, expression: &str) -> Result<HostnameSet, ParseError> {
        let mut set = HostnameSet::new();

        for (offset, raw) in split_terms(expression)? {
            let leading = raw.len() - raw.trim_start().len();
            let term = raw.trim();
            if term.is_empty() {
                continue;
            }

            let position = offset + leading;
            match term.strip_prefix(NEGATION_MARKER) {
                Some(rest) => {
                    let body = rest.trim_start();
                    let body_position = position + 1 + (rest.len() - body.len());
                    if body.is_empty() {
                        return Err(ParseError::malformed(
                            position,
                            "negation marker without a hostname",
                        ));
                    }
                    let hostnames = self.expand_term(body, body_position)?;
                    set.remove_all(&hostnames);
                }
                None => {
                    for hostname in self.expand_term(term, position)? {
                        set.insert(hostname);
                    }
                    if set.len() > self.max_hosts {
                        return Err(ParseError::malformed(
                            position,
                            format!("expression expands to more than {} hostnames", self.max_hosts),
                        ));
                    }
                }
            }
        }

        fleet_debug!(
            target: ENGINE_TARGET,
            "hostlist expression {:?} expanded to {} hostnames",
            expression,
            set.len()
        );
        Ok(set)
    }

    fn expand_term(&self, term: &str, position: usize) -> Result<Vec<String>, ParseError> {
        if term.starts_with(NEGATION_MARKER) || term.starts_with('.') {
            return Err(ParseError::malformed(
                position,
                format!("hostname cannot start with {:?}", &term[..1]),
            ));
        }

        let segments = segments(term, position)?;
        if let Some(Segment::Range { .. }) = segments.first() {
            return Err(ParseError::malformed(
                position,
                "range needs a hostname stem before it",
            ));
        }

        let mut expanded = vec![String::new()];
        for segment in segments {
            match segment {
                Segment::Literal(text) => {
                    for hostname in &mut expanded {
                        hostname.push_str(text);
                    }
                }
                Segment::Range {
                    body,
                    position: range_position,
                } => {
                    let range = parse_range(body, range_position, self.max_hosts)?;
                    let total = expanded.len().saturating_mul(range.values.len());
                    if total > self.max_hosts {
                        return Err(ParseError::malformed(
                            position,
                            format!("term expands to more than {} hostnames", self.max_hosts),
                        ));
                    }
                    let mut next = Vec::with_capacity(total);
                    for prefix in &expanded {
                        for value in &range.values {
                            next.push(format!("{prefix}{value:0width$}", width = range.width));
                        }
                    }
                    expanded = next;
                }
            }
        }
        Ok(expanded)
    }
}

/// Parses `expression` with the default expansion limit.
pub fn parse(expression: &str) -> Result<HostnameSet, ParseError> {
    HostlistParser::new().parse(expression)
}

/// Splits on commas outside brackets, returning each term with its byte offset.
fn split_terms(expression: &str) -> Result<Vec<(usize, &str)>, ParseError> {
    let mut terms = Vec::new();
    let mut open: Option<usize> = None;
    let mut start = 0;

    for (idx, ch) in expression.char_indices() {
        match ch {
            '[' => {
                if let Some(outer) = open {
                    return Err(ParseError::malformed(
                        idx,
                        format!("nested '[' inside bracket opened at offset {outer}"),
                    ));
                }
                open = Some(idx);
            }
            ']' => {
                if open.take().is_none() {
                    return Err(ParseError::malformed(idx, "unmatched ']'"));
                }
            }
            ',' if open.is_none() => {
                terms.push((start, &expression[start..idx]));
                start = idx + 1;
            }
            _ => {}
        }
    }

    if let Some(idx) = open {
        return Err(ParseError::malformed(idx, "unmatched '['"));
    }
    terms.push((start, &expression[start..]));
    Ok(terms)
}

enum Segment<'a> {
    Literal(&'a str),
    Range { body: &'a str, position: usize },
}

/// Breaks a term into literal runs and bracket bodies. Brackets are known to be balanced.
fn segments(term: &str, position: usize) -> Result<Vec<Segment<'_>>, ParseError> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut bracket_start: Option<usize> = None;

    for (idx, ch) in term.char_indices() {
        match (ch, bracket_start) {
            ('[', None) => {
                if idx > literal_start {
                    segments.push(Segment::Literal(&term[literal_start..idx]));
                }
                bracket_start = Some(idx + 1);
            }
            (']', Some(body_start)) => {
                segments.push(Segment::Range {
                    body: &term[body_start..idx],
                    position: position + body_start,
                });
                bracket_start = None;
                literal_start = idx + 1;
            }
            (_, Some(_)) => {}
            (ch, None) if is_hostname_char(ch) => {}
            (ch, None) => {
                return Err(ParseError::malformed(
                    position + idx,
                    format!("invalid hostname character {ch:?}"),
                ));
            }
        }
    }

    if literal_start < term.len() {
        segments.push(Segment::Literal(&term[literal_start..]));
    }
    Ok(segments)
}

fn is_hostname_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '.' | '_')
}

struct Range {
    values: Vec<u64>,
    width: usize,
}

/// Parses the inside of a bracket, e.g. `01-04,07`.
fn parse_range(body: &str, position: usize, max_hosts: usize) -> Result<Range, ParseError> {
    if body.trim().is_empty() {
        return Err(ParseError::malformed(position, "empty range"));
    }

    let mut values = Vec::new();
    let mut width = 0;
    let mut offset = 0;

    for item in body.split(',') {
        let item_position = position + offset + (item.len() - item.trim_start().len());
        offset += item.len() + 1;

        let item = item.trim();
        if item.is_empty() {
            return Err(ParseError::malformed(item_position, "empty range item"));
        }

        let (low_text, high_text) = match item.split_once('-') {
            Some((low, high)) => (low.trim(), high.trim()),
            None => (item, item),
        };
        let low = parse_number(low_text, item_position)?;
        let high = parse_number(high_text, item_position)?;
        if low > high {
            return Err(ParseError::malformed(
                item_position,
                format!("range {low_text}-{high_text} is descending"),
            ));
        }

        for literal in [low_text, high_text] {
            if literal.len() > 1 && literal.starts_with('0') {
                width = width.max(literal.len());
            }
        }

        let count = high - low;
        if count >= max_hosts as u64 || values.len() + count as usize >= max_hosts {
            return Err(ParseError::malformed(
                item_position,
                format!("range expands to more than {max_hosts} hostnames"),
            ));
        }
        values.extend(low..=high);
    }

    Ok(Range { values, width })
}

fn parse_number(text: &str, position: usize) -> Result<u64, ParseError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::malformed(
            position,
            format!("{text:?} is not a non-negative integer"),
        ));
    }
    text.parse()
        .map_err(|_| ParseError::malformed(position, format!("{text} is out of range")))
}
