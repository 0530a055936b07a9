use fleet_core::{AppViewModel, HostRowView};

/// Renders the host table for a terminal, one line per entry.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    let mode = if view.fuzzy { "fuzzy" } else { "exact" };
    match &view.parse_error {
        Some(err) => {
            lines.push(format!("filter: {} ({mode}) [inactive]", view.expression));
            lines.push(format!("  {err}"));
        }
        None if view.expression.trim().is_empty() => {
            lines.push(format!("filter: none ({mode})"));
        }
        None => lines.push(format!(
            "filter: {} ({mode}, {} hostname(s))",
            view.expression, view.hostname_count
        )),
    }

    let width = view
        .rows
        .iter()
        .map(|row| row.fqdn.len())
        .max()
        .unwrap_or(0)
        .max("FQDN".len());
    lines.push(format!("    {:<width$}  {:<20}  STATE", "FQDN", "ADDRESS"));
    lines.extend(view.rows.iter().map(|row| render_row(row, width)));

    lines.push(format!(
        "page {}/{} | {} host(s) | {} selected",
        view.current_page,
        view.page_count,
        format_with_commas(view.total_items as u64),
        view.selected_count
    ));
    if let Some(err) = &view.push_error {
        lines.push(format!("live updates: {err}"));
    }
    lines
}

fn render_row(row: &HostRowView, width: usize) -> String {
    let mark = match (row.selected, row.disabled) {
        (_, true) => "[-]",
        (true, false) => "[x]",
        (false, false) => "[ ]",
    };
    format!("{mark} {:<width$}  {:<20}  {}", row.fqdn, row.address, row.state)
}

fn format_with_commas(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fqdn: &str, selected: bool) -> HostRowView {
        HostRowView {
            id: 1,
            fqdn: fqdn.to_string(),
            address: fqdn.to_string(),
            state: "managed".to_string(),
            selected,
            disabled: false,
        }
    }

    #[test]
    fn renders_rows_and_footer() {
        let view = AppViewModel {
            expression: "oss[1-2]".to_string(),
            hostname_count: 2,
            total_items: 2,
            current_page: 1,
            page_count: 1,
            rows: vec![row("oss1", true), row("oss2", false)],
            selected_count: 1,
            ..AppViewModel::default()
        };

        let lines = render(&view);
        assert_eq!(lines[0], "filter: oss[1-2] (exact, 2 hostname(s))");
        assert!(lines[2].starts_with("[x] oss1"));
        assert!(lines[3].starts_with("[ ] oss2"));
        assert_eq!(lines[4], "page 1/1 | 2 host(s) | 1 selected");
    }

    #[test]
    fn parse_error_marks_filter_inactive() {
        let view = AppViewModel {
            expression: "oss[5-2]".to_string(),
            parse_error: Some("range 5-2 is descending".to_string()),
            ..AppViewModel::default()
        };
        let lines = render(&view);
        assert_eq!(lines[0], "filter: oss[5-2] (exact) [inactive]");
    }

    #[test]
    fn large_counts_get_separators() {
        assert_eq!(format_with_commas(1234567), "1,234,567");
        assert_eq!(format_with_commas(999), "999");
    }
}
