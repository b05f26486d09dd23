#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Narrowest a column is squeezed to when fitting the terminal.
const MIN_COLUMN_WIDTH: usize = 6;

/// Render an aligned table. Widths count characters, so accented symptom
/// names line up.
#[must_use]
pub fn render_rows(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate_text(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");

    let divider = "-".repeat(header_line.chars().count());

    let row_lines = rows.iter().map(|row| {
        widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let truncated = truncate_text(value, *width);
                let padded = pad(&truncated, *width, looks_numeric(&truncated));
                if options.color {
                    colorize(&truncated, &padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    });

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line.trim_end().to_string());
    lines.push(divider);
    lines.extend(row_lines);
    lines.join("\n")
}

fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let separators = widths.len().saturating_sub(1) * 2;
    let mut total = widths.iter().sum::<usize>() + separators;

    while total > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > headers[*idx].chars().count().max(MIN_COLUMN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);

        let Some(idx) = widest else {
            break;
        };
        widths[idx] -= 1;
        total -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.'))
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

/// Color decision and status words. Padding stays outside the escape codes.
fn colorize(value: &str, padded: &str) -> String {
    let code = match value.to_ascii_lowercase().as_str() {
        "admit" | "failed" | "false" => "31",
        "discharge_with_medication" | "retrained" | "true" => "32",
        "not_ready" | "disabled" => "33",
        _ => return padded.to_string(),
    };
    padded.replacen(value, &format!("\u{1b}[{code}m{value}\u{1b}[0m"), 1)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn columns_align_on_characters() {
        let rows = vec![
            vec!["vômito".to_string(), "85".to_string()],
            vec!["tosse".to_string(), "15".to_string()],
        ];
        let table = render_rows(&["symptom", "risk"], &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "symptom  risk");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "vômito     85");
        assert_eq!(lines[3], "tosse      15");
    }

    #[test]
    fn long_cells_are_truncated_to_fit() {
        let rows = vec![vec![
            "a very long anamnesis that will not fit".to_string(),
            "admit".to_string(),
        ]];
        let options = TableOptions {
            max_width: Some(20),
            color: false,
        };
        let table = render_rows(&["anamnesis", "decision"], &rows, options);
        assert!(table.lines().nth(2).is_some_and(|line| line.contains('…')));
    }

    #[test]
    fn color_wraps_decision_words_only() {
        let colored = colorize("admit", "admit   ");
        assert!(colored.starts_with("\u{1b}[31madmit\u{1b}[0m"));
        assert!(colored.ends_with("   "));
        assert_eq!(colorize("febre", "febre "), "febre ");
    }
}
