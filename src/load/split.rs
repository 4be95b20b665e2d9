// src/load/split.rs

/// Split a CSV line on every comma followed by an even number of `"`.
///
/// Quotes are left in place. Trailing empty fields are dropped; an empty
/// line yields a single empty field.
pub fn split_line(line: &str) -> Vec<&str> {
    if line.is_empty() {
        return vec![line];
    }

    let total_quotes = line.bytes().filter(|&b| b == b'"').count();
    let mut fields = Vec::new();
    let mut start = 0;
    let mut quotes_seen = 0;

    for (i, b) in line.bytes().enumerate() {
        match b {
            b'"' => quotes_seen += 1,
            b',' if (total_quotes - quotes_seen) % 2 == 0 => {
                fields.push(&line[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    fields.push(&line[start..]);

    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// Header cell → row key: lower-case, spaces become underscores.
pub fn normalize_header(raw: &str) -> String {
    raw.to_lowercase().replace(' ', "_")
}

/// Drop every `$` from a cell, whatever the column.
pub fn clean_cell(raw: &str) -> String {
    raw.replace('$', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fields() {
        assert_eq!(split_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn quoted_comma_stays_in_one_field() {
        assert_eq!(
            split_line(r#"03/15/2017,"1,234",7"#),
            vec!["03/15/2017", r#""1,234""#, "7"]
        );
    }

    #[test]
    fn trailing_empty_fields_are_dropped() {
        assert_eq!(split_line("a,b,,"), vec!["a", "b"]);
        assert_eq!(split_line("a,,b"), vec!["a", "", "b"]);
        assert!(split_line(",,,").is_empty());
        assert_eq!(split_line(""), vec![""]);
    }

    #[test]
    fn unbalanced_quote_counts_quotes_to_the_right() {
        // only the last comma has an even number (zero) of quotes after it
        assert_eq!(split_line(r#"a,"b,c"#), vec![r#"a,"b"#, "c"]);
    }

    #[test]
    fn header_normalization() {
        assert_eq!(normalize_header("Page Views"), "page_views");
        assert_eq!(normalize_header("Amount Spent (USD)"), "amount_spent_(usd)");
    }

    #[test]
    fn dollar_stripping_is_idempotent() {
        assert_eq!(clean_cell("$1,200.50"), "1,200.50");
        assert_eq!(clean_cell("200"), "200");
        assert_eq!(clean_cell(&clean_cell("$$5")), clean_cell("$$5"));
    }
}
