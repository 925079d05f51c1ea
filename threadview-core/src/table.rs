use crate::format::escape_html;

/// A pipe table parsed from message text, independent of how it is displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A block is treated as a table when a line starts with `|` and a `---`
/// appears anywhere in it.
pub fn looks_like_table(text: &str) -> bool {
    text.contains("\n|") && text.contains("---")
}

impl Table {
    /// Line 0 is the header and line 1 the separator, which is skipped
    /// whatever it contains. Returns `None` for fewer than two lines.
    pub fn parse(text: &str) -> Option<Self> {
        let lines = text.trim().split('\n').collect::<Vec<_>>();
        if lines.len() < 2 {
            return None;
        }

        let headers = split_row(lines[0]);
        let rows = lines[2..].iter().map(|line| split_row(line)).collect();

        Some(Self { headers, rows })
    }

    pub fn to_html(&self) -> String {
        let mut output = String::from("<table>");

        output.push_str("<tr>");
        for header in &self.headers {
            output.push_str(&format!("<th>{}</th>", escape_html(header)));
        }
        output.push_str("</tr>");

        for row in &self.rows {
            output.push_str("<tr>");
            for cell in row {
                output.push_str(&format!("<td>{}</td>", escape_html(cell)));
            }
            output.push_str("</tr>");
        }

        output.push_str("</table>");
        output
    }
}

// The segments before the first and after the last pipe are dropped.
fn split_row(line: &str) -> Vec<String> {
    let segments = line.split('|').collect::<Vec<_>>();
    if segments.len() < 2 {
        return Vec::new();
    }

    segments[1..segments.len() - 1]
        .iter()
        .map(|segment| segment.trim().to_string())
        .collect()
}
