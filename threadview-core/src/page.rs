use crate::format::escape_html;
use crate::model::{RenderUnit, RenderWindow, UNKNOWN_ROLE};

pub const NO_MESSAGES_PLACEHOLDER: &str = "<p>No messages to display.</p>";
const NO_THREADS_IN_RANGE: &str = "<p class=\"progress\">No threads in this range.</p>";

const STYLESHEET: &str = r#"body { font-family: sans-serif; max-width: 60rem; margin: 2rem auto; line-height: 1.5; }
.thread { border-bottom: 1px solid #ddd; margin-bottom: 2rem; }
.message { padding: 0.5rem 0.75rem; margin: 0.5rem 0; border-radius: 4px; }
.message.user { background: #eef5ff; }
.message.assistant { background: #f5f5f5; }
.message.system, .message.tool { background: #fff8e6; }
table { border-collapse: collapse; }
th, td { border: 1px solid #ccc; padding: 0.25rem 0.5rem; }
code { background: #eee; padding: 0 0.2rem; }
.progress { color: #666; }"#;

/// HTML for one window: a block per visible thread, or the placeholder when
/// the window rendered no lines.
pub fn render_window_html(window: &RenderWindow) -> String {
    if window.units.is_empty() {
        return NO_MESSAGES_PLACEHOLDER.to_string();
    }

    window.units.iter().map(render_unit_html).collect()
}

pub fn render_unit_html(unit: &RenderUnit) -> String {
    let mut output = String::new();
    output.push_str("<div class=\"thread\">");
    output.push_str(&format!(
        "<h2>Thread {}: {}</h2>",
        unit.thread_index + 1,
        escape_html(&unit.title)
    ));

    for line in &unit.lines {
        output.push_str(&format!(
            "<div class=\"message {}\"><strong>{}:</strong> {}</div>",
            role_class(&line.role),
            escape_html(&line.role),
            line.html
        ));
    }

    output.push_str("</div>\n");
    output
}

/// A standalone page for windows rendered in sequence.
pub fn render_document(title: &str, windows: &[RenderWindow]) -> String {
    let body = if windows.iter().all(|window| window.units.is_empty()) {
        NO_MESSAGES_PLACEHOLDER.to_string()
    } else {
        windows
            .iter()
            .filter(|window| !window.units.is_empty())
            .map(render_window_html)
            .collect::<String>()
    };

    let escaped_title = escape_html(title);
    let progress = render_progress(windows);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>{escaped_title}</title>
  <style>
{STYLESHEET}
  </style>
</head>
<body>
<h1>{escaped_title}</h1>
<div id="conversation">
{body}
</div>
{progress}
</body>
</html>
"#
    )
}

fn render_progress(windows: &[RenderWindow]) -> String {
    let (Some(first), Some(last)) = (windows.first(), windows.last()) else {
        return NO_THREADS_IN_RANGE.to_string();
    };
    if last.next_index <= first.start_index {
        return NO_THREADS_IN_RANGE.to_string();
    }

    let mut output = format!(
        "<p class=\"progress\">Threads {}–{} of {}.",
        first.start_index + 1,
        last.next_index,
        last.total
    );
    if !last.is_exhausted() {
        output.push_str(&format!(" Next start index: {}.", last.next_index));
    }
    output.push_str("</p>");
    output
}

// Roles are free-form; keep the class attribute to a single safe token.
fn role_class(role: &str) -> String {
    let class = role
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '-'
            }
        })
        .collect::<String>();

    if class.is_empty() {
        UNKNOWN_ROLE.to_string()
    } else {
        class
    }
}
