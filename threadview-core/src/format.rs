use once_cell::sync::Lazy;
use regex::Regex;

use crate::table::{self, Table};

// Heading text stays on the marker's line and never includes a CRLF `\r`.
static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^###[ \t]+([^\r\n]+?)\r?$").expect("valid regex"));
// Emphasis content must start with a non-marker, so `****` and `***` stay literal.
static BOLD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*].*?)\*\*").expect("valid regex"));
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+?)\*").expect("valid regex"));
static INLINE_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").expect("valid regex"));
// Escaping runs first, so every `<code>` tag in the intermediate string is ours.
static CODE_SPAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<code>.*?</code>").expect("valid regex"));
static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\]]+)\]\((https?://[^)]+)\)").expect("valid regex")
});

const LINE_BREAK: &str = "<br>";
const LIST_ITEM_PREFIX: &str = "- ";

/// One rewrite over the intermediate HTML string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Headings,
    LineBreaks,
    Bold,
    Italic,
    InlineCode,
    ListItems,
    Links,
}

/// Stages in application order. Each stage sees the output of the previous
/// one, so bold must precede italic and line breaks must precede list items.
pub const PIPELINE: [Stage; 7] = [
    Stage::Headings,
    Stage::LineBreaks,
    Stage::Bold,
    Stage::Italic,
    Stage::InlineCode,
    Stage::ListItems,
    Stage::Links,
];

impl Stage {
    pub fn apply(self, input: &str) -> String {
        match self {
            Self::Headings => HEADING_RE.replace_all(input, "<h3>${1}</h3>").into_owned(),
            Self::LineBreaks => input.replace('\n', LINE_BREAK),
            Self::Bold => BOLD_RE.replace_all(input, "<b>${1}</b>").into_owned(),
            Self::Italic => ITALIC_RE.replace_all(input, "<i>${1}</i>").into_owned(),
            Self::InlineCode => INLINE_CODE_RE
                .replace_all(input, "<code>${1}</code>")
                .into_owned(),
            Self::ListItems => wrap_list_items(input),
            Self::Links => map_outside_code(input, |text| {
                LINK_RE
                    .replace_all(
                        text,
                        r#"<a href="${2}" target="_blank" rel="noopener noreferrer">${1}</a>"#,
                    )
                    .into_owned()
            }),
        }
    }
}

/// Formats one message text into an HTML fragment.
///
/// Table-shaped text only goes through the table transform. Everything else
/// is escaped and then run through [`PIPELINE`].
pub fn format_content(text: &str) -> String {
    if table::looks_like_table(text) {
        return match Table::parse(text) {
            Some(table) => table.to_html(),
            None => escape_html(text),
        };
    }

    PIPELINE
        .iter()
        .fold(escape_html(text), |formatted, stage| stage.apply(&formatted))
}

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// Lines are `<br>`-delimited by now, except for breaks inside a code span.
// Every item gets its own list; runs of items are not merged.
fn wrap_list_items(input: &str) -> String {
    let code_spans = CODE_SPAN_RE
        .find_iter(input)
        .map(|span| span.range())
        .collect::<Vec<_>>();

    let mut output = String::with_capacity(input.len());
    let mut line_start = 0;
    for (idx, _) in input.match_indices(LINE_BREAK) {
        if code_spans.iter().any(|span| span.contains(&idx)) {
            continue;
        }
        push_list_line(&mut output, &input[line_start..idx]);
        output.push_str(LINE_BREAK);
        line_start = idx + LINE_BREAK.len();
    }
    push_list_line(&mut output, &input[line_start..]);
    output
}

fn push_list_line(output: &mut String, line: &str) {
    match line.strip_prefix(LIST_ITEM_PREFIX) {
        Some(item) if !item.is_empty() => {
            output.push_str("<ul><li>");
            output.push_str(item);
            output.push_str("</li></ul>");
        }
        _ => output.push_str(line),
    }
}

/// Applies `rewrite` to the text between `<code>` spans and copies the spans
/// through untouched.
fn map_outside_code(input: &str, rewrite: impl Fn(&str) -> String) -> String {
    let mut output = String::with_capacity(input.len());
    let mut last = 0;
    for span in CODE_SPAN_RE.find_iter(input) {
        output.push_str(&rewrite(&input[last..span.start()]));
        output.push_str(span.as_str());
        last = span.end();
    }
    output.push_str(&rewrite(&input[last..]));
    output
}
