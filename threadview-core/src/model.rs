use serde::Serialize;

/// Role given to messages whose export carries no `author.role`.
pub const UNKNOWN_ROLE: &str = "unknown";

/// Role selected by the user-only toggle.
pub const USER_ROLE: &str = "user";

/// An exported archive: threads in export order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Archive {
    pub threads: Vec<Thread>,
}

impl Archive {
    pub fn new(threads: Vec<Thread>) -> Self {
        Self { threads }
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }
}

/// One conversation. `nodes` keeps the key order of the exported `mapping`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Thread {
    pub title: String,
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub message: Option<Message>,
}

impl Node {
    /// The message and its joined text, when the node can be rendered at all.
    pub fn renderable(&self) -> Option<(&Message, String)> {
        let message = self.message.as_ref()?;
        let text = message.text()?;
        Some((message, text))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: String,
    /// `None` when `content` or `content.parts` was missing or not an array.
    pub parts: Option<Vec<String>>,
}

impl Message {
    pub fn text(&self) -> Option<String> {
        self.parts.as_ref().map(|parts| parts.join("\n"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedLine {
    pub role: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderUnit {
    pub thread_index: usize,
    pub title: String,
    pub lines: Vec<RenderedLine>,
}

/// Output of one `render_window` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderWindow {
    pub start_index: usize,
    pub next_index: usize,
    pub total: usize,
    pub units: Vec<RenderUnit>,
}

impl RenderWindow {
    pub fn is_exhausted(&self) -> bool {
        self.next_index >= self.total
    }

    pub fn line_count(&self) -> usize {
        self.units.iter().map(|unit| unit.lines.len()).sum()
    }
}
