use std::num::NonZeroUsize;

use tracing::debug;

use crate::error::{Result, ThreadviewError};
use crate::format::format_content;
use crate::model::{Archive, RenderUnit, RenderWindow, RenderedLine, Thread};

/// Renders threads `[start_index, start_index + count)` of `archive`.
///
/// `next_index` always advances past every thread considered, including
/// threads that rendered nothing, so the caller can keep paging through an
/// archive even when a filter hides whole windows.
pub fn render_window(
    archive: &Archive,
    start_index: usize,
    count: NonZeroUsize,
    role_filter: Option<&str>,
) -> RenderWindow {
    let total = archive.len();
    let start_index = start_index.min(total);
    let next_index = start_index.saturating_add(count.get()).min(total);

    let units = archive.threads[start_index..next_index]
        .iter()
        .enumerate()
        .filter_map(|(offset, thread)| render_thread(start_index + offset, thread, role_filter))
        .collect::<Vec<_>>();

    debug!(
        start_index,
        next_index,
        total,
        units = units.len(),
        role_filter = role_filter.unwrap_or("<all>"),
        "rendered window"
    );

    RenderWindow {
        start_index,
        next_index,
        total,
        units,
    }
}

fn render_thread(
    thread_index: usize,
    thread: &Thread,
    role_filter: Option<&str>,
) -> Option<RenderUnit> {
    let lines = thread
        .nodes
        .iter()
        .filter_map(|node| node.renderable())
        .filter(|(message, _)| role_filter.is_none_or(|role| message.role == role))
        .map(|(message, text)| RenderedLine {
            role: message.role.clone(),
            html: format_content(&text),
        })
        .collect::<Vec<_>>();

    if lines.is_empty() {
        return None;
    }

    Some(RenderUnit {
        thread_index,
        title: thread.title.clone(),
        lines,
    })
}

/// Successive windows over an archive, each starting at the previous
/// window's `next_index`.
#[derive(Debug, Clone)]
pub struct Windows<'a> {
    archive: &'a Archive,
    next_index: usize,
    count: NonZeroUsize,
    role_filter: Option<&'a str>,
}

impl<'a> Windows<'a> {
    pub fn new(
        archive: &'a Archive,
        start_index: usize,
        count: NonZeroUsize,
        role_filter: Option<&'a str>,
    ) -> Self {
        Self {
            archive,
            next_index: start_index,
            count,
            role_filter,
        }
    }
}

impl Iterator for Windows<'_> {
    type Item = RenderWindow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.archive.len() {
            return None;
        }

        let window = render_window(self.archive, self.next_index, self.count, self.role_filter);
        self.next_index = window.next_index;
        Some(window)
    }
}

pub fn render_window_to_raw_json(window: &RenderWindow) -> Result<String> {
    serde_json::to_string_pretty(window)
        .map(|json| format!("{json}\n"))
        .map_err(|err| ThreadviewError::Serialization(err.to_string()))
}

pub fn render_windows_to_raw_json(windows: &[RenderWindow]) -> Result<String> {
    serde_json::to_string_pretty(windows)
        .map(|json| format!("{json}\n"))
        .map_err(|err| ThreadviewError::Serialization(err.to_string()))
}
