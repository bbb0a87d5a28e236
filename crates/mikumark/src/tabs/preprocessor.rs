//! Tab block preprocessor.
//!
//! Splits the raw document into [`Line`]s, pulling tab block content aside
//! until the block closes and then emitting it wrapped in tab markup.

use super::markup::emit_group;
use crate::context::ParseContext;
use crate::fence::FenceTracker;
use crate::structure::Line;

/// A single tab within a group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Tab {
    /// Document-wide tab id.
    pub(crate) id: usize,
    pub(crate) title: String,
    /// Line number of the `@title` line (1-indexed).
    pub(crate) line: usize,
    pub(crate) lines: Vec<Line>,
}

/// An open or finished tab block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TabGroup {
    pub(crate) id: usize,
    /// Line number of the opening `@@tab` (1-indexed).
    pub(crate) line: usize,
    pub(crate) tabs: Vec<Tab>,
}

/// Parser state for tab block processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Normal document text.
    Normal,
    /// Inside a `@@tab` block.
    InBlock,
}

/// Converts the raw document into lines, expanding tab blocks.
///
/// - `@@tab` opens a block, or closes the open one
/// - `@Title` inside a block starts a new tab
/// - lines inside a fenced code block are never directives
pub(crate) struct TabsPreprocessor {
    state: State,
    fence: FenceTracker,
    current_group: Option<TabGroup>,
}

impl TabsPreprocessor {
    pub(crate) fn new() -> Self {
        Self {
            state: State::Normal,
            fence: FenceTracker::new(),
            current_group: None,
        }
    }

    /// Split `input` into lines and expand every tab block.
    pub(crate) fn process(mut self, input: &str, ctx: &mut ParseContext) -> Vec<Line> {
        let mut output = Vec::new();

        for (idx, line) in input.split('\n').enumerate() {
            self.process_line(line, idx + 1, ctx, &mut output);
        }
        self.finalize(&mut output);

        output
    }

    fn process_line(
        &mut self,
        line: &str,
        line_num: usize,
        ctx: &mut ParseContext,
        output: &mut Vec<Line>,
    ) {
        // Fence lines and everything between them are content
        if self.fence.update(line) || self.fence.in_fence() {
            self.push_content(Line::text(line_num, line), output);
            return;
        }

        match parse_directive(line) {
            Some(Directive::Toggle) => self.handle_toggle(line_num, ctx, output),
            Some(Directive::Title(title)) => self.handle_title(title, line, line_num, ctx, output),
            None => self.push_content(Line::text(line_num, line), output),
        }
    }

    fn handle_toggle(&mut self, line_num: usize, ctx: &mut ParseContext, output: &mut Vec<Line>) {
        match self.state {
            State::Normal => {
                self.current_group = Some(TabGroup {
                    id: ctx.next_group_id(),
                    line: line_num,
                    tabs: Vec::new(),
                });
                self.state = State::InBlock;
            }
            State::InBlock => self.close_group(output),
        }
    }

    fn handle_title(
        &mut self,
        title: String,
        line: &str,
        line_num: usize,
        ctx: &mut ParseContext,
        output: &mut Vec<Line>,
    ) {
        match (self.state, self.current_group.as_mut()) {
            (State::InBlock, Some(group)) => {
                group.tabs.push(Tab {
                    id: ctx.next_tab_id(),
                    title,
                    line: line_num,
                    lines: Vec::new(),
                });
            }
            _ => {
                tracing::warn!(line = line_num, %title, "Tab title outside a tab block, keeping as text");
                output.push(Line::text(line_num, line));
            }
        }
    }

    /// Route a line to the current tab, or to the output if there is none.
    fn push_content(&mut self, line: Line, output: &mut Vec<Line>) {
        if let Some(tab) = self
            .current_group
            .as_mut()
            .and_then(|group| group.tabs.last_mut())
        {
            tab.lines.push(line);
        } else {
            output.push(line);
        }
    }

    fn close_group(&mut self, output: &mut Vec<Line>) {
        self.state = State::Normal;
        let Some(group) = self.current_group.take() else {
            return;
        };

        if group.tabs.is_empty() {
            tracing::warn!(line = group.line, "Tab block with no tabs, skipping");
            return;
        }

        tracing::debug!(group = group.id, tabs = group.tabs.len(), "Emitting tab group");
        emit_group(group, output);
    }

    /// Close a block left open at end of document.
    fn finalize(&mut self, output: &mut Vec<Line>) {
        if self.state == State::InBlock {
            if let Some(group) = &self.current_group {
                tracing::warn!(
                    line = group.line,
                    "Unterminated tab block, closing at end of document"
                );
            }
            self.close_group(output);
        }
    }
}

/// Parsed directive type.
#[derive(Debug, PartialEq, Eq)]
enum Directive {
    Toggle,
    Title(String),
}

/// Parse a line for tab directive syntax.
fn parse_directive(line: &str) -> Option<Directive> {
    if line.trim_end() == "@@tab" {
        return Some(Directive::Toggle);
    }

    let rest = line.strip_prefix('@')?;
    if rest.is_empty() {
        return None;
    }

    let title = rest.trim();
    if title.is_empty() {
        return Some(Directive::Title("Tab".to_owned()));
    }
    Some(Directive::Title(title.to_owned()))
}
