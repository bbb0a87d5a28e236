//! Per-call parse state.

use crate::code_block::CodeBlock;
use crate::error::ParseError;
use crate::outline::OutlineEntry;
use crate::renderer::{RenderResult, TableFallback};

/// Mutable state threaded through every pipeline stage of one render call.
///
/// A fresh context is created per call, so renders never share counters.
#[derive(Debug)]
pub(crate) struct ParseContext {
    pub(crate) table_fallback: TableFallback,
    outline: Vec<OutlineEntry>,
    code_blocks: Vec<CodeBlock>,
    errors: Vec<ParseError>,
    next_group_id: usize,
    next_tab_id: usize,
}

impl ParseContext {
    pub(crate) fn new(table_fallback: TableFallback) -> Self {
        Self {
            table_fallback,
            outline: Vec::new(),
            code_blocks: Vec::new(),
            errors: Vec::new(),
            next_group_id: 0,
            next_tab_id: 0,
        }
    }

    /// Record a heading and return its index.
    pub(crate) fn push_heading(&mut self, level: usize, title: &str) -> usize {
        let index = self.outline.len();
        self.outline.push(OutlineEntry {
            level,
            title: title.to_owned(),
        });
        index
    }

    /// Store a fenced code block and return its index.
    pub(crate) fn push_code_block(&mut self, block: CodeBlock) -> usize {
        let index = self.code_blocks.len();
        self.code_blocks.push(block);
        index
    }

    pub(crate) fn code_blocks(&self) -> &[CodeBlock] {
        &self.code_blocks
    }

    pub(crate) fn push_error(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    /// Allocate the next tab group id.
    pub(crate) fn next_group_id(&mut self) -> usize {
        let id = self.next_group_id;
        self.next_group_id += 1;
        id
    }

    /// Allocate the next tab id. Tab ids are unique across all groups.
    pub(crate) fn next_tab_id(&mut self) -> usize {
        let id = self.next_tab_id;
        self.next_tab_id += 1;
        id
    }

    pub(crate) fn into_result(self, html: String) -> RenderResult {
        RenderResult {
            html,
            outline: self.outline,
            errors: self.errors,
        }
    }
}
