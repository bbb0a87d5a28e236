//! Nested container tracking for lists and blockquotes.
//!
//! Nesting depth in Mikumark is written as a run of repeated marker
//! characters (`++`, `--`, `>>`). [`NestingStack`] turns a sequence of
//! target depths into balanced open/close tags: every container it opens is
//! closed exactly once, either on a depth decrease or by [`close_all`].
//!
//! [`close_all`]: NestingStack::close_all

/// A nestable container element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Container {
    /// `<ol>` holding an open `<li>`.
    OrderedList,
    /// `<ul>` holding an open `<li>`.
    UnorderedList,
    /// `<blockquote>`.
    Blockquote,
}

impl Container {
    fn open_tag(self) -> &'static str {
        match self {
            Self::OrderedList => "<ol><li>",
            Self::UnorderedList => "<ul><li>",
            Self::Blockquote => "<blockquote>",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            Self::OrderedList => "</li></ol>",
            Self::UnorderedList => "</li></ul>",
            Self::Blockquote => "</blockquote>",
        }
    }
}

/// Stack of open containers.
#[derive(Debug, Default)]
pub(crate) struct NestingStack {
    open: Vec<Container>,
}

impl NestingStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of currently open containers.
    pub(crate) fn depth(&self) -> usize {
        self.open.len()
    }

    /// Open or close containers until exactly `depth` are open.
    ///
    /// New levels use `container`.
    pub(crate) fn adjust_to(&mut self, depth: usize, container: Container, out: &mut String) {
        while self.open.len() > depth {
            self.close_one(out);
        }
        while self.open.len() < depth {
            out.push_str(container.open_tag());
            self.open.push(container);
        }
    }

    /// Close every open container, innermost first.
    pub(crate) fn close_all(&mut self, out: &mut String) {
        while !self.open.is_empty() {
            self.close_one(out);
        }
    }

    fn close_one(&mut self, out: &mut String) {
        if let Some(container) = self.open.pop() {
            out.push_str(container.close_tag());
        }
    }
}
