//! The path to the current document node.
//!
//! The path mirrors the document nesting as a stack of sibling frames: each
//! frame records every tag seen so far at one depth. Pushing a tag appends it
//! to the innermost frame and opens a fresh frame for the tag's children;
//! popping discards the innermost frame. The rendered form is an
//! XPath-flavoured string used to annotate diagnostics.

use crate::tags::Tag;
use std::fmt::Write as _;

/// Stack of sibling frames mirroring the document nesting.
#[derive(Debug)]
pub struct Path {
    frames: Vec<Vec<Tag>>,
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}

impl Path {
    pub fn new() -> Self {
        Self {
            frames: vec![Vec::new()],
        }
    }

    /// Enter `tag`: record it among the current siblings and open a frame
    /// for its children.
    pub fn push(&mut self, tag: Tag) {
        if let Some(frame) = self.frames.last_mut() {
            frame.push(tag);
        }
        self.frames.push(Vec::new());
    }

    /// Leave the current node: discard its child frame and return the tag
    /// being closed, so the caller can check it against the closing event.
    ///
    /// Returns `None` when the stack is exhausted, which means the path no
    /// longer mirrors the document.
    pub fn pop(&mut self) -> Option<Tag> {
        if self.frames.len() <= 1 {
            return None;
        }
        self.frames.pop();
        self.frames.last().and_then(|frame| frame.last().copied())
    }

    /// Number of currently open elements.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// The innermost open element, if any.
    pub fn innermost(&self) -> Option<Tag> {
        if self.frames.len() < 2 {
            return None;
        }
        self.frames[self.frames.len() - 2].last().copied()
    }

    /// Render the current node as a diagnostic path.
    ///
    /// Repeatable tags carry an ordinal: the count of *all* same-tag entries
    /// recorded in that depth's frame, not only those preceding the current
    /// node. This matches the rendering the rest of the toolchain expects;
    /// see the sibling-counting tests below before changing it.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for frame in &self.frames {
            let Some(&tag) = frame.last() else {
                break;
            };
            if tag.is_indexed() {
                let ordinal = frame.iter().filter(|&&t| t == tag).count();
                let _ = write!(out, "/{}[{}]", tag.name(), ordinal);
            } else {
                let _ = write!(out, "/{}", tag.name());
            }
        }
        out
    }
}
