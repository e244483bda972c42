//! # Editing Session
//!
//! The single owner of the source buffer and the current tree. Every change
//! (keystrokes, task toggles, opening a file) arrives as an
//! [`EditDescriptor`] and leaves as a [`RenderUpdate`].
//!
//! ## Modules
//!
//! - `pipeline`: a worker thread running a session behind a bounded,
//!   debounced request queue

pub mod pipeline;

use std::sync::Arc;

use log::debug;

use crate::{
    buffer::{EditDescriptor, LineChange, SourceBuffer},
    error::EngineError,
    highlight::{CodeHighlights, highlight_block},
    parsing::{DocumentTree, rope::SourceRange},
    render::{DiffOp, RenderDiff, diff_trees, reparse},
    tasks::{self, TaskId, TaskItem},
};

pub use pipeline::{Delivery, Pipeline, PipelineHandle, PipelineOptions, Request};

/// Everything the preview needs to move from one tree to the next.
#[derive(Debug, Clone)]
pub struct RenderUpdate {
    /// Counts commits; strictly increasing per session.
    pub generation: u64,
    pub previous: Arc<DocumentTree>,
    pub tree: Arc<DocumentTree>,
    pub diff: RenderDiff,
    /// Highlights for the code regions of inserted and replaced nodes.
    pub highlights: Vec<CodeHighlights>,
    /// Task items of `tree`, with ids valid against its buffer.
    pub tasks: Vec<TaskItem>,
    /// Lines of `tree` that were actually reparsed.
    pub reparsed: Option<SourceRange>,
}

impl RenderUpdate {
    fn new(
        generation: u64,
        previous: Arc<DocumentTree>,
        tree: Arc<DocumentTree>,
        tasks: Vec<TaskItem>,
        reparsed: Option<SourceRange>,
    ) -> Self {
        let diff = diff_trees(&previous, &tree);
        let highlights = changed_highlights(&diff);
        Self {
            generation,
            previous,
            tree,
            diff,
            highlights,
            tasks,
            reparsed,
        }
    }

    /// Folds an undelivered `stale` update into this later one, diffing
    /// from the tree the preview still shows.
    #[must_use]
    pub fn superseding(self, stale: RenderUpdate) -> RenderUpdate {
        RenderUpdate::new(
            self.generation,
            stale.previous,
            self.tree,
            self.tasks,
            self.reparsed,
        )
    }
}

fn changed_highlights(diff: &RenderDiff) -> Vec<CodeHighlights> {
    diff.ops
        .iter()
        .filter_map(|op| match op {
            DiffOp::Insert { node, .. } | DiffOp::Replace { node, .. } => Some(node),
            DiffOp::Remove { .. } => None,
        })
        .flat_map(highlight_block)
        .collect()
}

/// A buffer, its latest tree, and edits not yet reparsed.
#[derive(Debug)]
pub struct Session {
    buffer: SourceBuffer,
    tree: Arc<DocumentTree>,
    generation: u64,
    staged: Option<LineChange>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// An empty buffer with its (empty) tree, at generation 0.
    pub fn new() -> Self {
        Self {
            buffer: SourceBuffer::new(),
            tree: Arc::new(DocumentTree::empty()),
            generation: 0,
            staged: None,
        }
    }

    pub fn buffer(&self) -> &SourceBuffer {
        &self.buffer
    }

    /// The tree of the last commit.
    pub fn tree(&self) -> Arc<DocumentTree> {
        Arc::clone(&self.tree)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Applies `edit` and reparses straight away.
    pub fn apply_edit(&mut self, edit: EditDescriptor) -> Result<RenderUpdate, EngineError> {
        let change = self.stage(&edit)?;
        self.staged = None;
        Ok(self.rebuild(change))
    }

    /// Applies `edit` to the buffer without reparsing; see [`Session::commit`].
    pub fn stage_edit(&mut self, edit: EditDescriptor) -> Result<(), EngineError> {
        let change = self.stage(&edit)?;
        self.staged = Some(change);
        Ok(())
    }

    /// Reparses once for every edit staged since the last commit.
    pub fn commit(&mut self) -> Option<RenderUpdate> {
        let change = self.staged.take()?;
        Some(self.rebuild(change))
    }

    /// The edit that would flip task `id`, checked against the current buffer.
    ///
    /// With edits staged, the marker line is looked up in a tree parsed
    /// from the buffer as it is now; the committed tree may be behind.
    pub fn toggle(&self, id: &TaskId) -> Result<EditDescriptor, EngineError> {
        match self.staged {
            Some(change) => {
                let current = reparse(&self.tree, &self.buffer, change).tree;
                tasks::toggle(&current, &self.buffer, id)
            }
            None => tasks::toggle(&self.tree, &self.buffer, id),
        }
    }

    pub fn apply_toggle(&mut self, id: &TaskId) -> Result<RenderUpdate, EngineError> {
        let edit = self.toggle(id)?;
        self.apply_edit(edit)
    }

    /// Task items of the committed tree.
    ///
    /// With edits staged the ids describe the buffer as it is now, which
    /// may no longer match the tree.
    pub fn task_items(&self) -> Vec<TaskItem> {
        tasks::collect(&self.tree, &self.buffer)
    }

    /// Applies `edit`, composing its change with anything already staged.
    fn stage(&mut self, edit: &EditDescriptor) -> Result<LineChange, EngineError> {
        let change = self.buffer.edit(edit)?;
        Ok(match self.staged {
            Some(staged) => staged.then(change),
            None => change,
        })
    }

    fn rebuild(&mut self, change: LineChange) -> RenderUpdate {
        let result = reparse(&self.tree, &self.buffer, change);
        let tree = Arc::new(result.tree);
        let previous = std::mem::replace(&mut self.tree, Arc::clone(&tree));
        self.generation += 1;
        debug!(
            "generation {}: {change:?}, reparsed {:?}",
            self.generation, result.window
        );
        let tasks = tasks::collect(&tree, &self.buffer);
        RenderUpdate::new(self.generation, previous, tree, tasks, result.window)
    }
}
