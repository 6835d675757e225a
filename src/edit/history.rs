//! Snapshot-based undo/redo stacks for one raster.

use std::mem;

use crate::raster::Raster;

/// Full-raster snapshots of an edit session.
///
/// The undo stack is never empty: its first entry is the baseline the
/// session started from, and its last entry is the most recently committed
/// state.
#[derive(Clone, Debug)]
pub struct History {
    undo_stack: Vec<Raster>,
    redo_stack: Vec<Raster>,
    limit: Option<usize>,
}

impl History {
    /// Start a history at `baseline`. `limit` caps the undo stack length
    /// (baseline included); when exceeded the oldest snapshot is dropped and
    /// the next one becomes the baseline.
    pub fn new(baseline: Raster, limit: Option<usize>) -> Self {
        Self {
            undo_stack: vec![baseline],
            redo_stack: Vec::new(),
            limit: limit.map(|l| l.max(1)),
        }
    }

    /// Record a new state. Clears the redo stack.
    pub fn commit(&mut self, snapshot: Raster) {
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();

        if let Some(limit) = self.limit {
            while self.undo_stack.len() > limit {
                self.undo_stack.remove(0);
            }
        }
    }

    /// Step back one snapshot, moving `live` onto the redo stack.
    ///
    /// Returns `false` (and leaves `live` alone) at the baseline.
    pub fn undo(&mut self, live: &mut Raster) -> bool {
        if self.undo_stack.len() <= 1 {
            return false;
        }
        self.undo_stack.pop();
        let previous = match self.undo_stack.last() {
            Some(raster) => raster.clone(),
            None => return false,
        };
        let current = mem::replace(live, previous);
        self.redo_stack.push(current);
        true
    }

    /// Re-apply the most recently undone snapshot into `live`.
    ///
    /// Returns `false` when there is nothing to redo.
    pub fn redo(&mut self, live: &mut Raster) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        *live = next.clone();
        self.undo_stack.push(next);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn baseline(&self) -> &Raster {
        &self.undo_stack[0]
    }
}
