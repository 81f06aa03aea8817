//! Undo/redo history
//!
//! Because gallery operations return new state values, history is just two
//! bounded stacks of earlier values. The app keeps item lists here, not
//! whole gallery states, so undo never touches the overlay or drafts.

use std::collections::VecDeque;

/// Bounded undo and redo stacks of snapshots
#[derive(Debug, Clone)]
pub struct History<T> {
    undo_stack: VecDeque<T>,
    redo_stack: Vec<T>,
    limit: usize,
}

impl<T> History<T> {
    /// Create a history keeping at most `limit` undo steps
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit,
        }
    }

    /// Remember the state from before a change. Clears the redo stack.
    pub fn record(&mut self, before: T) {
        self.redo_stack.clear();
        if self.limit == 0 {
            return;
        }
        if self.undo_stack.len() == self.limit {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(before);
    }

    /// Step back: returns the previous state, storing `current` for redo
    pub fn undo(&mut self, current: T) -> Result<T, T> {
        match self.undo_stack.pop_back() {
            Some(previous) => {
                self.redo_stack.push(current);
                Ok(previous)
            }
            None => Err(current),
        }
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: T) -> Result<T, T> {
        match self.redo_stack.pop() {
            Some(next) => {
                self.undo_stack.push_back(current);
                Ok(next)
            }
            None => Err(current),
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
