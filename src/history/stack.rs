use std::collections::VecDeque;

/// Two bounded stacks for linear undo/redo.
///
/// The top of the undo stack is always the current state, so undo needs at
/// least two entries. When a stack grows past `max_depth` its oldest entry is
/// dropped.
#[derive(Debug, Clone)]
pub struct HistoryStack<T> {
    undo: VecDeque<T>,
    redo: VecDeque<T>,
    max_depth: usize,
}

impl<T> HistoryStack<T> {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: VecDeque::new(),
            max_depth: max_depth.max(1),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Records a new current state, discarding anything that could be redone.
    pub fn push(&mut self, state: T) {
        self.redo.clear();
        Self::push_bounded(&mut self.undo, state, self.max_depth);
    }

    /// Steps back one state and returns it, or `None` if only the initial state is left.
    pub fn undo(&mut self) -> Option<&T> {
        if self.undo.len() < 2 {
            return None;
        }
        let current = self.undo.pop_back()?;
        Self::push_bounded(&mut self.redo, current, self.max_depth);
        self.undo.back()
    }

    /// Re-applies the most recently undone state and returns it.
    pub fn redo(&mut self) -> Option<&T> {
        let state = self.redo.pop_back()?;
        Self::push_bounded(&mut self.undo, state, self.max_depth);
        self.undo.back()
    }

    pub fn current(&self) -> Option<&T> {
        self.undo.back()
    }

    pub fn can_undo(&self) -> bool {
        self.undo.len() >= 2
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Undo entries from oldest to newest.
    pub fn undo_entries(&self) -> impl Iterator<Item = &T> {
        self.undo.iter()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    fn push_bounded(stack: &mut VecDeque<T>, state: T, max_depth: usize) {
        stack.push_back(state);
        while stack.len() > max_depth {
            stack.pop_front();
        }
    }
}
