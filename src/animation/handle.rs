use std::{cell::Cell, rc::Rc};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum HandleState {
    Pending,
    Running,
    Completed,
    Cancelled,
}

/// Shared handle to a scheduled or running animation.
///
/// Clones observe the same state. Cancelling is idempotent and terminal: a cancelled or
/// completed handle never becomes active again.
#[derive(Clone, Debug)]
pub struct AnimationHandle {
    state: Rc<Cell<HandleState>>,
}

impl Default for AnimationHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationHandle {
    pub fn new() -> Self {
        Self {
            state: Rc::new(Cell::new(HandleState::Pending)),
        }
    }

    pub fn state(&self) -> HandleState {
        self.state.get()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state(), HandleState::Pending | HandleState::Running)
    }

    pub fn is_cancelled(&self) -> bool {
        self.state() == HandleState::Cancelled
    }

    pub(crate) fn start(&self) -> bool {
        self.transition(HandleState::Pending, HandleState::Running)
    }

    pub(crate) fn complete(&self) -> bool {
        self.transition(HandleState::Running, HandleState::Completed)
    }

    /// Returns `true` only for the call that actually cancelled.
    pub fn cancel(&self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.state.set(HandleState::Cancelled);
        true
    }

    fn transition(&self, from: HandleState, to: HandleState) -> bool {
        if self.state.get() != from {
            return false;
        }
        self.state.set(to);
        true
    }
}

/// Every handle started by one owner (a section, a row, the preloader).
///
/// Cancelling the scope cancels all of them in one call.
#[derive(Debug, Default)]
pub struct CancelScope {
    handles: Vec<AnimationHandle>,
}

impl CancelScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, handle: AnimationHandle) {
        // Finished handles carry no work; drop them so the list stays short.
        self.handles.retain(AnimationHandle::is_active);
        self.handles.push(handle);
    }

    pub fn active_count(&self) -> usize {
        self.handles.iter().filter(|h| h.is_active()).count()
    }

    /// Returns how many handles were still active.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.handles.iter().filter(|h| h.cancel()).count();
        self.handles.clear();
        n
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/handle.rs"]
mod tests;
