use std::collections::BTreeMap;

use crate::foundation::core::{ElementId, Rect, VisualState};

#[derive(Clone, Debug)]
struct Element {
    state: VisualState,
    rect: Rect, // document coordinates
}

/// The element subtree the choreography writes to.
///
/// Every write goes through a lookup; writing to an element that has already been unmounted
/// is a no-op that returns `false`.
#[derive(Clone, Debug, Default)]
pub struct Stage {
    elements: BTreeMap<ElementId, Element>,
    next_id: u64,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount an element at `rect` with the default visual state.
    pub fn mount(&mut self, rect: Rect) -> ElementId {
        self.mount_with(rect, VisualState::default())
    }

    pub fn mount_with(&mut self, rect: Rect, state: VisualState) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(id, Element { state, rect });
        id
    }

    /// Returns `false` if the element was already gone.
    pub fn unmount(&mut self, id: ElementId) -> bool {
        self.elements.remove(&id).is_some()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn state(&self, id: ElementId) -> Option<VisualState> {
        self.elements.get(&id).map(|e| e.state)
    }

    pub fn set_state(&mut self, id: ElementId, state: VisualState) -> bool {
        match self.elements.get_mut(&id) {
            Some(e) => {
                e.state = state;
                true
            }
            None => false,
        }
    }

    pub fn update_state(&mut self, id: ElementId, f: impl FnOnce(&mut VisualState)) -> bool {
        match self.elements.get_mut(&id) {
            Some(e) => {
                f(&mut e.state);
                true
            }
            None => false,
        }
    }

    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        self.elements.get(&id).map(|e| e.rect)
    }

    /// Relayout an element (e.g. after a resize).
    pub fn set_rect(&mut self, id: ElementId, rect: Rect) -> bool {
        match self.elements.get_mut(&id) {
            Some(e) => {
                e.rect = rect;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/tree.rs"]
mod tests;
