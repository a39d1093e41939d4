use crate::{
    animation::handle::AnimationHandle,
    animation::tween::Stagger,
    foundation::core::ElementId,
    stage::tree::Stage,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Direction {
    Forward,
    Reverse,
}

/// A staggered tween that can be played forward and backward any number of times.
///
/// Reversing mid-flight continues from the current position, so the last target to start is
/// the first to go back. `kill` is terminal.
#[derive(Debug)]
pub struct Playback {
    targets: Vec<ElementId>,
    stagger: Stagger,
    position: f64,
    direction: Option<Direction>,
    handle: AnimationHandle,
}

impl Playback {
    pub fn new(targets: Vec<ElementId>, stagger: Stagger) -> Self {
        let handle = AnimationHandle::new();
        handle.start();
        Self {
            targets,
            stagger,
            position: 0.0,
            direction: None,
            handle,
        }
    }

    pub fn handle(&self) -> AnimationHandle {
        self.handle.clone()
    }

    pub fn targets(&self) -> &[ElementId] {
        &self.targets
    }

    pub fn total_duration(&self) -> f64 {
        self.stagger.total_duration(self.targets.len())
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn is_moving(&self) -> bool {
        self.direction.is_some()
    }

    pub fn play(&mut self) {
        self.set_direction(Direction::Forward);
    }

    pub fn reverse(&mut self) {
        self.set_direction(Direction::Reverse);
    }

    fn set_direction(&mut self, dir: Direction) {
        if !self.handle.is_active() {
            return;
        }
        let at_rest = match dir {
            Direction::Forward => self.position >= self.total_duration(),
            Direction::Reverse => self.position <= 0.0,
        };
        self.direction = if at_rest { None } else { Some(dir) };
    }

    /// Write every target at the current position.
    pub fn render(&self, stage: &mut Stage) {
        if !self.handle.is_active() {
            return;
        }
        let total = self.total_duration();
        for (i, id) in self.targets.iter().enumerate() {
            let t = if self.position >= total {
                f64::INFINITY
            } else {
                self.position
            };
            stage.set_state(*id, self.stagger.sample(i, t));
        }
    }

    /// Returns `true` if the position moved.
    pub fn advance(&mut self, dt: f64, stage: &mut Stage) -> bool {
        let Some(dir) = self.direction else {
            return false;
        };
        if !self.handle.is_active() {
            self.direction = None;
            return false;
        }
        let total = self.total_duration();
        let dt = dt.max(0.0);
        match dir {
            Direction::Forward => {
                self.position = (self.position + dt).min(total);
                if self.position >= total {
                    self.direction = None;
                }
            }
            Direction::Reverse => {
                self.position = (self.position - dt).max(0.0);
                if self.position <= 0.0 {
                    self.direction = None;
                }
            }
        }
        self.render(stage);
        true
    }

    /// Halt for good. Returns `false` when already killed.
    pub fn kill(&mut self) -> bool {
        self.direction = None;
        self.handle.cancel()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/playback.rs"]
mod tests;
