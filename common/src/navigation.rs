//! Dashboard navigation state
//!
//! `ViewState` holds the active index and the display mode. Every transition
//! takes the current item count, so the index is always kept modulo it.

/// Horizontal travel a drag must exceed before it counts as a swipe.
pub const SWIPE_THRESHOLD_PX: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Carousel,
    Grid,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Carousel => ViewMode::Grid,
            ViewMode::Grid => ViewMode::Carousel,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Carousel => "Carrossel",
            ViewMode::Grid => "Grade",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    active_index: usize,
    view_mode: ViewMode,
}

impl ViewState {
    pub fn new(active_index: usize, view_mode: ViewMode) -> Self {
        Self { active_index, view_mode }
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn next(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.active_index = (self.active_index + 1) % count;
    }

    pub fn previous(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.active_index = if self.active_index == 0 {
            count - 1
        } else {
            (self.active_index - 1) % count
        };
    }

    /// Focuses `index`. Out-of-range indices wrap.
    pub fn select(&mut self, index: usize, count: usize) {
        if count == 0 {
            return;
        }
        self.active_index = index % count;
    }

    /// Leaves `active_index` untouched.
    pub fn toggle_view_mode(&mut self) {
        self.view_mode = self.view_mode.toggled();
    }

    /// Re-applies the modulo after the item list was replaced.
    pub fn normalize(&mut self, count: usize) {
        self.active_index = if count == 0 { 0 } else { self.active_index % count };
    }

    pub fn apply(&mut self, swipe: SwipeDirection, count: usize) {
        match swipe {
            SwipeDirection::Next => self.next(count),
            SwipeDirection::Previous => self.previous(count),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Leftward drag.
    Next,
    /// Rightward drag.
    Previous,
}

/// Threshold gesture recognizer for mouse drags and touch swipes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeTracker {
    start_x: Option<f32>,
}

impl SwipeTracker {
    pub fn begin(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    pub fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }

    /// Ends the gesture. An end without a matching begin is ignored.
    pub fn end(&mut self, x: f32) -> Option<SwipeDirection> {
        let start = self.start_x.take()?;
        let delta = x - start;
        if delta.abs() > SWIPE_THRESHOLD_PX {
            Some(if delta < 0.0 {
                SwipeDirection::Next
            } else {
                SwipeDirection::Previous
            })
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_then_previous_round_trips() {
        for count in 2..10 {
            for start in 0..count {
                let mut state = ViewState::new(start, ViewMode::Carousel);
                state.next(count);
                state.previous(count);
                assert_eq!(state.active_index(), start, "count={count} start={start}");
            }
        }
    }

    #[test]
    fn test_wraparound() {
        let mut state = ViewState::new(0, ViewMode::Carousel);
        state.previous(5);
        assert_eq!(state.active_index(), 4);
        state.next(5);
        assert_eq!(state.active_index(), 0);
    }

    #[test]
    fn test_empty_list_is_noop() {
        let mut state = ViewState::default();
        state.next(0);
        state.previous(0);
        state.select(3, 0);
        assert_eq!(state.active_index(), 0);
    }

    #[test]
    fn test_toggle_keeps_index() {
        let mut state = ViewState::new(3, ViewMode::Carousel);
        state.toggle_view_mode();
        assert_eq!(state.view_mode(), ViewMode::Grid);
        assert_eq!(state.active_index(), 3);
        state.toggle_view_mode();
        assert_eq!(state.view_mode(), ViewMode::Carousel);
    }

    #[test]
    fn test_normalize_after_shrink() {
        let mut state = ViewState::new(4, ViewMode::Grid);
        state.normalize(3);
        assert_eq!(state.active_index(), 1);
        state.normalize(0);
        assert_eq!(state.active_index(), 0);
    }

    #[test]
    fn test_swipe_threshold_boundary() {
        let mut tracker = SwipeTracker::default();
        tracker.begin(200.0);
        assert_eq!(tracker.end(150.0), None);

        tracker.begin(200.0);
        assert_eq!(tracker.end(149.0), Some(SwipeDirection::Next));

        tracker.begin(200.0);
        assert_eq!(tracker.end(250.0), None);

        tracker.begin(200.0);
        assert_eq!(tracker.end(251.0), Some(SwipeDirection::Previous));
    }

    #[test]
    fn test_swipe_end_without_begin() {
        let mut tracker = SwipeTracker::default();
        assert_eq!(tracker.end(999.0), None);

        tracker.begin(0.0);
        assert!(tracker.is_tracking());
        assert_eq!(tracker.end(-100.0), Some(SwipeDirection::Next));
        assert!(!tracker.is_tracking());
        assert_eq!(tracker.end(-200.0), None);
    }

    #[test]
    fn test_apply_swipe() {
        let mut state = ViewState::new(0, ViewMode::Carousel);
        state.apply(SwipeDirection::Previous, 3);
        assert_eq!(state.active_index(), 2);
        state.apply(SwipeDirection::Next, 3);
        assert_eq!(state.active_index(), 0);
    }
}
