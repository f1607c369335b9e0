//! Edit mode for the clock panel.
//!
//! While editing, vertical drags nudge the offset one minute per tick and a
//! typed `HH:MM` can be submitted to set the time outright. Only a successful
//! submit leaves edit mode.

use log::{debug, warn};

use crate::error::ClockError;
use crate::offset_clock::{OffsetClock, parse_wall_time};
use crate::storage::KeyValueStore;
use crate::time_source::TimeSource;

/// Vertical travel, in screen units, that produces one minute of adjustment.
pub const DEFAULT_DRAG_THRESHOLD: f32 = 10.0;

/// A normalized pointer or touch sample. Screen `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub timestamp_ms: u64,
}

impl PointerSample {
    pub fn at_y(y: f32) -> Self {
        PointerSample {
            x: 0.0,
            y,
            timestamp_ms: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditState {
    Idle,
    Editing {
        draft: String,
        /// Last accepted sample of the drag in progress, if any.
        anchor: Option<PointerSample>,
    },
}

pub struct ClockEditor {
    state: EditState,
    drag_threshold: f32,
}

impl Default for ClockEditor {
    fn default() -> Self {
        ClockEditor::new(DEFAULT_DRAG_THRESHOLD)
    }
}

impl ClockEditor {
    /// A threshold that is not a finite positive distance falls back to
    /// [`DEFAULT_DRAG_THRESHOLD`].
    pub fn new(drag_threshold: f32) -> Self {
        let drag_threshold = if drag_threshold.is_finite() && drag_threshold > 0.0 {
            drag_threshold
        } else {
            warn!(
                "ignoring drag threshold {}, using {}",
                drag_threshold, DEFAULT_DRAG_THRESHOLD
            );
            DEFAULT_DRAG_THRESHOLD
        };

        ClockEditor {
            state: EditState::Idle,
            drag_threshold,
        }
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing { .. })
    }

    pub fn draft(&self) -> Option<&str> {
        match &self.state {
            EditState::Editing { draft, .. } => Some(draft),
            EditState::Idle => None,
        }
    }

    /// Enter edit mode with the draft prefilled from the displayed time.
    /// Has no effect if already editing.
    pub fn begin_edit<T: TimeSource, S: KeyValueStore>(&mut self, clock: &OffsetClock<T, S>) {
        if self.is_editing() {
            return;
        }
        debug!("clock edit mode on");
        self.state = EditState::Editing {
            draft: clock.display_hhmm(),
            anchor: None,
        };
    }

    pub fn set_draft(&mut self, text: &str) {
        if let EditState::Editing { draft, .. } = &mut self.state {
            *draft = text.to_string();
        }
    }

    pub fn pointer_down(&mut self, sample: PointerSample) {
        if let EditState::Editing { anchor, .. } = &mut self.state {
            *anchor = Some(sample);
        }
    }

    /// Feed a movement sample. Returns the minutes applied to the clock, if
    /// the drag crossed the threshold since the last accepted sample.
    pub fn pointer_move<T: TimeSource, S: KeyValueStore>(
        &mut self,
        sample: PointerSample,
        clock: &mut OffsetClock<T, S>,
    ) -> Option<i64> {
        let EditState::Editing {
            anchor: Some(anchor),
            ..
        } = &mut self.state
        else {
            return None;
        };

        let diff = anchor.y - sample.y;
        if diff.abs() <= self.drag_threshold {
            return None;
        }

        let delta = if diff > 0.0 { 1 } else { -1 };
        *anchor = sample;
        clock.bump_offset(delta);
        Some(delta)
    }

    pub fn pointer_up(&mut self) {
        if let EditState::Editing { anchor, .. } = &mut self.state {
            *anchor = None;
        }
    }

    /// Apply the draft as an absolute time. On success edit mode ends; on
    /// rejection the editor stays open with the draft intact.
    pub fn submit<T: TimeSource, S: KeyValueStore>(
        &mut self,
        clock: &mut OffsetClock<T, S>,
    ) -> Result<i64, ClockError> {
        let EditState::Editing { draft, .. } = &self.state else {
            return Err(ClockError::NotEditing);
        };

        let (hour, minute) = parse_wall_time(draft)?;
        let offset = clock.set_absolute(hour, minute)?;

        debug!("clock edit mode off");
        self.state = EditState::Idle;
        Ok(offset)
    }
}
