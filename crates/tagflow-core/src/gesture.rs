#![forbid(unsafe_code)]

//! Gesture recognition: transforms raw pointer events into semantic events.
//!
//! [`GestureRecognizer`] is a stateful processor that converts
//! [`PointerEvent`] sequences into [`SemanticEvent`]s: taps select a tag, a
//! long press picks a tag up for dragging.
//!
//! # State Machine
//!
//! ```text
//! Idle -> Pending -> Idle            (Up before threshold: Tap)
//!            \-----> Abandoned -> Idle (moved past slop: nothing)
//!            \-----> LongPressed -> Idle (Up: DragEnd, Cancel: DragCancel)
//! ```
//!
//! The long press fires either from [`tick`](GestureRecognizer::tick) or
//! lazily from the next pointer event that arrives after the threshold.
//!
//! # Failure Modes
//!
//! - A `Down` while a long-press drag is active is ignored; the drag keeps
//!   the pointer until `Up` or `Cancel`.
//! - `Up`, `Move`, or `Cancel` without a prior `Down` produce nothing.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::event::{PointerEvent, PointerEventKind};
use crate::geometry::Point;
use crate::semantic_event::SemanticEvent;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for gesture recognition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Duration before a stationary press becomes a long press (default: 500ms).
    pub long_press_threshold: Duration,
    /// Manhattan distance (pixels) a press may wander and still count as a
    /// tap or long press (default: 3).
    pub tap_slop: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press_threshold: Duration::from_millis(500),
            tap_slop: 3,
        }
    }
}

impl GestureConfig {
    /// Set the long-press threshold.
    #[must_use]
    pub fn long_press_threshold(mut self, threshold: Duration) -> Self {
        self.long_press_threshold = threshold;
        self
    }

    /// Set the tap slop.
    #[must_use]
    pub fn tap_slop(mut self, slop: u32) -> Self {
        self.tap_slop = slop;
        self
    }
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressPhase {
    Idle,
    Pending { origin: Point, down_at: Instant },
    Abandoned,
    LongPressed { origin: Point },
}

// ---------------------------------------------------------------------------
// GestureRecognizer
// ---------------------------------------------------------------------------

/// Stateful gesture recognizer for a single pointer.
///
/// Call [`process`](GestureRecognizer::process) for each incoming event and
/// [`tick`](GestureRecognizer::tick) periodically so a held press can turn
/// into a long press without further pointer input.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: GestureConfig,
    phase: PressPhase,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureRecognizer {
    /// Create a new gesture recognizer with the given configuration.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            phase: PressPhase::Idle,
        }
    }

    /// Process a raw event, returning any semantic events produced.
    ///
    /// A late event can yield two items: the overdue `LongPress` followed by
    /// the drag event the pointer input itself maps to.
    pub fn process(&mut self, event: &PointerEvent, now: Instant) -> Vec<SemanticEvent> {
        let mut out = Vec::with_capacity(2);
        let pos = event.pos;

        match event.kind {
            PointerEventKind::Down => {
                if !matches!(self.phase, PressPhase::LongPressed { .. }) {
                    self.phase = PressPhase::Pending {
                        origin: pos,
                        down_at: now,
                    };
                }
            }
            PointerEventKind::Move => {
                out.extend(self.tick(now));
                match self.phase {
                    PressPhase::Pending { origin, .. } => {
                        if origin.manhattan_distance(pos) > self.config.tap_slop {
                            self.phase = PressPhase::Abandoned;
                        }
                    }
                    PressPhase::LongPressed { origin } => {
                        out.push(SemanticEvent::DragMove {
                            start: origin,
                            current: pos,
                        });
                    }
                    PressPhase::Idle | PressPhase::Abandoned => {}
                }
            }
            PointerEventKind::Up => {
                out.extend(self.tick(now));
                match self.phase {
                    PressPhase::Pending { origin, .. } => {
                        out.push(SemanticEvent::Tap { pos: origin });
                    }
                    PressPhase::LongPressed { origin } => {
                        out.push(SemanticEvent::DragEnd {
                            start: origin,
                            end: pos,
                        });
                    }
                    PressPhase::Idle | PressPhase::Abandoned => {}
                }
                self.phase = PressPhase::Idle;
            }
            PointerEventKind::Cancel => {
                if matches!(self.phase, PressPhase::LongPressed { .. }) {
                    out.push(SemanticEvent::DragCancel);
                }
                self.phase = PressPhase::Idle;
            }
        }

        out
    }

    /// Check for long-press timeout. Call periodically (e.g., on a frame tick).
    ///
    /// Returns `Some(LongPress { .. })` exactly once per press.
    pub fn tick(&mut self, now: Instant) -> Option<SemanticEvent> {
        let PressPhase::Pending { origin, down_at } = self.phase else {
            return None;
        };
        let elapsed = now.saturating_duration_since(down_at);
        if elapsed < self.config.long_press_threshold {
            return None;
        }
        self.phase = PressPhase::LongPressed { origin };
        Some(SemanticEvent::LongPress {
            pos: origin,
            duration: elapsed,
        })
    }

    /// Whether a long-press drag currently owns the pointer.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, PressPhase::LongPressed { .. })
    }

    /// Reset to idle without emitting anything.
    ///
    /// The caller is responsible for cancelling any drag it started.
    pub fn reset(&mut self) {
        self.phase = PressPhase::Idle;
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Update the configuration.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
