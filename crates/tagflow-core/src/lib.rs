#![forbid(unsafe_code)]

//! Core: geometry, pointer input, and gesture recognition for tagflow.
//!
//! # Role in tagflow
//! `tagflow-core` is the input layer. It owns the pixel geometry shared by the
//! layout engine and the tag group, the pointer event types hosts feed in, and
//! the recognizer that turns presses into taps and long-press drags.
//!
//! # How it fits in the system
//! `tagflow-layout` consumes [`geometry`] and [`event::MeasureSpec`] to place
//! tags. `tagflow` consumes everything here and routes recognized gestures to
//! its selection and drag controllers.

pub mod event;
pub mod geometry;
pub mod gesture;
pub mod logging;
pub mod semantic_event;

pub use event::{MeasureSpec, PointerEvent, PointerEventKind, SizeConstraint};
pub use geometry::{Point, Rect, Sides, Size};
pub use gesture::{GestureConfig, GestureRecognizer};
pub use semantic_event::SemanticEvent;
