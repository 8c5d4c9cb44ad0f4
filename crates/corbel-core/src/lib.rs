#![forbid(unsafe_code)]

//! Core: pixel geometry and the input event model.
//!
//! # Role in corbel
//! `corbel-core` is the foundation layer. It owns the coordinate types the
//! solvers compute with and the normalized key events the widget state
//! machines consume. It performs no I/O and knows nothing about rendering.
//!
//! # Primary responsibilities
//! - **Geometry**: `Point`, `Size`, `Rect`, and `Sides` in signed logical
//!   pixels.
//! - **Event**: canonical keyboard events (`KeyEvent`, `KeyCode`,
//!   `Modifiers`).
//!
//! # How it fits in the system
//! The solvers (`corbel-layout`) take and return `corbel-core` geometry; the
//! headless widgets (`corbel-widgets`) mutate state in response to
//! `corbel-core` key events and report their geometry back in the same
//! types. Pointer input is deliberately absent: a headless library never
//! sees a pointer stream, so embedders hit-test against the rects the
//! widgets expose and call the state operations directly.

pub mod event;
pub mod geometry;

pub use event::{KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use geometry::{Point, Rect, Sides, Size};
