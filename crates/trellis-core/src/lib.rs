//! Core systems for Trellis.
//!
//! This crate provides the foundational components of the Trellis model/view
//! toolkit:
//!
//! - **Signal/Slot System**: Type-safe change notification between models,
//!   selection models, and views
//! - **Geometry**: The point/size/rectangle value types used for viewports
//!   and row bounds
//! - **Logging**: `tracing` integration and per-subsystem filter targets
//!
//! Trellis runs on a single cooperative UI loop: signals invoke their slots
//! synchronously in the emitting call, and no component blocks or defers
//! work.
//!
//! # Signal/Slot Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

mod geometry;
pub mod logging;
mod signal;

pub use geometry::{Point, Rect, Size};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
