//! Core systems for pollform.
//!
//! This crate provides the foundational components the form controllers are
//! built on:
//!
//! - **Signal/Slot System**: Type-safe inter-component communication
//! - **Property System**: Shared values with atomic read-modify-write
//! - **Task Queue**: FIFO run-to-completion processing of deferred work
//! - **Logging**: Tracing targets, span names and tree formatting options
//!
//! # Signal/Slot Example
//!
//! ```
//! use pollform_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Property Example
//!
//! ```
//! use pollform_core::{Property, Signal};
//!
//! struct Counter {
//!     value: Property<i32>,
//!     value_changed: Signal<i32>,
//! }
//!
//! impl Counter {
//!     fn increment(&self) {
//!         let new_value = self.value.modify(|value| {
//!             *value += 1;
//!             *value
//!         });
//!         self.value_changed.emit(new_value);
//!     }
//! }
//! ```

pub mod logging;
pub mod property;
pub mod signal;
mod task;

pub use logging::{PerfSpan, TreeFormatOptions, TreeStyle};
pub use property::Property;
pub use signal::{ConnectionId, Signal};
pub use task::{SharedTaskQueue, TaskId};
