//! Property system for pollform.
//!
//! A property is a value cell shared between threads. Its owner reads it with
//! `get` and changes it with `modify`, which runs the whole read-modify-write
//! under one write lock. Properties do not notify anyone themselves: the
//! owner inspects the result of `modify` and emits its own signal once it is
//! safe to run slots.
//!
//! # Example
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
//!     fn increment_below(&self, limit: i32) {
//!         let changed = self.value.modify(|value| {
//!             if *value < limit {
//!                 *value += 1;
//!                 Some(*value)
//!             } else {
//!                 None
//!             }
//!         });
//!         if let Some(value) = changed {
//!             self.value_changed.emit(value);
//!         }
//!     }
//! }
//!
//! let counter = Counter { value: Property::new(0), value_changed: Signal::new() };
//! counter.increment_below(1);
//! counter.increment_below(1);
//! assert_eq!(counter.value.get(), 1);
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A value cell with atomic read-modify-write.
///
/// `Property<T>` uses interior mutability with `RwLock` and is `Send + Sync`
/// whenever `T` is.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Read-modify-write under a single write lock.
    ///
    /// The closure sees the current value and may change it in place. No
    /// other reader or writer observes the intermediate state.
    pub fn modify<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        f(&mut self.value.write())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

static_assertions::assert_impl_all!(Property<usize>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_property_basic() {
        let prop = Property::new(42);
        assert_eq!(prop.get(), 42);
    }

    #[test]
    fn test_property_modify() {
        let prop = Property::new(5usize);
        let previous = prop.modify(|value| {
            let previous = *value;
            *value += 1;
            previous
        });
        assert_eq!(previous, 5);
        assert_eq!(prop.get(), 6);
    }

    #[test]
    fn test_property_modify_can_refuse() {
        let prop = Property::new(3usize);
        let stepped = prop.modify(|value| {
            if *value >= 3 {
                false
            } else {
                *value += 1;
                true
            }
        });
        assert!(!stepped);
        assert_eq!(prop.get(), 3);
    }

    #[test]
    fn test_property_concurrent_modify() {
        let prop = Arc::new(Property::new(0usize));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let prop = prop.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        prop.modify(|v| *v += 1);
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(prop.get(), 800);
    }

    #[test]
    fn test_property_debug() {
        let prop = Property::new(7);
        assert_eq!(format!("{prop:?}"), "Property { value: 7 }");
    }
}
