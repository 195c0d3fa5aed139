//! Bounded option counter.

use pollform_core::{Property, Signal};

/// The option count of one list, bounded by a fixed maximum.
///
/// The count only ever grows, one step at a time, and never passes `max`.
/// Incrementing never notifies by itself: the owner increments while it
/// holds its own locks and emits the signals once those are released, so
/// slots are free to call back into the owner.
///
/// # Signals
///
/// - `count_changed(usize)`: emitted with the new count after each increment
/// - `limit_reached(usize)`: emitted with the maximum when an add is refused
pub struct OptionListState {
    count: Property<usize>,
    max: usize,
    count_changed: Signal<usize>,
    limit_reached: Signal<usize>,
}

impl OptionListState {
    /// Create a state starting at `initial`, clamped to `max`.
    pub fn new(initial: usize, max: usize) -> Self {
        Self {
            count: Property::new(initial.min(max)),
            max,
            count_changed: Signal::new(),
            limit_reached: Signal::new(),
        }
    }

    /// The current count.
    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// The upper bound.
    pub fn max(&self) -> usize {
        self.max
    }

    /// How many more options fit.
    pub fn remaining(&self) -> usize {
        self.max - self.count()
    }

    /// Whether the count has reached the bound.
    pub fn is_full(&self) -> bool {
        self.count() >= self.max
    }

    /// Increment the count if below the bound. Emits nothing.
    ///
    /// Returns the count before the increment, or `None` at the ceiling.
    pub(crate) fn increment_silent(&self) -> Option<usize> {
        let max = self.max;
        self.count.modify(|count| {
            if *count >= max {
                None
            } else {
                *count += 1;
                Some(*count - 1)
            }
        })
    }

    /// Report an increment to `count_changed`.
    pub(crate) fn notify_count_changed(&self, count: usize) {
        self.count_changed.emit(count);
    }

    /// Report a refused add to `limit_reached`.
    pub(crate) fn notify_limit_reached(&self) {
        self.limit_reached.emit(self.max);
    }

    /// Signal emitted with the new count after each increment.
    pub fn count_changed(&self) -> &Signal<usize> {
        &self.count_changed
    }

    /// Signal emitted when an add is refused at the ceiling.
    pub fn limit_reached(&self) -> &Signal<usize> {
        &self.limit_reached
    }
}

impl std::fmt::Debug for OptionListState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionListState")
            .field("count", &self.count())
            .field("max", &self.max)
            .finish()
    }
}

static_assertions::assert_impl_all!(OptionListState: Send, Sync);
