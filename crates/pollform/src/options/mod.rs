//! Dynamic poll option lists.
//!
//! - [`OptionListController`]: appends option field groups on trigger clicks
//! - [`OptionListState`]: the bounded option counter and its signals
//! - [`OptionListConfig`]: ids, limits and rendering policy
//! - [`PlaceholderList`]: example values for option inputs

mod config;
mod controller;
mod field_group;
mod placeholders;
mod state;

pub use config::{
    LabelStyle, OptionListConfig, DEFAULT_CONTAINER_ID, DEFAULT_HEADER_COUNT, DEFAULT_INPUT_NAME,
    DEFAULT_MAX_OPTIONS, DEFAULT_SEED_COUNT, DEFAULT_TRIGGER_ID,
};
pub use controller::{AddOutcome, OptionListController};
pub use field_group::{option_field_group, OPTION_GROUP_CLASS};
pub use placeholders::PlaceholderList;
pub use state::OptionListState;
