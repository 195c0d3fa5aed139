//! Prelude module for pollform.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```
//! use pollform::prelude::*;
//! ```

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use pollform_core::{ConnectionId, Property, Signal};

// ============================================================================
// Element Tree and Page
// ============================================================================

pub use crate::dom::{Document, ElementBuilder, NodeId};
pub use crate::markup::poll_form_page;
pub use crate::page::{ClickEvent, Page, PageState};

// ============================================================================
// Option Lists
// ============================================================================

pub use crate::options::{
    AddOutcome, LabelStyle, OptionListConfig, OptionListController, OptionListState,
    PlaceholderList,
};

// ============================================================================
// Errors
// ============================================================================

pub use crate::error::{Error, Result};
