//! pollform - dynamic option lists for poll creation forms.
//!
//! A poll form starts with a few option inputs and grows by one field group
//! each time the "add option" control is clicked, up to a fixed maximum.
//! This crate provides the page model that the form lives in and the
//! controller that drives the option list.
//!
//! # Example
//!
//! ```
//! use pollform::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = OptionListConfig::default();
//!     let page = Page::new(poll_form_page(&config));
//!     let controller = OptionListController::new(&page, config)?;
//!     controller.attach();
//!     page.load();
//!
//!     page.click_by_id("add-poll-option")?;
//!     assert_eq!(controller.option_count(), 4);
//!     Ok(())
//! }
//! ```

pub mod dom;
pub mod error;
pub mod markup;
pub mod options;
pub mod page;
pub mod prelude;

pub use error::{Error, Result};
