//! The option list controller.
//!
//! An [`OptionListController`] appends option field groups to a container
//! element whenever its trigger control is clicked, until the configured
//! maximum is reached.
//!
//! # Example
//!
//! ```
//! use pollform::markup::poll_form_page;
//! use pollform::options::{OptionListConfig, OptionListController};
//! use pollform::page::Page;
//!
//! let config = OptionListConfig::default();
//! let page = Page::new(poll_form_page(&config));
//! let controller = OptionListController::new(&page, config).unwrap();
//! controller.attach();
//!
//! page.load();
//! assert_eq!(controller.option_count(), 3);
//!
//! page.click_by_id("add-poll-option").unwrap();
//! assert_eq!(controller.option_count(), 4);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use pollform_core::logging::{span_names, targets};
use pollform_core::ConnectionId;

use super::config::OptionListConfig;
use super::field_group::{option_field_group, OPTION_GROUP_CLASS};
use super::state::OptionListState;
use crate::dom::NodeId;
use crate::error::{Error, Result};
use crate::page::{Page, SharedDocument, WeakPage};

/// Result of an add request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A field group was inserted.
    Added {
        /// 0-based index of the new option within the list.
        option_index: usize,
        /// Child position of the group within the container.
        position: usize,
        /// The new field group element.
        node: NodeId,
    },
    /// The list is full; nothing changed.
    LimitReached,
}

impl AddOutcome {
    /// Whether a field group was inserted.
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added { .. })
    }

    /// The inserted field group, if any.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            AddOutcome::Added { node, .. } => Some(*node),
            AddOutcome::LimitReached => None,
        }
    }
}

struct ControllerInner {
    document: SharedDocument,
    page: WeakPage,
    config: OptionListConfig,
    state: OptionListState,
    /// Serializes add requests so check, insert and increment stay together.
    add_lock: Mutex<()>,
    trigger: Mutex<Option<(NodeId, ConnectionId)>>,
    ready_connection: Mutex<Option<ConnectionId>>,
}

/// Controller of one dynamic option list.
///
/// Each controller owns its own count, so several lists can live on the same
/// page (or on different pages) without interfering. Cloning yields another
/// handle to the same controller.
///
/// The page keeps the controller alive through its registered handlers; call
/// [`detach`](Self::detach) to unregister them.
#[derive(Clone)]
pub struct OptionListController {
    inner: Arc<ControllerInner>,
}

impl OptionListController {
    /// Create a controller for `page`.
    ///
    /// The configuration is validated; nothing on the page changes yet.
    pub fn new(page: &Page, config: OptionListConfig) -> Result<Self> {
        config.validate()?;
        let state = OptionListState::new(config.initial_count, config.max_options);
        Ok(Self {
            inner: Arc::new(ControllerInner {
                document: page.document(),
                page: page.downgrade(),
                config,
                state,
                add_lock: Mutex::new(()),
                trigger: Mutex::new(None),
                ready_connection: Mutex::new(None),
            }),
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &OptionListConfig {
        &self.inner.config
    }

    /// The bounded counter, with its change signals.
    pub fn state(&self) -> &OptionListState {
        &self.inner.state
    }

    /// Number of options rendered so far.
    pub fn option_count(&self) -> usize {
        self.inner.state.count()
    }

    /// Upper bound on the option count.
    pub fn max_options(&self) -> usize {
        self.inner.state.max()
    }

    /// How many more options can be added.
    pub fn remaining(&self) -> usize {
        self.inner.state.remaining()
    }

    /// Whether the list is full.
    pub fn is_full(&self) -> bool {
        self.inner.state.is_full()
    }

    /// Whether the click handler is registered.
    pub fn is_initialized(&self) -> bool {
        self.inner.trigger.lock().is_some()
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Run [`initialize`](Self::initialize) when the page becomes ready.
    ///
    /// If the page is already ready, initialization runs right away. A
    /// second call does nothing.
    pub fn attach(&self) {
        let Some(page) = self.inner.page.upgrade() else {
            tracing::debug!(target: targets::OPTIONS, "attach on a dropped page");
            return;
        };

        {
            let mut ready = self.inner.ready_connection.lock();
            if ready.is_some() {
                return;
            }
            let controller = self.clone();
            *ready = Some(page.ready().connect(move |_| {
                if let Err(err) = controller.initialize() {
                    tracing::error!(target: targets::OPTIONS, error = %err, "option list initialization failed");
                }
            }));
        }

        if page.is_ready() {
            if let Err(err) = self.initialize() {
                tracing::error!(target: targets::OPTIONS, error = %err, "option list initialization failed");
            }
        }
    }

    /// Register the click handler on the trigger, then seed the list.
    ///
    /// Returns `Ok(false)` without side effects when the trigger element is
    /// missing or the controller is already initialized. Seed calls run
    /// regardless of the current count; those that hit the ceiling are
    /// no-ops.
    pub fn initialize(&self) -> Result<bool> {
        let page = self.inner.page.upgrade().ok_or(Error::PageClosed)?;
        let config = &self.inner.config;

        let Some(trigger) = self
            .inner
            .document
            .lock()
            .element_by_id(&config.trigger_id)
        else {
            tracing::debug!(
                target: targets::OPTIONS,
                trigger_id = %config.trigger_id,
                "trigger element missing, option list stays inactive"
            );
            return Ok(false);
        };

        {
            let mut registered = self.inner.trigger.lock();
            if registered.is_some() {
                return Ok(false);
            }
            let controller = self.clone();
            let connection = page.add_click_listener(trigger, move |_| {
                if let Err(err) = controller.add_option() {
                    tracing::error!(target: targets::OPTIONS, error = %err, "failed to add poll option");
                }
            });
            *registered = Some((trigger, connection));
        }

        for _ in 0..config.seed_count {
            self.add_option()?;
        }
        tracing::debug!(
            target: targets::OPTIONS,
            count = self.option_count(),
            "option list initialized"
        );
        Ok(true)
    }

    /// Unregister every handler this controller installed on the page.
    ///
    /// Returns whether anything was registered.
    pub fn detach(&self) -> bool {
        let Some(page) = self.inner.page.upgrade() else {
            return false;
        };
        let mut removed = false;
        if let Some(id) = self.inner.ready_connection.lock().take() {
            removed |= page.ready().disconnect(id);
        }
        if let Some((trigger, id)) = self.inner.trigger.lock().take() {
            removed |= page.remove_click_listener(trigger, id);
        }
        removed
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Append one option field group, unless the list is full.
    ///
    /// The group goes right after the header children and the options added
    /// before it. A missing container is an error and leaves the count as it
    /// was. `count_changed` or `limit_reached` is emitted after the add has
    /// finished, so their slots may add options themselves.
    pub fn add_option(&self) -> Result<AddOutcome> {
        let _span = tracing::trace_span!(target: targets::OPTIONS, span_names::OPTIONS).entered();
        let outcome = self.insert_next_option()?;

        let state = &self.inner.state;
        match outcome {
            AddOutcome::Added { option_index, .. } => state.notify_count_changed(option_index + 1),
            AddOutcome::LimitReached => state.notify_limit_reached(),
        }
        Ok(outcome)
    }

    /// Check, insert and count one option under the add lock. Emits nothing.
    fn insert_next_option(&self) -> Result<AddOutcome> {
        let _serialized = self.inner.add_lock.lock();
        let state = &self.inner.state;
        let config = &self.inner.config;

        if state.is_full() {
            tracing::debug!(target: targets::OPTIONS, max = state.max(), "option limit reached");
            return Ok(AddOutcome::LimitReached);
        }

        let option_index = state.count();
        let (node, position) = {
            let mut doc = self.inner.document.lock();
            let container = doc
                .element_by_id(&config.container_id)
                .ok_or_else(|| Error::element_not_found(config.container_id.as_str()))?;
            doc.ensure_container(container)?;
            let node = doc.build(&option_field_group(option_index, config));
            let position = doc.insert_child_at(container, config.header_count + option_index, node)?;
            (node, position)
        };

        state.increment_silent();
        tracing::trace!(target: targets::OPTIONS, option_index, position, "option added");
        Ok(AddOutcome::Added {
            option_index,
            position,
            node,
        })
    }

    /// The option field groups currently in the container, in order.
    pub fn option_nodes(&self) -> Result<Vec<NodeId>> {
        let doc = self.inner.document.lock();
        let container = doc
            .element_by_id(&self.inner.config.container_id)
            .ok_or_else(|| Error::element_not_found(self.inner.config.container_id.as_str()))?;
        Ok(doc.children_with_class(container, OPTION_GROUP_CLASS))
    }

    /// Current values of all option inputs under the container, in order.
    pub fn option_values(&self) -> Result<Vec<String>> {
        let doc = self.inner.document.lock();
        let config = &self.inner.config;
        let container = doc
            .element_by_id(&config.container_id)
            .ok_or_else(|| Error::element_not_found(config.container_id.as_str()))?;
        Ok(doc
            .elements_by_name(container, &config.input_name)
            .into_iter()
            .filter_map(|input| doc.value(input).map(str::to_string))
            .collect())
    }
}

impl std::fmt::Debug for OptionListController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionListController")
            .field("state", &self.inner.state)
            .field("container_id", &self.inner.config.container_id)
            .field("trigger_id", &self.inner.config.trigger_id)
            .finish()
    }
}

static_assertions::assert_impl_all!(OptionListController: Send, Sync);
