//! Page hosting: one document plus its event plumbing.
//!
//! A [`Page`] owns a shared [`Document`], the ready signal, per-element click
//! listeners and a FIFO event queue. Events are delivered one at a time and
//! every handler runs to completion before the next event is taken. The
//! document lock is never held while handlers run, so handlers are free to
//! mutate the document.
//!
//! # Example
//!
//! ```
//! use pollform::dom::{Document, ElementBuilder};
//! use pollform::page::Page;
//!
//! let mut doc = Document::new();
//! let button = doc.build(&ElementBuilder::new("button").id("go"));
//! doc.append_child(doc.root(), button).unwrap();
//!
//! let page = Page::new(doc);
//! page.add_click_listener(button, |event| println!("clicked {:?}", event.target));
//! page.click_by_id("go").unwrap();
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use pollform_core::logging::{span_names, targets};
use pollform_core::{ConnectionId, PerfSpan, SharedTaskQueue, Signal, TaskId};

use crate::dom::{Document, NodeId};
use crate::error::{Error, Result};

/// A document shared between the page and the controllers that edit it.
pub type SharedDocument = Arc<Mutex<Document>>;

/// Loading state of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageState {
    /// The ready signal has not fired yet.
    #[default]
    Loading,
    /// The ready signal has fired.
    Ready,
}

/// Payload of a click event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    /// The element that was clicked.
    pub target: NodeId,
}

struct PageInner {
    document: SharedDocument,
    state: Mutex<PageState>,
    ready: Signal<()>,
    click_listeners: Mutex<HashMap<NodeId, Arc<Signal<ClickEvent>>>>,
    queue: SharedTaskQueue,
}

/// Host of one document and its event loop.
///
/// Cloning a `Page` yields another handle to the same page.
#[derive(Clone)]
pub struct Page {
    inner: Arc<PageInner>,
}

/// A non-owning handle to a [`Page`].
#[derive(Clone)]
pub struct WeakPage {
    inner: Weak<PageInner>,
}

impl WeakPage {
    /// Get a strong handle if the page is still alive.
    pub fn upgrade(&self) -> Option<Page> {
        self.inner.upgrade().map(|inner| Page { inner })
    }
}

impl Page {
    /// Host `document` in a new page in the loading state.
    pub fn new(document: Document) -> Self {
        Self {
            inner: Arc::new(PageInner {
                document: Arc::new(Mutex::new(document)),
                state: Mutex::new(PageState::Loading),
                ready: Signal::new(),
                click_listeners: Mutex::new(HashMap::new()),
                queue: SharedTaskQueue::new(),
            }),
        }
    }

    /// A non-owning handle to this page.
    pub fn downgrade(&self) -> WeakPage {
        WeakPage {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// The shared document.
    pub fn document(&self) -> SharedDocument {
        self.inner.document.clone()
    }

    /// Run `f` with read access to the document.
    pub fn with_document<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Document) -> R,
    {
        f(&self.inner.document.lock())
    }

    /// Run `f` with write access to the document.
    pub fn with_document_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Document) -> R,
    {
        f(&mut self.inner.document.lock())
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Current loading state.
    pub fn state(&self) -> PageState {
        *self.inner.state.lock()
    }

    /// Whether the ready signal has fired.
    pub fn is_ready(&self) -> bool {
        self.state() == PageState::Ready
    }

    /// Signal emitted once when the page finishes loading.
    pub fn ready(&self) -> &Signal<()> {
        &self.inner.ready
    }

    /// Finish loading: fire the ready signal, then drain queued events.
    ///
    /// Returns `false` without doing anything if the page is already ready.
    pub fn load(&self) -> bool {
        {
            let mut state = self.inner.state.lock();
            if *state == PageState::Ready {
                return false;
            }
            *state = PageState::Ready;
        }
        let _perf = PerfSpan::new("page_load");
        let slots = self.inner.ready.emit(());
        tracing::debug!(target: targets::PAGE, slots, "page ready");
        self.process_events();
        true
    }

    // ========================================================================
    // Click events
    // ========================================================================

    /// Register a click handler on `node`.
    pub fn add_click_listener<F>(&self, node: NodeId, handler: F) -> ConnectionId
    where
        F: Fn(&ClickEvent) + Send + Sync + 'static,
    {
        let signal = self
            .inner
            .click_listeners
            .lock()
            .entry(node)
            .or_insert_with(|| Arc::new(Signal::new()))
            .clone();
        signal.connect(handler)
    }

    /// Remove a click handler. Returns whether it was registered.
    pub fn remove_click_listener(&self, node: NodeId, id: ConnectionId) -> bool {
        self.listeners_for(node)
            .is_some_and(|signal| signal.disconnect(id))
    }

    /// Number of click handlers registered on `node`.
    pub fn click_listener_count(&self, node: NodeId) -> usize {
        self.listeners_for(node)
            .map_or(0, |signal| signal.connection_count())
    }

    fn listeners_for(&self, node: NodeId) -> Option<Arc<Signal<ClickEvent>>> {
        self.inner.click_listeners.lock().get(&node).cloned()
    }

    /// Queue a click on `node` without delivering it yet.
    pub fn post_click(&self, node: NodeId) -> TaskId {
        let page = self.downgrade();
        self.inner.queue.post(move || {
            if let Some(page) = page.upgrade() {
                page.dispatch_click(node);
            }
        })
    }

    /// Drop a queued event before it is delivered.
    ///
    /// Returns `false` if the event was already delivered or cancelled.
    pub fn cancel_event(&self, id: TaskId) -> bool {
        let cancelled = self.inner.queue.cancel(id);
        tracing::trace!(target: targets::PAGE, task_id = id.as_u64(), cancelled, "cancel event");
        cancelled
    }

    /// Number of events waiting in the queue.
    pub fn pending_events(&self) -> usize {
        self.inner.queue.pending_count()
    }

    /// Deliver queued events until the queue is empty.
    ///
    /// Returns the number of events delivered.
    pub fn process_events(&self) -> usize {
        let _span = tracing::trace_span!(target: targets::PAGE, span_names::EVENT_LOOP).entered();
        self.inner.queue.process_all()
    }

    /// Click `node` and deliver the event.
    pub fn click(&self, node: NodeId) {
        self.post_click(node);
        self.process_events();
    }

    /// Click the element with the given id and deliver the event.
    pub fn click_by_id(&self, id: &str) -> Result<()> {
        let node = self
            .with_document(|doc| doc.element_by_id(id))
            .ok_or_else(|| Error::element_not_found(id))?;
        self.click(node);
        Ok(())
    }

    fn dispatch_click(&self, node: NodeId) {
        let Some(listeners) = self.listeners_for(node) else {
            tracing::trace!(target: targets::PAGE, "click with no listeners");
            return;
        };
        let handled = listeners.emit(ClickEvent { target: node });
        tracing::trace!(target: targets::PAGE, handled, "click dispatched");
    }
}

static_assertions::assert_impl_all!(Page: Send, Sync);
