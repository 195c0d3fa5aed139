//! Logging and debugging facilities for pollform.
//!
//! This module provides:
//! - Target and span names for filtering the `tracing` output per subsystem
//! - Tree formatting options shared by debug views of element trees
//! - Performance tracing hooks for profiling
//!
//! # Tracing Integration
//!
//! pollform uses the `tracing` crate for instrumentation and never installs
//! a subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("pollform=debug")
//!         .init();
//! }
//! ```

/// Span names used throughout pollform for tracing.
pub mod span_names {
    /// Event queue processing span.
    pub const EVENT_LOOP: &str = "pollform::event_loop";
    /// Option list mutation span.
    pub const OPTIONS: &str = "pollform::options";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "pollform_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "pollform_core::signal";
    /// Task queue target.
    pub const TASK: &str = "pollform_core::task";
    /// Performance spans.
    pub const PERF: &str = "pollform::perf";
    /// Element tree target.
    pub const DOM: &str = "pollform::dom";
    /// Page hosting and event dispatch target.
    pub const PAGE: &str = "pollform::page";
    /// Option list controller target.
    pub const OPTIONS: &str = "pollform::options";
    /// Configuration loading target.
    pub const CONFIG: &str = "pollform::config";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact dash-prefixed representation.
    Compact,
}

impl TreeStyle {
    /// Build the line prefix for a node at `depth`.
    ///
    /// `is_last` selects the closing connector for the last child of a parent.
    pub fn prefix(self, depth: usize, is_last: bool, indent_size: usize) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            for _ in 0..indent_size {
                prefix.push(' ');
            }
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix.push(' ');
        prefix
    }
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show node IDs.
    pub show_ids: bool,
    /// Whether to show element attributes.
    pub show_attributes: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: false,
            show_attributes: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Options for minimal output: tag names only.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_attributes: false,
            ..Default::default()
        }
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "pollform::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Trace-level event with the core target.
#[macro_export]
macro_rules! pollform_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "pollform_core", $($arg)*)
    };
}
