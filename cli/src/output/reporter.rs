//! `TerminalReporter`: Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::ProgressReporter`
//! trait so application services can emit progress events without depending on
//! any presentation type directly.

use std::cell::RefCell;

use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::{OutputContext, progress};

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `step()` starts a spinner on a TTY, otherwise prints `"  → {message}"`
/// - `success()` settles the spinner with `✓`, or prints `"  ✓ {message}"`
/// - `warn()` and `info()` settle any running spinner first
///
/// Everything except errors is suppressed when `ctx.quiet`.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    active: RefCell<Option<(ProgressBar, String)>>,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            active: RefCell::new(None),
        }
    }

    /// Settle a running spinner, keeping its message on screen.
    fn settle(&self) {
        if let Some((pb, msg)) = self.active.borrow_mut().take() {
            progress::finish_ok(&pb, &msg);
        }
    }
}

impl Drop for TerminalReporter<'_> {
    fn drop(&mut self) {
        if let Some((pb, msg)) = self.active.get_mut().take() {
            progress::finish_error(&pb, &msg);
        }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if self.ctx.quiet {
            return;
        }
        self.settle();
        if self.ctx.show_progress() {
            *self.active.borrow_mut() = Some((progress::spinner(message), message.to_string()));
        } else {
            self.ctx.step(message);
        }
    }

    fn success(&self, message: &str) {
        if self.ctx.quiet {
            return;
        }
        match self.active.borrow_mut().take() {
            Some((pb, _)) => progress::finish_ok(&pb, message),
            None => println!("  {} {message}", "✓".style(self.ctx.styles.success)),
        }
    }

    fn warn(&self, message: &str) {
        self.settle();
        self.ctx.warn(message);
    }

    fn info(&self, message: &str) {
        self.settle();
        self.ctx.info(message);
    }
}

/// Reporter for `--json` mode: stdout carries only the JSON document, so
/// progress goes to the diagnostic log instead.
pub struct QuietReporter;

impl ProgressReporter for QuietReporter {
    fn step(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn success(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }
}

/// Reporter selected by output mode.
pub enum Reporter<'a> {
    Terminal(TerminalReporter<'a>),
    Quiet(QuietReporter),
}

impl ProgressReporter for Reporter<'_> {
    fn step(&self, message: &str) {
        match self {
            Self::Terminal(r) => r.step(message),
            Self::Quiet(r) => r.step(message),
        }
    }

    fn success(&self, message: &str) {
        match self {
            Self::Terminal(r) => r.success(message),
            Self::Quiet(r) => r.success(message),
        }
    }

    fn warn(&self, message: &str) {
        match self {
            Self::Terminal(r) => r.warn(message),
            Self::Quiet(r) => r.warn(message),
        }
    }

    fn info(&self, message: &str) {
        match self {
            Self::Terminal(r) => r.info(message),
            Self::Quiet(r) => r.info(message),
        }
    }
}
