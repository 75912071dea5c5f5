//! Observation of silent fallbacks.
//!
//! The resolver never fails: unknown locales and unresolved key paths fall
//! back to safe defaults. An observer makes those fallbacks visible during
//! development without changing what callers receive.

use std::sync::{
    Mutex,
    PoisonError,
};

use crate::locale::Locale;

/// A fallback taken by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackEvent {
    /// The requested locale is not supported; `fallback` was served instead
    UnknownLocale { requested: String, fallback: Locale },
    /// The key path did not resolve to a string in `locale`; the path was returned
    MissingKey { locale: Locale, path: String },
}

/// Receives fallback events.
pub trait FallbackObserver: Send + Sync {
    fn on_fallback(&self, event: &FallbackEvent);
}

/// Logs fallbacks through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl FallbackObserver for TracingObserver {
    fn on_fallback(&self, event: &FallbackEvent) {
        match event {
            FallbackEvent::UnknownLocale { requested, fallback } => {
                tracing::debug!(%requested, %fallback, "Unknown locale, serving default dictionary");
            }
            FallbackEvent::MissingKey { locale, path } => {
                tracing::warn!(%locale, %path, "Translation key not found");
            }
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    /// Events in arrival order
    events: Mutex<Vec<FallbackEvent>>,
}

impl RecordingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<FallbackEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl FallbackObserver for RecordingObserver {
    fn on_fallback(&self, event: &FallbackEvent) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).push(event.clone());
    }
}
