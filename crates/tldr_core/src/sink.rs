use std::sync::Mutex;

use crate::types::PipelineState;

/// Receives the progress, result and error strings produced while a summary
/// is being built.
pub trait PresentationSink: Send + Sync {
    fn show_progress(&self, text: &str);

    fn show_result(&self, text: &str);

    fn show_error(&self, text: &str);

    /// Called on every pipeline state transition.
    fn on_state(&self, _state: &PipelineState) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Progress(String),
    Result(String),
    Error(String),
    State(PipelineState),
}

/// Records every call in order. Used by the web front-end to return the
/// progress trail alongside the result, and by tests.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: SinkEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn progress(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Progress(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn states(&self) -> Vec<PipelineState> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::State(state) => Some(state),
                _ => None,
            })
            .collect()
    }

    pub fn last_result(&self) -> Option<String> {
        self.events().into_iter().rev().find_map(|e| match e {
            SinkEvent::Result(text) => Some(text),
            _ => None,
        })
    }

    pub fn last_error(&self) -> Option<String> {
        self.events().into_iter().rev().find_map(|e| match e {
            SinkEvent::Error(text) => Some(text),
            _ => None,
        })
    }
}

impl PresentationSink for CollectingSink {
    fn show_progress(&self, text: &str) {
        self.push(SinkEvent::Progress(text.to_string()));
    }

    fn show_result(&self, text: &str) {
        self.push(SinkEvent::Result(text.to_string()));
    }

    fn show_error(&self, text: &str) {
        self.push(SinkEvent::Error(text.to_string()));
    }

    fn on_state(&self, state: &PipelineState) {
        self.push(SinkEvent::State(*state));
    }
}
