use tldr_inference::SummarySession;
use tokio::sync::Mutex;

/// Requests are served one at a time against the shared session so the
/// single-slot cache only ever has one writer.
pub struct AppState {
    pub session: Mutex<SummarySession>,
}

impl AppState {
    pub fn new(session: SummarySession) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }
}
