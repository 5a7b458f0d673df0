use tldr_core::{PipelineState, PresentationSink};

/// Progress and errors on stderr, the final summary on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalSink {
    pub quiet: bool,
}

impl PresentationSink for TerminalSink {
    fn show_progress(&self, text: &str) {
        if !self.quiet {
            eprintln!("⏳ {}", text);
        }
    }

    fn show_result(&self, text: &str) {
        println!("{}", text);
    }

    fn show_error(&self, text: &str) {
        eprintln!("❌ {}", text);
    }

    fn on_state(&self, state: &PipelineState) {
        tracing::debug!("pipeline state: {}", state);
    }
}
