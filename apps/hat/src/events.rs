//! Event handling and user feedback

use crate::logging::log_event_with_tracing;
use console::{Style, Term};
use hat_events::{AppEvent, EventMessage, EventReceiver, ResolverEvent};

/// Turns resolver events into log records and short status lines
pub struct EventHandler {
    /// Status lines are suppressed in JSON mode
    show_status: bool,
    colors_enabled: bool,
    term: Term,
    handled: usize,
}

impl EventHandler {
    /// Create new event handler
    pub fn new(show_status: bool, colors_enabled: bool) -> Self {
        Self {
            show_status,
            colors_enabled,
            term: Term::stderr(),
            handled: 0,
        }
    }

    /// Handle every event still queued on `receiver`
    pub fn drain(&mut self, receiver: &mut EventReceiver) {
        while let Ok(message) = receiver.try_recv() {
            self.handle_event(&message);
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, message: &EventMessage) {
        self.handled += 1;
        log_event_with_tracing(message);

        if !self.show_status {
            return;
        }

        match &message.event {
            AppEvent::Resolver(ResolverEvent::ModDisabled { name, version }) => {
                self.status(&format!("Skipping disabled mod {name} {version}"));
            }
            AppEvent::Resolver(ResolverEvent::DuplicateDiscarded {
                name,
                kept_version,
                discarded_version,
            }) => {
                self.status(&format!(
                    "Ignoring {name} {discarded_version}, using {kept_version} instead"
                ));
            }
            _ => {}
        }
    }

    /// Number of events handled so far
    pub fn handled(&self) -> usize {
        self.handled
    }

    fn status(&self, message: &str) {
        let line = if self.colors_enabled {
            Style::new().dim().apply_to(message).to_string()
        } else {
            message.to_string()
        };
        if let Err(e) = self.term.write_line(&line) {
            tracing::debug!(error = %e, "failed to write status line");
        }
    }
}
