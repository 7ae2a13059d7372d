//! Base controller trait

use crate::document::Document;
use crate::events::Event;

/// Base trait for all page controllers
pub trait Controller {
    /// Stable name used in logs and for routing
    fn name(&self) -> &str;

    /// Handle a host event. Returns `true` if the event was consumed.
    fn handle_event(&mut self, event: &Event, doc: &mut dyn Document) -> bool;

    /// Run timers due at or before `now_ms`
    fn advance(&mut self, now_ms: u64, doc: &mut dyn Document) {
        let _ = (now_ms, doc);
    }
}
