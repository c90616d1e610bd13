//! Per-event observers.
//!
//! Observers see each event after its payload has been absorbed into the
//! digest. They never influence the verdict.

use oat_log::Event;

/// Callback invoked once per replayed event
pub trait EventObserver {
    /// Called in decode order
    fn on_event(&mut self, event: &Event);
}

impl<F> EventObserver for F
where
    F: FnMut(&Event),
{
    fn on_event(&mut self, event: &Event) {
        self(event);
    }
}

/// Observer that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl EventObserver for NoopObserver {
    fn on_event(&mut self, _event: &Event) {}
}

/// Emits each event as a `debug` tracing record
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl EventObserver for TracingObserver {
    fn on_event(&mut self, event: &Event) {
        tracing::debug!(offset = event.offset, kind = %event.kind(), "{}", event);
    }
}
