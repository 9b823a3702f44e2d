//! View-scoped render event channel.
//!
//! Hosts subscribe explicit callbacks on the engine instead of listening on
//! an ambient global bus, so two panels in the same process never observe
//! each other's render lifecycle.

/// Events emitted at the render-pass boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A render pass finished; emitted even when the draw step failed so the
    /// host never hangs waiting on a pass.
    RenderCompleted,
    /// The plotting surface rejected the draw call.
    RenderFailed { message: String },
}

type Subscriber = Box<dyn FnMut(&EngineEvent)>;

/// Publish/subscribe channel owned by one engine.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&EngineEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn emit(&mut self, event: &EngineEvent) {
        for subscriber in self.subscribers.iter_mut() {
            subscriber(event);
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
