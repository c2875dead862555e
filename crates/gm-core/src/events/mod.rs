use std::sync::Arc;
use parking_lot::Mutex;
use ahash::AHashMap;

/// Dashboard-wide event bus
pub struct EventBus {
    handlers: Arc<Mutex<AHashMap<std::any::TypeId, Vec<Box<dyn EventHandler>>>>>,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Dashboard events
pub mod events {
    use super::Event;
    use crate::model::{Category, ChartType, YearFilter};

    /// Medal data and geometry finished loading
    #[derive(Debug, Clone)]
    pub struct DataLoaded {
        pub record_count: usize,
        pub country_count: usize,
        pub shape_count: usize,
    }

    /// A country was toggled or the selection was cleared
    #[derive(Debug, Clone)]
    pub struct SelectionChanged {
        /// Selected codes in insertion order, after the change
        pub selected: Vec<String>,
    }

    /// Year or category filter changed
    #[derive(Debug, Clone)]
    pub struct FiltersChanged {
        pub year: YearFilter,
        pub category: Category,
    }

    /// The chart next to the map was switched
    #[derive(Debug, Clone)]
    pub struct ChartTypeChanged {
        pub chart: ChartType,
    }

    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(
        DataLoaded,
        SelectionChanged,
        FiltersChanged,
        ChartTypeChanged
    );
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
        }
    }

    /// Subscribe to events of a specific type
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();
        handlers.entry(type_id).or_insert_with(Vec::new).push(handler);
    }

    /// Publish an event. Handlers must not publish from inside `handle`.
    pub fn publish<E: Event>(&self, event: E) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();

        if let Some(event_handlers) = handlers.get_mut(&type_id) {
            for handler in event_handlers.iter_mut() {
                handler.handle(&event);
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Event handler backed by a closure
pub struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::events::{ChartTypeChanged, SelectionChanged};
    use crate::model::ChartType;

    #[test]
    fn test_publish_reaches_matching_subscribers_only() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        bus.subscribe::<SelectionChanged>(handler_from_fn(move |event| {
            if let Some(e) = event.as_any().downcast_ref::<SelectionChanged>() {
                sink.lock().push(e.selected.clone());
            }
        }));

        bus.publish(SelectionChanged { selected: vec!["USA".to_string()] });
        bus.publish(ChartTypeChanged { chart: ChartType::Line });

        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], vec!["USA".to_string()]);
    }
}
