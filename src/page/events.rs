use std::collections::HashMap;
use std::rc::Rc;

use super::Page;
use crate::Result;
use crate::dom::NodeId;

pub(crate) type Handler = Rc<dyn Fn(&mut Page, &mut Event) -> Result<()>>;

/// Where an event is dispatched or a listener is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Window,
    Node(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Clone)]
struct Listener {
    id: ListenerId,
    capture: bool,
    handler: Handler,
}

#[derive(Default)]
pub(crate) struct ListenerStore {
    map: HashMap<EventTarget, HashMap<String, Vec<Listener>>>,
}

impl ListenerStore {
    fn add(&mut self, target: EventTarget, event: String, listener: Listener) {
        self.map
            .entry(target)
            .or_default()
            .entry(event)
            .or_default()
            .push(listener);
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        let mut removed = false;
        self.map.retain(|_, events| {
            events.retain(|_, listeners| {
                if let Some(pos) = listeners.iter().position(|listener| listener.id == id) {
                    listeners.remove(pos);
                    removed = true;
                }
                !listeners.is_empty()
            });
            !events.is_empty()
        });
        removed
    }

    fn contains(&self, id: ListenerId) -> bool {
        self.map
            .values()
            .flat_map(HashMap::values)
            .flatten()
            .any(|listener| listener.id == id)
    }

    fn get(&self, target: EventTarget, event: &str, capture: bool) -> Vec<Listener> {
        self.map
            .get(&target)
            .and_then(|events| events.get(event))
            .map(|listeners| {
                listeners
                    .iter()
                    .filter(|listener| listener.capture == capture)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn count(&self, target: EventTarget, event: &str) -> usize {
        self.map
            .get(&target)
            .and_then(|events| events.get(event))
            .map_or(0, Vec::len)
    }
}

#[derive(Debug, Clone)]
pub struct Event {
    event_type: String,
    target: EventTarget,
    current_target: EventTarget,
    key: Option<String>,
    bubbles: bool,
    default_prevented: bool,
    propagation_stopped: bool,
    immediate_propagation_stopped: bool,
}

impl Event {
    pub fn new(event_type: &str, target: EventTarget) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            key: None,
            bubbles: !matches!(event_type, "focus" | "blur" | "load" | "scroll" | "resize"),
            default_prevented: false,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
        }
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn target(&self) -> EventTarget {
        self.target
    }

    /// The target node, or `None` for window events.
    pub fn target_node(&self) -> Option<NodeId> {
        match self.target {
            EventTarget::Node(node) => Some(node),
            EventTarget::Window => None,
        }
    }

    pub fn current_target(&self) -> EventTarget {
        self.current_target
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }
}

impl Page {
    pub fn add_event_listener<F>(
        &mut self,
        target: EventTarget,
        event_type: &str,
        handler: F,
    ) -> ListenerId
    where
        F: Fn(&mut Page, &mut Event) -> Result<()> + 'static,
    {
        self.register_listener(target, event_type, false, Rc::new(handler))
    }

    pub fn add_capture_listener<F>(
        &mut self,
        target: EventTarget,
        event_type: &str,
        handler: F,
    ) -> ListenerId
    where
        F: Fn(&mut Page, &mut Event) -> Result<()> + 'static,
    {
        self.register_listener(target, event_type, true, Rc::new(handler))
    }

    fn register_listener(
        &mut self,
        target: EventTarget,
        event_type: &str,
        capture: bool,
        handler: Handler,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.add(
            target,
            event_type.to_string(),
            Listener {
                id,
                capture,
                handler,
            },
        );
        id
    }

    /// Returns whether the listener was still registered.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self, target: EventTarget, event_type: &str) -> usize {
        self.listeners.count(target, event_type)
    }

    pub(crate) fn dispatch_event(&mut self, target: EventTarget, event_type: &str) -> Result<Event> {
        self.dispatch_prepared_event(Event::new(event_type, target))
    }

    /// Runs capture, target and bubble phases for `event` and returns its final state.
    pub(crate) fn dispatch_prepared_event(&mut self, mut event: Event) -> Result<Event> {
        let target_node = match event.target {
            EventTarget::Window => {
                self.invoke_listeners(EventTarget::Window, &mut event, true)?;
                if !event.propagation_stopped {
                    self.invoke_listeners(EventTarget::Window, &mut event, false)?;
                }
                self.trace_event_done(&event, "completed");
                return Ok(event);
            }
            EventTarget::Node(node) => node,
        };

        let mut path = Vec::new();
        let mut cursor = Some(target_node);
        while let Some(node) = cursor {
            path.push(node);
            cursor = self.dom.parent(node);
        }
        path.reverse();
        let ancestors = &path[..path.len() - 1];

        // Capture phase.
        for node in ancestors {
            event.current_target = EventTarget::Node(*node);
            self.invoke_listeners(event.current_target, &mut event, true)?;
            if event.propagation_stopped {
                self.trace_event_done(&event, "propagation_stopped");
                return Ok(event);
            }
        }

        // Target phase: capture listeners first.
        event.current_target = event.target;
        self.invoke_listeners(event.target, &mut event, true)?;
        if event.propagation_stopped {
            self.trace_event_done(&event, "propagation_stopped");
            return Ok(event);
        }

        self.invoke_listeners(event.target, &mut event, false)?;
        if event.propagation_stopped {
            self.trace_event_done(&event, "propagation_stopped");
            return Ok(event);
        }

        if event.bubbles {
            for node in ancestors.iter().rev() {
                event.current_target = EventTarget::Node(*node);
                self.invoke_listeners(event.current_target, &mut event, false)?;
                if event.propagation_stopped {
                    self.trace_event_done(&event, "propagation_stopped");
                    return Ok(event);
                }
            }
        }

        self.trace_event_done(&event, "completed");
        Ok(event)
    }

    fn invoke_listeners(
        &mut self,
        current: EventTarget,
        event: &mut Event,
        capture: bool,
    ) -> Result<()> {
        let listeners = self.listeners.get(current, &event.event_type, capture);
        for listener in listeners {
            // Listeners removed by an earlier handler of this dispatch are skipped.
            if !self.listeners.contains(listener.id) {
                continue;
            }
            if self.tracing_active() {
                let phase = if capture { "capture" } else { "bubble" };
                let line = format!(
                    "[event] {} target={} current={} phase={} default_prevented={}",
                    event.event_type,
                    self.trace_target_label(event.target),
                    self.trace_target_label(current),
                    phase,
                    event.default_prevented
                );
                self.trace_line(line);
            }
            (listener.handler)(self, event)?;
            if event.immediate_propagation_stopped {
                break;
            }
        }
        Ok(())
    }

    fn trace_event_done(&mut self, event: &Event, outcome: &str) {
        if !self.tracing_active() {
            return;
        }
        let line = format!(
            "[event] done {} target={} current={} outcome={} default_prevented={} propagation_stopped={}",
            event.event_type,
            self.trace_target_label(event.target),
            self.trace_target_label(event.current_target),
            outcome,
            event.default_prevented,
            event.propagation_stopped
        );
        self.trace_line(line);
    }
}
