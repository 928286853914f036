//! Contact data and notification sinks.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use super::boundary::Edge;

/// Contact geometry handed to the impulse resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactFrame {
    /// Unit contact normal, pointing into free space.
    pub normal: Vec2,
    /// Offset from the center of mass to the contact point.
    pub offset: Vec2,
}

impl ContactFrame {
    /// Contact frame for a circle of `radius` resting on `edge`.
    #[inline]
    pub fn for_edge(edge: Edge, radius: f32) -> Self {
        Self {
            normal: edge.normal(),
            offset: edge.contact_offset(radius),
        }
    }
}

/// Kind of contact notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactKind {
    EdgeBounce,
}

impl ContactKind {
    /// Topic name used when forwarding to string-keyed transports.
    pub fn as_str(self) -> &'static str {
        match self {
            ContactKind::EdgeBounce => "edge-bounce",
        }
    }
}

/// Notification emitted once per resolved contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub kind: ContactKind,
    pub body: hecs::Entity,
    pub edge: Edge,
    /// Contact point in world space.
    pub point: Vec2,
}

/// Receiver for contact notifications.
///
/// Events are delivered synchronously, in resolution order.
pub trait EventSink {
    fn publish(&mut self, event: ContactEvent);
}

/// Discards every event. Used when no sink is configured.
impl EventSink for () {
    #[inline]
    fn publish(&mut self, _event: ContactEvent) {}
}

impl EventSink for Vec<ContactEvent> {
    #[inline]
    fn publish(&mut self, event: ContactEvent) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    #[inline]
    fn publish(&mut self, event: ContactEvent) {
        (**self).publish(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    #[inline]
    fn publish(&mut self, event: ContactEvent) {
        (**self).publish(event);
    }
}

/// Shared sink: the world holds one handle, the host keeps another.
impl<S: EventSink> EventSink for Rc<RefCell<S>> {
    #[inline]
    fn publish(&mut self, event: ContactEvent) {
        self.borrow_mut().publish(event);
    }
}

/// Recording sink that the host drains between ticks.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<ContactEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContactEvent> {
        self.events.iter()
    }

    /// Events for a single body, in emission order.
    pub fn for_body(&self, body: hecs::Entity) -> impl Iterator<Item = &ContactEvent> + '_ {
        self.events.iter().filter(move |e| e.body == body)
    }

    /// Take all recorded events, leaving the log empty.
    pub fn drain(&mut self) -> Vec<ContactEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for EventLog {
    fn publish(&mut self, event: ContactEvent) {
        self.events.push(event);
    }
}
