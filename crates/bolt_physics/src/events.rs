//! Physics events (collisions)

use crate::collider::ColliderHandle;

/// Contact data from a collision
#[derive(Debug, Clone, Copy)]
pub struct ContactData {
    /// Contact point in world space
    pub point: [f32; 3],
    /// Contact normal in world space (pointing from collider1 to collider2)
    pub normal: [f32; 3],
    /// Penetration depth
    pub depth: f32,
}

/// Type of collision event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEventType {
    /// Collision started
    Started,
    /// Collision ended
    Stopped,
}

/// A collision event between two colliders
#[derive(Debug, Clone)]
pub struct CollisionEvent {
    /// First collider
    pub collider1: ColliderHandle,
    /// Second collider
    pub collider2: ColliderHandle,
    /// Event type
    pub event_type: CollisionEventType,
    /// Contact points (empty for stopped events)
    pub contacts: Vec<ContactData>,
    /// User data from collider 1
    pub user_data1: u128,
    /// User data from collider 2
    pub user_data2: u128,
}

impl CollisionEvent {
    /// Check if this is a start event
    pub fn is_started(&self) -> bool {
        self.event_type == CollisionEventType::Started
    }

    /// Check if this is a stop event
    pub fn is_stopped(&self) -> bool {
        self.event_type == CollisionEventType::Stopped
    }

    /// Get the average contact point
    pub fn average_contact_point(&self) -> Option<[f32; 3]> {
        if self.contacts.is_empty() {
            return None;
        }
        let mut sum = [0.0f32; 3];
        for contact in &self.contacts {
            sum[0] += contact.point[0];
            sum[1] += contact.point[1];
            sum[2] += contact.point[2];
        }
        let n = self.contacts.len() as f32;
        Some([sum[0] / n, sum[1] / n, sum[2] / n])
    }
}

/// Buffer of collision events collected during a step
#[derive(Default)]
pub struct EventCollector {
    /// Collision events this step
    pub collision_events: Vec<CollisionEvent>,
}

impl EventCollector {
    /// Create a new event collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all collected events
    pub fn clear(&mut self) {
        self.collision_events.clear();
    }

    /// Get collision start events
    pub fn started_collisions(&self) -> impl Iterator<Item = &CollisionEvent> {
        self.collision_events.iter().filter(|e| e.is_started())
    }

    /// Get collision end events
    pub fn stopped_collisions(&self) -> impl Iterator<Item = &CollisionEvent> {
        self.collision_events.iter().filter(|e| e.is_stopped())
    }
}
