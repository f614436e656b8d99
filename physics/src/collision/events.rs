use std::collections::BTreeMap;

use super::types::{CollisionEvent, CollisionKind, CollisionSide, CollisionSides, Contact};
use crate::entity::{Entity, EntityId};

/// Callback for one collision kind. Receives both participants and the contact
/// as seen from the first one.
pub type CollisionHandler = Box<dyn FnMut(&Entity, &Entity, &Contact)>;

/// Registered enter/stay/exit callbacks.
#[derive(Default)]
pub struct CollisionListeners {
    enter: Vec<CollisionHandler>,
    stay: Vec<CollisionHandler>,
    exit: Vec<CollisionHandler>,
}

impl CollisionListeners {
    pub fn push(&mut self, kind: CollisionKind, handler: CollisionHandler) {
        match kind {
            CollisionKind::Enter => self.enter.push(handler),
            CollisionKind::Stay => self.stay.push(handler),
            CollisionKind::Exit => self.exit.push(handler),
        }
    }

    pub fn len(&self) -> usize {
        self.enter.len() + self.stay.len() + self.exit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dispatch(&mut self, event: &CollisionEvent, a: &Entity, b: &Entity) {
        let handlers = match event.kind {
            CollisionKind::Enter => &mut self.enter,
            CollisionKind::Stay => &mut self.stay,
            CollisionKind::Exit => &mut self.exit,
        };
        for handler in handlers.iter_mut() {
            handler(a, b, &event.contact);
        }
    }
}

/// Key and contact with the smaller id first; the normal is flipped when the
/// participants are swapped.
#[inline]
pub fn ordered_pair(a: EntityId, b: EntityId, contact: Contact) -> ((EntityId, EntityId), Contact) {
    if a <= b {
        ((a, b), contact)
    } else {
        ((b, a), contact.flipped())
    }
}

/// Pairs in contact as of the last step.
#[derive(Debug, Default)]
pub struct ContactTracker {
    active: BTreeMap<(EntityId, EntityId), Contact>,
}

impl ContactTracker {
    /// Diff this step's touching pairs against the previous step.
    ///
    /// A previously active pair missing from `touching` is kept as `Stay`
    /// when `resting(a, b)` says neither side could have moved (both asleep
    /// or not simulated). Exits come first, then enters and stays in pair
    /// order.
    pub fn advance(
        &mut self,
        mut touching: BTreeMap<(EntityId, EntityId), Contact>,
        resting: impl Fn(EntityId, EntityId) -> bool,
    ) -> Vec<CollisionEvent> {
        let mut events = Vec::new();

        for (&(a, b), contact) in &self.active {
            if touching.contains_key(&(a, b)) {
                continue;
            }
            if resting(a, b) {
                touching.insert((a, b), *contact);
            } else {
                events.push(CollisionEvent {
                    kind: CollisionKind::Exit,
                    a,
                    b,
                    contact: *contact,
                });
            }
        }

        for (&(a, b), contact) in &touching {
            let kind = if self.active.contains_key(&(a, b)) {
                CollisionKind::Stay
            } else {
                CollisionKind::Enter
            };
            events.push(CollisionEvent {
                kind,
                a,
                b,
                contact: *contact,
            });
        }

        self.active = touching;
        events
    }

    /// Drop every pair involving `id` without raising exits. Returns the
    /// other participants.
    pub fn forget(&mut self, id: EntityId) -> Vec<EntityId> {
        let mut partners = Vec::new();
        self.active.retain(|&(a, b), _| {
            if a == id {
                partners.push(b);
                false
            } else if b == id {
                partners.push(a);
                false
            } else {
                true
            }
        });
        partners
    }

    pub fn is_in_contact(&self, id: EntityId) -> bool {
        self.active.keys().any(|&(a, b)| a == id || b == id)
    }

    /// Sides of `id` touched by its active contacts, derived from the normals.
    pub fn sides_of(&self, id: EntityId) -> CollisionSides {
        let mut sides = CollisionSides::default();
        for (&(a, b), contact) in &self.active {
            if a == id {
                sides.add(CollisionSide::from_normal(&contact.normal));
            } else if b == id {
                sides.add(CollisionSide::from_normal(&-contact.normal));
            }
        }
        sides
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
