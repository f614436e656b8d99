//! Bridge between entities and the rigid-body simulation.
//!
//! [`PhysicsSystem`] owns registered entities in an arena keyed by
//! [`EntityId`], keeps a forward (`EntityId -> RigidBodyHandle`) and reverse
//! (`RigidBodyHandle -> EntityId`) map that are always mutual inverses, and
//! keeps both sides in lock-step every frame:
//!
//! 1. kinematic bodies are moved to their entity's pose,
//! 2. the simulation steps (gravity first, then the pipeline),
//! 3. touching pairs become enter/stay/exit events,
//! 4. dynamic entities receive their body's position and velocity.

use std::collections::{BTreeMap, HashMap};

use nalgebra::Vector3;
use rapier3d::prelude::RigidBodyHandle;

use crate::{
    collision::{
        events::{CollisionListeners, ContactTracker, ordered_pair},
        narrow_phase::ContactHooks,
        types::{CollisionKind, Contact},
    },
    config::PhysicsConfig,
    entity::{Entity, EntityId},
    integrator::GravityIntegrator,
    rapier::BodyDef,
    simulation::Simulation,
};

pub struct PhysicsSystem {
    config: PhysicsConfig,
    simulation: Simulation,
    integrator: GravityIntegrator,
    hooks: ContactHooks,

    entities: BTreeMap<EntityId, Entity>,
    handles: BTreeMap<EntityId, RigidBodyHandle>,
    owners: HashMap<RigidBodyHandle, EntityId>,
    next_id: u64,

    listeners: CollisionListeners,
    contacts: ContactTracker,
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl PhysicsSystem {
    pub fn new(config: PhysicsConfig) -> Self {
        log::debug!(
            "physics system created: gravity={:?} substeps={}",
            config.gravity,
            config.solver.effective_substeps()
        );
        Self {
            config,
            simulation: Simulation::new(),
            integrator: GravityIntegrator::new(config.gravity),
            hooks: ContactHooks::new(config.material),
            entities: BTreeMap::new(),
            handles: BTreeMap::new(),
            owners: HashMap::new(),
            next_id: 0,
            listeners: CollisionListeners::default(),
            contacts: ContactTracker::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    #[inline]
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    // ---- registration ----

    /// Take ownership of `entity` and create its body: dynamic when it applies
    /// gravity, kinematic otherwise.
    pub fn add_entity(&mut self, mut entity: Entity) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;

        let def = BodyDef::from_entity(&entity, &self.config.solver);
        let handle = self.simulation.insert(&def);

        self.handles.insert(id, handle);
        self.owners.insert(handle, id);
        entity.registration = Some(id);

        log::debug!(
            "added {} as {id}: {:?} body at {:?}, half extents {:?}",
            entity.name(),
            def.kind,
            def.translation,
            def.half_extents
        );
        self.entities.insert(id, entity);
        id
    }

    /// Destroy the body of `id` and hand the entity back, unregistered.
    ///
    /// Its live contacts are dropped without exit events.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        let Some(handle) = self.handles.remove(&id) else {
            log::warn!("remove_entity: {id} is not registered");
            return None;
        };
        self.owners.remove(&handle);
        self.simulation.remove(handle);

        for partner in self.contacts.forget(id) {
            self.refresh_contact_state(partner);
        }

        let mut entity = self.entities.remove(&id)?;
        entity.registration = None;
        entity.is_colliding = false;
        entity.collision_sides.clear();
        log::debug!("removed {} ({id})", entity.name());
        Some(entity)
    }

    // ---- lookup ----

    /// Body mirroring `id`, if registered.
    #[inline]
    pub fn body_handle(&self, id: EntityId) -> Option<RigidBodyHandle> {
        self.handles.get(&id).copied()
    }

    /// Reverse lookup used to resolve contacts.
    #[inline]
    pub fn entity_for_body(&self, handle: RigidBodyHandle) -> Option<EntityId> {
        self.owners.get(&handle).copied()
    }

    #[inline]
    pub fn contains(&self, id: EntityId) -> bool {
        self.handles.contains_key(&id)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Mutable access for game code. Kinematic entities moved here are pushed
    /// into their body on the next `update`.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(id, e)| (*id, e))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// World-space centre of the body mirroring `id`.
    pub fn body_position(&self, id: EntityId) -> Option<Vector3<f32>> {
        self.simulation.translation(self.body_handle(id)?)
    }

    // ---- stepping ----

    /// Advance the simulation by `dt` seconds and sync entities.
    pub fn update(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            log::warn!("update: ignoring non-positive timestep {dt}");
            return;
        }

        self.push_kinematic_poses();

        let substeps = self.config.solver.effective_substeps();
        let h = dt / substeps as f32;
        for _ in 0..substeps {
            self.integrator.integrate(&mut self.simulation, h);
            self.hooks.begin_step(h);
            self.simulation.step(h, &self.hooks);
        }

        self.resolve_contacts();
        self.pull_dynamic_poses();
    }

    /// Apply a linear impulse to the body of `id`.
    pub fn apply_impulse(&mut self, id: EntityId, impulse: Vector3<f32>) {
        let Some(handle) = self.body_handle(id) else {
            log::warn!("apply_impulse: {id} is not registered");
            return;
        };
        self.simulation.apply_impulse(handle, &impulse);
        log::trace!("impulse {impulse:?} applied to {id}");
    }

    fn push_kinematic_poses(&mut self) {
        for (id, handle) in &self.handles {
            if self.simulation.is_dynamic(*handle) {
                continue;
            }
            let Some(entity) = self.entities.get(id) else {
                continue;
            };
            let target = entity.position() + entity.hitbox_center();
            self.simulation.set_kinematic_translation(*handle, &target);
        }
    }

    fn pull_dynamic_poses(&mut self) {
        for (id, handle) in &self.handles {
            if !self.simulation.is_dynamic(*handle) {
                continue;
            }
            let (Some(translation), Some(velocity)) =
                (self.simulation.translation(*handle), self.simulation.linvel(*handle))
            else {
                continue;
            };
            let Some(entity) = self.entities.get_mut(id) else {
                continue;
            };

            let center = entity.hitbox_center();
            entity.set_position(translation - center);
            entity.velocity = velocity;
        }
    }

    fn resolve_contacts(&mut self) {
        let mut touching = BTreeMap::new();
        for raw in self.hooks.drain() {
            let (Some(&a), Some(&b)) = (self.owners.get(&raw.body1), self.owners.get(&raw.body2))
            else {
                continue;
            };
            if a == b {
                continue;
            }
            let (key, contact) = ordered_pair(a, b, raw.contact);
            touching.insert(key, contact);
        }

        let handles = &self.handles;
        let simulation = &self.simulation;
        let resting = |id: EntityId| {
            handles
                .get(&id)
                .is_some_and(|h| simulation.is_resting(*h))
        };
        let events = self.contacts.advance(touching, |a, b| resting(a) && resting(b));

        for event in &events {
            self.refresh_contact_state(event.a);
            self.refresh_contact_state(event.b);
        }

        for event in &events {
            let (Some(a), Some(b)) = (self.entities.get(&event.a), self.entities.get(&event.b))
            else {
                continue;
            };
            match event.kind {
                CollisionKind::Stay => log::trace!("collision stay: {} / {}", a.name(), b.name()),
                kind => log::debug!("collision {kind:?}: {} / {}", a.name(), b.name()),
            }
            if !self.listeners.is_empty() {
                self.listeners.dispatch(event, a, b);
            }
        }
    }

    fn refresh_contact_state(&mut self, id: EntityId) {
        let colliding = self.contacts.is_in_contact(id);
        let sides = self.contacts.sides_of(id);
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.is_colliding = colliding;
            entity.collision_sides = sides;
        }
    }

    // ---- events ----

    /// Called once when two entities start touching.
    pub fn on_collision_enter(&mut self, handler: impl FnMut(&Entity, &Entity, &Contact) + 'static) {
        self.listeners.push(CollisionKind::Enter, Box::new(handler));
    }

    /// Called on every update two entities keep touching.
    pub fn on_collision_stay(&mut self, handler: impl FnMut(&Entity, &Entity, &Contact) + 'static) {
        self.listeners.push(CollisionKind::Stay, Box::new(handler));
    }

    /// Called once when two touching entities separate.
    pub fn on_collision_exit(&mut self, handler: impl FnMut(&Entity, &Entity, &Contact) + 'static) {
        self.listeners.push(CollisionKind::Exit, Box::new(handler));
    }

    // ---- diagnostics / teardown ----

    /// Log and return the names of every registered entity, in id order.
    pub fn list_registered_entities(&self) -> Vec<&str> {
        let names: Vec<&str> = self.entities.values().map(Entity::name).collect();
        log::info!("{} registered entities", names.len());
        for (id, entity) in &self.entities {
            log::info!("  {id}: {}", entity.name());
        }
        names
    }

    /// Tear down the simulation and every registered entity.
    pub fn dispose(self) {
        log::debug!(
            "disposing physics system: {} entities, {} bodies, {} live contacts, {} listeners",
            self.entities.len(),
            self.simulation.body_count(),
            self.contacts.len(),
            self.listeners.len()
        );
    }
}
