//! Interaction события
//!
//! Generic по capability и зарегистрированы per-App: никаких process-wide
//! static шин — несколько персонажей/симуляций не делят состояние событий.

use bevy::prelude::*;
use std::marker::PhantomData;

use super::framework::InteractionCapability;

/// Цель валидна, в радиусе и доступна (can_interact_with() == true).
///
/// Для валидной цели в радиусе каждый tick поднимается ровно одно из
/// CanInteract/CannotInteract — никогда оба, никогда ни одного.
pub struct CanInteract<C: InteractionCapability> {
    pub interactor: Entity,
    pub target: Entity,
    marker: PhantomData<C>,
}

/// Цель валидна и в радиусе, но недоступна (дверь заперта, mid-transition)
pub struct CannotInteract<C: InteractionCapability> {
    pub interactor: Entity,
    pub target: Entity,
    marker: PhantomData<C>,
}

/// Interaction сработала: can-interact + edge кнопки в том же tick
pub struct Interacted<C: InteractionCapability> {
    pub interactor: Entity,
    pub target: Entity,
    marker: PhantomData<C>,
}

impl<C: InteractionCapability> CanInteract<C> {
    pub fn new(interactor: Entity, target: Entity) -> Self {
        Self {
            interactor,
            target,
            marker: PhantomData,
        }
    }
}

impl<C: InteractionCapability> CannotInteract<C> {
    pub fn new(interactor: Entity, target: Entity) -> Self {
        Self {
            interactor,
            target,
            marker: PhantomData,
        }
    }
}

impl<C: InteractionCapability> Interacted<C> {
    pub fn new(interactor: Entity, target: Entity) -> Self {
        Self {
            interactor,
            target,
            marker: PhantomData,
        }
    }
}

// Ручные impl'ы вместо derive: derive навесил бы C: Clone/Copy bound, который
// capability-типам не нужен (PhantomData копируется всегда)
impl<C: InteractionCapability> Clone for CanInteract<C> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<C: InteractionCapability> Copy for CanInteract<C> {}

impl<C: InteractionCapability> Clone for CannotInteract<C> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<C: InteractionCapability> Copy for CannotInteract<C> {}

impl<C: InteractionCapability> Clone for Interacted<C> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<C: InteractionCapability> Copy for Interacted<C> {}

// Ручные impl'ы Event (derive не нужен — generic параметр не участвует в
// данных события)
impl<C: InteractionCapability> Event for CanInteract<C> {
    type Traversal = ();
}
impl<C: InteractionCapability> Event for CannotInteract<C> {
    type Traversal = ();
}
impl<C: InteractionCapability> Event for Interacted<C> {
    type Traversal = ();
}
