//! Body: rigid body персонажа глазами контроллера
//!
//! Тело принадлежит физическому движку: мы читаем/пишем velocity, добавляем
//! impulse/force, переключаем gravity и damping, меняем collision extent.
//! `RapierBody`: адаптер над компонентами bevy_rapier3d.

use bevy::ecs::query::QueryData;
use bevy::prelude::*;
use bevy_rapier3d::prelude::{Damping, ExternalForce, ExternalImpulse, GravityScale, Velocity};

pub trait Body {
    fn linear_velocity(&self) -> Vec3;
    fn set_linear_velocity(&mut self, velocity: Vec3);

    /// Мгновенный impulse (ForceMode::Impulse)
    fn apply_impulse(&mut self, impulse: Vec3);

    /// Непрерывная сила на текущий physics step
    fn add_force(&mut self, force: Vec3);

    /// Сброс накопленной силы перед новым physics step
    fn clear_force(&mut self);

    fn set_gravity_enabled(&mut self, enabled: bool);
    fn set_damping(&mut self, damping: f32);

    /// Вертикальный scale коллайдера (1.0 = стоя)
    fn extent_scale(&self) -> f32;
    fn set_extent_scale(&mut self, scale: f32);

    /// Локальная ось "вверх" тела (rotation заморожен → обычно `Vec3::Y`)
    fn up(&self) -> Vec3;
}

/// Rapier rigid body: Velocity + External* + GravityScale + Damping + Transform
pub struct RapierBody<'a> {
    pub velocity: &'a mut Velocity,
    pub impulse: &'a mut ExternalImpulse,
    pub force: &'a mut ExternalForce,
    pub gravity: &'a mut GravityScale,
    pub damping: &'a mut Damping,
    pub transform: &'a mut Transform,
}

impl Body for RapierBody<'_> {
    fn linear_velocity(&self) -> Vec3 {
        self.velocity.linvel
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.velocity.linvel = velocity;
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        // bevy_rapier обнуляет ExternalImpulse после применения: копим до step
        self.impulse.impulse += impulse;
    }

    fn add_force(&mut self, force: Vec3) {
        self.force.force += force;
    }

    fn clear_force(&mut self) {
        self.force.force = Vec3::ZERO;
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity.0 = if enabled { 1.0 } else { 0.0 };
    }

    fn set_damping(&mut self, damping: f32) {
        self.damping.linear_damping = damping;
    }

    fn extent_scale(&self) -> f32 {
        self.transform.scale.y
    }

    fn set_extent_scale(&mut self, scale: f32) {
        self.transform.scale.y = scale;
    }

    fn up(&self) -> Vec3 {
        self.transform.up().as_vec3()
    }
}

/// Query для систем: все компоненты rigid body одним куском
#[derive(QueryData)]
#[query_data(mutable)]
pub struct RapierBodyQuery {
    pub velocity: &'static mut Velocity,
    pub impulse: &'static mut ExternalImpulse,
    pub force: &'static mut ExternalForce,
    pub gravity: &'static mut GravityScale,
    pub damping: &'static mut Damping,
    pub transform: &'static mut Transform,
}

impl RapierBodyQueryItem<'_> {
    pub fn body(&mut self) -> RapierBody<'_> {
        RapierBody {
            velocity: &mut self.velocity,
            impulse: &mut self.impulse,
            force: &mut self.force,
            gravity: &mut self.gravity,
            damping: &mut self.damping,
            transform: &mut self.transform,
        }
    }
}
