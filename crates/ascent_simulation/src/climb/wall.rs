//! Wall identity tracking: "та же стена" vs "новая стена"

use bevy::prelude::*;

use crate::physics::{angle_deg, WallContact};

/// Стена, за которую последний раз зацепились
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct GrippedWall {
    pub wall: Entity,
    pub normal: Vec3,
}

impl From<&WallContact> for GrippedWall {
    fn from(contact: &WallContact) -> Self {
        Self {
            wall: contact.wall,
            normal: contact.normal,
        }
    }
}

/// Новая стена: другой identity ИЛИ нормаль повернулась больше порога (градусы).
/// Если ещё ни за что не цеплялись: любая стена новая.
pub fn is_new_wall(contact: &WallContact, gripped: Option<&GrippedWall>, min_angle_change: f32) -> bool {
    match gripped {
        None => true,
        Some(gripped) => {
            contact.wall != gripped.wall
                || angle_deg(contact.normal, gripped.normal) > min_angle_change
        }
    }
}
