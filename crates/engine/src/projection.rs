//! Entity pass
//!
//! Entities are transformed into camera space, culled, and turned into draw
//! records sorted far to near so nearer sprites paint over farther ones.

use arrayvec::ArrayVec;
use monoray_core::assets::{FIREBALL, IMP, IMP_FIRING, IMP_STAND, KEY, MEDIKIT};
use monoray_core::{EntityDrawRecord, Renderer, SpriteSheet};

use crate::types::{
    Entity, EntityState, EntityType, Player, DISTANCE_MULTIPLIER, HALF_WIDTH, MAX_ENTITIES,
    MAX_SPRITE_DEPTH, RENDER_HEIGHT,
};

/// Entities nearer than this (in camera depth) are not drawn.
pub const NEAR_PLANE: f32 = 0.1;

pub type DrawList = ArrayVec<EntityDrawRecord<'static>, MAX_ENTITIES>;

/// Sheet and cell used to draw an entity, if it has one.
pub fn sprite_for(entity: &Entity) -> Option<(&'static SpriteSheet<'static>, u8)> {
    if matches!(entity.state, EntityState::Hidden | EntityState::Dead) {
        return None;
    }
    match entity.uid.entity_type()? {
        EntityType::Enemy => {
            let cell = if entity.state == EntityState::Firing {
                IMP_FIRING
            } else {
                IMP_STAND
            };
            Some((&IMP, cell))
        }
        EntityType::Medikit => Some((&MEDIKIT, 0)),
        EntityType::Key => Some((&KEY, 0)),
        EntityType::Fireball => Some((&FIREBALL, 0)),
        _ => None,
    }
}

/// Project `entities` for `player`'s camera.
///
/// Also refreshes each entity's `distance` (world distance to the player,
/// `* DISTANCE_MULTIPLIER`, saturating).
pub fn project_entities(player: &Player, entities: &mut [Entity]) -> DrawList {
    let mut records = DrawList::new();

    let det = player.plane.x * player.dir.y - player.dir.x * player.plane.y;
    if det == 0.0 || det.is_nan() {
        return records;
    }
    let inv_det = 1.0 / det;

    for entity in entities.iter_mut() {
        entity.distance =
            (entity.pos.distance(player.pos) * DISTANCE_MULTIPLIER as f32) as u8;

        let Some((sheet, sprite)) = sprite_for(entity) else {
            continue;
        };

        let dx = entity.pos.x - player.pos.x;
        let dy = entity.pos.y - player.pos.y;
        let tx = inv_det * (player.dir.y * dx - player.dir.x * dy);
        let ty = inv_det * (-player.plane.y * dx + player.plane.x * dy);

        if !(ty > NEAR_PLANE && ty <= MAX_SPRITE_DEPTH as f32) {
            continue;
        }

        let half_w = HALF_WIDTH as f32;
        let horizon = RENDER_HEIGHT as f32 / 2.0;
        let x = half_w * (1.0 + tx / ty) - sheet.width as f32 / 2.0 / ty;
        let y = horizon + (horizon - sheet.height as f32) / ty;

        let record = EntityDrawRecord {
            x: x as i16,
            y: y as i16,
            sheet,
            sprite,
            distance: ty,
        };
        if records.try_push(record).is_err() {
            break;
        }
    }

    records.sort_unstable_by(|a, b| b.distance.total_cmp(&a.distance));
    records
}

pub fn draw_entities(renderer: &mut Renderer, records: &[EntityDrawRecord<'_>]) {
    for record in records {
        renderer.draw_record(record);
    }
}
