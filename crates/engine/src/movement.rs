//! Player movement, item pickup and enemy reactions

use arrayvec::ArrayVec;

use crate::level::Level;
use crate::types::{
    Coords, Entity, EntityState, EntityType, Player, DISTANCE_MULTIPLIER, ITEM_COLLIDER_DIST,
    MAX_ENTITIES, MEDIKIT_HEALTH, WALL_COLLIDER_DIST,
};

/// Player health cap.
pub const MAX_HEALTH: u8 = 100;

/// Enemies closer than this (in cells) switch to their attack pose.
pub const ENEMY_ATTACK_RANGE: f32 = 3.0;

fn rotated(v: Coords, angle: f32) -> Coords {
    let (sin, cos) = angle.sin_cos();
    Coords::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Turn the camera by `angle` radians (positive turns toward `-plane`).
pub fn rotate(player: &mut Player, angle: f32) {
    player.dir = rotated(player.dir, angle);
    player.plane = rotated(player.plane, angle);
}

/// Move along the facing direction by `amount` cells (negative backs up).
///
/// Each axis is resolved on its own so the player slides along walls,
/// keeping `WALL_COLLIDER_DIST` clear of any blocking cell.
/// Returns whether the position changed.
pub fn advance(player: &mut Player, level: &Level, amount: f32) -> bool {
    let step = Coords::new(player.dir.x * amount, player.dir.y * amount);
    let start = player.pos;

    if step.x != 0.0 {
        let probe = player.pos.x + step.x + WALL_COLLIDER_DIST.copysign(step.x);
        if !level.is_blocked(probe.floor() as i32, player.pos.y.floor() as i32) {
            player.pos.x += step.x;
        }
    }
    if step.y != 0.0 {
        let probe = player.pos.y + step.y + WALL_COLLIDER_DIST.copysign(step.y);
        if !level.is_blocked(player.pos.x.floor() as i32, probe.floor() as i32) {
            player.pos.y += step.y;
        }
    }

    player.velocity = amount;
    player.pos != start
}

fn in_reach(player: &Player, entity: &Entity) -> bool {
    entity.pos.distance(player.pos) * (DISTANCE_MULTIPLIER as f32) < ITEM_COLLIDER_DIST as f32
}

/// Pick up every medikit and key within reach. Returns how many were taken.
pub fn collect_items(player: &mut Player, entities: &mut ArrayVec<Entity, MAX_ENTITIES>) -> usize {
    let before = entities.len();
    entities.retain(|entity| {
        if !in_reach(player, entity) {
            return true;
        }
        match entity.uid.entity_type() {
            Some(EntityType::Medikit) => {
                player.health = player.health.saturating_add(MEDIKIT_HEALTH).min(MAX_HEALTH);
                false
            }
            Some(EntityType::Key) => {
                player.keys = player.keys.saturating_add(1);
                false
            }
            _ => true,
        }
    });
    before - entities.len()
}

/// Enemies near the player take their attack pose; the rest stand.
pub fn update_enemies(player: &Player, entities: &mut [Entity]) {
    for entity in entities.iter_mut() {
        if entity.uid.entity_type() != Some(EntityType::Enemy)
            || matches!(entity.state, EntityState::Dead | EntityState::Hidden)
        {
            continue;
        }
        entity.state = if entity.pos.distance(player.pos) < ENEMY_ATTACK_RANGE {
            EntityState::Firing
        } else {
            EntityState::Stand
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{create_enemy, create_key, create_medikit, create_player};
    use std::f32::consts::FRAC_PI_2;

    fn room() -> Level {
        Level::parse(&["#####", "#P..#", "#...#", "#####"]).unwrap()
    }

    #[test]
    fn rotation_keeps_plane_perpendicular() {
        let mut p = create_player(1, 1);
        rotate(&mut p, 0.3);
        let dot = p.dir.x * p.plane.x + p.dir.y * p.plane.y;
        assert!(dot.abs() < 1e-5);
        let len = (p.dir.x * p.dir.x + p.dir.y * p.dir.y).sqrt();
        assert!((len - 1.0).abs() < 1e-5);

        rotate(&mut p, -0.3);
        assert!((p.dir.x - 1.0).abs() < 1e-5 && p.dir.y.abs() < 1e-5);
    }

    #[test]
    fn advance_moves_through_open_floor() {
        let level = room();
        let mut p = create_player(1, 1);
        assert!(advance(&mut p, &level, 0.5));
        assert!((p.pos.x - 2.0).abs() < 1e-5);
        assert_eq!(p.pos.y, 1.5);
    }

    #[test]
    fn walls_stop_movement_short_of_the_collider() {
        let level = room();
        let mut p = create_player(1, 1);
        for _ in 0..50 {
            advance(&mut p, &level, 0.2);
        }
        assert!(p.pos.x < 4.0 - WALL_COLLIDER_DIST + 1e-4);
        assert!(p.pos.x > 3.0);
        assert!(!advance(&mut p, &level, 0.2));
    }

    #[test]
    fn blocked_axis_still_slides_on_the_other() {
        let level = room();
        let mut p = create_player(1, 1);
        p.pos = Coords::new(3.7, 1.5);
        rotate(&mut p, FRAC_PI_2 / 2.0);
        // Facing +x +y: x is blocked by the east wall, y is free.
        assert!(p.dir.y > 0.0);
        advance(&mut p, &level, 0.3);
        assert_eq!(p.pos.x, 3.7);
        assert!(p.pos.y > 1.5);
    }

    #[test]
    fn pickups_restore_health_and_count_keys() {
        let mut p = create_player(1, 1);
        p.health = 70;
        let mut entities: ArrayVec<Entity, MAX_ENTITIES> = ArrayVec::new();
        entities.push(create_medikit(1, 1));
        entities.push(create_key(1, 1));
        entities.push(create_key(3, 2));
        entities.push(create_enemy(1, 1));

        assert_eq!(collect_items(&mut p, &mut entities), 2);
        assert_eq!(p.health, MAX_HEALTH);
        assert_eq!(p.keys, 1);
        assert_eq!(entities.len(), 2);
    }

    #[test]
    fn enemies_react_to_distance() {
        let p = create_player(1, 1);
        let mut entities = [create_enemy(2, 1), create_enemy(9, 9), create_key(1, 2)];
        entities[1].state = EntityState::Firing;
        update_enemies(&p, &mut entities);
        assert_eq!(entities[0].state, EntityState::Firing);
        assert_eq!(entities[1].state, EntityState::Stand);
        assert_eq!(entities[2].state, EntityState::Stand);
    }
}
