//! Game-play scene: level, player and live entities, updated and drawn once per frame

use arrayvec::ArrayVec;
use monoray_core::Renderer;
use tracing::debug;

use crate::caster::cast_walls;
use crate::hud::draw_hud;
use crate::level::{Level, LevelError};
use crate::movement::{advance, collect_items, rotate, update_enemies};
use crate::projection::{draw_entities, project_entities};
use crate::types::{
    create_enemy, create_key, create_medikit, create_player, Buttons, Entity, EntityType,
    Player, MAX_ENTITIES, MOV_SPEED, ROT_SPEED,
};

#[derive(Debug, Clone)]
pub struct Scene {
    level: Level,
    player: Player,
    entities: ArrayVec<Entity, MAX_ENTITIES>,
}

impl Scene {
    /// Spawn the player and the level's entities.
    ///
    /// Spawns past `MAX_ENTITIES` are dropped.
    pub fn new(level: Level) -> Self {
        let (px, py) = level.player_start();
        let mut entities = ArrayVec::new();
        for (kind, x, y) in level.spawns() {
            let entity = match kind {
                EntityType::Enemy => create_enemy(x, y),
                EntityType::Medikit => create_medikit(x, y),
                EntityType::Key => create_key(x, y),
                _ => continue,
            };
            if entities.try_push(entity).is_err() {
                debug!(x, y, "entity limit reached, spawn dropped");
            }
        }

        let mut level = level;
        for entity in &entities {
            level.set_cell(
                entity.uid.x() as usize,
                entity.uid.y() as usize,
                EntityType::Floor,
            );
        }

        debug!(entities = entities.len(), px, py, "scene ready");
        Self {
            level,
            player: create_player(px, py),
            entities,
        }
    }

    pub fn demo() -> Result<Self, LevelError> {
        Ok(Self::new(Level::demo()?))
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Apply one frame of input, scaled by `delta` frame periods.
    pub fn update(&mut self, buttons: Buttons, delta: f64) {
        let delta = delta as f32;

        if buttons.left() {
            rotate(&mut self.player, ROT_SPEED * delta);
        }
        if buttons.right() {
            rotate(&mut self.player, -ROT_SPEED * delta);
        }
        if buttons.up() {
            advance(&mut self.player, &self.level, MOV_SPEED * delta);
        } else if buttons.down() {
            advance(&mut self.player, &self.level, -MOV_SPEED * delta);
        } else {
            self.player.velocity = 0.0;
        }

        let taken = collect_items(&mut self.player, &mut self.entities);
        if taken > 0 {
            debug!(
                taken,
                health = self.player.health,
                keys = self.player.keys,
                "items collected"
            );
        }
        update_enemies(&self.player, &mut self.entities);
    }

    /// Draw the whole frame: walls, sprites, then the status bar.
    pub fn render(&mut self, renderer: &mut Renderer, fps: Option<f64>) {
        renderer.clear();
        cast_walls(renderer, &self.level, &self.player);
        let records = project_entities(&self.player, &mut self.entities);
        draw_entities(renderer, &records);
        draw_hud(renderer, &self.player, fps);
    }
}
