//! Core types module - shared constants, entity records and controller state
//!
//! Everything here is plain data with no rendering or I/O behaviour, so the
//! renderer, the demo engine and the host drivers can all agree on it.
//!
//! # Panel Geometry
//!
//! The target is a 128x64 monochrome OLED panel:
//!
//! - **Width**: 128 columns (indexed 0-127)
//! - **Height**: 64 rows (indexed 0-63)
//! - **Raycast viewport**: rows 0-55; the bottom 8 rows belong to the HUD
//!
//! # Render Budget Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_TIME_MS` | 66.67 | Target frame period (~15 FPS) |
//! | `RES_DIVIDER` | 2 | Physical columns covered by one wall ray |
//! | `Z_RES_DIVIDER` | 2 | Screen columns per Z-buffer entry |
//! | `DISTANCE_MULTIPLIER` | 20 | Fixed-point scale for `u8` distances |
//! | `MAX_RENDER_DEPTH` | 12 | Farthest wall distance that is still shaded |
//! | `MAX_SPRITE_DEPTH` | 8 | Farthest distance at which sprites are drawn |
//!
//! # Examples
//!
//! ```
//! use monoray_types::{create_enemy, EntityState, EntityType, SCREEN_WIDTH, ZBUFFER_SIZE};
//!
//! let enemy = create_enemy(3, 4);
//! assert_eq!(enemy.uid.entity_type(), Some(EntityType::Enemy));
//! assert_eq!(enemy.state, EntityState::Stand);
//! assert_eq!(enemy.pos.x, 3.5);
//!
//! assert_eq!(ZBUFFER_SIZE, SCREEN_WIDTH / 2);
//! ```

use bitflags::bitflags;

/// Panel width in pixels (128 columns)
pub const SCREEN_WIDTH: usize = 128;

/// Panel height in pixels (64 rows)
pub const SCREEN_HEIGHT: usize = 64;

/// Horizontal center of the panel
pub const HALF_WIDTH: usize = SCREEN_WIDTH / 2;

/// Rows used by the raycast viewport (the rest is HUD)
pub const RENDER_HEIGHT: usize = 56;

/// Target frame period in milliseconds (~15 FPS)
pub const FRAME_TIME_MS: f64 = 66.666666;

/// Physical columns covered by a single wall ray
pub const RES_DIVIDER: usize = 2;

/// Screen columns folded into one Z-buffer entry
pub const Z_RES_DIVIDER: usize = 2;

/// Number of Z-buffer entries
pub const ZBUFFER_SIZE: usize = SCREEN_WIDTH / Z_RES_DIVIDER;

/// Scale applied to distances before storing them as `u8`
pub const DISTANCE_MULTIPLIER: u8 = 20;

/// Farthest wall distance (in cells) that still gets a non-black shade
pub const MAX_RENDER_DEPTH: u8 = 12;

/// Farthest distance (in cells) at which sprites are drawn
pub const MAX_SPRITE_DEPTH: u8 = 8;

/// Dither tile width in bytes (16 pixels)
pub const GRADIENT_WIDTH: usize = 2;

/// Dither tile height in rows
pub const GRADIENT_HEIGHT: usize = 8;

/// Number of shade levels, black to white
pub const GRADIENT_COUNT: u8 = 8;

/// Fully lit shade level
pub const GRADIENT_WHITE: u8 = GRADIENT_COUNT - 1;

/// Font glyph width in pixels
pub const CHAR_WIDTH: usize = 4;

/// Font glyph height in pixels
pub const CHAR_HEIGHT: usize = 6;

/// Level width expressed as a power of two (used by UID packing)
pub const LEVEL_WIDTH_BASE: u8 = 6;

/// Maximum level width in cells
pub const LEVEL_WIDTH: usize = 1 << LEVEL_WIDTH_BASE;

/// Maximum level height in cells
pub const LEVEL_HEIGHT: usize = 57;

/// Maximum number of dynamic entities alive at once
pub const MAX_ENTITIES: usize = 10;

/// Maximum number of static (inactive) entities remembered
pub const MAX_STATIC_ENTITIES: usize = 28;

/// Player rotation per frame at `delta == 1` (radians)
pub const ROT_SPEED: f32 = 0.12;

/// Player movement per frame at `delta == 1` (cells)
pub const MOV_SPEED: f32 = 0.2;

/// Minimum distance the player keeps from walls
pub const WALL_COLLIDER_DIST: f32 = 0.2;

/// Items closer than this are picked up (`* DISTANCE_MULTIPLIER`)
pub const ITEM_COLLIDER_DIST: u8 = 6;

/// Health restored by a medikit
pub const MEDIKIT_HEALTH: u8 = 50;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_geometry_defaults() {
        assert_eq!(SCREEN_WIDTH, 128);
        assert_eq!(SCREEN_HEIGHT, 64);
        assert_eq!(RENDER_HEIGHT, 56);
        assert_eq!(ZBUFFER_SIZE, 64);
        assert_eq!(SCREEN_HEIGHT % 8, 0);
        assert!(RENDER_HEIGHT <= SCREEN_HEIGHT);
    }

    #[test]
    fn uid_packs_position_and_type() {
        let uid = Uid::new(EntityType::Key, 5, 9);
        assert_eq!(uid.entity_type(), Some(EntityType::Key));
        assert_eq!(uid.x(), 5);
        assert_eq!(uid.y(), 9);
        assert_eq!(uid.raw(), ((9u16 << LEVEL_WIDTH_BASE) | 5) << 4 | 0x9);
    }

    #[test]
    fn factories_center_entities_in_their_cell() {
        let e = create_medikit(2, 7);
        assert_eq!(e.pos, Coords::new(2.5, 7.5));
        assert_eq!(e.health, 0);
        assert_eq!(e.distance, 0);
        assert_eq!(e.timer, 0);

        let f = create_fireball(1, 1, 45);
        assert_eq!(f.health, 45);
        assert_eq!(f.uid.entity_type(), Some(EntityType::Fireball));

        let p = create_player(4, 4);
        assert_eq!(p.pos, Coords::new(4.5, 4.5));
        assert_eq!(p.dir, Coords::new(1.0, 0.0));
        assert_eq!(p.health, 100);
        assert_eq!(p.keys, 0);
    }

    #[test]
    fn static_entities_keep_the_spawn_uid() {
        let key = create_key(9, 3);
        let parked = create_static_entity(key.uid, key.uid.x(), key.uid.y(), false);
        assert_eq!(parked.uid, key.uid);
        assert_eq!((parked.x, parked.y), (9, 3));
        assert!(!parked.active);
        assert_eq!(parked.uid.entity_type(), Some(EntityType::Key));

        let table = [parked; MAX_STATIC_ENTITIES];
        assert_eq!(table.len(), 28);
        assert!(table.iter().all(|s| s.uid == Uid::new(EntityType::Key, 9, 3)));
    }

    #[test]
    fn buttons_follow_controller_bit_order() {
        assert_eq!(Buttons::B.bits(), 0x0001);
        assert_eq!(Buttons::START.bits(), 0x0008);
        assert_eq!(Buttons::RIGHT.bits(), 0x0080);
        assert_eq!(Buttons::RB.bits(), 0x0800);

        let held = Buttons::UP | Buttons::Y;
        assert!(held.fire());
        assert!(held.contains(Buttons::UP));
        assert!(!held.contains(Buttons::DOWN));
    }
}

/// Position in level space (cells, fractional)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coords {
    pub x: f32,
    pub y: f32,
}

impl Coords {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Coords) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Level cell and entity kinds
///
/// The discriminant is the 4-bit type tag stored in the low nibble of a [`Uid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EntityType {
    Floor = 0x0,
    Player = 0x1,
    Enemy = 0x2,
    Door = 0x4,
    LockedDoor = 0x5,
    Exit = 0x7,
    Medikit = 0x8,
    Key = 0x9,
    Fireball = 0xA,
    Wall = 0xF,
}

impl EntityType {
    /// Decode a 4-bit type tag
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x0 => Some(EntityType::Floor),
            0x1 => Some(EntityType::Player),
            0x2 => Some(EntityType::Enemy),
            0x4 => Some(EntityType::Door),
            0x5 => Some(EntityType::LockedDoor),
            0x7 => Some(EntityType::Exit),
            0x8 => Some(EntityType::Medikit),
            0x9 => Some(EntityType::Key),
            0xA => Some(EntityType::Fireball),
            0xF => Some(EntityType::Wall),
            _ => None,
        }
    }

    /// Whether this type blocks movement and rays
    pub fn is_solid(&self) -> bool {
        matches!(
            self,
            EntityType::Wall | EntityType::Door | EntityType::LockedDoor
        )
    }
}

/// Unique entity identifier
///
/// Packs the spawn cell and the entity type: `((y << LEVEL_WIDTH_BASE) | x) << 4 | type`.
/// Two entities spawned from the same level cell share a UID, which is how
/// static entities are matched back to their level position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uid(u16);

impl Uid {
    pub fn new(kind: EntityType, x: u8, y: u8) -> Self {
        let cell = ((y as u16) << LEVEL_WIDTH_BASE) | (x as u16 & (LEVEL_WIDTH as u16 - 1));
        Self((cell << 4) | kind as u16)
    }

    pub fn raw(&self) -> u16 {
        self.0
    }

    pub fn entity_type(&self) -> Option<EntityType> {
        EntityType::from_tag((self.0 & 0x0F) as u8)
    }

    pub fn x(&self) -> u8 {
        ((self.0 >> 4) & (LEVEL_WIDTH as u16 - 1)) as u8
    }

    pub fn y(&self) -> u8 {
        (self.0 >> (4 + LEVEL_WIDTH_BASE)) as u8
    }
}

/// Entity behaviour states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum EntityState {
    #[default]
    Stand = 0,
    Alert = 1,
    Firing = 2,
    Melee = 3,
    Hit = 4,
    Dead = 5,
    Hidden = 6,
    Open = 7,
    Close = 8,
}

/// A dynamic entity (enemy, item, projectile)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub uid: Uid,
    pub pos: Coords,
    pub state: EntityState,
    /// Health, or the travel angle for fireballs
    pub health: u8,
    /// Distance to the player, `* DISTANCE_MULTIPLIER`, used for sorting and culling
    pub distance: u8,
    /// Frames left in the current state
    pub timer: u8,
}

/// An entity parked outside the active set (e.g. out of range or collected)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticEntity {
    pub uid: Uid,
    pub x: u8,
    pub y: u8,
    pub active: bool,
}

/// The player camera and stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub pos: Coords,
    /// Facing direction (unit vector)
    pub dir: Coords,
    /// Camera plane, perpendicular to `dir`; its length sets the field of view
    pub plane: Coords,
    pub velocity: f32,
    pub health: u8,
    pub keys: u8,
}

/// Create a dynamic entity centred in level cell `(x, y)`
pub fn create_entity(kind: EntityType, x: u8, y: u8, state: EntityState, health: u8) -> Entity {
    Entity {
        uid: Uid::new(kind, x, y),
        pos: Coords::new(x as f32 + 0.5, y as f32 + 0.5),
        state,
        health,
        distance: 0,
        timer: 0,
    }
}

pub fn create_static_entity(uid: Uid, x: u8, y: u8, active: bool) -> StaticEntity {
    StaticEntity { uid, x, y, active }
}

pub fn create_enemy(x: u8, y: u8) -> Entity {
    create_entity(EntityType::Enemy, x, y, EntityState::Stand, 100)
}

pub fn create_medikit(x: u8, y: u8) -> Entity {
    create_entity(EntityType::Medikit, x, y, EntityState::Stand, 0)
}

pub fn create_key(x: u8, y: u8) -> Entity {
    create_entity(EntityType::Key, x, y, EntityState::Stand, 0)
}

/// Create a fireball; `dir` is the travel angle index, stored in `health`
pub fn create_fireball(x: u8, y: u8, dir: u8) -> Entity {
    create_entity(EntityType::Fireball, x, y, EntityState::Stand, dir)
}

/// Create a player facing +x, centred in level cell `(x, y)`
pub fn create_player(x: u8, y: u8) -> Player {
    Player {
        pos: Coords::new(x as f32 + 0.5, y as f32 + 0.5),
        dir: Coords::new(1.0, 0.0),
        plane: Coords::new(0.0, -0.66),
        velocity: 0.0,
        health: 100,
        keys: 0,
    }
}

bitflags! {
    /// Controller buttons, in the bit order the shift-register pad reports them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u16 {
        const B      = 0x0001;
        const Y      = 0x0002;
        const SELECT = 0x0004;
        const START  = 0x0008;
        const UP     = 0x0010;
        const DOWN   = 0x0020;
        const LEFT   = 0x0040;
        const RIGHT  = 0x0080;
        const A      = 0x0100;
        const X      = 0x0200;
        const LB     = 0x0400;
        const RB     = 0x0800;
    }
}

impl Buttons {
    pub fn up(&self) -> bool {
        self.contains(Buttons::UP)
    }

    pub fn down(&self) -> bool {
        self.contains(Buttons::DOWN)
    }

    pub fn left(&self) -> bool {
        self.contains(Buttons::LEFT)
    }

    pub fn right(&self) -> bool {
        self.contains(Buttons::RIGHT)
    }

    /// Fire is bound to Y, matching the pad layout.
    pub fn fire(&self) -> bool {
        self.contains(Buttons::Y)
    }

    pub fn start(&self) -> bool {
        self.contains(Buttons::START)
    }
}
