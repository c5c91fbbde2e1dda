//! Wall pass
//!
//! One DDA ray per `RES_DIVIDER` screen columns. Each ray draws a dithered
//! column whose height falls off with perpendicular distance and records that
//! distance in the Z-buffer for the columns it covers, so by the end of the
//! pass every Z-buffer entry has been written for this frame.

use monoray_core::{Renderer, ZBuffer};

use crate::level::Level;
use crate::types::{
    Coords, EntityType, Player, GRADIENT_COUNT, GRADIENT_WHITE, LEVEL_HEIGHT, LEVEL_WIDTH,
    MAX_RENDER_DEPTH, RENDER_HEIGHT, RES_DIVIDER, SCREEN_WIDTH,
};

/// Which kind of grid line the ray crossed last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Crossed a vertical grid line (east/west face)
    X,
    /// Crossed a horizontal grid line (north/south face)
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Perpendicular distance to the camera plane, in cells
    pub distance: f32,
    pub side: Side,
    pub cell: EntityType,
    pub map_x: i32,
    pub map_y: i32,
}

/// March a ray from `origin` along `dir` until it enters a blocking cell.
///
/// Returns `None` if nothing is hit within `MAX_RENDER_DEPTH` cells.
pub fn cast_ray(level: &Level, origin: Coords, dir: Coords) -> Option<RayHit> {
    let mut map_x = origin.x.floor() as i32;
    let mut map_y = origin.y.floor() as i32;

    let delta_x = if dir.x == 0.0 { f32::INFINITY } else { (1.0 / dir.x).abs() };
    let delta_y = if dir.y == 0.0 { f32::INFINITY } else { (1.0 / dir.y).abs() };

    let (step_x, mut side_x) = if dir.x == 0.0 {
        (0, f32::INFINITY)
    } else if dir.x < 0.0 {
        (-1, (origin.x - map_x as f32) * delta_x)
    } else {
        (1, (map_x as f32 + 1.0 - origin.x) * delta_x)
    };
    let (step_y, mut side_y) = if dir.y == 0.0 {
        (0, f32::INFINITY)
    } else if dir.y < 0.0 {
        (-1, (origin.y - map_y as f32) * delta_y)
    } else {
        (1, (map_y as f32 + 1.0 - origin.y) * delta_y)
    };
    if side_x.is_nan() || side_y.is_nan() || (side_x.is_infinite() && side_y.is_infinite()) {
        return None;
    }

    // Out-of-grid cells read as wall, so this bound is never the real exit.
    for _ in 0..(LEVEL_WIDTH + LEVEL_HEIGHT) * 2 {
        let (side, distance) = if side_x < side_y {
            map_x += step_x;
            side_x += delta_x;
            (Side::X, side_x - delta_x)
        } else {
            map_y += step_y;
            side_y += delta_y;
            (Side::Y, side_y - delta_y)
        };

        if distance > MAX_RENDER_DEPTH as f32 {
            return None;
        }
        if level.is_blocked(map_x, map_y) {
            return Some(RayHit {
                distance,
                side,
                cell: level.cell(map_x, map_y),
                map_x,
                map_y,
            });
        }
    }
    None
}

/// Shade for a wall at `distance`; Y faces are two levels darker.
pub fn wall_shade(distance: f32, side: Side) -> u8 {
    let side_dim = if side == Side::Y { 2.0 } else { 0.0 };
    let shade = GRADIENT_COUNT as f32
        - distance / MAX_RENDER_DEPTH as f32 * GRADIENT_COUNT as f32
        - side_dim;
    shade.clamp(0.0, GRADIENT_WHITE as f32) as u8
}

/// Visible wall span `(start, end)` for a wall at `distance`, centred on the horizon.
pub fn wall_span(distance: f32) -> (i16, i16) {
    let line_height = RENDER_HEIGHT as f32 / distance.max(f32::EPSILON);
    let horizon = RENDER_HEIGHT as f32 / 2.0;
    // Float-to-int `as` saturates, so very near walls just cover the viewport.
    (
        (horizon - line_height / 2.0) as i16,
        (horizon + line_height / 2.0) as i16,
    )
}

/// Draw every wall column and refresh the whole Z-buffer.
///
/// Returns the number of rays that hit a wall.
pub fn cast_walls(renderer: &mut Renderer, level: &Level, player: &Player) -> usize {
    let mut hits = 0;
    for x in (0..SCREEN_WIDTH).step_by(RES_DIVIDER) {
        let camera_x = 2.0 * x as f32 / SCREEN_WIDTH as f32 - 1.0;
        let ray = Coords::new(
            player.dir.x + player.plane.x * camera_x,
            player.dir.y + player.plane.y * camera_x,
        );

        let hit = cast_ray(level, player.pos, ray);
        let depth = match hit {
            Some(hit) => ZBuffer::quantize(hit.distance),
            None => u8::MAX,
        };
        for col in x..x + RES_DIVIDER {
            renderer
                .zbuffer_mut()
                .set_raw(ZBuffer::group_for_column(col as i16), depth);
        }

        if let Some(hit) = hit {
            hits += 1;
            let (start, end) = wall_span(hit.distance);
            renderer.draw_column(x as i16, start, end, wall_shade(hit.distance, hit.side));
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{create_player, ZBUFFER_SIZE};

    fn corridor() -> Level {
        Level::parse(&["##########", "#P.......#", "##########"]).unwrap()
    }

    #[test]
    fn ray_hits_the_far_wall() {
        let level = corridor();
        let hit = cast_ray(&level, Coords::new(1.5, 1.5), Coords::new(1.0, 0.0)).unwrap();
        assert_eq!((hit.map_x, hit.map_y), (9, 1));
        assert_eq!(hit.side, Side::X);
        assert!((hit.distance - 7.5).abs() < 1e-4);
        assert_eq!(hit.cell, EntityType::Wall);
    }

    #[test]
    fn ray_reports_horizontal_faces() {
        let level = corridor();
        let hit = cast_ray(&level, Coords::new(1.5, 1.5), Coords::new(0.0, -1.0)).unwrap();
        assert_eq!(hit.side, Side::Y);
        assert!((hit.distance - 0.5).abs() < 1e-4);
    }

    #[test]
    fn ray_gives_up_past_render_depth() {
        let mut rows = vec!["#".repeat(30)];
        rows.push(format!("#P{}#", ".".repeat(27)));
        rows.push("#".repeat(30));
        let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        let level = Level::parse(&refs).unwrap();
        assert!(cast_ray(&level, Coords::new(1.5, 1.5), Coords::new(1.0, 0.0)).is_none());
    }

    #[test]
    fn shade_darkens_with_distance_and_side() {
        assert_eq!(wall_shade(0.0, Side::X), GRADIENT_WHITE);
        assert!(wall_shade(6.0, Side::X) < wall_shade(1.0, Side::X));
        assert_eq!(wall_shade(1.0, Side::X) - wall_shade(1.0, Side::Y), 2);
        assert_eq!(wall_shade(MAX_RENDER_DEPTH as f32, Side::Y), 0);
        assert_eq!(wall_shade(f32::NAN, Side::X), 0);
    }

    #[test]
    fn span_shrinks_with_distance() {
        let (s1, e1) = wall_span(1.0);
        assert_eq!((s1, e1), (0, 56));
        let (s4, e4) = wall_span(4.0);
        assert_eq!((s4, e4), (21, 35));
        let (s0, e0) = wall_span(0.0);
        assert!(s0 < 0 && e0 > RENDER_HEIGHT as i16);
    }

    #[test]
    fn every_zbuffer_entry_is_written() {
        let level = Level::demo().unwrap();
        let (px, py) = level.player_start();
        let player = create_player(px, py);
        let mut renderer = Renderer::new();
        for group in 0..ZBUFFER_SIZE {
            renderer.zbuffer_mut().set_raw(group, 7);
        }

        let hits = cast_walls(&mut renderer, &level, &player);
        assert!(hits > 0);
        assert!(renderer.zbuffer().as_slice().iter().all(|&d| d != 7));
        assert!(renderer.framebuffer().count_lit() > 0);
    }

    #[test]
    fn facing_a_wall_fills_the_centre_column() {
        let level = corridor();
        let mut player = create_player(8, 1);
        player.pos = Coords::new(8.5, 1.5);
        let mut renderer = Renderer::new();
        cast_walls(&mut renderer, &level, &player);

        // Wall 0.5 cells ahead covers the whole viewport at full brightness.
        for y in 0..RENDER_HEIGHT as i16 {
            assert!(renderer.framebuffer().pixel(64, y), "row {y}");
        }
        assert_eq!(
            renderer.zbuffer().get(ZBuffer::group_for_column(64)),
            ZBuffer::quantize(0.5)
        );
    }
}
