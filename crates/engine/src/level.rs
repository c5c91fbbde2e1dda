//! Level grid
//!
//! A level is a fixed `LEVEL_WIDTH x LEVEL_HEIGHT` grid of cell types parsed
//! from text rows. Rows shorter than the widest row are padded with wall, and
//! anything outside the grid reads as wall, so rays and movement always stop.

use core::fmt;

use crate::types::{EntityType, LEVEL_HEIGHT, LEVEL_WIDTH};

/// Built-in demo map.
#[rustfmt::skip]
pub const DEMO_LEVEL: [&str; 12] = [
    "################",
    "#P.....#.......#",
    "#......#...E...#",
    "#..##..D.......#",
    "#..##..#####D###",
    "#......#.......#",
    "#.M....#...K...#",
    "###L####.......#",
    "#..............#",
    "#...E......##..#",
    "#..........##.X#",
    "################",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelError {
    Empty,
    TooWide { row: usize, width: usize },
    TooTall { height: usize },
    UnknownCell { x: usize, y: usize, ch: char },
    MissingPlayer,
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Empty => write!(f, "level has no rows"),
            LevelError::TooWide { row, width } => {
                write!(f, "row {row} is {width} cells wide (max {LEVEL_WIDTH})")
            }
            LevelError::TooTall { height } => {
                write!(f, "level is {height} rows tall (max {LEVEL_HEIGHT})")
            }
            LevelError::UnknownCell { x, y, ch } => {
                write!(f, "unknown cell {ch:?} at ({x}, {y})")
            }
            LevelError::MissingPlayer => write!(f, "level has no player start"),
        }
    }
}

impl std::error::Error for LevelError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    cells: [[EntityType; LEVEL_WIDTH]; LEVEL_HEIGHT],
    width: usize,
    height: usize,
    player_start: (u8, u8),
}

fn cell_for(ch: char) -> Option<EntityType> {
    Some(match ch {
        '#' => EntityType::Wall,
        '.' | ' ' => EntityType::Floor,
        'D' => EntityType::Door,
        'L' => EntityType::LockedDoor,
        'X' => EntityType::Exit,
        'E' => EntityType::Enemy,
        'M' => EntityType::Medikit,
        'K' => EntityType::Key,
        'P' => EntityType::Player,
        _ => return None,
    })
}

impl Level {
    pub fn parse(rows: &[&str]) -> Result<Self, LevelError> {
        if rows.is_empty() {
            return Err(LevelError::Empty);
        }
        if rows.len() > LEVEL_HEIGHT {
            return Err(LevelError::TooTall { height: rows.len() });
        }

        let mut cells = [[EntityType::Wall; LEVEL_WIDTH]; LEVEL_HEIGHT];
        let mut width = 0;
        let mut player_start = None;

        for (y, row) in rows.iter().enumerate() {
            let row_width = row.chars().count();
            if row_width > LEVEL_WIDTH {
                return Err(LevelError::TooWide {
                    row: y,
                    width: row_width,
                });
            }
            width = width.max(row_width);

            for (x, ch) in row.chars().enumerate() {
                let cell = cell_for(ch).ok_or(LevelError::UnknownCell { x, y, ch })?;
                if cell == EntityType::Player {
                    player_start = Some((x as u8, y as u8));
                    cells[y][x] = EntityType::Floor;
                } else {
                    cells[y][x] = cell;
                }
            }
        }

        Ok(Self {
            cells,
            width,
            height: rows.len(),
            player_start: player_start.ok_or(LevelError::MissingPlayer)?,
        })
    }

    pub fn demo() -> Result<Self, LevelError> {
        Self::parse(&DEMO_LEVEL)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn player_start(&self) -> (u8, u8) {
        self.player_start
    }

    /// Cell type at `(x, y)`. Everything outside the grid is wall.
    pub fn cell(&self, x: i32, y: i32) -> EntityType {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return EntityType::Wall;
        }
        self.cells[y as usize][x as usize]
    }

    pub fn set_cell(&mut self, x: usize, y: usize, cell: EntityType) {
        if x < self.width && y < self.height {
            self.cells[y][x] = cell;
        }
    }

    /// Whether the cell stops rays and movement.
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        let cell = self.cell(x, y);
        cell.is_solid() || cell == EntityType::Exit
    }

    /// Cells that spawn entities: `(type, x, y)` in row-major order.
    pub fn spawns(&self) -> impl Iterator<Item = (EntityType, u8, u8)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).filter_map(move |x| match self.cells[y][x] {
                kind @ (EntityType::Enemy | EntityType::Medikit | EntityType::Key) => {
                    Some((kind, x as u8, y as u8))
                }
                _ => None,
            })
        })
    }
}
