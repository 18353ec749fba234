// Tiled JSON document model

use serde::{Deserialize, Serialize};

/// Render family of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Cliff,
    Floor,
    Wall,
    Props,
}

impl TileKind {
    /// Kind for a tileset name, if it is one the map draws
    pub fn from_tileset_name(name: &str) -> Option<Self> {
        match name {
            "cliff" => Some(Self::Cliff),
            "floor" => Some(Self::Floor),
            "wall" => Some(Self::Wall),
            "props" => Some(Self::Props),
            _ => None,
        }
    }
}

/// A map as exported by Tiled (only the fields the game reads)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TiledMap {
    /// Columns
    pub width: usize,
    /// Rows
    pub height: usize,
    pub tilewidth: u32,
    pub tileheight: u32,
    pub layers: Vec<TiledLayer>,
    #[serde(default)]
    pub tilesets: Vec<TiledTileset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TiledLayer {
    #[serde(default)]
    pub name: String,
    /// Global tile ids, row-major; 0 is an empty cell
    pub data: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TiledTileset {
    pub firstgid: u32,
    pub name: String,
}

impl TiledMap {
    /// Resolve a global id to its render kind and id local to the tileset
    pub fn classify(&self, gid: u32) -> Option<(TileKind, u32)> {
        if gid == 0 {
            return None;
        }
        let tileset = self
            .tilesets
            .iter()
            .filter(|tileset| tileset.firstgid <= gid)
            .max_by_key(|tileset| tileset.firstgid)?;
        let kind = TileKind::from_tileset_name(&tileset.name)?;
        Some((kind, gid - tileset.firstgid))
    }
}

/// First global ids used by `walled_arena`
pub mod arena_gids {
    pub const CLIFF: u32 = 1;
    pub const FLOOR: u32 = 101;
    pub const WALL: u32 = 201;
    pub const PROPS: u32 = 601;
}

/// Generate a walled arena: wall ring, floor inside, torches along the top wall
///
/// Used when no map document ships with the game.
pub fn walled_arena(columns: usize, rows: usize) -> TiledMap {
    use super::tile_map::{BLOCKING_TILE, TORCH_TILE};

    let cells = columns * rows;
    let mut ground = Vec::with_capacity(cells);
    let mut decor = vec![0; cells];
    let mut collision = Vec::with_capacity(cells);

    for row in 0..rows {
        for column in 0..columns {
            let border = row == 0 || column == 0 || row + 1 == rows || column + 1 == columns;
            if border {
                ground.push(arena_gids::WALL);
                collision.push(BLOCKING_TILE);
            } else {
                ground.push(arena_gids::FLOOR);
                collision.push(0);
            }
        }
    }

    // A cliff edge under the bottom wall
    if rows > 2 {
        for column in 1..columns.saturating_sub(1) {
            ground[(rows - 2) * columns + column] = arena_gids::CLIFF;
        }
    }

    for column in (2..columns.saturating_sub(2)).step_by(4) {
        decor[column] = TORCH_TILE;
    }

    TiledMap {
        width: columns,
        height: rows,
        tilewidth: 8,
        tileheight: 8,
        layers: vec![
            TiledLayer {
                name: "ground".into(),
                data: ground,
            },
            TiledLayer {
                name: "decor".into(),
                data: decor,
            },
            TiledLayer {
                name: "collision".into(),
                data: collision,
            },
        ],
        tilesets: vec![
            TiledTileset {
                firstgid: arena_gids::CLIFF,
                name: "cliff".into(),
            },
            TiledTileset {
                firstgid: arena_gids::FLOOR,
                name: "floor".into(),
            },
            TiledTileset {
                firstgid: arena_gids::WALL,
                name: "wall".into(),
            },
            TiledTileset {
                firstgid: arena_gids::PROPS,
                name: "props".into(),
            },
        ],
    }
}
