// Tile map: render lookup, walkability grid and torch decorations

use glam::Vec2;
use log::info;

use super::tiled::{TileKind, TiledMap};
use crate::engine::random::roll_for_key;
use crate::game::characters::animation::{AnimationPlayer, TORCH_FRAMES};

/// Decor tile that spawns a torch
pub const TORCH_TILE: u32 = 626;
/// Collision tile that blocks movement
pub const BLOCKING_TILE: u32 = 675;

/// Layer order inside a map document
const GROUND_LAYER: usize = 0;
const DECOR_LAYER: usize = 1;
const COLLISION_LAYER: usize = 2;

/// Malformed map data
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MapError {
    #[error("map needs 3 layers (ground, decor, collision), found {found}")]
    MissingLayers { found: usize },

    #[error("layer {layer} has {found} cells, expected {expected}")]
    LayerSize {
        layer: usize,
        expected: usize,
        found: usize,
    },

    #[error("map has a zero-sized tile or grid")]
    EmptyGrid,

    #[error("map grid of {columns}x{rows} cells is too large")]
    GridTooLarge { columns: usize, rows: usize },
}

/// A drawable tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub kind: TileKind,
    /// Id local to the tileset of `kind`
    pub local_id: u32,
    pub row: usize,
    pub column: usize,
    /// Top-left corner in world pixels
    pub position: Vec2,
}

/// Animated flame with its light halo below it
#[derive(Debug, Clone)]
pub struct Torch {
    pub flame_position: Vec2,
    pub light_position: Vec2,
    flame: AnimationPlayer,
    light: AnimationPlayer,
}

impl Torch {
    fn new(flame_position: Vec2, light_position: Vec2, phase: usize) -> Self {
        let mut flame = AnimationPlayer::torch();
        let mut light = AnimationPlayer::torch();
        flame.set_frame(phase);
        light.set_frame(phase);
        Self {
            flame_position,
            light_position,
            flame,
            light,
        }
    }

    pub fn flame_frame(&self) -> usize {
        self.flame.current_frame()
    }

    pub fn light_frame(&self) -> usize {
        self.light.current_frame()
    }

    fn update(&mut self, dt: f32) {
        self.flame.update(dt);
        self.light.update(dt);
    }
}

/// The playable map
#[derive(Debug, Clone)]
pub struct TileMap {
    columns: usize,
    rows: usize,
    tile_width: f32,
    tile_height: f32,
    /// Cliff tiles, then floor tiles
    ground: Vec<Tile>,
    /// Wall tiles, then props
    elevated: Vec<Tile>,
    /// Row-major blocking flags
    blocking: Vec<bool>,
    torches: Vec<Torch>,
}

impl TileMap {
    /// Build the map from a Tiled document
    pub fn build(document: &TiledMap) -> Result<Self, MapError> {
        if document.layers.len() < 3 {
            return Err(MapError::MissingLayers {
                found: document.layers.len(),
            });
        }
        let columns = document.width;
        let rows = document.height;
        if columns == 0 || rows == 0 || document.tilewidth == 0 || document.tileheight == 0 {
            return Err(MapError::EmptyGrid);
        }
        let expected = columns
            .checked_mul(rows)
            .ok_or(MapError::GridTooLarge { columns, rows })?;
        for (layer, data) in document.layers.iter().enumerate().take(3) {
            if data.data.len() != expected {
                return Err(MapError::LayerSize {
                    layer,
                    expected,
                    found: data.data.len(),
                });
            }
        }

        let tile_width = document.tilewidth as f32;
        let tile_height = document.tileheight as f32;
        let cell = |index: usize| (index / columns, index % columns);

        let tiles_of = |layer: usize, kind: TileKind| -> Vec<Tile> {
            document.layers[layer]
                .data
                .iter()
                .enumerate()
                .filter_map(|(index, &gid)| {
                    let (found, local_id) = document.classify(gid)?;
                    if found != kind {
                        return None;
                    }
                    let (row, column) = cell(index);
                    Some(Tile {
                        kind,
                        local_id,
                        row,
                        column,
                        position: Vec2::new(column as f32 * tile_width, row as f32 * tile_height),
                    })
                })
                .collect()
        };

        let mut ground = tiles_of(GROUND_LAYER, TileKind::Cliff);
        ground.extend(tiles_of(GROUND_LAYER, TileKind::Floor));
        let mut elevated = tiles_of(GROUND_LAYER, TileKind::Wall);
        elevated.extend(tiles_of(DECOR_LAYER, TileKind::Props));

        let torches = document.layers[DECOR_LAYER]
            .data
            .iter()
            .enumerate()
            .filter(|&(_, &gid)| gid == TORCH_TILE)
            .map(|(index, _)| {
                let (row, column) = cell(index);
                let x = (column as f32 + 1.0) * tile_width;
                let flame = Vec2::new(x, (row as f32 + 1.0) * tile_height);
                let light = Vec2::new(x, (row as f32 + 1.5) * tile_height);
                let phase = roll_for_key(index as u64, 0, TORCH_FRAMES as i32 - 1);
                Torch::new(flame, light, phase as usize)
            })
            .collect::<Vec<_>>();

        let blocking = document.layers[COLLISION_LAYER]
            .data
            .iter()
            .map(|&gid| gid == BLOCKING_TILE)
            .collect();

        info!(
            "map built: {}x{} tiles, {} torches",
            columns,
            rows,
            torches.len()
        );

        Ok(Self {
            columns,
            rows,
            tile_width,
            tile_height,
            ground,
            elevated,
            blocking,
            torches,
        })
    }

    /// Whether a cell blocks movement; cells outside the grid do
    pub fn is_blocking_cell(&self, row: i64, column: i64) -> bool {
        if row < 0 || column < 0 || row >= self.rows as i64 || column >= self.columns as i64 {
            return true;
        }
        self.blocking[row as usize * self.columns + column as usize]
    }

    /// Whether a point lies in a walkable cell
    pub fn is_walkable_point(&self, x: f32, y: f32) -> bool {
        let row = (y / self.tile_height).floor() as i64;
        let column = (x / self.tile_width).floor() as i64;
        !self.is_blocking_cell(row, column)
    }

    /// Whether all four corners of a rectangle lie in walkable cells
    pub fn is_walkable(&self, x: f32, y: f32, width: f32, height: f32) -> bool {
        [
            (x, y),
            (x, y + height),
            (x + width, y),
            (x + width, y + height),
        ]
        .into_iter()
        .all(|(cx, cy)| self.is_walkable_point(cx, cy))
    }

    /// Advance the torch animations
    pub fn tick(&mut self, dt: f32) {
        for torch in &mut self.torches {
            torch.update(dt);
        }
    }

    /// Tiles drawn below actors
    pub fn ground_tiles(&self) -> &[Tile] {
        &self.ground
    }

    /// Tiles drawn above actors
    pub fn elevated_tiles(&self) -> &[Tile] {
        &self.elevated
    }

    /// Torches, drawn after the elevated tiles
    pub fn torches(&self) -> &[Torch] {
        &self.torches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::map::tiled::{walled_arena, TiledLayer};

    fn arena() -> TileMap {
        TileMap::build(&walled_arena(10, 8)).unwrap()
    }

    #[test]
    fn test_walkable_when_all_corners_open() {
        let map = arena();
        assert!(map.is_walkable(20.0, 20.0, 7.5, 7.5));
    }

    #[test]
    fn test_blocked_when_one_corner_in_wall() {
        let map = arena();
        // Right corners at x 72.5 reach column 9, the east wall
        assert!(!map.is_walkable(65.0, 20.0, 7.5, 7.5));
        assert!(map.is_walkable(64.0, 20.0, 7.5, 7.5));
        // Top corners sit in the north wall row
        assert!(!map.is_walkable(20.0, 4.0, 7.5, 3.0));
    }

    #[test]
    fn test_single_blocking_corner() {
        let mut document = walled_arena(10, 8);
        document.layers[2].data[3 * 10 + 3] = BLOCKING_TILE;
        let map = TileMap::build(&document).unwrap();

        assert!(map.is_blocking_cell(3, 3));
        assert!(map.is_walkable(10.0, 10.0, 5.0, 5.0));
        // Only the bottom-right corner (24.5, 24.5) lands in cell (3, 3)
        assert!(!map.is_walkable(17.0, 17.0, 7.5, 7.5));
        assert!(map.is_walkable(15.0, 15.0, 7.5, 7.5));
    }

    #[test]
    fn test_out_of_bounds_is_blocking() {
        let map = arena();
        assert!(!map.is_walkable(-20.0, 20.0, 4.0, 4.0));
        assert!(!map.is_walkable(500.0, 20.0, 4.0, 4.0));
        assert!(map.is_blocking_cell(-1, 3));
        assert!(map.is_blocking_cell(3, 10));
    }

    #[test]
    fn test_render_lists() {
        let map = arena();
        let ground = map.ground_tiles();
        let first_floor = ground
            .iter()
            .position(|t| t.kind == TileKind::Floor)
            .unwrap();
        let (cliffs, floors) = ground.split_at(first_floor);
        assert!(cliffs.iter().all(|t| t.kind == TileKind::Cliff));
        assert!(floors.iter().all(|t| t.kind == TileKind::Floor));
        // 10x8 wall ring, then the two torch props
        let elevated = map.elevated_tiles();
        assert_eq!(elevated.len(), 2 * 10 + 2 * 6 + 2);
        assert!(elevated[..32].iter().all(|t| t.kind == TileKind::Wall));
        assert!(elevated[32..].iter().all(|t| t.kind == TileKind::Props));
    }

    #[test]
    fn test_torch_positions() {
        let map = arena();
        // walled_arena(10, _) puts torches in row 0, columns 2 and 6
        assert_eq!(map.torches().len(), 2);
        let torch = &map.torches()[0];
        assert_eq!(torch.flame_position, Vec2::new(24.0, 8.0));
        assert_eq!(torch.light_position, Vec2::new(24.0, 12.0));
        assert_eq!(torch.flame_frame(), torch.light_frame());
    }

    #[test]
    fn test_torch_phase_is_deterministic() {
        let a = arena();
        let b = arena();
        let phases = |m: &TileMap| -> Vec<usize> {
            m.torches().iter().map(Torch::flame_frame).collect()
        };
        assert_eq!(phases(&a), phases(&b));
    }

    #[test]
    fn test_tick_keeps_flame_and_light_in_step() {
        let mut map = arena();
        for _ in 0..17 {
            map.tick(1.0 / 60.0);
        }
        for torch in map.torches() {
            assert_eq!(torch.flame_frame(), torch.light_frame());
            assert!(torch.flame_frame() < TORCH_FRAMES);
        }
    }

    #[test]
    fn test_missing_layers() {
        let mut document = walled_arena(4, 4);
        document.layers.truncate(2);
        assert_eq!(
            TileMap::build(&document).unwrap_err(),
            MapError::MissingLayers { found: 2 }
        );
    }

    #[test]
    fn test_layer_size_mismatch() {
        let mut document = walled_arena(4, 4);
        document.layers[1] = TiledLayer {
            name: "decor".into(),
            data: vec![0; 3],
        };
        assert_eq!(
            TileMap::build(&document).unwrap_err(),
            MapError::LayerSize {
                layer: 1,
                expected: 16,
                found: 3
            }
        );
    }

    #[test]
    fn test_zero_tile_size() {
        let mut document = walled_arena(4, 4);
        document.tilewidth = 0;
        assert_eq!(TileMap::build(&document).unwrap_err(), MapError::EmptyGrid);
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        let mut document = walled_arena(4, 4);
        document.width = usize::MAX;
        document.height = 2;
        assert_eq!(
            TileMap::build(&document).unwrap_err(),
            MapError::GridTooLarge {
                columns: usize::MAX,
                rows: 2
            }
        );
    }
}
