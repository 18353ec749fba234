// Tile map
//
// - Tiled document model and the built-in arena
// - Walkability grid, render lookup and torch decorations

pub mod tile_map;
pub mod tiled;

pub use tile_map::{MapError, Tile, TileMap, Torch, BLOCKING_TILE, TORCH_TILE};
pub use tiled::{walled_arena, TileKind, TiledMap};
