// Engine modules: assets, audio, input, timing, randomness

pub mod assets;
pub mod audio;
pub mod game_loop;
pub mod input;
pub mod random;
