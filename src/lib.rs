//! # tile2048
//!
//! This library provides the core game logic for the 2048 sliding-tile puzzle
//! and a small controller that runs turns against any front end.
//!
//! It is used by two binaries:
//! - `human_player`: Interactive gameplay in the terminal.
//! - `auto_player`: Plays games headlessly with a simple policy and reports the results.
//!
//! ## Modules
//! - `engine`: The grid (`Grid`), directions (`Direction`) and the compress/merge mechanics.
//! - `game`: The session controller (`Game`), its state machine and the per-turn protocol.
//! - `presenter`: The `Presenter` trait a front end implements, plus a headless implementation.
//! - `input`: Key names bound to each direction.
//! - `palette`: Tile colours for front ends.
//! - `config`: Game settings (`GameConfig`).
//! - `error`: The `GameError` type.
//! - `utils`: Parsing boards from text.

pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod input;
pub mod palette;
pub mod presenter;
pub mod utils;
