//! # Connect Dots Library
//!
//! This library provides the core logic of a connect-the-dots puzzle: the player
//! drags between two markers of the same color to connect them, scores points per
//! connection, and moves through levels whose grids grow with the level.
//!
//! It is used by three binaries:
//! - `human_player`: interactive play on the command line, with text commands standing
//!   in for pointer events.
//! - `auto_player`: generates (or loads) a board and solves it through the engine.
//! - `fairness_evaluator`: samples many boards and reports positional color bias.
//!
//! Rendering and input devices are left to the host. A host sends `PointerEvent`s and
//! control actions to a `GameSession` and re-reads its `Snapshot` after each call.
//!
//! ## Modules
//! - `board`: colors, markers, connections, the `Board` and the board generator.
//! - `engine`: the `ConnectionEngine` that turns pointer input into connections.
//! - `completion`: the completion rule and progress counts.
//! - `session`: `GameSession`, level progression and the grid-size policy.
//! - `config`: `GameConfig`, loadable from TOML.
//! - `solver`: plans and replays a full set of connections for a board.
//! - `fairness`: positional frequency statistics for the generator.
//! - `utils`: the text board format.
//! - `error`: configuration and board parsing errors.

pub mod board;
pub mod completion;
pub mod config;
pub mod engine;
pub mod error;
pub mod fairness;
pub mod session;
pub mod solver;
pub mod utils;
