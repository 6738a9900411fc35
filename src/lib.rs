//! Quarter-turn solver for the 2x2 cube.
//!
//! A [`Cube`] is 24 colored facelets. The six [`Move`]s are fixed
//! permutations of those facelets, and [`solver`] searches the resulting
//! state space with iterative deepening or breadth-first search.

pub mod cube;
pub mod render;
pub mod solver;

pub use cube::{Color, Cube, CubeError, Move, StateDefect};
pub use solver::{solve_bfs, solve_iddfs, Method};
