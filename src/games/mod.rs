//! Games built on the engine.
//!
//! - `memory`: the timed, levelled memory puzzle

pub mod memory;
