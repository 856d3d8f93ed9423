//! **maze3d** builds three dimensional mazes and walks a player through them.
//!
//! A maze is generated from a seed, its start chosen as the cell furthest from the
//! target, and each cell carries a thread leading back to the target. The player turns,
//! pitches and rolls through 24 orientations, sees straight ahead through `Maze::view`,
//! and the whole state saves to and loads from plain text.

pub mod cells;
pub mod coordinates;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod maze;
pub mod navigation;
pub mod orientation;
pub mod params;
pub mod pathing;
pub mod persistence;
pub mod shared;
pub mod view;
pub mod walker;
mod utils;

pub use crate::coordinates::Cartesian3DCoordinate;
pub use crate::generators::TargetPolicy;
pub use crate::maze::Maze;
pub use crate::navigation::{Move, Position, PositionUpdate};
pub use crate::orientation::Orientation;
pub use crate::params::MazeParams;
pub use crate::shared::SharedMaze;
pub use crate::view::View;
