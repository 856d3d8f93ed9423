use log::debug;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::cells::CellFlags;
use crate::coordinates::Cartesian3DCoordinate;
use crate::errors::*;
use crate::generators::{self, TargetPolicy};
use crate::grid::Grid;
use crate::grid_dimensions::GridDimensions;
use crate::orientation::Orientation;


/// A generated maze together with the player's progress through it.
///
/// Cloning copies the whole grid, so a clone is an independent snapshot. See
/// `shared::SharedMaze` for a handle whose duplicates all see the same maze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    pub(crate) grid: Grid,
    pub(crate) target: Cartesian3DCoordinate,
    pub(crate) second: Cartesian3DCoordinate,
    pub(crate) current: Cartesian3DCoordinate,
    pub(crate) orientation: Orientation,
    pub(crate) start: Cartesian3DCoordinate,
    pub(crate) start_orientation: Orientation,
    pub(crate) seed: u64,
    pub(crate) moves: u64,
    pub(crate) rotations: u64,
    pub(crate) marks: u64,
    pub(crate) mode: i64,
}

impl Maze {
    /// Generate a maze. A seed of 0 draws a fresh seed, which `seed()` reports afterwards.
    pub fn new(x: u32,
               y: u32,
               z: u32,
               policy: TargetPolicy,
               double_routes: bool,
               seed: u64)
               -> Result<Maze> {
        let dimensions = GridDimensions::new(x, y, z)?;
        Maze::generate(dimensions, policy, double_routes, seed)
    }

    pub fn generate(dimensions: GridDimensions,
                    policy: TargetPolicy,
                    double_routes: bool,
                    seed: u64)
                    -> Result<Maze> {
        let seed = if seed == 0 {
            rand::thread_rng().gen_range(1..i64::max_value() as u64)
        } else {
            seed
        };
        debug!("generating {:?} maze, seed {}", dimensions, seed);

        let mut rng = XorShiftRng::seed_from_u64(seed);
        let layout = generators::generate(dimensions, policy, double_routes, &mut rng)?;

        Ok(Maze {
            grid: layout.grid,
            target: layout.target,
            second: layout.second,
            current: layout.start,
            orientation: layout.start_orientation,
            start: layout.start,
            start_orientation: layout.start_orientation,
            seed: seed,
            moves: 0,
            rotations: 0,
            marks: 0,
            mode: 0,
        })
    }

    #[inline]
    pub fn dimensions(&self) -> GridDimensions {
        self.grid.dimensions()
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn target(&self) -> Cartesian3DCoordinate {
        self.target
    }

    /// The neighbour through which the target is first reached.
    pub fn second(&self) -> Cartesian3DCoordinate {
        self.second
    }

    pub fn start(&self) -> Cartesian3DCoordinate {
        self.start
    }

    pub fn start_orientation(&self) -> Orientation {
        self.start_orientation
    }

    pub fn current(&self) -> Cartesian3DCoordinate {
        self.current
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn moves(&self) -> u64 {
        self.moves
    }

    pub fn rotations(&self) -> u64 {
        self.rotations
    }

    pub fn marks(&self) -> u64 {
        self.marks
    }

    /// Opaque value owned by the caller.
    pub fn mode(&self) -> i64 {
        self.mode
    }

    pub fn set_mode(&mut self, mode: i64) {
        self.mode = mode;
    }

    /// Pick up every mark and go back to the start. The counters are kept.
    pub fn reset(&mut self) {
        self.grid.clear_flags(CellFlags::MARK);
        self.marks = 0;
        self.current = self.start;
        self.orientation = self.start_orientation;
    }
}
