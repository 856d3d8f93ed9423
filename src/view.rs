use log::trace;
use smallvec::SmallVec;

use crate::cells::Compass;
use crate::coordinates::Cartesian3DCoordinate;
use crate::errors::*;
use crate::grid_dimensions::{GridDimensions, MAX_DIMENSION};
use crate::maze::Maze;
use crate::orientation::Relative;

/// Most cells that can be seen in a straight line.
pub const VIEW_DEPTH: usize = MAX_DIMENSION as usize;


/// The thread as seen from a cell in view.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ViewThread {
    pub compass: Compass,
    pub relative: Relative,
}

/// One cell along the line of sight.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ViewCell {
    /// Walls indexed by `Relative`.
    pub walls: [bool; 6],
    pub thread: Option<ViewThread>,
    pub marked: bool,
    pub target: bool,
}

impl ViewCell {
    #[inline]
    pub fn has_wall(&self, relative: Relative) -> bool {
        self.walls[relative.index()]
    }
}

/// What the player can see from where they stand.
#[derive(Clone, Debug, PartialEq)]
pub struct View {
    pub dimensions: GridDimensions,
    pub coordinate: Cartesian3DCoordinate,
    /// Compass direction at each relative bearing, indexed by `Relative`.
    pub compass: [Compass; 6],
    /// Straight line distance to the target.
    pub crow_flies: f64,
    /// Compass letters pointing roughly toward the target.
    pub hint: String,
    /// Cells straight ahead, starting with the one stood in.
    pub cells: SmallVec<[ViewCell; 8]>,
    pub moves: u64,
    pub marks: u64,
    pub rotations: u64,
    pub mode: i64,
}

impl View {
    /// How many cells are in sight.
    pub fn depth(&self) -> usize {
        self.cells.len()
    }

    pub fn compass_of(&self, relative: Relative) -> Compass {
        self.compass[relative.index()]
    }
}

impl Maze {
    /// Look along the current facing until a wall blocks the view.
    pub fn view(&self) -> Result<View> {
        let dimensions = self.dimensions();
        let orientation = self.orientation;
        let facing = orientation.facing();

        let mut compass = [facing; 6];
        for relative in Relative::ALL.iter() {
            compass[relative.index()] = orientation.compass_of(*relative);
        }

        let mut cells = SmallVec::<[ViewCell; 8]>::new();
        let mut at = self.current;
        loop {
            let cell = match self.grid.get(at) {
                Some(cell) => cell,
                None => return Err(ErrorKind::OutsideGrid(at).into()),
            };
            let mut walls = [false; 6];
            for relative in Relative::ALL.iter() {
                walls[relative.index()] = cell.has_wall(compass[relative.index()]);
            }
            let thread = cell.thread().map(|dir| {
                ViewThread {
                    compass: dir,
                    relative: orientation.relative_of(dir),
                }
            });
            cells.push(ViewCell {
                walls: walls,
                thread: thread,
                marked: cell.is_marked(),
                target: cell.is_target(),
            });

            if walls[Relative::Forward.index()] || cells.len() >= VIEW_DEPTH {
                break;
            }
            at = match at.offset(facing) {
                Some(next) => next,
                None => return Err(ErrorKind::OutsideGrid(at).into()),
            };
        }
        trace!("view from {} facing {} is {} deep", self.current, facing, cells.len());

        let crow_flies = self.current.distance_to(self.target);
        Ok(View {
            dimensions: dimensions,
            coordinate: self.current,
            compass: compass,
            crow_flies: crow_flies,
            hint: hint(self.current, self.target, crow_flies),
            cells: cells,
            moves: self.moves,
            marks: self.marks,
            rotations: self.rotations,
            mode: self.mode,
        })
    }
}

/// A letter for each axis on which the target lies further away than half the straight
/// line distance, in the order S N E W D U.
fn hint(from: Cartesian3DCoordinate, target: Cartesian3DCoordinate, crow_flies: f64) -> String {
    let band = i64::from(crow_flies as u32 / 2);
    let (x, y, z) = (i64::from(from.x), i64::from(from.y), i64::from(from.z));
    let (tx, ty, tz) = (i64::from(target.x), i64::from(target.y), i64::from(target.z));
    let checks = [(x - band > tx, Compass::South),
                  (x + band < tx, Compass::North),
                  (y - band > ty, Compass::East),
                  (y + band < ty, Compass::West),
                  (z - band > tz, Compass::Down),
                  (z + band < tz, Compass::Up)];
    checks.iter().filter(|c| c.0).map(|c| c.1.letter()).collect()
}
