//! Exhaustive walk of a freshly generated maze, starting and ending at the target.
//!
//! A pebble is dropped on each cell as the walker moves deeper and picked up again as it
//! backs out, which keeps a running count of the distance from the target. Backing out of
//! a cell also lays the thread on it: the direction that leads back toward the target.

use log::trace;
use rand::Rng;

use crate::cells::{CellFlags, Compass};
use crate::coordinates::Cartesian3DCoordinate;
use crate::errors::*;
use crate::grid::Grid;
use crate::orientation::Orientation;

use crate::cells::Compass::*;

/// Direction preference for each incoming heading, indexed by the heading.
const PREFERENCES: [[Compass; 6]; 6] = [[East, Up, North, West, Down, South],
                                        [West, Down, South, East, Up, North],
                                        [Up, North, West, Down, South, East],
                                        [Down, South, East, Up, North, West],
                                        [South, East, Up, North, West, Down],
                                        [North, West, Down, South, East, Up]];


/// Outcome of the walk: where the player starts.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Walk {
    pub start: Cartesian3DCoordinate,
    /// Facing back the way the walker arrived at the start.
    pub orientation: Orientation,
    /// Walk distance from the target to the start.
    pub distance: u64,
}

/// Walk every passage of the maze from the target, recording threads and choosing the
/// cell furthest from the target as the start. Equally distant candidates replace the
/// current best on a coin flip.
///
/// Fails if the target has no exit, a cell has no way out, or the walk does not get back
/// to the target within six steps per cell.
pub fn walk_from_target<R: Rng>(grid: &mut Grid,
                                target: Cartesian3DCoordinate,
                                rng: &mut R)
                                -> Result<Walk> {

    let exit = {
        let cell = grid.cell(target);
        Compass::ALL.iter().rev().cloned().find(|d| !cell.has_wall(*d))
    };
    let mut heading = exit.ok_or_else(|| Error::from(ErrorKind::Trapped(target)))?;

    let step_limit = grid.size() * 6;
    let mut current = target;
    let mut distance: i64 = 0;
    let mut best = Walk {
        start: target,
        orientation: Orientation::default(),
        distance: 0,
    };

    for _ in 0..step_limit {
        let previous = current;
        current = grid.neighbour_at_direction(previous, heading)
            .ok_or_else(|| Error::from(ErrorKind::OutsideGrid(previous)))?;

        if grid.cell(current).has_pebble() {
            let cell = grid.cell_mut(previous);
            cell.remove(CellFlags::PEBBLE);
            cell.set_thread(Some(heading));
            distance -= 1;
        } else {
            grid.cell_mut(previous).insert(CellFlags::PEBBLE);
            distance += 1;
            let best_distance = best.distance as i64;
            if distance > best_distance || (distance == best_distance && rng.gen()) {
                best = Walk {
                    start: current,
                    orientation: facing_back(heading),
                    distance: distance as u64,
                };
            }
        }
        trace!("walked {} to {}, distance {}", heading, current, distance);

        if current == target {
            grid.cell_mut(target).remove(CellFlags::PEBBLE);
            return Ok(best);
        }

        let cell = *grid.cell(current);
        heading = PREFERENCES[heading.index()]
            .iter()
            .cloned()
            .find(|d| !cell.has_wall(*d))
            .ok_or_else(|| Error::from(ErrorKind::Trapped(current)))?;
    }

    Err(ErrorKind::IncompleteWalk(step_limit).into())
}

/// Orientation looking back along `heading`, with up overhead, or north overhead when
/// looking straight up or down.
fn facing_back(heading: Compass) -> Orientation {
    let top = if heading.is_vertical() { North } else { Up };
    match Orientation::new(heading.opposite(), top) {
        Some(orientation) => orientation,
        None => unreachable!("top is chosen perpendicular to the heading"),
    }
}
