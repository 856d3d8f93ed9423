use log::trace;

use crate::cells::{CellFlags, Compass};
use crate::coordinates::Cartesian3DCoordinate;
use crate::errors::*;
use crate::maze::Maze;
use crate::orientation::{Orientation, Rotation};


/// Player operators. The discriminants are the move codes shared with callers.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Move {
    Forward = 0,
    TurnAround = 1,
    TurnLeft = 2,
    TurnRight = 3,
    PitchUp = 4,
    PitchDown = 5,
    RollClockwise = 6,
    RollAnticlockwise = 7,
    Back = 8,
    Mark = 9,
}

impl Move {
    pub const ALL: [Move; 10] = [Move::Forward,
                                 Move::TurnAround,
                                 Move::TurnLeft,
                                 Move::TurnRight,
                                 Move::PitchUp,
                                 Move::PitchDown,
                                 Move::RollClockwise,
                                 Move::RollAnticlockwise,
                                 Move::Back,
                                 Move::Mark];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Move> {
        Move::ALL.get(code as usize).cloned()
    }

    /// Single letter form, `'A'` for forward onwards.
    pub fn letter(self) -> char {
        char::from(b'A' + self.code())
    }

    pub fn from_letter(letter: char) -> Option<Move> {
        if letter.is_ascii_uppercase() {
            Move::from_code(letter as u8 - b'A')
        } else {
            None
        }
    }

    fn rotation(self) -> Option<Rotation> {
        match self {
            Move::TurnAround => Some(Rotation::TurnAround),
            Move::TurnLeft => Some(Rotation::TurnLeft),
            Move::TurnRight => Some(Rotation::TurnRight),
            Move::PitchUp => Some(Rotation::PitchUp),
            Move::PitchDown => Some(Rotation::PitchDown),
            Move::RollClockwise => Some(Rotation::RollClockwise),
            Move::RollAnticlockwise => Some(Rotation::RollAnticlockwise),
            _ => None,
        }
    }
}

/// How close the player is to the target.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum TargetProximity {
    None,
    /// On the cell next to the target and looking at it.
    FacingTarget,
    OnTarget,
}

/// Everything needed to put the player back where they were.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Position {
    pub coordinate: Cartesian3DCoordinate,
    pub orientation: Orientation,
    pub marked: bool,
    pub proximity: TargetProximity,
    pub moves: u64,
    pub rotations: u64,
}

/// A requested position. Fields left as None keep their current value.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct PositionUpdate {
    pub coordinate: Cartesian3DCoordinate,
    pub orientation: Option<Orientation>,
    pub marked: Option<bool>,
    pub moves: Option<u64>,
    pub rotations: Option<u64>,
}

impl PositionUpdate {
    pub fn to(coordinate: Cartesian3DCoordinate) -> PositionUpdate {
        PositionUpdate {
            coordinate: coordinate,
            orientation: None,
            marked: None,
            moves: None,
            rotations: None,
        }
    }
}

impl From<Position> for PositionUpdate {
    fn from(position: Position) -> PositionUpdate {
        PositionUpdate {
            coordinate: position.coordinate,
            orientation: Some(position.orientation),
            marked: Some(position.marked),
            moves: Some(position.moves),
            rotations: Some(position.rotations),
        }
    }
}

impl Maze {
    /// Apply a player operator. Returns false, with nothing changed, when a wall blocks
    /// a forward or backward step.
    ///
    /// Turns and pitches count as rotations, rolls do not.
    pub fn make_move(&mut self, player_move: Move) -> bool {
        match player_move {
            Move::Forward => self.step(self.orientation.facing()),
            Move::Back => self.step(self.orientation.facing().opposite()),
            Move::Mark => {
                let cell = self.grid.cell_mut(self.current);
                let marked = !cell.is_marked();
                cell.set(CellFlags::MARK, marked);
                if marked {
                    self.marks += 1;
                } else {
                    self.marks = self.marks.saturating_sub(1);
                }
                true
            }
            rotating => {
                if let Some(rotation) = rotating.rotation() {
                    self.orientation = self.orientation.rotate(rotation);
                    if rotation != Rotation::RollClockwise && rotation != Rotation::RollAnticlockwise {
                        self.rotations += 1;
                    }
                }
                true
            }
        }
    }

    fn step(&mut self, direction: Compass) -> bool {
        if self.grid.has_wall(self.current, direction) {
            return false;
        }
        match self.grid.neighbour_at_direction(self.current, direction) {
            Some(next) => {
                trace!("moved {} from {} to {}", direction, self.current, next);
                self.current = next;
                self.moves += 1;
                true
            }
            None => false,
        }
    }

    pub fn position(&self) -> Position {
        Position {
            coordinate: self.current,
            orientation: self.orientation,
            marked: self.grid.cell(self.current).is_marked(),
            proximity: self.proximity(),
            moves: self.moves,
            rotations: self.rotations,
        }
    }

    fn proximity(&self) -> TargetProximity {
        if self.current == self.target {
            TargetProximity::OnTarget
        } else if self.current == self.second &&
                  self.grid.cell(self.second).thread() == Some(self.orientation.facing()) {
            TargetProximity::FacingTarget
        } else {
            TargetProximity::None
        }
    }

    /// Jump straight to a position, as when replaying or undoing moves.
    ///
    /// The cell must exist and be carved. The mark on the cell is made to agree with the
    /// request, and the mark count follows whatever actually changed.
    pub fn set_position(&mut self, update: &PositionUpdate) -> Result<()> {
        let coord = update.coordinate;
        let cell = match self.grid.get(coord) {
            Some(cell) => *cell,
            None => return Err(ErrorKind::OutsideGrid(coord).into()),
        };
        if cell.is_uninitialised() {
            return Err(ErrorKind::UninitialisedCell(coord).into());
        }

        self.current = coord;
        if let Some(orientation) = update.orientation {
            self.orientation = orientation;
        }
        if let Some(moves) = update.moves {
            self.moves = moves;
        }
        if let Some(rotations) = update.rotations {
            self.rotations = rotations;
        }
        if let Some(marked) = update.marked {
            if marked != cell.is_marked() {
                self.grid.cell_mut(coord).set(CellFlags::MARK, marked);
                if marked {
                    self.marks += 1;
                } else {
                    self.marks = self.marks.saturating_sub(1);
                }
            }
        }
        Ok(())
    }
}
