//! Viewer orientation: the direction faced plus the direction overhead.
//!
//! The top is always perpendicular to the facing, which leaves the 24 rotations of a cube.
//! Every operator is looked up in a composition table built once from vector geometry,
//! left being `top × facing` and right `facing × top`.

use lazy_static::lazy_static;
use std::fmt;

use crate::cells::Compass;

/// Number of distinct orientations.
pub const ORIENTATIONS_COUNT: usize = 24;


#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Orientation {
    facing: Compass,
    top: Compass,
}

/// Operators of the composition table.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Rotation {
    Identity = 0,
    TurnAround = 1,
    TurnLeft = 2,
    TurnRight = 3,
    PitchUp = 4,
    PitchDown = 5,
    RollClockwise = 6,
    RollAnticlockwise = 7,
}

impl Rotation {
    pub const ALL: [Rotation; 8] = [Rotation::Identity,
                                    Rotation::TurnAround,
                                    Rotation::TurnLeft,
                                    Rotation::TurnRight,
                                    Rotation::PitchUp,
                                    Rotation::PitchDown,
                                    Rotation::RollClockwise,
                                    Rotation::RollAnticlockwise];

    pub fn inverse(self) -> Rotation {
        match self {
            Rotation::TurnLeft => Rotation::TurnRight,
            Rotation::TurnRight => Rotation::TurnLeft,
            Rotation::PitchUp => Rotation::PitchDown,
            Rotation::PitchDown => Rotation::PitchUp,
            Rotation::RollClockwise => Rotation::RollAnticlockwise,
            Rotation::RollAnticlockwise => Rotation::RollClockwise,
            other => other,
        }
    }
}

/// Bearings relative to the viewer.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Relative {
    Forward = 0,
    Back = 1,
    Left = 2,
    Right = 3,
    Up = 4,
    Down = 5,
}

impl Relative {
    pub const ALL: [Relative; 6] = [Relative::Forward,
                                    Relative::Back,
                                    Relative::Left,
                                    Relative::Right,
                                    Relative::Up,
                                    Relative::Down];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The rotation that would leave the viewer facing this way.
    pub fn rotation(self) -> Rotation {
        match self {
            Relative::Forward => Rotation::Identity,
            Relative::Back => Rotation::TurnAround,
            Relative::Left => Rotation::TurnLeft,
            Relative::Right => Rotation::TurnRight,
            Relative::Up => Rotation::PitchUp,
            Relative::Down => Rotation::PitchDown,
        }
    }
}

lazy_static! {
    static ref ALL_ORIENTATIONS: Vec<Orientation> = {
        let mut all = Vec::with_capacity(ORIENTATIONS_COUNT);
        for facing in Compass::ALL.iter() {
            for top in Compass::ALL.iter() {
                if let Some(o) = Orientation::new(*facing, *top) {
                    all.push(o);
                }
            }
        }
        all
    };

    static ref COMPOSITION: Vec<[Orientation; 8]> = ALL_ORIENTATIONS
        .iter()
        .map(|o| {
            let mut row = [*o; 8];
            for rotation in Rotation::ALL.iter() {
                row[*rotation as usize] = o.derive(*rotation);
            }
            row
        })
        .collect();
}

impl Orientation {
    /// None unless `top` is perpendicular to `facing`.
    pub fn new(facing: Compass, top: Compass) -> Option<Orientation> {
        if facing.cross(top).is_some() {
            Some(Orientation { facing: facing, top: top })
        } else {
            None
        }
    }

    /// Facing north with up overhead.
    pub fn default_orientation() -> Orientation {
        Orientation {
            facing: Compass::North,
            top: Compass::Up,
        }
    }

    pub fn all() -> &'static [Orientation] {
        &ALL_ORIENTATIONS
    }

    #[inline]
    pub fn facing(&self) -> Compass {
        self.facing
    }

    #[inline]
    pub fn top(&self) -> Compass {
        self.top
    }

    /// Packed `(facing << 4) | top` form used in save files.
    pub fn code(&self) -> u8 {
        ((self.facing.index() as u8) << 4) | self.top.index() as u8
    }

    pub fn from_code(code: i64) -> Option<Orientation> {
        if code < 0 || code > 0xff {
            return None;
        }
        let facing = Compass::from_index((code >> 4) as usize)?;
        let top = Compass::from_index((code & 0xf) as usize)?;
        Orientation::new(facing, top)
    }

    /// Position of this orientation in the table, facing major.
    fn ordinal(&self) -> usize {
        let facing_axis = self.facing.index() / 2;
        let top = self.top.index();
        let rank = if top / 2 > facing_axis { top - 2 } else { top };
        self.facing.index() * 4 + rank
    }

    /// Look up the effect of a rotation.
    #[inline]
    pub fn rotate(&self, rotation: Rotation) -> Orientation {
        COMPOSITION[self.ordinal()][rotation as usize]
    }

    /// The compass direction that currently lies at a relative bearing.
    #[inline]
    pub fn compass_of(&self, relative: Relative) -> Compass {
        self.rotate(relative.rotation()).facing
    }

    /// The relative bearing of a compass direction.
    pub fn relative_of(&self, dir: Compass) -> Relative {
        let found = Relative::ALL.iter().cloned().find(|r| self.compass_of(*r) == dir);
        match found {
            Some(relative) => relative,
            None => unreachable!("six bearings cover all six directions"),
        }
    }

    fn derive(&self, rotation: Rotation) -> Orientation {
        let (f, t) = (self.facing, self.top);
        let perpendicular = |a: Compass, b: Compass| match a.cross(b) {
            Some(dir) => dir,
            None => unreachable!("top is perpendicular to facing"),
        };
        let left = perpendicular(t, f);
        let right = perpendicular(f, t);
        let (facing, top) = match rotation {
            Rotation::Identity => (f, t),
            Rotation::TurnAround => (f.opposite(), t),
            Rotation::TurnLeft => (left, t),
            Rotation::TurnRight => (right, t),
            Rotation::PitchUp => (t, f.opposite()),
            Rotation::PitchDown => (t.opposite(), f),
            Rotation::RollClockwise => (f, right),
            Rotation::RollAnticlockwise => (f, left),
        };
        Orientation { facing: facing, top: top }
    }
}

impl Default for Orientation {
    fn default() -> Orientation {
        Orientation::default_orientation()
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.facing, self.top)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;
    use crate::cells::Compass::*;

    fn o(facing: Compass, top: Compass) -> Orientation {
        Orientation::new(facing, top).expect("perpendicular test orientation")
    }

    fn row(facing: Compass, top: Compass) -> Vec<Orientation> {
        let start = o(facing, top);
        Rotation::ALL.iter().map(|r| start.rotate(*r)).collect()
    }

    #[test]
    fn twenty_four_states() {
        assert_eq!(Orientation::all().len(), ORIENTATIONS_COUNT);
        for (i, orientation) in Orientation::all().iter().enumerate() {
            assert_eq!(orientation.ordinal(), i);
            assert_eq!(Orientation::from_code(i64::from(orientation.code())), Some(*orientation));
        }
        assert_eq!(Orientation::new(North, North), None);
        assert_eq!(Orientation::new(Up, Down), None);
    }

    #[test]
    fn codes() {
        assert_eq!(o(North, Up).code(), 0x04);
        assert_eq!(o(Down, East).code(), 0x53);
        assert_eq!(Orientation::from_code(0x00), None);
        assert_eq!(Orientation::from_code(0x01), None);
        assert_eq!(Orientation::from_code(0x60), None);
        assert_eq!(Orientation::from_code(-4), None);
        assert_eq!(Orientation::from_code(0x104), None);
    }

    #[test]
    fn known_table_rows() {
        // Identity, TurnAround, TurnLeft, TurnRight, PitchUp, PitchDown, RollClockwise, RollAnticlockwise
        assert_eq!(row(North, Up),
                   vec![o(North, Up), o(South, Up), o(West, Up), o(East, Up), o(Up, South),
                        o(Down, North), o(North, East), o(North, West)]);
        assert_eq!(row(West, Down),
                   vec![o(West, Down), o(East, Down), o(North, Down), o(South, Down),
                        o(Down, East), o(Up, West), o(West, South), o(West, North)]);
        assert_eq!(row(Down, South),
                   vec![o(Down, South), o(Up, South), o(East, South), o(West, South),
                        o(South, Up), o(North, Down), o(Down, West), o(Down, East)]);
        assert_eq!(row(East, North),
                   vec![o(East, North), o(West, North), o(Down, North), o(Up, North),
                        o(North, West), o(South, East), o(East, Up), o(East, Down)]);
    }

    #[test]
    fn bearings() {
        let facing_north = o(North, Up);
        assert_eq!(facing_north.compass_of(Relative::Forward), North);
        assert_eq!(facing_north.compass_of(Relative::Back), South);
        assert_eq!(facing_north.compass_of(Relative::Left), West);
        assert_eq!(facing_north.compass_of(Relative::Right), East);
        assert_eq!(facing_north.compass_of(Relative::Up), Up);
        assert_eq!(facing_north.compass_of(Relative::Down), Down);

        let lying_down = o(Down, East);
        for relative in Relative::ALL.iter() {
            assert_eq!(lying_down.relative_of(lying_down.compass_of(*relative)), *relative);
        }
    }

    fn pick(index: u8) -> Orientation {
        Orientation::all()[index as usize % ORIENTATIONS_COUNT]
    }

    quickcheck! {
        fn left_then_right_restores(index: u8) -> bool {
            let start = pick(index);
            start.rotate(Rotation::TurnLeft).rotate(Rotation::TurnRight) == start &&
                start.rotate(Rotation::TurnRight).rotate(Rotation::TurnLeft) == start
        }

        fn every_rotation_has_an_inverse(index: u8, rotation: u8) -> bool {
            let start = pick(index);
            let r = Rotation::ALL[rotation as usize % 8];
            start.rotate(r).rotate(r.inverse()) == start
        }

        fn four_rolls_restore(index: u8) -> bool {
            let start = pick(index);
            let clockwise = (0..4).fold(start, |acc, _| acc.rotate(Rotation::RollClockwise));
            let anticlockwise = (0..4).fold(start, |acc, _| acc.rotate(Rotation::RollAnticlockwise));
            clockwise == start && anticlockwise == start
        }

        fn two_turns_restore(index: u8) -> bool {
            let start = pick(index);
            start.rotate(Rotation::TurnAround).rotate(Rotation::TurnAround) == start
        }

        fn bearings_are_a_permutation(index: u8) -> bool {
            let start = pick(index);
            let mut seen: Vec<Compass> = Relative::ALL.iter().map(|r| start.compass_of(*r)).collect();
            seen.sort();
            seen == Compass::ALL.to_vec()
        }
    }
}
