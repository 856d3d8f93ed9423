use std::convert::From;
use std::fmt;

use crate::cells::Compass;


#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian3DCoordinate {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Cartesian3DCoordinate {
    pub fn new(x: u32, y: u32, z: u32) -> Cartesian3DCoordinate {
        Cartesian3DCoordinate { x: x, y: y, z: z }
    }

    /// Creates a new coordinate offset 1 cell away in the given direction.
    /// Returns None if the coordinate would go below zero on any axis. Upper bounds are a
    /// property of the grid, not of the coordinate, so they are not checked here.
    pub fn offset(&self, dir: Compass) -> Option<Cartesian3DCoordinate> {
        let (dx, dy, dz) = dir.unit_vector();
        let step = |v: u32, d: i32| -> Option<u32> {
            match d {
                0 => Some(v),
                1 => v.checked_add(1),
                _ => v.checked_sub(1),
            }
        };
        Some(Cartesian3DCoordinate::new(step(self.x, dx)?, step(self.y, dy)?, step(self.z, dz)?))
    }

    /// Straight line distance between two cell centres.
    pub fn distance_to(&self, other: Cartesian3DCoordinate) -> f64 {
        let d = |a: u32, b: u32| f64::from(a) - f64::from(b);
        let (dx, dy, dz) = (d(self.x, other.x), d(self.y, other.y), d(self.z, other.z));
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl From<(u32, u32, u32)> for Cartesian3DCoordinate {
    fn from(xyz: (u32, u32, u32)) -> Cartesian3DCoordinate {
        Cartesian3DCoordinate::new(xyz.0, xyz.1, xyz.2)
    }
}

impl fmt::Display for Cartesian3DCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
