use itertools::iproduct;

use crate::cells::Compass;
use crate::coordinates::Cartesian3DCoordinate;
use crate::errors::*;

/// Largest extent of any axis.
pub const MAX_DIMENSION: u32 = 20;


/// Validated extents of a maze grid.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct GridDimensions {
    x: u32,
    y: u32,
    z: u32,
}

impl GridDimensions {
    /// Each axis must be in `1..=MAX_DIMENSION`. Two unit axes give a corridor and three
    /// axes of at most 2 leave no room for a track, so both are refused.
    pub fn new(x: u32, y: u32, z: u32) -> Result<GridDimensions> {
        let in_range = |v: u32| v >= 1 && v <= MAX_DIMENSION;
        if !(in_range(x) && in_range(y) && in_range(z)) {
            return Err(ErrorKind::DimensionsOutOfRange(x, y, z).into());
        }
        let unit_axes = [x, y, z].iter().filter(|&&v| v == 1).count();
        if unit_axes >= 2 || (x <= 2 && y <= 2 && z <= 2) {
            return Err(ErrorKind::DegenerateDimensions(x, y, z).into());
        }
        Ok(GridDimensions { x: x, y: y, z: z })
    }

    #[inline(always)]
    pub fn x(&self) -> u32 {
        self.x
    }

    #[inline(always)]
    pub fn y(&self) -> u32 {
        self.y
    }

    #[inline(always)]
    pub fn z(&self) -> u32 {
        self.z
    }

    #[inline(always)]
    pub fn volume(&self) -> usize {
        (self.x * self.y * self.z) as usize
    }

    /// The cell with the largest coordinate on every axis.
    pub fn max_coordinate(&self) -> Cartesian3DCoordinate {
        Cartesian3DCoordinate::new(self.x - 1, self.y - 1, self.z - 1)
    }

    #[inline]
    pub fn contains(&self, coord: Cartesian3DCoordinate) -> bool {
        coord.x < self.x && coord.y < self.y && coord.z < self.z
    }

    /// Slot of a coordinate in the dense cell array: z varies fastest, then y, then x.
    pub fn index_of(&self, coord: Cartesian3DCoordinate) -> Option<usize> {
        if self.contains(coord) {
            Some((coord.z + coord.y * self.z + coord.x * self.z * self.y) as usize)
        } else {
            None
        }
    }

    /// Is the cell on the outer face of the grid that lies in direction `dir`.
    pub fn is_boundary(&self, coord: Cartesian3DCoordinate, dir: Compass) -> bool {
        match dir {
            Compass::North => coord.x == self.x - 1,
            Compass::South => coord.x == 0,
            Compass::West => coord.y == self.y - 1,
            Compass::East => coord.y == 0,
            Compass::Up => coord.z == self.z - 1,
            Compass::Down => coord.z == 0,
        }
    }

    /// All coordinates in array slot order.
    pub fn iter(&self) -> impl Iterator<Item = Cartesian3DCoordinate> {
        iproduct!(0..self.x, 0..self.y, 0..self.z).map(Cartesian3DCoordinate::from)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn is_err_kind<T>(r: Result<T>, degenerate: bool) -> bool {
        match r {
            Err(e) => match *e.kind() {
                ErrorKind::DegenerateDimensions(..) => degenerate,
                ErrorKind::DimensionsOutOfRange(..) => !degenerate,
                _ => false,
            },
            Ok(_) => false,
        }
    }

    #[test]
    fn dimension_limits() {
        assert!(GridDimensions::new(3, 2, 1).is_ok());
        assert!(GridDimensions::new(1, 2, 3).is_ok());
        assert!(GridDimensions::new(20, 20, 20).is_ok());
        assert!(is_err_kind(GridDimensions::new(0, 4, 4), false));
        assert!(is_err_kind(GridDimensions::new(4, 21, 4), false));
    }

    #[test]
    fn degenerate_dimensions() {
        assert!(is_err_kind(GridDimensions::new(20, 1, 1), true));
        assert!(is_err_kind(GridDimensions::new(1, 1, 5), true));
        assert!(is_err_kind(GridDimensions::new(2, 2, 2), true));
        assert!(is_err_kind(GridDimensions::new(2, 2, 1), true));
    }

    #[test]
    fn index_layout() {
        let dims = GridDimensions::new(3, 4, 5).unwrap();
        assert_eq!(dims.volume(), 60);
        assert_eq!(dims.index_of(Cartesian3DCoordinate::new(0, 0, 0)), Some(0));
        assert_eq!(dims.index_of(Cartesian3DCoordinate::new(0, 0, 1)), Some(1));
        assert_eq!(dims.index_of(Cartesian3DCoordinate::new(0, 1, 0)), Some(5));
        assert_eq!(dims.index_of(Cartesian3DCoordinate::new(1, 0, 0)), Some(20));
        assert_eq!(dims.index_of(Cartesian3DCoordinate::new(3, 0, 0)), None);

        let indices: Vec<usize> = dims.iter().map(|c| dims.index_of(c).unwrap()).collect();
        assert_eq!(indices, (0..60).collect::<Vec<_>>());
    }

    #[test]
    fn boundaries() {
        let dims = GridDimensions::new(3, 3, 1).unwrap();
        let corner = Cartesian3DCoordinate::new(0, 2, 0);
        assert!(dims.is_boundary(corner, Compass::South));
        assert!(dims.is_boundary(corner, Compass::West));
        assert!(dims.is_boundary(corner, Compass::Up));
        assert!(dims.is_boundary(corner, Compass::Down));
        assert!(!dims.is_boundary(corner, Compass::North));
        assert!(!dims.is_boundary(corner, Compass::East));
    }
}
