use smallvec::SmallVec;

use crate::cells::{Cell, CellFlags, Compass};
use crate::coordinates::Cartesian3DCoordinate;
use crate::grid_dimensions::GridDimensions;

pub type CoordinateSmallVec = SmallVec<[Cartesian3DCoordinate; 6]>;

static FORWARD_DIRECTIONS: [Compass; 3] = [Compass::North, Compass::West, Compass::Up];


/// Dense array of cells covering the whole maze volume.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    dimensions: GridDimensions,
    cells: Vec<Cell>,
}

impl Grid {
    /// A grid with every cell uncarved and the outer boundary walled in.
    pub fn new(dimensions: GridDimensions) -> Grid {
        let mut grid = Grid {
            dimensions: dimensions,
            cells: vec![Cell::uninitialised(); dimensions.volume()],
        };
        grid.seal_boundary();
        grid
    }

    /// Wraps already validated cells, one per slot in array order.
    pub(crate) fn from_cells(dimensions: GridDimensions, cells: Vec<Cell>) -> Grid {
        debug_assert_eq!(cells.len(), dimensions.volume());
        Grid {
            dimensions: dimensions,
            cells: cells,
        }
    }

    #[inline]
    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian3DCoordinate) -> bool {
        self.dimensions.contains(coord)
    }

    /// Panics if a cell does not exist. Silently addressing the wrong slot would corrupt the maze.
    fn index(&self, coord: Cartesian3DCoordinate) -> usize {
        match self.dimensions.index_of(coord) {
            Some(index) => index,
            None => panic!("coordinate {} is outside the {:?} grid", coord, self.dimensions),
        }
    }

    /// Panics if a cell does not exist.
    #[inline]
    pub fn cell(&self, coord: Cartesian3DCoordinate) -> &Cell {
        let index = self.index(coord);
        &self.cells[index]
    }

    /// Panics if a cell does not exist.
    #[inline]
    pub fn cell_mut(&mut self, coord: Cartesian3DCoordinate) -> &mut Cell {
        let index = self.index(coord);
        &mut self.cells[index]
    }

    pub fn get(&self, coord: Cartesian3DCoordinate) -> Option<&Cell> {
        self.dimensions.index_of(coord).map(|i| &self.cells[i])
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = Cartesian3DCoordinate> {
        self.dimensions.iter()
    }

    /// The grid neighbour in a given direction, None off the edge of the grid.
    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian3DCoordinate,
                                  direction: Compass)
                                  -> Option<Cartesian3DCoordinate> {
        coord.offset(direction).filter(|c| self.is_valid_coordinate(*c))
    }

    pub fn neighbours(&self, coord: Cartesian3DCoordinate) -> CoordinateSmallVec {
        Compass::ALL
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    #[inline]
    pub fn has_wall(&self, coord: Cartesian3DCoordinate, direction: Compass) -> bool {
        self.cell(coord).has_wall(direction)
    }

    /// Is there an open passage from `coord` in `direction` to a cell inside the grid.
    pub fn is_linked(&self, coord: Cartesian3DCoordinate, direction: Compass) -> bool {
        !self.has_wall(coord, direction) && self.neighbour_at_direction(coord, direction).is_some()
    }

    /// Cells reachable in one step through open walls.
    pub fn links(&self, coord: Cartesian3DCoordinate) -> CoordinateSmallVec {
        Compass::ALL
            .iter()
            .filter(|dir| !self.has_wall(coord, **dir))
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    /// Number of open passages between cells, each counted once.
    pub fn links_count(&self) -> usize {
        self.iter_links().count()
    }

    /// Every open passage once, from the cell with the lower array slot.
    pub fn iter_links<'a>(&'a self)
                          -> impl Iterator<Item = (Cartesian3DCoordinate, Cartesian3DCoordinate)> + 'a {
        self.iter().flat_map(move |coord| {
            FORWARD_DIRECTIONS.iter()
                .filter(move |dir| self.is_linked(coord, **dir))
                .filter_map(move |dir| self.neighbour_at_direction(coord, *dir))
                .map(move |neighbour| (coord, neighbour))
        })
    }

    /// Open the wall between a cell and its neighbour on both sides.
    pub fn smash_wall(&mut self, coord: Cartesian3DCoordinate, direction: Compass) {
        self.cell_mut(coord).clear_wall(direction);
        if let Some(neighbour) = self.neighbour_at_direction(coord, direction) {
            self.cell_mut(neighbour).clear_wall(direction.opposite());
        }
    }

    /// Copy every wall of a cell onto the facing side of its neighbours. Neighbours that
    /// are still uncarved become eligible spur seeds.
    pub fn propagate_walls(&mut self, coord: Cartesian3DCoordinate) {
        let cell = *self.cell(coord);
        for dir in Compass::ALL.iter().filter(|d| cell.has_wall(**d)) {
            if let Some(neighbour) = self.neighbour_at_direction(coord, *dir) {
                let other = self.cell_mut(neighbour);
                other.set_wall(dir.opposite());
                if other.is_uninitialised() {
                    other.insert(CellFlags::ADJACENT);
                }
            }
        }
    }

    fn seal_boundary(&mut self) {
        let dimensions = self.dimensions;
        for coord in dimensions.iter() {
            for dir in Compass::ALL.iter() {
                if dimensions.is_boundary(coord, *dir) {
                    self.cell_mut(coord).set_wall(*dir);
                }
            }
        }
    }

    pub fn is_boundary_sealed(&self) -> bool {
        self.iter().all(|coord| {
            Compass::ALL
                .iter()
                .filter(|dir| self.dimensions.is_boundary(coord, **dir))
                .all(|dir| self.has_wall(coord, *dir))
        })
    }

    /// Do all pairs of neighbouring cells agree on the wall between them.
    pub fn walls_are_symmetric(&self) -> bool {
        self.iter().all(|coord| {
            Compass::ALL.iter().all(|dir| match self.neighbour_at_direction(coord, *dir) {
                Some(neighbour) => {
                    self.has_wall(coord, *dir) == self.has_wall(neighbour, dir.opposite())
                }
                None => true,
            })
        })
    }

    pub fn uninitialised_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_uninitialised()).count()
    }

    /// Clear a flag on every cell.
    pub fn clear_flags(&mut self, flags: CellFlags) {
        for cell in &mut self.cells {
            cell.remove(flags);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn gc(x: u32, y: u32, z: u32) -> Cartesian3DCoordinate {
        Cartesian3DCoordinate::new(x, y, z)
    }

    fn grid(x: u32, y: u32, z: u32) -> Grid {
        Grid::new(GridDimensions::new(x, y, z).expect("valid test dimensions"))
    }

    #[test]
    fn new_grid_is_uncarved_and_sealed() {
        let g = grid(3, 2, 1);
        assert_eq!(g.size(), 6);
        assert_eq!(g.uninitialised_count(), 6);
        assert!(g.is_boundary_sealed());
        assert!(g.walls_are_symmetric());

        // single level, so every cell has a floor and ceiling
        for coord in g.iter() {
            assert!(g.has_wall(coord, Compass::Up));
            assert!(g.has_wall(coord, Compass::Down));
        }
        assert!(g.has_wall(gc(0, 0, 0), Compass::South));
        assert!(g.has_wall(gc(0, 0, 0), Compass::East));
        assert!(!g.has_wall(gc(0, 0, 0), Compass::North));
        assert!(g.has_wall(gc(2, 1, 0), Compass::North));
        assert!(g.has_wall(gc(2, 1, 0), Compass::West));
        assert!(!g.has_wall(gc(1, 1, 0), Compass::South));
    }

    #[test]
    fn neighbour_cells() {
        let g = grid(3, 3, 3);
        let check_expected_neighbours = |coord, expected: &[Cartesian3DCoordinate]| {
            let found: Vec<Cartesian3DCoordinate> = g.neighbours(coord).iter().cloned().sorted().collect();
            let expected: Vec<Cartesian3DCoordinate> = expected.iter().cloned().sorted().collect();
            assert_eq!(found, expected);
        };

        check_expected_neighbours(gc(0, 0, 0), &[gc(1, 0, 0), gc(0, 1, 0), gc(0, 0, 1)]);
        check_expected_neighbours(gc(2, 2, 2), &[gc(1, 2, 2), gc(2, 1, 2), gc(2, 2, 1)]);
        check_expected_neighbours(gc(1, 1, 1),
                                  &[gc(0, 1, 1), gc(2, 1, 1), gc(1, 0, 1), gc(1, 2, 1), gc(1, 1, 0),
                                    gc(1, 1, 2)]);
    }

    #[test]
    fn neighbours_at_dirs() {
        let g = grid(3, 2, 1);
        assert_eq!(g.neighbour_at_direction(gc(0, 0, 0), Compass::North), Some(gc(1, 0, 0)));
        assert_eq!(g.neighbour_at_direction(gc(0, 0, 0), Compass::West), Some(gc(0, 1, 0)));
        assert_eq!(g.neighbour_at_direction(gc(0, 0, 0), Compass::South), None);
        assert_eq!(g.neighbour_at_direction(gc(2, 0, 0), Compass::North), None);
        assert_eq!(g.neighbour_at_direction(gc(0, 1, 0), Compass::West), None);
        assert_eq!(g.neighbour_at_direction(gc(0, 0, 0), Compass::Up), None);
    }

    #[test]
    fn smash_and_propagate_keep_walls_symmetric() {
        let mut g = grid(3, 3, 1);
        let centre = gc(1, 1, 0);
        g.cell_mut(centre).carve(CellFlags::WALLS);
        g.propagate_walls(centre);
        assert!(g.walls_are_symmetric());
        for n in g.neighbours(centre).iter() {
            assert!(g.cell(*n).is_adjacent());
        }
        assert!(g.links(centre).is_empty());
    }

    #[test]
    fn smashed_walls_link_both_sides() {
        let mut g = grid(3, 3, 1);
        for coord in g.iter() {
            g.cell_mut(coord).carve(CellFlags::WALLS);
        }
        assert_eq!(g.links_count(), 0);

        let centre = gc(1, 1, 0);
        g.smash_wall(centre, Compass::West);
        assert!(g.walls_are_symmetric());
        assert!(g.is_linked(centre, Compass::West));
        assert!(g.is_linked(gc(1, 2, 0), Compass::East));
        assert_eq!(&*g.links(centre), &[gc(1, 2, 0)]);
        assert_eq!(g.links_count(), 1);
        assert_eq!(g.iter_links().collect::<Vec<_>>(), vec![(centre, gc(1, 2, 0))]);
    }

    #[test]
    #[should_panic]
    fn addressing_outside_the_grid_panics() {
        let g = grid(3, 2, 1);
        let _ = g.cell(gc(3, 0, 0));
    }
}
