//! Maze generation: one random track out of the target, spurs grown off it until every
//! cell is carved, then optional extra openings that make loops.

use log::{debug, trace};
use rand::Rng;
use std::str::FromStr;

use crate::cells::{CellFlags, Compass};
use crate::coordinates::Cartesian3DCoordinate;
use crate::errors::*;
use crate::grid::Grid;
use crate::grid_dimensions::GridDimensions;
use crate::orientation::Orientation;
use crate::walker;


/// Where the target cell may be placed.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum TargetPolicy {
    /// Extremal on every axis.
    Corner,
    /// Extremal on two axes.
    Edge,
    /// Extremal on one axis.
    Face,
    Anywhere,
}

impl TargetPolicy {
    pub fn letter(self) -> char {
        match self {
            TargetPolicy::Corner => 'c',
            TargetPolicy::Edge => 'e',
            TargetPolicy::Face => 'f',
            TargetPolicy::Anywhere => 'a',
        }
    }

    pub fn from_letter(letter: char) -> Option<TargetPolicy> {
        match letter.to_ascii_lowercase() {
            'c' => Some(TargetPolicy::Corner),
            'e' => Some(TargetPolicy::Edge),
            'f' => Some(TargetPolicy::Face),
            'a' => Some(TargetPolicy::Anywhere),
            _ => None,
        }
    }
}

impl FromStr for TargetPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<TargetPolicy> {
        let policy = match s.to_ascii_lowercase().as_str() {
            "corner" => Some(TargetPolicy::Corner),
            "edge" => Some(TargetPolicy::Edge),
            "face" => Some(TargetPolicy::Face),
            "anywhere" => Some(TargetPolicy::Anywhere),
            single if single.chars().count() == 1 => {
                single.chars().next().and_then(TargetPolicy::from_letter)
            }
            _ => None,
        };
        policy.ok_or_else(|| ErrorKind::InvalidTargetPolicy(s.to_string()).into())
    }
}

/// Everything the generator decides about a new maze.
#[derive(Clone, Debug)]
pub struct Layout {
    pub grid: Grid,
    pub target: Cartesian3DCoordinate,
    /// The target's neighbour along the first track.
    pub second: Cartesian3DCoordinate,
    pub start: Cartesian3DCoordinate,
    pub start_orientation: Orientation,
    pub double_routes: usize,
}

/// Build a fully connected maze.
///
/// The target is walled in apart from one exit, and a self avoiding track of
/// `volume / 16 + 1` cells (at least 3) leads away from it. Every carved cell walls its
/// uncarved neighbours off and flags them as adjacent. Spurs are then grown from adjacent
/// cells back into carved structure: first `(x+1)(y+1)(z+1)` random attempts, then sweeps
/// over the whole grid starting at the target until nothing is left uncarved. The distance
/// walker picks the start cell, and finally extra walls may be knocked down to add loops.
pub fn generate<R: Rng>(dimensions: GridDimensions,
                        policy: TargetPolicy,
                        double_routes: bool,
                        rng: &mut R)
                        -> Result<Layout> {

    let mut generator = Generator::new(Grid::new(dimensions), rng);
    let target = generator.place_target(policy);
    let track_length = std::cmp::max(dimensions.volume() / 16 + 1, 3);
    debug!("target {} ({:?}), first track length {}", target, policy, track_length);

    generator.grid.cell_mut(target).insert(CellFlags::TARGET);
    generator.lay_track(target, None, track_length, true)?;

    generator.grow_random_spurs()?;
    generator.spur_length *= 2;
    generator.sweep_spurs(target)?;

    let second = match generator.second {
        Some(second) => second,
        None => return Err(ErrorKind::Trapped(target).into()),
    };
    generator.grid.cell_mut(second).remove(CellFlags::TARGET);

    let walk = walker::walk_from_target(&mut generator.grid, target, &mut *generator.rng)?;
    debug!("start {} facing {}, {} steps from the target", walk.start, walk.orientation, walk.distance);

    let mut opened = 0;
    if double_routes {
        let protected = [second, walk.start];
        for coord in protected.iter() {
            generator.grid.cell_mut(*coord).insert(CellFlags::TARGET);
        }
        opened = generator.punch_double_routes();
        for coord in protected.iter() {
            generator.grid.cell_mut(*coord).remove(CellFlags::TARGET);
        }
        debug!("opened {} double routes", opened);
    }

    Ok(Layout {
        grid: generator.grid,
        target: target,
        second: second,
        start: walk.start,
        start_orientation: walk.orientation,
        double_routes: opened,
    })
}

struct Generator<'r, R: Rng> {
    grid: Grid,
    rng: &'r mut R,
    spur_length: usize,
    second: Option<Cartesian3DCoordinate>,
}

impl<'r, R: Rng> Generator<'r, R> {
    fn new(grid: Grid, rng: &'r mut R) -> Generator<'r, R> {
        let dimensions = grid.dimensions();
        let spur_length = (dimensions.x() + dimensions.y() + dimensions.z()) as usize / 12;
        Generator {
            grid: grid,
            rng: rng,
            spur_length: spur_length,
            second: None,
        }
    }

    /// Small mazes round the spur length up to one only after it has been doubled.
    fn spur_length(&self) -> usize {
        std::cmp::max(self.spur_length, 1)
    }

    fn random_heading(&mut self) -> Compass {
        Compass::ALL[self.rng.gen_range(0..6)]
    }

    fn scan_bias(&mut self) -> i32 {
        if self.rng.gen() { 1 } else { -1 }
    }

    fn random_coordinate(&mut self) -> Cartesian3DCoordinate {
        let dimensions = self.grid.dimensions();
        let x = self.rng.gen_range(0..dimensions.x());
        let y = self.rng.gen_range(0..dimensions.y());
        let z = self.rng.gen_range(0..dimensions.z());
        Cartesian3DCoordinate::new(x, y, z)
    }

    /// Either end of an axis.
    fn extremal(&mut self, extent: u32) -> u32 {
        if self.rng.gen() { extent - 1 } else { 0 }
    }

    fn place_target(&mut self, policy: TargetPolicy) -> Cartesian3DCoordinate {
        let dimensions = self.grid.dimensions();
        let extents = [dimensions.x(), dimensions.y(), dimensions.z()];
        let mut axes = [0u32; 3];
        match policy {
            TargetPolicy::Corner => {
                for (axis, extent) in axes.iter_mut().zip(extents.iter()) {
                    *axis = self.extremal(*extent);
                }
            }
            TargetPolicy::Edge => {
                let free = self.rng.gen_range(0..3);
                for (i, extent) in extents.iter().enumerate() {
                    axes[i] = if i == free {
                        self.rng.gen_range(0..*extent)
                    } else {
                        self.extremal(*extent)
                    };
                }
            }
            TargetPolicy::Face => {
                let fixed = self.rng.gen_range(0..3);
                for (i, extent) in extents.iter().enumerate() {
                    axes[i] = if i == fixed {
                        self.extremal(*extent)
                    } else {
                        self.rng.gen_range(0..*extent)
                    };
                }
            }
            TargetPolicy::Anywhere => {
                for (axis, extent) in axes.iter_mut().zip(extents.iter()) {
                    *axis = self.rng.gen_range(0..*extent);
                }
            }
        }
        Cartesian3DCoordinate::new(axes[0], axes[1], axes[2])
    }

    /// Carve a random self avoiding walk of at most `length` steps starting at `from`.
    ///
    /// `entry` is the side of `from` already opened onto carved structure. The first track
    /// records its first step as the second cell and flags it as a target for the rest of
    /// the spur phase so nothing else attaches there.
    fn lay_track(&mut self,
                 from: Cartesian3DCoordinate,
                 entry: Option<Compass>,
                 length: usize,
                 first: bool)
                 -> Result<()> {

        let heading = self.random_heading();
        let bias = self.scan_bias();
        let cell = *self.grid.cell(from);
        let exit = scan(heading, bias, |d| !cell.has_wall(d) && Some(d) != entry);

        let mut heading = match exit {
            Some(dir) => dir,
            None => {
                self.seal(from, entry);
                return Ok(());
            }
        };
        self.seal(from, entry);
        self.grid.smash_wall(from, heading);

        let mut current = from;
        let mut steps = 0;
        let mut record_second = first;
        loop {
            if self.grid.has_wall(current, heading) {
                break;
            }
            steps += 1;
            let next = self.grid
                .neighbour_at_direction(current, heading)
                .ok_or_else(|| Error::from(ErrorKind::OutsideGrid(current)))?;
            let came_from = heading.opposite();
            let straight_on = heading;
            let bias = self.scan_bias();

            let mut walls = CellFlags::WALLS;
            let mut onward = None;
            if steps < length {
                let start_heading = self.random_heading();
                let cell = *self.grid.cell(next);
                onward = scan(start_heading, bias, |d| {
                    !cell.has_wall(d) && d != came_from && !(record_second && d == straight_on)
                });
                if let Some(dir) = onward {
                    walls.remove(dir.wall());
                }
            }
            walls.remove(came_from.wall());
            self.grid.cell_mut(next).carve(walls);

            if record_second {
                self.second = Some(next);
                self.grid.cell_mut(next).insert(CellFlags::TARGET);
                record_second = false;
            }
            self.grid.propagate_walls(next);
            trace!("track step {} into {}", steps, next);

            current = next;
            match onward {
                Some(dir) => heading = dir,
                None => break,
            }
        }
        Ok(())
    }

    /// Wall a cell in completely except for the side it was entered from.
    fn seal(&mut self, coord: Cartesian3DCoordinate, entry: Option<Compass>) {
        let cell = self.grid.cell_mut(coord);
        cell.carve(CellFlags::WALLS);
        if let Some(dir) = entry {
            cell.clear_wall(dir);
        }
        self.grid.propagate_walls(coord);
    }

    /// Try to grow a spur from an adjacent cell by joining it to a carved neighbour.
    fn grow_spur(&mut self, seed: Cartesian3DCoordinate, allow_second: bool) -> Result<bool> {
        if !self.grid.cell(seed).is_adjacent() {
            return Ok(false);
        }
        let heading = self.random_heading();
        let bias = self.scan_bias();

        let grid = &self.grid;
        let second = self.second;
        let anchor = scan(heading, bias, |d| match grid.neighbour_at_direction(seed, d) {
            Some(neighbour) => {
                let cell = grid.cell(neighbour);
                let second_allowed = allow_second && Some(neighbour) == second;
                !cell.is_uninitialised() && (!cell.is_target() || second_allowed)
            }
            None => false,
        });

        match anchor {
            Some(dir) => {
                self.grid.smash_wall(seed, dir);
                let length = self.spur_length();
                self.lay_track(seed, Some(dir), length, false)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn grow_random_spurs(&mut self) -> Result<()> {
        let dimensions = self.grid.dimensions();
        let attempts = ((dimensions.x() + 1) * (dimensions.y() + 1) * (dimensions.z() + 1)) as usize;
        let mut grown = 0;
        for _ in 0..attempts {
            let seed = self.random_coordinate();
            if self.grow_spur(seed, false)? {
                grown += 1;
            }
        }
        debug!("{} spurs from {} random attempts, {} cells left",
               grown,
               attempts,
               self.grid.uninitialised_count());
        Ok(())
    }

    /// Visit every cell, starting from the target and wrapping around each axis.
    fn sweep(&mut self, origin: Cartesian3DCoordinate, allow_second: bool) -> Result<usize> {
        let dimensions = self.grid.dimensions();
        let mut grown = 0;
        for offset in dimensions.iter() {
            let seed = Cartesian3DCoordinate::new((origin.x + offset.x) % dimensions.x(),
                                                  (origin.y + offset.y) % dimensions.y(),
                                                  (origin.z + offset.z) % dimensions.z());
            if self.grow_spur(seed, allow_second)? {
                grown += 1;
            }
        }
        Ok(grown)
    }

    /// Sweep until nothing is left uncarved. The target and the second cell can cut a
    /// narrow grid in two, so once a sweep stalls the second cell may anchor spurs too.
    fn sweep_spurs(&mut self, origin: Cartesian3DCoordinate) -> Result<()> {
        let mut allow_second = false;
        loop {
            let grown = self.sweep(origin, allow_second)?;
            let remaining = self.grid.uninitialised_count();
            debug!("sweep grew {} spurs, {} cells left", grown, remaining);
            if remaining == 0 {
                return Ok(());
            }
            if grown == 0 {
                if allow_second {
                    return Err(ErrorKind::UnreachableCells(remaining).into());
                }
                allow_second = true;
            }
        }
    }

    /// Knock down extra walls to make loops, about one for every 30 cells.
    ///
    /// Only carved cells that are neither targets nor adjacent take part on either side of
    /// the wall. A wall that is already open still counts as one of the routes.
    fn punch_double_routes(&mut self) -> usize {
        let volume = self.grid.dimensions().volume();
        let wanted = volume / 30;
        let attempts_allowed = volume * 64;
        let eligible = |grid: &Grid, coord: Cartesian3DCoordinate| {
            let cell = grid.cell(coord);
            !(cell.is_uninitialised() || cell.is_target() || cell.is_adjacent())
        };

        let mut opened = 0;
        let mut attempts = 0;
        while opened < wanted && attempts < attempts_allowed {
            attempts += 1;
            let coord = self.random_coordinate();
            if !eligible(&self.grid, coord) {
                continue;
            }
            let bias = self.scan_bias();
            let heading = self.random_heading();
            let grid = &self.grid;
            let found = scan(heading, bias, |d| {
                grid.neighbour_at_direction(coord, d).map_or(false, |n| eligible(grid, n))
            });
            if let Some(dir) = found {
                trace!("double route from {} going {}", coord, dir);
                self.grid.smash_wall(coord, dir);
                opened += 1;
            }
        }
        opened
    }
}

/// First of the six directions, starting at `heading` and stepping by `bias`, that passes the test.
fn scan<F>(heading: Compass, bias: i32, mut test: F) -> Option<Compass>
    where F: FnMut(Compass) -> bool
{
    (0..6).map(|i| heading.rotate(i * bias)).find(|d| test(*d))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathing::Distances;
    use quickcheck::{quickcheck, TestResult};
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn layout(x: u32, y: u32, z: u32, policy: TargetPolicy, double: bool, seed: u64) -> Layout {
        let dimensions = GridDimensions::new(x, y, z).expect("valid test dimensions");
        let mut rng = XorShiftRng::seed_from_u64(seed);
        generate(dimensions, policy, double, &mut rng).expect("generation succeeds")
    }

    fn fully_connected(layout: &Layout) -> bool {
        let distances = Distances::new(&layout.grid, layout.target).expect("target inside grid");
        distances.reachable_count() == layout.grid.size()
    }

    fn only_target_flagged(layout: &Layout) -> bool {
        layout.grid.iter().all(|c| layout.grid.cell(c).is_target() == (c == layout.target))
    }

    fn is_extremal(value: u32, extent: u32) -> bool {
        value == 0 || value == extent - 1
    }

    #[test]
    fn smallest_maze() {
        let l = layout(3, 2, 1, TargetPolicy::Corner, false, 42);
        assert!(fully_connected(&l));
        assert_eq!(l.grid.uninitialised_count(), 0);
        assert!(is_extremal(l.target.x, 3) && is_extremal(l.target.y, 2) && l.target.z == 0);
        assert_ne!(l.start, l.target);
        assert!(only_target_flagged(&l));
        assert!(l.grid.walls_are_symmetric());
        assert!(l.grid.is_boundary_sealed());
    }

    #[test]
    fn spanning_tree_without_double_routes() {
        for seed in 1..20 {
            let l = layout(5, 4, 3, TargetPolicy::Anywhere, false, seed);
            assert!(fully_connected(&l));
            assert_eq!(l.grid.links_count(), l.grid.size() - 1);
        }
    }

    #[test]
    fn second_cell_neighbours_target() {
        let l = layout(4, 4, 4, TargetPolicy::Corner, false, 7);
        assert!(l.grid.neighbours(l.target).contains(&l.second));
        assert!(!l.grid.cell(l.second).is_target());
        assert_eq!(l.grid.links(l.target).len(), 1);
    }

    #[test]
    fn placement_policies() {
        let extremal_axes = |l: &Layout| {
            let dims = l.grid.dimensions();
            [is_extremal(l.target.x, dims.x()),
             is_extremal(l.target.y, dims.y()),
             is_extremal(l.target.z, dims.z())]
                .iter()
                .filter(|e| **e)
                .count()
        };
        for seed in 1..30 {
            assert_eq!(extremal_axes(&layout(9, 9, 9, TargetPolicy::Corner, false, seed)), 3);
            assert!(extremal_axes(&layout(9, 9, 9, TargetPolicy::Edge, false, seed)) >= 2);
            assert!(extremal_axes(&layout(9, 9, 9, TargetPolicy::Face, false, seed)) >= 1);
        }
    }

    #[test]
    fn double_routes_add_loops() {
        let single = layout(10, 10, 10, TargetPolicy::Anywhere, false, 99);
        let double = layout(10, 10, 10, TargetPolicy::Anywhere, true, 99);
        assert!(double.double_routes > 0);
        assert!(double.grid.links_count() > single.grid.links_count());
        assert!(double.grid.links_count() <= single.grid.links_count() + double.double_routes);
        assert!(double.grid.walls_are_symmetric());
        assert!(double.grid.is_boundary_sealed());
        assert!(fully_connected(&double));
        assert!(only_target_flagged(&double));
    }

    #[test]
    fn same_seed_same_maze() {
        let a = layout(6, 5, 4, TargetPolicy::Edge, true, 1234);
        let b = layout(6, 5, 4, TargetPolicy::Edge, true, 1234);
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.start, b.start);
        assert_eq!(a.start_orientation, b.start_orientation);
    }

    #[test]
    fn spur_length_doubles_before_rounding_up() {
        let lengths = |x, y, z| {
            let dimensions = GridDimensions::new(x, y, z).unwrap();
            let mut rng = XorShiftRng::seed_from_u64(5);
            let mut generator = Generator::new(Grid::new(dimensions), &mut rng);
            let before = generator.spur_length();
            generator.spur_length *= 2;
            (before, generator.spur_length())
        };
        assert_eq!(lengths(3, 3, 3), (1, 1));
        assert_eq!(lengths(6, 5, 1), (1, 2));
        assert_eq!(lengths(12, 12, 12), (3, 6));
    }

    #[test]
    fn parse_policies() {
        assert_eq!("corner".parse::<TargetPolicy>().unwrap(), TargetPolicy::Corner);
        assert_eq!("E".parse::<TargetPolicy>().unwrap(), TargetPolicy::Edge);
        assert_eq!("face".parse::<TargetPolicy>().unwrap(), TargetPolicy::Face);
        assert_eq!("a".parse::<TargetPolicy>().unwrap(), TargetPolicy::Anywhere);
        assert!("middle".parse::<TargetPolicy>().is_err());
    }

    fn connected_after_generation(x: u8, y: u8, z: u8, policy: u8, double: bool, seed: u64) -> TestResult {
        let dimensions = match GridDimensions::new(u32::from(x % 8) + 1,
                                                   u32::from(y % 8) + 1,
                                                   u32::from(z % 8) + 1) {
            Ok(d) => d,
            Err(_) => return TestResult::discard(),
        };
        let policy = [TargetPolicy::Corner, TargetPolicy::Edge, TargetPolicy::Face, TargetPolicy::Anywhere]
            [policy as usize % 4];
        let mut rng = XorShiftRng::seed_from_u64(seed);
        let l = match generate(dimensions, policy, double, &mut rng) {
            Ok(l) => l,
            Err(_) => return TestResult::failed(),
        };
        TestResult::from_bool(fully_connected(&l) && l.grid.walls_are_symmetric() &&
                              l.grid.is_boundary_sealed() && only_target_flagged(&l) &&
                              l.start != l.target && l.grid.uninitialised_count() == 0)
    }

    #[test]
    fn generated_mazes_are_connected() {
        quickcheck(connected_after_generation as fn(u8, u8, u8, u8, bool, u64) -> TestResult);
    }

    #[test]
    fn narrow_mazes_are_connected() {
        for seed in 1..200 {
            for &(x, y, z) in [(3, 2, 1), (2, 3, 1), (1, 2, 3), (2, 1, 5), (20, 2, 1), (2, 2, 3)].iter() {
                let l = layout(x, y, z, TargetPolicy::Anywhere, seed % 2 == 0, seed);
                assert!(fully_connected(&l), "{}x{}x{} seed {}", x, y, z, seed);
            }
        }
    }
}
