use bitflags::bitflags;
use std::fmt;


/// The six grid directions.
///
/// North and south run along the x axis, west and east along y, up and down along z.
/// The discriminants are the direction indices used by the thread field and the save format.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Ord, PartialOrd)]
pub enum Compass {
    North = 0,
    South = 1,
    West = 2,
    East = 3,
    Up = 4,
    Down = 5,
}

impl Compass {
    pub const ALL: [Compass; 6] = [Compass::North,
                                   Compass::South,
                                   Compass::West,
                                   Compass::East,
                                   Compass::Up,
                                   Compass::Down];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Compass> {
        Compass::ALL.get(index).cloned()
    }

    pub fn opposite(self) -> Compass {
        match self {
            Compass::North => Compass::South,
            Compass::South => Compass::North,
            Compass::West => Compass::East,
            Compass::East => Compass::West,
            Compass::Up => Compass::Down,
            Compass::Down => Compass::Up,
        }
    }

    pub fn is_vertical(self) -> bool {
        self == Compass::Up || self == Compass::Down
    }

    /// The wall flag a cell holds on this side.
    pub fn wall(self) -> CellFlags {
        CellFlags::from_bits_truncate(1 << self.index())
    }

    pub fn unit_vector(self) -> (i32, i32, i32) {
        match self {
            Compass::North => (1, 0, 0),
            Compass::South => (-1, 0, 0),
            Compass::West => (0, 1, 0),
            Compass::East => (0, -1, 0),
            Compass::Up => (0, 0, 1),
            Compass::Down => (0, 0, -1),
        }
    }

    pub fn from_unit_vector(v: (i32, i32, i32)) -> Option<Compass> {
        Compass::ALL.iter().cloned().find(|d| d.unit_vector() == v)
    }

    /// Vector cross product of two directions, None if they are parallel.
    pub fn cross(self, other: Compass) -> Option<Compass> {
        let (a1, a2, a3) = self.unit_vector();
        let (b1, b2, b3) = other.unit_vector();
        Compass::from_unit_vector((a2 * b3 - a3 * b2, a3 * b1 - a1 * b3, a1 * b2 - a2 * b1))
    }

    /// Step `steps` places around the direction index ring, wrapping in either direction.
    pub fn rotate(self, steps: i32) -> Compass {
        let index = (self.index() as i32 + steps).rem_euclid(6) as usize;
        Compass::ALL[index]
    }

    pub fn letter(self) -> char {
        match self {
            Compass::North => 'N',
            Compass::South => 'S',
            Compass::West => 'W',
            Compass::East => 'E',
            Compass::Up => 'U',
            Compass::Down => 'D',
        }
    }
}

impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

bitflags! {
    /// Per cell state bits, laid out as in the version 1 save format.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CellFlags: u16 {
        const NORTH_WALL = 0x0001;
        const SOUTH_WALL = 0x0002;
        const WEST_WALL = 0x0004;
        const EAST_WALL = 0x0008;
        const UP_WALL = 0x0010;
        const DOWN_WALL = 0x0020;
        const WALLS = 0x003f;
        /// Not yet carved by the generator.
        const UNINITIALISED = 0x0040;
        const TARGET = 0x0080;
        /// Next to carved structure, so eligible to seed a spur.
        const ADJACENT = 0x0100;
        /// Waypoint placed by the player.
        const MARK = 0x0200;
        /// Visited marker, only ever set while the distance walker runs.
        const PEBBLE = 0x4000;
    }
}

const THREAD_PRESENT: u16 = 0x0400;
const THREAD_SHIFT: u16 = 11;
const THREAD_MASK: u16 = 0x3c00;

/// Largest integer a cell may be saved as.
pub const MAX_CELL_BITS: u16 = 0x7fff;


#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Cell {
    flags: CellFlags,
    thread: Option<Compass>,
}

impl Default for Cell {
    fn default() -> Cell {
        Cell::uninitialised()
    }
}

impl Cell {
    pub fn uninitialised() -> Cell {
        Cell {
            flags: CellFlags::UNINITIALISED,
            thread: None,
        }
    }

    #[inline]
    pub fn flags(&self) -> CellFlags {
        self.flags
    }

    #[inline]
    pub fn walls(&self) -> CellFlags {
        self.flags & CellFlags::WALLS
    }

    #[inline]
    pub fn has_wall(&self, dir: Compass) -> bool {
        self.flags.contains(dir.wall())
    }

    pub fn set_wall(&mut self, dir: Compass) {
        self.flags.insert(dir.wall());
    }

    pub fn clear_wall(&mut self, dir: Compass) {
        self.flags.remove(dir.wall());
    }

    #[inline]
    pub fn is_uninitialised(&self) -> bool {
        self.flags.contains(CellFlags::UNINITIALISED)
    }

    #[inline]
    pub fn is_adjacent(&self) -> bool {
        self.flags.contains(CellFlags::ADJACENT)
    }

    #[inline]
    pub fn is_target(&self) -> bool {
        self.flags.contains(CellFlags::TARGET)
    }

    #[inline]
    pub fn is_marked(&self) -> bool {
        self.flags.contains(CellFlags::MARK)
    }

    #[inline]
    pub fn has_pebble(&self) -> bool {
        self.flags.contains(CellFlags::PEBBLE)
    }

    pub fn insert(&mut self, flags: CellFlags) {
        self.flags.insert(flags);
    }

    pub fn remove(&mut self, flags: CellFlags) {
        self.flags.remove(flags);
    }

    pub fn set(&mut self, flags: CellFlags, value: bool) {
        self.flags.set(flags, value);
    }

    /// Add walls and take the cell out of the uncarved pool.
    pub fn carve(&mut self, walls: CellFlags) {
        self.flags.insert(walls & CellFlags::WALLS);
        self.flags.remove(CellFlags::UNINITIALISED | CellFlags::ADJACENT);
    }

    /// The direction leading back toward the target, once the distance walk has run.
    #[inline]
    pub fn thread(&self) -> Option<Compass> {
        self.thread
    }

    pub fn set_thread(&mut self, thread: Option<Compass>) {
        self.thread = thread;
    }

    /// Packed integer form, as written to save files.
    pub fn to_bits(&self) -> u16 {
        let thread_bits = match self.thread {
            Some(dir) => THREAD_PRESENT | ((dir.index() as u16) << THREAD_SHIFT),
            None => 0,
        };
        self.flags.bits() | thread_bits
    }

    /// Decode a packed cell. Unknown bits and thread directions outside the six compass
    /// indices are rejected.
    pub fn from_bits(bits: u16) -> Option<Cell> {
        if bits > MAX_CELL_BITS {
            return None;
        }
        let thread_bits = bits & THREAD_MASK;
        let thread = if thread_bits == 0 {
            None
        } else if thread_bits & THREAD_PRESENT == 0 {
            return None;
        } else {
            Some(Compass::from_index(usize::from(thread_bits >> THREAD_SHIFT))?)
        };
        let flags = CellFlags::from_bits(bits & !THREAD_MASK)?;
        Some(Cell {
            flags: flags,
            thread: thread,
        })
    }
}
