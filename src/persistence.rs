//! Plain text save files.
//!
//! ```text
//! <<-MAZE 3D Version 1 Save File->>
//! cx cy cz corientation
//! tx ty tz
//! sx sy sz
//! sx sy sz
//! lx ly lz lorientation
//! marks moves rotations seed mode
//! X Y Z
//! <one integer per cell, x major, then y, then z>
//! <<-MAZE 3D  EOF->>
//! ```
//!
//! `c` is the current position, `t` the target, `s` the target's neighbour on the first
//! track (written twice in version 1 files) and `l` the start. Orientations are
//! `(facing << 4) | top` codes.

use std::io::{BufRead, Write};

use itertools::Itertools;
use log::debug;

use crate::cells::Cell;
use crate::coordinates::Cartesian3DCoordinate;
use crate::errors::*;
use crate::grid::Grid;
use crate::grid_dimensions::GridDimensions;
use crate::maze::Maze;
use crate::orientation::Orientation;

pub const HEADER: &str = "<<-MAZE 3D Version 1 Save File->>";
pub const FOOTER: &str = "<<-MAZE 3D  EOF->>";


impl Maze {
    pub fn save<W: Write>(&self, out: &mut W) -> Result<()> {
        let coords = |c: Cartesian3DCoordinate| format!("{} {} {}", c.x, c.y, c.z);
        let dimensions = self.dimensions();

        writeln!(out, "{}", HEADER)?;
        writeln!(out, "{} {}", coords(self.current), self.orientation.code())?;
        writeln!(out, "{}", coords(self.target))?;
        writeln!(out, "{}", coords(self.second))?;
        writeln!(out, "{}", coords(self.second))?;
        writeln!(out, "{} {}", coords(self.start), self.start_orientation.code())?;
        writeln!(out,
                 "{} {}",
                 [self.marks, self.moves, self.rotations, self.seed].iter().join(" "),
                 self.mode)?;
        writeln!(out, "{} {} {}", dimensions.x(), dimensions.y(), dimensions.z())?;
        for cell in self.grid.cells() {
            writeln!(out, "{}", cell.to_bits())?;
        }
        writeln!(out, "{}", FOOTER)?;
        Ok(())
    }

    /// Read a maze written by `save`. Nothing is built until the whole file has been
    /// checked.
    pub fn load<R: BufRead>(input: R) -> Result<Maze> {
        let mut reader = SaveReader {
            lines: input.lines(),
            line: 0,
        };

        let header = reader.next_line()?;
        if header.trim_end() != HEADER {
            return Err(reader.malformed("missing save file header"));
        }
        let current = reader.fields(4)?;
        let target = reader.fields(3)?;
        let second = reader.fields(3)?;
        let second_again = reader.fields(3)?;
        let start = reader.fields(4)?;
        let (counters, mode) = reader.counters()?;
        let extents = reader.fields(3)?;
        let dimensions_line = reader.line;

        let extent = |v: i64| if v >= 0 && v <= i64::from(u32::max_value()) { v as u32 } else { 0 };
        let dimensions = GridDimensions::new(extent(extents[0]), extent(extents[1]), extent(extents[2]))
            .map_err(|e| Error::from(ErrorKind::MalformedSave(dimensions_line, e.to_string())))?;

        let coordinate = |values: &[i64], line: usize| -> Result<Cartesian3DCoordinate> {
            let in_bounds = |v: i64, extent: u32| v >= 0 && v < i64::from(extent);
            if in_bounds(values[0], dimensions.x()) && in_bounds(values[1], dimensions.y()) &&
               in_bounds(values[2], dimensions.z()) {
                Ok(Cartesian3DCoordinate::new(values[0] as u32, values[1] as u32, values[2] as u32))
            } else {
                Err(ErrorKind::MalformedSave(line, format!("coordinate {:?} outside the grid", &values[..3]))
                    .into())
            }
        };
        let orientation = |code: i64, line: usize| -> Result<Orientation> {
            Orientation::from_code(code)
                .ok_or_else(|| Error::from(ErrorKind::InvalidOrientation(code)))
                .chain_err(|| ErrorKind::MalformedSave(line, format!("invalid orientation code {}", code)))
        };

        let current_coord = coordinate(&current[..], 2)?;
        let current_orientation = orientation(current[3], 2)?;
        let target_coord = coordinate(&target[..], 3)?;
        let second_coord = coordinate(&second[..], 4)?;
        if second_again != second {
            return Err(ErrorKind::MalformedSave(5, "second cell lines disagree".to_string()).into());
        }
        let start_coord = coordinate(&start[..], 6)?;
        let start_orientation = orientation(start[3], 6)?;

        let mut cells = Vec::with_capacity(dimensions.volume());
        for _ in 0..dimensions.volume() {
            let value = reader.fields(1)?[0];
            let cell = if value >= 0 && value <= i64::from(crate::cells::MAX_CELL_BITS) {
                Cell::from_bits(value as u16)
            } else {
                None
            };
            match cell {
                Some(cell) if !cell.has_pebble() => cells.push(cell),
                _ => return Err(reader.malformed(&format!("invalid cell value {}", value))),
            }
        }
        let footer = reader.next_line()?;
        if footer.trim_end() != FOOTER {
            return Err(reader.malformed("missing save file footer"));
        }

        let grid = Grid::from_cells(dimensions, cells);
        if !grid.is_boundary_sealed() {
            return Err(ErrorKind::MalformedSave(reader.line, "boundary walls missing".to_string()).into());
        }
        if !grid.walls_are_symmetric() {
            return Err(ErrorKind::MalformedSave(reader.line, "walls do not match between cells".to_string())
                .into());
        }
        for &(coord, line) in [(current_coord, 2), (start_coord, 6)].iter() {
            if grid.cell(coord).is_uninitialised() {
                return Err(ErrorKind::MalformedSave(line, format!("cell {} was never carved", coord)).into());
            }
        }
        let targets = grid.cells().iter().filter(|cell| cell.is_target()).count();
        if targets != 1 || !grid.cell(target_coord).is_target() {
            return Err(ErrorKind::MalformedSave(3, format!("{} target cells, expected one at {}", targets, target_coord))
                .into());
        }
        if !grid.neighbours(target_coord).contains(&second_coord) {
            return Err(ErrorKind::MalformedSave(4, format!("cell {} is not next to the target", second_coord)).into());
        }

        debug!("loaded {:?} maze, seed {}", dimensions, counters[3]);
        Ok(Maze {
            grid: grid,
            target: target_coord,
            second: second_coord,
            current: current_coord,
            orientation: current_orientation,
            start: start_coord,
            start_orientation: start_orientation,
            seed: counters[3],
            moves: counters[1],
            rotations: counters[2],
            marks: counters[0],
            mode: mode,
        })
    }
}

struct SaveReader<L> {
    lines: L,
    line: usize,
}

impl<L: Iterator<Item = std::io::Result<String>>> SaveReader<L> {
    fn malformed(&self, reason: &str) -> Error {
        ErrorKind::MalformedSave(self.line, reason.to_string()).into()
    }

    fn next_line(&mut self) -> Result<String> {
        self.line += 1;
        match self.lines.next() {
            Some(line) => Ok(line?),
            None => Err(self.malformed("unexpected end of file")),
        }
    }

    /// Exactly `count` whitespace separated integers.
    fn fields(&mut self, count: usize) -> Result<Vec<i64>> {
        let text = self.next_line()?;
        let values = text.split_whitespace()
            .map(|field| field.parse::<i64>())
            .collect::<std::result::Result<Vec<i64>, _>>()
            .chain_err(|| ErrorKind::MalformedSave(self.line, format!("expected integers, found '{}'", text)))?;
        if values.len() != count {
            return Err(self.malformed(&format!("expected {} values, found {}", count, values.len())));
        }
        Ok(values)
    }

    /// Marks, moves, rotations and seed, which are never negative, then the mode.
    fn counters(&mut self) -> Result<([u64; 4], i64)> {
        let text = self.next_line()?;
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(self.malformed(&format!("expected 5 values, found {}", fields.len())));
        }
        let mut counters = [0; 4];
        for (counter, field) in counters.iter_mut().zip(&fields) {
            *counter = field.parse::<u64>()
                .chain_err(|| ErrorKind::MalformedSave(self.line, format!("bad counter or seed '{}'", field)))?;
        }
        let mode = fields[4]
            .parse::<i64>()
            .chain_err(|| ErrorKind::MalformedSave(self.line, format!("bad mode '{}'", fields[4])))?;
        Ok((counters, mode))
    }
}
