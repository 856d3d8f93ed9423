//! Text rendering of a whole maze, one level at a time.
//!
//! Each level is drawn with north at the top and west on the left, so rows run from the
//! highest x down and columns from the highest y across. A cell body is three characters:
//! the thread direction letter, a glyph, and the vertical openings (`/` up, `\` down, `X`
//! both).

use std::fmt;

use crate::cells::Compass;
use crate::coordinates::Cartesian3DCoordinate;
use crate::grid::Grid;
use crate::maze::Maze;
use crate::pathing::Distances;
use crate::utils::FnvHashSet;

const CORNER: &str = "+";
const WALL_LR_3: &str = "---";
const WALL_UD: &str = "|";
const OPEN_LR_3: &str = "   ";
const OPEN_UD: &str = " ";


/// Supplies the three character body drawn inside each cell.
pub trait GridDisplay {
    fn render_cell_body(&self, grid: &Grid, coord: Cartesian3DCoordinate) -> String;
}

fn vertical_openings(grid: &Grid, coord: Cartesian3DCoordinate) -> char {
    match (grid.is_linked(coord, Compass::Up), grid.is_linked(coord, Compass::Down)) {
        (true, true) => 'X',
        (true, false) => '/',
        (false, true) => '\\',
        (false, false) => ' ',
    }
}

impl GridDisplay for Maze {
    fn render_cell_body(&self, grid: &Grid, coord: Cartesian3DCoordinate) -> String {
        let cell = grid.cell(coord);
        let thread = cell.thread().map_or(' ', |dir| dir.letter().to_ascii_lowercase());
        let glyph = if coord == self.current {
            '@'
        } else if cell.is_target() {
            'T'
        } else if coord == self.start {
            'S'
        } else if cell.is_marked() {
            '*'
        } else {
            ' '
        };
        [thread, glyph, vertical_openings(grid, coord)].iter().collect()
    }
}

impl GridDisplay for Distances {
    fn render_cell_body(&self, _: &Grid, coord: Cartesian3DCoordinate) -> String {
        match self.distance_from_start_to(coord) {
            // centre align, padding 3, lowercase hexadecimal
            Some(d) if d <= 0xfff => format!("{:^3x}", d),
            Some(_) => String::from("..."),
            None => String::from("   "),
        }
    }
}


#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Cartesian3DCoordinate>,
}

impl PathDisplay {
    pub fn new(path: &[Cartesian3DCoordinate]) -> Self {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}

impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, grid: &Grid, coord: Cartesian3DCoordinate) -> String {
        let glyph = if self.on_path_coordinates.contains(&coord) { '.' } else { ' ' };
        [' ', glyph, vertical_openings(grid, coord)].iter().collect()
    }
}


/// Draw every level of the grid from the top level down.
pub fn render_levels(grid: &Grid, displayer: &dyn GridDisplay) -> String {
    let dimensions = grid.dimensions();
    let mut output = String::new();

    for z in (0..dimensions.z()).rev() {
        if z + 1 < dimensions.z() {
            output.push_str("\n");
        }
        output.push_str(&format!("level {}\n", z));

        // The northern boundary of the top row, every row after draws its own south side.
        let top_x = dimensions.x() - 1;
        output.push_str(CORNER);
        for y in (0..dimensions.y()).rev() {
            let coord = Cartesian3DCoordinate::new(top_x, y, z);
            output.push_str(if grid.has_wall(coord, Compass::North) { WALL_LR_3 } else { OPEN_LR_3 });
            output.push_str(CORNER);
        }
        output.push_str("\n");

        for x in (0..dimensions.x()).rev() {
            let west_most = Cartesian3DCoordinate::new(x, dimensions.y() - 1, z);
            let mut row_middle_section_render =
                String::from(if grid.has_wall(west_most, Compass::West) { WALL_UD } else { OPEN_UD });
            let mut row_bottom_section_render = String::from(CORNER);

            for y in (0..dimensions.y()).rev() {
                let coord = Cartesian3DCoordinate::new(x, y, z);
                row_middle_section_render.push_str(&displayer.render_cell_body(grid, coord));
                row_middle_section_render
                    .push_str(if grid.has_wall(coord, Compass::East) { WALL_UD } else { OPEN_UD });
                row_bottom_section_render
                    .push_str(if grid.has_wall(coord, Compass::South) { WALL_LR_3 } else { OPEN_LR_3 });
                row_bottom_section_render.push_str(CORNER);
            }

            output.push_str(&row_middle_section_render);
            output.push_str("\n");
            output.push_str(&row_bottom_section_render);
            output.push_str("\n");
        }
    }
    output
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render_levels(&self.grid, self))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::{CellFlags, Compass::*};
    use crate::generators::TargetPolicy;
    use crate::grid_dimensions::GridDimensions;
    use crate::orientation::Orientation;

    fn gc(x: u32, y: u32, z: u32) -> Cartesian3DCoordinate {
        Cartesian3DCoordinate::new(x, y, z)
    }

    /// A 3x2x1 maze winding (1,1) (2,1) (2,0) (1,0) (0,0).
    fn small_maze() -> Maze {
        let mut grid = Grid::new(GridDimensions::new(3, 2, 1).unwrap());
        for coord in grid.iter().collect::<Vec<_>>() {
            grid.cell_mut(coord).carve(CellFlags::WALLS);
        }
        grid.smash_wall(gc(0, 0, 0), North);
        grid.smash_wall(gc(1, 0, 0), North);
        grid.smash_wall(gc(2, 0, 0), West);
        grid.smash_wall(gc(2, 1, 0), South);
        grid.cell_mut(gc(0, 0, 0)).insert(CellFlags::TARGET);
        grid.cell_mut(gc(2, 0, 0)).set_thread(Some(South));
        Maze {
            grid: grid,
            target: gc(0, 0, 0),
            second: gc(1, 0, 0),
            current: gc(1, 1, 0),
            orientation: Orientation::default(),
            start: gc(1, 1, 0),
            start_orientation: Orientation::default(),
            seed: 1,
            moves: 0,
            rotations: 0,
            marks: 0,
            mode: 0,
        }
    }

    #[test]
    fn render_small_maze() {
        let expected = "\
level 0
+---+---+
|    s  |
+   +   +
| @ |   |
+---+   +
|   | T |
+---+---+
";
        assert_eq!(small_maze().to_string(), expected);
    }

    #[test]
    fn start_and_marks_show_once_the_player_leaves() {
        let mut maze = small_maze();
        maze.current = gc(2, 1, 0);
        maze.grid.cell_mut(gc(1, 0, 0)).insert(CellFlags::MARK);
        let text = maze.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2], "| @  s  |");
        assert_eq!(lines[4], "| S | * |");
    }

    #[test]
    fn render_path_and_distances() {
        let maze = small_maze();
        let distances = Distances::new(&maze.grid, maze.target).unwrap();
        let text = render_levels(&maze.grid, &distances);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2], "| 3   2 |");
        assert_eq!(lines[4], "| 4 | 1 |");
        assert_eq!(lines[6], "|   | 0 |");

        let path = PathDisplay::new(&[gc(1, 0, 0), gc(0, 0, 0)]);
        let text = render_levels(&maze.grid, &path);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[4], "|   | . |");
        assert_eq!(lines[6], "|   | . |");
    }

    #[test]
    fn levels_from_the_top_down() {
        let maze = Maze::new(4, 3, 3, TargetPolicy::Corner, false, 11).unwrap();
        let text = maze.to_string();
        let headings: Vec<&str> = text.lines().filter(|l| l.starts_with("level")).collect();
        assert_eq!(headings, vec!["level 2", "level 1", "level 0"]);
        // heading, top border and two lines per row, then a blank line between levels
        assert_eq!(text.lines().count(), 3 * (2 + 2 * 4) + 2);
        assert!(text.lines().filter(|l| l.starts_with('+') || l.starts_with('|')).all(|l| l.len() == 13));
        assert_eq!(text.matches('@').count(), 1);
        assert_eq!(text.matches('T').count(), 1);

        let ups = text.matches('/').count() + text.matches('X').count();
        let downs = text.matches('\\').count() + text.matches('X').count();
        assert_eq!(ups, downs);
        assert!(ups > 0);
    }
}
