//! Error types for the maze engine.
//!
//! `Result` is a typedef of std `Result` with the error type our own `Error`, and
//! `ResultExt` adds the `chain_err` method.

use error_chain::*;

use crate::coordinates::Cartesian3DCoordinate;
use crate::grid_dimensions::MAX_DIMENSION;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        ParseInt(::std::num::ParseIntError);
    }

    errors {
        DimensionsOutOfRange(x: u32, y: u32, z: u32) {
            description("maze dimensions out of range")
            display("maze dimensions {}x{}x{} must each be between 1 and {}", x, y, z, MAX_DIMENSION)
        }
        DegenerateDimensions(x: u32, y: u32, z: u32) {
            description("degenerate maze dimensions")
            display("maze dimensions {}x{}x{} are too small to hold a maze", x, y, z)
        }
        OutsideGrid(coord: Cartesian3DCoordinate) {
            description("coordinate outside the grid")
            display("coordinate {} lies outside the grid", coord)
        }
        UninitialisedCell(coord: Cartesian3DCoordinate) {
            description("cell has not been carved")
            display("cell {} has not been carved", coord)
        }
        InvalidOrientation(code: i64) {
            description("invalid orientation code")
            display("{} is not one of the 24 orientation codes", code)
        }
        InvalidTargetPolicy(policy: String) {
            description("invalid target placement policy")
            display("unknown target placement policy '{}'", policy)
        }
        Trapped(coord: Cartesian3DCoordinate) {
            description("distance walk found no way out of a cell")
            display("distance walk is trapped in cell {}", coord)
        }
        IncompleteWalk(steps: usize) {
            description("distance walk did not return to the target")
            display("distance walk did not return to the target after {} steps", steps)
        }
        UnreachableCells(count: usize) {
            description("generation left cells unconnected")
            display("generation left {} cells unconnected", count)
        }
        MalformedSave(line: usize, reason: String) {
            description("malformed maze save data")
            display("malformed maze save data at line {}: {}", line, reason)
        }
        InvalidParams(params: String) {
            description("invalid maze parameters")
            display("invalid maze parameters '{}'", params)
        }
    }
}
