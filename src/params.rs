//! Game parameters and their compact descriptor strings, e.g. `5x5x5awd1234`.
//!
//! A descriptor is up to three dimensions joined by `x`, then option letters in any order
//! (placement `c`/`e`/`f`/`a`, display `n`/`l`/`w`, `d` or `s` for double or single
//! routes), then an optional decimal seed. Missing dimensions are filled in: `4` is a
//! 4x4x4 cube and `8x8` a single 8x8 level.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::errors::*;
use crate::generators::TargetPolicy;
use crate::grid_dimensions::GridDimensions;
use crate::maze::Maze;


/// Which target hint a front end shows. Stored as the maze mode.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum HintDisplay {
    Nothing = 0,
    Coordinates = 1,
    DirectionDistance = 2,
}

impl HintDisplay {
    pub fn letter(self) -> char {
        match self {
            HintDisplay::Nothing => 'n',
            HintDisplay::Coordinates => 'l',
            HintDisplay::DirectionDistance => 'w',
        }
    }

    pub fn from_letter(letter: char) -> Option<HintDisplay> {
        match letter.to_ascii_lowercase() {
            'n' => Some(HintDisplay::Nothing),
            'l' => Some(HintDisplay::Coordinates),
            'w' => Some(HintDisplay::DirectionDistance),
            _ => None,
        }
    }

    pub fn from_mode(mode: i64) -> Option<HintDisplay> {
        match mode {
            0 => Some(HintDisplay::Nothing),
            1 => Some(HintDisplay::Coordinates),
            2 => Some(HintDisplay::DirectionDistance),
            _ => None,
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct MazeParams {
    pub x: u32,
    pub y: u32,
    pub z: u32,
    pub target: TargetPolicy,
    pub double_routes: bool,
    pub display: HintDisplay,
    /// 0 draws a fresh seed.
    pub seed: u64,
}

impl Default for MazeParams {
    fn default() -> MazeParams {
        MazeParams {
            x: 4,
            y: 4,
            z: 4,
            target: TargetPolicy::Corner,
            double_routes: false,
            display: HintDisplay::DirectionDistance,
            seed: 0,
        }
    }
}

impl MazeParams {
    pub fn dimensions(&self) -> Result<GridDimensions> {
        GridDimensions::new(self.x, self.y, self.z)
    }

    /// Generate the maze these parameters describe, with the display style as its mode.
    pub fn build(&self) -> Result<Maze> {
        let mut maze = Maze::generate(self.dimensions()?, self.target, self.double_routes, self.seed)?;
        maze.set_mode(self.display as i64);
        Ok(maze)
    }

    /// The descriptor without the seed, as used to name a kind of game.
    pub fn descriptor(&self) -> String {
        format!("{}x{}x{}{}{}{}",
                self.x,
                self.y,
                self.z,
                self.target.letter(),
                self.display.letter(),
                if self.double_routes { 'd' } else { 's' })
    }

    /// Named presets from easiest to hardest.
    pub fn presets() -> Vec<(&'static str, MazeParams)> {
        let cube = |side: u32| MazeParams {
            x: side,
            y: side,
            z: side,
            ..MazeParams::default()
        };
        let flat = |side: u32| MazeParams {
            x: side,
            y: side,
            z: 1,
            ..MazeParams::default()
        };
        vec![("Easy (3x3x3)", cube(3)),
             ("Basic (4x4x4)", cube(4)),
             ("More Challenging (5x5x5)", cube(5)),
             ("Flat (8x8)", flat(8)),
             ("Big flat (20x20)", MazeParams { display: HintDisplay::Coordinates, ..flat(20) }),
             ("Difficult (5x5x5 no hints)",
              MazeParams {
                  target: TargetPolicy::Anywhere,
                  display: HintDisplay::Coordinates,
                  ..cube(5)
              }),
             ("Impossible (10x10x10 with doubles)",
              MazeParams {
                  target: TargetPolicy::Anywhere,
                  double_routes: true,
                  display: HintDisplay::Nothing,
                  ..cube(10)
              })]
    }

    /// Look a preset up by the start of its name, ignoring case.
    pub fn preset(name: &str) -> Option<MazeParams> {
        let wanted = name.to_lowercase();
        MazeParams::presets()
            .into_iter()
            .find(|&(preset_name, _)| preset_name.to_lowercase().starts_with(&wanted))
            .map(|(_, params)| params)
    }
}

impl fmt::Display for MazeParams {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.descriptor(), self.seed)
    }
}

fn push_digit(value: u64, digit: char, descriptor: &str) -> Result<u64> {
    digit.to_digit(10)
        .and_then(|d| value.checked_mul(10).and_then(|v| v.checked_add(u64::from(d))))
        .ok_or_else(|| Error::from(ErrorKind::InvalidParams(descriptor.to_string())))
}

impl FromStr for MazeParams {
    type Err = Error;

    /// Unknown option letters are skipped; anything after the seed is an error.
    fn from_str(descriptor: &str) -> Result<MazeParams> {
        let mut params = MazeParams::default();
        let mut extents = [0u64; 3];
        let mut axis = 0;
        let mut seed = 0;
        let mut chars = descriptor.trim().chars().peekable();

        while let Some(&c) = chars.peek() {
            if c.eq_ignore_ascii_case(&'x') && axis < 2 {
                axis += 1;
            } else if c.is_ascii_digit() {
                extents[axis] = push_digit(extents[axis], c, descriptor)?;
            } else {
                break;
            }
            chars.next();
        }

        while let Some(&c) = chars.peek() {
            if c.is_ascii_digit() {
                break;
            }
            if let Some(target) = TargetPolicy::from_letter(c) {
                params.target = target;
            } else if let Some(display) = HintDisplay::from_letter(c) {
                params.display = display;
            } else if c.eq_ignore_ascii_case(&'d') {
                params.double_routes = true;
            } else if c.eq_ignore_ascii_case(&'s') {
                params.double_routes = false;
            }
            chars.next();
        }

        for c in chars {
            seed = push_digit(seed, c, descriptor)?;
        }

        let [x, y, z] = extents;
        let (x, y, z) = match (x, y, z) {
            (0, 0, 0) => (4, 4, 4),
            (x, 0, 0) => (x, x, x),
            (0, y, z) => (1, y, if z == 0 { 1 } else { z }),
            (x, y, 0) => (x, y, 1),
            (x, 0, z) => (x, 1, z),
            other => other,
        };
        let extent = |v: u64| if v > u64::from(u32::max_value()) { u32::max_value() } else { v as u32 };
        params.x = extent(x);
        params.y = extent(y);
        params.z = extent(z);
        params.seed = seed;
        debug!("decoded '{}' as {}", descriptor, params);
        Ok(params)
    }
}
