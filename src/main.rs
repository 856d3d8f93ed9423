use docopt::Docopt;
use itertools::Itertools;
use log::{debug, info};
use maze3d::{
    grid_displays::{self, PathDisplay},
    orientation::Relative,
    params::{HintDisplay, MazeParams},
    pathing,
    Maze,
    Move,
    View,
};
use serde_derive::Deserialize;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::{
    fs::File,
    io,
    io::prelude::*,
    io::{BufReader, BufWriter},
};

const USAGE: &str = "Maze 3D

Usage:
    maze3d_driver -h | --help
    maze3d_driver --presets
    maze3d_driver [--params=<desc> | --preset=<name> | --load=<path>] [--moves=<letters>] [--ascii] [--view] [--distances] [--solve] [--save=<path>] [--save-edges=<path>] [-v...]

Options:
    -h --help              Show this screen.
    --presets              List the preset games and their descriptors.
    --params=<desc>        Game descriptor, e.g. 4x4x4cws12345: dimensions, target placement (c)orner (e)dge (f)ace (a)nywhere, hint display (n)one (l)ocation (w)here, (d)ouble or (s)ingle routes, then the seed. Seed 0 picks one.
    --preset=<name>        Play a preset game, named by the start of its name.
    --load=<path>          Continue a saved maze.
    --moves=<letters>      Moves to make, one letter each: A forward, B turn around, C left, D right, E pitch up, F pitch down, G roll clockwise, H roll anticlockwise, I back, J mark.
    --ascii                Print every level of the maze as text. The default when nothing else is printed.
    --view                 Print what can be seen from the current position.
    --distances            Print the distance of every cell from the target.
    --solve                Print the shortest way from the current position to the target.
    --save=<path>          Save the maze, including the position reached.
    --save-edges=<path>    Serialize the passages to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    -v                     Log more detail, repeat for more.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_presets: bool,
    flag_params: Option<String>,
    flag_preset: Option<String>,
    flag_load: Option<String>,
    flag_moves: Option<String>,
    flag_ascii: bool,
    flag_view: bool,
    flag_distances: bool,
    flag_solve: bool,
    flag_save: Option<String>,
    flag_save_edges: Option<String>,
    flag_v: usize,
}

// `use errors::*;` brings in everything `error_chain!` creates, with the library errors
// linked in so `?` works on both.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::maze3d::errors::Error, ::maze3d::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            Logger(::log::SetLoggerError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let level = match args.flag_v {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(level,
                     ConfigBuilder::new().set_target_level(LevelFilter::Off).build(),
                     TerminalMode::Stderr,
                     ColorChoice::Auto)?;

    if args.flag_presets {
        for (name, params) in MazeParams::presets() {
            println!("{:<36} {}", name, params.descriptor());
        }
        return Ok(());
    }

    let mut maze = open_maze(&args)?;
    info!("maze {:?} seed {}", maze.dimensions(), maze.seed());

    if let Some(ref letters) = args.flag_moves {
        apply_moves(&mut maze, letters)?;
    }

    let any_print_option = args.flag_view || args.flag_distances || args.flag_solve;
    if args.flag_ascii || !any_print_option {
        println!("{}", maze);
    }

    if args.flag_view {
        println!("{}", describe_view(&maze.view()?));
    }

    if args.flag_distances {
        let distances = pathing::Distances::new(maze.grid(), maze.target())
            .ok_or("Target lies outside the grid.")?;
        println!("{}", grid_displays::render_levels(maze.grid(), &distances));
    }

    if args.flag_solve {
        let distances = pathing::Distances::new(maze.grid(), maze.current())
            .ok_or("Current position lies outside the grid.")?;
        let path = pathing::shortest_path(maze.grid(), &distances, maze.target())
            .ok_or("There is no way from here to the target.")?;
        println!("{}", grid_displays::render_levels(maze.grid(), &PathDisplay::new(&path)));
        println!("{} steps to the target", path.len() - 1);
    }

    if let Some(ref path) = args.flag_save {
        let mut out = BufWriter::new(File::create(path)
            .chain_err(|| format!("Failed to create save file {}", path))?);
        maze.save(&mut out).chain_err(|| format!("Failed to save maze to {}", path))?;
        out.flush()?;
    }

    if let Some(ref path) = args.flag_save_edges {
        write_text_to_file(&pathing::edge_list(maze.grid()), path)
            .chain_err(|| format!("Failed to write maze graph to text file {}", path))?;
    }

    Ok(())
}

/// A loaded save wins over a preset, and a preset over a descriptor.
fn open_maze(args: &MazeArgs) -> Result<Maze> {
    if let Some(ref path) = args.flag_load {
        let file = File::open(path).chain_err(|| format!("Failed to open save file {}", path))?;
        return Ok(Maze::load(BufReader::new(file)).chain_err(|| format!("Failed to load maze from {}", path))?);
    }

    let params = if let Some(ref name) = args.flag_preset {
        MazeParams::preset(name).ok_or_else(|| format!("No preset named '{}'", name))?
    } else if let Some(ref descriptor) = args.flag_params {
        descriptor.parse::<MazeParams>()?
    } else {
        MazeParams::default()
    };
    debug!("building {}", params);
    Ok(params.build()?)
}

fn apply_moves(maze: &mut Maze, letters: &str) -> Result<()> {
    let mut blocked = 0;
    for letter in letters.chars().filter(|c| !c.is_whitespace()) {
        let player_move = Move::from_letter(letter).ok_or_else(|| format!("Unknown move '{}'", letter))?;
        if !maze.make_move(player_move) {
            blocked += 1;
            debug!("{:?} blocked at {}", player_move, maze.current());
        }
    }
    info!("{} moves blocked by walls", blocked);
    Ok(())
}

fn describe_view(view: &View) -> String {
    let mut lines = vec![];
    let facing = view.compass_of(Relative::Forward);
    let top = view.compass_of(Relative::Up);
    match HintDisplay::from_mode(view.mode) {
        Some(HintDisplay::Coordinates) => {
            lines.push(format!("at {} facing {} with {} overhead", view.coordinate, facing, top))
        }
        Some(HintDisplay::DirectionDistance) => {
            lines.push(format!("facing {} with {} overhead", facing, top));
            lines.push(format!("target {:.1} away, head {}", view.crow_flies, view.hint));
        }
        _ => lines.push(format!("facing {} with {} overhead", facing, top)),
    }
    lines.push(format!("moves {} rotations {} marks {}", view.moves, view.rotations, view.marks));

    for (depth, cell) in view.cells.iter().enumerate() {
        let walls = Relative::ALL.iter().filter(|r| cell.has_wall(**r)).map(|r| format!("{:?}", r)).join(" ");
        let mut line = format!("{:>2}: walls {}", depth, walls);
        if let Some(thread) = cell.thread {
            line.push_str(&format!(", thread {:?}", thread.relative));
        }
        if cell.marked {
            line.push_str(", marked");
        }
        if cell.target {
            line.push_str(", target");
        }
        lines.push(line);
    }
    lines.join("\n")
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
