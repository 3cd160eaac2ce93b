use docopt::Docopt;
use error_chain::bail;
use serde_derive::Deserialize;
use backtracker_mazes::{
    cells::Cartesian2DCoordinate,
    config::MazeConfigBuilder,
    generators::GenerationOutcome,
    grid_displays::{GridDisplay, PathDisplay},
    observers::{CancelFlag, CellRole, MazeObserver},
    pathing::{Distances, PathOutcome},
    renderers::{self, ImagePainter, RenderOptionsBuilder},
    session::MazeSession,
};
use std::{
    io::prelude::*,
    fs::File,
    io,
    rc::Rc,
};

const USAGE: &str = "Backtracker Mazes

Usage:
    maze_driver -h | --help
    maze_driver [(--grid-size=<n>|[--grid-width=<w> --grid-height=<h>])] [--seed=<s>] [--start-x=<x> --start-y=<y>] [--end-x=<x> --end-y=<y>] [--text-out=<path>] [--show-distances] [--image-out=<path>] [--cell-pixels=<n>] [--trace]

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid size is n * n.
    --grid-width=<w>       The grid width in a w*h grid [default: 20].
    --grid-height=<h>      The grid height in a w*h grid [default: 20].
    --seed=<s>             Seed for the random number generator. The same seed carves the same maze.
    --start-x=<x>          x coordinate of the path start, defaults to the top left cell.
    --start-y=<y>          y coordinate of the path start.
    --end-x=<x>            x coordinate of the path end, defaults to the bottom right cell.
    --end-y=<y>            y coordinate of the path end.
    --text-out=<path>      Output file path for a textual rendering of the solved maze.
    --show-distances       In the text rendering show the distance (hex) from the start point to every cell instead of the path.
    --image-out=<path>     Output file path for an image rendering of the solved maze. Always PNG format.
    --cell-pixels=<n>      Pixel count to render one cell in a maze [default: 40] max 255.
    --trace                Print every cell notification from the generator and solver.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<usize>,
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_seed: Option<u64>,
    flag_start_x: Option<u32>,
    flag_start_y: Option<u32>,
    flag_end_x: Option<u32>,
    flag_end_y: Option<u32>,
    flag_text_out: String,
    flag_show_distances: bool,
    flag_image_out: String,
    flag_cell_pixels: u8,
    flag_trace: bool,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::backtracker_mazes::errors::Error, ::backtracker_mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            Interrupt(::ctrlc::Error);
        }
    }
}
use crate::errors::*;

/// Prints one line per cell notification when switched on.
struct TraceObserver {
    enabled: bool,
}

impl MazeObserver for TraceObserver {
    fn notify_cell_state(&mut self, coord: Cartesian2DCoordinate, role: CellRole) {
        if self.enabled {
            println!("{} {}", role, coord);
        }
    }
}

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (width, height) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_grid_width, args.flag_grid_height)
    };
    let config = MazeConfigBuilder::new()
        .width(width)
        .height(height)
        .seed(args.flag_seed)
        .start(coordinate_arg(args.flag_start_x, args.flag_start_y))
        .end(coordinate_arg(args.flag_end_x, args.flag_end_y))
        .build()
        .chain_err(|| "Invalid maze configuration")?;
    let mut session = MazeSession::new(config)?;

    let mut interrupted = CancelFlag::new();
    let handler_flag = interrupted.clone();
    ctrlc::set_handler(move || handler_flag.raise())?;

    let mut painter = ImagePainter::new();
    let mut tracer = TraceObserver { enabled: args.flag_trace };

    println!("Generating maze...");
    match session.generate(((&mut painter, &mut tracer), &mut interrupted)) {
        GenerationOutcome::Complete { passages } => {
            println!("Maze generated with {} passages. Starting BFS solver...", passages)
        }
        GenerationOutcome::Cancelled => bail!("Maze generation was cancelled"),
    }

    let (start, end) = (session.start(), session.end());
    let path = match session.solve(((&mut painter, &mut tracer), &mut interrupted))? {
        PathOutcome::Found(path) => path,
        PathOutcome::NoPathFound => {
            let no_path = backtracker_mazes::errors::ErrorKind::NoPathFound(start, end);
            return Err(backtracker_mazes::errors::Error::from(no_path).into());
        }
        PathOutcome::Cancelled => bail!("Maze solving was cancelled"),
    };
    println!("Solved! The shortest path from {} to {} visits {} cells.", start, end, path.len());

    let is_text_path_set = !args.flag_text_out.is_empty();
    let is_image_path_set = !args.flag_image_out.is_empty();

    let text_display = if args.flag_show_distances {
        let distances = Distances::<u32>::for_grid(session.grid(), start)
            .ok_or("Provided invalid start coordinate from which to show path distances.")?;
        Rc::new(distances) as Rc<dyn GridDisplay>
    } else {
        Rc::new(PathDisplay::new(&path)) as Rc<dyn GridDisplay>
    };
    session.grid_mut().set_grid_display(Some(text_display));

    if is_text_path_set {
        write_text_to_file(&format!("{}", session.grid()), &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    } else if !is_image_path_set {
        println!("{}", session.grid());
    }

    if is_image_path_set {
        let render_options = RenderOptionsBuilder::new()
            .cell_side_pixels_length(args.flag_cell_pixels)
            .output_file(Some(&args.flag_image_out))
            .build();
        renderers::save_maze_image(session.grid(), &painter, &render_options)
            .chain_err(|| format!("Failed to write maze image {}", args.flag_image_out))?;
    }

    Ok(())
}

fn coordinate_arg(x: Option<u32>, y: Option<u32>) -> Option<Cartesian2DCoordinate> {
    match (x, y) {
        (Some(x), Some(y)) => Some(Cartesian2DCoordinate::new(x, y)),
        _ => None,
    }
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
