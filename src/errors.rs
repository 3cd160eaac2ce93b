//! Crate wide error types.
//!
//! `error_chain!` creates the `Error`, `ErrorKind`, `ResultExt` and `Result` types.
//! Other modules `use crate::errors::*;` to get at them.

use error_chain::error_chain;

use crate::cells::Cartesian2DCoordinate;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        Image(::image::ImageError);
    }

    errors {
        InvalidGridDimensions(width: usize, height: usize) {
            description("invalid grid dimensions")
            display("invalid grid dimensions {} x {}: both sides must be at least one cell", width, height)
        }

        InvalidCoordinate(coord: Cartesian2DCoordinate) {
            description("coordinate outside of the grid")
            display("coordinate ({}, {}) is outside of the grid", coord.x, coord.y)
        }

        NoPathFound(start: Cartesian2DCoordinate, end: Cartesian2DCoordinate) {
            description("no path between cells")
            display("no path from ({}, {}) to ({}, {})", start.x, start.y, end.x, end.y)
        }
    }
}
