use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::errors::*;
use crate::grid::Grid;
use crate::observers::{CellRole, MazeObserver};
use crate::utils;
use crate::utils::FnvHashMap;

pub const BACKGROUND_COLOUR: Rgb<u8> = Rgb([40, 40, 40]);
pub const WALL_COLOUR: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);
pub const GENERATION_HEAD_COLOUR: Rgb<u8> = Rgb([0xff, 0, 0]);
pub const BFS_VISITED_COLOUR: Rgb<u8> = Rgb([0, 0, 0xff]);
pub const SOLUTION_PATH_COLOUR: Rgb<u8> = Rgb([0, 0xff, 0]);

/// Remembers what the algorithms last said about each cell so a frame can be painted from it.
///
/// Only one generation head exists at a time: a new head notification moves it, and the first
/// flood notification clears it. Flood and path roles accumulate, a path role replacing the
/// flood role of the same cell.
#[derive(Debug, Default, Clone)]
pub struct ImagePainter {
    generation_head: Option<Cartesian2DCoordinate>,
    roles: FnvHashMap<Cartesian2DCoordinate, CellRole>,
}

impl ImagePainter {
    pub fn new() -> ImagePainter {
        ImagePainter {
            generation_head: None,
            roles: utils::fnv_hashmap(0),
        }
    }

    pub fn generation_head(&self) -> Option<Cartesian2DCoordinate> {
        self.generation_head
    }

    pub fn role_at(&self, coord: Cartesian2DCoordinate) -> Option<CellRole> {
        if self.generation_head == Some(coord) {
            Some(CellRole::GenerationHead)
        } else {
            self.roles.get(&coord).cloned()
        }
    }

    fn colour_at(&self, coord: Cartesian2DCoordinate) -> Rgb<u8> {
        match self.role_at(coord) {
            Some(CellRole::GenerationHead) => GENERATION_HEAD_COLOUR,
            Some(CellRole::BfsVisited) => BFS_VISITED_COLOUR,
            Some(CellRole::SolutionPath) => SOLUTION_PATH_COLOUR,
            None => BACKGROUND_COLOUR,
        }
    }
}

impl MazeObserver for ImagePainter {
    fn notify_cell_state(&mut self, coord: Cartesian2DCoordinate, role: CellRole) {
        match role {
            CellRole::GenerationHead => {
                self.generation_head = Some(coord);
            }
            CellRole::BfsVisited | CellRole::SolutionPath => {
                self.generation_head = None;
                self.roles.insert(coord, role);
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    cell_side_pixels_length: u8,
    wall_pixels: u8,
    output_file: Option<PathBuf>,
}

impl RenderOptions {
    pub fn cell_side_pixels_length(&self) -> u8 {
        self.cell_side_pixels_length
    }
    pub fn wall_pixels(&self) -> u8 {
        self.wall_pixels
    }
    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_ref().map(|p| p.as_path())
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptionsBuilder {
    options: RenderOptions,
}

impl RenderOptionsBuilder {
    pub fn new() -> RenderOptionsBuilder {
        RenderOptionsBuilder {
            options: RenderOptions {
                cell_side_pixels_length: 40,
                wall_pixels: 2,
                output_file: None,
            },
        }
    }
    pub fn cell_side_pixels_length(mut self, cell_side_pixels_length: u8) -> Self {
        self.options.cell_side_pixels_length = cell_side_pixels_length;
        self
    }
    pub fn wall_pixels(mut self, wall_pixels: u8) -> Self {
        self.options.wall_pixels = wall_pixels;
        self
    }
    pub fn output_file<P: AsRef<Path>>(mut self, output_file: Option<P>) -> Self {
        self.options.output_file = output_file.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Walls are at least one pixel and always thinner than a cell.
    pub fn build(self) -> RenderOptions {
        let mut options = self.options;
        options.wall_pixels = options.wall_pixels.max(1);
        options.cell_side_pixels_length =
            options.cell_side_pixels_length.max(options.wall_pixels.saturating_add(1));
        options
    }
}

impl Default for RenderOptionsBuilder {
    fn default() -> Self {
        RenderOptionsBuilder::new()
    }
}

/// Paint one frame of the maze: cell fills from the painter's roles, then the walls on top.
///
/// The image is `cells * cell_side_pixels_length + wall_pixels` on each side so the east and
/// south boundary walls fit.
pub fn render_maze_image(grid: &Grid,
                         painter: &ImagePainter,
                         options: &RenderOptions)
                         -> Result<RgbImage> {
    let cell_size = u32::from(options.cell_side_pixels_length);
    let wall = u32::from(options.wall_pixels);
    let image_side = |cells: usize| {
        (cells as u32)
            .checked_mul(cell_size)
            .and_then(|pixels| pixels.checked_add(wall))
    };
    let (img_width, img_height) =
        match (image_side(grid.row_length().0), image_side(grid.column_length().0)) {
            (Some(w), Some(h)) => (w, h),
            _ => {
                return Err(ErrorKind::InvalidGridDimensions(grid.row_length().0,
                                                            grid.column_length().0)
                    .into())
            }
        };

    let mut img = RgbImage::from_pixel(img_width, img_height, BACKGROUND_COLOUR);

    for coord in grid.iter() {
        let x0 = coord.x * cell_size;
        let y0 = coord.y * cell_size;
        let fill = painter.colour_at(coord);
        if fill != BACKGROUND_COLOUR {
            fill_rect(&mut img, x0 + wall, y0 + wall, cell_size - wall, cell_size - wall, fill);
        }
    }

    for cell in grid.cells() {
        let coord = cell.coordinate();
        let x0 = coord.x * cell_size;
        let y0 = coord.y * cell_size;
        let side = cell_size + wall;
        for dir in cell.walls().walled_directions() {
            match dir {
                CompassPrimary::North => fill_rect(&mut img, x0, y0, side, wall, WALL_COLOUR),
                CompassPrimary::South => {
                    fill_rect(&mut img, x0, y0 + cell_size, side, wall, WALL_COLOUR)
                }
                CompassPrimary::West => fill_rect(&mut img, x0, y0, wall, side, WALL_COLOUR),
                CompassPrimary::East => {
                    fill_rect(&mut img, x0 + cell_size, y0, wall, side, WALL_COLOUR)
                }
            }
        }
    }

    Ok(img)
}

/// Render and write a PNG to the options' output file, if one is set.
pub fn save_maze_image(grid: &Grid, painter: &ImagePainter, options: &RenderOptions) -> Result<()> {
    if let Some(path) = options.output_file() {
        let img = render_maze_image(grid, painter, options)?;
        img.save(path)?;
    }
    Ok(())
}

fn fill_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, colour: Rgb<u8>) {
    let x_end = x.saturating_add(w).min(img.width());
    let y_end = y.saturating_add(h).min(img.height());
    for py in y..y_end {
        for px in x..x_end {
            img.put_pixel(px, py, colour);
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::units::{ColumnLength, RowLength};

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    fn small_options() -> RenderOptions {
        RenderOptionsBuilder::new().cell_side_pixels_length(10).wall_pixels(2).build()
    }

    #[test]
    fn painter_tracks_a_single_generation_head() {
        let mut painter = ImagePainter::new();
        painter.notify_cell_state(gc(0, 0), CellRole::GenerationHead);
        painter.notify_cell_state(gc(1, 0), CellRole::GenerationHead);
        assert_eq!(painter.role_at(gc(0, 0)), None);
        assert_eq!(painter.role_at(gc(1, 0)), Some(CellRole::GenerationHead));

        painter.notify_cell_state(gc(0, 0), CellRole::BfsVisited);
        assert_eq!(painter.generation_head(), None);
        painter.notify_cell_state(gc(0, 0), CellRole::SolutionPath);
        assert_eq!(painter.role_at(gc(0, 0)), Some(CellRole::SolutionPath));
    }

    #[test]
    fn builder_keeps_walls_thinner_than_cells() {
        let options = RenderOptionsBuilder::new().cell_side_pixels_length(1).wall_pixels(0).build();
        assert_eq!(options.wall_pixels(), 1);
        assert_eq!(options.cell_side_pixels_length(), 2);

        let defaults = RenderOptionsBuilder::default().build();
        assert_eq!(defaults.cell_side_pixels_length(), 40);
        assert_eq!(defaults.wall_pixels(), 2);
        assert_eq!(defaults.output_file(), None);
    }

    #[test]
    fn image_size_includes_the_far_walls() {
        let g = Grid::new(RowLength(3), ColumnLength(2)).unwrap();
        let img = render_maze_image(&g, &ImagePainter::new(), &small_options()).unwrap();
        assert_eq!(img.dimensions(), (32, 22));
    }

    #[test]
    fn walls_and_background() {
        let mut g = Grid::new(RowLength(2), ColumnLength(1)).unwrap();
        let img = render_maze_image(&g, &ImagePainter::new(), &small_options()).unwrap();
        assert_eq!(*img.get_pixel(0, 0), WALL_COLOUR);
        assert_eq!(*img.get_pixel(5, 5), BACKGROUND_COLOUR);
        // shared wall between the two cells
        assert_eq!(*img.get_pixel(10, 5), WALL_COLOUR);

        g.carve(gc(0, 0), gc(1, 0)).unwrap();
        let img = render_maze_image(&g, &ImagePainter::new(), &small_options()).unwrap();
        assert_eq!(*img.get_pixel(10, 5), BACKGROUND_COLOUR);
        assert_eq!(*img.get_pixel(10, 0), WALL_COLOUR);
    }

    #[test]
    fn roles_fill_cells() {
        let g = Grid::new(RowLength(3), ColumnLength(1)).unwrap();
        let mut painter = ImagePainter::new();
        painter.notify_cell_state(gc(0, 0), CellRole::GenerationHead);
        let img = render_maze_image(&g, &painter, &small_options()).unwrap();
        assert_eq!(*img.get_pixel(5, 5), GENERATION_HEAD_COLOUR);

        painter.notify_cell_state(gc(1, 0), CellRole::BfsVisited);
        painter.notify_cell_state(gc(2, 0), CellRole::SolutionPath);
        let img = render_maze_image(&g, &painter, &small_options()).unwrap();
        assert_eq!(*img.get_pixel(5, 5), BACKGROUND_COLOUR);
        assert_eq!(*img.get_pixel(15, 5), BFS_VISITED_COLOUR);
        assert_eq!(*img.get_pixel(25, 5), SOLUTION_PATH_COLOUR);
    }

    #[test]
    fn saves_png_only_when_asked() {
        let g = Grid::new(RowLength(2), ColumnLength(2)).unwrap();
        let painter = ImagePainter::new();
        save_maze_image(&g, &painter, &small_options()).unwrap();

        let path = std::env::temp_dir().join("backtracker_mazes_render_test.png");
        let options = RenderOptionsBuilder::new()
            .cell_side_pixels_length(10)
            .output_file(Some(&path))
            .build();
        save_maze_image(&g, &painter, &options).unwrap();
        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (22, 22));
        let _ = std::fs::remove_file(&path);
    }
}
