use std::{fs::File, io::BufWriter, path::Path};

use anyhow::Context;
use liblife::board::{Board, CellState};

use crate::config::Rgb;

pub const CHANNELS: usize = 4;

/// Block-scaled RGBA drawing surface for one exported frame: every logical
/// cell is painted as a `block_size x block_size` square of real pixels.
pub struct Canvas {
    width: u32,
    height: u32,
    block_size: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(cells_wide: u32, cells_high: u32, block_size: u32) -> Self {
        let width = cells_wide * block_size;
        let height = cells_high * block_size;

        Self {
            width,
            height,
            block_size,
            pixels: vec![0; width as usize * height as usize * CHANNELS],
        }
    }

    /// Real-pixel width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Real-pixel height.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn fill(&mut self, color: Rgb) {
        for pixel in self.pixels.chunks_exact_mut(CHANNELS) {
            pixel.copy_from_slice(&[color[0], color[1], color[2], 255]);
        }
    }

    /// Paints the pixel block backing one logical cell.
    pub fn paint_cell(&mut self, cell_x: u32, cell_y: u32, color: Rgb) {
        for y in cell_y * self.block_size..(cell_y + 1) * self.block_size {
            for x in cell_x * self.block_size..(cell_x + 1) * self.block_size {
                self.draw_pixel(x, y, color);
            }
        }
    }

    /// Two-color rendering of the logical area: alive cells in `alive`,
    /// everything else in `bkg`.
    pub fn draw_board(&mut self, board: &Board, alive: Rgb, bkg: Rgb) {
        self.fill(bkg);

        for (y, row) in board.logical_rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if *cell == CellState::Alive {
                    self.paint_cell(x as u32, y as u32, alive);
                }
            }
        }
    }

    pub fn export_png<P>(&self, path: P) -> anyhow::Result<()>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Couldn't create image file {}", path.display()))?;

        let mut encoder = png::Encoder::new(BufWriter::new(file), self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header().context("Couldn't write PNG header")?;
        writer
            .write_image_data(self.pixels())
            .context("Couldn't write PNG image data")?;

        Ok(())
    }

    fn draw_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        if x >= self.width || y >= self.height {
            return;
        }

        let index = (x + y * self.width) as usize * CHANNELS;
        self.pixels[index..index + CHANNELS].copy_from_slice(&[color[0], color[1], color[2], 255]);
    }
}

#[cfg(test)]
mod tests {
    use liblife::board::{Board, CellState};

    use super::{CHANNELS, Canvas};

    fn pixel(canvas: &Canvas, x: u32, y: u32) -> &[u8] {
        let index = (x + y * canvas.width()) as usize * CHANNELS;
        &canvas.pixels()[index..index + CHANNELS]
    }

    #[test]
    fn dimensions_scale_with_block_size() {
        let canvas = Canvas::new(3, 2, 4);

        assert_eq!(canvas.width(), 12);
        assert_eq!(canvas.height(), 8);
        assert_eq!(canvas.pixels().len(), 12 * 8 * CHANNELS);
    }

    #[test]
    fn alive_cells_paint_their_whole_block() {
        let mut board = Board::new(2, 2);
        board.set([2, 1], CellState::Alive);

        let mut canvas = Canvas::new(2, 2, 2);
        canvas.draw_board(&board, [255, 0, 0], [0, 0, 255]);

        // Logical cell (1, 0) backs real pixels (2..4, 0..2).
        assert_eq!(pixel(&canvas, 2, 0), &[255, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 3, 1), &[255, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 0, 0), &[0, 0, 255, 255]);
        assert_eq!(pixel(&canvas, 1, 3), &[0, 0, 255, 255]);
    }

    #[test]
    fn candidate_marks_render_as_background() {
        let mut board = Board::new(1, 1);
        board.set([1, 1], CellState::Border);

        let mut canvas = Canvas::new(1, 1, 1);
        canvas.draw_board(&board, [255, 255, 255], [0, 0, 0]);

        assert_eq!(pixel(&canvas, 0, 0), &[0, 0, 0, 255]);
    }
}
