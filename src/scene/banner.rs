use crate::canvas::{Canvas, Rect, Rgb, with_alpha};
use crate::constants::{
    GOLD, HOT_PINK, INSTRUCTION_GREY, INSTRUCTIONS, NAME, TITLE, WORLD_HEIGHT, WORLD_WIDTH,
};

use super::Layer;
use super::font::{self, GLYPH_HEIGHT};

const GLOW_OFFSETS: [(f32, f32); 4] = [(2.0, 2.0), (-2.0, -2.0), (2.0, -2.0), (-2.0, 2.0)];
const GLOW_ALPHA: u8 = 100;

/// A line of block letters centred on a point.
struct BlockText {
    cells: Vec<(usize, usize)>,
    columns: usize,
    cell_size: f32,
    center: (f32, f32),
    color: Rgb,
    glow: bool,
}

impl BlockText {
    fn new(text: &str, cell_size: f32, center: (f32, f32), color: Rgb, glow: bool) -> Self {
        let (cells, columns) = font::layout(text);
        Self {
            cells,
            columns,
            cell_size,
            center,
            color,
            glow,
        }
    }

    fn origin(&self) -> (f32, f32) {
        (
            self.center.0 - self.columns as f32 * self.cell_size / 2.0,
            self.center.1 - GLYPH_HEIGHT as f32 * self.cell_size / 2.0,
        )
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let (left, top) = self.origin();
        let cell = |column: usize, row: usize, offset: (f32, f32)| {
            Rect::new(
                left + column as f32 * self.cell_size + offset.0,
                top + row as f32 * self.cell_size + offset.1,
                self.cell_size,
                self.cell_size,
            )
        };

        if self.glow {
            for offset in GLOW_OFFSETS {
                for &(column, row) in &self.cells {
                    canvas.fill_rect(cell(column, row, offset), with_alpha(self.color, GLOW_ALPHA));
                }
            }
        }
        for &(column, row) in &self.cells {
            canvas.fill_rect(cell(column, row, (0.0, 0.0)), with_alpha(self.color, 255));
        }
    }
}

/// The greeting across the top and the controls along the bottom.
pub struct Banner {
    title: BlockText,
    name: BlockText,
}

impl Banner {
    pub fn new() -> Self {
        Self {
            title: BlockText::new(TITLE, 9.0, (WORLD_WIDTH / 2.0, 100.0), GOLD, true),
            name: BlockText::new(NAME, 7.0, (WORLD_WIDTH / 2.0, 180.0), HOT_PINK, false),
        }
    }
}

impl Default for Banner {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer for Banner {
    fn draw(&self, canvas: &mut dyn Canvas) {
        self.title.draw(canvas);
        self.name.draw(canvas);

        let mut y = WORLD_HEIGHT - 120.0;
        for line in INSTRUCTIONS {
            canvas.draw_text((WORLD_WIDTH / 2.0, y), line, INSTRUCTION_GREY);
            y += 30.0;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::canvas::testing::{RecordingCanvas, Shape};

    #[test]
    fn title_fits_inside_the_world() {
        let banner = Banner::new();
        let (left, top) = banner.title.origin();
        assert!(left > 0.0);
        assert!(top > 0.0);
        assert!(left + banner.title.columns as f32 * 9.0 < WORLD_WIDTH);
    }

    #[test]
    fn draws_instructions_as_text() {
        let mut canvas = RecordingCanvas::default();
        Banner::new().draw(&mut canvas);
        assert_eq!(canvas.texts(), INSTRUCTIONS.map(str::to_owned).to_vec());
    }

    #[test]
    fn title_glows_but_name_does_not() {
        let mut canvas = RecordingCanvas::default();
        Banner::new().draw(&mut canvas);

        let title_cells = font::layout(TITLE).0.len();
        let name_cells = font::layout(NAME).0.len();
        let rects = canvas
            .shapes
            .iter()
            .filter(|shape| matches!(shape, Shape::Rect(..)))
            .count();
        assert_eq!(rects, title_cells * 5 + name_cells);
    }
}
