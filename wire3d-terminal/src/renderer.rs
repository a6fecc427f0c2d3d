/// Half-block pixel surface for terminal rendering
use crossterm::{
    cursor,
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wire3d_core::{Color, LineSink, Pen, Point2};

/// Upper half block: foreground paints the top pixel, background the bottom
const HALF_BLOCK: char = '▀';

/// Pixel grid presented as terminal cells, two pixels per cell vertically.
///
/// Every pixel is `None` (background) or a color. Lines are clipped to the
/// surface before rasterization.
pub struct PixelSurface {
    width: usize,
    height: usize,
    pixels: Vec<Option<Color>>,
}

impl PixelSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![None; width * height],
        }
    }

    /// Surface covering a terminal of `columns` × `rows` cells
    pub fn for_terminal(columns: u16, rows: u16) -> Self {
        Self::new(usize::from(columns), usize::from(rows) * 2)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.pixels.fill(None);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            None
        }
    }

    /// Set a pixel; coordinates outside the surface are ignored
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = Some(color);
        }
    }

    /// Number of pixels currently set
    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_some()).count()
    }

    /// Bresenham line between integer pixel positions
    fn rasterize_line(&mut self, (mut x0, mut y0): (i64, i64), (x1, y1): (i64, i64), color: Color) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Queue the whole surface, one terminal row per pixel pair
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in 0..self.height.div_ceil(2) {
            writer.queue(cursor::MoveTo(0, row as u16))?;
            let mut current: Option<(Option<Color>, Option<Color>)> = None;
            for x in 0..self.width {
                let cell = (self.pixel(x, row * 2), self.pixel(x, row * 2 + 1));
                if current != Some(cell) {
                    writer.queue(SetForegroundColor(to_terminal_color(cell.0)))?;
                    writer.queue(SetBackgroundColor(to_terminal_color(cell.1)))?;
                    current = Some(cell);
                }
                writer.queue(Print(HALF_BLOCK))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl LineSink for PixelSurface {
    fn draw_line(&mut self, from: Point2, to: Point2, pen: Pen) {
        let Some((from, to)) = clip_segment(from, to, self.width as f64, self.height as f64)
        else {
            return;
        };
        let round = |p: Point2| (p.x.round() as i64, p.y.round() as i64);
        self.rasterize_line(round(from), round(to), pen.color);
    }
}

fn to_terminal_color(color: Option<Color>) -> style::Color {
    match color {
        Some(Color { r, g, b }) => style::Color::Rgb { r, g, b },
        None => style::Color::Black,
    }
}

/// Liang–Barsky clip of a segment against [0, width] × [0, height]
fn clip_segment(from: Point2, to: Point2, width: f64, height: f64) -> Option<(Point2, Point2)> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;

    let edges = [
        (-dx, from.x),
        (dx, width - from.x),
        (-dy, from.y),
        (dy, height - from.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((
        Point2::new(from.x + t0 * dx, from.y + t0 * dy),
        Point2::new(from.x + t1 * dx, from.y + t1 * dy),
    ))
}
