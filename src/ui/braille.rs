use std::collections::HashMap;

use ratatui::prelude::*;

use crate::game::geometry::Aabb;

/// Dots set by one sprite, keyed by cell.
pub type Dots = HashMap<(usize, usize), u8>;

fn braille_bit(sub_x: usize, sub_y: usize) -> u8 {
    match (sub_x, sub_y) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (1, 3) => 0x80,
        _ => 0,
    }
}

/// Character grid drawn at braille resolution (2x4 dots per cell), in world coordinates.
pub struct Canvas {
    w: usize,
    h: usize,
    bw: i32,
    bh: i32,
    sx: f32,
    sy: f32,
    bg: Color,
    grid: Vec<Vec<(char, Style)>>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, world_w: f32, world_h: f32, bg: Color) -> Self {
        let bw = (width * 2) as i32;
        let bh = (height * 4) as i32;
        Self {
            w: width,
            h: height,
            bw,
            bh,
            sx: bw as f32 / world_w,
            sy: bh as f32 / world_h,
            bg,
            grid: vec![vec![(' ', Style::default().bg(bg)); width]; height],
        }
    }

    pub fn dot_height(&self) -> i32 {
        self.bh
    }

    pub fn dot_width(&self) -> i32 {
        self.bw
    }

    /// World units per dot row.
    pub fn y_scale(&self) -> f32 {
        self.sy
    }

    pub fn set_dot(&self, dots: &mut Dots, bx: i32, by: i32) {
        if bx < 0 || by < 0 || bx >= self.bw || by >= self.bh {
            return;
        }
        let cx = bx as usize / 2;
        let cy = by as usize / 4;
        *dots.entry((cx, cy)).or_insert(0) |= braille_bit(bx as usize % 2, by as usize % 4);
    }

    fn dot_box(&self, b: &Aabb) -> (i32, i32, i32, i32) {
        let x0 = (b.x * self.sx) as i32;
        let y0 = (b.y * self.sy) as i32;
        let x1 = ((b.right() * self.sx) as i32).max(x0 + 1);
        let y1 = ((b.bottom() * self.sy) as i32).max(y0 + 1);
        (x0, y0, x1, y1)
    }

    pub fn fill_rect(&self, dots: &mut Dots, b: &Aabb) {
        let (x0, y0, x1, y1) = self.dot_box(b);
        for by in y0..y1 {
            for bx in x0..x1 {
                self.set_dot(dots, bx, by);
            }
        }
    }

    /// Ellipse inscribed in `b`; `inner` (0..1) hollows it into a ring.
    pub fn ellipse(&self, dots: &mut Dots, b: &Aabb, inner: f32) {
        let (x0, y0, x1, y1) = self.dot_box(b);
        let rx = (x1 - x0) as f32 / 2.0;
        let ry = (y1 - y0) as f32 / 2.0;
        let cx = x0 as f32 + rx;
        let cy = y0 as f32 + ry;
        for by in y0..y1 {
            for bx in x0..x1 {
                let nx = (bx as f32 + 0.5 - cx) / rx;
                let ny = (by as f32 + 0.5 - cy) / ry;
                let d = nx * nx + ny * ny;
                if d <= 1.0 && d >= inner * inner {
                    self.set_dot(dots, bx, by);
                }
            }
        }
    }

    /// Upward-pointing wedge filling `b`.
    pub fn wedge(&self, dots: &mut Dots, b: &Aabb) {
        let (x0, y0, x1, y1) = self.dot_box(b);
        let rows = (y1 - y0).max(1) as f32;
        let half = (x1 - x0) as f32 / 2.0;
        let mid = x0 as f32 + half;
        for by in y0..y1 {
            let spread = half * (by - y0 + 1) as f32 / rows;
            let from = (mid - spread).floor() as i32;
            let to = (mid + spread).ceil() as i32;
            for bx in from..to {
                self.set_dot(dots, bx, by);
            }
        }
    }

    pub fn stamp(&mut self, dots: &Dots, color: Color, bold: bool) {
        for (&(cx, cy), &bits) in dots {
            if cx < self.w && cy < self.h && bits != 0 {
                let ch = char::from_u32(0x2800 + bits as u32).unwrap_or(' ');
                let mut style = Style::default().fg(color).bg(self.bg);
                if bold {
                    style = style.add_modifier(Modifier::BOLD);
                }
                self.grid[cy][cx] = (ch, style);
            }
        }
    }

    pub fn into_lines(self) -> Vec<Line<'static>> {
        self.grid
            .into_iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .into_iter()
                    .map(|(ch, style)| Span::styled(String::from(ch), style))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cell_is_all_eight_dots() {
        let mut canvas = Canvas::new(1, 1, 2.0, 4.0, Color::Black);
        let mut dots = Dots::new();
        canvas.fill_rect(&mut dots, &Aabb::new(0.0, 0.0, 2.0, 4.0));
        assert_eq!(dots.get(&(0, 0)), Some(&0xFF));

        canvas.stamp(&dots, Color::White, false);
        let lines = canvas.into_lines();
        assert_eq!(lines[0].spans[0].content, "\u{28FF}");
    }

    #[test]
    fn offscreen_dots_are_dropped() {
        let canvas = Canvas::new(4, 4, 8.0, 16.0, Color::Black);
        let mut dots = Dots::new();
        canvas.fill_rect(&mut dots, &Aabb::new(-50.0, -50.0, 10.0, 10.0));
        canvas.ellipse(&mut dots, &Aabb::new(100.0, 100.0, 10.0, 10.0), 0.0);
        assert!(dots.is_empty());
    }
}
