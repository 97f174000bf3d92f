//! Common utility functions.

/// Iterator over the grid coordinates of a rasterized line (Bresenham), both
/// endpoints included.
///
/// ```rust
/// use asciiwave::util::Line;
///
/// let points: Vec<_> = Line::new((0, 0), (3, 1)).collect();
/// assert_eq!(points, vec![(0, 0), (1, 0), (2, 1), (3, 1)]);
/// ```
#[derive(Clone, Debug)]
pub struct Line {
    x: i64,
    y: i64,
    end: (i64, i64),
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    done: bool,
}

impl Line {
    pub fn new((start_x, start_y): (i64, i64), end: (i64, i64)) -> Self {
        let dx = (end.0 - start_x).abs();
        let dy = (end.1 - start_y).abs();
        Self {
            x: start_x,
            y: start_y,
            end,
            dx,
            dy,
            sx: if start_x < end.0 { 1 } else { -1 },
            sy: if start_y < end.1 { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for Line {
    type Item = (i64, i64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let point = (self.x, self.y);
        if point == self.end {
            self.done = true;
            return Some(point);
        }
        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(point)
    }
}
