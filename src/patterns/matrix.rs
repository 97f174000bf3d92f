//! Matrix-style digital rain.

use crate::config::Quality;
use crate::patterns::{FrameContext, Pattern};
use crate::rendering::cell::Cell;
use crate::rendering::display::{Display, Size};
use crate::rendering::renderer::Renderer;
use crate::seeds::Seeds;
use rand::Rng;
use rand::rngs::StdRng;

const GLYPHS: &[char] = &[
    'ｱ', 'ｲ', 'ｳ', 'ｴ', 'ｵ', 'ｶ', 'ｷ', 'ｸ', 'ｹ', 'ｺ', 'ｻ', 'ｼ', 'ｽ', 'ｾ', 'ｿ', 'ﾀ', 'ﾁ', 'ﾂ',
    'ﾃ', 'ﾄ', '0', '1', '2', '3', '4', '5', '7', '8', '9', 'Z', ':', '.', '=', '*', '+', '<',
    '>', '|',
];

/// Fraction of glyphs swapped per second.
const FLICKER_RATE: f64 = 0.6;

#[derive(Clone, Debug, PartialEq)]
struct Stream {
    /// Row of the leading glyph; fractional while falling.
    head: f64,
    /// Rows per second.
    speed: f64,
    length: usize,
    /// Seconds until the stream starts falling.
    delay: f64,
}

pub struct MatrixRain {
    streams: Vec<Stream>,
    /// Glyph shown at each position whenever a stream passes over it.
    glyphs: Display<char>,
    /// Only every `spacing`th column carries a stream.
    spacing: usize,
    height: usize,
    rng: StdRng,
}

impl MatrixRain {
    pub fn new(size: Size, quality: Quality, seeds: &Seeds) -> Self {
        let mut rain = Self {
            streams: Vec::new(),
            glyphs: Display::new(Size::default(), ' '),
            spacing: if quality == Quality::Low { 2 } else { 1 },
            height: size.height(),
            rng: seeds.rng_for("matrix"),
        };
        rain.on_resize(size);
        rain
    }

    fn new_stream(rng: &mut StdRng, height: usize) -> Stream {
        let max_len = (height / 2).max(4);
        Stream {
            head: 0.0,
            speed: rng.gen_range(8.0..28.0),
            length: rng.gen_range(3..=max_len),
            delay: rng.gen_range(0.0..2.5),
        }
    }

    fn random_glyph(rng: &mut StdRng) -> char {
        GLYPHS[rng.gen_range(0..GLYPHS.len())]
    }

    fn flicker(&mut self, dt: f64) {
        let size = self.glyphs.size();
        let swaps = (size.area() as f64 * FLICKER_RATE * dt).ceil() as usize;
        for _ in 0..swaps {
            let x = self.rng.gen_range(0..size.width()) as i64;
            let y = self.rng.gen_range(0..size.height()) as i64;
            let glyph = Self::random_glyph(&mut self.rng);
            self.glyphs.set(x, y, glyph).ok();
        }
    }
}

impl Pattern for MatrixRain {
    fn name(&self) -> &'static str {
        "matrix"
    }

    fn on_resize(&mut self, size: Size) {
        self.height = size.height();
        let columns = size.width().div_ceil(self.spacing);
        let rng = &mut self.rng;
        self.streams = (0..columns)
            .map(|_| {
                let mut stream = Self::new_stream(rng, size.height());
                // start somewhere mid-fall so the screen is not empty at first
                stream.head = rng.gen_range(0.0..=size.height() as f64);
                stream
            })
            .collect();

        self.glyphs = Display::new(size, ' ');
        let mut fresh = Vec::with_capacity(size.area());
        fresh.extend((0..size.area()).map(|_| Self::random_glyph(rng)));
        for (idx, glyph) in fresh.into_iter().enumerate() {
            let (x, y) = ((idx % size.width()) as i64, (idx / size.width()) as i64);
            self.glyphs.set(x, y, glyph).ok();
        }
    }

    fn tick(&mut self, renderer: &mut dyn Renderer, ctx: &FrameContext) {
        let dt = ctx.time.dt;
        if self.glyphs.size().area() > 0 {
            self.flicker(dt);
        }

        let head_color = ctx.theme.color_at(1.0);
        for (column, stream) in self.streams.iter_mut().enumerate() {
            if stream.delay > 0.0 {
                stream.delay -= dt;
                continue;
            }
            stream.head += stream.speed * dt;
            if stream.head - stream.length as f64 > self.height as f64 {
                *stream = Self::new_stream(&mut self.rng, self.height);
                continue;
            }

            let x = (column * self.spacing) as i64;
            let head = stream.head.floor() as i64;
            for i in 0..stream.length {
                let y = head - i as i64;
                let Some(&glyph) = self.glyphs.get(x, y) else {
                    continue;
                };
                let cell = if i == 0 {
                    Cell::new(glyph).with_color(head_color).with_bold(true)
                } else {
                    let fade = 1.0 - i as f64 / stream.length as f64;
                    Cell::new(glyph).with_color(ctx.theme.color_at(fade * 0.85))
                };
                renderer.set_cell(x, y, cell).ok();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mouse::MouseInfo;
    use crate::patterns::testing;

    #[test]
    fn test_one_stream_per_column() {
        let seeds = Seeds::new(2);
        let high = MatrixRain::new(Size::new(33, 10), Quality::High, &seeds);
        assert_eq!(high.streams.len(), 33);
        let low = MatrixRain::new(Size::new(33, 10), Quality::Low, &seeds);
        assert_eq!(low.streams.len(), 17);
        assert!(low.glyphs.as_slice().iter().all(|c| *c != ' '));
    }

    #[test]
    fn test_rain_falls_within_bounds() {
        let seeds = Seeds::new(4);
        let size = Size::new(20, 15);
        let mut rain = MatrixRain::new(size, Quality::Medium, &seeds);
        let buffer = testing::run(&mut rain, size, 60, &MouseInfo::default());
        assert!(testing::non_blank(&buffer) > 0);
        assert_eq!(buffer.rejected_writes(), 0);
    }

    #[test]
    fn test_heads_are_bold() {
        let seeds = Seeds::new(4);
        let size = Size::new(5, 30);
        let mut rain = MatrixRain::new(size, Quality::High, &seeds);
        for stream in rain.streams.iter_mut() {
            stream.head = 10.0;
            stream.delay = 0.0;
            stream.speed = 0.0;
        }
        let buffer = testing::run(&mut rain, size, 1, &MouseInfo::default());
        for x in 0..5 {
            assert_eq!(buffer.get_cell(x, 10).and_then(|c| c.bold), Some(true));
        }
    }
}
