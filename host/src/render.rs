use std::io::{self, Write};

use galaxy_raiders_core::field::{FieldSnapshot, SpaceObject};
use galaxy_raiders_core::{RenderSink, SpaceField};
use serde::Serialize;
use tracing::{info, warn};

pub struct NullRender;

impl RenderSink for NullRender {
    fn render(&mut self, _: u64, _: &SpaceField) {}
}

/// Logs a one-line field summary every `every` ticks.
#[derive(Debug)]
pub struct SummaryRender {
    every: u64,
    frames: u64,
    peak_asteroids: usize,
}

impl SummaryRender {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
            peak_asteroids: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn peak_asteroids(&self) -> usize {
        self.peak_asteroids
    }
}

impl RenderSink for SummaryRender {
    fn render(&mut self, tick: u64, field: &SpaceField) {
        self.frames += 1;
        self.peak_asteroids = self.peak_asteroids.max(field.asteroids().len());
        if tick % self.every != 0 {
            return;
        }

        let ship = field.ship().body();
        info!(
            tick,
            ship_x = ship.center.x,
            ship_y = ship.center.y,
            asteroids = field.asteroids().len(),
            missiles = field.missiles().len(),
            explosions = field.explosions().len(),
            "field"
        );
    }
}

#[derive(Serialize)]
struct Frame {
    tick: u64,
    #[serde(flatten)]
    field: FieldSnapshot,
}

/// Writes every `every`-th field snapshot as one JSON object per line.
///
/// The first write error stops further output and is returned by `finish`.
pub struct JsonLinesRender<W: Write> {
    out: W,
    every: u64,
    error: Option<io::Error>,
}

impl<W: Write> JsonLinesRender<W> {
    pub fn new(out: W, every: u64) -> Self {
        Self {
            out,
            every: every.max(1),
            error: None,
        }
    }

    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_frame(&mut self, frame: &Frame) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, frame)?;
        self.out.write_all(b"\n")
    }
}

impl<W: Write> RenderSink for JsonLinesRender<W> {
    fn render(&mut self, tick: u64, field: &SpaceField) {
        if self.error.is_some() || tick % self.every != 0 {
            return;
        }
        let frame = Frame {
            tick,
            field: field.snapshot(),
        };
        if let Err(e) = self.write_frame(&frame) {
            warn!(tick, "frame output stopped: {e}");
            self.error = Some(e);
        }
    }
}
