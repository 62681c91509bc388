// One drawing session: the paper, the optional reference picture, and the tool
// the child is holding.
// The window layer feeds pointer events in raster coordinates; the session decides
// whether that means a bucket fill or a brush stroke and raises a redraw flag
// whenever pixels changed.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::brush::{self, Ink, MAX_BRUSH, MIN_BRUSH};
use crate::color::{Rgb, Rgba};
use crate::export;
use crate::fill::{flood_fill, FillReport};
use crate::reference::{ReferenceImage, REFERENCE_OPACITY};
use crate::surface::{Raster, Surface};
use crate::types::Stamp;

/// Tolerance slider range (per channel).
pub const MAX_TOLERANCE: u8 = 100;
pub const DEFAULT_TOLERANCE: u8 = 20;
pub const DEFAULT_BRUSH: u32 = 5;

const PAPER: Rgba = Rgba::new(255, 255, 255, 255);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tool {
    #[default]
    Brush,
    Fill,
    Eraser,
}

impl Tool {
    /// Short uppercase label for the HUD.
    pub fn label(self) -> &'static str {
        match self {
            Tool::Brush => "BRUSH",
            Tool::Fill => "FILL",
            Tool::Eraser => "ERASER",
        }
    }
}

pub struct DrawingSession {
    raster: Raster,
    reference: Option<ReferenceImage>,
    title: String,
    tool: Tool,
    color: Rgb,
    brush_size: u32,
    stamp: Stamp,
    tolerance: u8,
    last_point: Option<(i64, i64)>, // Some while a stroke is in progress
    dirty: bool,
}

impl DrawingSession {
    /// Fresh white paper of the given size, with the reference picture stamped on.
    pub fn new(width: usize, height: usize, title: impl Into<String>, reference: Option<ReferenceImage>) -> Self {
        let mut session = Self {
            raster: Raster::blank(width, height),
            reference,
            title: title.into(),
            tool: Tool::default(),
            color: Rgb::BLACK,
            brush_size: DEFAULT_BRUSH,
            stamp: Stamp::round(DEFAULT_BRUSH),
            tolerance: DEFAULT_TOLERANCE,
            last_point: None,
            dirty: true,
        };
        session.stamp_reference();
        session
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    pub fn tolerance(&self) -> u8 {
        self.tolerance
    }

    pub fn is_drawing(&self) -> bool {
        self.last_point.is_some()
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            debug!(?tool, "tool selected");
        }
        self.pointer_up();
        self.tool = tool;
    }

    pub fn set_color(&mut self, color: Rgb) {
        debug!(%color, "color selected");
        self.color = color;
    }

    /// Clamped to [`MIN_BRUSH`]..=[`MAX_BRUSH`].
    pub fn set_brush_size(&mut self, size: u32) {
        let size = size.clamp(MIN_BRUSH, MAX_BRUSH);
        if size != self.brush_size {
            self.brush_size = size;
            self.stamp = Stamp::round(size);
        }
    }

    /// Clamped to 0..=[`MAX_TOLERANCE`].
    pub fn set_tolerance(&mut self, tolerance: u8) {
        self.tolerance = tolerance.min(MAX_TOLERANCE);
    }

    /// Click/tap in raster space. Fill tool: one bucket fill. Brush/eraser: start a stroke.
    pub fn pointer_down(&mut self, x: i64, y: i64) -> Option<FillReport> {
        match self.tool {
            Tool::Fill => {
                let report = flood_fill(&mut self.raster, x, y, self.color, self.tolerance);
                if report.changed() {
                    self.dirty = true;
                }
                Some(report)
            }
            Tool::Brush | Tool::Eraser => {
                if !self.raster.contains(x, y) {
                    return None;
                }
                let ink = self.ink();
                brush::dab(&mut self.raster, x, y, &self.stamp, ink);
                self.last_point = Some((x, y));
                self.dirty = true;
                None
            }
        }
    }

    /// Drag while the button is held; ignored when no stroke is in progress.
    pub fn pointer_move(&mut self, x: i64, y: i64) {
        let Some(from) = self.last_point else { return };
        if from == (x, y) {
            return;
        }
        let ink = self.ink();
        brush::stroke(&mut self.raster, from, (x, y), &self.stamp, ink);
        self.last_point = Some((x, y));
        self.dirty = true;
    }

    pub fn pointer_up(&mut self) {
        self.last_point = None;
    }

    /// Clear to white paper and stamp the reference picture again.
    pub fn reset(&mut self) {
        self.pointer_up();
        self.raster.clear(PAPER);
        self.stamp_reference();
        self.dirty = true;
        info!("canvas reset");
    }

    /// Follow a window resize: keep what's drawn anchored top-left, pad with paper.
    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) == (self.raster.width(), self.raster.height()) {
            return;
        }
        debug!(width, height, "canvas resized");
        self.raster = self.raster.resized(width, height, PAPER);
        self.dirty = true;
    }

    /// Write `<title>.png` into `dir`.
    pub fn save_png(&self, dir: &Path) -> crate::Result<PathBuf> {
        export::save_titled(&self.raster, dir, &self.title)
    }

    /// Returns whether a redraw was requested since the last call, and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn ink(&self) -> Ink {
        match self.tool {
            Tool::Eraser => Ink::Erase,
            _ => Ink::Paint(self.color),
        }
    }

    fn stamp_reference(&mut self) {
        if let Some(reference) = &self.reference {
            reference.stamp(&mut self.raster, REFERENCE_OPACITY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_drawing_page() {
        let mut s = DrawingSession::new(10, 10, "drawing", None);
        assert_eq!(s.tool(), Tool::Brush);
        assert_eq!(s.color(), Rgb::BLACK);
        assert_eq!(s.brush_size(), 5);
        assert_eq!(s.tolerance(), 20);
        assert!(s.take_dirty());
    }

    #[test]
    fn sliders_clamp() {
        let mut s = DrawingSession::new(4, 4, "t", None);
        s.set_brush_size(0);
        assert_eq!(s.brush_size(), MIN_BRUSH);
        s.set_brush_size(500);
        assert_eq!(s.brush_size(), MAX_BRUSH);
        s.set_tolerance(255);
        assert_eq!(s.tolerance(), MAX_TOLERANCE);
    }

    #[test]
    fn fill_tool_runs_the_bucket() {
        let mut s = DrawingSession::new(4, 4, "t", None);
        s.take_dirty();
        s.set_tool(Tool::Fill);
        s.set_color(Rgb::RED);
        let report = s.pointer_down(1, 1).unwrap();
        assert_eq!(report.filled, 16);
        assert!(s.take_dirty());
        assert!(!s.is_drawing());

        // Second click on the same color: nothing changes, no redraw requested.
        assert!(!s.pointer_down(1, 1).unwrap().changed());
        assert!(!s.take_dirty());
    }

    #[test]
    fn brush_stroke_follows_the_pointer() {
        let mut s = DrawingSession::new(10, 10, "t", None);
        s.set_brush_size(1);
        s.set_color(Rgb::RED);
        assert!(s.pointer_down(0, 5).is_none());
        assert!(s.is_drawing());
        s.pointer_move(9, 5);
        s.pointer_up();
        for x in 0..10 {
            assert_eq!(s.raster().pixel(x, 5), Some(Rgb::RED.opaque()));
        }
        // Moving without the button held draws nothing.
        s.pointer_move(0, 0);
        assert_eq!(s.raster().pixel(0, 0), Some(PAPER));
    }

    #[test]
    fn dragging_far_off_canvas_only_paints_the_visible_part() {
        let mut s = DrawingSession::new(10, 10, "t", None);
        s.set_brush_size(1);
        s.pointer_down(5, 5);
        s.pointer_move(i64::MAX, 5);
        s.pointer_move(20_000_000, 5);
        s.pointer_move(i64::MIN, i64::MIN);
        s.pointer_up();
        for x in 5..10 {
            assert_eq!(s.raster().pixel(x, 5), Some(Rgb::BLACK.opaque()));
        }
        assert_eq!(s.raster().pixel(0, 9), Some(PAPER));
    }

    #[test]
    fn eraser_hole_stops_the_bucket() {
        let mut s = DrawingSession::new(5, 1, "t", None);
        s.set_brush_size(1);
        s.set_tool(Tool::Eraser);
        s.pointer_down(2, 0);
        s.pointer_up();
        s.set_tool(Tool::Fill);
        s.set_color(Rgb::RED);
        s.set_tolerance(MAX_TOLERANCE);
        let report = s.pointer_down(0, 0).unwrap();
        assert_eq!(report.filled, 2);
        assert_eq!(s.raster().pixel(2, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn reset_brings_back_white_paper() {
        let mut s = DrawingSession::new(3, 3, "t", None);
        s.set_tool(Tool::Fill);
        s.set_color(Rgb::RED);
        s.pointer_down(0, 0);
        s.reset();
        assert_eq!(s.raster(), &Raster::blank(3, 3));
    }

    #[test]
    fn resize_keeps_the_drawing() {
        let mut s = DrawingSession::new(2, 2, "t", None);
        s.set_brush_size(1);
        s.pointer_down(1, 1);
        s.pointer_up();
        s.resize(4, 3);
        assert_eq!((s.raster().width(), s.raster().height()), (4, 3));
        assert_eq!(s.raster().pixel(1, 1), Some(Rgb::BLACK.opaque()));
        assert_eq!(s.raster().pixel(3, 2), Some(PAPER));
    }
}
