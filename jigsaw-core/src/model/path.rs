//! Closed piece outline made of straight runs and cubic bulges.

use serde::{Deserialize, Serialize};

use crate::config::float_cmp::approx_eq;
use crate::model::{Point, Rect};

/// One drawing command after the initial move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    /// Straight run to `to`.
    Line { to: Point },
    /// Cubic Bezier to `to` through two control points.
    Cubic { ctrl1: Point, ctrl2: Point, to: Point },
}

impl Segment {
    /// End point of the segment.
    pub fn end(&self) -> Point {
        match *self {
            Segment::Line { to } => to,
            Segment::Cubic { to, .. } => to,
        }
    }

    fn translated(&self, dx: f64, dy: f64) -> Segment {
        match *self {
            Segment::Line { to } => Segment::Line {
                to: to.offset(dx, dy),
            },
            Segment::Cubic { ctrl1, ctrl2, to } => Segment::Cubic {
                ctrl1: ctrl1.offset(dx, dy),
                ctrl2: ctrl2.offset(dx, dy),
                to: to.offset(dx, dy),
            },
        }
    }
}

/// Outline of one piece: a start point and the segments that follow it.
///
/// A finished outline always ends where it starts; renderers close it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiecePath {
    pub start: Point,
    pub segments: Vec<Segment>,
}

impl PiecePath {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            segments: Vec::new(),
        }
    }

    pub fn line_to(&mut self, to: Point) {
        self.segments.push(Segment::Line { to });
    }

    pub fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.segments.push(Segment::Cubic { ctrl1, ctrl2, to });
    }

    /// Current pen position.
    pub fn end_point(&self) -> Point {
        self.segments.last().map_or(self.start, Segment::end)
    }

    /// Check if the outline returns to its start.
    pub fn is_closed(&self) -> bool {
        let end = self.end_point();
        !self.segments.is_empty()
            && approx_eq(end.x, self.start.x)
            && approx_eq(end.y, self.start.y)
    }

    /// Number of cubic bulges on the outline.
    pub fn bulge_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Cubic { .. }))
            .count()
    }

    /// Copy of the outline shifted by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> PiecePath {
        PiecePath {
            start: self.start.offset(dx, dy),
            segments: self.segments.iter().map(|s| s.translated(dx, dy)).collect(),
        }
    }

    /// Bounding box of every point, control points included.
    pub fn bounding_box(&self) -> Rect {
        let mut min_x = self.start.x;
        let mut min_y = self.start.y;
        let mut max_x = self.start.x;
        let mut max_y = self.start.y;

        let mut include = |p: Point| {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        };

        for segment in &self.segments {
            match *segment {
                Segment::Line { to } => include(to),
                Segment::Cubic { ctrl1, ctrl2, to } => {
                    include(ctrl1);
                    include(ctrl2);
                    include(to);
                }
            }
        }

        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Convert into a renderable `tiny_skia` path.
    ///
    /// Returns `None` when the outline has no area to speak of.
    pub fn to_skia(&self) -> Option<tiny_skia::Path> {
        let mut pb = tiny_skia::PathBuilder::new();
        pb.move_to(self.start.x as f32, self.start.y as f32);
        for segment in &self.segments {
            match *segment {
                Segment::Line { to } => pb.line_to(to.x as f32, to.y as f32),
                Segment::Cubic { ctrl1, ctrl2, to } => pb.cubic_to(
                    ctrl1.x as f32,
                    ctrl1.y as f32,
                    ctrl2.x as f32,
                    ctrl2.y as f32,
                    to.x as f32,
                    to.y as f32,
                ),
            }
        }
        pb.close();
        pb.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> PiecePath {
        let mut path = PiecePath::new(Point::ZERO);
        path.line_to(Point::new(10.0, 0.0));
        path.cubic_to(
            Point::new(14.0, 2.0),
            Point::new(14.0, 8.0),
            Point::new(10.0, 10.0),
        );
        path.line_to(Point::new(0.0, 10.0));
        path.line_to(Point::ZERO);
        path
    }

    #[test]
    fn test_is_closed() {
        assert!(square().is_closed());
        let mut open = PiecePath::new(Point::ZERO);
        assert!(!open.is_closed());
        open.line_to(Point::new(1.0, 1.0));
        assert!(!open.is_closed());
    }

    #[test]
    fn test_bounding_box_includes_control_points() {
        let bbox = square().bounding_box();
        assert_eq!(bbox, Rect::new(0.0, 0.0, 14.0, 10.0));
    }

    #[test]
    fn test_translated() {
        let moved = square().translated(5.0, -2.0);
        assert_eq!(moved.start, Point::new(5.0, -2.0));
        assert_eq!(moved.bounding_box(), Rect::new(5.0, -2.0, 14.0, 10.0));
        assert_eq!(moved.bulge_count(), 1);
    }

    #[test]
    fn test_to_skia_bounds() {
        let path = square().to_skia().unwrap();
        let bounds = path.bounds();
        assert_eq!(bounds.left(), 0.0);
        assert_eq!(bounds.top(), 0.0);
        assert_eq!(bounds.bottom(), 10.0);
    }
}
