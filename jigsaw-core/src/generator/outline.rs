//! Piece outline construction.
//!
//! The outline of a `width x height` cell starts at its top-left corner and
//! runs clockwise on screen: top left to right, right top to bottom, bottom
//! right to left, left bottom to top. A nonzero edge leaves the straight line
//! at `mid - tab`, bulges through two control points `code * 1.5 * tab` along
//! the edge's outward normal, and rejoins at `mid + tab`. So `+1` always
//! protrudes and `-1` always recedes, and a shared edge traced by two
//! neighbors uses the same control points.

use crate::config::BULGE_FACTOR;
use crate::model::{EdgeCode, EdgeLayout, PiecePath, Point};

fn bulge(code: EdgeCode, tab_size: f64) -> f64 {
    code.value() as f64 * tab_size * BULGE_FACTOR
}

/// Build the closed outline of one cell with its top-left at the origin.
///
/// Pure function of its inputs. Callers translate the result by
/// `tab_size + margin` to place it inside a padded bitmap.
pub fn build_path(width: f64, height: f64, tab_size: f64, layout: &EdgeLayout) -> PiecePath {
    let (w, h, tab) = (width, height, tab_size);
    let mut path = PiecePath::new(Point::ZERO);

    // Top: (0,0) -> (w,0), outward is -y
    if !layout.top.is_flat() {
        let y = -bulge(layout.top, tab);
        path.line_to(Point::new(w / 2.0 - tab, 0.0));
        path.cubic_to(
            Point::new(w / 2.0 - tab, y),
            Point::new(w / 2.0 + tab, y),
            Point::new(w / 2.0 + tab, 0.0),
        );
    }
    path.line_to(Point::new(w, 0.0));

    // Right: (w,0) -> (w,h), outward is +x
    if !layout.right.is_flat() {
        let x = w + bulge(layout.right, tab);
        path.line_to(Point::new(w, h / 2.0 - tab));
        path.cubic_to(
            Point::new(x, h / 2.0 - tab),
            Point::new(x, h / 2.0 + tab),
            Point::new(w, h / 2.0 + tab),
        );
    }
    path.line_to(Point::new(w, h));

    // Bottom: (w,h) -> (0,h), outward is +y
    if !layout.bottom.is_flat() {
        let y = h + bulge(layout.bottom, tab);
        path.line_to(Point::new(w / 2.0 + tab, h));
        path.cubic_to(
            Point::new(w / 2.0 + tab, y),
            Point::new(w / 2.0 - tab, y),
            Point::new(w / 2.0 - tab, h),
        );
    }
    path.line_to(Point::new(0.0, h));

    // Left: (0,h) -> (0,0), outward is -x
    if !layout.left.is_flat() {
        let x = -bulge(layout.left, tab);
        path.line_to(Point::new(0.0, h / 2.0 + tab));
        path.cubic_to(
            Point::new(x, h / 2.0 + tab),
            Point::new(x, h / 2.0 - tab),
            Point::new(0.0, h / 2.0 - tab),
        );
    }
    path.line_to(Point::ZERO);

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Rect, Segment};
    use pretty_assertions::assert_eq;

    fn cubics(path: &PiecePath) -> Vec<(Point, Point, Point)> {
        path.segments
            .iter()
            .filter_map(|s| match *s {
                Segment::Cubic { ctrl1, ctrl2, to } => Some((ctrl1, ctrl2, to)),
                Segment::Line { .. } => None,
            })
            .collect()
    }

    // ==================== Shape tests ====================

    #[test]
    fn test_flat_layout_is_rectangle() {
        let path = build_path(100.0, 80.0, 20.0, &EdgeLayout::FLAT);
        assert!(path.is_closed());
        assert_eq!(path.bulge_count(), 0);
        assert_eq!(path.segments.len(), 4);
        assert_eq!(path.bounding_box(), Rect::new(0.0, 0.0, 100.0, 80.0));
    }

    #[test]
    fn test_all_tabs_protrude() {
        let layout = EdgeLayout::new(EdgeCode::Tab, EdgeCode::Tab, EdgeCode::Tab, EdgeCode::Tab);
        let path = build_path(100.0, 100.0, 25.0, &layout);
        assert!(path.is_closed());
        assert_eq!(path.bulge_count(), 4);
        // 1.5 * 25 = 37.5 on every side
        assert_eq!(path.bounding_box(), Rect::new(-37.5, -37.5, 175.0, 175.0));
    }

    #[test]
    fn test_all_blanks_recede() {
        let layout = EdgeLayout::new(
            EdgeCode::Blank,
            EdgeCode::Blank,
            EdgeCode::Blank,
            EdgeCode::Blank,
        );
        let path = build_path(100.0, 100.0, 25.0, &layout);
        assert_eq!(path.bounding_box(), Rect::new(0.0, 0.0, 100.0, 100.0));
        let controls = cubics(&path);
        assert_eq!(controls[0].0, Point::new(25.0, 37.5));
        assert_eq!(controls[1].0, Point::new(62.5, 25.0));
        assert_eq!(controls[2].0, Point::new(75.0, 62.5));
        assert_eq!(controls[3].0, Point::new(37.5, 75.0));
    }

    #[test]
    fn test_right_tab_matches_neighbor_left_blank() {
        let (w, h, tab) = (100.0, 100.0, 25.0);
        let left_cell = EdgeLayout::new(
            EdgeCode::Flat,
            EdgeCode::Tab,
            EdgeCode::Flat,
            EdgeCode::Flat,
        );
        let right_cell = EdgeLayout::new(
            EdgeCode::Flat,
            EdgeCode::Flat,
            EdgeCode::Flat,
            EdgeCode::Blank,
        );

        let a = cubics(&build_path(w, h, tab, &left_cell));
        // Neighbor sits one piece width to the right in board space.
        let b = cubics(&build_path(w, h, tab, &right_cell).translated(w, 0.0));

        // Traversed in opposite directions, so control points swap.
        assert_eq!(a[0].0, b[0].1);
        assert_eq!(a[0].1, b[0].0);
    }

    #[test]
    fn test_bottom_blank_matches_neighbor_top_tab() {
        let (w, h, tab) = (120.0, 90.0, 22.5);
        let upper = EdgeLayout::new(
            EdgeCode::Flat,
            EdgeCode::Flat,
            EdgeCode::Blank,
            EdgeCode::Flat,
        );
        let lower = EdgeLayout::new(EdgeCode::Tab, EdgeCode::Flat, EdgeCode::Flat, EdgeCode::Flat);

        let a = cubics(&build_path(w, h, tab, &upper));
        let b = cubics(&build_path(w, h, tab, &lower).translated(0.0, h));

        assert_eq!(a[0].0, b[0].1);
        assert_eq!(a[0].1, b[0].0);
        assert_eq!(a[0].2, b[0].2.offset(-2.0 * tab, 0.0));
    }

    #[test]
    fn test_is_pure() {
        let layout = EdgeLayout::new(
            EdgeCode::Flat,
            EdgeCode::Tab,
            EdgeCode::Blank,
            EdgeCode::Flat,
        );
        assert_eq!(
            build_path(64.0, 48.0, 12.0, &layout),
            build_path(64.0, 48.0, 12.0, &layout)
        );
    }
}
