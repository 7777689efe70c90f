//! Edge codes and the per-cell edge layout.

use serde::{Deserialize, Serialize};

/// Signed code of one piece edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum EdgeCode {
    /// Receding notch (-1).
    Blank = -1,
    /// Straight edge (0), always used on the outer boundary.
    #[default]
    Flat = 0,
    /// Protruding bulge (+1).
    Tab = 1,
}

impl EdgeCode {
    /// Signed numeric value in {-1, 0, +1}.
    pub fn value(self) -> i8 {
        self as i8
    }

    /// The complementary code a neighbor must carry on the shared edge.
    pub fn mirror(self) -> Self {
        match self {
            EdgeCode::Blank => EdgeCode::Tab,
            EdgeCode::Flat => EdgeCode::Flat,
            EdgeCode::Tab => EdgeCode::Blank,
        }
    }

    pub fn is_flat(self) -> bool {
        self == EdgeCode::Flat
    }
}

impl From<EdgeCode> for i8 {
    fn from(code: EdgeCode) -> i8 {
        code.value()
    }
}

impl TryFrom<i8> for EdgeCode {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(EdgeCode::Blank),
            0 => Ok(EdgeCode::Flat),
            1 => Ok(EdgeCode::Tab),
            other => Err(format!("edge code must be -1, 0 or 1, got {other}")),
        }
    }
}

/// One of the four sides of a cell, in path traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Unit outward normal in screen space (y grows downward).
    pub fn outward_normal(self) -> (f64, f64) {
        match self {
            Side::Top => (0.0, -1.0),
            Side::Right => (1.0, 0.0),
            Side::Bottom => (0.0, 1.0),
            Side::Left => (-1.0, 0.0),
        }
    }

    /// The side a neighbor shares with this one.
    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }
}

/// Edge codes of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeLayout {
    pub top: EdgeCode,
    pub right: EdgeCode,
    pub bottom: EdgeCode,
    pub left: EdgeCode,
}

impl EdgeLayout {
    /// A cell with four straight edges (the only layout of a 1x1 grid).
    pub const FLAT: EdgeLayout = EdgeLayout {
        top: EdgeCode::Flat,
        right: EdgeCode::Flat,
        bottom: EdgeCode::Flat,
        left: EdgeCode::Flat,
    };

    pub fn new(top: EdgeCode, right: EdgeCode, bottom: EdgeCode, left: EdgeCode) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Code on the given side.
    pub fn edge(&self, side: Side) -> EdgeCode {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    /// Numeric codes as `[top, right, bottom, left]`.
    pub fn codes(&self) -> [i8; 4] {
        [
            self.top.value(),
            self.right.value(),
            self.bottom.value(),
            self.left.value(),
        ]
    }
}

impl std::fmt::Display for EdgeLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sym = |c: EdgeCode| match c {
            EdgeCode::Blank => '-',
            EdgeCode::Flat => '0',
            EdgeCode::Tab => '+',
        };
        write!(
            f,
            "{}{}{}{}",
            sym(self.top),
            sym(self.right),
            sym(self.bottom),
            sym(self.left)
        )
    }
}
