//! Validation of generated edge layouts.

use crate::model::{EdgeLayout, Grid, Side};

/// Findings of a layout check. Warnings never fail it.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub passed: bool,
    pub warnings: Vec<String>,
    /// One entry per broken rule.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Nothing found yet.
    pub fn clean() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// A result that already failed with `message`.
    pub fn rejected(message: impl Into<String>) -> Self {
        let mut result = Self::clean();
        result.add_error(message);
        result
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.passed = false;
        self.errors.push(message.into());
    }

    /// Fold the findings of one cell into the board report.
    pub fn merge(&mut self, cell: ValidationResult) {
        self.passed &= cell.passed;
        self.warnings.extend(cell.warnings);
        self.errors.extend(cell.errors);
    }

    /// Number of broken rules.
    pub fn violations(&self) -> usize {
        self.errors.len()
    }
}

/// Validate a full set of layouts against the grid.
///
/// Errors: wrong cell count, a non-flat outer edge, or a shared edge whose
/// two sides are not mirror images. A flat interior edge still interlocks
/// and is only reported as a warning.
pub fn validate_layouts(grid: Grid, layouts: &[EdgeLayout]) -> ValidationResult {
    if layouts.len() != grid.len() {
        return ValidationResult::rejected(format!(
            "Expected {} layouts for a {}x{} grid, got {}",
            grid.len(),
            grid.rows(),
            grid.cols(),
            layouts.len()
        ));
    }

    let mut result = ValidationResult::clean();
    for (row, col) in grid.cells() {
        result.merge(validate_cell(grid, layouts, row, col));
    }
    result
}

fn validate_cell(grid: Grid, layouts: &[EdgeLayout], row: usize, col: usize) -> ValidationResult {
    let mut result = ValidationResult::clean();
    let index = grid.index(row, col);
    let cell = &layouts[index];

    for side in Side::ALL {
        let code = cell.edge(side);
        let neighbor = match side {
            Side::Top => row.checked_sub(1).map(|r| grid.index(r, col)),
            Side::Left => col.checked_sub(1).map(|c| grid.index(row, c)),
            Side::Bottom => grid.checked_index(row + 1, col),
            Side::Right => grid.checked_index(row, col + 1),
        };

        match neighbor {
            None if !code.is_flat() => {
                result.add_error(format!(
                    "Piece {} ({}, {}): outer {:?} edge is {}, expected 0",
                    index,
                    row,
                    col,
                    side,
                    code.value()
                ));
            }
            None => {}
            Some(other) => {
                let facing = layouts[other].edge(side.opposite());
                if facing != code.mirror() {
                    result.add_error(format!(
                        "Piece {} ({}, {}): {:?} edge {} does not mirror piece {} ({})",
                        index,
                        row,
                        col,
                        side,
                        code.value(),
                        other,
                        facing.value()
                    ));
                }
                // Each interior flat edge is reported once, by the cell left of or above it.
                if code.is_flat() && matches!(side, Side::Right | Side::Bottom) {
                    result.add_warning(format!(
                        "Piece {} ({}, {}): interior {:?} edge is flat",
                        index, row, col, side
                    ));
                }
            }
        }
    }

    result
}
