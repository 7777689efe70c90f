//! Edge layout generation with an injectable random source.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::Result;
use crate::model::{EdgeCode, EdgeLayout, Grid};

/// Source of coin flips and unit-interval samples.
pub trait RandomSource {
    /// A fair coin flip.
    fn next_bit(&mut self) -> bool;

    /// A sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_bit(&mut self) -> bool {
        (**self).next_bit()
    }

    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

impl<S: RandomSource + ?Sized> RandomSource for Box<S> {
    fn next_bit(&mut self) -> bool {
        (**self).next_bit()
    }

    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Adapter from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

/// System-seeded source used by default.
pub type ThreadSource = RngSource<ThreadRng>;

/// Reproducible source for a fixed seed.
pub type SeededSource = RngSource<StdRng>;

impl ThreadSource {
    pub fn new() -> Self {
        RngSource(rand::rng())
    }
}

impl Default for ThreadSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SeededSource {
    pub fn seeded(seed: u64) -> Self {
        RngSource(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_bit(&mut self) -> bool {
        self.0.random_bool(0.5)
    }

    fn next_unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Replays fixed bits and units in a loop.
///
/// An empty bit list yields `true`; an empty unit list yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    bits: Vec<bool>,
    units: Vec<f64>,
    bit_pos: usize,
    unit_pos: usize,
}

impl SequenceSource {
    pub fn new(bits: Vec<bool>, units: Vec<f64>) -> Self {
        Self {
            bits,
            units,
            bit_pos: 0,
            unit_pos: 0,
        }
    }

    /// Only `true` coin flips, every unit sample `unit`.
    pub fn constant(unit: f64) -> Self {
        Self::new(vec![true], vec![unit])
    }
}

impl RandomSource for SequenceSource {
    fn next_bit(&mut self) -> bool {
        if self.bits.is_empty() {
            return true;
        }
        let bit = self.bits[self.bit_pos % self.bits.len()];
        self.bit_pos += 1;
        bit
    }

    fn next_unit(&mut self) -> f64 {
        if self.units.is_empty() {
            return 0.0;
        }
        let unit = self.units[self.unit_pos % self.units.len()];
        self.unit_pos += 1;
        unit
    }
}

fn coin(source: &mut dyn RandomSource) -> EdgeCode {
    if source.next_bit() {
        EdgeCode::Tab
    } else {
        EdgeCode::Blank
    }
}

/// Generate one edge layout per cell, row-major.
///
/// Only `right` and `bottom` of interior edges are drawn from `source`
/// (right first, then bottom, per cell). `top` and `left` are negations of
/// the already generated neighbor, and outer edges are flat.
pub fn generate_shapes(grid: Grid, source: &mut dyn RandomSource) -> Vec<EdgeLayout> {
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut layouts: Vec<EdgeLayout> = Vec::with_capacity(grid.len());

    for row in 0..rows {
        for col in 0..cols {
            let top = if row == 0 {
                EdgeCode::Flat
            } else {
                layouts[grid.index(row - 1, col)].bottom.mirror()
            };
            let right = if col == cols - 1 {
                EdgeCode::Flat
            } else {
                coin(source)
            };
            let bottom = if row == rows - 1 {
                EdgeCode::Flat
            } else {
                coin(source)
            };
            let left = if col == 0 {
                EdgeCode::Flat
            } else {
                layouts[grid.index(row, col - 1)].right.mirror()
            };
            layouts.push(EdgeLayout::new(top, right, bottom, left));
        }
    }

    debug!(rows, cols, "Generated {} edge layouts", layouts.len());
    layouts
}

/// Validate `rows x cols` and generate its layouts.
pub fn generate(
    rows: usize,
    cols: usize,
    source: &mut dyn RandomSource,
) -> Result<Vec<EdgeLayout>> {
    let grid = Grid::new(rows, cols)?;
    Ok(generate_shapes(grid, source))
}

/// Render layouts as a grid of `top right bottom left` symbols, one row per line.
pub fn layout_table(grid: Grid, layouts: &[EdgeLayout]) -> String {
    layouts
        .chunks(grid.cols())
        .map(|row| {
            row.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
