//! Shape generation and outline construction.

mod outline;
mod shapes;

pub use outline::build_path;
pub use shapes::{
    generate, generate_shapes, layout_table, RandomSource, RngSource, SeededSource,
    SequenceSource, ThreadSource,
};
