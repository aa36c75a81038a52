//! Ready-made styles.

mod font;
mod verbose;

pub use font::font;
pub use verbose::verbose;
