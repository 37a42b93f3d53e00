pub mod gemini;
pub mod image;
pub mod style;
pub mod variation;

pub use gemini::*;
pub use image::*;
pub use style::*;
pub use variation::*;
