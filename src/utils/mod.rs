mod colors;
pub use colors::*;

mod length;
pub use length::*;
