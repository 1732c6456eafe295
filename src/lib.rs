pub mod config;

mod utils;
pub use utils::{Length, ParseColorError, ParseLengthError, Rgba, rgb_a};

mod assets;
pub use assets::*;
