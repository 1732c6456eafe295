//! Styling-configuration schema: tokens, theme variants, and build plugins.
//!
//! Configurations support multiple theme variants (e.g., dark and light
//! modes) derived from named base palettes, with declared order preserved
//! throughout and determining precedence on conflict.

mod schema;
pub use schema::*;

mod deserializers;

mod kinds;
pub use kinds::*;

mod resolve;
pub use resolve::*;

mod lint;
pub use lint::*;
