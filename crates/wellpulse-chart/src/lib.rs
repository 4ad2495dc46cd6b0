//! PNG rendering of regional sentiment series
//!
//! Two chart kinds share one dark dashboard theme:
//! - trend: one line per region across the months of a year
//! - comparison: one bar per region at its yearly average

mod canvas;
mod error;
mod font;
mod render;
pub mod theme;

pub use canvas::Canvas;
pub use error::RenderError;
pub use render::{ChartKind, ChartRenderer};
