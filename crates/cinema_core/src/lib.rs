//! Core data types for the Cinema script narration bot.
//!
//! A [`Movie`] is an ordered list of [`Scene`]s, each holding an intro line,
//! a table of actor colors and the dialogue [`Line`]s in script order.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod color;
mod line;
mod movie;
mod scene;
mod telemetry;
mod title;

pub use color::Color;
pub use line::Line;
pub use movie::Movie;
pub use scene::Scene;
pub use telemetry::init_tracing;
pub use title::movie_title;
