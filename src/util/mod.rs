//! Small shared helpers: numeric coercion, calendar days, text rendering.

pub mod dates;
pub mod numbers;
pub mod render;
