#![warn(clippy::pedantic)]

#[allow(clippy::module_name_repetitions)]
pub mod document;
pub mod memory;
