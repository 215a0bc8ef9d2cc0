#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod preferences;
pub mod service;
pub mod statistics;
pub mod units;
pub mod workout;

pub use error::*;
pub use preferences::*;
pub use service::*;
pub use statistics::*;
pub use units::*;
pub use workout::*;
