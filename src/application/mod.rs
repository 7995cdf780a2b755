// Application layer: the bank session and the reports it produces.

pub mod error;
pub mod logger;
pub mod reporting;
pub mod service;

pub use error::*;
pub use logger::*;
pub use service::*;
