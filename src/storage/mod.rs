mod files;

pub use files::*;
