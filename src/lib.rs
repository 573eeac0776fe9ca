pub mod app;
pub mod error;
pub mod input;
pub mod logging;
pub mod render;

pub use error::AppError;
