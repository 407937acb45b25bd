mod app;
mod config;
mod data;
mod http;
mod render;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult, ErrorKind};
pub use config::ConfigError;
pub use data::DataError;
pub use http::HttpError;
pub use render::RenderError;
pub use validation::ValidationError;
