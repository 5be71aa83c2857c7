pub mod error;
pub mod language;
pub mod model;
pub mod service;
pub mod traits;
