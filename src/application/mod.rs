pub mod credentials;
pub mod input;
pub mod orchestrator;
pub mod query;
pub mod registry;
