pub mod dependency;
pub mod error;
pub mod maven;
pub mod store;
pub mod version;
