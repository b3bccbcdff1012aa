pub mod additional;
pub mod catalog;
pub mod resolver;
pub mod scope;
pub mod subscription_plan;

pub use additional::{AdditionalDependencyFile, AdditionalDependencyType, AdditionalResourceResolver};
pub use catalog::{CatalogBucket, DependencyCatalogLoader, DependencyEntry};
pub use resolver::{DependencyResolver, ResolvedDependencies};
pub use scope::DependencyScope;
pub use subscription_plan::SubscriptionPlan;
