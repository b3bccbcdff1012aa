use thiserror::Error;

/// Failure kinds raised by the resolvers. They travel inside `anyhow::Error`, callers that need
///  to tell them apart use `downcast_ref::<DeptoolError>()`.
///
/// NB: a missing catalog bucket or additional resource is not an error - lookups return an
///  empty bucket or `None` for it
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeptoolError {
    #[error("invalid Jmix version {0:?}: version should be in format x.y.z")]
    InvalidVersionFormat(String),

    #[error("unable to parse maven coordinates {0:?}: expected group:artifact[:version]")]
    InvalidCoordinateFormat(String),

    #[error("unknown subscription plan {0:?}")]
    UnknownSubscriptionPlan(String),

    #[error("unknown dependency scope {0:?}")]
    UnknownDependencyScope(String),

    #[error("dependency catalog {key:?} is malformed: {reason}")]
    InvalidCatalog {
        key: String,
        reason: String,
    },
}
