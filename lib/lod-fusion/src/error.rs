use lod_fusion_client::ExecutorError;
use lod_fusion_model::InvalidArgument;

/// An error from direct, single-endpoint query execution.
///
/// Fan-out entry points never return [`QueryError::Execution`]: per-endpoint
/// failures are recorded in the aggregated result instead. Only the
/// single-endpoint helpers surface execution errors to the caller.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum QueryError {
    /// A malformed or missing required parameter.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
    /// The query could not be executed against the endpoint.
    #[error(transparent)]
    Execution(#[from] ExecutorError),
}
