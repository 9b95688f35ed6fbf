/// A malformed or missing required query parameter.
///
/// Raised before any query text is rendered and before any network request is
/// issued, so a failing call never partially executes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for query parameter `{parameter}`")]
pub struct InvalidArgument {
    parameter: &'static str,
}

impl InvalidArgument {
    pub fn new(parameter: &'static str) -> Self {
        Self { parameter }
    }

    /// The name of the offending parameter.
    pub fn parameter(&self) -> &'static str {
        self.parameter
    }
}
