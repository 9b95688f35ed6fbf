use async_trait::async_trait;
use lod_fusion_model::QuerySolution;
use sparesults::{QueryResultsFormat, QueryResultsParser, ReaderQueryResultsParserOutput};
use std::time::Duration;

/// Configuration for the HTTP executor.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// User-Agent header.
    pub user_agent: String,
    /// Accept header for SPARQL results.
    pub accept: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("lod-fusion/{}", env!("CARGO_PKG_VERSION")),
            accept: "application/sparql-results+json".to_owned(),
        }
    }
}

/// An error from query execution against a single endpoint.
///
/// The dispatcher treats every executor error as an opaque per-endpoint
/// failure; the variants exist for diagnostics only.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ExecutorError {
    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    /// The request could not be sent or the response body not read.
    #[error("failed to reach {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// The endpoint answered with a non-success status code.
    #[error("{endpoint} answered with status {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },
    /// The response body is not valid SPARQL JSON results.
    #[error(transparent)]
    ResultsParsing(#[from] sparesults::QueryResultsParseError),
    /// The endpoint returned a boolean result where solutions were expected.
    #[error("{endpoint} did not return solutions")]
    NotSolutions { endpoint: String },
}

/// The SPARQL execution collaborator.
///
/// Implementations run a `SELECT` query against one endpoint and return its
/// binding rows. The dispatcher depends only on this trait, so tests and
/// embedders with their own transport can substitute the HTTP
/// implementation.
#[async_trait]
pub trait SparqlExecutor: Send + Sync {
    async fn select(
        &self,
        endpoint_url: &str,
        query: &str,
    ) -> Result<Vec<QuerySolution>, ExecutorError>;
}

/// [`SparqlExecutor`] speaking the SPARQL 1.1 protocol over HTTP.
///
/// Queries are `POST`ed form-urlencoded and results requested as
/// `application/sparql-results+json`.
pub struct HttpSparqlExecutor {
    client: reqwest::Client,
    accept: String,
}

impl HttpSparqlExecutor {
    pub fn new() -> Result<Self, ExecutorError> {
        Self::with_config(&ExecutorConfig::default())
    }

    pub fn with_config(config: &ExecutorConfig) -> Result<Self, ExecutorError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(ExecutorError::Build)?;
        Ok(Self {
            client,
            accept: config.accept.clone(),
        })
    }
}

#[async_trait]
impl SparqlExecutor for HttpSparqlExecutor {
    async fn select(
        &self,
        endpoint_url: &str,
        query: &str,
    ) -> Result<Vec<QuerySolution>, ExecutorError> {
        let response = self
            .client
            .post(endpoint_url)
            .header(reqwest::header::ACCEPT, &self.accept)
            .form(&[("query", query)])
            .send()
            .await
            .map_err(|source| ExecutorError::Transport {
                endpoint: endpoint_url.to_owned(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExecutorError::Status {
                endpoint: endpoint_url.to_owned(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| ExecutorError::Transport {
                endpoint: endpoint_url.to_owned(),
                source,
            })?;

        match QueryResultsParser::from_format(QueryResultsFormat::Json).for_reader(body.as_ref())? {
            ReaderQueryResultsParserOutput::Solutions(solutions) => {
                Ok(solutions.collect::<Result<Vec<_>, _>>()?)
            }
            ReaderQueryResultsParserOutput::Boolean(_) => Err(ExecutorError::NotSolutions {
                endpoint: endpoint_url.to_owned(),
            }),
        }
    }
}
