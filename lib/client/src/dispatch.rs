use crate::{EndpointRegistry, SparqlExecutor};
use futures::stream::{self, StreamExt};
use lod_fusion_model::QuerySolution;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

// The canary sent before the real query. Any error or an empty answer marks
// the endpoint unreachable and the real query is never sent.
const PROBE_QUERY: &str = "SELECT ?x WHERE {?x ?y ?z} LIMIT 1";

/// Default bound on concurrently queried endpoints.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// The outcome of one endpoint for one dispatch.
#[derive(Debug)]
pub enum EndpointOutcome {
    /// The endpoint answered; the retrieved binding rows.
    Success(Vec<QuerySolution>),
    /// The liveness probe failed; no query was sent.
    Unreachable,
    /// The probe succeeded but query execution failed.
    ExecutionFailed,
}

impl EndpointOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, EndpointOutcome::Success(_))
    }

    /// The binding rows, if the endpoint answered.
    pub fn solutions(&self) -> Option<&[QuerySolution]> {
        match self {
            EndpointOutcome::Success(solutions) => Some(solutions),
            EndpointOutcome::Unreachable | EndpointOutcome::ExecutionFailed => None,
        }
    }
}

/// Per-endpoint outcomes of one dispatch, keyed by endpoint name.
///
/// Holds exactly one entry per endpoint registered at dispatch time. Entries
/// are independent: one endpoint's failure never affects another's result.
#[derive(Debug, Default)]
pub struct AggregatedResult {
    outcomes: BTreeMap<String, EndpointOutcome>,
}

impl AggregatedResult {
    /// The outcome recorded for `endpoint`.
    pub fn get(&self, endpoint: &str) -> Option<&EndpointOutcome> {
        self.outcomes.get(endpoint)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EndpointOutcome)> {
        self.outcomes
            .iter()
            .map(|(name, outcome)| (name.as_str(), outcome))
    }

    /// The endpoints that answered, with their binding rows.
    pub fn successes(&self) -> impl Iterator<Item = (&str, &[QuerySolution])> {
        self.iter()
            .filter_map(|(name, outcome)| outcome.solutions().map(|rows| (name, rows)))
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl FromIterator<(String, EndpointOutcome)> for AggregatedResult {
    fn from_iter<T: IntoIterator<Item = (String, EndpointOutcome)>>(iter: T) -> Self {
        Self {
            outcomes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for AggregatedResult {
    type Item = (String, EndpointOutcome);
    type IntoIter = std::collections::btree_map::IntoIter<String, EndpointOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

/// Fans a composed query out to every registered endpoint.
pub struct Dispatcher {
    executor: Arc<dyn SparqlExecutor>,
    concurrency: usize,
}

impl Dispatcher {
    pub fn new(executor: Arc<dyn SparqlExecutor>) -> Self {
        Self {
            executor,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Bounds the number of endpoints queried concurrently.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Runs the final query text against every endpoint in `endpoints`.
    ///
    /// Endpoints are resolved independently and concurrently; completion
    /// order does not affect the keyed result. Each endpoint is probed
    /// before the query is sent to it. Dropping the returned future cancels
    /// the in-flight requests.
    pub async fn dispatch(&self, endpoints: &EndpointRegistry, query: &str) -> AggregatedResult {
        debug!(endpoints = endpoints.len(), query, "dispatching query");
        stream::iter(endpoints.iter())
            .map(|(name, url)| async move {
                (name.to_owned(), self.resolve(name, url, query).await)
            })
            .buffer_unordered(self.concurrency)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .collect()
    }

    /// Checks whether the endpoint at `endpoint_url` answers the canary
    /// query with at least one row.
    pub async fn probe(&self, endpoint_url: &str) -> bool {
        match self.executor.select(endpoint_url, PROBE_QUERY).await {
            Ok(rows) => !rows.is_empty(),
            Err(error) => {
                debug!(endpoint_url, %error, "probe failed");
                false
            }
        }
    }

    async fn resolve(&self, name: &str, url: &str, query: &str) -> EndpointOutcome {
        if !self.probe(url).await {
            warn!(endpoint = name, "endpoint unreachable, skipping query");
            return EndpointOutcome::Unreachable;
        }

        match self.executor.select(url, query).await {
            Ok(rows) => {
                info!(endpoint = name, rows = rows.len(), "results retrieved");
                EndpointOutcome::Success(rows)
            }
            Err(error) => {
                warn!(endpoint = name, %error, "query execution failed");
                EndpointOutcome::ExecutionFailed
            }
        }
    }
}
