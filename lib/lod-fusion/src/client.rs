//! The top-level client composing the registries, the query templates and
//! the dispatcher.
//!
//! The entry point of the module is the [`LodClient`] struct.
//!
//! Usage example:
//! ```no_run
//! use lod_fusion::LodClient;
//!
//! # tokio_test::block_on(async {
//! let client = LodClient::new()?;
//!
//! // Instances of dbo:Artist, matching through subclasses, 50 per endpoint.
//! let results = client.instances_of_class("dbo:Artist", true, Some(50)).await?;
//! for (endpoint, rows) in results.successes() {
//!     println!("{endpoint} returned {} instances", rows.len());
//! }
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! # }).unwrap();
//! ```

use crate::QueryError;
use lod_fusion_client::{
    AggregatedResult, Dispatcher, EndpointRegistry, ExecutorConfig, ExecutorError,
    HttpSparqlExecutor, NamespaceRegistry, SparqlExecutor, DEFAULT_CONCURRENCY,
};
use lod_fusion_model::{is_valid_string, InvalidArgument, QuerySolution};
use lod_fusion_queries::{QueryIntent, RenderedQuery};
use std::sync::Arc;

/// A federated Linked Open Data client.
///
/// Owns an endpoint registry, a namespace registry and a SPARQL executor,
/// and offers one entry point per query template. Every entry point renders
/// its template, prepends the namespace prologue, appends the optional
/// per-endpoint `LIMIT`, and fans the final query text out to all registered
/// endpoints.
///
/// Argument validation happens before any network activity: a blank argument
/// fails the whole call with [`InvalidArgument`] and nothing is dispatched.
/// Per-endpoint failures after that are recorded in the returned
/// [`AggregatedResult`], never raised.
pub struct LodClient {
    namespaces: NamespaceRegistry,
    endpoints: EndpointRegistry,
    executor: Arc<dyn SparqlExecutor>,
    dispatcher: Dispatcher,
}

impl LodClient {
    /// Creates a client with the default endpoints, namespaces and HTTP
    /// executor.
    pub fn new() -> Result<Self, ExecutorError> {
        Self::builder().build()
    }

    pub fn builder() -> LodClientBuilder {
        LodClientBuilder::default()
    }

    /// The currently registered namespaces.
    pub fn namespaces(&self) -> &NamespaceRegistry {
        &self.namespaces
    }

    /// The currently registered endpoints.
    pub fn endpoints(&self) -> &EndpointRegistry {
        &self.endpoints
    }

    /// Renders `intent` and runs it against every registered endpoint.
    pub async fn dispatch(
        &self,
        intent: &QueryIntent,
        limit_per_endpoint: Option<u64>,
    ) -> AggregatedResult {
        self.dispatch_rendered(&intent.render(), limit_per_endpoint)
            .await
    }

    /// URIs of entities typed as `owl:Class`.
    pub async fn classes(&self, limit_per_endpoint: Option<u64>) -> AggregatedResult {
        self.dispatch(&QueryIntent::classes(), limit_per_endpoint)
            .await
    }

    /// URIs of subclasses of `super_class`.
    ///
    /// The class may be given with a known prefix (e.g. `dbo:Artist`) or as
    /// a complete URI (e.g. `http://dbpedia.org/ontology/Artist`).
    pub async fn sub_classes(
        &self,
        super_class: &str,
        limit_per_endpoint: Option<u64>,
    ) -> Result<AggregatedResult, InvalidArgument> {
        let intent = QueryIntent::sub_classes(super_class)?;
        Ok(self.dispatch(&intent, limit_per_endpoint).await)
    }

    /// URIs of superclasses of `sub_class`.
    pub async fn super_classes(
        &self,
        sub_class: &str,
        limit_per_endpoint: Option<u64>,
    ) -> Result<AggregatedResult, InvalidArgument> {
        let intent = QueryIntent::super_classes(sub_class)?;
        Ok(self.dispatch(&intent, limit_per_endpoint).await)
    }

    /// URIs of classes equivalent to `class`.
    pub async fn equivalent_classes(
        &self,
        class: &str,
        limit_per_endpoint: Option<u64>,
    ) -> Result<AggregatedResult, InvalidArgument> {
        let intent = QueryIntent::equivalent_classes(class)?;
        Ok(self.dispatch(&intent, limit_per_endpoint).await)
    }

    /// URIs of classes disjoint with `class`.
    pub async fn disjoint_classes(
        &self,
        class: &str,
        limit_per_endpoint: Option<u64>,
    ) -> Result<AggregatedResult, InvalidArgument> {
        let intent = QueryIntent::disjoint_classes(class)?;
        Ok(self.dispatch(&intent, limit_per_endpoint).await)
    }

    /// URIs of subproperties of `super_property`.
    pub async fn sub_properties(
        &self,
        super_property: &str,
        limit_per_endpoint: Option<u64>,
    ) -> Result<AggregatedResult, InvalidArgument> {
        let intent = QueryIntent::sub_properties(super_property)?;
        Ok(self.dispatch(&intent, limit_per_endpoint).await)
    }

    /// URIs of superproperties of `sub_property`.
    pub async fn super_properties(
        &self,
        sub_property: &str,
        limit_per_endpoint: Option<u64>,
    ) -> Result<AggregatedResult, InvalidArgument> {
        let intent = QueryIntent::super_properties(sub_property)?;
        Ok(self.dispatch(&intent, limit_per_endpoint).await)
    }

    /// Subjects appearing with the given predicate and object.
    pub async fn subjects(
        &self,
        predicate: &str,
        object: &str,
        limit_per_endpoint: Option<u64>,
    ) -> Result<AggregatedResult, InvalidArgument> {
        let intent = QueryIntent::subjects(predicate, object)?;
        Ok(self.dispatch(&intent, limit_per_endpoint).await)
    }

    /// Predicates appearing between the given subject and object.
    pub async fn predicates(
        &self,
        subject: &str,
        object: &str,
        limit_per_endpoint: Option<u64>,
    ) -> Result<AggregatedResult, InvalidArgument> {
        let intent = QueryIntent::predicates(subject, object)?;
        Ok(self.dispatch(&intent, limit_per_endpoint).await)
    }

    /// Objects appearing with the given subject and predicate.
    pub async fn objects(
        &self,
        subject: &str,
        predicate: &str,
        limit_per_endpoint: Option<u64>,
    ) -> Result<AggregatedResult, InvalidArgument> {
        let intent = QueryIntent::objects(subject, predicate)?;
        Ok(self.dispatch(&intent, limit_per_endpoint).await)
    }

    /// Triples matching the given pattern; an unset position acts as a query
    /// variable.
    pub async fn triples(
        &self,
        subject: Option<&str>,
        predicate: Option<&str>,
        object: Option<&str>,
        limit_per_endpoint: Option<u64>,
    ) -> Result<AggregatedResult, InvalidArgument> {
        let intent = QueryIntent::triples(subject, predicate, object)?;
        Ok(self.dispatch(&intent, limit_per_endpoint).await)
    }

    /// Instances of `class`; with `include_subclasses`, instances of its
    /// subclasses are matched as well.
    pub async fn instances_of_class(
        &self,
        class: &str,
        include_subclasses: bool,
        limit_per_endpoint: Option<u64>,
    ) -> Result<AggregatedResult, InvalidArgument> {
        let intent = QueryIntent::instances_of_class(class, include_subclasses)?;
        Ok(self.dispatch(&intent, limit_per_endpoint).await)
    }

    /// Labels of `entity`, optionally restricted to a BCP-47 language tag.
    ///
    /// The tag is inserted into the query verbatim; callers are responsible
    /// for supplying a well-formed tag.
    pub async fn labels(
        &self,
        entity: &str,
        language: Option<&str>,
        limit_per_endpoint: Option<u64>,
    ) -> Result<AggregatedResult, InvalidArgument> {
        let intent = QueryIntent::labels(entity, language)?;
        Ok(self.dispatch(&intent, limit_per_endpoint).await)
    }

    /// Runs a caller-written `SELECT` body against every registered
    /// endpoint, with the same prologue, `LIMIT` handling and per-endpoint
    /// isolation as the templated entry points.
    pub async fn select_with(
        &self,
        body: &str,
        limit_per_endpoint: Option<u64>,
    ) -> Result<AggregatedResult, InvalidArgument> {
        if !is_valid_string(body) {
            return Err(InvalidArgument::new("query"));
        }
        Ok(self
            .dispatch_rendered(&RenderedQuery::raw(body), limit_per_endpoint)
            .await)
    }

    /// Runs a caller-written `SELECT` body against a single endpoint, with
    /// the prologue and the optional `LIMIT` applied.
    ///
    /// Unlike the fan-out entry points, execution errors are surfaced to the
    /// caller; no liveness probe is performed.
    pub async fn select_at(
        &self,
        endpoint_url: &str,
        body: &str,
        limit: Option<u64>,
    ) -> Result<Vec<QuerySolution>, QueryError> {
        if !is_valid_string(endpoint_url) {
            return Err(InvalidArgument::new("endpoint_url").into());
        }
        if !is_valid_string(body) {
            return Err(InvalidArgument::new("query").into());
        }
        let query = RenderedQuery::raw(body).compose(&self.namespaces.prologue(), limit);
        Ok(self.executor.select(endpoint_url, &query).await?)
    }

    /// Checks whether the endpoint at `endpoint_url` currently answers the
    /// canary query.
    pub async fn is_endpoint_live(&self, endpoint_url: &str) -> bool {
        self.dispatcher.probe(endpoint_url).await
    }

    async fn dispatch_rendered(
        &self,
        rendered: &RenderedQuery,
        limit_per_endpoint: Option<u64>,
    ) -> AggregatedResult {
        let query = rendered.compose(&self.namespaces.prologue(), limit_per_endpoint);
        self.dispatcher.dispatch(&self.endpoints, &query).await
    }
}

/// Builder for [`LodClient`].
///
/// ```no_run
/// use lod_fusion::LodClient;
///
/// let _client = LodClient::builder()
///     .endpoints([("Wikidata", "https://query.wikidata.org/sparql")])
///     .namespaces([("wd", "http://www.wikidata.org/entity/")])
///     .concurrency(8)
///     .build()?;
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Default)]
pub struct LodClientBuilder {
    endpoint_overrides: Option<Vec<(String, String)>>,
    namespace_overrides: Vec<(String, String)>,
    executor: Option<Arc<dyn SparqlExecutor>>,
    executor_config: Option<ExecutorConfig>,
    concurrency: Option<usize>,
}

impl LodClientBuilder {
    /// Replaces the default endpoint set with `endpoints`.
    #[must_use]
    pub fn endpoints<K, V>(mut self, endpoints: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.endpoint_overrides = Some(
            endpoints
                .into_iter()
                .map(|(name, url)| (name.into(), url.into()))
                .collect(),
        );
        self
    }

    /// Merges `namespaces` into the default prefix set.
    #[must_use]
    pub fn namespaces<K, V>(mut self, namespaces: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.namespace_overrides.extend(
            namespaces
                .into_iter()
                .map(|(prefix, uri)| (prefix.into(), uri.into())),
        );
        self
    }

    /// Substitutes the HTTP executor with a custom [`SparqlExecutor`].
    #[must_use]
    pub fn executor(mut self, executor: Arc<dyn SparqlExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Configures the HTTP executor built when no custom executor is set.
    #[must_use]
    pub fn executor_config(mut self, config: ExecutorConfig) -> Self {
        self.executor_config = Some(config);
        self
    }

    /// Bounds the number of endpoints queried concurrently
    /// (default [`DEFAULT_CONCURRENCY`]).
    #[must_use]
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    /// Builds the client. Invalid override entries are dropped with a logged
    /// diagnostic; only an HTTP client construction failure is fatal.
    pub fn build(self) -> Result<LodClient, ExecutorError> {
        let endpoints = match self.endpoint_overrides {
            Some(overrides) => EndpointRegistry::with_overrides(overrides).0,
            None => EndpointRegistry::new(),
        };
        let namespaces = if self.namespace_overrides.is_empty() {
            NamespaceRegistry::new()
        } else {
            NamespaceRegistry::with_overrides(self.namespace_overrides).0
        };
        let executor: Arc<dyn SparqlExecutor> = match self.executor {
            Some(executor) => executor,
            None => {
                let config = self.executor_config.unwrap_or_default();
                Arc::new(HttpSparqlExecutor::with_config(&config)?)
            }
        };
        let dispatcher = Dispatcher::new(Arc::clone(&executor))
            .with_concurrency(self.concurrency.unwrap_or(DEFAULT_CONCURRENCY));
        Ok(LodClient {
            namespaces,
            endpoints,
            executor,
            dispatcher,
        })
    }
}
