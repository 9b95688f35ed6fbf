//! Endpoint and namespace registries, the SPARQL protocol executor and the
//! multi-endpoint dispatcher.
//!
//! The [`Dispatcher`] fans a composed query out to every endpoint in an
//! [`EndpointRegistry`], probing each for liveness first and recording one
//! [`EndpointOutcome`] per endpoint. Failures are isolated: no endpoint's
//! error can affect another endpoint's result or abort the dispatch.

mod config;
mod dispatch;
mod endpoints;
mod executor;
mod namespaces;

pub use config::{ConfigRejection, RejectReason};
pub use dispatch::{AggregatedResult, Dispatcher, EndpointOutcome, DEFAULT_CONCURRENCY};
pub use endpoints::{EndpointRegistry, DEFAULT_ENDPOINTS};
pub use executor::{ExecutorConfig, ExecutorError, HttpSparqlExecutor, SparqlExecutor};
pub use namespaces::{NamespaceRegistry, DEFAULT_NAMESPACES};
