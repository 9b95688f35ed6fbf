#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]

pub mod client;
pub mod error;

pub mod model {
    pub use lod_fusion_model::*;
}

pub mod queries {
    pub use lod_fusion_queries::*;
}

pub mod registry {
    pub use lod_fusion_client::{
        ConfigRejection, EndpointRegistry, NamespaceRegistry, RejectReason, DEFAULT_ENDPOINTS,
        DEFAULT_NAMESPACES,
    };
}

pub mod sparql {
    pub use lod_fusion_client::{
        AggregatedResult, Dispatcher, EndpointOutcome, ExecutorConfig, ExecutorError,
        HttpSparqlExecutor, SparqlExecutor, DEFAULT_CONCURRENCY,
    };
}

pub use client::{LodClient, LodClientBuilder};
pub use error::QueryError;
