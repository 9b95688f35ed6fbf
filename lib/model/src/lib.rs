mod error;
mod resource;
mod validation;

pub use error::*;
pub use resource::*;
pub use validation::*;

// Re-export some oxrdf types.
pub use oxrdf::{
    BlankNode, BlankNodeRef, Literal, LiteralRef, NamedNode, NamedNodeRef, Term, TermRef,
    Variable, VariableRef,
};
pub use sparesults::QuerySolution;
