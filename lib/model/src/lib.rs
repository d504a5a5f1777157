//! The data model shared by all DGGS Graph crates.
//!
//! Besides re-exporting the RDF terms from oxrdf and the SPARQL algebra from spargebra, this
//! crate defines the vocabularies of the virtual observation graph and the canonical scheme for
//! observation identifiers.

mod error;
mod iri;
pub mod vocab;

pub use error::*;
pub use iri::*;

// Re-export some oxrdf types.
pub use oxiri::{Iri, IriParseError};
pub use oxrdf::{
    BlankNode, BlankNodeRef, Literal, LiteralRef, NamedNode, NamedNodeRef, Subject, SubjectRef,
    Term, TermRef, Triple, TripleRef, Variable, VariableRef,
};

// Re-export the SPARQL algebra used by the query hooks.
pub use spargebra::algebra::{Expression, GraphPattern};
pub use spargebra::term::{NamedNodePattern, TermPattern, TriplePattern};

// Re-export the timestamp type used for capture times.
pub use time::OffsetDateTime;
