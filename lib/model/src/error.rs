use std::fmt::{Display, Formatter};

/// An error raised while decoding an observation identifier.
///
/// Decoding never fails for any other reason than the identifier not adhering to the canonical
/// layout. Callers that answer pattern queries treat this error as "no such observation".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid observation identifier '{iri}': {kind}")]
pub struct ObservationIriParseError {
    iri: String,
    kind: ObservationIriParseErrorKind,
}

impl ObservationIriParseError {
    pub(crate) fn new(iri: impl Into<String>, kind: ObservationIriParseErrorKind) -> Self {
        Self {
            iri: iri.into(),
            kind,
        }
    }

    /// The identifier that was rejected.
    pub fn iri(&self) -> &str {
        &self.iri
    }

    /// Why the identifier was rejected.
    pub fn kind(&self) -> ObservationIriParseErrorKind {
        self.kind
    }
}

/// The reason why an observation identifier could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ObservationIriParseErrorKind {
    /// The identifier does not start with the configured data prefix.
    WrongPrefix,
    /// The identifier does not follow the path layout of observations.
    Malformed,
    /// The date and time components do not form a valid timestamp.
    InvalidTimestamp,
}

impl Display for ObservationIriParseErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongPrefix => f.write_str("wrong prefix"),
            Self::Malformed => f.write_str("malformed observation path"),
            Self::InvalidTimestamp => f.write_str("invalid capture timestamp"),
        }
    }
}
