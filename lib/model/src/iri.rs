use crate::error::{ObservationIriParseError, ObservationIriParseErrorKind};
use crate::NamedNode;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use time::{Date, Month, OffsetDateTime, Time, UtcOffset};

/// The data prefix used when no other prefix is configured.
pub const DEFAULT_DATA_PREFIX: &str = "https://anulinkedearth.org/rdf/";

#[allow(clippy::expect_used, reason = "The pattern is a constant")]
static OBSERVATION_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^observation/",
        r"(?<year>[0-9]{4})/(?<month>[0-9]{2})/(?<day>[0-9]{2})/",
        r"(?<hour>[0-9]{2})/(?<minute>[0-9]{2})/(?<second>[0-9]{2})/",
        r"cell/(?<cell>[N-S][0-9]*)/",
        r"levelSquare-(?<coarse>[0-9]+)/levelPixel-(?<fine>[0-9]+)/band-(?<band>[0-9]+)$"
    ))
    .expect("observation path pattern is valid")
});

/// The identity of an observation as it can be recovered from its canonical identifier.
///
/// This is everything needed to resolve the observation again without scanning the whole cell
/// index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObservationMeta {
    /// Capture time of the dataset the observation belongs to.
    pub timestamp: OffsetDateTime,
    /// Identifier of the cell.
    pub cell_id: String,
    /// Hierarchy level of the cell.
    pub coarse_level: u32,
    /// Hierarchy level of the finest detail of the observation.
    pub fine_level: u32,
    /// Band index.
    pub band: u32,
}

/// Formats and parses canonical observation identifiers.
///
/// An identifier has the layout
/// `<prefix>observation/{YYYY}/{MM}/{DD}/{HH}/{mm}/{SS}/cell/{cellId}/levelSquare-{coarse}/levelPixel-{fine}/band-{band}`.
/// The date and time components are the capture time in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObservationIriScheme {
    prefix: String,
}

impl Default for ObservationIriScheme {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_PREFIX)
    }
}

impl ObservationIriScheme {
    /// Creates a new scheme that places identifiers below `prefix`.
    ///
    /// The prefix is not validated. Callers are expected to pass an absolute IRI.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns the prefix of all identifiers.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the canonical identifier for `meta`.
    pub fn format(&self, meta: &ObservationMeta) -> NamedNode {
        NamedNode::new_unchecked(self.format_to_string(meta))
    }

    /// Returns the canonical identifier for `meta` as a plain string.
    pub fn format_to_string(&self, meta: &ObservationMeta) -> String {
        let utc = meta.timestamp.to_offset(UtcOffset::UTC);
        format!(
            "{}observation/{:04}/{:02}/{:02}/{:02}/{:02}/{:02}/cell/{}/levelSquare-{}/levelPixel-{}/band-{}",
            self.prefix,
            utc.year(),
            u8::from(utc.month()),
            utc.day(),
            utc.hour(),
            utc.minute(),
            utc.second(),
            meta.cell_id,
            meta.coarse_level,
            meta.fine_level,
            meta.band
        )
    }

    /// Decodes an identifier produced by [Self::format].
    ///
    /// Any string that does not follow the canonical layout exactly, including one with a
    /// different prefix, is rejected.
    pub fn parse(&self, iri: &str) -> Result<ObservationMeta, ObservationIriParseError> {
        let Some(path) = iri.strip_prefix(self.prefix.as_str()) else {
            return Err(ObservationIriParseError::new(
                iri,
                ObservationIriParseErrorKind::WrongPrefix,
            ));
        };
        let malformed =
            || ObservationIriParseError::new(iri, ObservationIriParseErrorKind::Malformed);
        let invalid_timestamp =
            || ObservationIriParseError::new(iri, ObservationIriParseErrorKind::InvalidTimestamp);

        let captures = OBSERVATION_PATH.captures(path).ok_or_else(malformed)?;
        let number = |name: &str| -> Result<u32, ObservationIriParseError> {
            group(&captures, name).parse().map_err(|_| malformed())
        };

        let year = i32::try_from(number("year")?).map_err(|_| invalid_timestamp())?;
        let month = u8::try_from(number("month")?)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .ok_or_else(invalid_timestamp)?;
        let day = u8::try_from(number("day")?).map_err(|_| invalid_timestamp())?;
        let hour = u8::try_from(number("hour")?).map_err(|_| invalid_timestamp())?;
        let minute = u8::try_from(number("minute")?).map_err(|_| invalid_timestamp())?;
        let second = u8::try_from(number("second")?).map_err(|_| invalid_timestamp())?;

        let date = Date::from_calendar_date(year, month, day).map_err(|_| invalid_timestamp())?;
        let time = Time::from_hms(hour, minute, second).map_err(|_| invalid_timestamp())?;

        Ok(ObservationMeta {
            timestamp: date.with_time(time).assume_utc(),
            cell_id: group(&captures, "cell").to_owned(),
            coarse_level: number("coarse")?,
            fine_level: number("fine")?,
            band: number("band")?,
        })
    }
}

fn group<'h>(captures: &Captures<'h>, name: &str) -> &'h str {
    captures.name(name).map_or("", |m| m.as_str())
}
