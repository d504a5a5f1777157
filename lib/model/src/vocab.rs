//! Vocabularies used by the virtual observation graph.

pub mod rdf {
    //! [RDF](https://www.w3.org/TR/rdf11-concepts/) vocabulary.
    pub use oxrdf::vocab::rdf::*;
}

pub mod xsd {
    //! [XML Schema](https://www.w3.org/TR/xmlschema11-2/) datatypes.
    pub use oxrdf::vocab::xsd::*;
}

pub mod led {
    //! The ANU Linked Earth Data vocabulary.
    use oxrdf::NamedNodeRef;

    /// The namespace of the vocabulary.
    pub const NAMESPACE: &str = "http://www.anulinkedearth.org/sandbox/ANU-LED#";

    /// Class of observations that summarize a whole cell with a single value per band.
    pub const PIXEL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.anulinkedearth.org/sandbox/ANU-LED#Pixel");
    /// Class of observations that carry a square image per band.
    pub const GRID_SQUARE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.anulinkedearth.org/sandbox/ANU-LED#GridSquare");
    pub const IMAGE_DATA: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.anulinkedearth.org/sandbox/ANU-LED#imageData");
    pub const VALUE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.anulinkedearth.org/sandbox/ANU-LED#value");
    pub const BOUNDS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.anulinkedearth.org/sandbox/ANU-LED#bounds");
    pub const RESOLUTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.anulinkedearth.org/sandbox/ANU-LED#resolution");
    pub const ETM_BAND: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.anulinkedearth.org/sandbox/ANU-LED#etmBand");
    pub const DGGS_CELL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.anulinkedearth.org/sandbox/ANU-LED#dggsCell");
    pub const DGGS_LEVEL_SQUARE: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(
        "http://www.anulinkedearth.org/sandbox/ANU-LED#dggsLevelSquare",
    );
    pub const DGGS_LEVEL_PIXEL: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(
        "http://www.anulinkedearth.org/sandbox/ANU-LED#dggsLevelPixel",
    );
    pub const TIME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.anulinkedearth.org/sandbox/ANU-LED#time");
    pub const LAT_MIN: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.anulinkedearth.org/sandbox/ANU-LED#latMin");
    pub const LAT_MAX: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.anulinkedearth.org/sandbox/ANU-LED#latMax");
    pub const LONG_MIN: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.anulinkedearth.org/sandbox/ANU-LED#longMin");
    pub const LONG_MAX: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.anulinkedearth.org/sandbox/ANU-LED#longMax");
}

pub mod qb {
    //! The [RDF Data Cube](https://www.w3.org/TR/vocab-data-cube/) vocabulary.
    use oxrdf::NamedNodeRef;

    pub const OBSERVATION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/linked-data/cube#Observation");
    pub const DATA_SET: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/linked-data/cube#dataSet");
}

pub mod geo {
    //! The [WGS84 Geo Positioning](https://www.w3.org/2003/01/geo/) vocabulary.
    use oxrdf::NamedNodeRef;

    pub const LAT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2003/01/geo/wgs84_pos#lat");
    pub const LONG: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2003/01/geo/wgs84_pos#long");
}

pub mod geosparql {
    //! The [GeoSPARQL](https://www.ogc.org/standard/geosparql/) vocabulary.
    use oxrdf::NamedNodeRef;

    /// Datatype of well-known-text geometry literals.
    pub const WKT_LITERAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/geosparql#wktLiteral");
}
