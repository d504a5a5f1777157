use crate::open_graph;
use dggs_graph_storage::ObservationKind;
use std::error::Error;

#[test]
fn level_constraint_selects_a_single_cell() -> Result<(), Box<dyn Error>> {
    let graph = open_graph()?;
    let mut filter = graph.filter();
    filter.constrain_level(3);
    let observations = filter.execute().collect::<Vec<_>>();
    assert_eq!(observations.len(), 14);
    assert!(observations.iter().all(|o| o.cell().id() == "R78"));
    Ok(())
}

#[test]
fn kind_and_band_constraints() -> Result<(), Box<dyn Error>> {
    let graph = open_graph()?;
    let mut filter = graph.filter();
    filter.constrain_kind(ObservationKind::Areal);
    filter.constrain_band(2);
    let observations = filter.execute().collect::<Vec<_>>();
    assert_eq!(observations.len(), 6);
    assert!(observations
        .iter()
        .all(|o| o.band() == 2 && o.kind() == ObservationKind::Areal));
    Ok(())
}

#[test]
fn bounding_box_prunes_cells() -> Result<(), Box<dyn Error>> {
    let graph = open_graph()?;
    let mut filter = graph.filter();
    filter.constrain_lat_min(-35.45);
    filter.constrain_lat_max(-35.0);
    filter.constrain_lon_min(148.8);
    filter.constrain_lon_max(149.3);
    filter.constrain_kind(ObservationKind::Areal);
    filter.constrain_band(0);
    let cells = filter
        .execute()
        .map(|o| o.cell().id().to_owned())
        .collect::<Vec<_>>();
    assert_eq!(cells, ["R78523"]);
    Ok(())
}

#[test]
fn repeated_bounds_keep_the_tightest() -> Result<(), Box<dyn Error>> {
    let graph = open_graph()?;
    let mut filter = graph.filter();
    filter.constrain_lat_max(-35.0);
    filter.constrain_lat_max(-30.0);
    filter.constrain_kind(ObservationKind::Pointwise);
    filter.constrain_band(0);
    let mut cells = filter
        .execute()
        .map(|o| o.cell().id().to_owned())
        .collect::<Vec<_>>();
    cells.sort();
    assert_eq!(cells, ["R78523", "R78526"]);
    Ok(())
}

#[test]
fn conflicting_constraints_are_impossible_forever() -> Result<(), Box<dyn Error>> {
    let graph = open_graph()?;
    let mut filter = graph.filter();
    filter.constrain_band(1);
    filter.constrain_band(2);
    assert!(filter.is_impossible());

    filter.constrain_level(3);
    filter.constrain_cell_id("R78");
    filter.constrain_kind(ObservationKind::Pointwise);
    assert!(filter.is_impossible());
    assert_eq!(filter.execute().count(), 0);

    let mut filter = graph.filter();
    filter.constrain_cell_id("R78");
    filter.constrain_cell_id("R785");
    assert_eq!(filter.execute().count(), 0);
    Ok(())
}

#[test]
fn out_of_range_band_yields_nothing() -> Result<(), Box<dyn Error>> {
    let graph = open_graph()?;
    let mut filter = graph.filter();
    filter.constrain_band(7);
    assert!(!filter.is_impossible());
    assert_eq!(filter.execute().count(), 0);
    Ok(())
}

#[test]
fn observations_are_resolved_from_their_identifier() -> Result<(), Box<dyn Error>> {
    let graph = open_graph()?;
    for observation in graph.dataset().observations() {
        let iri = graph.observation_iri(&observation);
        assert_eq!(graph.observation_for_iri(iri.as_str()), Some(observation));
    }
    assert!(graph
        .observation_for_iri("https://anulinkedearth.org/rdf/observation/2013/05/27/23/58/20/cell/R99/levelSquare-3/levelPixel-3/band-0")
        .is_none());
    assert!(graph
        .observation_for_iri("https://anulinkedearth.org/rdf/observation/2014/05/27/23/58/20/cell/R78/levelSquare-3/levelPixel-3/band-0")
        .is_none());
    assert!(graph.observation_for_iri("http://example.com/R78").is_none());
    Ok(())
}
