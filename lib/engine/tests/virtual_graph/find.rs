use crate::{integer, observation_iri, open_graph, open_graph_from, FIXTURE};
use dggs_graph_model::vocab::{led, qb, rdf};
use dggs_graph_model::{Literal, NamedNode, Subject, Term, TermRef};
use std::error::Error;

#[test]
fn type_triples_are_produced_twice_per_observation() -> Result<(), Box<dyn Error>> {
    let graph = open_graph()?;
    let triples = graph
        .find(None, Some(rdf::TYPE.into()), None)
        .collect::<Vec<_>>();
    assert_eq!(triples.len(), 2 * graph.dataset().observations().count());
    assert_eq!(triples.len(), 168);

    let observation_marker = Term::from(qb::OBSERVATION.into_owned());
    assert_eq!(
        triples
            .iter()
            .filter(|t| t.object == observation_marker)
            .count(),
        84
    );
    Ok(())
}

#[test]
fn type_object_selects_the_kind() -> Result<(), Box<dyn Error>> {
    let graph = open_graph()?;
    let pixels = graph.find(None, Some(rdf::TYPE.into()), Some(led::PIXEL.into()));
    assert_eq!(pixels.count(), 42);
    let observations = graph.find(None, Some(rdf::TYPE.into()), Some(qb::OBSERVATION.into()));
    assert_eq!(observations.count(), 84);
    let other = graph.find(None, Some(rdf::TYPE.into()), Some(led::VALUE.into()));
    assert_eq!(other.count(), 0);
    Ok(())
}

#[test]
fn unresolvable_terms_match_nothing() -> Result<(), Box<dyn Error>> {
    let graph = open_graph()?;
    let unknown = NamedNode::new_unchecked("http://example.com/unknown");
    assert_eq!(graph.find(None, Some(unknown.as_ref().into()), None).count(), 0);

    let literal = Literal::new_simple_literal("R78");
    assert_eq!(graph.find(Some(literal.as_ref().into()), None, None).count(), 0);
    assert_eq!(
        graph
            .find(None, Some(literal.as_ref().into()), None)
            .count(),
        0
    );
    assert_eq!(graph.find(Some(unknown.as_ref().into()), None, None).count(), 0);
    Ok(())
}

#[test]
fn concrete_subject_produces_every_public_fact() -> Result<(), Box<dyn Error>> {
    let graph = open_graph()?;
    let pixel = observation_iri("R7852", 5, 5, 2);
    let triples = graph
        .find(Some(pixel.as_ref().into()), None, None)
        .collect::<Vec<_>>();
    assert_eq!(triples.len(), 17);
    assert!(triples.iter().all(|t| t.subject == Subject::from(pixel.clone())));
    assert!(!triples
        .iter()
        .any(|t| t.predicate.as_ref() == led::IMAGE_DATA));

    let tile = observation_iri("R7852", 5, 7, 2);
    let image = graph
        .find(Some(tile.as_ref().into()), Some(led::IMAGE_DATA.into()), None)
        .collect::<Vec<_>>();
    assert_eq!(image.len(), 1);
    assert!(image[0]
        .object
        .to_string()
        .starts_with("<data:image/png;base64,"));
    Ok(())
}

#[test]
fn pixel_value_lookup() -> Result<(), Box<dyn Error>> {
    let graph = open_graph()?;
    let value = Literal::from(931.0);
    let triples = graph
        .find(None, Some(led::VALUE.into()), Some(value.as_ref().into()))
        .collect::<Vec<_>>();
    assert_eq!(triples.len(), 1);
    assert_eq!(
        triples[0].subject,
        Subject::from(observation_iri("R78523", 6, 6, 2))
    );
    Ok(())
}

#[test]
fn band_lookup_is_structured() -> Result<(), Box<dyn Error>> {
    let graph = open_graph()?;
    let band = integer(3);
    let subjects = graph
        .find(None, Some(led::ETM_BAND.into()), Some(TermRef::from(band.as_ref())))
        .count();
    assert_eq!(subjects, 12);

    let out_of_range = integer(9);
    let subjects = graph
        .find(None, Some(led::ETM_BAND.into()), Some(out_of_range.as_ref().into()))
        .count();
    assert_eq!(subjects, 0);
    Ok(())
}

#[test]
fn fractional_capture_time_still_resolves_identifiers() -> Result<(), Box<dyn Error>> {
    let fixture = FIXTURE.replace("2013-05-27T23:58:20Z", "2013-05-27T23:58:20.5Z");
    assert_ne!(fixture, FIXTURE);
    let graph = open_graph_from(&fixture)?;

    let observation = graph
        .dataset()
        .observations()
        .next()
        .ok_or("the fixture has observations")?;
    let iri = graph.observation_iri(&observation);
    assert!(iri.as_str().contains("/2013/05/27/23/58/20/"));
    assert!(graph.observation_for_iri(iri.as_str()).is_some());
    assert!(graph.find(Some(iri.as_ref().into()), None, None).count() > 0);
    assert_eq!(
        graph
            .find(Some(iri.as_ref().into()), Some(rdf::TYPE.into()), None)
            .count(),
        2
    );
    Ok(())
}
