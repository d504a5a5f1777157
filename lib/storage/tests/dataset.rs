#![cfg(test)]
#![allow(clippy::panic_in_result_fn)]

use dggs_graph_model::ObservationIriScheme;
use dggs_graph_storage::memory::MemoryBackingStore;
use dggs_graph_storage::{Dataset, InvalidBandError, ObservationKind, StorageError};
use std::error::Error;
use std::sync::Arc;

const FIXTURE: &str = include_str!("../../../testdata/nbar_2013-05-27.json");

fn open_fixture() -> Result<Dataset, StorageError> {
    let store = MemoryBackingStore::from_json_str(FIXTURE)?;
    Dataset::open(Arc::new(store))
}

#[test]
fn fixture_is_indexed_completely() -> Result<(), Box<dyn Error>> {
    let dataset = open_fixture()?;
    assert_eq!(dataset.len(), 6);
    assert_eq!(dataset.observations().count(), 84);
    assert_eq!(
        dataset
            .observations()
            .filter(|o| o.kind() == ObservationKind::Pointwise)
            .count(),
        42
    );
    assert_eq!(dataset.cells_by_level(6).count(), 3);
    assert_eq!(dataset.capture().satellite_id(), "LS8");
    assert_eq!(dataset.capture().sensor_id(), "OLI_TIRS");
    Ok(())
}

#[test]
fn observations_by_level_and_band() -> Result<(), Box<dyn Error>> {
    let dataset = open_fixture()?;
    let level_3 = dataset
        .cells_by_level(3)
        .flat_map(|cell| cell.observations(None, None))
        .count();
    assert_eq!(level_3, 14);

    let band_3 = dataset
        .cells()
        .flat_map(|cell| cell.observations(Some(3), None))
        .count();
    assert_eq!(band_3, 12);

    let band_7 = dataset
        .cells()
        .flat_map(|cell| cell.observations(Some(7), None))
        .count();
    assert_eq!(band_7, 0);
    Ok(())
}

#[test]
fn cell_geometry() -> Result<(), Box<dyn Error>> {
    let dataset = open_fixture()?;
    let cell = dataset.cell("R78520").ok_or("missing cell")?;

    assert_eq!(cell.band_count(), 7);
    assert_eq!(cell.level(), 6);
    assert!((cell.centre().lat - -34.85536).abs() < 1e-9);
    assert!((cell.centre().lon - 149.07407).abs() < 1e-9);
    assert!((cell.degrees_spanned() - 0.37).abs() < 1e-3);
    assert_eq!(cell.boundary().len(), 5);
    assert_eq!(cell.tile_size(), 9);
    assert_eq!(cell.missing_value(), 0);
    assert_eq!(cell.to_string(), "Cell R78520");
    Ok(())
}

#[test]
fn observation_levels_and_resolution() -> Result<(), Box<dyn Error>> {
    let dataset = open_fixture()?;
    let cell = dataset.cell("R78520").ok_or("missing cell")?;

    let pixel = cell.pointwise_observation(3)?;
    assert!((pixel.resolution() - 1.0 / 0.37).abs() < 1e-2);
    assert_eq!(pixel.fine_level(), pixel.coarse_level());

    let tile = cell.areal_observation(4)?;
    assert_eq!(tile.coarse_level(), 6);
    assert_eq!(tile.fine_level(), tile.coarse_level() + 2);
    assert!((tile.resolution() - 9.0 / 0.37).abs() < 1e-1);
    Ok(())
}

#[test]
fn fine_level_equals_coarse_level_only_for_pointwise() -> Result<(), Box<dyn Error>> {
    let dataset = open_fixture()?;
    for observation in dataset.observations() {
        assert!(observation.fine_level() >= observation.coarse_level());
        assert_eq!(
            observation.fine_level() == observation.coarse_level(),
            observation.kind() == ObservationKind::Pointwise,
            "unexpected levels for {observation}"
        );
    }
    Ok(())
}

#[test]
fn observation_equality() -> Result<(), Box<dyn Error>> {
    let dataset = open_fixture()?;
    let cell = dataset.cell("R7852").ok_or("missing cell")?;

    let pixel = cell.pointwise_observation(2)?;
    let tile = cell.areal_observation(2)?;
    assert_ne!(pixel, tile);
    assert_eq!(pixel, pixel);
    assert_eq!(tile, tile);
    assert_eq!(
        dataset.observation("R7852", 2, ObservationKind::Pointwise),
        Some(pixel)
    );
    assert_ne!(cell.pointwise_observation(3)?, pixel);
    Ok(())
}

#[test]
fn invalid_band_is_rejected() -> Result<(), Box<dyn Error>> {
    let dataset = open_fixture()?;
    let cell = dataset.cell("R7852").ok_or("missing cell")?;

    assert_eq!(
        cell.pointwise_observation(7).unwrap_err(),
        InvalidBandError {
            band: 7,
            band_count: 7
        }
    );
    assert!(cell.areal_observation(100).is_err());
    assert!(cell.areal_observation(6).is_ok());
    Ok(())
}

#[test]
fn pixel_values() -> Result<(), Box<dyn Error>> {
    let dataset = open_fixture()?;
    let cell = dataset.cell("R7852").ok_or("missing cell")?;

    let values = cell
        .observations(None, Some(ObservationKind::Pointwise))
        .map(|o| o.pixel_value())
        .collect::<Option<Vec<_>>>()
        .ok_or("missing pixel value")?;
    assert_eq!(
        values,
        vec![4874.4, 4663.9, 4913.4, 5029.4, 5192.7, 4063.1, 3048.7]
    );
    assert_eq!(cell.areal_observation(0)?.pixel_value(), None);
    Ok(())
}

#[test]
fn tile_images_are_read_on_demand() -> Result<(), Box<dyn Error>> {
    let dataset = open_fixture()?;
    let cell = dataset.cell("R78").ok_or("missing cell")?;

    assert!(cell.pointwise_observation(0)?.tile_image()?.is_none());
    let image = cell
        .areal_observation(5)?
        .tile_image()?
        .ok_or("missing tile")?;
    assert_eq!(image.size(), 9);
    assert_eq!(image.pixels().len(), 81);
    assert!(image.to_data_uri()?.starts_with("data:image/png;base64,"));
    Ok(())
}

#[test]
fn meta_roundtrips_through_identifier() -> Result<(), Box<dyn Error>> {
    let dataset = open_fixture()?;
    let scheme = ObservationIriScheme::default();
    for observation in dataset.observations() {
        let iri = scheme.format(&observation.meta());
        assert_eq!(scheme.parse(iri.as_str())?, observation.meta());
    }

    let cell = dataset.cell("R78").ok_or("missing cell")?;
    insta::assert_snapshot!(
        scheme.format(&cell.areal_observation(5)?.meta()),
        @"<https://anulinkedearth.org/rdf/observation/2013/05/27/23/58/20/cell/R78/levelSquare-3/levelPixel-5/band-5>"
    );
    Ok(())
}
