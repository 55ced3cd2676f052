use async_trait::async_trait;
use region_store_finder::domain::ports::{Geocoder, RegionDirectory, StoreFinder};
use region_store_finder::{
    AggregationPipeline, Coordinate, FaultKind, NoopPacer, Place, ProviderFault, ProviderResult,
    Region, StoreRecord,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

struct StubDirectory {
    result: ProviderResult<Vec<String>>,
}

impl StubDirectory {
    fn places(names: &[&str]) -> Self {
        Self {
            result: Ok(names.iter().map(|n| n.to_string()).collect()),
        }
    }

    fn failing(kind: FaultKind) -> Self {
        Self {
            result: Err(ProviderFault::new(kind, "directory unavailable")),
        }
    }
}

#[async_trait]
impl RegionDirectory for StubDirectory {
    async fn list_places(&self, region: &Region) -> ProviderResult<Vec<Place>> {
        assert_eq!(region.code(), region.code().to_lowercase());
        self.result
            .clone()
            .map(|names| names.into_iter().map(Place::new).collect())
    }
}

#[derive(Default)]
struct StubGeocoder {
    coordinates: HashMap<String, Coordinate>,
}

impl StubGeocoder {
    fn with(mut self, place: &str, lat: &str, lon: &str) -> Self {
        self.coordinates
            .insert(place.to_string(), Coordinate::new(lat, lon));
        self
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn geocode(&self, place: &Place, _region: &Region) -> ProviderResult<Coordinate> {
        self.coordinates
            .get(place.name())
            .cloned()
            .ok_or_else(|| ProviderFault::not_found(format!("no match for {}", place)))
    }
}

/// Answers per coordinate; unknown coordinates fail at the transport level.
#[derive(Default)]
struct StubStoreFinder {
    stores: HashMap<(String, String), Vec<StoreRecord>>,
    queried: Arc<Mutex<Vec<Coordinate>>>,
}

impl StubStoreFinder {
    fn with(mut self, lat: &str, lon: &str, stores: Vec<StoreRecord>) -> Self {
        self.stores
            .insert((lat.to_string(), lon.to_string()), stores);
        self
    }
}

#[async_trait]
impl StoreFinder for StubStoreFinder {
    async fn find_nearby(&self, coordinate: &Coordinate) -> ProviderResult<Vec<StoreRecord>> {
        self.queried.lock().unwrap().push(coordinate.clone());
        self.stores
            .get(&(coordinate.latitude.clone(), coordinate.longitude.clone()))
            .cloned()
            .ok_or_else(|| ProviderFault::transport("connection reset by peer"))
    }
}

fn pipeline(
    directory: StubDirectory,
    geocoder: StubGeocoder,
    finder: StubStoreFinder,
) -> AggregationPipeline {
    AggregationPipeline::new(Box::new(directory), Box::new(geocoder), Box::new(finder))
        .with_pacer(Box::new(NoopPacer))
}

fn campinas_scenario() -> AggregationPipeline {
    pipeline(
        StubDirectory::places(&["Campinas", "Santos"]),
        StubGeocoder::default().with("Campinas", "-22.9", "-47.0"),
        StubStoreFinder::default().with(
            "-22.9",
            "-47.0",
            vec![StoreRecord::new("Loja A", "Rua X", 1.2)],
        ),
    )
}

#[tokio::test]
async fn test_campinas_and_santos_scenario() {
    let outcome = campinas_scenario().run(&Region::new("sp")).await.unwrap();

    let report = &outcome.report;
    assert_eq!(report.len(), 1);
    let entry = report.get("Campinas").unwrap();
    assert_eq!(entry.coordinates, Coordinate::new("-22.9", "-47.0"));
    assert_eq!(entry.stores, vec![StoreRecord::new("Loja A", "Rua X", 1.2)]);
    assert!(!report.contains("Santos"));

    assert_eq!(outcome.summary.places_listed, 2);
    assert_eq!(outcome.summary.places_resolved, 1);
    assert_eq!(outcome.summary.unresolved, vec!["Santos".to_string()]);
}

#[tokio::test]
async fn test_report_keys_are_a_subset_of_directory_places() {
    let directory_places = ["Campinas", "Santos", "Sorocaba", "Jundiaí"];
    let pipeline = pipeline(
        StubDirectory::places(&directory_places),
        StubGeocoder::default()
            .with("Campinas", "-22.9", "-47.0")
            .with("Sorocaba", "-23.5", "-47.4")
            .with("Jundiaí", "-23.2", "-46.9"),
        StubStoreFinder::default()
            .with("-22.9", "-47.0", vec![])
            .with("-23.5", "-47.4", vec![]),
    );

    let outcome = pipeline.run(&Region::new("SP")).await.unwrap();

    for place in outcome.report.places() {
        assert!(directory_places.contains(&place));
    }
    let places: Vec<&str> = outcome.report.places().collect();
    assert_eq!(places, vec!["Campinas", "Sorocaba", "Jundiaí"]);
}

#[tokio::test]
async fn test_entries_only_for_resolved_places() {
    let pipeline = pipeline(
        StubDirectory::places(&["A", "B", "C"]),
        StubGeocoder::default().with("B", "1.0", "2.0"),
        StubStoreFinder::default().with("1.0", "2.0", vec![]),
    );

    let outcome = pipeline.run(&Region::new("mg")).await.unwrap();

    let places: Vec<&str> = outcome.report.places().collect();
    assert_eq!(places, vec!["B"]);
    assert_eq!(outcome.summary.unresolved, vec!["A".to_string(), "C".to_string()]);
}

#[tokio::test]
async fn test_store_transport_failure_keeps_place_with_no_stores() {
    let finder = StubStoreFinder::default();
    let queried = finder.queried.clone();
    let pipeline = pipeline(
        StubDirectory::places(&["Campinas"]),
        StubGeocoder::default().with("Campinas", "-22.9", "-47.0"),
        finder,
    );

    let outcome = pipeline.run(&Region::new("sp")).await.unwrap();

    let entry = outcome.report.get("Campinas").unwrap();
    assert_eq!(entry.coordinates, Coordinate::new("-22.9", "-47.0"));
    assert!(entry.stores.is_empty());
    assert_eq!(queried.lock().unwrap().len(), 1);
    assert_eq!(outcome.summary.faults.len(), 1);
    assert_eq!(outcome.summary.faults[0].fault.kind, FaultKind::Transport);
}

#[tokio::test]
async fn test_directory_failure_of_any_kind_yields_empty_report() {
    for kind in [
        FaultKind::Transport,
        FaultKind::ProviderStatus,
        FaultKind::MalformedResponse,
        FaultKind::NotFound,
    ] {
        let pipeline = pipeline(
            StubDirectory::failing(kind),
            StubGeocoder::default(),
            StubStoreFinder::default(),
        );

        let outcome = pipeline.run(&Region::new("sp")).await.unwrap();

        assert!(outcome.report.is_empty(), "{kind:?} should give an empty report");
        assert_eq!(serde_json::to_string(&outcome.report).unwrap(), "{}");
    }
}

#[tokio::test]
async fn test_empty_data_array_keeps_entry() {
    let pipeline = pipeline(
        StubDirectory::places(&["Ilhabela"]),
        StubGeocoder::default().with("Ilhabela", "-23.8", "-45.4"),
        StubStoreFinder::default().with("-23.8", "-45.4", vec![]),
    );

    let outcome = pipeline.run(&Region::new("sp")).await.unwrap();

    let entry = outcome.report.get("Ilhabela").unwrap();
    assert_eq!(entry.coordinates, Coordinate::new("-23.8", "-45.4"));
    assert!(entry.stores.is_empty());
    assert!(outcome.summary.faults.is_empty());
}

#[tokio::test]
async fn test_runs_are_idempotent_with_deterministic_providers() {
    let pipeline = campinas_scenario();

    let first = pipeline.run(&Region::new("sp")).await.unwrap();
    let second = pipeline.run(&Region::new("sp")).await.unwrap();

    assert_eq!(
        serde_json::to_vec(&first.report).unwrap(),
        serde_json::to_vec(&second.report).unwrap()
    );
    assert_eq!(first.summary, second.summary);
}
