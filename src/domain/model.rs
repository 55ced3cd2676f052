use crate::domain::fault::{ProviderFault, Stage};
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Administrative region code, e.g. a state abbreviation (`sp`, `rj`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_lowercase())
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Place(String);

impl Place {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Latitude/longitude as the geocoding provider wrote them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: String,
    pub longitude: String,
}

impl Coordinate {
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    pub fn as_degrees(&self) -> Option<(f64, f64)> {
        let lat = self.latitude.trim().parse().ok()?;
        let lon = self.longitude.trim().parse().ok()?;
        Some((lat, lon))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpeningHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thursday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturday: Option<String>,
    pub open_on_sunday: bool,
    pub open_on_holidays: bool,
}

impl OpeningHours {
    pub fn is_empty(&self) -> bool {
        *self == OpeningHours::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub name: String,
    pub address: String,
    /// Distance from the query point, in the provider's unit (km).
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<String>,
    #[serde(default, skip_serializing_if = "OpeningHours::is_empty")]
    pub opening_hours: OpeningHours,
}

impl StoreRecord {
    pub fn new(name: impl Into<String>, address: impl Into<String>, distance: f64) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            distance: Some(distance),
            store_id: None,
            whatsapp: None,
            services: None,
            opening_hours: OpeningHours::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub coordinates: Coordinate,
    pub stores: Vec<StoreRecord>,
}

/// Place name → entry, in the order the places were first inserted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    entries: Vec<(String, ReportEntry)>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry. A name that is already present keeps its position
    /// and gets the new entry.
    pub fn insert(&mut self, place: &Place, entry: ReportEntry) {
        match self.entries.iter_mut().find(|(name, _)| name == place.name()) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((place.name().to_string(), entry)),
        }
    }

    pub fn get(&self, place: &str) -> Option<&ReportEntry> {
        self.entries
            .iter()
            .find(|(name, _)| name == place)
            .map(|(_, entry)| entry)
    }

    pub fn contains(&self, place: &str) -> bool {
        self.get(place).is_some()
    }

    pub fn places(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReportEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn store_count(&self) -> usize {
        self.entries.iter().map(|(_, entry)| entry.stores.len()).sum()
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, entry) in &self.entries {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceFault {
    pub place: Option<String>,
    pub stage: Stage,
    pub fault: ProviderFault,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub places_listed: usize,
    pub places_resolved: usize,
    /// Places the geocoder had no coordinate for. They get no report entry.
    pub unresolved: Vec<String>,
    pub faults: Vec<PlaceFault>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub region: Region,
    pub generated_at: DateTime<Utc>,
    pub report: Report,
    pub summary: RunSummary,
}
