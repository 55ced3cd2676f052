use crate::domain::model::{Coordinate, Place};
use serde::{Deserialize, Serialize};

/// One match returned by the geocoding provider.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeCandidate {
    pub coordinate: Coordinate,
    pub display_name: Option<String>,
    pub importance: Option<f64>,
}

/// Picks the coordinate to use when the geocoder returns several matches.
pub trait CandidateStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn select(&self, place: &Place, candidates: Vec<GeocodeCandidate>) -> Option<GeocodeCandidate>;
}

/// Takes the provider's first match, whatever it is. Ambiguous place names
/// may resolve to the wrong location.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCandidate;

impl CandidateStrategy for FirstCandidate {
    fn name(&self) -> &'static str {
        "first"
    }

    fn select(&self, _place: &Place, candidates: Vec<GeocodeCandidate>) -> Option<GeocodeCandidate> {
        candidates.into_iter().next()
    }
}

/// Takes the match with the highest provider importance score. Ties and
/// missing scores fall back to provider order.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighestImportance;

impl CandidateStrategy for HighestImportance {
    fn name(&self) -> &'static str {
        "highest_importance"
    }

    fn select(&self, _place: &Place, candidates: Vec<GeocodeCandidate>) -> Option<GeocodeCandidate> {
        let mut best: Option<GeocodeCandidate> = None;
        for candidate in candidates {
            let better = match &best {
                None => true,
                Some(current) => {
                    candidate.importance.unwrap_or(f64::MIN) > current.importance.unwrap_or(f64::MIN)
                }
            };
            if better {
                best = Some(candidate);
            }
        }
        best
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    First,
    HighestImportance,
}

impl StrategyKind {
    pub fn into_strategy(self) -> Box<dyn CandidateStrategy> {
        match self {
            StrategyKind::First => Box::new(FirstCandidate),
            StrategyKind::HighestImportance => Box::new(HighestImportance),
        }
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" => Ok(StrategyKind::First),
            "highest_importance" | "highest-importance" => Ok(StrategyKind::HighestImportance),
            other => Err(format!(
                "unknown candidate strategy '{}', expected 'first' or 'highest_importance'",
                other
            )),
        }
    }
}
