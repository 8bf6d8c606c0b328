//! Radius search over registry establishments.
//!
//! Each record is converted to WGS84 through the pipeline for its EPSG code,
//! measured against the search centre and kept when it lies within the radius.
//! A record that cannot be converted is reported in `skipped` and never fails
//! the batch.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{ProjError, SearchError};
use crate::geodesic::distance_km;
use crate::point::{GeoPoint, ProjectedPoint};
use crate::proj::pipeline::{Pipeline, EPSG_LAMBERT93};

/// One establishment from the company registry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Establishment {
    pub siret: String,
    #[serde(default)]
    pub name: Option<String>,
    /// NAF activity code, e.g. "62.01Z".
    #[serde(default)]
    pub naf: Option<String>,
    #[serde(flatten)]
    pub position: ProjectedPoint,
    /// CRS of `position`; Lambert-93 when absent.
    #[serde(default)]
    pub epsg: Option<u32>,
}

impl Establishment {
    pub fn epsg(&self) -> u32 {
        self.epsg.unwrap_or(EPSG_LAMBERT93)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchArea {
    pub center: GeoPoint,
    pub radius_km: f64,
    /// Keep only establishments whose NAF code starts with this prefix.
    pub naf_prefix: Option<String>,
}

impl SearchArea {
    pub fn new(center: GeoPoint, radius_km: f64) -> Self {
        Self {
            center,
            radius_km,
            naf_prefix: None,
        }
    }

    pub fn with_naf_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.naf_prefix = Some(prefix.into());
        self
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        self.center
            .validate()
            .map_err(|e| SearchError::InvalidArea(e.to_string()))?;
        if !self.radius_km.is_finite() || self.radius_km < 0.0 {
            return Err(SearchError::InvalidArea(format!(
                "radius must be a finite, non-negative number of km, got {}",
                self.radius_km
            )));
        }
        Ok(())
    }

    fn matches_naf(&self, naf: Option<&str>) -> bool {
        match &self.naf_prefix {
            None => true,
            Some(prefix) => {
                let prefix = normalize_naf(prefix);
                naf.map(|code| normalize_naf(code).starts_with(&prefix))
                    .unwrap_or(false)
            }
        }
    }
}

/// "62.01z" and "6201Z" compare equal.
fn normalize_naf(code: &str) -> String {
    code.chars()
        .filter(|c| !matches!(c, '.' | ' '))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// An establishment inside the search radius.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Match {
    #[serde(flatten)]
    pub establishment: Establishment,
    pub location: GeoPoint,
    /// Exact distance; serialised rounded to 2 decimals.
    #[serde(serialize_with = "serialize_rounded_km")]
    pub distance_km: f64,
}

fn serialize_rounded_km<S: Serializer>(km: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_km(*km))
}

/// Round a distance to 2 decimals for display.
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

/// A record left out because it could not be located.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Skipped {
    pub siret: String,
    pub reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub matches: Vec<Match>,
    pub skipped: Vec<Skipped>,
}

impl SearchOutcome {
    pub fn to_json(&self) -> Result<String, SearchError> {
        Ok(serde_json::to_string(self)?)
    }
}

enum Located {
    Inside(Match),
    Outside,
    Filtered,
    Failed(Skipped),
}

/// Find the establishments within `area`, nearest first.
pub fn search(records: &[Establishment], area: &SearchArea) -> Result<SearchOutcome, SearchError> {
    area.validate()?;

    // One pipeline per distinct CRS; an unknown code fails only its records.
    let mut pipelines: HashMap<u32, Result<Pipeline, ProjError>> = HashMap::new();
    for record in records {
        let code = record.epsg();
        pipelines
            .entry(code)
            .or_insert_with(|| Pipeline::for_epsg(code));
    }

    let located: Vec<Located> = records
        .par_iter()
        .map(|record| {
            if !area.matches_naf(record.naf.as_deref()) {
                return Located::Filtered;
            }
            let result = match pipelines.get(&record.epsg()) {
                Some(Ok(pipeline)) => locate(record, pipeline, &area.center),
                Some(Err(e)) => Err(e.clone()),
                None => Err(ProjError::UnknownCrs(format!("EPSG:{}", record.epsg()))),
            };
            match result {
                Ok((location, distance)) if distance <= area.radius_km => Located::Inside(Match {
                    establishment: record.clone(),
                    location,
                    distance_km: distance,
                }),
                Ok(_) => Located::Outside,
                Err(e) => {
                    log::warn!("skipping establishment {}: {e}", record.siret);
                    Located::Failed(Skipped {
                        siret: record.siret.clone(),
                        reason: e.to_string(),
                    })
                }
            }
        })
        .collect();

    let mut outcome = SearchOutcome::default();
    for item in located {
        match item {
            Located::Inside(m) => outcome.matches.push(m),
            Located::Failed(s) => outcome.skipped.push(s),
            Located::Outside | Located::Filtered => {}
        }
    }
    outcome.matches.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.establishment.siret.cmp(&b.establishment.siret))
    });

    log::info!(
        "radius search: {} records, {} within {} km, {} skipped",
        records.len(),
        outcome.matches.len(),
        area.radius_km,
        outcome.skipped.len()
    );
    Ok(outcome)
}

fn locate(
    record: &Establishment,
    pipeline: &Pipeline,
    center: &GeoPoint,
) -> Result<(GeoPoint, f64), ProjError> {
    let location = pipeline.to_geo(&record.position)?;
    let distance = distance_km(center, &location)?;
    Ok((location, distance))
}

/// Parse a JSON array of establishments, search, and return the outcome as JSON.
///
/// Only a document that is not a JSON array is an error. Elements that do not
/// deserialise as an establishment are reported in `skipped`, ahead of the
/// records that failed conversion.
pub fn search_json(records_json: &str, area: &SearchArea) -> Result<String, SearchError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(records_json)?;

    let mut records = Vec::with_capacity(values.len());
    let mut malformed = Vec::new();
    for value in values {
        let siret = value
            .get("siret")
            .and_then(|s| s.as_str())
            .unwrap_or_default()
            .to_string();
        match serde_json::from_value::<Establishment>(value) {
            Ok(record) => records.push(record),
            Err(e) => {
                log::warn!("skipping malformed record {siret:?}: {e}");
                malformed.push(Skipped {
                    siret,
                    reason: e.to_string(),
                });
            }
        }
    }

    let mut outcome = search(&records, area)?;
    malformed.append(&mut outcome.skipped);
    outcome.skipped = malformed;
    outcome.to_json()
}
