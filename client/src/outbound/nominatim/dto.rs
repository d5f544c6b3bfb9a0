//! DTOs for decoding Nominatim search responses.
//!
//! Nominatim encodes coordinates as decimal strings; numbers are accepted as
//! well so compatible geocoders can be swapped in.

use serde::Deserialize;

use crate::domain::SearchResult;

#[derive(Debug, Deserialize)]
pub(super) struct NominatimPlaceDto {
    pub(super) lat: CoordinateValueDto,
    pub(super) lon: CoordinateValueDto,
    pub(super) display_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum CoordinateValueDto {
    Number(f64),
    Text(String),
}

impl CoordinateValueDto {
    fn to_f64(&self) -> Option<f64> {
        let parsed = match self {
            Self::Number(value) => Some(*value),
            Self::Text(raw) => raw.trim().parse::<f64>().ok(),
        };
        parsed.filter(|candidate| candidate.is_finite())
    }
}

impl NominatimPlaceDto {
    pub(super) fn into_search_result(self) -> Result<SearchResult, String> {
        let (Some(latitude), Some(longitude)) = (self.lat.to_f64(), self.lon.to_f64()) else {
            return Err(format!(
                "candidate '{}' has non-numeric coordinates",
                self.display_name
            ));
        };
        Ok(SearchResult {
            latitude,
            longitude,
            display_name: self.display_name,
        })
    }
}
