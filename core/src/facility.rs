use serde::Serialize;

use crate::distance::Coordinate;
use crate::error::{GraphError, GraphResult};
use crate::graph::NodeId;

/// A facility as read from the source, before it has been assigned an id.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityRecord {
    pub name: String,
    pub city: String,
    pub zip: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// An immutable, loaded facility. `id` is its position in the [`FacilityStore`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facility {
    pub id: NodeId,
    pub name: String,
    pub city: String,
    pub zip: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Facility {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    pub fn map_link(&self) -> String {
        map_link(self.coordinate())
    }
}

/// Google Maps search link for a coordinate, in decimal degrees.
pub fn map_link(coord: Coordinate) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={},{}",
        coord.latitude, coord.longitude
    )
}

/// All facilities loaded for a region, in load order.
///
/// Ids are dense: the facility at position `i` has id `i`. The graph is
/// built over a leading [`sample`](FacilityStore::sample) of the store, while
/// ZIP search covers every record.
#[derive(Debug, Clone, Default)]
pub struct FacilityStore {
    facilities: Vec<Facility>,
}

impl FacilityStore {
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = FacilityRecord>,
    {
        let facilities = records
            .into_iter()
            .enumerate()
            .map(|(idx, r)| Facility {
                id: idx as NodeId,
                name: r.name,
                city: r.city,
                zip: r.zip,
                latitude: r.latitude,
                longitude: r.longitude,
            })
            .collect();
        Self { facilities }
    }

    pub fn get(&self, id: NodeId) -> Option<&Facility> {
        usize::try_from(id).ok().and_then(|idx| self.facilities.get(idx))
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Facility> {
        self.facilities.iter()
    }

    /// The first `n` facilities (all of them if the store is smaller).
    pub fn sample(&self, n: usize) -> &[Facility] {
        &self.facilities[..n.min(self.facilities.len())]
    }

    /// Facilities whose ZIP code starts with `prefix`, in id order.
    ///
    /// The prefix must be 1–5 ASCII digits; surrounding whitespace is ignored.
    /// ZIP+4 values ("48201-1234") match on their leading five digits.
    pub fn search_zip(&self, prefix: &str) -> GraphResult<Vec<&Facility>> {
        let prefix = prefix.trim();
        if prefix.is_empty() || prefix.len() > 5 || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GraphError::InvalidZipPrefix(prefix.to_string()));
        }

        Ok(self
            .facilities
            .iter()
            .filter(|f| f.zip.trim().starts_with(prefix))
            .collect())
    }
}
