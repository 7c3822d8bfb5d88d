use crate::error::{GraphError, GraphResult};

/// Mean Earth radius in statute miles (IUGG mean radius, 6371.0088 km).
pub const EARTH_RADIUS_MILES: f64 = 3958.7613;

/// A (latitude, longitude) pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Return self if both components are finite and in range.
    pub fn validated(self) -> GraphResult<Self> {
        let lat_ok = self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude);
        let lon_ok = self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude);
        if lat_ok && lon_ok {
            Ok(self)
        } else {
            Err(GraphError::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

/// Great-circle distance in miles between two coordinates.
///
/// Fails with [`GraphError::InvalidCoordinate`] if either point is out of range.
pub fn distance(a: Coordinate, b: Coordinate) -> GraphResult<f64> {
    Ok(haversine_miles(a.validated()?, b.validated()?))
}

/// Haversine on a sphere of radius [`EARTH_RADIUS_MILES`]. Inputs must be valid.
///
/// Exactly symmetric: swapping the arguments only negates the deltas, which
/// the squared sines absorb, and the cosine product commutes.
pub(crate) fn haversine_miles(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1.0 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_MILES * c
}
