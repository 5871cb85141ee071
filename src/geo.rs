const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A point on the (spherical) earth, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance in meters (spherical law of cosines).
    pub fn distance(&self, other: &Coordinates) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lon = (self.longitude - other.longitude).abs().to_radians();
        // Rounding can push the cosine slightly outside [-1, 1] for (nearly) equal points.
        let cos_angle = (lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * delta_lon.cos())
            .clamp(-1.0, 1.0);
        cos_angle.acos() * EARTH_RADIUS_M
    }
}
