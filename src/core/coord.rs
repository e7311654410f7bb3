//! Geografische Koordinate und Großkreis-Hilfsfunktionen (Kugelmodell).
//!
//! Konvention: Peilungen sind wahre Peilungen in Radiant, gemessen ab Norden
//! im Uhrzeigersinn (0 = Nord, π/2 = Ost). Koordinaten liegen in Grad vor.

use std::f64::consts::TAU;

/// Erdradius in Metern für alle Großkreis-Rechnungen.
pub const EARTH_RADIUS_METERS: f64 = 6_378_100.0;

/// Toleranz in Grad, unter der zwei Koordinaten als identisch gelten.
const SAME_POSITION_EPSILON_DEG: f64 = 1e-12;

/// Geografische Position (Breite/Länge in Grad)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LatLon {
    /// Breitengrad in Grad
    pub lat: f64,
    /// Längengrad in Grad
    pub lon: f64,
}

impl LatLon {
    /// Erstellt eine neue Koordinate.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Zielpunkt nach `distance_m` Metern entlang der Peilung `bearing_rad`.
    ///
    /// Direkte Großkreis-Aufgabe auf der Kugel mit [`EARTH_RADIUS_METERS`].
    pub fn destination_point(&self, bearing_rad: f64, distance_m: f64) -> LatLon {
        let lat1 = self.lat.to_radians();
        let lon1 = self.lon.to_radians();
        let delta = distance_m / EARTH_RADIUS_METERS;

        let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * bearing_rad.cos()).asin();
        let lon2 = lon1
            + (bearing_rad.sin() * delta.sin() * lat1.cos())
                .atan2(delta.cos() - lat1.sin() * lat2.sin());

        LatLon::new(lat2.to_degrees(), normalize_lon(lon2.to_degrees()))
    }

    /// Wahre Anfangs-Peilung von `self` nach `other`, normiert auf `[0, 2π)`.
    pub fn bearing_to(&self, other: &LatLon) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let delta_lon = (other.lon - self.lon).to_radians();

        let y = delta_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();
        normalize_angle(y.atan2(x))
    }

    /// Großkreis-Distanz in Metern (Haversine).
    pub fn distance_to(&self, other: &LatLon) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = (other.lon - self.lon).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_METERS * a.sqrt().atan2((1.0 - a).sqrt())
    }

    /// Prüft, ob beide Koordinaten (praktisch) dieselbe Position bezeichnen.
    pub fn same_position(&self, other: &LatLon) -> bool {
        (self.lat - other.lat).abs() <= SAME_POSITION_EPSILON_DEG
            && (self.lon - other.lon).abs() <= SAME_POSITION_EPSILON_DEG
    }
}

/// Normiert einen Winkel in Radiant auf `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid kann bei winzigen negativen Werten genau TAU liefern
    if a >= TAU {
        0.0
    } else {
        a
    }
}

fn normalize_lon(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        lon
    } else {
        (lon + 540.0).rem_euclid(360.0) - 180.0
    }
}
