use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A geographic position. Serialized as a two-element `[lat, lng]` array,
/// the format used by the markup attributes and the `lastpos` store key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const ORIGIN: LatLng = LatLng { lat: 0.0, lng: 0.0 };

    pub fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }

    /// Finite and inside [-90, 90] x [-180, 180]
    pub fn is_valid(self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    /// Clamp into the valid range, wrapping longitude. Non-finite
    /// components fall back to 0.
    pub fn normalized(self) -> Self {
        let lat = if self.lat.is_finite() {
            self.lat.clamp(-90.0, 90.0)
        } else {
            0.0
        };
        let lng = if !self.lng.is_finite() {
            0.0
        } else if (-180.0..=180.0).contains(&self.lng) {
            self.lng
        } else {
            (self.lng + 180.0).rem_euclid(360.0) - 180.0
        };
        LatLng { lat, lng }
    }

    /// JSON text, e.g. `[59.3,18.1]`
    pub fn to_json(self) -> String {
        format!("[{},{}]", self.lat, self.lng)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

impl Serialize for LatLng {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.lat, self.lng).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LatLng {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (lat, lng) = <(f64, f64)>::deserialize(deserializer)?;
        Ok(LatLng { lat, lng })
    }
}

/// One photo in a group map: `[lat, lng, label]`. The label is the photo id
/// (server sends it as a number or a string).
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub pos: LatLng,
    pub label: String,
}

impl MapPoint {
    /// Link to the photo's detail page
    pub fn href(&self) -> String {
        format!("/img/{}", self.label)
    }
}

impl<'de> Deserialize<'de> for MapPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (lat, lng, label) = <(f64, f64, serde_json::Value)>::deserialize(deserializer)?;
        let label = match label {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        Ok(MapPoint {
            pos: LatLng { lat, lng },
            label,
        })
    }
}

/// What the client knows about the photo being administered, scraped from
/// the detail page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoDetails {
    pub imgid: Option<u32>,
    /// 0-100
    pub grade: Option<u8>,
    pub position: Option<LatLng>,
    /// Group positions (photo groups and search result pages)
    pub positions: Vec<MapPoint>,
    /// Text of the page's `.meta` block, one entry per line
    pub meta: Vec<String>,
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latlng_json_form() {
        let p = LatLng::new(59.3, 18.1);
        assert_eq!(p.to_json(), "[59.3,18.1]");
        assert_eq!(serde_json::to_string(&p).unwrap(), "[59.3,18.1]");
        let back: LatLng = serde_json::from_str("[59.3,18.1]").unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn latlng_normalizes_longitude() {
        let p = LatLng::new(95.0, 190.0).normalized();
        assert_eq!(p.lat, 90.0);
        assert!((p.lng - -170.0).abs() < 1e-9);
    }

    #[test]
    fn huge_longitude_wraps_without_looping() {
        let p = LatLng::new(10.0, 1e20).normalized();
        assert!(p.is_valid(), "{p:?}");
        let p = LatLng::new(-1e300, -1e20).normalized();
        assert!(p.is_valid(), "{p:?}");
        assert_eq!(p.lat, -90.0);
    }

    #[test]
    fn non_finite_components_reset() {
        let p = LatLng::new(f64::NAN, f64::INFINITY).normalized();
        assert_eq!(p, LatLng::ORIGIN);
        assert!(!LatLng::new(f64::NAN, 0.0).is_valid());
        assert!(!LatLng::new(0.0, 181.0).is_valid());
        assert!(LatLng::new(-90.0, 180.0).is_valid());
    }

    #[test]
    fn map_point_label_may_be_numeric() {
        let pts: Vec<MapPoint> =
            serde_json::from_str(r#"[[59.3, 18.1, 1234], [57.7, 11.9, "88"]]"#).unwrap();
        assert_eq!(pts[0].label, "1234");
        assert_eq!(pts[0].href(), "/img/1234");
        assert_eq!(pts[1].label, "88");
        assert_eq!(pts[1].pos, LatLng::new(57.7, 11.9));
    }
}
