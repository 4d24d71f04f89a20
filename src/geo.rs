//! GeoJSON transcoding for the kegiatan location field.
//!
//! Wire format in both directions is `{"type": "Point", "coordinates":
//! [longitude, latitude]}` with longitude first. Anything else fails
//! deserialization with a descriptive message instead of panicking.

use serde::de::Error as DeError;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl Serialize for GeoPoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("GeoPoint", 2)?;
        state.serialize_field("type", "Point")?;
        state.serialize_field("coordinates", &[self.longitude, self.latitude])?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for GeoPoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Repr {
            #[serde(rename = "type")]
            kind: String,
            coordinates: Vec<f64>,
        }

        let repr = Repr::deserialize(deserializer)?;
        if repr.kind != "Point" {
            return Err(D::Error::custom(format!(
                "lokasi must be a GeoJSON Point, got \"{}\"",
                repr.kind
            )));
        }
        match repr.coordinates[..] {
            [longitude, latitude] => Ok(GeoPoint {
                longitude,
                latitude,
            }),
            _ => Err(D::Error::custom(
                "coordinates must be [longitude, latitude]",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_longitude_first() {
        let point = GeoPoint::new(110.370529, -7.797068);
        let value = serde_json::to_value(point).unwrap();
        assert_eq!(
            value,
            json!({ "type": "Point", "coordinates": [110.370529, -7.797068] })
        );
    }

    #[test]
    fn round_trips_exactly() {
        let point = GeoPoint::new(106.816666, -6.914744);
        let encoded = serde_json::to_string(&point).unwrap();
        let decoded: GeoPoint = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, point);
    }

    #[test]
    fn rejects_wrong_geometry_type() {
        let err = serde_json::from_value::<GeoPoint>(
            json!({ "type": "Polygon", "coordinates": [1.0, 2.0] }),
        )
        .unwrap_err();
        assert!(err.to_string().contains("GeoJSON Point"));
    }

    #[test]
    fn rejects_wrong_arity() {
        assert!(
            serde_json::from_value::<GeoPoint>(json!({ "type": "Point", "coordinates": [1.0] }))
                .is_err()
        );
        assert!(
            serde_json::from_value::<GeoPoint>(
                json!({ "type": "Point", "coordinates": [1.0, 2.0, 3.0] })
            )
            .is_err()
        );
    }

    #[test]
    fn rejects_non_numeric_coordinates() {
        assert!(
            serde_json::from_value::<GeoPoint>(
                json!({ "type": "Point", "coordinates": ["a", "b"] })
            )
            .is_err()
        );
    }

    #[test]
    fn rejects_missing_coordinates() {
        assert!(serde_json::from_value::<GeoPoint>(json!({ "type": "Point" })).is_err());
    }
}
