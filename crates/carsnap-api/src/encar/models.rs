// Encar API response types
//
// The read-side vehicle document is large; only the blocks needed for the
// photo list and the summary are modelled. Leaf fields fall back to their
// default when the key is missing or `null`; listings are inconsistent about
// both. Everything else lands in `extra`.

use serde::{Deserialize, Serialize};

use crate::scalar::{Scalar, null_as_default};

/// `GET /v1/readside/vehicle/{id}` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncarVehicle {
    #[serde(default, deserialize_with = "null_as_default")]
    pub photos: Vec<EncarPhoto>,
    pub category: EncarCategory,
    pub spec: EncarSpec,
    pub advertisement: EncarAdvertisement,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One entry of `photos`. `path` is relative to the image CDN host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncarPhoto {
    pub path: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncarCategory {
    #[serde(default, deserialize_with = "null_as_default")]
    pub manufacturer_english_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub model_group_english_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub grade_english_name: String,
    /// Registration year and month, `YYYYMM`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub year_month: String,
    /// Model (form) year.
    #[serde(default, deserialize_with = "null_as_default")]
    pub form_year: Scalar,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncarSpec {
    /// Odometer reading in kilometres.
    #[serde(default, deserialize_with = "null_as_default")]
    pub mileage: i64,
    /// Fuel type in Korean (e.g. `가솔린`).
    #[serde(default, deserialize_with = "null_as_default")]
    pub fuel_name: String,
    /// Engine displacement in cc.
    #[serde(default, deserialize_with = "null_as_default")]
    pub displacement: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncarAdvertisement {
    /// Asking price in units of 10,000 KRW.
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: i64,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    #[test]
    fn null_leaves_fall_back_to_defaults() {
        let vehicle: EncarVehicle = serde_json::from_value(json!({
            "photos": [{ "path": "/p/1.jpg" }],
            "category": {
                "manufacturerEnglishName": "Kia",
                "modelGroupEnglishName": null,
                "yearMonth": "202201",
                "formYear": null
            },
            "spec": { "mileage": null, "fuelName": null, "displacement": null },
            "advertisement": { "price": null }
        }))
        .unwrap();

        assert_eq!(vehicle.category.manufacturer_english_name, "Kia");
        assert_eq!(vehicle.category.model_group_english_name, "");
        assert_eq!(vehicle.category.form_year.to_string(), "");
        assert_eq!(vehicle.spec.mileage, 0);
        assert_eq!(vehicle.spec.fuel_name, "");
        assert_eq!(vehicle.spec.displacement, 0);
        assert_eq!(vehicle.advertisement.price, 0);
    }
}
