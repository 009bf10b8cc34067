// HeyDealer API response types
//
// Snake-case JSON. `auction` is absent for cars that never went to auction,
// and `carhistory` is missing on some older listings.

use serde::{Deserialize, Serialize};

use crate::scalar::{Scalar, null_as_default};

/// `GET /v2/dealers/web/cars/{id}` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeyDealerCar {
    pub detail: HeyDealerDetail,
    #[serde(default)]
    pub auction: Option<HeyDealerAuction>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl HeyDealerCar {
    /// Seller's desired price in units of 10,000 KRW, `0` when unknown.
    pub fn desired_price(&self) -> i64 {
        self.auction
            .as_ref()
            .and_then(|a| a.desired_price)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeyDealerDetail {
    /// Absolute photo URLs, in display order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_urls: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mileage: i64,
    /// Fuel type in Korean (e.g. `디젤`).
    #[serde(default, deserialize_with = "null_as_default")]
    pub fuel_display: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    /// ISO date, `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub initial_registration_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub year: Scalar,
    #[serde(default)]
    pub carhistory: Option<HeyDealerCarHistory>,
}

impl HeyDealerDetail {
    /// Engine displacement in cc, `0` when the history block is missing.
    pub fn displacement(&self) -> i64 {
        self.carhistory
            .as_ref()
            .and_then(|h| h.displacement)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeyDealerCarHistory {
    #[serde(default)]
    pub displacement: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeyDealerAuction {
    #[serde(default)]
    pub desired_price: Option<i64>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    #[test]
    fn missing_auction_and_history_default_to_zero() {
        let car: HeyDealerCar = serde_json::from_value(json!({
            "detail": { "full_name": "Kia K5", "image_urls": [] }
        }))
        .unwrap();
        assert_eq!(car.desired_price(), 0);
        assert_eq!(car.detail.displacement(), 0);
    }

    #[test]
    fn null_desired_price_defaults_to_zero() {
        let car: HeyDealerCar = serde_json::from_value(json!({
            "detail": { "carhistory": { "displacement": 1598 } },
            "auction": { "desired_price": null }
        }))
        .unwrap();
        assert_eq!(car.desired_price(), 0);
        assert_eq!(car.detail.displacement(), 1598);
    }

    #[test]
    fn null_mileage_and_year_fall_back_to_defaults() {
        let car: HeyDealerCar = serde_json::from_value(json!({
            "detail": {
                "image_urls": null,
                "mileage": null,
                "fuel_display": null,
                "full_name": "Kia K5",
                "year": null
            }
        }))
        .unwrap();
        assert!(car.detail.image_urls.is_empty());
        assert_eq!(car.detail.mileage, 0);
        assert_eq!(car.detail.fuel_display, "");
        assert_eq!(car.detail.year.to_string(), "");
    }
}
