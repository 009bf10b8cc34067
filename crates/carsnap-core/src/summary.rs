// ── Listing summary ──
//
// Four lines, the same shape for both sites:
//
//   <headline>
//   <mileage> км
//   <fuel> <liters>L
//   <price>

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::format::{display_price, format_krw, format_liters, group_thousands};
use crate::fuel::translate_fuel;

/// Raw values a summary is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryFields {
    /// Make, model and trim followed by the year part, already assembled.
    pub headline: String,
    /// Odometer in km.
    pub mileage: i64,
    /// Fuel label as the API sends it (Korean).
    pub fuel: String,
    /// Displacement in cc.
    pub displacement_cc: i64,
    /// Asking price in units of 10,000 KRW.
    pub raw_price: i64,
}

/// Human-readable multi-line listing summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingSummary(String);

impl ListingSummary {
    pub fn render(fields: &SummaryFields) -> Self {
        Self(format!(
            "{}\n{} км\n{} {}L\n{}",
            fields.headline,
            group_thousands(fields.mileage),
            translate_fuel(&fields.fuel),
            format_liters(fields.displacement_cc),
            format_krw(display_price(fields.raw_price)),
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ListingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
