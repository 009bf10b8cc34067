// ── Listing sources ──
//
// A `ListingSource` turns a `ListingReference` into photos plus a summary.
// `MarketplaceSource` is the HTTP-backed implementation; the mapping from
// each site's payload is kept in free functions so it can be tested on
// canned JSON without a server.

use std::future::Future;

use carsnap_api::encar::EncarVehicle;
use carsnap_api::heydealer::HeyDealerCar;
use carsnap_api::{EncarClient, HeyDealerClient, TransportConfig};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::config::GrabberConfig;
use crate::error::CoreError;
use crate::listing::{ListingReference, Site};
use crate::photo::PhotoEntry;
use crate::summary::{ListingSummary, SummaryFields};

/// Resize and watermark parameters appended to every Encar photo path.
pub const ENCAR_IMAGE_QUERY: &str =
    "impolicy=heightRate&rh=653&cw=1160&ch=653&wtmk=http://ci.encar.com/wt_mark/w_mark_04.png";

/// A listing ready for download: its photos in display order and the
/// summary to show and copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub reference: ListingReference,
    pub photos: Vec<PhotoEntry>,
    pub summary: ListingSummary,
}

/// Fetches listing details for a resolved reference.
pub trait ListingSource {
    fn fetch(
        &self,
        reference: &ListingReference,
    ) -> impl Future<Output = Result<Listing, CoreError>> + Send;
}

// ── HTTP-backed source ───────────────────────────────────────────────

/// Fetches from the live marketplace APIs.
#[derive(Debug, Clone)]
pub struct MarketplaceSource {
    encar: EncarClient,
    heydealer: HeyDealerClient,
    encar_cdn: Url,
}

impl MarketplaceSource {
    /// Build both site clients over a shared transport (and cookie jar).
    pub fn new(config: &GrabberConfig, transport: &TransportConfig) -> Result<Self, CoreError> {
        Ok(Self {
            encar: EncarClient::new(config.encar_api.clone(), transport)?,
            heydealer: HeyDealerClient::new(
                config.heydealer_api.clone(),
                config.heydealer_origin.clone(),
                transport,
            )?,
            encar_cdn: config.encar_cdn.clone(),
        })
    }
}

impl ListingSource for MarketplaceSource {
    async fn fetch(&self, reference: &ListingReference) -> Result<Listing, CoreError> {
        debug!(site = %reference.site, id = %reference.id, "fetching listing");
        match reference.site {
            Site::Encar => {
                let vehicle = self.encar.get_vehicle(&reference.id).await?;
                Ok(encar_listing(reference.clone(), &vehicle, &self.encar_cdn))
            }
            Site::HeyDealer => {
                let car = self.heydealer.get_car(&reference.id).await?;
                Ok(heydealer_listing(reference.clone(), &car))
            }
        }
    }
}

// ── Payload mapping ──────────────────────────────────────────────────

/// Full CDN URL for an Encar photo path.
pub fn encar_image_url(cdn: &Url, path: &str) -> String {
    let host = cdn.as_str().trim_end_matches('/');
    let sep = if path.starts_with('/') { "" } else { "/" };
    format!("{host}{sep}{path}?{ENCAR_IMAGE_QUERY}")
}

/// Map an Encar vehicle document into a `Listing`.
pub fn encar_listing(reference: ListingReference, vehicle: &EncarVehicle, cdn: &Url) -> Listing {
    let photos = vehicle
        .photos
        .iter()
        .map(|p| PhotoEntry::new(encar_image_url(cdn, &p.path), &p.path))
        .collect();

    let category = &vehicle.category;
    let year: String = category.year_month.chars().take(4).collect();
    let headline = format!(
        "{} {} {} {year}/{}",
        category.manufacturer_english_name,
        category.model_group_english_name,
        category.grade_english_name,
        category.form_year,
    );

    let summary = ListingSummary::render(&SummaryFields {
        headline,
        mileage: vehicle.spec.mileage,
        fuel: vehicle.spec.fuel_name.clone(),
        displacement_cc: vehicle.spec.displacement,
        raw_price: vehicle.advertisement.price,
    });

    Listing {
        reference,
        photos,
        summary,
    }
}

/// Map a HeyDealer car document into a `Listing`.
pub fn heydealer_listing(reference: ListingReference, car: &HeyDealerCar) -> Listing {
    let detail = &car.detail;

    let photos = detail
        .image_urls
        .iter()
        .map(|url| PhotoEntry::from_url(url.clone()))
        .collect();

    // `2020-05-14` → `2020.05`
    let registered: String = detail.initial_registration_date.chars().take(7).collect();
    let registered = registered.replacen('-', ".", 1);
    let headline = format!("{} {registered}/{}", detail.full_name, detail.year);

    let summary = ListingSummary::render(&SummaryFields {
        headline,
        mileage: detail.mileage,
        fuel: detail.fuel_display.clone(),
        displacement_cc: detail.displacement(),
        raw_price: car.desired_price(),
    });

    Listing {
        reference,
        photos,
        summary,
    }
}
