// ── Page URL classification ──
//
// Maps the URL of an open listing page to the site it belongs to and the
// listing ID that site's API expects.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use url::Url;

use crate::error::CoreError;

/// Host serving Encar listing pages.
pub const ENCAR_HOST: &str = "www.encar.com";

/// Host serving HeyDealer dealer pages.
pub const HEYDEALER_HOST: &str = "dealer.heydealer.com";

/// Query parameter carrying the Encar listing ID.
const ENCAR_ID_PARAM: &str = "carid";

static HEYDEALER_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/cars/([a-zA-Z0-9]+)/").expect("HeyDealer path pattern is valid")
});

/// Supported marketplaces.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Site {
    Encar,
    HeyDealer,
}

/// A listing on one marketplace, resolved from a page URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingReference {
    pub site: Site,
    pub id: String,
}

impl ListingReference {
    pub fn new(site: Site, id: impl Into<String>) -> Self {
        Self {
            site,
            id: id.into(),
        }
    }
}

/// Classify a page URL.
///
/// - `www.encar.com`: the `carid` query parameter.
/// - `dealer.heydealer.com`: the first `/cars/<alphanumeric>/` path segment.
/// - anything else (including unparseable input) is unsupported.
pub fn classify(page_url: &str) -> Result<ListingReference, CoreError> {
    let unsupported = || CoreError::UnsupportedUrl {
        url: page_url.to_owned(),
    };

    let url = Url::parse(page_url.trim()).map_err(|_| unsupported())?;

    match url.host_str() {
        Some(ENCAR_HOST) => {
            let id = url
                .query_pairs()
                .find(|(k, _)| k == ENCAR_ID_PARAM)
                .map(|(_, v)| v.into_owned())
                .filter(|v| !v.is_empty())
                .ok_or(CoreError::MissingParameter {
                    name: ENCAR_ID_PARAM,
                })?;
            Ok(ListingReference::new(Site::Encar, id))
        }
        Some(HEYDEALER_HOST) => {
            let id = HEYDEALER_PATH
                .captures(url.path())
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_owned())
                .ok_or_else(|| CoreError::IdNotInPath {
                    path: url.path().to_owned(),
                })?;
            Ok(ListingReference::new(Site::HeyDealer, id))
        }
        _ => Err(unsupported()),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn encar_carid() {
        let r = classify("https://www.encar.com/dc/dc_cardetailview.do?pageid=dc_carsearch&carid=38123456&listAdvType=pic")
            .unwrap();
        assert_eq!(r, ListingReference::new(Site::Encar, "38123456"));
    }

    #[test]
    fn encar_missing_carid() {
        let err = classify("https://www.encar.com/dc/dc_cardetailview.do?pageid=x").unwrap_err();
        assert!(matches!(err, CoreError::MissingParameter { name: "carid" }));
        assert_eq!(err.to_string(), "carid parameter not found in URL");
    }

    #[test]
    fn encar_empty_carid_counts_as_missing() {
        let err = classify("https://www.encar.com/dc/dc_cardetailview.do?carid=").unwrap_err();
        assert!(matches!(err, CoreError::MissingParameter { .. }));
    }

    #[test]
    fn heydealer_path_id() {
        let r = classify("https://dealer.heydealer.com/cars/xK3pQ9aB/detail?tab=photos").unwrap();
        assert_eq!(r, ListingReference::new(Site::HeyDealer, "xK3pQ9aB"));
    }

    #[test]
    fn heydealer_needs_trailing_slash() {
        let err = classify("https://dealer.heydealer.com/cars/xK3pQ9aB").unwrap_err();
        assert!(matches!(err, CoreError::IdNotInPath { .. }));
        assert_eq!(err.to_string(), "ID not found in URL path");
    }

    #[test]
    fn heydealer_rejects_non_alphanumeric_id() {
        let err = classify("https://dealer.heydealer.com/cars/abc-123/").unwrap_err();
        assert!(matches!(err, CoreError::IdNotInPath { .. }));
    }

    #[test]
    fn other_hosts_are_unsupported() {
        for url in [
            "https://encar.com/dc/dc_cardetailview.do?carid=1",
            "https://www.heydealer.com/cars/abc/",
            "https://example.com/cars/abc/?carid=1",
            "not a url",
            "",
        ] {
            let err = classify(url).unwrap_err();
            assert!(
                matches!(err, CoreError::UnsupportedUrl { .. }),
                "{url}: {err:?}"
            );
            assert_eq!(err.to_string(), "Unsupported URL");
        }
    }

    #[test]
    fn site_names_round_trip_through_strum() {
        assert_eq!(Site::HeyDealer.to_string(), "HeyDealer");
        assert_eq!("encar".parse::<Site>().unwrap(), Site::Encar);
    }
}
