#![allow(clippy::unwrap_used)]
// Full action against mocked marketplace APIs and a temporary download root.

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use carsnap_core::{CoreError, Grabber, GrabberConfig, Intent};

fn config_for(server: &MockServer, root: &std::path::Path) -> GrabberConfig {
    let uri = Url::parse(&server.uri()).unwrap();
    GrabberConfig {
        encar_api: uri.clone(),
        encar_cdn: uri.clone(),
        heydealer_api: uri,
        download_dir: root.to_path_buf(),
        ..GrabberConfig::default()
    }
}

async fn mount_photo(server: &MockServer, photo_path: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(photo_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn encar_listing_lands_on_disk() {
    let server = MockServer::start().await;
    let root = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/v1/readside/vehicle/38123456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "photos": [ { "path": "/pic/38123456_001.jpg" }, { "path": "/pic/38123456_002.jpg" } ],
            "category": {
                "manufacturerEnglishName": "Kia",
                "modelGroupEnglishName": "K5",
                "gradeEnglishName": "Signature",
                "yearMonth": "202206",
                "formYear": 2022
            },
            "spec": { "mileage": 12000, "fuelName": "LPG", "displacement": 2000 },
            "advertisement": { "price": 2456 }
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_photo(&server, "/pic/38123456_001.jpg", b"one").await;
    mount_photo(&server, "/pic/38123456_002.jpg", b"two").await;

    let grabber = Grabber::from_config(&config_for(&server, root.path())).unwrap();
    let report = grabber
        .run("https://www.encar.com/dc/dc_cardetailview.do?carid=38123456&wtClick_korList=015")
        .await;

    assert!(report.is_success(), "{:?}", report.outcome);
    let folder = root.path().join("imageDownloader");
    assert_eq!(std::fs::read(folder.join("38123456_001.jpg")).unwrap(), b"one");
    assert_eq!(std::fs::read(folder.join("38123456_002.jpg")).unwrap(), b"two");

    let summary = "Kia K5 Signature 2022/2022\n12,000 км\nГаз 2L\n₩25,000,000";
    assert_eq!(report.intents[1], Intent::CopyToClipboard(summary.into()));
}

#[tokio::test]
async fn repeated_grab_keeps_earlier_files() {
    let server = MockServer::start().await;
    let root = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/v1/readside/vehicle/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "photos": [ { "path": "/pic/a.jpg" } ],
            "category": {},
            "spec": {},
            "advertisement": {}
        })))
        .mount(&server)
        .await;
    mount_photo(&server, "/pic/a.jpg", b"a").await;

    let grabber = Grabber::from_config(&config_for(&server, root.path())).unwrap();
    let page = "https://www.encar.com/dc/dc_cardetailview.do?carid=1";
    assert!(grabber.run(page).await.is_success());
    assert!(grabber.run(page).await.is_success());

    let folder = root.path().join("imageDownloader");
    assert!(folder.join("a.jpg").exists());
    assert!(folder.join("a (1).jpg").exists());
}

#[tokio::test]
async fn heydealer_request_carries_session_cookie() {
    let server = MockServer::start().await;
    let root = tempfile::tempdir().unwrap();
    let photo = format!("{}/cars/xK3pQ9/front.jpg?w=1200", server.uri());

    Mock::given(method("GET"))
        .and(path("/v2/dealers/web/cars/xK3pQ9"))
        .and(header_regex("cookie", "sessionid=abc"))
        .and(header_regex("cookie", "csrftoken=xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "detail": {
                "image_urls": [photo],
                "mileage": 32000,
                "fuel_display": "디젤",
                "full_name": "Kia Sorento",
                "initial_registration_date": "2020-05-14",
                "year": 2021,
                "carhistory": { "displacement": 2151 }
            },
            "auction": { "desired_price": 3150 }
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_photo(&server, "/cars/xK3pQ9/front.jpg", b"front").await;

    let config = GrabberConfig {
        heydealer_cookie: Some(SecretString::from("sessionid=abc; csrftoken=xyz".to_string())),
        ..config_for(&server, root.path())
    };
    let grabber = Grabber::from_config(&config).unwrap();
    let report = grabber
        .run("https://dealer.heydealer.com/cars/xK3pQ9/detail")
        .await;

    assert!(report.is_success(), "{:?}", report.outcome);
    assert_eq!(
        std::fs::read(root.path().join("imageDownloader/front.jpg")).unwrap(),
        b"front"
    );
    assert_eq!(
        report.intents[1],
        Intent::CopyToClipboard(
            "Kia Sorento 2020.05/2021\n32,000 км\nДизель 2.151L\n₩31,940,000".into()
        )
    );
}

#[tokio::test]
async fn api_error_downloads_nothing() {
    let server = MockServer::start().await;
    let root = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/v1/readside/vehicle/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let grabber = Grabber::from_config(&config_for(&server, root.path())).unwrap();
    let report = grabber
        .run("https://www.encar.com/dc/dc_cardetailview.do?carid=404")
        .await;

    let Err(CoreError::FetchFailed { site, status, .. }) = &report.outcome else {
        panic!("expected a fetch failure, got {:?}", report.outcome);
    };
    assert_eq!(site, "Encar");
    assert_eq!(*status, 404);
    assert_eq!(
        report.intents[1],
        Intent::Alert("Error: Failed to fetch data from Encar: Not Found".into())
    );
    assert!(!root.path().join("imageDownloader").exists());
}
