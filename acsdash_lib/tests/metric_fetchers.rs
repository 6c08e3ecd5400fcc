use std::time::Duration;

use acsdash_lib::cache::ResponseCache;
use acsdash_lib::geo::GeographicUnit;
use acsdash_lib::metrics::{
    fetch_age_raw, fetch_base_population, fetch_education_raw, fetch_income_raw, BasePopulation,
    EducationRaw,
};
use acsdash_lib::{CachedClient, Error, Ethnicity};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CachedClient {
    CachedClient::with_base_url(&server.uri(), ResponseCache::new(Duration::from_secs(300)))
}

fn unit() -> GeographicUnit {
    GeographicUnit {
        name: "Houston".to_string(),
        state_name: "Texas".to_string(),
        state_code: "48".to_string(),
        place_id: "35000".to_string(),
    }
}

#[tokio::test]
async fn base_population_returns_both_counts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("get", "B01003_001E,B03001_004E,NAME"))
        .and(query_param("for", "place:35000"))
        .and(query_param("in", "state:48"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            ["B01003_001E", "B03001_004E", "NAME", "state", "place"],
            ["2304580", "916521", "Houston city, Texas", "48", "35000"]
        ])))
        .mount(&server)
        .await;

    let result = fetch_base_population(&client_for(&server), &unit(), Ethnicity::Mexican, None)
        .await
        .unwrap();
    assert_eq!(
        result,
        BasePopulation {
            total: 2_304_580,
            target: 916_521,
        }
    );
}

#[tokio::test]
async fn base_population_salvadoran_uses_its_own_variable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("get", "B01003_001E,B03001_014E,NAME"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            ["B01003_001E", "B03001_014E", "NAME", "state", "place"],
            ["2304580", "95000", "Houston city, Texas", "48", "35000"]
        ])))
        .mount(&server)
        .await;

    let result = fetch_base_population(&client_for(&server), &unit(), Ethnicity::Salvadoran, None)
        .await
        .unwrap();
    assert_eq!(result.target, 95_000);
}

#[tokio::test]
async fn age_raw_returns_total_population_seed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("get", "B01003_001E,NAME"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            ["B01003_001E", "NAME", "state", "place"],
            ["2304580", "Houston city, Texas", "48", "35000"]
        ])))
        .mount(&server)
        .await;

    let total = fetch_age_raw(&client_for(&server), &unit(), None)
        .await
        .unwrap();
    assert_eq!(total, 2_304_580);
}

#[tokio::test]
async fn income_raw_reads_suppressed_median_as_zero() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("get", "B19013_001E,NAME"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            ["B19013_001E", "NAME", "state", "place"],
            ["-666666666", "Houston city, Texas", "48", "35000"]
        ])))
        .mount(&server)
        .await;

    let median = fetch_income_raw(&client_for(&server), &unit(), None)
        .await
        .unwrap();
    assert_eq!(median, 0);
}

#[tokio::test]
async fn education_raw_returns_all_four_counts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param(
            "get",
            "B15003_001E,B15003_017E,B15003_022E,B15003_023E,NAME",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            [
                "B15003_001E",
                "B15003_017E",
                "B15003_022E",
                "B15003_023E",
                "NAME",
                "state",
                "place"
            ],
            ["1500000", "980000", "390000", "120000", "Houston city, Texas", "48", "35000"]
        ])))
        .mount(&server)
        .await;

    let result = fetch_education_raw(&client_for(&server), &unit(), None)
        .await
        .unwrap();
    assert_eq!(
        result,
        EducationRaw {
            total_over_25: 1_500_000,
            high_school_grads: 980_000,
            bachelors_grads: 390_000,
            masters_grads: 120_000,
        }
    );
}

#[tokio::test]
async fn fetcher_failure_is_whole_not_partial() {
    // A 500 yields an error, never a half-filled struct.
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = fetch_education_raw(&client_for(&server), &unit(), None).await;
    assert!(matches!(
        result,
        Err(Error::Api(acsdash_api::Error::HttpStatus { status: 500, .. }))
    ));
}

#[tokio::test]
async fn fetcher_timeout_reads_as_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([
                    ["B19013_001E", "NAME"],
                    ["55000", "Houston city, Texas"]
                ]))
                // Longer than the 8-second sub-fetch bound.
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let result = fetch_income_raw(&client_for(&server), &unit(), None).await;
    assert!(matches!(
        result,
        Err(Error::Api(acsdash_api::Error::Timeout))
    ));
}

#[tokio::test]
async fn repeated_fetch_hits_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("get", "B19013_001E,NAME"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            ["B19013_001E", "NAME", "state", "place"],
            ["55000", "Houston city, Texas", "48", "35000"]
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let first = fetch_income_raw(&client, &unit(), None).await.unwrap();
    let second = fetch_income_raw(&client, &unit(), None).await.unwrap();
    assert_eq!(first, 55_000);
    assert_eq!(second, 55_000);
}
