use energifyn_api::types::DateStamp;
use energifyn_api::{Client, Error, PriceQuery};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[tokio::test]
async fn fetch_returns_raw_body() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("consumptionprice.json");

    Mock::given(method("GET"))
        .and(path("/api/graph/consumptionprice"))
        .and(query_param("date", "05-03-2024"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.fetch(&DateStamp::new(5, 3, 2024)).await;
    assert!(result.is_ok());

    let bytes = result.unwrap();
    assert_eq!(bytes, body.as_bytes());
}

#[tokio::test]
async fn fetch_uses_day_month_year_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/graph/consumptionprice"))
        .and(query_param("date", "31-01-2025"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"currentWestPowerPrice\":1.5}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let query = PriceQuery::new(DateStamp::new(31, 1, 2025));
    let bytes = client.get_price_body(&query).await.unwrap();
    assert_eq!(bytes, b"{\"currentWestPowerPrice\":1.5}");
}

#[tokio::test]
async fn fetch_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/graph/consumptionprice"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.fetch(&DateStamp::new(1, 1, 2024)).await;

    match result {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal Server Error");
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn fetch_rejects_oversized_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/graph/consumptionprice"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(4096)))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).with_max_body_bytes(1024);
    let result = client.fetch(&DateStamp::new(1, 1, 2024)).await;
    assert!(matches!(result, Err(Error::BodyTooLarge { limit: 1024 })));
}

#[tokio::test]
async fn fetch_accepts_body_at_the_cap() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/graph/consumptionprice"))
        .respond_with(ResponseTemplate::new(200).set_body_string("y".repeat(1024)))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).with_max_body_bytes(1024);
    let bytes = client.fetch(&DateStamp::new(1, 1, 2024)).await.unwrap();
    assert_eq!(bytes.len(), 1024);
}

#[tokio::test]
async fn fetch_unreachable_host() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = Client::with_base_url(&format!("http://{}", addr));
    let result = client.fetch(&DateStamp::new(1, 1, 2024)).await;
    assert!(matches!(result, Err(Error::RequestFailed)));
}
