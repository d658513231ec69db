use banknifty_options_agent::gateways::api::{ChainError, MarketDataGateway, OptionChainGateway};
use banknifty_options_agent::gateways::{NseClient, YahooClient};
use banknifty_options_agent::signal::ChainAnalyzer;

#[tokio::test]
async fn yahoo_parses_chart_payload_and_skips_null_points() {
    let mut server = mockito::Server::new_async().await;
    let body = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "^GSPC"},
                "timestamp": [1732406400, 1732492800, 1732579200],
                "indicators": {
                    "quote": [{
                        "open": [5900.0, null, 5950.0],
                        "close": [5910.0, null, 6057.75]
                    }]
                }
            }],
            "error": null
        }
    }"#;
    let _m = server
        .mock("GET", "/CHART")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let client = YahooClient::with_base_url(&server.url());
    let series = client.fetch("CHART", 5).await;

    assert_eq!(series.bars.len(), 2); // null point dropped
    assert_eq!(series.percent_change(), 2.5); // 5910 -> 6057.75
}

#[tokio::test]
async fn yahoo_missing_result_yields_empty_series() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/NOPE")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"chart": {"result": null, "error": {"code": "Not Found"}}}"#)
        .create_async()
        .await;

    let client = YahooClient::with_base_url(&server.url());
    let series = client.fetch("NOPE", 5).await;
    assert!(series.bars.is_empty());
    assert_eq!(series.percent_change(), 0.0);
}

#[tokio::test]
async fn yahoo_http_failure_yields_empty_series() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/DOWN")
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let client = YahooClient::with_base_url(&server.url());
    let series = client.fetch("DOWN", 5).await;
    assert!(series.bars.is_empty());
}

fn nse_body(with_filtered: bool) -> String {
    let filtered = if with_filtered {
        r#","filtered": {
            "CE": {"totOI": 400000.0, "totVol": 91000.0},
            "PE": {"totOI": 320000.0, "totVol": 88000.0}
        }"#
    } else {
        ""
    };
    format!(
        r#"{{
        "records": {{
            "expiryDates": ["28-Nov-2024", "05-Dec-2024"],
            "underlyingValue": 52123.45,
            "data": [
                {{
                    "strikePrice": 52000,
                    "expiryDate": "28-Nov-2024",
                    "CE": {{"openInterest": 150000.0, "lastPrice": 550.0}},
                    "PE": {{"openInterest": 90000.0, "lastPrice": 480.0}}
                }},
                {{
                    "strikePrice": 52500,
                    "expiryDate": "28-Nov-2024",
                    "CE": {{"openInterest": 80000.0, "lastPrice": 320.0}}
                }}
            ]
        }}{}
    }}"#,
        filtered
    )
}

#[tokio::test]
async fn nse_parses_chain_snapshot() {
    let mut server = mockito::Server::new_async().await;
    let _home = server.mock("GET", "/").with_status(200).create_async().await;
    let _m = server
        .mock("GET", "/api/option-chain-indices")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(nse_body(true))
        .create_async()
        .await;

    let client = NseClient::with_base_url(&server.url());
    let snapshot = client.fetch("BANKNIFTY").await.unwrap();

    assert_eq!(snapshot.underlying_value, 52123.45);
    assert_eq!(snapshot.total_call_oi, Some(400_000.0));
    assert_eq!(snapshot.total_put_oi, Some(320_000.0));
    assert_eq!(snapshot.expiry_dates.len(), 2);
    assert_eq!(snapshot.strikes.len(), 2);

    // First strike has both legs, second has no put leg
    assert!(snapshot.strikes[0].is_eligible());
    assert!(!snapshot.strikes[1].is_eligible());
    assert_eq!(snapshot.strikes[0].call.unwrap().last_price, 550.0);

    assert!((ChainAnalyzer::put_call_ratio(&snapshot) - 0.8).abs() < 1e-12);
}

#[tokio::test]
async fn nse_without_aggregate_totals_degrades_pcr() {
    let mut server = mockito::Server::new_async().await;
    let _home = server.mock("GET", "/").with_status(200).create_async().await;
    let _m = server
        .mock("GET", "/api/option-chain-indices")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(nse_body(false))
        .create_async()
        .await;

    let client = NseClient::with_base_url(&server.url());
    let snapshot = client.fetch("BANKNIFTY").await.unwrap();

    assert_eq!(snapshot.total_call_oi, None);
    assert_eq!(ChainAnalyzer::put_call_ratio(&snapshot), 1.0);
}

#[tokio::test]
async fn nse_http_failure_is_unavailable() {
    let mut server = mockito::Server::new_async().await;
    let _home = server.mock("GET", "/").with_status(200).create_async().await;
    let _m = server
        .mock("GET", "/api/option-chain-indices")
        .match_query(mockito::Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let client = NseClient::with_base_url(&server.url());
    match client.fetch("BANKNIFTY").await {
        Err(ChainError::Unavailable(_)) => {}
        other => panic!("expected Unavailable, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn nse_garbage_body_is_unparseable() {
    let mut server = mockito::Server::new_async().await;
    let _home = server.mock("GET", "/").with_status(200).create_async().await;
    let _m = server
        .mock("GET", "/api/option-chain-indices")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html>access denied</html>")
        .create_async()
        .await;

    let client = NseClient::with_base_url(&server.url());
    match client.fetch("BANKNIFTY").await {
        Err(ChainError::Unparseable(_)) => {}
        other => panic!("expected Unparseable, got {:?}", other.map(|_| ())),
    }
}
