use moex_sdk::error::{SdkError, TableError};
use moex_sdk::prelude::*;
use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Helper: start a mock ISS server and an anonymous client pointed at it.
async fn setup() -> (MockServer, MoexClient) {
    let mock_server = MockServer::start().await;
    let client = MoexClient::builder()
        .iss_url(&mock_server.uri())
        .passport_url(&mock_server.uri())
        .build()
        .unwrap();
    (mock_server, client)
}

/// Fixture: a realistic securities response with marketdata rows on two
/// boards plus the sibling blocks ISS always sends along.
fn sber_body() -> serde_json::Value {
    json!({
        "securities": {
            "columns": ["SECID", "BOARDID", "SHORTNAME", "LOTSIZE"],
            "data": [["SBER", "TQBR", "Сбербанк", 10]]
        },
        "marketdata": {
            "metadata": {"SECID": {"type": "string", "bytes": 36}},
            "columns": [
                "SECID", "BOARDID", "BID", "OFFER", "OPEN", "LOW", "HIGH",
                "LAST", "VOLTODAY", "VALTODAY", "ISSUECAPITALIZATION",
                "UPDATETIME"
            ],
            "data": [
                ["SBER", "SMAL", null, null, null, null, null, 307.0,
                 null, null, null, "14:58:31"],
                ["SBER", "TQBR", 307.4, 307.5, 305.0, 304.1, 308.0, 307.5,
                 1_000_000u64, 3.07e8, 6.9e12, "14:58:31"]
            ]
        },
        "dataversion": {
            "columns": ["data_version", "seqnum"],
            "data": [[10843, 20210504145831i64]]
        }
    })
}

fn mount_sber(body: serde_json::Value) -> Mock {
    Mock::given(method("GET"))
        .and(path("/engines/stock/markets/shares/securities/SBER.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
}

// ---------------------------------------------------------------------------
// Test 1: latest() picks the row of the requested board
// ---------------------------------------------------------------------------
#[tokio::test]
async fn test_latest_picks_the_requested_board() {
    let (mock_server, client) = setup().await;
    mount_sber(sber_body()).expect(1).mount(&mock_server).await;

    let quote = client.quotes().latest(&Security::new("SBER")).await.unwrap();

    assert_eq!(quote.secid, "SBER");
    assert_eq!(quote.board, "TQBR");
    assert_eq!(quote.bid, Some(307.4));
    assert_eq!(quote.offer, Some(307.5));
    assert_eq!(quote.last, Some(307.5));
    assert_eq!(quote.vol_today, Some(1_000_000));
}

// ---------------------------------------------------------------------------
// Test 2: latest() on a board with no rows is NoData, not an empty quote
// ---------------------------------------------------------------------------
#[tokio::test]
async fn test_latest_without_board_rows_is_no_data() {
    let (mock_server, client) = setup().await;
    mount_sber(sber_body()).mount(&mock_server).await;

    let security = Security::new("SBER").with_board("TQTF");
    let err = client.quotes().latest(&security).await.unwrap_err();

    assert!(err.is_no_data(), "expected NoData, got: {err}");
}

// ---------------------------------------------------------------------------
// Test 3: capitalization() reads ISSUECAPITALIZATION off the board row
// ---------------------------------------------------------------------------
#[tokio::test]
async fn test_capitalization_reads_the_board_row() {
    let (mock_server, client) = setup().await;
    mount_sber(sber_body()).expect(1).mount(&mock_server).await;

    let cap = client
        .quotes()
        .capitalization(&Security::new("SBER"))
        .await
        .unwrap();

    assert_eq!(cap, 6.9e12);
}

// ---------------------------------------------------------------------------
// Test 4: a null capitalization cell is NoData
// ---------------------------------------------------------------------------
#[tokio::test]
async fn test_null_capitalization_is_no_data() {
    let (mock_server, client) = setup().await;
    let body = json!({
        "marketdata": {
            "columns": ["SECID", "BOARDID", "ISSUECAPITALIZATION"],
            "data": [["SBER", "TQBR", null]]
        }
    });
    mount_sber(body).mount(&mock_server).await;

    let err = client
        .quotes()
        .capitalization(&Security::new("SBER"))
        .await
        .unwrap_err();

    assert!(err.is_no_data(), "expected NoData, got: {err}");
}

// ---------------------------------------------------------------------------
// Test 5: table() projects the requested columns in the requested order
// ---------------------------------------------------------------------------
#[tokio::test]
async fn test_table_projects_requested_columns_in_order() {
    let (mock_server, client) = setup().await;
    mount_sber(sber_body()).mount(&mock_server).await;

    let table = client
        .quotes()
        .table(&Security::new("SBER"), &["LAST", "SECID"])
        .await
        .unwrap();

    assert_eq!(table.columns(), ["LAST", "SECID"]);
    assert_eq!(table.len(), 1);
    let row = table.row(0).unwrap();
    assert_eq!(row.as_f64("LAST").unwrap(), 307.5);
    assert_eq!(row.as_str("SECID").unwrap(), "SBER");
}

// ---------------------------------------------------------------------------
// Test 6: a column ISS never sent is rejected, not padded with nulls
// ---------------------------------------------------------------------------
#[tokio::test]
async fn test_unknown_column_is_rejected() {
    let (mock_server, client) = setup().await;
    mount_sber(sber_body()).mount(&mock_server).await;

    let err = client
        .quotes()
        .table(&Security::new("SBER"), &["SECID", "LASTPRICE"])
        .await
        .unwrap_err();

    assert!(
        matches!(
            &err,
            SdkError::Table(TableError::UnknownColumn(column)) if column == "LASTPRICE"
        ),
        "expected UnknownColumn, got: {err}"
    );
}
