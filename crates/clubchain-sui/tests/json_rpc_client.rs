//! `JsonRpcClient` against a mocked fullnode.

use std::time::Duration;

use clubchain_sui::{
    contracts, object::TransactionFilter, ChainConfig, Error, JsonRpcClient, Network, SuiRpc,
};
use httpmock::{Method::POST, MockServer};
use serde_json::json;
use url::Url;

fn client(server: &MockServer) -> JsonRpcClient {
    let url = Url::parse(&server.url("/")).unwrap();
    JsonRpcClient::new(url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn get_object_sends_a_json_rpc_envelope() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/").json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "sui_getObject",
                "params": ["0xc1", { "showType": true, "showOwner": true, "showContent": true }]
            }));
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {
                    "data": {
                        "objectId": "0xc1",
                        "type": "0xpkg::club::Club",
                        "content": {
                            "dataType": "moveObject",
                            "type": "0xpkg::club::Club",
                            "fields": { "name": "Chess", "owner": "0xalice" }
                        }
                    }
                }
            }));
        })
        .await;

    let object = client(&server).get_object("0xc1").await.unwrap().unwrap();
    mock.assert_async().await;

    assert_eq!(object.object_id, "0xc1");
    assert_eq!(object.fields()["name"], "Chess");
}

#[tokio::test]
async fn missing_object_is_none() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": { "error": { "code": "notExists", "object_id": "0xc9" } }
            }));
        })
        .await;

    assert!(client(&server).get_object("0xc9").await.unwrap().is_none());
}

#[tokio::test]
async fn rpc_errors_are_surfaced() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": { "code": -32602, "message": "Invalid params" }
            }));
        })
        .await;

    let err = client(&server)
        .get_owned_objects("0xalice", "0xpkg::club::ClubOwnerBadge", None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Rpc { ref method, code: -32602, ref message }
            if method == "suix_getOwnedObjects" && message == "Invalid params"
    ));
}

#[tokio::test]
async fn http_failures_are_transport_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(502).body("bad gateway");
        })
        .await;

    let err = client(&server).get_object("0xc1").await.unwrap_err();
    assert!(matches!(err, Error::Http { .. }));
}

#[tokio::test]
async fn unexpected_result_shape_is_a_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(200)
                .json_body(json!({ "jsonrpc": "2.0", "id": 1, "result": "not a page" }));
        })
        .await;

    let filter = TransactionFilter::FromAddress("0xalice".to_string());
    let err = client(&server)
        .query_transaction_blocks(&filter, None, true)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode { ref method, .. } if method == "suix_queryTransactionBlocks"));
}

#[tokio::test]
async fn multi_get_is_chunked() {
    let server = MockServer::start_async().await;
    // Every chunk answers with the same single object, so the count tells the chunks.
    server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": [
                    { "data": { "objectId": "0xc1" } },
                    { "error": { "code": "deleted" } }
                ]
            }));
        })
        .await;

    let ids: Vec<String> = (0..75).map(|i| format!("0x{i:x}")).collect();
    let objects = client(&server).multi_get_objects(&ids).await.unwrap();
    assert_eq!(objects.len(), 2);
}

#[tokio::test]
async fn owned_objects_page_is_decoded() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {
                    "data": [ { "data": { "objectId": "0xb1", "type": "0xpkg::club::ClubOwnerBadge" } } ],
                    "nextCursor": "0xb1",
                    "hasNextPage": true
                }
            }));
        })
        .await;

    let page = client(&server)
        .get_owned_objects("0xalice", "0xpkg::club::ClubOwnerBadge", None)
        .await
        .unwrap();
    assert_eq!(page.data.len(), 1);
    assert!(page.has_next_page);
    assert_eq!(page.next_cursor, Some(json!("0xb1")));
}

#[tokio::test]
async fn move_call_returns_unsigned_bytes() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/").json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "unsafe_moveCall",
                "params": [
                    "0xalice",
                    "0xpkg",
                    "event",
                    "join_event",
                    [],
                    ["0xe1", "0x6"],
                    null,
                    "50000000"
                ]
            }));
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": { "txBytes": "AAEC", "gas": [], "inputObjects": [] }
            }));
        })
        .await;

    let config = ChainConfig::new(Network::Testnet, "0xpkg");
    let call = contracts::join_event(&config, "0xe1").unwrap();
    let tx = client(&server)
        .move_call("0xalice", &call, 50_000_000)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(tx.tx_bytes, "AAEC");
}
