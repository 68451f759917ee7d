use reqwest::Url;
use serde_json::json;
use std::time::Duration;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storefront_orders::{HttpProductDirectory, LookupError, ProductDirectory, ProductRecord};

fn client_for(base: &str, timeout: Duration) -> HttpProductDirectory {
    HttpProductDirectory::new(Url::parse(base).unwrap(), timeout).unwrap()
}

async fn client_for_mock(mock_server: &MockServer) -> HttpProductDirectory {
    client_for(&mock_server.uri(), Duration::from_secs(2))
}

/// A local address with nothing listening on it
fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

#[tokio::test]
async fn test_lookup_found_returns_record() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/produtos/7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 7, "nome": "Caneta", "preco": 3})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let record = client_for_mock(&mock_server).await.lookup_product("7").await.unwrap();

    assert_eq!(
        record,
        ProductRecord {
            name: Some(json!("Caneta")),
        }
    );
}

#[tokio::test]
async fn test_lookup_found_without_name() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/produtos/8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 8})))
        .mount(&mock_server)
        .await;

    let record = client_for_mock(&mock_server).await.lookup_product("8").await.unwrap();

    assert_eq!(record.name, None);
}

#[tokio::test]
async fn test_lookup_not_found() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/produtos/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"erro": "Produto não encontrado"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for_mock(&mock_server).await.lookup_product("999").await.unwrap_err();

    assert_eq!(err, LookupError::NotFound);
}

#[tokio::test]
async fn test_lookup_other_status_is_not_retried() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/produtos/1"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for_mock(&mock_server).await.lookup_product("1").await.unwrap_err();

    assert_eq!(err, LookupError::UnexpectedStatus(502));
}

#[tokio::test]
async fn test_lookup_created_status_is_unexpected() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/produtos/1"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1, "nome": "X"})))
        .mount(&mock_server)
        .await;

    let err = client_for_mock(&mock_server).await.lookup_product("1").await.unwrap_err();

    assert_eq!(err, LookupError::UnexpectedStatus(201));
}

#[tokio::test]
async fn test_lookup_undecodable_body_is_unexpected() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/produtos/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = client_for_mock(&mock_server).await.lookup_product("1").await.unwrap_err();

    assert!(matches!(err, LookupError::Unexpected(_)), "{:?}", err);
}

#[tokio::test]
async fn test_lookup_timeout_is_unexpected_not_unreachable() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/produtos/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 1, "nome": "Lento"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri(), Duration::from_millis(200));
    let err = client.lookup_product("1").await.unwrap_err();

    assert!(matches!(err, LookupError::Unexpected(_)), "{:?}", err);
}

#[tokio::test]
async fn test_lookup_connection_refused_is_unreachable() {
    let client = client_for(&closed_port_url(), Duration::from_secs(2));

    let err = client.lookup_product("1").await.unwrap_err();

    assert!(matches!(err, LookupError::Unreachable(_)), "{:?}", err);
}

#[tokio::test]
async fn test_lookup_connection_dropped_by_directory_is_unreachable() {
    // Accepts every connection and closes it before answering
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            drop(socket);
        }
    });

    let client = client_for(&base, Duration::from_secs(2));
    let err = client.lookup_product("1").await.unwrap_err();

    assert!(matches!(err, LookupError::Unreachable(_)), "{:?}", err);
}

#[tokio::test]
async fn test_lookup_encodes_textual_references() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/produtos/caneta%20azul"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for_mock(&mock_server)
        .await
        .lookup_product("caneta azul")
        .await
        .unwrap_err();

    assert_eq!(err, LookupError::NotFound);
}
