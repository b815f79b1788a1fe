//! Failure injection tests for the gateway.

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use edge_gateway::http::GatewayServer;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tower::ServiceExt;
use tracing_subscriber::layer::SubscriberExt;

mod common;
use common::{ErrorCounter, Reply};

#[tokio::test]
async fn unreachable_backend_yields_one_500_and_one_error_event() {
    let dead = common::unused_addr().await;
    let server = GatewayServer::new(common::config_with_routes(&[("products", dead)])).unwrap();

    let errors = ErrorCounter::default();
    let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(errors.clone()));

    let mut request = Request::get("/api/v1/products/1").body(Body::empty()).unwrap();
    let peer: SocketAddr = "10.1.1.1:40000".parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(peer));

    let response = server.router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.starts_with("Proxy Error: "), "body was {body:?}");
    assert_eq!(errors.count(), 1);
}

#[tokio::test]
async fn unreachable_backend_over_the_wire() {
    let dead = common::unused_addr().await;
    let server = GatewayServer::new(common::config_with_routes(&[("products", dead)])).unwrap();
    let (gateway, shutdown) = common::start_gateway(server).await;

    let res = common::client()
        .get(format!("http://{}/api/v1/products", gateway))
        .send()
        .await
        .expect("Gateway unreachable");

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR.as_u16());
    assert!(res.text().await.unwrap().contains("Proxy Error"));

    shutdown.trigger();
}

#[tokio::test]
async fn dropped_connection_is_not_retried() {
    let (backend, recorder) = common::start_hangup_backend().await;
    let server = GatewayServer::new(common::config_with_routes(&[("orders", backend)])).unwrap();
    let (gateway, shutdown) = common::start_gateway(server).await;

    let res = common::client()
        .post(format!("http://{}/api/v1/orders", gateway))
        .body("place order")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR.as_u16());
    assert!(res.text().await.unwrap().starts_with("Proxy Error: "));

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(recorder.connections(), 1, "backend must be called exactly once");
    assert_eq!(recorder.requests().len(), 1);
    assert_eq!(recorder.requests()[0].body, b"place order".to_vec());

    shutdown.trigger();
}

#[tokio::test]
async fn client_disconnect_releases_backend_connection() {
    let backend = common::start_stalled_backend().await;
    let server =
        GatewayServer::new(common::config_with_routes(&[("products", backend.addr)])).unwrap();
    let (gateway, shutdown) = common::start_gateway(server).await;

    let mut client = TcpStream::connect(gateway).await.unwrap();
    client
        .write_all(b"GET /api/v1/products/slow HTTP/1.1\r\nHost: gateway\r\n\r\n")
        .await
        .unwrap();

    tokio::time::timeout(Duration::from_secs(5), backend.received)
        .await
        .expect("request never reached the backend")
        .unwrap();

    drop(client);

    tokio::time::timeout(Duration::from_secs(5), backend.released)
        .await
        .expect("backend connection still open after client went away")
        .unwrap();

    shutdown.trigger();
}

#[tokio::test]
async fn backend_500_is_not_a_gateway_error() {
    let (backend, recorder) =
        common::start_mock_backend(Reply::new(500, "database unavailable")).await;
    let server = GatewayServer::new(common::config_with_routes(&[("services", backend)])).unwrap();
    let (gateway, shutdown) = common::start_gateway(server).await;

    let res = common::client()
        .get(format!("http://{}/api/v1/services", gateway))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR.as_u16());
    assert_eq!(res.text().await.unwrap(), "database unavailable");
    assert_eq!(recorder.connections(), 1);

    shutdown.trigger();
}

#[tokio::test]
async fn slow_backend_hits_configured_timeout() {
    let (backend, recorder) = common::start_programmable_backend(|_| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        Reply::new(200, "too late")
    })
    .await;

    let mut config = common::config_with_routes(&[("blogs", backend)]);
    config.timeouts.upstream_secs = Some(1);
    let server = GatewayServer::new(config).unwrap();
    let (gateway, shutdown) = common::start_gateway(server).await;

    let res = common::client()
        .get(format!("http://{}/api/v1/blogs", gateway))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR.as_u16());
    assert_eq!(res.text().await.unwrap(), "Proxy Error: upstream timed out after 1s");
    assert_eq!(recorder.connections(), 1);

    shutdown.trigger();
}
