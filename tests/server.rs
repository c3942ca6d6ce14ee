use std::net::SocketAddr;

use customers_api::{Server, app, customers::Customers};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

async fn roundtrip(addr: SocketAddr, raw: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw.as_bytes()).await.unwrap();
    let mut out = String::new();
    stream.read_to_string(&mut out).await.unwrap();
    out
}

#[tokio::test]
async fn serves_over_tcp_and_shuts_down_gracefully() {
    let store = Customers::new();
    let server = Server::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = server.local_addr().unwrap();

    let (stop, stopped) = oneshot::channel::<()>();
    let running = tokio::spawn(server.serve_with_shutdown(app(&store), async {
        let _ = stopped.await;
    }));

    let body = r#"{"name":"Alice"}"#;
    let created = roundtrip(
        addr,
        &format!(
            "POST /api/customers HTTP/1.1\r\nhost: test\r\nconnection: close\r\n\
             content-type: application/json\r\ncontent-length: {}\r\n\r\n{body}",
            body.len()
        ),
    )
    .await;
    assert!(created.starts_with("HTTP/1.1 200"), "{created}");
    assert!(created.ends_with(r#"{"id":1,"name":"Alice"}"#), "{created}");
    assert_eq!(store.len(), 1);

    let missing = roundtrip(
        addr,
        "GET /api/customers/99 HTTP/1.1\r\nhost: test\r\nconnection: close\r\n\r\n",
    )
    .await;
    assert!(missing.starts_with("HTTP/1.1 404"), "{missing}");

    stop.send(()).unwrap();
    running.await.unwrap().unwrap();
}
