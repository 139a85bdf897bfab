use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use service_pricing_pipeline::config::ProxyConfig;
use service_pricing_pipeline::delivery::{HttpSink, RecordSink};
use service_pricing_pipeline::models::{Named, ProviderOffer, ServiceRecord};
use service_pricing_pipeline::PipelineError;

fn record(name: &str) -> ServiceRecord {
    ServiceRecord {
        name: name.to_string(),
        product_index: "hc-ser-0001".to_string(),
        department: Named::new("electrocardiography"),
        speciality: Named::new("cardiology"),
        category: Named::new("fetal medicine"),
        nature_of_procedure: Named::new("diagnostic imaging"),
        service_providers: vec![ProviderOffer { id: 1, price: 100.0 }],
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Read one HTTP/1.1 request: head plus a `content-length` body, if any.
fn read_request(stream: &mut impl Read) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(head_end) = text.find("\r\n\r\n") {
            let content_length = text[..head_end]
                .lines()
                .filter_map(|l| l.split_once(':'))
                .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
                .map(|(_, v)| v.trim().parse::<usize>().unwrap())
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8(buf).unwrap()
}

/// Answer one connection per entry in `responses`, returning the raw requests in order.
fn serve(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let handle = thread::spawn(move || {
        let mut requests = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().unwrap();
            requests.push(read_request(&mut stream));
            let response = format!(
                "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nX-Trace: abc\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                reason(status),
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        }
        requests
    });
    (addr, handle)
}

fn body_of(request: &str) -> &str {
    request.split_once("\r\n\r\n").map(|(_, b)| b).unwrap_or("")
}

#[test]
fn posts_records_as_json_array_and_reports_response() {
    let (addr, server) = serve(vec![(201, r#"{"id":"abc","ok":true}"#)]);
    let sink = HttpSink::new(format!("http://{addr}/services"), ProxyConfig::default());

    let records = vec![record("service a"), record("service b")];
    let resp = sink.deliver(&records).unwrap();

    assert_eq!(resp.status, 201);
    assert_eq!(resp.body, serde_json::json!({"id": "abc", "ok": true}));
    assert_eq!(resp.headers.get("x-trace").map(String::as_str), Some("abc"));

    let requests = server.join().unwrap();
    let request = &requests[0];
    assert!(request.starts_with("POST /services HTTP/1.1"));
    assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
    let posted: Vec<ServiceRecord> = serde_json::from_str(body_of(request)).unwrap();
    assert_eq!(posted, records);
}

#[test]
fn non_json_body_is_kept_as_text() {
    let (addr, server) = serve(vec![(200, "accepted")]);
    let sink = HttpSink::new(format!("http://{addr}/"), ProxyConfig::default());

    let resp = sink.deliver(&[record("service a")]).unwrap();
    assert_eq!(resp.body, serde_json::Value::String("accepted".to_string()));
    server.join().unwrap();
}

#[test]
fn server_error_status_is_a_delivery_error() {
    let (addr, server) = serve(vec![(500, r#"{"error":"boom"}"#)]);
    let sink = HttpSink::new(format!("http://{addr}/services"), ProxyConfig::default());

    let err = sink.deliver(&[record("service a")]).unwrap_err();
    match err {
        PipelineError::Delivery { status, message } => {
            assert_eq!(status, Some(500));
            assert!(message.contains("boom"));
        }
        other => panic!("unexpected error: {other}"),
    }
    server.join().unwrap();
}

#[test]
fn unreachable_endpoint_is_a_delivery_error_without_status() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let sink = HttpSink::new(format!("http://127.0.0.1:{port}/services"), ProxyConfig::default());

    let err = sink.deliver(&[record("service a")]).unwrap_err();
    assert!(matches!(err, PipelineError::Delivery { status: None, .. }));
}

#[test]
fn unreachable_proxy_falls_back_to_direct_delivery() {
    let (addr, server) = serve(vec![(201, "[]")]);
    let proxy = ProxyConfig {
        http: Some("http://127.0.0.1:1".to_string()),
        https: Some("http://127.0.0.1:1".to_string()),
        ..Default::default()
    };
    let sink = HttpSink::new(format!("http://{addr}/services"), proxy);

    assert!(!sink.probe_proxy());
    let resp = sink.deliver(&[record("service a")]).unwrap();
    assert_eq!(resp.status, 201);
    assert!(server.join().unwrap()[0].starts_with("POST /services "));
}

#[test]
fn reachable_proxy_carries_the_request() {
    // First connection is the probe, second the forwarded POST
    let (proxy_addr, proxy_server) = serve(vec![(200, "{}"), (201, r#"{"via":"proxy"}"#)]);
    let proxy = ProxyConfig {
        http: Some(proxy_addr.clone()),
        https: Some(proxy_addr),
        ..Default::default()
    };
    let sink = HttpSink::new("http://pricing.invalid/services", proxy);

    let resp = sink.deliver(&[record("service a")]).unwrap();
    assert_eq!(resp.body, serde_json::json!({"via": "proxy"}));

    let requests = proxy_server.join().unwrap();
    assert!(requests[0].starts_with("GET / "));
    assert!(requests[1].starts_with("POST http://pricing.invalid/services "));
}

fn config_key(err: PipelineError) -> String {
    match err {
        PipelineError::Config { key, .. } => key,
        other => panic!("expected a config error, got {other}"),
    }
}

#[test]
fn non_pem_ca_certificate_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let pem = dir.path().join("ca.pem");
    std::fs::write(&pem, "not a certificate").unwrap();

    // Reachable endpoint, so only the certificate can fail the call
    let (addr, _server) = serve(vec![(201, "[]")]);
    let proxy = ProxyConfig {
        ca_cert: Some(pem),
        ..Default::default()
    };
    let sink = HttpSink::new(format!("http://{addr}/services"), proxy);

    let err = sink.deliver(&[record("service a")]).unwrap_err();
    assert_eq!(config_key(err), "POSTMAN_CERT");
}

#[test]
fn missing_ca_certificate_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let proxy = ProxyConfig {
        ca_cert: Some(dir.path().join("absent.pem")),
        ..Default::default()
    };
    let sink = HttpSink::new("http://127.0.0.1:9/services", proxy);

    let err = sink.deliver(&[record("service a")]).unwrap_err();
    assert_eq!(config_key(err), "POSTMAN_CERT");
}

#[test]
fn malformed_proxy_url_is_a_config_error() {
    let proxy = ProxyConfig {
        http: Some("http://[::1".to_string()),
        https: Some("http://127.0.0.1:5555".to_string()),
        ..Default::default()
    };
    let sink = HttpSink::new("http://127.0.0.1:9/services", proxy);

    let err = sink.deliver(&[record("service a")]).unwrap_err();
    assert_eq!(config_key(err), "POSTMAN_HTTP_PROXY");

    let proxy = ProxyConfig {
        http: Some("http://127.0.0.1:5555".to_string()),
        https: Some("http://[::1".to_string()),
        ..Default::default()
    };
    let sink = HttpSink::new("http://127.0.0.1:9/services", proxy);

    let err = sink.deliver(&[record("service a")]).unwrap_err();
    assert_eq!(config_key(err), "POSTMAN_HTTPS_PROXY");
}
