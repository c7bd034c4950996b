// Feed loading: pagination against a scripted source and a local HTTP server,
// error handling, hand-off to a scene

use std::collections::VecDeque;

use thought_stream_wasm::feed::{load_all, ContentBlock, ContentPage, ContentSource, LoadError};
use thought_stream_wasm::models::StreamConfig;
use thought_stream_wasm::scene::Scene;

/// Serves canned responses and records requested URLs
struct ScriptedSource {
    responses: VecDeque<Result<ContentPage, LoadError>>,
    requested: Vec<String>,
}

impl ScriptedSource {
    fn new(responses: Vec<Result<ContentPage, LoadError>>) -> Self {
        Self {
            responses: responses.into(),
            requested: Vec::new(),
        }
    }
}

impl ContentSource for ScriptedSource {
    fn fetch_page(&mut self, url: &str) -> Result<ContentPage, LoadError> {
        self.requested.push(url.to_string());
        self.responses
            .pop_front()
            .unwrap_or_else(|| Err(LoadError::Network("no more responses".to_string())))
    }
}

/// A page of `count` blocks; every third block is an image
fn page(first_id: u64, count: usize) -> ContentPage {
    ContentPage::new(
        (0..count as u64)
            .map(|i| {
                let id = first_id + i;
                if id % 3 == 0 {
                    ContentBlock {
                        id: Some(id),
                        class: Some("Image".to_string()),
                        content: None,
                    }
                } else {
                    ContentBlock {
                        id: Some(id),
                        class: Some("Text".to_string()),
                        content: Some(format!("2024-01-01\nnote {}", id)),
                    }
                }
            })
            .collect(),
    )
}

#[test]
fn test_loads_until_short_page() {
    let mut source = ScriptedSource::new(vec![Ok(page(1, 100)), Ok(page(101, 100)), Ok(page(201, 37))]);
    let config = StreamConfig {
        channel: "my-channel".to_string(),
        ..StreamConfig::default()
    };

    let notes = load_all(&mut source, &config).unwrap();

    assert_eq!(source.requested.len(), 3);
    assert_eq!(
        source.requested[2],
        "https://api.are.na/v2/channels/my-channel?per=100&page=3"
    );
    let images = (1..=237).filter(|id| id % 3 == 0).count();
    assert_eq!(notes.len(), 237 - images);
}

#[test]
fn test_empty_first_page_gives_no_notes() {
    let mut source = ScriptedSource::new(vec![Ok(ContentPage::default())]);
    let notes = load_all(&mut source, &StreamConfig::default()).unwrap();

    assert!(notes.is_empty());
    assert_eq!(source.requested.len(), 1);
}

#[test]
fn test_failure_aborts_without_partial_result() {
    let mut source = ScriptedSource::new(vec![
        Ok(page(1, 100)),
        Err(LoadError::Status {
            url: "page 2".to_string(),
            status: 503,
        }),
    ]);

    let err = load_all(&mut source, &StreamConfig::default()).unwrap_err();
    assert_eq!(err.to_string(), "page 2 returned status 503");
    assert_eq!(source.requested.len(), 2);
}

#[test]
fn test_exact_multiple_needs_trailing_empty_page() {
    let mut source = ScriptedSource::new(vec![Ok(page(1, 100)), Ok(ContentPage::default())]);
    load_all(&mut source, &StreamConfig::default()).unwrap();
    assert_eq!(source.requested.len(), 2);
}

#[test]
fn test_loaded_notes_feed_a_scene() {
    let mut source = ScriptedSource::new(vec![Ok(page(1, 20))]);
    let config = StreamConfig::default();
    let notes = load_all(&mut source, &config).unwrap();

    let mut scene = Scene::with_seed(config, 1200.0, 800.0, 5).unwrap();
    scene.load_notes(notes);
    assert_eq!(scene.start(0.0), 8);
}

#[cfg(not(target_arch = "wasm32"))]
mod http {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    use super::page;
    use thought_stream_wasm::feed::{load_all, HttpSource, LoadError};
    use thought_stream_wasm::models::StreamConfig;

    /// Serves one canned `(status line, body)` per connection, then returns the request paths
    fn serve(responses: Vec<(&'static str, String)>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let mut paths = Vec::new();
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());

                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                paths.push(request_line.split_whitespace().nth(1).unwrap_or_default().to_string());
                loop {
                    let mut header = String::new();
                    reader.read_line(&mut header).unwrap();
                    if header == "\r\n" || header.is_empty() {
                        break;
                    }
                }

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                stream.write_all(response.as_bytes()).unwrap();
                stream.flush().unwrap();
            }
            paths
        });
        (base, handle)
    }

    fn config(api_base: String) -> StreamConfig {
        StreamConfig {
            api_base,
            channel: "local".to_string(),
            ..StreamConfig::default()
        }
    }

    #[test]
    fn test_http_source_follows_pages() {
        let full = serde_json::to_string(&page(1, 100)).unwrap();
        let short = serde_json::to_string(&page(101, 10)).unwrap();
        let (base, server) = serve(vec![("200 OK", full), ("200 OK", short)]);

        let notes = load_all(&mut HttpSource::default(), &config(base)).unwrap();

        let images = (1..=110).filter(|id| id % 3 == 0).count();
        assert_eq!(notes.len(), 110 - images);
        assert_eq!(
            server.join().unwrap(),
            vec![
                "/channels/local?per=100&page=1".to_string(),
                "/channels/local?per=100&page=2".to_string(),
            ]
        );
    }

    #[test]
    fn test_http_error_status_is_reported() {
        let (base, server) = serve(vec![("503 Service Unavailable", "{}".to_string())]);

        let err = load_all(&mut HttpSource::default(), &config(base)).unwrap_err();

        match err {
            LoadError::Status { url, status } => {
                assert_eq!(status, 503);
                assert!(url.ends_with("page=1"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
        server.join().unwrap();
    }

    #[test]
    fn test_http_non_json_body_is_decode_error() {
        let (base, server) = serve(vec![("200 OK", "<html>maintenance</html>".to_string())]);

        let err = load_all(&mut HttpSource::default(), &config(base)).unwrap_err();

        assert!(matches!(err, LoadError::Decode(_)), "got {:?}", err);
        server.join().unwrap();
    }
}
