pub mod engine;
pub mod error;
pub mod http_classifier;

// Re-export main types
pub use engine::{Classification, Classifier};
pub use error::ClassifierError;
pub use http_classifier::HttpClassifier;

#[cfg(test)]
pub(crate) mod test_support {
    use super::{Classification, Classifier, ClassifierError};
    use crate::models::pixel_grid::PixelGrid;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Request as seen by the throwaway server
    pub(crate) struct CapturedRequest {
        pub head: String,
        pub body: String,
    }

    /// Serve exactly one HTTP response on a random local port.
    ///
    /// Returns the base URL and a receiver yielding the captured request.
    pub(crate) async fn serve_once(
        status: &str,
        body: &str,
    ) -> (String, oneshot::Receiver<CapturedRequest>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let status = status.to_string();
        let body = body.to_string();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];

            let header_end = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break buf.len();
                }
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };

            let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
            let content_length = head
                .lines()
                .find_map(|line| {
                    let (key, value) = line.split_once(':')?;
                    if key.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);

            while buf.len() < header_end + content_length {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }

            let request_body = String::from_utf8_lossy(&buf[header_end..]).to_string();
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;

            let _ = tx.send(CapturedRequest {
                head,
                body: request_body,
            });
        });

        (format!("http://{}", addr), rx)
    }

    /// Classifier that answers every request with the same canned result
    pub(crate) struct StubClassifier {
        result: Result<Classification, ClassifierError>,
        calls: AtomicUsize,
    }

    impl StubClassifier {
        pub(crate) fn answering(pred: u8, probs: Vec<f64>) -> Self {
            Self {
                result: Ok(Classification {
                    pred,
                    probs,
                    time_ms: 5,
                }),
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn failing(error: ClassifierError) -> Self {
            Self {
                result: Err(error),
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Classifier for StubClassifier {
        async fn classify(&self, _grid: &PixelGrid) -> Result<Classification, ClassifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }

        async fn health_check(&self) -> Result<String, ClassifierError> {
            self.result.as_ref().map(|_| "stub".to_string()).map_err(Clone::clone)
        }
    }
}
