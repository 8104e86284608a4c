//! Transports that carry one chat message to the language-model service.
use bevy::log::debug;
use reqwest::{
    blocking::{Client, ClientBuilder},
    header::CONTENT_TYPE,
};
use serde::{Deserialize, Serialize};

use crate::core::settings::ChatSettings;

use super::errors::ChatError;

/// Performs one request/response exchange. Called off the main thread.
pub trait ChatTransport: Send + Sync {
    fn exchange(&self, message: &str) -> Result<String, ChatError>;

    fn describe(&self) -> String;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    response: String,
}

/// Builds the JSON request body.
pub fn request_body(message: &str) -> Result<String, ChatError> {
    serde_json::to_string(&ChatRequest { message }).map_err(|err| ChatError::payload(err.to_string()))
}

/// Extracts `response` from a `{"response": "<text>"}` body.
pub fn parse_response(body: &str) -> Result<String, ChatError> {
    serde_json::from_str::<ChatResponse>(body)
        .map(|parsed| parsed.response)
        .map_err(|err| ChatError::payload(err.to_string()))
}

/// `POST <url>` with a JSON body, bounded by the configured timeout.
pub struct HttpChatTransport {
    http: Client,
    url: String,
}

impl HttpChatTransport {
    pub fn new(settings: &ChatSettings) -> Result<Self, ChatError> {
        Self::from_builder(Client::builder(), settings)
    }

    fn from_builder(builder: ClientBuilder, settings: &ChatSettings) -> Result<Self, ChatError> {
        let http = builder
            .timeout(settings.timeout)
            .build()
            .map_err(|err| ChatError::ClientBuild {
                message: err.to_string(),
            })?;

        Ok(Self {
            http,
            url: settings.url.clone(),
        })
    }
}

impl ChatTransport for HttpChatTransport {
    fn exchange(&self, message: &str) -> Result<String, ChatError> {
        let payload = request_body(message)?;
        debug!(target: "chat", "Sending {} to: {}", payload, self.url);
        let response = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .map_err(|err| ChatError::transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|err| ChatError::transport(err.to_string()))?;

        if !status.is_success() {
            return Err(ChatError::status(status.as_u16(), body));
        }

        debug!(target: "chat", "Received response: {}", body);
        parse_response(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Stand-in used when no HTTP client could be built; every exchange fails.
#[derive(Debug, Default)]
pub struct OfflineTransport;

impl ChatTransport for OfflineTransport {
    fn exchange(&self, _message: &str) -> Result<String, ChatError> {
        Err(ChatError::Unavailable)
    }

    fn describe(&self) -> String {
        "offline".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io::{Read, Write},
        net::{TcpListener, TcpStream},
        thread::{self, JoinHandle},
        time::Duration,
    };

    #[test]
    fn request_body_is_a_single_message_field() {
        assert_eq!(
            request_body("hello \"cell\"").unwrap(),
            r#"{"message":"hello \"cell\""}"#
        );
    }

    #[test]
    fn response_field_is_extracted() {
        assert_eq!(
            parse_response(r#"{"response": "Hi there"}"#),
            Ok("Hi there".to_string())
        );
        assert_eq!(
            parse_response(r#"{"response": "ok", "model": "llama3"}"#),
            Ok("ok".to_string())
        );
    }

    #[test]
    fn malformed_bodies_are_payload_errors() {
        for body in ["", "not json", r#"{"reply": "x"}"#, r#"{"response": 3}"#] {
            assert!(matches!(
                parse_response(body),
                Err(ChatError::Payload { .. })
            ));
        }
    }

    /// Serves one canned HTTP reply on a loopback port and hands back the raw request.
    fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/chat", listener.local_addr().unwrap());
        let reply = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            stream.write_all(reply.as_bytes()).unwrap();
            stream.flush().unwrap();
            request
        });
        (url, server)
    }

    fn read_request(stream: &mut TcpStream) -> String {
        let mut raw = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let read = stream.read(&mut chunk).unwrap();
            if read == 0 {
                break;
            }
            raw.extend_from_slice(&chunk[..read]);

            let text = String::from_utf8_lossy(&raw).to_string();
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if raw.len() >= head_end + 4 + content_length {
                    return text;
                }
            }
        }
        String::from_utf8_lossy(&raw).to_string()
    }

    fn loopback_transport(url: String) -> HttpChatTransport {
        let settings = ChatSettings {
            url,
            timeout: Duration::from_secs(5),
        };
        HttpChatTransport::from_builder(Client::builder().no_proxy(), &settings).unwrap()
    }

    #[test]
    fn exchange_posts_json_and_reads_the_reply() {
        let (url, server) = serve_once("200 OK", r#"{"response": "Hi there"}"#);
        let transport = loopback_transport(url);

        assert_eq!(transport.exchange("hello"), Ok("Hi there".to_string()));

        let request = server.join().unwrap();
        let lowered = request.to_ascii_lowercase();
        assert!(lowered.starts_with("post /chat "), "{request}");
        assert!(lowered.contains("content-type: application/json"), "{request}");
        assert!(request.ends_with(r#"{"message":"hello"}"#), "{request}");
    }

    #[test]
    fn exchange_maps_error_status() {
        let (url, server) = serve_once("500 Internal Server Error", "model offline");
        let transport = loopback_transport(url);

        assert_eq!(
            transport.exchange("hello"),
            Err(ChatError::status(500, "model offline"))
        );
        server.join().unwrap();
    }

    #[test]
    fn exchange_reports_malformed_success_body() {
        let (url, server) = serve_once("200 OK", "<html>not json</html>");
        let transport = loopback_transport(url);

        assert!(matches!(
            transport.exchange("hello"),
            Err(ChatError::Payload { .. })
        ));
        server.join().unwrap();
    }

    #[test]
    fn offline_transport_always_fails() {
        assert_eq!(OfflineTransport.exchange("hi"), Err(ChatError::Unavailable));
    }
}
