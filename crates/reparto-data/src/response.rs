//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Read a reqwest response to the end.
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self, FetchError> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();
        Ok(Self::new(status, headers, body))
    }

    /// 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Turn non-2xx statuses into errors.
    ///
    /// The backend reports failures as `{"mensaje": "..."}` or
    /// `{"error": "..."}`; that text becomes the error message when present.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }

        let message = self.server_message();
        match self.status {
            401 | 403 => Err(FetchError::Unauthorized(message)),
            status => Err(FetchError::HttpError { status, message }),
        }
    }

    fn server_message(&self) -> String {
        if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&self.body) {
            for key in ["mensaje", "message", "error"] {
                if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                    return msg.to_string();
                }
            }
        }
        match self.text() {
            Ok(text) if !text.trim().is_empty() => text,
            _ => "Unknown error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    #[test]
    fn test_status_classes() {
        assert!(make_response(204, b"").is_success());
        assert!(!make_response(300, b"").is_success());
        assert!(!make_response(404, b"").is_success());
    }

    #[test]
    fn test_json() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Data {
            value: i32,
        }

        let data: Data = make_response(200, br#"{"value": 42}"#).json().unwrap();
        assert_eq!(data, Data { value: 42 });
        assert!(make_response(200, b"not json").json::<Data>().is_err());
    }

    #[test]
    fn test_error_for_status_uses_server_message() {
        let err = make_response(422, br#"{"mensaje": "Producto agotado"}"#)
            .error_for_status()
            .unwrap_err();
        match err {
            FetchError::HttpError { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "Producto agotado");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_for_status_unauthorized() {
        let err = make_response(401, br#"{"error": "token expirado"}"#)
            .error_for_status()
            .unwrap_err();
        assert!(matches!(err, FetchError::Unauthorized(msg) if msg == "token expirado"));
    }

    #[test]
    fn test_error_for_status_plain_text_and_empty() {
        let err = make_response(500, b"boom").error_for_status().unwrap_err();
        assert!(matches!(err, FetchError::HttpError { message, .. } if message == "boom"));

        let err = make_response(502, b"").error_for_status().unwrap_err();
        assert!(matches!(err, FetchError::HttpError { message, .. } if message == "Unknown error"));
    }

    #[test]
    fn test_error_for_status_success_passthrough() {
        assert!(make_response(201, b"{}").error_for_status().is_ok());
    }
}
