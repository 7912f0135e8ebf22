use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

/// Body of `POST /api/shorten`.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

/// Reply of `POST /api/shorten`.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub result: String,
}

impl ShortenResponse {
    /// Serializes the document with a single-space indent.
    pub fn to_pretty_json(&self) -> serde_json::Result<Vec<u8>> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b" "));
        self.serialize(&mut serializer)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_is_indented() {
        let response = ShortenResponse {
            result: "abc".to_string(),
        };

        let json = response.to_pretty_json().unwrap();
        assert_eq!(String::from_utf8(json).unwrap(), "{\n \"result\": \"abc\"\n}");
    }

    #[test]
    fn request_ignores_unknown_fields() {
        let request: ShortenRequest =
            serde_json::from_str(r#"{"url":"https://mai.ru","extra":1}"#).unwrap();
        assert_eq!(request.url, "https://mai.ru");
    }

    #[test]
    fn request_requires_url() {
        assert!(serde_json::from_str::<ShortenRequest>("{}").is_err());
        assert!(serde_json::from_str::<ShortenRequest>("not json").is_err());
    }
}
