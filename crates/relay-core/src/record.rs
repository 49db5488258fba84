// ABOUTME: Defines StreamMetadataRecord, the single "now playing" record the relay holds.
// ABOUTME: Provides total parsers for push bodies and stored files that never fail on bad input.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Reasons a push body cannot become a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PushRejected {
    #[error("Missing required fields")]
    MissingStreamUrl,
}

/// Metadata for the stream currently playing. Only `stream_url` is required;
/// the optional fields serialize as `null` when absent so every stored and
/// returned record carries all five keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamMetadataRecord {
    pub stream_url: String,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub image_url: Option<String>,
}

impl StreamMetadataRecord {
    /// Create a record with only the stream URL set.
    pub fn new(stream_url: impl Into<String>) -> Self {
        Self {
            stream_url: stream_url.into(),
            title: None,
            artist: None,
            album: None,
            image_url: None,
        }
    }

    /// Build a record from a raw push body.
    ///
    /// Never fails on malformed input: anything that is not a JSON object is
    /// read as `{}`. The only rejection is a missing or empty `streamUrl`.
    /// Optional fields keep string values and drop everything else to `None`.
    pub fn from_push_body(body: &[u8]) -> Result<Self, PushRejected> {
        let fields = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        Self::from_fields(&fields)
    }

    /// Build a record from an already-decoded JSON object.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, PushRejected> {
        let stream_url = string_field(fields, "streamUrl")
            .filter(|url| !url.is_empty())
            .ok_or(PushRejected::MissingStreamUrl)?;

        Ok(Self {
            stream_url,
            title: string_field(fields, "title"),
            artist: string_field(fields, "artist"),
            album: string_field(fields, "album"),
            image_url: string_field(fields, "imageUrl"),
        })
    }

    /// Parse the contents of a persisted store file. Returns `None` if the
    /// bytes are not a JSON object or carry no usable `streamUrl`. Optional
    /// fields follow the same rules as a push, so a file written by another
    /// producer with a non-string title still yields the record.
    pub fn from_stored(bytes: &[u8]) -> Option<Self> {
        match serde_json::from_slice::<Value>(bytes).ok()? {
            Value::Object(fields) => Self::from_fields(&fields).ok(),
            _ => None,
        }
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_leaves_optionals_empty() {
        let record = StreamMetadataRecord::new("http://x/stream");

        assert_eq!(record.stream_url, "http://x/stream");
        assert!(record.title.is_none());
        assert!(record.artist.is_none());
        assert!(record.album.is_none());
        assert!(record.image_url.is_none());
    }

    #[test]
    fn serializes_all_keys_with_nulls() {
        let mut record = StreamMetadataRecord::new("http://x/stream");
        record.title = Some("T".to_string());
        record.artist = Some("A".to_string());

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "streamUrl": "http://x/stream",
                "title": "T",
                "artist": "A",
                "album": null,
                "imageUrl": null
            })
        );
    }

    #[test]
    fn push_body_with_all_fields() {
        let body = json!({
            "streamUrl": "http://x/stream",
            "title": "Song",
            "artist": "Band",
            "album": "Record",
            "imageUrl": "http://x/cover.jpg"
        });

        let record =
            StreamMetadataRecord::from_push_body(&serde_json::to_vec(&body).unwrap()).unwrap();

        assert_eq!(record.stream_url, "http://x/stream");
        assert_eq!(record.title.as_deref(), Some("Song"));
        assert_eq!(record.artist.as_deref(), Some("Band"));
        assert_eq!(record.album.as_deref(), Some("Record"));
        assert_eq!(record.image_url.as_deref(), Some("http://x/cover.jpg"));
    }

    #[test]
    fn push_body_empty_object_is_rejected() {
        let result = StreamMetadataRecord::from_push_body(b"{}");
        assert_eq!(result, Err(PushRejected::MissingStreamUrl));
    }

    #[test]
    fn push_body_empty_stream_url_is_rejected() {
        let result = StreamMetadataRecord::from_push_body(br#"{"streamUrl": ""}"#);
        assert_eq!(result, Err(PushRejected::MissingStreamUrl));
    }

    #[test]
    fn push_body_malformed_is_treated_as_empty() {
        for body in [&b"not json"[..], b"", b"[1, 2]", b"\"streamUrl\"", b"{\"streamUrl\":"] {
            assert_eq!(
                StreamMetadataRecord::from_push_body(body),
                Err(PushRejected::MissingStreamUrl),
                "body {:?} should be read as an empty object",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn push_body_non_string_fields_become_none() {
        let body = br#"{"streamUrl": "http://x/s", "title": 7, "artist": null, "album": ["a"]}"#;
        let record = StreamMetadataRecord::from_push_body(body).unwrap();

        assert!(record.title.is_none());
        assert!(record.artist.is_none());
        assert!(record.album.is_none());
    }

    #[test]
    fn push_body_non_string_stream_url_is_rejected() {
        let result = StreamMetadataRecord::from_push_body(br#"{"streamUrl": 42}"#);
        assert_eq!(result, Err(PushRejected::MissingStreamUrl));
    }

    #[test]
    fn rejection_message_matches_api_error() {
        assert_eq!(
            PushRejected::MissingStreamUrl.to_string(),
            "Missing required fields"
        );
    }

    #[test]
    fn from_stored_reads_written_record() {
        let mut record = StreamMetadataRecord::new("http://x/stream");
        record.album = Some("LP".to_string());

        let bytes = serde_json::to_vec(&record).unwrap();
        assert_eq!(StreamMetadataRecord::from_stored(&bytes), Some(record));
    }

    #[test]
    fn from_stored_tolerates_missing_optional_keys() {
        let record = StreamMetadataRecord::from_stored(br#"{"streamUrl": "http://x/s"}"#).unwrap();
        assert_eq!(record, StreamMetadataRecord::new("http://x/s"));
    }

    #[test]
    fn from_stored_rejects_missing_stream_url() {
        assert!(StreamMetadataRecord::from_stored(br#"{"title": "orphan"}"#).is_none());
        assert!(StreamMetadataRecord::from_stored(br#"{"streamUrl": ""}"#).is_none());
    }

    #[test]
    fn from_stored_keeps_record_with_non_string_optionals() {
        let bytes = br#"{"streamUrl":"http://x/s","title":7,"artist":null,"album":"LP","imageUrl":false}"#;
        let record = StreamMetadataRecord::from_stored(bytes).expect("record should survive");

        assert_eq!(record.stream_url, "http://x/s");
        assert!(record.title.is_none());
        assert!(record.artist.is_none());
        assert_eq!(record.album.as_deref(), Some("LP"));
        assert!(record.image_url.is_none());
    }

    #[test]
    fn from_stored_rejects_non_object_json() {
        assert!(StreamMetadataRecord::from_stored(b"[\"http://x/s\"]").is_none());
        assert!(StreamMetadataRecord::from_stored(br#"{"streamUrl": 5}"#).is_none());
    }

    #[test]
    fn from_stored_rejects_corrupt_file() {
        assert!(StreamMetadataRecord::from_stored(b"{\"streamUrl\": \"http://x").is_none());
    }
}
