//! Decoders for the four JSON resources.
//!
//! Decoding checks shape only. An envelope with `Status: false` decodes
//! successfully; the caller decides what the flag means.

use super::error::{FetchError, Resource};
use super::types::{DetailRecord, Envelope, ItemRecord, LanguageRecord, ListingRecord};

/// Items endpoint: a bare JSON array; `null` means no items
pub fn decode_items(body: &[u8]) -> Result<Vec<ItemRecord>, FetchError> {
    let items: Option<Vec<ItemRecord>> =
        serde_json::from_slice(body).map_err(|e| FetchError::decode(Resource::Items, e))?;
    Ok(items.unwrap_or_default())
}

/// Languages endpoint: envelope around an array
pub fn decode_languages(body: &[u8]) -> Result<Envelope<Vec<LanguageRecord>>, FetchError> {
    serde_json::from_slice(body).map_err(|e| FetchError::decode(Resource::Languages, e))
}

/// Listing endpoint: envelope around an array
pub fn decode_listing(body: &[u8]) -> Result<Envelope<Vec<ListingRecord>>, FetchError> {
    serde_json::from_slice(body).map_err(|e| FetchError::decode(Resource::Listing, e))
}

/// Detail endpoint: envelope around a single object
pub fn decode_detail(body: &[u8]) -> Result<Envelope<DetailRecord>, FetchError> {
    serde_json::from_slice(body).map_err(|e| FetchError::decode(Resource::Detail, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_items_bare_array() {
        let body = br#"[{"Name":"Windows 10","Id":"a1"},{"Name":"Windows 7","Id":"a2","Extra":1}]"#;
        let items = decode_items(body).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Windows 10");
        assert_eq!(items[1].id, "a2");
    }

    #[test]
    fn test_decode_items_rejects_envelope() {
        let body = br#"{"Status":true,"Result":[{"Name":"x","Id":"1"}]}"#;
        assert!(matches!(
            decode_items(body),
            Err(FetchError::Decode {
                resource: Resource::Items,
                ..
            })
        ));
    }

    #[test]
    fn test_decode_languages_ignores_false_status() {
        let body = br#"{"Status":false,"Result":[{"Lang":"English","Id":"en"}]}"#;
        let envelope = decode_languages(body).unwrap();
        assert!(!envelope.status);
        assert_eq!(envelope.result.len(), 1);
        assert_eq!(envelope.result[0].lang, "English");
    }

    #[test]
    fn test_decode_listing() {
        let body = br#"{"Status":true,"Result":[
            {"Name":"cn_windows_10_x64.iso","Id":"e1","Post":"2018-05-01","URL":"ed2k://|file|x|"}
        ]}"#;
        let envelope = decode_listing(body).unwrap();
        assert!(envelope.status);
        assert_eq!(envelope.result[0].name, "cn_windows_10_x64.iso");
        assert_eq!(envelope.result[0].post, "2018-05-01");
        assert_eq!(envelope.result[0].url, "ed2k://|file|x|");
    }

    #[test]
    fn test_decode_listing_empty_result() {
        let envelope = decode_listing(br#"{"Status":true,"Result":[]}"#).unwrap();
        assert!(envelope.result.is_empty());
    }

    #[test]
    fn test_decode_detail_field_names() {
        let body = br#"{"Status":true,"Result":{
            "FileName":"win.iso","SHA1":"ABCDEF","Size":"4.5GB",
            "PostDateString":"2018-05-01","DownLoad":"ed2k://|file|win.iso|"
        }}"#;
        let envelope = decode_detail(body).unwrap();
        let detail = envelope.result;
        assert_eq!(detail.file_name, "win.iso");
        assert_eq!(detail.sha1, "ABCDEF");
        assert_eq!(detail.size, "4.5GB");
        assert_eq!(detail.post_date, "2018-05-01");
        assert_eq!(detail.download, "ed2k://|file|win.iso|");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let envelope = decode_detail(br#"{"Status":true,"Result":{"FileName":"a.iso"}}"#).unwrap();
        assert_eq!(envelope.result.file_name, "a.iso");
        assert!(envelope.result.sha1.is_empty());
    }

    #[test]
    fn test_null_results_decode_as_empty() {
        let envelope = decode_languages(br#"{"Status":false,"Result":null}"#).unwrap();
        assert!(!envelope.status);
        assert!(envelope.result.is_empty());

        let envelope = decode_listing(br#"{"Status":false,"Result":null}"#).unwrap();
        assert!(envelope.result.is_empty());

        let envelope = decode_listing(br#"{"Status":false}"#).unwrap();
        assert!(envelope.result.is_empty());

        let envelope = decode_detail(br#"{"Status":false,"Result":null}"#).unwrap();
        assert!(envelope.result.file_name.is_empty());

        assert!(decode_items(b"null").unwrap().is_empty());
    }

    #[test]
    fn test_truncated_body_fails() {
        assert!(decode_languages(br#"{"Status":true,"Result":[{"Lang":"En"#).is_err());
        assert!(decode_items(b"").is_err());
    }

    #[test]
    fn test_wrong_top_level_type_fails() {
        assert!(decode_listing(br#"[{"Name":"x"}]"#).is_err());
        assert!(decode_detail(br#"{"Status":true,"Result":"text"}"#).is_err());
        assert!(decode_items(br#""text""#).is_err());
    }
}
