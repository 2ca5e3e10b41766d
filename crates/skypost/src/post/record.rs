//! Wire-format types for the post record.
//!
//! Field spellings here are the AT Protocol contract: `$type` tags,
//! camelCase byte indices, and a `createdAt` timestamp with a `Z` suffix.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Collection NSID that post records are created under.
pub(crate) const POST_COLLECTION: &str = "app.bsky.feed.post";

const POST_TYPE: &str = "app.bsky.feed.post";
const LINK_FEATURE_TYPE: &str = "app.bsky.richtext.facet#link";
const IMAGES_EMBED_TYPE: &str = "app.bsky.embed.images";

/// A byte range into the post text.
///
/// Offsets are UTF-8 byte offsets, not character offsets; the wire annotation
/// format is byte-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ByteSlice {
    pub byte_start: usize,
    pub byte_end: usize,
}

/// A text annotation anchored to a byte range of the post text.
#[derive(Debug, Clone, Serialize)]
pub struct Facet {
    pub index: ByteSlice,
    pub features: Vec<FacetFeature>,
}

/// A typed facet feature payload.
#[derive(Debug, Clone, Serialize)]
pub struct FacetFeature {
    #[serde(rename = "$type")]
    feature_type: &'static str,
    uri: String,
}

impl FacetFeature {
    /// A link feature pointing at `uri`.
    pub fn link(uri: impl Into<String>) -> Self {
        Self {
            feature_type: LINK_FEATURE_TYPE,
            uri: uri.into(),
        }
    }
}

/// One embedded image: alt text plus the uploaded blob descriptor.
#[derive(Debug, Serialize)]
pub(crate) struct EmbeddedImage {
    pub alt: String,
    pub image: serde_json::Value,
}

/// The images embed block, in upload order.
#[derive(Debug, Serialize)]
pub(crate) struct ImagesEmbed {
    #[serde(rename = "$type")]
    embed_type: &'static str,
    pub images: Vec<EmbeddedImage>,
}

impl ImagesEmbed {
    pub(crate) fn new(images: Vec<EmbeddedImage>) -> Self {
        Self {
            embed_type: IMAGES_EMBED_TYPE,
            images,
        }
    }
}

/// The post record as submitted to createRecord.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostRecord {
    #[serde(rename = "$type")]
    record_type: &'static str,
    pub created_at: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets: Option<Vec<Facet>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed: Option<ImagesEmbed>,
}

impl PostRecord {
    pub(crate) fn new(
        created_at: DateTime<Utc>,
        text: String,
        facets: Option<Vec<Facet>>,
        embed: Option<ImagesEmbed>,
    ) -> Self {
        Self {
            record_type: POST_TYPE,
            created_at: format_created_at(created_at),
            text,
            facets,
            embed,
        }
    }
}

/// ISO-8601 UTC with a `Z` suffix, never a numeric offset.
fn format_created_at(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Reference to a successfully created post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRef {
    /// AT URI of the created record.
    pub uri: String,
    /// CID of the created record.
    pub cid: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn created_at_uses_z_suffix() {
        let stamp = format_created_at(noon());
        assert_eq!(stamp, "2024-05-01T12:00:00.000000Z");
        assert!(!stamp.contains("+00:00"));
    }

    #[test]
    fn record_serializes_wire_shape() {
        let facet = Facet {
            index: ByteSlice {
                byte_start: 6,
                byte_end: 10,
            },
            features: vec![FacetFeature::link("https://example.com")],
        };
        let record = PostRecord::new(noon(), "Hello link".to_string(), Some(vec![facet]), None);

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "$type": "app.bsky.feed.post",
                "createdAt": "2024-05-01T12:00:00.000000Z",
                "text": "Hello link",
                "facets": [{
                    "index": {"byteStart": 6, "byteEnd": 10},
                    "features": [{
                        "$type": "app.bsky.richtext.facet#link",
                        "uri": "https://example.com"
                    }]
                }]
            })
        );
    }

    #[test]
    fn empty_facets_and_embed_are_omitted() {
        let record = PostRecord::new(noon(), "plain".to_string(), None, None);
        let value = serde_json::to_value(&record).unwrap();

        assert!(value.get("facets").is_none());
        assert!(value.get("embed").is_none());
    }

    #[test]
    fn embed_round_trips_blob_verbatim() {
        let blob = json!({
            "$type": "blob",
            "ref": {"$link": "bafyreib..."},
            "mimeType": "image/jpeg",
            "size": 12345
        });
        let embed = ImagesEmbed::new(vec![EmbeddedImage {
            alt: "a slide".to_string(),
            image: blob.clone(),
        }]);
        let record = PostRecord::new(noon(), String::new(), None, Some(embed));
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["embed"]["$type"], "app.bsky.embed.images");
        assert_eq!(value["embed"]["images"][0]["alt"], "a slide");
        assert_eq!(value["embed"]["images"][0]["image"], blob);
    }
}
