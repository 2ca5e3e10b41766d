//! Message segments: the units of post text.

use super::record::{ByteSlice, Facet, FacetFeature};

/// One unit of post text.
///
/// Segments are immutable once constructed. A post's text is the
/// concatenation of its segments in insertion order; link segments
/// additionally annotate their own byte range with a link facet.
///
/// # Example
///
/// ```
/// use skypost::Segment;
///
/// let seg = Segment::link("my site", "https://example.com");
/// assert_eq!(seg.text(), "my site");
/// assert_eq!(seg.byte_len(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Plain text; never annotated.
    Plain { text: String },
    /// Hyperlink: display text plus target URI. The two are independent, and
    /// the URI is not validated locally; a malformed URI passes through for
    /// the server to reject.
    Link { text: String, uri: String },
}

impl Segment {
    /// A plain-text segment.
    pub fn plain(text: impl Into<String>) -> Self {
        Segment::Plain { text: text.into() }
    }

    /// A hyperlink segment with display text and target URI.
    pub fn link(text: impl Into<String>, uri: impl Into<String>) -> Self {
        Segment::Link {
            text: text.into(),
            uri: uri.into(),
        }
    }

    /// The rendered text of this segment.
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain { text } | Segment::Link { text, .. } => text,
        }
    }

    /// Length of the rendered text in UTF-8 bytes.
    ///
    /// This is an encoded byte length, never a character count; the wire
    /// annotation format indexes bytes, and the two differ for any non-ASCII
    /// text.
    pub fn byte_len(&self) -> usize {
        self.text().len()
    }

    /// The facet this segment produces when it begins at `byte_start`.
    ///
    /// Plain segments produce none; link segments always produce a link
    /// facet spanning their own byte range.
    pub fn facet(&self, byte_start: usize) -> Option<Facet> {
        match self {
            Segment::Plain { .. } => None,
            Segment::Link { uri, .. } => Some(Facet {
                index: ByteSlice {
                    byte_start,
                    byte_end: byte_start + self.byte_len(),
                },
                features: vec![FacetFeature::link(uri.clone())],
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_segment_produces_no_facet() {
        let seg = Segment::plain("just words");
        assert!(seg.facet(0).is_none());
        assert!(seg.facet(100).is_none());
    }

    #[test]
    fn link_facet_spans_own_byte_range() {
        let seg = Segment::link("link", "https://example.com/a/very/long/path");
        let facet = seg.facet(6).unwrap();
        // Span is independent of the URI's length.
        assert_eq!(facet.index, ByteSlice { byte_start: 6, byte_end: 10 });
    }

    #[test]
    fn byte_len_counts_bytes_not_chars() {
        let seg = Segment::plain("héllo");
        assert_eq!(seg.text().chars().count(), 5);
        assert_eq!(seg.byte_len(), 6);
    }

    #[test]
    fn multibyte_link_text_widens_span() {
        let seg = Segment::link("λλ", "https://example.com");
        let facet = seg.facet(3).unwrap();
        assert_eq!(facet.index, ByteSlice { byte_start: 3, byte_end: 7 });
    }
}
