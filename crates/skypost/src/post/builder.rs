//! Post accumulation and the publishing pipeline.

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use crate::auth::{Credentials, Session};
use crate::error::{CapacityError, Error};

use super::record::{EmbeddedImage, Facet, ImagesEmbed, POST_COLLECTION, PostRecord};
use super::{PostRef, Segment};

/// Maximum image attachments per post, per the images embed contract.
pub const MAX_IMAGES: usize = 4;

#[derive(Debug, Clone)]
struct ImageAttachment {
    bytes: Vec<u8>,
    alt: String,
}

/// Accumulates a post's segments and image attachments, then publishes.
///
/// Facet byte offsets are computed left-to-right as segments are added, so
/// segment order is fixed at build time. A builder is single-use: `post`
/// takes it by value, and there is no way to reuse one after submission,
/// successful or not.
///
/// # Example
///
/// ```no_run
/// use skypost::{Credentials, Host, PostBuilder, Segment};
///
/// # async fn example() -> Result<(), skypost::Error> {
/// let host = Host::new("https://bsky.social")?;
/// let creds = Credentials::new(host, "alice.bsky.social", "app-password");
///
/// let mut builder = PostBuilder::new();
/// builder.add_segment(Segment::plain("Here's a favorite website: "));
/// builder.add_segment(Segment::link("blue link text", "https://example.com"));
/// let post = builder.post(&creds).await?;
///
/// println!("posted {}", post.uri);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct PostBuilder {
    segments: Vec<Segment>,
    facets: Vec<Facet>,
    total_byte_len: usize,
    images: Vec<ImageAttachment>,
}

impl PostBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment.
    ///
    /// The segment's facet, if any, is anchored at the byte length of
    /// everything already added; only then does the segment's own length
    /// advance the running total.
    pub fn add_segment(&mut self, segment: Segment) {
        if let Some(facet) = segment.facet(self.total_byte_len) {
            self.facets.push(facet);
        }
        self.total_byte_len += segment.byte_len();
        self.segments.push(segment);
    }

    /// Append an image attachment with its alt text (pass `""` for none).
    ///
    /// # Errors
    ///
    /// [`Error::Capacity`] if [`MAX_IMAGES`] are already attached; the
    /// attachment list is left untouched.
    pub fn add_image(&mut self, bytes: Vec<u8>, alt: impl Into<String>) -> Result<(), Error> {
        if self.images.len() >= MAX_IMAGES {
            return Err(CapacityError { limit: MAX_IMAGES }.into());
        }
        self.images.push(ImageAttachment {
            bytes,
            alt: alt.into(),
        });
        Ok(())
    }

    /// Publish the post, stamped with the current UTC time.
    pub async fn post(self, credentials: &Credentials) -> Result<PostRef, Error> {
        self.post_at(credentials, Utc::now()).await
    }

    /// Publish the post with an explicit creation timestamp.
    ///
    /// Strictly sequential: session exchange, then one upload per image in
    /// insertion order, then record submission. A failure at any step aborts
    /// the rest; a failed exchange means no upload is ever attempted, and a
    /// failed upload means the post is never submitted. Already-uploaded
    /// blobs from an aborted run are simply abandoned.
    #[instrument(skip(self, credentials), fields(
        segments = self.segments.len(),
        images = self.images.len(),
    ))]
    pub async fn post_at(
        self,
        credentials: &Credentials,
        created_at: DateTime<Utc>,
    ) -> Result<PostRef, Error> {
        let session = Session::login(credentials).await?;

        let mut uploaded = Vec::with_capacity(self.images.len());
        for attachment in self.images {
            let blob = session.upload_blob(attachment.bytes).await?;
            uploaded.push(EmbeddedImage {
                alt: attachment.alt,
                image: blob,
            });
        }

        let text: String = self.segments.iter().map(Segment::text).collect();
        let facets = if self.facets.is_empty() {
            None
        } else {
            Some(self.facets)
        };
        let embed = if uploaded.is_empty() {
            None
        } else {
            Some(ImagesEmbed::new(uploaded))
        };

        let record = PostRecord::new(created_at, text, facets, embed);
        let post = session.create_record(POST_COLLECTION, &record).await?;

        info!(uri = %post.uri, "Post published");
        Ok(post)
    }
}
