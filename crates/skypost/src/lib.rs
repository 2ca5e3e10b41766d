//! skypost - Bluesky post composition and publishing.
//!
//! This library assembles a rich-text post (plain text, hyperlinks, up to
//! four embedded JPEG images) into the exact XRPC wire format and publishes
//! it: session exchange, one blob upload per image, then record creation.
//! Facet offsets are computed in UTF-8 bytes, matching the byte-indexed
//! annotation format on the wire.
//!
//! # Example
//!
//! ```no_run
//! use skypost::{Credentials, Host, PostBuilder, Segment};
//!
//! # async fn example() -> Result<(), skypost::Error> {
//! let host = Host::new("https://bsky.social")?;
//! let creds = Credentials::new(host, "alice.bsky.social", "app-password");
//!
//! let mut builder = PostBuilder::new();
//! builder.add_segment(Segment::plain("Trying it out again. "));
//! builder.add_segment(Segment::link("A favorite website", "https://example.com"));
//! builder.add_image(std::fs::read("slide.jpeg").unwrap(), "a scanned slide")?;
//!
//! let post = builder.post(&creds).await?;
//! println!("posted {}", post.uri);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod error;
pub mod post;
pub mod types;

mod xrpc;

// Re-export primary types at crate root for convenience
pub use auth::{Credentials, Session};
pub use error::Error;
pub use post::{MAX_IMAGES, PostBuilder, PostRef, Segment};
pub use types::{Did, Host};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
