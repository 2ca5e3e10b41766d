//! Post composition: segments, facets, attachments, and the publish pipeline.

mod builder;
mod record;
mod segment;

pub use builder::{MAX_IMAGES, PostBuilder};
pub use record::{ByteSlice, Facet, FacetFeature, PostRef};
pub use segment::Segment;
