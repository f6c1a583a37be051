mod link_metadata;

pub use link_metadata::{LinkMetadata, MetadataOverrides, PreviewVariant};
