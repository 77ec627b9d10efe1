//! Source Loader Trait
//!
//! The two operations the read-through cache needs from its environment.

/// A backing resource that can report a freshness marker and be parsed.
///
/// Markers are opaque; the cache only compares them for equality. A file
/// system implementation uses modification times, a store could use a
/// version counter or an ETag.
pub trait SourceLoader: Send + Sync {
    /// Freshness marker of a resource
    type Marker: Clone + PartialEq + Send + Sync;
    /// Deserialized content
    type Data: Send + Sync;
    /// Failure reported by either operation
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the resource's current modification marker.
    fn modification_marker(&self, source_id: &str) -> Result<Self::Marker, Self::Error>;

    /// Reads and deserializes the resource.
    fn read_and_parse(&self, source_id: &str) -> Result<Self::Data, Self::Error>;
}
