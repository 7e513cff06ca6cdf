//! The abstract document-store capability the core depends on.
//!
//! Transport and authentication live entirely outside this crate; the core
//! only sees an injected [`DocumentStore`] that can fetch snapshots and
//! apply batches of index-addressed mutations. Every snapshot returned by
//! [`DocumentStore::get`] establishes a fresh coordinate space: offsets
//! computed against one snapshot must never be reused after a
//! length-changing mutation has been applied against a later one.

mod op;

pub use op::{
    BulletPreset, CellBorder, InsertLocation, MutationOperation, ParagraphStyleUpdate,
    TableCellStyleUpdate,
};

use crate::error::Result;
use crate::model::StructuralDocument;

/// A live store of structural documents, addressed by id.
///
/// All calls block; the core is single-writer and strictly sequential, so
/// no two mutation batches are ever in flight concurrently against the
/// same document.
pub trait DocumentStore {
    /// Fetch the current structure of a document. The returned tree carries
    /// the spans that define the snapshot's coordinate space.
    fn get(&self, document_id: &str) -> Result<StructuralDocument>;

    /// Apply a batch of mutations atomically, in order.
    fn batch_update(
        &mut self,
        document_id: &str,
        operations: &[MutationOperation],
    ) -> Result<()>;

    /// Create a new empty document and return its id.
    fn create(&mut self, title: &str) -> Result<String>;

    /// Delete a document.
    fn delete(&mut self, document_id: &str) -> Result<()>;
}
