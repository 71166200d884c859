//! Cross-camera correlation engine for EPIC transient detections.
//!
//! Detection lists arrive from the variability search already carrying sky
//! coordinates. This crate decides which detections are one source seen by
//! more than one camera:
//!
//! 1. [`dedup::suppress_duplicates`] collapses the per-camera duplicates
//!    left by overlapping detection box sizes.
//! 2. [`pairwise::correlate_all`] cross-matches the three camera pairs into
//!    a global [`table::EdgeTable`].
//! 3. [`triple::resolve_triples`] chains pairwise edges into three-camera
//!    matches.
//! 4. [`annotate::annotate_sources`] writes the resulting labels back onto
//!    the detection records for the overlay renderer.
//!
//! Every stage is a pure function of its arguments; the edge table is the
//! only shared artifact and is passed explicitly.

pub mod annotate;
pub mod dedup;
pub mod error;
pub mod pairwise;
pub mod table;
pub mod triple;

pub use annotate::{annotate_all, annotate_sources};
pub use dedup::suppress_duplicates;
pub use error::XmatchError;
pub use pairwise::{correlate_all, correlate_pair};
pub use table::{CorrelationEdge, EdgeTable, Endpoint};
pub use triple::{resolve_triples, TripleMatch};
