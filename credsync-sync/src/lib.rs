//! # credsync-sync
//!
//! Hash transcoding, reconciliation and execution.
//!
//! Call [`pipeline::run`] to perform a full sync from config paths, or wire
//! the pieces yourself: [`transcode`], [`reconcile`], [`apply`].

pub mod error;
pub mod executor;
pub mod pipeline;
pub mod reconcile;
pub mod transcode;

pub use error::SyncError;
pub use executor::apply;
pub use reconcile::reconcile;
pub use transcode::transcode;
