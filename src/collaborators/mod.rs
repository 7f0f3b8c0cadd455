//! The three pluggable collaborators the engine calls through: persistence,
//! identity and policy. Each is an async trait, following the teacher's
//! `Storage`/`AuthProvider` pattern (`async_trait`, a `Dyn*` type alias over
//! `Arc<dyn Trait>`). The engine is generic over none of these directly —
//! it holds the type-erased handles so a `ClientSession` can be constructed
//! uniformly regardless of backend.
//!
//! These traits are contracts only; this crate's own reference
//! implementation lives in [`crate::mem`].

pub mod identity;
pub mod persistence;
pub mod policy;

pub use identity::{DynIdentity, Identity};
pub use persistence::{DynNewsgroup, DynPersistence, Newsgroup, Persistence, PostingMode};
pub use policy::{DynPolicy, Policy};
