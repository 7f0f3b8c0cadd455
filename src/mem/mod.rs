//! A minimal, fully in-memory implementation of the three collaborator
//! traits (§4.6). Grounded in the teacher's `storage::sqlite` module's
//! shape — a struct wrapping shared state behind an async-safe lock,
//! constructed with `::new()`, no I/O — but backed by plain `HashMap`s
//! instead of a database connection. Used by this crate's own tests and
//! exported as a runnable starting point for integrators; it is explicitly
//! a reference, not a production backend: nothing here survives a process
//! restart.

pub mod identity;
pub mod persistence;
pub mod policy;

pub use identity::MemIdentity;
pub use persistence::MemPersistence;
pub use policy::MemPolicy;
