//! Request routing.
//!
//! Maps the wording of a request to a priority-ordered plan of providers.

pub mod router;

pub use router::route;
