//! Generative model abstractions for relaychat.
//!
//! - `GenerativeModel`: RPITIT trait for concrete upstream implementations
//! - `BoxGenerativeModel`: Object-safe wrapper for dynamic dispatch

pub mod box_provider;
pub mod provider;
