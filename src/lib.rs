//! Beck: reactive statements for embedded databases.
//!
//! A vendor-neutral asynchronous query API bridged onto synchronous
//! embedded engines. This facade re-exports the core API; engine drivers
//! such as `beck-embed` implement the [`Connection`] and [`Statement`]
//! traits behind it.

pub use beck_core::*;
