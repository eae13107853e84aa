//! Command implementations.

pub mod build;
pub mod enrich;
pub mod fingerprint;
pub mod resolve;

pub use self::build::execute_build;
pub use self::enrich::execute_enrich;
pub use self::fingerprint::execute_fingerprint;
pub use self::resolve::execute_resolve;
