//! LKB Dictionary Feeder Protocol
//!
//! Drives `DictionaryFeeder` implementations on behalf of a gazetteer.
//!
//! # Overview
//!
//! A feeder contributes entities in two independent cycles:
//!
//! - **Bulk**: once at startup, `feed_all` fills the global dictionary.
//! - **Per document**: the host opens a [`LocalFeedSession`] for every
//!   document whose feeder supports local feeding, reports each parser
//!   checkpoint with the current lookahead window, and closes the session
//!   when the document is done.
//!
//! Entities fed during a session land in that session's private dictionary
//! only; they never reach the global dictionary or another document.
//!
//! # Example Usage
//!
//! ```
//! use lkb_domain::{Document, EntityRecord, SliceWindow};
//! use lkb_feeder::{EntityDictionary, FeederHost, LookupFeeder};
//! use std::collections::HashMap;
//!
//! let feeder = LookupFeeder::new(vec![
//!     EntityRecord::new("urn:e:nyc", "urn:c:City", "New York"),
//! ]);
//! let host = FeederHost::new(feeder, &HashMap::new());
//!
//! let mut global = EntityDictionary::new();
//! host.load_global(&mut global);
//!
//! let document = Document::new("news", "I love New York");
//! if let Some(mut session) = host.begin_document(&document) {
//!     let tokens = ["New", "York"];
//!     let fed = session.on_checkpoint(&SliceWindow::new(&tokens));
//!     assert_eq!(fed.len(), 1);
//!     session.finish();
//! };
//! ```

#![warn(missing_docs)]

mod dictionary;
mod error;
pub mod feeders;
mod host;
mod loader;

pub use dictionary::EntityDictionary;
pub use error::LoadError;
pub use feeders::{BulkFeeder, LookupFeeder, NullFeeder};
pub use host::{FeederHost, LocalFeedSession};
pub use loader::{DictionaryLoader, LoadOutcome};
