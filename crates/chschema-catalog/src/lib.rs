//! Content Hub entity catalog access.
//!
//! Pages through the entity-definition endpoint, keeps the raw pages for
//! archiving, and ingests them into the core data model.

pub mod error;
pub mod fetch;
pub mod http;
pub mod mapper;
pub mod options;
pub mod redaction;
pub mod snapshot;
pub mod source;
pub mod wire;

pub use error::{CatalogError, CatalogResult};
pub use fetch::{fetch_all_pages, fetch_definitions};
pub use http::ContentHubClient;
pub use mapper::{map_definition, map_pages};
pub use options::ApiSettings;
pub use redaction::{RedactedSettings, redact_settings, redact_url};
pub use snapshot::SnapshotSource;
pub use source::{CatalogSource, PageRequest};
pub use wire::{RawEntityDefinition, RawLink, RawMember, RawMemberGroup, RawPage};

pub use chschema_core::EntityDefinition;
