//! Infrastructure layer: concrete collaborators for the authentication gate.

pub mod gotrue;
pub mod in_memory;
pub mod postgres;

pub use gotrue::GoTrueClient;
pub use in_memory::{InMemoryReadStore, StaticIdentityProvider};
pub use postgres::PostgresReadStore;
