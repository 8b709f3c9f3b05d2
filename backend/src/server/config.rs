//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use pressroom::outbound::persistence::DbPool;
use pressroom::outbound::token::TokenSettings;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) tokens: TokenSettings,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration backed by the in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, tokens: TokenSettings) -> Self {
        Self {
            bind_addr,
            tokens,
            db_pool: None,
        }
    }

    /// Attach a database connection pool so repositories use PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
