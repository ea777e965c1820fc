//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use mesto::outbound::persistence::DbPool;
use mesto::outbound::security::SigningContext;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) signing: Arc<SigningContext>,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration bound to `bind_addr` that signs
    /// tokens with `signing`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, signing: SigningContext) -> Self {
        Self {
            bind_addr,
            signing: Arc::new(signing),
            db_pool: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without a pool the server keeps users and cards in process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
