//! Reference TCP listener: binds one address and spawns one task per
//! accepted connection, each running [`crate::engine::run`] against a
//! shared set of in-memory collaborators.
//!
//! Per the redesign note in spec §9, this replaces the teacher's global
//! fixed-size worker pool with a listener whose lifecycle is owned by a
//! single value — no shared static executor, no configurable thread count
//! to reason about beyond "one task per connection".

use std::sync::Arc;
use std::time::Duration;

use tokio::io::BufReader;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::collaborators::{DynIdentity, DynPersistence, DynPolicy};
use crate::config::Config;
use crate::framing::Framing;

/// A bound listener and the join handle of its accept loop. Dropping this
/// does not stop the loop; call [`Listener::shutdown`] for that.
pub struct Listener {
    handle: JoinHandle<()>,
}

impl Listener {
    /// Binds `config.addr` and spawns the accept loop. Each accepted
    /// connection gets its own task running the protocol engine against the
    /// given collaborators.
    pub async fn start(
        config: Config,
        persistence: DynPersistence,
        identity: DynIdentity,
        policy: DynPolicy,
    ) -> anyhow::Result<Self> {
        let tcp_listener = TcpListener::bind(&config.addr).await?;
        info!(addr = %config.addr, "listening");

        let server_label = Arc::new(config.site_name.clone());
        let idle_timeout = Duration::from_secs(config.idle_timeout_secs);
        let handle = tokio::spawn(async move {
            loop {
                match tcp_listener.accept().await {
                    Ok((socket, peer)) => {
                        info!(%peer, "accepted connection");
                        let persistence = persistence.clone();
                        let identity = identity.clone();
                        let policy = policy.clone();
                        let server_label = server_label.clone();
                        tokio::spawn(async move {
                            let (read_half, write_half) = socket.into_split();
                            let mut framing = Framing::new(BufReader::new(read_half), write_half);
                            if let Err(err) = crate::engine::run(
                                &mut framing,
                                persistence,
                                identity,
                                policy,
                                &server_label,
                                Some(idle_timeout),
                            )
                            .await
                            {
                                error!(%err, "connection ended with an error");
                            }
                        });
                    }
                    Err(err) => error!(%err, "failed to accept connection"),
                }
            }
        });

        Ok(Listener { handle })
    }

    /// Aborts the accept loop. Already-spawned connection tasks are left to
    /// finish on their own.
    pub fn shutdown(self) {
        self.handle.abort();
    }
}
