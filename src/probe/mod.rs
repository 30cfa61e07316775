//! Wait for MongoDB instances to accept TCP connections.
//!
//! Every endpoint is probed by its own task which keeps trying to connect until it
//! succeeds. Successful tasks report to a single collector over a channel and the
//! collector gives up on the remaining tasks once the global timeout expires.
use std::collections::HashSet;
use std::time::Duration;

use slog::debug;
use slog::info;
use slog::warn;
use slog::Logger;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::Instant;

use crate::endpoint::Endpoint;


/// Pause between failed connection attempts to the same endpoint.
pub const RETRY_INTERVAL: Duration = Duration::from_millis(100);

/// Endpoints classified by the outcome of a probe.
///
/// Every probed endpoint is in exactly one of the two lists.
/// Both lists preserve the order endpoints were given in.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProbeResult {
    pub reachable: Vec<Endpoint>,
    pub unreachable: Vec<Endpoint>,
}

impl ProbeResult {
    /// True when no probed endpoint failed to become reachable.
    pub fn all_reachable(&self) -> bool {
        self.unreachable.is_empty()
    }

    /// True when no endpoint was probed at all.
    pub fn is_empty(&self) -> bool {
        self.reachable.is_empty() && self.unreachable.is_empty()
    }
}

/// Wait for all endpoints to accept connections, up to `timeout` for the whole batch.
///
/// Endpoints still not reachable when the timeout expires are reported as unreachable.
/// Failed connection attempts are not errors and this function never fails.
pub async fn probe_all(
    endpoints: &[Endpoint],
    timeout: Duration,
    logger: &Logger,
) -> ProbeResult {
    let deadline = Instant::now() + timeout;
    let (sender, mut receiver) = mpsc::unbounded_channel();
    let mut tasks = JoinSet::new();
    for endpoint in endpoints {
        let endpoint = endpoint.clone();
        let sender = sender.clone();
        let logger = logger.clone();
        tasks.spawn(async move {
            wait_for(&endpoint, &logger).await;
            // The collector may have stopped listening after the deadline.
            let _ = sender.send(endpoint);
        });
    }
    drop(sender);

    let mut reachable = HashSet::new();
    loop {
        match tokio::time::timeout_at(deadline, receiver.recv()).await {
            Ok(Some(endpoint)) => {
                info!(logger, "Instance is reachable"; "endpoint" => %endpoint);
                reachable.insert(endpoint);
            }
            Ok(None) => break,
            Err(_) => {
                warn!(
                    logger,
                    "Timed out waiting for instances";
                    "timeout" => ?timeout,
                    "pending" => endpoints.len() - reachable.len(),
                );
                break;
            }
        }
    }
    tasks.abort_all();

    let mut result = ProbeResult::default();
    for endpoint in endpoints {
        if reachable.contains(endpoint) {
            result.reachable.push(endpoint.clone());
        } else {
            result.unreachable.push(endpoint.clone());
        }
    }
    result
}

/// Keep connecting to the endpoint until a connection is established.
async fn wait_for(endpoint: &Endpoint, logger: &Logger) {
    loop {
        match TcpStream::connect((endpoint.host.as_str(), endpoint.port)).await {
            Ok(_) => return,
            Err(error) => {
                debug!(
                    logger,
                    "Instance not reachable yet";
                    "endpoint" => %endpoint,
                    "error" => %error,
                );
                tokio::time::sleep(RETRY_INTERVAL).await;
            }
        }
    }
}
