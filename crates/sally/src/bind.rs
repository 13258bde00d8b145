use anyhow::{Context as AnyhowContext, Result};
use std::net::SocketAddr;

/// Joins host and port into something `lookup_host` accepts, bracketing bare
/// IPv6 literals.
pub(crate) fn bind_target(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

/// Resolves `bind` and picks the address to listen on.
pub(crate) async fn resolve_bind_addr(bind: &str) -> Result<SocketAddr> {
    let resolved = tokio::net::lookup_host(bind)
        .await
        .with_context(|| format!("Failed to resolve bind address: {bind}"))?;

    pick_listen_addr(resolved)
        .with_context(|| format!("Bind address {bind} did not resolve to any socket address"))
}

/// First IPv4 address, or the first address of any family when there is none.
fn pick_listen_addr(addrs: impl IntoIterator<Item = SocketAddr>) -> Option<SocketAddr> {
    let mut fallback = None;
    for addr in addrs {
        if addr.is_ipv4() {
            return Some(addr);
        }
        fallback.get_or_insert(addr);
    }
    fallback
}
