//! Request context captured alongside audit events.

use std::net::IpAddr;

/// Origin of the request that triggered an audited action.
///
/// # Example
///
/// ```
/// use tfms::audit::domain::RequestContext;
///
/// let context = RequestContext::from_remote_addr("10.0.0.7".parse().unwrap())
///     .with_forwarded_for("203.0.113.9, 10.0.0.1");
///
/// assert_eq!(context.client_ip(), Some("203.0.113.9".parse().unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Peer address of the connection.
    pub remote_addr: Option<IpAddr>,
    /// Raw `X-Forwarded-For` header value, if present.
    pub forwarded_for: Option<String>,
}

impl RequestContext {
    /// Creates a context with no origin information, used for system actions.
    #[must_use]
    pub const fn system() -> Self {
        Self {
            remote_addr: None,
            forwarded_for: None,
        }
    }

    /// Creates a context from the connection's peer address.
    #[must_use]
    pub const fn from_remote_addr(remote_addr: IpAddr) -> Self {
        Self {
            remote_addr: Some(remote_addr),
            forwarded_for: None,
        }
    }

    /// Sets the raw `X-Forwarded-For` header value.
    #[must_use]
    pub fn with_forwarded_for(mut self, header: impl Into<String>) -> Self {
        self.forwarded_for = Some(header.into());
        self
    }

    /// Resolves the client address.
    ///
    /// The first entry of `X-Forwarded-For` wins when it parses as an IP
    /// address; otherwise the peer address is used.
    #[must_use]
    pub fn client_ip(&self) -> Option<IpAddr> {
        self.forwarded_for
            .as_deref()
            .and_then(|header| header.split(',').next())
            .and_then(|first| first.trim().parse::<IpAddr>().ok())
            .or(self.remote_addr)
    }
}
