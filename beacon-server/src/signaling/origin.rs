use std::collections::{HashMap, HashSet};

use url::Url;

/// Decides which browser origins may open a signaling connection.
///
/// Built once from configuration. An entry configured with an explicit port
/// matches only that exact `scheme://host:port`; an entry without one
/// matches its scheme+hostname on any port. Entries that are not a bare
/// `scheme://host[:port]` are skipped at build time.
#[derive(Debug, Default)]
pub struct OriginPolicy {
    exact: HashSet<String>,
    hosts: HashMap<String, HashSet<String>>,
}

impl OriginPolicy {
    pub fn new<I>(origins: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut policy = Self::default();

        for raw in origins {
            let Some(url) = parse_configured(raw.as_ref()) else {
                continue;
            };
            let scheme = url.scheme().to_owned();
            let Some(host) = url.host_str().map(str::to_owned) else {
                continue;
            };

            match url.port() {
                Some(port) => {
                    policy.exact.insert(format!("{scheme}://{host}:{port}"));
                }
                None => {
                    policy.exact.insert(format!("{scheme}://{host}"));
                    policy.hosts.entry(scheme).or_default().insert(host);
                }
            }
        }

        policy
    }

    /// True when no valid origin was configured at all.
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }

    /// Whether the presented `Origin` header value is permitted. Empty and
    /// unparsable origins never are.
    pub fn allows(&self, origin: &str) -> bool {
        let Some(url) = parse_presented(origin) else {
            return false;
        };
        let Some(host) = url.host_str() else {
            return false;
        };
        let scheme = url.scheme();

        let key = match url.port() {
            Some(port) => format!("{scheme}://{host}:{port}"),
            None => format!("{scheme}://{host}"),
        };
        if self.exact.contains(&key) {
            return true;
        }

        self.hosts
            .get(scheme)
            .is_some_and(|hosts| hosts.contains(host))
    }
}

fn parse_configured(raw: &str) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let url = Url::parse(raw).ok()?;
    url.host_str()?;
    // An origin is scheme://host[:port] and nothing more.
    if !matches!(url.path(), "" | "/") || url.query().is_some() || url.fragment().is_some() {
        return None;
    }
    Some(url)
}

fn parse_presented(origin: &str) -> Option<Url> {
    if origin.is_empty() {
        return None;
    }
    let url = Url::parse(origin).ok()?;
    url.host_str()?;
    Some(url)
}
