//! MongoDB instance addresses as given on the command line.
use std::fmt;
use std::str::FromStr;

use crate::errors::InvalidEndpoint;

/// Port MongoDB listens on when none is specified.
pub const DEFAULT_PORT: u16 = 27017;

/// Address of a MongoDB instance.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new<S: Into<String>>(host: S, port: u16) -> Endpoint {
        Endpoint {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for Endpoint {
    type Err = InvalidEndpoint;

    /// Parse `host[:port]`, an empty or missing port means [`DEFAULT_PORT`].
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &'static str| InvalidEndpoint {
            input: input.to_string(),
            reason,
        };
        let (host, port) = match input.split_once(':') {
            Some((host, port)) => (host, port),
            None => (input, ""),
        };
        if host.is_empty() {
            return Err(invalid("host is empty"));
        }
        let port = match port {
            "" => DEFAULT_PORT,
            port => port
                .parse()
                .map_err(|_| invalid("port must be a number between 0 and 65535"))?,
        };
        Ok(Endpoint::new(host, port))
    }
}

/// Remove duplicate endpoints, keeping the first occurrence of each.
pub fn dedupe<I>(endpoints: I) -> Vec<Endpoint>
where
    I: IntoIterator<Item = Endpoint>,
{
    let mut unique: Vec<Endpoint> = Vec::new();
    for endpoint in endpoints {
        if !unique.contains(&endpoint) {
            unique.push(endpoint);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::dedupe;
    use super::Endpoint;
    use super::DEFAULT_PORT;

    #[test]
    fn parse_host_only() {
        let endpoint: Endpoint = "mongo1".parse().unwrap();
        assert_eq!(endpoint, Endpoint::new("mongo1", DEFAULT_PORT));
    }

    #[test]
    fn parse_host_and_port() {
        let endpoint: Endpoint = "10.0.0.4:27018".parse().unwrap();
        assert_eq!(endpoint, Endpoint::new("10.0.0.4", 27018));
        assert_eq!(endpoint.to_string(), "10.0.0.4:27018");
    }

    #[test]
    fn parse_empty_port() {
        let endpoint: Endpoint = "mongo1:".parse().unwrap();
        assert_eq!(endpoint.port, DEFAULT_PORT);
    }

    #[test]
    fn parse_rejects_bad_input() {
        let error = "".parse::<Endpoint>().unwrap_err();
        assert_eq!(error.reason, "host is empty");
        let error = "mongo1:abc".parse::<Endpoint>().unwrap_err();
        assert_eq!(error.input, "mongo1:abc");
        assert!("mongo1:70000".parse::<Endpoint>().is_err());
    }

    #[test]
    fn dedupe_keeps_first_seen_order() {
        let endpoints = ["b:27018", "a", "a:27017", "b:27018", "c"]
            .iter()
            .map(|input| input.parse().unwrap());
        let unique = dedupe(endpoints);
        assert_eq!(
            unique,
            vec![
                Endpoint::new("b", 27018),
                Endpoint::new("a", 27017),
                Endpoint::new("c", 27017),
            ]
        );
    }
}
