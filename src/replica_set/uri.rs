//! Build MongoDB connection strings for replica set members.
use clap::ValueEnum;

use crate::endpoint::Endpoint;

/// Which members read operations are routed to by the replica set client.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "camelCase")]
pub enum ReadPreference {
    Primary,
    PrimaryPreferred,
    Secondary,
    #[default]
    SecondaryPreferred,
    Nearest,
}

impl std::fmt::Display for ReadPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::PrimaryPreferred => write!(f, "primaryPreferred"),
            Self::Secondary => write!(f, "secondary"),
            Self::SecondaryPreferred => write!(f, "secondaryPreferred"),
            Self::Nearest => write!(f, "nearest"),
        }
    }
}

/// Format a `mongodb://` URI for the given hosts and optional database.
pub fn uri(endpoints: &[Endpoint], db: Option<&str>) -> String {
    let netloc = endpoints
        .iter()
        .map(Endpoint::to_string)
        .collect::<Vec<_>>()
        .join(",");
    match db {
        Some(db) => format!("mongodb://{}/{}", netloc, db),
        None => format!("mongodb://{}", netloc),
    }
}

/// URI for a client aware of the whole replica set.
pub fn replica_set_uri(name: &str, members: &[Endpoint], read: ReadPreference) -> String {
    format!(
        "{}/?replicaSet={}&readPreference={}",
        uri(members, None),
        encode_option(name),
        read
    )
}

/// Percent-encode a connection string option value.
///
/// Only unreserved characters (RFC 3986) are left as they are.
fn encode_option(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            byte => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

/// URI for a client connected directly to the `admin` database of one member.
pub fn admin_uri(member: &Endpoint) -> String {
    let member = std::slice::from_ref(member);
    format!("{}?directConnection=true", uri(member, Some("admin")))
}

#[cfg(test)]
mod tests {
    use super::admin_uri;
    use super::replica_set_uri;
    use super::uri;
    use super::ReadPreference;
    use crate::endpoint::Endpoint;

    #[test]
    fn uri_with_and_without_db() {
        let members = vec![Endpoint::new("a", 27017), Endpoint::new("b", 27018)];
        assert_eq!(uri(&members, None), "mongodb://a:27017,b:27018");
        assert_eq!(uri(&members, Some("admin")), "mongodb://a:27017,b:27018/admin");
    }

    #[test]
    fn replica_set_uri_carries_options() {
        let members = vec![Endpoint::new("a", 27017), Endpoint::new("b", 27018)];
        let uri = replica_set_uri("rs0", &members, ReadPreference::default());
        assert_eq!(
            uri,
            "mongodb://a:27017,b:27018/?replicaSet=rs0&readPreference=secondaryPreferred"
        );
    }

    #[test]
    fn replica_set_name_is_encoded() {
        let members = vec![Endpoint::new("a", 27017)];
        let uri = replica_set_uri("rs 0&w=0", &members, ReadPreference::Primary);
        assert_eq!(
            uri,
            "mongodb://a:27017/?replicaSet=rs%200%26w%3D0&readPreference=primary"
        );
        let uri = replica_set_uri("rs-0_a.b~c", &members, ReadPreference::Primary);
        assert_eq!(
            uri,
            "mongodb://a:27017/?replicaSet=rs-0_a.b~c&readPreference=primary"
        );
    }

    #[test]
    fn admin_uri_is_direct() {
        let uri = admin_uri(&Endpoint::new("a", 27019));
        assert_eq!(uri, "mongodb://a:27019/admin?directConnection=true");
    }
}
