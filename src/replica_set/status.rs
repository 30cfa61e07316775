//! Replica set status as reported by `replSetGetStatus`.
use mongodb::bson::Bson;
use mongodb::bson::Document;
use serde_json::Value as Json;

/// `state` of a member elected as primary.
const STATE_PRIMARY: i64 = 1;

/// Raw `replSetGetStatus` response.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplicaSetStatus(Document);

impl ReplicaSetStatus {
    /// Access the raw status document.
    pub fn document(&self) -> &Document {
        &self.0
    }

    /// Highest configuration version reported by the replica set members.
    pub fn config_version(&self) -> Option<i64> {
        self.members()
            .filter_map(|member| member.get("configVersion").and_then(as_i64))
            .max()
    }

    /// Check if a member of the replica set is the primary.
    pub fn has_primary(&self) -> bool {
        self.members()
            .any(|member| member.get("state").and_then(as_i64) == Some(STATE_PRIMARY))
    }

    /// Render the status as JSON, with dates converted to epoch seconds.
    pub fn to_json(&self) -> Json {
        crate::output::document_to_json(&self.0)
    }

    fn members(&self) -> impl Iterator<Item = &Document> {
        let members: &[Bson] = match self.0.get_array("members") {
            Ok(members) => members.as_slice(),
            Err(_) => &[],
        };
        members.iter().filter_map(Bson::as_document)
    }
}

impl From<Document> for ReplicaSetStatus {
    fn from(document: Document) -> Self {
        ReplicaSetStatus(document)
    }
}

/// MongoDB reports numbers as int32, int64 or double depending on the version.
fn as_i64(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(value) => Some(i64::from(*value)),
        Bson::Int64(value) => Some(*value),
        Bson::Double(value) => Some(*value as i64),
        _ => None,
    }
}
