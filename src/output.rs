//! Render MongoDB documents as JSON for scripts consuming `mongors` output.
//!
//! Dates and timestamps are emitted as Unix epoch seconds (floats) rather than
//! extended JSON objects so they can be compared and sorted as numbers.
use mongodb::bson::Bson;
use mongodb::bson::Document;
use serde_json::Map;
use serde_json::Number;
use serde_json::Value as Json;

/// Convert a BSON document into a JSON object.
pub fn document_to_json(document: &Document) -> Json {
    let object: Map<String, Json> = document
        .iter()
        .map(|(key, value)| (key.clone(), to_json(value)))
        .collect();
    Json::Object(object)
}

/// Convert a BSON value into its JSON representation.
pub fn to_json(value: &Bson) -> Json {
    match value {
        Bson::DateTime(date) => epoch_seconds(date.timestamp_millis() as f64 / 1000.0),
        Bson::Timestamp(timestamp) => epoch_seconds(f64::from(timestamp.time)),
        Bson::Double(value) => float(*value),
        Bson::Document(document) => document_to_json(document),
        Bson::Array(values) => Json::Array(values.iter().map(to_json).collect()),
        other => other.clone().into_relaxed_extjson(),
    }
}

/// Epoch seconds with microsecond precision.
fn epoch_seconds(seconds: f64) -> Json {
    float((seconds * 1_000_000.0).round() / 1_000_000.0)
}

/// JSON has no representation for NaN and infinities.
fn float(value: f64) -> Json {
    match Number::from_f64(value) {
        Some(number) => Json::Number(number),
        None => Json::Null,
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::doc;
    use mongodb::bson::oid::ObjectId;
    use mongodb::bson::DateTime;
    use mongodb::bson::Timestamp;
    use serde_json::json;

    use super::document_to_json;

    #[test]
    fn dates_as_epoch_seconds() {
        let date = DateTime::from_millis(1_500_000_000_250);
        let document = doc! {
            "date": date,
            "members": [{"optimeDate": DateTime::from_millis(1_000)}]
        };
        let json = document_to_json(&document);
        assert_eq!(
            json,
            json!({"date": 1_500_000_000.25, "members": [{"optimeDate": 1.0}]})
        );
        assert!(json["date"].is_f64());
    }

    #[test]
    fn timestamps_as_epoch_seconds() {
        let ts = Timestamp {
            time: 1_600_000_000,
            increment: 3,
        };
        let json = document_to_json(&doc! {"optime": {"ts": ts, "t": 1_i64}});
        assert_eq!(json, json!({"optime": {"ts": 1_600_000_000.0, "t": 1}}));
    }

    #[test]
    fn plain_values() {
        let oid = ObjectId::parse_str("5f1a2b3c4d5e6f7a8b9c0d1e").unwrap();
        let document = doc! {
            "set": "rs0",
            "myState": 1,
            "ok": 1.0,
            "nan": f64::NAN,
            "electionId": oid,
            "votingMembersCount": 3_i64,
            "flag": true,
            "missing": null
        };
        let json = document_to_json(&document);
        assert_eq!(
            json,
            json!({
                "set": "rs0",
                "myState": 1,
                "ok": 1.0,
                "nan": null,
                "electionId": {"$oid": "5f1a2b3c4d5e6f7a8b9c0d1e"},
                "votingMembersCount": 3,
                "flag": true,
                "missing": null,
            })
        );
    }
}
