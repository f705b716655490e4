//! Serde codec helpers bridging store documents to CLI output.
//!
//! Records deserialize from BSON documents exactly as the store returns them
//! (raw `ObjectId`s, BSON datetimes) but serialize for the process boundary:
//! identifiers as 24-character hex strings, timestamps as RFC 3339. Each
//! module below is a serde `with` target pairing those two directions.

/// Identifier fields: BSON `ObjectId` in, hex string out.
pub mod object_id_hex {
    use bson::oid::ObjectId;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(id: &ObjectId, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&id.to_hex())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<ObjectId, D::Error>
    where
        D: Deserializer<'de>,
    {
        ObjectId::deserialize(deserializer)
    }
}

/// Timestamp fields: BSON datetime in, RFC 3339 string out.
pub mod datetime_rfc3339 {
    use bson::serde_helpers::chrono_datetime_as_bson_datetime;
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(when: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&when.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        chrono_datetime_as_bson_datetime::deserialize(deserializer)
    }
}
