use mongodb::bson::{Bson, Document};
use serde_json::{Map, Value};

/// Convert a stored document into the JSON shape clients expect.
/// ObjectId values become their 24-char hex string and datetimes become
/// RFC 3339 strings; everything else keeps its natural JSON form.
pub fn document_to_json(doc: &Document) -> Value {
    let mut map = Map::with_capacity(doc.len());
    for (key, value) in doc {
        map.insert(key.clone(), bson_to_json(value));
    }
    Value::Object(map)
}

pub fn bson_to_json(value: &Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or(Value::Null),
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.iter().map(bson_to_json).collect()),
        other => other.clone().into_relaxed_extjson(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use mongodb::bson::{doc, DateTime};

    #[test]
    fn object_id_renders_as_hex_string() {
        let oid = ObjectId::new();
        let json = document_to_json(&doc! { "_id": oid });
        assert_eq!(json["_id"], Value::String(oid.to_hex()));
    }

    #[test]
    fn datetime_renders_as_rfc3339() {
        let dt = DateTime::from_millis(1_700_000_000_000);
        let json = document_to_json(&doc! { "created_at": dt });
        let rendered = json["created_at"].as_str().unwrap();
        assert!(rendered.starts_with("2023-11-14T"), "got {rendered}");
    }

    #[test]
    fn scalars_keep_their_json_form() {
        let json = document_to_json(&doc! {
            "title": "Engine Check",
            "price": "150",
            "rating": 4.5_f64,
            "visits": 12_i64,
            "active": true,
            "notes": Bson::Null,
        });
        assert_eq!(json["title"], "Engine Check");
        assert_eq!(json["price"], "150");
        assert_eq!(json["rating"], 4.5);
        assert_eq!(json["visits"], 12);
        assert_eq!(json["active"], true);
        assert_eq!(json["notes"], Value::Null);
    }

    #[test]
    fn nested_documents_and_arrays_recurse() {
        let inner = ObjectId::new();
        let json = document_to_json(&doc! {
            "facility": [
                { "name": "Instant Car Services", "service_id": inner },
            ],
            "details": { "area": "of course" },
        });
        assert_eq!(json["facility"][0]["service_id"], Value::String(inner.to_hex()));
        assert_eq!(json["details"]["area"], "of course");
    }
}
