use serde_json::Value;

use crate::models::is_sentinel;

pub const MAX_RESULTS: usize = 50;

fn is_sentinel_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => is_sentinel(s),
        _ => false,
    }
}

/// Strip semantically-empty attributes from a record, recursing into
/// nested maps and sequences. Returns None when nothing informative
/// remains.
pub fn filter_record(value: &Value) -> Option<Value> {
    match value {
        Value::Object(map) => {
            let filtered: serde_json::Map<String, Value> = map
                .iter()
                .filter_map(|(key, value)| filter_record(value).map(|value| (key.clone(), value)))
                .collect();
            if filtered.is_empty() {
                None
            } else {
                Some(Value::Object(filtered))
            }
        }
        Value::Array(items) => {
            let filtered: Vec<Value> = items.iter().filter_map(filter_record).collect();
            if filtered.is_empty() {
                None
            } else {
                Some(Value::Array(filtered))
            }
        }
        value if is_sentinel_value(value) => None,
        value => Some(value.clone()),
    }
}

/// Sentinel-filter a result set and cap it at [`MAX_RESULTS`], taken from
/// the front after filtering.
pub fn shape_results(records: &[Value]) -> Vec<Value> {
    records
        .iter()
        .filter_map(filter_record)
        .take(MAX_RESULTS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sentinel_attributes_removed() {
        let record = json!({"country": "unknown", "city": "São Paulo"});
        let filtered = filter_record(&record).unwrap();
        assert_eq!(filtered, json!({"city": "São Paulo"}));
    }

    #[test]
    fn test_informative_attributes_retained() {
        let record = json!({"country": "Brazil"});
        assert_eq!(filter_record(&record), Some(json!({"country": "Brazil"})));
    }

    #[test]
    fn test_empty_record_dropped() {
        let record = json!({"country": "unknown", "name": null, "code": ""});
        assert_eq!(filter_record(&record), None);
    }

    #[test]
    fn test_nested_maps_filtered_recursively() {
        let record = json!({
            "a": {"name": "Guarulhos", "city": "null"},
            "r": {"airline": "none"}
        });
        let filtered = filter_record(&record).unwrap();
        assert_eq!(filtered, json!({"a": {"name": "Guarulhos"}}));
    }

    #[test]
    fn test_numbers_and_booleans_survive() {
        let record = json!({"distance_km": 0.0, "international": false});
        assert_eq!(filter_record(&record), Some(record));
    }

    #[test]
    fn test_results_capped_at_fifty_from_front() {
        let records: Vec<Value> = (0..200).map(|i| json!({"n": i})).collect();
        let shaped = shape_results(&records);
        assert_eq!(shaped.len(), MAX_RESULTS);
        assert_eq!(shaped[0], json!({"n": 0}));
        assert_eq!(shaped[49], json!({"n": 49}));
    }

    #[test]
    fn test_cap_applied_after_filtering() {
        // 60 empty records followed by 60 informative ones: the cap must
        // count only survivors.
        let mut records: Vec<Value> = (0..60).map(|_| json!({"x": "unknown"})).collect();
        records.extend((0..60).map(|i| json!({"n": i})));

        let shaped = shape_results(&records);
        assert_eq!(shaped.len(), MAX_RESULTS);
        assert_eq!(shaped[0], json!({"n": 0}));
    }
}
