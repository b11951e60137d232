//! Record migration, one version step at a time.
//!
//! - v1: custom sources only, keyed `{name, watts, duty, qty}`
//! - v2: `{name, watts, duty_hours, quantity}` plus the wall selection

use crate::{PersistError, PersistResult};
use serde_json::{Map, Value};

pub const LATEST_VERSION: u32 = 2;

fn version_of(record: &Value) -> PersistResult<u32> {
    match record.get("version") {
        // Records from before versioning carry no field; they are v1.
        None => Ok(1),
        Some(v) => v
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| PersistError::Migration {
                what: format!("unreadable version field: {v}"),
            }),
    }
}

pub fn migrate_to_latest(mut record: Value) -> PersistResult<Value> {
    let mut version = version_of(&record)?;
    if version > LATEST_VERSION {
        return Err(PersistError::Migration {
            what: format!("record version {version} is newer than supported {LATEST_VERSION}"),
        });
    }
    while version < LATEST_VERSION {
        record = migrate_one_version(record, version)?;
        version = version_of(&record)?;
    }
    Ok(record)
}

fn migrate_one_version(record: Value, version: u32) -> PersistResult<Value> {
    match version {
        1 => migrate_v1_to_v2(record),
        v => Err(PersistError::Migration {
            what: format!("No migration path from version {v}"),
        }),
    }
}

fn rename(map: &mut Map<String, Value>, from: &str, to: &str) {
    if let Some(value) = map.remove(from) {
        map.entry(to.to_string()).or_insert(value);
    }
}

fn migrate_v1_to_v2(record: Value) -> PersistResult<Value> {
    let Value::Object(mut map) = record else {
        return Err(PersistError::Migration {
            what: "v1 record is not an object".to_string(),
        });
    };

    if let Some(Value::Array(sources)) = map.get_mut("custom_sources") {
        for source in sources.iter_mut() {
            if let Value::Object(fields) = source {
                rename(fields, "duty", "duty_hours");
                rename(fields, "qty", "quantity");
            }
        }
    }
    map.entry("wall".to_string()).or_insert(Value::Null);
    map.insert("version".to_string(), Value::from(2));
    Ok(Value::Object(map))
}
