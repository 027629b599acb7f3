use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::{Map, Value};

use crate::config::{DuplicatePolicy, IdField, LogSchema};
use crate::data_structures::{CostMapping, EventId, MetricRecord};
use crate::error::{PipelineError, Result};
use crate::keys;

/// Load one persisted metric log into an insertion-ordered cost mapping.
/// Any malformed record fails the whole load; a partially-loaded mapping
/// would silently corrupt later joins.
pub fn load_cost_mapping(
    path: &Path,
    schema: &LogSchema,
    policy: DuplicatePolicy,
) -> Result<CostMapping> {
    let records = load_records(path, schema)?;
    let file = path.display().to_string();

    let mut mapping = CostMapping::new();
    for record in records {
        let key = keys::join_key(&record.actor, &record.event)?;
        if mapping.contains_key(&key) {
            match policy {
                DuplicatePolicy::Fatal => {
                    return Err(PipelineError::DuplicateKey { key, file });
                }
                DuplicatePolicy::Warn => {
                    log::warn!(
                        "duplicate join key {key:?} in {file}; keeping the first observation"
                    );
                    continue;
                }
            }
        }
        mapping.insert(key, record.gas_used);
    }
    Ok(mapping)
}

/// Parse the full ordered record sequence of one log.
pub fn load_records(path: &Path, schema: &LogSchema) -> Result<Vec<MetricRecord>> {
    let file_name = path.display().to_string();
    let file = File::open(path).map_err(|source| PipelineError::Io {
        file: file_name.clone(),
        source,
    })?;

    let raw: Value =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| PipelineError::SchemaViolation {
            file: file_name.clone(),
            detail: format!("not valid JSON: {e}"),
        })?;
    let entries = raw
        .as_array()
        .ok_or_else(|| PipelineError::SchemaViolation {
            file: file_name.clone(),
            detail: "top-level value is not an array".to_string(),
        })?;

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let record =
            parse_record(entry, schema).map_err(|detail| PipelineError::SchemaViolation {
                file: file_name.clone(),
                detail: format!("record {index}: {detail}"),
            })?;
        records.push(record);
    }
    Ok(records)
}

fn parse_record(entry: &Value, schema: &LogSchema) -> std::result::Result<MetricRecord, String> {
    let fields = entry.as_object().ok_or("not an object")?;

    let gas_used = require_u64(fields, "gas_used")?;
    let actor = require_str(fields, schema.actor_field)?.to_string();
    let event = match schema.id_field {
        IdField::Numeric(field) => EventId::FileId(require_u64(fields, field)?),
        IdField::CompositeRequest(field) => {
            EventId::RequestId(require_str(fields, field)?.to_string())
        }
    };

    Ok(MetricRecord {
        protocol: schema.kind.protocol(),
        operation: schema.kind.operation(),
        origin: schema.kind.origin(),
        actor,
        event,
        gas_used,
    })
}

fn require_u64(fields: &Map<String, Value>, field: &str) -> std::result::Result<u64, String> {
    fields
        .get(field)
        .ok_or_else(|| format!("missing field {field:?}"))?
        .as_u64()
        .ok_or_else(|| format!("field {field:?} is not a non-negative integer"))
}

fn require_str<'a>(
    fields: &'a Map<String, Value>,
    field: &str,
) -> std::result::Result<&'a str, String> {
    fields
        .get(field)
        .ok_or_else(|| format!("missing field {field:?}"))?
        .as_str()
        .ok_or_else(|| format!("field {field:?} is not a string"))
}
