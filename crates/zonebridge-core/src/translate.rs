//! Record translation from the control panel's schema to the provider's
//!
//! One source record maps to at most one target record. Unknown record
//! types are dropped (never an error); a supported record with a
//! non-numeric numeric field or a missing value field is rejected as
//! malformed and contributes nothing to the creation batch.

use crate::error::{Error, Result};
use crate::types::{RecordContent, RecordType, SourceRecord, TargetRecord};

/// Translate one source record into the provider's schema
///
/// Returns `Ok(None)` for record types the provider migration does not
/// carry over. Trailing dots on CNAME/NS/MX/SRV targets are
/// FQDN markers in the panel's zone format and are stripped — exactly
/// one, and only at the end. TXT data is carried verbatim.
pub fn translate(record: &SourceRecord) -> Result<Option<TargetRecord>> {
    let (content, priority, proxied) = match record.record_type {
        RecordType::A | RecordType::Aaaa => {
            let address = require(record, "address", &record.address)?;
            (RecordContent::Value(address.to_string()), None, Some(false))
        }
        RecordType::Cname => {
            let cname = require(record, "cname", &record.cname)?;
            (RecordContent::Value(strip_root_dot(cname).to_string()), None, None)
        }
        RecordType::Txt => {
            let txtdata = require(record, "txtdata", &record.txtdata)?;
            (RecordContent::Value(txtdata.to_string()), None, None)
        }
        RecordType::Mx => {
            let exchange = require(record, "exchange", &record.exchange)?;
            let preference = require(record, "preference", &record.preference)?;
            (
                RecordContent::Value(strip_root_dot(exchange).to_string()),
                Some(parse_int(record, "preference", preference)?),
                None,
            )
        }
        RecordType::Ns => {
            let nsdname = require(record, "nsdname", &record.nsdname)?;
            (RecordContent::Value(strip_root_dot(nsdname).to_string()), None, None)
        }
        RecordType::Srv => {
            let priority = require(record, "priority", &record.priority)?;
            let weight = require(record, "weight", &record.weight)?;
            let port = require(record, "port", &record.port)?;
            let target = require(record, "target", &record.target)?;
            (
                RecordContent::Srv {
                    priority: parse_int(record, "priority", priority)?,
                    weight: parse_int(record, "weight", weight)?,
                    port: parse_int(record, "port", port)?,
                    target: strip_root_dot(target).to_string(),
                },
                None,
                None,
            )
        }
        RecordType::Caa => {
            let flags = require(record, "flags", &record.flags)?;
            let tag = require(record, "tag", &record.tag)?;
            let value = require(record, "value", &record.value)?;
            (
                RecordContent::Caa {
                    flags: parse_int(record, "flags", flags)?,
                    tag: tag.to_string(),
                    value: value.to_string(),
                },
                None,
                None,
            )
        }
        RecordType::Unsupported => return Ok(None),
    };

    Ok(Some(TargetRecord {
        record_type: record.record_type,
        name: record.name.clone(),
        content,
        ttl: parse_int(record, "ttl", &record.ttl)?,
        priority,
        proxied,
    }))
}

/// Strip a single trailing dot, if present
fn strip_root_dot(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

fn require<'a>(
    record: &SourceRecord,
    field: &'static str,
    value: &'a Option<String>,
) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| Error::malformed(&record.name, field, "<missing>"))
}

fn parse_int<T: std::str::FromStr>(
    record: &SourceRecord,
    field: &'static str,
    value: &str,
) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::malformed(&record.name, field, value))
}
