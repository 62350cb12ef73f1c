use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::constants;

/// Root output document for one converted zone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneConfig {
    pub metadata: Metadata,
    pub spec: Spec,
}

impl ZoneConfig {
    /// Pretty-printed JSON rendering of the zone configuration.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    pub name: String,
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
    pub description: String,
    pub disable: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spec {
    pub primary: Primary,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Primary {
    pub soa_parameters: SoaParameters,
    pub default_rr_set_group: Vec<DnsRecord>,
    pub dnssec_mode: DnssecMode,
}

/// DNSSEC is never enabled by this tool; the provider format still expects
/// an explicit `{"disable": {}}` marker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DnssecMode {
    pub disable: Disabled,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Disabled {}

/// Zone-wide SOA timing parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoaParameters {
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub negative_ttl: u32,
    pub ttl: u32,
}

impl SoaParameters {
    /// Apply the provider policy floors. Runs unconditionally at the end of
    /// every parse, so the output always carries usable SOA timings even
    /// when the zone file had no SOA record at all.
    pub fn apply_floors(&mut self) {
        if self.refresh < 3600 {
            self.refresh = 86400;
        }
        if self.retry < 7200 {
            self.retry = 7200;
        }
        if self.expire < self.refresh.saturating_add(self.retry) {
            self.expire = 3_600_000;
        }
        if self.negative_ttl < 1801 {
            self.negative_ttl = 1801;
        }
        if self.ttl < 300 {
            self.ttl = 300;
        }
    }
}

/// A single entry of the zone's record set group.
///
/// Exactly one of the typed arms is populated per record; the shared `ttl`
/// and optional free-text `description` apply to whichever arm is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DnsRecord {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub ttl: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a_record: Option<ARecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srv_record: Option<SrvRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mx_record: Option<Vec<MxValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txt_record: Option<TxtRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cname_record: Option<CnameRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caa_record: Option<CaaRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ns_record: Option<NsRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aaaa_record: Option<AaaaRecord>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

fn is_zero(v: &u32) -> bool {
    *v == 0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ARecord {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AaaaRecord {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NsRecord {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TxtRecord {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub values: Vec<String>,
}

/// One canonical name mapping. Exactly one target per owner; the parser
/// rejects a second CNAME for an already-seen hostname.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CnameRecord {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub value: String,
}

/// Carried for the provider document shape; the parser never emits CAA.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaaRecord {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub flags: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SrvRecord {
    pub name: String,
    pub values: Vec<SrvValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SrvValue {
    pub priority: u32,
    pub weight: u32,
    pub port: u32,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MxValue {
    pub priority: u32,
    pub value: String,
}

/// Composite merge key for a record: type tag, owner name and a canonical
/// rendering of the values. TXT values are sorted before joining so the key
/// is independent of line order; A records key on the owner alone so that
/// same-owner A records merge into one value list.
pub fn record_key(record: &DnsRecord) -> String {
    let mut key = String::new();

    if let Some(a) = &record.a_record {
        key.push_str("A:");
        key.push_str(&a.name);
    } else if let Some(srv) = &record.srv_record {
        key.push_str("SRV:");
        key.push_str(&srv.name);
        for v in &srv.values {
            let _ = write!(key, ":{}:{}:{}:{}", v.priority, v.weight, v.port, v.target);
        }
    } else if let Some(mx) = &record.mx_record {
        key.push_str("MX:");
        for v in mx {
            let _ = write!(key, ":{}:{}", v.priority, v.value);
        }
    } else if let Some(txt) = &record.txt_record {
        key.push_str("TXT:");
        key.push_str(&txt.name);
        let mut sorted = txt.values.clone();
        sorted.sort();
        key.push(':');
        key.push_str(&sorted.join(";"));
    } else if let Some(cname) = &record.cname_record {
        let _ = write!(key, "CNAME:{}:{}", cname.name, cname.value);
    } else if let Some(caa) = &record.caa_record {
        let _ = write!(key, "CAA:{}:{}:{}:{}", caa.name, caa.flags, caa.tag, caa.value);
    } else if let Some(ns) = &record.ns_record {
        key.push_str("NS:");
        key.push_str(&ns.name);
        for v in &ns.values {
            let _ = write!(key, ":{}", v);
        }
    } else if let Some(aaaa) = &record.aaaa_record {
        key.push_str("AAAA:");
        key.push_str(&aaaa.name);
        for v in &aaaa.values {
            let _ = write!(key, ":{}", v);
        }
    }

    key
}

/// Merge the record list by composite key, keeping first-seen order.
///
/// Records sharing a key are collapsed into one entry; for A records the
/// value lists are unioned instead of dropping the later record. Running
/// this twice over an already-merged list yields the same list.
pub fn dedup_records(records: Vec<DnsRecord>) -> Vec<DnsRecord> {
    let mut merged: Vec<DnsRecord> = Vec::with_capacity(records.len());
    let mut seen: HashMap<String, usize> = HashMap::new();

    for record in records {
        let key = record_key(&record);
        match seen.get(&key) {
            Some(&idx) => {
                // A records with the same owner union their values; every
                // other type keys on its full value set, so a collision
                // means an exact duplicate.
                if let (Some(existing), Some(incoming)) =
                    (merged[idx].a_record.as_mut(), record.a_record.as_ref())
                {
                    for value in &incoming.values {
                        if !existing.values.contains(value) {
                            existing.values.push(value.clone());
                        }
                    }
                }
            }
            None => {
                seen.insert(key, merged.len());
                merged.push(record);
            }
        }
    }

    merged
}

/// Collapse every hostname-less TXT record into a single record capped at
/// `TXT_GROUP_LIMIT` values. Values beyond the cap are dropped and reported.
pub fn consolidate_txt_records(records: Vec<DnsRecord>) -> Vec<DnsRecord> {
    let mut consolidated: Option<DnsRecord> = None;
    let mut final_records = Vec::with_capacity(records.len());

    for record in records {
        let is_anonymous_txt = record
            .txt_record
            .as_ref()
            .is_some_and(|txt| txt.name.is_empty());
        if !is_anonymous_txt {
            final_records.push(record);
            continue;
        }

        match consolidated.as_mut() {
            None => consolidated = Some(record),
            Some(existing) => {
                if let (Some(target), Some(incoming)) =
                    (existing.txt_record.as_mut(), record.txt_record)
                {
                    let room = constants::TXT_GROUP_LIMIT.saturating_sub(target.values.len());
                    if incoming.values.len() > room {
                        let excess = &incoming.values[room..];
                        error!(
                            "exceeded TXT record value limit for records without a hostname, \
                             dropping excess values: {:?}",
                            excess
                        );
                    }
                    target.values.extend(incoming.values.into_iter().take(room));
                }
            }
        }
    }

    if let Some(mut record) = consolidated {
        if let Some(txt) = record.txt_record.as_mut()
            && txt.values.len() > constants::TXT_GROUP_LIMIT
        {
            warn!(
                "truncating hostname-less TXT record from {} to {} values",
                txt.values.len(),
                constants::TXT_GROUP_LIMIT
            );
            txt.values.truncate(constants::TXT_GROUP_LIMIT);
        }
        final_records.push(record);
    }

    final_records
}
