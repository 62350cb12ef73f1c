use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, trace, warn};

use super::constants;
use super::errors::{Result, ZoneError};
use super::model::{
    ARecord, AaaaRecord, CnameRecord, DnsRecord, MxValue, NsRecord, SoaParameters, SrvRecord,
    SrvValue, TxtRecord, ZoneConfig, consolidate_txt_records, dedup_records,
};
use super::normalize::{
    ensure_fqdn, is_int, is_resolved_fqdn, parse_ttl, sanitize_hostname, sanitize_value,
};

/// Record types the converter handles. Lines carrying any other type are
/// silently skipped.
const RECORD_TYPES: [&str; 7] = ["NS", "MX", "A", "AAAA", "TXT", "CNAME", "SRV"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordType {
    A,
    Aaaa,
    Ns,
    Cname,
    Mx,
    Txt,
    Srv,
}

impl RecordType {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "A" => Some(Self::A),
            "AAAA" => Some(Self::Aaaa),
            "NS" => Some(Self::Ns),
            "CNAME" => Some(Self::Cname),
            "MX" => Some(Self::Mx),
            "TXT" => Some(Self::Txt),
            "SRV" => Some(Self::Srv),
            _ => None,
        }
    }
}

/// Outcome of dispatching one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineOutcome {
    Directive,
    Record,
    Skipped,
}

/// A classified resource-record line.
struct RecordLine {
    hostname: String,
    ttl: u32,
    rtype: RecordType,
    value_start: usize,
}

impl RecordLine {
    /// Apex-owned lines accumulate into the root-level groups.
    fn is_root(&self) -> bool {
        matches!(self.hostname.as_str(), "@" | "" | "IN")
    }
}

/// Accumulated TXT values for one owner, with set-based dedup of exact
/// duplicate values.
#[derive(Default)]
struct TxtGroup {
    values: Vec<String>,
    seen: HashSet<String>,
    description: String,
}

/// Per-file parse state. One instance lives for exactly one file's scan;
/// `$INCLUDE`d files get their own.
struct FileState {
    origin: String,
    include_origin: String,
    records_only: bool,
    default_ttl: u32,
    last_hostname: String,
    last_ttl: u32,
    soa_block: Option<Vec<String>>,
    zone_block: Option<Vec<String>>,
    soa: SoaParameters,
    /// Records produced during the scan itself (MX lines and `$INCLUDE`
    /// results); the grouped accumulators below flush after it at EOF.
    records: Vec<DnsRecord>,
    a_description: String,
    root_a: Vec<String>,
    sub_a: BTreeMap<String, Vec<String>>,
    root_aaaa: Vec<String>,
    sub_aaaa: BTreeMap<String, Vec<String>>,
    root_ns: Vec<String>,
    root_ns_seen: HashSet<String>,
    sub_ns: BTreeMap<String, Vec<String>>,
    sub_ns_seen: HashMap<String, HashSet<String>>,
    srv_groups: BTreeMap<String, Vec<SrvValue>>,
    txt_groups: BTreeMap<String, TxtGroup>,
    cnames: BTreeMap<String, String>,
}

impl FileState {
    fn new(origin: &str, records_only: bool) -> Self {
        Self {
            origin: origin.to_string(),
            include_origin: if records_only {
                origin.to_string()
            } else {
                String::new()
            },
            records_only,
            default_ttl: constants::DEFAULT_TTL,
            // Root by default for records without an explicit hostname.
            last_hostname: "@".to_string(),
            last_ttl: 0,
            soa_block: None,
            zone_block: None,
            soa: SoaParameters::default(),
            records: Vec::new(),
            a_description: String::new(),
            root_a: Vec::new(),
            sub_a: BTreeMap::new(),
            root_aaaa: Vec::new(),
            sub_aaaa: BTreeMap::new(),
            root_ns: Vec::new(),
            root_ns_seen: HashSet::new(),
            sub_ns: BTreeMap::new(),
            sub_ns_seen: HashMap::new(),
            srv_groups: BTreeMap::new(),
            txt_groups: BTreeMap::new(),
            cnames: BTreeMap::new(),
        }
    }
}

/// Result of one file's parse before packaging into a `ZoneConfig`.
struct ParseOutput {
    records: Vec<DnsRecord>,
    soa: SoaParameters,
    origin: String,
}

/// BIND zone file to zone-configuration converter.
///
/// One parser instance carries the context for one conversion run: the root
/// directory for resolving relative `$INCLUDE`/`file` references, the
/// directory where nested `zone {}` declarations write their sibling output
/// files, and the visited-file bookkeeping that rejects reprocessing and
/// include cycles.
pub struct ZoneParser {
    root_dir: PathBuf,
    output_dir: PathBuf,
    processed: HashSet<PathBuf>,
    include_stack: Vec<PathBuf>,
}

impl ZoneParser {
    pub fn new(root_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            output_dir: output_dir.into(),
            processed: HashSet::new(),
            include_stack: Vec::new(),
        }
    }

    /// Convert a zone file into a full `ZoneConfig`.
    ///
    /// An already-processed path is rejected so one conversion run never
    /// emits the same zone twice through nested `zone {}` references.
    pub fn convert_file(
        &mut self,
        path: &Path,
        origin_override: Option<&str>,
    ) -> Result<ZoneConfig> {
        let canonical = canonical_key(path);
        if self.processed.contains(&canonical) {
            warn!("skipping already processed file: {}", path.display());
            return Err(ZoneError::AlreadyProcessed(path.to_path_buf()));
        }
        self.processed.insert(canonical);

        let contents = read_zone_file(path)?;
        self.convert(&contents, origin_override)
    }

    /// Convert zone file contents into a full `ZoneConfig`.
    pub fn convert(&mut self, contents: &str, origin_override: Option<&str>) -> Result<ZoneConfig> {
        let output = self.parse_contents(contents, origin_override.unwrap_or(""), false)?;

        let mut config = ZoneConfig::default();
        config.metadata.name = output.origin;
        config.metadata.description = "Converted from a BIND zone file".to_string();
        config.spec.primary.soa_parameters = output.soa;
        config.spec.primary.default_rr_set_group = output.records;
        Ok(config)
    }

    /// Records-only parse used for `$INCLUDE` processing: returns a flat
    /// record list with every hostname qualified under `include_origin`.
    /// Cyclic include graphs are rejected via the active include stack, and
    /// nesting is bounded explicitly rather than by the call stack.
    fn parse_records_file(
        &mut self,
        path: &Path,
        include_origin: &str,
    ) -> Result<Vec<DnsRecord>> {
        let canonical = canonical_key(path);
        if self.include_stack.contains(&canonical) {
            return Err(ZoneError::IncludeCycle(path.to_path_buf()));
        }
        if self.include_stack.len() >= constants::MAX_INCLUDE_DEPTH {
            return Err(ZoneError::IncludeDepthExceeded(constants::MAX_INCLUDE_DEPTH));
        }

        let contents = read_zone_file(path)?;

        self.include_stack.push(canonical);
        let result = self.parse_contents(&contents, include_origin, true);
        self.include_stack.pop();

        result.map(|output| output.records)
    }

    /// Single pass over the file: every line is classified as a directive,
    /// a resource record, or skipped, then the accumulators are flattened.
    fn parse_contents(
        &mut self,
        contents: &str,
        origin: &str,
        records_only: bool,
    ) -> Result<ParseOutput> {
        let mut state = FileState::new(origin, records_only);

        for line in contents.lines() {
            let outcome = self.dispatch_line(&mut state, line);
            trace!("{:?}: {}", outcome, line);
        }

        self.finalize(state)
    }

    /// Classify and handle one raw input line.
    fn dispatch_line(&mut self, state: &mut FileState, raw: &str) -> LineOutcome {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with(';') {
            return LineOutcome::Skipped;
        }

        // Directives and the SOA block only apply to a file parsed in full;
        // included files contribute records (and nested includes) alone.
        if !state.records_only {
            if let Some(rest) = trimmed.strip_prefix("$ORIGIN") {
                if state.origin.is_empty()
                    && let Some(name) = rest.split_whitespace().next()
                {
                    state.origin = name.to_string();
                    debug!("set origin to {}", state.origin);
                }
                return LineOutcome::Directive;
            }

            if let Some(rest) = trimmed.strip_prefix("$TTL") {
                let token = rest.split_whitespace().next().unwrap_or("");
                state.default_ttl = match parse_ttl(token) {
                    Some(value) if value > 0 => value,
                    _ => {
                        warn!(
                            "unparseable $TTL value {:?}, falling back to {}s",
                            token,
                            constants::DEFAULT_TTL
                        );
                        constants::DEFAULT_TTL
                    }
                };
                debug!("set default TTL to {}", state.default_ttl);
                return LineOutcome::Directive;
            }

            // Multi-line SOA block, opened by the literal SOA token and
            // closed by the line carrying the closing parenthesis.
            if state.soa_block.is_some() || trimmed.contains("SOA") {
                state
                    .soa_block
                    .get_or_insert_with(Vec::new)
                    .push(trimmed.to_string());
                if trimmed.contains(')')
                    && let Some(lines) = state.soa_block.take()
                {
                    state.soa = parse_soa_block(&lines);
                }
                return LineOutcome::Directive;
            }
        }

        // Nested BIND `zone "name" { file "path"; };` declarations point at
        // other zone files that get converted as siblings.
        if state.zone_block.is_none() && trimmed.starts_with("zone \"") {
            state.zone_block = Some(vec![trimmed.to_string()]);
            return LineOutcome::Directive;
        }
        if let Some(block) = state.zone_block.as_mut() {
            block.push(trimmed.to_string());
            if trimmed.ends_with("};")
                && let Some(lines) = state.zone_block.take()
            {
                self.process_zone_block(&lines);
            }
            return LineOutcome::Directive;
        }

        if let Some(rest) = trimmed.strip_prefix("$INCLUDE") {
            self.process_include(state, rest);
            return LineOutcome::Directive;
        }

        match classify_record(state, raw, trimmed) {
            Some(record_line) => {
                self.handle_record(state, &record_line, raw, trimmed);
                LineOutcome::Record
            }
            None => LineOutcome::Skipped,
        }
    }

    fn process_include(&mut self, state: &mut FileState, rest: &str) {
        let fields: Vec<&str> = rest.split_whitespace().collect();
        let Some(file) = fields.first() else {
            warn!("$INCLUDE directive without a file path");
            return;
        };

        // A missing origin argument scopes the include under the current
        // zone origin.
        let include_origin = fields
            .get(1)
            .map(|s| s.to_string())
            .unwrap_or_else(|| state.origin.clone());

        let path = self.resolve_path(file);
        debug!(
            "processing $INCLUDE {} under {}",
            path.display(),
            include_origin
        );

        match self.parse_records_file(&path, &include_origin) {
            Ok(mut included) => state.records.append(&mut included),
            Err(e) => error!("error processing $INCLUDE {}: {}", path.display(), e),
        }
    }

    /// Convert the file referenced by a completed `zone {}` block, writing
    /// its configuration as a sibling `<domain>.json` output file.
    fn process_zone_block(&mut self, lines: &[String]) {
        let mut domain = None;
        let mut file = None;
        for line in lines {
            if line.starts_with("zone") {
                domain = quoted(line);
            } else if line.contains("file") {
                file = quoted(line);
            }
        }

        let (Some(domain), Some(file)) = (domain, file) else {
            error!("zone block without a domain name or file path");
            return;
        };
        let domain = domain.to_string();

        debug!("processing zone {} from {}", domain, file);
        let zone_path = self.resolve_path(file);
        match self.convert_file(&zone_path, Some(&domain)) {
            Ok(config) => {
                let out_path = self.output_dir.join(format!("{domain}.json"));
                if let Err(e) = write_zone_config(&config, &out_path) {
                    error!("error writing zone {}: {}", domain, e);
                }
            }
            Err(e) => error!("error parsing zone file {}: {}", zone_path.display(), e),
        }
    }

    fn resolve_path(&self, file: &str) -> PathBuf {
        let path = Path::new(file);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_dir.join(path)
        }
    }

    fn handle_record(
        &mut self,
        state: &mut FileState,
        line: &RecordLine,
        raw: &str,
        trimmed: &str,
    ) {
        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        match line.rtype {
            RecordType::A => handle_a(state, line, &parts),
            RecordType::Aaaa => handle_aaaa(state, line, &parts),
            RecordType::Ns => handle_ns(state, line, &parts),
            RecordType::Cname => handle_cname(state, line, &parts),
            RecordType::Srv => handle_srv(state, line, &parts, trimmed),
            RecordType::Txt => handle_txt(state, line, &parts, raw),
            RecordType::Mx => handle_mx(state, line, &parts),
        }
    }

    /// Flatten the accumulators into the final record list, apply the
    /// conflict/merge passes, and floor the SOA parameters.
    fn finalize(&mut self, state: FileState) -> Result<ParseOutput> {
        if !state.records_only && state.origin.is_empty() {
            return Err(ZoneError::NoOrigin);
        }

        let mut records = state.records;

        if !state.root_ns.is_empty() {
            records.push(DnsRecord {
                ttl: constants::DELEGATION_TTL,
                ns_record: Some(NsRecord {
                    name: String::new(),
                    values: state.root_ns,
                }),
                ..Default::default()
            });
        }
        for (name, values) in state.sub_ns {
            records.push(DnsRecord {
                ttl: constants::DELEGATION_TTL,
                ns_record: Some(NsRecord { name, values }),
                ..Default::default()
            });
        }

        if !state.root_a.is_empty() {
            records.push(DnsRecord {
                ttl: constants::DELEGATION_TTL,
                a_record: Some(ARecord {
                    name: String::new(),
                    values: state.root_a,
                }),
                description: state.a_description.clone(),
                ..Default::default()
            });
        }
        for (name, values) in state.sub_a {
            records.push(DnsRecord {
                ttl: state.default_ttl,
                a_record: Some(ARecord { name, values }),
                description: state.a_description.clone(),
                ..Default::default()
            });
        }

        if !state.root_aaaa.is_empty() {
            records.push(DnsRecord {
                ttl: state.default_ttl,
                aaaa_record: Some(AaaaRecord {
                    name: String::new(),
                    values: state.root_aaaa,
                }),
                ..Default::default()
            });
        }
        for (name, values) in state.sub_aaaa {
            records.push(DnsRecord {
                ttl: state.default_ttl,
                aaaa_record: Some(AaaaRecord { name, values }),
                ..Default::default()
            });
        }

        for (name, values) in state.srv_groups {
            records.push(DnsRecord {
                ttl: state.default_ttl,
                srv_record: Some(SrvRecord { name, values }),
                ..Default::default()
            });
        }

        for (name, group) in state.txt_groups {
            records.push(DnsRecord {
                ttl: state.default_ttl,
                txt_record: Some(TxtRecord {
                    name,
                    values: group.values,
                }),
                description: group.description,
                ..Default::default()
            });
        }

        for (name, value) in state.cnames {
            records.push(DnsRecord {
                ttl: state.default_ttl,
                cname_record: Some(CnameRecord { name, value }),
                ..Default::default()
            });
        }

        // A name cannot be both A and CNAME; the A record wins.
        let a_names: HashSet<String> = records
            .iter()
            .filter_map(|r| r.a_record.as_ref())
            .map(|a| a.name.clone())
            .collect();
        records.retain(|record| match &record.cname_record {
            Some(cname) if a_names.contains(&cname.name) => {
                warn!(
                    "dropping CNAME record for {} conflicting with an A record",
                    cname.name
                );
                false
            }
            _ => true,
        });

        let records = consolidate_txt_records(dedup_records(records));

        let mut soa = state.soa;
        soa.apply_floors();

        debug!(
            "parsed zone {} with {} records",
            state.origin,
            records.len()
        );

        Ok(ParseOutput {
            records,
            soa,
            origin: state.origin,
        })
    }
}

/// Resolve the owner hostname and TTL for a resource-record line and locate
/// the record-type token. Returns `None` when the line carries none of the
/// handled types.
fn classify_record(state: &mut FileState, raw: &str, trimmed: &str) -> Option<RecordLine> {
    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    let type_idx = parts
        .iter()
        .position(|p| RECORD_TYPES.contains(p))?;
    let rtype = RecordType::from_token(parts[type_idx])?;

    // A line starting with whitespace continues the previous record's owner.
    let starts_with_whitespace = raw.starts_with(' ') || raw.starts_with('\t');

    let mut hostname;
    let mut explicit_ttl: Option<u32> = None;

    if starts_with_whitespace {
        hostname = state.last_hostname.clone();
        if is_int(parts[0]) {
            explicit_ttl = parts[0].parse().ok();
        }
    } else {
        if is_int(parts[0]) {
            // Bare TTL; the owner is inherited.
            hostname = state.last_hostname.clone();
            explicit_ttl = parts[0].parse().ok();
        } else if parts[0] == "IN" {
            // Class token, not a hostname.
            hostname = state.last_hostname.clone();
        } else if type_idx >= 1 {
            hostname = parts[0].to_string();
            if parts.len() > 1 && is_int(parts[1]) {
                explicit_ttl = parts[1].parse().ok();
            }
        } else {
            // The type token leads the line; no owner present.
            hostname = state.last_hostname.clone();
        }
        state.last_hostname = hostname.clone();
    }

    let ttl = match explicit_ttl {
        Some(ttl) if ttl > 0 => ttl,
        _ if state.last_ttl > 0 => state.last_ttl,
        _ => state.default_ttl,
    };
    if !starts_with_whitespace || explicit_ttl.is_some() {
        state.last_ttl = ttl;
    }

    // Included files anchor every owner under the include-scope origin.
    if state.records_only && !state.include_origin.is_empty() {
        hostname = if hostname == "@" || hostname.is_empty() {
            state.include_origin.clone()
        } else {
            format!("{}.{}", hostname, state.include_origin)
        };
    }

    Some(RecordLine {
        hostname,
        ttl,
        rtype,
        value_start: type_idx + 1,
    })
}

fn handle_a(state: &mut FileState, line: &RecordLine, parts: &[&str]) {
    if parts.len() <= line.value_start {
        return;
    }

    // The value may carry an inline `;`-delimited description.
    let tail = parts[line.value_start..].join(" ");
    let mut split = tail.splitn(2, ';');
    let value = split
        .next()
        .unwrap_or("")
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_string();
    if let Some(description) = split.next() {
        state.a_description = description.trim().to_string();
    }
    if value.is_empty() {
        return;
    }

    if line.is_root() {
        state.root_a.push(value);
    } else {
        state
            .sub_a
            .entry(line.hostname.clone())
            .or_default()
            .push(value);
    }
}

fn handle_aaaa(state: &mut FileState, line: &RecordLine, parts: &[&str]) {
    let Some(value) = parts.get(line.value_start) else {
        return;
    };

    if line.is_root() {
        state.root_aaaa.push(value.to_string());
    } else {
        state
            .sub_aaaa
            .entry(line.hostname.clone())
            .or_default()
            .push(value.to_string());
    }
}

fn handle_ns(state: &mut FileState, line: &RecordLine, parts: &[&str]) {
    let Some(value) = parts.get(line.value_start) else {
        return;
    };
    let value = sanitize_value(value).to_string();

    // Identical nameserver values for the same owner are recorded once.
    if line.is_root() {
        if state.root_ns_seen.insert(value.clone()) {
            state.root_ns.push(value);
        }
    } else {
        let seen = state
            .sub_ns_seen
            .entry(line.hostname.clone())
            .or_default();
        if seen.insert(value.clone()) {
            state
                .sub_ns
                .entry(line.hostname.clone())
                .or_default()
                .push(value);
        }
    }
}

fn handle_cname(state: &mut FileState, line: &RecordLine, parts: &[&str]) {
    let Some(raw_value) = parts.get(line.value_start) else {
        return;
    };

    let mut hostname = line.hostname.clone();
    if hostname.is_empty() {
        hostname = parts[0].to_string();
    }
    // The apex cannot own a CNAME; rewrite to the zone origin instead of
    // rejecting the record.
    if hostname == "@" {
        hostname = state.origin.trim_end_matches('.').to_string();
    }
    let hostname = sanitize_hostname(&hostname, &state.origin);

    if hostname.ends_with(constants::RESERVED_SUFFIX)
        || raw_value
            .trim_end_matches('.')
            .ends_with(constants::RESERVED_SUFFIX)
    {
        debug!(
            "skipping CNAME {} -> {} under reserved suffix",
            hostname, raw_value
        );
        return;
    }

    let (value, was_fqdn) = ensure_fqdn(raw_value, &state.origin);
    if !was_fqdn && !is_resolved_fqdn(&value) {
        warn!(
            "skipping CNAME {}: value {:?} could not be resolved to an FQDN",
            hostname, value
        );
        return;
    }

    if state.cnames.contains_key(&hostname) {
        warn!("duplicate CNAME for {}, keeping the first target", hostname);
        return;
    }
    state.cnames.insert(hostname, value);
}

fn handle_srv(state: &mut FileState, line: &RecordLine, parts: &[&str], trimmed: &str) {
    if parts.len() < line.value_start + 4 {
        error!("insufficient fields to parse SRV record: {}", trimmed);
        return;
    }

    let priority = parts[line.value_start].parse::<u32>();
    let weight = parts[line.value_start + 1].parse::<u32>();
    let port = parts[line.value_start + 2].parse::<u32>();
    let (Ok(priority), Ok(weight), Ok(port)) = (priority, weight, port) else {
        error!("error parsing SRV record fields: {}", trimmed);
        return;
    };
    let target = sanitize_value(parts[line.value_start + 3]).to_string();

    state
        .srv_groups
        .entry(line.hostname.clone())
        .or_default()
        .push(SrvValue {
            priority,
            weight,
            port,
            target,
        });
}

fn handle_txt(state: &mut FileState, line: &RecordLine, parts: &[&str], raw: &str) {
    let (value, quotes_end) = extract_quoted(raw);
    if value.is_empty() {
        warn!("skipping TXT record with empty value: {}", raw.trim());
        return;
    }
    if value.len() >= constants::MAX_TXT_VALUE_LEN {
        warn!(
            "skipping TXT record with oversized value ({} bytes)",
            value.len()
        );
        return;
    }

    // Free text after an unquoted `;` following the value is a description.
    let description = raw[quotes_end..]
        .find(';')
        .map(|idx| raw[quotes_end + idx + 1..].trim().to_string())
        .unwrap_or_default();

    // A bare TTL or class token directly before TXT means the line has no
    // explicit owner; those values consolidate later.
    let mut hostname = line.hostname.clone();
    if parts.len() >= 3 && (is_int(parts[0]) || parts[0] == "IN") && parts[1] == "TXT" {
        hostname.clear();
    }

    let group = state.txt_groups.entry(hostname).or_default();
    if group.seen.insert(value.clone()) {
        group.values.push(value);
        if group.description.is_empty() {
            group.description = description;
        }
    }
}

fn handle_mx(state: &mut FileState, line: &RecordLine, parts: &[&str]) {
    if parts.len() <= line.value_start + 1 {
        return;
    }

    let priority = match parts[line.value_start].parse::<u32>() {
        Ok(priority) => priority,
        Err(_) => {
            error!(
                "error parsing MX record priority: {}",
                parts[line.value_start]
            );
            return;
        }
    };

    // One single-entry record per MX line; no cross-line accumulation.
    state.records.push(DnsRecord {
        ttl: line.ttl,
        mx_record: Some(vec![MxValue {
            priority,
            value: parts[line.value_start + 1].to_string(),
        }]),
        ..Default::default()
    });
}

/// Extract the SOA timing parameters from an accumulated SOA block.
///
/// All tokens after the SOA type token are flattened across the block's
/// lines (comments and parentheses stripped); refresh through negative TTL
/// sit at fixed positions 3-6, after mname, rname and serial. The record's
/// own TTL is the second token of the opening line. Values that fail to
/// parse come out as zero and get floored later.
fn parse_soa_block(lines: &[String]) -> SoaParameters {
    let mut tokens: Vec<String> = Vec::new();
    let mut past_type = false;
    for line in lines {
        let uncommented = line.split(';').next().unwrap_or("");
        for token in uncommented.split_whitespace() {
            let token = token.trim_matches(|c| c == '(' || c == ')');
            if token.is_empty() {
                continue;
            }
            if !past_type {
                past_type = token == "SOA";
                continue;
            }
            tokens.push(token.to_string());
        }
    }

    SoaParameters {
        refresh: extract_soa_value(tokens.get(3)),
        retry: extract_soa_value(tokens.get(4)),
        expire: extract_soa_value(tokens.get(5)),
        negative_ttl: extract_soa_value(tokens.get(6)),
        ttl: lines
            .first()
            .and_then(|l| l.split_whitespace().nth(1))
            .and_then(|t| t.parse().ok())
            .unwrap_or(0),
    }
}

/// Strip non-digit characters from both ends of a token and parse what is
/// left, defaulting to zero.
fn extract_soa_value(token: Option<&String>) -> u32 {
    token
        .map(|t| t.trim_matches(|c: char| !c.is_ascii_digit()))
        .and_then(|t| t.parse().ok())
        .unwrap_or(0)
}

/// Collect every double-quoted substring on the line, joined by a single
/// space, along with the byte offset just past the final closing quote.
fn extract_quoted(line: &str) -> (String, usize) {
    let mut values: Vec<&str> = Vec::new();
    let mut end = 0;
    let mut cursor = 0;

    while let Some(open) = line[cursor..].find('"') {
        let start = cursor + open + 1;
        let Some(len) = line[start..].find('"') else {
            break;
        };
        values.push(&line[start..start + len]);
        end = start + len + 1;
        cursor = end;
    }

    (values.join(" "), end)
}

/// Substring between the first pair of double quotes on a line.
fn quoted(line: &str) -> Option<&str> {
    let start = line.find('"')? + 1;
    let len = line[start..].find('"')?;
    Some(&line[start..start + len])
}

fn canonical_key(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn read_zone_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ZoneError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a zone configuration as pretty-printed JSON.
pub fn write_zone_config(config: &ZoneConfig, path: &Path) -> Result<()> {
    let json = config.to_pretty_json()?;
    fs::write(path, json).map_err(|source| ZoneError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })
}
