use std::fs;

use tempfile::TempDir;

use bifrost::zone::{ZoneError, ZoneParser, write_zone_config};

#[test]
fn test_convert_file_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let zone_path = temp_dir.path().join("example.com.zone");

    let zone_content = r#"
$ORIGIN example.com.
$TTL 3600

@ 3600 IN SOA ns1.example.com. admin.example.com. (
    2024010101 ; serial
    7200       ; refresh
    9000       ; retry
    1209600    ; expire
    3600 )     ; negative ttl

@   IN  NS  ns1.example.com.
@   IN  NS  ns2.example.com.

@   IN  A   192.0.2.1
www IN  A   192.0.2.2

@   IN  MX  10 mail.example.com.
"#;
    fs::write(&zone_path, zone_content).unwrap();

    let mut parser = ZoneParser::new(temp_dir.path(), temp_dir.path());
    let config = parser.convert_file(&zone_path, None).unwrap();

    let out_path = temp_dir.path().join("example.com.json");
    write_zone_config(&config, &out_path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();

    assert_eq!(json["metadata"]["name"], "example.com.");
    assert_eq!(json["metadata"]["disable"], false);
    assert_eq!(json["spec"]["primary"]["dnssec_mode"]["disable"], serde_json::json!({}));

    let soa = &json["spec"]["primary"]["soa_parameters"];
    assert_eq!(soa["refresh"], 7200);
    assert_eq!(soa["retry"], 9000);
    assert_eq!(soa["expire"], 1_209_600);
    assert_eq!(soa["negative_ttl"], 3600);
    assert_eq!(soa["ttl"], 3600);

    let records = json["spec"]["primary"]["default_rr_set_group"]
        .as_array()
        .unwrap();
    // MX line, root NS group, root A, www A.
    assert_eq!(records.len(), 4);

    let ns = records
        .iter()
        .find(|r| r.get("ns_record").is_some())
        .unwrap();
    assert_eq!(ns["ttl"], 86400);
    assert_eq!(
        ns["ns_record"]["values"],
        serde_json::json!(["ns1.example.com", "ns2.example.com"])
    );
    // Apex groups carry no name field at all.
    assert!(ns["ns_record"].get("name").is_none());

    let mx = records
        .iter()
        .find(|r| r.get("mx_record").is_some())
        .unwrap();
    assert_eq!(mx["mx_record"][0]["priority"], 10);
    assert_eq!(mx["mx_record"][0]["value"], "mail.example.com.");
}

#[test]
fn test_include_records_qualified_under_include_origin() {
    let temp_dir = TempDir::new().unwrap();

    let child_path = temp_dir.path().join("child.zone");
    fs::write(
        &child_path,
        "@ IN A 192.0.2.200\nwww IN A 192.0.2.201\n",
    )
    .unwrap();

    let parent_path = temp_dir.path().join("parent.zone");
    fs::write(
        &parent_path,
        "$ORIGIN example.com.\n@ IN A 192.0.2.1\n$INCLUDE child.zone extra.example.com\n",
    )
    .unwrap();

    let mut parser = ZoneParser::new(temp_dir.path(), temp_dir.path());
    let config = parser.convert_file(&parent_path, None).unwrap();
    let records = &config.spec.primary.default_rr_set_group;

    let names: Vec<&str> = records
        .iter()
        .filter_map(|r| r.a_record.as_ref())
        .map(|a| a.name.as_str())
        .collect();

    // The child's apex record lands under the include origin; its www
    // record is qualified beneath it; the parent keeps its own apex.
    assert!(names.contains(&"extra.example.com"));
    assert!(names.contains(&"www.extra.example.com"));
    assert!(names.contains(&""));
}

#[test]
fn test_include_without_origin_uses_zone_origin() {
    let temp_dir = TempDir::new().unwrap();

    fs::write(temp_dir.path().join("hosts.zone"), "ftp IN A 192.0.2.9\n").unwrap();
    let parent_path = temp_dir.path().join("parent.zone");
    fs::write(
        &parent_path,
        "$ORIGIN example.com.\n$INCLUDE hosts.zone\n",
    )
    .unwrap();

    let mut parser = ZoneParser::new(temp_dir.path(), temp_dir.path());
    let config = parser.convert_file(&parent_path, None).unwrap();

    let a = config.spec.primary.default_rr_set_group[0]
        .a_record
        .as_ref()
        .unwrap();
    assert_eq!(a.name, "ftp.example.com.");
}

#[test]
fn test_include_cycle_is_contained() {
    let temp_dir = TempDir::new().unwrap();

    let a_path = temp_dir.path().join("a.zone");
    let b_path = temp_dir.path().join("b.zone");
    fs::write(&a_path, "$ORIGIN example.com.\nx IN A 192.0.2.1\n$INCLUDE b.zone\n").unwrap();
    fs::write(&b_path, "y IN A 192.0.2.2\n$INCLUDE a.zone\n").unwrap();

    // The cyclic include is rejected and logged; the rest of the records
    // still convert.
    let mut parser = ZoneParser::new(temp_dir.path(), temp_dir.path());
    let config = parser.convert_file(&a_path, None).unwrap();

    let names: Vec<&str> = config
        .spec
        .primary
        .default_rr_set_group
        .iter()
        .filter_map(|r| r.a_record.as_ref())
        .map(|a| a.name.as_str())
        .collect();
    assert!(names.contains(&"x"));
}

#[test]
fn test_include_nesting_is_depth_bounded() {
    let temp_dir = TempDir::new().unwrap();

    // A 17-deep acyclic include chain: the cycle check never fires, only
    // the depth bound does. Everything above the bound still converts.
    for i in 1..=16 {
        fs::write(
            temp_dir.path().join(format!("inc{i}.zone")),
            format!("h{i} IN A 192.0.2.{i}\n$INCLUDE inc{}.zone\n", i + 1),
        )
        .unwrap();
    }
    fs::write(temp_dir.path().join("inc17.zone"), "deep IN A 192.0.2.99\n").unwrap();

    let parent_path = temp_dir.path().join("parent.zone");
    fs::write(
        &parent_path,
        "$ORIGIN example.com.\n$INCLUDE inc1.zone\n",
    )
    .unwrap();

    let mut parser = ZoneParser::new(temp_dir.path(), temp_dir.path());
    let config = parser.convert_file(&parent_path, None).unwrap();

    let names: Vec<&str> = config
        .spec
        .primary
        .default_rr_set_group
        .iter()
        .filter_map(|r| r.a_record.as_ref())
        .map(|a| a.name.as_str())
        .collect();
    assert!(names.contains(&"h16.example.com."));
    assert!(!names.iter().any(|n| n.starts_with("deep")));
}

#[test]
fn test_already_processed_file_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let zone_path = temp_dir.path().join("example.com.zone");
    fs::write(&zone_path, "$ORIGIN example.com.\n@ IN A 192.0.2.1\n").unwrap();

    let mut parser = ZoneParser::new(temp_dir.path(), temp_dir.path());
    parser.convert_file(&zone_path, None).unwrap();

    let result = parser.convert_file(&zone_path, None);
    assert!(matches!(result, Err(ZoneError::AlreadyProcessed(_))));
}

#[test]
fn test_zone_block_writes_sibling_output() {
    let temp_dir = TempDir::new().unwrap();

    fs::write(
        temp_dir.path().join("db.sub.example.com"),
        "@ IN A 192.0.2.50\n",
    )
    .unwrap();

    let parent_path = temp_dir.path().join("named.zone");
    fs::write(
        &parent_path,
        r#"$ORIGIN example.com.
@ IN A 192.0.2.1
zone "sub.example.com" {
    type master;
    file "db.sub.example.com";
};
"#,
    )
    .unwrap();

    let mut parser = ZoneParser::new(temp_dir.path(), temp_dir.path());
    let config = parser.convert_file(&parent_path, None).unwrap();
    assert_eq!(config.metadata.name, "example.com.");

    let sibling_path = temp_dir.path().join("sub.example.com.json");
    let sibling: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&sibling_path).unwrap()).unwrap();
    assert_eq!(sibling["metadata"]["name"], "sub.example.com");

    let records = sibling["spec"]["primary"]["default_rr_set_group"]
        .as_array()
        .unwrap();
    assert_eq!(records[0]["a_record"]["values"][0], "192.0.2.50");
}

#[test]
fn test_output_is_deterministic_across_runs() {
    let temp_dir = TempDir::new().unwrap();
    let zone_path = temp_dir.path().join("example.com.zone");

    fs::write(
        &zone_path,
        r#"$ORIGIN example.com.
$TTL 600
zulu IN A 10.0.0.26
alpha IN A 10.0.0.1
mike IN AAAA 2001:db8::1
@ IN NS ns1.example.com.
_sip._tcp IN SRV 10 60 5060 sip.example.com.
spf TXT "v=spf1 -all"
"#,
    )
    .unwrap();

    let render = || {
        let mut parser = ZoneParser::new(temp_dir.path(), temp_dir.path());
        parser
            .convert_file(&zone_path, None)
            .unwrap()
            .to_pretty_json()
            .unwrap()
    };

    assert_eq!(render(), render());
}

#[test]
fn test_missing_input_file_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let mut parser = ZoneParser::new(temp_dir.path(), temp_dir.path());

    let result = parser.convert_file(&temp_dir.path().join("missing.zone"), None);
    assert!(matches!(result, Err(ZoneError::Io { .. })));
}
