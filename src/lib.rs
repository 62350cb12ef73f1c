pub mod zone;

pub use zone::{DnsRecord, SoaParameters, ZoneConfig, ZoneError, ZoneParser};
