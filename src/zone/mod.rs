pub mod errors;
pub mod model;
pub mod normalize;
pub mod parser;

pub use errors::{Result, ZoneError};
pub use model::{DnsRecord, SoaParameters, ZoneConfig};
pub use parser::{ZoneParser, write_zone_config};

/// Zone constants
pub mod constants {
    /// Default record TTL when neither the line nor $TTL provides one
    pub const DEFAULT_TTL: u32 = 300;

    /// Fixed TTL applied to flattened NS and apex A record groups
    pub const DELEGATION_TTL: u32 = 86400;

    /// TXT values at or above this size are dropped (wire length safety net)
    pub const MAX_TXT_VALUE_LEN: usize = 512;

    /// Maximum values carried by the consolidated hostname-less TXT record
    pub const TXT_GROUP_LIMIT: usize = 100;

    /// Recursion bound for $INCLUDE processing
    pub const MAX_INCLUDE_DEPTH: usize = 16;

    /// CNAME owners and targets under this suffix are never emitted
    pub const RESERVED_SUFFIX: &str = ".arpa";
}
