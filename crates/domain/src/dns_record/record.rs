use super::RecordType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// DNS class of a resource record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DnsClass {
    #[default]
    IN,
    CH,
    HS,
    Other(u16),
}

impl DnsClass {
    pub fn from_u16(value: u16) -> Self {
        match value {
            1 => DnsClass::IN,
            3 => DnsClass::CH,
            4 => DnsClass::HS,
            other => DnsClass::Other(other),
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            DnsClass::IN => 1,
            DnsClass::CH => 3,
            DnsClass::HS => 4,
            DnsClass::Other(value) => *value,
        }
    }
}

impl fmt::Display for DnsClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DnsClass::IN => write!(f, "IN"),
            DnsClass::CH => write!(f, "CH"),
            DnsClass::HS => write!(f, "HS"),
            DnsClass::Other(value) => write!(f, "CLASS{}", value),
        }
    }
}

/// One resolved DNS answer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Owner name
    pub name: String,
    /// Record type
    pub record_type: RecordType,
    /// Record class
    pub class: DnsClass,
    /// Presentation form of the RDATA (address, target name, text...)
    pub data: String,
    /// Time to live in seconds. Signed: a record served stale carries
    /// a TTL at or below zero.
    pub ttl: i64,
}

impl DnsRecord {
    /// Create a new IN-class DNS record
    pub fn new(name: impl Into<String>, record_type: RecordType, data: impl Into<String>, ttl: i64) -> Self {
        Self {
            name: name.into(),
            record_type,
            class: DnsClass::IN,
            data: data.into(),
            ttl,
        }
    }

    /// Copy of this record with its TTL reduced by `elapsed_secs`
    pub fn decayed(&self, elapsed_secs: i64) -> Self {
        Self {
            ttl: self.ttl - elapsed_secs,
            ..self.clone()
        }
    }
}

impl fmt::Display for DnsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.name, self.ttl, self.class, self.record_type, self.data
        )
    }
}
