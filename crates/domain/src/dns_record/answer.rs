use super::DnsRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Response code reported by the upstream server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResponseCode {
    #[default]
    NoError,
    FormErr,
    ServFail,
    NXDomain,
    NotImp,
    Refused,
    Other(u16),
}

impl ResponseCode {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormErr,
            2 => ResponseCode::ServFail,
            3 => ResponseCode::NXDomain,
            4 => ResponseCode::NotImp,
            5 => ResponseCode::Refused,
            other => ResponseCode::Other(other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::Other(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a successful upstream exchange.
///
/// A non-`NoError` rcode is still a successful exchange: the server
/// answered, it just answered negatively.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DnsAnswer {
    pub records: Vec<DnsRecord>,
    pub rcode: ResponseCode,
}

impl DnsAnswer {
    pub fn new(records: Vec<DnsRecord>) -> Self {
        Self {
            records,
            rcode: ResponseCode::NoError,
        }
    }

    pub fn negative(rcode: ResponseCode) -> Self {
        Self {
            records: Vec::new(),
            rcode,
        }
    }

    /// True when the server reported an error code (NXDOMAIN, SERVFAIL...)
    pub fn is_negative(&self) -> bool {
        self.rcode != ResponseCode::NoError
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
