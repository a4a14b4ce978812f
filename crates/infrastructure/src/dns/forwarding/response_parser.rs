use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::Message;
use tierdns_domain::{DnsAnswer, DnsRecord, DomainError, ResponseCode};
use tracing::debug;

/// Decoded upstream response
#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub truncated: bool,
    pub answer: DnsAnswer,
}

pub struct ResponseParser;

impl ResponseParser {
    /// Decode a wire response into domain records.
    ///
    /// Answer records of types the cache does not model are skipped. A
    /// non-NOERROR rcode is kept on the answer, not turned into an error.
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = ResponseCode::from_u16(u16::from(message.response_code()));

        let mut records = Vec::with_capacity(message.answers().len());
        for record in message.answers() {
            let Some(record_type) = RecordTypeMapper::from_hickory(record.record_type()) else {
                debug!(record_type = ?record.record_type(), "Skipping unsupported answer record");
                continue;
            };

            records.push(DnsRecord::new(
                record.name().to_utf8(),
                record_type,
                record.data().to_string(),
                i64::from(record.ttl()),
            ));
        }

        debug!(
            rcode = %rcode,
            answers = records.len(),
            truncated = message.truncated(),
            "DNS response parsed"
        );

        Ok(DnsResponse {
            truncated: message.truncated(),
            answer: DnsAnswer { records, rcode },
        })
    }

    /// Transaction id straight from the wire header
    pub fn response_id(response_bytes: &[u8]) -> Option<u16> {
        match response_bytes {
            [hi, lo, ..] => Some(u16::from_be_bytes([*hi, *lo])),
            _ => None,
        }
    }
}
