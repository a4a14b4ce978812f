pub mod answer;
pub mod record;
pub mod record_type;

pub use answer::{DnsAnswer, ResponseCode};
pub use record::{DnsClass, DnsRecord};
pub use record_type::RecordType;
