use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// What the mock server puts in its replies
#[derive(Debug, Clone, Copy)]
pub enum MockReply {
    /// One A record for 93.184.216.34 with this TTL
    Address { ttl: u32 },
    /// Header only, with this rcode
    Rcode(u8),
    /// Correct answer under a different transaction id
    WrongId,
    /// Read the query, never answer
    Silent,
}

/// Minimal UDP DNS server on an ephemeral localhost port.
pub struct MockDnsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(reply: MockReply) -> std::io::Result<Self> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if let Some(response) = Self::build_response(&buf[..len], reply) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn build_response(query: &[u8], reply: MockReply) -> Option<Vec<u8>> {
        if query.len() < 12 {
            return None;
        }

        let (rcode, answer_ttl) = match reply {
            MockReply::Silent => return None,
            MockReply::Address { ttl } => (0u8, Some(ttl)),
            MockReply::WrongId => (0u8, Some(60)),
            MockReply::Rcode(rcode) => (rcode, None),
        };

        let mut response = Vec::with_capacity(512);

        // Transaction ID
        if matches!(reply, MockReply::WrongId) {
            response.push(query[0] ^ 0xff);
            response.push(query[1]);
        } else {
            response.extend_from_slice(&query[0..2]);
        }

        // QR=1, RD=1 / RA=1 plus rcode
        response.push(0x81);
        response.push(0x80 | (rcode & 0x0f));

        // QDCOUNT from the query
        response.extend_from_slice(&query[4..6]);
        // ANCOUNT
        response.extend_from_slice(&[0x00, u8::from(answer_ttl.is_some())]);
        // NSCOUNT, ARCOUNT
        response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

        // Question section, copied as-is
        response.extend_from_slice(&query[12..]);

        if let Some(ttl) = answer_ttl {
            response.extend_from_slice(&[0xc0, 0x0c, 0x00, 0x01, 0x00, 0x01]);
            response.extend_from_slice(&ttl.to_be_bytes());
            response.extend_from_slice(&[0x00, 0x04, 93, 184, 216, 34]);
        }

        Some(response)
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
