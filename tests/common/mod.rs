//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use fhe_analytics_client::config::{ClientConfig, NetworkConfig, NetworkEnvironment};
use fhe_analytics_client::encryption::{EncryptedInput, EncryptedSwapPayload, EncryptedTransactionPayload};
use fhe_analytics_client::keys::{KeyFetchError, KeySource, NetworkKeys};
use fhe_analytics_client::native::{Envelope, NativeEngine, SwapRequest, TransactionRequest};

#[allow(dead_code)]
pub const ACCOUNT: &str = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e";

#[allow(dead_code)]
pub const CHAIN_ID: u64 = 421_614;

/// Start a programmable key server on an ephemeral port.
///
/// Each connection gets the `(status, body)` produced by `f`.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        // Drain the request head before answering.
                        let mut request = Vec::new();
                        let mut buf = [0u8; 1024];
                        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut buf).await {
                                Ok(0) | Err(_) => return,
                                Ok(n) => request.extend_from_slice(&buf[..n]),
                            }
                        }

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Network whose key endpoint is the given local server.
#[allow(dead_code)]
pub fn local_network(chain_id: u64, addr: SocketAddr) -> NetworkConfig {
    NetworkConfig {
        chain_id,
        cofhe_url: format!("http://{}", addr),
        verifier_url: format!("http://{}", addr),
        threshold_network_url: format!("http://{}", addr),
    }
}

/// Configuration with one preset chain and fast retries.
#[allow(dead_code)]
pub fn test_config() -> ClientConfig {
    let mut config = ClientConfig {
        networks: vec![NetworkEnvironment::ArbitrumSepolia.config()],
        ..Default::default()
    };
    config.retries.max_attempts = 1;
    config.retries.initial_delay_ms = 1;
    config.retries.max_delay_ms = 1;
    config
}

/// What the mock engine answers to encryption calls.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum EngineReply {
    Ciphertexts { proof_len: usize },
    Failure(String),
    Raw(String),
}

/// Counting stand-in for the native engine.
#[derive(Debug)]
pub struct MockEngine {
    pub load_calls: AtomicUsize,
    pub encrypt_calls: AtomicUsize,
    reply: EngineReply,
    load_delay: Duration,
    rejected_loads: usize,
}

#[allow(dead_code)]
impl MockEngine {
    pub fn new() -> Self {
        Self {
            load_calls: AtomicUsize::new(0),
            encrypt_calls: AtomicUsize::new(0),
            reply: EngineReply::Ciphertexts { proof_len: 128 },
            load_delay: Duration::ZERO,
            rejected_loads: 0,
        }
    }

    pub fn replying(mut self, reply: EngineReply) -> Self {
        self.reply = reply;
        self
    }

    /// Answer the first `count` key loads with an error envelope.
    pub fn rejecting_loads(mut self, count: usize) -> Self {
        self.rejected_loads = count;
        self
    }

    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    pub fn loads(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    pub fn encryptions(&self) -> usize {
        self.encrypt_calls.load(Ordering::SeqCst)
    }

    fn ciphertext(&self, zone: u32, proof_len: usize) -> EncryptedInput {
        let n = self.encrypt_calls.load(Ordering::SeqCst);
        EncryptedInput {
            ct_hash: format!("0x{:064x}", n),
            security_zone: zone,
            utype: 5,
            signature: String::new(),
            proof_data: vec![0xab; proof_len],
        }
    }

    fn answer<T: serde::Serialize>(&self, build: impl FnOnce(usize) -> T) -> String {
        self.encrypt_calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            EngineReply::Ciphertexts { proof_len } => Envelope::success(build(*proof_len)).to_json(),
            EngineReply::Failure(message) => Envelope::<()>::error(message.clone()).to_json(),
            EngineReply::Raw(text) => text.clone(),
        }
    }
}

impl NativeEngine for MockEngine {
    fn load_error(&self) -> Option<String> {
        None
    }

    fn load_keys(&self, _chain_id: u64, _public_key_hex: &str, _crs_hex: &str) -> String {
        if !self.load_delay.is_zero() {
            std::thread::sleep(self.load_delay);
        }
        let attempt = self.load_calls.fetch_add(1, Ordering::SeqCst);
        if attempt < self.rejected_loads {
            return Envelope::<()>::error("Invalid public key: bad key").to_json();
        }
        Envelope::success("Keys loaded successfully").to_json()
    }

    fn encrypt_value(&self, _chain_id: u64, _account: &str, _value: u64, security_zone: u32) -> String {
        self.answer(|proof_len| self.ciphertext(security_zone, proof_len))
    }

    fn encrypt_swap(&self, request: &SwapRequest) -> String {
        self.answer(|proof_len| EncryptedSwapPayload {
            encrypted_amount_in: self.ciphertext(request.security_zone, proof_len),
            encrypted_fee: self.ciphertext(request.security_zone, proof_len),
            destination_asset: request.destination_asset.clone(),
            platform: request.platform.clone(),
            timestamp: 1_700_000_000_000,
        })
    }

    fn encrypt_transaction(&self, request: &TransactionRequest) -> String {
        self.answer(|proof_len| EncryptedTransactionPayload {
            encrypted_amount: self.ciphertext(request.security_zone, proof_len),
            encrypted_fee: self.ciphertext(request.security_zone, proof_len),
            transaction_type: request.transaction_type.parse().unwrap(),
            pool_type: request.pool_type.parse().unwrap(),
            platform: request.platform.clone(),
            timestamp: 1_700_000_000_000,
        })
    }
}

/// Counting key source that fails a fixed number of times first.
#[derive(Debug, Clone, Default)]
pub struct MockKeySource {
    pub calls: Arc<AtomicUsize>,
    failures: usize,
    delay: Duration,
}

#[allow(dead_code)]
impl MockKeySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_first(mut self, failures: usize) -> Self {
        self.failures = failures;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn fetches(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl KeySource for MockKeySource {
    fn fetch_keys(
        &self,
        _network: &NetworkConfig,
    ) -> impl Future<Output = Result<NetworkKeys, KeyFetchError>> + Send {
        let attempt = self.calls.fetch_add(1, Ordering::SeqCst);
        let failures = self.failures;
        let delay = self.delay;

        async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if attempt < failures {
                return Err(KeyFetchError::Status(503));
            }
            Ok(NetworkKeys {
                public_key: "0x00ff".into(),
                crs: "0x0102".into(),
            })
        }
    }
}
