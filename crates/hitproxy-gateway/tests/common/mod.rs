//! Fake collaborators shared by gateway integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use hitproxy_core::error::{HitProxyError, Result};
use hitproxy_core::protocol::{DownstreamResponse, InboundRequest, ResponseParts};
use hitproxy_gateway::downstream::DownstreamInvoker;
use hitproxy_gateway::proxy::{HitCounter, HitCounterProps, ProxyTimeouts};
use hitproxy_gateway::store::{CounterStore, HitRecord, MemoryCounterStore};

/// Ordered record of external effects across both fakes.
pub type EffectLog = Arc<Mutex<Vec<&'static str>>>;

pub fn effect_log() -> EffectLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Memory store with switchable failures and an optional delay.
pub struct FakeStore {
    inner: MemoryCounterStore,
    log: EffectLog,
    pub fail_increment: AtomicBool,
    pub fail_scan: AtomicBool,
    delay: Option<Duration>,
}

impl FakeStore {
    pub fn new(log: EffectLog) -> Self {
        Self {
            inner: MemoryCounterStore::new(),
            log,
            fail_increment: AtomicBool::new(false),
            fail_scan: AtomicBool::new(false),
            delay: None,
        }
    }

    pub fn slow(log: EffectLog, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(log)
        }
    }

    pub fn count(&self, key: &str) -> u64 {
        self.inner.get(key).unwrap_or(0)
    }
}

#[async_trait]
impl CounterStore for FakeStore {
    fn backend(&self) -> &'static str {
        "fake"
    }

    async fn increment(&self, key: &str, delta: u64) -> Result<u64> {
        self.log.lock().unwrap().push("increment");
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
        if self.fail_increment.load(Ordering::SeqCst) {
            return Err(HitProxyError::CounterUnavailable("throughput exceeded".into()));
        }
        self.inner.increment(key, delta).await
    }

    async fn scan(&self) -> Result<Vec<HitRecord>> {
        if self.fail_scan.load(Ordering::SeqCst) {
            return Err(HitProxyError::Internal("connection refused".into()));
        }
        self.inner.scan().await
    }
}

pub enum Behavior {
    Respond(ResponseParts),
    Fail,
    Sleep(Duration),
}

/// Downstream that counts calls and remembers the last request it saw.
pub struct FakeInvoker {
    behavior: Behavior,
    log: EffectLog,
    calls: AtomicUsize,
    last: Mutex<Option<InboundRequest>>,
}

impl FakeInvoker {
    pub fn new(log: EffectLog, behavior: Behavior) -> Self {
        Self {
            behavior,
            log,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn ok(log: EffectLog) -> Self {
        Self::new(log, Behavior::Respond(text_response(200, "ok")))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<InboundRequest> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl DownstreamInvoker for FakeInvoker {
    async fn invoke(&self, req: &InboundRequest) -> Result<DownstreamResponse> {
        self.log.lock().unwrap().push("invoke");
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(req.clone());

        match &self.behavior {
            Behavior::Respond(parts) => DownstreamResponse::from_parts(parts.clone()),
            Behavior::Fail => Err(HitProxyError::Internal("handler crashed".into())),
            Behavior::Sleep(d) => {
                tokio::time::sleep(*d).await;
                DownstreamResponse::from_parts(text_response(200, "late"))
            }
        }
    }
}

pub fn text_response(status: u16, body: &str) -> ResponseParts {
    ResponseParts {
        status_code: status,
        headers: Some([("Content-Type".to_string(), "text/plain".to_string())].into()),
        multi_value_headers: None,
        body: Some(body.to_string()),
        is_base64_encoded: false,
    }
}

pub fn get(path: &str) -> InboundRequest {
    InboundRequest::from_parts("GET", path, Default::default(), Default::default(), b"")
}

pub fn hit_counter(
    store: Arc<dyn CounterStore>,
    downstream: Arc<dyn DownstreamInvoker>,
    read_capacity: Option<i64>,
) -> Result<HitCounter> {
    HitCounter::new(HitCounterProps {
        downstream,
        store,
        read_capacity,
        timeouts: ProxyTimeouts {
            increment: Duration::from_millis(200),
            invoke: Duration::from_millis(200),
        },
    })
}
