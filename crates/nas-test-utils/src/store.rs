//! [`RecordingStore`] wrapper for asserting store traffic.

use std::sync::Mutex;

use async_trait::async_trait;
use nas_core::{DatasetStore, StoreError, StoreResult};
use nas_props::{WireCreateRequest, WireRecord};

/// A store call as seen by [`RecordingStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(String),
    Get(String),
    Delete(String),
}

impl Call {
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Create(_) | Self::Delete(_))
    }
}

/// Which store operation an injected failure applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Get,
    Delete,
}

/// Wraps a store, logging every call and failing on demand.
///
/// Injected failures are one-shot: the next matching call fails without
/// reaching the inner store, later calls go through.
pub struct RecordingStore<S> {
    inner: S,
    calls: Mutex<Vec<Call>>,
    failures: Mutex<Vec<(Operation, StoreError)>>,
}

impl<S: DatasetStore> RecordingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(Vec::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Every call so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls that would modify the remote side
    pub fn write_count(&self) -> usize {
        self.calls().iter().filter(|c| c.is_write()).count()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Make the next `operation` call fail with `error`
    pub fn fail_next(&self, operation: Operation, error: StoreError) {
        self.failures.lock().unwrap().push((operation, error));
    }

    fn record(&self, call: Call, operation: Operation) -> StoreResult<()> {
        self.calls.lock().unwrap().push(call);

        let mut failures = self.failures.lock().unwrap();
        match failures.iter().position(|(op, _)| *op == operation) {
            Some(index) => Err(failures.remove(index).1),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<S: DatasetStore> DatasetStore for RecordingStore<S> {
    async fn create(&self, request: &WireCreateRequest) -> StoreResult<WireRecord> {
        self.record(Call::Create(request.name.clone()), Operation::Create)?;
        self.inner.create(request).await
    }

    async fn get(&self, id: &str) -> StoreResult<WireRecord> {
        self.record(Call::Get(id.to_string()), Operation::Get)?;
        self.inner.get(id).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.record(Call::Delete(id.to_string()), Operation::Delete)?;
        self.inner.delete(id).await
    }
}
