use super::{PlanRecord, RecordStore};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-memory history for tests
#[derive(Clone, Default)]
pub struct MemoryRecordStore {
    inner: Arc<Mutex<Vec<PlanRecord>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn append(&self, record: &PlanRecord) -> Result<()> {
        self.inner.lock().await.push(record.clone());
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<PlanRecord>> {
        Ok(self.inner.lock().await.clone())
    }
}
