use std::{collections::VecDeque, sync::Arc};

use tokio::sync::RwLock;

use crate::domain::detection::{
    entities::{DetectionHistory, DetectionRecord},
    ports::DetectionHistoryRepository,
};

#[derive(Debug)]
struct HistoryBuffer {
    entries: VecDeque<DetectionRecord>,
    total: usize,
}

/// Bounded in-memory log of recognitions; the oldest record is evicted when full.
#[derive(Debug, Clone)]
pub struct InMemoryDetectionHistory {
    capacity: usize,
    buffer: Arc<RwLock<HistoryBuffer>>,
}

impl InMemoryDetectionHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            buffer: Arc::new(RwLock::new(HistoryBuffer {
                entries: VecDeque::with_capacity(capacity),
                total: 0,
            })),
        }
    }
}

impl DetectionHistoryRepository for InMemoryDetectionHistory {
    async fn record(&self, record: DetectionRecord) {
        let mut buffer = self.buffer.write().await;
        if buffer.entries.len() == self.capacity {
            buffer.entries.pop_front();
        }
        buffer.entries.push_back(record);
        buffer.total += 1;
    }

    async fn recent(&self, limit: usize) -> DetectionHistory {
        let buffer = self.buffer.read().await;
        let skip = buffer.entries.len().saturating_sub(limit);

        DetectionHistory {
            total: buffer.total,
            entries: buffer.entries.iter().skip(skip).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn record(n: usize) -> DetectionRecord {
        DetectionRecord::new(Uuid::new_v4(), format!("uploads/{}.jpg", n), Vec::new())
    }

    #[tokio::test]
    async fn test_recent_returns_latest_in_order() {
        let history = InMemoryDetectionHistory::new(100);
        for n in 0..25 {
            history.record(record(n)).await;
        }

        let recent = history.recent(20).await;

        assert_eq!(recent.total, 25);
        assert_eq!(recent.entries.len(), 20);
        assert_eq!(recent.entries[0].filepath, "uploads/5.jpg");
        assert_eq!(recent.entries[19].filepath, "uploads/24.jpg");
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let history = InMemoryDetectionHistory::new(3);
        for n in 0..5 {
            history.record(record(n)).await;
        }

        let recent = history.recent(20).await;

        assert_eq!(recent.total, 5);
        let paths: Vec<&str> = recent.entries.iter().map(|r| r.filepath.as_str()).collect();
        assert_eq!(paths, ["uploads/2.jpg", "uploads/3.jpg", "uploads/4.jpg"]);
    }

    #[tokio::test]
    async fn test_empty_history() {
        let history = InMemoryDetectionHistory::new(10);
        let recent = history.recent(20).await;
        assert_eq!(recent.total, 0);
        assert!(recent.entries.is_empty());
    }
}
