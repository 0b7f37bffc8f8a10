// ==========================================
// 库存补货建议系统 - 撤销历史
// ==========================================
// 红线: 最多保留 5 个快照，超出时丢弃最旧的
// 快照不可变，以 Arc 共享
// ==========================================

use crate::domain::item::InventoryTable;
use crate::domain::types::RowId;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::Arc;

/// 撤销历史容量
pub const UNDO_CAPACITY: usize = 5;

/// 删除前的工作表快照
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub table: Arc<InventoryTable>,
    /// 本次删除的行
    pub deleted: Vec<RowId>,
    pub taken_at: DateTime<Utc>,
}

/// 固定容量的快照栈
#[derive(Debug, Clone, Default)]
pub struct UndoHistory {
    entries: VecDeque<Snapshot>,
}

impl UndoHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(UNDO_CAPACITY),
        }
    }

    /// 压入快照，超出容量时返回被淘汰的最旧快照
    pub fn push(&mut self, snapshot: Snapshot) -> Option<Snapshot> {
        self.entries.push_back(snapshot);
        if self.entries.len() > UNDO_CAPACITY {
            let evicted = self.entries.pop_front();
            tracing::debug!("撤销历史已满，淘汰最旧快照");
            evicted
        } else {
            None
        }
    }

    /// 弹出最近的快照
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop_back()
    }

    pub fn peek(&self) -> Option<&Snapshot> {
        self.entries.back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
