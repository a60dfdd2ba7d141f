use database::UserRecord;
use std::cmp::Ordering;

/// 两种互不相关的排序
///
/// - `ByPosition`: 存储/查询顺序（position 升序）
/// - `NewestFirst`: 后台展示顺序（createdAt 降序，相同时 position 降序）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOrder {
    ByPosition,
    NewestFirst,
}

impl RecordOrder {
    pub fn compare(&self, a: &UserRecord, b: &UserRecord) -> Ordering {
        match self {
            RecordOrder::ByPosition => a.position.cmp(&b.position),
            RecordOrder::NewestFirst => b
                .created_at
                .cmp(&a.created_at)
                .then_with(|| b.position.cmp(&a.position)),
        }
    }

    /// 稳定排序，不修改记录本身
    pub fn sort(&self, records: &mut [UserRecord]) {
        records.sort_by(|a, b| self.compare(a, b));
    }
}

/// 把查询快照转换成展示顺序
pub fn display_order(mut records: Vec<UserRecord>) -> Vec<UserRecord> {
    RecordOrder::NewestFirst.sort(&mut records);
    records
}
