// ==========================================
// 客户数据导入 - 导入结果
// ==========================================
// 用途: 单次导入的计数与无效记录（不落库）
// ==========================================

use crate::domain::customer::CustomerRecord;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ==========================================
// ImportSummary - 导入汇总
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total_rows: usize, // 数据行数（不含表头）
    pub created: usize,    // 新建
    pub updated: usize,    // 更新
    pub errored: usize,    // 校验失败
}

impl ImportSummary {
    /// 记录一次落库结果
    pub fn record_upsert(&mut self, was_created: bool) {
        if was_created {
            self.created += 1;
        } else {
            self.updated += 1;
        }
    }

    pub fn record_error(&mut self) {
        self.errored += 1;
    }

    /// created + updated + errored == total_rows
    pub fn is_consistent(&self) -> bool {
        self.created + self.updated + self.errored == self.total_rows
    }
}

// ==========================================
// ImportRunResult - 导入结果
// ==========================================
// 用途: 导入接口返回值
#[derive(Debug, Clone)]
pub struct ImportRunResult {
    pub batch_id: String,                     // 本次运行 ID（UUID，仅用于日志关联）
    pub summary: ImportSummary,               // 汇总统计
    pub invalid_records: Vec<CustomerRecord>, // 无效记录（按 CSV 顺序）
    pub report_path: Option<PathBuf>,         // 错误报表路径（无错误时为 None）
    pub elapsed_time: Duration,               // 导入耗时
}
