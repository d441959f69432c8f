// ==========================================
// 客户数据导入 - 导出层
// ==========================================
// 职责: 将标题行 + 数据行写出为电子表格文件
// ==========================================

pub mod column;
pub mod error;
pub mod excel_writer;

// 重导出核心类型
pub use column::{column_index, column_name, next_column};
pub use error::{ExportError, ExportResult};
pub use excel_writer::{cell_text, ExcelReportWriter, ReportWriter, MAX_CELL_CHARS};
