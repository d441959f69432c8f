// ==========================================
// 客户数据导入 - 电子表格报表写出
// ==========================================
// 布局: 第 1 行为标题，第 2..N+1 行为数据行
//       每行从 A 列开始，逐格按列名递增
// 单元格文本超过 Excel 上限（32,767 字符）时截断
// ==========================================

use crate::exporter::column::{column_index, next_column};
use crate::exporter::error::{ExportError, ExportResult};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;
use tracing::{debug, info, warn};

/// Excel 单元格字符数上限
pub const MAX_CELL_CHARS: usize = 32_767;

/// 截断到单元格上限（按字符计）
pub fn cell_text(item: &str) -> &str {
    match item.char_indices().nth(MAX_CELL_CHARS) {
        Some((byte_idx, _)) => &item[..byte_idx],
        None => item,
    }
}

// ==========================================
// ReportWriter Trait
// ==========================================
// 实现者: ExcelReportWriter
pub trait ReportWriter: Send + Sync {
    /// 写出报表文件
    ///
    /// # 参数
    /// - title: 标题行
    /// - body: 数据行（按给定顺序）
    /// - file_path: 目标文件
    fn write_report(
        &self,
        title: &[String],
        body: &[Vec<String>],
        file_path: &Path,
    ) -> ExportResult<()>;
}

// ==========================================
// ExcelReportWriter
// ==========================================
pub struct ExcelReportWriter;

impl ExcelReportWriter {
    const START_LINE: u32 = 1;
    const START_COLUMN: &'static str = "A";

    fn form_sheet(
        worksheet: &mut Worksheet,
        title: &[String],
        body: &[Vec<String>],
    ) -> ExportResult<()> {
        let mut active_line = Self::START_LINE;

        Self::fill_table_line(worksheet, active_line, title)?;
        active_line += 1;

        for line in body {
            Self::fill_table_line(worksheet, active_line, line)?;
            active_line += 1;
        }
        Ok(())
    }

    fn fill_table_line(
        worksheet: &mut Worksheet,
        line_number: u32,
        line: &[String],
    ) -> ExportResult<()> {
        let mut column = Self::START_COLUMN.to_string();

        for item in line {
            let cell = format!("{}{}", column, line_number);
            let col_num = column_index(&column)
                .and_then(|idx| u16::try_from(idx).ok())
                .ok_or_else(|| ExportError::InvalidColumn(column.clone()))?;

            let text = cell_text(item);
            if text.len() < item.len() {
                warn!(cell = %cell, chars = item.chars().count(), "单元格文本超长，已截断");
            }

            // rust_xlsxwriter 行号从 0 开始
            worksheet
                .write_string(line_number - 1, col_num, text)
                .map_err(|e| ExportError::CellWriteError {
                    cell,
                    message: e.to_string(),
                })?;

            column =
                next_column(&column).ok_or_else(|| ExportError::InvalidColumn(column.clone()))?;
        }
        Ok(())
    }
}

impl ReportWriter for ExcelReportWriter {
    fn write_report(
        &self,
        title: &[String],
        body: &[Vec<String>],
        file_path: &Path,
    ) -> ExportResult<()> {
        if let Some(dir) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| ExportError::DirectoryError {
                path: dir.display().to_string(),
                message: e.to_string(),
            })?;
        }

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        Self::form_sheet(worksheet, title, body)?;
        debug!(rows = body.len() + 1, "报表内容填充完成");

        workbook.save(file_path)?;
        info!(file_path = %file_path.display(), rows = body.len(), "报表写出完成");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook, Reader, Xlsx};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn read_back(path: &Path) -> Vec<Vec<String>> {
        let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
        let sheet_name = workbook.sheet_names()[0].clone();
        let range = workbook.worksheet_range(&sheet_name).unwrap();
        range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_write_title_and_body() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("errors").join("errors.xls");

        let title = strings(&["Name", "Errors"]);
        let body = vec![strings(&["Ann", "age"]), strings(&["Bo", "name, email"])];

        ExcelReportWriter.write_report(&title, &body, &path).unwrap();

        let rows = read_back(&path);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], title);
        assert_eq!(rows[1], body[0]);
        assert_eq!(rows[2], body[1]);
    }

    #[test]
    fn test_write_wide_rows_past_z() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("wide.xls");

        let title: Vec<String> = (0..30).map(|i| format!("H{}", i)).collect();
        let body = vec![(0..30).map(|i| format!("V{}", i)).collect::<Vec<_>>()];

        ExcelReportWriter.write_report(&title, &body, &path).unwrap();

        let rows = read_back(&path);
        assert_eq!(rows[0].len(), 30);
        assert_eq!(rows[0][26], "H26"); // AA 列
        assert_eq!(rows[1][29], "V29"); // AD 列
    }

    #[test]
    fn test_cell_text_truncates_by_chars() {
        assert_eq!(cell_text("short"), "short");

        let exact = "я".repeat(MAX_CELL_CHARS);
        assert_eq!(cell_text(&exact).chars().count(), MAX_CELL_CHARS);

        let long = "я".repeat(MAX_CELL_CHARS + 10);
        let text = cell_text(&long);
        assert_eq!(text.chars().count(), MAX_CELL_CHARS);
        assert!(long.starts_with(text));
    }

    #[test]
    fn test_write_oversized_cell_is_truncated() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("errors.xls");

        let title = strings(&["Name", "Errors"]);
        let body = vec![vec!["N".repeat(40_000), "name".to_string()]];

        ExcelReportWriter.write_report(&title, &body, &path).unwrap();

        let rows = read_back(&path);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], "N".repeat(MAX_CELL_CHARS));
        assert_eq!(rows[1][1], "name");
    }

    #[test]
    fn test_write_to_unwritable_path_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        // 目标父路径是一个普通文件
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let path = blocker.join("errors.xls");

        let result = ExcelReportWriter.write_report(&strings(&["Name"]), &[], &path);
        assert!(result.is_err());
    }
}
