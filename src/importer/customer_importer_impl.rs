// ==========================================
// 客户数据导入 - 客户导入器实现
// ==========================================
// 职责: 整合导入流程，从 CSV 到数据库与错误报表
// 流程: 读取 → 构造记录 → 地址规范化 → 校验 → 落库/收集 → 汇总 → 报表
// ==========================================

use crate::config::StorageConfig;
use crate::domain::customer::CustomerRecord;
use crate::domain::import::{ImportRunResult, ImportSummary};
use crate::exporter::ReportWriter;
use crate::i18n::{t, t_with_args};
use crate::importer::customer_importer_trait::{CustomerImporter, CustomerValidator, FileParser};
use crate::importer::customer_validator::{error_column, AGE_FIELD};
use crate::importer::error::{ImportError, ImportResult};
use crate::repository::CustomerRepository;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// 错误报表标题（位置固定，文本随语言变化）
pub fn error_report_title() -> Vec<String> {
    [
        "report.title.name",
        "report.title.surname",
        "report.title.email",
        "report.title.age",
        "report.title.location",
        "report.title.country_code",
        "report.title.errors",
    ]
    .iter()
    .map(|key| t(key))
    .collect()
}

/// 汇总输出行（数量为 0 的行省略）
pub fn summary_lines(summary: &ImportSummary) -> Vec<String> {
    [
        ("import.customers_created", summary.created),
        ("import.customers_updated", summary.updated),
        ("import.customers_with_errors", summary.errored),
    ]
    .iter()
    .filter(|(_, count)| *count > 0)
    .map(|(key, count)| {
        let count = count.to_string();
        t_with_args(key, &[("count", count.as_str())])
    })
    .collect()
}

// ==========================================
// CustomerImporterImpl - 客户导入器实现
// ==========================================
pub struct CustomerImporterImpl<R>
where
    R: CustomerRepository,
{
    // 数据访问层
    repo: R,

    // 路径配置
    config: StorageConfig,

    // 导入组件
    file_parser: Box<dyn FileParser>,
    validator: Box<dyn CustomerValidator>,
    report_writer: Box<dyn ReportWriter>,
}

impl<R> CustomerImporterImpl<R>
where
    R: CustomerRepository,
{
    /// 创建新的 CustomerImporter 实例
    ///
    /// # 参数
    /// - repo: 客户仓储（按 email 落库）
    /// - config: 路径配置（CSV 源文件、错误报表目录）
    /// - file_parser: 文件解析器
    /// - validator: 客户记录校验器
    /// - report_writer: 错误报表写出器
    pub fn new(
        repo: R,
        config: StorageConfig,
        file_parser: Box<dyn FileParser>,
        validator: Box<dyn CustomerValidator>,
        report_writer: Box<dyn ReportWriter>,
    ) -> Self {
        Self {
            repo,
            config,
            file_parser,
            validator,
            report_writer,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// 从指定文件导入，错误报表写到指定路径
    #[instrument(skip(self, output), fields(batch_id))]
    pub fn import_file(
        &self,
        file_path: &Path,
        errors_file_path: &Path,
        output: &mut dyn Write,
    ) -> ImportResult<ImportRunResult> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        info!(file_path = %file_path.display(), "开始导入客户数据");

        // === 步骤 1: 读取文件 ===
        debug!("步骤 1: 读取文件");
        let rows = self.file_parser.parse_rows(file_path).map_err(|e| {
            error!(error = %e, "文件读取失败");
            e
        })?;
        info!(total_rows = rows.len(), "文件读取完成");

        // === 步骤 2: 逐行处理 ===
        debug!("步骤 2: 逐行校验与落库");
        let mut summary = ImportSummary {
            total_rows: rows.len(),
            ..Default::default()
        };
        let mut invalid_records = Vec::new();

        for (idx, row) in rows.iter().enumerate() {
            let record = CustomerRecord::from_csv_row(row);
            if let Some(invalid) = self.process_record(idx + 1, record, &mut summary)? {
                invalid_records.push(invalid);
            }
        }
        info!(
            created = summary.created,
            updated = summary.updated,
            errored = summary.errored,
            "逐行处理完成"
        );

        // === 步骤 3: 输出汇总 ===
        self.write_summary(&summary, output)?;

        // === 步骤 4: 错误报表 ===
        let report_path = if invalid_records.is_empty() {
            None
        } else {
            debug!("步骤 4: 写出错误报表");
            self.export_errors(&invalid_records, errors_file_path)
                .map_err(|e| {
                    error!(error = %e, "错误报表写出失败");
                    e
                })?;
            Some(errors_file_path.to_path_buf())
        };

        let elapsed_time = start_time.elapsed();
        info!(
            batch_id = %batch_id,
            total = summary.total_rows,
            created = summary.created,
            updated = summary.updated,
            errored = summary.errored,
            elapsed_ms = elapsed_time.as_millis() as u64,
            "客户数据导入完成"
        );

        Ok(ImportRunResult {
            batch_id,
            summary,
            invalid_records,
            report_path,
            elapsed_time,
        })
    }
}

// 辅助方法
impl<R> CustomerImporterImpl<R>
where
    R: CustomerRepository,
{
    /// 处理单条记录
    ///
    /// # 返回
    /// - Ok(Some(record)): 校验失败，record 已带 error_column
    /// - Ok(None): 已落库
    fn process_record(
        &self,
        row_number: usize,
        mut record: CustomerRecord,
        summary: &mut ImportSummary,
    ) -> ImportResult<Option<CustomerRecord>> {
        if record.normalize_location() {
            debug!(row_number, "地址超长，替换为 Unknown");
        }

        let failed_fields = self.validator.validate(&record);
        let attributes = match (error_column(&failed_fields), record.to_attributes()) {
            (None, Some(attributes)) => attributes,
            (failed, _) => {
                // 校验器放行但 age 无法转换时按 age 错误处理
                let failed = failed.unwrap_or_else(|| AGE_FIELD.to_string());
                warn!(row_number, errors = %failed, "客户校验失败");
                record.error_column = Some(failed);
                summary.record_error();
                return Ok(Some(record));
            }
        };

        let outcome = self
            .repo
            .upsert_by_email(&record.email, &attributes)
            .map_err(|e| {
                error!(row_number, email = %record.email, error = %e, "客户落库失败");
                ImportError::from(e)
            })?;
        summary.record_upsert(outcome.was_created);

        Ok(None)
    }

    fn write_summary(&self, summary: &ImportSummary, output: &mut dyn Write) -> ImportResult<()> {
        for line in summary_lines(summary) {
            writeln!(output, "{}", line).map_err(|e| ImportError::OutputError(e.to_string()))?;
        }
        output
            .flush()
            .map_err(|e| ImportError::OutputError(e.to_string()))
    }

    fn export_errors(
        &self,
        invalid_records: &[CustomerRecord],
        errors_file_path: &Path,
    ) -> ImportResult<()> {
        let title = error_report_title();
        let body: Vec<Vec<String>> = invalid_records
            .iter()
            .map(CustomerRecord::to_report_row)
            .collect();

        self.report_writer
            .write_report(&title, &body, errors_file_path)?;
        Ok(())
    }
}

impl<R> CustomerImporter for CustomerImporterImpl<R>
where
    R: CustomerRepository,
{
    fn import(&self, output: &mut dyn Write) -> ImportResult<ImportRunResult> {
        let errors_file_path = self.config.errors_file_path();
        self.import_file(&self.config.file_path, &errors_file_path, output)
    }
}
