// ==========================================
// 客户数据导入 - 命令行入口
// ==========================================
// 用法:
//   import-customers
//
// 路径与语言来自环境变量（见 config::env_keys）
// 汇总写 stdout，日志写 stderr
// ==========================================

use anyhow::Context;
use customer_import::config::StorageConfig;
use customer_import::i18n;
use customer_import::logging;
use customer_import::{
    CsvParser, CustomerImporter, CustomerImporterImpl, CustomerRepositoryImpl,
    CustomerValidatorImpl, ExcelReportWriter,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    // 初始化日志系统
    logging::init();

    tracing::info!(version = customer_import::VERSION, "客户数据导入启动");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("{:#}", e);
            tracing::error!(error = %message, "客户数据导入失败");
            eprintln!("{}", i18n::t_with_args("import.failed", &[("error", message.as_str())]));
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = StorageConfig::from_env();
    if !i18n::set_locale(&config.locale) {
        tracing::warn!(locale = %config.locale, "不支持的语言，使用默认语言");
    }
    tracing::info!(
        file_path = %config.file_path.display(),
        errors_dir = %config.errors_dir.display(),
        db_path = %config.db_path.display(),
        "使用存储路径"
    );

    if let Some(dir) = config.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("无法创建数据库目录: {}", dir.display()))?;
    }
    let repo = CustomerRepositoryImpl::new(&config.db_path)
        .with_context(|| format!("无法打开数据库: {}", config.db_path.display()))?;

    let validator =
        CustomerValidatorImpl::with_system_resolver().context("无法初始化邮箱域名检查")?;

    let importer = CustomerImporterImpl::new(
        repo,
        config,
        Box::new(CsvParser),
        Box::new(validator),
        Box::new(ExcelReportWriter),
    );

    let stdout = std::io::stdout();
    let mut output = stdout.lock();
    let result = importer.import(&mut output)?;

    if let Some(path) = &result.report_path {
        tracing::info!(report_path = %path.display(), "错误报表已生成");
    }
    Ok(())
}
