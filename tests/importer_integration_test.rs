// ==========================================
// CustomerImporter 集成测试
// ==========================================
// 测试目标: 验证完整的客户导入流程（CSV → 校验 → 落库 → 报表）
// ==========================================


use customer_import::i18n;
use customer_import::importer::error_report_title;
use customer_import::logging;
use customer_import::{CustomerImporter, CustomerRepository, ImportError};
use test_helpers::{
    create_test_importer, create_test_storage, read_report, write_customers_csv,
    LOCALE_TEST_LOCK,
};

#[test]
fn test_import_fixture_file() {
    logging::init_test();
    let _guard = LOCALE_TEST_LOCK.lock().unwrap();
    i18n::set_locale("en");

    let (_temp_dir, mut config) = create_test_storage().expect("Failed to create storage");
    config.file_path = "tests/fixtures/test_customers.csv".into();
    let importer = create_test_importer(&config).expect("Failed to create importer");

    let mut output = Vec::new();
    let result = importer.import(&mut output).expect("Import should succeed");

    // 验证导入统计
    assert_eq!(result.summary.total_rows, 7);
    assert_eq!(result.summary.created, 2);
    assert_eq!(result.summary.updated, 1);
    assert_eq!(result.summary.errored, 4);
    assert!(result.summary.is_consistent());

    assert_eq!(
        String::from_utf8(output).unwrap(),
        "Customers created: 2\nCustomers updated: 1\nCustomers with validation errors: 4\n"
    );

    // 验证落库数据（同一 email 以最后一行为准）
    let repo = importer.repository();
    assert_eq!(repo.count().unwrap(), 2);
    let ann = repo.find_by_email("ann@example.com").unwrap().unwrap();
    assert_eq!(ann.age, 26);
    assert_eq!(ann.location, "Lyon");
    let bo = repo.find_by_email("bo@example.org").unwrap().unwrap();
    assert_eq!(bo.location, "Seoul, Gangnam");

    // 验证错误报表
    let report_path = result.report_path.expect("Report should be written");
    assert_eq!(report_path, config.errors_file_path());

    let rows = read_report(&report_path).expect("Failed to read report");
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0], error_report_title());
    assert_eq!(rows[1][6], "name, email, age");
    assert_eq!(rows[2][0], "Cleo");
    assert_eq!(rows[2][6], "age");
    assert_eq!(rows[3][6], "email");
    assert_eq!(rows[4][0], "Eve");
    assert_eq!(rows[4][6], "email, age, country_code");
}

#[test]
fn test_import_end_to_end_example() {
    logging::init_test();

    let (_temp_dir, config) = create_test_storage().expect("Failed to create storage");
    write_customers_csv(
        &config,
        &[
            "Ann,Lee,ann@example.com,25,Paris,FR".to_string(),
            format!(",Bo,bad,200,{},FRA", "X".repeat(300)),
        ],
    )
    .expect("Failed to write csv");
    let importer = create_test_importer(&config).expect("Failed to create importer");

    let result = importer.import(&mut Vec::new()).expect("Import should succeed");

    assert_eq!(result.summary.created, 1);
    assert_eq!(result.summary.errored, 1);

    let rows = read_report(&config.errors_file_path()).expect("Failed to read report");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].len(), 7);
    assert_eq!(
        rows[1],
        vec!["", "Bo", "bad", "200", "Unknown", "FRA", "name, email, age"]
    );
}

#[test]
fn test_import_all_valid_writes_no_report() {
    let _guard = LOCALE_TEST_LOCK.lock().unwrap();
    i18n::set_locale("en");

    let (_temp_dir, config) = create_test_storage().expect("Failed to create storage");
    write_customers_csv(
        &config,
        &[
            "Ann,Lee,ann@example.com,25,Paris,FR".to_string(),
            "Bo,Kim,bo@example.org,31,Seoul,KR".to_string(),
        ],
    )
    .expect("Failed to write csv");
    let importer = create_test_importer(&config).expect("Failed to create importer");

    let mut output = Vec::new();
    let result = importer.import(&mut output).expect("Import should succeed");

    assert!(result.report_path.is_none());
    assert!(!config.errors_file_path().exists());
    assert_eq!(String::from_utf8(output).unwrap(), "Customers created: 2\n");
}

#[test]
fn test_reimport_updates_existing_customers() {
    let (_temp_dir, config) = create_test_storage().expect("Failed to create storage");
    write_customers_csv(&config, &["Ann,Lee,ann@example.com,25,Paris,FR".to_string()])
        .expect("Failed to write csv");

    let first = create_test_importer(&config)
        .expect("Failed to create importer")
        .import(&mut Vec::new())
        .expect("First import should succeed");
    assert_eq!(first.summary.created, 1);

    // 新建导入器（重新打开数据库）再次导入
    write_customers_csv(&config, &["Ann,Smith,ann@example.com,30,Rome,IT".to_string()])
        .expect("Failed to write csv");
    let importer = create_test_importer(&config).expect("Failed to create importer");
    let second = importer
        .import(&mut Vec::new())
        .expect("Second import should succeed");

    assert_eq!(second.summary.created, 0);
    assert_eq!(second.summary.updated, 1);

    let ann = importer
        .repository()
        .find_by_email("ann@example.com")
        .unwrap()
        .unwrap();
    assert_eq!(ann.surname, "Smith");
    assert_eq!(ann.country_code, "IT");
    assert_eq!(importer.repository().count().unwrap(), 1);
}

#[test]
fn test_import_missing_file_is_fatal() {
    let (_temp_dir, config) = create_test_storage().expect("Failed to create storage");
    let importer = create_test_importer(&config).expect("Failed to create importer");

    let mut output = Vec::new();
    let result = importer.import(&mut output);

    assert!(matches!(result, Err(ImportError::ReadFileError(_))));
    assert!(output.is_empty());
    assert!(!config.errors_file_path().exists());
}

#[test]
fn test_import_oversized_invalid_field_still_reported() {
    logging::init_test();
    let _guard = LOCALE_TEST_LOCK.lock().unwrap();
    i18n::set_locale("en");

    let (_temp_dir, config) = create_test_storage().expect("Failed to create storage");
    let huge_name = "N".repeat(40_000);
    write_customers_csv(
        &config,
        &[
            "Ann,Lee,ann@example.com,25,Paris,FR".to_string(),
            format!("{},Kim,bo@example.com,30,Seoul,KR", huge_name),
            "Cleo,,cleo@example.com,40,Rome,IT".to_string(),
        ],
    )
    .expect("Failed to write csv");
    let importer = create_test_importer(&config).expect("Failed to create importer");

    let mut output = Vec::new();
    let result = importer.import(&mut output).expect("Import should succeed");

    assert_eq!(result.summary.created, 1);
    assert_eq!(result.summary.errored, 2);
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "Customers created: 1\nCustomers with validation errors: 2\n"
    );

    // 超长字段截断写入，其余失败行不受影响
    let rows = read_report(&config.errors_file_path()).expect("Failed to read report");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][0].chars().count(), 32_767);
    assert_eq!(rows[1][6], "name");
    assert_eq!(rows[2][0], "Cleo");
    assert_eq!(rows[2][6], "surname");

    // 内存中的失败记录保留原值
    assert_eq!(result.invalid_records[0].name, huge_name);
}

#[test]
fn test_import_header_only_file() {
    logging::init_test();

    let (_temp_dir, config) = create_test_storage().expect("Failed to create storage");
    write_customers_csv(&config, &[]).expect("Failed to write csv");
    let importer = create_test_importer(&config).expect("Failed to create importer");

    let mut output = Vec::new();
    let result = importer.import(&mut output).expect("Import should succeed");

    assert_eq!(result.summary.total_rows, 0);
    assert_eq!(result.summary.created, 0);
    assert_eq!(result.summary.updated, 0);
    assert_eq!(result.summary.errored, 0);
    assert!(output.is_empty());
    assert!(result.report_path.is_none());
    assert!(!config.errors_file_path().exists());
    assert_eq!(importer.repository().count().unwrap(), 0);
}
