// ==========================================
// 客户数据导入 - CSV 解析器
// ==========================================
// 输出: 按文件顺序的行，每行为原始字段列表（首行表头丢弃）
// 说明: 不校验列数，列数不足由下游必填校验报出
// ==========================================

use crate::importer::customer_importer_trait::FileParser;
use crate::importer::error::{ImportError, ImportResult};
use csv::{ByteRecord, ReaderBuilder};
use std::fs::File;
use std::path::Path;

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_rows(&self, file_path: &Path) -> ImportResult<Vec<Vec<String>>> {
        // 打开 CSV 文件
        let file = File::open(file_path).map_err(|e| {
            ImportError::ReadFileError(format!("{}: {}", file_path.display(), e))
        })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取所有行（非 UTF-8 字节按替换字符处理，不中止导入）
        let mut rows = Vec::new();
        let mut record = ByteRecord::new();
        while reader.read_byte_record(&mut record).map_err(|e| {
            ImportError::ReadFileError(format!("{}: {}", file_path.display(), e))
        })? {
            let row: Vec<String> = record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect();
            rows.push(row);
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_parser_skips_header() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "name,surname,email,age,location,country_code").unwrap();
        writeln!(temp_file, "Ann,Lee,ann@example.com,25,Paris,FR").unwrap();
        writeln!(temp_file, "Bo,Kim,bo@example.com,31,Seoul,KR").unwrap();

        let rows = CsvParser.parse_rows(temp_file.path()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["Ann", "Lee", "ann@example.com", "25", "Paris", "FR"]);
        assert_eq!(rows[1][0], "Bo");
    }

    #[test]
    fn test_csv_parser_quoting() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "name,surname,email,age,location,country_code").unwrap();
        writeln!(
            temp_file,
            "\"Lee, Ann\",\"O\"\"Neil\",ann@example.com,25,\"12 Rue, Paris\",FR"
        )
        .unwrap();

        let rows = CsvParser.parse_rows(temp_file.path()).unwrap();

        assert_eq!(rows[0][0], "Lee, Ann");
        assert_eq!(rows[0][1], "O\"Neil");
        assert_eq!(rows[0][4], "12 Rue, Paris");
    }

    #[test]
    fn test_csv_parser_short_rows_kept() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "name,surname,email,age,location,country_code").unwrap();
        writeln!(temp_file, "Ann,Lee").unwrap();

        let rows = CsvParser.parse_rows(temp_file.path()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], vec!["Ann", "Lee"]);
    }

    #[test]
    fn test_csv_parser_header_only() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "name,surname,email,age,location,country_code").unwrap();

        let rows = CsvParser.parse_rows(temp_file.path()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_rows(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::ReadFileError(_))));
    }
}
