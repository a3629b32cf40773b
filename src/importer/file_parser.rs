// ==========================================
// 房地产估价引擎 - CSV 文件解析器
// ==========================================
// 职责: CSV 文件 → 原始行（表头 → 单元格文本）
// 红线: 不做类型转换，空白行跳过
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 原始数据行
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 文件中的行号（表头为第 1 行）
    pub row_number: usize,
    pub fields: HashMap<String, String>,
}

// ==========================================
// CsvParser
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvParser;

impl CsvParser {
    /// 解析 CSV 文件
    pub fn parse_file(&self, path: &Path) -> ImportResult<Vec<RawRow>> {
        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => {}
            Some(ext) => {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ))
            }
            None => return Err(ImportError::UnsupportedFormat(path.display().to_string())),
        }

        let file = File::open(path)?;
        self.parse_reader(file)
    }

    /// 解析任意 CSV 输入流
    pub fn parse_reader<R: Read>(&self, input: R) -> ImportResult<Vec<RawRow>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(input);

        // 读取表头（去除 UTF-8 BOM）
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            let row_number = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(row_idx + 2);

            let fields: HashMap<String, String> = headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.clone(), value.trim().to_string()))
                .collect();

            // 跳过完全空白的行
            if fields.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(RawRow { row_number, fields });
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_csv_parser_valid_input() {
        let data = "area,location\n100,yuelu\n88.5,furong\n";
        let rows = CsvParser.parse_reader(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row_number, 2);
        assert_eq!(rows[0].fields.get("area"), Some(&"100".to_string()));
        assert_eq!(rows[1].fields.get("location"), Some(&"furong".to_string()));
    }

    #[test]
    fn test_csv_parser_strips_bom_and_whitespace() {
        let data = "\u{feff}area , location\n  100 , yuelu \n";
        let rows = CsvParser.parse_reader(data.as_bytes()).unwrap();

        assert_eq!(rows[0].fields.get("area"), Some(&"100".to_string()));
        assert_eq!(rows[0].fields.get("location"), Some(&"yuelu".to_string()));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let data = "area,location\n100,yuelu\n,\n90,kaifu\n";
        let rows = CsvParser.parse_reader(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].row_number, 4);
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_file(Path::new("/nonexistent/properties.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_rejects_other_extensions() {
        let mut file = Builder::new().suffix(".xlsx").tempfile().unwrap();
        writeln!(file, "area").unwrap();

        let result = CsvParser.parse_file(file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
