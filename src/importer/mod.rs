// ==========================================
// 房地产估价引擎 - 导入层
// ==========================================
// 职责: 外部批量估价数据导入，生成 PropertyParams
// 支持: CSV
// ==========================================

// 模块声明
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod property_importer;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::PropertyFieldMapper;
pub use file_parser::{CsvParser, RawRow};
pub use property_importer::PropertyCsvImporter;
