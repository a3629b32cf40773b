// ==========================================
// 房地产估价引擎 - 批量估价 CSV 导入器
// ==========================================
// 流程: 文件解析 → 字段映射 → PropertyParams 列表
// 红线: 任一行映射失败则整体失败，错误携带行号
// ==========================================

use crate::domain::PropertyParams;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::PropertyFieldMapper;
use crate::importer::file_parser::{CsvParser, RawRow};
use std::io::Read;
use std::path::Path;
use tracing::instrument;

#[derive(Debug, Clone, Default)]
pub struct PropertyCsvImporter {
    parser: CsvParser,
    mapper: PropertyFieldMapper,
}

impl PropertyCsvImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 CSV 文件读取估价参数
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> ImportResult<Vec<PropertyParams>> {
        let rows = self.parser.parse_file(path.as_ref())?;
        self.map_rows(&rows)
    }

    /// 从任意 CSV 输入流读取估价参数
    pub fn parse_reader<R: Read>(&self, input: R) -> ImportResult<Vec<PropertyParams>> {
        let rows = self.parser.parse_reader(input)?;
        self.map_rows(&rows)
    }

    fn map_rows(&self, rows: &[RawRow]) -> ImportResult<Vec<PropertyParams>> {
        let params = rows
            .iter()
            .map(|row| self.mapper.map_row(row))
            .collect::<ImportResult<Vec<_>>>()?;

        tracing::info!(rows = params.len(), "CSV 导入完成");
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::error::ImportError;

    const HEADER: &str = "area,location,buildingType,decorationLevel,orientation,constructionYear,floor,totalFloors,lotRatio,greenRatio,nearbyFacilities,valuationMethod";

    #[test]
    fn test_parse_reader_maps_every_row() {
        let data = format!(
            "{}\n100,yuelu,住宅,中等,南北,2015,5,18,2.5,35,地铁|学校,\n60,furong,商业,精装,南,2018,1,6,3.0,20,,收益法\n",
            HEADER
        );
        let params = PropertyCsvImporter::new()
            .parse_reader(data.as_bytes())
            .unwrap();

        assert_eq!(params.len(), 2);
        assert_eq!(params[0].nearby_facilities, vec!["地铁", "学校"]);
        assert_eq!(params[0].valuation_method, "市场比较法");
        assert_eq!(params[1].building_type, "商业");
        assert_eq!(params[1].valuation_method, "收益法");
        assert!(params[1].nearby_facilities.is_empty());
    }

    #[test]
    fn test_parse_reader_reports_failing_row() {
        let data = format!(
            "{}\n100,yuelu,住宅,中等,南北,2015,5,18,2.5,35,,\n100,yuelu,住宅,中等,南北,abc,5,18,2.5,35,,\n",
            HEADER
        );
        let err = PropertyCsvImporter::new()
            .parse_reader(data.as_bytes())
            .unwrap_err();

        assert!(matches!(err, ImportError::TypeConversionError { .. }));
        assert_eq!(err.row(), Some(3));
    }
}
