// ==========================================
// 房地产估价引擎 - 字段映射器
// ==========================================
// 职责: 原始行 → PropertyParams（列名别名 + 类型转换 + 缺省值）
// 红线: 只做格式转换，取值范围由 api::ParamsValidator 负责
// ==========================================

use crate::domain::property::default_valuation_method;
use crate::domain::PropertyParams;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRow;

// ===== 可选字段缺省值 =====
pub const DEFAULT_DECORATION_LEVEL: &str = "中等";
pub const DEFAULT_ORIENTATION: &str = "南北";
pub const DEFAULT_LOT_RATIO: f64 = 2.5;
pub const DEFAULT_GREEN_RATIO: f64 = 30.0;

/// 周边配套分隔符
const FACILITY_SEPARATORS: [char; 3] = ['|', '、', ';'];

#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyFieldMapper;

impl PropertyFieldMapper {
    pub fn map_row(&self, row: &RawRow) -> ImportResult<PropertyParams> {
        let n = row.row_number;

        Ok(PropertyParams {
            area: self.require_f64(row, "area", n)?,
            location: self.require_string(row, "location", n)?,
            building_type: self.require_string(row, "buildingType", n)?,
            decoration_level: self
                .get_string(row, "decorationLevel")
                .unwrap_or_else(|| DEFAULT_DECORATION_LEVEL.to_string()),
            orientation: self
                .get_string(row, "orientation")
                .unwrap_or_else(|| DEFAULT_ORIENTATION.to_string()),
            construction_year: self.require_i32(row, "constructionYear", n)?,
            floor: self.require_i32(row, "floor", n)?,
            total_floors: self.require_i32(row, "totalFloors", n)?,
            lot_ratio: self.parse_f64(row, "lotRatio", n)?.unwrap_or(DEFAULT_LOT_RATIO),
            green_ratio: self
                .parse_f64(row, "greenRatio", n)?
                .unwrap_or(DEFAULT_GREEN_RATIO),
            nearby_facilities: self
                .get_string(row, "nearbyFacilities")
                .map(|v| split_facilities(&v))
                .unwrap_or_default(),
            valuation_method: self
                .get_string(row, "valuationMethod")
                .unwrap_or_else(default_valuation_method),
        })
    }

    /// 提取字符串字段（空串视为缺失），支持中文列名别名
    fn get_string(&self, row: &RawRow, key: &str) -> Option<String> {
        let aliases: &[&str] = match key {
            "area" => &["area", "面积", "建筑面积"],
            "location" => &["location", "区域", "所在区域"],
            "buildingType" => &["buildingType", "建筑类型", "物业类型"],
            "decorationLevel" => &["decorationLevel", "装修等级", "装修"],
            "orientation" => &["orientation", "朝向"],
            "constructionYear" => &["constructionYear", "建成年份", "建成年代"],
            "floor" => &["floor", "所在楼层", "楼层"],
            "totalFloors" => &["totalFloors", "总楼层"],
            "lotRatio" => &["lotRatio", "容积率"],
            "greenRatio" => &["greenRatio", "绿化率"],
            "nearbyFacilities" => &["nearbyFacilities", "周边配套"],
            "valuationMethod" => &["valuationMethod", "估价方法"],
            _ => &[],
        };

        aliases.iter().find_map(|alias| {
            row.fields
                .get(*alias)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        })
    }

    fn require_string(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<String> {
        self.get_string(row, key).ok_or_else(|| ImportError::MissingField {
            row: row_number,
            field: key.to_string(),
        })
    }

    fn parse_f64(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<Option<f64>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => value
                .trim_end_matches('%')
                .parse::<f64>()
                .map(Some)
                .map_err(|_| ImportError::TypeConversionError {
                    row: row_number,
                    field: key.to_string(),
                    message: format!("无法解析为浮点数: {}", value),
                }),
        }
    }

    fn require_f64(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<f64> {
        self.parse_f64(row, key, row_number)?
            .ok_or_else(|| ImportError::MissingField {
                row: row_number,
                field: key.to_string(),
            })
    }

    fn require_i32(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<i32> {
        let value = self.require_string(row, key, row_number)?;
        value
            .parse::<i32>()
            .map_err(|_| ImportError::TypeConversionError {
                row: row_number,
                field: key.to_string(),
                message: format!("无法解析为整数: {}", value),
            })
    }
}

/// 拆分周边配套标签（去空白、去空项）
pub fn split_facilities(raw: &str) -> Vec<String> {
    raw.split(&FACILITY_SEPARATORS[..])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        RawRow {
            row_number: 2,
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            ("area", "100"),
            ("location", "yuelu"),
            ("buildingType", "住宅"),
            ("constructionYear", "2015"),
            ("floor", "5"),
            ("totalFloors", "18"),
        ]
    }

    #[test]
    fn test_field_mapper_required_only_uses_defaults() {
        let params = PropertyFieldMapper.map_row(&row(&required())).unwrap();

        assert_eq!(params.area, 100.0);
        assert_eq!(params.building_type, "住宅");
        assert_eq!(params.decoration_level, DEFAULT_DECORATION_LEVEL);
        assert_eq!(params.orientation, DEFAULT_ORIENTATION);
        assert_eq!(params.lot_ratio, DEFAULT_LOT_RATIO);
        assert_eq!(params.green_ratio, DEFAULT_GREEN_RATIO);
        assert!(params.nearby_facilities.is_empty());
        assert_eq!(params.valuation_method, "市场比较法");
    }

    #[test]
    fn test_field_mapper_chinese_headers() {
        let params = PropertyFieldMapper
            .map_row(&row(&[
                ("建筑面积", "88.8"),
                ("区域", "kaifu"),
                ("建筑类型", "办公"),
                ("建成年份", "2010"),
                ("所在楼层", "3"),
                ("总楼层", "20"),
                ("绿化率", "35%"),
                ("估价方法", "收益法"),
            ]))
            .unwrap();

        assert_eq!(params.area, 88.8);
        assert_eq!(params.location, "kaifu");
        assert_eq!(params.green_ratio, 35.0);
        assert_eq!(params.valuation_method, "收益法");
    }

    #[test]
    fn test_split_facilities_accepts_all_separators() {
        assert_eq!(
            split_facilities("地铁|学校、医院; 商场 ||"),
            vec!["地铁", "学校", "医院", "商场"]
        );
        assert!(split_facilities("  ").is_empty());
    }

    #[test]
    fn test_field_mapper_missing_required_field() {
        let mut pairs = required();
        pairs.retain(|(k, _)| *k != "floor");

        let err = PropertyFieldMapper.map_row(&row(&pairs)).unwrap_err();
        match err {
            ImportError::MissingField { row, field } => {
                assert_eq!(row, 2);
                assert_eq!(field, "floor");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_field_mapper_invalid_number() {
        let mut pairs = required();
        pairs[0] = ("area", "一百");

        let err = PropertyFieldMapper.map_row(&row(&pairs)).unwrap_err();
        assert!(matches!(err, ImportError::TypeConversionError { .. }));
        assert_eq!(err.row(), Some(2));
    }
}
