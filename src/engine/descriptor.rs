// ==========================================
// 卷材横切排产系统 - 产品描述解析器
// ==========================================
// 职责: 从自由文本产品描述中提取 厚度 × 宽度
// 规则: 降级品不解析；首个 `<厚度>X<宽度>` 匹配生效
// 红线: 启发式解析,无匹配返回 None,从不报错
// ==========================================

use regex::Regex;
use std::sync::LazyLock;

/// `<厚度（. 或 , 小数）>` + 可选空白 + `X` + 可选空白 + `<宽度>`
static DIMENSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+[.,]\d+|\d+)\s*X\s*(\d+)").expect("dimension pattern is a valid regex")
});

/// 解析出的尺寸
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub thickness_mm: f64,
    pub width_mm: u32,
}

// ==========================================
// DescriptorParser - 产品描述解析器
// ==========================================
pub struct DescriptorParser {
    reduced_marker: String, // 已转大写
}

impl DescriptorParser {
    pub fn new(reduced_marker: &str) -> Self {
        Self {
            reduced_marker: reduced_marker.to_uppercase(),
        }
    }

    /// 解析产品描述
    ///
    /// # 返回
    /// - Some(Dimensions): 命中尺寸模式且数值转换成功
    /// - None: 描述缺失 / 降级品 / 无匹配 / 数值溢出
    pub fn parse(&self, descriptor: Option<&str>) -> Option<Dimensions> {
        let text = descriptor?;

        if text.to_uppercase().contains(&self.reduced_marker) {
            return None;
        }

        let caps = DIMENSION_PATTERN.captures(text)?;
        let thickness_mm = caps.get(1)?.as_str().replace(',', ".").parse::<f64>().ok()?;
        let width_mm = caps.get(2)?.as_str().parse::<u32>().ok()?;

        Some(Dimensions {
            thickness_mm,
            width_mm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> DescriptorParser {
        DescriptorParser::new("REBAIXAD")
    }

    #[test]
    fn test_parse_comma_decimal() {
        assert_eq!(
            parser().parse(Some("4,75X1250")),
            Some(Dimensions {
                thickness_mm: 4.75,
                width_mm: 1250
            })
        );
    }

    #[test]
    fn test_parse_dot_decimal_with_spaces() {
        assert_eq!(
            parser().parse(Some("5.0 X 1000")),
            Some(Dimensions {
                thickness_mm: 5.0,
                width_mm: 1000
            })
        );
    }

    #[test]
    fn test_parse_integer_thickness_inside_text() {
        let dims = parser().parse(Some("BOBINA LQ 3X1200 SAE1008")).unwrap();
        assert_eq!(dims.thickness_mm, 3.0);
        assert_eq!(dims.width_mm, 1200);
    }

    #[test]
    fn test_first_match_wins() {
        let dims = parser().parse(Some("CHAPA 2,00X1000 / 6,30X1500")).unwrap();
        assert_eq!(dims.thickness_mm, 2.0);
        assert_eq!(dims.width_mm, 1000);
    }

    #[test]
    fn test_reduced_marker_any_case() {
        assert_eq!(parser().parse(Some("BOBINA REBAIXADA 4,75X1250")), None);
        assert_eq!(parser().parse(Some("bobina rebaixado 4,75X1250")), None);
        assert_eq!(parser().parse(Some("Rebaixad 2X900")), None);
    }

    #[test]
    fn test_no_pattern_returns_none() {
        assert_eq!(parser().parse(Some("SUCATA")), None);
        assert_eq!(parser().parse(Some("")), None);
        assert_eq!(parser().parse(None), None);
    }

    #[test]
    fn test_lowercase_x_does_not_match() {
        assert_eq!(parser().parse(Some("4,75x1250")), None);
    }

    #[test]
    fn test_width_overflow_returns_none() {
        assert_eq!(parser().parse(Some("3X99999999999")), None);
    }
}
