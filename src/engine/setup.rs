// ==========================================
// 卷材横切排产系统 - 换型键判定
// ==========================================
// 换型键 = 刨刀类别 + 平衡宽度，两者完全一致才视为同一换型
// ==========================================

use crate::domain::lot::SETUP_UNDEFINED;
use crate::domain::types::PlanerCategory;

pub struct SetupClassifier {
    fine_planer_max_thickness_mm: f64,
}

impl SetupClassifier {
    pub fn new(fine_planer_max_thickness_mm: f64) -> Self {
        Self {
            fine_planer_max_thickness_mm,
        }
    }

    /// 刨刀类别（细刨上限含边界）
    pub fn planer_category(&self, thickness_mm: f64) -> PlanerCategory {
        if thickness_mm <= self.fine_planer_max_thickness_mm {
            PlanerCategory::FinePlaner
        } else {
            PlanerCategory::CoarsePlaner
        }
    }

    /// 判定换型键
    ///
    /// 厚度或宽度缺失 → SETUP_UNDEFINED
    pub fn classify(&self, thickness_mm: Option<f64>, width_mm: Option<u32>) -> String {
        match (thickness_mm, width_mm) {
            (Some(t), Some(w)) => format!("{}_{}mm", self.planer_category(t), w),
            _ => SETUP_UNDEFINED.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fine_planer_boundary_inclusive() {
        let classifier = SetupClassifier::new(4.75);
        assert_eq!(classifier.classify(Some(4.75), Some(1250)), "FINE_PLANER_1250mm");
        assert_eq!(classifier.classify(Some(4.76), Some(1250)), "COARSE_PLANER_1250mm");
        assert_eq!(classifier.classify(Some(0.5), Some(900)), "FINE_PLANER_900mm");
    }

    #[test]
    fn test_missing_dimension_is_undefined() {
        let classifier = SetupClassifier::new(4.75);
        assert_eq!(classifier.classify(None, Some(1250)), SETUP_UNDEFINED);
        assert_eq!(classifier.classify(Some(3.0), None), SETUP_UNDEFINED);
        assert_eq!(classifier.classify(None, None), SETUP_UNDEFINED);
    }

    #[test]
    fn test_configured_cutoff() {
        let classifier = SetupClassifier::new(6.0);
        assert_eq!(classifier.planer_category(5.0), PlanerCategory::FinePlaner);
        assert_eq!(classifier.planer_category(6.01), PlanerCategory::CoarsePlaner);
    }
}
