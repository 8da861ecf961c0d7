// Sensitivity utilities
// Sensitivity shifts the label thresholds, never the raw probability.

use crate::models::{LabelThresholds, Verdict};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum DetectionSensitivity {
    Low,
    #[default]
    Medium,
    High,
}

impl DetectionSensitivity {
    /// Unknown values fall back to Medium.
    pub fn from_str(val: &str) -> Self {
        match val.trim().to_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Medium,
        }
    }

    pub fn from_option(val: Option<&str>) -> Self {
        val.map(Self::from_str).unwrap_or_default()
    }

    /// (aiMin shift, humanMax shift)
    fn offsets(self) -> (i32, i32) {
        match self {
            Self::Low => (10, 5),
            Self::Medium => (0, 0),
            Self::High => (-10, -5),
        }
    }

    pub fn apply(self, base: LabelThresholds) -> LabelThresholds {
        let (ai_shift, human_shift) = self.offsets();
        let ai_min = (base.ai_min as i32 + ai_shift).clamp(1, 100);
        let human_max = (base.human_max as i32 + human_shift).clamp(0, ai_min - 1);
        LabelThresholds {
            ai_min: ai_min as u8,
            human_max: human_max as u8,
        }
    }
}

pub fn decide_label(ai_score: u8, thresholds: &LabelThresholds) -> Verdict {
    if ai_score >= thresholds.ai_min {
        Verdict::LikelyAi
    } else if ai_score <= thresholds.human_max {
        Verdict::LikelyHuman
    } else {
        Verdict::Uncertain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(DetectionSensitivity::from_str(" HIGH "), DetectionSensitivity::High);
        assert_eq!(DetectionSensitivity::from_str("low"), DetectionSensitivity::Low);
        assert_eq!(DetectionSensitivity::from_str("extreme"), DetectionSensitivity::Medium);
        assert_eq!(DetectionSensitivity::from_option(None), DetectionSensitivity::Medium);
    }

    #[test]
    fn test_apply_shifts_thresholds() {
        let base = LabelThresholds::default();
        assert_eq!(DetectionSensitivity::Medium.apply(base), base);
        assert_eq!(
            DetectionSensitivity::Low.apply(base),
            LabelThresholds { ai_min: 80, human_max: 35 }
        );
        assert_eq!(
            DetectionSensitivity::High.apply(base),
            LabelThresholds { ai_min: 60, human_max: 25 }
        );
    }

    #[test]
    fn test_apply_keeps_order_at_the_edges() {
        let tight = LabelThresholds { ai_min: 8, human_max: 7 };
        let shifted = DetectionSensitivity::High.apply(tight);
        assert_eq!(shifted.ai_min, 1);
        assert_eq!(shifted.human_max, 0);

        let top = LabelThresholds { ai_min: 95, human_max: 94 };
        let shifted = DetectionSensitivity::Low.apply(top);
        assert_eq!(shifted.ai_min, 100);
        assert_eq!(shifted.human_max, 99);
    }

    #[test]
    fn test_decide_label_boundaries() {
        let t = LabelThresholds::default();
        assert_eq!(decide_label(70, &t), Verdict::LikelyAi);
        assert_eq!(decide_label(69, &t), Verdict::Uncertain);
        assert_eq!(decide_label(31, &t), Verdict::Uncertain);
        assert_eq!(decide_label(30, &t), Verdict::LikelyHuman);
    }
}
