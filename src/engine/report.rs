//! 报告分析
//!
//! 外部补全服务失败时对提取出的报告文本做规则分析：报告类型、化验值、异常描述。
//! 同样的输入总是产出逐字节相同的结果。

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{DetectedValue, ReportAnalysis, ReportType};
use crate::reference::clinical_tests::CLINICAL_TEST_PATTERNS;
use crate::reference::{ABNORMALITY_TERMS, REPORT_TYPE_TERMS, contains_any};

const RECOMMENDATIONS: &[&str] = &[
    "**Consult with your healthcare provider**: This automated analysis is not a replacement for professional medical interpretation.",
    "**Review with a specialist**: Have these results reviewed by an appropriate medical specialist.",
    "**Follow-up testing**: Your doctor may recommend additional tests based on these results.",
];

const DISCLAIMER: &str = "This analysis is generated by an automated system with limited capabilities. It may miss important findings or incorrectly identify normal results as abnormal. Always consult with a qualified healthcare professional for accurate interpretation of medical reports.";

/// `<一到两个词> is/was/were/appear(s)/show(s) <异常词>`
static ABNORMALITY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    ABNORMALITY_TERMS
        .iter()
        .map(|term| {
            let pattern = format!(
                r"(?i)\b(\w+(?:[ \t]+\w+)?)[ \t]+(?:is|was|were|appears?|shows?)[ \t]+{}\b",
                regex::escape(term)
            );
            Regex::new(&pattern).expect("abnormality pattern must compile")
        })
        .collect()
});

/// 规则报告分析器
#[derive(Debug, Clone, Default)]
pub struct ReportAnalyzer;

impl ReportAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// 识别报告类型，按词表顺序第一个命中的类型生效
    pub fn classify_report_type(&self, text: &str) -> ReportType {
        let lowered = text.to_lowercase();
        REPORT_TYPE_TERMS
            .iter()
            .find(|(_, terms)| contains_any(&lowered, terms))
            .map(|(report_type, _)| *report_type)
            .unwrap_or(ReportType::Unknown)
    }

    /// 提取化验值，每个项目只保留第一次出现
    pub fn extract_values(&self, text: &str) -> Vec<DetectedValue> {
        CLINICAL_TEST_PATTERNS
            .iter()
            .filter_map(|(test, re)| {
                re.captures(text).map(|caps| DetectedValue {
                    test: test.name.to_string(),
                    value: caps[1].to_string(),
                    unit: test.unit.to_string(),
                    normal_range: test.normal_range.to_string(),
                })
            })
            .collect()
    }

    /// 检测异常描述，小写去重后首字母大写，保持首次出现顺序
    pub fn detect_abnormalities(&self, text: &str) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for re in ABNORMALITY_PATTERNS.iter() {
            for caps in re.captures_iter(text) {
                let phrase = caps[1].trim().to_lowercase();
                if !phrase.is_empty() && !seen.contains(&phrase) {
                    seen.push(phrase);
                }
            }
        }
        seen.iter().map(|p| capitalize(p)).collect()
    }

    /// 完整分析
    pub fn analyze(&self, text: &str, source_name: &str) -> ReportAnalysis {
        ReportAnalysis {
            source_name: source_name.to_string(),
            report_type: self.classify_report_type(text),
            detected_values: self.extract_values(text),
            abnormal_findings: self.detect_abnormalities(text),
            recommendations: RECOMMENDATIONS.iter().map(|r| r.to_string()).collect(),
            disclaimer: DISCLAIMER.to_string(),
        }
    }

    /// 分析并渲染为 Markdown
    pub fn render(&self, text: &str, source_name: &str) -> String {
        self.analyze(text, source_name).to_markdown()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("CBC panel attached", ReportType::BloodTest)]
    #[case("Urinalysis: clear", ReportType::Urinalysis)]
    #[case("Fasting blood sugar 92", ReportType::GlucoseDiabetesTest)]
    #[case("Lipid profile", ReportType::LipidPanel)]
    #[case("Chest X-ray, PA view", ReportType::XRay)]
    #[case("MRI of the knee", ReportType::Mri)]
    #[case("CT scan abdomen", ReportType::CtScan)]
    #[case("Pelvic ultrasound", ReportType::Ultrasound)]
    #[case("12-lead ECG", ReportType::Ecg)]
    #[case("Discharge summary", ReportType::Unknown)]
    fn test_report_type(#[case] text: &str, #[case] expected: ReportType) {
        assert_eq!(ReportAnalyzer::new().classify_report_type(text), expected);
    }

    #[test]
    fn test_blood_terms_take_priority() {
        // glucose and cholesterol appear too, but blood test terms come first
        let text = "Hemoglobin 13\nGlucose 90\nCholesterol 180";
        assert_eq!(
            ReportAnalyzer::new().classify_report_type(text),
            ReportType::BloodTest
        );
    }

    #[test]
    fn test_extract_values_in_table_order() {
        let text = "Glucose: 110 mg/dL\nHemoglobin 11.2 g/dL\nHemoglobin 12.0 g/dL";
        let values = ReportAnalyzer::new().extract_values(text);
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].test, "hemoglobin");
        assert_eq!(values[0].value, "11.2");
        assert_eq!(values[1].test, "glucose");
        assert_eq!(values[1].value, "110");
    }

    #[test]
    fn test_detect_abnormalities_dedup() {
        let text = "The glucose level is high. Glucose level was high again. Urine culture is negative.";
        let findings = ReportAnalyzer::new().detect_abnormalities(text);
        assert_eq!(findings, vec!["Glucose level", "Urine culture"]);
    }

    #[test]
    fn test_abnormality_needs_whole_word() {
        let findings = ReportAnalyzer::new().detect_abnormalities("Result is highlighted in bold");
        assert!(findings.is_empty());
    }

    #[test]
    fn test_render_sections() {
        let md = ReportAnalyzer::new().render("CBC\nHemoglobin 11.2\nHematocrit appears low", "cbc.txt");
        assert!(md.starts_with("## Medical Report Analysis: cbc.txt\n\n**Report Type**: Blood Test\n\n"));
        assert!(md.contains("### Detected Values:\n- **HEMOGLOBIN**: 11.2 g/dL"));
        assert!(md.contains("### Potential Abnormal Findings:\n- Hematocrit\n"));
        assert!(md.contains("3. **Follow-up testing**"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("glucose level"), "Glucose level");
        assert_eq!(capitalize(""), "");
    }
}
