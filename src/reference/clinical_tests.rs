//! 常见检验项目参考表

use once_cell::sync::Lazy;
use regex::Regex;

/// 检验项目：名称、单位、正常范围
#[derive(Debug, Clone, Copy)]
pub struct ClinicalTest {
    /// 小写名称，也是文本中匹配的关键词
    pub name: &'static str,
    pub unit: &'static str,
    pub normal_range: &'static str,
}

const fn test(name: &'static str, unit: &'static str, normal_range: &'static str) -> ClinicalTest {
    ClinicalTest {
        name,
        unit,
        normal_range,
    }
}

pub static CLINICAL_TESTS: &[ClinicalTest] = &[
    // Blood tests
    test("hemoglobin", "g/dL", "12-16 g/dL (females), 13.5-17.5 g/dL (males)"),
    test("hematocrit", "%", "36-48% (females), 41-50% (males)"),
    test("rbc", "million/μL", "4.2-5.4 million/μL (females), 4.7-6.1 million/μL (males)"),
    test("wbc", "cells/μL", "4,500-11,000 cells/μL"),
    test("platelets", "/μL", "150,000-450,000/μL"),
    // Lipid panel
    test("cholesterol", "mg/dL", "<200 mg/dL"),
    test("ldl", "mg/dL", "<100 mg/dL"),
    test("hdl", "mg/dL", ">40 mg/dL (males), >50 mg/dL (females)"),
    test("triglycerides", "mg/dL", "<150 mg/dL"),
    // Liver function
    test("alt", "U/L", "7-56 U/L"),
    test("ast", "U/L", "5-40 U/L"),
    // Kidney function
    test("creatinine", "mg/dL", "0.6-1.2 mg/dL (males), 0.5-1.1 mg/dL (females)"),
    test("bun", "mg/dL", "7-20 mg/dL"),
    test("egfr", "mL/min", ">60 mL/min"),
    // Glucose
    test("glucose", "mg/dL", "70-99 mg/dL (fasting)"),
    test("hba1c", "%", "< 5.7%"),
    // Thyroid
    test("tsh", "μIU/mL", "0.4-4.0 μIU/mL"),
    test("t4", "μg/dL", "4.5-12 μg/dL"),
    test("t3", "ng/dL", "80-200 ng/dL"),
];

/// 数值：支持千分位（150,000）与小数（11.2）
const NUMBER: &str = r"(\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?)";

impl ClinicalTest {
    /// 检测模式：项目名后、同一行内的第一个数值
    pub fn pattern(&self) -> String {
        format!(r"(?i)\b{}\b[^\d\n]*?{}", regex::escape(self.name), NUMBER)
    }
}

/// 与 `CLINICAL_TESTS` 一一对应的已编译模式
pub static CLINICAL_TEST_PATTERNS: Lazy<Vec<(&'static ClinicalTest, Regex)>> = Lazy::new(|| {
    CLINICAL_TESTS
        .iter()
        .map(|t| {
            let re = Regex::new(&t.pattern()).expect("clinical test pattern must compile");
            (t, re)
        })
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(name: &str, text: &str) -> Option<String> {
        CLINICAL_TEST_PATTERNS
            .iter()
            .find(|(t, _)| t.name == name)
            .and_then(|(_, re)| re.captures(text))
            .map(|c| c[1].to_string())
    }

    #[test]
    fn test_patterns_compile_for_every_entry() {
        assert_eq!(CLINICAL_TEST_PATTERNS.len(), CLINICAL_TESTS.len());
    }

    #[test]
    fn test_value_on_same_line() {
        assert_eq!(capture("hemoglobin", "Hemoglobin: 11.2 g/dL").as_deref(), Some("11.2"));
        assert_eq!(capture("platelets", "Platelets 250,000 /uL").as_deref(), Some("250,000"));
    }

    #[test]
    fn test_value_on_next_line_is_ignored() {
        assert_eq!(capture("glucose", "Glucose\n95"), None);
    }

    #[test]
    fn test_name_must_be_whole_word() {
        assert_eq!(capture("alt", "alternative medicine 5 times"), None);
        assert_eq!(capture("alt", "ALT 33 U/L").as_deref(), Some("33"));
    }
}
