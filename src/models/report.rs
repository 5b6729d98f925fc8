use serde::{Deserialize, Serialize};
use std::fmt;

/// 报告类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReportType {
    BloodTest,
    Urinalysis,
    GlucoseDiabetesTest,
    LipidPanel,
    XRay,
    Mri,
    CtScan,
    Ultrasound,
    Ecg,
    Unknown,
}

impl ReportType {
    /// 报告中展示的名称
    pub fn label(&self) -> &'static str {
        match self {
            ReportType::BloodTest => "Blood Test",
            ReportType::Urinalysis => "Urinalysis",
            ReportType::GlucoseDiabetesTest => "Glucose/Diabetes Test",
            ReportType::LipidPanel => "Lipid Panel",
            ReportType::XRay => "X-Ray Report",
            ReportType::Mri => "MRI Report",
            ReportType::CtScan => "CT Scan",
            ReportType::Ultrasound => "Ultrasound",
            ReportType::Ecg => "ECG/EKG",
            ReportType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 检出的化验值
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectedValue {
    /// 检验项目名称（小写，与参考表一致）
    pub test: String,
    /// 文本中出现的数值
    pub value: String,
    /// 单位
    pub unit: String,
    /// 正常范围说明
    pub normal_range: String,
}

impl fmt::Display for DetectedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "**{}**: {} {} (Normal range: {})",
            self.test.to_uppercase(),
            self.value,
            self.unit,
            self.normal_range
        )
    }
}

/// 报告分析结果
///
/// 纯派生数据，不做持久化。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportAnalysis {
    /// 展示用文件名
    pub source_name: String,
    pub report_type: ReportType,
    pub detected_values: Vec<DetectedValue>,
    /// 去重后的异常描述，按首次出现顺序
    pub abnormal_findings: Vec<String>,
    pub recommendations: Vec<String>,
    pub disclaimer: String,
}

impl ReportAnalysis {
    /// 渲染为 Markdown 文本
    pub fn to_markdown(&self) -> String {
        let mut out = format!("## Medical Report Analysis: {}\n\n", self.source_name);
        out.push_str(&format!("**Report Type**: {}\n\n", self.report_type));

        if !self.detected_values.is_empty() {
            out.push_str("### Detected Values:\n");
            for value in &self.detected_values {
                out.push_str(&format!("- {}\n", value));
            }
            out.push('\n');
        }

        if !self.abnormal_findings.is_empty() {
            out.push_str("### Potential Abnormal Findings:\n");
            for finding in &self.abnormal_findings {
                out.push_str(&format!("- {}\n", finding));
            }
            out.push('\n');
        }

        out.push_str("### Recommendations:\n");
        for (i, rec) in self.recommendations.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, rec));
        }
        out.push('\n');

        out.push_str("### Disclaimer:\n");
        out.push_str(&self.disclaimer);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReportAnalysis {
        ReportAnalysis {
            source_name: "cbc.txt".into(),
            report_type: ReportType::BloodTest,
            detected_values: vec![],
            abnormal_findings: vec![],
            recommendations: vec!["See a doctor.".into()],
            disclaimer: "Not advice.".into(),
        }
    }

    #[test]
    fn test_detected_value_display() {
        let value = DetectedValue {
            test: "hemoglobin".into(),
            value: "11.2".into(),
            unit: "g/dL".into(),
            normal_range: "12-16 g/dL".into(),
        };
        assert_eq!(
            value.to_string(),
            "**HEMOGLOBIN**: 11.2 g/dL (Normal range: 12-16 g/dL)"
        );
    }

    #[test]
    fn test_markdown_omits_empty_sections() {
        let md = sample().to_markdown();
        assert!(md.starts_with("## Medical Report Analysis: cbc.txt\n\n"));
        assert!(md.contains("**Report Type**: Blood Test"));
        assert!(!md.contains("### Detected Values:"));
        assert!(!md.contains("### Potential Abnormal Findings:"));
        assert!(md.contains("1. See a doctor.\n"));
        assert!(md.ends_with("### Disclaimer:\nNot advice."));
    }

    #[test]
    fn test_markdown_lists_findings() {
        let mut analysis = sample();
        analysis.abnormal_findings = vec!["Glucose level".into()];
        let md = analysis.to_markdown();
        assert!(md.contains("### Potential Abnormal Findings:\n- Glucose level\n\n"));
    }
}
