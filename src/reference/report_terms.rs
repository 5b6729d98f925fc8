//! 报告类型与异常描述词表

use crate::models::ReportType;

/// 报告类型词表，按优先级排列（血检在前，心电图在后）
pub static REPORT_TYPE_TERMS: &[(ReportType, &[&str])] = &[
    (
        ReportType::BloodTest,
        &["cbc", "complete blood count", "wbc", "rbc", "hemoglobin", "hematocrit"],
    ),
    (ReportType::Urinalysis, &["urine", "urinalysis"]),
    (ReportType::GlucoseDiabetesTest, &["glucose", "hba1c", "blood sugar"]),
    (
        ReportType::LipidPanel,
        &["cholesterol", "hdl", "ldl", "triglycerides", "lipid"],
    ),
    (ReportType::XRay, &["x-ray", "xray", "radiograph"]),
    (ReportType::Mri, &["mri", "magnetic resonance"]),
    (ReportType::CtScan, &["ct scan", "cat scan"]),
    (ReportType::Ultrasound, &["ultrasound", "sonogram", "doppler"]),
    (ReportType::Ecg, &["ecg", "ekg", "electrocardiogram"]),
];

/// 异常描述词，按扫描顺序排列
pub static ABNORMALITY_TERMS: &[&str] = &[
    "abnormal",
    "high",
    "low",
    "elevated",
    "decreased",
    "positive",
    "negative",
    "out of range",
    "reference range",
    "critical",
];
