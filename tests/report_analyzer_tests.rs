// Integration tests for the report analyzer and report service
//
// Tests cover:
// - Report type detection and value extraction on realistic report text
// - Idempotence of the rendered analysis
// - Upload handling through the report service

use std::sync::Arc;

use medassist::engine::ReportAnalyzer;
use medassist::extraction::ExtractorRegistry;
use medassist::models::ReportType;
use medassist::services::{ReportService, ReportServiceImpl};
use medassist::upstream::DisabledClient;

const CBC_REPORT: &str = "\
City Hospital Laboratory
Complete Blood Count (CBC)

Hemoglobin 11.2 g/dL
Hematocrit 34 %
WBC 7,400 cells/uL
Platelets 250,000 /uL

Comments: Hemoglobin is low. Hematocrit was low.
";

const LIPID_REPORT: &str = "\
Lipid Panel
Total Cholesterol: 232 mg/dL
LDL 160 mg/dL
HDL 38 mg/dL
Triglycerides 190 mg/dL
LDL cholesterol is elevated. HDL level appears decreased.
";

#[test]
fn test_cbc_report_scenario() {
    let analyzer = ReportAnalyzer::new();
    let analysis = analyzer.analyze(CBC_REPORT, "cbc.txt");

    assert_eq!(analysis.report_type, ReportType::BloodTest);

    let names: Vec<&str> = analysis
        .detected_values
        .iter()
        .map(|v| v.test.as_str())
        .collect();
    assert_eq!(names, vec!["hemoglobin", "hematocrit", "wbc", "platelets"]);
    assert_eq!(analysis.abnormal_findings, vec!["Hemoglobin", "Hematocrit"]);

    let markdown = analysis.to_markdown();
    assert!(markdown.contains("**Report Type**: Blood Test"));
    assert!(markdown.contains(
        "- **HEMOGLOBIN**: 11.2 g/dL (Normal range: 12-16 g/dL (females), 13.5-17.5 g/dL (males))\n"
    ));
    assert!(markdown.contains("- **PLATELETS**: 250,000 /μL"));
}

#[test]
fn test_lipid_report() {
    let analysis = ReportAnalyzer::new().analyze(LIPID_REPORT, "lipids.txt");

    assert_eq!(analysis.report_type, ReportType::LipidPanel);
    let cholesterol = analysis
        .detected_values
        .iter()
        .find(|v| v.test == "cholesterol")
        .unwrap();
    assert_eq!(cholesterol.value, "232");
    assert!(analysis.abnormal_findings.contains(&"Ldl cholesterol".to_string()));
    assert!(analysis.abnormal_findings.contains(&"Hdl level".to_string()));
}

#[test]
fn test_unknown_report_still_has_recommendations() {
    let markdown = ReportAnalyzer::new().render("Patient discharged in good condition.", "note.txt");

    assert!(markdown.contains("**Report Type**: Unknown"));
    assert!(!markdown.contains("### Detected Values:"));
    assert!(!markdown.contains("### Potential Abnormal Findings:"));
    assert!(markdown.contains("### Recommendations:\n1. "));
    assert!(markdown.contains("\n3. "));
    assert!(markdown.contains("### Disclaimer:\n"));
}

#[test]
fn test_analysis_is_idempotent() {
    let analyzer = ReportAnalyzer::new();
    for text in [CBC_REPORT, LIPID_REPORT, ""] {
        let first = analyzer.render(text, "report.txt");
        let second = ReportAnalyzer::new().render(text, "report.txt");
        assert_eq!(first, second);
        assert_eq!(first, analyzer.render(text, "report.txt"));
    }
}

#[tokio::test]
async fn test_report_service_end_to_end() {
    let service = ReportServiceImpl::new(ExtractorRegistry::default(), Arc::new(DisabledClient), false);

    let reply = service
        .analyze_report("session", "Lab Results.TXT", CBC_REPORT.as_bytes())
        .await
        .unwrap();

    assert!(reply.is_fallback);
    assert!(reply.analysis.starts_with("## Medical Report Analysis: Lab_Results.TXT\n\n"));
    assert_eq!(reply.analysis, ReportAnalyzer::new().render(CBC_REPORT, "Lab_Results.TXT"));
}
