//! 参考表模块
//!
//! 规则引擎使用的只读、有序的参考数据。所有表都是按优先级排列的切片，
//! 顺序即匹配时的决胜规则，不能替换为无序的关联容器。

pub mod categories;
pub mod clinical_tests;
pub mod markers;
pub mod report_terms;

pub use categories::{CATEGORY_KEYWORDS, CategoryEntry, match_category};
pub use clinical_tests::{CLINICAL_TESTS, ClinicalTest};
pub use report_terms::{ABNORMALITY_TERMS, REPORT_TYPE_TERMS};

/// 任一关键词是否为文本的子串
pub fn contains_any(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| text.contains(term))
}
