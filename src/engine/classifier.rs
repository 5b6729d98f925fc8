//! 症状分类器
//!
//! 自由文本的处理分三级：
//! 1. 直接类别匹配：命中类别关键词即返回该类别的三问模板；
//! 2. 追问检测：最近一次提出诊断问题的回复之后，用户给出了具体回答，
//!    按诊断规则表合成建议；
//! 3. 单一症状匹配，最后是通用分诊模板。
//!
//! 所有判断都是输入的纯函数，规则表按顺序求值，第一个命中的规则生效。

use std::fmt;

use crate::models::Turn;
use crate::reference::markers::{
    CHRONIC_DURATION, DIGESTIVE_TOPIC, FEVER_TOPIC, HEADACHE_TOPIC, HIGH_TEMPERATURE,
    QUESTION_MARKERS, RECENT_ONSET, SEVERE_PAIN, SPECIFICITY_MARKERS,
};
use crate::reference::{CategoryEntry, contains_any, match_category};

/// 规则引擎给出的建议类型，文本由合成器渲染
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guidance {
    /// 近期、餐后胃痛：消化不良或胃炎
    Indigestion,
    /// 近期胃部不适
    RecentStomachUpset,
    /// 长期胃痛：建议消化科就诊
    ChronicStomachPain,
    /// 剧烈头痛：尽快就医
    SevereHeadache,
    /// 紧张性头痛或轻度偏头痛
    TensionHeadache,
    /// 高热：当天联系医生
    HighFever,
    /// 低热
    LowGradeFever,
    StomachPain,
    Headache,
    Fever,
    RespiratorySymptoms,
    /// 通用分诊模板
    GeneralTriage,
}

/// 分类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// 直接类别匹配（终止）
    Category(&'static CategoryEntry),
    /// 诊断合成或症状匹配
    Guidance(Guidance),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Category(entry) => write!(f, "category:{}", entry.keyword),
            Route::Guidance(guidance) => write!(f, "guidance:{:?}", guidance),
        }
    }
}

/// 追问的症状话题
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Digestive,
    Headache,
    Fever,
}

impl Topic {
    fn detect(lowered: &str) -> Option<Topic> {
        if contains_any(lowered, DIGESTIVE_TOPIC) {
            Some(Topic::Digestive)
        } else if contains_any(lowered, HEADACHE_TOPIC) {
            Some(Topic::Headache)
        } else if contains_any(lowered, FEVER_TOPIC) {
            Some(Topic::Fever)
        } else {
            None
        }
    }
}

/// 追问上下文
#[derive(Debug, Clone, Copy)]
pub struct FollowUp<'a> {
    /// 当前输入（小写）
    pub utterance: &'a str,
    /// 先看当前输入，再看被回答的那条提问
    pub topic: Option<Topic>,
}

/// 诊断规则：谓词 + 建议
pub struct DiagnosticRule {
    pub name: &'static str,
    pub applies: fn(&FollowUp<'_>) -> bool,
    pub guidance: Guidance,
}

fn is_recent(f: &FollowUp<'_>) -> bool {
    contains_any(f.utterance, RECENT_ONSET)
}

fn after_meal(f: &FollowUp<'_>) -> bool {
    f.utterance.contains("after") && contains_any(f.utterance, &["meal", "eating"])
}

fn digestive_recent_after_meal(f: &FollowUp<'_>) -> bool {
    f.topic == Some(Topic::Digestive) && is_recent(f) && after_meal(f)
}

fn digestive_recent(f: &FollowUp<'_>) -> bool {
    f.topic == Some(Topic::Digestive) && is_recent(f)
}

fn digestive_chronic(f: &FollowUp<'_>) -> bool {
    f.topic == Some(Topic::Digestive) && contains_any(f.utterance, CHRONIC_DURATION)
}

fn headache_severe(f: &FollowUp<'_>) -> bool {
    f.topic == Some(Topic::Headache) && contains_any(f.utterance, SEVERE_PAIN)
}

fn headache_any(f: &FollowUp<'_>) -> bool {
    f.topic == Some(Topic::Headache)
}

fn fever_high(f: &FollowUp<'_>) -> bool {
    f.topic == Some(Topic::Fever) && contains_any(f.utterance, HIGH_TEMPERATURE)
}

fn fever_any(f: &FollowUp<'_>) -> bool {
    f.topic == Some(Topic::Fever)
}

/// 诊断规则表，自上而下求值
pub static DIAGNOSTIC_RULES: &[DiagnosticRule] = &[
    DiagnosticRule {
        name: "digestive-recent-after-meal",
        applies: digestive_recent_after_meal,
        guidance: Guidance::Indigestion,
    },
    DiagnosticRule {
        name: "digestive-recent",
        applies: digestive_recent,
        guidance: Guidance::RecentStomachUpset,
    },
    DiagnosticRule {
        name: "digestive-chronic",
        applies: digestive_chronic,
        guidance: Guidance::ChronicStomachPain,
    },
    DiagnosticRule {
        name: "headache-severe",
        applies: headache_severe,
        guidance: Guidance::SevereHeadache,
    },
    DiagnosticRule {
        name: "headache",
        applies: headache_any,
        guidance: Guidance::TensionHeadache,
    },
    DiagnosticRule {
        name: "fever-high",
        applies: fever_high,
        guidance: Guidance::HighFever,
    },
    DiagnosticRule {
        name: "fever",
        applies: fever_any,
        guidance: Guidance::LowGradeFever,
    },
];

/// 单一症状规则：不依赖追问状态
pub struct SymptomRule {
    pub name: &'static str,
    pub applies: fn(&str) -> bool,
    pub guidance: Guidance,
}

fn stomach_pain(text: &str) -> bool {
    text.contains("stomach") && contains_any(text, &["ache", "pain", "hurt", "issue"])
}

fn head_pain(text: &str) -> bool {
    text.contains("head") && contains_any(text, &["ache", "pain", "hurt", "migraine"])
}

fn fever(text: &str) -> bool {
    text.contains("fever")
}

fn respiratory(text: &str) -> bool {
    contains_any(text, &["cough", "cold", "flu"])
}

pub static SYMPTOM_RULES: &[SymptomRule] = &[
    SymptomRule {
        name: "stomach-pain",
        applies: stomach_pain,
        guidance: Guidance::StomachPain,
    },
    SymptomRule {
        name: "head-pain",
        applies: head_pain,
        guidance: Guidance::Headache,
    },
    SymptomRule {
        name: "fever",
        applies: fever,
        guidance: Guidance::Fever,
    },
    SymptomRule {
        name: "respiratory",
        applies: respiratory,
        guidance: Guidance::RespiratorySymptoms,
    },
];

/// 查找最近一条提出了诊断问题的助手回复，返回其在历史中的下标
///
/// `window` 限制向前检查的回答轮次数，`None` 表示扫描全部历史。
pub fn find_pending_question(history: &[Turn], window: Option<usize>) -> Option<usize> {
    history
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, turn)| turn.is_answer())
        .take(window.unwrap_or(usize::MAX))
        .find(|(_, turn)| contains_any(&turn.content.to_lowercase(), QUESTION_MARKERS))
        .map(|(index, _)| index)
}

/// 被回答的那条回复所属的话题
///
/// 只看回复的首段，正文里顺带提到的其他症状不算；首段没有话题词时
/// 沿用引出这条回复的用户提问。
pub fn pending_topic(history: &[Turn], pending: usize) -> Option<Topic> {
    let subject = history[pending]
        .content
        .split("\n\n")
        .next()
        .unwrap_or_default();
    Topic::detect(&subject.to_lowercase()).or_else(|| {
        history[..pending]
            .iter()
            .rev()
            .find(|turn| !turn.is_answer())
            .and_then(|turn| Topic::detect(&turn.content.to_lowercase()))
    })
}

/// 当前输入是否包含具体回答的标记
pub fn has_specific_answer(lowered: &str) -> bool {
    contains_any(lowered, SPECIFICITY_MARKERS)
}

/// 对自由文本分类
pub fn classify(utterance: &str, history: &[Turn], window: Option<usize>) -> Route {
    let lowered = utterance.to_lowercase();

    if let Some(entry) = match_category(&lowered) {
        return Route::Category(entry);
    }

    if let Some(pending) = find_pending_question(history, window) {
        if has_specific_answer(&lowered) {
            let follow_up = FollowUp {
                utterance: &lowered,
                topic: Topic::detect(&lowered).or_else(|| pending_topic(history, pending)),
            };
            if let Some(rule) = DIAGNOSTIC_RULES.iter().find(|r| (r.applies)(&follow_up)) {
                tracing::debug!(rule = rule.name, "diagnostic rule matched");
                return Route::Guidance(rule.guidance);
            }
        }
    }

    SYMPTOM_RULES
        .iter()
        .find(|r| (r.applies)(&lowered))
        .map(|r| Route::Guidance(r.guidance))
        .unwrap_or(Route::Guidance(Guidance::GeneralTriage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const STOMACH_QUESTIONS: &str = "1. How long have you been experiencing this discomfort?";

    fn history_with(answer: &str) -> Vec<Turn> {
        vec![Turn::question("my tummy"), Turn::answer(answer)]
    }

    #[rstest]
    #[case("I have a bad cough", "cough")]
    #[case("Shortness of breath when climbing stairs", "shortness of breath")]
    #[case("My STOMACH hurts", "stomach")]
    #[case("sore muscles after the gym", "muscle")]
    fn test_direct_category(#[case] input: &str, #[case] keyword: &str) {
        match classify(input, &[], None) {
            Route::Category(entry) => assert_eq!(entry.keyword, keyword),
            other => panic!("expected category, got {:?}", other),
        }
    }

    #[test]
    fn test_follow_up_indigestion() {
        let history = history_with(STOMACH_QUESTIONS);
        let route = classify(
            "started today, pain is worse right after eating lunch",
            &history,
            None,
        );
        assert_eq!(route, Route::Guidance(Guidance::Indigestion));
    }

    #[rstest]
    #[case("it began yesterday, comes and goes", Guidance::RecentStomachUpset)]
    #[case("for about a month now", Guidance::ChronicStomachPain)]
    fn test_follow_up_digestive_branches(#[case] input: &str, #[case] expected: Guidance) {
        let history = history_with(STOMACH_QUESTIONS);
        assert_eq!(classify(input, &history, None), Route::Guidance(expected));
    }

    #[rstest]
    #[case("it is severe, behind my eyes", Guidance::SevereHeadache)]
    #[case("mild, mostly in the evening", Guidance::TensionHeadache)]
    fn test_follow_up_headache(#[case] input: &str, #[case] expected: Guidance) {
        let history = history_with(
            "To help with your headache concern:\n\n1. How long have you been experiencing these headaches?",
        );
        assert_eq!(classify(input, &history, None), Route::Guidance(expected));
    }

    #[test]
    fn test_follow_up_high_fever() {
        let history = history_with("1. What is your temperature reading?\n2. Any other symptoms?");
        let route = classify("yes it reads 103 since this morning", &history, None);
        assert_eq!(route, Route::Guidance(Guidance::HighFever));
    }

    #[test]
    fn test_without_specificity_marker_not_a_follow_up() {
        let history = history_with(STOMACH_QUESTIONS);
        let route = classify("after eating lunch", &history, None);
        assert_eq!(route, Route::Guidance(Guidance::GeneralTriage));
    }

    #[test]
    fn test_without_pending_question_not_a_follow_up() {
        let history = history_with("Take care and stay hydrated.");
        let route = classify("started today after eating", &history, None);
        assert_eq!(route, Route::Guidance(Guidance::GeneralTriage));
    }

    #[test]
    fn test_window_limits_history_scan() {
        let history = vec![
            Turn::question("stomach"),
            Turn::answer(STOMACH_QUESTIONS),
            Turn::question("ok"),
            Turn::answer("Glad to help."),
        ];
        assert_eq!(find_pending_question(&history, None), Some(1));
        assert!(find_pending_question(&history, Some(1)).is_none());
        assert_eq!(find_pending_question(&history, Some(2)), Some(1));
    }

    #[test]
    fn test_pending_topic_reads_subject_line_only() {
        // the body mentions fever in passing, the subject line does not
        let history = vec![
            Turn::question("caught a cold last night"),
            Turn::answer(render_respiratory()),
        ];
        assert_eq!(pending_topic(&history, 1), None);
        let route = classify("yes, for two days now", &history, None);
        assert_eq!(route, Route::Guidance(Guidance::GeneralTriage));
    }

    #[test]
    fn test_pending_topic_falls_back_to_question() {
        let history = vec![
            Turn::question("my stomach feels off"),
            Turn::answer("Thanks.\n\n1. How long has it lasted?"),
        ];
        assert_eq!(pending_topic(&history, 1), Some(Topic::Digestive));
    }

    #[test]
    fn test_high_fever_reply_keeps_fever_topic() {
        let history = vec![
            Turn::question("yes it reads 103 since this morning"),
            Turn::answer(crate::engine::synthesizer::render(Route::Guidance(Guidance::HighFever))),
        ];
        assert_eq!(pending_topic(&history, 1), Some(Topic::Fever));
        let route = classify("yes still 103 today", &history, None);
        assert_eq!(route, Route::Guidance(Guidance::HighFever));
    }

    #[rstest]
    #[case(Route::Guidance(Guidance::HighFever), "guidance:HighFever")]
    #[case(Route::Category(&crate::reference::CATEGORY_KEYWORDS[0]), "category:cough")]
    fn test_route_display(#[case] route: Route, #[case] expected: &str) {
        assert_eq!(route.to_string(), expected);
    }

    fn render_respiratory() -> String {
        crate::engine::synthesizer::render(Route::Guidance(Guidance::RespiratorySymptoms))
    }

    #[rstest]
    #[case("my head aches terribly", Guidance::Headache)]
    #[case("I think I have a fever", Guidance::Fever)]
    #[case("caught a cold last night", Guidance::RespiratorySymptoms)]
    #[case("I feel tired", Guidance::GeneralTriage)]
    fn test_generic_symptom_match(#[case] input: &str, #[case] expected: Guidance) {
        assert_eq!(classify(input, &[], None), Route::Guidance(expected));
    }

    #[test]
    fn test_classification_is_deterministic() {
        let history = history_with(STOMACH_QUESTIONS);
        let input = "it has been a week, constant";
        let first = classify(input, &history, None);
        for _ in 0..10 {
            assert_eq!(classify(input, &history, None), first);
        }
    }
}
