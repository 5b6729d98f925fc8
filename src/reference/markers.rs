//! 对话启发式标记词

/// 助手回复中表示"提出了诊断问题"的标记
pub static QUESTION_MARKERS: &[&str] = &["1.", "2.", "3.", "how long", "rate the pain"];

/// 用户回复中表示"给出了具体回答"的标记
pub static SPECIFICITY_MARKERS: &[&str] = &[
    "just started",
    "day",
    "week",
    "month",
    "constant",
    "comes and goes",
    "yes",
    "no",
    "mild",
    "moderate",
    "severe",
    "spicy",
    "dairy",
];

/// 近期发作
pub static RECENT_ONSET: &[&str] = &["day", "just started"];

/// 慢性、持续时间较长
pub static CHRONIC_DURATION: &[&str] = &["week", "month", "chronic", "long time"];

/// 头痛严重程度
pub static SEVERE_PAIN: &[&str] = &["severe", "8", "9", "10"];

/// 高热读数
pub static HIGH_TEMPERATURE: &[&str] = &["102", "103", "104"];

/// 消化系统话题
pub static DIGESTIVE_TOPIC: &[&str] = &["stomach", "digest", "abdominal", "this discomfort"];

/// 头痛话题
pub static HEADACHE_TOPIC: &[&str] = &["headache", "migraine"];

/// 发热话题
pub static FEVER_TOPIC: &[&str] = &["fever", "temperature"];
