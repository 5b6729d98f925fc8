//! 症状类别关键词表

/// 类别表条目：关键词与对应的三问模板
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryEntry {
    pub keyword: &'static str,
    pub template: &'static str,
}

const fn entry(keyword: &'static str, template: &'static str) -> CategoryEntry {
    CategoryEntry { keyword, template }
}

/// 直接类别匹配表，按顺序扫描，第一个命中的关键词生效
pub static CATEGORY_KEYWORDS: &[CategoryEntry] = &[
    // Respiratory
    entry(
        "cough",
        "I understand you're asking about a cough. To provide the most helpful information:\n\n1. How long have you been coughing?\n2. Is your cough dry or productive (bringing up mucus)?\n3. Have you noticed any specific triggers for your cough?",
    ),
    entry(
        "breathing",
        "I understand you're having breathing concerns. To better understand your situation:\n\n1. When did you first notice difficulty breathing?\n2. Does it happen during specific activities or all the time?\n3. Have you experienced this before?",
    ),
    entry(
        "shortness of breath",
        "I understand you're experiencing shortness of breath. Let me help you better:\n\n1. When did this shortness of breath start?\n2. Does it occur at rest, with activity, or both?\n3. Is it associated with any other symptoms like chest pain or dizziness?",
    ),
    // Digestive
    entry(
        "stomach",
        "About your stomach concern, I'd like to understand more:\n\n1. How long have you been experiencing this discomfort?\n2. Is the pain constant or does it come and go?\n3. Have you noticed any connection to eating certain foods?",
    ),
    entry(
        "nausea",
        "Regarding your nausea, to help you better:\n\n1. How long have you been feeling nauseated?\n2. Have you vomited or just felt nauseated?\n3. Have you identified any triggers for this feeling?",
    ),
    entry(
        "acid reflux",
        "About your acid reflux concern:\n\n1. How often do you experience acid reflux symptoms?\n2. Do you notice them at any particular time (after meals, when lying down)?\n3. Have you tried any remedies so far?",
    ),
    // Neurological
    entry(
        "headache",
        "To help with your headache concern:\n\n1. How long have you been experiencing these headaches?\n2. Where in your head do you feel the pain?\n3. How would you rate the intensity from 1-10?",
    ),
    entry(
        "migraine",
        "Regarding your migraine question:\n\n1. How frequently do you experience migraines?\n2. Do you notice any warning signs before they start?\n3. What triggers have you identified, if any?",
    ),
    entry(
        "dizziness",
        "About your dizziness concern:\n\n1. When did you first notice feeling dizzy?\n2. Would you describe it more as lightheadedness or a spinning sensation?\n3. Is it constant or does it come in episodes?",
    ),
    // Skin
    entry(
        "rash",
        "Regarding your rash question:\n\n1. Where on your body is the rash located?\n2. How long have you had this rash?\n3. Is it itchy, painful, or neither?",
    ),
    entry(
        "itchy skin",
        "About your itchy skin:\n\n1. How long have you been experiencing itchiness?\n2. Is it limited to one area or all over your body?\n3. Have you noticed any visible changes to your skin?",
    ),
    entry(
        "eczema",
        "Regarding your eczema question:\n\n1. Which parts of your body are affected?\n2. How long have you been dealing with this?\n3. Have you identified any triggers that worsen your symptoms?",
    ),
    // Musculoskeletal
    entry(
        "joint pain",
        "About your joint pain:\n\n1. Which joints are affected?\n2. How long have you been experiencing this pain?\n3. Does anything seem to improve or worsen the pain?",
    ),
    entry(
        "back pain",
        "Regarding your back pain:\n\n1. Where exactly in your back is the pain located?\n2. How long have you been experiencing it?\n3. Would you describe the pain as sharp, dull, or aching?",
    ),
    entry(
        "muscle",
        "About your muscle concern:\n\n1. Which muscles are affected?\n2. How long have you been experiencing this issue?\n3. Is the discomfort constant or only during certain activities?",
    ),
];

/// 在小写文本中查找第一个命中的类别
pub fn match_category(lowered: &str) -> Option<&'static CategoryEntry> {
    CATEGORY_KEYWORDS
        .iter()
        .find(|entry| lowered.contains(entry.keyword))
}
