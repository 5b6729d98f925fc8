//! 回复合成器
//!
//! 把分类结果渲染成完整回复；结构化回答按领域（发热、消化、通用）提取字段后拼装。
//! 输出完全由输入决定。

use once_cell::sync::Lazy;
use regex::Regex;

use crate::engine::classifier::{Guidance, Route};
use crate::engine::structured::StructuredAnswer;
use crate::reference::contains_any;

/// 回复过短时替换使用的通用回复
pub const DEGENERATE_FALLBACK: &str = "I understand your question about health concerns. To provide more specific guidance, \
could you please share more details about your symptoms, such as when they started \
and any factors that seem to improve or worsen them? This will help me give you more relevant information.";

/// 内部故障时对结构化回答的兜底回复
pub const STRUCTURED_RECOVERY: &str = "Thank you for providing those answers. Based on what you've shared, \
I'd recommend monitoring your symptoms. If they worsen or persist, \
please consult with a healthcare professional. \
Is there anything specific about your symptoms that you're concerned about?";

/// 内部故障时对自由文本的兜底回复
pub const FREE_TEXT_RECOVERY: &str = "Thank you for sharing your symptoms. Based on what you've described, \
I'd recommend consulting with a healthcare professional for a proper diagnosis. \
In the meantime, could you tell me when these symptoms first started? \
This will help me better understand your situation.";

/// 服务层无法处理请求时返回给接口调用方的回复
pub const SERVICE_TROUBLE_REPLY: &str = "I understand your question but am having trouble processing it right now. \
Could you try rephrasing or asking a different health question?";

/// 渲染分类结果
pub fn render(route: Route) -> String {
    match route {
        Route::Category(entry) => entry.template.to_string(),
        Route::Guidance(guidance) => guidance_text(guidance).to_string(),
    }
}

fn guidance_text(guidance: Guidance) -> &'static str {
    match guidance {
        Guidance::Indigestion => {
            "Based on what you've shared about your stomach pain being recent and occurring after meals, \
this suggests you may be experiencing indigestion or possibly gastritis. Indigestion is common \
and can be triggered by certain foods, eating too quickly, or stress.\n\n\
Here are some approaches that might help:\n\
1. Try eating smaller, more frequent meals\n\
2. Avoid spicy, fatty, or acidic foods temporarily\n\
3. Consider over-the-counter antacids for temporary relief\n\n\
If the pain is severe, persistent beyond a few days, or accompanied by fever, vomiting, or blood in stool, \
please seek medical attention promptly."
        }
        Guidance::RecentStomachUpset => {
            "Based on your description of recent stomach discomfort, there are several potential causes including \
gastritis, food intolerance, or a mild stomach virus. Since this is a recent onset, it may resolve on its own \
with basic care.\n\n\
I recommend:\n\
1. Staying hydrated with clear fluids\n\
2. Eating bland foods like rice, toast, or bananas\n\
3. Resting and monitoring your symptoms\n\n\
If symptoms worsen, persist beyond 48 hours, or if you develop fever or vomiting, please consult a healthcare provider."
        }
        Guidance::ChronicStomachPain => {
            "The stomach pain you've been experiencing for an extended period could indicate a chronic condition \
such as irritable bowel syndrome (IBS), gastroesophageal reflux disease (GERD), or food sensitivities. \
Persistent symptoms should be evaluated by a healthcare provider.\n\n\
In the meantime, consider:\n\
1. Keeping a food diary to identify potential trigger foods\n\
2. Managing stress through relaxation techniques\n\
3. Avoiding alcohol, caffeine, and spicy foods\n\n\
Given the chronic nature of your symptoms, I strongly recommend scheduling an appointment with a \
gastroenterologist for proper diagnosis and treatment."
        }
        Guidance::SevereHeadache => {
            "The severe headache you've described is concerning. Based on your description, this could be a migraine \
or tension headache, but severe headaches can sometimes indicate more serious conditions.\n\n\
For immediate relief:\n\
1. Rest in a dark, quiet room\n\
2. Apply a cold compress to your forehead or neck\n\
3. Consider appropriate over-the-counter pain relievers if not contraindicated for you\n\n\
Given the severity you've described, I recommend consulting with a healthcare provider soon, especially if this \
is a new or 'worst headache of your life' or if accompanied by fever, stiff neck, or confusion."
        }
        Guidance::TensionHeadache => {
            "Based on your description, you appear to be experiencing a tension-type headache or mild migraine. \
These are common and often triggered by stress, dehydration, poor sleep, or eye strain.\n\n\
Here are some strategies that might help:\n\
1. Ensure you're staying hydrated throughout the day\n\
2. Take regular breaks from screens and practice the 20-20-20 rule (every 20 minutes, look at something 20 feet away for 20 seconds)\n\
3. Practice relaxation techniques like deep breathing or gentle neck stretches\n\
4. Consider over-the-counter pain relievers if appropriate for you\n\n\
If these headaches become more frequent or severe, please consult a healthcare provider."
        }
        Guidance::HighFever => {
            "With a temperature reading this high (over 102°F), you're experiencing a significant fever that requires attention. \
This level of fever suggests your body is fighting an infection, which could be viral or bacterial.\n\n\
Immediate steps to take:\n\
1. Stay well-hydrated with water or electrolyte drinks\n\
2. Use appropriate fever-reducing medication (acetaminophen or ibuprofen) if not contraindicated for you\n\
3. Rest and monitor your temperature\n\n\
A fever this high warrants medical attention, especially if it persists for more than 24 hours or is accompanied by \
severe headache, rash, confusion, persistent vomiting, or difficulty breathing. Please contact a healthcare provider today."
        }
        Guidance::LowGradeFever => {
            "Based on what you've shared, you have a low-grade fever. This is often your body's natural response to fighting \
a mild infection, most commonly viral.\n\n\
Here's what I recommend:\n\
1. Rest and get plenty of fluids\n\
2. Monitor your temperature over the next 24-48 hours\n\
3. Use acetaminophen or ibuprofen as directed if you're uncomfortable\n\n\
If your fever persists beyond 3 days, rises above 102°F (39°C), or is accompanied by severe symptoms like difficulty \
breathing or confusion, please seek medical care promptly."
        }
        Guidance::StomachPain => {
            "I understand you're experiencing stomach pain. This can be caused by various factors \
including indigestion, gas, or more serious conditions. To help me understand better:\n\n\
1. How long have you been experiencing this pain?\n\
2. Is it constant or does it come and go?\n\
3. Have you noticed any specific foods triggering it?\n\n\
While I can provide some general guidance, it's important to consult with a healthcare provider \
if the pain is severe, persistent, or accompanied by other concerning symptoms."
        }
        Guidance::Headache => {
            "I'm sorry to hear you're dealing with a headache. Headaches can have various causes including stress, \
dehydration, lack of sleep, or eye strain. To better understand your situation:\n\n\
1. How long have you had this headache?\n\
2. How would you rate the pain from 1-10?\n\
3. Have you tried any remedies already?\n\n\
Remember, while I can offer general information, persistent or severe headaches should be evaluated by a healthcare professional."
        }
        Guidance::Fever => {
            "I see you've mentioned having a fever. Fevers are often your body's natural response to infection. \
To help me understand your situation better:\n\n\
1. What is your temperature reading?\n\
2. Are you experiencing any other symptoms alongside the fever?\n\
3. How long have you had the fever?\n\n\
While I can provide general guidance, please remember that I'm not a substitute for professional medical advice, \
especially for fevers that are high, persistent, or accompanied by other concerning symptoms."
        }
        Guidance::RespiratorySymptoms => {
            "I understand you're experiencing respiratory symptoms. These could be related to a cold, flu, or other \
respiratory conditions. To better understand your specific situation:\n\n\
1. How long have you been experiencing these symptoms?\n\
2. Is your cough dry or productive (producing mucus)?\n\
3. Do you have other symptoms like fever, body aches, or fatigue?\n\n\
While I can provide general information, these symptoms can vary widely in cause and treatment, so consulting \
with a healthcare provider is recommended for proper diagnosis and care."
        }
        Guidance::GeneralTriage => {
            "Thank you for sharing your health concern. To help me understand your situation better and provide more relevant information, could you please:\n\n\
1. Tell me more about when these symptoms started?\n\
2. Describe any specific patterns or triggers you've noticed?\n\
3. Mention any remedies you've already tried?\n\n\
While I'm here to provide health information, please remember that I cannot replace professional medical advice. \
If your symptoms are severe, persistent, or concerning, I'd recommend consulting with a healthcare provider."
        }
    }
}

// ===== Structured replies =====

const FEVER_KEYS: &[&str] = &["fever", "temperature"];
const DIGESTIVE_KEYS: &[&str] = &["stomach", "pain", "digest"];
const NO_OTHER_SYMPTOMS: &[&str] = &["no", "none", "not really"];
const CONDITION_TERMS: &[&str] = &[
    "pain",
    "ache",
    "discomfort",
    "fever",
    "cough",
    "headache",
    "rash",
    "nausea",
];

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("number pattern must compile"));

/// 结构化回答的领域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerDomain {
    Fever,
    Digestive,
    Generic,
}

impl AnswerDomain {
    /// 按问题文本判定领域，发热优先
    pub fn detect(answers: &StructuredAnswer) -> Self {
        let keys: Vec<String> = answers.keys().map(|k| k.to_lowercase()).collect();
        if keys.iter().any(|k| contains_any(k, FEVER_KEYS)) {
            AnswerDomain::Fever
        } else if keys.iter().any(|k| contains_any(k, DIGESTIVE_KEYS)) {
            AnswerDomain::Digestive
        } else {
            AnswerDomain::Generic
        }
    }
}

/// 体温读数分级
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TemperatureBand {
    /// ≥ 102°F
    High,
    /// 99°F 起，低于 101°F（100.x 的读数也算低热）
    LowGrade,
    /// 其他读数，包括无法解析的文本
    Neutral,
}

impl TemperatureBand {
    pub fn classify(reading: &str) -> Self {
        let value = NUMBER
            .find(reading)
            .and_then(|m| m.as_str().parse::<f64>().ok());
        match value {
            Some(t) if t >= 102.0 => TemperatureBand::High,
            Some(t) if (99.0..101.0).contains(&t) => TemperatureBand::LowGrade,
            _ => TemperatureBand::Neutral,
        }
    }
}

/// 合成结构化回答的回复
pub fn synthesize_structured(answers: &StructuredAnswer) -> String {
    match AnswerDomain::detect(answers) {
        AnswerDomain::Fever => fever_response(answers),
        AnswerDomain::Digestive => digestive_response(answers),
        AnswerDomain::Generic => generic_response(answers),
    }
}

fn fever_response(answers: &StructuredAnswer) -> String {
    let mut temperature: Option<&str> = None;
    let mut other_symptoms = false;
    let mut duration: Option<&str> = None;

    for (question, answer) in answers {
        let q = question.to_lowercase();
        if q.contains("temperature") {
            temperature = Some(answer.as_str());
        } else if q.contains("other symptoms") {
            if !NO_OTHER_SYMPTOMS.contains(&answer.to_lowercase().as_str()) {
                other_symptoms = true;
            }
        } else if q.contains("long") || q.contains("duration") {
            duration = Some(answer.as_str());
        }
    }

    let started_today = duration.is_some_and(|d| d.to_lowercase().contains("today"));
    let mut response = String::from("Thank you for providing those details about your fever. ");

    if let Some(reading) = temperature.filter(|t| !t.is_empty()) {
        match TemperatureBand::classify(reading) {
            TemperatureBand::High => {
                response.push_str(&format!(
                    "A temperature of {} is considered a high fever. ",
                    reading
                ));
                if started_today {
                    response.push_str("Even though it just started today, this temperature is concerning and should be monitored closely. ");
                } else {
                    response.push_str("This is concerning, especially if it has persisted. ");
                }
                response.push_str("I recommend contacting a healthcare provider soon. ");
            }
            TemperatureBand::LowGrade => {
                response.push_str(&format!(
                    "A temperature of {} is considered a low-grade fever. ",
                    reading
                ));
                if started_today {
                    response.push_str("Since it just started today, you can monitor it for now. ");
                } else {
                    response.push_str("It's generally not a major concern but worth monitoring. ");
                }
            }
            TemperatureBand::Neutral => {
                response.push_str(&format!("Based on the temperature reading of {}, ", reading));
            }
        }
    }

    if other_symptoms {
        response.push_str("The presence of other symptoms alongside your fever could indicate an infection or illness. ");
        response.push_str("Have you noticed if anything specific triggers or worsens these symptoms? ");
    } else {
        response.push_str("A fever without other symptoms might be your body's initial response to an infection. ");
        response.push_str("Are you staying hydrated and getting enough rest? ");
    }

    response.push_str("\nFor fever management, you can:\n");
    response.push_str("1. Stay well-hydrated with water or electrolyte drinks\n");
    response.push_str("2. Rest as much as possible\n");
    response.push_str("3. Use appropriate over-the-counter fever reducers like acetaminophen if needed\n\n");
    response.push_str("Please remember that I'm providing general information and not medical advice. If your fever exceeds 103°F (39.4°C), persists for more than three days, or is accompanied by severe symptoms, please seek medical attention.");
    response
}

fn digestive_response(answers: &StructuredAnswer) -> String {
    let mut duration: Option<String> = None;
    let mut pattern: Option<String> = None;
    let mut triggers: Option<String> = None;

    for (question, answer) in answers {
        let q = question.to_lowercase();
        let a = answer.to_lowercase();
        if q.contains("long") || q.contains("duration") {
            duration = Some(a);
        } else if q.contains("constant") || q.contains("come and go") {
            pattern = Some(a);
        } else if q.contains("food") || q.contains("trigger") {
            triggers = Some(a);
        }
    }

    let mut response = String::from("Thank you for providing those details about your stomach pain. ");

    if let Some(d) = duration.as_deref() {
        if contains_any(d, &["today", "day", "just started"]) {
            response.push_str("Since the pain just started recently, it could be related to something you ate or a brief digestive issue. ");
        } else if contains_any(d, &["week", "month", "year"]) {
            response.push_str("The fact that you've been experiencing this pain for some time suggests it may be a chronic condition. It would be important to consult with a gastroenterologist. ");
        }
    }

    if let Some(p) = pattern.as_deref() {
        if p.contains("constant") {
            response.push_str("Constant pain that doesn't subside is worth discussing with a healthcare provider as it might indicate inflammation or irritation. ");
        } else if p.contains("come") && p.contains("go") {
            response.push_str("Pain that comes and goes is common with various digestive issues like gas, indigestion, or even conditions like IBS. ");
        } else if p.contains("after") && contains_any(p, &["eat", "food", "meal"]) {
            response.push_str("Pain that occurs after eating could be related to food sensitivities, gastritis, or other digestive processes. ");
        }
    }

    if let Some(t) = triggers.as_deref() {
        if contains_any(t, &["spicy", "fatty", "fried"]) {
            response.push_str("Spicy and fatty foods commonly trigger digestive discomfort for many people. Limiting these foods could help reduce symptoms. ");
        } else if contains_any(t, &["dairy", "milk", "cheese", "lactose"]) {
            response.push_str("Discomfort after consuming dairy might suggest lactose intolerance. You might consider trying lactose-free alternatives. ");
        }
    }

    response.push_str("\nBased on what you've shared, here are some general recommendations:\n");
    response.push_str("1. Keep a food diary to identify potential trigger foods\n");
    response.push_str("2. Consider smaller, more frequent meals rather than large ones\n");
    response.push_str("3. Stay hydrated throughout the day\n");
    response.push_str("4. Avoid lying down immediately after eating\n\n");
    response.push_str("Would you like me to provide more specific information about managing stomach discomfort? Remember, persistent or severe symptoms should always be evaluated by a healthcare professional.");
    response
}

fn generic_response(answers: &StructuredAnswer) -> String {
    let mut response = String::from(
        "Thank you for providing those detailed answers. This information helps me understand your situation better. ",
    );
    response.push_str("Based on what you've shared, it seems you're experiencing ");

    let mut terms: Vec<&str> = Vec::new();
    for question in answers.keys() {
        let q = question.to_lowercase();
        for &term in CONDITION_TERMS {
            if q.contains(term) && !terms.contains(&term) {
                terms.push(term);
            }
        }
    }

    if terms.is_empty() {
        response.push_str("some health concerns. ");
    } else {
        response.push_str(&format!("{}. ", terms.join(", ")));
    }

    response.push_str("Could you share if anything seems to improve or worsen your symptoms? Understanding these patterns can help provide more relevant information.");
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::structured::parse_utterance;
    use rstest::rstest;

    fn answers(input: &str) -> StructuredAnswer {
        parse_utterance(input).answers
    }

    #[rstest]
    #[case("103", TemperatureBand::High)]
    #[case("102.5°F", TemperatureBand::High)]
    #[case("99.5", TemperatureBand::LowGrade)]
    #[case("100 F", TemperatureBand::LowGrade)]
    #[case("100.9", TemperatureBand::LowGrade)]
    #[case("98.6", TemperatureBand::Neutral)]
    #[case("101", TemperatureBand::Neutral)]
    #[case("warm to the touch", TemperatureBand::Neutral)]
    fn test_temperature_bands(#[case] reading: &str, #[case] band: TemperatureBand) {
        assert_eq!(TemperatureBand::classify(reading), band);
    }

    #[test]
    fn test_domain_detection() {
        assert_eq!(
            AnswerDomain::detect(&answers("Temperature: 103\n\nDuration: today")),
            AnswerDomain::Fever
        );
        assert_eq!(
            AnswerDomain::detect(&answers("Where is the pain: lower left\n\nDuration: a week")),
            AnswerDomain::Digestive
        );
        assert_eq!(
            AnswerDomain::detect(&answers("Any rash: yes\n\nCough: dry")),
            AnswerDomain::Generic
        );
    }

    #[test]
    fn test_high_fever_today() {
        let text = synthesize_structured(&answers(
            "Temperature: 103\n\nOther symptoms: none\n\nDuration: today",
        ));
        assert!(text.contains("A temperature of 103 is considered a high fever."));
        assert!(text.contains("Even though it just started today"));
        assert!(text.contains("A fever without other symptoms"));
        assert!(text.contains("1. Stay well-hydrated with water or electrolyte drinks\n"));
        assert!(text.contains("2. Rest as much as possible\n"));
        assert!(text.contains("3. Use appropriate over-the-counter fever reducers"));
    }

    #[test]
    fn test_low_grade_fever_with_other_symptoms() {
        let text = synthesize_structured(&answers(
            "What is your temperature: 99.8\n\nAny other symptoms: sore throat\n\nHow long: three days",
        ));
        assert!(text.contains("low-grade fever"));
        assert!(text.contains("worth monitoring"));
        assert!(text.contains("The presence of other symptoms"));
    }

    #[test]
    fn test_digestive_reply() {
        let text = synthesize_structured(&answers(
            "How long have you had stomach pain: about a month\n\nIs it constant or does it come and go: constant\n\nAny trigger foods: spicy curries",
        ));
        assert!(text.contains("chronic condition"));
        assert!(text.contains("Constant pain that doesn't subside"));
        assert!(text.contains("Spicy and fatty foods"));
        assert!(text.contains("4. Avoid lying down immediately after eating"));
    }

    #[test]
    fn test_generic_reply_lists_terms_once() {
        let text = synthesize_structured(&answers("Cough type: dry\n\nCough duration: 3 days\n\nRash: no"));
        assert!(text.contains("experiencing cough, rash. "));
    }

    #[test]
    fn test_generic_reply_without_terms() {
        let text = synthesize_structured(&StructuredAnswer::new());
        assert!(text.contains("some health concerns."));
    }

    #[test]
    fn test_render_category_returns_template() {
        let entry = crate::reference::match_category("cough").unwrap();
        assert_eq!(render(Route::Category(entry)), entry.template);
    }

    #[test]
    fn test_render_indigestion() {
        let text = render(Route::Guidance(Guidance::Indigestion));
        assert!(text.contains("indigestion or possibly gastritis"));
    }
}
