//! 补全服务提示词

use crate::models::{Turn, TurnKind};
use crate::upstream::ChatMessage;

pub const CHAT_SYSTEM_PROMPT: &str = "You are an empathetic medical assistant conducting an interactive diagnosis.
Your approach should be:
1. Start with a positive, professional tone (avoid starting with \"I'm sorry\")
2. If the user has provided structured answers to your previous questions, acknowledge those answers specifically
3. Ask ONE specific follow-up question at a time
4. Structure your responses clearly:
   - Acknowledge the previous answers professionally
   - Ask a focused follow-up question
   - Explain why this information helps
   - If sufficient info, provide analysis
5. Keep responses complete (never cut off mid-sentence)
6. Maintain a constructive, solution-focused tone
7. Include clear action items when appropriate
8. Always remind that this is not a substitute for professional medical advice";

pub const STRUCTURED_ADDENDUM: &str = "\n\nThe user has provided responses to your previous questions in a structured format. Please acknowledge each response and provide appropriate follow-up based on the answers.";

pub const REPORT_SYSTEM_PROMPT: &str = "You are a medical assistant analyzing medical reports. Follow these guidelines:
1. Identify key metrics and test results
2. Compare results with normal ranges when available
3. Highlight any abnormal findings
4. Organize information in a structured way
5. Avoid making definitive diagnostic statements
6. Always remind that this is not a substitute for professional medical interpretation
7. Be factual and objective in your analysis";

/// 构造对话请求：系统提示、历史轮次、当前输入
pub fn chat_messages(utterance: &str, history: &[Turn], structured: bool) -> Vec<ChatMessage> {
    let mut system = CHAT_SYSTEM_PROMPT.to_string();
    if structured {
        system.push_str(STRUCTURED_ADDENDUM);
    }

    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(system));
    messages.extend(history.iter().map(|turn| match turn.kind {
        TurnKind::Question => ChatMessage::user(turn.content.clone()),
        TurnKind::Answer => ChatMessage::assistant(turn.content.clone()),
    }));
    messages.push(ChatMessage::user(utterance));
    messages
}

/// 构造报告分析请求
pub fn report_messages(extracted_text: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(REPORT_SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Here's a medical report to analyze: {}\n\nPlease analyze this report and provide a summary of key findings.",
            extracted_text
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_messages_include_history() {
        let history = vec![Turn::question("cough"), Turn::answer("How long?")];
        let messages = chat_messages("two days", &history, false);

        let roles: Vec<&str> = messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
        assert_eq!(messages[3].content, "two days");
        assert!(!messages[0].content.contains("structured format"));
    }

    #[test]
    fn test_structured_addendum() {
        let messages = chat_messages("Fever: yes\n\nDuration: 2 days", &[], true);
        assert!(messages[0].content.ends_with("appropriate follow-up based on the answers."));
    }

    #[test]
    fn test_report_messages() {
        let messages = report_messages("Hemoglobin 11.2");
        assert_eq!(messages.len(), 2);
        assert!(messages[1].content.starts_with("Here's a medical report to analyze: Hemoglobin 11.2\n\n"));
    }
}
