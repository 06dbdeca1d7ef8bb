//! 提示词模板

/// 摘要提示词
pub fn summarize_prompt(text: &str) -> String {
    format!("Summarize this text concisely: {text}")
}

/// 翻译提示词
pub fn translate_prompt(text: &str, target_language: &str) -> String {
    format!("Translate the following text to {target_language}. Return ONLY the translation: {text}")
}
