//! System prompt used to inject loaded file context

use super::Language;

/// Build the system-role instruction that carries the context blob verbatim
pub fn context_prompt(context: &str, lang: Language) -> String {
    match lang {
        Language::Portuguese => format!("Use o seguinte contexto: {}", context),
        Language::English => format!("Use the following context: {}", context),
    }
}
