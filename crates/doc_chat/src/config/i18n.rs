//! Localized messages shown to the person chatting

use phf::phf_map;
use serde::{Deserialize, Serialize};

/// Language options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    Portuguese,
    English,
}

impl Language {
    /// Parse language from string
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "en" | "english" => Self::English,
            _ => Self::Portuguese,
        }
    }

    /// Get language code string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Portuguese => "pt",
            Self::English => "en",
        }
    }
}

/// Portuguese messages
pub static MESSAGES_PT: phf::Map<&'static str, &'static str> = phf_map! {
    "api_key_missing" => "⚠️ API Key não definida. Configure-a antes de enviar mensagens.",
    "api_key_updated" => "🔑 API Key atualizada com sucesso.",
    "api_key_invalid" => "Digite uma API Key válida.",
    "empty_input" => "⚠️ Por favor, digite algo.",
    "empty_send" => "Digite algo antes de enviar.",
    "files_loaded" => "📂 Arquivos carregados com sucesso.",
    "no_valid_files" => "⚠️ Nenhum arquivo válido carregado.",
    "load_failed" => "Erro ao carregar arquivos",
    "pdf_read_error" => "Erro ao ler PDF",
    "text_read_error" => "Erro ao ler arquivo",
    "context_cleared" => "Contexto limpo com sucesso.",
    "error" => "Erro",
    "you" => "Você",
    "assistant" => "ChatGPT",
};

/// English messages
pub static MESSAGES_EN: phf::Map<&'static str, &'static str> = phf_map! {
    "api_key_missing" => "⚠️ API key not set. Configure it before sending messages.",
    "api_key_updated" => "🔑 API key updated successfully.",
    "api_key_invalid" => "Enter a valid API key.",
    "empty_input" => "⚠️ Please type something.",
    "empty_send" => "Type something before sending.",
    "files_loaded" => "📂 Files loaded successfully.",
    "no_valid_files" => "⚠️ No valid files loaded.",
    "load_failed" => "Error loading files",
    "pdf_read_error" => "Error reading PDF",
    "text_read_error" => "Error reading file",
    "context_cleared" => "Context cleared successfully.",
    "error" => "Error",
    "you" => "You",
    "assistant" => "ChatGPT",
};

/// Get UI messages dictionary by language
pub fn get_messages(lang: Language) -> &'static phf::Map<&'static str, &'static str> {
    match lang {
        Language::English => &MESSAGES_EN,
        Language::Portuguese => &MESSAGES_PT,
    }
}

/// Get a single UI message by key and language
/// Returns the message if found, otherwise returns the key as a fallback
pub fn get_message<'a>(key: &'a str, lang: Language) -> &'a str {
    match get_messages(lang).get(key) {
        Some(msg) => msg,
        None => key,
    }
}
