//! Conversation session holding the credential, context blob and transcript

use chrono::{DateTime, Local};
use std::fmt;
use std::path::Path;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{context_prompt, get_message, ChatConfig, ContextMode, Language};
use crate::context::{ContextLoader, LoadStatus, SourceFile};
use crate::model::{ChatMessage, ClientFactory, CompletionClient, OpenAiClientFactory, Role};

/// One immutable message of the visible conversation
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    role: Role,
    text: String,
    created_at: DateTime<Local>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            created_at: Local::now(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered, append-only list of turns
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Render the transcript as `Label: text` lines
    pub fn render(&self, lang: Language) -> String {
        self.turns
            .iter()
            .map(|turn| {
                let label = match turn.role {
                    Role::User => get_message("you", lang),
                    _ => get_message("assistant", lang),
                };
                format!(
                    "[{}] {}: {}",
                    turn.created_at.format("%H:%M:%S"),
                    label,
                    turn.text
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Tagged text to show the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The model's trimmed answer.
    Answer(String),
    /// Confirmation of a state change.
    Notice(String),
    /// The action was rejected before reaching the model.
    Warning(String),
    /// The completion request failed; already prefixed for display.
    Failed(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Self::Answer(text) | Self::Notice(text) | Self::Warning(text) | Self::Failed(text) => {
                text
            }
        }
    }

    pub fn is_answer(&self) -> bool {
        matches!(self, Self::Answer(_))
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// A credential together with the client handle built for it
struct Credential {
    token: String,
    client: Box<dyn CompletionClient>,
}

/// State of one interactive chat
///
/// Owns the optional credential (and its client handle), the optional
/// context blob and the transcript for as long as the chat lasts.
pub struct Session {
    id: Uuid,
    config: ChatConfig,
    factory: Box<dyn ClientFactory>,
    credential: Option<Credential>,
    context: Option<String>,
    transcript: Transcript,
}

impl Session {
    /// Create a new Session that connects clients through `factory`
    pub fn new(config: ChatConfig, factory: impl ClientFactory + 'static) -> Self {
        let id = Uuid::new_v4();
        info!(session = %id, model = %config.model, "Session created");

        Self {
            id,
            config,
            factory: Box::new(factory),
            credential: None,
            context: None,
            transcript: Transcript::new(),
        }
    }

    /// Create a Session backed by the OpenAI-compatible endpoint in `config`
    pub fn openai(config: ChatConfig) -> Self {
        let factory = OpenAiClientFactory::new(config.base_url.clone());
        Self::new(config, factory)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Last four characters of the credential, for display
    pub fn credential_hint(&self) -> Option<String> {
        self.credential.as_ref().map(|credential| {
            let chars: Vec<char> = credential.token.chars().collect();
            let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
            format!("...{}", tail)
        })
    }

    /// The active context blob, if any
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Append a turn to the transcript
    pub fn record(&mut self, turn: Turn) {
        self.transcript.push(turn);
    }

    /// Store `token` and rebuild the client handle for it
    ///
    /// The token is not checked against the API; a bad one only shows up on
    /// the next [`Session::ask`]. A blank token is rejected and the previous
    /// credential is kept.
    pub fn set_credential(&mut self, token: &str) -> Reply {
        let lang = self.config.lang;
        if token.trim().is_empty() {
            return Reply::Warning(get_message("api_key_invalid", lang).to_string());
        }

        let client = self.factory.connect(token);
        let replaced = self.credential.replace(Credential {
            token: token.to_string(),
            client,
        });
        info!(session = %self.id, replaced = replaced.is_some(), "API key updated");

        Reply::Notice(get_message("api_key_updated", lang).to_string())
    }

    /// Messages sent for `user_text`: the context prompt (when a context is
    /// loaded) followed by the unmodified user text
    pub fn request_messages(&self, user_text: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2);
        if let Some(context) = &self.context {
            messages.push(ChatMessage::system(context_prompt(context, self.config.lang)));
        }
        messages.push(ChatMessage::user(user_text));
        messages
    }

    /// Send `user_text` to the model and return its trimmed answer
    ///
    /// Never fails: a missing credential or blank text yields a warning
    /// without contacting the API, and any API failure yields
    /// [`Reply::Failed`]. The transcript is not touched; see
    /// [`Session::exchange`].
    pub async fn ask(&self, user_text: &str) -> Reply {
        let lang = self.config.lang;

        let Some(credential) = &self.credential else {
            return Reply::Warning(get_message("api_key_missing", lang).to_string());
        };
        if user_text.trim().is_empty() {
            return Reply::Warning(get_message("empty_input", lang).to_string());
        }

        let messages = self.request_messages(user_text);
        info!(
            session = %self.id,
            with_context = self.context.is_some(),
            "Requesting completion from {}",
            self.config.model
        );

        match credential.client.complete(&self.config.model, &messages).await {
            Ok(answer) => Reply::Answer(answer.trim().to_string()),
            Err(e) => {
                warn!(session = %self.id, "Completion failed: {}", e);
                Reply::Failed(format!("{}: {}", get_message("error", lang), e))
            }
        }
    }

    /// Record the user turn, ask, then record the assistant turn
    ///
    /// Blank text is rejected up front and leaves the transcript unchanged.
    pub async fn exchange(&mut self, user_text: &str) -> Reply {
        if user_text.trim().is_empty() {
            return Reply::Warning(get_message("empty_send", self.config.lang).to_string());
        }

        self.record(Turn::user(user_text));
        let reply = self.ask(user_text).await;
        self.record(Turn::assistant(reply.text()));
        reply
    }

    fn loader(&self) -> ContextLoader {
        ContextLoader::new(self.config.lang)
    }

    /// Replace the context with in-memory sources
    pub fn load_sources<I>(&mut self, sources: I) -> LoadStatus
    where
        I: IntoIterator<Item = SourceFile>,
    {
        let loader = self.loader();
        loader.load(&mut self.context, sources)
    }

    /// Replace the context with the given files
    pub fn load_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> LoadStatus {
        let loader = self.loader();
        loader.load_paths(&mut self.context, paths)
    }

    /// Rescan the context directory
    ///
    /// Returns `None` when the session takes uploads instead.
    pub fn reload_context(&mut self) -> Option<LoadStatus> {
        let loader = self.loader();
        let dir = self.config.context_mode.directory()?;
        Some(loader.load_directory(&mut self.context, dir))
    }

    /// Drop the context blob
    pub fn clear_context(&mut self) -> Reply {
        self.context = None;
        info!(session = %self.id, "Context cleared");
        Reply::Notice(get_message("context_cleared", self.config.lang).to_string())
    }

    /// Empty the transcript and reset the context for the session's mode
    ///
    /// Directory sessions rescan their directory and return the load status;
    /// upload sessions drop the context.
    pub fn clear(&mut self) -> Option<LoadStatus> {
        self.transcript.clear();
        info!(session = %self.id, "Transcript cleared");

        if matches!(self.config.context_mode, ContextMode::Directory(_)) {
            self.reload_context()
        } else {
            self.context = None;
            None
        }
    }
}
