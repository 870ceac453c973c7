//! docchat - interactive terminal chat grounded on local files
//!
//! Usage:
//!     docchat [OPTIONS]
//!
//! Environment Variables:
//!     OPENAI_API_KEY: API key used until `/key` replaces it
//!     DOC_CHAT_BASE_URL: Model API base URL (default: https://api.openai.com/v1)
//!     DOC_CHAT_MODEL: Model name (default: o4-mini-2025-04-16)
//!     DOC_CHAT_LANG: UI language, pt or en (default: pt)
//!     DOC_CHAT_CONTEXT_DIR: Directory scanned for .txt/.pdf context files

use anyhow::Result;
use clap::Parser;
use doc_chat::{ChatConfig, ContextMode, Language, Session, DEFAULT_BASE_URL, DEFAULT_MODEL};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Chat with a hosted model about your own .txt and .pdf files
#[derive(Parser, Debug)]
#[command(name = "docchat")]
#[command(about = "Chat with a hosted model about your own .txt and .pdf files")]
#[command(after_help = r#"Examples:
    # Start chatting, then load files with /load
    docchat

    # Use every .txt/.pdf file in ./docs as context
    docchat --context-dir docs

    # Talk to a local OpenAI-compatible server in English
    docchat --base-url http://localhost:8000/v1 --model llama3 --lang en
"#)]
struct Cli {
    /// API key for the model endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model API base URL
    #[arg(long, env = "DOC_CHAT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Model name
    #[arg(long, env = "DOC_CHAT_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Language for messages (pt or en)
    #[arg(long, env = "DOC_CHAT_LANG", default_value = "pt", value_parser = ["pt", "en"])]
    lang: String,

    /// Scan this directory for context files instead of waiting for /load
    #[arg(long, env = "DOC_CHAT_CONTEXT_DIR")]
    context_dir: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// A line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Message(String),
    Key(String),
    Load(Vec<PathBuf>),
    Reload,
    Context,
    Forget,
    Clear,
    History,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let trimmed = line.trim();

        if trimmed.eq_ignore_ascii_case("quit")
            || trimmed.eq_ignore_ascii_case("exit")
            || trimmed.eq_ignore_ascii_case("q")
        {
            return Self::Quit;
        }

        let Some(rest) = trimmed.strip_prefix('/') else {
            return Self::Message(line.trim_end_matches(&['\r', '\n'][..]).to_string());
        };

        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (rest, ""),
        };

        match name.to_lowercase().as_str() {
            "key" => Self::Key(args.to_string()),
            "load" => Self::Load(split_paths(args)),
            "reload" => Self::Reload,
            "context" => Self::Context,
            "forget" => Self::Forget,
            "clear" => Self::Clear,
            "history" => Self::History,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(name.to_string()),
        }
    }
}

/// Split `/load` arguments into paths
///
/// An argument string naming an existing file is one path even if it
/// contains spaces; otherwise arguments are whitespace-separated and
/// double quotes group a path with spaces.
fn split_paths(args: &str) -> Vec<PathBuf> {
    if !args.is_empty() && Path::new(args).is_file() {
        return vec![PathBuf::from(args)];
    }

    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in args.chars() {
        match c {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    paths.push(PathBuf::from(std::mem::take(&mut current)));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        paths.push(PathBuf::from(current));
    }

    paths
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Application header lines
fn header_lines(config: &ChatConfig, session: &Session) -> Vec<String> {
    let rule = "=".repeat(50);
    let mut lines = vec![
        rule.clone(),
        "docchat - chat grounded on your files".to_string(),
        rule.clone(),
        format!("Model: {}", config.model),
        format!("Base URL: {}", config.base_url),
        format!("Language: {}", config.lang.as_str()),
    ];
    match &config.context_mode {
        ContextMode::Uploads => lines.push("Context: /load <files>".to_string()),
        ContextMode::Directory(dir) => lines.push(format!("Context Dir: {}", dir.display())),
    }
    if let Some(hint) = session.credential_hint() {
        lines.push(format!("API Key: {}", hint));
    }
    lines.push(rule);
    lines
}

/// Print application header
fn print_header(config: &ChatConfig, session: &Session) {
    for line in header_lines(config, session) {
        println!("{}", line);
    }
}

fn print_help() {
    println!("Commands:");
    println!("  <text>              Send a message");
    println!("  /key <api-key>      Set the API key");
    println!("  /load <file>...     Use these .txt/.pdf files as context");
    println!("  /reload             Rescan the context directory");
    println!("  /context            Show the active context size");
    println!("  /forget             Drop the context");
    println!("  /clear              Clear the conversation");
    println!("  /history            Show the conversation");
    println!("  /quit               Exit");
}

/// Handle one command; returns false when the loop should stop
async fn handle_command(session: &mut Session, command: Command) -> bool {
    let lang = session.config().lang;

    match command {
        Command::Quit => return false,
        Command::Message(text) => {
            let reply = session.exchange(&text).await;
            if reply.is_answer() {
                println!("\n{}: {}\n", doc_chat::get_message("assistant", lang), reply);
            } else {
                println!("{}", reply);
            }
        }
        Command::Key(token) => println!("{}", session.set_credential(&token)),
        Command::Load(paths) if paths.is_empty() => println!("Usage: /load <file>..."),
        Command::Load(paths) => {
            println!("{}", session.load_files(paths.as_slice()).render(lang))
        }
        Command::Reload => match session.reload_context() {
            Some(status) => println!("{}", status.render(lang)),
            None => println!("No context directory configured (use --context-dir)."),
        },
        Command::Context => match session.context() {
            Some(context) => println!("Context active: {} chars", context.chars().count()),
            None => println!("No context loaded."),
        },
        Command::Forget => println!("{}", session.clear_context()),
        Command::Clear => {
            if let Some(status) = session.clear() {
                println!("{}", status.render(lang));
            }
            println!("Conversation cleared.");
        }
        Command::History => {
            if session.transcript().is_empty() {
                println!("(empty)");
            } else {
                println!("{}", session.transcript().render(lang));
            }
        }
        Command::Help => print_help(),
        Command::Unknown(name) => println!("Unknown command: /{} (try /help)", name),
    }

    true
}

/// Run interactive mode
async fn run_interactive_mode(session: &mut Session) -> Result<()> {
    println!("\nType /help for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(_) => {
                println!("\n\nInterrupted. Goodbye!");
                break;
            }
        }

        if !handle_command(session, Command::parse(&input)).await {
            println!("Goodbye!");
            break;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let mut config = ChatConfig::new()
        .with_base_url(&args.base_url)
        .with_model(&args.model)
        .with_lang(Language::from_str(&args.lang));
    if let Some(dir) = &args.context_dir {
        config = config.with_context_dir(dir);
    }

    let mut session = Session::openai(config.clone());
    info!(session = %session.id(), "Starting docchat");

    if let Some(api_key) = &args.api_key {
        session.set_credential(api_key);
    }

    print_header(&config, &session);

    if let Some(status) = session.reload_context() {
        println!("{}", status.render(config.lang));
    }

    run_interactive_mode(&mut session).await
}
