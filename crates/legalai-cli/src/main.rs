use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::{Context as AnyhowContext, Result};
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Editor;
use rustyline::{Context, Helper};
use tracing_subscriber::EnvFilter;

use legalai_application::{ChatOptions, ChatService};
use legalai_core::{Conversation, ConversationStore};
use legalai_infrastructure::JsonFileStorage;
use legalai_interaction::{
    DraftRequest, QueryServiceClient, ServiceConfig, DRAFT_TYPES,
};
use legalai_types::{Language, Message, MessageRole};

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: vec![
                "/new".to_string(),
                "/list".to_string(),
                "/switch".to_string(),
                "/delete".to_string(),
                "/lang".to_string(),
                "/domain".to_string(),
                "/arguments".to_string(),
                "/analysis".to_string(),
                "/draft".to_string(),
                "/help".to_string(),
            ],
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Resolves a user-supplied conversation reference (1-based list index or
/// raw id) against the current conversation list.
fn resolve_conversation<'a>(
    conversations: &'a [Conversation],
    reference: &str,
) -> Option<&'a Conversation> {
    if let Ok(index) = reference.parse::<usize>() {
        if index >= 1 {
            if let Some(conversation) = conversations.get(index - 1) {
                return Some(conversation);
            }
        }
    }
    conversations.iter().find(|c| c.id == reference)
}

fn print_assistant_message(message: &Message) {
    for line in message.content.lines() {
        println!("{}", line.bright_blue());
    }

    if let Some(citations) = &message.citations {
        println!("{}", "Citations:".bright_black());
        for citation in citations {
            let section = citation.section.as_deref().unwrap_or("-");
            println!("{}", format!("  {} ({})", citation.source, section).bright_black());
        }
    }
    if let Some(judgments) = &message.judgments {
        println!("{}", "Related judgments:".bright_black());
        for judgment in judgments {
            println!("{}", format!("  {}", judgment.title).bright_black());
        }
    }
    if let Some(arguments) = &message.arguments {
        println!("{}", "Arguments for:".bright_yellow());
        for point in &arguments.for_points {
            println!("{}", format!("  + {}", point).yellow());
        }
        println!("{}", "Arguments against:".bright_yellow());
        for point in &arguments.against_points {
            println!("{}", format!("  - {}", point).yellow());
        }
    }
    if let Some(analysis) = &message.neutral_analysis {
        println!("{}", "Factors:".bright_magenta());
        for factor in &analysis.factors {
            println!("{}", format!("  * {}", factor).magenta());
        }
        println!("{}", "Interpretations:".bright_magenta());
        for interpretation in &analysis.interpretations {
            println!("{}", format!("  * {}", interpretation).magenta());
        }
    }
    println!();
}

fn print_transcript(messages: &[Message]) {
    for message in messages {
        match message.role {
            MessageRole::User => println!("{}", format!("> {}", message.content).green()),
            MessageRole::Assistant => print_assistant_message(message),
        }
    }
}

fn print_help() {
    println!("{}", "Commands:".bright_black());
    println!("{}", "  /new                 start a fresh conversation".bright_black());
    println!("{}", "  /list                list saved conversations".bright_black());
    println!("{}", "  /switch <n|id>       switch to a saved conversation".bright_black());
    println!("{}", "  /delete <n|id>       delete a saved conversation".bright_black());
    println!("{}", "  /lang <en|hi>        set answer language".bright_black());
    println!("{}", "  /domain <name>       set legal domain filter (or 'all')".bright_black());
    println!("{}", "  /arguments <on|off>  toggle balanced arguments".bright_black());
    println!("{}", "  /analysis <on|off>   toggle neutral analysis".bright_black());
    println!("{}", "  /draft <type> <details...>  generate a document draft".bright_black());
    println!("{}", "  quit                 exit".bright_black());
}

async fn handle_command(service: &ChatService, options: &mut ChatOptions, input: &str) {
    let mut parts = input.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default();
    let rest = parts.next().unwrap_or("").trim();

    match command {
        "/new" => {
            service.new_session().await;
            println!("{}", "Started a new conversation.".bright_green());
        }
        "/list" => {
            let conversations = service.conversations().await;
            if conversations.is_empty() {
                println!("{}", "No saved conversations.".bright_black());
                return;
            }
            let active = service.active_conversation_id().await;
            for (index, conversation) in conversations.iter().enumerate() {
                let marker = if active.as_deref() == Some(conversation.id.as_str()) {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{}",
                    format!(
                        "{marker} {}. {} ({})",
                        index + 1,
                        conversation.title,
                        conversation.timestamp
                    )
                    .bright_black()
                );
            }
        }
        "/switch" => {
            let conversations = service.conversations().await;
            match resolve_conversation(&conversations, rest) {
                Some(conversation) => {
                    let id = conversation.id.clone();
                    service.switch_to(&id).await;
                    println!("{}", format!("Switched to: {}", conversation.title).bright_green());
                    print_transcript(&service.session_messages().await);
                }
                None => println!("{}", format!("No conversation '{rest}'").red()),
            }
        }
        "/delete" => {
            let conversations = service.conversations().await;
            match resolve_conversation(&conversations, rest) {
                Some(conversation) => {
                    let id = conversation.id.clone();
                    let title = conversation.title.clone();
                    service.delete_conversation(&id).await;
                    println!("{}", format!("Deleted: {title}").bright_green());
                }
                None => println!("{}", format!("No conversation '{rest}'").red()),
            }
        }
        "/lang" => match rest {
            "en" => {
                options.language = Language::English;
                println!("{}", "Answer language: English".bright_green());
            }
            "hi" => {
                options.language = Language::Hindi;
                println!("{}", "Answer language: Hindi".bright_green());
            }
            _ => println!("{}", "Usage: /lang <en|hi>".red()),
        },
        "/domain" => {
            if rest.is_empty() {
                println!("{}", format!("Current domain: {}", options.domain).bright_black());
            } else {
                options.domain = rest.to_string();
                println!("{}", format!("Domain filter: {}", options.domain).bright_green());
            }
        }
        "/arguments" => match rest {
            "on" => {
                options.arguments_mode = true;
                println!("{}", "Balanced arguments: on".bright_green());
            }
            "off" => {
                options.arguments_mode = false;
                println!("{}", "Balanced arguments: off".bright_green());
            }
            _ => println!("{}", "Usage: /arguments <on|off>".red()),
        },
        "/analysis" => match rest {
            "on" => {
                options.analysis_mode = true;
                println!("{}", "Neutral analysis: on".bright_green());
            }
            "off" => {
                options.analysis_mode = false;
                println!("{}", "Neutral analysis: off".bright_green());
            }
            _ => println!("{}", "Usage: /analysis <on|off>".red()),
        },
        "/draft" => {
            let mut args = rest.splitn(2, char::is_whitespace);
            let draft_type = args.next().unwrap_or_default();
            let details = args.next().unwrap_or("").trim();
            if draft_type.is_empty() || details.is_empty() {
                println!("{}", "Usage: /draft <type> <details...>".red());
                println!("{}", format!("Types: {}", DRAFT_TYPES.join(", ")).bright_black());
                return;
            }
            let request =
                DraftRequest::new(draft_type, details).with_language(options.language);
            match service.draft(&request).await {
                Ok(response) => {
                    for line in response.draft.lines() {
                        println!("{}", line.bright_blue());
                    }
                    println!();
                }
                Err(e) => println!("{}", format!("Draft failed: {e}").red()),
            }
        }
        "/help" => print_help(),
        _ => println!("{}", "Unknown command. Try /help".bright_black()),
    }
}

/// The main entry point for the LegalAI terminal chat.
///
/// Sets up a rustyline-based REPL that:
/// 1. Loads the persisted conversation snapshot into a `ConversationStore`
/// 2. Connects a `QueryServiceClient` from the per-user configuration
/// 3. Provides command completion for the slash commands
/// 4. Sends chat input through `ChatService` and renders the answer
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // ===== Backend Initialization =====
    let config = ServiceConfig::resolve();
    let client =
        QueryServiceClient::new(&config).context("Failed to build query service client")?;
    let storage = Arc::new(
        JsonFileStorage::default_location().context("Failed to open conversation storage")?,
    );
    let store = ConversationStore::load(storage);
    let service = ChatService::new(store, Arc::new(client));
    let mut options = ChatOptions::default();

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== LegalAI ===".bright_magenta().bold());
    println!(
        "{}",
        format!("Backend: {}", config.base_url).bright_black()
    );
    if service.health().await {
        println!("{}", "Backend is reachable.".bright_green());
    } else {
        println!(
            "{}",
            "Backend is not responding; queries will fall back.".yellow()
        );
    }
    println!(
        "{}",
        "Ask a legal question, or type /help for commands, 'quit' to exit.".bright_black()
    );
    println!();

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                if trimmed.starts_with('/') {
                    handle_command(&service, &mut options, trimmed).await;
                    continue;
                }

                if let Some(answer) = service.send_message(trimmed, &options).await {
                    print_assistant_message(&answer);
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
