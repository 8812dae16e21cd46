//! `admitbot chat` — Interactive or single-message chat mode.

use admitbot_assistant::{ChatReply, Reply};
use admitbot_core::upload::FileRef;
use std::io::Write;
use std::path::Path;
use tokio::io::{self, AsyncBufReadExt, BufReader};

/// One line of REPL input.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplInput {
    Skip,
    Exit,
    Upload(String),
    Message(String),
}

pub fn parse_line(line: &str) -> ReplInput {
    let line = line.trim();
    if line.is_empty() {
        return ReplInput::Skip;
    }
    if matches!(line, "exit" | "quit" | "/exit" | "/quit" | ":q") {
        return ReplInput::Exit;
    }
    if line == "/upload" {
        return ReplInput::Upload(String::new());
    }
    if let Some(name) = line.strip_prefix("/upload ") {
        return ReplInput::Upload(name.trim().to_string());
    }
    ReplInput::Message(line.to_string())
}

pub async fn run(
    message: Option<String>,
    user: String,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (config, assistant) = super::build_assistant()?;

    if let Some(msg) = message {
        // Single message mode
        let reply = assistant.respond(&user, &msg).await;
        let envelope = ChatReply {
            response: reply.text,
            status: reply.status,
        };
        println!("{}", render(&envelope, json)?);

        // The process would exit before a late turn finishes; wait for it.
        if let Some(late) = reply.late {
            let envelope = late.await.map_err(|e| format!("Late reply failed: {e}"))?;
            println!("{}", render(&envelope, json)?);
        }
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║     AdmitBot — University Admission Assistant ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Knowledge base: {}", config.knowledge_base_path.display());
    println!("  User:           {user}");
    println!("  Timeout:        {} ms", config.assistant.response_timeout_ms);
    println!();
    println!("  Ask about deadlines, documents, fees or your application status.");
    println!("  Type '/upload <file>' to upload a document.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let mut lines = BufReader::new(io::stdin()).lines();

    prompt()?;
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break, // EOF (Ctrl+D)
            Err(e) => {
                eprintln!("  [Input Error] {e}");
                break;
            }
        };

        match parse_line(&line) {
            ReplInput::Skip => {}
            ReplInput::Exit => break,
            ReplInput::Upload(name) => {
                let file = file_ref(&name);
                let text = assistant.handle_file_upload(&user, &file).await;
                print_assistant(&text);
            }
            ReplInput::Message(msg) => {
                eprint!("  ...");
                let reply = assistant.respond(&user, &msg).await;
                eprint!("\r     \r");
                print_assistant(&reply.text);
                follow_up(reply);
            }
        }

        prompt()?;
    }

    println!();
    println!("  Goodbye!");
    println!();

    Ok(())
}

/// Describe a file for the acknowledger: its base name, plus its size when it
/// exists locally.
pub fn file_ref(path: &str) -> FileRef {
    let name = Path::new(path)
        .file_name()
        .map_or_else(|| path.to_string(), |n| n.to_string_lossy().into_owned());
    let file = FileRef::new(name);
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => file.with_size(meta.len()),
        _ => file,
    }
}

/// Single-message output: the JSON envelope, or just the reply text.
fn render(reply: &ChatReply, json: bool) -> serde_json::Result<String> {
    if json {
        serde_json::to_string(reply)
    } else {
        Ok(reply.response.clone())
    }
}

fn print_assistant(text: &str) {
    println!();
    for line in text.lines() {
        println!("  Assistant > {line}");
    }
    println!();
}

/// Print the real answer once a placeholder's turn completes.
fn follow_up(reply: Reply) {
    let Some(late) = reply.late else {
        return;
    };
    tokio::spawn(async move {
        if let Ok(late) = late.await {
            println!();
            print_assistant(&late.response);
            print!("  You > ");
            let _ = std::io::stdout().flush();
        }
    });
}

fn prompt() -> std::io::Result<()> {
    print!("  You > ");
    std::io::stdout().flush()
}
