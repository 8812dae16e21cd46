//! `admitbot upload` — Simulated document upload.

use super::chat::file_ref;

pub async fn run(file_name: String, user: String) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, assistant) = super::build_assistant()?;

    let file = file_ref(&file_name);
    let reply = assistant.handle_file_upload(&user, &file).await;
    println!("{reply}");

    Ok(())
}
