//! `admitbot status` — Show configuration and knowledge base summary.

use admitbot_config::AppConfig;
use admitbot_core::knowledge::KnowledgeBase;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("AdmitBot Status");
    println!("===============");
    println!("  Config dir:       {}", AppConfig::config_dir().display());
    println!("  Knowledge base:   {}", config.knowledge_base_path.display());
    println!("  Response timeout: {} ms", config.assistant.response_timeout_ms);
    println!("  Greeting window:  {} messages", config.assistant.greeting_window);
    println!("  Upload types:     {}", config.upload.allowed_extensions.join(", "));
    println!(
        "  Interaction log:  {}",
        if config.logging.enabled {
            config.logging.interaction_log.display().to_string()
        } else {
            "disabled".into()
        }
    );

    match KnowledgeBase::try_load(&config.knowledge_base_path) {
        Ok(kb) => {
            println!("\n  ✅ Knowledge base loaded");
            print_summary(&kb);
        }
        Err(e) => {
            println!("\n  ⚠️  {e}");
            println!("     Built-in defaults will be used:");
            print_summary(&KnowledgeBase::default());
        }
    }

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `admitbot onboard` first");
    }

    Ok(())
}

fn print_summary(kb: &KnowledgeBase) {
    println!("     Deadlines:  {}", kb.deadlines.len());
    println!("     Documents:  {}", kb.documents.len());
    println!("     Fees:       {}", kb.fees.len());
    println!("     FAQ topics: {}", kb.faqs.len());
}
