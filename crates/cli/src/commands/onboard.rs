//! `admitbot onboard` — First-time setup.

use admitbot_config::AppConfig;
use admitbot_core::knowledge::KnowledgeBase;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("AdmitBot — First-Time Setup");
    println!("===========================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("⚠️  Config already exists at: {}", config_path.display());
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created config.toml at: {}", config_path.display());
    }

    // Respect an existing config's knowledge base location
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let kb_path = &config.knowledge_base_path;
    if kb_path.exists() {
        println!("⚠️  Knowledge base already exists at: {}", kb_path.display());
    } else {
        if let Some(parent) = kb_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(kb_path, KnowledgeBase::default_json())?;
        println!("✅ Created knowledge base at: {}", kb_path.display());
    }

    println!("\n📝 Next steps:");
    println!("   1. Edit {} with your deadlines, documents and fees", kb_path.display());
    println!("   2. Run: admitbot chat");
    println!("\n🎉 Setup complete!\n");

    Ok(())
}
