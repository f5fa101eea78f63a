use crate::core::error::Result;
use crate::core::Settings;
use crate::venv::find_environments;
use colored::Colorize;
use std::path::PathBuf;
use std::time::Instant;

pub async fn execute(path: Option<PathBuf>) -> Result<()> {
    let settings = Settings::from_env();
    let root = path.unwrap_or_else(|| settings.workon_home.clone());

    let started = Instant::now();
    let environments = find_environments(&root);

    if environments.is_empty() {
        println!(
            "{} {}",
            "No virtual environments found under:".yellow(),
            root.display()
        );
        println!("Run {} to create one", "vsh enter <name>".cyan());
        return Ok(());
    }

    for (name, path) in &environments {
        println!(
            "Found {} under: {}",
            name.yellow(),
            path.display().to_string().yellow()
        );
    }

    println!();
    println!("Found {} environments", environments.len());
    tracing::debug!("Search took {:?}", started.elapsed());

    Ok(())
}
