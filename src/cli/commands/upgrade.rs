use crate::config::VenvConfigManager;
use crate::core::error::{Result, VshError};
use crate::core::Settings;
use crate::venv::{resolve_target, VenvBuilder, VenvLayout};
use colored::Colorize;

pub async fn execute(name: String, python: Option<String>) -> Result<()> {
    let settings = Settings::from_env();
    let (name, path) = resolve_target(&name, &settings)?;
    let layout = VenvLayout::new(path.clone());

    if !layout.exists() {
        return Err(VshError::PathNotFound(path.display().to_string()));
    }

    let manager = VenvConfigManager::new()?;
    let mut config = manager.load_or_create(&name, &path, &settings).await?;

    println!(
        "{} Rebuilding {} with Python {}...",
        "⚙".blue().bold(),
        name.yellow(),
        python.as_deref().unwrap_or("default").cyan()
    );

    let builder = VenvBuilder {
        python,
        prompt: Some(format!("({})", name)),
        overwrite: true,
        ..VenvBuilder::default()
    };
    builder.create(&layout).await?;

    if layout.python_path().exists() {
        config.venv.interpreter = Some(layout.python_path());
    }
    config.venv.path = path.clone();
    manager.save(&config).await?;

    println!(
        "{} Rebuilt virtual environment {} under: {}",
        "✓".green().bold(),
        name.yellow(),
        path.display().to_string().green()
    );

    Ok(())
}
