use crate::config::VenvConfigManager;
use crate::core::error::Result;
use crate::core::Settings;
use crate::venv::{remove_environment, resolve_target, VenvLayout};
use colored::Colorize;

pub async fn execute(name: String, force: bool) -> Result<()> {
    let settings = Settings::from_env();
    let (name, path) = resolve_target(&name, &settings)?;
    let layout = VenvLayout::new(path.clone());

    remove_environment(&layout, force).await?;

    let manager = VenvConfigManager::new()?;
    manager.remove(&name).await?;

    println!(
        "{}: {}",
        "Removed".cyan(),
        path.display().to_string().green()
    );

    Ok(())
}
