use crate::config::VenvConfigManager;
use crate::core::error::Result;
use crate::core::{absolutize, Settings};
use crate::shell::rc;
use crate::venv::{resolve_target, VenvBuilder, VenvLayout};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

pub async fn execute(
    name: String,
    python: Option<String>,
    working: Option<PathBuf>,
    overwrite: bool,
    system_site_packages: bool,
    no_seed: bool,
) -> Result<()> {
    let settings = Settings::from_env();
    let (name, path) = resolve_target(&name, &settings)?;
    let layout = VenvLayout::new(path.clone());

    if layout.is_valid() && !overwrite {
        println!(
            "{} Environment {} already exists under: {}",
            "ℹ".yellow().bold(),
            name.yellow(),
            path.display()
        );
        return Ok(());
    }

    let working = match working {
        Some(raw) => {
            let cwd = std::env::current_dir()?;
            Some(absolutize(&raw.to_string_lossy(), &settings.home, &cwd))
        }
        None => None,
    };

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("Invalid progress bar template"),
    );
    pb.set_message(format!(
        "Creating virtual environment {} (Python {})...",
        name,
        python.as_deref().unwrap_or("default")
    ));
    pb.enable_steady_tick(Duration::from_millis(100));

    let builder = VenvBuilder {
        python,
        prompt: Some(format!("({})", name)),
        seed: !no_seed,
        system_site_packages,
        overwrite,
    };
    let build_result = builder.create(&layout).await;
    pb.finish_and_clear();
    build_result?;

    let manager = VenvConfigManager::new()?;
    let mut config = manager.load_or_create(&name, &path, &settings).await?;
    config.venv.path = path.clone();
    if let Some(working) = &working {
        config.venv.working_path = Some(working.clone());
    }
    if layout.python_path().exists() {
        config.venv.interpreter = Some(layout.python_path());
    }
    manager.save(&config).await?;

    if let Some(working) = &working {
        if let Some(rc_path) = rc::write_default_rc(&path, working).await? {
            println!(
                "Set default path to: {}",
                working.display().to_string().cyan()
            );
            println!(
                "To edit, update: {}",
                rc_path.display().to_string().yellow()
            );
        }
    }

    println!(
        "{} Created virtual environment {} under: {}",
        "✓".green().bold(),
        name.yellow(),
        path.display().to_string().green()
    );

    Ok(())
}
