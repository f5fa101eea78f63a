use crate::config::VenvConfigManager;
use crate::core::error::Result;
use crate::core::{absolutize, Settings};
use crate::shell::{rc, EphemeralGuard, SessionOptions, ShellSession};
use crate::venv::{resolve_target, VenvBuilder, VenvLayout};
use colored::Colorize;
use std::path::PathBuf;

pub async fn execute(
    name: String,
    command: Vec<String>,
    python: Option<String>,
    working: Option<PathBuf>,
    ignore_working: bool,
    ephemeral: bool,
    force: bool,
) -> Result<()> {
    let settings = Settings::from_env();
    let (name, path) = resolve_target(&name, &settings)?;
    let layout = VenvLayout::new(path.clone());
    let manager = VenvConfigManager::new()?;

    let working = match working {
        Some(raw) => {
            let cwd = std::env::current_dir()?;
            Some(absolutize(&raw.to_string_lossy(), &settings.home, &cwd))
        }
        None => None,
    };

    let created = if !layout.is_valid() {
        let builder = VenvBuilder {
            python: python.clone(),
            prompt: Some(format!("({})", name)),
            ..VenvBuilder::default()
        };
        builder.create(&layout).await?;
        println!(
            "{} Created virtual environment {} under: {}",
            "✓".green().bold(),
            name.yellow(),
            path.display().to_string().green()
        );
        true
    } else {
        false
    };

    let mut config = manager.load_or_create(&name, &path, &settings).await?;

    // An explicit path argument takes precedence over a stale recorded one
    if config.venv.path != path {
        config.venv.path = path.clone();
        manager.save(&config).await?;
    }

    if let Some(working) = &working {
        if config.venv.working_path.as_deref() != Some(working.as_path()) {
            config.venv.working_path = Some(working.clone());
            manager.save(&config).await?;
        }
        if created {
            rc::write_default_rc(&path, working).await?;
        }
    }

    if created && config.venv.interpreter.is_none() && layout.python_path().exists() {
        config.venv.interpreter = Some(layout.python_path());
        manager.save(&config).await?;
    }

    let guard = if ephemeral && (created || force) {
        Some(EphemeralGuard::new(path.clone(), manager.config_path(&name)))
    } else {
        None
    };

    if ephemeral && guard.is_none() {
        println!();
        println!(
            "{} Ephemeral option ignored: environment {} existed previously.",
            "⚠".yellow().bold(),
            name.yellow()
        );
        println!(
            "  To remove it, run: {}",
            format!("vsh remove {}", name).cyan()
        );
        println!();
    }

    if command.is_empty() {
        println!("{} Entering {}", "→".blue().bold(), name.cyan());
        println!("  Type {} to exit", "exit".yellow());
        println!();
    }

    let session = ShellSession::new(&config, &settings);
    let opts = SessionOptions {
        command,
        working,
        ignore_working,
    };
    let result = session.run(&opts).await;

    if let Some(guard) = guard {
        println!(
            "{} Removing ephemeral environment {}",
            "⚙".blue().bold(),
            name.yellow()
        );
        drop(guard);
    }

    let exit_code = result?;
    std::process::exit(exit_code);
}
