use crate::config::VenvConfigManager;
use crate::core::error::Result;
use crate::core::{ProcessExecutor, Settings};
use crate::venv::find_environments;
use colored::Colorize;

pub async fn execute() -> Result<()> {
    println!("{}", "Running environment checks...".bold());
    println!();

    let mut all_ok = true;
    let settings = Settings::from_env();

    // Check uv
    print!("Checking uv... ");
    if ProcessExecutor::check_command_exists("uv") {
        let version = ProcessExecutor::execute_with_output("uv", &["--version"]).await;
        match version {
            Ok(v) => println!("{} ({})", "✓".green(), v.trim().yellow()),
            Err(_) => println!("{}", "✓".green()),
        }
    } else {
        println!("{}", "✗ Not found".red());
        println!("  Install from: https://github.com/astral-sh/uv");
        all_ok = false;
    }

    // Check shell
    print!("Checking shell... ");
    if settings.shell.exists() {
        println!(
            "{} ({})",
            "✓".green(),
            settings.shell.display().to_string().yellow()
        );
    } else {
        println!("{}", "✗ Not found".red());
        println!("  Set {} to a valid shell", "SHELL".cyan());
        all_ok = false;
    }

    // Check environments home
    print!("Checking environments home... ");
    if settings.workon_home.is_dir() {
        let count = find_environments(&settings.workon_home).len();
        println!(
            "{} ({}, {} environments)",
            "✓".green(),
            settings.workon_home.display().to_string().yellow(),
            count
        );
    } else {
        println!("{}", "○ Not created yet".yellow());
        println!("  Created on first {} run", "vsh enter <name>".cyan());
    }

    // Check configuration directory
    print!("Checking configuration directory... ");
    match VenvConfigManager::new() {
        Ok(manager) => println!(
            "{} ({})",
            "✓".green(),
            manager.config_dir().display().to_string().yellow()
        ),
        Err(e) => {
            println!("{} {}", "✗".red(), e);
            all_ok = false;
        }
    }

    // Check repository detection
    print!("Checking repository detection... ");
    if ProcessExecutor::check_command_exists("git") {
        println!("{} (git)", "✓".green());
    } else if ProcessExecutor::check_command_exists("hg") {
        println!("{} (hg)", "✓".green());
    } else {
        println!("{}", "○ No git or hg on PATH".yellow());
        println!("  Startup folder detection from repositories is disabled");
    }

    println!();
    if all_ok {
        println!("{}", "All checks passed".green().bold());
    } else {
        println!("{}", "Some checks failed".yellow().bold());
    }

    Ok(())
}
