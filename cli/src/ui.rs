use colored::Colorize;
use navigator::NavItem;
use releases::Release;
use std::io::{self, Write};

/// Print a status message with a spinner-like indicator
pub fn status_message(message: &str) {
    println!("{} {} ... ", "⏳".yellow(), message.bright_white());
    let _ = io::stdout().flush();
}

/// Print a success message
pub fn success_message(message: &str) {
    println!("{} {}", "✅".green(), message.green());
}

/// Print a warning message
pub fn warning_message(message: &str) {
    println!("{} {}", "⚠️ ".yellow(), message.yellow());
}

/// Print an error message
pub fn error_message(message: &str) {
    eprintln!("{} {}", "❌".red(), message.red().bold());
}

/// Print a section header to separate logical sections of output
pub fn section_header(title: &str) {
    println!("\n{}", format!("==== {} ====", title).cyan().bold());
}

/// Print a simple informational message
pub fn info_message(message: &str) {
    println!("{} {}", "ℹ️ ".blue(), message.blue());
}

/// Print one release summary line, highlighting the current version
pub fn release_line(release: &Release, current: bool) {
    let version = format!("v{}", release.version);
    let version = if current {
        version.green().bold()
    } else {
        version.bold()
    };
    println!(
        "{} {} {}",
        version,
        release.date.format("%Y-%m-%d").to_string().dimmed(),
        release.release_type.as_str().cyan()
    );
}

pub fn section_line(title: &str, count: usize) {
    println!("  {} ({count})", title.bright_white());
}

pub fn note_line(note: &str) {
    println!("    - {note}");
}

/// Print one navigation control, indented by depth
pub fn nav_item_line(item: &NavItem) {
    let indent = "  ".repeat(usize::from(item.depth));
    let label = if item.depth == 0 {
        item.label.bold()
    } else {
        item.label.normal()
    };
    println!("{indent}{label} {}", format!("#{}", item.anchor).dimmed());
}
