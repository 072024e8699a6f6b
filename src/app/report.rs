//! Console presentation for the server and the asset helper.
//!
//! Operations return plain data; everything here turns that data into the
//! text the binaries print.

use crate::config::ServerConfig;
use crate::core::asset_organizer::{MoveStatus, OrganizeOutcome};
use crate::core::asset_status::StatusOutcome;
use crate::core::asset_validator::ValidationOutcome;
use crate::core::browser::BrowserOpenResult;
use crate::core::file_check::FileChecklist;
use crate::core::port_selector::{PortSelection, PortSource};
use crate::core::server::{RequestCategory, RequestLogEntry};
use colored::*;
use std::fmt::Write;
use std::path::Path;

const RULE_WIDE: usize = 60;

/// 1234567 -> "1,234,567"
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn render_file_checklist(checklist: &FileChecklist) -> String {
    let mut out = String::from("📁 File Status Check:\n");
    for entry in &checklist.entries {
        match entry.size {
            Some(size) => {
                let _ = writeln!(
                    out,
                    "   ✅ {:<20} ({} bytes)",
                    entry.path,
                    format_thousands(size)
                );
            }
            None => {
                let _ = writeln!(out, "   ❌ {:<20} (missing)", entry.path);
            }
        }
    }
    out
}

pub fn render_port_selection(selection: &PortSelection, preferred: u16) -> Option<String> {
    match selection.source {
        PortSource::Preferred => None,
        PortSource::Fallback(_) => Some(format!(
            "⚠️  Port {} is busy, using port {} instead",
            preferred, selection.port
        )),
        PortSource::Ephemeral => Some(format!(
            "⚠️  All preferred ports are busy, using OS-assigned port {}",
            selection.port
        )),
    }
}

pub fn render_startup_banner(config: &ServerConfig, port: u16, project_dir: &Path) -> String {
    let rule = "=".repeat(RULE_WIDE);
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", rule);
    let _ = writeln!(out, "🚀 {} 🌍", "Earth Saver Development Server".green());
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "📁 Project Directory: {}",
        project_dir.display().to_string().blue()
    );
    let _ = writeln!(out, "🌐 Server URL: {}", config.server_url(port).green());
    let _ = writeln!(out, "🎮 Game URL: {}", config.game_url(port).green());
    let _ = writeln!(out, "{}", rule);

    if !config.pages.is_empty() {
        let _ = writeln!(out, "📋 Available Pages:");
        for page in &config.pages {
            let _ = writeln!(
                out,
                "   • {} - {}",
                format!("{:<17}", page.path).yellow(),
                page.description
            );
        }
        let _ = writeln!(out, "{}", rule);
    }

    let _ = writeln!(out, "💡 Development Tips:");
    let _ = writeln!(out, "   • Press {} to stop the server", "Ctrl+C".red());
    let _ = writeln!(out, "   • Refresh browser to see code changes");
    let _ = writeln!(out, "   • Check browser console for JavaScript errors");
    let _ = writeln!(out, "   • Use browser dev tools for debugging");
    let _ = write!(out, "{}", rule);
    out
}

pub fn render_request(entry: &RequestLogEntry) -> String {
    let text = format!("[{}] {}", entry.timestamp, entry.line);
    match entry.category {
        RequestCategory::Get => text.green().to_string(),
        RequestCategory::Post => text.blue().to_string(),
        RequestCategory::NotFound => text.red().to_string(),
        RequestCategory::Other => text,
    }
}

pub fn render_browser_result(url: &str, result: &BrowserOpenResult) -> String {
    let mut out = format!("\n🌍 Opening Earth Saver in your browser...\n   URL: {}", url);
    if let BrowserOpenResult::Failed(reason) = result {
        let _ = write!(
            out,
            "\n   ⚠️  Could not auto-open browser: {}\n   📖 Please manually open: {}",
            reason, url
        );
    }
    out
}

pub fn render_validation(outcome: &ValidationOutcome) -> String {
    let mut out = String::new();
    match outcome {
        ValidationOutcome::StylesheetMissing { path } => {
            let _ = writeln!(out, "❌ Figma CSS file not found: {}", path.display());
            let _ = write!(out, "   Run the Figma setup first to create the stylesheet");
        }
        ValidationOutcome::Unreadable { path, reason } => {
            let _ = writeln!(out, "❌ Could not read {}: {}", path.display(), reason);
            let _ = write!(out, "   Check the file's permissions and encoding (UTF-8)");
        }
        ValidationOutcome::Checked(report) => {
            let _ = writeln!(out, "🔍 Validating Figma asset references...");
            if report.references.is_empty() {
                let _ = write!(out, "   ℹ️  No asset references found in CSS");
                return out;
            }

            for check in &report.references {
                if check.found {
                    let _ = writeln!(out, "   ✅ {}", check.reference);
                } else {
                    let _ = writeln!(out, "   ❌ {} (missing)", check.reference);
                }
            }

            let missing = report.missing_count();
            if missing > 0 {
                let _ = writeln!(out, "\n⚠️  Found {} missing assets", missing);
                let _ = write!(out, "   Export these from Figma to complete integration");
            } else {
                let _ = write!(out, "\n✅ All assets found!");
            }
        }
    }
    out
}

pub fn render_organize(outcome: &OrganizeOutcome) -> String {
    let mut out = String::new();
    match outcome {
        OrganizeOutcome::RootMissing { path } => {
            let _ = writeln!(out, "❌ Figma folder not found: {}", path.display());
            let _ = write!(out, "   Run the Figma setup first to create the asset folders");
        }
        OrganizeOutcome::NothingToOrganize { path } => {
            let _ = write!(out, "ℹ️  No files to organize in {}/", path.display());
        }
        OrganizeOutcome::ScanFailed { path, reason } => {
            let _ = writeln!(out, "❌ Could not read {}: {}", path.display(), reason);
            let _ = write!(out, "   Check that the folder is readable and try again");
        }
        OrganizeOutcome::Organized(moves) => {
            let _ = writeln!(out, "📁 Organizing Figma assets...");
            for asset in moves {
                match (&asset.status, asset.by_default) {
                    (MoveStatus::Moved, false) => {
                        let _ = writeln!(out, "   Moved {} → {}/", asset.file_name, asset.folder);
                    }
                    (MoveStatus::Moved, true) => {
                        let _ = writeln!(
                            out,
                            "   Moved {} → {}/ (default)",
                            asset.file_name, asset.folder
                        );
                    }
                    (MoveStatus::Failed(reason), _) => {
                        let _ = writeln!(
                            out,
                            "   ⚠️  Could not move {}: {}",
                            asset.file_name, reason
                        );
                    }
                }
            }
            let _ = write!(out, "\n✅ Organized {} files", outcome.moved_count());
            let failed = outcome.failed_count();
            if failed > 0 {
                let _ = write!(out, " ({} could not be moved)", failed);
            }
        }
    }
    out
}

pub fn render_status(outcome: &StatusOutcome) -> String {
    let mut out = String::from("📊 Figma Integration Status\n");
    let _ = writeln!(out, "{}", "=".repeat(40));

    let report = match outcome {
        StatusOutcome::SetupIncomplete { missing } => {
            let _ = writeln!(out, "❌ Setup not complete");
            for path in missing {
                let _ = writeln!(out, "   Missing: {}", path.display());
            }
            let _ = write!(out, "   Run the Figma setup first, then check status again");
            return out;
        }
        StatusOutcome::Ready(report) => report,
    };

    let _ = writeln!(out, "✅ Setup complete");

    for folder in report.folders.iter().filter(|f| f.files > 0) {
        let _ = writeln!(out, "📁 {}: {} files", folder.name, folder.files);
    }

    match report.total_assets() {
        0 => {
            let _ = writeln!(out, "📁 Assets: No assets uploaded yet");
        }
        total => {
            let _ = writeln!(out, "📁 Total assets: {} files", total);
        }
    }

    if report.customized {
        let _ = writeln!(out, "🎨 CSS: Customized with Figma styles");
    } else {
        let _ = writeln!(out, "🎨 CSS: Using template (not customized)");
    }

    let _ = writeln!(out, "\n🔍 Asset Validation:");
    out.push_str(&render_validation(&report.validation));
    out
}
