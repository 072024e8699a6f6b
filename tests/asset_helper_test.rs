use anyhow::Result;
use earth_saver_devtools::app::asset_helper::run_asset_command;
use earth_saver_devtools::core::asset_organizer::{organize_assets, MoveStatus, OrganizeOutcome};
use earth_saver_devtools::core::asset_status::{asset_status, StatusOutcome};
use earth_saver_devtools::core::asset_validator::{validate_assets, ValidationOutcome};
use earth_saver_devtools::AssetConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TEMPLATE_CSS: &str = r#"
/* Replace with your Figma colors */
:root { --primary: #2e7d32; }
"#;

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// 建立 setup 完成後的專案結構
fn setup_project(css: &str) -> Result<(TempDir, AssetConfig)> {
    let temp_dir = TempDir::new()?;
    let config = AssetConfig::with_root(temp_dir.path());
    write_file(&config.stylesheet_path(), css)?;
    write_file(&config.guide_path(), "# Figma integration guide\n")?;
    for folder in &config.expected_folders {
        write_file(&config.asset_root_path().join(folder).join(".gitkeep"), "")?;
    }
    Ok((temp_dir, config))
}

fn listing(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            entries.extend(listing(&path)?);
        }
        entries.push(path);
    }
    entries.sort();
    Ok(entries)
}

#[test]
fn test_validate_without_references_passes() -> Result<()> {
    let (_temp_dir, config) = setup_project(TEMPLATE_CSS)?;

    let outcome = validate_assets(&config);

    match &outcome {
        ValidationOutcome::Checked(report) => assert!(report.references.is_empty()),
        other => panic!("expected Checked, got {:?}", other),
    }
    assert!(outcome.passed());

    let output = run_asset_command(Some("validate"), &config);
    assert!(output.contains("No asset references found in CSS"));
    assert!(!output.contains("✅ assets"));
    Ok(())
}

#[test]
fn test_validate_reports_exactly_one_missing() -> Result<()> {
    let css = r#"
.hero { background: url('../../images/figma/backgrounds/hero.png'); }
.sun { background: url("assets/images/figma/icons/sun.svg"); }
"#;
    let (_temp_dir, config) = setup_project(css)?;
    write_file(
        &config.asset_root_path().join("backgrounds/hero.png"),
        "png",
    )?;

    let outcome = validate_assets(&config);
    assert!(!outcome.passed());

    let ValidationOutcome::Checked(report) = &outcome else {
        panic!("expected Checked, got {:?}", outcome);
    };
    assert_eq!(report.references.len(), 2);
    assert!(report.references[0].found);
    let missing: Vec<&str> = report.missing().map(|c| c.reference.as_str()).collect();
    assert_eq!(missing, vec!["assets/images/figma/icons/sun.svg"]);

    let output = run_asset_command(Some("VALIDATE"), &config);
    assert!(output.contains("❌ assets/images/figma/icons/sun.svg (missing)"));
    assert!(output.contains("Found 1 missing assets"));
    Ok(())
}

#[test]
fn test_validate_all_references_found() -> Result<()> {
    let css = ".sun { background: url(assets/images/figma/icons/sun.svg); }";
    let (_temp_dir, config) = setup_project(css)?;
    write_file(&config.asset_root_path().join("icons/sun.svg"), "<svg/>")?;

    let outcome = validate_assets(&config);
    assert!(outcome.passed());
    assert!(run_asset_command(Some("validate"), &config).contains("All assets found!"));
    Ok(())
}

#[test]
fn test_organize_moves_by_rule_and_default() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = AssetConfig::with_root(temp_dir.path());
    let root = config.asset_root_path();
    write_file(&root.join("icon-sun.png"), "png")?;
    write_file(&root.join("mystery.png"), "png")?;

    let outcome = organize_assets(&config);

    assert_eq!(outcome.moved_count(), 2);
    let OrganizeOutcome::Organized(moves) = &outcome else {
        panic!("expected Organized, got {:?}", outcome);
    };
    assert!(moves.iter().all(|m| m.status == MoveStatus::Moved));
    assert!(root.join("icons/icon-sun.png").is_file());
    assert!(root.join("ui-elements/mystery.png").is_file());
    assert!(!root.join("icon-sun.png").exists());
    assert!(!root.join("mystery.png").exists());

    let mystery = moves.iter().find(|m| m.file_name == "mystery.png").unwrap();
    assert!(mystery.by_default);
    Ok(())
}

#[test]
fn test_organize_ignores_other_files_and_subfolders() -> Result<()> {
    let (_temp_dir, config) = setup_project(TEMPLATE_CSS)?;
    let root = config.asset_root_path();
    write_file(&root.join("notes.txt"), "not an image")?;
    write_file(&root.join("sprites/hero-sprite.png"), "png")?;
    write_file(&root.join("Play-Button.SVG"), "<svg/>")?;

    let outcome = organize_assets(&config);

    assert_eq!(outcome.moved_count(), 1);
    assert!(root.join("buttons/Play-Button.SVG").is_file());
    assert!(root.join("notes.txt").is_file());
    assert!(root.join("sprites/hero-sprite.png").is_file());
    Ok(())
}

#[test]
fn test_organize_empty_root_changes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = AssetConfig::with_root(temp_dir.path());
    fs::create_dir_all(config.asset_root_path())?;
    let before = listing(temp_dir.path())?;

    let outcome = organize_assets(&config);

    assert!(matches!(outcome, OrganizeOutcome::NothingToOrganize { .. }));
    assert_eq!(outcome.moved_count(), 0);
    assert_eq!(listing(temp_dir.path())?, before);
    assert!(run_asset_command(Some("organize"), &config).contains("No files to organize"));
    Ok(())
}

#[test]
fn test_organize_keeps_existing_destination_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = AssetConfig::with_root(temp_dir.path());
    let root = config.asset_root_path();
    write_file(&root.join("icon-sun.png"), "new")?;
    write_file(&root.join("icons/icon-sun.png"), "old")?;

    let outcome = organize_assets(&config);

    assert_eq!(outcome.moved_count(), 0);
    assert_eq!(outcome.failed_count(), 1);
    assert_eq!(fs::read_to_string(root.join("icons/icon-sun.png"))?, "old");
    assert!(root.join("icon-sun.png").is_file());
    Ok(())
}

#[test]
fn test_status_short_circuits_without_stylesheet() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = AssetConfig::with_root(temp_dir.path());

    let outcome = asset_status(&config);

    let StatusOutcome::SetupIncomplete { missing } = &outcome else {
        panic!("expected SetupIncomplete, got {:?}", outcome);
    };
    assert!(missing.contains(&config.stylesheet_path()));

    let output = run_asset_command(Some("status"), &config);
    assert!(output.contains("Setup not complete"));
    assert!(!output.contains("Total assets"));
    assert!(!output.contains("Asset Validation"));
    Ok(())
}

#[test]
fn test_status_with_no_assets_uses_template() -> Result<()> {
    let (_temp_dir, config) = setup_project(TEMPLATE_CSS)?;

    let StatusOutcome::Ready(report) = asset_status(&config) else {
        panic!("expected Ready");
    };
    assert_eq!(report.total_assets(), 0);
    assert!(!report.customized);
    assert!(report.validation.passed());

    let output = run_asset_command(Some("status"), &config);
    assert!(output.contains("Setup complete"));
    assert!(output.contains("No assets uploaded yet"));
    assert!(output.contains("Using template (not customized)"));
    assert!(output.contains("Asset Validation"));
    Ok(())
}

#[test]
fn test_status_counts_assets_and_surfaces_validation() -> Result<()> {
    let css = ".hero { background: url('../../images/figma/backgrounds/hero.png'); }";
    let (_temp_dir, config) = setup_project(css)?;
    let root = config.asset_root_path();
    write_file(&root.join("icons/sun.svg"), "<svg/>")?;
    write_file(&root.join("icons/moon.svg"), "<svg/>")?;
    write_file(&root.join("sprites/earth.png"), "png")?;

    let StatusOutcome::Ready(report) = asset_status(&config) else {
        panic!("expected Ready");
    };
    assert_eq!(report.total_assets(), 3);
    assert!(report.customized);
    let icons = report.folders.iter().find(|f| f.name == "icons").unwrap();
    assert_eq!(icons.files, 2);
    assert!(!report.validation.passed());

    let output = run_asset_command(Some("Status"), &config);
    assert!(output.contains("📁 icons: 2 files"));
    assert!(output.contains("📁 Total assets: 3 files"));
    assert!(output.contains("Customized with Figma styles"));
    assert!(output.contains("(missing)"));
    Ok(())
}

#[test]
fn test_unknown_command_does_not_touch_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = AssetConfig::with_root(temp_dir.path());
    write_file(&config.asset_root_path().join("icon-sun.png"), "png")?;
    let before = listing(temp_dir.path())?;

    let output = run_asset_command(Some("reorganize"), &config);

    assert!(output.contains("Unknown command. Available commands:"));
    assert_eq!(listing(temp_dir.path())?, before);
    Ok(())
}
