//! Check command - validate configuration and content

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr, bail};

use super::load_site;

/// Run the check command.
///
/// Loads every record of every kind. Errors always fail the check; with
/// `strict`, warnings and a missing content root fail it too.
pub fn run(config_path: &Path, content: Option<&Path>, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    println!("Checking configuration...");
    let site = load_site(config_path, content)?;
    println!("  ✓ Configuration valid");

    println!("\nChecking content files...");
    let report = site.check().wrap_err("Content check failed")?;

    let mut warnings: Vec<String> = report.warnings.iter().map(ToString::to_string).collect();
    if !report.root_exists {
        warnings.insert(
            0,
            format!("Content directory does not exist: {}", site.root().display()),
        );
    }

    println!();
    println!("Summary:");
    println!("  Files:    {}", report.checked);
    println!("  Errors:   {}", report.errors.len());
    println!("  Warnings: {}", warnings.len());

    if report.has_errors() {
        println!();
        println!("Errors:");
        for err in &report.errors {
            println!("  ✗ {err}");
        }
    }

    if !warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warn in &warnings {
            println!("  ⚠ {warn}");
        }
    }

    if report.has_errors() {
        bail!("Validation failed with {} error(s)", report.errors.len());
    }

    if strict && !warnings.is_empty() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_missing_root_fails_only_in_strict_mode() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let config = tmp.path().join("folio.toml");
        let root = tmp.path().join("nowhere");

        assert!(run(&config, Some(root.as_path()), false).is_ok());
        assert!(run(&config, Some(root.as_path()), true).is_err());
    }

    #[test]
    fn test_errors_fail_the_check() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(tmp.path().join("graphs")).expect("mkdir");
        fs::write(tmp.path().join("graphs/kg.md"), "no graph block").expect("write");

        let config = tmp.path().join("folio.toml");
        assert!(run(&config, Some(tmp.path()), false).is_err());
    }
}
