use anyhow::Result;
use colored::*;
use reader_core::{Dtype, ValidationReport};
use serde_json::json;

pub fn print_validation_report(report: &ValidationReport, format: &str) -> Result<()> {
    match format {
        "json" => print_json_report(report),
        _ => {
            print_text_report(report);
            Ok(())
        }
    }
}

fn print_text_report(report: &ValidationReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if report.passed {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    if !report.checks.is_empty() {
        println!("\n{}", "Checks:".bold());
        for outcome in &report.checks {
            let mark = if outcome.passed {
                "✓".green()
            } else {
                "✗".red()
            };
            println!("  {} {}", mark, outcome.check);
        }
    }

    if !report.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for (i, error) in report.errors.iter().enumerate() {
            println!("  {}. {}", i + 1, error.red());
        }
    }

    if !report.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for (i, warning) in report.warnings.iter().enumerate() {
            println!("  {}. {}", i + 1, warning.yellow());
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Columns:        {}", report.stats.columns);
    if let Some(rows) = report.stats.rows {
        println!("  Rows:           {}", rows);
    }
    println!("  Checks run:     {}", report.stats.checks_run);
    println!("  Total errors:   {}", report.errors.len());
    println!("  Total warnings: {}", report.warnings.len());
    println!("  Duration:       {} ms", report.stats.duration_ms);
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &ValidationReport) -> Result<()> {
    let output = json!({
        "passed": report.passed,
        "errors": report.errors,
        "warnings": report.warnings,
        "checks": report.checks,
        "stats": report.stats,
        "summary": {
            "error_count": report.errors.len(),
            "warning_count": report.warnings.len(),
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_dtypes(dtypes: &[Dtype], rows: usize) {
    let width = dtypes.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    println!("{}", "Columns:".bold());
    for (name, type_name) in dtypes {
        println!("  {:width$}  {}", name, type_name.cyan(), width = width);
    }
    println!("\n{} {}", "Rows:".bold(), rows);
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
