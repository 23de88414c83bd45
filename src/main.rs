mod cli;

use anyhow::{bail, Context};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use std::process;

use vulnscan::adapters::outbound::console::StderrProgressReporter;
use vulnscan::adapters::outbound::filesystem::{
    FileSystemScanReader, FileSystemWriter, PinFileStorage, StdoutPresenter,
};
use vulnscan::adapters::outbound::network::{BackendClient, NvdClient};
use vulnscan::application::pinned_set::PinnedSetStore;
use vulnscan::application::use_cases::{ProcessScansUseCase, ScanRequest};
use vulnscan::config::{self, ConfigFile};
use vulnscan::correlation::domain::{Severity, Vulnerability};
use vulnscan::ports::outbound::{
    CatalogQuery, OutputPresenter, ScanFileReader, ScanSubmitter, SubmissionOutcome,
    VulnerabilityCatalog,
};
use vulnscan::shared::error::ExitCode;
use vulnscan::shared::Result;

use cli::{Args, Command, PinAction};

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    match run(args).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = load_configuration(&args)?;

    match args.command {
        Command::Scan {
            files,
            page_size,
            max_terms,
            output,
            pin,
        } => run_scan(&config, files, page_size, max_terms, output, pin).await,
        Command::Search { keyword, page_size } => run_search(&config, keyword, page_size).await,
        Command::Lookup { cve_id } => run_lookup(&config, cve_id).await,
        Command::Pin { action } => run_pin(&config, action).await,
        Command::Submit { files, endpoint } => run_submit(&config, files, endpoint).await,
    }
}

/// Load configuration from the explicit --config path, or discover
/// a `vulnscan.config.yml` in the current directory.
fn load_configuration(args: &Args) -> Result<ConfigFile> {
    if let Some(path) = &args.config {
        config::load_config_from_path(path)
    } else {
        Ok(config::discover_config(Path::new("."))?.unwrap_or_default())
    }
}

async fn run_scan(
    config: &ConfigFile,
    files: Vec<PathBuf>,
    page_size: Option<u32>,
    max_terms: Option<usize>,
    output: Option<PathBuf>,
    pin: bool,
) -> Result<ExitCode> {
    // Create adapters (Dependency Injection)
    let scan_reader = FileSystemScanReader::new();
    let catalog = NvdClient::new(config.api_key.clone())?;
    let progress_reporter = StderrProgressReporter::new();

    // Create use case with injected dependencies
    let use_case = ProcessScansUseCase::new(scan_reader, catalog, progress_reporter);

    let mut request = ScanRequest::new(files);
    if let Some(n) = page_size.or(config.page_size) {
        request.page_size = n;
    }
    if let Some(n) = max_terms.or(config.max_terms) {
        request.max_terms_per_file = n;
    }

    let report = use_case.execute(request).await?;
    let vulnerabilities_found = report.summary.vulnerabilities_found;

    // Present output
    let presenter: Box<dyn OutputPresenter> = if let Some(output_path) = output {
        Box::new(FileSystemWriter::new(output_path))
    } else {
        Box::new(StdoutPresenter::new())
    };
    presenter.present(&report.to_json()?)?;

    if pin {
        let mut store = open_pin_store(config)?;
        let mut newly_pinned = 0usize;
        for vulnerability in report.vulnerabilities.iter().cloned() {
            if store.pin(vulnerability)? {
                newly_pinned += 1;
            }
        }
        eprintln!("✅ Pinned {} new vulnerabilities.", newly_pinned);
    }

    if vulnerabilities_found > 0 {
        Ok(ExitCode::VulnerabilitiesFound)
    } else {
        Ok(ExitCode::Success)
    }
}

async fn run_search(
    config: &ConfigFile,
    keyword: String,
    page_size: Option<u32>,
) -> Result<ExitCode> {
    let catalog = NvdClient::new(config.api_key.clone())?;
    let size = page_size
        .or(config.page_size)
        .unwrap_or(CatalogQuery::DEFAULT_PAGE_SIZE);

    let page = catalog
        .search(CatalogQuery::by_keyword(&keyword, size))
        .await?;

    if page.vulnerabilities.is_empty() {
        println!("No vulnerabilities found for '{}'.", keyword);
        return Ok(ExitCode::Success);
    }

    eprintln!(
        "💡 {} total matches, showing {}.",
        page.total_results,
        page.vulnerabilities.len()
    );
    for vulnerability in &page.vulnerabilities {
        print_vulnerability_line(vulnerability);
    }

    Ok(ExitCode::Success)
}

async fn run_lookup(config: &ConfigFile, cve_id: String) -> Result<ExitCode> {
    let catalog = NvdClient::new(config.api_key.clone())?;
    let page = catalog.search(CatalogQuery::by_cve(&cve_id)).await?;

    match page.vulnerabilities.first() {
        Some(vulnerability) => {
            print_vulnerability_detail(vulnerability);
            Ok(ExitCode::Success)
        }
        None => {
            println!("No catalog record found for '{}'.", cve_id);
            Ok(ExitCode::Success)
        }
    }
}

async fn run_pin(config: &ConfigFile, action: PinAction) -> Result<ExitCode> {
    let mut store = open_pin_store(config)?;

    match action {
        PinAction::List => {
            let pinned = store.export_all();
            if pinned.is_empty() {
                println!("No pinned vulnerabilities.");
            } else {
                for vulnerability in &pinned {
                    print_vulnerability_line(vulnerability);
                }
            }
        }
        PinAction::Add { cve_id } => {
            let catalog = NvdClient::new(config.api_key.clone())?;
            let page = catalog.search(CatalogQuery::by_cve(&cve_id)).await?;
            let Some(vulnerability) = page.vulnerabilities.into_iter().next() else {
                bail!(
                    "No catalog record found for '{}'.\n\n\
                     💡 Hint: Check the CVE identifier spelling (e.g. CVE-2024-1234).",
                    cve_id
                );
            };
            let cve = vulnerability.cve.clone();
            if store.pin(vulnerability)? {
                eprintln!("✅ Pinned {}.", cve);
            } else {
                eprintln!("💡 {} is already pinned.", cve);
            }
        }
        PinAction::Remove { cve_id } => {
            if store.unpin(&cve_id)? {
                eprintln!("✅ Removed {} from the pinned set.", cve_id);
            } else {
                eprintln!("💡 {} was not pinned.", cve_id);
            }
        }
        PinAction::Export { output } => {
            let json = serde_json::to_string_pretty(&store.export_all())
                .context("Failed to serialize the pinned set")?;
            let presenter: Box<dyn OutputPresenter> = if let Some(output_path) = output {
                Box::new(FileSystemWriter::new(output_path))
            } else {
                Box::new(StdoutPresenter::new())
            };
            presenter.present(&json)?;
        }
        PinAction::Import { path } => {
            let content = std::fs::read_to_string(&path).with_context(|| {
                format!(
                    "Failed to read import file: {}\n\n\
                     💡 Hint: Check that the file exists and is readable.",
                    path.display()
                )
            })?;
            let vulnerabilities: Vec<Vulnerability> =
                serde_json::from_str(&content).with_context(|| {
                    format!(
                        "Failed to parse import file: {}\n\n\
                         💡 Hint: The file must be a JSON array produced by 'vulnscan pin export'.",
                        path.display()
                    )
                })?;
            store.import_all(vulnerabilities)?;
            eprintln!("✅ Imported {} pinned vulnerabilities.", store.len());
        }
        PinAction::Clear => {
            store.clear()?;
            eprintln!("✅ Cleared the pinned set.");
        }
    }

    Ok(ExitCode::Success)
}

async fn run_submit(
    config: &ConfigFile,
    files: Vec<PathBuf>,
    endpoint: Option<String>,
) -> Result<ExitCode> {
    let Some(endpoint) = endpoint.or_else(|| config.endpoint.clone()) else {
        bail!(
            "No backend endpoint configured.\n\n\
             💡 Hint: Pass --endpoint or set 'endpoint' in vulnscan.config.yml."
        );
    };

    let scan_reader = FileSystemScanReader::new();
    let mut payloads = Vec::with_capacity(files.len());
    for path in &files {
        let raw = scan_reader.read_scan_file(path)?;
        let value: serde_json::Value = serde_json::from_str(&raw).with_context(|| {
            format!(
                "Scan file is not valid JSON: {}\n\n\
                 💡 Hint: Submission requires well-formed JSON scan files.",
                path.display()
            )
        })?;
        payloads.push(value);
    }

    let client = BackendClient::new(endpoint)?;
    match client.submit(&payloads).await? {
        SubmissionOutcome::Vulnerabilities(vulnerabilities) => {
            if vulnerabilities.is_empty() {
                println!("No vulnerabilities reported by the backend.");
                Ok(ExitCode::Success)
            } else {
                for vulnerability in &vulnerabilities {
                    print_vulnerability_line(vulnerability);
                }
                Ok(ExitCode::VulnerabilitiesFound)
            }
        }
        SubmissionOutcome::Acknowledged(message) => {
            eprintln!("✅ {}", message);
            Ok(ExitCode::Success)
        }
    }
}

fn open_pin_store(config: &ConfigFile) -> Result<PinnedSetStore<PinFileStorage>> {
    let storage = match &config.pin_file {
        Some(path) => PinFileStorage::at_path(path.clone()),
        None => PinFileStorage::new()?,
    };
    Ok(PinnedSetStore::load(storage))
}

fn print_vulnerability_line(vulnerability: &Vulnerability) {
    println!(
        "{}  {:<18}  {:>4.1}  {}",
        vulnerability.cve,
        severity_label(vulnerability.severity),
        vulnerability.score,
        vulnerability.title
    );
}

fn print_vulnerability_detail(vulnerability: &Vulnerability) {
    println!("{}", vulnerability.cve);
    println!(
        "Severity:      {} ({:.1})",
        severity_label(vulnerability.severity),
        vulnerability.score
    );
    println!("Published:     {}", vulnerability.published_date);
    println!("Last modified: {}", vulnerability.last_modified);
    if !vulnerability.status.is_empty() {
        println!("Status:        {}", vulnerability.status);
    }
    println!();
    println!("{}", vulnerability.description);
    if !vulnerability.references.is_empty() {
        println!();
        println!("References:");
        for reference in &vulnerability.references {
            println!("  {}", reference.url);
        }
    }
}

fn severity_label(severity: Severity) -> String {
    match severity {
        Severity::Critical => severity.as_str().red().bold().to_string(),
        Severity::High => severity.as_str().red().to_string(),
        Severity::Medium => severity.as_str().yellow().to_string(),
        Severity::Low => severity.as_str().green().to_string(),
        Severity::Unknown => severity.as_str().dimmed().to_string(),
    }
}
