use anyhow::{bail, Context};
use rental_analyzer::config::Config;
use rental_analyzer::portfolio::Portfolio;
use rental_analyzer::property::PropertyEntry;
use rental_analyzer::{cli, io, logging, report};
use tracing::{debug, info, warn};

fn main() -> anyhow::Result<()> {
    let mut args = cli::parse_args();

    // Explicit config file first, otherwise the default locations
    let config = match &args.config {
        Some(path) => Some(
            Config::from_file(path).with_context(|| format!("Failed to load config file {}", path))?,
        ),
        None => Config::load_default()?,
    };
    if let Some(config) = &config {
        config.merge_with_cli(&mut args);
    }

    logging::init_cli_logger(args.verbose);
    debug!("Rental Analyzer starting...");

    let global = args.global_params();

    // Property source: CSV file, then the config's property list, then the CLI flags
    let entries: Vec<PropertyEntry> = if let Some(path) = &args.properties {
        info!("Loading properties from: {}", path);
        io::load_properties_csv(path)?
    } else if let Some(config) = config.as_ref().filter(|c| !c.properties.is_empty()) {
        info!("Using {} properties from config file", config.properties.len());
        config.properties.clone()
    } else {
        Vec::new()
    };

    let entries = if entries.is_empty() {
        vec![args.property_entry()]
    } else {
        if args.has_property_flags() {
            warn!("Per-property flags are ignored when a property list is supplied");
        }
        entries
    };

    let portfolio = Portfolio::from_entries(global, &entries)?;
    debug!("{}", portfolio.summary());

    let reports = portfolio.reports();
    info!("Analyzed {} properties", reports.len());

    match args.function.as_str() {
        "report" | "summary" => {
            let text = if args.function == "report" {
                report::generate_text_report(&portfolio, &reports)
            } else {
                report::generate_summary_table(&reports)
            };
            print!("{}", text);

            if let Some(output_path) = &args.output {
                if io::save_text(&text, output_path, args.force)? {
                    println!("Report saved to: {}", output_path);
                }
            }
        }
        "export" => {
            let Some(output_path) = &args.output else {
                bail!("Export function requires --output (-o) to be specified");
            };
            if let Some(written) = io::export_reports(&reports, output_path, args.force)? {
                println!("Successfully exported to: {}", written.display());
            }
        }
        other => bail!(
            "Unknown function '{}': expected report, summary or export",
            other
        ),
    }

    debug!("Rental Analyzer finished.");
    Ok(())
}
