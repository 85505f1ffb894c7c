//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `mail_dns` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output
//!
//! All core functionality is implemented in the library crate.

use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::{Serialize, Serializer};

use mail_dns::config::DIG_TIMEOUT_SECS;
use mail_dns::initialization::init_logger_with;
use mail_dns::{
    generate_validation_report, render_validation_report, validate_mail_domain, DigResolver,
    DnsConfigGenerator, DomainRegistry, ExportFormat, LogFormat, LogLevel,
};

#[derive(Debug, Parser)]
#[command(
    name = "mail_dns",
    version,
    about = "Generate and validate DNS records for mail domains"
)]
struct Cli {
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    log_level: LogLevel,

    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the generated records as JSON
    Records(DomainArgs),
    /// Print BIND zone files
    Zone(DomainArgs),
    /// Print Cloudflare import records as JSON
    Cloudflare(DomainArgs),
    /// Export records, zone files and Cloudflare records for all domains
    Export(ExportArgs),
    /// Check live DNS for the mail records
    Validate(ValidateArgs),
}

/// Mail settings applied to every selected domain.
#[derive(Debug, Args)]
struct DomainArgs {
    /// Domain to configure (repeatable; defaults to every managed domain)
    #[arg(long = "domain")]
    domains: Vec<String>,

    #[arg(long)]
    mail_ip: Ipv4Addr,

    /// Web server IP for the apex A record (defaults to --mail-ip)
    #[arg(long)]
    web_ip: Option<Ipv4Addr>,

    /// Base64 DKIM public key for the `default` selector
    #[arg(long)]
    dkim_key: Option<String>,
}

#[derive(Debug, Args)]
struct ExportArgs {
    #[command(flatten)]
    domain: DomainArgs,

    #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
    format: ExportFormat,

    /// Write to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Domain to check (repeatable; defaults to every managed domain)
    #[arg(long = "domain")]
    domains: Vec<String>,

    /// Compare the mail host's A record against this address
    #[arg(long)]
    expected_mail_ip: Option<Ipv4Addr>,

    #[arg(long, default_value_t = DIG_TIMEOUT_SECS)]
    timeout_seconds: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(cli.command).await {
        eprintln!("mail_dns error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Records(args) => {
            let (generator, domains) = configure(&args)?;
            let mut out = Vec::with_capacity(domains.len());
            for domain in &domains {
                out.push((domain.as_str(), generator.generate_records(domain)?));
            }
            println!("{}", serde_json::to_string_pretty(&ByDomain(out))?);
        }
        Command::Zone(args) => {
            let (generator, domains) = configure(&args)?;
            for (i, domain) in domains.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print!("{}", generator.generate_zone_file(domain)?);
            }
        }
        Command::Cloudflare(args) => {
            let (generator, domains) = configure(&args)?;
            let mut out = Vec::with_capacity(domains.len());
            for domain in &domains {
                out.push((domain.as_str(), generator.generate_cloudflare_format(domain)?));
            }
            println!("{}", serde_json::to_string_pretty(&ByDomain(out))?);
        }
        Command::Export(args) => {
            let (generator, _) = configure(&args.domain)?;
            let text = generator
                .export_configuration(args.format)
                .context("Failed to serialize export")?;
            match args.output {
                Some(path) => {
                    std::fs::write(&path, text)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    log::info!("Export written to {}", path.display());
                }
                None => println!("{text}"),
            }
        }
        Command::Validate(args) => {
            let registry = DomainRegistry::default();
            let domains = select_domains(&registry, &args.domains)?;
            let resolver =
                DigResolver::new().with_timeout(Duration::from_secs(args.timeout_seconds));

            let report = match args.expected_mail_ip {
                None => generate_validation_report(&resolver, &domains).await,
                Some(ip) => {
                    let expected = ip.to_string();
                    let mut validations = Vec::with_capacity(domains.len());
                    for domain in &domains {
                        let result =
                            validate_mail_domain(&resolver, domain, Some(expected.as_str())).await;
                        validations.push(result);
                    }
                    render_validation_report(&validations)
                }
            };
            print!("{report}");
        }
    }
    Ok(())
}

/// Per-domain output serialized as a JSON object in the order domains were selected.
struct ByDomain<'a, T>(Vec<(&'a str, T)>);

impl<T: Serialize> Serialize for ByDomain<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(domain, value)| (domain, value)))
    }
}

/// Picks the requested domains, or all managed ones when none are given.
fn select_domains(registry: &DomainRegistry, requested: &[String]) -> Result<Vec<String>> {
    if requested.is_empty() {
        return Ok(registry.domains().map(str::to_string).collect());
    }
    for domain in requested {
        if !registry.contains(domain) {
            let supported: Vec<&str> = registry.domains().collect();
            bail!(
                "Domain {domain} not supported (managed domains: {})",
                supported.join(", ")
            );
        }
    }
    Ok(requested.to_vec())
}

/// Builds a generator with `args` applied to each selected domain.
fn configure(args: &DomainArgs) -> Result<(DnsConfigGenerator, Vec<String>)> {
    let mut generator = DnsConfigGenerator::default();
    let domains = select_domains(generator.registry(), &args.domains)?;

    let mail_ip = args.mail_ip.to_string();
    let web_ip = args.web_ip.map(|ip| ip.to_string());
    for domain in &domains {
        generator.set_domain_config(
            domain,
            &mail_ip,
            web_ip.as_deref(),
            args.dkim_key.as_deref(),
        )?;
    }
    Ok((generator, domains))
}
