//! dualprice - dual-currency price display CLI for storefront HTML.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dualprice::config::Config;
use dualprice::engine::settings::{SeparatorStyle, Snapshot, TagStyle, DEFAULT_SYMBOLS};
use dualprice::engine::{settings, Locale};
use dualprice::events::{Session, Trigger};
use dualprice::mail::MailAugmenter;
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dualprice",
    version,
    about = "Dual-currency price display engine for storefront HTML",
    long_about = "Appends fixed-rate secondary-currency labels next to the primary prices \
                  rendered in storefront HTML, idempotently and per configured page region."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enhance an HTML document with secondary price labels
    #[command(alias = "e")]
    Enhance {
        /// Input HTML file (stdin if omitted)
        input: Option<PathBuf>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Primary currency ISO code
        #[arg(long, env = "DUALPRICE_PRIMARY")]
        primary: Option<String>,

        /// Fixed conversion rate
        #[arg(long, env = "DUALPRICE_RATE")]
        rate: Option<f64>,

        /// Master switch for secondary display
        #[arg(long)]
        show_secondary: Option<bool>,

        /// Label tag style (symbol, code)
        #[arg(long)]
        tag_style: Option<TagStyle>,

        /// Label separator style (paren, pipe)
        #[arg(long)]
        separator: Option<SeparatorStyle>,

        /// Enhance product regions
        #[arg(long)]
        enable_product: Option<bool>,

        /// Enhance cart, checkout, and confirmation regions
        #[arg(long)]
        enable_cart: Option<bool>,

        /// Host events to replay, each running one full scan
        #[arg(long = "event", default_value = "page-ready")]
        events: Vec<Trigger>,
    },

    /// Add secondary totals to email template variables (JSON object)
    MailVars {
        /// Input JSON file (stdin if omitted)
        input: Option<PathBuf>,

        /// Locale for number formatting (en, bg, de, fr)
        #[arg(long, default_value = "en")]
        locale: Locale,
    },

    /// List the built-in currency table
    Currencies,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let config = Config::load(cli.config.as_deref())?.with_env();

    match cli.command {
        Commands::Enhance {
            input,
            output,
            primary,
            rate,
            show_secondary,
            tag_style,
            separator,
            enable_product,
            enable_cart,
            events,
        } => {
            let mut config = config;
            if let Some(primary) = primary {
                config.primary = primary;
            }
            if let Some(rate) = rate {
                config.rate = rate;
            }
            if let Some(show) = show_secondary {
                config.show_secondary = show;
            }
            if let Some(style) = tag_style {
                config.tag_style = style;
            }
            if let Some(style) = separator {
                config.separator = style;
            }
            if let Some(enabled) = enable_product {
                config.enable_product = enabled;
            }
            if let Some(enabled) = enable_cart {
                config.enable_cart = enabled;
            }

            let html = read_input(input.as_deref())?;
            let mut session = Session::new(config, &html);

            let mut inserted = 0;
            for event in events {
                let report = session.handle(event);
                inserted += report.labels_inserted;
            }
            info!("Inserted {} labels total", inserted);

            write_output(output.as_deref(), &session.html())?;
        }

        Commands::MailVars { input, locale } => {
            let raw = read_input(input.as_deref())?;
            let mut value: Value =
                serde_json::from_str(&raw).context("Input is not valid JSON")?;
            let vars = value
                .as_object_mut()
                .context("Input must be a JSON object of template variables")?;

            let snapshot = Snapshot::resolve(&config);
            let added = MailAugmenter::new(&snapshot, locale).augment(vars);
            info!("Added {} secondary variables", added);

            println!("{}", serde_json::to_string_pretty(&value)?);
        }

        Commands::Currencies => {
            println!("Built-in currencies:\n");
            println!("{:<6} {:<8} {:<10}", "Code", "Symbol", "Placement");
            println!("{:-<6} {:-<8} {:-<10}", "", "", "");

            for (code, symbol) in DEFAULT_SYMBOLS {
                let placement =
                    if settings::symbol_precedes(code) { "prefix" } else { "suffix" };
                println!("{:<6} {:<8} {:<10}", code, symbol, placement);
            }
        }
    }

    Ok(())
}

fn read_input(path: Option<&std::path::Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

fn write_output(path: Option<&std::path::Path>, html: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, html)
            .with_context(|| format!("Failed to write output file: {}", path.display())),
        None => {
            println!("{}", html);
            Ok(())
        }
    }
}
