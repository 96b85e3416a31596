//! Construct Analytics CLI
//!
//! The `cdk-analytics` command inspects and produces analytics payloads.
//!
//! ## Commands
//!
//! - `encode`: Encode a JSON list of `{fqn, version}` identities
//! - `decode`: Show the plaintext behind an encoded payload
//! - `synth`: Synthesize the metadata resource for an app manifest
//! - `gate`: Show the inclusion decision for a region

use std::path::{Path, PathBuf};

use analytics_core::{
    encode, AnalyticsConfig, ComponentIdentity, ConstructNode, EncodedPayload, IdentityRegistry,
    InclusionGate, MetadataResource, RegionValue, SynthSpan, Template,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "cdk-analytics")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Construct analytics payload tooling", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Agent string reported for the runtime entry
    #[arg(long, global = true, env = "JSII_AGENT")]
    agent: Option<String>,

    /// Never attach the metadata resource
    #[arg(long, global = true)]
    no_version_reporting: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a JSON array of identities into a payload
    Encode {
        /// Path to identities file (JSON array of {fqn, version})
        identities: PathBuf,

        /// Always emit the plaintext encoding
        #[arg(long)]
        uncompressed: bool,
    },

    /// Decode a payload and print its plaintext body
    Decode {
        /// Payload string, e.g. v2:deflate64:H4sI...
        payload: String,
    },

    /// Synthesize the metadata resource for an app manifest
    Synth {
        /// Path to app manifest (JSON with "registry" and "tree")
        manifest: PathBuf,

        /// Target region; omit to defer the decision to deploy time
        #[arg(short, long)]
        region: Option<String>,

        /// Always emit the plaintext encoding
        #[arg(long)]
        uncompressed: bool,
    },

    /// Show the inclusion decision for a region
    Gate {
        /// Region name; omit for a deploy-time region
        region: Option<String>,
    },
}

/// App manifest read by `synth`.
#[derive(Debug, Deserialize)]
struct AppManifest {
    #[serde(default)]
    registry: IdentityRegistry,
    tree: ConstructNode,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    analytics_core::init_tracing(
        cli.json || analytics_core::telemetry::json_requested_by_env(),
        level,
    );

    let config = config_from_cli(&cli);

    match cli.command {
        Commands::Encode {
            identities,
            uncompressed,
        } => cmd_encode(&identities, uncompressed),
        Commands::Decode { payload } => cmd_decode(&payload),
        Commands::Synth {
            manifest,
            region,
            uncompressed,
        } => cmd_synth(
            &manifest,
            region.as_deref(),
            config.with_force_uncompressed(uncompressed),
        ),
        Commands::Gate { region } => cmd_gate(region.as_deref(), &config),
    }
}

fn config_from_cli(cli: &Cli) -> AnalyticsConfig {
    let config = AnalyticsConfig::isolated().with_version_reporting(!cli.no_version_reporting);
    match cli.agent.as_deref() {
        Some(agent) => config.with_agent(agent),
        None => config,
    }
}

fn region_value(region: Option<&str>) -> RegionValue {
    match region {
        Some(r) => RegionValue::resolved(r),
        None => RegionValue::deferred(),
    }
}

/// Encode identities read from a JSON file
fn cmd_encode(path: &Path, uncompressed: bool) -> Result<()> {
    let records = read_identities(path)?;
    debug!(count = records.len(), "encoding identities");
    let payload = encode(&records, uncompressed).context("Failed to encode identities")?;
    println!("{payload}");
    Ok(())
}

fn read_identities(path: &Path) -> Result<Vec<ComponentIdentity>> {
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read identities file: {:?}", path))?;
    serde_json::from_str(&content).context("Failed to parse identities as JSON")
}

/// Print format version, encoding and plaintext body of a payload
fn cmd_decode(payload: &str) -> Result<()> {
    let parsed: EncodedPayload = payload.parse().context("Failed to parse payload")?;
    let plaintext = parsed
        .plaintext_body()
        .context("Failed to decode payload body")?;

    println!("format:   v{}", parsed.format_version);
    println!("encoding: {}", parsed.encoding);
    println!("body:     {plaintext}");
    Ok(())
}

/// Synthesize the metadata resource and print the template
fn cmd_synth(path: &Path, region: Option<&str>, config: AnalyticsConfig) -> Result<()> {
    let template = synth_manifest(path, &region_value(region), config)?;
    println!("{}", template.to_json_pretty()?);
    Ok(())
}

fn synth_manifest(path: &Path, region: &RegionValue, config: AnalyticsConfig) -> Result<Template> {
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read app manifest: {:?}", path))?;
    let manifest: AppManifest =
        serde_json::from_str(&content).context("Failed to parse app manifest as JSON")?;

    let _span = SynthSpan::enter(&manifest.tree.id);
    let mut template = Template::new();
    MetadataResource::new(&manifest.registry, config)
        .synthesize(&manifest.tree, region, &mut template)
        .context("Failed to synthesize metadata resource")?;
    Ok(template)
}

/// Show the inclusion decision for a region
fn cmd_gate(region: Option<&str>, config: &AnalyticsConfig) -> Result<()> {
    let gate = InclusionGate::default().with_reporting(config.version_reporting);
    let decision = gate.decide(&region_value(region));
    println!("{}", serde_json::to_string_pretty(&decision)?);
    Ok(())
}
