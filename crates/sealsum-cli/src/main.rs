//! sealsum: checksum manifests and password-based file encryption
//!
//! Commands:
//!   checksum generate  - hash matching files into a checksum list
//!   checksum verify    - re-hash every list entry and report OK/MISMATCH/MISSING
//!   crypt encrypt      - encrypt matching files into an output directory
//!   crypt decrypt      - decrypt .enc files into an output directory

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use secrecy::SecretString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use sealsum_core::config::SealsumConfig;
use sealsum_core::scan::collect_files;
use sealsum_crypto::CryptMode;
use sealsum_manifest::{HashAlgo, VerifyStatus};
use tracing::debug;

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "sealsum",
    version,
    about = "Checksum manifests and password-based file encryption",
    long_about = "sealsum: generate and verify checksum lists, and encrypt or decrypt \
file sets with AES-256 under a password-derived key"
)]
struct Cli {
    /// Path to sealsum.toml configuration file
    #[arg(long, short = 'c', env = "SEALSUM_CONFIG", default_value = "sealsum.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides config
    #[arg(long, env = "SEALSUM_LOG")]
    log: Option<String>,

    /// Log format (json, text); overrides config
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Print the structured report as JSON instead of per-file lines
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Checksum list management
    Checksum {
        #[command(subcommand)]
        action: ChecksumAction,
    },

    /// File encryption and decryption
    Crypt {
        #[command(subcommand)]
        action: CryptAction,
    },
}

#[derive(Subcommand, Debug)]
enum ChecksumAction {
    /// Hash matching files into a checksum list
    Generate {
        /// Directory to scan
        #[arg(long, default_value = ".")]
        path: PathBuf,
        /// Only include files with this extension
        #[arg(long)]
        ext: Option<String>,
        /// Hash algorithm (default from config)
        #[arg(long, value_enum)]
        algo: Option<AlgoArg>,
        /// Output list file (default: checksums.<algo>sum)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Re-hash every entry of an existing list and compare
    Verify {
        /// Checksum list to verify (default: checksums.<algo>sum)
        #[arg(long)]
        list: Option<PathBuf>,
        /// Hash algorithm the list was generated with (default from config)
        #[arg(long, value_enum)]
        algo: Option<AlgoArg>,
    },
}

#[derive(Subcommand, Debug)]
enum CryptAction {
    /// Encrypt matching files into the output directory
    Encrypt {
        #[command(flatten)]
        args: CryptArgs,
    },

    /// Decrypt matching files into the output directory
    Decrypt {
        #[command(flatten)]
        args: CryptArgs,
    },
}

#[derive(clap::Args, Debug)]
struct CryptArgs {
    /// Directory to scan
    #[arg(long, default_value = ".")]
    path: PathBuf,

    /// Only process files with this extension
    #[arg(long)]
    ext: Option<String>,

    /// Output directory (default from config: encrypted/ or decrypted/)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Password; prompted for interactively when not given
    #[arg(long, env = "SEALSUM_PASSWORD")]
    password: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlgoArg {
    Sha256,
    Sha1,
    Md5,
}

impl From<AlgoArg> for HashAlgo {
    fn from(arg: AlgoArg) -> Self {
        match arg {
            AlgoArg::Sha256 => HashAlgo::Sha256,
            AlgoArg::Sha1 => HashAlgo::Sha1,
            AlgoArg::Md5 => HashAlgo::Md5,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Text,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SealsumConfig::load(&cli.config)?;
    init_logging(&cli, &config);
    debug!(config = %cli.config.display(), "configuration loaded");

    match cli.command {
        Commands::Checksum {
            action: ChecksumAction::Generate { path, ext, algo, out },
        } => cmd_generate(&config, &path, ext.as_deref(), algo, out, cli.json),
        Commands::Checksum {
            action: ChecksumAction::Verify { list, algo },
        } => cmd_verify(&config, list, algo, cli.json),
        Commands::Crypt {
            action: CryptAction::Encrypt { args },
        } => cmd_crypt(&config, CryptMode::Encrypt, &args, cli.json),
        Commands::Crypt {
            action: CryptAction::Decrypt { args },
        } => cmd_crypt(&config, CryptMode::Decrypt, &args, cli.json),
    }
}

// ── `sealsum checksum generate` ───────────────────────────────────────────────

fn cmd_generate(
    config: &SealsumConfig,
    path: &Path,
    ext: Option<&str>,
    algo: Option<AlgoArg>,
    out: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let algo = resolve_algo(config, algo)?;
    let files = collect_files(path, ext, &config.scan)
        .with_context(|| format!("scanning {}", path.display()))?;

    if files.is_empty() {
        println!("No files matched.");
        return Ok(());
    }

    let list_path = out.unwrap_or_else(|| PathBuf::from(algo.default_list_name()));
    println!(
        "Writing {} {algo} checksums to {} ...",
        files.len(),
        list_path.display()
    );

    let pb = make_progress_bar(files.len() as u64, "hash");
    let pb_clone = pb.clone();
    let progress: sealsum_manifest::ProgressFn = Box::new(move |done, total, msg| {
        pb_clone.set_length(total);
        pb_clone.set_position(done);
        pb_clone.set_message(msg.to_string());
    });

    let report = sealsum_manifest::generate(&files, algo, &list_path, Some(&progress))
        .with_context(|| format!("writing checksum list: {}", list_path.display()))?;
    pb.finish_with_message("done".to_string());

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for skip in &report.skipped {
            println!("SKIPPED: {} ({})", skip.path.display(), skip.reason);
        }
        println!("Wrote {} entries to {}", report.written, report.list_path.display());
    }

    if !report.ok() {
        std::process::exit(1);
    }
    Ok(())
}

// ── `sealsum checksum verify` ─────────────────────────────────────────────────

fn cmd_verify(
    config: &SealsumConfig,
    list: Option<PathBuf>,
    algo: Option<AlgoArg>,
    json: bool,
) -> Result<()> {
    let algo = resolve_algo(config, algo)?;
    let list_path = list.unwrap_or_else(|| PathBuf::from(algo.default_list_name()));

    if !json {
        println!("Verifying files via {algo} list {} ...", list_path.display());
    }

    let report = sealsum_manifest::verify(&list_path, algo, None)
        .with_context(|| format!("verifying {}", list_path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for entry in &report.entries {
            match &entry.status {
                VerifyStatus::Ok => println!("OK: {}", entry.path),
                VerifyStatus::Mismatch => println!("MISMATCH: {}", entry.path),
                VerifyStatus::Missing => println!("MISSING: {}", entry.path),
                VerifyStatus::Malformed(reason) => {
                    println!("ERROR: {} ({reason})", entry.path)
                }
            }
        }
        let bad = report
            .entries
            .iter()
            .filter(|e| e.status != VerifyStatus::Ok)
            .count();
        println!(
            "{} entries checked, {} problem(s)",
            report.entries.len(),
            bad
        );
    }

    if !report.ok() {
        std::process::exit(1);
    }
    Ok(())
}

// ── `sealsum crypt encrypt` / `sealsum crypt decrypt` ─────────────────────────

fn cmd_crypt(config: &SealsumConfig, mode: CryptMode, args: &CryptArgs, json: bool) -> Result<()> {
    let files = collect_files(&args.path, args.ext.as_deref(), &config.scan)
        .with_context(|| format!("scanning {}", args.path.display()))?;

    if files.is_empty() {
        eprintln!("No matching files found.");
        return Ok(());
    }

    let out_dir = args.out.clone().unwrap_or_else(|| {
        PathBuf::from(match mode {
            CryptMode::Encrypt => &config.crypt.encrypt_dir,
            CryptMode::Decrypt => &config.crypt.decrypt_dir,
        })
    });
    let password = resolve_password(args.password.as_deref(), mode)?;

    let pb = make_progress_bar(files.len() as u64, match mode {
        CryptMode::Encrypt => "encrypt",
        CryptMode::Decrypt => "decrypt",
    });
    let pb_clone = pb.clone();
    let progress: sealsum_crypto::ProgressFn = Box::new(move |done, total, msg| {
        pb_clone.set_length(total);
        pb_clone.set_position(done);
        pb_clone.set_message(msg.to_string());
    });

    let report = sealsum_crypto::process_files(&files, mode, &password, &out_dir, Some(&progress))
        .with_context(|| format!("creating output dir: {}", out_dir.display()))?;
    pb.finish_with_message("done".to_string());

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let verb = match mode {
            CryptMode::Encrypt => "Encrypted",
            CryptMode::Decrypt => "Decrypted",
        };
        for outcome in &report.outcomes {
            match (&outcome.output, &outcome.error) {
                (Some(out), _) => {
                    println!("{verb}: {} → {}", outcome.input.display(), out.display())
                }
                (None, Some(reason)) => {
                    println!("FAILED: {} ({reason})", outcome.input.display())
                }
                (None, None) => {}
            }
        }
        println!(
            "{} file(s) processed, {} failed",
            report.processed(),
            report.failed()
        );
    }

    if !report.ok() {
        std::process::exit(1);
    }
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Resolve the algorithm: CLI flag > config default
fn resolve_algo(config: &SealsumConfig, arg: Option<AlgoArg>) -> Result<HashAlgo> {
    match arg {
        Some(a) => Ok(a.into()),
        None => config
            .checksum
            .algo
            .parse()
            .with_context(|| format!("invalid checksum.algo in config: {}", config.checksum.algo)),
    }
}

/// Resolve the password: CLI flag / env var > interactive prompt
fn resolve_password(arg: Option<&str>, mode: CryptMode) -> Result<SecretString> {
    if let Some(p) = arg {
        return Ok(SecretString::from(p.to_string()));
    }
    let password = rpassword::prompt_password(format!("Password to {mode}: "))
        .context("reading password")?;
    Ok(SecretString::from(password))
}

// ── Progress bar ──────────────────────────────────────────────────────────────

fn make_progress_bar(total: u64, prefix: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::with_template("{prefix:.bold} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );
    pb.set_prefix(prefix.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging(cli: &Cli, config: &SealsumConfig) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let level = cli.log.as_deref().unwrap_or(&config.log.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let json = match &cli.log_format {
        Some(LogFormat::Json) => true,
        Some(LogFormat::Text) => false,
        None => config.log.format == "json",
    };

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}
