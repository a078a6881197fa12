// Command-line front end for the pack tools: toolbox row conversion,
// definition patching, and JSON validation.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use rand::Rng;
use tracing::{error, info, warn};

use iv_patch::TowOutcome;

#[derive(Parser)]
#[command(name = "iv-cli", about = "Immersive Vehicles pack maintenance tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert pasted toolbox rows into a definition JSON fragment.
    Convert {
        /// Which fragment to build from the rows.
        #[arg(long, value_enum)]
        mode: ConvertMode,
        /// Input file; reads stdin when omitted.
        input: Option<PathBuf>,
    },
    /// Patch vehicle definition files in place.
    Patch {
        #[arg(value_enum)]
        kind: PatchKind,
        /// Directory to scan recursively, or a single .json file.
        root: PathBuf,
        /// Report what would change without writing.
        #[arg(long)]
        dry_run: bool,
        /// Extension appended to the backup copy; empty disables backups.
        #[arg(long, default_value = ".bak")]
        backup_ext: String,
        /// Process only the first N files.
        #[arg(long, default_value_t = 0)]
        limit: usize,
    },
    /// Validate JSON files, tolerating // and /* */ comments by default.
    Validate {
        /// Directory to scan recursively.
        root: PathBuf,
        /// Strict RFC 8259 parsing, no comment stripping.
        #[arg(long)]
        no_comments: bool,
        /// Only print the summary.
        #[arg(long, short)]
        quiet: bool,
        /// Stop at the first invalid file.
        #[arg(long)]
        fail_fast: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ConvertMode {
    Hitbox,
    Part,
    Animation,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PatchKind {
    Bodyroll,
    Tow,
    Damage,
    Upholstery,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().without_time().compact().init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Command::Convert { mode, input } => convert(mode, input.as_deref()),
        Command::Patch {
            kind,
            root,
            dry_run,
            backup_ext,
            limit,
        } => patch(kind, &root, dry_run, &backup_ext, limit),
        Command::Validate {
            root,
            no_comments,
            quiet,
            fail_fast,
        } => validate(&root, !no_comments, quiet, fail_fast),
    }
}

fn convert(mode: ConvertMode, input: Option<&Path>) -> Result<ExitCode> {
    let text = match input {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading stdin")?;
            buffer
        }
    };

    let json = match mode {
        ConvertMode::Hitbox => iv_utils::to_pretty(&iv_toolbox::collision_groups(&text)?),
        ConvertMode::Part => iv_utils::to_pretty(&iv_toolbox::parts(&text)?),
        ConvertMode::Animation => iv_utils::to_pretty(&iv_toolbox::animation_entries(&text)?),
    };
    println!("{json}");
    Ok(ExitCode::SUCCESS)
}

fn patch(
    kind: PatchKind,
    root: &Path,
    dry_run: bool,
    backup_ext: &str,
    limit: usize,
) -> Result<ExitCode> {
    let mut files = if root.is_file() {
        vec![root.to_path_buf()]
    } else if root.is_dir() {
        iv_utils::collect_json_files(root)
    } else {
        bail!("no such path: {}", root.display());
    };
    if limit > 0 {
        files.truncate(limit);
    }
    info!("scanning {} json files under {}", files.len(), root.display());

    let mut rng = rand::thread_rng();
    let mut modified = 0usize;
    for path in &files {
        match patch_file(kind, path, dry_run, backup_ext, &mut rng) {
            Ok(true) => modified += 1,
            Ok(false) => {}
            Err(err) => warn!("{}: {err:#}", path.display()),
        }
    }
    info!("done, modified {modified} of {} files", files.len());
    Ok(ExitCode::SUCCESS)
}

fn patch_file<R: Rng>(
    kind: PatchKind,
    path: &Path,
    dry_run: bool,
    backup_ext: &str,
    rng: &mut R,
) -> Result<bool> {
    let raw = fs::read_to_string(path).context("read")?;
    let mut data = iv_utils::parse_lenient(&raw).context("parse")?;

    let changed = match kind {
        PatchKind::Bodyroll => iv_patch::bodyroll::add_visibility(&mut data),
        PatchKind::Tow => {
            let outcome = iv_patch::tow::add_flatbed(&mut data);
            if outcome != TowOutcome::Added {
                info!("skip {}: {}", path.display(), outcome.reason());
            }
            outcome == TowOutcome::Added
        }
        PatchKind::Damage => iv_patch::damage::add_totaled_animations(&mut data, rng),
        PatchKind::Upholstery => iv_patch::upholstery::convert_materials(&mut data),
    };

    if !changed {
        return Ok(false);
    }
    if dry_run {
        info!("would modify {}", path.display());
        return Ok(true);
    }
    if !backup_ext.is_empty() {
        let backup = backup_path(path, backup_ext);
        fs::copy(path, &backup)
            .with_context(|| format!("backing up to {}", backup.display()))?;
    }
    iv_utils::write_pretty(path, &data).context("write")?;
    info!("modified {}", path.display());
    Ok(true)
}

fn backup_path(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(ext);
    PathBuf::from(name)
}

fn validate(root: &Path, allow_comments: bool, quiet: bool, fail_fast: bool) -> Result<ExitCode> {
    if !root.is_dir() {
        error!("not a directory: {}", root.display());
        return Ok(ExitCode::from(2));
    }
    let files = iv_utils::collect_json_files(root);
    if !quiet {
        info!("validating {} files under {}", files.len(), root.display());
    }

    let mut ok = 0usize;
    let mut failed = 0usize;
    for path in &files {
        let result = fs::read_to_string(path)
            .map_err(|e| format!("read error: {e}"))
            .and_then(|raw| iv_utils::validate_text(&raw, allow_comments));
        match result {
            Ok(()) => {
                ok += 1;
                if !quiet {
                    println!("OK   {}", path.display());
                }
            }
            Err(msg) => {
                failed += 1;
                println!("FAIL {}: {msg}", path.display());
                if fail_fast {
                    break;
                }
            }
        }
    }
    println!("OK: {ok}  FAIL: {failed}");
    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
