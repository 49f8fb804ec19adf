//! Lower-third configurator CLI.
//!
//! Provides both human-friendly and agent-friendly (robot mode) interfaces
//! over the configuration state and synchronization engine.
#![forbid(unsafe_code)]

use std::io::{self, IsTerminal};
use std::sync::Arc;

use clap::Parser;
use console::style;
use serde::Serialize;
use serde_json::{json, Value};

use ltc::cli::{self, Cli, Commands, ExportTarget};
use ltc::engine::{recommend, rescale, validate};
use ltc::error::{LtError, Result};
use ltc::export;
use ltc::logging::init_logging;
use ltc::model::Profile;
use ltc::store::{default_store_path, paths, FileStore, SharedStore};
use ltc::sync::ProfileRepository;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle no-color flag or non-TTY
    if cli.no_color || !io::stdout().is_terminal() {
        console::set_colors_enabled(false);
    }

    init_logging(cli.use_json(), u8::from(cli.verbose), cli.quiet);

    if let Err(e) = run(&cli).await {
        output_error(&cli, &e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        None => print_quick_start(cli),
        Some(Commands::Init(args)) => cmd_init(cli, args).await,
        Some(Commands::Show(args)) => cmd_show(cli, args).await,
        Some(Commands::Set(args)) => cmd_set(cli, args).await,
        Some(Commands::Migrate(args)) => cmd_migrate(cli, args).await,
        Some(Commands::Validate(args)) => cmd_validate(cli, args).await,
        Some(Commands::Recommend(args)) => cmd_recommend(cli, args).await,
        Some(Commands::Scale(args)) => cmd_scale(cli, args).await,
        Some(Commands::Export(args)) => cmd_export(cli, args).await,
        Some(Commands::Version) => cmd_version(cli),
        Some(Commands::Completions(args)) => cmd_completions(cli, args),
    }
}

fn open_store(cli: &Cli) -> Result<SharedStore> {
    let path = cli.store.clone().unwrap_or_else(default_store_path);
    Ok(Arc::new(FileStore::open(path)?))
}

fn open_repo(cli: &Cli) -> Result<(SharedStore, ProfileRepository)> {
    let store = open_store(cli)?;
    let repo = ProfileRepository::new(Arc::clone(&store));
    Ok((store, repo))
}

// === Quick Start (Robot Mode Optimized) ===

/// Prints quick-start help optimized for both humans and AI agents.
#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn print_quick_start(cli: &Cli) -> Result<()> {
    if cli.use_json() {
        print_robot_quick_start();
    } else {
        print_human_quick_start();
    }
    Ok(())
}

fn print_robot_quick_start() {
    let help = RobotQuickStart {
        tool: "ltc",
        version: VERSION,
        description: "Lower-third overlay configuration engine with robot mode",
        profiles: RobotProfiles {
            create: "ltc init <NAME>",
            show: "ltc show <NAME> --robot",
            list: "ltc show --list --robot",
            edit_field: "ltc set <NAME> main_text.content \"Breaking news\"",
            migrate_legacy: "ltc migrate <NAME>",
        },
        analysis: RobotAnalysis {
            validate: "ltc validate <NAME> --robot",
            recommend: "ltc recommend <NAME> --robot",
        },
        transforms: RobotTransforms {
            rescale: "ltc scale <NAME> 1280 720 --save",
            export_obs: "ltc export <NAME> --target obs",
            export_css: "ltc export <NAME> --target css",
            export_web: "ltc export <NAME> --target web --base-url https://overlay.example",
        },
        output_modes: OutputModes {
            human: "--format=text (default)",
            robot: "--robot or --format=json",
            compact: "--format=json-compact",
        },
        store: "Store document defaults to the platform data dir; override with --store <PATH>",
    };

    println!("{}", serde_json::to_string_pretty(&help).unwrap());
}

fn print_human_quick_start() {
    println!(
        "{} {} - Lower-third configurator\n",
        style("ltc").bold().cyan(),
        VERSION
    );

    println!("{}", style("QUICK START").bold().underlined());
    println!();
    println!("  {}  Create a profile", style("ltc init \"Noticias\"").green());
    println!("  {}  Show a profile", style("ltc show \"Noticias\"").green());
    println!("  {}  List profiles", style("ltc show --list").green());
    println!(
        "  {}  Edit one field",
        style("ltc set \"Noticias\" logo.visible true").green()
    );
    println!("  {}  Validate", style("ltc validate \"Noticias\"").green());
    println!(
        "  {}  Rescale to 720p",
        style("ltc scale \"Noticias\" 1280 720 --save").green()
    );
    println!(
        "  {}  Export for OBS",
        style("ltc export \"Noticias\" --target obs").green()
    );
    println!();

    println!("{}", style("ROBOT MODE (for scripts and agents)").bold().underlined());
    println!();
    println!("  {}  JSON output", style("ltc --robot <command>").cyan());
    println!();

    println!("Run {} for full help", style("ltc --help").yellow());
}

// === Robot Mode JSON Structures ===

#[derive(Serialize)]
struct RobotQuickStart {
    tool: &'static str,
    version: &'static str,
    description: &'static str,
    profiles: RobotProfiles,
    analysis: RobotAnalysis,
    transforms: RobotTransforms,
    output_modes: OutputModes,
    store: &'static str,
}

#[derive(Serialize)]
struct RobotProfiles {
    create: &'static str,
    show: &'static str,
    list: &'static str,
    edit_field: &'static str,
    migrate_legacy: &'static str,
}

#[derive(Serialize)]
struct RobotAnalysis {
    validate: &'static str,
    recommend: &'static str,
}

#[derive(Serialize)]
struct RobotTransforms {
    rescale: &'static str,
    export_obs: &'static str,
    export_css: &'static str,
    export_web: &'static str,
}

#[derive(Serialize)]
struct OutputModes {
    human: &'static str,
    robot: &'static str,
    compact: &'static str,
}

// === Command Implementations ===

async fn cmd_init(cli: &Cli, args: &cli::InitArgs) -> Result<()> {
    let (_, repo) = open_repo(cli)?;

    if !args.force && repo.load(&args.name).await.is_ok() {
        return Err(LtError::Other(format!(
            "Profile '{}' already exists (use --force to overwrite)",
            args.name
        )));
    }

    let profile = Profile::with_defaults(&args.name);
    repo.save(&profile).await?;

    if cli.use_json() {
        output_json(cli, &json!({ "created": args.name, "ok": true }));
    } else if !cli.quiet {
        println!("Profile {} created", style(&args.name).green());
    }
    Ok(())
}

async fn cmd_show(cli: &Cli, args: &cli::ShowArgs) -> Result<()> {
    let (_, repo) = open_repo(cli)?;

    if args.list {
        let mut names = repo.list().await?;
        names.sort();
        if cli.use_json() {
            output_json(cli, &json!({ "profiles": names }));
        } else if names.is_empty() {
            println!("{}", style("No profiles stored").yellow());
        } else {
            for name in names {
                println!("{name}");
            }
        }
        return Ok(());
    }

    let Some(name) = &args.name else {
        return Err(LtError::Other(
            "Provide a profile name, or --list to list all profiles".to_string(),
        ));
    };
    let profile = repo.load(name).await?;

    if cli.use_json() {
        output_json(cli, &ltc::codec::encode_profile(&profile));
    } else {
        print_profile_summary(&profile);
    }
    Ok(())
}

fn print_profile_summary(profile: &Profile) {
    let config = &profile.config;
    println!("{}: {}", style("Profile").bold(), profile.name);
    println!("{}: {}", style("Category").bold(), profile.category.as_wire());
    println!(
        "{}: {}x{}",
        style("Canvas").bold(),
        config.layout.canvas.width,
        config.layout.canvas.height
    );
    println!(
        "{}: {} ({})",
        style("Logo").bold(),
        config.logo.mode.tag(),
        visibility(config.logo.visible)
    );
    for (name, slot) in config.text_slots() {
        let content = if slot.content.is_empty() {
            style("<empty>").dim().to_string()
        } else {
            slot.content.clone()
        };
        println!(
            "{}: {} ({})",
            style(name).bold(),
            content,
            visibility(slot.visible)
        );
    }
    println!(
        "{}: {} ({})",
        style("Advertisement").bold(),
        if profile.config.advertisement.url.is_empty() {
            "<no url>"
        } else {
            &profile.config.advertisement.url
        },
        visibility(config.advertisement.visible)
    );
    if !profile.guest.name.is_empty() {
        println!(
            "{}: {} ({})",
            style("Guest").bold(),
            profile.guest.name,
            profile.guest.role
        );
    }
}

fn visibility(visible: bool) -> console::StyledObject<&'static str> {
    if visible {
        style("visible").green()
    } else {
        style("hidden").dim()
    }
}

async fn cmd_set(cli: &Cli, args: &cli::SetArgs) -> Result<()> {
    let (store, repo) = open_repo(cli)?;

    // The leaf write targets the advanced record; make sure it exists,
    // migrating a legacy-only profile on the way.
    let advanced = store.get(&paths::advanced(&args.name)).await?;
    if !advanced.is_some_and(|record| record.is_object()) {
        let profile = repo.load(&args.name).await?;
        repo.save(&profile).await?;
    }

    let relative = format!("config/{}", args.path.replace('.', "/"));
    let value: Value = serde_json::from_str(&args.value)
        .unwrap_or_else(|_| Value::String(args.value.clone()));
    store
        .set(&paths::field(&args.name, &relative), value.clone())
        .await?;

    if cli.use_json() {
        output_json(
            cli,
            &json!({ "profile": args.name, "path": args.path, "value": value, "ok": true }),
        );
    } else if !cli.quiet {
        println!("{} = {}", style(&args.path).bold(), value);
    }
    Ok(())
}

async fn cmd_migrate(cli: &Cli, args: &cli::MigrateArgs) -> Result<()> {
    let (_, repo) = open_repo(cli)?;

    // Load runs the advanced-then-legacy fallback chain; saving writes
    // both records at the current schema version.
    let profile = repo.load(&args.name).await?;
    repo.save(&profile).await?;

    if cli.use_json() {
        output_json(
            cli,
            &json!({
                "migrated": args.name,
                "schema_version": profile.schema_version,
                "ok": true
            }),
        );
    } else if !cli.quiet {
        println!(
            "Profile {} upgraded to schema v{}",
            style(&args.name).green(),
            profile.schema_version
        );
    }
    Ok(())
}

async fn cmd_validate(cli: &Cli, args: &cli::ValidateArgs) -> Result<()> {
    let (_, repo) = open_repo(cli)?;
    let profile = repo.load(&args.name).await?;
    let report = validate(&profile.config);

    if cli.use_json() {
        output_json(cli, &report);
    } else {
        if report.valid {
            println!("{}", style("Configuration valid").green().bold());
        } else {
            println!("{}", style("Configuration invalid").red().bold());
        }
        for error in &report.errors {
            println!("  {} {}", style("error:").red(), error);
        }
        for warning in &report.warnings {
            println!("  {} {}", style("warning:").yellow(), warning);
        }
    }
    Ok(())
}

async fn cmd_recommend(cli: &Cli, args: &cli::RecommendArgs) -> Result<()> {
    let (_, repo) = open_repo(cli)?;
    let profile = repo.load(&args.name).await?;
    let recommendations = recommend(&profile.config);

    if cli.use_json() {
        output_json(cli, &recommendations);
    } else if recommendations.is_empty() {
        println!("{}", style("No recommendations").green());
    } else {
        for rec in &recommendations {
            println!(
                "{} [{:?}/{:?}] {}",
                style("*").cyan(),
                rec.priority,
                rec.kind,
                style(&rec.title).bold()
            );
            println!("    {}", rec.description);
            println!("    {} {}", style("suggested:").dim(), rec.suggested_action);
        }
    }
    Ok(())
}

async fn cmd_scale(cli: &Cli, args: &cli::ScaleArgs) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        return Err(LtError::InvalidCanvas {
            width: args.width,
            height: args.height,
        });
    }

    let (_, repo) = open_repo(cli)?;
    let mut profile = repo.load(&args.name).await?;
    profile.config = rescale(&profile.config, args.width, args.height);

    if args.save {
        repo.save(&profile).await?;
    }

    if cli.use_json() {
        output_json(
            cli,
            &json!({
                "profile": args.name,
                "canvas": { "width": args.width, "height": args.height },
                "saved": args.save,
                "config": ltc::codec::encode(&profile.config),
            }),
        );
    } else if !cli.quiet {
        println!(
            "Rescaled {} to {}x{}{}",
            style(&args.name).green(),
            args.width,
            args.height,
            if args.save { " (saved)" } else { " (preview, use --save to persist)" }
        );
    }
    Ok(())
}

async fn cmd_export(cli: &Cli, args: &cli::ExportArgs) -> Result<()> {
    let (_, repo) = open_repo(cli)?;
    let profile = repo.load(&args.name).await?;

    match args.target {
        ExportTarget::Obs => output_json(cli, &export::obs_export(&profile.config)),
        ExportTarget::Css => println!("{}", export::stylesheet(&profile.config)),
        ExportTarget::Web => output_json(cli, &export::web_payload(&profile, &args.base_url)),
    }
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn cmd_version(cli: &Cli) -> Result<()> {
    if cli.use_json() {
        output_json(
            cli,
            &json!({
                "version": VERSION,
                "schema_version": ltc::model::SCHEMA_VERSION,
            }),
        );
    } else {
        println!("ltc {VERSION}");
        println!("schema: v{}", ltc::model::SCHEMA_VERSION);
    }
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn cmd_completions(_cli: &Cli, args: &cli::CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    clap_complete::generate(args.shell, &mut Cli::command(), "ltc", &mut io::stdout());
    Ok(())
}

// === Utility Functions ===

fn output_json<T: Serialize>(cli: &Cli, data: &T) {
    let json = if cli.use_compact_json() {
        serde_json::to_string(data).unwrap()
    } else {
        serde_json::to_string_pretty(data).unwrap()
    };
    println!("{json}");
}

fn output_error(cli: &Cli, error: &LtError) {
    if cli.use_json() {
        let json = json!({
            "error": true,
            "message": error.to_string(),
            "suggestion": error.suggestion(),
            "recoverable": error.is_user_recoverable(),
        });
        eprintln!("{}", serde_json::to_string_pretty(&json).unwrap());
    } else {
        eprintln!("{}: {}", style("Error").red().bold(), error);
        if let Some(suggestion) = error.suggestion() {
            eprintln!("{}: {}", style("Hint").yellow(), suggestion);
        }
    }
}
