use anyhow::{anyhow, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use digit_pad_lib::commands::{config, history, pad, session, AppContext};
use digit_pad_lib::services::classifier::Classifier;
use digit_pad_lib::services::config::ConfigManager;
use digit_pad_lib::services::pad::{PadState, RecognitionStatus};
use digit_pad_lib::utils::logging::init_tracing;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::info;

fn cli() -> Command {
    Command::new("digit-pad")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sketch a digit, downsample it to 28x28 and classify it over HTTP")
        .subcommand_required(true)
        .arg(
            Arg::new("server")
                .long("server")
                .global(true)
                .help("Classifier base URL for this run (e.g. http://127.0.0.1:5000)"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(
            Command::new("recognize")
                .about("Place an image file on the pad and classify it")
                .arg(
                    Arg::new("image")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Raster image (white digit on black works best)"),
                ),
        )
        .subcommand(
            Command::new("draw")
                .about("Replay pen strokes onto the pad and classify the result")
                .arg(
                    Arg::new("stroke")
                        .long("stroke")
                        .required(true)
                        .action(ArgAction::Append)
                        .help("Stroke points as \"x,y x,y ...\"; repeat for more strokes"),
                )
                .arg(
                    Arg::new("save")
                        .long("save")
                        .value_parser(value_parser!(PathBuf))
                        .help("Also export the pad as PNG"),
                )
                .arg(
                    Arg::new("no-recognize")
                        .long("no-recognize")
                        .action(ArgAction::SetTrue)
                        .help("Only draw (and save), do not call the classifier"),
                ),
        )
        .subcommand(
            Command::new("session")
                .about("Interactive pad driven by line commands (see 'help')")
                .arg(
                    Arg::new("script")
                        .long("script")
                        .value_parser(value_parser!(PathBuf))
                        .help("Read commands from a file instead of stdin"),
                ),
        )
        .subcommand(
            Command::new("history")
                .about("Show recent recognitions, newest first")
                .arg(
                    Arg::new("clear")
                        .long("clear")
                        .action(ArgAction::SetTrue)
                        .help("Delete all stored recognitions"),
                ),
        )
        .subcommand(Command::new("health").about("Check that the classifier is reachable"))
        .subcommand(
            Command::new("config")
                .about("Show the effective configuration")
                .arg(
                    Arg::new("path")
                        .long("path")
                        .action(ArgAction::SetTrue)
                        .help("Print the config file location only"),
                )
                .arg(
                    Arg::new("init")
                        .long("init")
                        .action(ArgAction::SetTrue)
                        .help("Write the default configuration if none exists"),
                ),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();

    init_tracing(matches.get_flag("json-logs"), matches.get_flag("verbose"));

    let manager = ConfigManager::new().map_err(|e| anyhow!(e))?;
    let server = matches.get_one::<String>("server").map(String::as_str);

    match matches.subcommand() {
        Some(("config", args)) => run_config(&manager, server, args),
        Some((name, args)) => {
            let app_config = config::load_config(&manager, server).map_err(|e| anyhow!(e))?;
            info!(server = %app_config.server.base_url, "using classifier");

            let ctx = AppContext::from_config(app_config).map_err(|e| anyhow!(e))?;
            let state = ctx.initial_state().map_err(|e| anyhow!(e))?;

            run_command(&ctx, state, name, args).await
        }
        None => Err(anyhow!("no command given")),
    }
}

async fn run_command<C: Classifier>(
    ctx: &AppContext<C>,
    state: PadState,
    name: &str,
    args: &ArgMatches,
) -> Result<()> {
    match name {
        "recognize" => {
            let path = args
                .get_one::<PathBuf>("image")
                .ok_or_else(|| anyhow!("missing image path"))?;

            let state = pad::recognize_file(ctx, state, path)
                .await
                .map_err(|e| anyhow!(e))?;
            finish(&state)
        }
        "draw" => {
            let strokes = args
                .get_many::<String>("stroke")
                .into_iter()
                .flatten()
                .map(|s| pad::parse_stroke(s))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| anyhow!(e))?;

            let state = pad::apply_strokes(state, &strokes);

            if let Some(path) = args.get_one::<PathBuf>("save") {
                state.surface.save_png(path).map_err(|e| anyhow!(e))?;
                println!("Saved pad to {}", path.display());
            }

            if args.get_flag("no-recognize") {
                return Ok(());
            }

            let state = pad::recognize(ctx, state).await.map_err(|e| anyhow!(e))?;
            finish(&state)
        }
        "session" => {
            let mut stdout = std::io::stdout();

            let result = match args.get_one::<PathBuf>("script") {
                Some(path) => {
                    let file = std::fs::File::open(path)
                        .map_err(|e| anyhow!("Failed to open script {}: {}", path.display(), e))?;
                    session::run_session(ctx, state, BufReader::new(file), &mut stdout).await
                }
                None => {
                    let stdin = std::io::stdin();
                    session::run_session(ctx, state, stdin.lock(), &mut stdout).await
                }
            };
            result.map_err(|e| anyhow!(e))?;

            Ok(())
        }
        "history" => {
            if args.get_flag("clear") {
                history::clear_history(ctx, state).map_err(|e| anyhow!(e))?;
                println!("History cleared");
            } else {
                for line in history::history_lines(&state.history) {
                    println!("{}", line);
                }
            }
            Ok(())
        }
        "health" => {
            let msg = ctx.recognizer.classifier().health_check().await?;
            println!("Classifier is up: {}", msg);
            Ok(())
        }
        other => Err(anyhow!("unknown command: {}", other)),
    }
}

fn run_config(manager: &ConfigManager, server: Option<&str>, args: &ArgMatches) -> Result<()> {
    if args.get_flag("init") {
        if config::init_config(manager).map_err(|e| anyhow!(e))? {
            println!("Wrote default config to {}", config::get_config_path(manager));
        } else {
            println!("Config already exists at {}", config::get_config_path(manager));
        }
        return Ok(());
    }

    if args.get_flag("path") {
        println!("{}", config::get_config_path(manager));
        return Ok(());
    }

    let app_config = config::load_config(manager, server).map_err(|e| anyhow!(e))?;
    println!("{}", config::render_config(&app_config).map_err(|e| anyhow!(e))?);
    Ok(())
}

/// Print the result panel; a failed recognition exits non-zero
fn finish(state: &PadState) -> Result<()> {
    println!("{}", pad::status_report(&state.status));

    if let RecognitionStatus::Failed(_) = state.status {
        std::process::exit(1);
    }
    Ok(())
}
