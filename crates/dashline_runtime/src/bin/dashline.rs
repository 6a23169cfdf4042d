//! dashline CLI entry point.

use std::env;
use std::process::ExitCode;

use dashline_ecs::Timestep;
use dashline_game::{GameConfig, GameLayer};
use dashline_runtime::{Console, ScriptedEditor, describe};
use env_logger::Env;

/// CLI configuration parsed from arguments.
#[derive(Debug)]
struct CliConfig {
    batch_frames: Option<u32>,
    script: Option<String>,
    dt: f32,
    seed: Option<u64>,
    checkpoints: Option<usize>,
    verbosity: u8,
    show_help: bool,
    show_version: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            batch_frames: None,
            script: None,
            dt: 1.0 / 60.0,
            seed: None,
            checkpoints: None,
            verbosity: 0,
            show_help: false,
            show_version: false,
        }
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_args(args: &[String]) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-v" | "--verbose" => config.verbosity = config.verbosity.saturating_add(1),
            "-vv" => config.verbosity = config.verbosity.saturating_add(2),
            flag @ ("-b" | "--batch") => {
                i += 1;
                let frames = value(args, i, flag)?;
                config.batch_frames = Some(
                    frames
                        .parse()
                        .map_err(|_| format!("invalid {flag} value: {frames}"))?,
                );
            }
            flag @ ("-e" | "--exec") => {
                i += 1;
                config.script = Some(value(args, i, flag)?.to_string());
            }
            "--dt" => {
                i += 1;
                let dt = value(args, i, "--dt")?;
                config.dt = dt
                    .parse()
                    .ok()
                    .filter(|dt: &f32| dt.is_finite() && *dt > 0.0)
                    .ok_or_else(|| format!("invalid --dt value: {dt}"))?;
            }
            "--seed" => {
                i += 1;
                let seed = value(args, i, "--seed")?;
                config.seed = Some(
                    seed.parse()
                        .map_err(|_| format!("invalid --seed value: {seed}"))?,
                );
            }
            "--checkpoints" => {
                i += 1;
                let count = value(args, i, "--checkpoints")?;
                config.checkpoints = Some(
                    count
                        .parse()
                        .map_err(|_| format!("invalid --checkpoints value: {count}"))?,
                );
            }
            arg => {
                return Err(format!("unknown option: {arg}").into());
            }
        }
        i += 1;
    }

    Ok(config)
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(&args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("dashline {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_logging(config.verbosity);

    let mut game = GameConfig::default();
    if let Some(seed) = config.seed {
        game = game.with_seed(seed);
    }
    if let Some(capacity) = config.checkpoints {
        game = game.with_checkpoint_capacity(capacity);
    }
    let layer = GameLayer::new(game).map_err(|e| describe(&e))?;
    let timestep = Timestep::from_seconds(config.dt);

    // Scripted and batch runs never touch the terminal.
    if config.script.is_some() || config.batch_frames.is_some() {
        let editor = ScriptedEditor::from_script(config.script.as_deref().unwrap_or_default());
        let mut console = Console::with_editor(editor, layer, timestep).without_banner();
        console.run().map_err(|e| describe(&e))?;
        if let Some(frames) = config.batch_frames {
            console.step(frames).map_err(|e| describe(&e))?;
        }
        println!("{}", console.status());
        return Ok(());
    }

    let mut console = Console::new(layer, timestep)?;
    console.run().map_err(|e| describe(&e))?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mdashline\x1b[0m - Platformer on a small ECS with checkpoint rewind

\x1b[1mUSAGE:\x1b[0m
    dashline [OPTIONS]

\x1b[1mOPTIONS:\x1b[0m
    -h, --help              Print help information
    -V, --version           Print version information
    -b, --batch FRAMES      Run FRAMES frames without a console, print status, exit
    -e, --exec SCRIPT       Run `;`-separated console commands, print status, exit
    --dt SECONDS            Frame timestep (default 1/60)
    --seed N                Seed for particles
    --checkpoints N         Checkpoints kept before the oldest is dropped
    -v, --verbose           More logging (repeat for more; RUST_LOG overrides)

\x1b[1mEXAMPLES:\x1b[0m
    dashline                                  Start the console
    dashline -b 600                           Run ten seconds headless
    dashline -e 'press right; step 240'       Run into the spike and rewind
    RUST_LOG=dashline_game=debug dashline -b 60

\x1b[1mCONSOLE COMMANDS:\x1b[0m
{}",
        dashline_runtime::Command::help()
    );
}
