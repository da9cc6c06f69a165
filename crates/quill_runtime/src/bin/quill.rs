//! Quill CLI entry point.

use std::env;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use quill_engine::{Mode, SchedulerConfig, TickMethod, TurnScheduler};
use quill_runtime::{
    Console, DemoGame, RustylineEditor, commands, load_snapshot, save_snapshot, scheduler,
};
use tracing::info;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

const DEFAULT_PORT: u16 = 4000;

/// CLI configuration parsed from arguments.
#[derive(Debug)]
struct CliConfig {
    mode: Mode,
    tick_method: TickMethod,
    tick_interval: Duration,
    time_factor: f64,
    port: u16,
    save: Option<PathBuf>,
    wizards: Vec<(String, String)>,
    show_help: bool,
    show_version: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            mode: Mode::SingleActor,
            tick_method: TickMethod::Command,
            tick_interval: Duration::from_secs(1),
            time_factor: 1.0,
            port: DEFAULT_PORT,
            save: None,
            wizards: Vec::new(),
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

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> CliResult<&'a str> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value").into())
}

fn parse_args(args: &[String]) -> CliResult<CliConfig> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--mode" => {
                i += 1;
                config.mode = match value(args, i, "--mode")? {
                    "if" => Mode::SingleActor,
                    "mud" => Mode::MultiActor,
                    other => return Err(format!("invalid --mode value: {other}").into()),
                };
            }
            "--tick" => {
                i += 1;
                config.tick_method = match value(args, i, "--tick")? {
                    "command" => TickMethod::Command,
                    "timer" => TickMethod::Timer,
                    other => return Err(format!("invalid --tick value: {other}").into()),
                };
            }
            "--tick-interval" => {
                i += 1;
                let raw = value(args, i, "--tick-interval")?;
                let secs: f64 = raw
                    .parse()
                    .ok()
                    .filter(|s: &f64| s.is_finite() && *s > 0.0)
                    .ok_or_else(|| format!("invalid --tick-interval value: {raw}"))?;
                config.tick_interval = Duration::from_secs_f64(secs);
            }
            "--speed" => {
                i += 1;
                let raw = value(args, i, "--speed")?;
                config.time_factor = raw
                    .parse()
                    .ok()
                    .filter(|f: &f64| f.is_finite() && *f >= 0.0)
                    .ok_or_else(|| format!("invalid --speed value: {raw}"))?;
            }
            "--port" => {
                i += 1;
                let raw = value(args, i, "--port")?;
                config.port = raw
                    .parse()
                    .map_err(|_| format!("invalid --port value: {raw}"))?;
            }
            "--save" => {
                i += 1;
                config.save = Some(PathBuf::from(value(args, i, "--save")?));
            }
            "--wizard" => {
                i += 1;
                let raw = value(args, i, "--wizard")?;
                let (name, password) = raw
                    .split_once(':')
                    .ok_or_else(|| format!("--wizard expects NAME:PASSWORD, got: {raw}"))?;
                config
                    .wizards
                    .push((name.to_lowercase(), password.to_string()));
            }
            arg => return Err(format!("unknown option: {arg}").into()),
        }
        i += 1;
    }

    Ok(config)
}

fn epoch() -> CliResult<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2020, 1, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .ok_or_else(|| "invalid epoch".into())
}

fn run(args: Vec<String>) -> CliResult<()> {
    let config = parse_args(&args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("quill {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // The console shares the terminal with log output.
    quill_runtime::init_tracing(match config.mode {
        Mode::MultiActor => "info",
        Mode::SingleActor => "warn",
    });

    let sched_config = SchedulerConfig::new()
        .with_mode(config.mode)
        .with_tick_method(config.tick_method)
        .with_tick_interval(config.tick_interval)
        .with_time_factor(config.time_factor)
        .with_epoch(epoch()?);

    let mut game = DemoGame::new().with_mode(config.mode);
    if let Some(path) = &config.save {
        game = game.with_save_path(path);
    }
    for (name, password) in &config.wizards {
        game = game.with_wizard(name, password);
    }

    let snapshot = match &config.save {
        Some(path) if path.exists() => {
            info!(path = %path.display(), "loading saved game");
            Some(load_snapshot(path)?)
        }
        _ => None,
    };
    let sched = scheduler(sched_config, game, snapshot);

    let sched = match config.mode {
        Mode::SingleActor => run_console(sched)?,
        Mode::MultiActor => run_server(sched, config.port)?,
    };
    if let Some(path) = &config.save {
        save_snapshot(&sched.snapshot(), path)?;
        info!(path = %path.display(), "game saved on exit");
    }
    Ok(())
}

fn run_console(mut sched: TurnScheduler<DemoGame>) -> CliResult<TurnScheduler<DemoGame>> {
    let mut words: Vec<String> = sched.game().soul().verbs().verbs().map(str::to_string).collect();
    words.extend(commands::COMMANDS.iter().map(|c| (*c).to_string()));
    let mut editor = RustylineEditor::new(words)?;

    let (console, connection) = Console::connect();
    sched.connect(connection)?;
    let stop = sched.stop_handle();
    let handle = sched.spawn_single_actor()?;

    let result = console.run(&mut editor, &stop);
    // Dropping the console closes its connection, which ends the loop.
    drop(console);
    let sched = handle
        .join()
        .map_err(|_| "scheduler thread panicked")??;
    info!(ticks = sched.tick_count(), "session over");
    result?;
    Ok(sched)
}

fn run_server(sched: TurnScheduler<DemoGame>, port: u16) -> CliResult<TurnScheduler<DemoGame>> {
    let stop = sched.stop_handle();
    let addr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, port));
    let (incoming, listener) = quill_runtime::listen(addr, stop.clone())?;
    println!("Quill is listening on port {}.", listener.port());

    let mut sched = sched.with_incoming(incoming);
    let result = sched.run_multi_actor();
    stop.stop();
    listener.join();
    result?;
    Ok(sched)
}

fn print_help() {
    println!(
        "\x1b[1mQuill\x1b[0m - Text adventure with a free-text emote interpreter

\x1b[1mUSAGE:\x1b[0m
    quill [OPTIONS]

\x1b[1mOPTIONS:\x1b[0m
    -h, --help              Print help information
    -V, --version           Print version information
    --mode if|mud           Single player at the console (default) or players over TCP
    --tick command|timer    Advance the world per command (default) or on a timer
    --tick-interval SECS    Real seconds per server tick (default 1)
    --speed FACTOR          Game seconds per real second; 0 freezes the clock (default 1)
    --port PORT             TCP port in mud mode (default {DEFAULT_PORT})
    --save PATH             Save file; loaded at startup when it exists, written on exit
    --wizard NAME:PASSWORD  Reserve a wizard name, protected by a password

\x1b[1mEXAMPLES:\x1b[0m
    quill                                 Play alone in the house
    quill --speed 0 --save house.qs       Frozen clock, with saving
    quill --mode mud --port 4000          Let players telnet in

\x1b[1mIN-GAME COMMANDS:\x1b[0m
    look, wait [minutes], time, save, quit, help
    Any social verb: smile, hug cat, poke kate in the ribs, say hello
    Ctrl+D                  Leave the game

Set RUST_LOG=info to see diagnostic logging on stderr."
    );
}
