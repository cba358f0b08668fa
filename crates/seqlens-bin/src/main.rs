//! Seqlens entrypoint: read terminal output, print a transcript that
//! names every control and escape sequence.

mod interactive;
mod timings;

use anyhow::{Context, Result, bail};
use clap::Parser;
use core_config::ColorMode;
use core_emit::{Emitter, Palette};
use core_input::InputBuffer;
use core_seq::{Options, Processor};
use nix::sys::stat::{SFlag, fstat};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, IsTerminal, Read, Write};
use std::os::fd::{AsRawFd, RawFd};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(
    name = "seqlens",
    version,
    about = "Format terminal escapes and control sequences for human consumption"
)]
struct Args {
    /// Input file (`-` for standard input).
    input: Option<PathBuf>,
    /// Output file (`-` for standard output).
    output: Option<PathBuf>,
    /// Don't print ^X notation for C0 controls.
    #[arg(short = 'C')]
    no_control_hats: bool,
    /// Don't print description lines.
    #[arg(short = 'D')]
    no_descriptions: bool,
    /// Don't print label lines.
    #[arg(short = 'L')]
    no_labels: bool,
    /// Don't print escape-echo lines.
    #[arg(short = 'E')]
    no_escapes: bool,
    /// Colorize the output.
    #[arg(
        long,
        alias = "colour",
        value_name = "WHEN",
        num_args = 0..=1,
        default_missing_value = "always"
    )]
    color: Option<ColorWhen>,
    /// Read timing info from FILE and emit delay lines.
    #[arg(short = 't', long, value_name = "FILE")]
    timings: Option<PathBuf>,
    /// Don't adjust terminal modes or finish lines on signals.
    #[arg(short = 'I', long = "no-interactive")]
    no_interactive: bool,
    /// Force buffered I/O.
    #[arg(short = 'b', long)]
    buffered: bool,
    /// Configuration file path (overrides discovery of `seqlens.toml`).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ColorWhen {
    Auto,
    Always,
    Never,
}

enum InputHandle {
    Stdin(io::Stdin),
    File(File),
}

impl InputHandle {
    fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(Self::Stdin(io::stdin())),
            Some(p) if p.as_os_str() == "-" => Ok(Self::Stdin(io::stdin())),
            Some(p) => Ok(Self::File(File::open(p).with_context(|| {
                format!("couldn't open file {}", p.display())
            })?)),
        }
    }

    fn is_terminal(&self) -> bool {
        match self {
            Self::Stdin(s) => s.is_terminal(),
            Self::File(f) => f.is_terminal(),
        }
    }

    fn raw_fd(&self) -> RawFd {
        match self {
            Self::Stdin(s) => s.as_raw_fd(),
            Self::File(f) => f.as_raw_fd(),
        }
    }

    fn is_regular_file(&self) -> bool {
        fstat(self.raw_fd())
            .map(|st| st.st_mode & SFlag::S_IFMT.bits() == SFlag::S_IFREG.bits())
            .unwrap_or(false)
    }

    fn into_reader(self, buffered: bool) -> Box<dyn Read> {
        match (self, buffered) {
            (Self::Stdin(s), true) => Box::new(io::BufReader::new(s)),
            (Self::Stdin(s), false) => Box::new(s),
            (Self::File(f), true) => Box::new(io::BufReader::new(f)),
            (Self::File(f), false) => Box::new(f),
        }
    }
}

fn open_output(path: Option<&Path>, buffered: bool) -> Result<(Box<dyn Write>, bool)> {
    match path {
        None => {
            let out = io::stdout();
            let tty = out.is_terminal();
            if buffered {
                Ok((Box::new(io::BufWriter::new(out)), tty))
            } else {
                // Stdout is already line buffered.
                Ok((Box::new(out), tty))
            }
        }
        Some(p) if p.as_os_str() == "-" => open_output(None, buffered),
        Some(p) => {
            let file = File::create(p)
                .with_context(|| format!("couldn't open file {}", p.display()))?;
            let tty = file.is_terminal();
            let writer: Box<dyn Write> = if buffered {
                Box::new(io::BufWriter::new(file))
            } else {
                Box::new(io::LineWriter::new(file))
            };
            Ok((writer, tty))
        }
    }
}

/// Transcript output must stay clean, so diagnostics go to a log file and
/// only when asked for via `SEQLENS_LOG=<path>`; `RUST_LOG` filters as
/// usual.
fn configure_logging() -> Option<WorkerGuard> {
    let path = PathBuf::from(std::env::var_os("SEQLENS_LOG")?);
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsStr::new("seqlens.log").to_os_string());
    let appender = tracing_appender::rolling::never(dir, name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
    {
        Ok(()) => Some(guard),
        Err(_err) => {
            // A global subscriber is already installed; drop the guard so
            // the writer shuts down.
            None
        }
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn resolve_options(args: &Args, cfg: &core_config::Config) -> Options {
    Options {
        control_hats: cfg.file.output.control_hats && !args.no_control_hats,
        labels: cfg.file.output.labels && !args.no_labels,
        descriptions: cfg.file.output.descriptions && !args.no_descriptions,
        escapes: cfg.file.output.escapes && !args.no_escapes,
    }
}

fn resolve_palette(args: &Args, cfg: &core_config::Config, output_tty: bool) -> Palette {
    let colorize = match args.color {
        Some(ColorWhen::Always) => true,
        Some(ColorWhen::Never) => false,
        Some(ColorWhen::Auto) => output_tty,
        None => match cfg.file.color.mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => output_tty,
        },
    };
    if !colorize {
        return Palette::default();
    }
    let mut overrides: Vec<String> = Vec::new();
    if let Some(palette) = &cfg.file.color.palette {
        overrides.push(palette.clone());
    }
    if let Ok(env) = std::env::var("SEQLENS_COLORS") {
        overrides.push(env);
    }
    Palette::resolve(overrides.iter().map(String::as_str))
}

fn service_pending_signal<R: Read, W: Write>(
    p: &mut Processor<'_, R, W>,
    term: Option<&interactive::TermGuard>,
    output_tty: bool,
) -> Result<()> {
    let Some(sig) = interactive::pending() else {
        return Ok(());
    };
    // Finish the current unit of work first.
    if p.lookahead_available() {
        return Ok(());
    }
    info!(target: "runtime.signal", signal = %sig, "pending_signal");
    if output_tty {
        p.finish().context("write error")?;
    }
    if let Some(guard) = term {
        guard.set_saved();
    }
    interactive::deliver_default(sig);
    if let Some(guard) = term {
        guard.set_working();
    }
    interactive::clear_pending();
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let cfg = core_config::load_from(args.config.clone())?;
    let opts = resolve_options(&args, &cfg);

    let input = InputHandle::open(args.input.as_deref())?;
    let input_tty = input.is_terminal();
    let input_fd = input.raw_fd();
    // Byte-at-a-time reads keep interactive use responsive; plain files
    // get buffering regardless.
    let buffer_reads = args.buffered || input.is_regular_file();

    let (writer, output_tty) = open_output(args.output.as_deref(), args.buffered)?;
    let palette = resolve_palette(&args, &cfg, output_tty);

    let mut term_guard = None;
    if !args.no_interactive {
        if input_tty {
            term_guard = interactive::tty_setup(input_fd, output_tty);
        }
        interactive::install_handlers();
    }

    info!(
        target: "runtime",
        input_tty,
        output_tty,
        timings = args.timings.is_some(),
        "startup"
    );

    let mut delays = match &args.timings {
        Some(path) => Some(timings::Timings::open(path)?),
        None => None,
    };

    let mut emitter = Emitter::with_palette(writer, palette);
    let input_buffer = InputBuffer::new(input.into_reader(buffer_reads));
    let mut p = Processor::new(input_buffer, &mut emitter, opts);

    if delays.is_some() {
        // The first line of a recording is its timestamp header; the
        // delays only cover what follows it.
        while let Some(c) = p.fetch() {
            p.process(c).context("write error")?;
            if c == b'\n' {
                break;
            }
        }
        p.reset_count();
    }

    loop {
        if let Some(source) = delays.as_mut() {
            if p.delay_due() && !p.emit_delays(source).context("write error")? {
                delays = None;
            }
        }
        service_pending_signal(&mut p, term_guard.as_ref(), output_tty)?;
        match p.fetch() {
            Some(c) => p.process(c).context("write error")?,
            None => {
                if interactive::pending().is_some() {
                    continue;
                }
                break;
            }
        }
    }
    p.finish().context("write error")?;

    let read_error = p.io_error().map(|e| e.to_string());
    drop(p);
    emitter.flush().context("write error")?;
    drop(term_guard);

    if let Some(e) = read_error {
        bail!("read error: {e}");
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    run(args)
}
