// Copyright (c) 2026 rezky_nightky

mod cell;
mod charset;
mod color;
mod column;
mod config;
mod frame;
mod grid;
mod rain;
mod ramp;
mod runtime;
mod terminal;

use std::env;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

#[cfg(unix)]
use std::thread;

use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};
use crossterm::event::{Event, KeyCode, KeyEventKind};

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::charset::{build_glyphs, charset_from_str};
use crate::column::Tuning;
use crate::config::{color_enabled_stdout, print_list_charsets, Args, DEFAULT_PARAMS_USAGE};
use crate::frame::Frame;
use crate::rain::{Rain, SPEED_MAX, SPEED_MIN, SPEED_STEP};
use crate::runtime::{BoldMode, ColorMode};
use crate::terminal::{restore_terminal_best_effort, Terminal};

/// Largest elapsed time fed into one animation step, so the rain does not
/// leap after a stall or a suspended terminal.
const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

const HELP_TEMPLATE_PLAIN: &str = "\
{before-help}{about-with-newline}
USAGE:
  {usage}

{all-args}{after-help}";

const HELP_TEMPLATE_COLOR: &str = "\
{before-help}{about-with-newline}
\x1b[1;36mUSAGE:\x1b[0m
  {usage}

{all-args}{after-help}";

fn build_info() -> &'static str {
    env!("GLYPHFALL_BUILD")
}

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Green))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Magenta))))
}

fn require_f64_range(name: &str, v: f64, min: f64, max: f64) -> f64 {
    if !v.is_finite() {
        eprintln!("failed to apply {} {} (must be a finite number)", name, v);
        std::process::exit(1);
    }
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn require_f32_range(name: &str, v: f32, min: f32, max: f32) -> f32 {
    if !v.is_finite() {
        eprintln!("failed to apply {} {} (must be a finite number)", name, v);
        std::process::exit(1);
    }
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn require_u8_range(name: &str, v: u8, min: u8, max: u8) -> u8 {
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn detect_color_mode_auto() -> ColorMode {
    let colorterm = env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorMode::TrueColor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term == "dumb" {
        return ColorMode::Mono;
    }

    ColorMode::Color256
}

fn detect_color_mode(args: &Args) -> ColorMode {
    if let Some(m) = args.colormode {
        return match m {
            0 => ColorMode::Mono,
            8 => ColorMode::Color256,
            24 => ColorMode::TrueColor,
            _ => {
                eprintln!("invalid --colormode: {} (allowed: 0,8,24)", m);
                std::process::exit(1);
            }
        };
    }

    detect_color_mode_auto()
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x1234567)
}

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }

    let mut cmd = Args::command();
    cmd = cmd.styles(clap_styles());
    cmd = cmd.before_help(DEFAULT_PARAMS_USAGE);
    let help_template = if color_enabled_stdout() {
        HELP_TEMPLATE_COLOR
    } else {
        HELP_TEMPLATE_PLAIN
    };
    cmd = cmd.help_template(help_template);
    cmd.build();

    if cmd.get_arguments().any(|a| a.get_id().as_str() == "help") {
        cmd = cmd.mut_arg("help", |a| a.help_heading("HELP"));
    }
    cmd.build();

    let matches = cmd.get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if args.list_charsets {
        print_list_charsets();
        return Ok(());
    }

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.info {
        println!("Version: v{}", env!("CARGO_PKG_VERSION"));
        println!("Build: {}", build_info());
        println!("Copyright: (c) 2026 {}", env!("CARGO_PKG_AUTHORS"));
        println!("License: {}", env!("CARGO_PKG_LICENSE"));
        println!("Source: {}", env!("CARGO_PKG_REPOSITORY"));
        return Ok(());
    }

    let color_mode = detect_color_mode(&args);

    let speed = require_f32_range("--speed", args.speed, SPEED_MIN, SPEED_MAX);
    let max_trail = require_f32_range("--max-trail", args.max_trail, 5.0, 100.0);
    let jitter = require_f32_range("--jitter", args.jitter, 0.0, 1000.0);
    let base_hue = require_f32_range("--hue", args.hue, 0.0, 360.0);
    let target_fps = require_f64_range("--fps", args.fps, 1.0, 240.0);

    let bold_mode = match require_u8_range("--bold", args.bold, 0, 2) {
        0 => BoldMode::Off,
        2 => BoldMode::All,
        _ => BoldMode::Head,
    };

    let duration_s = args.duration.map(|s| {
        if !s.is_finite() {
            eprintln!("failed to apply --duration {} (must be a finite number)", s);
            std::process::exit(1);
        }
        if s > 0.0 {
            return require_f64_range("--duration", s, 0.1, 86400.0);
        }
        s
    });

    let glyphs: Vec<char> = match &args.chars {
        Some(spec) if !spec.trim().is_empty() => {
            spec.chars().filter(|c| !c.is_whitespace()).collect()
        }
        _ => match charset_from_str(&args.charset) {
            Ok(cs) => build_glyphs(cs),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
    };

    let tuning = Tuning {
        max_trail,
        start_jitter: jitter,
        base_hue,
    };
    let seed = args.seed.unwrap_or_else(clock_seed);

    let mut term = Terminal::new()?;
    let (w, h) = term.size()?;

    let mut rain = Rain::new(w, h, glyphs, tuning, color_mode, bold_mode, seed);
    rain.set_glyphs_per_sec(speed);

    let bg = color::background(color_mode);
    let mut frame = Frame::new(w, h, bg);

    let start_time = Instant::now();
    let end_time = duration_s.and_then(|s| {
        if s <= 0.0 {
            return None;
        }
        Some(start_time + Duration::from_secs_f64(s))
    });

    let target_period = Duration::from_secs_f64(1.0 / target_fps);
    let mut next_frame = Instant::now();
    let mut last_tick = Instant::now();

    while rain.raining {
        if end_time.is_some_and(|end| Instant::now() >= end) {
            break;
        }
        let mut pending_resize: Option<(u16, u16)> = None;

        loop {
            while Terminal::poll_event(Duration::from_millis(0))? {
                match Terminal::read_event()? {
                    Event::Resize(nw, nh) => {
                        pending_resize = Some((nw, nh));
                    }
                    Event::Key(k) if k.kind == KeyEventKind::Press => {
                        if args.screensaver {
                            rain.raining = false;
                            break;
                        }

                        match k.code {
                            KeyCode::Esc | KeyCode::Char('q') => rain.raining = false,
                            KeyCode::Char(' ') => rain.reset(frame.width, frame.height),
                            KeyCode::Char('p') => rain.toggle_pause(),
                            KeyCode::Up => {
                                rain.set_glyphs_per_sec(rain.glyphs_per_sec() + SPEED_STEP);
                            }
                            KeyCode::Down => {
                                rain.set_glyphs_per_sec(rain.glyphs_per_sec() - SPEED_STEP);
                            }
                            _ => {}
                        }
                    }
                    _ => {}
                }
            }

            if !rain.raining || pending_resize.is_some() {
                break;
            }

            let now = Instant::now();
            if now >= next_frame {
                break;
            }

            let mut timeout = next_frame - now;
            if let Some(end) = end_time {
                if now >= end {
                    break;
                }
                timeout = timeout.min(end - now);
            }
            let _ = Terminal::poll_event(timeout)?;
        }

        if !rain.raining {
            break;
        }

        if let Some((nw, nh)) = pending_resize {
            rain.reset(nw, nh);
            frame = Frame::new(rain.grid().cols(), rain.grid().rows(), bg);
        }

        let now = Instant::now();
        let dt = now.saturating_duration_since(last_tick).min(MAX_FRAME_DELTA);
        last_tick = now;

        rain.advance(dt.as_secs_f32());
        rain.render(&mut frame);
        if frame.has_changes() {
            term.draw(&mut frame)?;
        }

        next_frame += target_period;
        let now = Instant::now();
        if now > next_frame {
            next_frame = now;
        }
    }

    Ok(())
}
