// Copyright (c) 2026 rezky_nightky

use std::io::IsTerminal;

use clap::Parser;

pub const DEFAULT_PARAMS_USAGE: &str = "DEFAULT PARAMS USAGE:\n  glyphfall --speed 20 --fps 60 --hue 120 --max-trail 30 --jitter 40 --bold 1 --charset classic";

pub fn color_enabled_stdout() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if matches!(std::env::var("CLICOLOR").ok().as_deref(), Some("0")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

#[derive(Parser, Debug, Clone)]
#[command(name = "glyphfall", version, disable_version_flag = true)]
pub struct Args {
    #[arg(
        short = 'S',
        long = "speed",
        default_value_t = 20.0,
        help_heading = "RAIN",
        help = "Glyphs per second (min 5 max 150, adjustable at runtime with Up/Down)"
    )]
    pub speed: f32,

    #[arg(
        long = "max-trail",
        default_value_t = 30.0,
        help_heading = "RAIN",
        help = "Longest trail in cells (min 5 max 100)"
    )]
    pub max_trail: f32,

    #[arg(
        short = 'j',
        long = "jitter",
        default_value_t = 40.0,
        help_heading = "RAIN",
        help = "Restart stagger in cells (min 0 max 1000)"
    )]
    pub jitter: f32,

    #[arg(
        long = "hue",
        default_value_t = 120.0,
        help_heading = "APPEARANCE",
        help = "Base trail hue in degrees (min 0 max 360)"
    )]
    pub hue: f32,

    #[arg(
        short = 'b',
        long = "bold",
        default_value_t = 1,
        help_heading = "APPEARANCE",
        help = "Bold mode (min 0 max 2): 0=off, 1=head, 2=all"
    )]
    pub bold: u8,

    #[arg(
        long = "colormode",
        help_heading = "APPEARANCE",
        help = "Force color mode (allowed: 0,8,24). Default: 24-bit if supported (COLORTERM), else 8-bit"
    )]
    pub colormode: Option<u16>,

    #[arg(
        long = "charset",
        default_value = "classic",
        help_heading = "CHARSET",
        help = "Charset preset (see --list-charsets)"
    )]
    pub charset: String,

    #[arg(
        long = "chars",
        help_heading = "CHARSET",
        help = "Custom glyph override, e.g. --chars \"01\""
    )]
    pub chars: Option<String>,

    #[arg(
        short = 'f',
        long = "fps",
        default_value_t = 60.0,
        help_heading = "PERFORMANCE",
        help = "Target FPS (min 1 max 240)"
    )]
    pub fps: f64,

    #[arg(
        long = "duration",
        help_heading = "GENERAL",
        help = "Stop after N seconds (min 0.1 max 86400; <=0 disables)"
    )]
    pub duration: Option<f64>,

    #[arg(
        long = "seed",
        help_heading = "GENERAL",
        help = "Fix the random seed (default: derived from the clock)"
    )]
    pub seed: Option<u64>,

    #[arg(
        short = 's',
        long = "screensaver",
        help_heading = "GENERAL",
        help = "Screensaver mode (exit on any keypress)"
    )]
    pub screensaver: bool,

    #[arg(
        long = "list-charsets",
        help_heading = "HELP",
        help = "List available charset presets and exit"
    )]
    pub list_charsets: bool,

    #[arg(
        long = "info",
        short = 'i',
        help_heading = "HELP",
        help = "Print version info and exit"
    )]
    pub info: bool,

    #[arg(
        long = "version",
        short = 'v',
        help_heading = "HELP",
        help = "Print version and exit"
    )]
    pub version: bool,
}

pub fn print_list_charsets() {
    if color_enabled_stdout() {
        println!("\x1b[1;36mAVAILABLE CHARSET PRESETS:\x1b[0m");
        println!("\x1b[2mNOTE: Use only the VALUE (left side) with --charset.\x1b[0m");
    } else {
        println!("AVAILABLE CHARSET PRESETS:");
        println!("NOTE: Use only the VALUE (left side) with --charset.");
    }
    println!();
    println!("VALUE        DESCRIPTION");
    println!("classic      The classic rain alphabet (hiragana + katakana + kanji)");
    println!("katakana     Halfwidth katakana");
    println!("matrix       Letters + digits + katakana");
    println!("ascii        Letters + digits + punctuation");
    println!("english      Letters only");
    println!("digits       Digits only (aliases: dec, decimal)");
    println!("punc         Punctuation only");
    println!("binary       0 and 1 (aliases: bin, 01)");
    println!("hex          0-9 and A-F (alias: hexadecimal)");
}
