use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use log::error;

use mjnotation::app::{AppConfig, NotationApp, OutputFormat, ParseMode};
use mjnotation::util::logger;

// コマンドライン引数 (式1つ か -f でファイル指定)
#[derive(Parser)]
#[command(
    name = "mjnotation",
    version,
    about = "Parse mahjong hand notation into tiles and melds"
)]
struct Cli {
    #[arg(
        required_unless_present = "file",
        conflicts_with = "file",
        help = "Hand expression (e.g. \"123m 2-13p 55-5s\" or \"2y13m o33so\")"
    )]
    exp: Option<String>,

    // 1行1式 '#'で始まる行はコメント
    #[arg(short, long, help = "Read one expression per line from a file")]
    file: Option<PathBuf>,

    #[arg(long, help = "Use the concealed-only notation (no melds or modifiers)")]
    basic: bool,

    #[arg(long, help = "Check tile count, copies per tile and meld shapes")]
    validate: bool,

    #[arg(long, default_value = "text", value_enum, help = "Output format")]
    format: OutputFormat,

    // 0:warn 1:info 2:debug 3:trace
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase log verbosity (-v, -vv, -vvv)"
    )]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    logger::init(logger::level_from_verbosity(cli.verbose));

    let app = NotationApp::new(AppConfig {
        mode: if cli.basic {
            ParseMode::Basic
        } else {
            ParseMode::Extended
        },
        validate: cli.validate,
        format: cli.format,
    });

    let res = match (&cli.exp, &cli.file) {
        (_, Some(file_path)) => app.run_from_file(file_path),
        (Some(exp), None) => app.run_expression(exp),
        (None, None) => unreachable!("clap requires an expression or a file"),
    };
    if let Err(e) = res {
        error!("{}", e);
        process::exit(1);
    }
}
