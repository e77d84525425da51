use std::fmt::Write;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use log::error;
use serde::Serialize;

use crate::hand::{validate_hand, Validation};
use crate::model::*;
use crate::notation::*;
use crate::util::common::vec_to_string;
use crate::util::misc::Res;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Basic,    // 門前のみの旧表記
    Extended, // 副露・修飾子を含む拡張表記
}

#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub mode: ParseMode,
    pub validate: bool,
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub input: String,
    pub hand: Hand,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,
}

#[derive(Debug)]
pub struct NotationApp {
    config: AppConfig,
}

impl NotationApp {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run_expression(&self, exp: &str) -> Res {
        let report = self.process_expression(exp)?;
        println!("{}", self.format(&report)?);
        Ok(())
    }

    // 1行1手牌 空行とコメント行(#)はそのまま出力してスキップ
    // パースに失敗した行はエラーを出力して続行
    pub fn run_from_file(&self, file_path: &Path) -> Res {
        let file = File::open(file_path)?;
        let lines = io::BufReader::new(file).lines();
        for line in lines {
            // 読めない行(不正なUTF-8等)はログに出して次の行へ
            let exp = match line {
                Ok(exp) => exp,
                Err(e) => {
                    error!("{}", e);
                    continue;
                }
            };
            let e = exp.trim();
            if e.is_empty() || e.starts_with('#') {
                println!("> {}", exp);
            } else if let Err(e) = self.run_expression(e) {
                error!("{}", e);
            }
            println!();
        }
        Ok(())
    }

    pub fn process_expression(&self, exp: &str) -> Result<Report, ParseError> {
        let hand = match self.config.mode {
            ParseMode::Basic => Hand {
                concealed: parse_hand(exp).into_iter().map(TileState::new).collect(),
                melds: vec![],
            },
            ParseMode::Extended => parse_hand_extended(exp)?,
        };
        let validation = self.config.validate.then(|| validate_hand(&hand));
        Ok(Report {
            input: exp.to_string(),
            hand,
            validation,
        })
    }

    pub fn format(&self, report: &Report) -> Res<String> {
        Ok(match self.config.format {
            OutputFormat::Text => format_text(report)?,
            OutputFormat::Json => serde_json::to_string_pretty(report)?,
        })
    }
}

fn format_text(report: &Report) -> Result<String, std::fmt::Error> {
    let hand = &report.hand;
    let mut s = String::new();
    writeln!(s, "> {}", report.input)?;
    writeln!(s, "concealed: {}", vec_to_string(&hand.concealed))?;
    for m in &hand.melds {
        write!(s, "meld:      {} {}", m.type_, m)?;
        if let Some(from) = m.from() {
            write!(s, " (from {})", from)?;
        }
        writeln!(s)?;
    }
    write!(s, "label:     {}", hand.phonetic_label())?;
    if let Some(v) = &report.validation {
        write!(s, "\nvalid:     {}", v.valid)?;
        for e in &v.errors {
            write!(s, "\n  - {}", e)?;
        }
    }
    Ok(s)
}

#[cfg(test)]
fn app(mode: ParseMode, validate: bool, format: OutputFormat) -> NotationApp {
    NotationApp::new(AppConfig {
        mode,
        validate,
        format,
    })
}

#[test]
fn test_format_text() {
    let app = app(ParseMode::Extended, true, OutputFormat::Text);
    let report = app.process_expression("123m y5p 2-13s").unwrap();
    let text = app.format(&report).unwrap();
    assert_eq!(
        text,
        "> 123m y5p 2-13s\n\
         concealed: 1m 2m 3m y5p\n\
         meld:      chii 2-13s (from kamicha)\n\
         label:     いー まん りゃん まん さん まん うー ぴん りゃん そー いー そー さん そー\n\
         valid:     false\n  \
         - invalid total tile count: 7 (expected 13 or 14)"
    );
}

#[test]
fn test_basic_mode() {
    let app = app(ParseMode::Basic, false, OutputFormat::Text);
    let report = app.process_expression("2-13m 東").unwrap();
    assert!(report.hand.melds.is_empty());
    assert_eq!(report.hand.concealed.len(), 4);
    assert!(report.validation.is_none());
}

#[test]
fn test_format_json() {
    let app = app(ParseMode::Extended, true, OutputFormat::Json);
    let report = app.process_expression("1111+z").unwrap();
    let json: serde_json::Value = serde_json::from_str(&app.format(&report).unwrap()).unwrap();
    assert_eq!(json["input"], "1111+z");
    assert_eq!(json["hand"]["melds"][0]["type"], "ankan");
    assert_eq!(json["hand"]["melds"][0]["called"], serde_json::Value::Null);
    assert_eq!(json["hand"]["melds"][0]["tiles"][0]["code"], "1z");
    assert_eq!(json["hand"]["melds"][0]["tiles"][0]["is_face_down"], true);
    assert_eq!(json["validation"]["valid"], false);
}

#[test]
fn test_process_error() {
    let app = app(ParseMode::Extended, false, OutputFormat::Text);
    assert!(matches!(
        app.process_expression("123m 55=5m"),
        Err(ParseError::DirectionMeld { .. })
    ));
}
