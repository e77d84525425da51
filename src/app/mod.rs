// mainから呼び出すアプリケーションのモジュール

mod notation;

pub use notation::{AppConfig, NotationApp, OutputFormat, ParseMode, Report};
