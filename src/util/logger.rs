use log::{LevelFilter, Log, Metadata, Record};

// 標準エラー出力へのロガー
// 出力形式: "[LEVEL](file:line) message"
struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!(
            "[{}]({}:{}) {}",
            record.level(),
            record.file().unwrap_or("?"),
            record.line().unwrap_or(0),
            record.args()
        );
    }

    fn flush(&self) {}
}

// -vの数でログレベルを決定 (0:WARN, 1:INFO, 2:DEBUG, 3以上:TRACE)
pub fn level_from_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

// 2回目以降の呼び出しは無視される
pub fn init(level: LevelFilter) {
    let logger = Box::new(StderrLogger { level });
    if log::set_boxed_logger(logger).is_ok() {
        log::set_max_level(level);
    }
}

#[test]
fn test_level_from_verbosity() {
    assert_eq!(level_from_verbosity(0), LevelFilter::Warn);
    assert_eq!(level_from_verbosity(2), LevelFilter::Debug);
    assert_eq!(level_from_verbosity(9), LevelFilter::Trace);
    assert!(log::Level::Error <= level_from_verbosity(0));
}
