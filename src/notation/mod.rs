// 手牌表記の文字列変換
mod basic;
mod error;
mod extended;
mod normalize;
mod vocabulary;

pub use basic::*;
pub use error::*;
pub use extended::*;
pub use normalize::*;
pub use vocabulary::*;
