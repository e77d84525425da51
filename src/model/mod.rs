// 手牌表記のデータモデル
mod define;
mod hand;
mod meld;
mod tile;

use std::fmt;

use serde::{Serialize, Serializer};

pub use define::*;
pub use hand::*;
pub use meld::*;
pub use tile::*;
