// 手牌の構造的な整合性を確認するモジュール
mod validate;

pub use self::validate::{validate_hand, validate_meld, HandError, Validation};
