// 拡張表記のパースエラー
// 1トークンでも失敗すれば手牌全体を失敗とする (副露が欠けると枚数が変わるため)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    // '-', '=', '+' を含むが既知の形に一致しない副露
    #[error("malformed meld '{token}': {reason}")]
    DirectionMeld { token: String, reason: &'static str },

    // 'y', 'o' を含むが既知の形に一致しない副露
    #[error("malformed compact meld '{token}': {reason}")]
    CompactMeld { token: String, reason: &'static str },

    // 存在しない牌 ("8z"等)
    #[error("invalid tile: '{token}'")]
    InvalidTile { token: String },
}
