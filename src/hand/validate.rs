use serde::Serialize;

use crate::model::*;
use crate::util::common::tiles_to_tile_table;

// 手牌の構造上の問題 (JSON出力時は"kind"で種類を区別)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HandError {
    #[error("invalid total tile count: {count} (expected {} or {})", HAND_MIN, HAND_MAX)]
    TileCount { count: usize },

    #[error("{tile} appears {count} times (more than {})", TILE)]
    TooManyCopies { tile: Tile, count: usize },

    #[error("meld #{index} is not a valid {type_}")]
    InvalidMeld {
        index: Index,
        #[serde(rename = "type")]
        type_: MeldType,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub valid: bool,
    pub errors: Vec<HandError>,
}

// 副露の形を確認 赤5は5とみなす
pub fn validate_meld(tiles: &[Tile], type_: MeldType) -> bool {
    if tiles.len() != type_.tile_count() {
        return false;
    }
    match type_ {
        MeldType::Chii => is_sequence(tiles),
        MeldType::Pon | MeldType::Daiminkan | MeldType::Kakan | MeldType::Ankan => {
            tiles.iter().all(|t| t.to_normal() == tiles[0].to_normal())
        }
    }
}

// 手牌全体を確認 エラーは途中で打ち切らずにすべて返却
//   1. 総枚数が13枚または14枚
//   2. 同じ牌(赤5は5とみなす)が4枚以下
//   3. 各副露の形
pub fn validate_hand(hand: &Hand) -> Validation {
    let mut errors = vec![];

    let count = hand.count();
    if count != HAND_MIN && count != HAND_MAX {
        errors.push(HandError::TileCount { count });
    }

    let tt = tiles_to_tile_table(hand.tiles().map(|t| t.code));
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            let count = tt[ti][ni];
            if count > TILE {
                errors.push(HandError::TooManyCopies {
                    tile: Tile(ti, ni),
                    count,
                });
            }
        }
    }

    for (index, m) in hand.melds.iter().enumerate() {
        if !validate_meld(&m.codes(), m.type_) {
            errors.push(HandError::InvalidMeld {
                index,
                type_: m.type_,
            });
        }
    }

    Validation {
        valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
fn tiles(exp: &str) -> Vec<Tile> {
    crate::notation::parse_hand(exp)
}

#[cfg(test)]
fn validate(exp: &str) -> Validation {
    validate_hand(&crate::notation::parse_hand_extended(exp).unwrap())
}

#[test]
fn test_validate_chii() {
    assert!(validate_meld(&tiles("123m"), MeldType::Chii));
    assert!(validate_meld(&tiles("798p"), MeldType::Chii));
    assert!(validate_meld(&tiles("406s"), MeldType::Chii));
    assert!(!validate_meld(&tiles("135m"), MeldType::Chii));
    assert!(!validate_meld(&tiles("123z"), MeldType::Chii));
    assert!(!validate_meld(&tiles("12m3p"), MeldType::Chii));
    assert!(!validate_meld(&tiles("1234m"), MeldType::Chii));
}

#[test]
fn test_validate_pon_kan() {
    assert!(validate_meld(&tiles("555m"), MeldType::Pon));
    assert!(validate_meld(&tiles("505m"), MeldType::Pon));
    assert!(!validate_meld(&tiles("123m"), MeldType::Pon));
    assert!(validate_meld(&tiles("3333s"), MeldType::Daiminkan));
    assert!(validate_meld(&tiles("5550p"), MeldType::Daiminkan));
    assert!(validate_meld(&tiles("5550p"), MeldType::Kakan));
    assert!(!validate_meld(&tiles("555p"), MeldType::Kakan));
    assert!(validate_meld(&tiles("1111z"), MeldType::Ankan));
    assert!(!validate_meld(&tiles("555s"), MeldType::Ankan));
    assert!(!validate_meld(&tiles("5555m"), MeldType::Pon));
}

#[test]
fn test_validate_hand_ok() {
    let v = validate("123m456p789s1122z");
    assert!(v.valid);
    assert!(v.errors.is_empty());

    assert!(validate("123m456p789s11223z").valid);
    assert!(validate("1234567m 2-13s 55-5z").valid);
    assert!(validate("1m 5-55=0p 1111+z o33so").valid);
}

#[test]
fn test_validate_hand_count() {
    let v = validate("123m456p789s11z");
    assert!(!v.valid);
    assert_eq!(v.errors, [HandError::TileCount { count: 12 }]);
    assert!(v.errors[0].to_string().contains("tile count"));

    assert!(!validate("123m456p789s112233z").valid);
}

#[test]
fn test_validate_hand_copies() {
    let v = validate("11111m456p789s11z");
    assert!(!v.valid);
    assert_eq!(
        v.errors,
        [HandError::TooManyCopies {
            tile: Tile(TM, 1),
            count: 5
        }]
    );
    assert!(v.errors[0].to_string().contains("more than 4"));

    // 赤5は5として数える
    let v = validate("5550m 5-55p 123456s");
    assert!(v.valid);
    let v = validate("55550m 123456s 11z");
    assert_eq!(
        v.errors,
        [HandError::TooManyCopies {
            tile: Tile(TM, 5),
            count: 5
        }]
    );
}

#[test]
fn test_validate_hand_accumulates() {
    let v = validate("11111m 1-35p 55y5s");
    assert!(!v.valid);
    assert_eq!(
        v.errors,
        [
            HandError::TileCount { count: 11 },
            HandError::TooManyCopies {
                tile: Tile(TM, 1),
                count: 5
            },
            HandError::InvalidMeld {
                index: 0,
                type_: MeldType::Pon
            },
        ]
    );
    assert_eq!(v.errors[2].to_string(), "meld #0 is not a valid pon");
}

#[test]
fn test_validation_serialize() {
    let v = validate("123m");
    let json = serde_json::to_value(&v).unwrap();
    assert_eq!(json["valid"], false);
    assert_eq!(json["errors"][0]["kind"], "tile_count");
    assert_eq!(json["errors"][0]["count"], 3);
}
