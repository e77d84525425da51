use log::warn;

use super::error::ParseError;
use super::vocabulary::*;
use crate::model::*;

// 牌1枚を表す文字列をパース
// 受け付ける形式: 字牌の漢字("東"), 赤5("r5m", "a5m", "0m"), 数字+種別("1m", "7z")
// 該当しない場合はNoneを返却 (panicやエラーにはしない)
pub fn parse_tile(exp: &str) -> Option<Tile> {
    let cs: Vec<char> = exp.chars().collect();
    match cs[..] {
        [ch] => honor_from_kanji(ch),
        ['r' | 'a', '5', ch] => match tile_type_from_char(ch) {
            Some(ti) if ti != TZ => Some(Tile(ti, 0)),
            _ => None,
        },
        [c0, c1] => {
            let ni = c0.to_digit(10)? as Tnum;
            let ti = tile_type_from_char(c1)?;
            let t = Tile(ti, ni);
            if t.is_valid() {
                Some(t)
            } else {
                None
            }
        }
        _ => None,
    }
}

// 門前のみの手牌文字列をパース (例: "123m456p東南", "r5m")
// 数字を溜めておき種別文字で確定させる 漢字の字牌はその場で確定
// 'r'の後の数字列に含まれる5は赤5として扱う (字牌を除く)
pub fn parse_hand(exp: &str) -> Vec<Tile> {
    let (tiles, invalids) = scan_hand(exp);
    for t in invalids {
        warn!("invalid tile '{}' in '{}' is ignored", t, exp);
    }
    tiles
}

// parse_handで無視される牌("8z"等)が含まれていればエラー
pub(crate) fn parse_hand_checked(exp: &str) -> Result<Vec<Tile>, ParseError> {
    let (tiles, invalids) = scan_hand(exp);
    match invalids.first() {
        Some(t) => Err(ParseError::InvalidTile {
            token: t.to_string(),
        }),
        None => Ok(tiles),
    }
}

// (有効な牌, 存在しない牌)
fn scan_hand(exp: &str) -> (Vec<Tile>, Vec<Tile>) {
    let mut tiles = vec![];
    let mut invalids = vec![];
    let mut nis: Vec<Tnum> = vec![];
    let mut is_red = false;

    for ch in exp.chars() {
        if ch == 'r' {
            is_red = true;
        } else if let Some(d) = ch.to_digit(10) {
            nis.push(d as Tnum);
        } else if let Some(ti) = tile_type_from_char(ch) {
            for ni in nis.drain(..) {
                let t = if is_red && ni == 5 && ti != TZ {
                    Tile(ti, 0)
                } else {
                    Tile(ti, ni)
                };
                if t.is_valid() {
                    tiles.push(t);
                } else {
                    invalids.push(t);
                }
            }
            is_red = false;
        } else if let Some(t) = honor_from_kanji(ch) {
            tiles.push(t);
            is_red = false;
        }
    }

    (tiles, invalids)
}

// 種別が連続する牌をまとめて文字列化 (例: [1m, 2m, 3m, 4p] -> "123m4p")
pub fn tiles_to_string(tiles: &[Tile]) -> String {
    let mut res = String::new();
    for (i, t) in tiles.iter().enumerate() {
        res.push_str(&t.1.to_string());
        if tiles.get(i + 1).map_or(true, |next| next.0 != t.0) {
            res.push(tile_type_to_char(t.0));
        }
    }
    res
}

#[cfg(test)]
fn codes(tiles: &[Tile]) -> Vec<String> {
    tiles.iter().map(|t| t.to_string()).collect()
}

#[test]
fn test_parse_tile() {
    assert_eq!(parse_tile("1m"), Some(Tile(TM, 1)));
    assert_eq!(parse_tile("9s"), Some(Tile(TS, 9)));
    assert_eq!(parse_tile("7z"), Some(Tile(TZ, DR)));
    assert_eq!(parse_tile("東"), Some(Tile(TZ, WE)));
    assert_eq!(parse_tile("中"), Some(Tile(TZ, DR)));

    assert_eq!(parse_tile("10m"), None);
    assert_eq!(parse_tile("abc"), None);
    assert_eq!(parse_tile("1x"), None);
    assert_eq!(parse_tile("0z"), None);
    assert_eq!(parse_tile("8z"), None);
    assert_eq!(parse_tile("r5z"), None);
    assert_eq!(parse_tile(""), None);
}

#[test]
fn test_parse_tile_red() {
    for ch in ['m', 'p', 's'] {
        let zero = parse_tile(&format!("0{ch}"));
        assert!(zero.is_some());
        assert_eq!(zero, parse_tile(&format!("r5{ch}")));
        assert_eq!(zero, parse_tile(&format!("a5{ch}")));
        assert_ne!(zero, parse_tile(&format!("5{ch}")));
    }
}

#[test]
fn test_parse_hand() {
    assert_eq!(codes(&parse_hand("123m")), ["1m", "2m", "3m"]);
    assert_eq!(
        codes(&parse_hand("123m456p789s")),
        ["1m", "2m", "3m", "4p", "5p", "6p", "7s", "8s", "9s"]
    );
    assert_eq!(
        codes(&parse_hand("東南西北白發中")),
        ["1z", "2z", "3z", "4z", "5z", "6z", "7z"]
    );
    assert_eq!(
        codes(&parse_hand("123m1234z東南")),
        ["1m", "2m", "3m", "1z", "2z", "3z", "4z", "1z", "2z"]
    );
    assert_eq!(
        codes(&parse_hand("19m19p19s1234567z")),
        ["1m", "9m", "1p", "9p", "1s", "9s", "1z", "2z", "3z", "4z", "5z", "6z", "7z"]
    );
    assert_eq!(codes(&parse_hand("1230m456p")), ["1m", "2m", "3m", "0m", "4p", "5p", "6p"]);
}

#[test]
fn test_parse_hand_red_flag() {
    assert_eq!(codes(&parse_hand("r5m456p")), ["0m", "4p", "5p", "6p"]);
    assert_eq!(
        codes(&parse_hand("123mr5p789s")),
        ["1m", "2m", "3m", "0p", "7s", "8s", "9s"]
    );
    assert_eq!(codes(&parse_hand("r5mr5pr5s")), ["0m", "0p", "0s"]);
    assert_eq!(codes(&parse_hand("1234r5m")), ["1m", "2m", "3m", "4m", "0m"]);
    // 5以外の数字には影響しない
    assert_eq!(codes(&parse_hand("r456m")), ["4m", "0m", "6m"]);
    // 字牌では赤にならない
    assert_eq!(codes(&parse_hand("r5z")), ["5z"]);
    // フラグは種別文字で消費される
    assert_eq!(codes(&parse_hand("r5m5p")), ["0m", "5p"]);
}

#[test]
fn test_parse_hand_ignored() {
    assert_eq!(codes(&parse_hand("189z")), ["1z"]);
    assert_eq!(codes(&parse_hand("12m x 3")), ["1m", "2m"]);
    assert!(parse_hand("").is_empty());
}

#[test]
fn test_parse_hand_checked() {
    assert_eq!(codes(&parse_hand_checked("1234z").unwrap()), ["1z", "2z", "3z", "4z"]);
    assert_eq!(
        parse_hand_checked("1238z"),
        Err(ParseError::InvalidTile {
            token: "8z".to_string()
        })
    );
    assert!(parse_hand_checked("0z").is_err());
}

#[test]
fn test_parse_hand_suit_per_digit() {
    for ch in ['m', 'p', 's'] {
        let digits = "9081726354";
        let tiles = parse_hand(&format!("{digits}{ch}"));
        assert_eq!(tiles.len(), digits.len());
        for (t, d) in tiles.iter().zip(digits.chars()) {
            assert_eq!(t.to_string(), format!("{d}{ch}"));
        }
    }
}

#[test]
fn test_tiles_to_string() {
    let exp = "1230m456p789s11z";
    assert_eq!(tiles_to_string(&parse_hand(exp)), exp);
    assert_eq!(tiles_to_string(&[]), "");
}
