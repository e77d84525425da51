use std::fmt;

use log::debug;

use super::basic::{parse_hand_checked, tiles_to_string};
use super::error::ParseError;
use super::normalize::normalize;
use super::vocabulary::*;
use crate::model::*;

// 拡張表記の手牌文字列をパース
// 空白区切りのトークンごとに 門前牌 / 副露 を判定する
//   "123m 2-13p 55-5s 1111+z" (新篠ゆう方式)
//   "2y13m 55y5p o33so a5m t" (牌画作成くん方式)
pub fn parse_hand_extended(exp: &str) -> Result<Hand, ParseError> {
    let exp = normalize(exp);
    let mut hand = Hand::default();

    for token in exp.split_whitespace() {
        let kind = TokenKind::classify(token);
        debug!("token '{}': {:?}", token, kind);
        match kind {
            TokenKind::DirectionMeld => hand.melds.push(parse_direction_meld(token)?),
            TokenKind::ModifiedTile => hand.concealed.push(parse_modified_tile(token)?),
            TokenKind::CompactMeld => hand.melds.push(parse_compact_meld(token)?),
            TokenKind::Concealed => hand
                .concealed
                .extend(parse_hand_checked(token)?.into_iter().map(TileState::new)),
        }
    }

    Ok(hand)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    DirectionMeld, // '-', '=', '+' を含む
    ModifiedTile,  // "y5m", "o5m" (修飾子付きの牌1枚)
    CompactMeld,   // 'y', 'o' を含む
    Concealed,     // それ以外
}

impl TokenKind {
    fn classify(token: &str) -> Self {
        if token.contains(['-', '=', '+']) {
            return TokenKind::DirectionMeld;
        }

        let cs: Vec<char> = token.chars().collect();
        if let ['y' | 'o', c1, c2] = cs[..] {
            if c1.is_ascii_digit() && is_tile_type_char(c2) {
                return TokenKind::ModifiedTile;
            }
        }

        if token.contains(['y', 'o']) {
            TokenKind::CompactMeld
        } else {
            TokenKind::Concealed
        }
    }
}

fn to_tile(ti: Type, ni: Tnum) -> Result<Tile, ParseError> {
    let t = Tile(ti, ni);
    if t.is_valid() {
        Ok(t)
    } else {
        Err(ParseError::InvalidTile {
            token: t.to_string(),
        })
    }
}

fn parse_modified_tile(token: &str) -> Result<TileState, ParseError> {
    let cs: Vec<char> = token.chars().collect();
    let invalid = || ParseError::InvalidTile {
        token: token.to_string(),
    };
    let ['y' | 'o', c1, c2] = cs[..] else {
        return Err(invalid());
    };
    let ni = c1.to_digit(10).ok_or_else(invalid)? as Tnum;
    let ti = tile_type_from_char(c2).ok_or_else(invalid)?;
    let t = to_tile(ti, ni)?;
    Ok(if cs[0] == 'o' {
        TileState::face_down(t)
    } else {
        TileState::rotated(t)
    })
}

// 新篠ゆう方式 ===============================================================
// 記号の位置(それまでに現れた数字の個数)で鳴いた牌を表す
//   "2-13m"   チー 上家     "12-3p" チー 対面   "123-s" チー 下家
//   "5-55=0p" 加槓          "1111+z" 暗槓
fn parse_direction_meld(token: &str) -> Result<Meld, ParseError> {
    let err = |reason| ParseError::DirectionMeld {
        token: token.to_string(),
        reason,
    };

    let mut nis = vec![];
    let mut ti = None;
    let (mut minus, mut equal, mut plus) = (None, None, None);
    for ch in token.chars() {
        match ch {
            '-' => minus = Some(nis.len()),
            '=' => equal = Some(nis.len()),
            '+' => plus = Some(nis.len()),
            _ => {
                if let Some(d) = ch.to_digit(10) {
                    nis.push(d as Tnum);
                } else if let Some(t) = tile_type_from_char(ch) {
                    ti = Some(t);
                    break;
                } else {
                    return Err(err("unexpected character"));
                }
            }
        }
    }

    let ti = ti.ok_or_else(|| err("missing suit"))?;
    if nis.is_empty() {
        return Err(err("no tiles"));
    }
    let tiles = nis
        .iter()
        .map(|&ni| to_tile(ti, ni))
        .collect::<Result<Vec<Tile>, _>>()?;
    let last = tiles.len() - 1;
    let mut states: Vec<TileState> = tiles.iter().map(|&t| TileState::new(t)).collect();

    if plus.is_some() {
        states[0].is_face_down = true;
        states[last].is_face_down = true;
        return Ok(Meld {
            type_: MeldType::Ankan,
            tiles: states,
            called: None,
        });
    }

    let (type_, idx) = match (minus, equal) {
        (Some(pos), Some(_)) => {
            let idx = pos.saturating_sub(1).min(last);
            (MeldType::Kakan, idx)
        }
        (Some(pos), None) => {
            let idx = if pos == 0 {
                0
            } else if pos > last {
                last
            } else {
                pos - 1
            };
            let type_ = match tiles.len() {
                3 if is_sequence(&tiles) => MeldType::Chii,
                3 => MeldType::Pon,
                4 => MeldType::Daiminkan,
                _ => return Err(err("a called meld needs 3 or 4 tiles")),
            };
            (type_, idx)
        }
        _ => return Err(err("no called tile marker")),
    };

    states[idx].is_rotated = true;
    Ok(Meld {
        type_,
        tiles: states,
        called: Some(CalledTile {
            from: MeldFrom::from_called_index(idx),
            index: idx,
        }),
    })
}

// 牌画作成くん方式 ===========================================================
// 牌の直前に修飾子を置く (y:横向き, o:伏せ)
//   "2y13m" チー (2枚目を上家から)   "55y5p" ポン (3枚目を対面から)
//   "o33so" 暗槓
fn parse_compact_meld(token: &str) -> Result<Meld, ParseError> {
    let err = |reason| ParseError::CompactMeld {
        token: token.to_string(),
        reason,
    };
    let cs: Vec<char> = token.chars().collect();

    // 暗槓の特殊形: 'o' + 数字 + 種別 + 'o'
    if let ['o', body @ .., ch, 'o'] = cs.as_slice() {
        if let Some(ti) = tile_type_from_char(*ch) {
            if !body.is_empty() && body.iter().all(|c| c.is_ascii_digit()) {
                return closed_kan(ti, body)
                    .ok_or_else(|| err("ankan needs two equal tiles between the 'o' marks"));
            }
        }
    }

    // 修飾子にも'o','y'が使われるため種別は最後に現れる文字で判定
    let suit_pos = cs
        .iter()
        .rposition(|&c| is_tile_type_char(c))
        .ok_or_else(|| err("missing suit"))?;
    let ti = tile_type_from_char(cs[suit_pos]).ok_or_else(|| err("missing suit"))?;

    let mut states = vec![];
    let mut rotated = None;
    let mut i = 0;
    while i < cs.len() {
        let ch = cs[i];
        let next = cs.get(i + 1).and_then(|c| c.to_digit(10));
        if let Some(d) = ch.to_digit(10) {
            states.push(TileState::new(to_tile(ti, d as Tnum)?));
            i += 1;
        } else if let ('o', Some(d)) = (ch, next) {
            states.push(TileState::face_down(to_tile(ti, d as Tnum)?));
            i += 2;
        } else if let ('y', Some(d)) = (ch, next) {
            rotated = Some(states.len());
            states.push(TileState::rotated(to_tile(ti, d as Tnum)?));
            i += 2;
        } else if i == suit_pos {
            i += 1;
        } else {
            return Err(err("unexpected character"));
        }
    }

    let n = states.len();
    if n == 4 && states[0].is_face_down && states[n - 1].is_face_down {
        return Ok(Meld {
            type_: MeldType::Ankan,
            tiles: states,
            called: None,
        });
    }

    let Some(idx) = rotated else {
        return Err(err("no rotated tile"));
    };
    let tiles: Vec<Tile> = states.iter().map(|t| t.code).collect();
    let type_ = match n {
        3 if is_sequence(&tiles) => MeldType::Chii,
        4 => MeldType::Daiminkan,
        _ => MeldType::Pon,
    };
    // 横向きの牌より前の枚数 1:上家, 2:対面, 3以上:下家
    let from = match idx {
        0 | 1 => MeldFrom::Kamicha,
        2 => MeldFrom::Toimen,
        _ => MeldFrom::Shimocha,
    };

    Ok(Meld {
        type_,
        tiles: states,
        called: Some(CalledTile { from, index: idx }),
    })
}

// "o33so"の"33"部分から暗槓を生成 (両端が伏せ牌の4枚)
fn closed_kan(ti: Type, body: &[char]) -> Option<Meld> {
    let [c0, c1] = body else {
        return None;
    };
    let t0 = Tile(ti, c0.to_digit(10)? as Tnum);
    let t1 = Tile(ti, c1.to_digit(10)? as Tnum);
    if !t0.is_valid() || !t1.is_valid() || t0.n() != t1.n() {
        return None;
    }

    Some(Meld {
        type_: MeldType::Ankan,
        tiles: vec![
            TileState::face_down(t0),
            TileState::new(t0),
            TileState::new(t1),
            TileState::face_down(t1),
        ],
        called: None,
    })
}

// 新篠ゆう方式で文字列化 ======================================================

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Some(first) = self.tiles.first() else {
            return Ok(());
        };
        let last = self.tiles.len() - 1;
        let called = self.called_index();
        // '-'の位置で鳴いた方向を表せない場合は牌画作成くん方式 ("55y5p" 対面)
        let compact = self
            .called
            .is_some_and(|c| MeldFrom::from_called_index(c.index) != c.from);

        let mut res = String::new();
        for (i, t) in self.tiles.iter().enumerate() {
            if compact {
                if called == Some(i) {
                    res.push('y');
                } else if t.is_face_down {
                    res.push('o');
                }
            }
            if !compact && self.type_ == MeldType::Kakan && i == last {
                res.push('=');
            }
            res.push_str(&t.code.1.to_string());
            if !compact && called == Some(i) {
                res.push('-');
            }
        }
        if self.type_ == MeldType::Ankan {
            res.push('+');
        }
        res.push(tile_type_to_char(first.code.0));
        write!(f, "{}", res)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut tokens = vec![];
        let mut run = vec![];
        for t in &self.concealed {
            if t.is_rotated || t.is_face_down {
                if !run.is_empty() {
                    tokens.push(tiles_to_string(&run));
                    run.clear();
                }
                tokens.push(t.to_string());
            } else {
                run.push(t.code);
            }
        }
        if !run.is_empty() {
            tokens.push(tiles_to_string(&run));
        }
        tokens.extend(self.melds.iter().map(|m| m.to_string()));
        write!(f, "{}", tokens.join(" "))
    }
}

#[cfg(test)]
fn codes(meld: &Meld) -> Vec<String> {
    meld.tiles.iter().map(|t| t.code.to_string()).collect()
}

#[test]
fn test_direction_chii() {
    let hand = parse_hand_extended("2-13m").unwrap();
    assert!(hand.concealed.is_empty());
    assert_eq!(hand.melds.len(), 1);
    let m = &hand.melds[0];
    assert_eq!(m.type_, MeldType::Chii);
    assert_eq!(m.from(), Some(MeldFrom::Kamicha));
    assert_eq!(m.called_index(), Some(0));
    assert_eq!(codes(m), ["2m", "1m", "3m"]);
    assert!(m.tiles[0].is_rotated);
    assert!(!m.tiles[1].is_rotated && !m.tiles[2].is_rotated);

    let m = &parse_hand_extended("12-3p").unwrap().melds[0];
    assert_eq!(m.type_, MeldType::Chii);
    assert_eq!(m.from(), Some(MeldFrom::Toimen));
    assert_eq!(m.called_index(), Some(1));

    let m = &parse_hand_extended("123-s").unwrap().melds[0];
    assert_eq!(m.type_, MeldType::Chii);
    assert_eq!(m.from(), Some(MeldFrom::Shimocha));
    assert_eq!(m.called_index(), Some(2));
    assert!(m.tiles[2].is_rotated);
}

#[test]
fn test_direction_pon_kan() {
    let m = &parse_hand_extended("5-55p").unwrap().melds[0];
    assert_eq!(m.type_, MeldType::Pon);
    assert_eq!(m.from(), Some(MeldFrom::Kamicha));
    assert!(m.tiles[0].is_rotated);

    let m = &parse_hand_extended("55-5s").unwrap().melds[0];
    assert_eq!(m.type_, MeldType::Pon);
    assert_eq!(m.from(), Some(MeldFrom::Toimen));
    assert_eq!(m.called_index(), Some(1));

    // 末尾の赤5は対面扱い ("550-m"と書けば下家)
    let m = &parse_hand_extended("55-0m").unwrap().melds[0];
    assert_eq!(m.called_index(), Some(1));
    assert_eq!(m.from(), Some(MeldFrom::Toimen));
    let m = &parse_hand_extended("550-m").unwrap().melds[0];
    assert_eq!(m.from(), Some(MeldFrom::Shimocha));

    let m = &parse_hand_extended("4-444s").unwrap().melds[0];
    assert_eq!(m.type_, MeldType::Daiminkan);
    assert_eq!(m.from(), Some(MeldFrom::Kamicha));
    assert_eq!(m.tiles.len(), 4);
}

#[test]
fn test_direction_kakan_ankan() {
    let m = &parse_hand_extended("5-55=0p").unwrap().melds[0];
    assert_eq!(m.type_, MeldType::Kakan);
    assert_eq!(m.from(), Some(MeldFrom::Kamicha));
    assert_eq!(m.tiles.len(), 4);
    assert_eq!(m.tiles[3].code, Tile(TP, 0));
    assert!(m.tiles[0].is_rotated);

    let m = &parse_hand_extended("1111+z").unwrap().melds[0];
    assert_eq!(m.type_, MeldType::Ankan);
    assert_eq!(codes(m), ["1z", "1z", "1z", "1z"]);
    assert_eq!(m.from(), None);
    assert_eq!(m.called_index(), None);
    assert!(m.tiles[0].is_face_down && m.tiles[3].is_face_down);
    assert!(!m.tiles[1].is_face_down && !m.tiles[2].is_face_down);
}

#[test]
fn test_direction_errors() {
    for exp in ["55=5m", "12-x3m", "123-", "-m", "1-2m", "12345-m", "18-9z"] {
        assert!(parse_hand_extended(exp).is_err(), "{exp}");
    }
    assert!(matches!(
        parse_hand_extended("55=5m"),
        Err(ParseError::DirectionMeld { .. })
    ));
    assert!(matches!(
        parse_hand_extended("18-9z"),
        Err(ParseError::InvalidTile { .. })
    ));
}

#[test]
fn test_direction_leading_marker() {
    // 先頭の'-'は1枚目を上家から
    let m = &parse_hand_extended("-555=5p").unwrap().melds[0];
    assert_eq!(m.type_, MeldType::Kakan);
    assert_eq!(m.called_index(), Some(0));
    assert_eq!(m.from(), Some(MeldFrom::Kamicha));
    assert!(m.tiles[0].is_rotated);
    assert_eq!(m.tiles.len(), 4);

    let m = &parse_hand_extended("-213m").unwrap().melds[0];
    assert_eq!(m.type_, MeldType::Chii);
    assert_eq!(m.called_index(), Some(0));
    assert_eq!(m.from(), Some(MeldFrom::Kamicha));
    assert_eq!(codes(m), ["2m", "1m", "3m"]);
    assert!(m.tiles[0].is_rotated);
}

#[test]
fn test_compact_meld() {
    let m = &parse_hand_extended("2y13m").unwrap().melds[0];
    assert_eq!(m.type_, MeldType::Chii);
    assert_eq!(codes(m), ["2m", "1m", "3m"]);
    assert!(m.tiles[1].is_rotated);
    assert_eq!(m.from(), Some(MeldFrom::Kamicha));
    assert_eq!(m.called_index(), Some(1));

    let m = &parse_hand_extended("55y5p").unwrap().melds[0];
    assert_eq!(m.type_, MeldType::Pon);
    assert_eq!(m.from(), Some(MeldFrom::Toimen));
    assert!(m.tiles[2].is_rotated);

    let m = &parse_hand_extended("555y5s").unwrap().melds[0];
    assert_eq!(m.type_, MeldType::Daiminkan);
    assert_eq!(m.from(), Some(MeldFrom::Shimocha));
}

#[test]
fn test_compact_ankan() {
    let m = &parse_hand_extended("o33so").unwrap().melds[0];
    assert_eq!(m.type_, MeldType::Ankan);
    assert_eq!(codes(m), ["3s", "3s", "3s", "3s"]);
    assert!(m.tiles[0].is_face_down && m.tiles[3].is_face_down);
    assert!(!m.tiles[1].is_face_down && !m.tiles[2].is_face_down);
    assert_eq!(m.called, None);

    let m = &parse_hand_extended("o7zo").err();
    assert!(matches!(m, Some(ParseError::CompactMeld { .. })));
    assert!(parse_hand_extended("o34so").is_err());
    assert!(parse_hand_extended("o05so").is_ok());

    let m = &parse_hand_extended("o222o2m").unwrap().melds[0];
    assert_eq!(m.type_, MeldType::Ankan);
}

#[test]
fn test_compact_errors() {
    assert!(matches!(
        parse_hand_extended("123om"),
        Err(ParseError::CompactMeld { .. })
    ));
    assert!(matches!(
        parse_hand_extended("o12m"),
        Err(ParseError::CompactMeld { .. })
    ));
}

#[test]
fn test_modified_tile() {
    let hand = parse_hand_extended("y5m o1z").unwrap();
    assert!(hand.melds.is_empty());
    assert_eq!(hand.concealed.len(), 2);
    assert!(hand.concealed[0].is_rotated);
    assert_eq!(hand.concealed[0].code, Tile(TM, 5));
    assert!(hand.concealed[1].is_face_down);
    assert!(parse_hand_extended("y8z").is_err());
}

#[test]
fn test_concealed_invalid_tile() {
    assert_eq!(
        parse_hand_extended("1238z"),
        Err(ParseError::InvalidTile {
            token: "8z".to_string()
        })
    );
    assert!(parse_hand_extended("123m 90z").is_err());
}

#[test]
fn test_mixed_notation() {
    let hand = parse_hand_extended("123m 2-13p 55-5s").unwrap();
    assert_eq!(hand.concealed.len(), 3);
    assert_eq!(hand.melds.len(), 2);
    assert_eq!(hand.melds[0].type_, MeldType::Chii);
    assert_eq!(hand.melds[1].type_, MeldType::Pon);

    let hand = parse_hand_extended("123m 2-13p a5s").unwrap();
    assert_eq!(hand.concealed.len(), 4);
    assert_eq!(hand.concealed[3].code, Tile(TS, 0));
    assert_eq!(hand.melds[0].type_, MeldType::Chii);

    let hand = parse_hand_extended("2y13p 55-5s").unwrap();
    assert_eq!(hand.melds.len(), 2);
    assert_eq!(hand.melds[0].type_, MeldType::Chii);
    assert_eq!(hand.melds[1].type_, MeldType::Pon);

    let hand = parse_hand_extended("t n s p h r c").unwrap();
    let cs: Vec<String> = hand.concealed.iter().map(|t| t.code.to_string()).collect();
    assert_eq!(cs, ["1z", "2z", "3z", "4z", "5z", "6z", "7z"]);
}

#[test]
fn test_agrees_with_basic() {
    for exp in ["123m456p789s", "東南西北", "r5m", "0m", "1234r5m"] {
        let hand = parse_hand_extended(exp).unwrap();
        let tiles: Vec<Tile> = hand.concealed.iter().map(|t| t.code).collect();
        assert_eq!(tiles, super::basic::parse_hand(exp), "{exp}");
    }
}

#[test]
fn test_display() {
    let exp = "1230m45p y6p o7p 2-13s 5-55=0p 1111+z 123-m";
    let hand = parse_hand_extended(exp).unwrap();
    assert_eq!(hand.to_string(), exp);
    assert_eq!(parse_hand_extended(&hand.to_string()).unwrap(), hand);

    let hand = parse_hand_extended("o33so").unwrap();
    assert_eq!(hand.to_string(), "3333+s");
    assert_eq!(parse_hand_extended(&hand.to_string()).unwrap(), hand);

    // 牌画作成くん方式の副露も方向を保ったまま再パースできる
    for (exp, display) in [
        ("55y5p", "55y5p"),
        ("2y13m", "2y13m"),
        ("12y3s", "12y3s"),
        ("1o2y3m", "1o2y3m"),
        ("y213m", "2-13m"),
        ("555y5s", "5555-s"),
    ] {
        let hand = parse_hand_extended(exp).unwrap();
        assert_eq!(hand.to_string(), display, "{exp}");
        let again = parse_hand_extended(&hand.to_string()).unwrap();
        assert_eq!(again, hand, "{exp}");
        assert_eq!(again.melds[0].from(), hand.melds[0].from(), "{exp}");
    }
}

#[test]
fn test_phonetic_label() {
    let hand = parse_hand_extended("0m 1111+z").unwrap();
    assert_eq!(hand.phonetic_label(), "あか うー まん うら とん とん うら");
}
