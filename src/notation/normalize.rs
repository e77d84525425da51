use super::vocabulary::*;
use crate::model::*;

// 牌画作成くん方式の記号を新篠ゆう方式(正規形)の記号に変換する
//   赤5:  "a5m" -> "0m", "r5m" -> "0m"
//   字牌: "t n s p h r c" -> "1z 2z 3z 4z 5z 6z 7z"
// 's'(西/索子), 'p'(北/筒子), 'r'(發/赤5)の衝突は前後の文字で判定する

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    Char(char),
    Red(Type), // 赤5 (変換済み, 字牌記号の置換対象外)
}

impl Piece {
    // 直前にあると字牌記号とみなさない文字
    fn blocks_after(&self) -> bool {
        match *self {
            Piece::Char(ch) => ch.is_ascii_digit() || matches!(ch, '-' | '=' | '+' | 'y' | 'o'),
            Piece::Red(_) => true,
        }
    }

    // 直後にあると字牌記号とみなさない文字
    fn blocks_before(&self) -> bool {
        match *self {
            Piece::Char(ch) => ch.is_ascii_digit() || is_tile_type_char(ch),
            Piece::Red(_) => true,
        }
    }
}

pub fn normalize(exp: &str) -> String {
    let pieces = protect_red_fives(exp);
    let pieces = HONOR_LETTER
        .iter()
        .fold(pieces, |pieces, &letter| replace_honor_letter(&pieces, letter));
    render(&pieces)
}

// "a5"+種別 と "r5"+種別 を赤5として確保
fn protect_red_fives(exp: &str) -> Vec<Piece> {
    let cs: Vec<char> = exp.chars().collect();
    let mut res = vec![];
    let mut i = 0;
    while i < cs.len() {
        if let [c0, '5', c2, ..] = cs[i..] {
            if matches!(c0, 'a' | 'r') && matches!(c2, 'm' | 'p' | 's') {
                if let Some(ti) = tile_type_from_char(c2) {
                    res.push(Piece::Red(ti));
                    i += 3;
                    continue;
                }
            }
        }
        res.push(Piece::Char(cs[i]));
        i += 1;
    }
    res
}

// 字牌記号1種類分を置換 前の記号の置換結果は次の記号の判定に影響する
//   "st" -> 't'を先に置換して"s1z" -> 's'の直後が数字なので残る
fn replace_honor_letter(pieces: &[Piece], letter: char) -> Vec<Piece> {
    let mut res = vec![];
    for (i, p) in pieces.iter().enumerate() {
        let honor = match *p {
            Piece::Char(ch) if ch == letter && is_bare(pieces, i) => honor_from_letter(ch),
            _ => None,
        };
        match honor {
            Some(t) => {
                res.push(Piece::Char(char::from(b'0' + t.1 as u8)));
                res.push(Piece::Char(tile_type_to_char(t.0)));
            }
            None => res.push(*p),
        }
    }
    res
}

// 前後が牌の一部ではない単独の文字かどうか
fn is_bare(pieces: &[Piece], i: usize) -> bool {
    let prev = i.checked_sub(1).and_then(|j| pieces.get(j));
    let next = pieces.get(i + 1);
    !prev.is_some_and(Piece::blocks_after) && !next.is_some_and(Piece::blocks_before)
}

fn render(pieces: &[Piece]) -> String {
    let mut res = String::new();
    for p in pieces {
        match *p {
            Piece::Char(ch) => res.push(ch),
            Piece::Red(ti) => {
                res.push('0');
                res.push(tile_type_to_char(ti));
            }
        }
    }
    res
}

#[test]
fn test_normalize_red() {
    assert_eq!(normalize("a5m"), "0m");
    assert_eq!(normalize("a5p"), "0p");
    assert_eq!(normalize("a5s"), "0s");
    assert_eq!(normalize("r5m"), "0m");
    assert_eq!(normalize("1234r5m"), "12340m");
    // 数字が5以外・続く場合は連続表記の赤フラグとして残す
    assert_eq!(normalize("r55m"), "r55m");
    assert_eq!(normalize("r3m"), "r3m");
}

#[test]
fn test_normalize_honor() {
    assert_eq!(normalize("t"), "1z");
    assert_eq!(normalize("n"), "2z");
    assert_eq!(normalize("s"), "3z");
    assert_eq!(normalize("p"), "4z");
    assert_eq!(normalize("h"), "5z");
    assert_eq!(normalize("r"), "6z");
    assert_eq!(normalize("c"), "7z");
    assert_eq!(normalize("t n s p"), "1z 2z 3z 4z");
}

#[test]
fn test_normalize_collision() {
    assert_eq!(normalize("3p"), "3p");
    assert_eq!(normalize("3s"), "3s");
    assert_eq!(normalize("123-s"), "123-s");
    assert_eq!(normalize("5-55=0p"), "5-55=0p");
    assert_eq!(normalize("o33so"), "o33so");
    assert_eq!(normalize("2y13p"), "2y13p");
    assert_eq!(normalize("a5m 3p p"), "0m 3p 4z");
    assert_eq!(normalize("東南 s"), "東南 3z");
}

#[test]
fn test_normalize_letter_order() {
    // t n s p h r c の順に1種類ずつ置換する
    assert_eq!(normalize("st"), "s1z");
    assert_eq!(normalize("ts"), "t3z");
    assert_eq!(normalize("sp"), "s4z");
    assert_eq!(normalize("ps"), "p3z");
    assert_eq!(normalize("rhm"), "6zhm");
    assert_eq!(normalize("ct"), "c1z");
}

#[test]
fn test_normalize_idempotent() {
    let exps = [
        "a5m 3p p",
        "t n s p h r c",
        "123m 2-13p a5s",
        "ts",
        "st",
        "sp",
        "ps",
        "rhm",
        "ar5m",
        "sa5m",
        "1111+z o33so 55y5p",
        "r55m",
    ];
    for exp in exps {
        let once = normalize(exp);
        assert_eq!(normalize(&once), once, "{exp}");
    }
}

#[test]
fn test_normalize_agrees_with_basic() {
    use super::basic::parse_hand;
    for exp in ["123m456p789s", "東南西北", "r5m", "0m", "1234r5m", "r456m", "19m19p19s東南西北"] {
        assert_eq!(parse_hand(&normalize(exp)), parse_hand(exp), "{exp}");
    }
}
