use crate::model::*;

// 字牌の漢字表記 (index = tnum - 1)
const HONOR_KANJI: [char; 7] = ['東', '南', '西', '北', '白', '發', '中'];

// 牌画作成くん方式の字牌記号 北は筒子の'p'と同じ文字を使う
pub const HONOR_LETTER: [char; 7] = ['t', 'n', 's', 'p', 'h', 'r', 'c'];

// 読み上げ用ラベル
const NUMBER_READING: [&str; 10] = [
    "うー", "いー", "りゃん", "さん", "すー", "うー", "ろー", "ちー", "ぱー", "きゅー",
];
const TYPE_READING: [&str; 3] = ["まん", "ぴん", "そー"];
const HONOR_READING: [&str; 7] = ["とん", "なん", "しゃー", "ぺー", "はく", "はつ", "ちゅん"];
const RED_READING: &str = "あか";
pub const BACK_READING: &str = "うら";

pub fn tile_type_from_char(ch: char) -> Option<Type> {
    match ch {
        'm' => Some(TM),
        'p' => Some(TP),
        's' => Some(TS),
        'z' => Some(TZ),
        _ => None,
    }
}

pub fn tile_type_to_char(ti: Type) -> char {
    match ti {
        TM => 'm',
        TP => 'p',
        TS => 's',
        TZ => 'z',
        _ => panic!("invalid tile type index: {ti}"),
    }
}

#[inline]
pub fn is_tile_type_char(ch: char) -> bool {
    tile_type_from_char(ch).is_some()
}

pub fn honor_from_kanji(ch: char) -> Option<Tile> {
    HONOR_KANJI
        .iter()
        .position(|&k| k == ch)
        .map(|i| Tile(TZ, i + 1))
}

pub fn honor_to_kanji(t: Tile) -> Option<char> {
    if t.is_hornor() && t.is_valid() {
        Some(HONOR_KANJI[t.1 - 1])
    } else {
        None
    }
}

pub fn honor_from_letter(ch: char) -> Option<Tile> {
    HONOR_LETTER
        .iter()
        .position(|&l| l == ch)
        .map(|i| Tile(TZ, i + 1))
}

// 字牌は漢字, それ以外は牌コードをそのまま返却
pub fn tile_to_kanji_label(t: Tile) -> String {
    match honor_to_kanji(t) {
        Some(k) => k.to_string(),
        None => t.to_string(),
    }
}

// 例: 1m -> "いー まん", 0p -> "あか うー ぴん", 1z -> "とん"
pub fn tile_to_phonetic_label(t: Tile) -> String {
    if t.is_hornor() {
        return HONOR_READING
            .get(t.1.wrapping_sub(1))
            .map_or_else(|| t.to_string(), |r| r.to_string());
    }

    let label = format!("{} {}", NUMBER_READING[t.1], TYPE_READING[t.0]);
    if t.is_red() {
        format!("{} {}", RED_READING, label)
    } else {
        label
    }
}

pub fn tile_state_to_phonetic_label(ts: &TileState) -> String {
    if ts.is_face_down {
        BACK_READING.to_string()
    } else {
        tile_to_phonetic_label(ts.code)
    }
}

pub fn tiles_to_phonetic_label(tiles: &[Tile]) -> String {
    let labels: Vec<String> = tiles.iter().map(|&t| tile_to_phonetic_label(t)).collect();
    labels.join(" ")
}

impl Hand {
    // 手牌全体の読み上げラベル (伏せ牌は"うら")
    pub fn phonetic_label(&self) -> String {
        let labels: Vec<String> = self.tiles().map(tile_state_to_phonetic_label).collect();
        labels.join(" ")
    }
}

#[test]
fn test_kanji_label() {
    for k in HONOR_KANJI {
        let t = honor_from_kanji(k).unwrap();
        assert_eq!(tile_to_kanji_label(t), k.to_string());
    }
    assert_eq!(tile_to_kanji_label(Tile(TM, 0)), "0m");
    assert_eq!(honor_from_kanji('x'), None);
}

#[test]
fn test_honor_letter() {
    assert_eq!(honor_from_letter('t'), Some(Tile(TZ, WE)));
    assert_eq!(honor_from_letter('p'), Some(Tile(TZ, WN)));
    assert_eq!(honor_from_letter('r'), Some(Tile(TZ, DG)));
    assert_eq!(honor_from_letter('c'), Some(Tile(TZ, DR)));
    assert_eq!(honor_from_letter('m'), None);
}

#[test]
fn test_phonetic_label() {
    assert_eq!(tile_to_phonetic_label(Tile(TM, 1)), "いー まん");
    assert_eq!(tile_to_phonetic_label(Tile(TP, 9)), "きゅー ぴん");
    assert_eq!(tile_to_phonetic_label(Tile(TS, 5)), "うー そー");
    assert_eq!(tile_to_phonetic_label(Tile(TM, 0)), "あか うー まん");
    assert_eq!(tile_to_phonetic_label(Tile(TZ, DW)), "はく");

    let honors: Vec<Tile> = (WE..=DR).map(|ni| Tile(TZ, ni)).collect();
    assert_eq!(
        tiles_to_phonetic_label(&honors),
        "とん なん しゃー ぺー はく はつ ちゅん"
    );

    let ts = TileState::face_down(Tile(TS, 3));
    assert_eq!(tile_state_to_phonetic_label(&ts), BACK_READING);
}
