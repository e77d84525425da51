use super::*;

use std::str::FromStr;

// Tile =======================================================================

// 牌コード 表記は"<数字><種別>" (例: "1m", "0p", "7z")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile(pub Type, pub Tnum); // (type index, number index)

impl Tile {
    // number index(赤5考慮)を返却
    #[inline]
    pub fn n(&self) -> Tnum {
        if self.1 == 0 {
            5
        } else {
            self.1
        }
    }

    // 赤5を通常の5に変換した牌
    #[inline]
    pub fn to_normal(&self) -> Tile {
        Tile(self.0, self.n())
    }

    // 字牌
    #[inline]
    pub fn is_hornor(&self) -> bool {
        self.0 == TZ
    }

    // 赤5
    #[inline]
    pub fn is_red(&self) -> bool {
        self.0 != TZ && self.1 == 0
    }

    // 牌として存在するかどうか (字牌は1~7のみ, 赤5は数牌のみ)
    pub fn is_valid(&self) -> bool {
        match self.0 {
            TM | TP | TS => self.1 < TNUM,
            TZ => WE <= self.1 && self.1 <= DR,
            _ => false,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.1, ['m', 'p', 's', 'z'][self.0])
    }
}

impl Serialize for Tile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid tile code: '{0}'")]
pub struct TileCodeError(pub String);

impl FromStr for Tile {
    type Err = TileCodeError;

    // 正規形("<数字><種別>")のみ受け付ける
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TileCodeError(s.to_string());
        let mut it = s.chars();
        let (Some(c0), Some(c1), None) = (it.next(), it.next(), it.next()) else {
            return Err(err());
        };
        let ni = c0.to_digit(10).ok_or_else(err)? as Tnum;
        let ti = match c1 {
            'm' => TM,
            'p' => TP,
            's' => TS,
            'z' => TZ,
            _ => return Err(err()),
        };
        let t = Tile(ti, ni);
        if t.is_valid() {
            Ok(t)
        } else {
            Err(err())
        }
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tile {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.0 != other.0 {
            return self.0.cmp(&other.0);
        }

        // 赤5は通常の5の直前に並べる
        let a = (self.n(), self.1 != 0);
        let b = (other.n(), other.1 != 0);
        a.cmp(&b)
    }
}

pub type TileRow = [usize; TNUM];
pub type TileTable = [TileRow; TYPE];

// TileState ==================================================================

// 手牌上の牌1枚 (表示用の修飾子付き)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileState {
    pub code: Tile,
    pub is_rotated: bool,   // y: 横向き (鳴いた牌・加槓の基準牌)
    pub is_face_down: bool, // o: 伏せ牌 (暗槓の両端)
    pub is_tsumo: bool,     // ツモ牌 (パーサーでは未設定)
    pub is_ron: bool,       // ロン牌 (パーサーでは未設定)
}

impl TileState {
    pub fn new(code: Tile) -> Self {
        Self {
            code,
            is_rotated: false,
            is_face_down: false,
            is_tsumo: false,
            is_ron: false,
        }
    }

    pub fn rotated(code: Tile) -> Self {
        Self {
            is_rotated: true,
            ..Self::new(code)
        }
    }

    pub fn face_down(code: Tile) -> Self {
        Self {
            is_face_down: true,
            ..Self::new(code)
        }
    }
}

impl fmt::Display for TileState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_face_down {
            write!(f, "o")?;
        } else if self.is_rotated {
            write!(f, "y")?;
        }
        write!(f, "{}", self.code)
    }
}

#[test]
fn test_tile_from_str() {
    assert_eq!("1m".parse::<Tile>(), Ok(Tile(TM, 1)));
    assert_eq!("0s".parse::<Tile>(), Ok(Tile(TS, 0)));
    assert_eq!("7z".parse::<Tile>(), Ok(Tile(TZ, DR)));
    assert!("0z".parse::<Tile>().is_err());
    assert!("8z".parse::<Tile>().is_err());
    assert!("10m".parse::<Tile>().is_err());
    assert!("m1".parse::<Tile>().is_err());
}

#[test]
fn test_tile_order() {
    let mut tiles = vec![Tile(TP, 6), Tile(TP, 5), Tile(TM, 9), Tile(TP, 0), Tile(TP, 4)];
    tiles.sort();
    let s: Vec<String> = tiles.iter().map(|t| t.to_string()).collect();
    assert_eq!(s, ["9m", "4p", "0p", "5p", "6p"]);
}

#[test]
fn test_tile_serialize() {
    let ts = TileState::rotated(Tile(TM, 0));
    let v = serde_json::to_value(ts).unwrap();
    assert_eq!(v["code"], "0m");
    assert_eq!(v["is_rotated"], true);
    assert_eq!(v["is_face_down"], false);
}
