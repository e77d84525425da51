use super::*;

// Meld =======================================================================

// 3枚が同じ種別(字牌を除く)の連続した数字かどうか 赤5は5とみなす
pub fn is_sequence(tiles: &[Tile]) -> bool {
    if tiles.len() != 3 || tiles.iter().any(|t| t.is_hornor() || t.0 != tiles[0].0) {
        return false;
    }
    let mut ns: Vec<Tnum> = tiles.iter().map(|t| t.n()).collect();
    ns.sort_unstable();
    ns[1] == ns[0] + 1 && ns[2] == ns[1] + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MeldType {
    Chii,      // チー (順子)
    Pon,       // ポン (刻子)
    Daiminkan, // 大明槓
    Kakan,     // 加槓
    Ankan,     // 暗槓
}

impl MeldType {
    // 構成する牌の枚数
    pub fn tile_count(&self) -> usize {
        match self {
            MeldType::Chii | MeldType::Pon => 3,
            MeldType::Daiminkan | MeldType::Kakan | MeldType::Ankan => 4,
        }
    }
}

impl fmt::Display for MeldType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            MeldType::Chii => "chii",
            MeldType::Pon => "pon",
            MeldType::Daiminkan => "daiminkan",
            MeldType::Kakan => "kakan",
            MeldType::Ankan => "ankan",
        };
        write!(f, "{}", s)
    }
}

// 鳴いた相手
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MeldFrom {
    Kamicha,  // 上家 (左)
    Toimen,   // 対面
    Shimocha, // 下家 (右)
}

impl MeldFrom {
    // 鳴いた牌の位置から方向を決定 (0:上家, 1:対面, 2以上:下家)
    pub fn from_called_index(idx: Index) -> Self {
        match idx {
            0 => MeldFrom::Kamicha,
            1 => MeldFrom::Toimen,
            _ => MeldFrom::Shimocha,
        }
    }
}

impl fmt::Display for MeldFrom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            MeldFrom::Kamicha => "kamicha",
            MeldFrom::Toimen => "toimen",
            MeldFrom::Shimocha => "shimocha",
        };
        write!(f, "{}", s)
    }
}

// 鳴いた牌の情報 方向と位置は必ず揃って存在する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalledTile {
    pub from: MeldFrom,
    pub index: Index, // meld.tilesにおける鳴いた牌のindex
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meld {
    #[serde(rename = "type")]
    pub type_: MeldType,
    pub tiles: Vec<TileState>,
    pub called: Option<CalledTile>, // 暗槓はNone
}

impl Meld {
    pub fn from(&self) -> Option<MeldFrom> {
        self.called.map(|c| c.from)
    }

    pub fn called_index(&self) -> Option<Index> {
        self.called.map(|c| c.index)
    }

    pub fn codes(&self) -> Vec<Tile> {
        self.tiles.iter().map(|t| t.code).collect()
    }
}
