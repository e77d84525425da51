use super::*;

// Hand =======================================================================

// パース結果の手牌全体 枚数等の整合性はhand::validateで確認する
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Hand {
    pub concealed: Vec<TileState>, // 門前牌
    pub melds: Vec<Meld>,          // 副露
}

impl Hand {
    // 門前牌 -> 副露の順にすべての牌を返却
    pub fn tiles(&self) -> impl Iterator<Item = &TileState> {
        self.concealed
            .iter()
            .chain(self.melds.iter().flat_map(|m| m.tiles.iter()))
    }

    pub fn count(&self) -> usize {
        self.concealed.len() + self.melds.iter().map(|m| m.tiles.len()).sum::<usize>()
    }
}
