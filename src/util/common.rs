use std::fmt;

use crate::model::*;

pub fn inc_tile(tt: &mut TileTable, tile: Tile) {
    let t = tile;
    tt[t.0][t.1] += 1;
    if t.1 == 0 {
        // 0は赤5のフラグなので本来の5をたてる
        tt[t.0][5] += 1;
    }
}

// [1..TNUM]は赤5を含めた枚数, [0]は赤5の枚数
pub fn tiles_to_tile_table(tiles: impl IntoIterator<Item = Tile>) -> TileTable {
    let mut tt = TileTable::default();
    for t in tiles {
        inc_tile(&mut tt, t);
    }
    tt
}

pub fn vec_to_string<T: fmt::Display>(v: &[T]) -> String {
    let vs: Vec<String> = v.iter().map(|x| format!("{}", x)).collect();
    vs.join(" ")
}

#[test]
fn test_tiletable() {
    let tiles = crate::notation::parse_hand("550m11z");
    let tt = tiles_to_tile_table(tiles);
    assert_eq!(tt[TM][5], 3);
    assert_eq!(tt[TM][0], 1);
    assert_eq!(tt[TZ][WE], 2);
}
