// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board::BoardView, matrix};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormedWord {
    pub positions: Vec<matrix::Pos>,
    pub tiles: Vec<u8>,
}

impl FormedWord {
    pub fn text(&self, alphabet: &alphabet::Alphabet) -> String {
        alphabet.word_text(&self.tiles)
    }

    // flat additive scoring, no premiums in this game.
    pub fn score(&self, alphabet: &alphabet::Alphabet) -> i16 {
        self.tiles
            .iter()
            .map(|&tile| alphabet.score(tile) as i16)
            .sum()
    }
}

#[inline(always)]
fn step(pos: matrix::Pos, down: bool, delta: i8) -> matrix::Pos {
    if down {
        matrix::Pos::new(pos.row + delta, pos.col)
    } else {
        matrix::Pos::new(pos.row, pos.col + delta)
    }
}

// maximal contiguous run of letters through pos along one axis.
fn run_through<V: BoardView>(view: &V, pos: matrix::Pos, down: bool) -> FormedWord {
    let mut start = pos;
    while view.is_occupied(step(start, down, -1)) {
        start = step(start, down, -1);
    }
    let mut positions = Vec::new();
    let mut tiles = Vec::new();
    let mut cursor = start;
    loop {
        let tile = view.tile_at(cursor);
        if tile == 0 {
            break;
        }
        positions.push(cursor);
        tiles.push(tile);
        cursor = step(cursor, down, 1);
    }
    FormedWord { positions, tiles }
}

// Every word a move forms: the primary run along the move's axis plus one
// perpendicular run per newly placed tile. Runs shorter than two letters are
// not words. Cross runs at reused tiles predate the move and are skipped.
pub fn words_formed<V: BoardView>(
    view: &V,
    anchor: matrix::Pos,
    down: bool,
    new_positions: &[matrix::Pos],
) -> Vec<FormedWord> {
    let mut words = Vec::new();
    let primary = run_through(view, anchor, down);
    let has_primary = primary.positions.len() >= 2;
    if has_primary {
        words.push(primary);
    }
    for &pos in new_positions {
        let cross = run_through(view, pos, !down);
        if cross.positions.len() >= 2 {
            if has_primary && cross.positions == words[0].positions {
                continue;
            }
            words.push(cross);
        }
    }
    words
}

pub fn move_score(words: &[FormedWord], alphabet: &alphabet::Alphabet) -> i16 {
    words.iter().map(|word| word.score(alphabet)).sum()
}
