// Copyright (C) 2020-2026 Andy Kurnia.

use super::{
    alphabet,
    board::{Board, BoardView, Overlay},
    extract, lexicon, matrix, play,
};

// One variant per way a move can be refused. Every rejection is recoverable:
// the caller adjusts the move and resubmits, nothing unwinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    Empty,
    NotInLine,
    DirectionMismatch,
    NotConsecutive,
    GapNotCovered { pos: matrix::Pos },
    MissingCenter,
    Disconnected,
    OutOfBounds { pos: matrix::Pos },
    LengthMismatch { positions: usize, letters: usize },
    UnknownLetter { index: u8 },
    TileConflict { pos: matrix::Pos },
    TileShortage { letter: String, needed: u8, available: u8 },
    NothingPlaced,
    ParallelWordTouch { pos: matrix::Pos },
    NoWordFormed,
    NotAWord { word: String },
    GameOver,
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveError::Empty => write!(f, "no tiles in move"),
            MoveError::NotInLine => write!(f, "tiles must lie on a single row or column"),
            MoveError::DirectionMismatch => {
                write!(f, "declared direction does not match tile geometry")
            }
            MoveError::NotConsecutive => write!(f, "tiles must be consecutive"),
            MoveError::GapNotCovered { pos } => {
                write!(f, "gap at row {} col {} has no letter", pos.row, pos.col)
            }
            MoveError::MissingCenter => {
                write!(f, "the first move must pass through the center square")
            }
            MoveError::Disconnected => {
                write!(f, "move does not connect to any letter on the board")
            }
            MoveError::OutOfBounds { pos } => {
                write!(f, "row {} col {} is outside the board", pos.row, pos.col)
            }
            MoveError::LengthMismatch { positions, letters } => {
                write!(f, "{} letters for {} positions", letters, positions)
            }
            MoveError::UnknownLetter { index } => write!(f, "unrecognized letter index {}", index),
            MoveError::TileConflict { pos } => write!(
                f,
                "row {} col {} already holds a different letter",
                pos.row, pos.col
            ),
            MoveError::TileShortage {
                letter,
                needed,
                available,
            } => write!(
                f,
                "not enough {} tiles ({} needed, {} in hand)",
                letter, needed, available
            ),
            MoveError::NothingPlaced => write!(f, "move places no new tiles"),
            MoveError::ParallelWordTouch { pos } => write!(
                f,
                "placement runs alongside the word at row {} col {}",
                pos.row, pos.col
            ),
            MoveError::NoWordFormed => write!(f, "move does not form a word"),
            MoveError::NotAWord { word } => write!(f, "{} is not a word", word),
            MoveError::GameOver => write!(f, "the game is over"),
        }
    }
}

impl std::error::Error for MoveError {}

// What a legal move will do, computed from a projection of the move.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub new_tiles: Vec<(matrix::Pos, u8)>,
    pub words: Vec<extract::FormedWord>,
    pub score: i16,
}

#[inline(always)]
fn axis_coord(pos: matrix::Pos, down: bool) -> i8 {
    if down { pos.row } else { pos.col }
}

// run length through pos along one axis, pre-existing letters only.
fn run_len_through(board: &Board, pos: matrix::Pos, down: bool) -> usize {
    let mut start = pos;
    loop {
        let prev = if down {
            matrix::Pos::new(start.row - 1, start.col)
        } else {
            matrix::Pos::new(start.row, start.col - 1)
        };
        if !board.is_occupied(prev) {
            break;
        }
        start = prev;
    }
    let mut len = 0;
    let mut cursor = start;
    while board.is_occupied(cursor) {
        len += 1;
        cursor = if down {
            matrix::Pos::new(cursor.row + 1, cursor.col)
        } else {
            matrix::Pos::new(cursor.row, cursor.col + 1)
        };
    }
    len
}

// Checks 1-6 of the pipeline plus extraction; everything except the
// dictionary. Pure over (board, move, rack): inputs are never mutated, so
// re-validation of an identical move gives an identical verdict.
pub fn validate_placement(
    board: &Board,
    mv: &play::Move,
    rack: &[u8],
    allow_gaps: bool,
    alphabet: &alphabet::Alphabet,
) -> Result<Placement, MoveError> {
    let dim = board.dim();
    let down = mv.direction.is_down();

    // 1. geometry: one lane, consecutive unless gaps ride on board letters
    if mv.positions.is_empty() {
        return Err(MoveError::Empty);
    }
    let same_row = mv.positions.iter().all(|pos| pos.row == mv.positions[0].row);
    let same_col = mv.positions.iter().all(|pos| pos.col == mv.positions[0].col);
    if !same_row && !same_col {
        return Err(MoveError::NotInLine);
    }
    if mv.positions.len() > 1 {
        let inferred_down = same_col && !same_row;
        if inferred_down != down {
            return Err(MoveError::DirectionMismatch);
        }
    }
    let mut coords: Vec<i8> = mv
        .positions
        .iter()
        .map(|&pos| axis_coord(pos, down))
        .collect();
    coords.sort_unstable();
    for window in coords.windows(2) {
        if window[1] == window[0] {
            return Err(MoveError::NotConsecutive);
        }
        for gap in window[0] + 1..window[1] {
            let gap_pos = if down {
                matrix::Pos::new(gap, mv.positions[0].col)
            } else {
                matrix::Pos::new(mv.positions[0].row, gap)
            };
            if !allow_gaps {
                return Err(MoveError::NotConsecutive);
            }
            if !board.is_occupied(gap_pos) {
                return Err(MoveError::GapNotCovered { pos: gap_pos });
            }
        }
    }

    // 2. placement legality: through the center first, connected after
    if board.is_first_move() {
        if !mv.positions.contains(&board.center()) {
            return Err(MoveError::MissingCenter);
        }
    } else if !mv
        .positions
        .iter()
        .any(|&pos| board.is_occupied(pos) || board.has_adjacent_letter(pos))
    {
        return Err(MoveError::Disconnected);
    }

    // 3. bounds
    for &pos in &mv.positions {
        if !dim.contains(pos) {
            return Err(MoveError::OutOfBounds { pos });
        }
    }

    // 4. length match
    if mv.word.len() != mv.positions.len() {
        return Err(MoveError::LengthMismatch {
            positions: mv.positions.len(),
            letters: mv.word.len(),
        });
    }

    // 5. tile availability with multiplicity; occupied cells must match
    let mut rack_tally = vec![0u8; alphabet.len() as usize];
    for &tile in rack {
        rack_tally[tile as usize] += 1;
    }
    let mut needed_tally = vec![0u8; alphabet.len() as usize];
    let mut new_tiles = Vec::with_capacity(mv.positions.len());
    for (&pos, &tile) in mv.positions.iter().zip(mv.word.iter()) {
        let face = tile & 0x7f;
        if face == 0 || face >= alphabet.len() {
            return Err(MoveError::UnknownLetter { index: tile });
        }
        let held = board.tile_at(pos);
        if held != 0 {
            if held & 0x7f != face {
                return Err(MoveError::TileConflict { pos });
            }
        } else {
            needed_tally[if tile & 0x80 != 0 { 0 } else { tile as usize }] += 1;
            new_tiles.push((pos, tile));
        }
    }
    for (tile, (&needed, &available)) in needed_tally.iter().zip(rack_tally.iter()).enumerate() {
        if needed > available {
            return Err(MoveError::TileShortage {
                letter: alphabet.from_rack(tile as u8).unwrap_or("?").to_string(),
                needed,
                available,
            });
        }
    }
    if new_tiles.is_empty() {
        return Err(MoveError::NothingPlaced);
    }

    // 6. parallel-word spacing: a new tile must not side-touch a same-axis
    // word; a single perpendicular neighbor is a crossing and is judged by
    // the cross-word dictionary check instead
    for &(pos, _) in &new_tiles {
        let perpendicular = if down {
            [
                matrix::Pos::new(pos.row, pos.col - 1),
                matrix::Pos::new(pos.row, pos.col + 1),
            ]
        } else {
            [
                matrix::Pos::new(pos.row - 1, pos.col),
                matrix::Pos::new(pos.row + 1, pos.col),
            ]
        };
        for neighbor in perpendicular {
            if board.is_occupied(neighbor) && run_len_through(board, neighbor, down) >= 2 {
                return Err(MoveError::ParallelWordTouch { pos: neighbor });
            }
        }
    }

    // 7a. project and extract; a move must read as at least one word
    let overlay = Overlay::new(board, &new_tiles);
    let new_positions: Vec<matrix::Pos> = new_tiles.iter().map(|&(pos, _)| pos).collect();
    let words = extract::words_formed(&overlay, mv.positions[0], down, &new_positions);
    if words.is_empty() {
        return Err(MoveError::NoWordFormed);
    }
    let score = extract::move_score(&words, alphabet);
    Ok(Placement {
        new_tiles,
        words,
        score,
    })
}

// The full pipeline: placement checks, then every formed word past the
// oracle. The first failing word is named.
pub fn validate_move(
    board: &Board,
    mv: &play::Move,
    rack: &[u8],
    lexicon: &dyn lexicon::Lexicon,
    allow_gaps: bool,
    alphabet: &alphabet::Alphabet,
) -> Result<Placement, MoveError> {
    let placement = validate_placement(board, mv, rack, allow_gaps, alphabet)?;
    for word in &placement.words {
        let text = word.text(alphabet);
        if !lexicon.is_word(&text) {
            return Err(MoveError::NotAWord { word: text });
        }
    }
    Ok(placement)
}
