// Copyright (C) 2020-2026 Andy Kurnia.

use super::{ai, alphabet, board, board::BoardView, error, level, matrix, play};

// The JSON boundary mirrors the engine types instead of exposing them.
// Convention throughout: uppercase letters are natural tiles, lowercase
// letters are a wildcard standing in, "?" is an unassigned wildcard in a
// rack, "." is an empty board cell.

#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JsonDirection {
    Horizontal,
    Vertical,
}

impl From<play::Direction> for JsonDirection {
    #[inline(always)]
    fn from(direction: play::Direction) -> Self {
        match direction {
            play::Direction::Horizontal => JsonDirection::Horizontal,
            play::Direction::Vertical => JsonDirection::Vertical,
        }
    }
}

impl From<JsonDirection> for play::Direction {
    #[inline(always)]
    fn from(direction: JsonDirection) -> Self {
        match direction {
            JsonDirection::Horizontal => play::Direction::Horizontal,
            JsonDirection::Vertical => play::Direction::Vertical,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug)]
pub struct JsonPos {
    pub row: i8,
    pub col: i8,
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct JsonMove {
    pub direction: JsonDirection,
    pub positions: Vec<JsonPos>,
    pub word: String,
    pub score: i16,
    pub player: u8,
}

pub fn move_to_json(mv: &play::Move, alphabet: &alphabet::Alphabet) -> JsonMove {
    JsonMove {
        direction: mv.direction.into(),
        positions: mv
            .positions
            .iter()
            .map(|pos| JsonPos {
                row: pos.row,
                col: pos.col,
            })
            .collect(),
        word: mv
            .word
            .iter()
            .filter_map(|&tile| alphabet.from_board(tile))
            .collect(),
        score: mv.score,
        player: mv.player,
    }
}

pub fn move_from_json(
    json: &JsonMove,
    alphabet: &alphabet::Alphabet,
) -> error::Returns<play::Move> {
    let mut word = Vec::with_capacity(json.word.len());
    for ch in json.word.chars() {
        match alphabet.board_tile_of(&ch.to_string()) {
            Some(tile) => word.push(tile),
            None => {
                return_error!(format!("word has unrecognized letter {:?}", ch));
            }
        }
    }
    Ok(play::Move {
        direction: json.direction.into(),
        positions: json
            .positions
            .iter()
            .map(|pos| matrix::Pos::new(pos.row, pos.col))
            .collect(),
        word,
        score: json.score,
        player: json.player,
    })
}

pub fn rack_from_json(rack: &str, alphabet: &alphabet::Alphabet) -> error::Returns<Vec<u8>> {
    let mut tiles = Vec::with_capacity(rack.len());
    for ch in rack.chars() {
        match alphabet.rack_index_of(&ch.to_string()) {
            Some(tile) => tiles.push(tile),
            None => {
                return_error!(format!("rack has unrecognized letter {:?}", ch));
            }
        }
    }
    Ok(tiles)
}

pub fn board_to_json(board: &board::Board, alphabet: &alphabet::Alphabet) -> Vec<String> {
    let dim = board.dim();
    (0..dim.rows)
        .map(|row| {
            (0..dim.cols)
                .map(|col| {
                    alphabet
                        .from_board(board.tile_at(matrix::Pos::new(row, col)))
                        .unwrap_or(".")
                })
                .collect()
        })
        .collect()
}

pub fn board_from_json(
    rows: &[String],
    dim: matrix::Dim,
    alphabet: &alphabet::Alphabet,
) -> error::Returns<board::Board> {
    if rows.len() != dim.rows as usize {
        return_error!(format!(
            "board: need {} rows, found {} rows",
            dim.rows,
            rows.len()
        ));
    }
    let mut prefills = Vec::new();
    for (row_num, row) in (0i8..).zip(rows.iter()) {
        let cells: Vec<char> = row.chars().collect();
        if cells.len() != dim.cols as usize {
            return_error!(format!(
                "board row {} (0-based): need {} cols, found {} cols",
                row_num,
                dim.cols,
                cells.len()
            ));
        }
        for (col_num, &ch) in (0i8..).zip(cells.iter()) {
            if ch == '.' || ch == '*' || ch == ' ' {
                continue;
            }
            match alphabet.board_tile_of(&ch.to_string()) {
                Some(tile) => prefills.push((matrix::Pos::new(row_num, col_num), tile)),
                None => {
                    return_error!(format!(
                        "board row {} col {} (0-based): unrecognized letter {:?}",
                        row_num, col_num, ch
                    ));
                }
            }
        }
    }
    board::Board::with_prefills(dim, &prefills)
}

// External level/mode configuration objects. Absent fields fall back to the
// standard level's values.
#[derive(serde::Serialize, serde::Deserialize, Debug, Default)]
#[serde(default)]
pub struct JsonLevel {
    pub rows: Option<i8>,
    pub cols: Option<i8>,
    pub rack_size: Option<u8>,
    pub turn_limit: Option<u16>,
    pub target_score: Option<i16>,
    pub target_words: Option<u16>,
    pub boss_hp: Option<i16>,
    pub pass_bar: Option<i16>,
    pub allow_gaps: bool,
    pub prefills: Vec<String>,
    pub ai_difficulty: Option<String>,
}

pub fn level_from_json(json: &JsonLevel) -> error::Returns<level::LevelConfig<'static>> {
    let alphabet = alphabet::make_english_alphabet();
    let dim = matrix::Dim {
        rows: json.rows.unwrap_or(8),
        cols: json.cols.unwrap_or(8),
    };
    if dim.rows < 1 || dim.cols < 1 {
        return_error!(format!("bad board size {}x{}", dim.rows, dim.cols));
    }
    let mut prefills = Vec::new();
    if !json.prefills.is_empty() {
        let filled = board_from_json(&json.prefills, dim, &alphabet)?;
        for row in 0..dim.rows {
            for col in 0..dim.cols {
                let pos = matrix::Pos::new(row, col);
                let tile = filled.tile_at(pos);
                if tile != 0 {
                    prefills.push((pos, tile));
                }
            }
        }
    }
    let ai_difficulty = match &json.ai_difficulty {
        Some(name) => match ai::Difficulty::from_name(name) {
            Some(difficulty) => difficulty,
            None => {
                return_error!(format!("unknown difficulty {:?}", name));
            }
        },
        None => ai::Difficulty::Medium,
    };
    Ok(level::LevelConfig::Static(level::StaticLevelConfig {
        alphabet,
        dim,
        rack_size: json.rack_size.unwrap_or(10),
        turn_limit: json.turn_limit,
        target_score: json.target_score,
        target_words: json.target_words,
        boss_hp: json.boss_hp,
        pass_bar: json.pass_bar,
        allow_gaps: json.allow_gaps,
        prefills,
        ai_difficulty,
    }))
}

// One request to the move generator, one answer back.
#[derive(serde::Serialize, serde::Deserialize, Debug, Default)]
#[serde(default)]
pub struct JsonAiRequest {
    pub board: Vec<String>,
    pub rack: String,
    pub difficulty: Option<String>,
    pub turn: u16,
    pub allow_gaps: bool,
    pub level: Option<JsonLevel>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct JsonAiResponse {
    pub play: Option<JsonMove>,
    pub words: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::make_english_alphabet;
    use crate::matrix::{Dim, Pos};

    #[test]
    fn move_round_trip_keeps_wildcards() {
        let alphabet = make_english_alphabet();
        let t = alphabet.rack_index_of("T").unwrap();
        let o = alphabet.rack_index_of("O").unwrap();
        let mv = play::Move {
            direction: play::Direction::Horizontal,
            positions: vec![Pos::new(4, 4), Pos::new(4, 5)],
            word: vec![t, o | 0x80],
            score: 1,
            player: 1,
        };
        let json = move_to_json(&mv, &alphabet);
        assert_eq!(json.word, "To");
        let back = move_from_json(&json, &alphabet).unwrap();
        assert_eq!(back.word, mv.word);
        assert_eq!(back.positions, mv.positions);
        assert_eq!(back.direction, mv.direction);
    }

    #[test]
    fn direction_names_match_the_wire_format() {
        let json = serde_json::to_string(&JsonDirection::Horizontal).unwrap();
        assert_eq!(json, "\"horizontal\"");
        let back: JsonDirection = serde_json::from_str("\"vertical\"").unwrap();
        assert_eq!(back, JsonDirection::Vertical);
    }

    #[test]
    fn board_round_trip() {
        let alphabet = make_english_alphabet();
        let dim = Dim { rows: 8, cols: 8 };
        let mut board = board::Board::new(dim);
        board.place(Pos::new(2, 3), alphabet.rack_index_of("C").unwrap());
        board.place(Pos::new(2, 4), alphabet.rack_index_of("A").unwrap() | 0x80);
        let rows = board_to_json(&board, &alphabet);
        assert_eq!(rows[2], "...Ca...");
        let back = board_from_json(&rows, dim, &alphabet).unwrap();
        assert_eq!(
            back.tile_at(Pos::new(2, 4)),
            alphabet.rack_index_of("A").unwrap() | 0x80
        );
        assert_eq!(back.tile_at(Pos::new(0, 0)), 0);
    }

    #[test]
    fn bad_board_shapes_are_named() {
        let alphabet = make_english_alphabet();
        let dim = Dim { rows: 8, cols: 8 };
        let short = vec![".".repeat(8); 7];
        assert!(board_from_json(&short, dim, &alphabet).is_err());
        let ragged: Vec<String> = (0..8)
            .map(|i| ".".repeat(if i == 3 { 7 } else { 8 }))
            .collect();
        assert!(board_from_json(&ragged, dim, &alphabet).is_err());
    }

    #[test]
    fn level_defaults_fill_in() {
        let level = level_from_json(&JsonLevel::default()).unwrap();
        assert_eq!(level.rack_size(), 10);
        assert_eq!(level.dim().rows, 8);
        assert_eq!(level.ai_difficulty(), ai::Difficulty::Medium);
        assert!(level.turn_limit().is_none());
    }

    #[test]
    fn level_parses_difficulty_and_prefills() {
        let json: JsonLevel = serde_json::from_str(
            r#"{
                "turn_limit": 12,
                "pass_bar": 40,
                "ai_difficulty": "nightmare",
                "prefills": ["........", "........", "........", "........",
                             "....W...", "........", "........", "........"]
            }"#,
        )
        .unwrap();
        let level = level_from_json(&json).unwrap();
        assert_eq!(level.turn_limit(), Some(12));
        assert_eq!(level.ai_difficulty(), ai::Difficulty::Nightmare);
        assert_eq!(level.prefills().len(), 1);
        assert!(level_from_json(&JsonLevel {
            ai_difficulty: Some("impossible".to_string()),
            ..JsonLevel::default()
        })
        .is_err());
    }
}
