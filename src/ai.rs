// Copyright (C) 2020-2026 Andy Kurnia.

use super::{
    alphabet,
    board::{Board, BoardView},
    lexicon::{Lexicon, MemoLexicon},
    matrix, play, validate,
};
use rand::prelude::*;
use std::collections::HashSet;

// Difficulty is data, not code: every tier runs the same generator with a
// different set of weights and bounds.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Nightmare,
}

#[derive(Clone, Copy, Debug)]
pub struct AiConfig {
    pub min_word_length: u8,
    pub max_word_length: u8,
    pub points_weight: f32,
    pub blocking_weight: f32,
    pub board_control_weight: f32,
    pub letter_management_weight: f32,
    // fraction of the heuristic score each candidate is jittered by
    pub randomness: f32,
    // consumed by outer product surfaces, carried with the preset
    pub can_bluff: bool,
    pub uses_powerups: bool,
}

static EASY_AI: AiConfig = AiConfig {
    min_word_length: 2,
    max_word_length: 4,
    points_weight: 0.5,
    blocking_weight: 0.1,
    board_control_weight: 0.2,
    letter_management_weight: 0.2,
    randomness: 0.5,
    can_bluff: false,
    uses_powerups: false,
};

static MEDIUM_AI: AiConfig = AiConfig {
    min_word_length: 2,
    max_word_length: 5,
    points_weight: 0.8,
    blocking_weight: 0.3,
    board_control_weight: 0.4,
    letter_management_weight: 0.3,
    randomness: 0.25,
    can_bluff: false,
    uses_powerups: true,
};

static HARD_AI: AiConfig = AiConfig {
    min_word_length: 3,
    max_word_length: 7,
    points_weight: 1.0,
    blocking_weight: 0.5,
    board_control_weight: 0.6,
    letter_management_weight: 0.5,
    randomness: 0.1,
    can_bluff: true,
    uses_powerups: true,
};

static NIGHTMARE_AI: AiConfig = AiConfig {
    min_word_length: 3,
    max_word_length: 8,
    points_weight: 1.2,
    blocking_weight: 0.7,
    board_control_weight: 0.8,
    letter_management_weight: 0.7,
    randomness: 0.02,
    can_bluff: true,
    uses_powerups: true,
};

impl Difficulty {
    #[inline(always)]
    pub fn config(self) -> &'static AiConfig {
        match self {
            Difficulty::Easy => &EASY_AI,
            Difficulty::Medium => &MEDIUM_AI,
            Difficulty::Hard => &HARD_AI,
            Difficulty::Nightmare => &NIGHTMARE_AI,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Nightmare => "nightmare",
        }
    }

    pub fn from_name(name: &str) -> Option<Difficulty> {
        match name {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "nightmare" => Some(Difficulty::Nightmare),
            _ => None,
        }
    }
}

// How much a move constrains the opponent is not computed yet; the presets
// still weight it, so it contributes a flat nudge for now.
// TODO: score board area denied to the opponent once the product needs it.
const BLOCKING_STUB: f32 = 0.1;

// Every word spellable from the tally, lengths within [min_len, max_len].
// Explicit frontier instead of recursion; one cursor per prefix depth. A
// wildcard is only spent for a letter the tally has run out of, so each
// (depth, letter) pair is tried exactly once and no duplicate sequences
// arise.
fn words_from_tally(
    tally: &mut [u8],
    lexicon: &dyn Lexicon,
    alphabet: &alphabet::Alphabet,
    min_len: u8,
    max_len: u8,
    out: &mut Vec<Vec<u8>>,
) {
    if max_len == 0 {
        return;
    }
    let num_faces = alphabet.len() - 1;
    let mut prefix: Vec<u8> = Vec::with_capacity(max_len as usize);
    let mut stack: Vec<u8> = vec![0];
    while let Some(cursor) = stack.last_mut() {
        let mut chosen = None;
        while *cursor < num_faces {
            let face = *cursor + 1;
            *cursor += 1;
            if tally[face as usize] > 0 {
                chosen = Some((face, false));
                break;
            } else if tally[0] > 0 {
                chosen = Some((face, true));
                break;
            }
        }
        match chosen {
            Some((face, wild)) => {
                let pool = if wild { 0 } else { face as usize };
                tally[pool] -= 1;
                prefix.push(if wild { face | 0x80 } else { face });
                let len = prefix.len() as u8;
                if len >= min_len && lexicon.is_word(&alphabet.word_text(&prefix)) {
                    out.push(prefix.clone());
                }
                if len < max_len {
                    stack.push(0);
                } else {
                    tally[pool] += 1;
                    prefix.pop();
                }
            }
            None => {
                stack.pop();
                if !stack.is_empty() {
                    let tile = prefix.pop().unwrap();
                    let pool = if tile & 0x80 != 0 {
                        0
                    } else {
                        (tile & 0x7f) as usize
                    };
                    tally[pool] += 1;
                }
            }
        }
    }
}

// Candidate words reachable from the rack, plus hook variants seeded with
// each distinct letter already on the board.
fn candidate_words(
    board: &Board,
    rack: &[u8],
    lexicon: &dyn Lexicon,
    alphabet: &alphabet::Alphabet,
    min_len: u8,
    max_len: u8,
) -> Vec<Vec<u8>> {
    let mut tally = vec![0u8; alphabet.len() as usize];
    for &tile in rack {
        tally[tile as usize] += 1;
    }
    let mut seen: HashSet<Vec<u8>> = HashSet::new();
    let mut words = Vec::new();
    let mut collected = Vec::new();
    words_from_tally(&mut tally, lexicon, alphabet, min_len, max_len, &mut collected);
    for word in collected.drain(..) {
        if seen.insert(word.clone()) {
            words.push(word);
        }
    }
    let dim = board.dim();
    let mut board_faces = vec![false; alphabet.len() as usize];
    for row in 0..dim.rows {
        for col in 0..dim.cols {
            let tile = board.tile_at(matrix::Pos::new(row, col));
            if tile != 0 {
                board_faces[(tile & 0x7f) as usize] = true;
            }
        }
    }
    for face in 1..alphabet.len() {
        if board_faces[face as usize] {
            tally[face as usize] += 1;
            words_from_tally(&mut tally, lexicon, alphabet, min_len, max_len, &mut collected);
            tally[face as usize] -= 1;
            for word in collected.drain(..) {
                if seen.insert(word.clone()) {
                    words.push(word);
                }
            }
        }
    }
    words
}

struct Candidate {
    mv: play::Move,
    placement: validate::Placement,
}

fn enumerate_candidates(
    board: &Board,
    rack: &[u8],
    lexicon: &dyn Lexicon,
    alphabet: &alphabet::Alphabet,
    min_len: u8,
    max_len: u8,
    allow_gaps: bool,
    mut found: impl FnMut(Candidate) -> bool,
) {
    let dim = board.dim();
    let first_move = board.is_first_move();
    let words = candidate_words(board, rack, lexicon, alphabet, min_len, max_len);
    for word in &words {
        let len = word.len() as i8;
        for &direction in &[play::Direction::Horizontal, play::Direction::Vertical] {
            let down = direction.is_down();
            let (num_lanes, lane_len) = if down {
                (dim.cols, dim.rows)
            } else {
                (dim.rows, dim.cols)
            };
            for lane in 0..num_lanes {
                for start in 0..=lane_len - len {
                    let pos_at = |i: i8| {
                        if down {
                            matrix::Pos::new(start + i, lane)
                        } else {
                            matrix::Pos::new(lane, start + i)
                        }
                    };
                    // the run must not bleed into neighboring letters
                    if board.is_occupied(pos_at(-1)) || board.is_occupied(pos_at(len)) {
                        continue;
                    }
                    let mut compatible = true;
                    let mut any_new = false;
                    let mut any_reuse = false;
                    let mut covers_center = false;
                    let mut touches = false;
                    let mut move_word = Vec::with_capacity(word.len());
                    for i in 0..len {
                        let pos = pos_at(i);
                        let held = board.tile_at(pos);
                        let code = word[i as usize];
                        if held != 0 {
                            if held & 0x7f != code & 0x7f {
                                compatible = false;
                                break;
                            }
                            any_reuse = true;
                            move_word.push(held & 0x7f);
                        } else {
                            any_new = true;
                            if board.has_adjacent_letter(pos) {
                                touches = true;
                            }
                            move_word.push(code);
                        }
                        if pos == board.center() {
                            covers_center = true;
                        }
                    }
                    if !compatible || !any_new {
                        continue;
                    }
                    if first_move {
                        if !covers_center {
                            continue;
                        }
                    } else if !any_reuse && !touches {
                        continue;
                    }
                    let mv = play::Move {
                        direction,
                        positions: (0..len).map(pos_at).collect(),
                        word: move_word,
                        score: 0,
                        player: 0,
                    };
                    // the full pipeline is the only arbiter of legality
                    if let Ok(placement) =
                        validate::validate_move(board, &mv, rack, lexicon, allow_gaps, alphabet)
                    {
                        if found(Candidate { mv, placement }) {
                            return;
                        }
                    }
                }
            }
        }
    }
}

fn heuristic_score(
    candidate: &Candidate,
    config: &AiConfig,
    board: &Board,
    alphabet: &alphabet::Alphabet,
) -> f32 {
    let center = board.center();
    let proximity: f32 = candidate
        .placement
        .new_tiles
        .iter()
        .map(|&(pos, _)| 1.0 / (1.0 + pos.manhattan(center) as f32))
        .sum();
    let max_score = alphabet.max_score().max(1) as f32;
    let thrift: f32 = candidate
        .placement
        .new_tiles
        .iter()
        .map(|&(_, tile)| (max_score - alphabet.score(tile) as f32) / max_score)
        .sum();
    config.points_weight * (candidate.placement.score as f32 / 100.0)
        + config.blocking_weight * BLOCKING_STUB
        + config.board_control_weight * proximity
        + config.letter_management_weight * thrift
}

// The move generator: every candidate placement reachable from the rack is
// validated, scored by the weighted heuristic, jittered, and the best
// survivor returned. None means no legal move exists within the config's
// word-length window; the turn engine treats that as a terminal signal.
// Deterministic for a given rng seed; ties go to the earliest candidate.
pub fn calculate_ai_move(
    board: &Board,
    rack: &[u8],
    _opponent_rack: &[u8],
    config: &AiConfig,
    _turn: u16,
    allow_gaps: bool,
    lexicon: &dyn Lexicon,
    alphabet: &alphabet::Alphabet,
    rng: &mut dyn RngCore,
) -> Option<play::Move> {
    let memo = MemoLexicon::new(lexicon);
    let min_len = config.min_word_length.max(2);
    let max_len = config.max_word_length.min(rack.len() as u8 + 1);
    let mut best: Option<(f32, play::Move)> = None;
    enumerate_candidates(
        board,
        rack,
        &memo,
        alphabet,
        min_len,
        max_len,
        allow_gaps,
        |candidate| {
            let mut score = heuristic_score(&candidate, config, board, alphabet);
            if config.randomness > 0.0 {
                score += score * rng.random_range(-config.randomness..config.randomness);
            }
            if best.as_ref().is_none_or(|&(best_score, _)| score > best_score) {
                let mut mv = candidate.mv;
                mv.score = candidate.placement.score;
                best = Some((score, mv));
            }
            false
        },
    );
    best.map(|(_, mv)| mv)
}

// Move-existence probe for stalemate detection, difficulty-agnostic: wide
// length window, first legal candidate wins.
pub fn has_any_legal_move(
    board: &Board,
    rack: &[u8],
    lexicon: &dyn Lexicon,
    alphabet: &alphabet::Alphabet,
    allow_gaps: bool,
) -> bool {
    let memo = MemoLexicon::new(lexicon);
    let max_len = 7u8.min(rack.len() as u8 + 1);
    let mut any = false;
    enumerate_candidates(
        board,
        rack,
        &memo,
        alphabet,
        2,
        max_len,
        allow_gaps,
        |_| {
            any = true;
            true
        },
    );
    any
}
