// Copyright (C) 2020-2026 Andy Kurnia.

use gridlex::{ai, board, error, json, level, lexicon, oracle, return_error};
use rand::prelude::*;
use std::io::Read;

// Answers one move request from stdin, JSON in and JSON out, the way a
// state-store would call the engine. The chosen move is re-validated through
// the timed oracle path before it is reported.
//
// usage: json [words-file] < request.json
//
// request: { "board": ["........", ...], "rack": "CARNIVAL?",
//            "difficulty": "hard", "turn": 3, "allow_gaps": false,
//            "level": { ... } }

#[tokio::main(flavor = "current_thread")]
async fn main() -> error::Returns<()> {
    let args: Vec<String> = std::env::args().collect();
    let words_path = args.get(1).map(|s| s.as_str()).unwrap_or("words.txt");
    let word_list = lexicon::SetLexicon::from_lines(&std::fs::read_to_string(words_path)?);

    let mut data = String::new();
    std::io::stdin().read_to_string(&mut data)?;
    let request = serde_json::from_str::<json::JsonAiRequest>(&data)?;

    let config = match &request.level {
        Some(level_json) => json::level_from_json(level_json)?,
        None => level::make_standard_level(),
    };
    let alphabet = config.alphabet();
    let board = if request.board.is_empty() {
        board::Board::with_prefills(config.dim(), config.prefills())?
    } else {
        json::board_from_json(&request.board, config.dim(), alphabet)?
    };
    let rack = json::rack_from_json(&request.rack, alphabet)?;
    let difficulty = match &request.difficulty {
        Some(name) => match ai::Difficulty::from_name(name) {
            Some(difficulty) => difficulty,
            None => {
                return_error!(format!("unknown difficulty {:?}", name));
            }
        },
        None => config.ai_difficulty(),
    };
    let allow_gaps = request.allow_gaps || config.allow_gaps();

    let mut rng = rand_chacha::ChaCha20Rng::from_os_rng();
    let chosen = ai::calculate_ai_move(
        &board,
        &rack,
        &[],
        difficulty.config(),
        request.turn,
        allow_gaps,
        &word_list,
        alphabet,
        &mut rng,
    );

    let response = match chosen {
        Some(mv) => {
            let placement = oracle::validate_move_timed(
                &board,
                &mv,
                &rack,
                &oracle::LocalOracle(&word_list),
                allow_gaps,
                alphabet,
                std::time::Duration::from_millis(500),
            )
            .await;
            match placement {
                Ok(placement) => json::JsonAiResponse {
                    play: Some(json::move_to_json(&mv, alphabet)),
                    words: placement
                        .words
                        .iter()
                        .map(|word| word.text(alphabet))
                        .collect(),
                },
                Err(move_error) => {
                    return_error!(format!("generated move failed validation: {}", move_error));
                }
            }
        }
        None => json::JsonAiResponse {
            play: None,
            words: Vec::new(),
        },
    };
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
