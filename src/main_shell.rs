// Copyright (C) 2020-2026 Andy Kurnia.

use gridlex::{ai, alphabet, display, error, game, level, lexicon, matrix, play, validate};
use rand::prelude::*;

// Interactive session against the bot.
//
// usage: shell [words-file]
//
// commands:
//   new [difficulty]         start a match (easy/medium/hard/nightmare)
//   play <row> <col> <h|v> <word>   place a word, 1-based start coordinate
//   board / rack / score     show the table
//   hint                     ask the generator what it would do
//   help / exit

fn parse_coord(arg: &str) -> Option<i8> {
    arg.parse::<i8>().ok().filter(|&n| n >= 1).map(|n| n - 1)
}

fn parse_move(
    strings: &[String],
    alphabet: &alphabet::Alphabet,
    player: u8,
) -> Result<play::Move, String> {
    if strings.len() != 5 {
        return Err("usage: play <row> <col> <h|v> <word>".to_string());
    }
    let row = parse_coord(&strings[1]).ok_or("bad row")?;
    let col = parse_coord(&strings[2]).ok_or("bad col")?;
    let direction = match strings[3].as_str() {
        "h" => play::Direction::Horizontal,
        "v" => play::Direction::Vertical,
        _ => return Err("direction must be h or v".to_string()),
    };
    let mut word = Vec::new();
    for ch in strings[4].chars() {
        match alphabet.board_tile_of(&ch.to_string()) {
            Some(tile) => word.push(tile),
            None => return Err(format!("unrecognized letter {:?}", ch)),
        }
    }
    let positions = (0..word.len() as i8)
        .map(|i| match direction {
            play::Direction::Horizontal => matrix::Pos::new(row, col + i),
            play::Direction::Vertical => matrix::Pos::new(row + i, col),
        })
        .collect();
    Ok(play::Move {
        direction,
        positions,
        word,
        score: 0,
        player,
    })
}

fn print_table(state: &game::GameState, alphabet: &alphabet::Alphabet) {
    display::print_board(alphabet, &state.board);
    for (i, player) in (1..).zip(state.players.iter()) {
        print!("player {}: {}", i, player.score);
        if let Some(hp) = player.hp {
            print!(" ({} hp)", hp);
        }
        print!(", ");
    }
    println!("pool {:2}", state.bag.len());
}

fn announce_end(state: &game::GameState, end: game::GameEnd) {
    if let game::GameEnd::Ended { winner, reason } = end {
        match winner {
            Some(idx) => println!(
                "{} wins by {}",
                state.players[idx as usize].name,
                reason.name()
            ),
            None => println!("drawn by {}", reason.name()),
        }
    }
}

// One match; returns true when the user wants out of the whole shell.
fn run_game(
    rl: &mut rustyline::DefaultEditor,
    word_list: &lexicon::SetLexicon,
    config: &level::LevelConfig<'_>,
    rng: &mut dyn RngCore,
) -> error::Returns<bool> {
    let alphabet = config.alphabet();
    let mut state = game::GameState::new(config)?;
    state.start(rng);
    print_table(&state, alphabet);
    println!("rack: {}", alphabet.fmt_rack(&state.players[0].rack));
    loop {
        if state.status != game::Status::Playing {
            return Ok(false);
        }
        let line = match rl.readline("game> ") {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                line
            }
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => {
                return Ok(true);
            }
            Err(err) => {
                println!("Error: {:?}", err);
                return Ok(true);
            }
        };
        let strings = match shell_words::split(&line) {
            Ok(strings) => strings,
            Err(err) => {
                println!("Bad quoting: {:?}", err);
                continue;
            }
        };
        if strings.is_empty() {
            continue;
        }
        match strings[0].as_str() {
            "help" => {
                println!("play <row> <col> <h|v> <word> / board / rack / score / hint / exit");
            }
            "board" => {
                print_table(&state, alphabet);
            }
            "rack" => {
                println!("rack: {}", alphabet.fmt_rack(&state.players[0].rack));
            }
            "score" => {
                for (i, player) in (1..).zip(state.players.iter()) {
                    println!("player {}: {} ({} words)", i, player.score, player.words);
                }
            }
            "hint" => {
                let suggestion = ai::calculate_ai_move(
                    &state.board,
                    &state.players[0].rack,
                    &state.players[1].rack,
                    ai::Difficulty::Nightmare.config(),
                    state.turn_number,
                    config.allow_gaps(),
                    word_list,
                    alphabet,
                    rng,
                );
                match suggestion {
                    Some(mv) => println!("try {}", mv.fmt(alphabet)),
                    None => println!("no move found; the game is lost"),
                }
            }
            "exit" | "quit" => {
                return Ok(true);
            }
            "play" => {
                let mv = match parse_move(&strings, alphabet, 0) {
                    Ok(mv) => mv,
                    Err(msg) => {
                        println!("{}", msg);
                        continue;
                    }
                };
                match state.play(word_list, &mv) {
                    Ok(end) => {
                        match state.history.last() {
                            Some(played) => println!("you play {}", played.fmt(alphabet)),
                            None => {}
                        }
                        announce_end(&state, end);
                        if state.status == game::Status::Playing {
                            let end = state.play_ai_turn(word_list, rng)?;
                            match state.history.last() {
                                Some(played) if played.player == 1 => {
                                    println!("opponent plays {}", played.fmt(alphabet))
                                }
                                _ => println!("opponent has no move"),
                            }
                            announce_end(&state, end);
                        }
                        print_table(&state, alphabet);
                        println!("rack: {}", alphabet.fmt_rack(&state.players[0].rack));
                    }
                    Err(err) => {
                        // rejected moves are conversation, not failure
                        match err.downcast_ref::<validate::MoveError>() {
                            Some(move_error) => println!("no: {}", move_error),
                            None => println!("no: {}", err),
                        }
                    }
                }
            }
            _ => {
                println!("invalid input, help for help");
            }
        }
    }
}

fn main() -> error::Returns<()> {
    let args: Vec<String> = std::env::args().collect();
    let words_path = args.get(1).map(|s| s.as_str()).unwrap_or("words.txt");
    let word_list = lexicon::SetLexicon::from_lines(&std::fs::read_to_string(words_path)?);
    println!("loaded {} words from {}", word_list.len(), words_path);
    let mut rng = rand_chacha::ChaCha20Rng::from_os_rng();
    let mut rl = rustyline::DefaultEditor::new()?;
    loop {
        let line = match rl.readline(">> ") {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                line
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        };
        let strings = match shell_words::split(&line) {
            Ok(strings) => strings,
            Err(err) => {
                println!("Bad quoting: {:?}", err);
                continue;
            }
        };
        if strings.is_empty() {
            continue;
        }
        match strings[0].as_str() {
            "help" => {
                println!("new [difficulty] / exit");
            }
            "exit" | "quit" => {
                break;
            }
            "new" => {
                let difficulty = match strings.get(1) {
                    Some(name) => match ai::Difficulty::from_name(name) {
                        Some(difficulty) => difficulty,
                        None => {
                            println!("unknown difficulty {:?}", name);
                            continue;
                        }
                    },
                    None => ai::Difficulty::Medium,
                };
                let config = match level::make_standard_level() {
                    level::LevelConfig::Static(mut static_config) => {
                        static_config.ai_difficulty = difficulty;
                        level::LevelConfig::Static(static_config)
                    }
                };
                if run_game(&mut rl, &word_list, &config, &mut rng)? {
                    break;
                }
            }
            _ => {
                println!("invalid input, help for help");
            }
        }
    }
    Ok(())
}
