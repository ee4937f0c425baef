// Copyright (C) 2020-2026 Andy Kurnia.

use gridlex::{ai, display, error, game, level, lexicon, return_error};
use rand::prelude::*;

// Self-play driver. One game prints every board; a batch fans games out
// across the cores and logs one CSV record per game.
//
// usage: auto [words-file] [num-games] [difficulty-1] [difficulty-2]

struct GameRecord {
    game: usize,
    winner: String,
    reason: String,
    score_0: i16,
    score_1: i16,
    turns: u16,
}

fn parse_difficulty(arg: Option<&String>, fallback: ai::Difficulty) -> error::Returns<ai::Difficulty> {
    match arg {
        Some(name) => match ai::Difficulty::from_name(name) {
            Some(difficulty) => Ok(difficulty),
            None => {
                return_error!(format!("unknown difficulty {:?}", name));
            }
        },
        None => Ok(fallback),
    }
}

fn play_one_game(
    config: &level::LevelConfig<'_>,
    lexicon: &lexicon::SetLexicon,
    difficulties: [ai::Difficulty; 2],
    rng: &mut dyn RngCore,
    verbose: bool,
) -> error::Returns<(game::GameEnd, i16, i16, u16)> {
    let mut state = game::GameState::new(config)?;
    state.players[0].controller = game::Controller::Bot(difficulties[0]);
    state.players[1].controller = game::Controller::Bot(difficulties[1]);
    state.start(rng);
    let mut end = game::GameEnd::NotEnded;
    while state.status == game::Status::Playing {
        let moves_before = state.history.len();
        end = state.play_ai_turn(lexicon, rng)?;
        if verbose {
            if state.history.len() > moves_before {
                let mv = &state.history[state.history.len() - 1];
                println!(
                    "player {} plays {}",
                    mv.player + 1,
                    mv.fmt(config.alphabet())
                );
            } else {
                println!("no move available");
            }
            display::print_board(config.alphabet(), &state.board);
            for (i, player) in (1..).zip(state.players.iter()) {
                print!("player {}: {}, ", i, player.score);
            }
            println!("pool {:2}", state.bag.len());
        }
    }
    Ok((
        end,
        state.players[0].score,
        state.players[1].score,
        state.turn_number,
    ))
}

fn describe_end(end: game::GameEnd) -> (String, String) {
    match end {
        game::GameEnd::Ended { winner, reason } => (
            match winner {
                Some(idx) => format!("player {}", idx + 1),
                None => "draw".to_string(),
            },
            reason.name().to_string(),
        ),
        game::GameEnd::NotEnded => ("unfinished".to_string(), "".to_string()),
    }
}

fn main() -> error::Returns<()> {
    let args: Vec<String> = std::env::args().collect();
    let words_path = args.get(1).map(|s| s.as_str()).unwrap_or("words.txt");
    let num_games: usize = match args.get(2) {
        Some(arg) => arg.parse()?,
        None => 1,
    };
    let difficulty_0 = parse_difficulty(args.get(3), ai::Difficulty::Medium)?;
    let difficulty_1 = parse_difficulty(args.get(4), ai::Difficulty::Medium)?;

    let word_list = lexicon::SetLexicon::from_lines(&std::fs::read_to_string(words_path)?);
    println!("loaded {} words from {}", word_list.len(), words_path);
    let config = level::make_standard_level();

    if num_games <= 1 {
        println!("\nplaying self");
        let mut rng = rand_chacha::ChaCha20Rng::from_os_rng();
        let (end, score_0, score_1, turns) = play_one_game(
            &config,
            &word_list,
            [difficulty_0, difficulty_1],
            &mut rng,
            true,
        )?;
        let (winner, reason) = describe_end(end);
        println!(
            "{} wins by {} after {} turns ({} - {})",
            winner, reason, turns, score_0, score_1
        );
        return Ok(());
    }

    let run_identifier = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let log_path = format!("games-{}.csv", run_identifier);
    let mut csv_game = csv::Writer::from_path(&log_path)?;
    csv_game.serialize(("game", "winner", "reason", "score1", "score2", "turns"))?;

    let num_threads = std::cmp::min(num_cpus::get(), num_games);
    let (tx, rx) = std::sync::mpsc::channel::<Result<GameRecord, String>>();
    std::thread::scope(|scope| {
        for thread_idx in 0..num_threads {
            let tx = tx.clone();
            let config = &config;
            let word_list = &word_list;
            scope.spawn(move || {
                let mut rng = rand_chacha::ChaCha20Rng::from_os_rng();
                let mut game_idx = thread_idx;
                while game_idx < num_games {
                    let outcome = play_one_game(
                        config,
                        word_list,
                        [difficulty_0, difficulty_1],
                        &mut rng,
                        false,
                    )
                    .map(|(end, score_0, score_1, turns)| {
                        let (winner, reason) = describe_end(end);
                        GameRecord {
                            game: game_idx,
                            winner,
                            reason,
                            score_0,
                            score_1,
                            turns,
                        }
                    })
                    .map_err(|err| err.to_string());
                    if tx.send(outcome).is_err() {
                        break;
                    }
                    game_idx += num_threads;
                }
            });
        }
        drop(tx);
    });

    let mut wins = [0usize; 2];
    let mut draws = 0usize;
    for outcome in rx.iter().take(num_games) {
        let record = outcome.map_err(error::new)?;
        match record.winner.as_str() {
            "player 1" => wins[0] += 1,
            "player 2" => wins[1] += 1,
            _ => draws += 1,
        }
        csv_game.serialize((
            record.game,
            &record.winner,
            &record.reason,
            record.score_0,
            record.score_1,
            record.turns,
        ))?;
    }
    csv_game.flush()?;
    println!(
        "{} games: {} / {} / {} draws, log in {}",
        num_games, wins[0], wins[1], draws, log_path
    );
    Ok(())
}
