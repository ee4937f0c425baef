// Copyright (C) 2020-2026 Andy Kurnia.

use super::{ai, bag, board, error, level, lexicon, play, validate};
use rand::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Controller {
    Human,
    Bot(ai::Difficulty),
}

pub struct GamePlayer {
    pub name: String,
    pub rack: Vec<u8>,
    pub score: i16,
    pub words: u16,
    pub hp: Option<i16>,
    pub controller: Controller,
}

impl Clone for GamePlayer {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            rack: self.rack.clone(),
            score: self.score,
            words: self.words,
            hp: self.hp,
            controller: self.controller,
        }
    }

    #[inline(always)]
    fn clone_from(&mut self, source: &Self) {
        self.name.clone_from(&source.name);
        self.rack.clone_from(&source.rack);
        self.score = source.score;
        self.words = source.words;
        self.hp = source.hp;
        self.controller = source.controller;
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
    Waiting,
    Playing,
    Finished,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EndReason {
    HpDepleted,
    TargetScore,
    TargetWords,
    TurnLimit,
    TilesDepleted,
    Stalemate,
}

impl EndReason {
    pub fn name(self) -> &'static str {
        match self {
            EndReason::HpDepleted => "hp depleted",
            EndReason::TargetScore => "target score",
            EndReason::TargetWords => "target words",
            EndReason::TurnLimit => "turn limit",
            EndReason::TilesDepleted => "tiles depleted",
            EndReason::Stalemate => "stalemate",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameEnd {
    NotEnded,
    Ended {
        winner: Option<u8>,
        reason: EndReason,
    },
}

pub struct GameState<'a> {
    pub config: &'a level::LevelConfig<'a>,
    pub players: Box<[GamePlayer]>,
    pub board: board::Board,
    pub bag: bag::Bag,
    pub turn: u8,
    pub turn_number: u16,
    pub status: Status,
    pub history: Vec<play::Move>,
}

impl<'a> Clone for GameState<'a> {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            players: self.players.clone(),
            board: self.board.clone(),
            bag: self.bag.clone(),
            turn: self.turn,
            turn_number: self.turn_number,
            status: self.status,
            history: self.history.clone(),
        }
    }

    #[inline(always)]
    fn clone_from(&mut self, source: &Self) {
        self.config = source.config;
        self.players.clone_from(&source.players);
        self.board.clone_from(&source.board);
        self.bag.clone_from(&source.bag);
        self.turn = source.turn;
        self.turn_number = source.turn_number;
        self.status = source.status;
        self.history.clone_from(&source.history);
    }
}

#[inline(always)]
fn other(player: u8) -> u8 {
    1 - player
}

impl<'a> GameState<'a> {
    pub fn new(config: &'a level::LevelConfig<'a>) -> error::Returns<Self> {
        let board = board::Board::with_prefills(config.dim(), config.prefills())?;
        let rack_size = config.rack_size() as usize;
        let make_player = |name: &str, controller: Controller| GamePlayer {
            name: name.to_string(),
            rack: Vec::with_capacity(rack_size),
            score: 0,
            words: 0,
            hp: config.boss_hp(),
            controller,
        };
        Ok(Self {
            config,
            players: Box::new([
                make_player("player 1", Controller::Human),
                make_player("player 2", Controller::Bot(config.ai_difficulty())),
            ]),
            board,
            bag: bag::Bag::new(config.alphabet()),
            turn: 0,
            turn_number: 0,
            status: Status::Waiting,
            history: Vec::new(),
        })
    }

    // shuffle and deal; the match is live from here on.
    pub fn start(&mut self, rng: &mut dyn RngCore) {
        self.bag.shuffle(rng);
        let rack_size = self.config.rack_size() as usize;
        for player in self.players.iter_mut() {
            self.bag.replenish(&mut player.rack, rack_size);
        }
        self.status = Status::Playing;
    }

    #[inline(always)]
    pub fn current_player(&self) -> &GamePlayer {
        &self.players[self.turn as usize]
    }

    pub fn next_turn(&mut self) {
        let num_players = self.players.len() as u8;
        self.turn += 1;
        self.turn -= num_players & -((self.turn >= num_players) as i8) as u8;
    }

    // One atomic half-turn: validate, apply, book-keep, advance, check end.
    // Any failure before apply leaves the state untouched, so the caller may
    // retry with a different move.
    pub fn play(
        &mut self,
        lexicon: &dyn lexicon::Lexicon,
        mv: &play::Move,
    ) -> error::Returns<GameEnd> {
        if self.status != Status::Playing {
            return Err(validate::MoveError::GameOver.into());
        }
        let alphabet = self.config.alphabet();
        let mover = self.turn;
        let placement = validate::validate_move(
            &self.board,
            mv,
            &self.players[mover as usize].rack,
            lexicon,
            self.config.allow_gaps(),
            alphabet,
        )?;
        let applied = play::apply_move(
            &self.board,
            &self.players[mover as usize].rack,
            mv,
            alphabet,
        )?;
        debug_assert_eq!(applied.score, placement.score);
        self.board = applied.board;
        let rack_size = self.config.rack_size() as usize;
        {
            let player = &mut self.players[mover as usize];
            player.rack = applied.rack;
            player.score += applied.score;
            player.words += placement.words.len() as u16;
            self.bag.replenish(&mut player.rack, rack_size);
        }
        if self.config.boss_hp().is_some() {
            // move length is damage: the longest word the move reads
            let damage = placement
                .words
                .iter()
                .map(|word| word.tiles.len() as i16)
                .max()
                .unwrap_or(0);
            let victim = &mut self.players[other(mover) as usize];
            victim.hp = victim.hp.map(|hp| hp - damage);
        }
        let mut recorded = mv.clone();
        recorded.score = applied.score;
        recorded.player = mover;
        self.history.push(recorded);
        self.turn_number += 1;
        self.next_turn();
        let end = self.check_end(lexicon);
        if let GameEnd::Ended { .. } = end {
            self.status = Status::Finished;
        }
        Ok(end)
    }

    // Lets the bot take the current half-turn. A generator that comes back
    // empty is not an error: the opponent is credited and the game ends.
    pub fn play_ai_turn(
        &mut self,
        lexicon: &dyn lexicon::Lexicon,
        rng: &mut dyn RngCore,
    ) -> error::Returns<GameEnd> {
        if self.status != Status::Playing {
            return Err(validate::MoveError::GameOver.into());
        }
        let difficulty = match self.current_player().controller {
            Controller::Bot(difficulty) => difficulty,
            Controller::Human => {
                return_error!("current player is not a bot".to_string());
            }
        };
        let mover = self.turn;
        let mv = ai::calculate_ai_move(
            &self.board,
            &self.players[mover as usize].rack,
            &self.players[other(mover) as usize].rack,
            difficulty.config(),
            self.turn_number,
            self.config.allow_gaps(),
            lexicon,
            self.config.alphabet(),
            rng,
        );
        match mv {
            Some(mv) => self.play(lexicon, &mv),
            None => {
                self.status = Status::Finished;
                Ok(GameEnd::Ended {
                    winner: Some(other(mover)),
                    reason: EndReason::Stalemate,
                })
            }
        }
    }

    fn check_end(&self, lexicon: &dyn lexicon::Lexicon) -> GameEnd {
        match check_win_condition(self) {
            GameEnd::NotEnded => {}
            ended => return ended,
        }
        // the player to act next must have a move, else the opponent wins
        if !ai::has_any_legal_move(
            &self.board,
            &self.current_player().rack,
            lexicon,
            self.config.alphabet(),
            self.config.allow_gaps(),
        ) {
            return GameEnd::Ended {
                winner: Some(other(self.turn)),
                reason: EndReason::Stalemate,
            };
        }
        GameEnd::NotEnded
    }
}

// Terminal conditions in mode priority order: HP, threshold objectives, turn
// limit, letter depletion. Pure over the state; the stalemate probe lives in
// check_win_condition_with_moves because it needs the oracle.
pub fn check_win_condition(state: &GameState) -> GameEnd {
    let config = state.config;
    if config.boss_hp().is_some() {
        for (idx, player) in (0u8..).zip(state.players.iter()) {
            if let Some(hp) = player.hp {
                if hp <= 0 {
                    return GameEnd::Ended {
                        winner: Some(other(idx)),
                        reason: EndReason::HpDepleted,
                    };
                }
            }
        }
    }
    if let Some(target) = config.target_score() {
        for (idx, player) in (0u8..).zip(state.players.iter()) {
            if player.score >= target {
                return GameEnd::Ended {
                    winner: Some(idx),
                    reason: EndReason::TargetScore,
                };
            }
        }
    }
    if let Some(target) = config.target_words() {
        for (idx, player) in (0u8..).zip(state.players.iter()) {
            if player.words >= target {
                return GameEnd::Ended {
                    winner: Some(idx),
                    reason: EndReason::TargetWords,
                };
            }
        }
    }
    if let Some(limit) = config.turn_limit() {
        if state.turn_number >= limit {
            let winner = match config.pass_bar() {
                Some(bar) => Some(if state.players[0].score >= bar { 0 } else { 1 }),
                None => {
                    use std::cmp::Ordering;
                    match state.players[0].score.cmp(&state.players[1].score) {
                        Ordering::Greater => Some(0),
                        Ordering::Less => Some(1),
                        Ordering::Equal => None,
                    }
                }
            };
            return GameEnd::Ended {
                winner,
                reason: EndReason::TurnLimit,
            };
        }
    }
    for (idx, player) in (0u8..).zip(state.players.iter()) {
        if player.rack.is_empty() && state.status != Status::Waiting {
            return GameEnd::Ended {
                winner: Some(idx),
                reason: EndReason::TilesDepleted,
            };
        }
    }
    GameEnd::NotEnded
}

// The full check including the stalemate probe for the player to act.
pub fn check_win_condition_with_moves(
    state: &GameState,
    lexicon: &dyn lexicon::Lexicon,
) -> GameEnd {
    match check_win_condition(state) {
        GameEnd::NotEnded => {}
        ended => return ended,
    }
    if state.status == Status::Playing
        && !ai::has_any_legal_move(
            &state.board,
            &state.current_player().rack,
            lexicon,
            state.config.alphabet(),
            state.config.allow_gaps(),
        )
    {
        return GameEnd::Ended {
            winner: Some(other(state.turn)),
            reason: EndReason::Stalemate,
        };
    }
    GameEnd::NotEnded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::make_english_alphabet;
    use crate::lexicon::SetLexicon;
    use crate::matrix::{Dim, Pos};
    use crate::play::Direction;
    use rand::SeedableRng;

    fn tiles(alphabet: &crate::alphabet::Alphabet, word: &str) -> Vec<u8> {
        word.chars()
            .map(|ch| alphabet.rack_index_of(&ch.to_string()).unwrap())
            .collect()
    }

    fn across_move(
        alphabet: &crate::alphabet::Alphabet,
        row: i8,
        col: i8,
        word: &str,
    ) -> play::Move {
        play::Move {
            direction: Direction::Horizontal,
            positions: (0..word.len() as i8)
                .map(|i| Pos::new(row, col + i))
                .collect(),
            word: tiles(alphabet, word),
            score: 0,
            player: 0,
        }
    }

    fn custom_level<'a>(
        mutate: impl FnOnce(&mut level::StaticLevelConfig<'a>),
    ) -> level::LevelConfig<'a> {
        let mut config = level::StaticLevelConfig {
            alphabet: make_english_alphabet(),
            dim: Dim { rows: 8, cols: 8 },
            rack_size: 10,
            turn_limit: None,
            target_score: None,
            target_words: None,
            boss_hp: None,
            pass_bar: None,
            allow_gaps: false,
            prefills: Vec::new(),
            ai_difficulty: ai::Difficulty::Easy,
        };
        mutate(&mut config);
        level::LevelConfig::Static(config)
    }

    // deal a known rack to both players so moves are scriptable
    fn rigged_state<'a>(
        config: &'a level::LevelConfig<'a>,
        rack0: &str,
        rack1: &str,
    ) -> GameState<'a> {
        let alphabet = make_english_alphabet();
        let mut state = GameState::new(config).unwrap();
        state.status = Status::Playing;
        state.players[0].rack = tiles(&alphabet, rack0);
        state.players[1].rack = tiles(&alphabet, rack1);
        state
    }

    #[test]
    fn start_deals_full_racks() {
        let config = level::make_standard_level();
        let mut state = GameState::new(&config).unwrap();
        assert_eq!(state.status, Status::Waiting);
        let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(11);
        state.start(&mut rng);
        assert_eq!(state.status, Status::Playing);
        for player in state.players.iter() {
            assert_eq!(player.rack.len(), 10);
        }
        assert_eq!(state.bag.len(), 100 - 20);
    }

    #[test]
    fn scripted_exchange_of_turns() {
        let alphabet = make_english_alphabet();
        let lexicon = SetLexicon::from_words(["cat", "as", "at"]);
        let config = custom_level(|_| {});
        let mut state = rigged_state(&config, "CATRRRR", "SQQQQQQ");
        state.bag = bag::Bag(Vec::new());
        let end = state.play(&lexicon, &across_move(&alphabet, 4, 3, "CAT")).unwrap();
        assert_eq!(end, GameEnd::NotEnded);
        assert_eq!(state.players[0].score, 5);
        assert_eq!(state.players[0].words, 1);
        assert_eq!(state.players[0].rack.len(), 4);
        assert_eq!(state.turn, 1);
        assert_eq!(state.turn_number, 1);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].player, 0);
        assert_eq!(state.history[0].score, 5);
        // player 2 hangs AS off the A
        let mv = play::Move {
            direction: Direction::Vertical,
            positions: vec![Pos::new(5, 4)],
            word: tiles(&alphabet, "S"),
            score: 0,
            player: 0,
        };
        state.play(&lexicon, &mv).unwrap();
        assert_eq!(state.players[1].score, 2);
        assert_eq!(state.turn, 0);
    }

    #[test]
    fn rejected_move_leaves_state_untouched() {
        let alphabet = make_english_alphabet();
        let lexicon = SetLexicon::from_words(["cat"]);
        let config = custom_level(|_| {});
        let mut state = rigged_state(&config, "CATRRRR", "SQQQQQQ");
        let before_rack = state.players[0].rack.clone();
        let before_occupied = state.board.occupied_count();
        // DOG is not in the lexicon and the rack has no D anyway
        let verdict = state.play(&lexicon, &across_move(&alphabet, 4, 3, "DOG"));
        assert!(verdict.is_err());
        assert_eq!(state.players[0].rack, before_rack);
        assert_eq!(state.board.occupied_count(), before_occupied);
        assert_eq!(state.turn, 0);
        assert_eq!(state.turn_number, 0);
        assert!(state.history.is_empty());
    }

    #[test]
    fn finished_game_is_a_dead_end() {
        let alphabet = make_english_alphabet();
        let lexicon = SetLexicon::from_words(["cat"]);
        let config = custom_level(|_| {});
        let mut state = rigged_state(&config, "CATRRRR", "SQQQQQQ");
        state.status = Status::Finished;
        let verdict = state.play(&lexicon, &across_move(&alphabet, 4, 3, "CAT"));
        assert!(verdict.is_err());
    }

    #[test]
    fn target_score_ends_the_game() {
        let alphabet = make_english_alphabet();
        let lexicon = SetLexicon::from_words(["cat"]);
        let config = custom_level(|c| c.target_score = Some(5));
        let mut state = rigged_state(&config, "CATRRRR", "SQQQQQQ");
        let end = state.play(&lexicon, &across_move(&alphabet, 4, 3, "CAT")).unwrap();
        assert_eq!(
            end,
            GameEnd::Ended {
                winner: Some(0),
                reason: EndReason::TargetScore,
            }
        );
        assert_eq!(state.status, Status::Finished);
    }

    #[test]
    fn word_count_objective_counts_cross_words() {
        let alphabet = make_english_alphabet();
        let lexicon = SetLexicon::from_words(["go", "no", "on", "gon"]);
        let config = custom_level(|c| c.target_words = Some(2));
        let mut state = rigged_state(&config, "GOQQQQQ", "NOQQQQQ");
        state.bag = bag::Bag(Vec::new());
        // GO down through the center
        let mv = play::Move {
            direction: Direction::Vertical,
            positions: vec![Pos::new(3, 4), Pos::new(4, 4)],
            word: tiles(&alphabet, "GO"),
            score: 0,
            player: 0,
        };
        state.play(&lexicon, &mv).unwrap();
        assert_eq!(state.players[0].words, 1);
        // NO hooked under the O reads NO across and GON down, two words
        let mv = play::Move {
            direction: Direction::Horizontal,
            positions: vec![Pos::new(5, 4), Pos::new(5, 5)],
            word: tiles(&alphabet, "NO"),
            score: 0,
            player: 0,
        };
        let end = state.play(&lexicon, &mv).unwrap();
        assert_eq!(state.players[1].words, 2);
        assert_eq!(
            end,
            GameEnd::Ended {
                winner: Some(1),
                reason: EndReason::TargetWords,
            }
        );
    }

    #[test]
    fn boss_mode_deals_word_length_damage() {
        let alphabet = make_english_alphabet();
        let lexicon = SetLexicon::from_words(["cat", "as", "at"]);
        let config = custom_level(|c| c.boss_hp = Some(4));
        let mut state = rigged_state(&config, "CATRAT", "SQQQQQQ");
        let end = state.play(&lexicon, &across_move(&alphabet, 4, 3, "CAT")).unwrap();
        // CAT is three letters of damage
        assert_eq!(state.players[1].hp, Some(1));
        assert_eq!(end, GameEnd::NotEnded);
        // the S reads AS, two letters back
        let mv = play::Move {
            direction: Direction::Vertical,
            positions: vec![Pos::new(5, 4)],
            word: tiles(&alphabet, "S"),
            score: 0,
            player: 0,
        };
        let end = state.play(&lexicon, &mv).unwrap();
        assert_eq!(state.players[0].hp, Some(2));
        assert_eq!(end, GameEnd::NotEnded);
    }

    #[test]
    fn hp_zero_ends_with_opponent_winning() {
        let config = custom_level(|c| c.boss_hp = Some(10));
        let state = {
            let mut state = rigged_state(&config, "CATRRRR", "SQQQQQQ");
            state.players[1].hp = Some(0);
            state
        };
        assert_eq!(
            check_win_condition(&state),
            GameEnd::Ended {
                winner: Some(0),
                reason: EndReason::HpDepleted,
            }
        );
    }

    #[test]
    fn turn_limit_uses_the_pass_bar() {
        let config = custom_level(|c| {
            c.turn_limit = Some(2);
            c.pass_bar = Some(5);
        });
        let mut state = rigged_state(&config, "CATRRRR", "SQQQQQQ");
        state.turn_number = 2;
        state.players[0].score = 5;
        assert_eq!(
            check_win_condition(&state),
            GameEnd::Ended {
                winner: Some(0),
                reason: EndReason::TurnLimit,
            }
        );
        state.players[0].score = 4;
        assert_eq!(
            check_win_condition(&state),
            GameEnd::Ended {
                winner: Some(1),
                reason: EndReason::TurnLimit,
            }
        );
    }

    #[test]
    fn turn_limit_without_bar_compares_scores() {
        let config = custom_level(|c| c.turn_limit = Some(2));
        let mut state = rigged_state(&config, "CATRRRR", "SQQQQQQ");
        state.turn_number = 2;
        state.players[0].score = 7;
        state.players[1].score = 9;
        assert_eq!(
            check_win_condition(&state),
            GameEnd::Ended {
                winner: Some(1),
                reason: EndReason::TurnLimit,
            }
        );
        state.players[0].score = 9;
        assert_eq!(
            check_win_condition(&state),
            GameEnd::Ended {
                winner: None,
                reason: EndReason::TurnLimit,
            }
        );
    }

    #[test]
    fn playing_out_the_rack_wins() {
        let alphabet = make_english_alphabet();
        let lexicon = SetLexicon::from_words(["cat"]);
        let config = custom_level(|_| {});
        let mut state = rigged_state(&config, "CAT", "QQQQQQQ");
        state.bag = bag::Bag(Vec::new());
        let end = state.play(&lexicon, &across_move(&alphabet, 4, 3, "CAT")).unwrap();
        assert_eq!(
            end,
            GameEnd::Ended {
                winner: Some(0),
                reason: EndReason::TilesDepleted,
            }
        );
        assert_eq!(state.status, Status::Finished);
    }

    #[test]
    fn stalemate_credits_the_opponent() {
        let alphabet = make_english_alphabet();
        // nothing player 2 holds can ever land: Qs only, no usable word
        let lexicon = SetLexicon::from_words(["cat"]);
        let config = custom_level(|_| {});
        let mut state = rigged_state(&config, "CATRRRR", "QQQQQQQ");
        state.bag = bag::Bag(Vec::new());
        let end = state.play(&lexicon, &across_move(&alphabet, 4, 3, "CAT")).unwrap();
        assert_eq!(
            end,
            GameEnd::Ended {
                winner: Some(0),
                reason: EndReason::Stalemate,
            }
        );
        assert_eq!(state.status, Status::Finished);
    }

    #[test]
    fn ai_with_no_move_forfeits() {
        let lexicon = SetLexicon::from_words(["cat"]);
        let config = custom_level(|_| {});
        let mut state = rigged_state(&config, "CATRRRR", "QQQQQQQ");
        state.turn = 1;
        let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(5);
        let end = state.play_ai_turn(&lexicon, &mut rng).unwrap();
        assert_eq!(
            end,
            GameEnd::Ended {
                winner: Some(0),
                reason: EndReason::Stalemate,
            }
        );
    }

    #[test]
    fn ai_turn_plays_a_legal_move() {
        let lexicon = SetLexicon::from_words(["cat", "at", "ta", "tat", "rat"]);
        let config = custom_level(|_| {});
        let mut state = rigged_state(&config, "QQQQQQQ", "CATRRRA");
        state.bag = bag::Bag(Vec::new());
        state.turn = 1;
        let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(6);
        let before = state.players[1].rack.len();
        let _ = state.play_ai_turn(&lexicon, &mut rng).unwrap();
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].player, 1);
        assert!(state.players[1].rack.len() < before);
        assert!(state.players[1].score > 0);
    }
}
