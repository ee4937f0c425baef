// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, error, lexicon, play, validate};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

// A dictionary that may live behind I/O. Lookups can be slow and can fail;
// neither may stall a turn, so every call goes through a timeout and an
// uncertain answer counts as "not a word".
pub trait AsyncLexicon {
    fn is_word<'a>(
        &'a self,
        word: &'a str,
    ) -> Pin<Box<dyn Future<Output = error::Returns<bool>> + Send + 'a>>;
}

// Adapts any synchronous lexicon to the async surface.
pub struct LocalOracle<L: lexicon::Lexicon>(pub L);

impl<L: lexicon::Lexicon + Sync> AsyncLexicon for LocalOracle<L> {
    fn is_word<'a>(
        &'a self,
        word: &'a str,
    ) -> Pin<Box<dyn Future<Output = error::Returns<bool>> + Send + 'a>> {
        let answer = self.0.is_word(word);
        Box::pin(async move { Ok(answer) })
    }
}

// false on timeout, false on oracle error, never a hang.
pub async fn check_word(oracle: &dyn AsyncLexicon, word: &str, time_limit: Duration) -> bool {
    match tokio::time::timeout(time_limit, oracle.is_word(word)).await {
        Ok(Ok(answer)) => answer,
        Ok(Err(_)) => false,
        Err(_) => false,
    }
}

// The async front of the validation pipeline: the board checks run
// synchronously, then each formed word is awaited against the oracle. The
// oracle is the pipeline's only suspension point.
pub async fn validate_move_timed(
    board: &board::Board,
    mv: &play::Move,
    rack: &[u8],
    oracle: &dyn AsyncLexicon,
    allow_gaps: bool,
    alphabet: &alphabet::Alphabet<'_>,
    time_limit: Duration,
) -> Result<validate::Placement, validate::MoveError> {
    let placement = validate::validate_placement(board, mv, rack, allow_gaps, alphabet)?;
    for word in &placement.words {
        let text = word.text(alphabet);
        if !check_word(oracle, &text, time_limit).await {
            return Err(validate::MoveError::NotAWord { word: text });
        }
    }
    Ok(placement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::make_english_alphabet;
    use crate::board::Board;
    use crate::lexicon::SetLexicon;
    use crate::matrix::{Dim, Pos};
    use crate::play::Direction;

    struct SlowOracle;

    impl AsyncLexicon for SlowOracle {
        fn is_word<'a>(
            &'a self,
            _word: &'a str,
        ) -> Pin<Box<dyn Future<Output = error::Returns<bool>> + Send + 'a>> {
            Box::pin(async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Ok(true)
            })
        }
    }

    struct FailingOracle;

    impl AsyncLexicon for FailingOracle {
        fn is_word<'a>(
            &'a self,
            _word: &'a str,
        ) -> Pin<Box<dyn Future<Output = error::Returns<bool>> + Send + 'a>> {
            Box::pin(async { Err(error::new("dictionary service down".to_string()).into()) })
        }
    }

    fn center_move(alphabet: &alphabet::Alphabet, word: &str) -> play::Move {
        play::Move {
            direction: Direction::Horizontal,
            positions: (0..word.len() as i8).map(|i| Pos::new(4, 3 + i)).collect(),
            word: word
                .chars()
                .map(|ch| alphabet.rack_index_of(&ch.to_string()).unwrap())
                .collect(),
            score: 0,
            player: 0,
        }
    }

    #[tokio::test]
    async fn timeout_rejects_conservatively() {
        let alphabet = make_english_alphabet();
        let board = Board::new(Dim { rows: 8, cols: 8 });
        let mv = center_move(&alphabet, "TO");
        let rack = mv.word.clone();
        let verdict = validate_move_timed(
            &board,
            &mv,
            &rack,
            &SlowOracle,
            false,
            &alphabet,
            Duration::from_millis(50),
        )
        .await;
        assert_eq!(
            verdict,
            Err(validate::MoveError::NotAWord {
                word: "TO".to_string()
            })
        );
    }

    #[tokio::test]
    async fn oracle_errors_reject_rather_than_approve() {
        let alphabet = make_english_alphabet();
        let board = Board::new(Dim { rows: 8, cols: 8 });
        let mv = center_move(&alphabet, "TO");
        let rack = mv.word.clone();
        let verdict = validate_move_timed(
            &board,
            &mv,
            &rack,
            &FailingOracle,
            false,
            &alphabet,
            Duration::from_millis(200),
        )
        .await;
        assert!(matches!(
            verdict,
            Err(validate::MoveError::NotAWord { .. })
        ));
    }

    #[tokio::test]
    async fn local_oracle_matches_sync_answer() {
        let alphabet = make_english_alphabet();
        let board = Board::new(Dim { rows: 8, cols: 8 });
        let oracle = LocalOracle(SetLexicon::from_words(["to"]));
        let mv = center_move(&alphabet, "TO");
        let rack = mv.word.clone();
        let placement = validate_move_timed(
            &board,
            &mv,
            &rack,
            &oracle,
            false,
            &alphabet,
            Duration::from_millis(200),
        )
        .await
        .unwrap();
        assert_eq!(placement.score, 2);
    }
}
