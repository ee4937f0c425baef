// Copyright (C) 2020-2023 Andy Kurnia.

use super::{ai, alphabet, matrix};

// A level is pure data: board shape, rack size, the win-condition knobs the
// mode uses, and the AI tier. The engine never branches on a level id.
pub struct StaticLevelConfig<'a> {
    pub alphabet: alphabet::Alphabet<'a>,
    pub dim: matrix::Dim,
    pub rack_size: u8,
    pub turn_limit: Option<u16>,
    pub target_score: Option<i16>,
    pub target_words: Option<u16>,
    pub boss_hp: Option<i16>,
    pub pass_bar: Option<i16>,
    pub allow_gaps: bool,
    pub prefills: Vec<(matrix::Pos, u8)>,
    pub ai_difficulty: ai::Difficulty,
}

pub enum LevelConfig<'a> {
    Static(StaticLevelConfig<'a>),
}

impl<'a> LevelConfig<'a> {
    #[inline(always)]
    pub fn alphabet(&self) -> &alphabet::Alphabet<'a> {
        match self {
            LevelConfig::Static(x) => &x.alphabet,
        }
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        match self {
            LevelConfig::Static(x) => x.dim,
        }
    }

    #[inline(always)]
    pub fn rack_size(&self) -> u8 {
        match self {
            LevelConfig::Static(x) => x.rack_size,
        }
    }

    #[inline(always)]
    pub fn turn_limit(&self) -> Option<u16> {
        match self {
            LevelConfig::Static(x) => x.turn_limit,
        }
    }

    #[inline(always)]
    pub fn target_score(&self) -> Option<i16> {
        match self {
            LevelConfig::Static(x) => x.target_score,
        }
    }

    #[inline(always)]
    pub fn target_words(&self) -> Option<u16> {
        match self {
            LevelConfig::Static(x) => x.target_words,
        }
    }

    #[inline(always)]
    pub fn boss_hp(&self) -> Option<i16> {
        match self {
            LevelConfig::Static(x) => x.boss_hp,
        }
    }

    #[inline(always)]
    pub fn pass_bar(&self) -> Option<i16> {
        match self {
            LevelConfig::Static(x) => x.pass_bar,
        }
    }

    #[inline(always)]
    pub fn allow_gaps(&self) -> bool {
        match self {
            LevelConfig::Static(x) => x.allow_gaps,
        }
    }

    #[inline(always)]
    pub fn prefills(&self) -> &[(matrix::Pos, u8)] {
        match self {
            LevelConfig::Static(x) => &x.prefills,
        }
    }

    #[inline(always)]
    pub fn ai_difficulty(&self) -> ai::Difficulty {
        match self {
            LevelConfig::Static(x) => x.ai_difficulty,
        }
    }
}

pub fn make_standard_level<'a>() -> LevelConfig<'a> {
    LevelConfig::Static(StaticLevelConfig {
        alphabet: alphabet::make_english_alphabet(),
        dim: matrix::Dim { rows: 8, cols: 8 },
        rack_size: 10,
        turn_limit: None,
        target_score: None,
        target_words: None,
        boss_hp: None,
        pass_bar: None,
        allow_gaps: false,
        prefills: Vec::new(),
        ai_difficulty: ai::Difficulty::Medium,
    })
}

#[allow(dead_code)]
pub fn make_timed_level<'a>() -> LevelConfig<'a> {
    LevelConfig::Static(StaticLevelConfig {
        alphabet: alphabet::make_english_alphabet(),
        dim: matrix::Dim { rows: 8, cols: 8 },
        rack_size: 10,
        turn_limit: Some(20),
        target_score: None,
        target_words: None,
        boss_hp: None,
        pass_bar: Some(60),
        allow_gaps: false,
        prefills: Vec::new(),
        ai_difficulty: ai::Difficulty::Medium,
    })
}

#[allow(dead_code)]
pub fn make_sprint_level<'a>() -> LevelConfig<'a> {
    LevelConfig::Static(StaticLevelConfig {
        alphabet: alphabet::make_english_alphabet(),
        dim: matrix::Dim { rows: 8, cols: 8 },
        rack_size: 10,
        turn_limit: None,
        target_score: Some(100),
        target_words: None,
        boss_hp: None,
        pass_bar: None,
        allow_gaps: false,
        prefills: Vec::new(),
        ai_difficulty: ai::Difficulty::Hard,
    })
}

#[allow(dead_code)]
pub fn make_wordsmith_level<'a>() -> LevelConfig<'a> {
    LevelConfig::Static(StaticLevelConfig {
        alphabet: alphabet::make_english_alphabet(),
        dim: matrix::Dim { rows: 8, cols: 8 },
        rack_size: 10,
        turn_limit: None,
        target_score: None,
        target_words: Some(12),
        boss_hp: None,
        pass_bar: None,
        allow_gaps: false,
        prefills: Vec::new(),
        ai_difficulty: ai::Difficulty::Medium,
    })
}

#[allow(dead_code)]
pub fn make_boss_level<'a>() -> LevelConfig<'a> {
    LevelConfig::Static(StaticLevelConfig {
        alphabet: alphabet::make_english_alphabet(),
        dim: matrix::Dim { rows: 8, cols: 8 },
        rack_size: 10,
        turn_limit: None,
        target_score: None,
        target_words: None,
        boss_hp: Some(50),
        pass_bar: None,
        allow_gaps: false,
        prefills: Vec::new(),
        ai_difficulty: ai::Difficulty::Nightmare,
    })
}

#[allow(dead_code)]
pub fn make_gapped_level<'a>() -> LevelConfig<'a> {
    LevelConfig::Static(StaticLevelConfig {
        alphabet: alphabet::make_english_alphabet(),
        dim: matrix::Dim { rows: 8, cols: 8 },
        rack_size: 10,
        turn_limit: Some(24),
        target_score: None,
        target_words: None,
        boss_hp: None,
        pass_bar: Some(80),
        allow_gaps: true,
        prefills: Vec::new(),
        ai_difficulty: ai::Difficulty::Hard,
    })
}
