// Copyright (C) 2020-2024 Andy Kurnia.

pub struct Letter<'a> {
    label: &'a str,
    wildcard_label: &'a str,
    freq: u8,
    score: i8,
}

pub struct StaticAlphabet<'a> {
    letters: &'a [Letter<'a>],
    num_tiles: u16,
}

pub enum Alphabet<'a> {
    Static(StaticAlphabet<'a>),
}

impl<'a> Alphabet<'a> {
    #[inline(always)]
    pub fn len(&self) -> u8 {
        match self {
            Alphabet::Static(x) => x.letters.len() as u8,
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub fn get(&self, idx: u8) -> &'a Letter<'a> {
        match self {
            Alphabet::Static(x) => &x.letters[idx as usize],
        }
    }

    #[inline(always)]
    pub fn num_tiles(&self) -> u16 {
        match self {
            Alphabet::Static(x) => x.num_tiles,
        }
    }

    // board/move representation: 0 is empty, 0x80 flags a wildcard standing in.
    #[inline(always)]
    pub fn from_board(&self, idx: u8) -> Option<&'a str> {
        let c = idx & 0x7f;
        if c == 0 || c >= self.len() {
            None
        } else if idx & 0x80 == 0 {
            Some(self.get(c).label)
        } else {
            Some(self.get(c).wildcard_label)
        }
    }

    #[inline(always)]
    pub fn from_rack(&self, idx: u8) -> Option<&'a str> {
        if idx >= self.len() {
            None
        } else {
            Some(self.get(idx).label)
        }
    }

    // a wildcard scores its own value no matter which letter it stands for.
    #[inline(always)]
    pub fn score(&self, idx: u8) -> i8 {
        self.get(idx & !((idx as i8) >> 7) as u8).score
    }

    #[inline(always)]
    pub fn freq(&self, idx: u8) -> u8 {
        self.get(idx).freq
    }

    pub fn max_score(&self) -> i8 {
        (0..self.len()).map(|idx| self.get(idx).score).max().unwrap_or(0)
    }

    // parse one rack glyph: uppercase letter or the wildcard label.
    pub fn rack_index_of(&self, label: &str) -> Option<u8> {
        (0..self.len()).find(|&idx| self.get(idx).label == label)
    }

    // parse one board/move glyph: lowercase means a wildcard standing in.
    pub fn board_tile_of(&self, label: &str) -> Option<u8> {
        for idx in 1..self.len() {
            let letter = self.get(idx);
            if letter.label == label {
                return Some(idx);
            }
            if letter.wildcard_label == label {
                return Some(idx | 0x80);
            }
        }
        None
    }

    pub fn fmt_rack(&self, rack: &[u8]) -> String {
        rack.iter()
            .filter_map(|&tile| self.from_rack(tile))
            .collect::<String>()
    }

    // face text of a formed word, uppercase regardless of wildcards.
    pub fn word_text(&self, tiles: &[u8]) -> String {
        tiles
            .iter()
            .filter_map(|&tile| self.from_rack(tile & 0x7f))
            .collect::<String>()
    }
}

macro_rules! letter {
    ($label:expr, $wildcard_label:expr, $freq:expr, $score:expr) => {
        Letter {
            label: $label,
            wildcard_label: $wildcard_label,
            freq: $freq,
            score: $score,
        }
    };
}

pub fn make_english_alphabet<'a>() -> Alphabet<'a> {
    Alphabet::Static(StaticAlphabet {
        letters: &[
            letter!("?", "?", 2, 0),
            letter!("A", "a", 9, 1),
            letter!("B", "b", 2, 3),
            letter!("C", "c", 2, 3),
            letter!("D", "d", 4, 2),
            letter!("E", "e", 12, 1),
            letter!("F", "f", 2, 4),
            letter!("G", "g", 3, 2),
            letter!("H", "h", 2, 4),
            letter!("I", "i", 9, 1),
            letter!("J", "j", 1, 8),
            letter!("K", "k", 1, 5),
            letter!("L", "l", 4, 1),
            letter!("M", "m", 2, 3),
            letter!("N", "n", 6, 1),
            letter!("O", "o", 8, 1),
            letter!("P", "p", 2, 3),
            letter!("Q", "q", 1, 10),
            letter!("R", "r", 6, 1),
            letter!("S", "s", 4, 1),
            letter!("T", "t", 6, 1),
            letter!("U", "u", 4, 1),
            letter!("V", "v", 2, 4),
            letter!("W", "w", 2, 4),
            letter!("X", "x", 1, 8),
            letter!("Y", "y", 2, 4),
            letter!("Z", "z", 1, 10),
        ],
        num_tiles: 100,
    })
}
