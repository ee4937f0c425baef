// Copyright (C) 2020-2024 Andy Kurnia.

use super::{alphabet, board, board::BoardView, matrix};

#[inline(always)]
pub fn cell_label<'a>(
    alphabet: &'a alphabet::Alphabet<'a>,
    board: &board::Board,
    pos: matrix::Pos,
) -> &'a str {
    alphabet.from_board(board.tile_at(pos)).unwrap_or_else(|| {
        if pos == board.center() { "*" } else { "." }
    })
}

pub fn print_board<'a>(alphabet: &'a alphabet::Alphabet<'a>, board: &board::Board) {
    let dim = board.dim();
    print!("  ");
    for c in 0..dim.cols {
        print!(" {}", ((c as u8) + 0x61) as char);
    }
    println!();
    print!("  +");
    for _ in 1..dim.cols {
        print!("--");
    }
    println!("-+");
    for r in 0..dim.rows {
        print!("{:2}|", r + 1);
        for c in 0..dim.cols {
            if c > 0 {
                print!(" ")
            }
            print!("{}", cell_label(alphabet, board, matrix::Pos::new(r, c)));
        }
        println!("|{}", r + 1);
    }
    print!("  +");
    for _ in 1..dim.cols {
        print!("--");
    }
    println!("-+");
    print!("  ");
    for c in 0..dim.cols {
        print!(" {}", ((c as u8) + 0x61) as char);
    }
    println!();
}
