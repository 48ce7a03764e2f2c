use cozy_chess::{Board, File, Move, Piece, Square};
use thiserror::Error;

use crate::{legal_moves, PlayResult};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UciError {
    #[error("malformed move text: {0:?}")]
    MalformedMove(String),
    #[error("illegal move {mv} in position {fen}")]
    IllegalMove { mv: String, fen: String },
    #[error("invalid FEN: {0:?}")]
    InvalidFen(String),
    #[error("invalid position command: {0:?}")]
    InvalidPosition(String),
}

fn promo_char(p: Piece) -> char {
    match p {
        Piece::Queen => 'q',
        Piece::Rook => 'r',
        Piece::Bishop => 'b',
        Piece::Knight => 'n',
        _ => 'q',
    }
}

/// Destination square as UCI writes it. cozy-chess encodes castling as
/// king-takes-own-rook; UCI wants the king's final square.
pub fn uci_destination(board: &Board, mv: Move) -> Square {
    let is_castle = board.piece_on(mv.from) == Some(Piece::King)
        && board.color_on(mv.to) == Some(board.side_to_move());
    if !is_castle {
        return mv.to;
    }
    let file = if mv.to.file() as usize > mv.from.file() as usize {
        File::G
    } else {
        File::C
    };
    Square::new(file, mv.from.rank())
}

pub fn move_to_uci(board: &Board, mv: Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&mv.from.to_string());
    s.push_str(&uci_destination(board, mv).to_string());
    if let Some(p) = mv.promotion {
        s.push(promo_char(p));
    }
    s
}

pub fn parse_uci_move(board: &Board, txt: &str) -> Result<Move, UciError> {
    let txt = txt.trim().to_ascii_lowercase();
    if !(4..=5).contains(&txt.len()) || !txt.is_ascii() {
        return Err(UciError::MalformedMove(txt));
    }
    if txt[0..2].parse::<Square>().is_err() || txt[2..4].parse::<Square>().is_err() {
        return Err(UciError::MalformedMove(txt));
    }

    // Match against legal moves so castling and promotions come out right.
    // The raw king-takes-rook form is accepted as well.
    legal_moves(board)
        .into_iter()
        .find(|&m| move_to_uci(board, m) == txt || m.to_string() == txt)
        .ok_or_else(|| UciError::IllegalMove {
            mv: txt,
            fen: board.to_string(),
        })
}

/// Largest halfmove clock cozy-chess accepts.
const MAX_HALFMOVE_CLOCK: u32 = 100;

/// Fills in the move counters GUIs often leave out of a FEN and caps the
/// halfmove clock at 100, the largest value the board accepts.
pub fn normalize_fen(fields: &[&str]) -> String {
    let mut fields: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
    if fields.len() == 4 {
        fields.push("0".into());
    }
    if fields.len() == 5 {
        fields.push("1".into());
    }
    if let Some(clock) = fields.get_mut(4) {
        if clock.parse::<u32>().is_ok_and(|n| n > MAX_HALFMOVE_CLOCK) {
            *clock = MAX_HALFMOVE_CLOCK.to_string();
        }
    }
    fields.join(" ")
}

/// Builds the board described by the arguments of a UCI `position` command.
///
/// Supports `startpos`, `fen <fields>` and a trailing `moves ...` list. A FEN
/// may omit its halfmove and fullmove fields; see [`normalize_fen`].
pub fn set_position_from_uci(args: &[&str]) -> Result<Board, UciError> {
    let moves_at = args.iter().position(|&a| a == "moves").unwrap_or(args.len());
    let (setup, moves) = args.split_at(moves_at);

    let mut board = match setup.split_first() {
        None => Board::default(),
        Some((&"startpos", [])) => Board::default(),
        Some((&"fen", fields)) if !fields.is_empty() => {
            let fen = normalize_fen(fields);
            Board::from_fen(&fen, false).map_err(|_| UciError::InvalidFen(fen))?
        }
        _ => return Err(UciError::InvalidPosition(args.join(" "))),
    };

    for txt in moves.iter().skip(1) {
        let mv = parse_uci_move(&board, txt)?;
        board.play_unchecked(mv);
    }
    Ok(board)
}

/// The host's check of an engine reply before it goes out on the wire.
pub fn validate_play(board: &Board, result: &PlayResult) -> Result<Move, UciError> {
    parse_uci_move(board, &result.best_move)
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
