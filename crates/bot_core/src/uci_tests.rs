use super::*;

#[test]
fn test_startpos_with_moves() {
    let board = set_position_from_uci(&["startpos", "moves", "e2e4", "e7e5"]).unwrap();
    let fen = board.to_string();
    assert!(fen.starts_with("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq"));
    assert_eq!(board.piece_on(Square::E4), Some(Piece::Pawn));
    assert_eq!(board.fullmove_number(), 2);
}

#[test]
fn test_empty_args_is_startpos() {
    let board = set_position_from_uci(&[]).unwrap();
    assert_eq!(board.to_string(), Board::default().to_string());
}

#[test]
fn test_fen_position() {
    let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
    let mut args = vec!["fen"];
    args.extend(fen.split_whitespace());
    let board = set_position_from_uci(&args).unwrap();
    assert_eq!(board.to_string(), fen);
}

#[test]
fn test_bad_fen_rejected() {
    let err = set_position_from_uci(&["fen", "not", "a", "fen"]).unwrap_err();
    assert!(matches!(err, UciError::InvalidFen(_)));
}

#[test]
fn test_fen_without_counters() {
    let board = set_position_from_uci(&[
        "fen",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
        "w",
        "KQkq",
        "-",
    ])
    .unwrap();
    assert_eq!(board.to_string(), Board::default().to_string());

    let board =
        set_position_from_uci(&["fen", "4k3/8/8/8/8/8/8/4K2R", "b", "K", "-", "7"]).unwrap();
    assert_eq!(board.side_to_move(), cozy_chess::Color::Black);
    assert_eq!(board.halfmove_clock(), 7);
}

#[test]
fn test_long_halfmove_clock_is_capped() {
    let fen = "4k3/8/8/8/8/8/8/4K2R w - - 101 80";
    let mut args = vec!["fen"];
    args.extend(fen.split_whitespace());
    let board = set_position_from_uci(&args).unwrap();
    assert_eq!(board.halfmove_clock(), 100);
    assert_eq!(normalize_fen(&args[1..]), "4k3/8/8/8/8/8/8/4K2R w - - 100 80");
}

#[test]
fn test_unknown_setup_rejected() {
    let err = set_position_from_uci(&["somewhere"]).unwrap_err();
    assert!(matches!(err, UciError::InvalidPosition(_)));
}

#[test]
fn test_castling_uses_king_destination() {
    let board: Board = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
    let short = parse_uci_move(&board, "e1g1").unwrap();
    assert_eq!(move_to_uci(&board, short), "e1g1");
    let long = parse_uci_move(&board, "e1c1").unwrap();
    assert_eq!(move_to_uci(&board, long), "e1c1");
}

#[test]
fn test_king_takes_rook_form_accepted() {
    let board: Board = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
    let mv = parse_uci_move(&board, "e1h1").unwrap();
    assert_eq!(move_to_uci(&board, mv), "e1g1");
}

#[test]
fn test_promotion_round_trip() {
    let board: Board = "8/P6k/8/8/8/8/8/K7 w - - 0 1".parse().unwrap();
    let mv = parse_uci_move(&board, "a7a8N").unwrap();
    assert_eq!(mv.promotion, Some(Piece::Knight));
    assert_eq!(move_to_uci(&board, mv), "a7a8n");
}

#[test]
fn test_malformed_and_illegal_moves() {
    let board = Board::default();
    assert!(matches!(
        parse_uci_move(&board, "e2"),
        Err(UciError::MalformedMove(_))
    ));
    assert!(matches!(
        parse_uci_move(&board, "z9e4"),
        Err(UciError::MalformedMove(_))
    ));
    assert!(matches!(
        parse_uci_move(&board, "e2e5"),
        Err(UciError::IllegalMove { .. })
    ));
}

#[test]
fn test_validate_play() {
    let board = Board::default();
    let ok = PlayResult::new("g1f3", None);
    assert!(validate_play(&board, &ok).is_ok());
    let bad = PlayResult::new("g1g3", None);
    assert!(validate_play(&board, &bad).is_err());
}

#[test]
fn test_legal_moves_startpos() {
    assert_eq!(legal_moves(&Board::default()).len(), 20);
}
