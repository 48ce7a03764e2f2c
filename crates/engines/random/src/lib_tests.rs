use super::*;
use bot_core::validate_play;

#[test]
fn random_engine_returns_legal_move() {
    let mut engine = RandomEngine::new();
    let board = Board::default();

    let result = engine.search(&board).unwrap();

    assert!(validate_play(&board, &result).is_ok());
    assert!(result.score.is_none());
}

#[test]
fn random_engine_handles_checkmate() {
    let mut engine = RandomEngine::new();
    let board: Board = "r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1"
        .parse()
        .unwrap();

    let result = engine.search(&board);

    assert!(matches!(result, Err(EngineError::NoLegalMoves(_))));
}

#[test]
fn random_engine_handles_stalemate() {
    let mut engine = RandomEngine::new();
    let board: Board = "k7/8/1Q6/8/8/8/8/1K6 b - - 0 1".parse().unwrap();

    assert!(engine.search(&board).is_err());
}

#[test]
fn random_engine_castles_in_uci_form() {
    // Every reply, castling included, must parse back as a legal move.
    let board: Board = "4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1".parse().unwrap();
    let mut engine = RandomEngine::seeded(5);
    for _ in 0..50 {
        let reply = engine.search(&board).unwrap();
        assert!(validate_play(&board, &reply).is_ok(), "{}", reply.best_move);
    }
}

#[test]
fn seeded_engines_agree() {
    let board = Board::default();
    let mut a = RandomEngine::seeded(1);
    let mut b = RandomEngine::seeded(1);
    for _ in 0..10 {
        assert_eq!(a.search(&board).unwrap(), b.search(&board).unwrap());
    }
}
