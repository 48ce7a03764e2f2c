use super::*;
use move_predictor::PredictError;
use std::sync::{Arc, Mutex};

type Calls = Arc<Mutex<Vec<(String, u32, bool)>>>;

/// Predictor that replays scripted answers and records every call.
struct Scripted {
    answers: Vec<Result<String, PredictError>>,
    calls: Calls,
}

impl Scripted {
    fn new(answers: Vec<Result<String, PredictError>>) -> (Self, Calls) {
        let calls = Calls::default();
        (
            Self {
                answers,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

impl MovePredictor for Scripted {
    fn predict(
        &mut self,
        fen: &str,
        move_number: u32,
        stochastic: bool,
    ) -> Result<String, PredictError> {
        self.calls
            .lock()
            .unwrap()
            .push((fen.to_string(), move_number, stochastic));
        self.answers.remove(0)
    }
}

#[test]
fn test_counter_increments_once_per_call() {
    let (p, calls) = Scripted::new(vec![Ok("e2e4".into()), Ok("d2d4".into()), Ok("c2c4".into())]);
    let mut engine = PredictorEngine::new(p);
    assert_eq!(engine.move_counter(), 1);

    let board = Board::default();
    for expected in 2..=4 {
        engine.search(&board).unwrap();
        assert_eq!(engine.move_counter(), expected);
    }

    let numbers: Vec<u32> = calls.lock().unwrap().iter().map(|c| c.1).collect();
    assert_eq!(numbers, vec![2, 3, 4]);
}

#[test]
fn test_predictor_sees_fen_and_counter() {
    let (p, calls) = Scripted::new(vec![Ok("e7e5".into())]);
    let settings = EngineSettings {
        name: "test".into(),
        initial_move_counter: 10,
        stochastic: false,
    };
    let mut engine = PredictorEngine::with_settings(p, &settings);

    let board: Board = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        .parse()
        .unwrap();
    engine.search(&board).unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, board.to_string());
    assert_eq!(calls[0].1, 11);
    assert!(!calls[0].2);
}

#[test]
fn test_move_wrapped_unchanged() {
    // Even text that is not a legal move passes through; the host validates.
    let (p, _) = Scripted::new(vec![Ok("E2E4 ".into())]);
    let mut engine = PredictorEngine::new(p);

    let result = engine.search(&Board::default()).unwrap();
    assert_eq!(result, PlayResult::new("E2E4 ", None));
    assert!(result.score.is_none());
}

#[test]
fn test_stochastic_flag_forwarded() {
    let (p, calls) = Scripted::new(vec![Ok("e2e4".into()), Ok("e2e4".into())]);
    let mut engine = PredictorEngine::new(p);
    assert!(engine.stochastic());

    engine.search(&Board::default()).unwrap();
    engine.set_stochastic(false);
    engine.search(&Board::default()).unwrap();

    let flags: Vec<bool> = calls.lock().unwrap().iter().map(|c| c.2).collect();
    assert_eq!(flags, vec![true, false]);
}

#[test]
fn test_predictor_error_propagates() {
    let (p, _) = Scripted::new(vec![Err(PredictError::DegenerateOutput)]);
    let mut engine = PredictorEngine::new(p);

    let err = engine.search(&Board::default()).unwrap_err();
    assert!(matches!(err, EngineError::Predictor(_)));
    assert!(err.to_string().contains("no usable probability mass"));
    // The request still counted.
    assert_eq!(engine.move_counter(), 2);
}

#[test]
fn test_name_from_settings() {
    let (p, _) = Scripted::new(vec![]);
    let engine = PredictorEngine::new(p);
    assert_eq!(engine.name(), "DL1");
}
