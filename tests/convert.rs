use algebraic::{convert_notation, Game, IllegalMove, PlayError};

const SAMPLE_GAME: &str = "e4 e5 Nc3 Nc6 f4 exf4 Nf3 Bb4 d4 Bxc3+ bxc3 d5 e5 f6 Bxf4 fxe5 \
    Bxe5 Nxe5 Nxe5 Qe7 Bd3 c5 O-O Nf6 Qf3 Bg4 Qf2 O-O Qg3 Ne4 Bxe4 dxe4 Qxg4 cxd4 cxd4 Rad8 \
    c3 b5 Qxe4 Qa3 Rf3 a5 Raf1 Qxa2 Rxf8+ Rxf8 Rxf8+ Kxf8 Qa8+ Ke7 Nc6+ Ke6 Nxa5 Qe2 Qc6+ Kf5 \
    Qf3+ Qxf3 gxf3 Kf4 Kf2 g5 d5 Ke5 Nc6+ Kxd5 Nd4 b4 cxb4 Kxd4 Kg3 Kc4 Kg4 h6 Kh5 Kxb4 Kxh6 \
    Kc5 Kxg5 Kd6 Kg6 Ke5 h4 Kf4 h5 Kxf3 h6 Ke2 h7 Kd3 h8=Q Kc4 Qe5 Kd3 Kf5 Kc4 Kf4 Kd3 Qe4+ \
    Kc3 Kf3 Kd2 Qe3+ Kc2 Kf2 Kd1 Qe2+ Kc1 Ke3 Kb1 Kd3 Kc1 Qf2 Kd1 Qf1#";

const SAMPLE_LOG: &str = "e2e4 e7e5 Nb1c3 Nb8c6 f2f4 e5xf4 Ng1f3 Bf8b4 d2d4 Bb4xc3+ b2xc3 \
    d7d5 e4e5 f7f6 Bc1xf4 f6xe5 Bf4xe5 Nc6xe5 Nf3xe5 Qd8e7 Bf1d3 c7c5 O-O Ng8f6 Qd1f3 Bc8g4 \
    Qf3f2 O-O Qf2g3 Nf6e4 Bd3xe4 d5xe4 Qg3xg4 c5xd4 c3xd4 Ra8d8 c2c3 b7b5 Qg4xe4 Qe7a3 Rf1f3 \
    a7a5 Ra1f1 Qa3xa2 Rf3xf8+ Rd8xf8 Rf1xf8+ Kg8xf8 Qe4a8+ Kf8e7 Ne5c6+ Ke7e6 Nc6xa5 Qa2e2 \
    Qa8c6+ Ke6f5 Qc6f3+ Qe2xf3 g2xf3 Kf5f4 Kg1f2 g7g5 d4d5 Kf4e5 Na5c6+ Ke5xd5 Nc6d4 b5b4 \
    c3xb4 Kd5xd4 Kf2g3 Kd4c4 Kg3g4 h7h6 Kg4h5 Kc4xb4 Kh5xh6 Kb4c5 Kh6xg5 Kc5d6 Kg5g6 Kd6e5 \
    h2h4 Ke5f4 h4h5 Kf4xf3 h5h6 Kf3e2 h6h7 Ke2d3 h7h8=Q Kd3c4 Qh8e5 Kc4d3 Kg6f5 Kd3c4 Kf5f4 \
    Kc4d3 Qe5e4+ Kd3c3 Kf4f3 Kc3d2 Qe4e3+ Kd2c2 Kf3f2 Kc2d1 Qe3e2+ Kd1c1 Kf2e3 Kc1b1 Ke3d3 \
    Kb1c1 Qe2f2 Kc1d1 Qf2f1#";

fn convert(moves: &str) -> Result<Vec<String>, algebraic::ConvertError> {
    convert_notation(moves.split_whitespace())
}

#[test]
fn test_sample_game() {
    let log = convert(SAMPLE_GAME).expect("legal game");
    assert_eq!(log.len(), 115);
    assert_eq!(log, SAMPLE_LOG.split_whitespace().collect::<Vec<_>>());
}

#[test]
fn test_replaying_long_notation_reproduces_log() {
    let log = convert(SAMPLE_GAME).expect("legal game");
    let replayed = convert_notation(&log).expect("long notation is playable");
    assert_eq!(log, replayed);
}

#[test]
fn test_short_notation_roundtrip() {
    let mut game = Game::new();
    for san in SAMPLE_GAME.split_whitespace() {
        game.attempt_move(san).expect("legal move");
    }
    assert_eq!(
        game.short_notation(),
        SAMPLE_GAME.split_whitespace().collect::<Vec<_>>()
    );
}

#[test]
fn test_promotions_on_capture() {
    assert_eq!(
        convert("a4 h5 a5 h4 a6 h3 axb7 hxg2 bxa8=Q gxh1=N").expect("legal game"),
        ["a2a4", "h7h5", "a4a5", "h5h4", "a5a6", "h4h3", "a6xb7", "h3xg2", "b7xa8=Q", "g2xh1=N"]
    );
}

#[test]
fn test_queen_side_castles() {
    assert_eq!(
        convert("d4 d5 Nc3 Nc6 Bf4 Bf5 Qd2 Qd7 O-O-O O-O-O").expect("legal game"),
        ["d2d4", "d7d5", "Nb1c3", "Nb8c6", "Bc1f4", "Bc8f5", "Qd1d2", "Qd8d7", "O-O-O", "O-O-O"]
    );
}

#[test]
fn test_king_side_castles() {
    assert_eq!(
        convert("e4 e5 Nf3 Nc6 Bc4 Bc5 O-O Nf6 Re1 O-O").expect("legal game"),
        ["e2e4", "e7e5", "Ng1f3", "Nb8c6", "Bf1c4", "Bf8c5", "O-O", "Ng8f6", "Rf1e1", "O-O"]
    );
}

#[test]
fn test_castling_after_king_move() {
    let err = convert("e4 e5 Ke2 Ke7 Ke1 Ke8 O-O").expect_err("rights revoked");
    assert_eq!(err.index, 6);
    assert_eq!(err.error, PlayError::Illegal(IllegalMove::CastlingRevoked));
}

#[test]
fn test_knight_disambiguation() {
    assert_eq!(
        convert("Nf3 Nf6 Nc3 Nc6 Nb5 Nb4 Nbd4").expect("legal game"),
        ["Ng1f3", "Ng8f6", "Nb1c3", "Nb8c6", "Nc3b5", "Nc6b4", "Nb5d4"]
    );

    let err = convert("Nf3 Nf6 Nc3 Nc6 Nb5 Nb4 Nd4").expect_err("two knights reach d4");
    assert_eq!(err.index, 6);
    assert_eq!(err.text, "Nd4");
    assert_eq!(err.error, PlayError::Illegal(IllegalMove::Ambiguous));
}

#[test]
fn test_unparsable_move() {
    let err = convert("e4 e5 Lf3").expect_err("no such piece");
    assert_eq!(err.index, 2);
    assert!(matches!(err.error, PlayError::Parse(_)));
    assert_eq!(err.to_string(), "move 3 (\"Lf3\"): invalid san");
}

#[test]
fn test_empty_game() {
    assert_eq!(convert("").expect("nothing to reject"), Vec::<String>::new());
}
