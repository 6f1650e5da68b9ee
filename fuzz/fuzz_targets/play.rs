#![no_main]

use algebraic::{san::San, Game, Square};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|sans: Vec<San>| {
    let mut game = Game::new();
    for san in sans {
        let before = game.clone();
        let legal = game.legal_moves().iter().any(|m| san.matches(m));
        match game.play(&san.into()) {
            Ok(entry) => {
                assert!(legal);
                let m = entry.m();
                assert!(game.board().piece_at(m.to()).is_some());
            }
            Err(_) => assert_eq!(game, before),
        }

        for sq in Square::ALL {
            if let Some(id) = game.board().piece_at(sq) {
                let piece = game.board().piece(id);
                assert!(piece.is_active());
                assert_eq!(piece.square(), Some(sq));
            }
        }
    }
});
