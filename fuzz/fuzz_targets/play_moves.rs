#![no_main]
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;
use unvoid::chess::game::Game;
use unvoid::chess::core::Square;

fuzz_target!(|data: &[u8]| {
    let Some((&size, moves)) = data.split_first() else {
        return;
    };
    let width = 6 + usize::from(size % 7);
    let height = 6 + usize::from(size / 7 % 7);
    let mut game = Game::new(width, height);
    // Coordinates are allowed to stray off the board.
    for chunk in moves.chunks_exact(4) {
        let coordinate = |byte: u8| i32::from(byte % 16) - 2;
        let from = Square::new(coordinate(chunk[0]), coordinate(chunk[1]));
        let to = Square::new(coordinate(chunk[2]), coordinate(chunk[3]));

        for (square, piece) in game.board().pieces() {
            for target in game.legal_destinations(square) {
                assert!(game.board().in_bounds(target));
                assert!(game.board().at(target).map_or(true, |p| p.owner != piece.owner));
            }
        }

        let before = game.board().clone();
        match game.make_move(from, to) {
            Ok(outcome) => {
                assert_eq!(game.board().at(to), Some(outcome.piece));
                assert_eq!(game.board().at(from), None);
                if game.end_turn().is_some() {
                    return;
                }
            },
            Err(_) => assert!(game.board() == &before),
        }
    }
});
