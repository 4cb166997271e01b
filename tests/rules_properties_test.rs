//! Board-wide properties of the rule engine.

use proptest::prelude::*;
use slash_core::{
    Board, CELL_COUNT, Cell, DecisionReason, Phase, Player, apply_move, check_win, choose_move,
    derive_phase, is_valid_move, valid_moves,
};

fn arb_cell() -> impl Strategy<Value = Cell> {
    prop_oneof![
        Just(Cell::Empty),
        Just(Cell::MarkA),
        Just(Cell::MarkB),
        Just(Cell::Charged),
        Just(Cell::Locked),
    ]
}

fn arb_board() -> impl Strategy<Value = Board> {
    proptest::array::uniform9(arb_cell()).prop_map(Board::from_cells)
}

fn arb_player() -> impl Strategy<Value = Player> {
    prop_oneof![Just(Player::P1), Just(Player::P2)]
}

fn arb_phase() -> impl Strategy<Value = Phase> {
    prop_oneof![Just(Phase::Expansion), Just(Phase::Contest)]
}

proptest! {
    #[test]
    fn prop_contest_iff_no_empty(board in arb_board()) {
        let full = board.count(Cell::Empty) == 0;
        prop_assert_eq!(derive_phase(&board) == Phase::Contest, full);
    }

    #[test]
    fn prop_last_move_and_locked_always_rejected(
        board in arb_board(),
        player in arb_player(),
        last in 0usize..CELL_COUNT,
    ) {
        let phase = derive_phase(&board);
        prop_assert!(!is_valid_move(&board, last, player, phase, Some(last)));
        for index in 0..CELL_COUNT {
            if board.get(index) == Some(Cell::Locked) {
                prop_assert!(!is_valid_move(&board, index, player, phase, None));
            }
        }
    }

    #[test]
    fn prop_moves_change_exactly_one_cell(board in arb_board(), player in arb_player()) {
        let phase = derive_phase(&board);
        for index in valid_moves(&board, player, phase, None) {
            let before = board.get(index).unwrap();
            let next = apply_move(&board, index, player, phase).unwrap();
            let changed: Vec<usize> = (0..CELL_COUNT)
                .filter(|&i| next.board.get(i) != board.get(i))
                .collect();
            prop_assert_eq!(changed, vec![index]);

            let after = next.board.get(index).unwrap();
            match (phase, before) {
                (Phase::Expansion, Cell::Empty) => prop_assert_eq!(after, player.mark()),
                (_, Cell::MarkA | Cell::MarkB) => prop_assert_eq!(after, Cell::Charged),
                (Phase::Contest, Cell::Charged) => prop_assert_eq!(after, Cell::Locked),
                other => prop_assert!(false, "unexpected legal move on {:?}", other),
            }
            prop_assert_eq!(next.caused_win, check_win(&next.board));
        }
    }

    #[test]
    fn prop_only_contest_locks(board in arb_board(), player in arb_player()) {
        let phase = derive_phase(&board);
        let locked_before = board.count(Cell::Locked);
        for index in valid_moves(&board, player, phase, None) {
            let next = apply_move(&board, index, player, phase).unwrap().board;
            if next.count(Cell::Locked) > locked_before {
                prop_assert_eq!(phase, Phase::Contest);
                prop_assert_eq!(board.get(index), Some(Cell::Charged));
            }
        }
    }

    #[test]
    fn prop_opponent_wins_are_taken_before_blocking(
        board in arb_board(),
        phase in arb_phase(),
        player in arb_player(),
        last in proptest::option::of(0usize..CELL_COUNT),
    ) {
        // Phases are drawn independently of the board, so this covers
        // positions play never reaches as well.
        if let Some(decision) = choose_move(&board, phase, last, player) {
            prop_assert_ne!(decision.reason, DecisionReason::Block);
        }
    }
}

#[test]
fn test_empty_board_has_no_win() {
    assert!(!check_win(&Board::new()));
}
