use proptest::prelude::*;

use crate::domain::{test_gens, test_prelude, GameStatus, TurnOutcome};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: a single turn moves scores exactly as the decision rule says,
    /// clears both decisions and advances the turn counter by one
    #[test]
    fn prop_finish_turn_follows_decision_rule((a, b) in test_gens::decision_pair()) {
        let (mut game, alice, bob) = test_gens::started_game(5);
        game.set_player_decision(alice, a).unwrap();
        game.set_player_decision(bob, b).unwrap();

        let turn = game.finish_turn().unwrap();

        let alice_score = game.player(alice).unwrap().score;
        let bob_score = game.player(bob).unwrap().score;
        prop_assert_eq!(alice_score, u32::from(a.beats(b)));
        prop_assert_eq!(bob_score, u32::from(b.beats(a)));
        prop_assert_eq!(game.current_turn_number(), 1);
        prop_assert!(game.players().iter().all(|p| p.decision.is_none()));

        let expected_winner = if a.beats(b) {
            Some(alice)
        } else if b.beats(a) {
            Some(bob)
        } else {
            None
        };
        prop_assert_eq!(turn.winner_id, expected_winner);

        let won = turn.players.iter().filter(|p| p.outcome == TurnOutcome::Won).count();
        let lost = turn.players.iter().filter(|p| p.outcome == TurnOutcome::Lost).count();
        let drawn = turn.players.iter().filter(|p| p.outcome == TurnOutcome::Draw).count();
        prop_assert!((won, lost, drawn) == (1, 1, 0) || (won, lost, drawn) == (0, 0, 2));
    }

    /// Property: over a whole match the turn numbers run 1..=n, the scores
    /// add up to the decisive turns, and the game finishes exactly at the end
    #[test]
    fn prop_full_match_finishes_on_last_turn(script in test_gens::match_script(7)) {
        let turns_count = script.len() as u32;
        let (mut game, alice, bob) = test_gens::started_game(turns_count);
        let mut decisive = 0;

        for (i, (a, b)) in script.iter().enumerate() {
            prop_assert_eq!(game.status(), GameStatus::Playing);
            prop_assert!(!game.is_finished());
            game.set_player_decision(alice, *a).unwrap();
            game.set_player_decision(bob, *b).unwrap();
            let turn = game.finish_turn().unwrap();
            prop_assert_eq!(turn.turn_number, i as u32 + 1);
            prop_assert_eq!(game.current_turn_number(), i as u32 + 1);
            if !turn.is_draw() {
                decisive += 1;
            }
        }

        prop_assert_eq!(game.status(), GameStatus::Finished);
        prop_assert!(game.is_finished());
        let total: u32 = game.players().iter().map(|p| p.score).sum();
        prop_assert_eq!(total, decisive);

        game.cancel();
        prop_assert_eq!(game.status(), GameStatus::Finished);
    }
}
