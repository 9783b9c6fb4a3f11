//! Game state machine and session integration tests.

use cribrs::{
    Action, Card, DealError, Deck, Game, GameOptions, GameState, Move, MoveError, MoveOutcome,
    Phase, PlayReason, ScoreSource, Seat, ValidationError, validate_move,
};

const GAME: &str = "g1";
const ALICE: &str = "alice@example.com";
const BOB: &str = "bob@example.com";

fn card(id: &str) -> Card {
    id.parse().unwrap()
}

/// A deck with `top` first and the rest of a standard deck after it.
fn stacked(top: &[&str]) -> Deck {
    let mut cards: Vec<Card> = top.iter().map(|id| card(id)).collect();
    let rest: Vec<Card> = Deck::standard()
        .cards()
        .iter()
        .copied()
        .filter(|c| !cards.contains(c))
        .collect();
    cards.extend(rest);
    Deck::from_cards(cards)
}

fn dealt(top: &[&str]) -> GameState {
    let mut state = GameState::new(GAME, ALICE, BOB, GameOptions::default());
    state.deal_from(stacked(top)).unwrap();
    state
}

fn apply(state: &mut GameState, mv: Move) -> MoveOutcome {
    state.apply(&mv).unwrap()
}

fn discard(state: &mut GameState, who: &str, a: &str, b: &str) -> MoveOutcome {
    apply(state, Move::discard(GAME, who, [card(a), card(b)]))
}

fn play(state: &mut GameState, who: &str, id: &str) -> MoveOutcome {
    apply(state, Move::play_card(GAME, who, card(id)))
}

fn rejection(state: &mut GameState, mv: Move) -> Vec<ValidationError> {
    let before = state.clone();
    let err = state.apply(&mv).unwrap_err();
    assert_eq!(*state, before, "rejected move changed the state");
    match err {
        MoveError::Invalid(errors) => errors,
        other => panic!("unexpected error {other:?}"),
    }
}

// Alice deals. Alice: 5H 5D KC QC (discards 2S 3S). Bob: 4H 6D 7C 8S (discards AH AD). Cut 9H.
const FULL_HAND: [&str; 13] = [
    "5H", "5D", "KC", "QC", "2S", "3S", "4H", "6D", "7C", "8S", "AH", "AD", "9H",
];

// Alice: KC QD 9S 8C (discards 2H 3H). Bob: 10H JS 7D 6S (discards 4C 5C). Cut AS.
const GO_HAND: [&str; 13] = [
    "KC", "QD", "9S", "8C", "2H", "3H", "10H", "JS", "7D", "6S", "4C", "5C", "AS",
];

fn into_play(top: &[&str], alice: [&str; 2], bob: [&str; 2]) -> GameState {
    let mut state = dealt(top);
    discard(&mut state, ALICE, alice[0], alice[1]);
    discard(&mut state, BOB, bob[0], bob[1]);
    state
}

/// Plays out `FULL_HAND` up to the count.
fn full_hand_to_count() -> GameState {
    let mut state = into_play(&FULL_HAND, ["2S", "3S"], ["AH", "AD"]);
    for (who, id) in [
        (BOB, "7C"),
        (ALICE, "5H"),
        (BOB, "6D"),
        (ALICE, "5D"),
        (BOB, "8S"),
        (ALICE, "KC"),
        (BOB, "4H"),
        (ALICE, "QC"),
    ] {
        play(&mut state, who, id);
    }
    state
}

#[test]
fn deal_fills_both_hands() {
    let state = dealt(&FULL_HAND);
    assert_eq!(state.held(Seat::Player1).len(), 6);
    assert_eq!(state.held(Seat::Player2).len(), 6);
    assert_eq!(state.held(Seat::Player2)[0], card("4H"));
    assert_eq!(state.cut(), None);
    assert_eq!(state.dealer, Seat::Player1);
}

#[test]
fn deal_requires_waiting_state() {
    let mut state = dealt(&FULL_HAND);
    assert_eq!(
        state.deal_from(Deck::standard()).unwrap_err(),
        DealError::InvalidState
    );
}

#[test]
fn discards_build_crib_and_reveal_cut() {
    let mut state = dealt(&FULL_HAND);

    let outcome = discard(&mut state, ALICE, "2S", "3S");
    assert!(outcome.events.is_empty());
    let Phase::Discard(ref phase) = state.phase else {
        panic!("expected discard phase");
    };
    assert_eq!(phase.discarded, [true, false]);
    assert_eq!(phase.crib, vec![card("2S"), card("3S")]);

    discard(&mut state, BOB, "AH", "AD");
    let Phase::Play(ref phase) = state.phase else {
        panic!("expected play phase");
    };
    assert_eq!(phase.turn, Seat::Player2);
    assert_eq!(phase.cut, card("9H"));
    assert_eq!(state.cut(), Some(card("9H")));
    assert_eq!(
        state.held(Seat::Player1),
        [card("5H"), card("5D"), card("KC"), card("QC")]
    );
}

#[test]
fn pegging_and_counting_a_full_hand() {
    let mut state = into_play(&FULL_HAND, ["2S", "3S"], ["AH", "AD"]);

    assert_eq!(play(&mut state, BOB, "7C").events.len(), 0);
    play(&mut state, ALICE, "5H");
    // 7-5-6
    assert_eq!(play(&mut state, BOB, "6D").points_for(Seat::Player2), 3);
    play(&mut state, ALICE, "5D");
    let thirty_one = play(&mut state, BOB, "8S");
    assert_eq!(thirty_one.points_for(Seat::Player2), 2);
    play(&mut state, ALICE, "KC");
    play(&mut state, BOB, "4H");
    let last = play(&mut state, ALICE, "QC");
    assert_eq!(last.points_for(Seat::Player1), 1);
    assert!(matches!(
        &last.events[0].source,
        ScoreSource::Pegging(score) if score.reasons == vec![PlayReason::LastCard]
    ));

    assert_eq!(state.scores.player1, 1);
    assert_eq!(state.scores.player2, 5);
    let Phase::Count(ref count) = state.phase else {
        panic!("expected count phase");
    };
    assert_eq!(count.next, Seat::Player2);

    // Pone counts first.
    assert_eq!(
        rejection(&mut state, Move::count(GAME, ALICE)),
        vec![ValidationError::NotYourTurn]
    );

    let pone = apply(&mut state, Move::count(GAME, BOB));
    assert_eq!(pone.points_for(Seat::Player2), 8);

    let dealer = apply(&mut state, Move::count(GAME, ALICE));
    assert_eq!(dealer.events.len(), 2);
    assert!(matches!(&dealer.events[0].source, ScoreSource::Hand(score) if score.points == 10));
    assert!(matches!(&dealer.events[1].source, ScoreSource::Crib(score) if score.points == 12));

    assert_eq!(state.scores.player1, 23);
    assert_eq!(state.scores.player2, 13);
    assert_eq!(state.phase, Phase::Waiting);
    assert_eq!(state.dealer, Seat::Player2);
}

#[test]
fn go_passes_and_scores_last_player() {
    let mut state = into_play(&GO_HAND, ["2H", "3H"], ["4C", "5C"]);

    play(&mut state, BOB, "10H");
    play(&mut state, ALICE, "KC");
    play(&mut state, BOB, "JS");

    assert_eq!(
        rejection(&mut state, Move::play_card(GAME, ALICE, card("QD"))),
        vec![ValidationError::CardNotPlayable {
            card: card("QD"),
            total: 30
        }]
    );
    assert!(apply(&mut state, Move::go(GAME, ALICE)).events.is_empty());

    // Bob cannot play on 30 either; his go closes the count and he pegs for it.
    let go = apply(&mut state, Move::go(GAME, BOB));
    assert_eq!(go.points_for(Seat::Player2), 1);
    let Phase::Play(ref phase) = state.phase else {
        panic!("expected play phase");
    };
    assert_eq!(phase.sequence.total(), 0);
    assert_eq!(phase.turn, Seat::Player1);

    play(&mut state, ALICE, "9S");
    assert_eq!(play(&mut state, BOB, "6S").points_for(Seat::Player2), 2);
    play(&mut state, ALICE, "8C");
    // 9-6-8-7
    assert_eq!(play(&mut state, BOB, "7D").points_for(Seat::Player2), 4);

    // Bob is out of cards, Alice cannot play the Queen on 30.
    let go = apply(&mut state, Move::go(GAME, ALICE));
    assert_eq!(go.points_for(Seat::Player2), 1);

    let last = play(&mut state, ALICE, "QD");
    assert_eq!(last.points_for(Seat::Player1), 1);
    assert_eq!(state.scores.player1, 1);
    assert_eq!(state.scores.player2, 8);
    assert!(matches!(state.phase, Phase::Count(_)));
}

#[test]
fn go_is_rejected_while_a_card_fits() {
    let mut state = into_play(&GO_HAND, ["2H", "3H"], ["4C", "5C"]);
    assert_eq!(
        rejection(&mut state, Move::go(GAME, BOB)),
        vec![ValidationError::MustPlay]
    );
}

#[test]
fn heels_can_win_the_game() {
    let mut top = FULL_HAND;
    top[12] = "JD";
    let mut state = dealt(&top);
    state.scores.player1 = 119;

    discard(&mut state, ALICE, "2S", "3S");
    let outcome = discard(&mut state, BOB, "AH", "AD");
    assert_eq!(outcome.events[0].source, ScoreSource::Heels);
    assert_eq!(outcome.winner, Some(Seat::Player1));
    assert_eq!(state.winner(), Some(Seat::Player1));
    assert_eq!(state.scores.player1, 121);

    assert!(
        rejection(&mut state, Move::play_card(GAME, BOB, card("4H")))
            .contains(&ValidationError::GameOver)
    );
}

#[test]
fn hand_count_win_is_flagged_in_the_same_call() {
    let mut state = full_hand_to_count();
    state.scores.player2 = 119;

    let outcome = apply(&mut state, Move::count(GAME, BOB));
    assert_eq!(outcome.winner, Some(Seat::Player2));
    assert_eq!(state.phase, Phase::Finished { winner: Seat::Player2 });
    assert_eq!(state.scores.player2, 127);
}

#[test]
fn validation_collects_every_problem() {
    let state = dealt(&FULL_HAND);

    let stranger = Move::count("other-game", "eve@example.com");
    assert_eq!(
        validate_move(&stranger, &state),
        vec![ValidationError::WrongGame, ValidationError::UnknownPlayer]
    );

    let mut one = Move::discard(GAME, ALICE, [card("5H"), card("5D")]);
    one.card_ids = Some(vec!["5H".into()]);
    assert_eq!(
        validate_move(&one, &state),
        vec![ValidationError::WrongDiscardCount(1)]
    );

    let mut twice = one.clone();
    twice.card_ids = Some(vec!["5H".into(), "5h".into()]);
    assert_eq!(
        validate_move(&twice, &state),
        vec![ValidationError::DuplicateDiscard]
    );

    let mut aliased = one.clone();
    aliased.player_email = BOB.into();
    aliased.card_ids = Some(vec!["AH".into(), "1h".into()]);
    assert_eq!(
        validate_move(&aliased, &state),
        vec![ValidationError::DuplicateDiscard]
    );
    let go_state = dealt(&GO_HAND);
    aliased.card_ids = Some(vec!["10H".into(), "TH".into()]);
    assert_eq!(
        validate_move(&aliased, &go_state),
        vec![ValidationError::DuplicateDiscard]
    );

    let mut garbage = one.clone();
    garbage.card_ids = Some(vec!["5H".into(), "ZZ".into()]);
    assert_eq!(
        validate_move(&garbage, &state),
        vec![ValidationError::UnknownCard("ZZ".into())]
    );

    let not_held = Move::discard(GAME, ALICE, [card("5H"), card("4H")]);
    assert_eq!(
        validate_move(&not_held, &state),
        vec![ValidationError::CardNotInHand(card("4H"))]
    );

    let early = Move::play_card(GAME, ALICE, card("5H"));
    assert_eq!(
        validate_move(&early, &state),
        vec![ValidationError::WrongPhase]
    );

    let missing = Move {
        card_id: None,
        ..early
    };
    assert_eq!(missing.action, Action::PlayCard);
    assert_eq!(
        validate_move(&missing, &state),
        vec![ValidationError::MissingCardId, ValidationError::WrongPhase]
    );

    let mut counted = Move::count(GAME, ALICE);
    counted.card_id = Some("5H".into());
    assert_eq!(
        validate_move(&counted, &state),
        vec![ValidationError::UnexpectedCardId, ValidationError::WrongPhase]
    );
}

#[test]
fn discard_with_extra_card_id_is_rejected() {
    let mut state = dealt(&FULL_HAND);

    let mut both = Move::discard(GAME, ALICE, [card("2S"), card("3S")]);
    both.card_id = Some("KC".into());
    assert_eq!(
        rejection(&mut state, both),
        vec![ValidationError::UnexpectedCardId]
    );

    // The game carries on normally afterwards.
    discard(&mut state, ALICE, "2S", "3S");
    discard(&mut state, BOB, "AH", "AD");
    let Phase::Play(ref phase) = state.phase else {
        panic!("expected play phase");
    };
    assert_eq!(phase.crib.cards().len(), 4);
    assert_eq!(state.held(Seat::Player1).len(), 4);
}

#[test]
fn play_card_with_card_ids_is_rejected() {
    let mut state = into_play(&FULL_HAND, ["2S", "3S"], ["AH", "AD"]);

    let mut extra = Move::play_card(GAME, BOB, card("7C"));
    extra.card_ids = Some(vec!["4H".into(), "6D".into()]);
    assert_eq!(
        rejection(&mut state, extra),
        vec![ValidationError::UnexpectedCardIds]
    );
    assert_eq!(play(&mut state, BOB, "7C").events.len(), 0);
}

#[test]
fn discard_only_once() {
    let mut state = dealt(&FULL_HAND);
    discard(&mut state, ALICE, "2S", "3S");
    assert_eq!(
        rejection(&mut state, Move::discard(GAME, ALICE, [card("5H"), card("5D")])),
        vec![ValidationError::AlreadyDiscarded]
    );
}

#[test]
fn play_enforces_turn_and_ownership() {
    let mut state = into_play(&FULL_HAND, ["2S", "3S"], ["AH", "AD"]);
    assert_eq!(
        rejection(&mut state, Move::play_card(GAME, ALICE, card("5H"))),
        vec![ValidationError::NotYourTurn]
    );
    assert_eq!(
        rejection(&mut state, Move::play_card(GAME, BOB, card("5H"))),
        vec![ValidationError::CardNotInHand(card("5H"))]
    );
    assert_eq!(
        rejection(&mut state, Move::count(GAME, BOB)),
        vec![ValidationError::WrongPhase]
    );
}

/// Picks a legal move for whoever has to act.
fn next_move(state: &GameState) -> Move {
    match &state.phase {
        Phase::Discard(phase) => {
            let seat = if phase.discarded[0] {
                Seat::Player2
            } else {
                Seat::Player1
            };
            let held = state.held(seat);
            Move::discard(GAME, &state.players[seat.index()], [held[0], held[1]])
        }
        Phase::Play(phase) => {
            let who = &state.players[phase.turn.index()];
            state
                .held(phase.turn)
                .iter()
                .find(|&&c| phase.sequence.can_play(c))
                .map_or_else(|| Move::go(GAME, who), |&c| Move::play_card(GAME, who, c))
        }
        Phase::Count(phase) => Move::count(GAME, &state.players[phase.next.index()]),
        other => panic!("no move in phase {}", other.name()),
    }
}

#[test]
fn session_plays_a_whole_game() {
    let game = Game::new(GameOptions::default(), GAME, ALICE, BOB, 2024).unwrap();
    assert_eq!(game.held(Seat::Player1).len(), 6);

    let mut moves = 0;
    while game.winner().is_none() {
        let mv = next_move(&game.state());
        game.submit(&mv).unwrap();
        moves += 1;
        assert!(moves < 5_000, "game did not finish");
    }

    let state = game.into_state();
    let winner = state.winner().unwrap();
    assert!(state.scores.get(winner) >= 121);
    assert!(state.scores.get(winner.other()) < 121);
}

#[test]
fn session_rejects_bad_moves_without_side_effects() {
    let game =
        Game::new(GameOptions::default().with_target_score(61), GAME, ALICE, BOB, 9).unwrap();
    let before = game.state();
    let err = game.submit(&Move::go(GAME, ALICE)).unwrap_err();
    assert_eq!(err, MoveError::Invalid(vec![ValidationError::WrongPhase]));
    assert_eq!(game.state(), before);
    assert_eq!(before.options.target_score, 61);
}

#[test]
fn resumed_game_deals_a_waiting_state() {
    let waiting = GameState::new(GAME, ALICE, BOB, GameOptions::default());
    let game = Game::from_state(waiting, 3).unwrap();
    assert!(matches!(game.state().phase, Phase::Discard(_)));

    let mid_hand = into_play(&FULL_HAND, ["2S", "3S"], ["AH", "AD"]);
    let game = Game::from_state(mid_hand.clone(), 3).unwrap();
    assert_eq!(game.into_state(), mid_hand);
}
