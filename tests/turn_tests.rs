use std::cell::RefCell;
use std::rc::Rc;

use fasttrack::{
    Card, Game, GameConfig, GameError, GameEvent, LapProgress, MoveKind, PegId, PegMode,
    PegStatus, Phase, Rank, Suit,
};

fn new_game(players: usize) -> Game {
    let mut game = Game::new(&GameConfig::new(players, 0x5EED)).expect("game");
    game.start().expect("start");
    game
}

fn put(game: &mut Game, peg: PegId, name: &str, status: PegStatus) {
    let (board, state) = game.parts_mut();
    let hole = board.parse_hole(name).expect("hole name");
    state.place_peg(board, peg, hole, status).expect("place peg");
}

fn stack(game: &mut Game, player: usize, rank: Rank) {
    game.state_mut().players[player]
        .deck
        .stack(Card::new(rank, Suit::Diamonds));
}

fn recorder(game: &mut Game) -> Rc<RefCell<Vec<GameEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    game.subscribe(Box::new(log.clone()));
    log
}

#[test]
fn phases_gate_every_action() {
    let mut game = Game::new(&GameConfig::default()).expect("game");
    assert_eq!(game.phase(), Phase::Waiting);
    assert!(matches!(game.draw(), Err(GameError::InvalidPhase { action: "draw", .. })));

    game.start().expect("start");
    assert_eq!(game.phase(), Phase::Draw);
    assert!(matches!(game.start(), Err(GameError::InvalidPhase { .. })));
    assert!(matches!(game.skip(), Err(GameError::InvalidPhase { .. })));
    assert!(matches!(
        game.choose_move_index(0),
        Err(GameError::InvalidPhase { .. }) | Err(GameError::IllegalDestination)
    ));
}

#[test]
fn choosing_before_drawing_is_rejected() {
    let mut game = new_game(4);
    stack(&mut game, 0, Rank::Two);
    game.draw().expect("draw");
    let mv = game.legal_moves()[0].clone();
    game.choose_move(&mv).expect("move");
    assert_eq!(game.phase(), Phase::Draw);
    assert_eq!(
        game.choose_move(&mv),
        Err(GameError::InvalidPhase {
            action: "choose_move",
            phase: Phase::Draw
        })
    );
}

#[test]
fn ace_move_earns_extra_turn() {
    let mut game = new_game(4);
    let log = recorder(&mut game);
    stack(&mut game, 0, Rank::Ace);

    let card = game.draw().expect("draw");
    assert_eq!(card.rank, Rank::Ace);
    assert_eq!(game.phase(), Phase::Play);
    assert_eq!(game.legal_moves().len(), 1);
    game.choose_move_index(0).expect("move");

    assert_eq!(game.current_player(), 0, "extra turn keeps the player");
    assert_eq!(game.phase(), Phase::Draw);
    assert_eq!(game.state().turn_count, 0);

    let events = log.borrow();
    assert!(matches!(events[0], GameEvent::CardDrawn { player: 0, .. }));
    assert!(matches!(events[1], GameEvent::LegalMovesReady { player: 0, .. }));
    match &events[2] {
        GameEvent::MoveExecuted { mv, captured, .. } => {
            assert_eq!(mv.to_hole_id, "outer-0-3");
            assert!(captured.is_none());
        }
        other => panic!("expected MoveExecuted, got {other:?}"),
    }
    assert_eq!(
        events[3],
        GameEvent::TurnEnded {
            player: 0,
            extra_turn: true
        }
    );
}

#[test]
fn skip_never_earns_extra_turn() {
    let mut game = new_game(4);
    stack(&mut game, 0, Rank::Ace);
    game.draw().expect("draw");
    assert!(!game.legal_moves().is_empty());
    game.skip().expect("skip");
    assert_eq!(game.current_player(), 1);
    assert_eq!(game.state().turn_count, 1);
    assert!(!game.state().extra_turn_pending);
}

#[test]
fn plain_card_passes_turn() {
    let mut game = new_game(3);
    stack(&mut game, 0, Rank::Five);
    game.draw().expect("draw");
    game.choose_move_index(0).expect("move");
    assert_eq!(game.current_player(), 1);
    assert!(game.state().players[0].deck.discarded() >= 1);
}

#[test]
fn no_legal_moves_skips_automatically() {
    let mut game = new_game(4);
    let log = recorder(&mut game);
    put(&mut game, PegId::new(0, 4), "ft-1", PegStatus::perimeter());
    stack(&mut game, 0, Rank::Eight);

    game.draw().expect("draw");
    assert_eq!(game.phase(), Phase::Draw);
    assert_eq!(game.current_player(), 1);
    assert!(log.borrow().iter().any(|e| matches!(
        e,
        GameEvent::TurnEnded {
            player: 0,
            extra_turn: false
        }
    )));
}

#[test]
fn move_outside_legal_set_is_rejected() {
    let mut game = new_game(4);
    stack(&mut game, 0, Rank::Two);
    game.draw().expect("draw");
    let mut mv = game.legal_moves()[0].clone();
    mv.steps += 1;
    assert_eq!(game.choose_move(&mv), Err(GameError::IllegalDestination));

    let mut ghost = mv.clone();
    ghost.peg = PegId::new(0, 9);
    assert_eq!(game.choose_move(&ghost), Err(GameError::NoSuchPeg(PegId::new(0, 9))));
    assert_eq!(game.phase(), Phase::Play);
}

#[test]
fn unused_fasttrack_is_lost_at_turn_end() {
    let mut game = new_game(4);
    let ft2 = game.board().parse_hole("ft-2").expect("hole");
    let on_ring = PegStatus::new(PegMode::FastTrack { entered_at: ft2 }, LapProgress::Unfinished);
    put(&mut game, PegId::new(0, 3), "ft-2", on_ring);
    stack(&mut game, 0, Rank::Two);

    game.draw().expect("draw");
    let home_peg_move = game
        .legal_moves()
        .iter()
        .find(|m| m.peg == PegId::new(0, 4))
        .cloned()
        .expect("home peg move");
    game.choose_move(&home_peg_move).expect("move");

    let peg = game.state().peg(PegId::new(0, 3)).expect("peg");
    assert_eq!(peg.status.mode, PegMode::Perimeter);
    assert_eq!(game.board().name(peg.hole), "ft-2");
}

#[test]
fn travelling_the_ring_keeps_fasttrack() {
    let mut game = new_game(4);
    let ft2 = game.board().parse_hole("ft-2").expect("hole");
    let on_ring = PegStatus::new(PegMode::FastTrack { entered_at: ft2 }, LapProgress::Unfinished);
    put(&mut game, PegId::new(0, 3), "ft-2", on_ring);
    stack(&mut game, 0, Rank::Two);

    game.draw().expect("draw");
    let ring_move = game
        .legal_moves()
        .iter()
        .find(|m| m.peg == PegId::new(0, 3) && m.after.mode.is_fasttrack())
        .cloned()
        .expect("ring move");
    game.choose_move(&ring_move).expect("move");
    let peg = game.state().peg(PegId::new(0, 3)).expect("peg");
    assert!(peg.on_fasttrack());
    assert_eq!(game.board().name(peg.hole), "ft-4");
}

#[test]
fn backward_card_marks_fasttrack_pegs_until_turn_end() {
    let mut game = new_game(4);
    let ft3 = game.board().parse_hole("ft-3").expect("hole");
    let on_ring = PegStatus::new(PegMode::FastTrack { entered_at: ft3 }, LapProgress::Unfinished);
    put(&mut game, PegId::new(0, 4), "ft-3", on_ring);
    stack(&mut game, 0, Rank::Four);

    game.draw().expect("draw");
    let peg = game.state().peg(PegId::new(0, 4)).expect("peg");
    assert!(peg.must_exit_fasttrack);
    assert!(game.legal_moves().iter().all(|m| m.is_leave_fasttrack));

    game.skip().expect("skip");
    let peg = game.state().peg(PegId::new(0, 4)).expect("peg");
    assert!(!peg.must_exit_fasttrack);
    assert!(peg.on_fasttrack(), "skipping without moving keeps FastTrack");
}

#[test]
fn split_card_offers_the_remainder() {
    let mut game = new_game(2);
    let log = recorder(&mut game);
    put(&mut game, PegId::new(0, 4), "side-left-1-1", PegStatus::perimeter());
    put(&mut game, PegId::new(0, 3), "side-left-2-1", PegStatus::perimeter());
    stack(&mut game, 0, Rank::Seven);

    game.draw().expect("draw");
    assert_eq!(game.legal_moves().len(), 12);
    let first = game
        .legal_moves()
        .iter()
        .find(|m| m.peg == PegId::new(0, 4) && m.steps == 2)
        .cloned()
        .expect("split first");
    game.choose_move(&first).expect("first half");

    assert_eq!(game.phase(), Phase::Play);
    assert_eq!(game.current_player(), 0);
    let pending = game.state().pending_split.expect("pending split");
    assert_eq!(pending.remaining, 5);
    assert_eq!(game.legal_moves().len(), 1);
    assert_eq!(game.legal_moves()[0].kind, MoveKind::SplitSecond);

    game.choose_move_index(0).expect("second half");
    assert_eq!(game.current_player(), 1);
    let name = game.board().name(game.state().peg(PegId::new(0, 3)).expect("peg").hole);
    assert_eq!(name, "outer-2-1");

    let ready = log
        .borrow()
        .iter()
        .filter(|e| matches!(e, GameEvent::LegalMovesReady { .. }))
        .count();
    assert_eq!(ready, 2);
}

#[test]
fn record_selection_matches_move() {
    let mut game = new_game(4);
    stack(&mut game, 0, Rank::Three);
    game.draw().expect("draw");
    let record = game.legal_moves()[0].record(game.board());
    assert_eq!(record.from_hole_id, "home-0");
    assert_eq!(record.peg_id, "peg-0-4");
    game.choose_record(&record).expect("choose by record");
    assert_eq!(game.current_player(), 1);

    let json = serde_json::to_value(&record).expect("json");
    assert_eq!(json["type"], "move");
    assert_eq!(json["toHoleId"], "side-right-0-3");
    assert_eq!(json["isFastTrackEntry"], false);
}

#[test]
fn winning_move_ends_the_game() {
    let mut game = new_game(4);
    let log = recorder(&mut game);
    let safe = PegStatus::new(PegMode::SafeZone, LapProgress::Locked);
    for i in 0..4u8 {
        put(&mut game, PegId::new(0, i), &format!("safe-0-{}", i + 1), safe);
    }
    put(&mut game, PegId::new(0, 4), "outer-0-1", PegStatus::perimeter());
    stack(&mut game, 0, Rank::Two);

    game.draw().expect("draw");
    let result = game.choose_move_index(0).expect("winning move");
    assert!(result.won);
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.winner(), Some(0));
    assert!(matches!(game.draw(), Err(GameError::InvalidPhase { .. })));
    assert!(matches!(game.skip(), Err(GameError::InvalidPhase { .. })));
    assert_eq!(log.borrow().last(), Some(&GameEvent::GameOver { winner: 0 }));

    let json = serde_json::to_value(log.borrow().last().expect("event")).expect("json");
    assert_eq!(json["event"], "game_over");
}
