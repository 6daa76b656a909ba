//! Drives the agent through whole rounds the way an engine runner would.

use rand::rngs::StdRng;
use rand::SeedableRng;
use triboard_agent::cards::{Card, Deck, HoleCards, Street};
use triboard_agent::engine::{
    Action, BoardResult, BoardView, Bot, DecisionRequest, GameInfo, LegalActions, RoundOutcome,
    RoundStart, Seat,
};
use triboard_agent::{Agent, EquityTable, StrategyConfig};

const STACK: u32 = 200;

struct Deal {
    mine: [Card; 6],
    theirs: [HoleCards; 3],
    community: [[Card; 5]; 3],
}

fn deal(rng: &mut StdRng) -> Deal {
    let mut deck = Deck::new();
    let c = deck.sample(27, rng).to_vec();
    Deal {
        mine: [c[0], c[1], c[2], c[3], c[4], c[5]],
        theirs: [
            HoleCards::new(c[6], c[7]),
            HoleCards::new(c[8], c[9]),
            HoleCards::new(c[10], c[11]),
        ],
        community: [
            [c[12], c[13], c[14], c[15], c[16]],
            [c[17], c[18], c[19], c[20], c[21]],
            [c[22], c[23], c[24], c[25], c[26]],
        ],
    }
}

fn view(legal: LegalActions, pips: [u32; 2], pot: u32, community: &[Card]) -> BoardView {
    BoardView {
        legal,
        community: community.to_vec(),
        pips,
        pot,
        raise_bounds: (pips[1] + 2, STACK),
        settled: false,
        terminal: false,
    }
}

fn request(deal: &Deal, seat: Seat, street: Street, boards: [BoardView; 3]) -> DecisionRequest {
    DecisionRequest {
        street,
        seat,
        my_cards: deal.mine,
        boards,
        my_stack: STACK,
        opp_stack: STACK,
    }
}

fn chips_spent(actions: &[Action; 3], boards: &[BoardView; 3]) -> u32 {
    actions
        .iter()
        .zip(boards)
        .map(|(action, view)| match action {
            Action::Raise(to) => to - view.my_pip(),
            Action::Call => view.continue_cost(),
            _ => 0,
        })
        .sum()
}

fn check_request(agent: &mut Agent, game: &GameInfo, req: &DecisionRequest) -> [Action; 3] {
    let actions = agent.get_actions(game, req).expect("recognized legality");
    for (action, view) in actions.iter().zip(&req.boards) {
        assert!(view.legal.contains(action.kind()), "{action} not in {}", view.legal);
        if let Action::Raise(to) = action {
            assert!((view.raise_bounds.0..=view.raise_bounds.1).contains(to));
        }
    }
    assert!(chips_spent(&actions, &req.boards) <= req.my_stack);
    actions
}

#[test]
fn test_plays_forty_rounds() {
    let table = EquityTable::from_json_file(concat!(env!("CARGO_MANIFEST_DIR"), "/data/preflop_equity.json"))
        .expect("shipped table loads");
    let config = StrategyConfig::default().with_num_rounds(40).with_decision_iters(30);
    let mut agent = Agent::with_seed(config, table, 2021).expect("default config is valid");
    let mut dealer = StdRng::seed_from_u64(99);

    for round_num in 1..=40u32 {
        let seat = if round_num % 2 == 1 { Seat::SmallBlind } else { Seat::BigBlind };
        let game = GameInfo {
            bankroll: 0,
            opp_bankroll: 0,
            game_clock: 60.0,
            round_num,
        };
        let deal = deal(&mut dealer);
        agent.handle_new_round(&game, &RoundStart { seat, cards: deal.mine });

        // Assignment.
        let assign = || view(LegalActions::ASSIGN, [0, 0], 0, &[]);
        let req = request(&deal, seat, Street::Preflop, [assign(), assign(), assign()]);
        let actions = check_request(&mut agent, &game, &req);
        let mut placed: Vec<u8> = actions
            .iter()
            .flat_map(|action| match action {
                Action::Assign(hole) => hole.cards().to_vec(),
                other => panic!("expected assignment, got {other}"),
            })
            .map(|card| card.id())
            .collect();
        let mut dealt: Vec<u8> = deal.mine.iter().map(|card| card.id()).collect();
        placed.sort_unstable();
        dealt.sort_unstable();
        assert_eq!(placed, dealt);

        // Preflop: the small blind opens, or the big blind sees a limp.
        let preflop = match seat {
            Seat::SmallBlind => view(LegalActions::FOLD | LegalActions::CALL | LegalActions::RAISE, [1, 2], 0, &[]),
            Seat::BigBlind => view(LegalActions::CHECK | LegalActions::RAISE, [2, 2], 0, &[]),
        };
        let req = request(&deal, seat, Street::Preflop, [preflop.clone(), preflop.clone(), preflop]);
        let preflop_actions = check_request(&mut agent, &game, &req);

        // Flop on the boards still live, facing a bet on board 0.
        let flop_boards: [BoardView; 3] = std::array::from_fn(|i| {
            let community = &deal.community[i][..3];
            if preflop_actions[i] == Action::Fold {
                BoardView {
                    terminal: true,
                    ..view(LegalActions::CHECK, [0, 0], 0, community)
                }
            } else if i == 0 {
                view(LegalActions::FOLD | LegalActions::CALL | LegalActions::RAISE, [0, 4], 4, community)
            } else {
                view(LegalActions::CHECK | LegalActions::RAISE, [0, 0], 4, community)
            }
        });
        let req = request(&deal, seat, Street::Flop, flop_boards);
        let flop_actions = check_request(&mut agent, &game, &req);
        for (board, action) in flop_actions.iter().enumerate() {
            if preflop_actions[board] == Action::Fold {
                assert_eq!(*action, Action::Check, "terminal board {board}");
            }
        }

        // Boards we stayed in go to showdown.
        let boards: [BoardResult; 3] = std::array::from_fn(|i| {
            let folded = preflop_actions[i] == Action::Fold || flop_actions[i] == Action::Fold;
            BoardResult {
                hole: agent.allocation().expect("allocated this round").pairs[i],
                opp_hole: (!folded).then_some(deal.theirs[i]),
                community: if folded { deal.community[i][..3].to_vec() } else { deal.community[i].to_vec() },
            }
        });
        let outcome = RoundOutcome {
            street: Street::River,
            delta: 0,
            boards,
        };
        agent.handle_round_over(&game, &outcome);
        assert!(agent.allocation().is_none());
    }

    let summary = agent.model().summary();
    assert_eq!(summary.rounds, 40);
    assert!(agent.model().board_strength_ranking().is_some());
    assert!(agent.model().num_bet_samples() > 0);
    assert!(!agent.is_checkfolding());
}

#[test]
fn test_large_lead_folds_out_the_match() {
    let table = EquityTable::from_json_file(concat!(env!("CARGO_MANIFEST_DIR"), "/data/preflop_equity.json"))
        .expect("shipped table loads");
    let mut agent = Agent::with_seed(StrategyConfig::default().with_num_rounds(10), table, 1)
        .expect("default config is valid");
    let mut dealer = StdRng::seed_from_u64(5);

    for round_num in 9..=10u32 {
        let game = GameInfo {
            bankroll: 100,
            opp_bankroll: -100,
            game_clock: 60.0,
            round_num,
        };
        let deal = deal(&mut dealer);
        agent.handle_new_round(&game, &RoundStart { seat: Seat::SmallBlind, cards: deal.mine });
        assert!(agent.is_checkfolding());

        let open = view(LegalActions::FOLD | LegalActions::CALL | LegalActions::RAISE, [1, 2], 0, &[]);
        let req = request(&deal, Seat::SmallBlind, Street::Preflop, [open.clone(), open.clone(), open]);
        let actions = check_request(&mut agent, &game, &req);
        assert_eq!(actions, [Action::Fold; 3]);
    }
}
