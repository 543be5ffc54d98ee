use safe_bet::{
    SafeBetError,
    TokenService,
    error::TransferFailure,
    events::{
        BetPlacedEvent,
        SafeBetEvent,
    },
    ledger::Bet,
    snapshot::AccountSnapshot,
    test_helpers::{
        STARTING_BALANCE,
        TestContext,
        account,
    },
    token::{
        InjectedFailure,
        TokenError,
    },
};

#[test]
fn make_bet__adds_bet_to_ledger() {
    let ctx = TestContext::new();
    // given
    let mut safe_bet = ctx.deploy_with_options(&["Team A", "Team B"]);

    // when
    let placed = safe_bet.make_bet(&ctx.alice(), 100, 1).unwrap();

    // then
    assert!(placed);
    let expected = vec![Bet {
        bettor: ctx.alice(),
        option_id: 1,
        amount: 100,
    }];
    assert_eq!(safe_bet.bets(), expected.as_slice());
    assert_eq!(safe_bet.total_amount_per_option(1), Some(100));
    assert_eq!(safe_bet.total_amount_per_option(0), Some(0));
    assert_eq!(safe_bet.total_amount(), 100);
}

#[test]
fn make_bet__moves_funds_into_custody() {
    let ctx = TestContext::new();
    // given
    let mut safe_bet = ctx.deploy_with_options(&["Team A"]);

    // when
    safe_bet.make_bet(&ctx.alice(), 250, 0).unwrap();
    safe_bet.make_bet(&ctx.bob(), 50, 0).unwrap();

    // then
    assert_eq!(safe_bet.token_balance(), 300);
    assert_eq!(
        safe_bet.token().balance_of(&ctx.alice()),
        STARTING_BALANCE - 250
    );
    assert_eq!(safe_bet.token().balance_of(&ctx.bob()), STARTING_BALANCE - 50);
}

#[test]
fn make_bet__fails_for_zero_amount() {
    let ctx = TestContext::new();
    // given
    let mut safe_bet = ctx.deploy_with_options(&["Team A"]);

    // when
    let result = safe_bet.make_bet(&ctx.alice(), 0, 0);

    // then
    assert_eq!(result, Err(SafeBetError::NonPositiveAmount));
    assert!(safe_bet.bets().is_empty());
    assert_eq!(safe_bet.total_amount(), 0);
    assert_eq!(safe_bet.token_balance(), 0);
}

#[test]
fn make_bet__fails_for_unknown_option() {
    let ctx = TestContext::new();
    // given
    let mut safe_bet = ctx.deploy_with_options(&["Team A"]);

    // when
    let result = safe_bet.make_bet(&ctx.alice(), 10, 1);

    // then
    assert_eq!(result, Err(SafeBetError::UnknownOption { option_id: 1 }));
    assert!(safe_bet.bets().is_empty());
    assert_eq!(safe_bet.total_amount_per_option(1), None);
}

#[test]
fn make_bet__fails_if_funds_not_approved() {
    let ctx = TestContext::new();
    // given
    let mut safe_bet = ctx.deploy_with_options(&["Team A"]);
    let carol = account(7);
    safe_bet.token_mut().mint(&carol, 1_000);

    // when
    let result = safe_bet.make_bet(&carol, 10, 0);

    // then
    assert_eq!(
        result,
        Err(SafeBetError::TransferFailed {
            amount: 10,
            reason: TransferFailure::Raised(TokenError::InsufficientAllowance {
                requested: 10,
                available: 0
            })
        })
    );
    assert!(safe_bet.bets().is_empty());
    assert_eq!(safe_bet.token().balance_of(&carol), 1_000);
}

#[test]
fn make_bet__rejected_transfer_rolls_back_everything() {
    let ctx = TestContext::new();
    // given
    let mut safe_bet = ctx.deploy_with_options(&["Team A"]);
    safe_bet.make_bet(&ctx.alice(), 10, 0).unwrap();
    let events_before = safe_bet.events().len();
    safe_bet
        .token_mut()
        .inject_failure(Some(InjectedFailure::ReturnFalse));

    // when
    let result = safe_bet.make_bet(&ctx.alice(), 90, 0);

    // then
    assert_eq!(
        result,
        Err(SafeBetError::TransferFailed {
            amount: 90,
            reason: TransferFailure::Rejected
        })
    );
    assert_eq!(safe_bet.bets().len(), 1);
    assert_eq!(safe_bet.total_amount_per_option(0), Some(10));
    assert_eq!(safe_bet.total_amount(), 10);
    assert_eq!(safe_bet.token_balance(), 10);
    assert_eq!(safe_bet.events().len(), events_before);
}

#[test]
fn make_bet__ledger_stays_usable_after_failure() {
    let ctx = TestContext::new();
    // given
    let mut safe_bet = ctx.deploy_with_options(&["Team A"]);
    safe_bet
        .token_mut()
        .inject_failure(Some(InjectedFailure::Raise(TokenError::Unavailable(
            "maintenance".to_string(),
        ))));
    assert!(safe_bet.make_bet(&ctx.alice(), 10, 0).is_err());
    safe_bet.token_mut().inject_failure(None);

    // when
    let result = safe_bet.make_bet(&ctx.alice(), 10, 0);

    // then
    assert_eq!(result, Ok(true));
    assert_eq!(safe_bet.total_amount(), 10);
}

#[test]
fn make_bet__fails_when_totals_would_overflow() {
    let ctx = TestContext::new();
    // given
    let mut safe_bet = ctx.deploy_with_options(&["Team A"]);
    let whale = account(8);
    let custody = ctx.custody();
    safe_bet.token_mut().mint(&whale, u64::MAX);
    safe_bet.token_mut().approve(&whale, &custody, u64::MAX);
    safe_bet.make_bet(&whale, u64::MAX - 5, 0).unwrap();

    // when
    let result = safe_bet.make_bet(&ctx.alice(), 10, 0);

    // then
    assert_eq!(result, Err(SafeBetError::AmountOverflow { amount: 10 }));
    assert_eq!(safe_bet.total_amount(), u64::MAX - 5);
    assert_eq!(safe_bet.token().balance_of(&ctx.alice()), STARTING_BALANCE);
}

#[test]
fn make_bet__emits_bet_placed_event() {
    let ctx = TestContext::new();
    // given
    let mut safe_bet = ctx.deploy_with_options(&["Team A", "Team B"]);
    safe_bet.make_bet(&ctx.bob(), 5, 0).unwrap();
    safe_bet.take_events();

    // when
    safe_bet.make_bet(&ctx.alice(), 20, 0).unwrap();

    // then
    let expected = vec![SafeBetEvent::BetPlaced(BetPlacedEvent {
        bet_index: 1,
        bettor: ctx.alice(),
        option_id: 0,
        amount: 20,
        option_total: 25,
        total_amount: 25,
    })];
    assert_eq!(safe_bet.take_events(), expected);
}

#[test]
fn account_snapshot__groups_bets_per_option() {
    let ctx = TestContext::new();
    // given
    let mut safe_bet = ctx.deploy_with_options(&["Team A", "Team B"]);
    safe_bet.make_bet(&ctx.alice(), 10, 1).unwrap();
    safe_bet.make_bet(&ctx.bob(), 99, 1).unwrap();
    safe_bet.make_bet(&ctx.alice(), 5, 0).unwrap();
    safe_bet.make_bet(&ctx.alice(), 7, 1).unwrap();

    // when
    let snapshot = safe_bet.account_snapshot(&ctx.alice());

    // then
    let expected = AccountSnapshot {
        total_bet: 22,
        bet_count: 3,
        option_bets: vec![(0, 5), (1, 17)],
    };
    assert_eq!(snapshot, expected);
    assert_eq!(
        safe_bet.account_snapshot(&ctx.referee()),
        AccountSnapshot::default()
    );
}
