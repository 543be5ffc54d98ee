use safe_bet::{
    OptionAuthority,
    Role,
    SafeBetConfig,
    SafeBetError,
    events::SafeBetEvent,
    options::BetOption,
    stop_gate::Phase,
    test_helpers::TestContext,
};

#[test]
fn add_bet_option__returns_sequential_ids() {
    let ctx = TestContext::new();
    // given
    let mut safe_bet = ctx.deploy();

    // when
    let team_a = safe_bet.add_bet_option(&ctx.owner(), "Team A").unwrap();
    let team_b = safe_bet.add_bet_option(&ctx.owner(), "Team B").unwrap();

    // then
    assert_eq!((team_a, team_b), (0, 1));
    let expected = vec![BetOption::new(0, "Team A"), BetOption::new(1, "Team B")];
    assert_eq!(safe_bet.list_bet_options(), expected);
    assert!(safe_bet.exists_bet_option_name("Team B"));
    assert!(safe_bet.exists_bet_option_id(1));
    assert!(!safe_bet.exists_bet_option_id(2));
    assert_eq!(safe_bet.total_amount_per_option(1), Some(0));
}

#[test]
fn add_bet_option__fails_for_non_owner() {
    let ctx = TestContext::new();
    // given
    let mut safe_bet = ctx.deploy_with_options(&["Team A"]);

    // when
    let result = safe_bet.add_bet_option(&ctx.alice(), "Team B");

    // then
    assert_eq!(
        result,
        Err(SafeBetError::Unauthorized {
            account: ctx.alice()
        })
    );
    assert_eq!(safe_bet.list_bet_options().len(), 1);
    assert!(!safe_bet.exists_bet_option_name("Team B"));
}

#[test]
fn add_bet_option__fails_for_duplicate_name() {
    let ctx = TestContext::new();
    // given
    let mut safe_bet = ctx.deploy_with_config(SafeBetConfig {
        option_authority: OptionAuthority::OwnerOrAdmin,
        ..SafeBetConfig::default()
    });
    safe_bet
        .grant_role(&ctx.owner(), Role::Admin, &ctx.admin())
        .unwrap();
    safe_bet.add_bet_option(&ctx.owner(), "Team A").unwrap();

    // when
    let by_owner = safe_bet.add_bet_option(&ctx.owner(), "Team A");
    let by_admin = safe_bet.add_bet_option(&ctx.admin(), "Team A");

    // then
    let expected = Err(SafeBetError::DuplicateOption {
        name: "Team A".to_string(),
    });
    assert_eq!(by_owner, expected);
    assert_eq!(by_admin, expected);
    assert_eq!(safe_bet.list_bet_options().len(), 1);
}

#[test]
fn add_bet_option__fails_after_stop() {
    let ctx = TestContext::new();
    // given
    let mut safe_bet = ctx.deploy_with_options(&["Team A"]);
    safe_bet.add_referee(&ctx.owner(), &ctx.referee()).unwrap();
    safe_bet.stop(&ctx.owner()).unwrap();

    // when
    let result = safe_bet.add_bet_option(&ctx.owner(), "Team B");

    // then
    assert_eq!(
        result,
        Err(SafeBetError::WrongPhase {
            expected: Phase::Active,
            actual: Phase::Stopped
        })
    );
    assert_eq!(safe_bet.list_bet_options().len(), 1);
}

#[test]
fn add_bet_option__role_check_precedes_phase_check() {
    let ctx = TestContext::new();
    // given
    let mut safe_bet = ctx.deploy();
    safe_bet.add_referee(&ctx.owner(), &ctx.referee()).unwrap();
    safe_bet.stop(&ctx.owner()).unwrap();

    // when
    let result = safe_bet.add_bet_option(&ctx.alice(), "Team A");

    // then
    assert_eq!(
        result,
        Err(SafeBetError::Unauthorized {
            account: ctx.alice()
        })
    );
}

#[test]
fn add_bet_option__emits_event_with_name_digest() {
    let ctx = TestContext::new();
    // given
    let mut safe_bet = ctx.deploy();
    safe_bet.take_events();

    // when
    safe_bet.add_bet_option(&ctx.owner(), "Team A").unwrap();

    // then
    let events = safe_bet.take_events();
    let expected = vec![SafeBetEvent::bet_option_added(&BetOption::new(0, "Team A"))];
    assert_eq!(events, expected);
    let SafeBetEvent::BetOptionAdded(added) = &events[0] else {
        panic!("expected BetOptionAdded, got {:?}", events[0]);
    };
    assert_eq!(added.name_digest.len(), 64);
}
