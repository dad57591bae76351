//! User-facing rejections across the lifecycle, exercised end to end.

use crate::common::harness::MarketHarness;
use gallery_market::{AuctionPhase, MarketError, ReviewDecision, UserId};

#[tokio::test]
async fn owner_cannot_bid_on_own_auction() {
    let harness = MarketHarness::new(1_000);
    let (auction, owner) = harness.open_auction().await;
    harness.approved_bidder(auction, owner).await;
    harness.go_live(auction).await;

    // Rejected regardless of registration status: owners can never bid.
    assert!(matches!(
        harness.engine.place_bid(auction, owner, 10_000).await,
        Err(MarketError::NotEligible)
    ));
}

#[tokio::test]
async fn registration_is_single_shot_and_window_bound() {
    let harness = MarketHarness::new(1_000);
    let (auction, owner) = harness.open_auction().await;
    let user = UserId::new();

    harness.engine.register_for_auction(auction, user).await.unwrap();
    assert!(matches!(
        harness.engine.register_for_auction(auction, user).await,
        Err(MarketError::DuplicateRegistration)
    ));
    assert!(matches!(
        harness.engine.register_for_auction(auction, owner).await,
        Err(MarketError::SelfRegistration)
    ));

    // Once the window closes, new users are turned away.
    harness.clock.set(2_800);
    assert!(matches!(
        harness.engine.register_for_auction(auction, UserId::new()).await,
        Err(MarketError::SignupClosed)
    ));
}

#[tokio::test]
async fn pending_and_rejected_registrants_cannot_bid() {
    let harness = MarketHarness::new(1_000);
    let (auction, owner) = harness.open_auction().await;

    let pending = UserId::new();
    harness
        .engine
        .register_for_auction(auction, pending)
        .await
        .unwrap();

    let rejected = UserId::new();
    harness
        .engine
        .register_for_auction(auction, rejected)
        .await
        .unwrap();
    harness
        .engine
        .review_registration(auction, rejected, ReviewDecision::Reject, owner)
        .await
        .unwrap();

    harness.go_live(auction).await;

    for user in [pending, rejected, UserId::new()] {
        assert!(matches!(
            harness.engine.place_bid(auction, user, 6_000).await,
            Err(MarketError::NotEligible)
        ));
    }
}

#[tokio::test]
async fn bidding_outside_live_phase_is_rejected() {
    let harness = MarketHarness::new(1_000);
    let (auction, owner) = harness.open_auction().await;
    let bidder = harness.approved_bidder(auction, owner).await;

    // During sign-up.
    assert!(matches!(
        harness.engine.place_bid(auction, bidder, 6_000).await,
        Err(MarketError::NotLive)
    ));

    // Between sign-up close and start.
    harness.clock.set(3_000);
    assert_eq!(
        harness.engine.get_phase(auction).await.unwrap(),
        AuctionPhase::AwaitingStart
    );
    assert!(matches!(
        harness.engine.place_bid(auction, bidder, 6_000).await,
        Err(MarketError::NotLive)
    ));

    // After conclusion.
    harness.go_live(auction).await;
    harness.expire(auction).await;
    harness.engine.finalize_if_due(auction).await.unwrap();
    assert!(matches!(
        harness.engine.place_bid(auction, bidder, 6_000).await,
        Err(MarketError::NotLive)
    ));
}

#[tokio::test]
async fn operations_on_unknown_artwork_fail() {
    let harness = MarketHarness::new(1_000);
    let ghost = gallery_market::AuctionId::new();

    assert!(matches!(
        harness.engine.get_phase(ghost).await,
        Err(MarketError::NotFound(_))
    ));
    assert!(matches!(
        harness.engine.register_for_auction(ghost, UserId::new()).await,
        Err(MarketError::NotFound(_))
    ));
    assert!(matches!(
        harness.engine.place_bid(ghost, UserId::new(), 5_000).await,
        Err(MarketError::NotFound(_))
    ));
    assert!(matches!(
        harness.engine.finalize_if_due(ghost).await,
        Err(MarketError::NotFound(_))
    ));
}

#[tokio::test]
async fn review_by_non_owner_is_rejected() {
    let harness = MarketHarness::new(1_000);
    let (auction, _owner) = harness.open_auction().await;
    let user = UserId::new();
    harness.engine.register_for_auction(auction, user).await.unwrap();

    assert!(matches!(
        harness
            .engine
            .review_registration(auction, user, ReviewDecision::Approve, UserId::new())
            .await,
        Err(MarketError::NotOwner)
    ));
}

#[tokio::test]
async fn concluded_auction_rejects_review_and_cancel() {
    let harness = MarketHarness::new(1_000);
    let (auction, owner) = harness.open_auction().await;
    let user = UserId::new();
    harness.engine.register_for_auction(auction, user).await.unwrap();

    harness.go_live(auction).await;
    harness.expire(auction).await;
    harness.engine.finalize_if_due(auction).await.unwrap();

    assert!(matches!(
        harness
            .engine
            .review_registration(auction, user, ReviewDecision::Approve, owner)
            .await,
        Err(MarketError::AlreadyConcluded)
    ));
    assert!(matches!(
        harness.engine.cancel_auction(auction, owner).await,
        Err(MarketError::AlreadyConcluded)
    ));
}
