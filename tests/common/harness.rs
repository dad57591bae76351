//! Shared harness for integration tests.
//!
//! Bundles an engine wired to a mock clock, in-memory stores, and a
//! failure-injectable settlement gateway, plus helpers for walking an
//! auction through its lifecycle.

use std::sync::Arc;

use gallery_market::mocks::{FlakySettlementGateway, MockClock};
use gallery_market::{
    AuctionEngine, AuctionId, AuctionPhase, AuctionTerms, EngineConfig, MemoryBidLedger,
    MemoryStore, ReviewDecision, UserId,
};

pub type TestEngine =
    AuctionEngine<MemoryStore, MemoryBidLedger, FlakySettlementGateway, MockClock>;

/// Engine plus handles onto every collaborator.
#[allow(dead_code)]
pub struct MarketHarness {
    pub engine: Arc<TestEngine>,
    pub clock: MockClock,
    pub store: MemoryStore,
    pub ledger: MemoryBidLedger,
    pub settlement: FlakySettlementGateway,
}

#[allow(dead_code)]
impl MarketHarness {
    pub fn new(now: u64) -> Self {
        Self::with_config(now, EngineConfig::default())
    }

    pub fn with_config(now: u64, config: EngineConfig) -> Self {
        init_logging();
        let clock = MockClock::new(now);
        let store = MemoryStore::new();
        let ledger = MemoryBidLedger::new();
        let settlement = FlakySettlementGateway::new();
        let engine = AuctionEngine::with_config(
            store.clone(),
            ledger.clone(),
            settlement.clone(),
            clock.clone(),
            config,
        );
        Self {
            engine: Arc::new(engine),
            clock,
            store,
            ledger,
            settlement,
        }
    }

    /// Terms relative to the harness clock: sign-up closes in 30 minutes,
    /// bidding runs from +1h to +2h, minimum bid 5_000.
    pub fn default_terms(&self) -> AuctionTerms {
        let now = self.now();
        AuctionTerms {
            start_time: now + 3_600,
            scheduled_end_time: now + 7_200,
            minimum_bid: 5_000,
            signup_offset_minutes: 30,
        }
    }

    pub fn now(&self) -> u64 {
        use gallery_market::Clock;
        self.clock.now_unix()
    }

    /// Create an artwork and open its auction for sign-up.
    /// Returns (auction, owner).
    pub async fn open_auction(&self) -> (AuctionId, UserId) {
        let owner = UserId::new();
        let artwork = self
            .engine
            .create_artwork(owner, "Harness Piece")
            .await
            .expect("create artwork");
        let configured = self
            .engine
            .configure_auction(artwork.id, owner, self.default_terms())
            .await
            .expect("configure auction");
        assert_eq!(configured.phase, AuctionPhase::SignupOpen);
        (artwork.id, owner)
    }

    /// Register a fresh user and have the owner approve them.
    pub async fn approved_bidder(&self, auction: AuctionId, owner: UserId) -> UserId {
        let bidder = UserId::new();
        self.engine
            .register_for_auction(auction, bidder)
            .await
            .expect("register");
        self.engine
            .review_registration(auction, bidder, ReviewDecision::Approve, owner)
            .await
            .expect("approve");
        bidder
    }

    /// Advance the clock to the auction start and confirm it went live.
    pub async fn go_live(&self, auction: AuctionId) {
        let start = self
            .engine
            .get_artwork(auction)
            .await
            .expect("load artwork")
            .start_time
            .expect("start time configured");
        self.clock.set(start);
        assert_eq!(
            self.engine.get_phase(auction).await.expect("refresh phase"),
            AuctionPhase::Live
        );
    }

    /// Advance the clock to the auction's effective end.
    pub async fn expire(&self, auction: AuctionId) {
        let end = self
            .engine
            .get_artwork(auction)
            .await
            .expect("load artwork")
            .scheduled_end_time
            .expect("end time configured");
        self.clock.set(end);
    }
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
    // Several tests race to install the subscriber; only the first wins.
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
