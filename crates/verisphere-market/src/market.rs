//! The market facade wiring graph, ledger, and scoring together

use crate::{
    ConfigError, FixedActivity, FixedFee, FixedRateBand, ManualClock, MarketConfig, MarketError,
    PostRegistry, SystemPeriodClock, Vault,
};
use verisphere_domain::traits::{FeePolicy, PeriodClock, PostDirectory};
use verisphere_domain::{AccountId, Link, PostId, PostKind, Score, Side};
use verisphere_graph::{IncomingEdge, LinkGraph, OutgoingEdge};
use verisphere_ledger::{Settlement, StakeLedger};
use verisphere_score::{ScoreConfig, ScoreEngine};

/// The truth market: one typed call surface over all three engines
///
/// Owns the registry, graph, ledger, vault, policies, and period clock.
/// Mutating calls are validate-then-commit: any failure leaves every
/// component untouched. Reads are pure functions of committed state.
pub struct Market<K: PeriodClock> {
    registry: PostRegistry,
    graph: LinkGraph,
    ledger: StakeLedger,
    vault: Vault,
    activity: FixedActivity,
    fee: FixedFee,
    rates: FixedRateBand,
    score_config: ScoreConfig,
    clock: K,
}

impl Market<SystemPeriodClock> {
    /// A market on the wall clock, period zero starting now
    pub fn new(config: MarketConfig) -> Result<Self, ConfigError> {
        let clock = SystemPeriodClock::new(config.period_secs);
        Self::with_clock(config, clock)
    }
}

impl Market<ManualClock> {
    /// A market on a hand-driven clock, for deterministic runs
    pub fn deterministic(config: MarketConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, ManualClock::default())
    }
}

impl<K: PeriodClock> Market<K> {
    /// A market over an explicit period clock
    pub fn with_clock(config: MarketConfig, clock: K) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            registry: PostRegistry::default(),
            graph: LinkGraph::new(config.graph_config()),
            ledger: StakeLedger::new(config.ledger_config()),
            vault: Vault::new(),
            activity: FixedActivity::new(config.activity_threshold),
            fee: FixedFee::new(config.posting_fee),
            rates: FixedRateBand::new(config.min_annual_rate, config.max_annual_rate),
            score_config: config.score_config(),
            clock,
        })
    }

    /// Publish a claim, charging the posting fee as its opening support lot
    pub fn create_claim(&mut self, author: AccountId) -> Result<PostId, MarketError> {
        self.check_fee_funds(author)?;

        let id = self.registry.allocate();
        self.registry.record_claim(id, author);
        self.charge_fee(author, id)?;

        tracing::debug!(%id, %author, "claim created");
        Ok(id)
    }

    /// Publish a link between two claims
    ///
    /// The edge is installed before any fee is charged, so a rejected edge
    /// (cycle, traversal budget) costs the author nothing.
    pub fn create_link(
        &mut self,
        author: AccountId,
        independent: PostId,
        dependent: PostId,
        challenge: bool,
    ) -> Result<PostId, MarketError> {
        self.require_claim(independent)?;
        self.require_claim(dependent)?;
        self.check_fee_funds(author)?;

        let id = self.registry.allocate();
        self.graph.add_edge(independent, dependent, id, challenge)?;
        self.registry
            .record_link(id, author, Link::new(independent, dependent, challenge));
        self.charge_fee(author, id)?;

        tracing::debug!(%id, %author, %independent, %dependent, challenge, "link created");
        Ok(id)
    }

    /// Stake on one side of a post
    pub fn stake(
        &mut self,
        staker: AccountId,
        post: PostId,
        side: Side,
        amount: u64,
    ) -> Result<(), MarketError> {
        self.require_post(post)?;
        let now = self.clock.current_period();
        self.ledger
            .stake(&mut self.vault, staker, post, side, amount, now)?;
        Ok(())
    }

    /// Withdraw the caller's stake from one side of a post
    pub fn withdraw(
        &mut self,
        staker: AccountId,
        post: PostId,
        side: Side,
        amount: u64,
        latest_first: bool,
    ) -> Result<(), MarketError> {
        self.require_post(post)?;
        self.ledger
            .withdraw(&mut self.vault, staker, post, side, amount, latest_first)?;
        Ok(())
    }

    /// Settle one post up to the current period
    pub fn update_post(&mut self, post: PostId) -> Result<Settlement, MarketError> {
        self.require_post(post)?;
        let now = self.clock.current_period();
        let settlement =
            self.ledger
                .update_post(&mut self.vault, post, &self.activity, &self.rates, now)?;
        Ok(settlement)
    }

    /// Settle every post with a stake book
    pub fn settle_all(&mut self) -> Result<Vec<Settlement>, MarketError> {
        let now = self.clock.current_period();
        let posts: Vec<PostId> = self.ledger.posts().collect();

        let mut settlements = Vec::with_capacity(posts.len());
        for post in posts {
            settlements.push(self.ledger.update_post(
                &mut self.vault,
                post,
                &self.activity,
                &self.rates,
                now,
            )?);
        }
        Ok(settlements)
    }

    /// (support, challenge) totals for a post
    pub fn post_totals(&self, post: PostId) -> (u64, u64) {
        self.ledger.totals(post)
    }

    /// Outgoing edges of a claim, in insertion order
    pub fn outgoing(&self, claim: PostId) -> &[OutgoingEdge] {
        self.graph.outgoing(claim)
    }

    /// Incoming edges of a claim, in insertion order
    pub fn incoming(&self, claim: PostId) -> &[IncomingEdge] {
        self.graph.incoming(claim)
    }

    /// Local-only credibility of a post
    pub fn base_score(&self, post: PostId) -> Result<Score, MarketError> {
        Ok(self.engine().base_score(post)?)
    }

    /// DAG-propagated credibility of a claim
    pub fn effective_score(&self, claim: PostId) -> Result<Score, MarketError> {
        Ok(self.engine().effective_score(claim)?)
    }

    /// The custody vault
    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    /// Mutable vault access, for funding accounts
    pub fn vault_mut(&mut self) -> &mut Vault {
        &mut self.vault
    }

    /// The post registry
    pub fn registry(&self) -> &PostRegistry {
        &self.registry
    }

    /// The stake ledger
    pub fn ledger(&self) -> &StakeLedger {
        &self.ledger
    }

    /// The period clock
    pub fn clock(&self) -> &K {
        &self.clock
    }

    /// Mutable clock access, for hand-driven clocks
    pub fn clock_mut(&mut self) -> &mut K {
        &mut self.clock
    }

    /// The current settlement period
    pub fn current_period(&self) -> u64 {
        self.clock.current_period()
    }

    fn engine(&self) -> ScoreEngine<'_, PostRegistry, FixedActivity, FixedFee> {
        ScoreEngine::new(
            &self.graph,
            &self.ledger,
            &self.registry,
            &self.activity,
            &self.fee,
            self.score_config.clone(),
        )
    }

    fn require_post(&self, post: PostId) -> Result<(), MarketError> {
        self.registry
            .kind(post)
            .map(|_| ())
            .ok_or(MarketError::UnknownPost(post))
    }

    fn require_claim(&self, post: PostId) -> Result<(), MarketError> {
        match self.registry.kind(post) {
            Some(PostKind::Claim) => Ok(()),
            Some(PostKind::Link(_)) => Err(MarketError::NotAClaim(post)),
            None => Err(MarketError::UnknownPost(post)),
        }
    }

    fn check_fee_funds(&self, author: AccountId) -> Result<(), MarketError> {
        let fee = self.fee.fee_amount();
        let available = self.vault.balance(author);
        if available < fee {
            return Err(MarketError::InsufficientFeeFunds {
                account: author,
                available,
                fee,
            });
        }
        Ok(())
    }

    /// Auto-stake the posting fee as the post's opening support lot
    fn charge_fee(&mut self, author: AccountId, post: PostId) -> Result<(), MarketError> {
        let fee = self.fee.fee_amount();
        if fee == 0 {
            return Ok(());
        }
        let now = self.clock.current_period();
        self.ledger
            .stake(&mut self.vault, author, post, Side::Support, fee, now)?;
        Ok(())
    }
}
