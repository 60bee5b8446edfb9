//! Score computation over ledger and graph state

use crate::{ScoreConfig, ScoreError};
use verisphere_domain::traits::{ActivityPolicy, FeePolicy, PostDirectory};
use verisphere_domain::{PostId, PostKind, Score, SCALE};
use verisphere_graph::LinkGraph;
use verisphere_ledger::StakeLedger;

/// A borrowing score evaluator
///
/// Constructed per read over the committed graph and ledger state plus the
/// current policies; both score reads are pure. Cheap to build, holds no
/// state of its own beyond configuration.
pub struct ScoreEngine<'a, D, A, F>
where
    D: PostDirectory,
    A: ActivityPolicy,
    F: FeePolicy,
{
    graph: &'a LinkGraph,
    ledger: &'a StakeLedger,
    directory: &'a D,
    activity: &'a A,
    fee: &'a F,
    config: ScoreConfig,
}

impl<'a, D, A, F> ScoreEngine<'a, D, A, F>
where
    D: PostDirectory,
    A: ActivityPolicy,
    F: FeePolicy,
{
    /// Create an engine over the given state and policies
    pub fn new(
        graph: &'a LinkGraph,
        ledger: &'a StakeLedger,
        directory: &'a D,
        activity: &'a A,
        fee: &'a F,
        config: ScoreConfig,
    ) -> Self {
        Self {
            graph,
            ledger,
            directory,
            activity,
            fee,
            config,
        }
    }

    /// Local-only credibility of a post
    ///
    /// With support A, challenge D, combined T and posting fee `fee`: a
    /// post with `T < fee` is inactive and scores neutral. Otherwise the
    /// fee is injected as virtual support and the score is
    /// `2·(A+fee)/(A+fee+D) − 1`, clamped into the score range.
    pub fn base_score(&self, post: PostId) -> Result<Score, ScoreError> {
        self.directory
            .kind(post)
            .ok_or(ScoreError::UnknownPost(post))?;
        Ok(self.local_score(post))
    }

    /// DAG-propagated credibility of a claim
    ///
    /// Starts from the claim's base score and adds one contribution per
    /// incoming link: the link's own score (negated for challenge links)
    /// scaled by the parent's effective score and by the link's share of
    /// the parent's total exported influence. Claims gated out by the
    /// activity policy are neutral and propagate nothing. Recursion is
    /// bounded by [`ScoreConfig::max_depth`].
    pub fn effective_score(&self, claim: PostId) -> Result<Score, ScoreError> {
        match self
            .directory
            .kind(claim)
            .ok_or(ScoreError::UnknownPost(claim))?
        {
            PostKind::Claim => Ok(self.propagate(claim, self.config.max_depth)),
            PostKind::Link(_) => Err(ScoreError::NotAClaim(claim)),
        }
    }

    fn local_score(&self, post: PostId) -> Score {
        let (support, challenge) = self.ledger.totals(post);
        let total = support + challenge;
        let fee = self.fee.fee_amount();

        if total < fee {
            return Score::NEUTRAL;
        }

        let support_eff = support as i128 + fee as i128;
        let total_eff = support_eff + challenge as i128;
        if total_eff == 0 {
            return Score::NEUTRAL;
        }

        Score::saturating(2 * support_eff * SCALE as i128 / total_eff - SCALE as i128)
    }

    fn propagate(&self, claim: PostId, depth: u32) -> Score {
        if !self.claim_active(claim) {
            return Score::NEUTRAL;
        }

        let local = self.local_score(claim);
        if depth == 0 {
            return local;
        }

        let mut acc = local.raw() as i128;
        for edge in self.graph.incoming(claim) {
            if !self.claim_active(edge.from) || !self.link_active(edge.link) {
                continue;
            }

            let parent_score = self.propagate(edge.from, depth - 1);
            if parent_score.is_neutral() {
                continue;
            }

            // Mass-conservation denominator: the parent's influence is
            // split across its active outgoing links by their stake.
            let exported = self.exported_total(edge.from);
            if exported == 0 {
                continue;
            }
            let link_total = self.ledger.combined_total(edge.link) as i128;

            let mut link_score = self.local_score(edge.link).raw() as i128;
            if edge.challenge {
                link_score = -link_score;
            }

            acc += link_score * parent_score.raw() as i128 / SCALE as i128 * link_total
                / exported as i128;
        }

        Score::saturating(acc)
    }

    /// A claim participates once the activity policy admits its stake
    fn claim_active(&self, claim: PostId) -> bool {
        self.activity.is_active(self.ledger.combined_total(claim))
    }

    /// A link is active once its combined stake covers the posting fee
    fn link_active(&self, link: PostId) -> bool {
        self.ledger.combined_total(link) >= self.fee.fee_amount()
    }

    /// Combined total of the parent's active outgoing links
    fn exported_total(&self, parent: PostId) -> u64 {
        self.graph
            .outgoing(parent)
            .iter()
            .filter(|edge| self.link_active(edge.link))
            .map(|edge| self.ledger.combined_total(edge.link))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use verisphere_domain::{AccountId, Link, Side};
    use verisphere_ledger::testkit::TestVault;
    use verisphere_ledger::LedgerConfig;

    struct Threshold(u64);
    impl ActivityPolicy for Threshold {
        fn is_active(&self, total_stake: u64) -> bool {
            total_stake >= self.0
        }
    }

    struct Fee(u64);
    impl FeePolicy for Fee {
        fn fee_amount(&self) -> u64 {
            self.0
        }
    }

    #[derive(Default)]
    struct MemoryDirectory {
        posts: HashMap<PostId, PostKind>,
    }

    impl MemoryDirectory {
        fn claim(&mut self, id: u64) -> PostId {
            let post = PostId::from_value(id);
            self.posts.insert(post, PostKind::Claim);
            post
        }

        fn link(&mut self, id: u64, from: PostId, to: PostId, challenge: bool) -> PostId {
            let post = PostId::from_value(id);
            self.posts
                .insert(post, PostKind::Link(Link::new(from, to, challenge)));
            post
        }
    }

    impl PostDirectory for MemoryDirectory {
        fn kind(&self, post: PostId) -> Option<PostKind> {
            self.posts.get(&post).copied()
        }
    }

    struct Fixture {
        graph: LinkGraph,
        ledger: StakeLedger,
        directory: MemoryDirectory,
        vault: TestVault,
    }

    impl Fixture {
        fn new() -> Self {
            let whale = AccountId::from_value(0);
            Self {
                graph: LinkGraph::default(),
                ledger: StakeLedger::new(LedgerConfig::default()),
                directory: MemoryDirectory::default(),
                vault: TestVault::with_balance(whale, u64::MAX / 2),
            }
        }

        fn stake(&mut self, post: PostId, side: Side, amount: u64) {
            self.ledger
                .stake(&mut self.vault, AccountId::from_value(0), post, side, amount, 0)
                .unwrap();
        }

        fn add_link(&mut self, id: u64, from: PostId, to: PostId, challenge: bool, stake: u64) -> PostId {
            let link = self.directory.link(id, from, to, challenge);
            self.graph.add_edge(from, to, link, challenge).unwrap();
            if stake > 0 {
                self.stake(link, Side::Support, stake);
            }
            link
        }

        fn engine<'a>(
            &'a self,
            activity: &'a Threshold,
            fee: &'a Fee,
        ) -> ScoreEngine<'a, MemoryDirectory, Threshold, Fee> {
            ScoreEngine::new(
                &self.graph,
                &self.ledger,
                &self.directory,
                activity,
                fee,
                ScoreConfig::default(),
            )
        }
    }

    #[test]
    fn test_base_score_neutral_below_fee() {
        let mut fx = Fixture::new();
        let a = fx.directory.claim(1);
        fx.stake(a, Side::Support, 30);

        let activity = Threshold(0);
        let fee = Fee(50);
        let engine = fx.engine(&activity, &fee);

        assert_eq!(engine.base_score(a).unwrap(), Score::NEUTRAL);
    }

    #[test]
    fn test_base_score_pure_support_saturates() {
        // Support 300, challenge 0, fee 50: pure support clamps to +1
        let mut fx = Fixture::new();
        let a = fx.directory.claim(1);
        fx.stake(a, Side::Support, 300);

        let activity = Threshold(0);
        let fee = Fee(50);
        let engine = fx.engine(&activity, &fee);

        assert_eq!(engine.base_score(a).unwrap(), Score::MAX);
    }

    #[test]
    fn test_base_score_mixed_sides() {
        let mut fx = Fixture::new();
        let a = fx.directory.claim(1);
        fx.stake(a, Side::Support, 300);
        fx.stake(a, Side::Challenge, 350);

        let activity = Threshold(0);
        let fee = Fee(50);
        let engine = fx.engine(&activity, &fee);

        // A_eff = 350, T_eff = 700: perfectly balanced after fee injection
        assert_eq!(engine.base_score(a).unwrap(), Score::NEUTRAL);
    }

    #[test]
    fn test_base_score_unknown_post() {
        let fx = Fixture::new();
        let activity = Threshold(0);
        let fee = Fee(50);
        let engine = fx.engine(&activity, &fee);

        assert_eq!(
            engine.base_score(PostId::from_value(99)),
            Err(ScoreError::UnknownPost(PostId::from_value(99)))
        );
    }

    #[test]
    fn test_effective_score_rejects_links() {
        let mut fx = Fixture::new();
        let a = fx.directory.claim(1);
        let b = fx.directory.claim(2);
        let link = fx.add_link(10, a, b, false, 100);

        let activity = Threshold(0);
        let fee = Fee(0);
        let engine = fx.engine(&activity, &fee);

        assert_eq!(
            engine.effective_score(link),
            Err(ScoreError::NotAClaim(link))
        );
    }

    #[test]
    fn test_inactive_claim_blocks_propagation() {
        // Strong A, staked link A->B, but B itself has no
        // stake: activity gating short-circuits the upstream influence.
        let mut fx = Fixture::new();
        let a = fx.directory.claim(1);
        let b = fx.directory.claim(2);
        fx.stake(a, Side::Support, 300);
        fx.add_link(10, a, b, false, 200);

        let activity = Threshold(100);
        let fee = Fee(50);
        let engine = fx.engine(&activity, &fee);

        assert_eq!(engine.effective_score(b).unwrap(), Score::NEUTRAL);
    }

    #[test]
    fn test_support_chain_propagates_full_strength() {
        let mut fx = Fixture::new();
        let a = fx.directory.claim(1);
        let b = fx.directory.claim(2);
        let c = fx.directory.claim(3);
        fx.stake(a, Side::Support, 300);
        fx.stake(b, Side::Support, 100);
        fx.stake(c, Side::Support, 100);
        fx.add_link(10, a, b, false, 400);
        fx.add_link(11, b, c, false, 400);

        let activity = Threshold(0);
        let fee = Fee(0);
        let engine = fx.engine(&activity, &fee);

        // Everything fully supported: every score saturates at +1
        assert_eq!(engine.effective_score(a).unwrap(), Score::MAX);
        assert_eq!(engine.effective_score(b).unwrap(), Score::MAX);
        assert_eq!(engine.effective_score(c).unwrap(), Score::MAX);
    }

    #[test]
    fn test_flipping_root_decreases_downstream() {
        // Chain A -> B -> C, links staked 400 support each;
        // flipping A from 300 support to 1200 challenge must strictly
        // decrease C's effective score, staying in range throughout.
        let activity = Threshold(0);
        let fee = Fee(0);

        let mut before = Fixture::new();
        let a = before.directory.claim(1);
        let b = before.directory.claim(2);
        let c = before.directory.claim(3);
        before.stake(a, Side::Support, 300);
        for claim in [b, c] {
            before.stake(claim, Side::Support, 100);
            before.stake(claim, Side::Challenge, 100);
        }
        before.add_link(10, a, b, false, 400);
        before.add_link(11, b, c, false, 400);

        let mut after = Fixture::new();
        let a2 = after.directory.claim(1);
        let b2 = after.directory.claim(2);
        let c2 = after.directory.claim(3);
        after.stake(a2, Side::Challenge, 1200);
        for claim in [b2, c2] {
            after.stake(claim, Side::Support, 100);
            after.stake(claim, Side::Challenge, 100);
        }
        after.add_link(10, a2, b2, false, 400);
        after.add_link(11, b2, c2, false, 400);

        let engine_before = before.engine(&activity, &fee);
        let engine_after = after.engine(&activity, &fee);

        let c_before = engine_before.effective_score(c).unwrap();
        let c_after = engine_after.effective_score(c2).unwrap();

        assert!(c_after < c_before);
        for score in [c_before, c_after] {
            assert!(score >= Score::MIN && score <= Score::MAX);
        }
    }

    #[test]
    fn test_challenge_link_negates_influence() {
        let mut fx = Fixture::new();
        let a = fx.directory.claim(1);
        let b = fx.directory.claim(2);
        fx.stake(a, Side::Support, 500);
        fx.stake(b, Side::Support, 100);
        fx.stake(b, Side::Challenge, 100);
        fx.add_link(10, a, b, true, 400);

        let activity = Threshold(0);
        let fee = Fee(0);
        let engine = fx.engine(&activity, &fee);

        // B is locally balanced (base 0); the hostile edge from a fully
        // supported parent pushes it negative.
        let score = engine.effective_score(b).unwrap();
        assert!(score < Score::NEUTRAL);
    }

    #[test]
    fn test_spawning_links_splits_influence() {
        let activity = Threshold(0);
        let fee = Fee(0);

        // One outgoing link: B receives A's full exported influence.
        let mut single = Fixture::new();
        let a = single.directory.claim(1);
        let b = single.directory.claim(2);
        single.stake(a, Side::Support, 500);
        single.stake(b, Side::Challenge, 100);
        single.add_link(10, a, b, false, 400);

        let engine = single.engine(&activity, &fee);
        let undivided = engine.effective_score(b).unwrap();

        // A second outgoing link halves B's share of the denominator.
        let mut split = Fixture::new();
        let a2 = split.directory.claim(1);
        let b2 = split.directory.claim(2);
        let c2 = split.directory.claim(3);
        split.stake(a2, Side::Support, 500);
        split.stake(b2, Side::Challenge, 100);
        split.stake(c2, Side::Support, 100);
        split.add_link(10, a2, b2, false, 400);
        split.add_link(11, a2, c2, false, 400);

        let engine = split.engine(&activity, &fee);
        let divided = engine.effective_score(b2).unwrap();

        // B starts negative; the upstream support pulls it up, but a
        // diluted parent pulls less.
        assert!(divided < undivided);
    }

    #[test]
    fn test_depth_cap_drops_upstream() {
        let mut fx = Fixture::new();
        let claims: Vec<PostId> = (1..=5).map(|i| fx.directory.claim(i)).collect();
        fx.stake(claims[0], Side::Support, 100);
        fx.stake(claims[0], Side::Challenge, 900);
        for claim in &claims[1..] {
            fx.stake(*claim, Side::Support, 100);
            fx.stake(*claim, Side::Challenge, 100);
        }
        for i in 0..4 {
            fx.add_link(10 + i as u64, claims[i], claims[i + 1], false, 400);
        }

        let activity = Threshold(0);
        let fee = Fee(0);
        let deep = ScoreEngine::new(
            &fx.graph,
            &fx.ledger,
            &fx.directory,
            &activity,
            &fee,
            ScoreConfig { max_depth: 32 },
        );
        let shallow = ScoreEngine::new(
            &fx.graph,
            &fx.ledger,
            &fx.directory,
            &activity,
            &fee,
            ScoreConfig { max_depth: 0 },
        );

        // With no recursion budget the tail claim reports only its local
        // score; the hostile root never reaches it.
        let local = shallow.effective_score(claims[4]).unwrap();
        let propagated = deep.effective_score(claims[4]).unwrap();
        assert_eq!(local, Score::NEUTRAL);
        assert!(propagated < local);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;
    use verisphere_domain::{AccountId, Link, Side};
    use verisphere_ledger::testkit::TestVault;

    struct Threshold(u64);
    impl ActivityPolicy for Threshold {
        fn is_active(&self, total_stake: u64) -> bool {
            total_stake >= self.0
        }
    }

    struct Fee(u64);
    impl FeePolicy for Fee {
        fn fee_amount(&self) -> u64 {
            self.0
        }
    }

    #[derive(Default)]
    struct MemoryDirectory {
        posts: HashMap<PostId, PostKind>,
    }

    impl PostDirectory for MemoryDirectory {
        fn kind(&self, post: PostId) -> Option<PostKind> {
            self.posts.get(&post).copied()
        }
    }

    /// Build graph + ledger from edge and stake descriptions; `mirror`
    /// swaps every support amount with every challenge amount.
    fn build(
        edges: &[(u64, u64, bool)],
        stakes: &[(u64, u64, u64)],
        mirror: bool,
    ) -> (LinkGraph, StakeLedger, MemoryDirectory, TestVault) {
        let mut graph = LinkGraph::default();
        let mut ledger = StakeLedger::default();
        let mut directory = MemoryDirectory::default();
        let mut vault = TestVault::with_balance(AccountId::from_value(0), u64::MAX / 2);

        for claim in 0u64..8 {
            directory
                .posts
                .insert(PostId::from_value(claim), PostKind::Claim);
        }

        for (i, (from, to, challenge)) in edges.iter().enumerate() {
            let from = PostId::from_value(*from);
            let to = PostId::from_value(*to);
            let link = PostId::from_value(100 + i as u64);
            if graph.add_edge(from, to, link, *challenge).is_ok() {
                directory
                    .posts
                    .insert(link, PostKind::Link(Link::new(from, to, *challenge)));
                // Give every accepted link some stake so it exports.
                ledger
                    .stake(&mut vault, AccountId::from_value(0), link, Side::Support, 50, 0)
                    .unwrap();
            }
        }

        for (post, support, challenge) in stakes {
            let post = PostId::from_value(*post);
            let (sup, cha) = if mirror {
                (*challenge, *support)
            } else {
                (*support, *challenge)
            };
            if sup > 0 {
                ledger
                    .stake(&mut vault, AccountId::from_value(0), post, Side::Support, sup, 0)
                    .unwrap();
            }
            if cha > 0 {
                ledger
                    .stake(&mut vault, AccountId::from_value(0), post, Side::Challenge, cha, 0)
                    .unwrap();
            }
        }

        (graph, ledger, directory, vault)
    }

    proptest! {
        /// Property: effective scores stay inside the closed range for
        /// arbitrary DAGs and stake configurations
        #[test]
        fn test_boundedness(
            edges in proptest::collection::vec((0u64..8, 0u64..8, any::<bool>()), 0..16),
            stakes in proptest::collection::vec((0u64..8, 0u64..5_000, 0u64..5_000), 0..12),
        ) {
            let (graph, ledger, directory, _vault) = build(&edges, &stakes, false);
            let activity = Threshold(10);
            let fee = Fee(25);
            let engine = ScoreEngine::new(
                &graph, &ledger, &directory, &activity, &fee, ScoreConfig::default(),
            );

            for claim in 0u64..8 {
                let score = engine.effective_score(PostId::from_value(claim)).unwrap();
                prop_assert!(score >= Score::MIN && score <= Score::MAX);
            }
        }

        /// Property: with a zero posting fee, mirroring all stakes negates
        /// every effective score
        #[test]
        fn test_sign_symmetry(
            edges in proptest::collection::vec((0u64..6, 0u64..6, any::<bool>()), 0..10),
            stakes in proptest::collection::vec((0u64..6, 0u64..2_000, 0u64..2_000), 0..10),
        ) {
            let (graph, ledger, directory, _v) = build(&edges, &stakes, false);
            let (graph_m, ledger_m, directory_m, _vm) = build(&edges, &stakes, true);

            let activity = Threshold(0);
            let fee = Fee(0);
            let engine = ScoreEngine::new(
                &graph, &ledger, &directory, &activity, &fee, ScoreConfig::default(),
            );
            let mirrored = ScoreEngine::new(
                &graph_m, &ledger_m, &directory_m, &activity, &fee, ScoreConfig::default(),
            );

            for claim in 0u64..6 {
                let post = PostId::from_value(claim);
                let score = engine.effective_score(post).unwrap();
                let mirror_score = mirrored.effective_score(post).unwrap();
                prop_assert_eq!(
                    score.raw(), -mirror_score.raw(),
                    "claim {} score {} vs mirrored {}", claim, score, mirror_score
                );
            }
        }
    }
}
