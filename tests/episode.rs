//! End-to-end episode against a toy kinematic host.

use capture_arena::policy::{GreedyCollectPolicy, RandomPolicy};
use capture_arena::reward::{RewardEvent, WorldEvent};
use capture_arena::world::{
    AgentView, BaseDescriptor, EntityHandle, EntityKind, EntityRegistry, Pose, TargetDescriptor,
    TargetState, TeamId, WorldSnapshot,
};
use capture_arena::{
    metrics::EvaluationMetrics, ArenaAgent, ArenaConfig, ArenaHost, Intent, Movement, Rotation,
    TickScheduler,
};
use glam::Vec3;

const TEAM: TeamId = TeamId(1);
const BASE: EntityHandle = EntityHandle(1);
const TARGET: EntityHandle = EntityHandle(2);

const STEP: f32 = 1.0;
const TURN_DEGREES: f32 = 30.0;
const CONTACT_RADIUS: f32 = 1.5;

/// Single agent, single target, straight-line motion and instant turns.
struct ToyArena {
    registry: EntityRegistry,
    pose: Pose,
    carried: u32,
    target_position: Vec3,
    target_state: TargetState,
    base_position: Vec3,
    in_base: bool,
    pending: Vec<WorldEvent>,
    ticks: u32,
    horizon: u32,
}

impl ToyArena {
    fn new(horizon: u32) -> Self {
        let mut registry = EntityRegistry::new();
        registry.register(BASE, EntityKind::Base(TEAM)).unwrap();
        registry.register(TARGET, EntityKind::Target).unwrap();
        let mut arena = Self {
            registry,
            pose: Pose::default(),
            carried: 0,
            target_position: Vec3::ZERO,
            target_state: TargetState::Free,
            base_position: Vec3::ZERO,
            in_base: false,
            pending: Vec::new(),
            ticks: 0,
            horizon,
        };
        arena.reset();
        arena
    }
}

impl ArenaHost for ToyArena {
    fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    fn snapshot(&self, _slot: usize) -> WorldSnapshot {
        WorldSnapshot::new(
            AgentView::new(self.pose, TEAM).with_carried(self.carried),
            BaseDescriptor::new(self.base_position, TEAM),
            (self.horizon - self.ticks) as f32,
            vec![TargetDescriptor::new(
                TARGET,
                self.target_position,
                self.target_state,
            )],
        )
    }

    fn apply_intent(&mut self, _slot: usize, intent: &Intent) {
        match intent.rotation {
            Rotation::Right => self.pose.yaw_degrees += TURN_DEGREES,
            Rotation::Left => self.pose.yaw_degrees -= TURN_DEGREES,
            Rotation::None => {}
        }
        self.pose.position += intent.movement.direction(&self.pose) * STEP;
    }

    fn advance(&mut self) {
        self.ticks += 1;

        if self.target_state == TargetState::Free
            && self.pose.distance_to(self.target_position) <= CONTACT_RADIUS
        {
            self.pending.push(WorldEvent::Collision(TARGET));
            self.target_state = TargetState::Carried(TEAM);
            self.carried += 1;
        }
        if let TargetState::Carried(_) = self.target_state {
            self.target_position = self.pose.position;
        }

        let inside = self.pose.distance_to(self.base_position) <= CONTACT_RADIUS;
        if inside && !self.in_base {
            self.pending.push(WorldEvent::Trigger(BASE));
            if self.carried > 0 {
                self.target_state = TargetState::InBase(TEAM);
                self.carried = 0;
            }
        }
        self.in_base = inside;
    }

    fn drain_events(&mut self, _slot: usize) -> Vec<WorldEvent> {
        std::mem::take(&mut self.pending)
    }

    fn episode_done(&self) -> bool {
        self.ticks >= self.horizon
    }

    fn reset(&mut self) {
        self.pose = Pose::default();
        self.carried = 0;
        self.target_position = Vec3::new(0.0, 0.0, 4.0);
        self.target_state = TargetState::Free;
        self.base_position = Vec3::new(0.0, 0.0, -6.0);
        self.in_base = false;
        self.pending.clear();
        self.ticks = 0;
    }
}

fn greedy_scheduler() -> TickScheduler {
    let mut scheduler = TickScheduler::new();
    let agent = ArenaAgent::new(TEAM, 1, &ArenaConfig::default()).unwrap();
    scheduler.add_agent(agent, Box::new(GreedyCollectPolicy::new(TEAM, 1)));
    scheduler
}

#[test]
fn greedy_agent_collects_and_delivers() {
    capture_arena::logging::init_for_tests();

    let mut host = ToyArena::new(60);
    let mut scheduler = greedy_scheduler();
    scheduler.begin_episode(&mut host);

    let mut pickup_tick = None;
    let mut delivery_tick = None;

    while delivery_tick.is_none() {
        let result = scheduler.step(&mut host).unwrap();
        let reward = &result.rewards[0];

        if reward.events.contains(&RewardEvent::TargetPickup) {
            assert!((reward.delta - 0.2).abs() < 1e-6);
            pickup_tick = Some(result.tick);
        }
        if reward.events.contains(&RewardEvent::BaseDelivery) {
            // Carrying one target when the base was reached.
            assert!((reward.delta - 1.8).abs() < 1e-6);
            delivery_tick = Some(result.tick);
        }
        assert!(!result.done, "episode ended before a delivery");
    }

    assert_eq!(pickup_tick, Some(3));
    assert!(delivery_tick.unwrap() > pickup_tick.unwrap());

    let agent = scheduler.agent(0).unwrap();
    assert_eq!(agent.ledger().count(RewardEvent::TargetPickup), 1);
    assert_eq!(agent.ledger().count(RewardEvent::BaseDelivery), 1);
    assert!((agent.accumulated_reward() - 2.0).abs() < 1e-5);
}

#[test]
fn greedy_agent_turns_around_after_pickup() {
    let mut host = ToyArena::new(60);
    let mut scheduler = greedy_scheduler();
    scheduler.begin_episode(&mut host);

    for _ in 0..3 {
        let result = scheduler.step(&mut host).unwrap();
        assert_eq!(result.intents[0].movement, Movement::Forward);
    }
    // Base is now directly behind.
    let result = scheduler.step(&mut host).unwrap();
    assert_eq!(result.intents[0].rotation, Rotation::Left);
    assert_eq!(result.intents[0].movement, Movement::None);
}

#[test]
fn evaluation_runs_full_episodes() {
    let mut host = ToyArena::new(25);
    let mut scheduler = TickScheduler::new();
    let agent = ArenaAgent::new(TEAM, 1, &ArenaConfig::default()).unwrap();
    scheduler.add_agent(agent, Box::new(RandomPolicy::new(3)));

    let metrics = EvaluationMetrics::evaluate(&mut scheduler, &mut host, 3, 100).unwrap();
    assert_eq!(metrics.n_episodes, 3);
    assert_eq!(metrics.mean_ticks, 25.0);
    assert!(metrics.mean_cumulative_reward.is_finite());
}
