//! Arena demo: two teams collecting targets and freezing each other.
//!
//! Drives the tick scheduler against a small kinematic host: agents move
//! in straight lines, turn in fixed steps, pick up targets on contact and
//! deliver them by touching their own base. The targeting effect freezes
//! the first opponent along the probe ray for a few ticks.
//!
//! Run:
//! ```sh
//! cargo run --example arena_demo
//! ```

use capture_arena::metrics::EvaluationMetrics;
use capture_arena::policy::{GreedyCollectPolicy, Policy, RandomPolicy};
use capture_arena::reward::WorldEvent;
use capture_arena::world::{
    AgentView, BaseDescriptor, EntityHandle, EntityKind, EntityRegistry, Pose, TargetDescriptor,
    TargetState, TeamId, WorldSnapshot,
};
use capture_arena::{ArenaAgent, ArenaConfig, ArenaHost, Intent, Rotation, TickScheduler};
use glam::Vec3;

const HALF_EXTENT: f32 = 10.0;
const STEP: f32 = 0.5;
const TURN_DEGREES: f32 = 15.0;
const CONTACT_RADIUS: f32 = 1.0;
const AGENT_RADIUS: f32 = 0.5;
const FREEZE_TICKS: u32 = 8;
const HORIZON: u32 = 200;

const WALL: EntityHandle = EntityHandle(1);

struct DemoAgent {
    handle: EntityHandle,
    team: TeamId,
    spawn: Pose,
    pose: Pose,
    velocity: Vec3,
    carried: u32,
    frozen_ticks: u32,
    probe: Option<(Vec3, Vec3, f32, f32)>,
    pending: Vec<WorldEvent>,
}

struct DemoTarget {
    handle: EntityHandle,
    spawn: Vec3,
    position: Vec3,
    state: TargetState,
    carrier: Option<usize>,
}

struct DemoBase {
    handle: EntityHandle,
    team: TeamId,
    position: Vec3,
}

/// Two bases on opposite walls, targets scattered across the middle.
struct DemoArena {
    registry: EntityRegistry,
    agents: Vec<DemoAgent>,
    targets: Vec<DemoTarget>,
    bases: Vec<DemoBase>,
    ticks: u32,
}

impl DemoArena {
    fn new() -> Self {
        let mut registry = EntityRegistry::new();
        let mut next = 2u64;
        let mut handle = || {
            next += 1;
            EntityHandle(next)
        };

        let bases = vec![
            DemoBase {
                handle: handle(),
                team: TeamId(1),
                position: Vec3::new(0.0, 0.0, -8.0),
            },
            DemoBase {
                handle: handle(),
                team: TeamId(2),
                position: Vec3::new(0.0, 0.0, 8.0),
            },
        ];

        let agents = [
            (TeamId(1), Pose::new(Vec3::new(-2.0, 0.0, -6.0), 0.0)),
            (TeamId(2), Pose::new(Vec3::new(2.0, 0.0, 6.0), 180.0)),
        ]
        .into_iter()
        .map(|(team, spawn)| DemoAgent {
            handle: handle(),
            team,
            spawn,
            pose: spawn,
            velocity: Vec3::ZERO,
            carried: 0,
            frozen_ticks: 0,
            probe: None,
            pending: Vec::new(),
        })
        .collect::<Vec<_>>();

        let targets = [
            Vec3::new(-4.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(5.0, 0.0, -2.0),
        ]
        .into_iter()
        .map(|spawn| DemoTarget {
            handle: handle(),
            spawn,
            position: spawn,
            state: TargetState::Free,
            carrier: None,
        })
        .collect::<Vec<_>>();

        let entries = std::iter::once((WALL, EntityKind::Wall))
            .chain(bases.iter().map(|b| (b.handle, EntityKind::Base(b.team))))
            .chain(agents.iter().map(|a| (a.handle, EntityKind::Agent(a.team))))
            .chain(targets.iter().map(|t| (t.handle, EntityKind::Target)));
        for (handle, kind) in entries {
            if let Err(e) = registry.register(handle, kind) {
                eprintln!("registry: {e}");
            }
        }

        Self {
            registry,
            agents,
            targets,
            bases,
            ticks: 0,
        }
    }

    fn base_of(&self, team: TeamId) -> &DemoBase {
        self.bases
            .iter()
            .find(|b| b.team == team)
            .unwrap_or(&self.bases[0])
    }

    fn move_agent(&mut self, slot: usize) {
        let agent = &mut self.agents[slot];
        if agent.frozen_ticks > 0 {
            return;
        }
        let next = agent.pose.position + agent.velocity;
        let clamped = next.clamp(Vec3::splat(-HALF_EXTENT), Vec3::splat(HALF_EXTENT));
        if clamped != next {
            agent.pending.push(WorldEvent::Collision(WALL));
        }
        agent.pose.position = clamped;
    }

    fn collect_and_deliver(&mut self, slot: usize) {
        let position = self.agents[slot].pose.position;
        let team = self.agents[slot].team;

        for target in &mut self.targets {
            let up_for_grabs = match target.state {
                TargetState::Free => true,
                TargetState::InBase(owner) => owner != team,
                TargetState::Carried(_) => false,
            };
            if up_for_grabs && position.distance(target.position) <= CONTACT_RADIUS {
                let agent = &mut self.agents[slot];
                agent.pending.push(WorldEvent::Collision(target.handle));
                if agent.frozen_ticks == 0 {
                    target.state = TargetState::Carried(team);
                    target.carrier = Some(slot);
                    agent.carried += 1;
                }
            }
        }

        let base = self.base_of(team);
        let (base_handle, base_position) = (base.handle, base.position);
        if self.agents[slot].carried > 0 && position.distance(base_position) <= CONTACT_RADIUS {
            self.agents[slot]
                .pending
                .push(WorldEvent::Trigger(base_handle));
            for target in self.targets.iter_mut().filter(|t| t.carrier == Some(slot)) {
                target.state = TargetState::InBase(team);
                target.position = base_position;
                target.carrier = None;
            }
            self.agents[slot].carried = 0;
        }
    }

    fn resolve_probe(&mut self, slot: usize) {
        let Some((origin, direction, radius, range)) = self.agents[slot].probe.take() else {
            return;
        };
        let team = self.agents[slot].team;

        let hit = self
            .agents
            .iter()
            .enumerate()
            .filter(|(_, other)| other.team.is_opponent(team))
            .filter_map(|(i, other)| {
                let to = other.pose.position - origin;
                let along = to.dot(direction);
                let off_axis = (to - direction * along).length();
                ((0.0..=range).contains(&along) && off_axis <= radius + AGENT_RADIUS)
                    .then_some((i, along))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1));

        let report = match hit {
            Some((i, _)) => {
                self.freeze(i);
                WorldEvent::ProbeResult {
                    hit: Some(self.agents[i].handle),
                }
            }
            None => WorldEvent::ProbeResult { hit: None },
        };
        self.agents[slot].pending.push(report);
    }

    fn freeze(&mut self, slot: usize) {
        self.agents[slot].frozen_ticks = FREEZE_TICKS;
        self.agents[slot].velocity = Vec3::ZERO;
        for target in self.targets.iter_mut().filter(|t| t.carrier == Some(slot)) {
            target.state = TargetState::Free;
            target.carrier = None;
        }
        self.agents[slot].carried = 0;
    }
}

impl ArenaHost for DemoArena {
    fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    fn snapshot(&self, slot: usize) -> WorldSnapshot {
        let agent = &self.agents[slot];
        let base = self.base_of(agent.team);
        let targets = self
            .targets
            .iter()
            .map(|t| TargetDescriptor::new(t.handle, t.position, t.state))
            .collect();
        WorldSnapshot::new(
            AgentView::new(agent.pose, agent.team)
                .with_velocity(agent.velocity)
                .with_frozen(agent.frozen_ticks > 0)
                .with_carried(agent.carried),
            BaseDescriptor::new(base.position, base.team),
            HORIZON.saturating_sub(self.ticks) as f32,
            targets,
        )
    }

    fn apply_intent(&mut self, slot: usize, intent: &Intent) {
        let agent = &mut self.agents[slot];
        if agent.frozen_ticks > 0 {
            agent.velocity = Vec3::ZERO;
            return;
        }
        match intent.rotation {
            Rotation::Right => agent.pose.yaw_degrees += TURN_DEGREES,
            Rotation::Left => agent.pose.yaw_degrees -= TURN_DEGREES,
            Rotation::None => {}
        }
        agent.velocity = intent.movement.direction(&agent.pose) * STEP;
        if let Some(probe) = intent.probe {
            agent.pending.push(WorldEvent::EffectFired);
            agent.probe = Some((probe.origin, probe.direction, probe.radius, probe.range));
        }
    }

    fn advance(&mut self) {
        self.ticks += 1;
        for slot in 0..self.agents.len() {
            self.move_agent(slot);
        }
        for slot in 0..self.agents.len() {
            self.resolve_probe(slot);
        }
        for slot in 0..self.agents.len() {
            self.collect_and_deliver(slot);
        }
        for target in &mut self.targets {
            if let Some(slot) = target.carrier {
                target.position = self.agents[slot].pose.position;
            }
        }
        for agent in &mut self.agents {
            agent.frozen_ticks = agent.frozen_ticks.saturating_sub(1);
        }
    }

    fn drain_events(&mut self, slot: usize) -> Vec<WorldEvent> {
        std::mem::take(&mut self.agents[slot].pending)
    }

    fn episode_done(&self) -> bool {
        self.ticks >= HORIZON
    }

    fn reset(&mut self) {
        self.ticks = 0;
        for agent in &mut self.agents {
            agent.pose = agent.spawn;
            agent.velocity = Vec3::ZERO;
            agent.carried = 0;
            agent.frozen_ticks = 0;
            agent.probe = None;
            agent.pending.clear();
        }
        for target in &mut self.targets {
            target.position = target.spawn;
            target.state = TargetState::Free;
            target.carrier = None;
        }
    }
}

fn scheduler(
    arena: &DemoArena,
    policies: [Box<dyn Policy>; 2],
) -> Result<TickScheduler, capture_arena::CoreError> {
    let config = ArenaConfig::default();
    let mut scheduler = TickScheduler::new();
    for (agent, policy) in arena.agents.iter().zip(policies) {
        scheduler.add_agent(
            ArenaAgent::new(agent.team, arena.targets.len(), &config)?,
            policy,
        );
    }
    Ok(scheduler)
}

fn main() -> Result<(), capture_arena::CoreError> {
    capture_arena::init_logging(false);
    println!("=== Capture Arena Demo ===\n");

    let mut arena = DemoArena::new();
    let n_targets = arena.targets.len();
    println!("Arena:");
    println!("  Extent: {0}×{0}", HALF_EXTENT * 2.0);
    println!("  Agents: {}", arena.agents.len());
    println!("  Targets: {n_targets}");
    println!("  Horizon: {HORIZON} ticks");
    println!();

    println!("Evaluating Random vs Random...");
    let mut random = scheduler(
        &arena,
        [Box::new(RandomPolicy::new(1)), Box::new(RandomPolicy::new(2))],
    )?;
    let metrics = EvaluationMetrics::evaluate(&mut random, &mut arena, 10, HORIZON)?;
    println!("{metrics}");

    println!("Evaluating Greedy vs Greedy...");
    let mut greedy = scheduler(
        &arena,
        [
            Box::new(GreedyCollectPolicy::new(TeamId(1), n_targets)),
            Box::new(GreedyCollectPolicy::new(TeamId(2), n_targets)),
        ],
    )?;
    let metrics = EvaluationMetrics::evaluate(&mut greedy, &mut arena, 10, HORIZON)?;
    println!("{metrics}");

    println!("--- Detailed Single Episode (Greedy vs Random) ---\n");
    let mut mixed = scheduler(
        &arena,
        [
            Box::new(GreedyCollectPolicy::new(TeamId(1), n_targets)),
            Box::new(RandomPolicy::new(7)),
        ],
    )?;
    mixed.begin_episode(&mut arena);
    loop {
        let result = mixed.step(&mut arena)?;
        for (slot, reward) in result.rewards.iter().enumerate() {
            if reward.events.is_empty() {
                continue;
            }
            let names: Vec<String> = reward.events.iter().map(ToString::to_string).collect();
            println!(
                "  Tick {:3}: slot {} [{}] delta={:+.3} total={:.3}",
                result.tick,
                slot,
                names.join(", "),
                reward.delta,
                reward.accumulated
            );
        }
        if result.done {
            break;
        }
    }

    println!();
    for agent in mixed.agents() {
        println!(
            "  {}: reward {:.3}",
            agent.team(),
            agent.accumulated_reward()
        );
    }
    Ok(())
}
