//! World reports and the reward events they classify into.
//!
//! The host's physics and trigger callbacks report raw contacts by entity
//! handle. [`classify`] resolves them against the entity registry and the
//! tick's snapshot and keeps only the ones that carry a reward for the
//! observing agent.

use std::fmt;

use log::{trace, warn};

use crate::world::{EntityHandle, EntityKind, EntityRegistry, TeamId, WorldSnapshot};

/// A raw report from the host for one agent and one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldEvent {
    /// Physical collision with another entity.
    Collision(EntityHandle),
    /// Overlap with a trigger volume, such as a base.
    Trigger(EntityHandle),
    /// The targeting effect fired this tick.
    EffectFired,
    /// Outcome of the forward probe; `None` if the sweep hit nothing.
    ProbeResult { hit: Option<EntityHandle> },
}

/// A reward-bearing event, consumed within the tick it was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RewardEvent {
    EnteredFrozen,
    EffectUsed,
    EffectHit,
    EffectMiss,
    TargetPickup,
    BaseDelivery,
    WallCollision,
    OpponentCollision,
}

impl RewardEvent {
    /// Number of event kinds.
    pub const COUNT: usize = 8;

    /// All event kinds in a fixed order.
    pub fn all() -> [RewardEvent; Self::COUNT] {
        [
            RewardEvent::EnteredFrozen,
            RewardEvent::EffectUsed,
            RewardEvent::EffectHit,
            RewardEvent::EffectMiss,
            RewardEvent::TargetPickup,
            RewardEvent::BaseDelivery,
            RewardEvent::WallCollision,
            RewardEvent::OpponentCollision,
        ]
    }

    /// Position of this kind in [`RewardEvent::all`].
    pub fn index(&self) -> usize {
        match self {
            RewardEvent::EnteredFrozen => 0,
            RewardEvent::EffectUsed => 1,
            RewardEvent::EffectHit => 2,
            RewardEvent::EffectMiss => 3,
            RewardEvent::TargetPickup => 4,
            RewardEvent::BaseDelivery => 5,
            RewardEvent::WallCollision => 6,
            RewardEvent::OpponentCollision => 7,
        }
    }
}

impl fmt::Display for RewardEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RewardEvent::EnteredFrozen => "entered-frozen",
            RewardEvent::EffectUsed => "effect-used",
            RewardEvent::EffectHit => "effect-hit",
            RewardEvent::EffectMiss => "effect-miss",
            RewardEvent::TargetPickup => "target-pickup",
            RewardEvent::BaseDelivery => "base-delivery",
            RewardEvent::WallCollision => "wall-collision",
            RewardEvent::OpponentCollision => "opponent-collision",
        };
        f.write_str(name)
    }
}

/// Agent-side facts needed to classify reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickContext {
    pub team: TeamId,
    pub frozen: bool,
    /// Whether the targeting effect was switched on this tick.
    pub effect_active: bool,
}

impl TickContext {
    /// Context for the snapshot's agent with the given effect state.
    pub fn from_snapshot(snapshot: &WorldSnapshot, effect_active: bool) -> Self {
        let agent = snapshot.agent();
        Self {
            team: agent.team,
            frozen: agent.frozen,
            effect_active,
        }
    }

    /// True when the probe outcome counts this tick.
    pub fn probe_armed(&self) -> bool {
        self.effect_active && !self.frozen
    }
}

/// Classifies one tick of world reports into reward events.
///
/// Rules:
/// - a target contact is a pickup only if the agent is not frozen and the
///   target, as seen in `snapshot`, is neither carried nor in the agent's
///   own base;
/// - a base trigger is a delivery only for the agent's own base;
/// - agent contacts count only against an opposing team;
/// - wall contacts always count;
/// - while the probe is armed exactly one hit or miss is produced; the
///   first probe report wins and a missing report counts as a miss.
///   Probe reports while disarmed are ignored.
///
/// # Arguments
///
/// * `registry` - Kinds of the entities named by `reports`
/// * `snapshot` - Pre-advance world state, used for target eligibility
/// * `context` - The agent's team, frozen flag and effect state this tick
/// * `reports` - Raw world events for the agent, in any order
pub fn classify(
    registry: &EntityRegistry,
    snapshot: &WorldSnapshot,
    context: TickContext,
    reports: &[WorldEvent],
) -> Vec<RewardEvent> {
    let mut events = Vec::new();
    let mut probe_outcome: Option<RewardEvent> = None;

    for report in reports {
        match *report {
            WorldEvent::Collision(handle) => match registry.resolve(handle) {
                Some(EntityKind::Wall) => events.push(RewardEvent::WallCollision),
                Some(EntityKind::Agent(team)) if context.team.is_opponent(team) => {
                    events.push(RewardEvent::OpponentCollision)
                }
                Some(EntityKind::Target) => {
                    if is_pickup(snapshot, context, handle) {
                        events.push(RewardEvent::TargetPickup);
                    }
                }
                _ => {}
            },
            WorldEvent::Trigger(handle) => {
                if let Some(EntityKind::Base(team)) = registry.resolve(handle) {
                    if team == context.team {
                        events.push(RewardEvent::BaseDelivery);
                    }
                }
            }
            WorldEvent::EffectFired => events.push(RewardEvent::EffectUsed),
            WorldEvent::ProbeResult { hit } => {
                if !context.probe_armed() {
                    trace!("Probe result ignored: effect inactive or agent frozen");
                    continue;
                }
                if probe_outcome.is_some() {
                    warn!("Dropping extra probe result in the same tick");
                    continue;
                }
                let opponent_hit = hit
                    .and_then(|h| registry.resolve(h))
                    .is_some_and(|kind| {
                        matches!(kind, EntityKind::Agent(team) if context.team.is_opponent(team))
                    });
                probe_outcome = Some(if opponent_hit {
                    RewardEvent::EffectHit
                } else {
                    RewardEvent::EffectMiss
                });
            }
        }
    }

    if context.probe_armed() {
        events.push(probe_outcome.unwrap_or(RewardEvent::EffectMiss));
    }

    events
}

fn is_pickup(snapshot: &WorldSnapshot, context: TickContext, handle: EntityHandle) -> bool {
    if context.frozen {
        return false;
    }
    match snapshot.targets().iter().find(|t| t.handle == handle) {
        Some(target) => target.state.is_eligible_for(context.team),
        None => {
            warn!("Target {:?} is registered but missing from the snapshot", handle);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::world::{AgentView, BaseDescriptor, Pose, TargetDescriptor, TargetState};

    const TEAM: TeamId = TeamId(1);
    const OTHER: TeamId = TeamId(2);

    const WALL: EntityHandle = EntityHandle(1);
    const ALLY: EntityHandle = EntityHandle(2);
    const ENEMY: EntityHandle = EntityHandle(3);
    const OWN_BASE: EntityHandle = EntityHandle(4);
    const ENEMY_BASE: EntityHandle = EntityHandle(5);
    const FREE: EntityHandle = EntityHandle(10);
    const CARRIED: EntityHandle = EntityHandle(11);
    const IN_OWN_BASE: EntityHandle = EntityHandle(12);
    const IN_ENEMY_BASE: EntityHandle = EntityHandle(13);

    fn registry() -> EntityRegistry {
        let mut registry = EntityRegistry::new();
        registry.register(WALL, EntityKind::Wall).unwrap();
        registry.register(ALLY, EntityKind::Agent(TEAM)).unwrap();
        registry.register(ENEMY, EntityKind::Agent(OTHER)).unwrap();
        registry.register(OWN_BASE, EntityKind::Base(TEAM)).unwrap();
        registry.register(ENEMY_BASE, EntityKind::Base(OTHER)).unwrap();
        for handle in [FREE, CARRIED, IN_OWN_BASE, IN_ENEMY_BASE] {
            registry.register(handle, EntityKind::Target).unwrap();
        }
        registry
    }

    fn snapshot(frozen: bool) -> WorldSnapshot {
        WorldSnapshot::new(
            AgentView::new(Pose::default(), TEAM).with_frozen(frozen),
            BaseDescriptor::new(Vec3::ZERO, TEAM),
            10.0,
            vec![
                TargetDescriptor::new(FREE, Vec3::X, TargetState::Free),
                TargetDescriptor::new(CARRIED, Vec3::X, TargetState::Carried(OTHER)),
                TargetDescriptor::new(IN_OWN_BASE, Vec3::X, TargetState::InBase(TEAM)),
                TargetDescriptor::new(IN_ENEMY_BASE, Vec3::X, TargetState::InBase(OTHER)),
            ],
        )
    }

    fn context(frozen: bool, effect_active: bool) -> TickContext {
        TickContext {
            team: TEAM,
            frozen,
            effect_active,
        }
    }

    #[test]
    fn collisions_are_categorized() {
        let events = classify(
            &registry(),
            &snapshot(false),
            context(false, false),
            &[
                WorldEvent::Collision(WALL),
                WorldEvent::Collision(ALLY),
                WorldEvent::Collision(ENEMY),
            ],
        );
        assert_eq!(
            events,
            vec![RewardEvent::WallCollision, RewardEvent::OpponentCollision]
        );
    }

    #[test]
    fn pickup_only_for_eligible_targets() {
        let events = classify(
            &registry(),
            &snapshot(false),
            context(false, false),
            &[
                WorldEvent::Collision(FREE),
                WorldEvent::Collision(CARRIED),
                WorldEvent::Collision(IN_OWN_BASE),
                WorldEvent::Collision(IN_ENEMY_BASE),
            ],
        );
        assert_eq!(
            events,
            vec![RewardEvent::TargetPickup, RewardEvent::TargetPickup]
        );
    }

    #[test]
    fn no_pickup_while_frozen() {
        let events = classify(
            &registry(),
            &snapshot(true),
            context(true, false),
            &[WorldEvent::Collision(FREE)],
        );
        assert!(events.is_empty());
    }

    #[test]
    fn delivery_only_at_own_base() {
        let events = classify(
            &registry(),
            &snapshot(false),
            context(false, false),
            &[WorldEvent::Trigger(ENEMY_BASE), WorldEvent::Trigger(OWN_BASE)],
        );
        assert_eq!(events, vec![RewardEvent::BaseDelivery]);
    }

    #[test]
    fn probe_hit_on_opponent() {
        let events = classify(
            &registry(),
            &snapshot(false),
            context(false, true),
            &[
                WorldEvent::EffectFired,
                WorldEvent::ProbeResult { hit: Some(ENEMY) },
            ],
        );
        assert_eq!(events, vec![RewardEvent::EffectUsed, RewardEvent::EffectHit]);
    }

    #[test]
    fn probe_on_teammate_or_wall_is_a_miss() {
        for hit in [Some(ALLY), Some(WALL), None] {
            let events = classify(
                &registry(),
                &snapshot(false),
                context(false, true),
                &[WorldEvent::ProbeResult { hit }],
            );
            assert_eq!(events, vec![RewardEvent::EffectMiss]);
        }
    }

    #[test]
    fn exactly_one_probe_outcome_per_tick() {
        let events = classify(
            &registry(),
            &snapshot(false),
            context(false, true),
            &[
                WorldEvent::ProbeResult { hit: None },
                WorldEvent::ProbeResult { hit: Some(ENEMY) },
            ],
        );
        assert_eq!(events, vec![RewardEvent::EffectMiss]);
    }

    #[test]
    fn missing_probe_report_counts_as_miss() {
        let events = classify(&registry(), &snapshot(false), context(false, true), &[]);
        assert_eq!(events, vec![RewardEvent::EffectMiss]);
    }

    #[test]
    fn probe_ignored_when_frozen_or_inactive() {
        let reports = [WorldEvent::ProbeResult { hit: Some(ENEMY) }];
        assert!(classify(&registry(), &snapshot(true), context(true, true), &reports).is_empty());
        let idle = context(false, false);
        assert!(classify(&registry(), &snapshot(false), idle, &reports).is_empty());
    }

    #[test]
    fn unknown_handles_are_ignored() {
        let events = classify(
            &registry(),
            &snapshot(false),
            context(false, false),
            &[
                WorldEvent::Collision(EntityHandle(999)),
                WorldEvent::Trigger(EntityHandle(998)),
            ],
        );
        assert!(events.is_empty());
    }

    #[test]
    fn index_matches_all_order() {
        for (i, event) in RewardEvent::all().iter().enumerate() {
            assert_eq!(event.index(), i);
        }
        assert_eq!(RewardEvent::TargetPickup.to_string(), "target-pickup");
    }
}
