//! Episode and evaluation metrics.
//!
//! Tracks per-episode reward and event counts for every agent and averages
//! them over several evaluation episodes.

use std::fmt;

use crate::agent::ArenaAgent;
use crate::error::CoreError;
use crate::reward::RewardEvent;
use crate::scheduler::{ArenaHost, TickScheduler};

/// End-of-episode record for one agent.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeStats {
    pub agent_id: String,
    pub cumulative_reward: f32,
    pub pickups: u32,
    pub deliveries: u32,
    pub effect_hits: u32,
    pub effect_misses: u32,
    pub freezes: u32,
    pub collisions: u32,
    pub ticks: u32,
}

impl EpisodeStats {
    /// Reads the agent's ledger at the end of an episode.
    pub fn from_agent(agent: &ArenaAgent, ticks: u32) -> Self {
        let ledger = agent.ledger();
        Self {
            agent_id: agent.id.clone(),
            cumulative_reward: ledger.accumulated(),
            pickups: ledger.count(RewardEvent::TargetPickup),
            deliveries: ledger.count(RewardEvent::BaseDelivery),
            effect_hits: ledger.count(RewardEvent::EffectHit),
            effect_misses: ledger.count(RewardEvent::EffectMiss),
            freezes: ledger.count(RewardEvent::EnteredFrozen),
            collisions: ledger.count(RewardEvent::WallCollision)
                + ledger.count(RewardEvent::OpponentCollision),
            ticks,
        }
    }

    /// Fraction of probe outcomes that were hits, or `0` if the effect was never armed.
    pub fn hit_rate(&self) -> f32 {
        let shots = self.effect_hits + self.effect_misses;
        if shots == 0 {
            0.0
        } else {
            self.effect_hits as f32 / shots as f32
        }
    }
}

/// Averages over multiple evaluation episodes, across all agents.
#[derive(Debug, Clone)]
pub struct EvaluationMetrics {
    pub mean_cumulative_reward: f32,
    pub mean_pickups: f32,
    pub mean_deliveries: f32,
    pub mean_hit_rate: f32,
    pub mean_freezes: f32,
    pub mean_ticks: f32,
    pub n_episodes: usize,
}

impl EvaluationMetrics {
    /// Runs `n_episodes` episodes and aggregates every agent's stats.
    ///
    /// Each episode ends when the host reports done or after `max_ticks`.
    ///
    /// # Arguments
    ///
    /// * `scheduler` - Agents and policies to evaluate
    /// * `host` - Simulation reset at the start of every episode
    /// * `n_episodes` - Number of episodes to run
    /// * `max_ticks` - Tick cap per episode
    ///
    /// # Errors
    ///
    /// Propagates any error from [`TickScheduler::step`].
    pub fn evaluate<H: ArenaHost>(
        scheduler: &mut TickScheduler,
        host: &mut H,
        n_episodes: usize,
        max_ticks: u32,
    ) -> Result<Self, CoreError> {
        let mut all_stats = Vec::with_capacity(n_episodes * scheduler.n_agents());

        for _ in 0..n_episodes {
            scheduler.begin_episode(host);
            while scheduler.tick() < max_ticks {
                if scheduler.step(host)?.done {
                    break;
                }
            }
            let ticks = scheduler.tick();
            all_stats.extend(scheduler.agents().map(|a| EpisodeStats::from_agent(a, ticks)));
        }

        Ok(Self::aggregate(&all_stats, n_episodes))
    }

    /// Averages a set of per-agent episode records.
    pub fn aggregate(stats: &[EpisodeStats], n_episodes: usize) -> Self {
        Self {
            mean_cumulative_reward: mean_of(stats, |s| s.cumulative_reward),
            mean_pickups: mean_of(stats, |s| s.pickups as f32),
            mean_deliveries: mean_of(stats, |s| s.deliveries as f32),
            mean_hit_rate: mean_of(stats, EpisodeStats::hit_rate),
            mean_freezes: mean_of(stats, |s| s.freezes as f32),
            mean_ticks: mean_of(stats, |s| s.ticks as f32),
            n_episodes,
        }
    }
}

fn mean_of(stats: &[EpisodeStats], f: impl Fn(&EpisodeStats) -> f32) -> f32 {
    let n = stats.len().max(1) as f32;
    stats.iter().map(f).sum::<f32>() / n
}

impl fmt::Display for EvaluationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Evaluation Metrics ({} episodes) ===",
            self.n_episodes
        )?;
        writeln!(
            f,
            "  Mean cumulative reward:  {:.3}",
            self.mean_cumulative_reward
        )?;
        writeln!(f, "  Mean pickups:            {:.1}", self.mean_pickups)?;
        writeln!(f, "  Mean deliveries:         {:.1}", self.mean_deliveries)?;
        writeln!(
            f,
            "  Mean hit rate:           {:.1}%",
            self.mean_hit_rate * 100.0
        )?;
        writeln!(f, "  Mean freezes:            {:.1}", self.mean_freezes)?;
        writeln!(f, "  Mean episode length:     {:.1}", self.mean_ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(reward: f32, hits: u32, misses: u32) -> EpisodeStats {
        EpisodeStats {
            agent_id: "a".to_string(),
            cumulative_reward: reward,
            pickups: 2,
            deliveries: 1,
            effect_hits: hits,
            effect_misses: misses,
            freezes: 0,
            collisions: 0,
            ticks: 10,
        }
    }

    #[test]
    fn hit_rate_handles_no_shots() {
        assert_eq!(stats(0.0, 0, 0).hit_rate(), 0.0);
        assert_eq!(stats(0.0, 1, 3).hit_rate(), 0.25);
    }

    #[test]
    fn aggregate_averages() {
        let metrics = EvaluationMetrics::aggregate(&[stats(1.0, 1, 1), stats(3.0, 0, 2)], 2);
        assert_eq!(metrics.mean_cumulative_reward, 2.0);
        assert_eq!(metrics.mean_pickups, 2.0);
        assert_eq!(metrics.mean_hit_rate, 0.25);
        assert_eq!(metrics.n_episodes, 2);
        assert!(metrics.to_string().contains("2 episodes"));
    }

    #[test]
    fn aggregate_of_nothing_is_zero() {
        let metrics = EvaluationMetrics::aggregate(&[], 0);
        assert_eq!(metrics.mean_cumulative_reward, 0.0);
    }
}
