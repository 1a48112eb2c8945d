//! Resolves discrete action selections into intents.

use log::debug;

use super::intent::{ActionSelection, Intent, Movement, NavigationGoal, ProbeRequest, Rotation};
use crate::config::ProbeConfig;
use crate::navigation::Navigator;
use crate::world::WorldSnapshot;

/// Maps a 5-slot [`ActionSelection`] to an [`Intent`] for one tick.
///
/// Slots 0 and 1 are decoded first. Navigation slots then overwrite the
/// component their steering decision asserts. When slots 3 and 4 are both
/// set, returning to base takes precedence and no target search runs.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDecoder {
    navigator: Navigator,
    probe: ProbeConfig,
}

impl ActionDecoder {
    /// Creates a decoder.
    pub fn new(navigator: Navigator, probe: ProbeConfig) -> Self {
        Self { navigator, probe }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Resolves the intent for `action` given the current snapshot.
    ///
    /// Out-of-range slot values act as that slot's no-op.
    ///
    /// # Arguments
    ///
    /// * `snapshot` - World state used for navigation and the probe origin
    /// * `action` - The policy's 5-slot selection
    pub fn decode(&self, snapshot: &WorldSnapshot, action: &ActionSelection) -> Intent {
        let mut intent = Intent {
            movement: decode_movement(action.forward_axis),
            rotation: decode_rotation(action.rotate_axis),
            effect_on: action.effect_axis == 1,
            ..Intent::default()
        };

        if action.go_to_base == 1 {
            intent.apply_steering(self.navigator.steer_to_base(snapshot));
            intent.navigation = Some(NavigationGoal::Base);
        } else if action.go_to_target == 1 {
            if let Some(target) = self.navigator.find_nearest_eligible_target(snapshot) {
                let command = self
                    .navigator
                    .steer_toward(&snapshot.agent().pose, target.position);
                intent.apply_steering(command);
                intent.navigation = Some(NavigationGoal::Target(target.handle));
            }
        }

        let agent = snapshot.agent();
        if intent.effect_on && !agent.frozen {
            intent.probe = Some(ProbeRequest {
                origin: agent.pose.position,
                direction: agent.pose.forward(),
                radius: self.probe.radius,
                range: self.probe.range,
            });
        }

        intent
    }
}

impl Default for ActionDecoder {
    fn default() -> Self {
        Self::new(Navigator::default(), ProbeConfig::default())
    }
}

fn decode_movement(axis: i32) -> Movement {
    match axis {
        0 => Movement::None,
        1 => Movement::Forward,
        2 => Movement::Backward,
        other => {
            debug!("Ignoring unknown forward axis value {}", other);
            Movement::None
        }
    }
}

fn decode_rotation(axis: i32) -> Rotation {
    match axis {
        0 => Rotation::None,
        1 => Rotation::Right,
        2 => Rotation::Left,
        other => {
            debug!("Ignoring unknown rotate axis value {}", other);
            Rotation::None
        }
    }
}
