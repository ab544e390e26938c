use core::hash::Hash;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::{Segment, Stack, StackCollection};

/// Easing applied to the raw transition progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationCurve {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl AnimationCurve {
    /// Maps raw progress to eased progress. Input is clamped to [0, 1] and
    /// every curve is exact at both endpoints.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 1.0 };
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

/// One in-flight transition between a committed old collection and the
/// engine's current one.
///
/// The state machine is Idle -> Animating -> Idle: an engine holds
/// `Option<Transition>` (None = Idle) and drives `advance` from its per-frame
/// clock. Sampling is idempotent at any progress and settles exactly on the
/// new collection at progress 1.
#[derive(Debug, Clone)]
pub struct Transition<D> {
    old: StackCollection<D>,
    duration_secs: f64,
    curve: AnimationCurve,
    elapsed_secs: f64,
}

impl<D: Clone + Eq + Hash> Transition<D> {
    #[must_use]
    pub fn new(old: StackCollection<D>, duration_secs: f64, curve: AnimationCurve) -> Self {
        Self {
            old,
            duration_secs,
            curve,
            elapsed_secs: 0.0,
        }
    }

    /// Advances the clock. Negative or non-finite deltas are ignored; elapsed
    /// time saturates at the duration so progress never overshoots 1.
    pub fn advance(&mut self, delta_seconds: f64) {
        if delta_seconds.is_finite() && delta_seconds > 0.0 {
            self.elapsed_secs = (self.elapsed_secs + delta_seconds).min(self.duration_secs);
        }
    }

    /// Raw progress in [0, 1].
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration_secs > 0.0 {
            (self.elapsed_secs / self.duration_secs).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Produces the geometry presented while this transition is in flight.
    #[must_use]
    pub fn sample(&self, new: &StackCollection<D>) -> StackCollection<D> {
        interpolate_collections(&self.old, new, self.curve.apply(self.progress()))
    }
}

/// Transition gate: animate only for a non-zero duration, identical domain
/// sets and values that actually changed. Anything else snaps.
#[must_use]
pub fn should_animate<D: Eq + Hash>(
    old: &StackCollection<D>,
    new: &StackCollection<D>,
    duration_secs: f64,
) -> bool {
    duration_secs > 0.0 && old.is_compatible_with(new) && !old.has_same_values(new)
}

/// Interpolates segment values between two domain-compatible collections at
/// eased progress `t`.
///
/// The result has the new collection's structure, colors and labels; only
/// segment values are interpolated, pairing segments positionally within the
/// old stack for the same domain (a missing old counterpart interpolates
/// from zero). At `t >= 1` the new collection is returned untouched.
#[must_use]
pub fn interpolate_collections<D: Clone + Eq + Hash>(
    old: &StackCollection<D>,
    new: &StackCollection<D>,
    t: f64,
) -> StackCollection<D> {
    if t >= 1.0 {
        return new.clone();
    }
    let t = t.max(0.0);

    let old_by_domain: HashMap<&D, &Stack<D>> = old
        .stacks()
        .iter()
        .map(|stack| (&stack.domain, stack))
        .collect();

    let stacks = new
        .stacks()
        .iter()
        .map(|stack| {
            let old_stack = old_by_domain.get(&stack.domain);
            let segments = stack
                .segments
                .iter()
                .enumerate()
                .map(|(index, segment)| {
                    let old_value = old_stack
                        .and_then(|old| old.segments.get(index))
                        .map_or(0.0, |old| old.value);
                    Segment {
                        value: lerp(old_value, segment.value, t),
                        color: segment.color,
                        label: segment.label.clone(),
                    }
                })
                .collect();
            Stack {
                domain: stack.domain.clone(),
                label: stack.label.clone(),
                segments,
                corner_radius: stack.corner_radius,
            }
        })
        .collect();

    StackCollection::from_parts(stacks, new.value_axis(), new.inverted())
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
