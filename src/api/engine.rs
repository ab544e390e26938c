use core::hash::Hash;
use std::borrow::Cow;

use tracing::{debug, trace, warn};

use crate::animation::{Transition, should_animate};
use crate::core::layout::{ChartLayout, layout_chart};
use crate::core::{StackCollection, TickCache};
use crate::error::ChartResult;
use crate::interaction::{self, BarAggregate, TapResolution};
use crate::render::{RenderFrame, Renderer};

use super::frame_builder::build_frame;
use super::ChartEngineConfig;

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the committed stack collection, the in-flight
/// transition (if any), the tick cache and the renderer. The host drives it
/// with `set_stacks` on data changes, `tick` from its per-frame clock and
/// `render` per paint pass.
pub struct ChartEngine<D, R: Renderer> {
    renderer: R,
    config: ChartEngineConfig,
    committed: StackCollection<D>,
    transition: Option<Transition<D>>,
    tick_cache: TickCache,
}

impl<D: Clone + Eq + Hash, R: Renderer> ChartEngine<D, R> {
    /// Creates a fully initialized engine with a validated configuration.
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            renderer,
            committed: StackCollection::empty(config.value_axis, config.inverted),
            transition: None,
            tick_cache: TickCache::new(),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> ChartEngineConfig {
        self.config
    }

    /// Replaces the configuration. A config change redefines the old/new
    /// baseline, so any in-flight transition is discarded.
    pub fn set_config(&mut self, config: ChartEngineConfig) -> ChartResult<()> {
        config.validate()?;
        self.config = config;
        self.transition = None;
        self.tick_cache.invalidate();
        Ok(())
    }

    /// Replaces the committed stack collection.
    ///
    /// Starts an animated transition only when the animation duration is
    /// non-zero, the domain sets match and the values actually changed;
    /// otherwise the engine snaps. A change arriving mid-flight restarts
    /// from progress 0 with the previously committed collection as the old
    /// baseline. Value-identical replacements never restart the animation.
    pub fn set_stacks(&mut self, collection: StackCollection<D>) {
        if collection.value_axis() != self.config.value_axis
            || collection.inverted() != self.config.inverted
        {
            warn!("stack collection orientation differs from config; layout follows the collection");
        }

        if should_animate(
            &self.committed,
            &collection,
            self.config.animation_duration_secs,
        ) {
            debug!(stacks = collection.len(), "starting stack transition");
            let old = std::mem::replace(&mut self.committed, collection);
            self.transition = Some(Transition::new(
                old,
                self.config.animation_duration_secs,
                self.config.animation_curve,
            ));
        } else if self.committed.has_same_values(&collection) {
            trace!("stack values unchanged; keeping any in-flight transition");
            self.committed = collection;
        } else {
            debug!(stacks = collection.len(), "snapping to new stack collection");
            self.transition = None;
            self.committed = collection;
        }
    }

    /// The committed (transition-target) collection.
    #[must_use]
    pub fn stacks(&self) -> &StackCollection<D> {
        &self.committed
    }

    /// The collection currently presented: the interpolated geometry while a
    /// transition is in flight, the committed collection otherwise.
    #[must_use]
    pub fn displayed_stacks(&self) -> Cow<'_, StackCollection<D>> {
        match &self.transition {
            Some(transition) => Cow::Owned(transition.sample(&self.committed)),
            None => Cow::Borrowed(&self.committed),
        }
    }

    /// Advances the animation clock by `delta_seconds`.
    ///
    /// Returns `true` when a transition was in flight, meaning the presented
    /// geometry changed and the host should repaint. The final tick settles
    /// exactly on the committed collection and returns the machine to idle.
    pub fn tick(&mut self, delta_seconds: f64) -> bool {
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };
        transition.advance(delta_seconds);
        if transition.is_complete() {
            debug!("stack transition complete");
            self.transition = None;
        }
        true
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Raw progress of the in-flight transition, if any.
    #[must_use]
    pub fn animation_progress(&self) -> Option<f64> {
        self.transition.as_ref().map(Transition::progress)
    }

    /// Computes the current chart geometry.
    #[must_use]
    pub fn layout(&mut self) -> ChartLayout {
        let params = self.config.layout_params();
        let viewport = self.config.viewport;
        match &self.transition {
            Some(transition) => {
                let sampled = transition.sample(&self.committed);
                layout_chart(&sampled, &params, viewport, &mut self.tick_cache)
            }
            None => layout_chart(&self.committed, &params, viewport, &mut self.tick_cache),
        }
    }

    /// Builds the draw pass for the current geometry without rendering it.
    #[must_use]
    pub fn build_frame(&mut self) -> RenderFrame {
        let layout = self.layout();
        build_frame(&layout, &self.config)
    }

    /// Renders the current geometry through the attached backend.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_frame();
        trace!(primitives = frame.primitive_count(), "rendering frame");
        self.renderer.render(&frame)
    }

    /// Renders the frame into an external cairo context.
    ///
    /// This path is used by host draw callbacks while keeping the renderer
    /// implementation decoupled from toolkit-specific APIs.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_frame();
        self.renderer.render_on_cairo_context(context, &frame)
    }

    /// Aggregate geometry for every bar, in bar order.
    #[must_use]
    pub fn aggregate_bars(&mut self) -> Vec<BarAggregate> {
        let layout = self.layout();
        interaction::aggregate_bars(&layout)
    }

    /// The bar under the pointer, if any.
    #[must_use]
    pub fn bar_at(&mut self, x: f64, y: f64) -> Option<BarAggregate> {
        let layout = self.layout();
        interaction::bar_at(&layout, x, y)
    }

    /// Resolves a tap into per-bar aggregates plus the hit bar index.
    #[must_use]
    pub fn resolve_tap(&mut self, x: f64, y: f64) -> TapResolution {
        let layout = self.layout();
        let resolution = interaction::resolve_tap(&layout, x, y);
        trace!(bars = resolution.bars.len(), hit = ?resolution.hit, "resolved tap");
        resolution
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
