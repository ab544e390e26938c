use core::fmt::Display;
use core::hash::Hash;
use std::collections::HashMap;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::core::percent::percentages;
use crate::core::series::Series;
use crate::core::types::ValueAxis;
use crate::render::Color;

/// One series' contribution to one stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub value: f64,
    pub color: Color,
    pub label: Option<String>,
}

/// All segments drawn for one domain, in series order.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack<D> {
    pub domain: D,
    pub label: String,
    pub segments: SmallVec<[Segment; 4]>,
    pub corner_radius: f64,
}

impl<D> Stack<D> {
    /// Sum of this stack's segment values.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.segments.iter().map(|segment| segment.value).sum()
    }
}

/// Stack-building options shared by every stack of one collection.
pub struct StackBuildConfig<D> {
    pub value_axis: ValueAxis,
    pub inverted: bool,
    pub corner_radius_px: f64,
    pub domain_formatter: Option<Box<dyn Fn(&D) -> String>>,
}

impl<D> StackBuildConfig<D> {
    #[must_use]
    pub fn new(value_axis: ValueAxis) -> Self {
        Self {
            value_axis,
            inverted: false,
            corner_radius_px: 0.0,
            domain_formatter: None,
        }
    }

    #[must_use]
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    #[must_use]
    pub fn with_corner_radius(mut self, corner_radius_px: f64) -> Self {
        self.corner_radius_px = corner_radius_px;
        self
    }

    /// Overrides the default `Display`-based domain label formatting.
    #[must_use]
    pub fn with_domain_formatter(mut self, formatter: impl Fn(&D) -> String + 'static) -> Self {
        self.domain_formatter = Some(Box::new(formatter));
        self
    }
}

impl<D> Default for StackBuildConfig<D> {
    fn default() -> Self {
        Self::new(ValueAxis::Vertical)
    }
}

impl<D> core::fmt::Debug for StackBuildConfig<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StackBuildConfig")
            .field("value_axis", &self.value_axis)
            .field("inverted", &self.inverted)
            .field("corner_radius_px", &self.corner_radius_px)
            .field("domain_formatter", &self.domain_formatter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// The full ordered stack model for one chart, plus chart-level orientation.
///
/// Immutable once built: data or configuration changes produce a brand-new
/// collection, which is what makes old/new transition interpolation safe.
#[derive(Debug, Clone, PartialEq)]
pub struct StackCollection<D> {
    stacks: Vec<Stack<D>>,
    value_axis: ValueAxis,
    inverted: bool,
}

impl<D> StackCollection<D> {
    #[must_use]
    pub fn empty(value_axis: ValueAxis, inverted: bool) -> Self {
        Self {
            stacks: Vec::new(),
            value_axis,
            inverted,
        }
    }

    pub(crate) fn from_parts(stacks: Vec<Stack<D>>, value_axis: ValueAxis, inverted: bool) -> Self {
        Self {
            stacks,
            value_axis,
            inverted,
        }
    }

    #[must_use]
    pub fn stacks(&self) -> &[Stack<D>] {
        &self.stacks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    #[must_use]
    pub fn value_axis(&self) -> ValueAxis {
        self.value_axis
    }

    #[must_use]
    pub fn inverted(&self) -> bool {
        self.inverted
    }
}

impl<D: Eq + Hash> StackCollection<D> {
    /// Two collections are compatible when they cover the same domain-key
    /// set, regardless of how values are distributed across series.
    #[must_use]
    pub fn is_compatible_with(&self, other: &Self) -> bool {
        if self.stacks.len() != other.stacks.len() {
            return false;
        }
        let domains: std::collections::HashSet<&D> =
            self.stacks.iter().map(|stack| &stack.domain).collect();
        other.stacks.iter().all(|stack| domains.contains(&stack.domain))
    }

    /// True when every domain maps to the same segment values in both
    /// collections. Colors and labels are not compared; a transition only
    /// cares about geometry-affecting changes.
    #[must_use]
    pub fn has_same_values(&self, other: &Self) -> bool {
        if self.stacks.len() != other.stacks.len() {
            return false;
        }
        let by_domain: HashMap<&D, &Stack<D>> = self
            .stacks
            .iter()
            .map(|stack| (&stack.domain, stack))
            .collect();
        other.stacks.iter().all(|stack| {
            by_domain.get(&stack.domain).is_some_and(|own| {
                own.segments.len() == stack.segments.len()
                    && own
                        .segments
                        .iter()
                        .zip(stack.segments.iter())
                        .all(|(a, b)| a.value == b.value)
            })
        })
    }
}

/// Transforms a list of series into a unified per-domain stack collection.
///
/// Domains appear in first-seen order scanning series in input order; segment
/// order within a stack equals series order. Per-series percentages (fed to
/// the label accessor) are computed over that series' own measures. The
/// output is byte-for-byte deterministic for identical inputs.
#[must_use]
pub fn build_stacks<D, T>(
    series: &[Series<D, T>],
    config: &StackBuildConfig<D>,
) -> StackCollection<D>
where
    D: Clone + Eq + Hash + Display,
{
    let corner_radius = if config.corner_radius_px.is_finite() {
        config.corner_radius_px.max(0.0)
    } else {
        0.0
    };

    let mut stacks: IndexMap<D, Stack<D>> = IndexMap::new();

    for one_series in series {
        let measures: Vec<f64> = one_series
            .data()
            .iter()
            .map(|(_, value)| sanitize_measure(one_series.measure_of(value)))
            .collect();
        let percents = percentages(&measures);

        for (index, (domain, value)) in one_series.data().iter().enumerate() {
            let stack = stacks.entry(domain.clone()).or_insert_with(|| Stack {
                domain: domain.clone(),
                label: match &config.domain_formatter {
                    Some(formatter) => formatter(domain),
                    None => domain.to_string(),
                },
                segments: SmallVec::new(),
                corner_radius,
            });
            stack.segments.push(Segment {
                value: measures[index],
                color: one_series.color_of(domain, value),
                label: one_series.label_of(domain, value, percents[index]),
            });
        }
    }

    StackCollection {
        stacks: stacks.into_values().collect(),
        value_axis: config.value_axis,
        inverted: config.inverted,
    }
}

/// Non-finite measures never crash the frame; they contribute zero extent.
fn sanitize_measure(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
