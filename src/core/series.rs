use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::render::Color;

pub(crate) type MeasureFn<T> = Box<dyn Fn(&T) -> f64>;
pub(crate) type ColorFn<D, T> = Box<dyn Fn(&D, &T) -> Color>;
pub(crate) type LabelFn<D, T> = Box<dyn Fn(&D, &T, f64) -> Option<String>>;

/// One data series: an ordered domain-to-value mapping plus the accessors
/// that project raw values into chart space.
///
/// The measure and color accessors are constructor arguments, so a series
/// without them cannot be expressed. The label accessor is optional; it
/// receives the domain, the raw value and the entry's percent within this
/// series.
pub struct Series<D, T> {
    name: String,
    data: Vec<(D, T)>,
    measure: MeasureFn<T>,
    color: ColorFn<D, T>,
    label: Option<LabelFn<D, T>>,
}

impl<D, T> Series<D, T> {
    pub fn new(
        name: impl Into<String>,
        data: Vec<(D, T)>,
        measure: impl Fn(&T) -> f64 + 'static,
        color: impl Fn(&D, &T) -> Color + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            data,
            measure: Box::new(measure),
            color: Box::new(color),
            label: None,
        }
    }

    /// Attaches a segment label accessor.
    #[must_use]
    pub fn with_label(mut self, label: impl Fn(&D, &T, f64) -> Option<String> + 'static) -> Self {
        self.label = Some(Box::new(label));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn data(&self) -> &[(D, T)] {
        &self.data
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn measure_of(&self, value: &T) -> f64 {
        (self.measure)(value)
    }

    #[must_use]
    pub fn color_of(&self, domain: &D, value: &T) -> Color {
        (self.color)(domain, value)
    }

    #[must_use]
    pub fn label_of(&self, domain: &D, value: &T, percent: f64) -> Option<String> {
        self.label
            .as_ref()
            .and_then(|label| label(domain, value, percent))
    }
}

impl<D, T> core::fmt::Debug for Series<D, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Series")
            .field("name", &self.name)
            .field("len", &self.data.len())
            .field("measure", &"<fn>")
            .field("color", &"<fn>")
            .field("label", &self.label.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Series<DateTime<Utc>, Decimal> {
    /// Builds a date-keyed, decimal-valued series with a constant fill color.
    ///
    /// Decimal values that cannot be represented as `f64` measure as zero
    /// rather than failing the frame.
    pub fn from_decimal_points(
        name: impl Into<String>,
        points: Vec<(DateTime<Utc>, Decimal)>,
        color: Color,
    ) -> Self {
        Self::new(
            name,
            points,
            |value: &Decimal| value.to_f64().unwrap_or(0.0),
            move |_, _| color,
        )
    }
}

/// Default domain label for date-keyed series, e.g. `Mar 04`.
#[must_use]
pub fn format_day_domain(day: &DateTime<Utc>) -> String {
    day.format("%b %d").to_string()
}
