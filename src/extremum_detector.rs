use core::fmt;

use num_traits::Float;
use tracing::{debug, trace};

use crate::{Classification, DetectorConfig, Extremum, ExtremumSink, Result, RingBuffer, Tick};

/// Classifies `price` against every price yielded by `window`
///
/// Prices equal to `price` are skipped. The result is [`Extremum::Minima`] when every
/// remaining price is strictly greater, [`Extremum::Maxima`] when every remaining price is
/// strictly lower, and [`Extremum::Regular`] otherwise. A window with nothing but ties
/// (or nothing at all) is a minima, minima being checked first.
///
/// NaN never compares equal or ordered, so a NaN on either side makes the result regular.
///
/// # Arguments
///
/// * `window` - The prices to compare against, may include `price` itself
/// * `price` - The price being classified
///
/// # Returns
///
/// * `Extremum` - Classification of `price`
///
/// # Examples
///
/// ```
/// # use ta_extrema::{classify, Extremum};
/// assert_eq!(classify([5.0, 3.0, 1.0], 1.0), Extremum::Minima);
/// assert_eq!(classify([5.0, 3.0, 1.0, 4.0], 4.0), Extremum::Regular);
/// assert_eq!(classify([2.0, 2.0], 2.0), Extremum::Minima);
/// ```
#[inline]
pub fn classify<T, I>(window: I, price: T) -> Extremum
where
    T: Float,
    I: IntoIterator<Item = T>,
{
    let mut is_minima = true;
    let mut is_maxima = true;

    for other in window {
        if other == price {
            continue;
        }
        is_minima &= other > price;
        is_maxima &= other < price;
        if !is_minima && !is_maxima {
            break;
        }
    }

    if is_minima {
        Extremum::Minima
    } else if is_maxima {
        Extremum::Maxima
    } else {
        Extremum::Regular
    }
}

/// # Local Extremum Detection over Tick Streams
///
/// Classifies every incoming tick as a local minima, maxima or regular point relative to
/// the most recent `2 * threshold + 1` ticks.
///
/// The detector keeps those ticks in a fixed-size [`RingBuffer`] allocated once at
/// construction, so processing a tick never allocates and costs `O(threshold)`. No tick
/// is classified until `threshold + 1` ticks have been seen (the warm-up). From then on,
/// each new tick is compared against every tick in the window, itself included; ties
/// are ignored.
///
/// The comparison is backward-looking: the tick judged is always the newest one, against
/// up to `2 * threshold` older ticks. The window is not centered on a past tick.
///
/// Classifications are returned to the caller and, when a sink is configured, delivered
/// to it synchronously.
///
/// The detector is meant to be fed by a single caller, strictly in sequence.
pub struct ExtremumDetector<T, S = fn(Classification<T>)> {
    /// Half-window radius
    threshold: usize,
    /// The most recent `2 * threshold + 1` ticks
    buffer: RingBuffer<T>,
    /// Receiver of classification events
    sink: Option<S>,
    /// Last tick classified as a minima
    latest_minima: Option<Tick<T>>,
    /// Last tick classified as a maxima
    latest_maxima: Option<Tick<T>>,
}

impl<T> ExtremumDetector<T>
where
    T: Float + Default,
{
    /// Creates a detector without a sink
    ///
    /// Classifications are still computed and returned by
    /// [`process_tick`](Self::process_tick).
    ///
    /// # Arguments
    ///
    /// * `threshold` - Half-window radius, must be positive
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The detector, or [`ExtremaError::InvalidThreshold`](crate::ExtremaError::InvalidThreshold)
    pub fn detached(threshold: usize) -> Result<Self> {
        Self::new(threshold, None)
    }
}

impl<T, S> ExtremumDetector<T, S>
where
    T: Float + Default,
    S: ExtremumSink<T>,
{
    /// Creates a new detector
    ///
    /// # Arguments
    ///
    /// * `threshold` - Half-window radius, must be positive
    /// * `sink` - Optional receiver of classification events
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The detector, or [`ExtremaError::InvalidThreshold`](crate::ExtremaError::InvalidThreshold)
    ///   if `threshold` is zero or `2 * threshold + 1` overflows `usize`
    pub fn new(threshold: usize, sink: Option<S>) -> Result<Self> {
        let window_size = DetectorConfig::new(threshold).window_size()?;
        debug!(
            threshold,
            window_size,
            has_sink = sink.is_some(),
            "extremum detector created"
        );

        Ok(Self {
            threshold,
            buffer: RingBuffer::new(window_size),
            sink,
            latest_minima: None,
            latest_maxima: None,
        })
    }

    /// Half-window radius
    pub const fn threshold(&self) -> usize {
        self.threshold
    }

    /// Number of ticks the window holds once full, `2 * threshold + 1`
    pub fn window_size(&self) -> usize {
        self.buffer.capacity()
    }

    /// Number of ticks currently in the window
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` once the window holds at least `threshold + 1` ticks, i.e. the
    /// warm-up is over and every tick pushed gets classified
    pub fn is_ready(&self) -> bool {
        self.buffer.len() > self.threshold
    }

    /// Iterates over the ticks in the window, oldest first
    pub fn window(&self) -> impl Iterator<Item = Tick<T>> + '_ {
        self.buffer.iter()
    }

    /// Read access to the underlying buffer
    pub fn buffer(&self) -> &RingBuffer<T> {
        &self.buffer
    }

    /// The configured sink, if any
    pub fn sink(&self) -> Option<&S> {
        self.sink.as_ref()
    }

    /// Mutable access to the configured sink, if any
    pub fn sink_mut(&mut self) -> Option<&mut S> {
        self.sink.as_mut()
    }

    /// Consumes the detector, returning its sink
    pub fn into_sink(self) -> Option<S> {
        self.sink
    }

    /// Processes one tick
    ///
    /// Pushes the tick into the window, evicting the oldest tick once the window is full.
    /// During warm-up (fewer than `threshold + 1` ticks buffered) nothing is classified.
    /// Afterwards the tick is classified with [`classify`] against the whole window and
    /// the classification is delivered to the sink.
    ///
    /// # Arguments
    ///
    /// * `price` - Tick price, any value including NaN and infinities
    /// * `time` - Tick timestamp, echoed back untouched
    ///
    /// # Returns
    ///
    /// * `Option<Extremum>` - The classification, or `None` during warm-up
    ///
    /// # Examples
    ///
    /// ```
    /// # use ta_extrema::{ExtremumDetector, Extremum};
    /// let mut detector = ExtremumDetector::detached(2).unwrap();
    /// let results: Vec<_> = [5.0, 3.0, 1.0, 4.0, 6.0]
    ///     .into_iter()
    ///     .zip(100..)
    ///     .map(|(price, time)| detector.process_tick(price, time))
    ///     .collect();
    ///
    /// assert_eq!(
    ///     results,
    ///     [
    ///         None,
    ///         None,
    ///         Some(Extremum::Minima),
    ///         Some(Extremum::Regular),
    ///         Some(Extremum::Maxima),
    ///     ]
    /// );
    /// ```
    pub fn process_tick(&mut self, price: T, time: i64) -> Option<Extremum> {
        self.buffer.push(price, time);
        if !self.is_ready() {
            return None;
        }

        let kind = classify(self.buffer.prices(), price);
        trace!(%kind, time, "tick classified");

        match kind {
            Extremum::Minima => self.latest_minima = Some(Tick::new(price, time)),
            Extremum::Maxima => self.latest_maxima = Some(Tick::new(price, time)),
            Extremum::Regular => {}
        }

        if let Some(sink) = self.sink.as_mut() {
            sink.on_classification(Classification { kind, price, time });
        }
        Some(kind)
    }

    /// Processes one [`Tick`], see [`process_tick`](Self::process_tick)
    #[inline]
    pub fn process(&mut self, tick: Tick<T>) -> Option<Extremum> {
        self.process_tick(tick.price, tick.time)
    }

    /// Processes a sequence of ticks in order
    ///
    /// Useful to replay recorded history before switching to live ticks.
    ///
    /// # Returns
    ///
    /// * `Option<Extremum>` - Classification of the last tick, `None` if it fell in the warm-up
    pub fn process_all<I>(&mut self, ticks: I) -> Option<Extremum>
    where
        I: IntoIterator<Item = Tick<T>>,
    {
        ticks.into_iter().fold(None, |_, tick| self.process(tick))
    }

    /// Last tick classified as a minima since construction or the last reset
    pub const fn latest_minima(&self) -> Option<Tick<T>> {
        self.latest_minima
    }

    /// Last tick classified as a maxima since construction or the last reset
    pub const fn latest_maxima(&self) -> Option<Tick<T>> {
        self.latest_maxima
    }

    /// Price distance from the latest minima to the latest maxima
    ///
    /// Positive when the latest maxima is above the latest minima.
    ///
    /// # Returns
    ///
    /// * `Option<T>` - `latest_maxima - latest_minima`, or `None` until both have been seen
    ///
    /// # Examples
    ///
    /// ```
    /// # use ta_extrema::ExtremumDetector;
    /// # use assert_approx_eq::assert_approx_eq;
    /// let mut detector = ExtremumDetector::detached(1).unwrap();
    /// for (time, price) in [10.2_f64, 10.1, 10.4].into_iter().enumerate() {
    ///     detector.process_tick(price, time as i64);
    /// }
    ///
    /// assert_approx_eq!(detector.swing().unwrap(), 0.3, 1e-9);
    /// ```
    pub fn swing(&self) -> Option<T> {
        self.latest_maxima
            .zip(self.latest_minima)
            .map(|(max, min)| max.price - min.price)
    }

    /// Clears the window and the latest extrema
    ///
    /// Threshold and sink are kept. The warm-up starts over.
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The detector
    pub fn reset(&mut self) -> &mut Self {
        debug!(threshold = self.threshold, "extremum detector reset");
        self.buffer.clear();
        self.latest_minima = None;
        self.latest_maxima = None;
        self
    }
}

impl<T: fmt::Debug, S> fmt::Debug for ExtremumDetector<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtremumDetector")
            .field("threshold", &self.threshold)
            .field("buffer", &self.buffer)
            .field("has_sink", &self.sink.is_some())
            .field("latest_minima", &self.latest_minima)
            .field("latest_maxima", &self.latest_maxima)
            .finish()
    }
}
