use crate::Classification;

/// Receiver of classification events
///
/// Called synchronously from [`ExtremumDetector::process_tick`](crate::ExtremumDetector::process_tick),
/// once per classified tick. Panics raised by a sink are not caught.
///
/// Every `FnMut(Classification<T>)` is a sink. A host that needs to keep its own handle
/// on the receiving end shares it with the closure through `Rc<RefCell<_>>` rather than
/// a back-reference, so the receiver lives as long as either side holds it.
///
/// # Examples
///
/// ```
/// # use std::{cell::RefCell, rc::Rc};
/// # use ta_extrema::{Classification, ExtremumDetector, Extremum};
/// let events = Rc::new(RefCell::new(Vec::new()));
/// let sink = {
///     let events = Rc::clone(&events);
///     move |c: Classification<f64>| events.borrow_mut().push(c.kind)
/// };
///
/// let mut detector = ExtremumDetector::new(1, Some(sink)).unwrap();
/// for (i, price) in [2.0, 1.0, 3.0].into_iter().enumerate() {
///     detector.process_tick(price, i as i64);
/// }
///
/// assert_eq!(*events.borrow(), [Extremum::Minima, Extremum::Maxima]);
/// ```
pub trait ExtremumSink<T> {
    /// Handles one classified tick
    fn on_classification(&mut self, classification: Classification<T>);
}

impl<T, F> ExtremumSink<T> for F
where
    F: FnMut(Classification<T>),
{
    #[inline]
    fn on_classification(&mut self, classification: Classification<T>) {
        self(classification)
    }
}
