use core::fmt;

/// A single `(price, time)` observation
///
/// `time` is an opaque external timestamp. It is carried through untouched and never
/// checked for monotonicity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick<T> {
    /// Trade or quote price
    pub price: T,
    /// External timestamp
    pub time: i64,
}

impl<T> Tick<T> {
    /// Creates a new tick
    pub const fn new(price: T, time: i64) -> Self {
        Self { price, time }
    }
}

impl<T> From<(T, i64)> for Tick<T> {
    fn from((price, time): (T, i64)) -> Self {
        Self::new(price, time)
    }
}

/// Where the newest tick sits relative to the rest of the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Extremum {
    /// Strictly below every other distinct price in the window
    Minima,
    /// Strictly above every other distinct price in the window
    Maxima,
    /// Neither
    Regular,
}

impl Extremum {
    /// Returns the tag emitted to hosts: `"minima"`, `"maxima"` or `"regular"`
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minima => "minima",
            Self::Maxima => "maxima",
            Self::Regular => "regular",
        }
    }

    /// Returns `true` for minima and maxima
    pub const fn is_extremum(&self) -> bool {
        !matches!(self, Self::Regular)
    }
}

impl fmt::Display for Extremum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified tick, as delivered to an [`ExtremumSink`](crate::ExtremumSink)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Classification<T> {
    /// Classification of the tick
    pub kind: Extremum,
    /// Price of the classified tick, echoed from the input
    pub price: T,
    /// Timestamp of the classified tick, echoed from the input
    pub time: i64,
}

impl<T: Copy> Classification<T> {
    /// Returns the classified tick
    pub const fn tick(&self) -> Tick<T> {
        Tick::new(self.price, self.time)
    }
}
