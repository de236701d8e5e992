/// A pair of `(x, y)` values in **graph** units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GraphPoint<T>(pub T, pub T);

impl<T> From<(T, T)> for GraphPoint<T> {
    fn from((x, y): (T, T)) -> GraphPoint<T> {
        GraphPoint(x, y)
    }
}

/// An ordered series of points sampled from an equation, ready to be handed to a graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurveSeries {
    /// The title of the series, made of the locale's graph title and the equation.
    pub title: String,

    /// The sampled points, in sampling order.
    pub points: Vec<GraphPoint<f64>>,
}

impl CurveSeries {
    /// Creates a new series with the given title and points.
    pub fn new(title: impl Into<String>, points: Vec<GraphPoint<f64>>) -> Self {
        Self { title: title.into(), points }
    }

    /// Creates a new series with no points.
    pub fn empty(title: impl Into<String>) -> Self {
        Self::new(title, Vec::new())
    }

    /// Returns the number of points in the series.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
