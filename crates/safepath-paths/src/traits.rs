use safepath_core::Point;

/// Cost oracle for [`RouteSearch`](crate::RouteSearch).
///
/// Reading a risk may mutate the field (hazard data can age out on read),
/// hence `&mut self`.
pub trait RiskField {
    /// Whether `p` is in bounds and may be entered.
    fn is_valid(&self, p: Point) -> bool;

    /// Risk potential at `p`. Baseline is `1.0`; larger means more dangerous.
    ///
    /// Only called with points for which [`is_valid`](Self::is_valid)
    /// returned `true`.
    fn risk(&mut self, p: Point) -> f64;
}

impl<F: RiskField + ?Sized> RiskField for &mut F {
    fn is_valid(&self, p: Point) -> bool {
        (**self).is_valid(p)
    }

    fn risk(&mut self, p: Point) -> f64 {
        (**self).risk(p)
    }
}
