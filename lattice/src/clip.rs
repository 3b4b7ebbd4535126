use crate::Location;
use geo::{
    geometry::{Coord, LineString, Point, Polygon},
    Intersects,
};

/// Returns the points that lie inside or on the boundary of the
/// polygon traced by `route`.
///
/// `route` is closed implicitly, last vertex back to the first. Output
/// keeps the input order but carries no grid position.
pub fn clip<I>(route: &[Location], points: I) -> Vec<Location>
where
    I: IntoIterator<Item = Location>,
{
    let polygon = Polygon::new(
        route.iter().copied().map(Coord::from).collect::<LineString>(),
        vec![],
    );
    points
        .into_iter()
        .filter(|location| polygon.intersects(&Point::from(*location)))
        .collect()
}
