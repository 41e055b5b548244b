use rangefind_core::Coordinate;

pub use rangefind_core::models::Interval;

pub trait Overlapper<N, T>: Send + Sync
where
    N: Coordinate,
    T: Clone + Send + Sync,
{
    fn build(intervals: Vec<Interval<N, T>>) -> Self
    where
        Self: Sized;

    fn find(&self, start: N, end: N) -> Vec<Interval<N, T>>;

    fn find_iter<'a>(
        &'a self,
        start: N,
        end: N,
    ) -> Box<dyn Iterator<Item = &'a Interval<N, T>> + 'a>;
}
