use crate::{CoordinateSystem, Point};

impl<Cs: CoordinateSystem> rstar::Point for Point<Cs> {
    type Scalar = f64;

    const DIMENSIONS: usize = Cs::DIMENSION;

    fn generate(mut generator: impl FnMut(usize) -> f64) -> Self {
        let mut coords = Cs::zero_coords();
        for (i, c) in coords.as_mut().iter_mut().enumerate() {
            *c = generator(i);
        }
        Point::from_coords(coords)
    }

    fn nth(&self, index: usize) -> f64 {
        self.coord(index)
    }

    fn nth_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.coords_mut()[index]
    }
}

#[cfg(test)]
mod test {
    use crate::{FeatureSpace, Point};
    use rstar::RTree;

    #[test]
    fn points_can_live_in_an_rtree() {
        let tree = RTree::bulk_load(vec![
            Point::<FeatureSpace<3>>::new([0.0, 0.0, 0.0]),
            Point::new([1.0, 1.0, 1.0]),
            Point::new([5.0, 5.0, 5.0]),
        ]);
        let nearest = tree
            .nearest_neighbor(&Point::new([0.9, 0.9, 0.9]))
            .unwrap();
        assert_eq!(nearest, &Point::new([1.0, 1.0, 1.0]));
    }
}
