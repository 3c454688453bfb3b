use nalgebra::{Point3, Vector3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    pub fn lengths(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }
}

pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

pub fn bounding_box<'a, I>(points: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = &'a Point3<f64>>,
{
    let mut iter = points.into_iter();
    let first = *iter.next()?;
    let (min, max) = iter.fold((first, first), |(min, max), p| {
        (min.inf(p), max.sup(p))
    });
    Some(BoundingBox { min, max })
}

/// Principal moments of inertia (diagonal of the inertia tensor) of point masses
/// about `center`.
pub fn moment_of_inertia(
    points: &[Point3<f64>],
    masses: &[f64],
    center: &Point3<f64>,
) -> Option<Vector3<f64>> {
    if points.len() != masses.len() {
        return None;
    }
    let moit = points
        .iter()
        .zip(masses.iter())
        .fold(Vector3::zeros(), |acc, (p, &m)| {
            let r = p - center;
            acc + Vector3::new(
                m * (r.y * r.y + r.z * r.z),
                m * (r.x * r.x + r.z * r.z),
                m * (r.x * r.x + r.y * r.y),
            )
        });
    Some(moit)
}
