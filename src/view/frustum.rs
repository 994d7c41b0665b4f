use glam::{Mat4, Vec3, Vec4};

use crate::model::world::CUBE_SIZE;

/// Plane `ax + by + cz + d = 0` with the normal pointing into the frustum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane(pub Vec4);

impl Plane {
    /// Scales all four coefficients by 1/|(a, b, c)|. A zero normal is left as is.
    pub fn normalize(self) -> Self {
        let length = self.0.truncate().length();
        if length == 0.0 {
            self
        } else {
            Plane(self.0 / length)
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.0.truncate()
    }

    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal().dot(point) + self.0.w
    }

    /// Extent of an axis-aligned box projected onto the plane normal.
    pub fn projected_radius(&self, half_extents: Vec3) -> f32 {
        half_extents.dot(self.normal().abs())
    }
}

/// Frustum planes in storage order: left, right, bottom, top, near, far.
///
/// The discriminant is the index into [`Frustum::planes`], and the order
/// follows the row pairs of the extraction (row3 ± row0, row3 ± row1,
/// row3 ± row2). [`Frustum::culling_plane`] reports the first match in
/// this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumPlane {
    Left = 0,
    Right = 1,
    Bottom = 2,
    Top = 3,
    Near = 4,
    Far = 5,
}

impl FrustumPlane {
    pub const ALL: [FrustumPlane; 6] = [
        FrustumPlane::Left,
        FrustumPlane::Right,
        FrustumPlane::Bottom,
        FrustumPlane::Top,
        FrustumPlane::Near,
        FrustumPlane::Far,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Completely behind at least one plane.
    Outside,
    Intersecting,
    /// Completely in front of every plane.
    Inside,
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        self != Visibility::Outside
    }
}

/// View frustum as 6 planes, rebuilt every frame from the camera matrices.
#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    /// left, right, bottom, top, near, far
    pub planes: [Plane; 6],
}

impl Frustum {
    pub fn update(projection: &Mat4, view: &Mat4) -> Self {
        Self::from_view_projection(&(*projection * *view))
    }

    /// Gribb-Hartmann extraction from the rows of the clip matrix
    /// (OpenGL depth range, so near is row3 + row2).
    pub fn from_view_projection(clip: &Mat4) -> Self {
        let row0 = clip.row(0);
        let row1 = clip.row(1);
        let row2 = clip.row(2);
        let row3 = clip.row(3);

        let planes = [
            Plane(row3 + row0).normalize(),
            Plane(row3 - row0).normalize(),
            Plane(row3 + row1).normalize(),
            Plane(row3 - row1).normalize(),
            Plane(row3 + row2).normalize(),
            Plane(row3 - row2).normalize(),
        ];

        Self { planes }
    }

    pub fn plane(&self, which: FrustumPlane) -> &Plane {
        &self.planes[which as usize]
    }

    /// Conservative AABB test. May call a box just outside a corner
    /// `Intersecting`, never calls a visible box `Outside`.
    pub fn classify(&self, center: Vec3, half_extents: Vec3) -> Visibility {
        let mut inside = true;
        for plane in &self.planes {
            let d = plane.signed_distance(center);
            let r = plane.projected_radius(half_extents);
            if d < -r {
                return Visibility::Outside;
            }
            if d < r {
                inside = false;
            }
        }
        if inside {
            Visibility::Inside
        } else {
            Visibility::Intersecting
        }
    }

    pub fn is_visible(&self, center: Vec3, half_extents: Vec3) -> bool {
        self.classify(center, half_extents).is_visible()
    }

    /// Single block test; `center` is the block centre.
    pub fn is_cube_visible(&self, center: Vec3) -> bool {
        self.is_visible(center, Vec3::splat(CUBE_SIZE * 0.5))
    }

    /// First plane the box lies entirely behind, if any.
    pub fn culling_plane(&self, center: Vec3, half_extents: Vec3) -> Option<FrustumPlane> {
        FrustumPlane::ALL.into_iter().find(|&which| {
            let plane = self.plane(which);
            plane.signed_distance(center) < -plane.projected_radius(half_extents)
        })
    }
}
