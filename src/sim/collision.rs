//! Axis-aligned box collision
//!
//! Every entity is a scaled unit cube. Boxes are derived on demand from the
//! transform and never stored. Rotation is ignored.

use glam::Vec3;

use super::world::{Entity, Transform};

/// Axis-aligned bounding box with inclusive bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box spanning `position ± scale / 2` on each axis
    pub fn from_position_scale(position: Vec3, scale: Vec3) -> Self {
        let half = scale * 0.5;
        Self {
            min: position - half,
            max: position + half,
        }
    }

    pub fn from_transform(transform: &Transform) -> Self {
        Self::from_position_scale(transform.translation, transform.scale)
    }

    /// Closed-interval overlap on all three axes; touching faces count.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

/// Bounding box of an entity, if it has a transform
pub fn bounding_box(entity: &Entity) -> Option<Aabb> {
    entity.transform().map(Aabb::from_transform)
}

/// Whether two entities overlap. Entities without a transform never collide.
pub fn entities_overlap(a: &Entity, b: &Entity) -> bool {
    match (bounding_box(a), bounding_box(b)) {
        (Some(box_a), Some(box_b)) => box_a.overlaps(&box_b),
        _ => false,
    }
}

/// First candidate (in iteration order) whose box overlaps the subject.
///
/// Order decides which obstacle is reported when several overlap at once.
pub fn first_overlapping<'a, I>(subject: &Entity, candidates: I) -> Option<&'a Entity>
where
    I: IntoIterator<Item = &'a Entity>,
{
    let Some(subject_box) = bounding_box(subject) else {
        log::debug!("{:?} has no transform; skipping collision", subject.kind);
        return None;
    };
    candidates.into_iter().find(|candidate| {
        bounding_box(candidate).is_some_and(|candidate_box| subject_box.overlaps(&candidate_box))
    })
}

/// Like [`first_overlapping`] but returns the index of the hit
pub fn first_overlapping_index<'a, I>(subject: &Entity, candidates: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Entity>,
{
    let subject_box = bounding_box(subject)?;
    candidates.into_iter().position(|candidate| {
        bounding_box(candidate).is_some_and(|candidate_box| subject_box.overlaps(&candidate_box))
    })
}
