/// VisibilitySet: the frame's published output, plus the full frame report.
///
/// Ephemeral: rebuilt wholesale every frame, never patched.

use rustc_hash::FxHashSet;
use crate::camera::FrustumCorners;
use crate::scene::ObjectId;
use super::line_of_sight::LineOfSight;
use super::visibility_tester::Occlusion;

/// Candidates judged visible, in candidate registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibilitySet {
    visible: Vec<ObjectId>,
    lookup: FxHashSet<ObjectId>,
}

impl VisibilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a candidate. Duplicates are ignored.
    pub fn insert(&mut self, candidate: ObjectId) -> bool {
        if self.lookup.insert(candidate) {
            self.visible.push(candidate);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, candidate: ObjectId) -> bool {
        self.lookup.contains(&candidate)
    }

    pub fn as_slice(&self) -> &[ObjectId] {
        &self.visible
    }

    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.visible.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn clear(&mut self) {
        self.visible.clear();
        self.lookup.clear();
    }
}

impl FromIterator<ObjectId> for VisibilitySet {
    fn from_iter<I: IntoIterator<Item = ObjectId>>(iter: I) -> Self {
        let mut set = Self::new();
        for candidate in iter {
            set.insert(candidate);
        }
        set
    }
}

/// Per-frame counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Registered candidates considered this frame
    pub candidates: u32,
    /// Candidates whose proxy could not be resolved (skipped)
    pub candidates_skipped: u32,
    /// Occluders that produced a volume
    pub occluders: u32,
    /// Occluders skipped (absent, no bounds, viewer inside)
    pub occluders_skipped: u32,
    /// Candidates proven fully inside some occlusion volume
    pub fully_occluded: u32,
    /// Candidates rejected by the frustum box test
    pub outside_frustum: u32,
    /// Ray casts issued
    pub rays_cast: u32,
    /// Candidates published as visible
    pub visible: u32,
}

/// Everything computed for one frame.
#[derive(Debug, Clone)]
pub struct FrameVisibility {
    /// The published set
    pub visible: VisibilitySet,
    /// Containment results, in resolution order
    pub occluded: Vec<Occlusion>,
    /// Line-of-sight outcome per candidate that reached that stage
    pub line_of_sight: Vec<(ObjectId, LineOfSight)>,
    /// Frustum corners of the frame's viewer
    pub corners: FrustumCorners,
    pub stats: FrameStats,
}

impl FrameVisibility {
    /// Occluder that fully contains `candidate`, if any.
    pub fn occluder_of(&self, candidate: ObjectId) -> Option<ObjectId> {
        self.occluded.iter()
            .find(|o| o.candidate == candidate)
            .map(|o| o.occluder)
    }

    pub fn is_fully_occluded(&self, candidate: ObjectId) -> bool {
        self.occluder_of(candidate).is_some()
    }

    pub fn line_of_sight_of(&self, candidate: ObjectId) -> Option<LineOfSight> {
        self.line_of_sight.iter()
            .find(|(c, _)| *c == candidate)
            .map(|(_, los)| *los)
    }
}
