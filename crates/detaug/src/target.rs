use crate::boxes::BoundingBox;

/// Ground truth accompanying one training image.
///
/// Only `boxes` is co-transformed by the geometric effects; every other
/// field passes through each effect untouched. The box order is preserved
/// by every effect, boxes can only be removed when they degenerate, never
/// reordered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Target {
    /// The bounding boxes of the objects of interest, in pixel coordinates
    /// of the image this target accompanies.
    pub boxes: Vec<BoundingBox>,
    /// Class labels associated 1:1 with the boxes on input. Effects pass
    /// labels through unmodified, re-associating them after filtering is a
    /// caller responsibility.
    pub labels: Vec<i64>,
}

impl Target {
    /// Create a target from a box list, with no labels.
    pub fn new(boxes: Vec<BoundingBox>) -> Self {
        Self {
            boxes,
            labels: Vec::new(),
        }
    }

    /// Create a target from a box list and its class labels.
    pub fn with_labels(boxes: Vec<BoundingBox>, labels: Vec<i64>) -> Self {
        Self { boxes, labels }
    }
}
