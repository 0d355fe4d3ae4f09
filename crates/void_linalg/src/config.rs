//! Clip-space conventions
//!
//! Projection constructors take a `z_zero_to_one` flag and come in
//! right-/left-handed variants. [`ClipSpace`] bundles both choices so a
//! renderer can configure them once and pass them to
//! [`Matrix4::perspective_in`](crate::Matrix4::perspective_in) and friends.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Depth range of normalized device coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DepthRange {
    /// `[-1, 1]` (OpenGL)
    #[default]
    NegativeOneToOne,
    /// `[0, 1]` (Vulkan, Direct3D, Metal, wgpu)
    ZeroToOne,
}

impl DepthRange {
    /// Value of the `z_zero_to_one` flag taken by the projection constructors
    #[inline]
    pub fn is_zero_to_one(self) -> bool {
        self == DepthRange::ZeroToOne
    }
}

/// Handedness of the view-space coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Handedness {
    /// Camera looks down `-Z`
    #[default]
    Right,
    /// Camera looks down `+Z`
    Left,
}

/// Clip-space configuration used by the `*_in` projection constructors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClipSpace {
    /// NDC depth range
    pub depth: DepthRange,

    /// View-space handedness
    pub handedness: Handedness,
}

impl ClipSpace {
    /// Right-handed, depth in `[-1, 1]`
    pub const OPENGL: Self = Self {
        depth: DepthRange::NegativeOneToOne,
        handedness: Handedness::Right,
    };

    /// Right-handed, depth in `[0, 1]`
    pub const VULKAN: Self = Self {
        depth: DepthRange::ZeroToOne,
        handedness: Handedness::Right,
    };

    /// Left-handed, depth in `[0, 1]`
    pub const DIRECT3D: Self = Self {
        depth: DepthRange::ZeroToOne,
        handedness: Handedness::Left,
    };

    /// Set the depth range
    pub fn with_depth(mut self, depth: DepthRange) -> Self {
        self.depth = depth;
        self
    }

    /// Set the handedness
    pub fn with_handedness(mut self, handedness: Handedness) -> Self {
        self.handedness = handedness;
        self
    }

    #[inline]
    pub fn is_zero_to_one(&self) -> bool {
        self.depth.is_zero_to_one()
    }

    #[inline]
    pub fn is_left_handed(&self) -> bool {
        self.handedness == Handedness::Left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(ClipSpace::default(), ClipSpace::OPENGL);
        assert!(!ClipSpace::OPENGL.is_zero_to_one());
        assert!(ClipSpace::VULKAN.is_zero_to_one());
        assert!(!ClipSpace::VULKAN.is_left_handed());
        assert!(ClipSpace::DIRECT3D.is_left_handed());
    }

    #[test]
    fn test_builder() {
        let clip = ClipSpace::OPENGL
            .with_depth(DepthRange::ZeroToOne)
            .with_handedness(Handedness::Left);
        assert_eq!(clip, ClipSpace::DIRECT3D);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_clip_space_serialization() {
        let clip = ClipSpace::VULKAN;
        let serialized = bincode::serialize(&clip).unwrap();
        let deserialized: ClipSpace = bincode::deserialize(&serialized).unwrap();
        assert_eq!(clip, deserialized);
    }
}
