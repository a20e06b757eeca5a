//! Animation channel ids

use std::fmt;

/// Number of animatable channels per bone
pub const CHANNEL_COUNT: usize = 10;

/// One scalar animation channel of a bone
///
/// The discriminant is the channel id stored in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Channel {
    PositionX = 0,
    PositionY = 1,
    PositionZ = 2,
    ScaleX = 3,
    ScaleY = 4,
    ScaleZ = 5,
    RotationW = 6,
    RotationX = 7,
    RotationY = 8,
    RotationZ = 9,
}

impl Channel {
    /// All channels in ascending id order
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::PositionX,
        Channel::PositionY,
        Channel::PositionZ,
        Channel::ScaleX,
        Channel::ScaleY,
        Channel::ScaleZ,
        Channel::RotationW,
        Channel::RotationX,
        Channel::RotationY,
        Channel::RotationZ,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Position channel for axis 0..3 (x, y, z)
    pub fn position(axis: usize) -> Option<Self> {
        (axis < 3).then(|| Self::ALL[axis])
    }

    /// Scale channel for axis 0..3 (x, y, z)
    pub fn scale(axis: usize) -> Option<Self> {
        (axis < 3).then(|| Self::ALL[3 + axis])
    }

    /// Rotation channel for quaternion component 0..4 (w, x, y, z)
    pub fn rotation(component: usize) -> Option<Self> {
        (component < 4).then(|| Self::ALL[6 + component])
    }

    pub fn is_position(self) -> bool {
        self.id() < 3
    }

    pub fn is_scale(self) -> bool {
        (3..6).contains(&self.id())
    }

    pub fn is_rotation(self) -> bool {
        self.id() >= 6
    }

    /// Vector axis (0 = x, 1 = y, 2 = z) of a non-w channel
    pub fn axis(self) -> Option<usize> {
        match self {
            Channel::RotationW => None,
            c if c.is_rotation() => Some((c.id() - 7) as usize),
            c => Some((c.id() % 3) as usize),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::PositionX => "position.x",
            Channel::PositionY => "position.y",
            Channel::PositionZ => "position.z",
            Channel::ScaleX => "scale.x",
            Channel::ScaleY => "scale.y",
            Channel::ScaleZ => "scale.z",
            Channel::RotationW => "rotation.w",
            Channel::RotationX => "rotation.x",
            Channel::RotationY => "rotation.y",
            Channel::RotationZ => "rotation.z",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
