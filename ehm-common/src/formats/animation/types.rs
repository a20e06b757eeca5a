//! Animation data types

use super::Channel;

/// Size of one serialized channel change (u8 id + f32 value)
pub const CHANNEL_CHANGE_SIZE: usize = 5;

/// A single keyed channel value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelChange {
    pub channel: Channel,
    pub value: f32,
}

impl ChannelChange {
    pub const SIZE: usize = CHANNEL_CHANGE_SIZE;

    pub fn new(channel: Channel, value: f32) -> Self {
        Self { channel, value }
    }

    /// Write to raw bytes (5 bytes)
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0] = self.channel.id();
        bytes[1..5].copy_from_slice(&self.value.to_le_bytes());
        bytes
    }

    /// Parse from raw bytes. Returns `None` for short input or an unknown channel id.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            channel: Channel::from_id(bytes[0])?,
            value: f32::from_le_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]),
        })
    }
}

/// Changeset: the channels keyed at one keyframe index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EhmKeyframe {
    /// Source keyframe index (frame number)
    pub index: f32,
    /// `index / playback_rate`
    pub timestamp: f32,
    /// Keyed channels, ascending channel id, at most one entry per channel
    pub changes: Vec<ChannelChange>,
}

impl EhmKeyframe {
    pub fn value(&self, channel: Channel) -> Option<f32> {
        self.changes
            .iter()
            .find(|c| c.channel == channel)
            .map(|c| c.value)
    }

    pub fn encoded_size(&self) -> usize {
        4 + 4 + 8 + self.changes.len() * CHANNEL_CHANGE_SIZE
    }
}

/// All changesets of one bone within a clip
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EhmTrack {
    pub bone: u8,
    /// Ascending keyframe index
    pub keyframes: Vec<EhmKeyframe>,
}

impl EhmTrack {
    pub fn encoded_size(&self) -> usize {
        1 + 8 + self
            .keyframes
            .iter()
            .map(EhmKeyframe::encoded_size)
            .sum::<usize>()
    }
}

/// A named animation clip
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EhmClip {
    pub name: String,
    /// Largest timestamp across all tracks (0.0 for an empty clip)
    pub duration: f32,
    /// Ascending bone id, one track per animated bone
    pub tracks: Vec<EhmTrack>,
}

impl EhmClip {
    pub fn track(&self, bone: u8) -> Option<&EhmTrack> {
        self.tracks.iter().find(|t| t.bone == bone)
    }

    pub fn encoded_size(&self) -> usize {
        8 + self.name.len()
            + 4
            + 1
            + self
                .tracks
                .iter()
                .map(EhmTrack::encoded_size)
                .sum::<usize>()
    }
}
