//! EHM animation block (sparse keyframe changesets)
//!
//! Clips store, per animated bone, only the channels that carry a key at each
//! keyframe. Channels without a key at a given time are omitted, not
//! interpolated; the consumer applies each changeset on top of the previous
//! pose.
//!
//! # Layout
//! ```text
//! u64 clip_count                  (0 when no skeleton or no clips)
//! clip_count × {
//!   u64 name_len, u8[name_len] name
//!   f32 duration_seconds          (largest timestamp in the clip)
//!   u8  track_count
//!   track_count × {
//!     u8  bone_id
//!     u64 keyframe_count
//!     keyframe_count × {
//!       f32 keyframe_index
//!       f32 timestamp_seconds
//!       u64 change_count
//!       change_count × { u8 channel_id, f32 value }
//!     }
//!   }
//! }
//! ```
//!
//! Tracks are ordered by bone id, keyframes by index, changes by channel id.

mod channel;
mod types;


// Re-export public API
pub use channel::{CHANNEL_COUNT, Channel};
pub use types::{CHANNEL_CHANGE_SIZE, ChannelChange, EhmClip, EhmKeyframe, EhmTrack};
