//! Animation compressor (keyframe curves -> sparse per-bone changesets)
//!
//! Curves are authored per channel. The compressor groups keys by bone and
//! frame so that each changeset carries only the channels actually keyed at
//! that frame. Nothing is resampled or interpolated.

use std::cmp::Ordering;

use ehm_common::{Channel, ChannelChange, EhmClip, EhmKeyframe, EhmTrack};
use hashbrown::HashSet;

use crate::axis::AxisMap;
use crate::error::{ExportError, ExportWarning};
use crate::scene::{AnimatedProperty, AnimationClipSnapshot, ChannelTarget};
use crate::skeleton::Skeleton;

/// Result of compressing one clip
#[derive(Debug, Clone)]
pub struct CompressedClip {
    pub clip: EhmClip,
    pub warnings: Vec<ExportWarning>,
}

/// Output channel addressed by a host curve target
pub fn channel_for(target: ChannelTarget) -> Option<Channel> {
    match target.property {
        AnimatedProperty::Location => Channel::position(target.index),
        AnimatedProperty::Scale => Channel::scale(target.index),
        AnimatedProperty::RotationQuaternion => Channel::rotation(target.index),
    }
}

/// One key waiting to be grouped into a changeset
#[derive(Debug, Clone, Copy)]
struct PendingKey {
    frame: f32,
    channel: Channel,
    value: f32,
}

/// Compress a clip against a linearized skeleton.
///
/// `scene_rate` is used unless the clip carries its own rate.
pub fn compress_clip(
    clip: &AnimationClipSnapshot,
    skeleton: &Skeleton,
    scene_rate: f32,
    axis: &AxisMap,
) -> Result<CompressedClip, ExportError> {
    let rate = clip.fps.unwrap_or(scene_rate);
    if !rate.is_finite() || rate <= 0.0 {
        return Err(ExportError::InvalidFrameRate {
            clip: clip.name.clone(),
            fps: rate,
        });
    }

    let mut warnings = Vec::new();
    let mut unknown_bones = HashSet::new();
    let mut pending: Vec<Vec<PendingKey>> = vec![Vec::new(); skeleton.len()];

    for curve in &clip.curves {
        let Some(bone) = skeleton.bone_id(&curve.bone) else {
            if unknown_bones.insert(curve.bone.as_str()) {
                warnings.push(ExportWarning::UnknownAnimatedBone {
                    clip: clip.name.clone(),
                    bone: curve.bone.clone(),
                });
            }
            continue;
        };

        let source = channel_for(curve.channel).ok_or_else(|| ExportError::InvalidCurve {
            clip: clip.name.clone(),
            bone: curve.bone.clone(),
            reason: format!(
                "{:?} has no component {}",
                curve.channel.property, curve.channel.index
            ),
        })?;

        for key in &curve.keys {
            if !key.frame.is_finite() {
                return Err(ExportError::InvalidCurve {
                    clip: clip.name.clone(),
                    bone: curve.bone.clone(),
                    reason: format!("non-finite frame {}", key.frame),
                });
            }
            let (channel, value) = axis.remap_rotation_channel(source, key.value);
            // Fold -0.0 into 0.0 so both land in the same changeset
            let frame = if key.frame == 0.0 { 0.0 } else { key.frame };
            pending[bone as usize].push(PendingKey {
                frame,
                channel,
                value,
            });
        }
    }

    let mut tracks = Vec::new();
    let mut duration: Option<f32> = None;
    for (bone, mut keys) in pending.into_iter().enumerate() {
        if keys.is_empty() {
            continue;
        }
        keys.sort_by(|a, b| {
            a.frame
                .total_cmp(&b.frame)
                .then_with(|| a.channel.id().cmp(&b.channel.id()))
        });

        let mut keyframes: Vec<EhmKeyframe> = Vec::new();
        for key in keys {
            match keyframes.last_mut() {
                Some(last) if last.index.total_cmp(&key.frame) == Ordering::Equal => {
                    if last.changes.last().is_some_and(|c| c.channel == key.channel) {
                        return Err(ExportError::DuplicateKeyframeChannel {
                            clip: clip.name.clone(),
                            bone: skeleton.bones[bone].name.clone(),
                            channel: key.channel,
                            frame: key.frame,
                        });
                    }
                    last.changes.push(ChannelChange::new(key.channel, key.value));
                }
                _ => {
                    let timestamp = key.frame / rate;
                    duration = Some(duration.map_or(timestamp, |d| d.max(timestamp)));
                    keyframes.push(EhmKeyframe {
                        index: key.frame,
                        timestamp,
                        changes: vec![ChannelChange::new(key.channel, key.value)],
                    });
                }
            }
        }

        tracks.push(EhmTrack {
            bone: bone as u8,
            keyframes,
        });
    }

    let clip_out = EhmClip {
        name: clip.name.clone(),
        duration: duration.unwrap_or(0.0),
        tracks,
    };

    tracing::debug!(
        "Compressed clip '{}': {} tracks, {} changesets, {:.3}s",
        clip_out.name,
        clip_out.tracks.len(),
        clip_out.tracks.iter().map(|t| t.keyframes.len()).sum::<usize>(),
        clip_out.duration
    );

    Ok(CompressedClip {
        clip: clip_out,
        warnings,
    })
}
