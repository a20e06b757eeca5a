//! Whole-file writer and reader

use std::io::{self, Write};

use super::reader::ByteReader;
use super::{
    CHANNEL_CHANGE_SIZE, Channel, ChannelChange, EHM_VERSION, EhmBone, EhmClip, EhmKeyframe,
    EhmMesh, EhmTrack, EhmVersion, EhmVertex, FormatError, MAX_BONES, VERTEX_RECORD_SIZE,
};

/// A complete .ehm file
#[derive(Debug, Clone, PartialEq)]
pub struct EhmFile {
    pub version: EhmVersion,
    pub meshes: Vec<EhmMesh>,
    /// Linearized skeleton; empty when no skeleton was exported
    pub bones: Vec<EhmBone>,
    /// Empty when no skeleton or no clips were exported
    pub clips: Vec<EhmClip>,
}

impl Default for EhmFile {
    fn default() -> Self {
        Self {
            version: EHM_VERSION,
            meshes: Vec::new(),
            bones: Vec::new(),
            clips: Vec::new(),
        }
    }
}

fn write_name<W: Write>(w: &mut W, name: &str) -> io::Result<()> {
    w.write_all(&(name.len() as u64).to_le_bytes())?;
    w.write_all(name.as_bytes())
}

fn write_matrix<W: Write>(w: &mut W, m: &[f32; 16]) -> io::Result<()> {
    for f in m {
        w.write_all(&f.to_le_bytes())?;
    }
    Ok(())
}

fn u8_count(what: &str, count: usize) -> io::Result<u8> {
    if count > MAX_BONES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} count {} exceeds maximum of {}", what, count, MAX_BONES),
        ));
    }
    Ok(count as u8)
}

impl EhmFile {
    /// Serialize in the fixed block order: version, meshes, skeleton, animation.
    ///
    /// Any write error aborts serialization; the caller owns discarding a
    /// partially written destination.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let bone_count = u8_count("Bone", self.bones.len())?;

        w.write_all(&self.version.to_bytes())?;

        // Meshes
        w.write_all(&(self.meshes.len() as u64).to_le_bytes())?;
        for mesh in &self.meshes {
            write_name(w, &mesh.name)?;
            w.write_all(&(mesh.vertices.len() as u64).to_le_bytes())?;
            for vertex in &mesh.vertices {
                w.write_all(&vertex.to_bytes())?;
            }
            w.write_all(&(mesh.indices.len() as u64).to_le_bytes())?;
            for index in &mesh.indices {
                w.write_all(&index.to_le_bytes())?;
            }
        }

        // Skeleton
        w.write_all(&[bone_count])?;
        for bone in &self.bones {
            write_name(w, &bone.name)?;
            w.write_all(&[bone.parent])?;
            write_matrix(w, &bone.local_bind)?;
            write_matrix(w, &bone.inverse_bind)?;
        }

        // Animation
        w.write_all(&(self.clips.len() as u64).to_le_bytes())?;
        for clip in &self.clips {
            write_name(w, &clip.name)?;
            w.write_all(&clip.duration.to_le_bytes())?;
            w.write_all(&[u8_count("Track", clip.tracks.len())?])?;
            for track in &clip.tracks {
                w.write_all(&[track.bone])?;
                w.write_all(&(track.keyframes.len() as u64).to_le_bytes())?;
                for keyframe in &track.keyframes {
                    w.write_all(&keyframe.index.to_le_bytes())?;
                    w.write_all(&keyframe.timestamp.to_le_bytes())?;
                    w.write_all(&(keyframe.changes.len() as u64).to_le_bytes())?;
                    for change in &keyframe.changes {
                        w.write_all(&change.to_bytes())?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Serialize into a byte vector
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.encoded_size());
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Exact size of the serialized file in bytes
    pub fn encoded_size(&self) -> usize {
        EhmVersion::SIZE
            + 8
            + self.meshes.iter().map(EhmMesh::encoded_size).sum::<usize>()
            + 1
            + self.bones.iter().map(EhmBone::encoded_size).sum::<usize>()
            + 8
            + self.clips.iter().map(EhmClip::encoded_size).sum::<usize>()
    }

    /// Parse a complete .ehm file. Trailing bytes are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        let mut r = ByteReader::new(bytes);

        let version = EhmVersion::from_bytes(r.take(EhmVersion::SIZE)?).ok_or(
            FormatError::UnexpectedEof {
                offset: 0,
                needed: EhmVersion::SIZE,
            },
        )?;

        let mesh_count = r.count(24)?;
        let mut meshes = Vec::with_capacity(mesh_count);
        for _ in 0..mesh_count {
            let name = r.string()?;
            let vertex_count = r.count(VERTEX_RECORD_SIZE)?;
            let mut vertices = Vec::with_capacity(vertex_count);
            for _ in 0..vertex_count {
                let offset = r.offset();
                let vertex = EhmVertex::from_bytes(r.take(VERTEX_RECORD_SIZE)?).ok_or(
                    FormatError::UnexpectedEof {
                        offset,
                        needed: VERTEX_RECORD_SIZE,
                    },
                )?;
                vertices.push(vertex);
            }
            let index_count = r.count(4)?;
            let mut indices = Vec::with_capacity(index_count);
            for _ in 0..index_count {
                indices.push(r.u32()?);
            }
            meshes.push(EhmMesh {
                name,
                vertices,
                indices,
            });
        }

        let bone_count = r.u8()? as usize;
        let mut bones = Vec::with_capacity(bone_count);
        for _ in 0..bone_count {
            let name = r.string()?;
            let parent = r.u8()?;
            let local_bind = r.matrix()?;
            let inverse_bind = r.matrix()?;
            bones.push(EhmBone {
                name,
                parent,
                local_bind,
                inverse_bind,
            });
        }

        let clip_count = r.count(13)?;
        let mut clips = Vec::with_capacity(clip_count);
        for _ in 0..clip_count {
            let name = r.string()?;
            let duration = r.f32()?;
            let track_count = r.u8()? as usize;
            let mut tracks = Vec::with_capacity(track_count);
            for _ in 0..track_count {
                let bone = r.u8()?;
                let keyframe_count = r.count(16)?;
                let mut keyframes = Vec::with_capacity(keyframe_count);
                for _ in 0..keyframe_count {
                    let index = r.f32()?;
                    let timestamp = r.f32()?;
                    let change_count = r.count(CHANNEL_CHANGE_SIZE)?;
                    let mut changes = Vec::with_capacity(change_count);
                    for _ in 0..change_count {
                        let offset = r.offset();
                        let id = r.u8()?;
                        let channel =
                            Channel::from_id(id).ok_or(FormatError::UnknownChannel { id, offset })?;
                        changes.push(ChannelChange::new(channel, r.f32()?));
                    }
                    keyframes.push(EhmKeyframe {
                        index,
                        timestamp,
                        changes,
                    });
                }
                tracks.push(EhmTrack { bone, keyframes });
            }
            clips.push(EhmClip {
                name,
                duration,
                tracks,
            });
        }

        if r.remaining() > 0 {
            return Err(FormatError::TrailingBytes {
                remaining: r.remaining(),
            });
        }

        Ok(Self {
            version,
            meshes,
            bones,
            clips,
        })
    }
}
