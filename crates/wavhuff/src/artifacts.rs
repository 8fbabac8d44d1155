//! Sidecar files stored next to a compressed payload

use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;
use tracing::debug;
use wavhuff_core::consts::{FRAME_DATA_SUFFIX, SIGNAL_TYPE_SUFFIX, TREE_SUFFIX};
use wavhuff_core::{DType, FrameMetadata, WavHuffError, WavHuffResult};

/// Where a relative sidecar directory is anchored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidecarLayout {
    /// `<input parent>/<sidecar dir>/<stem>_*`
    #[default]
    NextToInput,
    /// `<sidecar dir>/<input parent>/<stem>_*`, relative to the working
    /// directory. This is where the earlier Python tool put its sidecars,
    /// so `data/x.wav` maps to `encoded/data/x_*`.
    WorkingDir,
}

impl SidecarLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            SidecarLayout::NextToInput => "input",
            SidecarLayout::WorkingDir => "cwd",
        }
    }
}

impl fmt::Display for SidecarLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SidecarLayout {
    type Err = WavHuffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "input" => Ok(SidecarLayout::NextToInput),
            "cwd" => Ok(SidecarLayout::WorkingDir),
            other => Err(WavHuffError::InvalidParameter(format!(
                "unknown sidecar layout {:?} (expected `input` or `cwd`)",
                other
            ))),
        }
    }
}

/// Locations of the three sidecar files belonging to one input
///
/// The stem is the file name up to its first `.`, so `take1.wav` and its
/// payload `take1.wav.brainwire` share `take1_huffman_tree.txt`,
/// `take1_frame_data.txt` and `take1_signal_type.txt`. How a relative
/// sidecar directory is resolved depends on the [`SidecarLayout`]; an
/// absolute one is always used as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub dir: PathBuf,
    pub tree: PathBuf,
    pub frame_data: PathBuf,
    pub signal_type: PathBuf,
}

impl ArtifactPaths {
    /// Derive paths with the default [`SidecarLayout::NextToInput`]
    pub fn derive(input: &Path, sidecar_dir: &Path) -> WavHuffResult<Self> {
        Self::derive_with(input, sidecar_dir, SidecarLayout::default())
    }

    pub fn derive_with(input: &Path, sidecar_dir: &Path, layout: SidecarLayout) -> WavHuffResult<Self> {
        let name = input
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                WavHuffError::InvalidParameter(format!(
                    "{} has no UTF-8 file name",
                    input.display()
                ))
            })?;
        let stem = name.split_once('.').map_or(name, |(stem, _)| stem);
        if stem.is_empty() {
            return Err(WavHuffError::InvalidParameter(format!(
                "cannot derive sidecar names from {:?}",
                name
            )));
        }

        let parent = input.parent().unwrap_or_else(|| Path::new(""));
        // Joining an absolute sidecar dir replaces the parent.
        let dir = match layout {
            SidecarLayout::NextToInput => parent.join(sidecar_dir),
            // Only the named components of the parent, so an absolute or
            // dotted input path stays under the sidecar dir.
            SidecarLayout::WorkingDir => parent
                .components()
                .filter_map(|c| match c {
                    Component::Normal(part) => Some(part),
                    _ => None,
                })
                .fold(sidecar_dir.to_path_buf(), |dir, part| dir.join(part)),
        };

        Ok(Self {
            tree: dir.join(format!("{}{}", stem, TREE_SUFFIX)),
            frame_data: dir.join(format!("{}{}", stem, FRAME_DATA_SUFFIX)),
            signal_type: dir.join(format!("{}{}", stem, SIGNAL_TYPE_SUFFIX)),
            dir,
        })
    }

    pub fn write(&self, sidecars: &Sidecars) -> WavHuffResult<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(&self.tree, &sidecars.tree_text)?;
        fs::write(&self.frame_data, sidecars.metadata.to_string())?;
        fs::write(&self.signal_type, sidecars.dtype.as_str())?;
        debug!(dir = %self.dir.display(), "wrote sidecar files");
        Ok(())
    }

    pub fn read(&self) -> WavHuffResult<Sidecars> {
        let tree_text = fs::read_to_string(&self.tree)?;
        let metadata = fs::read_to_string(&self.frame_data)?.parse()?;
        let dtype = fs::read_to_string(&self.signal_type)?.parse()?;
        Ok(Sidecars {
            tree_text,
            metadata,
            dtype,
        })
    }
}

/// Contents of the sidecar files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidecars {
    pub tree_text: String,
    pub metadata: FrameMetadata,
    pub dtype: DType,
}
