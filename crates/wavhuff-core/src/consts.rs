//! Constants used throughout wavhuff

/// Tree file line standing for a missing node
pub const NULL_NODE_TOKEN: &str = "N";

/// Tree file symbol field of an internal node
pub const INTERNAL_NODE_TOKEN: &str = "None";

/// Prefix that marks a tree file symbol field as literal text
pub const ESCAPE_PREFIX: char = '\\';

/// Default directory (relative to the input's parent) holding sidecar files
pub const DEFAULT_SIDECAR_DIR: &str = "encoded";

/// Sidecar file suffixes appended to the input stem
pub const TREE_SUFFIX: &str = "_huffman_tree.txt";
pub const FRAME_DATA_SUFFIX: &str = "_frame_data.txt";
pub const SIGNAL_TYPE_SUFFIX: &str = "_signal_type.txt";

/// Environment variable overriding the sidecar directory
pub const SIDECAR_DIR_ENV: &str = "WAVHUFF_SIDECAR_DIR";
