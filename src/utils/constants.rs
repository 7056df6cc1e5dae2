//! Shared configuration constants for the output stage
//!
//! Default values and fixed Markdown fragments used throughout the
//! codebase, kept here to avoid magic strings.

/// Default artifact file name, as written by the crawler
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "output.json";

/// Directory the crawler stores one JSON file per visited page in
pub const DEFAULT_DATASET_DIR: &str = "storage/datasets/default";

/// `maxFileSize` is configured in megabytes
pub const BYTES_PER_MEGABYTE: u64 = 1024 * 1024;

/// Anchor id carried by the table of contents heading
pub const TOC_ANCHOR: &str = "table-of-contents";

/// Heading text of the table of contents block
pub const TOC_HEADING: &str = "Table of Contents";

/// Navigation line placed under every anchored heading
pub const BACK_TO_TOP_LINK: &str = "[Back to Top](#table-of-contents)";

/// Separator appended after every page
pub const PAGE_SEPARATOR: &str = "---";

/// Timeout for blocking artifact rendering
///
/// Prevents hangs on pathological page content. Rendering a batch of a few
/// megabytes takes well under a second.
pub const RENDER_TIMEOUT_SECS: u64 = 60;
