//! Temporary curation files

use std::io::Write;
use tempfile::NamedTempFile;

/// A curation file on disk, removed when dropped.
pub struct CurationFile {
    file: NamedTempFile,
}

impl CurationFile {
    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }
}

/// Write one tab-separated line per group.
pub fn curation_file(groups: &[&[&str]]) -> CurationFile {
    let mut file = NamedTempFile::new().expect("create curation file");
    for group in groups {
        writeln!(file, "{}", group.join("\t")).expect("write curation line");
    }
    file.flush().expect("flush curation file");
    CurationFile { file }
}
