//! Named output files produced by one export.

use std::path::PathBuf;

/// MIME type of raw preset records.
pub const PRESET_MIME: &str = "application/octet-stream";

/// MIME type of plain text files.
pub const TEXT_MIME: &str = "text/plain";

/// One finished output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// File name, relative to the bundle folder.
    pub path: PathBuf,
    /// MIME type of `bytes`.
    pub mime: &'static str,
    /// File contents.
    pub bytes: Vec<u8>,
    /// BLAKE3 hash of the PCM samples, for audio files.
    pub pcm_hash: Option<String>,
}

impl OutputFile {
    /// Creates an output file.
    pub fn new(path: impl Into<PathBuf>, mime: &'static str, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            mime,
            bytes,
            pcm_hash: None,
        }
    }

    /// Attaches the PCM hash reported by the container writer.
    pub fn with_pcm_hash(mut self, pcm_hash: impl Into<String>) -> Self {
        self.pcm_hash = Some(pcm_hash.into());
        self
    }
}

/// An output that could not be produced. Other outputs of the same export
/// are unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedOutput {
    /// File name the output would have had.
    pub path: PathBuf,
    /// Why it was skipped.
    pub reason: String,
}

/// Every file of one export, optionally grouped under a folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportBundle {
    /// Folder the files belong in, if the device expects one.
    pub folder: Option<String>,
    /// Finished files in output order.
    pub files: Vec<OutputFile>,
    /// Outputs dropped because their encoding failed.
    pub skipped: Vec<SkippedOutput>,
}

impl ExportBundle {
    /// Creates an empty bundle.
    pub fn new(folder: Option<String>) -> Self {
        Self {
            folder,
            ..Self::default()
        }
    }

    /// Adds a finished file.
    pub fn push(&mut self, file: OutputFile) {
        self.files.push(file);
    }

    /// Records an output that failed to encode.
    pub fn skip(&mut self, path: impl Into<PathBuf>, reason: impl ToString) {
        let path = path.into();
        let reason = reason.to_string();
        log::warn!("skipping {}: {}", path.display(), reason);
        self.skipped.push(SkippedOutput { path, reason });
    }

    /// Looks up a file by name.
    pub fn file(&self, name: &str) -> Option<&OutputFile> {
        self.files.iter().find(|f| f.path.as_os_str() == name)
    }

    /// Path of `file` including the bundle folder.
    pub fn relative_path(&self, file: &OutputFile) -> PathBuf {
        match &self.folder {
            Some(folder) => PathBuf::from(folder).join(&file.path),
            None => file.path.clone(),
        }
    }

    /// Total size of every file.
    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(|f| f.bytes.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_paths_and_lookup() {
        let mut bundle = ExportBundle::new(Some("Bank 3".to_string()));
        bundle.push(OutputFile::new("info.txt", TEXT_MIME, b"Pack".to_vec()));
        bundle.push(OutputFile::new("chan-001.wav", "audio/wav", vec![0; 10]));

        let info = bundle.file("info.txt").unwrap();
        assert_eq!(bundle.relative_path(info), PathBuf::from("Bank 3/info.txt"));
        assert_eq!(bundle.total_bytes(), 14);
        assert!(bundle.file("chan-002.wav").is_none());
    }

    #[test]
    fn test_skip_is_recorded() {
        let mut bundle = ExportBundle::new(None);
        bundle.skip("A1.WAV", "bad audio");
        assert_eq!(
            bundle.skipped,
            vec![SkippedOutput {
                path: PathBuf::from("A1.WAV"),
                reason: "bad audio".to_string()
            }]
        );
        let file = OutputFile::new("P01.TXT", PRESET_MIME, Vec::new());
        assert_eq!(bundle.relative_path(&file), PathBuf::from("P01.TXT"));
        assert_eq!(file.pcm_hash, None);
        let wav = OutputFile::new("A1.WAV", "audio/wav", Vec::new()).with_pcm_hash("ab12");
        assert_eq!(wav.pcm_hash.as_deref(), Some("ab12"));
    }
}
