use std::sync::Arc;

/// One source file under analysis: identity key plus decoded contents.
///
/// Line starts are precomputed so span validation and per-line metrics can
/// index physical lines without rescanning the text.
#[derive(Debug, Clone)]
pub struct InputFile {
    key: Arc<str>,
    contents: Arc<str>,
    line_starts: Arc<[usize]>,
}

impl InputFile {
    pub fn new(key: impl Into<Arc<str>>, contents: impl Into<Arc<str>>) -> Self {
        let contents = contents.into();
        let line_starts = line_starts(&contents).into();
        Self {
            key: key.into(),
            contents,
            line_starts,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Number of physical lines. An empty file has none; a trailing line break
    /// does not open a new line.
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }

    /// 1-based physical line, without its line break.
    pub fn line(&self, line: u32) -> Option<&str> {
        if line == 0 {
            return None;
        }
        let index = (line - 1) as usize;
        let start = *self.line_starts.get(index)?;
        let end = self
            .line_starts
            .get(index + 1)
            .map_or(self.contents.len(), |next| next - 1);
        let text = &self.contents[start..end];
        let text = text.strip_suffix('\n').unwrap_or(text);
        Some(text.strip_suffix('\r').unwrap_or(text))
    }
}

fn line_starts(contents: &str) -> Vec<usize> {
    if contents.is_empty() {
        return Vec::new();
    }
    let mut starts = vec![0];
    for (offset, byte) in contents.bytes().enumerate() {
        if byte == b'\n' && offset + 1 < contents.len() {
            starts.push(offset + 1);
        }
    }
    starts
}
