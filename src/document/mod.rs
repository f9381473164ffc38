//! Input documents for the analyzer.
//!
//! The analyzer only needs two things from a document: an ordered stream of
//! text chunks (one per text node) and the bodies of pre-rendered math
//! scripts. [`TextSource`] is that seam; [`Document`] is the in-memory
//! implementation, and [`Document::from_html`] builds one from markup.

mod html;

pub use html::decode_entities;

/// A source of text chunks and math script bodies.
pub trait TextSource {
    /// Text chunks in document order.
    fn text_chunks(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Bodies of `math/tex` style script elements, in document order.
    fn math_scripts(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(std::iter::empty())
    }
}

/// In-memory document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    chunks: Vec<String>,
    scripts: Vec<String>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from plain text chunks.
    pub fn from_chunks<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            chunks: chunks.into_iter().map(Into::into).collect(),
            scripts: Vec::new(),
        }
    }

    /// Treat every line of `text` as its own chunk.
    pub fn from_lines(text: &str) -> Self {
        Self::from_chunks(text.lines())
    }

    /// Treat every paragraph of `text` as its own chunk.
    ///
    /// Paragraphs are separated by blank lines; line breaks inside a
    /// paragraph are kept, so math and prose may span several lines.
    pub fn from_paragraphs(text: &str) -> Self {
        let mut doc = Self::new();
        let mut paragraph: Vec<&str> = Vec::new();
        for line in text.lines() {
            if line.trim().is_empty() {
                if !paragraph.is_empty() {
                    doc.push_chunk(paragraph.join("\n"));
                    paragraph.clear();
                }
            } else {
                paragraph.push(line);
            }
        }
        if !paragraph.is_empty() {
            doc.push_chunk(paragraph.join("\n"));
        }
        doc
    }

    /// Build a document from HTML markup.
    ///
    /// This is a lightweight splitter, not a conforming HTML parser: text
    /// between tags becomes one chunk per run, `math/tex` and `math/LaTeX`
    /// script bodies are kept as math scripts, and other script and style
    /// bodies are dropped.
    pub fn from_html(markup: &str) -> Self {
        html::split(markup)
    }

    /// Append a text chunk.
    pub fn push_chunk(&mut self, chunk: impl Into<String>) {
        self.chunks.push(chunk.into());
    }

    /// Append a math script body.
    pub fn push_math_script(&mut self, body: impl Into<String>) {
        self.scripts.push(body.into());
    }

    /// Number of text chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the document has neither chunks nor scripts.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty() && self.scripts.is_empty()
    }
}

impl TextSource for Document {
    fn text_chunks(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.chunks.iter().map(String::as_str))
    }

    fn math_scripts(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.scripts.iter().map(String::as_str))
    }
}

impl<S: AsRef<str>> TextSource for [S] {
    fn text_chunks(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.iter().map(AsRef::as_ref))
    }
}

impl<S: AsRef<str>> TextSource for Vec<S> {
    fn text_chunks(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        self.as_slice().text_chunks()
    }
}
