//! Builds the context blob from text and PDF sources

use std::path::Path;
use tracing::{debug, info, warn};

use super::pdf::extract_pdf_text;
use super::source::{scan_directory, SourceFile, SourceKind};
use crate::config::{get_message, Language};
use crate::error::Result;

/// Outcome of a context load, rendered for display with [`LoadStatus::render`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// The context was replaced with `sources` segments.
    Loaded { sources: usize },
    /// No recognized source was found; the context is now absent.
    Empty,
    /// The sources could not be enumerated; the context was left untouched.
    Failed(String),
}

impl LoadStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    /// Human-readable status line
    pub fn render(&self, lang: Language) -> String {
        match self {
            Self::Loaded { .. } => get_message("files_loaded", lang).to_string(),
            Self::Empty => get_message("no_valid_files", lang).to_string(),
            Self::Failed(message) => format!("{}: {}", get_message("load_failed", lang), message),
        }
    }
}

/// Concatenates named sources into a single context blob
///
/// Every recognized source becomes a `\n\n--- <name> ---\n<text>` segment.
/// Per-source read failures are inlined as markers so that one broken file
/// never drops the others.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextLoader {
    lang: Language,
}

impl ContextLoader {
    pub fn new(lang: Language) -> Self {
        Self { lang }
    }

    /// Concatenate recognized sources in iteration order
    ///
    /// Returns the blob and the number of segments it holds.
    pub fn build_context<I>(&self, sources: I) -> (String, usize)
    where
        I: IntoIterator<Item = SourceFile>,
    {
        let mut context = String::new();
        let mut count = 0;

        for source in sources {
            let Some(kind) = source.kind() else {
                debug!("Skipping unrecognized source: {}", source.name);
                continue;
            };
            let text = self.segment_text(&source, kind);
            context.push_str(&format!("\n\n--- {} ---\n{}", source.name, text));
            count += 1;
        }

        (context, count)
    }

    fn segment_text(&self, source: &SourceFile, kind: SourceKind) -> String {
        let (decoded, marker_key): (Result<String>, &str) = match kind {
            SourceKind::Text => (
                String::from_utf8(source.bytes.clone()).map_err(Into::into),
                "text_read_error",
            ),
            SourceKind::Pdf => (extract_pdf_text(&source.bytes), "pdf_read_error"),
        };

        match decoded {
            Ok(text) => {
                debug!("Loaded {} ({} chars)", source.name, text.len());
                text
            }
            Err(e) => {
                warn!("Failed to read {}: {}", source.name, e);
                format!("[{}: {}]", get_message(marker_key, self.lang), e)
            }
        }
    }

    /// Replace `slot` with the blob built from `sources`
    ///
    /// An empty result leaves the context absent.
    pub fn load<I>(&self, slot: &mut Option<String>, sources: I) -> LoadStatus
    where
        I: IntoIterator<Item = SourceFile>,
    {
        let (context, count) = self.build_context(sources);

        if context.is_empty() {
            *slot = None;
            info!("No recognized context files");
            return LoadStatus::Empty;
        }

        info!("Loaded context from {} files ({} chars)", count, context.len());
        *slot = Some(context);
        LoadStatus::Loaded { sources: count }
    }

    /// Read every file in `paths` first, then load them
    ///
    /// A file that cannot be read fails the whole load and leaves `slot` as it was.
    pub fn load_paths<P: AsRef<Path>>(&self, slot: &mut Option<String>, paths: &[P]) -> LoadStatus {
        let sources: Result<Vec<SourceFile>> = paths.iter().map(SourceFile::read).collect();
        self.load_enumerated(slot, sources)
    }

    /// Scan `dir` and load what it holds
    ///
    /// An unreadable directory leaves `slot` as it was.
    pub fn load_directory(&self, slot: &mut Option<String>, dir: &Path) -> LoadStatus {
        self.load_enumerated(slot, scan_directory(dir))
    }

    fn load_enumerated(
        &self,
        slot: &mut Option<String>,
        sources: Result<Vec<SourceFile>>,
    ) -> LoadStatus {
        match sources {
            Ok(sources) => self.load(slot, sources),
            Err(e) => {
                warn!("Failed to enumerate context files: {}", e);
                LoadStatus::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::pdf::fixtures::pdf_with_pages;
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn loader() -> ContextLoader {
        ContextLoader::new(Language::Portuguese)
    }

    #[test]
    fn test_text_sources_in_order() {
        let sources = vec![
            SourceFile::new("b.txt", "segundo"),
            SourceFile::new("a.txt", "primeiro"),
        ];

        let (context, count) = loader().build_context(sources);

        assert_eq!(count, 2);
        assert_eq!(context, "\n\n--- b.txt ---\nsegundo\n\n--- a.txt ---\nprimeiro");
        assert_eq!(context.matches("--- a.txt ---").count(), 1);
        assert_eq!(context.matches("primeiro").count(), 1);
    }

    #[test]
    fn test_unrecognized_sources_are_skipped() {
        let sources = vec![
            SourceFile::new("photo.png", vec![0x89, 0x50]),
            SourceFile::new("NOTES.TXT", "upper"),
        ];

        let (context, count) = loader().build_context(sources);

        assert_eq!(count, 1);
        assert!(!context.contains("photo.png"));
        assert!(context.contains("--- NOTES.TXT ---\nupper"));
    }

    #[test]
    fn test_broken_pdf_is_inlined() {
        let sources = vec![
            SourceFile::new("a.txt", "antes"),
            SourceFile::new("broken.pdf", "not a pdf"),
            SourceFile::new("c.txt", "depois"),
        ];

        let mut slot = None;
        let status = loader().load(&mut slot, sources);

        assert_eq!(status, LoadStatus::Loaded { sources: 3 });
        let context = slot.unwrap();
        assert!(context.contains("--- a.txt ---\nantes"));
        assert!(context.contains("--- broken.pdf ---\n[Erro ao ler PDF: "));
        assert!(context.ends_with("--- c.txt ---\ndepois"));
    }

    #[test]
    fn test_pdf_segment_between_text_segments() {
        let sources = vec![
            SourceFile::new("intro.txt", "antes"),
            SourceFile::new("report.PDF", pdf_with_pages(&["Alpha", "Beta"])),
            SourceFile::new("outro.txt", "depois"),
        ];

        let (context, count) = loader().build_context(sources);

        assert_eq!(count, 3);
        let intro = context.find("--- intro.txt ---\nantes").unwrap();
        let report = context.find("--- report.PDF ---\n").unwrap();
        let alpha = context.find("Alpha").unwrap();
        let beta = context.find("Beta").unwrap();
        let outro = context.find("--- outro.txt ---\ndepois").unwrap();
        assert!(intro < report && report < alpha && alpha < beta && beta < outro);
        assert!(!context.contains("Erro ao ler PDF"));
    }

    #[test]
    fn test_invalid_utf8_is_inlined() {
        let sources = vec![
            SourceFile::new("bad.txt", vec![0xff, 0xfe, 0x00]),
            SourceFile::new("good.txt", "ok"),
        ];

        let (context, count) = loader().build_context(sources);

        assert_eq!(count, 2);
        assert!(context.contains("--- bad.txt ---\n[Erro ao ler arquivo: "));
        assert!(context.contains("--- good.txt ---\nok"));
    }

    #[test]
    fn test_load_replaces_previous_context() {
        let mut slot = Some("old".to_string());
        loader().load(&mut slot, vec![SourceFile::new("new.txt", "new")]);
        assert_eq!(slot.as_deref(), Some("\n\n--- new.txt ---\nnew"));
    }

    #[test]
    fn test_empty_load_clears_context() {
        let mut slot = Some("old".to_string());
        let status = loader().load(&mut slot, vec![SourceFile::new("x.doc", "x")]);

        assert_eq!(status, LoadStatus::Empty);
        assert!(slot.is_none());
        assert_eq!(status.render(Language::Portuguese), "⚠️ Nenhum arquivo válido carregado.");
    }

    #[test]
    fn test_load_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("one.txt"), "1").unwrap();
        fs::write(dir.path().join("two.txt"), "2").unwrap();

        let mut slot = None;
        let status = loader().load_directory(&mut slot, dir.path());

        assert_eq!(status, LoadStatus::Loaded { sources: 2 });
        assert_eq!(
            status.render(Language::Portuguese),
            "📂 Arquivos carregados com sucesso."
        );
        assert_eq!(
            slot.as_deref(),
            Some("\n\n--- one.txt ---\n1\n\n--- two.txt ---\n2")
        );
    }

    #[test]
    fn test_unreadable_directory_keeps_context() {
        let dir = tempdir().unwrap();
        let mut slot = Some("kept".to_string());

        let status = loader().load_directory(&mut slot, &dir.path().join("missing"));

        assert!(matches!(status, LoadStatus::Failed(_)));
        assert!(status
            .render(Language::Portuguese)
            .starts_with("Erro ao carregar arquivos: "));
        assert_eq!(slot.as_deref(), Some("kept"));
    }

    #[test]
    fn test_load_paths_fails_as_a_whole() {
        let dir = tempdir().unwrap();
        let present = dir.path().join("present.txt");
        fs::write(&present, "here").unwrap();
        let missing = dir.path().join("missing.txt");

        let mut slot = None;
        let status = loader().load_paths(&mut slot, &[present.clone(), missing]);
        assert!(matches!(status, LoadStatus::Failed(_)));
        assert!(slot.is_none());

        let status = loader().load_paths(&mut slot, &[present]);
        assert!(status.is_loaded());
        assert_eq!(slot.as_deref(), Some("\n\n--- present.txt ---\nhere"));
    }
}
