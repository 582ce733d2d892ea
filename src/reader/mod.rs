// src/reader/mod.rs
use std::fs;
use std::panic;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::utils::error::ReadError;

// Block-level elements whose text becomes one line each
static BLOCK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1, h2, h3, h4, h5, h6, p, li, pre, blockquote, td, th, dt, dd, caption")
        .expect("Failed to compile BLOCK_SELECTOR")
});

/// Input formats the reader knows how to turn into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
    Html,
}

impl DocumentKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "txt" | "md" => Some(DocumentKind::PlainText),
            "html" | "htm" => Some(DocumentKind::Html),
            _ => None,
        }
    }
}

/// Lists supported documents directly inside `dir`, sorted by file name.
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>, ReadError> {
    let io_err = |source| ReadError::Io {
        path: dir.display().to_string(),
        source,
    };

    let mut docs = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && DocumentKind::from_path(&path).is_some() {
            docs.push(path);
        } else {
            tracing::trace!("Skipping {}", path.display());
        }
    }
    docs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(docs)
}

/// Extracts the page-ordered text of a document. Page boundaries are not
/// preserved; the caller gets one string.
pub fn extract_text(path: &Path) -> Result<String, ReadError> {
    let kind = DocumentKind::from_path(path)
        .ok_or_else(|| ReadError::Unsupported(path.display().to_string()))?;
    let io_err = |source| ReadError::Io {
        path: path.display().to_string(),
        source,
    };

    let text = match kind {
        DocumentKind::Pdf => {
            let bytes = fs::read(path).map_err(io_err)?;
            extract_pdf_text(path, &bytes)?
        }
        DocumentKind::PlainText => fs::read_to_string(path).map_err(io_err)?,
        DocumentKind::Html => html_to_text(&fs::read_to_string(path).map_err(io_err)?),
    };

    tracing::debug!("Extracted {} chars from {}", text.len(), path.display());
    Ok(text)
}

// pdf-extract panics on some malformed-but-parseable PDFs (missing font
// resources, bad object refs); those must fail one document, not the batch.
fn extract_pdf_text(path: &Path, bytes: &[u8]) -> Result<String, ReadError> {
    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ReadError::Pdf(path.display().to_string(), e.to_string())),
        Err(_) => {
            tracing::warn!("PDF extractor panicked on {}", path.display());
            Err(ReadError::Pdf(
                path.display().to_string(),
                "extractor panicked".to_string(),
            ))
        }
    }
}

/// Flattens an HTML document to text, one line per outermost block element.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut lines = Vec::new();

    for element in document.select(&BLOCK_SELECTOR) {
        // Nested blocks are already covered by their outer block's text
        let nested = element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| BLOCK_SELECTOR.matches(&ancestor));
        if nested {
            continue;
        }

        let text = element.text().collect::<String>();
        let text = text.trim();
        if !text.is_empty() {
            lines.push(text.to_string());
        }
    }

    lines.join("\n")
}


#[cfg(test)]
pub(crate) mod fixtures {
    /// A structurally valid one-page PDF whose content stream selects font
    /// `/F9` while the page has empty `/Resources`.
    pub fn pdf_with_missing_font() -> Vec<u8> {
        let content = "BT /F9 12 Tf 72 712 Td (Hello) Tj ET";
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Resources << >> /Contents 4 0 R >>"
                .to_string(),
            format!("<< /Length {} >>\nstream\n{}\nendstream", content.len(), content),
        ];

        let mut out = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }

        let xref_start = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for offset in offsets {
            out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref_start
            )
            .as_bytes(),
        );
        out
    }
}
