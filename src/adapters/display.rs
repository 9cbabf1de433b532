use crate::core::DisplaySurface;
use crate::utils::error::{CounterError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// In-process element map. Clones share the same elements.
#[derive(Debug, Clone, Default)]
pub struct MemoryDisplay {
    elements: Arc<Mutex<HashMap<String, String>>>,
    writes: Arc<Mutex<usize>>,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(element_id: &str, text: &str) -> Self {
        let display = Self::default();
        if let Ok(mut elements) = display.elements.lock() {
            elements.insert(element_id.to_string(), text.to_string());
        }
        display
    }

    pub fn text_of(&self, element_id: &str) -> Option<String> {
        self.elements.lock().ok()?.get(element_id).cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().map(|w| *w).unwrap_or(0)
    }
}

impl DisplaySurface for MemoryDisplay {
    async fn write_text(&self, element_id: &str, text: &str) -> Result<()> {
        let mut elements = self
            .elements
            .lock()
            .map_err(|_| CounterError::display(element_id, "element map lock poisoned"))?;
        elements.insert(element_id.to_string(), text.to_string());

        let mut writes = self
            .writes
            .lock()
            .map_err(|_| CounterError::display(element_id, "write counter lock poisoned"))?;
        *writes += 1;
        Ok(())
    }
}

/// 直接改寫 HTML 檔案中指定 id 元素的文字內容
#[derive(Debug, Clone)]
pub struct HtmlFileDisplay {
    path: PathBuf,
}

impl HtmlFileDisplay {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sibling file the new page is written to before it replaces the original.
    fn staging_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "page".to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }
}

impl DisplaySurface for HtmlFileDisplay {
    async fn write_text(&self, element_id: &str, text: &str) -> Result<()> {
        let html = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            CounterError::display(
                element_id,
                format!("cannot read {}: {}", self.path.display(), e),
            )
        })?;

        let updated = replace_element_text(&html, element_id, text)?;

        // 先寫暫存檔再 rename，寫入失敗時原頁面不受影響
        let staging = self.staging_path();
        if let Err(e) = tokio::fs::write(&staging, updated).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(e.into());
        }
        tokio::fs::rename(&staging, &self.path).await?;

        tracing::debug!("Updated #{} in {}", element_id, self.path.display());
        Ok(())
    }
}

/// Prints `<element_id>: <text>` on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutDisplay;

impl DisplaySurface for StdoutDisplay {
    async fn write_text(&self, element_id: &str, text: &str) -> Result<()> {
        println!("{}: {}", element_id, text);
        Ok(())
    }
}

/// Rewrites the content between the opening tag carrying `id=<element_id>`
/// (quoted or not) and its matching closing tag. Children are replaced along
/// with their text.
pub fn replace_element_text(html: &str, element_id: &str, text: &str) -> Result<String> {
    let id = regex::escape(element_id);
    let open_pattern = format!(
        r#"<([a-zA-Z][a-zA-Z0-9-]*)\b[^>]*?\s(?i:id)\s*=\s*(?:"{id}"|'{id}'|{id})(?:[\s/][^>]*)?>"#
    );
    let open_re = Regex::new(&open_pattern)
        .map_err(|e| CounterError::display(element_id, format!("bad element pattern: {}", e)))?;

    let open = open_re
        .captures(html)
        .ok_or_else(|| CounterError::display(element_id, "element not found in document"))?;
    let whole = open
        .get(0)
        .ok_or_else(|| CounterError::display(element_id, "element not found in document"))?;
    if whole.as_str().ends_with("/>") {
        return Err(CounterError::display(element_id, "element is self-closing"));
    }
    let tag = &open[1];

    let close_start = whole.end() + find_matching_close(&html[whole.end()..], tag, element_id)?;

    let mut updated = String::with_capacity(html.len() + text.len());
    updated.push_str(&html[..whole.end()]);
    updated.push_str(&escape_text(text));
    updated.push_str(&html[close_start..]);
    Ok(updated)
}

/// Offset in `content` of the closing tag that balances the already opened `tag`.
fn find_matching_close(content: &str, tag: &str, element_id: &str) -> Result<usize> {
    let tag_re = Regex::new(&format!(r"(?i)<(/?){}(?:\s[^>]*)?/?>", regex::escape(tag)))
        .map_err(|e| CounterError::display(element_id, format!("bad closing pattern: {}", e)))?;

    let mut depth = 0usize;
    for caps in tag_re.captures_iter(content) {
        let Some(m) = caps.get(0) else { continue };
        let closing = !caps[1].is_empty();
        if !closing {
            if !m.as_str().ends_with("/>") {
                depth += 1;
            }
        } else if depth == 0 {
            return Ok(m.start());
        } else {
            depth -= 1;
        }
    }

    Err(CounterError::display(
        element_id,
        format!("no matching closing </{}> tag", tag),
    ))
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
