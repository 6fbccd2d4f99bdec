use std::io::Read;

use anyhow::{Context, Result};

/// Read the document to render.
///
/// With no argument the whole of stdin is read. An argument is tried as a
/// file path first; if it cannot be read it is taken as the markdown itself.
/// Invalid UTF-8 is replaced rather than rejected.
pub fn read_document(arg: Option<&str>) -> Result<String> {
    read_document_from(arg, std::io::stdin().lock())
}

/// [`read_document`] with an explicit stand-in for stdin.
pub fn read_document_from(arg: Option<&str>, mut stdin: impl Read) -> Result<String> {
    let Some(arg) = arg else {
        let mut buf = Vec::new();
        stdin
            .read_to_end(&mut buf)
            .context("error reading stdin")?;
        tracing::debug!(bytes = buf.len(), "read document from stdin");
        return Ok(String::from_utf8_lossy(&buf).into_owned());
    };

    match std::fs::read(arg) {
        Ok(contents) => {
            tracing::debug!(path = arg, bytes = contents.len(), "read document from file");
            Ok(String::from_utf8_lossy(&contents).into_owned())
        }
        Err(err) => {
            tracing::debug!(%err, "argument is not a readable file, rendering it as markdown");
            Ok(arg.to_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stdin_is_used_without_argument() {
        let doc = read_document_from(None, "# from stdin".as_bytes()).unwrap();
        assert_eq!(doc, "# from stdin");
    }

    #[test]
    fn literal_fallback_ignores_stdin() {
        let doc = read_document_from(Some("**not a file**"), "ignored".as_bytes()).unwrap();
        assert_eq!(doc, "**not a file**");
    }
}
