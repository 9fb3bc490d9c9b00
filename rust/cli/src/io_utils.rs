//! File reading helpers shared by the commands.
//!
//! Request and card files may be Zstandard compressed; the `.zst` extension
//! selects decompression.

/// Read a text file, decompressing it when the path ends with `.zst`.
///
/// A leading UTF-8 BOM is removed.
///
/// # Example
///
/// ```rust,no_run
/// # use handsim_cli::io_utils::read_text_auto;
/// let request = read_text_auto("requests/starter.json.zst").unwrap();
/// ```
pub fn read_text_auto(path: &str) -> Result<String, String> {
    let mut content = if path.ends_with(".zst") {
        let comp = std::fs::read(path).map_err(|e| format!("{}: {}", path, e))?;
        let dec = zstd::stream::decode_all(comp.as_slice()).map_err(|e| format!("{}: {}", path, e))?;
        String::from_utf8(dec).map_err(|e| format!("{}: {}", path, e))?
    } else {
        std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_strip_utf8_bom() {
        let mut s = "\u{feff}{\"deck\":[]}".to_string();
        strip_utf8_bom(&mut s);
        assert_eq!(s, "{\"deck\":[]}");
    }

    #[test]
    fn test_strip_utf8_bom_no_bom() {
        let mut s = "hello".to_string();
        strip_utf8_bom(&mut s);
        assert_eq!(s, "hello");
    }

    #[test]
    fn test_read_plain_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "\u{feff}plain text").unwrap();
        let content = read_text_auto(f.path().to_str().unwrap()).unwrap();
        assert_eq!(content, "plain text");
    }

    #[test]
    fn test_read_zst_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json.zst");
        let packed = zstd::stream::encode_all("{\"trials\":5}".as_bytes(), 3).unwrap();
        std::fs::write(&path, packed).unwrap();
        let content = read_text_auto(path.to_str().unwrap()).unwrap();
        assert_eq!(content, "{\"trials\":5}");
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = read_text_auto("definitely/not/here.json").unwrap_err();
        assert!(err.contains("definitely/not/here.json"));
    }
}
