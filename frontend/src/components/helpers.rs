/// Escapes `&`, `<`, `>`, `"` and `'` so text can be injected as HTML.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// "1 cat" / "n cats".
pub fn cat_count_label(count: usize) -> String {
    if count == 1 {
        "1 cat in your collection".to_string()
    } else {
        format!("{} cats in your collection", count)
    }
}

pub fn format_mib(bytes: u64) -> String {
    format!("{:.0} MiB", bytes as f64 / (1024.0 * 1024.0))
}

/// Size of a picked file: kilobytes below one MiB, otherwise MiB with one decimal.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 * 1024 {
        format!("{} KB", bytes.div_ceil(1024))
    } else {
        format!("{:.1} MiB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("<b>\"it's\" & co</b>"), "&lt;b&gt;&quot;it&#39;s&quot; &amp; co&lt;/b&gt;");
    }

    #[test]
    fn pluralizes_the_collection_size() {
        assert_eq!(cat_count_label(1), "1 cat in your collection");
        assert_eq!(cat_count_label(0), "0 cats in your collection");
        assert_eq!(cat_count_label(12), "12 cats in your collection");
    }

    #[test]
    fn formats_sizes() {
        assert_eq!(format_mib(5 * 1024 * 1024), "5 MiB");
        assert_eq!(format_file_size(1500), "2 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024 + 512 * 1024), "3.5 MiB");
    }
}
