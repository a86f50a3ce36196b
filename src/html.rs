/// Escapes `& < > " '` so text can be placed in markup or an attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_tag_is_neutralised() {
        assert_eq!(
            escape_html("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_all_five_characters() {
        assert_eq!(escape_html(r#"a & b "c" 'd'"#), "a &amp; b &quot;c&quot; &#039;d&#039;");
        assert_eq!(escape_html("Réécouter"), "Réécouter");
    }
}
