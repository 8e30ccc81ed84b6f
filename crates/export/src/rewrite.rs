//! Canvas markup to JSX rewriting
//!
//! The canvas produces plain HTML; the exported Vite project consumes JSX.
//! The rewrite is a fixed set of textual substitutions over the full
//! document, applied in one pass each. Both functions are pure and total:
//! any input string produces an output string.

/// Rewrite canvas HTML into JSX-compatible markup.
///
/// - `class=` attributes become `className=`
/// - `for=` attributes become `htmlFor=`
/// - void `<br>` tags become self-closing `<br />`
pub fn rewrite_markup(html: &str) -> String {
    html.replace("class=", "className=")
        .replace("for=", "htmlFor=")
        .replace("<br>", "<br />")
}

/// Wrap rewritten markup in the exported project's entry component.
///
/// The component imports the Tailwind stylesheet so utility classes carried
/// over from the canvas keep working, and default-exports `App` for the
/// Vite entry point to mount.
pub fn wrap_entry_component(jsx: &str) -> String {
    format!(
        r#"import 'tailwindcss/tailwind.css';

const App = () => {{
  return (
    <div>
      {jsx}
    </div>
  );
}};

export default App;
"#
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrites_all_attribute_forms() {
        let html = r#"<div class="x" for="y"><br></div>"#;
        assert_eq!(
            rewrite_markup(html),
            r#"<div className="x" htmlFor="y"><br /></div>"#
        );
    }

    #[test]
    fn test_rewrites_every_occurrence() {
        let html = r#"<p class="a"></p><p class="b"><br><br></p>"#;
        let out = rewrite_markup(html);
        assert_eq!(out.matches("className=").count(), 2);
        assert_eq!(out.matches("<br />").count(), 2);
        assert!(!out.contains("class="));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(rewrite_markup(""), "");
    }

    #[test]
    fn test_markup_without_rewrites_passes_through() {
        let html = "<section><h1>Hello</h1></section>";
        assert_eq!(rewrite_markup(html), html);
    }

    #[test]
    fn test_entry_component_shape() {
        let out = wrap_entry_component(r#"<div className="hero">Hi</div>"#);
        assert!(out.starts_with("import 'tailwindcss/tailwind.css';"));
        assert!(out.contains(r#"<div className="hero">Hi</div>"#));
        assert!(out.contains("const App = () => {"));
        assert!(out.ends_with("export default App;\n"));
    }
}
