//! Locating and replacing the script block of a Vue single-file component.
//!
//! This is a textual span operation, not a markup parser: only the first
//! `<script>` element is considered and every byte outside of it is kept.

use crate::app::models::ScriptBlockMatch;
use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(<script(?:\s[^>]*)?>\s*)([\s\S]*?)(\s*</script>)")
        .expect("script block pattern is valid")
});

/// Markers that suggest render functions or JSX in a script body.
const RENDER_MARKERS: [&str; 3] = ["render(h)", "render: function(h)", "functional:"];

/// Finds the first script element. Later script elements are left alone.
pub fn extract_script(markup: &str) -> Option<ScriptBlockMatch<'_>> {
    let caps = SCRIPT_BLOCK.captures(markup)?;
    let whole = caps.get(0)?;

    Some(ScriptBlockMatch {
        open_tag: caps.get(1)?.as_str(),
        content: caps.get(2)?.as_str(),
        close_tag: caps.get(3)?.as_str(),
        offset: whole.start(),
        length: whole.len(),
    })
}

/// Textual check for render-function or JSX-like syntax.
///
/// Over- and under-matching are both expected; the predicate only picks the
/// transform profile.
pub fn is_complex(content: &str) -> bool {
    RENDER_MARKERS.iter().any(|marker| content.contains(marker))
        || (content.contains("return")
            && content.contains('(')
            && content.contains('<')
            && content.contains("/>"))
}

/// Rebuilds the markup with `new_content` between the original tags.
pub fn splice(markup: &str, block: &ScriptBlockMatch<'_>, new_content: &str) -> String {
    let end = block.offset + block.length;
    let mut output = String::with_capacity(markup.len() + new_content.len());
    output.push_str(&markup[..block.offset]);
    output.push_str(block.open_tag);
    output.push_str(new_content);
    output.push_str(block.close_tag);
    output.push_str(&markup[end..]);
    output
}
