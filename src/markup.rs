//! Adapter for the speller service's class-based HTML markup.
//!
//! The service annotates corrections with `<em class='..._text'>` spans
//! whose class names encode the correction category. The substitution
//! table below rewrites that markup into inline-styled `<b>` tags and
//! remaps two of the vendor colors. The table is applied in declaration
//! order and is coupled to the vendor's exact class names; treat any
//! change to it as a new adapter version.

/// Literal substitutions, applied in order, to one vendor HTML fragment.
const SUBSTITUTIONS: [(&str, &str); 5] = [
    ("class='", "style=\"color:"),
    ("_text'", "\""),
    ("em", "b"),
    ("color:green", "color:#03CF5D"),
    ("color:violet", "color:#B22AF8"),
];

/// Correction categories and their display colors, as produced by the
/// substitution table. Shown as the output legend.
pub const LEGEND: [(&str, &str); 4] = [
    ("red", "Spelling"),
    ("#B22AF8", "Nonstandard word"),
    ("#03CF5D", "Word spacing"),
    ("blue", "Statistical correction"),
];

/// Rewrite one vendor fragment into the inline-styled form kept in the
/// output buffer.
pub fn adapt(vendor_html: &str) -> String {
    let mut html = vendor_html.to_string();
    for (from, to) in SUBSTITUTIONS {
        html = html.replace(from, to);
    }
    html
}

/// Convert adapted markup into Pango markup for the output label.
///
/// Handles exactly the shapes `adapt` produces: `<b style="color:X">`,
/// `</b>`, and `<br>`. Entity escapes pass through; Pango accepts the
/// same basic entities as HTML.
pub fn to_pango(adapted: &str) -> String {
    let mut out = String::with_capacity(adapted.len());
    let mut rest = adapted;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let tag_rest = &rest[start..];
        if let Some(color) = tag_rest.strip_prefix("<b style=\"color:") {
            match color.find("\">") {
                Some(end) => {
                    out.push_str(&format!(
                        "<span foreground=\"{}\" weight=\"bold\">",
                        &color[..end]
                    ));
                    rest = &color[end + 2..];
                }
                None => {
                    // Unterminated tag; emit verbatim, escaped.
                    out.push_str("&lt;");
                    rest = &tag_rest[1..];
                }
            }
        } else if let Some(after) = tag_rest.strip_prefix("</b>") {
            out.push_str("</span>");
            rest = after;
        } else if let Some(after) = tag_rest.strip_prefix("<br>") {
            out.push('\n');
            rest = after;
        } else {
            out.push_str("&lt;");
            rest = &tag_rest[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Strip adapted markup down to plain text, for saving and the
/// clipboard. `<br>` becomes a newline; basic entities are unescaped.
pub fn to_plain(adapted: &str) -> String {
    let mut out = String::with_capacity(adapted.len());
    let mut rest = adapted;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let tag_rest = &rest[start..];
        if let Some(after) = tag_rest.strip_prefix("<br>") {
            out.push('\n');
            rest = after;
        } else if let Some(end) = tag_rest.find('>') {
            rest = &tag_rest[end + 1..];
        } else {
            out.push('<');
            rest = &tag_rest[1..];
        }
    }
    out.push_str(rest);
    unescape_entities(&out)
}

fn unescape_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapts_spacing_annotation() {
        let vendor = "<em class='green_text'>안녕 하세요</em>";
        assert_eq!(adapt(vendor), "<b style=\"color:#03CF5D\">안녕 하세요</b>");
    }

    #[test]
    fn adapts_nonstandard_word_annotation() {
        let vendor = "<em class='violet_text'>머</em>라고";
        assert_eq!(adapt(vendor), "<b style=\"color:#B22AF8\">머</b>라고");
    }

    #[test]
    fn red_and_blue_pass_through_unmapped() {
        assert_eq!(
            adapt("<em class='red_text'>외않되</em>"),
            "<b style=\"color:red\">외않되</b>"
        );
        assert_eq!(
            adapt("<em class='blue_text'>같다</em>"),
            "<b style=\"color:blue\">같다</b>"
        );
    }

    #[test]
    fn substitutions_apply_in_declaration_order() {
        // "em" is rewritten before the color remaps, so the remaps must
        // be keyed on the already-rewritten text. A raw "green" survives
        // only as part of "color:green".
        assert_eq!(adapt("green"), "green");
        assert_eq!(adapt("color:green"), "color:#03CF5D");
    }

    #[test]
    fn plain_text_outside_tags_is_untouched() {
        assert_eq!(adapt("맞춤법 검사 결과"), "맞춤법 검사 결과");
    }

    #[test]
    fn pango_rendering_of_adapted_fragment() {
        let adapted = "<b style=\"color:#03CF5D\">안녕 하세요</b> 여러분";
        assert_eq!(
            to_pango(adapted),
            "<span foreground=\"#03CF5D\" weight=\"bold\">안녕 하세요</span> 여러분"
        );
    }

    #[test]
    fn pango_rendering_of_line_break() {
        assert_eq!(to_pango("<br>"), "\n");
    }

    #[test]
    fn pango_escapes_unknown_tags() {
        assert_eq!(to_pango("a <i>b</i>"), "a &lt;i>b&lt;/i>");
    }

    #[test]
    fn plain_text_strips_markup_and_entities() {
        let adapted = "<b style=\"color:red\">외않되</b>요&nbsp;&amp; 끝<br>";
        assert_eq!(to_plain(adapted), "외않되요 & 끝\n");
    }
}
