//! Plain-text rendering: markdown with heading and emphasis markers
//! stripped. Deliberately not a markdown parser.

/// Remove leading `#` heading markers and all `*`/`_` emphasis markers.
pub fn strip_markdown(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    for line in markdown.lines() {
        let without_heading = line.trim_start_matches('#');
        let line = if without_heading.len() != line.len() {
            without_heading.trim_start()
        } else {
            line
        };
        out.extend(line.chars().filter(|c| *c != '*' && *c != '_'));
        out.push('\n');
    }
    out
}
