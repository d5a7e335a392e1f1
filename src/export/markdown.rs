//! Markdown rendering, the canonical layout all text formats share.

use crate::example::ExampleArtifacts;
use crate::structure::DocumentStructure;
use crate::summarize::SummaryArtifacts;

pub fn render_markdown(
    structure: &DocumentStructure,
    summaries: &SummaryArtifacts,
    examples: &ExampleArtifacts,
) -> String {
    let mut out = String::new();
    out.push_str("# Textbook Summary\n\n");

    out.push_str("## Chapter Summaries\n\n");
    for chapter in &structure.chapters {
        out.push_str(&format!("### {}. {}\n\n", chapter.id, chapter.title));
        if let Some(summary) = summaries.chapters.get(&chapter.id) {
            out.push_str(summary);
            out.push_str("\n\n");
        }
    }

    out.push_str("## Topic Summaries\n\n");
    for (_, topic) in structure.topics() {
        out.push_str(&format!("### {} {}\n\n", topic.id, topic.title));
        if let Some(summary) = summaries.topics.get(&topic.id) {
            out.push_str(summary);
            out.push_str("\n\n");
        }
    }

    out.push_str("## Examples\n\n");
    for (_, topic) in structure.topics() {
        let Some(topic_examples) = examples.get(&topic.id) else {
            continue;
        };
        if topic_examples.is_empty() {
            continue;
        }
        out.push_str(&format!("### {} {}\n\n", topic.id, topic.title));
        for (i, example) in topic_examples.iter().enumerate() {
            out.push_str(&format!("**Example {}:** {}\n\n", i + 1, example));
        }
    }

    while out.ends_with('\n') {
        out.pop();
    }
    out.push('\n');
    out
}
