//! Marp-flavored markdown slide deck.
//!
//! One title slide, a section slide per artifact kind, then one slide per
//! chapter, per topic, and per topic with examples, separated by `---`.

use crate::example::ExampleArtifacts;
use crate::structure::DocumentStructure;
use crate::summarize::SummaryArtifacts;

pub fn render_slides(
    structure: &DocumentStructure,
    summaries: &SummaryArtifacts,
    examples: &ExampleArtifacts,
) -> String {
    let mut slides: Vec<String> = Vec::new();
    slides.push("# Textbook Summary\n\nGenerated study deck".into());

    slides.push("## Chapter Summaries".into());
    for chapter in &structure.chapters {
        let mut slide = format!("### {}. {}", chapter.id, chapter.title);
        if let Some(summary) = summaries.chapters.get(&chapter.id) {
            slide.push_str("\n\n");
            slide.push_str(summary);
        }
        slides.push(slide);
    }

    slides.push("## Topic Summaries".into());
    for (_, topic) in structure.topics() {
        let mut slide = format!("### {} {}", topic.id, topic.title);
        if let Some(summary) = summaries.topics.get(&topic.id) {
            slide.push_str("\n\n");
            slide.push_str(summary);
        }
        slides.push(slide);
    }

    slides.push("## Examples".into());
    for (_, topic) in structure.topics() {
        let Some(topic_examples) = examples.get(&topic.id) else {
            continue;
        };
        if topic_examples.is_empty() {
            continue;
        }
        let mut slide = format!("### {} {}", topic.id, topic.title);
        for (i, example) in topic_examples.iter().enumerate() {
            slide.push_str(&format!("\n\n**Example {}:** {}", i + 1, example));
        }
        slides.push(slide);
    }

    format!(
        "---\nmarp: true\npaginate: true\n---\n\n{}\n",
        slides.join("\n\n---\n\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::{sample_examples, sample_structure, sample_summaries};

    #[test]
    fn deck_has_front_matter_and_slide_breaks() {
        let deck = render_slides(&sample_structure(), &sample_summaries(), &sample_examples());
        assert!(deck.starts_with("---\nmarp: true\n"));
        // title + 3 section slides + 1 chapter + 2 topics + 2 example slides
        assert_eq!(deck.matches("\n\n---\n\n").count(), 8);
    }

    #[test]
    fn chapter_and_topic_slides_carry_their_summaries() {
        let deck = render_slides(&sample_structure(), &sample_summaries(), &sample_examples());
        assert!(deck.contains("### 1. Mechanics\n\nChapter summary body."));
        assert!(deck.contains("### 1.2 Dynamics\n\nDynamics summary."));
    }
}
