//! Markdown rendering for sections and the assembled report.

use chronicle_core::constants::{BIG_PICTURE_MARKER_CAP, BULLET_MARKER_CAP};
use chronicle_core::models::section::SectionDraft;
use chronicle_core::models::window::TimeWindow;
use chronicle_evidence::EvidencePack;
use tracing::debug;

use crate::numbering::CitationNumbers;

/// Inline markers for the first `cap` numbered ids, e.g. ` [1][2]`.
fn markers(ids: &[String], numbers: &CitationNumbers, cap: usize) -> String {
    let mut out = String::new();
    for id in ids.iter().take(cap) {
        if let Some(n) = numbers.number(id) {
            out.push_str(&format!("[{n}]"));
        }
    }
    if out.is_empty() {
        out
    } else {
        format!(" {out}")
    }
}

/// The best available footnote descriptor for one evidence item.
///
/// Title and URL render as a link, a bare title renders alone, and an
/// item with neither gets no footnote line at all.
fn footnote_descriptor(pack: &EvidencePack, id: &str) -> Option<String> {
    let item = pack.get(id)?;
    match (item.title.as_deref(), item.url.as_deref()) {
        (Some(title), Some(url)) => Some(format!("[{title}]({url})")),
        (Some(title), None) => Some(title.to_string()),
        _ => None,
    }
}

/// Render one section draft to markdown.
pub fn render_section(draft: &SectionDraft, pack: &EvidencePack) -> String {
    let numbers = CitationNumbers::for_draft(draft);
    let mut out = String::new();

    if let Some(headline) = draft.headline.as_deref() {
        out.push_str(&format!("### {headline}\n\n"));
    }

    out.push_str(&draft.big_picture);
    out.push_str(&markers(
        &draft.big_picture_evidence_ids,
        &numbers,
        BIG_PICTURE_MARKER_CAP,
    ));
    out.push('\n');

    if !draft.bullets.is_empty() {
        out.push_str("\n**Key developments**\n\n");
        for bullet in &draft.bullets {
            out.push_str(&format!(
                "- {}{}\n",
                bullet.text,
                markers(&bullet.evidence_ids, &numbers, BULLET_MARKER_CAP)
            ));
        }
    }

    let footnotes: Vec<String> = numbers
        .iter()
        .filter_map(|(n, id)| footnote_descriptor(pack, id).map(|d| format!("[{n}]: {d}")))
        .collect();
    if !footnotes.is_empty() {
        out.push('\n');
        for line in footnotes {
            out.push_str(&line);
            out.push('\n');
        }
    }

    debug!(section = %draft.section_id, citations = numbers.len(), "section rendered");
    out
}

/// Stitch per-section renders together under the report header.
pub fn assemble_report(
    title: &str,
    window: &TimeWindow,
    voice_profile: &str,
    sections: &[String],
) -> String {
    let mut out = format!(
        "# {title} — {end}\n\n*Coverage window: {start} to {end}*\n*Voice: {voice_profile}*\n",
        end = window.end,
        start = window.start,
    );
    for section in sections {
        out.push_str("\n---\n\n");
        out.push_str(section.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use chronicle_core::models::evidence::{EvidenceItem, SourceType};
    use chronicle_core::models::section::Bullet;

    use super::*;

    fn fixture() -> (SectionDraft, EvidencePack, Vec<String>) {
        let mut pack = EvidencePack::new("fibre");
        let mut ids = Vec::new();
        let a = EvidenceItem::new(SourceType::Web, "web_search")
            .with_url("https://example.com/a")
            .with_title("Rollout hits milestone");
        ids.push(a.id.clone());
        pack.add(a);
        let b = EvidenceItem::new(SourceType::News, "article").with_title("Untracked note");
        ids.push(b.id.clone());
        pack.add(b);
        let c = EvidenceItem::new(SourceType::Web, "web_search")
            .with_url("https://example.com/c");
        ids.push(c.id.clone());
        pack.add(c);

        let draft = SectionDraft {
            section_id: "fibre".to_string(),
            headline: Some("Fibre pushes on".to_string()),
            big_picture: "Build pace held up this week.".to_string(),
            big_picture_evidence_ids: vec![ids[0].clone(), ids[1].clone()],
            bullets: vec![Bullet {
                text: "Coverage target moved forward.".to_string(),
                evidence_ids: vec![ids[2].clone()],
                entity: None,
            }],
            risk_flags: vec![],
        };
        (draft, pack, ids)
    }

    #[test]
    fn section_renders_headline_markers_and_footnotes() {
        let (draft, pack, _) = fixture();
        let out = render_section(&draft, &pack);
        assert!(out.starts_with("### Fibre pushes on\n"));
        assert!(out.contains("Build pace held up this week. [1][2]\n"));
        assert!(out.contains("**Key developments**"));
        assert!(out.contains("- Coverage target moved forward. [3]\n"));
        assert!(out.contains("[1]: [Rollout hits milestone](https://example.com/a)\n"));
        assert!(out.contains("[2]: Untracked note\n"));
        // Item three has a URL but no title, so no footnote line.
        assert!(!out.contains("[3]:"));
    }

    #[test]
    fn big_picture_markers_are_capped_at_three() {
        let (mut draft, mut pack, mut ids) = fixture();
        for i in 0..2 {
            let item = EvidenceItem::new(SourceType::Web, "web_search")
                .with_url(format!("https://example.com/extra{i}"))
                .with_title(format!("Extra {i}"));
            ids.push(item.id.clone());
            pack.add(item);
        }
        draft.big_picture_evidence_ids = ids.clone();
        let out = render_section(&draft, &pack);
        assert!(out.contains("Build pace held up this week. [1][2][3]\n"));
        assert!(!out.contains("[1][2][3][4]"));
    }

    #[test]
    fn headline_is_optional() {
        let (mut draft, pack, _) = fixture();
        draft.headline = None;
        let out = render_section(&draft, &pack);
        assert!(!out.contains("###"));
        assert!(out.starts_with("Build pace held up this week."));
    }

    #[test]
    fn report_header_and_separators() {
        let window = TimeWindow::new(
            "2026-08-10".parse().unwrap(),
            "2026-08-17".parse().unwrap(),
        )
        .unwrap();
        let report = assemble_report(
            "Telecom week in review",
            &window,
            "expert_operator",
            &["Section one.\n".to_string(), "Section two.\n".to_string()],
        );
        assert!(report.starts_with("# Telecom week in review — 2026-08-17\n"));
        assert!(report.contains("*Coverage window: 2026-08-10 to 2026-08-17*"));
        assert!(report.contains("*Voice: expert_operator*"));
        assert_eq!(report.matches("\n---\n").count(), 2);
        assert!(report.contains("Section one."));
        assert!(report.contains("Section two."));
    }
}
