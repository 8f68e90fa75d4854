//! End-to-end pipeline tests over scripted providers and stub
//! collaborators: round-limit termination, the citation-policy hard
//! failure, and degraded sections still reaching the report.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use chronicle_agents::{ScriptedVerdict, StubDrafter, StubEditor, StubReviewer};
use chronicle_core::config::ChronicleConfig;
use chronicle_core::errors::{ChronicleError, ChronicleResult};
use chronicle_core::models::evidence::{EvidenceItem, SourceType};
use chronicle_core::models::section::SectionSpec;
use chronicle_core::models::window::TimeWindow;
use chronicle_core::traits::{ArticleFetcher, SearchProvider};
use chronicle_pipeline::Pipeline;
use chronicle_retrieval::AcquisitionEngine;

fn window() -> TimeWindow {
    TimeWindow::new(
        NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
        NaiveDate::from_ymd_opt(2026, 8, 17).unwrap(),
    )
    .unwrap()
}

fn sections() -> Vec<SectionSpec> {
    vec![
        SectionSpec {
            id: "fibre".to_string(),
            display_name: "Fibre".to_string(),
            keywords: vec!["fibre rollout".to_string()],
            entities: vec!["Openreach".to_string()],
        },
        SectionSpec {
            id: "spectrum".to_string(),
            display_name: "Spectrum".to_string(),
            keywords: vec!["spectrum auction".to_string()],
            entities: vec!["Ofcom".to_string()],
        },
    ]
}

fn config() -> ChronicleConfig {
    ChronicleConfig {
        report_title: "Telecom week in review".to_string(),
        max_review_rounds: 2,
        ..Default::default()
    }
}

/// Search provider returning one in-window snippet per query.
struct FixedSearch;

#[async_trait]
impl SearchProvider for FixedSearch {
    async fn search(
        &self,
        query: &str,
        _max_results: usize,
        _window_days: Option<i64>,
    ) -> ChronicleResult<Vec<EvidenceItem>> {
        let slug: String = query
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect();
        let mut item = EvidenceItem::new(SourceType::Web, "web_search")
            .with_url(format!("https://example.com/{slug}"))
            .with_title(format!("Coverage of {query}"))
            .with_text("Snippet text.");
        item.set_data_str("publish_date", "2026-08-12");
        Ok(vec![item])
    }
}

/// Fetcher that never finds a full article.
struct NoFetch;

#[async_trait]
impl ArticleFetcher for NoFetch {
    async fn fetch(&self, _url: &str) -> ChronicleResult<Option<EvidenceItem>> {
        Ok(None)
    }
}

fn pipeline(reviewer: StubReviewer, editor: StubEditor) -> Pipeline {
    let engine = AcquisitionEngine::new(Arc::new(FixedSearch), Arc::new(NoFetch));
    Pipeline::new(
        engine,
        Arc::new(StubDrafter),
        Arc::new(reviewer),
        Arc::new(editor),
        config(),
    )
}

#[tokio::test]
async fn accepted_sections_reach_the_report_in_one_round() -> Result<()> {
    let output = pipeline(StubReviewer::accepting(), StubEditor::new())
        .run(&sections(), window())
        .await?;

    assert_eq!(output.drafts.len(), 2);
    assert_eq!(output.reviews["fibre"].len(), 1);
    assert_eq!(output.reviews["spectrum"].len(), 1);
    assert!(output.report.starts_with("# Telecom week in review — 2026-08-17"));
    assert!(output.report.contains("**Key developments**"));
    assert_eq!(output.change_log, vec!["No changes required.".to_string()]);
    Ok(())
}

#[tokio::test]
async fn round_limit_retains_two_reviews_and_still_produces_a_report() -> Result<()> {
    let output = pipeline(StubReviewer::rejecting("uncited claim"), StubEditor::new())
        .run(&sections(), window())
        .await?;

    // Two rounds ran; both rejections were retained for audit and the
    // round-two draft proceeded to editing anyway.
    for id in ["fibre", "spectrum"] {
        let history = &output.reviews[id];
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|r| !r.accepted));
        assert_eq!(history[0].round, 1);
        assert_eq!(history[1].round, 2);
    }
    assert_eq!(output.drafts.len(), 2);
    assert!(output.report.contains("---"));
    Ok(())
}

#[tokio::test]
async fn second_round_acceptance_stops_the_loop_early() -> Result<()> {
    let reviewer = StubReviewer::new(vec![
        ScriptedVerdict::reject("needs a citation"),
        ScriptedVerdict::accept(),
    ]);
    let output = pipeline(reviewer, StubEditor::new())
        .run(&sections(), window())
        .await?;

    let history = &output.reviews["fibre"];
    assert_eq!(history.len(), 2);
    assert!(!history[0].accepted);
    assert!(history[1].accepted);
    Ok(())
}

#[tokio::test]
async fn unsupported_claims_abort_the_run() {
    let editor = StubEditor::flagging(vec!["invented subscriber figure".to_string()]);
    let err = pipeline(StubReviewer::accepting(), editor)
        .run(&sections(), window())
        .await
        .unwrap_err();

    match err {
        ChronicleError::CitationPolicy { claims } => {
            assert_eq!(claims, vec!["invented subscriber figure".to_string()]);
        }
        other => panic!("expected citation policy failure, got {other}"),
    }
}

#[tokio::test]
async fn sections_render_their_own_evidence() -> Result<()> {
    let output = pipeline(StubReviewer::accepting(), StubEditor::new())
        .run(&sections(), window())
        .await?;

    // Packs were built per section and drafts cite only their own pack.
    for id in ["fibre", "spectrum"] {
        let pack = &output.packs[id];
        assert!(!pack.is_empty());
        let known = pack.id_set();
        let draft = output
            .drafts
            .iter()
            .find(|d| d.section_id == id)
            .expect("draft for section");
        for bullet in &draft.bullets {
            assert!(bullet.evidence_ids.iter().all(|i| known.contains(i)));
        }
    }
    // Citation numbering is local to each section.
    assert!(output.report.matches("[1]:").count() >= 2);
    Ok(())
}
