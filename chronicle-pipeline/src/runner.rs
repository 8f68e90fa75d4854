//! End-to-end pipeline runner.

use std::collections::HashMap;
use std::sync::Arc;

use chronicle_agents::{DraftConstraints, Drafter, Editor, Reviewer};
use chronicle_assembly::{assemble_report, render_section};
use chronicle_core::config::ChronicleConfig;
use chronicle_core::constants::MAX_BULLETS;
use chronicle_core::errors::ChronicleResult;
use chronicle_core::models::budget::CallBudget;
use chronicle_core::models::review::ReviewResult;
use chronicle_core::models::section::{SectionDraft, SectionSpec};
use chronicle_core::models::window::TimeWindow;
use chronicle_evidence::{DatePolicy, EvidencePack};
use chronicle_retrieval::{build_search_queries, AcquisitionEngine};
use chronicle_review::{FixLoopController, ReviewGate};
use tracing::{info, warn};

use crate::merge::merge_section_outputs;
use crate::state::{PipelineFsm, PipelineState};

/// Everything a run produces, for the caller and for audit.
#[derive(Debug)]
pub struct PipelineOutput {
    /// Evidence pack per section id.
    pub packs: HashMap<String, EvidencePack>,
    /// Final post-edit drafts, in input section order.
    pub drafts: Vec<SectionDraft>,
    /// Append-only review history per section id.
    pub reviews: HashMap<String, Vec<ReviewResult>>,
    /// Rendered markdown report.
    pub report: String,
    /// Editor change log.
    pub change_log: Vec<String>,
}

/// Drives sections from research through assembly.
pub struct Pipeline {
    engine: Arc<AcquisitionEngine>,
    drafter: Arc<dyn Drafter>,
    reviewer: Arc<dyn Reviewer>,
    editor: Arc<dyn Editor>,
    config: ChronicleConfig,
}

impl Pipeline {
    pub fn new(
        engine: AcquisitionEngine,
        drafter: Arc<dyn Drafter>,
        reviewer: Arc<dyn Reviewer>,
        editor: Arc<dyn Editor>,
        config: ChronicleConfig,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            drafter,
            reviewer,
            editor,
            config,
        }
    }

    /// Run the full pipeline over `sections` for the given window.
    ///
    /// Provider and collaborator failures degrade section-locally; the
    /// only hard failure is a citation-policy violation from the editor.
    pub async fn run(
        &self,
        sections: &[SectionSpec],
        window: TimeWindow,
    ) -> ChronicleResult<PipelineOutput> {
        self.config.validate()?;
        let mut fsm = PipelineFsm::new(self.config.max_review_rounds);
        let policy = if self.config.strict_date_filtering {
            DatePolicy::Strict
        } else {
            DatePolicy::Lenient
        };

        // Research: one concurrent acquisition task per section, merged
        // by the controller once every task has completed.
        fsm.transition(PipelineState::Researching)?;
        let mut handles = Vec::new();
        for section in sections {
            let engine = Arc::clone(&self.engine);
            let queries =
                build_search_queries(section, &window, self.config.region_focus.as_deref());
            let budget = CallBudget::new(self.config.evidence_budget);
            let section_id = section.id.clone();
            handles.push(tokio::spawn(async move {
                let pack = engine
                    .acquire(&section_id, &queries, budget, &window, policy)
                    .await;
                (section_id, pack)
            }));
        }
        let mut outputs = Vec::new();
        for handle in handles {
            match handle.await {
                Ok(output) => outputs.push(output),
                Err(e) => warn!(error = %e, "research task panicked, section dropped"),
            }
        }
        let packs = merge_section_outputs(outputs);

        // Review loop: draft, review, gate, redraft while rounds remain.
        let gate = ReviewGate::from_config(&self.config);
        let mut controller = FixLoopController::new(self.config.max_review_rounds);
        for section in sections {
            controller.register(&section.id);
        }
        let constraints = DraftConstraints {
            window,
            voice_profile: self.config.voice_profile.clone(),
            style_prompt: self.config.style_prompt.clone(),
            region_focus: self.config.region_focus.clone(),
            bullet_count: MAX_BULLETS,
        };
        let empty_pack_for = |id: &str| EvidencePack::new(id);
        let mut drafts: HashMap<String, SectionDraft> = HashMap::new();
        loop {
            let pending = controller.pending();
            for section in sections.iter().filter(|s| pending.contains(&s.id)) {
                let round = controller.begin_round(&section.id);
                let owned_empty;
                let pack = match packs.get(&section.id) {
                    Some(pack) => pack,
                    None => {
                        owned_empty = empty_pack_for(&section.id);
                        &owned_empty
                    }
                };
                let draft = self.drafter.draft(section, pack, &constraints).await?;
                let review = self
                    .reviewer
                    .review(&draft, pack, &self.config.voice_profile, round)
                    .await?;
                let accepted = gate.decide(&review);
                info!(
                    section = %section.id,
                    round,
                    accepted,
                    grounding = review.scores.grounding,
                    clarity = review.scores.clarity,
                    "section reviewed"
                );
                controller.record(review, accepted);
                drafts.insert(section.id.clone(), draft);
            }

            fsm.transition(PipelineState::Reviewing)?;
            fsm.transition(PipelineState::FixingOrDone)?;
            if controller.all_settled() {
                break;
            }
            fsm.transition(PipelineState::Researching)?;
        }

        // Editing: the one phase that can abort the run.
        fsm.transition(PipelineState::Editing)?;
        let ordered_drafts: Vec<SectionDraft> = sections
            .iter()
            .filter_map(|s| drafts.get(&s.id).cloned())
            .collect();
        let outcome = self
            .editor
            .edit(
                &ordered_drafts,
                &self.config.voice_profile,
                self.config.style_prompt.as_deref(),
            )
            .await?;

        // Assembly.
        fsm.transition(PipelineState::Assembling)?;
        let rendered: Vec<String> = outcome
            .drafts
            .iter()
            .map(|draft| {
                let owned_empty;
                let pack = match packs.get(&draft.section_id) {
                    Some(pack) => pack,
                    None => {
                        owned_empty = empty_pack_for(&draft.section_id);
                        &owned_empty
                    }
                };
                render_section(draft, pack)
            })
            .collect();
        let report = assemble_report(
            &self.config.report_title,
            &window,
            &self.config.voice_profile,
            &rendered,
        );
        fsm.transition(PipelineState::Done)?;
        info!(
            sections = sections.len(),
            redraft_cycles = fsm.redraft_cycles(),
            "pipeline run complete"
        );

        Ok(PipelineOutput {
            packs,
            drafts: outcome.drafts,
            reviews: controller.into_history(),
            report,
            change_log: outcome.change_log,
        })
    }
}
