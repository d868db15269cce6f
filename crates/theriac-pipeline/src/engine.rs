//! Normalization and mining engine implementations

use std::fmt;

use tracing::{debug, info};

use theriac_domain::record::EvidenceRecord;
use theriac_domain::traits::{DocumentRepository, ResolutionService};
use theriac_extractor::{
    BulkExtraction, DrugExtraction, ExtractionOptions, Lexicon, LiteratureExtractor,
};
use theriac_gatekeeper::{QualityFilter, Validator};
use theriac_normalizer::{
    group_by_pair, Merger, NormalizationReport, Standardizer, StandardizerTables,
};
use theriac_resolver::{EntityResolver, ResolverStats};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::types::{MiningOutcome, NormalizationOutcome, RejectedRecord, RunAccounting};

/// Reason attached to records the standardizer drops
const STANDARDIZATION_REASON: &str = "Standardization left no usable drug name or mechanism";

/// End-to-end normalization over already-extracted records
///
/// Wires the stages in their fixed order: standardize, resolve, validate,
/// group, merge and score, filter, report. Data-quality problems never
/// abort a run; they land in the rejected bucket with reasons, and the
/// accounting records what every stage consumed.
///
/// # Examples
///
/// ```no_run
/// use theriac_pipeline::{EngineConfig, NormalizationEngine};
/// use theriac_resolver::MockResolutionService;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut service = MockResolutionService::new();
/// service.add_ingredient("warfarin", "11289");
///
/// let engine = NormalizationEngine::new(service, EngineConfig::default());
/// let outcome = engine.normalize(Vec::new())?;
/// println!("{}", outcome.report.summary());
/// # Ok(())
/// # }
/// ```
pub struct NormalizationEngine<S> {
    standardizer: Standardizer,
    resolver: EntityResolver<S>,
    validator: Validator,
    merger: Merger,
    filter: QualityFilter,
}

impl<S> NormalizationEngine<S>
where
    S: ResolutionService,
    S::Error: fmt::Display,
{
    /// Create an engine over a resolution service
    pub fn new(service: S, config: EngineConfig) -> Self {
        Self {
            standardizer: Standardizer::default_tables(),
            resolver: EntityResolver::new(service),
            validator: Validator::new(),
            merger: Merger::new(config.scoring),
            filter: QualityFilter::new(config.filter),
        }
    }

    /// Create an engine with default configuration
    pub fn default_config(service: S) -> Self {
        Self::new(service, EngineConfig::default())
    }

    /// Replace the standardizer's phrase tables
    pub fn with_tables(mut self, tables: StandardizerTables) -> Self {
        self.standardizer = Standardizer::new(tables);
        self
    }

    /// Run the full normalization pipeline over a record set
    ///
    /// The only hard error is a merge contract violation; every data-quality
    /// problem is returned in the outcome's rejected bucket instead.
    pub fn normalize(
        &self,
        records: Vec<EvidenceRecord>,
    ) -> Result<NormalizationOutcome, EngineError> {
        let mut accounting = RunAccounting {
            input: records.len(),
            ..Default::default()
        };
        let mut rejected = Vec::new();

        info!("Normalizing {} record(s)", accounting.input);

        // 1. Standardize wording; records that lose a drug name or the
        //    mechanism in cleanup are rejected here
        let mut standardized = Vec::with_capacity(records.len());
        for record in records {
            match self.standardizer.standardize(record.clone()) {
                Some(clean) => standardized.push(clean),
                None => {
                    accounting.dropped += 1;
                    rejected.push(RejectedRecord::Invalid {
                        record,
                        reason: STANDARDIZATION_REASON.to_string(),
                    });
                }
            }
        }

        // 2. Resolve both drug identifiers through the run-scoped cache
        for record in &mut standardized {
            self.resolver.resolve_record(record);
        }
        debug!(
            "Resolution pass complete: {} name(s) cached",
            self.resolver.cache_len()
        );

        // 3. Structural validation
        let validated = self.validator.partition(standardized);
        accounting.invalid = validated.rejected.len();
        for invalid in validated.rejected {
            rejected.push(RejectedRecord::Invalid {
                record: invalid.record,
                reason: join_reasons(&invalid.reasons),
            });
        }

        // 4. Group by interaction pair, then merge and score each group
        let groups = group_by_pair(validated.valid);
        accounting.groups = groups.len();
        let merged = self.merger.merge_all(groups)?;

        // 5. Quality floor over the merged evidence
        let filtered = self.filter.apply(merged);
        accounting.filtered = filtered.rejected.len();
        for low in filtered.rejected {
            rejected.push(RejectedRecord::Filtered {
                record: low.evidence,
                reason: join_reasons(&low.reasons),
            });
        }

        let accepted = filtered.accepted;
        accounting.accepted = accepted.len();

        // 6. Report over what survived
        let report = NormalizationReport::generate(accounting.input, &accepted);

        info!(
            "Normalization complete: {} accepted, {} rejected",
            accounting.accepted,
            rejected.len()
        );

        Ok(NormalizationOutcome {
            accepted,
            rejected,
            report,
            accounting,
        })
    }

    /// Hit/miss counters from the resolution cache
    pub fn resolver_stats(&self) -> ResolverStats {
        self.resolver.stats()
    }
}

/// Facade joining literature extraction with normalization
///
/// Owns a [`LiteratureExtractor`] and a [`NormalizationEngine`] built from
/// one [`EngineConfig`]. The extraction calls pass through unchanged;
/// [`mine`](MiningEngine::mine) chains bulk extraction into a normalization
/// run and surfaces per-drug extraction failures on the outcome.
pub struct MiningEngine<R, S>
where
    R: DocumentRepository,
{
    extractor: LiteratureExtractor<R>,
    normalizer: NormalizationEngine<S>,
}

impl<R, S> MiningEngine<R, S>
where
    R: DocumentRepository + Send + Sync + 'static,
    R::Error: fmt::Display,
    S: ResolutionService,
    S::Error: fmt::Display,
{
    /// Create a mining engine over a document repository and a resolution
    /// service
    pub fn new(repository: R, service: S, config: EngineConfig) -> Self {
        let extractor = LiteratureExtractor::new(repository, config.extractor.clone());
        Self {
            extractor,
            normalizer: NormalizationEngine::new(service, config),
        }
    }

    /// Create a mining engine with default configuration
    pub fn default_config(repository: R, service: S) -> Self {
        Self::new(repository, service, EngineConfig::default())
    }

    /// Replace the extractor's lexical tables
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.extractor = self.extractor.with_lexicon(lexicon);
        self
    }

    /// Mine provisional records for one drug
    pub async fn extract_for_drug(
        &self,
        drug: &str,
        options: &ExtractionOptions,
    ) -> Result<DrugExtraction, EngineError> {
        Ok(self.extractor.extract_for_drug(drug, options).await?)
    }

    /// Mine provisional records for many drugs in rate-limited batches
    pub async fn extract_bulk(
        &self,
        drugs: &[String],
        options: &ExtractionOptions,
    ) -> Result<BulkExtraction, EngineError> {
        Ok(self.extractor.extract_bulk(drugs, options).await?)
    }

    /// Extract evidence for many drugs, then normalize everything found
    ///
    /// A drug whose extraction fails is reported on the outcome and the run
    /// continues with the rest.
    pub async fn mine(
        &self,
        drugs: &[String],
        options: &ExtractionOptions,
    ) -> Result<MiningOutcome, EngineError> {
        let bulk = self.extractor.extract_bulk(drugs, options).await?;
        info!(
            "Mined {} record(s) from {} drug(s), {} extraction failure(s)",
            bulk.records.len(),
            drugs.len(),
            bulk.failures.len()
        );

        let normalization = self.normalizer.normalize(bulk.records)?;

        Ok(MiningOutcome {
            normalization,
            extraction_failures: bulk.failures,
            per_drug_counts: bulk.per_drug_counts,
            batches: bulk.batches,
        })
    }

    /// Run the normalization stages alone over already-extracted records
    pub fn normalize(
        &self,
        records: Vec<EvidenceRecord>,
    ) -> Result<NormalizationOutcome, EngineError> {
        self.normalizer.normalize(records)
    }

    /// Hit/miss counters from the resolution cache
    pub fn resolver_stats(&self) -> ResolverStats {
        self.normalizer.resolver_stats()
    }
}

/// Join a batch of rejection reasons into one human-readable line
fn join_reasons<T: fmt::Display>(reasons: &[T]) -> String {
    reasons
        .iter()
        .map(|reason| reason.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
