//! Core LiteratureExtractor implementation

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Datelike, Utc};
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use theriac_domain::scoring::mechanism_is_known;
use theriac_domain::{
    DocumentMetadata, DocumentRepository, DrugRef, EvidenceDetail, EvidenceRecord,
    ExtractionMetadata, InteractionProfile, Pharmacokinetics, Provenance, RecordId, SourceType,
};

use crate::cache::TtlCache;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::lexicon::Lexicon;
use crate::mechanism::{derive_effect, detect_mechanism, detect_pathways};
use crate::mentions::detect_mentions;
use crate::pk::extract_pharmacokinetics;
use crate::severity::{assign_severity, clinical_significance};
use crate::study::{
    assign_evidence_level, classify_study, compute_confidence, extract_population,
    extract_significance,
};
use crate::types::{BulkExtraction, BulkFailure, DrugExtraction, ExtractionOptions};

/// Method tag stamped on records produced by this extractor
const EXTRACTION_METHOD: &str = "lexical";

/// Longest provenance snippet kept from a text unit (characters)
const SNIPPET_MAX_CHARS: usize = 240;

/// The LiteratureExtractor mines interaction evidence from a document
/// repository
///
/// One extraction walks search results for a drug, pulls each document's
/// abstract (and optionally full text), and turns interaction-bearing text
/// units into [`EvidenceRecord`]s, one per co-mentioned partner drug. Drug
/// references come back unresolved; identifier resolution is a separate
/// stage.
pub struct LiteratureExtractor<R>
where
    R: DocumentRepository,
{
    repository: Arc<R>,
    lexicon: Arc<Lexicon>,
    config: ExtractorConfig,
    search_cache: Arc<TtlCache<Vec<String>>>,
    metadata_cache: Arc<TtlCache<DocumentMetadata>>,
}

impl<R> Clone for LiteratureExtractor<R>
where
    R: DocumentRepository,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            lexicon: Arc::clone(&self.lexicon),
            config: self.config.clone(),
            search_cache: Arc::clone(&self.search_cache),
            metadata_cache: Arc::clone(&self.metadata_cache),
        }
    }
}

impl<R> LiteratureExtractor<R>
where
    R: DocumentRepository + Send + Sync + 'static,
    R::Error: std::fmt::Display,
{
    /// Create a new LiteratureExtractor over a document repository
    pub fn new(repository: R, config: ExtractorConfig) -> Self {
        let ttl = config.cache_ttl();
        Self {
            repository: Arc::new(repository),
            lexicon: Arc::new(Lexicon::default()),
            config,
            search_cache: Arc::new(TtlCache::new(ttl)),
            metadata_cache: Arc::new(TtlCache::new(ttl)),
        }
    }

    /// Create a new LiteratureExtractor with a custom lexicon
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = Arc::new(lexicon);
        self
    }

    /// Mine interaction evidence for one drug
    pub async fn extract_for_drug(
        &self,
        drug: &str,
        options: &ExtractionOptions,
    ) -> Result<DrugExtraction, ExtractorError> {
        options.validate().map_err(ExtractorError::Options)?;
        let drug = drug.trim();
        if drug.is_empty() {
            return Err(ExtractorError::Options(
                "drug name must not be empty".to_string(),
            ));
        }

        let query = self.build_query(drug, options);
        info!(
            "Searching literature for '{}', max {} documents",
            drug, options.max_results
        );

        let document_ids = self.search(&query, options.max_results).await?;
        debug!("Found {} documents for '{}'", document_ids.len(), drug);

        let drug_lower = drug.to_lowercase();
        let mut records = Vec::new();
        let mut documents_processed = 0;
        let mut documents_skipped = 0;
        let mut fetched_before = false;

        for document_id in &document_ids {
            match self
                .process_document(&drug_lower, document_id, options, &mut fetched_before)
                .await
            {
                Ok(document_records) => {
                    documents_processed += 1;
                    records.extend(document_records);
                }
                Err(reason) => {
                    warn!("Skipping document '{}': {}", document_id, reason);
                    documents_skipped += 1;
                }
            }
        }

        info!(
            "Extraction for '{}' complete: {} records from {} documents, {} skipped",
            drug,
            records.len(),
            documents_processed,
            documents_skipped
        );

        Ok(DrugExtraction {
            drug: drug.to_string(),
            records,
            documents_processed,
            documents_skipped,
        })
    }

    /// Mine interaction evidence for many drugs, in rate-limited batches
    ///
    /// Drugs within a batch run concurrently; batches run in sequence with
    /// the configured delay between them. One drug failing never sinks the
    /// run: the failure is recorded and the remaining drugs proceed.
    pub async fn extract_bulk(
        &self,
        drugs: &[String],
        options: &ExtractionOptions,
    ) -> Result<BulkExtraction, ExtractorError> {
        options.validate().map_err(ExtractorError::Options)?;

        let mut bulk = BulkExtraction::default();
        if drugs.is_empty() {
            return Ok(bulk);
        }

        let batch_count = drugs.len().div_ceil(self.config.batch_size);
        info!(
            "Bulk extraction for {} drugs in {} batches",
            drugs.len(),
            batch_count
        );

        for (batch_index, batch) in drugs.chunks(self.config.batch_size).enumerate() {
            if batch_index > 0 && !self.config.batch_delay().is_zero() {
                tokio::time::sleep(self.config.batch_delay()).await;
            }
            debug!("Processing batch {}/{}", batch_index + 1, batch_count);

            let mut join_set = JoinSet::new();
            for drug in batch {
                let extractor = self.clone();
                let drug = drug.clone();
                let options = options.clone();
                join_set.spawn(async move {
                    let result = extractor.extract_for_drug(&drug, &options).await;
                    (drug, result)
                });
            }

            while let Some(joined) = join_set.join_next().await {
                match joined {
                    Ok((drug, Ok(extraction))) => {
                        bulk.per_drug_counts.insert(drug, extraction.records.len());
                        bulk.records.extend(extraction.records);
                    }
                    Ok((drug, Err(e))) => {
                        warn!("Bulk extraction failed for '{}': {}", drug, e);
                        bulk.failures.push(BulkFailure {
                            drug,
                            reason: e.to_string(),
                        });
                    }
                    Err(e) => {
                        warn!("Bulk extraction task failed to join: {}", e);
                        bulk.failures.push(BulkFailure {
                            drug: "unknown".to_string(),
                            reason: format!("task join error: {}", e),
                        });
                    }
                }
            }
            bulk.batches += 1;
        }

        info!(
            "Bulk extraction complete: {} records, {} failures",
            bulk.records.len(),
            bulk.failures.len()
        );
        Ok(bulk)
    }

    /// Process one document into evidence records
    async fn process_document(
        &self,
        drug_lower: &str,
        document_id: &str,
        options: &ExtractionOptions,
        fetched_before: &mut bool,
    ) -> Result<Vec<EvidenceRecord>, String> {
        let metadata = self
            .fetch_metadata(document_id, fetched_before)
            .await
            .map_err(|e| e.to_string())?;

        let mut units: Vec<String> = Vec::new();
        if let Some(abstract_text) = &metadata.abstract_text {
            if !abstract_text.trim().is_empty() {
                units.push(abstract_text.clone());
            }
        }
        if options.include_full_text && metadata.has_full_text {
            match self.fetch_full_text(document_id, fetched_before).await {
                Ok(sections) => units.extend(
                    sections
                        .into_iter()
                        .map(|section| section.body)
                        .filter(|body| !body.trim().is_empty()),
                ),
                // Abstract-only extraction still stands when full text fails
                Err(e) => warn!("Full text unavailable for '{}': {}", document_id, e),
            }
        }

        let mut records = Vec::new();
        for unit in &units {
            records.extend(self.extract_from_unit(drug_lower, unit, &metadata));
        }
        debug!(
            "Document '{}' yielded {} records from {} text units",
            document_id,
            records.len(),
            units.len()
        );
        Ok(records)
    }

    /// Turn one interaction-bearing text unit into evidence records
    ///
    /// A unit qualifies only when it carries interaction wording and
    /// mentions the queried drug; each co-mentioned partner then gets its
    /// own record sharing the unit-level findings.
    fn extract_from_unit(
        &self,
        drug_lower: &str,
        unit_text: &str,
        metadata: &DocumentMetadata,
    ) -> Vec<EvidenceRecord> {
        let text_lower = unit_text.to_lowercase();

        if !self.lexicon.contains_interaction_keyword(&text_lower) {
            return Vec::new();
        }
        if !text_lower.contains(drug_lower) {
            return Vec::new();
        }

        // Containment check in both directions drops salt-form echoes of
        // the queried drug ("warfarin" vs "warfarin sodium")
        let partners: Vec<String> = detect_mentions(unit_text, &self.lexicon)
            .into_iter()
            .filter(|mention| {
                !mention.contains(drug_lower) && !drug_lower.contains(mention.as_str())
            })
            .collect();
        if partners.is_empty() {
            debug!(
                "Interaction wording without a partner drug in document '{}'",
                metadata.id
            );
            return Vec::new();
        }

        // Unit-level findings are shared by every partner pair
        let pk = extract_pharmacokinetics(unit_text);
        let empty_pk = Pharmacokinetics::default();
        let mechanism = detect_mechanism(&text_lower, &self.lexicon);
        let pathways = detect_pathways(unit_text);
        let effect = derive_effect(&text_lower, pk.as_ref().unwrap_or(&empty_pk), &self.lexicon);
        let severity =
            assign_severity(&text_lower, pk.as_ref(), &self.lexicon, &self.config.escalation);

        let study_type = classify_study(&metadata.publication_types, &text_lower);
        let journal = metadata.journal.as_deref();
        let level = assign_evidence_level(study_type, journal, &self.lexicon);
        let high_tier = journal.is_some_and(|j| self.lexicon.is_high_tier_venue(j));
        let confidence = compute_confidence(
            study_type,
            mechanism_is_known(&mechanism),
            high_tier,
            unit_text.len(),
            pk.is_some(),
            &self.config,
        );

        let population_size = extract_population(unit_text);
        let statistical_significance = extract_significance(unit_text);
        let snippet: String = unit_text.chars().take(SNIPPET_MAX_CHARS).collect();

        let mut provenance =
            Provenance::new(metadata.title.clone(), snippet).with_authors(metadata.authors.clone());
        if let Some(journal) = &metadata.journal {
            provenance = provenance.with_journal(journal.clone());
        }
        if let Some(date) = &metadata.publication_date {
            provenance = provenance.with_publication_date(date.clone());
        }
        if let Some(reference) = metadata.cross_ref_ids.first() {
            provenance = provenance.with_reference(reference.clone());
        }

        let extracted_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();

        partners
            .into_iter()
            .map(|partner| EvidenceRecord {
                id: RecordId::new(),
                source_type: SourceType::Publication,
                source_id: metadata.id.clone(),
                drug_a: DrugRef::unresolved(drug_lower),
                drug_b: DrugRef::unresolved(partner),
                interaction: InteractionProfile {
                    mechanism: mechanism.clone(),
                    pathways: pathways.clone(),
                    effect: effect.clone(),
                    severity,
                    clinical_significance: clinical_significance(severity),
                },
                evidence: EvidenceDetail {
                    level,
                    study_type,
                    confidence,
                    population_size,
                    statistical_significance: statistical_significance.clone(),
                    quality_score: None,
                    composite_score: None,
                },
                pharmacokinetics: pk.clone(),
                provenance: provenance.clone(),
                extraction: ExtractionMetadata {
                    extracted_at,
                    method: EXTRACTION_METHOD.to_string(),
                    text_confidence: confidence,
                    merged_source_ids: Vec::new(),
                },
            })
            .collect()
    }

    /// Build the repository search query for a drug
    fn build_query(&self, drug: &str, options: &ExtractionOptions) -> String {
        let current_year = Utc::now().year();
        let from_year = current_year - i32::from(options.year_range_years);
        format!(
            "\"{}\" AND (\"drug interaction\" OR \"drug-drug interaction\" OR coadministration) AND {}:{}",
            drug, from_year, current_year
        )
    }

    /// Search the repository, consulting the search cache first
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<String>, ExtractorError> {
        // max_results is part of the key: a larger request must not be
        // satisfied by a smaller cached result
        let cache_key = format!("{}|{}", query, max_results);
        if let Some(ids) = self.search_cache.get(&cache_key) {
            debug!("Search cache hit");
            return Ok(ids);
        }

        let repository = Arc::clone(&self.repository);
        let query_owned = query.to_string();
        let ids = timeout(
            self.config.fetch_timeout(),
            tokio::task::spawn_blocking(move || {
                repository
                    .search(&query_owned, max_results)
                    .map_err(|e| ExtractorError::Repository(e.to_string()))
            }),
        )
        .await
        .map_err(|_| ExtractorError::Timeout)?
        .map_err(|e| ExtractorError::Task(e.to_string()))??;

        self.search_cache.insert(cache_key, ids.clone());
        Ok(ids)
    }

    /// Fetch document metadata, consulting the metadata cache first
    async fn fetch_metadata(
        &self,
        document_id: &str,
        fetched_before: &mut bool,
    ) -> Result<DocumentMetadata, ExtractorError> {
        if let Some(metadata) = self.metadata_cache.get(document_id) {
            debug!("Metadata cache hit for '{}'", document_id);
            return Ok(metadata);
        }
        self.pace(fetched_before).await;

        let repository = Arc::clone(&self.repository);
        let id_owned = document_id.to_string();
        let metadata = timeout(
            self.config.fetch_timeout(),
            tokio::task::spawn_blocking(move || {
                repository
                    .fetch_metadata(&id_owned)
                    .map_err(|e| ExtractorError::Repository(e.to_string()))
            }),
        )
        .await
        .map_err(|_| ExtractorError::Timeout)?
        .map_err(|e| ExtractorError::Task(e.to_string()))??;

        self.metadata_cache.insert(document_id, metadata.clone());
        Ok(metadata)
    }

    /// Fetch full-text sections for a document
    async fn fetch_full_text(
        &self,
        document_id: &str,
        fetched_before: &mut bool,
    ) -> Result<Vec<theriac_domain::DocumentSection>, ExtractorError> {
        self.pace(fetched_before).await;

        let repository = Arc::clone(&self.repository);
        let id_owned = document_id.to_string();
        timeout(
            self.config.fetch_timeout(),
            tokio::task::spawn_blocking(move || {
                repository
                    .fetch_full_text(&id_owned)
                    .map_err(|e| ExtractorError::Repository(e.to_string()))
            }),
        )
        .await
        .map_err(|_| ExtractorError::Timeout)?
        .map_err(|e| ExtractorError::Task(e.to_string()))?
    }

    /// Sleep between live repository calls; cache hits never pace
    async fn pace(&self, fetched_before: &mut bool) {
        if *fetched_before && !self.config.fetch_delay().is_zero() {
            tokio::time::sleep(self.config.fetch_delay()).await;
        }
        *fetched_before = true;
    }
}
