//! Integration tests for the LiteratureExtractor

#[cfg(test)]
mod tests {
    use crate::{ExtractionOptions, ExtractorConfig, LiteratureExtractor, MockDocumentRepository};
    use theriac_domain::{DocumentMetadata, DocumentSection, Severity, StudyType};

    fn quiet_config() -> ExtractorConfig {
        ExtractorConfig {
            fetch_delay_ms: 0,
            batch_delay_ms: 0,
            ..ExtractorConfig::default()
        }
    }

    fn warfarin_fluconazole_doc() -> DocumentMetadata {
        DocumentMetadata {
            id: "pmid-100".to_string(),
            title: "Effect of fluconazole on warfarin pharmacokinetics".to_string(),
            authors: vec!["Kivisto K".to_string(), "Neuvonen P".to_string()],
            journal: Some("Journal of Interaction Studies".to_string()),
            publication_date: Some("2024-03-01".to_string()),
            publication_types: vec!["Journal Article".to_string()],
            cross_ref_ids: vec!["doi:10.1000/jis.100".to_string()],
            abstract_text: Some(
                "Coadministration of fluconazole increased the AUC of warfarin by 250% \
                 in 24 patients (p < 0.001). Fluconazole inhibits CYP2C9, reducing \
                 warfarin clearance."
                    .to_string(),
            ),
            has_full_text: false,
        }
    }

    #[tokio::test]
    async fn test_full_extraction_flow() {
        let mut repository = MockDocumentRepository::new();
        repository.add_search_results("warfarin", &["pmid-100"]);
        repository.add_document(warfarin_fluconazole_doc());

        let extractor = LiteratureExtractor::new(repository, quiet_config());
        let extraction = extractor
            .extract_for_drug("Warfarin", &ExtractionOptions::default())
            .await
            .unwrap();

        assert_eq!(extraction.documents_processed, 1);
        assert_eq!(extraction.documents_skipped, 0);
        assert_eq!(extraction.records.len(), 1);

        let record = &extraction.records[0];
        assert_eq!(record.drug_a.raw_name, "warfarin");
        assert_eq!(record.drug_b.raw_name, "fluconazole");
        assert!(!record.is_resolved());
        assert_eq!(record.source_id, "pmid-100");

        // 250% AUC increase escalates the default moderate grade to major
        assert_eq!(record.interaction.severity, Severity::Major);
        assert_eq!(record.interaction.mechanism, "enzyme inhibition");
        assert!(record.interaction.pathways.contains("CYP2C9"));
        assert_eq!(record.interaction.effect, "increased plasma exposure");

        let pk = record.pharmacokinetics.as_ref().unwrap();
        let auc = pk.auc_change.as_ref().unwrap();
        assert!((auc.percent - 250.0).abs() < f64::EPSILON);

        // "auc" wording classifies the unit as a pharmacokinetic study:
        // base 50 + pk study 20 + mechanism 15 + pk data 10 = 95
        assert_eq!(record.evidence.study_type, StudyType::Pharmacokinetic);
        assert_eq!(record.evidence.confidence, 95);
        assert_eq!(record.evidence.population_size, Some(24));
        assert_eq!(
            record.evidence.statistical_significance.as_deref(),
            Some("p<0.001")
        );

        assert_eq!(
            record.provenance.title,
            "Effect of fluconazole on warfarin pharmacokinetics"
        );
        assert_eq!(record.provenance.reference.as_deref(), Some("doi:10.1000/jis.100"));
    }

    #[tokio::test]
    async fn test_document_failure_skips_not_fails() {
        let mut repository = MockDocumentRepository::new();
        repository.add_search_results("warfarin", &["pmid-100", "pmid-broken"]);
        repository.add_document(warfarin_fluconazole_doc());
        repository.add_metadata_error("pmid-broken");

        let extractor = LiteratureExtractor::new(repository, quiet_config());
        let extraction = extractor
            .extract_for_drug("warfarin", &ExtractionOptions::default())
            .await
            .unwrap();

        assert_eq!(extraction.documents_processed, 1);
        assert_eq!(extraction.documents_skipped, 1);
        assert_eq!(extraction.records.len(), 1);
    }

    #[tokio::test]
    async fn test_caches_prevent_repeat_repository_calls() {
        let mut repository = MockDocumentRepository::new();
        repository.add_search_results("warfarin", &["pmid-100"]);
        repository.add_document(warfarin_fluconazole_doc());
        let probe = repository.clone();

        let extractor = LiteratureExtractor::new(repository, quiet_config());
        let options = ExtractionOptions::default();

        extractor.extract_for_drug("warfarin", &options).await.unwrap();
        extractor.extract_for_drug("warfarin", &options).await.unwrap();

        // The second run is served entirely from the TTL caches
        assert_eq!(probe.search_count(), 1);
        assert_eq!(probe.metadata_count(), 1);
    }

    #[tokio::test]
    async fn test_full_text_units_extend_extraction() {
        let mut doc = warfarin_fluconazole_doc();
        doc.has_full_text = true;

        let mut repository = MockDocumentRepository::new();
        repository.add_search_results("warfarin", &["pmid-100"]);
        repository.add_document(doc);
        repository.add_full_text(
            "pmid-100",
            vec![DocumentSection {
                heading: "Results".to_string(),
                body: "In combination with warfarin, ketoconazole increased the bleeding \
                       rate (p=0.02)."
                    .to_string(),
            }],
        );
        let probe = repository.clone();

        let extractor = LiteratureExtractor::new(repository, quiet_config());

        // Abstract only by default
        let options = ExtractionOptions::default();
        let extraction = extractor.extract_for_drug("warfarin", &options).await.unwrap();
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(probe.full_text_count(), 0);

        // With full text the results section contributes a second partner
        let options = ExtractionOptions {
            include_full_text: true,
            ..Default::default()
        };
        let extraction = extractor.extract_for_drug("warfarin", &options).await.unwrap();
        assert_eq!(probe.full_text_count(), 1);
        assert_eq!(extraction.records.len(), 2);

        let partners: Vec<&str> = extraction
            .records
            .iter()
            .map(|r| r.drug_b.raw_name.as_str())
            .collect();
        assert!(partners.contains(&"fluconazole"));
        assert!(partners.contains(&"ketoconazole"));
    }

    #[tokio::test]
    async fn test_non_interaction_text_produces_nothing() {
        let mut doc = warfarin_fluconazole_doc();
        doc.abstract_text =
            Some("Warfarin dosing strategies were reviewed across clinics.".to_string());

        let mut repository = MockDocumentRepository::new();
        repository.add_search_results("warfarin", &["pmid-100"]);
        repository.add_document(doc);

        let extractor = LiteratureExtractor::new(repository, quiet_config());
        let extraction = extractor
            .extract_for_drug("warfarin", &ExtractionOptions::default())
            .await
            .unwrap();

        assert_eq!(extraction.documents_processed, 1);
        assert!(extraction.records.is_empty());
    }

    #[tokio::test]
    async fn test_bulk_batches_and_failure_isolation() {
        let mut repository = MockDocumentRepository::new();
        repository.add_search_results("warfarin", &["pmid-100"]);
        repository.add_document(warfarin_fluconazole_doc());
        repository.add_search_error("baddrug");

        let config = ExtractorConfig {
            batch_size: 2,
            ..quiet_config()
        };
        let extractor = LiteratureExtractor::new(repository, config);

        let drugs: Vec<String> = ["aspirin", "warfarin", "baddrug", "simvastatin", "heparin"]
            .iter()
            .map(|d| d.to_string())
            .collect();
        let bulk = extractor
            .extract_bulk(&drugs, &ExtractionOptions::default())
            .await
            .unwrap();

        // 5 drugs at batch size 2 -> 3 batches
        assert_eq!(bulk.batches, 3);

        // The failing drug is isolated; the four others complete
        assert_eq!(bulk.failures.len(), 1);
        assert_eq!(bulk.failures[0].drug, "baddrug");
        assert_eq!(bulk.per_drug_counts.len(), 4);
        assert_eq!(bulk.per_drug_counts.get("warfarin"), Some(&1));
        assert_eq!(bulk.per_drug_counts.get("aspirin"), Some(&0));
        assert_eq!(bulk.records.len(), 1);
    }
}
