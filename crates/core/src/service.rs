//! Analyze and search orchestration.
//!
//! [`AnalysisService`] ties the keyword extractor, the analysis provider and the store together.
//! It is cheap to clone and is what API layers hold in their state.

use crate::config::CoreConfig;
use crate::keywords::KeywordExtractor;
use crate::provider::{AnalysisProvider, MockAnalysisProvider};
use crate::record::{AnalysisDraft, AnalysisRecord};
use crate::store::AnalysisStore;
use crate::{AnalysisError, AnalysisResult};
use std::sync::Arc;
use textlens_types::NonEmptyText;

#[derive(Clone)]
pub struct AnalysisService {
    provider: Arc<dyn AnalysisProvider>,
    extractor: Arc<KeywordExtractor>,
    store: Arc<AnalysisStore>,
    keyword_count: usize,
}

impl AnalysisService {
    pub fn new(
        provider: Arc<dyn AnalysisProvider>,
        extractor: Arc<KeywordExtractor>,
        store: Arc<AnalysisStore>,
        keyword_count: usize,
    ) -> Self {
        Self {
            provider,
            extractor,
            store,
            keyword_count,
        }
    }

    /// Build a service from startup configuration using the mock provider.
    ///
    /// Opens the configured store and builds the keyword extractor's linguistic resources once.
    pub fn from_config(cfg: &CoreConfig) -> AnalysisResult<Self> {
        let store = AnalysisStore::open(cfg.database())?;
        Ok(Self::new(
            Arc::new(MockAnalysisProvider::new()),
            Arc::new(KeywordExtractor::new()),
            Arc::new(store),
            cfg.keyword_count(),
        ))
    }

    pub fn store(&self) -> &AnalysisStore {
        &self.store
    }

    pub fn keyword_count(&self) -> usize {
        self.keyword_count
    }

    /// Extract keywords from `text` using the configured keyword count.
    pub fn extract_keywords(&self, text: &str) -> Vec<String> {
        self.extractor.extract_keywords(text, self.keyword_count)
    }

    /// Analyse every text and store the results as one batch.
    ///
    /// Every text must be non-blank; the check ignores surrounding whitespace, but the provider and
    /// the keyword extractor see each text exactly as given. Texts are processed in order. The
    /// first provider failure aborts the batch before anything is written; otherwise all records
    /// are committed together and returned in input order.
    ///
    /// # Errors
    ///
    /// - `AnalysisError::InvalidInput` if `texts` is empty or any text is blank.
    /// - `AnalysisError::Upstream` if the provider reports an outage.
    /// - any internal error from record validation or the store.
    pub fn analyze_batch<T: AsRef<str>>(
        &self,
        texts: &[T],
    ) -> AnalysisResult<Vec<AnalysisRecord>> {
        if texts.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "at least one text is required".into(),
            ));
        }
        for (index, text) in texts.iter().enumerate() {
            NonEmptyText::new(text).map_err(|e| {
                AnalysisError::InvalidInput(format!("text at index {}: {}", index, e))
            })?;
        }

        let mut drafts = Vec::with_capacity(texts.len());
        for (index, text) in texts.iter().enumerate() {
            let text = text.as_ref();
            let analysis = self.provider.analyze_text(text).map_err(|e| {
                tracing::warn!("analysis of batch item {} failed: {}", index, e);
                e
            })?;
            let keywords = self.extract_keywords(text);
            drafts.push(AnalysisDraft::new(analysis, keywords)?);
        }

        let records = self.store.insert_batch(drafts)?;
        tracing::info!("stored {} analysis record(s)", records.len());
        Ok(records)
    }

    /// Stored records having `term` as a whole topic or keyword.
    pub fn search(&self, term: &NonEmptyText) -> AnalysisResult<Vec<AnalysisRecord>> {
        let records = self.store.find_by_tag(term.as_str())?;
        tracing::debug!("search for '{}' matched {} record(s)", term, records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ProviderAnalysis, StructuredData};
    use crate::ErrorKind;
    use std::sync::Mutex;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|t| t.to_string()).collect()
    }

    fn test_service() -> AnalysisService {
        AnalysisService::from_config(&CoreConfig::in_memory()).expect("service should build")
    }

    /// Provider that returns a summary longer than a record may hold.
    struct OverlongSummaryProvider;

    impl AnalysisProvider for OverlongSummaryProvider {
        fn analyze_text(&self, _text: &str) -> AnalysisResult<ProviderAnalysis> {
            Ok(ProviderAnalysis {
                summary: "x".repeat(501),
                structured_data: StructuredData {
                    title: None,
                    topics: vec![],
                    sentiment: "neutral".into(),
                    confidence: None,
                },
            })
        }
    }

    #[test]
    fn single_text_produces_one_record() {
        let service = test_service();
        let records = service
            .analyze_batch(&texts(&["This is a test about cars and driving."]))
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].keywords, vec!["test", "cars"]);
        assert_eq!(
            records[0].topics,
            vec!["mock data", "software testing", "prototyping"]
        );
        assert_eq!(service.store().count().unwrap(), 1);
    }

    #[test]
    fn batch_preserves_input_order() {
        let service = test_service();
        let records = service
            .analyze_batch(&texts(&[
                "First text.",
                "Second text about engineering.",
                "This text is about the solar system and planets.",
            ]))
            .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].keywords, vec!["text"]);
        assert_eq!(records[1].keywords, vec!["text", "engineering"]);
        assert_eq!(records[2].keywords, vec!["text", "system", "planets"]);
        assert!(records.windows(2).all(|w| w[0].id < w[1].id));
        assert_eq!(service.store().all().unwrap(), records);
    }

    #[test]
    fn empty_batch_is_a_validation_error() {
        let service = test_service();
        let err = service.analyze_batch::<String>(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(service.store().count().unwrap(), 0);
    }

    #[test]
    fn blank_text_in_batch_is_a_validation_error() {
        let service = test_service();
        let err = service
            .analyze_batch(&texts(&["Fine text.", "   "]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(service.store().count().unwrap(), 0);
    }

    /// Provider that remembers the texts it was asked to analyse.
    #[derive(Default)]
    struct RecordingProvider {
        seen: Mutex<Vec<String>>,
    }

    impl AnalysisProvider for RecordingProvider {
        fn analyze_text(&self, text: &str) -> AnalysisResult<ProviderAnalysis> {
            self.seen.lock().unwrap().push(text.to_string());
            MockAnalysisProvider::new().analyze_text(text)
        }
    }

    #[test]
    fn provider_receives_untrimmed_text() {
        let provider = Arc::new(RecordingProvider::default());
        let service = AnalysisService::new(
            provider.clone(),
            Arc::new(KeywordExtractor::new()),
            Arc::new(AnalysisStore::in_memory().unwrap()),
            3,
        );

        service.analyze_batch(&texts(&["  padded text \n"])).unwrap();
        assert_eq!(*provider.seen.lock().unwrap(), vec!["  padded text \n"]);
    }

    #[test]
    fn upstream_failure_late_in_batch_stores_nothing() {
        let service = test_service();
        service.analyze_batch(&texts(&["Existing record."])).unwrap();

        let err = service
            .analyze_batch(&texts(&[
                "A perfectly fine text.",
                "Another fine text.",
                "This one will FAIL_LLM.",
            ]))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert_eq!(service.store().count().unwrap(), 1);
    }

    #[test]
    fn invalid_provider_output_is_internal_and_stores_nothing() {
        let service = AnalysisService::new(
            Arc::new(OverlongSummaryProvider),
            Arc::new(KeywordExtractor::new()),
            Arc::new(AnalysisStore::in_memory().unwrap()),
            3,
        );

        let err = service.analyze_batch(&texts(&["Some text."])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(service.store().count().unwrap(), 0);
    }

    #[test]
    fn search_finds_records_by_keyword_and_topic() {
        let service = test_service();
        service
            .analyze_batch(&texts(&["This text is about the solar system and planets."]))
            .unwrap();

        let by_keyword = service
            .search(&NonEmptyText::new("planets").unwrap())
            .unwrap();
        assert_eq!(by_keyword.len(), 1);
        assert_eq!(by_keyword[0].keywords, vec!["text", "system", "planets"]);

        let by_topic = service
            .search(&NonEmptyText::new("prototyping").unwrap())
            .unwrap();
        assert_eq!(by_topic.len(), 1);
        assert!(by_topic[0].topics.contains(&"prototyping".to_string()));

        let partial = service.search(&NonEmptyText::new("plan").unwrap()).unwrap();
        assert!(partial.is_empty());
    }

    #[test]
    fn configured_keyword_count_is_used() {
        let cfg = CoreConfig::new(crate::config::DatabaseLocation::InMemory, 1).unwrap();
        let service = AnalysisService::from_config(&cfg).unwrap();
        let records = service
            .analyze_batch(&texts(&["This text is about the solar system and planets."]))
            .unwrap();
        assert_eq!(records[0].keywords, vec!["text"]);
    }
}
