//! End-to-end processing: text in, language- and pause-tagged lines out

use crate::classifier::{Classifier, LanguageModel, LexiconModel};
use crate::config::Config;
use crate::error::Result;
use crate::lexicon::Stopwords;
use crate::line::LineClassifier;
use crate::output::{Document, Line};
use crate::prefix::PrefixRunDetector;
use crate::resolver::TokenResolver;
use crate::silence::SilenceMapper;
use crate::span::SpanParser;
use crate::text::WordPattern;
use habla_segment::{SentenceSegmenter, WordTokenizer};
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Tags text with per-token languages and pauses.
///
/// Construction can fail on bad configuration; processing cannot.
#[derive(Debug)]
pub struct Pipeline {
    config: Config,
    segmenter: SentenceSegmenter,
    tokenizer: WordTokenizer,
    spans: SpanParser,
    classifier: Arc<Classifier>,
    lines: LineClassifier,
    prefix: PrefixRunDetector,
    resolver: TokenResolver,
    silence: SilenceMapper,
}

impl Pipeline {
    /// Create a pipeline with the default configuration and model
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a pipeline with a custom configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Split text into sentence lines
    pub fn segment(&self, text: &str) -> Vec<String> {
        self.segmenter.split(text)
    }

    /// Process a whole text. Empty input gives an empty document.
    pub fn process(&self, text: &str) -> Document {
        let segments = self.segment(text);

        #[cfg(feature = "parallel")]
        let lines: Vec<Line> = if segments.len() >= self.config.parallel_threshold {
            log::debug!("resolving {} lines in parallel", segments.len());
            segments.par_iter().map(|line| self.process_line(line)).collect()
        } else {
            segments.iter().map(|line| self.process_line(line)).collect()
        };

        #[cfg(not(feature = "parallel"))]
        let lines: Vec<Line> = segments.iter().map(|line| self.process_line(line)).collect();

        Document { lines }
    }

    /// Resolve a single, already segmented line
    pub fn process_line(&self, line: &str) -> Line {
        let raw = self.tokenizer.tokenize(line);
        let tokens = self.spans.parse(&raw);
        let annotation = self.lines.annotate(line);
        let prefix_run = self.prefix.detect(&tokens, &annotation, &self.classifier);

        log::debug!(
            "line {:?}: {} ({:.2}), prefix run {}",
            annotation.text,
            annotation.language.code(),
            annotation.confidence,
            prefix_run
        );

        let resolved = self.resolver.resolve(&tokens, &annotation, prefix_run);
        Line {
            tokens: self.silence.apply(resolved),
            text: annotation.text,
            language: annotation.language,
            confidence: annotation.confidence,
            prefix_run,
        }
    }
}

/// Builder for [`Pipeline`] with injectable collaborators
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<Config>,
    model: Option<Arc<dyn LanguageModel>>,
    stopwords: Option<Arc<Stopwords>>,
    segmenter: Option<SentenceSegmenter>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a specific language model instead of the default one
    pub fn model(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn stopwords(mut self, stopwords: Arc<Stopwords>) -> Self {
        self.stopwords = Some(stopwords);
        self
    }

    pub fn segmenter(mut self, segmenter: SentenceSegmenter) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    pub fn build(self) -> Result<Pipeline> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let stopwords = match self.stopwords {
            Some(stopwords) => stopwords,
            None => Arc::new(Stopwords::builtin()?.clone()),
        };
        let model = match self.model {
            Some(model) => model,
            None => default_model(&stopwords),
        };
        let segmenter = match self.segmenter {
            Some(segmenter) => segmenter,
            None => SentenceSegmenter::new()?,
        };

        let classifier = Arc::new(Classifier::new(
            model,
            config.thresholds.clone(),
            config.cache_capacity,
        ));

        Ok(Pipeline {
            segmenter,
            tokenizer: WordTokenizer::new(),
            spans: SpanParser::new(WordPattern::new(&config.word_pattern)?),
            lines: LineClassifier::new(Arc::clone(&classifier), config.default_language),
            prefix: PrefixRunDetector::new(config.thresholds.clone()),
            resolver: TokenResolver::new(
                Arc::clone(&classifier),
                stopwords,
                config.spanish_suffixes.clone(),
            ),
            silence: SilenceMapper::new(&config.silence),
            classifier,
            config,
        })
    }
}

#[cfg(feature = "lingua")]
fn default_model(_stopwords: &Arc<Stopwords>) -> Arc<dyn LanguageModel> {
    use crate::classifier::LinguaModel;
    use std::sync::OnceLock;

    static LINGUA: OnceLock<Arc<LinguaModel>> = OnceLock::new();
    let model = LINGUA.get_or_init(|| Arc::new(LinguaModel::new()));
    Arc::clone(model) as Arc<dyn LanguageModel>
}

#[cfg(not(feature = "lingua"))]
fn default_model(stopwords: &Arc<Stopwords>) -> Arc<dyn LanguageModel> {
    Arc::new(LexiconModel::new(Arc::clone(stopwords)))
}

/// A pipeline on the deterministic stopword model
pub fn lexicon_pipeline(config: Config) -> Result<Pipeline> {
    let stopwords = Arc::new(Stopwords::builtin()?.clone());
    Pipeline::builder()
        .config(config)
        .model(Arc::new(LexiconModel::new(Arc::clone(&stopwords))))
        .stopwords(stopwords)
        .build()
}
