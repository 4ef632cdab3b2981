//! Hugging Face Hub loaders for classifier checkpoints.
//!
//! - [`HfLoader`] fetches a single file from a model repo, retrying when the
//!   local cache lock is contended.
//! - [`TokenizerLoader`] builds a [`Tokenizer`] from `tokenizer.json`. Repos
//!   that ship none get one assembled per [`TokenizerFallback`]: WordPiece
//!   from `vocab.txt`, or byte-level BPE from `vocab.json` + `merges.txt`.
//! - [`ClassifierLoader`] reads `config.json` and maps the weights into a
//!   [`VarBuilder`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use serde::Deserialize;
use tokenizers::decoders::wordpiece::WordPiece as WordPieceDecoder;
use tokenizers::models::bpe::BPE;
use tokenizers::models::wordpiece::WordPiece;
use tokenizers::normalizers::bert::BertNormalizer;
use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::pre_tokenizers::byte_level::ByteLevel;
use tokenizers::processors::bert::BertProcessing;
use tokenizers::processors::roberta::RobertaProcessing;
use tokenizers::{Tokenizer, TruncationParams};

use crate::error::{PipelineError, Result};

/// Longest token sequence fed to any classifier; longer inputs are truncated.
pub const MAX_SEQUENCE_TOKENS: usize = 512;

#[derive(Debug, Clone)]
pub struct HfLoader {
    pub repo: String,
    pub filename: String,
}

impl HfLoader {
    pub fn new(repo: &str, filename: &str) -> Self {
        Self {
            repo: repo.into(),
            filename: filename.into(),
        }
    }

    pub fn load(&self) -> Result<PathBuf> {
        let api = Api::new()?;
        let repo = api.repo(Repo::new(self.repo.clone(), RepoType::Model));

        let max_retries = 3;
        let mut attempts = 0u32;

        for attempt in 0..max_retries {
            match repo.get(&self.filename) {
                Ok(path) => {
                    tracing::debug!(repo = %self.repo, file = %self.filename, "resolved hub file");
                    return Ok(path);
                }
                Err(e) => {
                    let error_msg = e.to_string();
                    attempts = attempt + 1;
                    if error_msg.contains("Lock acquisition failed") && attempt < max_retries - 1 {
                        let wait_time = Duration::from_millis(100 * (1 << attempt));
                        tracing::debug!(?wait_time, "hub cache locked, retrying");
                        std::thread::sleep(wait_time);
                        continue;
                    }
                    return Err(PipelineError::Download(format!(
                        "Failed to download '{}' from '{}': {}",
                        self.filename, self.repo, error_msg
                    )));
                }
            }
        }

        Err(PipelineError::Download(format!(
            "Download timed out for '{}' from '{}' after {} attempt(s)",
            self.filename, self.repo, attempts
        )))
    }
}

/// Tokenizer to assemble when a repo ships no `tokenizer.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerFallback {
    /// BERT-style WordPiece from `vocab.txt` (+ `tokenizer_config.json`).
    WordPiece,
    /// RoBERTa-style byte-level BPE from `vocab.json` + `merges.txt`.
    ByteLevelBpe,
}

#[derive(Debug, Clone)]
pub struct TokenizerLoader {
    pub repo: String,
    pub fallback: TokenizerFallback,
}

impl TokenizerLoader {
    pub fn new(repo: &str, fallback: TokenizerFallback) -> Self {
        Self {
            repo: repo.into(),
            fallback,
        }
    }

    /// Loads the tokenizer with truncation at [`MAX_SEQUENCE_TOKENS`] and no padding.
    pub fn load(&self) -> Result<Tokenizer> {
        let mut tokenizer = match HfLoader::new(&self.repo, "tokenizer.json").load() {
            Ok(path) => {
                let path_str = path.display().to_string();
                Tokenizer::from_file(&path).map_err(|e| {
                    PipelineError::Tokenization(format!(
                        "Failed to load tokenizer from '{}': {}",
                        path_str, e
                    ))
                })?
            }
            Err(e) => {
                tracing::debug!(repo = %self.repo, fallback = ?self.fallback, error = %e, "no tokenizer.json, assembling from vocabulary files");
                self.load_fallback()?
            }
        };

        tokenizer.with_padding(None);
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQUENCE_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| {
                PipelineError::Tokenization(format!(
                    "Failed to configure truncation for '{}': {}",
                    self.repo, e
                ))
            })?;

        Ok(tokenizer)
    }

    fn load_fallback(&self) -> Result<Tokenizer> {
        match self.fallback {
            TokenizerFallback::WordPiece => {
                let vocab = HfLoader::new(&self.repo, "vocab.txt").load()?;
                // Uncased is the BERT default when the repo carries no config.
                let lowercase = match HfLoader::new(&self.repo, "tokenizer_config.json").load() {
                    Ok(path) => {
                        let config: WordPieceConfigJson =
                            serde_json::from_str(&std::fs::read_to_string(path)?)?;
                        config.do_lower_case
                    }
                    Err(_) => uncased(),
                };
                wordpiece_tokenizer(&vocab, lowercase)
            }
            TokenizerFallback::ByteLevelBpe => {
                let vocab = HfLoader::new(&self.repo, "vocab.json").load()?;
                let merges = HfLoader::new(&self.repo, "merges.txt").load()?;
                byte_level_bpe_tokenizer(&vocab, &merges)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct WordPieceConfigJson {
    #[serde(default = "uncased")]
    do_lower_case: bool,
}

fn uncased() -> bool {
    true
}

fn special_token_id(tokenizer: &Tokenizer, token: &str, vocab: &Path) -> Result<u32> {
    tokenizer.token_to_id(token).ok_or_else(|| {
        PipelineError::Tokenization(format!(
            "Vocabulary '{}' has no '{}' token",
            vocab.display(),
            token
        ))
    })
}

/// `[CLS] ... [SEP]` WordPiece tokenizer, as DistilBERT and BERT checkpoints use.
pub(crate) fn wordpiece_tokenizer(vocab: &Path, lowercase: bool) -> Result<Tokenizer> {
    let wordpiece = WordPiece::from_file(&vocab.to_string_lossy())
        .unk_token("[UNK]".to_string())
        .build()
        .map_err(|e| {
            PipelineError::Tokenization(format!(
                "Failed to build WordPiece tokenizer from '{}': {}",
                vocab.display(),
                e
            ))
        })?;

    let mut tokenizer = Tokenizer::new(wordpiece);
    let cls = special_token_id(&tokenizer, "[CLS]", vocab)?;
    let sep = special_token_id(&tokenizer, "[SEP]", vocab)?;

    tokenizer.with_normalizer(Some(BertNormalizer::new(true, true, None, lowercase)));
    tokenizer.with_pre_tokenizer(Some(BertPreTokenizer));
    tokenizer.with_decoder(Some(WordPieceDecoder::default()));
    tokenizer.with_post_processor(Some(BertProcessing::new(
        ("[SEP]".to_string(), sep),
        ("[CLS]".to_string(), cls),
    )));

    Ok(tokenizer)
}

/// `<s> ... </s>` byte-level BPE tokenizer, as RoBERTa checkpoints use.
pub(crate) fn byte_level_bpe_tokenizer(vocab: &Path, merges: &Path) -> Result<Tokenizer> {
    let bpe = BPE::from_file(&vocab.to_string_lossy(), &merges.to_string_lossy())
        .build()
        .map_err(|e| {
            PipelineError::Tokenization(format!(
                "Failed to build BPE tokenizer from '{}': {}",
                vocab.display(),
                e
            ))
        })?;

    let mut tokenizer = Tokenizer::new(bpe);
    let cls = special_token_id(&tokenizer, "<s>", vocab)?;
    let sep = special_token_id(&tokenizer, "</s>", vocab)?;

    tokenizer.with_pre_tokenizer(Some(ByteLevel::default().add_prefix_space(false)));
    tokenizer.with_decoder(Some(ByteLevel::default()));
    tokenizer.with_post_processor(Some(
        RobertaProcessing::new(("</s>".to_string(), sep), ("<s>".to_string(), cls))
            .trim_offsets(true)
            .add_prefix_space(false),
    ));

    Ok(tokenizer)
}

/// Classification fields of a checkpoint's `config.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfigJson {
    #[serde(default)]
    pub id2label: HashMap<String, String>,
    #[serde(default)]
    pub label2id: HashMap<String, u32>,
    #[serde(default)]
    pub problem_type: Option<String>,
}

impl ClassifierConfigJson {
    pub fn num_labels(&self) -> usize {
        self.label2id.len().max(self.id2label.len())
    }

    /// Labels indexed by class id. Ids missing from `id2label` get `LABEL_<i>`.
    pub fn labels(&self) -> Vec<String> {
        (0..self.num_labels())
            .map(|i| {
                self.id2label
                    .get(&i.to_string())
                    .cloned()
                    .unwrap_or_else(|| format!("LABEL_{i}"))
            })
            .collect()
    }

    pub fn is_multi_label(&self) -> bool {
        self.problem_type.as_deref() == Some("multi_label_classification")
            || self.num_labels() == 1
    }
}

/// Raw `config.json` text, its classifier fields, and mapped weights.
pub struct LoadedCheckpoint {
    pub config_json: String,
    pub classifier: ClassifierConfigJson,
    pub vb: VarBuilder<'static>,
}

#[derive(Debug, Clone)]
pub struct ClassifierLoader {
    pub repo: String,
}

impl ClassifierLoader {
    pub fn new(repo: &str) -> Self {
        Self { repo: repo.into() }
    }

    pub fn load(&self, device: &Device) -> Result<LoadedCheckpoint> {
        let config_path = HfLoader::new(&self.repo, "config.json").load()?;
        let weights_path = HfLoader::new(&self.repo, "model.safetensors")
            .load()
            .or_else(|_| HfLoader::new(&self.repo, "pytorch_model.bin").load())?;

        let config_json = std::fs::read_to_string(&config_path)?;
        let classifier: ClassifierConfigJson = serde_json::from_str(&config_json)?;

        if classifier.num_labels() == 0 {
            return Err(PipelineError::Unexpected(format!(
                "Checkpoint '{}' declares no labels in its config",
                self.repo
            )));
        }

        let vb = if weights_path.extension().is_some_and(|e| e == "safetensors") {
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? }
        } else {
            VarBuilder::from_pth(&weights_path, DType::F32, device)?
        };

        Ok(LoadedCheckpoint {
            config_json,
            classifier,
            vb,
        })
    }
}
