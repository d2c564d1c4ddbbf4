//! Inference context: fitted tokenizer vocabulary + pre-trained ONNX model.
//!
//! Both artifacts are produced by an external training pipeline and treated
//! as opaque here; this module only loads them and runs single-URL forward
//! passes.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use ndarray::Array2;
use ort::session::Session;
use ort::value::TensorRef;
use serde::Deserialize;
use tracing::info;

/// Narrow scoring capability: a raw URL in, a probability in [0, 1] out.
pub trait UrlScorer {
    fn predict(&self, url: &str) -> Result<f32>;
}

/// Fitted tokenizer vocabulary, exported from training as JSON.
#[derive(Debug, Deserialize)]
pub struct Tokenizer {
    pub num_words: usize,
    pub word_index: HashMap<String, usize>,
}

impl Tokenizer {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tokenizer vocabulary {:?}", path))?;
        let tokenizer: Tokenizer = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse tokenizer vocabulary {:?}", path))?;
        if tokenizer.num_words == 0 {
            anyhow::bail!("Tokenizer vocabulary {:?} declares num_words = 0", path);
        }
        Ok(tokenizer)
    }

    /// Binary presence matrix of shape (1, num_words) over the fitted
    /// vocabulary. Tokens are lowercased and split on non-alphanumeric
    /// characters; index 0 is reserved and out-of-vocabulary tokens are
    /// ignored, matching the binary text-to-matrix mode the model was
    /// trained against.
    pub fn encode(&self, url: &str) -> Array2<f32> {
        let mut matrix = Array2::<f32>::zeros((1, self.num_words));
        let lowered = url.to_lowercase();
        for token in lowered
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            if let Some(&index) = self.word_index.get(token) {
                if index > 0 && index < self.num_words {
                    matrix[[0, index]] = 1.0;
                }
            }
        }
        matrix
    }
}

/// Model and tokenizer loaded once and injected into the prediction path.
pub struct InferenceContext {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
}

impl InferenceContext {
    pub fn load(model_path: &Path, tokenizer_path: &Path) -> Result<Self> {
        let start_time = Instant::now();
        info!(
            action = "load",
            component = "inference",
            model = ?model_path,
            tokenizer = ?tokenizer_path,
            "Loading inference artifacts"
        );

        let tokenizer = Tokenizer::load(tokenizer_path)?;
        let session = Session::builder()?
            .with_intra_threads(1)?
            .commit_from_file(model_path)
            .with_context(|| format!("Failed to load model {:?}", model_path))?;

        let load_time = start_time.elapsed();
        info!(
            action = "loaded",
            component = "inference",
            vocabulary_size = tokenizer.num_words,
            duration_ms = load_time.as_millis(),
            "Inference artifacts loaded"
        );
        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
        })
    }
}

impl UrlScorer for InferenceContext {
    fn predict(&self, url: &str) -> Result<f32> {
        let input = self.tokenizer.encode(url);
        let input_tensor = TensorRef::from_array_view(&input)?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| anyhow::anyhow!("lock error: {e}"))?;
        let outputs = session.run(ort::inputs!["input" => input_tensor])?;

        let output_array = outputs["output"].try_extract_array::<f32>()?;
        let probability = output_array.iter().next().copied().unwrap_or(0.0);

        Ok(probability.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer() -> Tokenizer {
        serde_json::from_str(
            r#"{"num_words": 6, "word_index": {"http": 1, "evil": 2, "com": 3, "net": 9}}"#,
        )
        .unwrap()
    }

    #[test]
    fn encodes_known_tokens_as_binary_presence() {
        let matrix = tokenizer().encode("http://evil.com");
        assert_eq!(matrix.shape(), &[1, 6]);
        assert_eq!(matrix[[0, 1]], 1.0);
        assert_eq!(matrix[[0, 2]], 1.0);
        assert_eq!(matrix[[0, 3]], 1.0);
        assert_eq!(matrix[[0, 0]], 0.0);
    }

    #[test]
    fn ignores_unknown_and_out_of_range_tokens() {
        // "bad" is out of vocabulary, "net" maps past num_words
        let matrix = tokenizer().encode("http://bad.net");
        assert_eq!(matrix[[0, 1]], 1.0);
        let active: f32 = matrix.iter().sum();
        assert_eq!(active, 1.0);
    }

    #[test]
    fn lowercases_before_lookup() {
        let matrix = tokenizer().encode("HTTP://EVIL.COM");
        assert_eq!(matrix[[0, 2]], 1.0);
    }

    #[test]
    fn empty_url_encodes_to_all_zeros() {
        let matrix = tokenizer().encode("");
        assert_eq!(matrix.iter().sum::<f32>(), 0.0);
    }

    #[test]
    fn rejects_a_zero_width_vocabulary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokenizer.json");
        std::fs::write(&path, r#"{"num_words": 0, "word_index": {}}"#).unwrap();
        assert!(Tokenizer::load(&path).is_err());
    }
}
