use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::PipelineError;
use crate::scratch::ScratchDir;

/// Fixed audio-only target encoding.
const AUDIO_CODEC: &str = "libmp3lame";
const AUDIO_BITRATE: &str = "128k";

/// How much subprocess stderr to keep in the error detail.
const STDERR_TAIL: usize = 400;

/// An audio-only track held in memory, ready for transcription.
pub struct ExtractedAudio {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Seam for the media-transcoding step, so the orchestrator can be
/// exercised without a real ffmpeg binary.
#[async_trait]
pub trait MediaConverter: Send + Sync + 'static {
    async fn extract_audio(
        &self,
        input: &[u8],
        filename: &str,
        scratch: &ScratchDir,
    ) -> Result<ExtractedAudio, PipelineError>;
}

/// Strips video and re-encodes the audio track via an ffmpeg subprocess.
pub struct AudioExtractor {
    ffmpeg: PathBuf,
}

impl AudioExtractor {
    pub fn new(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg_path.into(),
        }
    }

    async fn convert(&self, input: &Path, output: &Path) -> Result<(), PipelineError> {
        let result = Command::new(&self.ffmpeg)
            .arg("-y")
            .arg("-i")
            .arg(input)
            .args(["-vn", "-acodec", AUDIO_CODEC, "-b:a", AUDIO_BITRATE])
            .arg(output)
            .output()
            .await
            .map_err(|e| {
                PipelineError::ExtractionFailed(format!(
                    "failed to run {}: {e}",
                    self.ffmpeg.display()
                ))
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(PipelineError::ExtractionFailed(format!(
                "ffmpeg exited with {}: {}",
                result.status,
                tail(&stderr, STDERR_TAIL),
            )));
        }

        debug!(output = %output.display(), "Extracted audio track");
        Ok(())
    }
}

#[async_trait]
impl MediaConverter for AudioExtractor {
    /// Writes `input` into the scratch dir, converts it, and reads the
    /// result back. Both intermediate files are removed before returning,
    /// on success and on failure alike; the scratch dir itself is the
    /// caller's backstop.
    async fn extract_audio(
        &self,
        input: &[u8],
        filename: &str,
        scratch: &ScratchDir,
    ) -> Result<ExtractedAudio, PipelineError> {
        let source_name = sanitize(filename);
        let output_name = format!("{}.mp3", stem(&source_name));
        let input_path = scratch.file(&format!("source-{source_name}"));
        let output_path = scratch.file(&output_name);

        tokio::fs::write(&input_path, input).await.map_err(|e| {
            PipelineError::ExtractionFailed(format!("failed to stage upload: {e}"))
        })?;

        let audio = match self.convert(&input_path, &output_path).await {
            Ok(()) => tokio::fs::read(&output_path).await.map_err(|e| {
                PipelineError::ExtractionFailed(format!(
                    "converted audio unreadable after ffmpeg success: {e}"
                ))
            }),
            Err(e) => Err(e),
        };

        let _ = tokio::fs::remove_file(&input_path).await;
        let _ = tokio::fs::remove_file(&output_path).await;

        Ok(ExtractedAudio {
            bytes: audio?,
            filename: output_name,
        })
    }
}

/// Client-supplied filenames end up on disk; keep only harmless characters.
fn sanitize(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches(['_', '.']).is_empty() {
        "recording".to_string()
    } else {
        cleaned
    }
}

fn stem(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => filename,
    }
}

fn tail(text: &str, max: usize) -> &str {
    let text = text.trim();
    match text.char_indices().nth_back(max.saturating_sub(1)) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}
