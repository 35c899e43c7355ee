//! Chunked upload implementation for large release assets
//!
//! An artifact is split into fixed-size byte ranges that are POSTed one at
//! a time with 1-based sequence metadata, so the server can reassemble the
//! file without ever receiving an oversized request body. Chunks within one
//! artifact are strictly sequential; a later chunk landing before an
//! earlier one would corrupt reassembly.

use crate::channel::ReleaseChannel;
use crate::error::handlers::{HttpErrorHandler, NetworkErrorHandler};
use crate::error::{PublishError, Result};
use crate::output::OutputManager;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::io::SeekFrom;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// One byte range of an artifact. `index` is the 1-based sequence number
/// sent to the server as `currentChunk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSpec {
    pub index: u64,
    pub offset: u64,
    pub len: u64,
}

/// Compute the byte ranges for a file of `file_size` bytes. Every chunk has
/// exactly `chunk_size` bytes except possibly the last. A zero-byte file
/// yields an empty plan: no chunks are sent and the upload succeeds
/// trivially, matching `ceil(0 / n) == 0`.
pub fn chunk_plan(file_size: u64, chunk_size: u64) -> Vec<ChunkSpec> {
    let total_chunks = file_size.div_ceil(chunk_size);

    (0..total_chunks)
        .map(|i| {
            let offset = i * chunk_size;
            ChunkSpec {
                index: i + 1,
                offset,
                len: (file_size - offset).min(chunk_size),
            }
        })
        .collect()
}

pub struct ChunkedUploader {
    client: Client,
    address: String,
    chunk_size: u64,
    output: OutputManager,
}

impl ChunkedUploader {
    pub fn new(client: Client, address: String, chunk_size: u64, output: OutputManager) -> Self {
        Self {
            client,
            address,
            chunk_size,
            output,
        }
    }

    /// Upload one artifact as an ordered sequence of chunk POSTs. The first
    /// failing chunk aborts the artifact; previously sent chunks are not
    /// rolled back and there is no resume on a later run.
    pub async fn upload(
        &self,
        path: &Path,
        file_name: &str,
        version: &str,
        channel: ReleaseChannel,
        platform: &str,
        token: &str,
    ) -> Result<()> {
        let file_size = tokio::fs::metadata(path)
            .await
            .map_err(|e| PublishError::Io(format!("Failed to stat {}: {}", path.display(), e)))?
            .len();

        let plan = chunk_plan(file_size, self.chunk_size);
        let total_chunks = plan.len() as u64;
        let url = format!(
            "{}/api/releases/{}/{}/assets",
            self.address, channel, version
        );

        self.output.info(&format!(
            "Uploading {} ({}) as {} chunks",
            file_name,
            self.output.format_size(file_size),
            total_chunks
        ));

        for chunk in &plan {
            let data = self.read_chunk(path, chunk).await?;
            self.send_chunk(&url, file_name, platform, chunk, total_chunks, data, token)
                .await?;
            self.output.detail(&format!(
                "Chunk {}/{} sent ({})",
                chunk.index,
                total_chunks,
                self.output.format_size(chunk.len)
            ));
        }

        self.output.success(&format!("Uploaded {}", file_name));
        Ok(())
    }

    /// Read exactly one chunk's bytes. The file handle is scoped to this
    /// call so it is released even when the read fails.
    async fn read_chunk(&self, path: &Path, chunk: &ChunkSpec) -> Result<Vec<u8>> {
        let mut file = File::open(path)
            .await
            .map_err(|e| PublishError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

        file.seek(SeekFrom::Start(chunk.offset)).await.map_err(|e| {
            PublishError::Io(format!(
                "Failed to seek to offset {} in {}: {}",
                chunk.offset,
                path.display(),
                e
            ))
        })?;

        let mut buffer = vec![0u8; chunk.len as usize];
        file.read_exact(&mut buffer).await.map_err(|e| {
            PublishError::Io(format!(
                "Failed to read chunk {} of {}: {}",
                chunk.index,
                path.display(),
                e
            ))
        })?;

        Ok(buffer)
    }

    async fn send_chunk(
        &self,
        url: &str,
        file_name: &str,
        platform: &str,
        chunk: &ChunkSpec,
        total_chunks: u64,
        data: Vec<u8>,
        token: &str,
    ) -> Result<()> {
        let file_part = Part::bytes(data).file_name(file_name.to_string());
        let form = Form::new()
            .text("currentChunk", chunk.index.to_string())
            .text("totalChunks", total_chunks.to_string())
            .text("platform", platform.to_string())
            .part(file_name.to_string(), file_part);

        let context = format!("chunk {}/{} of {}", chunk.index, total_chunks, file_name);

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| NetworkErrorHandler::handle_network_error(&e, &context))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            Err(HttpErrorHandler::handle_upload_error(status, &error_text, &context))
        }
    }
}
