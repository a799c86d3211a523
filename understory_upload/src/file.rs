// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Queued files and transport messages.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

static NEXT_KEY: AtomicU32 = AtomicU32::new(1);

/// Identifies one queued file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileKey(pub u32);

impl FileKey {
    /// A key not handed out before by this process.
    pub fn next() -> Self {
        Self(NEXT_KEY.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for FileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rs-upload-{}", self.0)
    }
}

/// Where a file is in its upload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FileStatus {
    /// Queued, not yet sent.
    #[default]
    Inited,
    /// Sent; progress may be reported.
    Uploading,
    /// The transport failed. Only an explicit reupload retries.
    Error,
    /// Uploaded.
    Finished,
}

/// One file in the queue.
///
/// `F` is the host's file handle; it is never read here.
#[derive(Clone, Debug, PartialEq)]
pub struct FileEntry<F> {
    /// Queue key.
    pub file_key: FileKey,
    /// Display name.
    pub name: String,
    /// The host's file handle. Files restored from a server may have none.
    pub blob: Option<F>,
    /// Upload status.
    pub status: FileStatus,
    /// Percent uploaded, `0..=100`.
    pub progress: u8,
    /// Location of the uploaded file, for previews.
    pub url: Option<String>,
}

impl<F> FileEntry<F> {
    /// A queued file with a fresh key.
    pub fn new(name: impl Into<String>, blob: F) -> Self {
        Self {
            file_key: FileKey::next(),
            name: name.into(),
            blob: Some(blob),
            status: FileStatus::Inited,
            progress: 0,
            url: None,
        }
    }

    /// An already uploaded file, as listed by a server.
    pub fn finished(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            file_key: FileKey::next(),
            name: name.into(),
            blob: None,
            status: FileStatus::Finished,
            progress: 100,
            url: Some(url.into()),
        }
    }
}

/// A transport failure reported by the host.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    /// The server answered with a failure status.
    #[error("upload failed with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        body: Option<String>,
    },
    /// No answer within [`UploadRequest::timeout`].
    #[error("upload timed out")]
    Timeout,
    /// The host aborted the transfer.
    #[error("upload aborted")]
    Aborted,
    /// The request never reached the server.
    #[error("network error: {0}")]
    Network(String),
}

/// What the host should send for one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadRequest {
    /// The file to send; report back with this key.
    pub file_key: FileKey,
    /// Upload endpoint.
    pub action: String,
    /// Form field name for the file.
    pub name: String,
    /// Timeout in milliseconds; `0` means none.
    pub timeout: u64,
    /// Send cookies cross-origin.
    pub with_credentials: bool,
    /// Extra request headers.
    pub headers: Vec<(String, String)>,
    /// Extra form fields.
    pub data: Vec<(String, String)>,
}

/// Work the host's transport should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportRequest {
    /// Start sending a file.
    Upload(UploadRequest),
    /// Abort an in-flight transfer.
    Abort(FileKey),
}
