// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_upload --heading-base-level=0

//! Understory Upload: a headless upload queue.
//!
//! An [`Uploader`] tracks a list of [`FileEntry`] values through
//! [`FileStatus::Inited`], [`FileStatus::Uploading`], and then [`FileStatus::Finished`]
//! or [`FileStatus::Error`]. It performs no I/O. Work for the host's transport is queued
//! as [`TransportRequest`]s, and the host reports progress, success, and failure back
//! by [`FileKey`].
//!
//! Failed files stay failed until the user asks for a retry with [`Uploader::reupload`].
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_upload::{
//!     FileEntry, FileStatus, TransportRequest, Uploader, UploaderCallbacks, UploaderProps,
//! };
//!
//! let mut uploader: Uploader<&str> = Uploader::new(
//!     UploaderProps { action: "/upload".into(), ..UploaderProps::default() },
//!     UploaderCallbacks::default(),
//! );
//! let file = FileEntry::new("photo.png", "handle-1");
//! let key = file.file_key;
//! uploader.add_files([file]);
//!
//! // Files upload as soon as they are queued.
//! let requests = uploader.take_requests();
//! let [TransportRequest::Upload(request)] = requests.as_slice() else {
//!     panic!("one upload queued");
//! };
//! assert_eq!(request.action, "/upload");
//!
//! uploader.handle_progress(key, 50);
//! uploader.handle_success(key, &());
//! assert_eq!(uploader.file(key).map(|f| f.status), Some(FileStatus::Finished));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod file;
mod uploader;

pub use file::{FileEntry, FileKey, FileStatus, TransportRequest, UploadError, UploadRequest};
pub use uploader::{ListType, Uploader, UploaderCallbacks, UploaderProps};
