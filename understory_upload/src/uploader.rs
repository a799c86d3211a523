// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The upload queue state machine.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::{HashMap, HashSet};
use understory_props::{ClassPrefix, Controlled};

use crate::{FileEntry, FileKey, FileStatus, TransportRequest, UploadError, UploadRequest};

/// How the file list is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ListType {
    /// Names only.
    #[default]
    Text,
    /// Thumbnails beside names.
    PictureText,
    /// Thumbnails only.
    Picture,
}

impl ListType {
    /// The class-name token.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::PictureText => "picture-text",
            Self::Picture => "picture",
        }
    }
}

/// Uploader configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct UploaderProps<F> {
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
    /// Upload files as soon as they are queued.
    pub auto_upload: bool,
    /// Accept several files per pick.
    pub multiple: bool,
    /// Ignore new files.
    pub disabled: bool,
    /// Files can be removed from the list.
    pub removable: bool,
    /// Render the file list.
    pub file_list_visible: bool,
    /// Accept dropped files.
    pub draggable: bool,
    /// How the file list is drawn.
    pub list_type: ListType,
    /// Initial files when uncontrolled.
    pub default_file_list: Vec<FileEntry<F>>,
    /// Host-controlled files.
    pub file_list: Option<Vec<FileEntry<F>>>,
    /// Component class prefix, under the `rs` namespace.
    pub class_prefix: String,
}

impl<F> Default for UploaderProps<F> {
    fn default() -> Self {
        Self {
            action: String::new(),
            name: String::from("file"),
            timeout: 0,
            with_credentials: false,
            headers: Vec::new(),
            data: Vec::new(),
            auto_upload: true,
            multiple: false,
            disabled: false,
            removable: true,
            file_list_visible: true,
            draggable: false,
            list_type: ListType::Text,
            default_file_list: Vec::new(),
            file_list: None,
            class_prefix: String::from("uploader"),
        }
    }
}

type FileCallback<F> = Option<Box<dyn FnMut(&FileEntry<F>)>>;

/// Callbacks and vetoes for an [`Uploader`].
///
/// `R` is the host's parsed server response.
pub struct UploaderCallbacks<F, R> {
    /// Veto queueing: receives the next list and the new files.
    pub should_queue_update: Option<Box<dyn FnMut(&[FileEntry<F>], &[FileEntry<F>]) -> bool>>,
    /// Veto sending one file.
    pub should_upload: Option<Box<dyn FnMut(&FileEntry<F>) -> bool>>,
    /// The file list changed by queueing or removal.
    pub on_change: Option<Box<dyn FnMut(&[FileEntry<F>])>>,
    /// A file was handed to the transport.
    pub on_upload: FileCallback<F>,
    /// The user asked to retry a file.
    pub on_reupload: FileCallback<F>,
    /// Progress in percent.
    pub on_progress: Option<Box<dyn FnMut(u8, &FileEntry<F>)>>,
    /// A file finished uploading.
    pub on_success: Option<Box<dyn FnMut(&R, &FileEntry<F>)>>,
    /// A file failed to upload.
    pub on_error: Option<Box<dyn FnMut(&UploadError, &FileEntry<F>)>>,
    /// A file was removed from the list.
    pub on_remove: FileCallback<F>,
}

impl<F, R> Default for UploaderCallbacks<F, R> {
    fn default() -> Self {
        Self {
            should_queue_update: None,
            should_upload: None,
            on_change: None,
            on_upload: None,
            on_reupload: None,
            on_progress: None,
            on_success: None,
            on_error: None,
            on_remove: None,
        }
    }
}

impl<F, R> fmt::Debug for UploaderCallbacks<F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploaderCallbacks")
            .field("should_queue_update", &self.should_queue_update.is_some())
            .field("should_upload", &self.should_upload.is_some())
            .field("on_change", &self.on_change.is_some())
            .field("on_upload", &self.on_upload.is_some())
            .field("on_reupload", &self.on_reupload.is_some())
            .field("on_progress", &self.on_progress.is_some())
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("on_remove", &self.on_remove.is_some())
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Progress {
    status: FileStatus,
    progress: u8,
}

/// An upload queue.
///
/// The uploader never touches the network. Sends and aborts are queued as
/// [`TransportRequest`]s; the host drains them with [`Uploader::take_requests`],
/// performs them, and reports back through [`Uploader::handle_progress`],
/// [`Uploader::handle_success`], and [`Uploader::handle_error`].
///
/// When the host controls the file list, status and progress the uploader has
/// observed are overlaid on the host's entries by key.
pub struct Uploader<F, R = ()> {
    props: UploaderProps<F>,
    callbacks: UploaderCallbacks<F, R>,
    file_list: Controlled<Vec<FileEntry<F>>>,
    file_map: HashMap<FileKey, Progress>,
    in_flight: HashSet<FileKey>,
    requests: Vec<TransportRequest>,
    classes: ClassPrefix,
}

impl<F: fmt::Debug, R> fmt::Debug for Uploader<F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Uploader")
            .field("props", &self.props)
            .field("callbacks", &self.callbacks)
            .field("file_list", &self.file_list)
            .field("file_map", &self.file_map)
            .field("in_flight", &self.in_flight)
            .field("requests", &self.requests)
            .field("classes", &self.classes)
            .finish()
    }
}

impl<F: Clone, R> Uploader<F, R> {
    /// Create an uploader.
    ///
    /// Default files start with zero progress.
    pub fn new(props: UploaderProps<F>, callbacks: UploaderCallbacks<F, R>) -> Self {
        let defaults = props
            .default_file_list
            .iter()
            .cloned()
            .map(|file| FileEntry {
                progress: 0,
                ..file
            })
            .collect();
        let file_list = Controlled::new(props.file_list.clone(), defaults);
        let classes = ClassPrefix::new(&props.class_prefix);
        Self {
            props,
            callbacks,
            file_list,
            file_map: HashMap::new(),
            in_flight: HashSet::new(),
            requests: Vec::new(),
            classes,
        }
    }

    /// The configuration.
    pub fn props(&self) -> &UploaderProps<F> {
        &self.props
    }

    /// Supply or remove the host-controlled file list.
    pub fn set_file_list_prop(&mut self, file_list: Option<Vec<FileEntry<F>>>) {
        self.props.file_list.clone_from(&file_list);
        self.file_list.set_prop(file_list);
    }

    /// The effective file list.
    pub fn file_list(&self) -> Vec<FileEntry<F>> {
        match self.file_list.prop() {
            Some(files) => files
                .iter()
                .map(|file| {
                    let mut file = file.clone();
                    if let Some(seen) = self.file_map.get(&file.file_key) {
                        file.status = seen.status;
                        file.progress = seen.progress;
                    }
                    file
                })
                .collect(),
            None => self.file_list.internal().clone(),
        }
    }

    /// The entry for `key`.
    pub fn file(&self, key: FileKey) -> Option<FileEntry<F>> {
        self.file_list().into_iter().find(|f| f.file_key == key)
    }

    /// Whether `key` has been sent and not yet answered.
    pub fn is_in_flight(&self, key: FileKey) -> bool {
        self.in_flight.contains(&key)
    }

    /// Drain queued transport work.
    pub fn take_requests(&mut self) -> Vec<TransportRequest> {
        core::mem::take(&mut self.requests)
    }

    /// Queue files picked or dropped by the user. Returns whether they were queued.
    ///
    /// `should_queue_update` may veto the whole batch. Queued files are uploaded at
    /// once when `auto_upload` is set.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = FileEntry<F>>) -> bool {
        if self.props.disabled {
            return false;
        }
        let new_files: Vec<_> = files
            .into_iter()
            .map(|file| FileEntry {
                status: FileStatus::Inited,
                ..file
            })
            .collect();
        let mut next = self.file_list();
        next.extend(new_files.iter().cloned());

        if let Some(should_queue_update) = &mut self.callbacks.should_queue_update {
            if !should_queue_update(&next, &new_files) {
                log::debug!("queue update of {} file(s) vetoed", new_files.len());
                return false;
            }
        }
        if let Some(on_change) = &mut self.callbacks.on_change {
            on_change(&next);
        }
        self.file_list.set(next);
        if self.props.auto_upload {
            self.start_all();
        }
        true
    }

    /// Upload one file, or every queued file when `key` is `None`.
    pub fn start(&mut self, key: Option<FileKey>) {
        match key {
            Some(key) => match self.file(key) {
                Some(file) => self.upload_file(file),
                None => log::warn!("start for unknown file {key}"),
            },
            None => self.start_all(),
        }
    }

    fn start_all(&mut self) {
        for file in self.file_list() {
            if let Some(should_upload) = &mut self.callbacks.should_upload {
                if !should_upload(&file) {
                    continue;
                }
            }
            if file.status == FileStatus::Inited {
                self.upload_file(file);
            }
        }
    }

    fn upload_file(&mut self, file: FileEntry<F>) {
        self.requests.push(TransportRequest::Upload(UploadRequest {
            file_key: file.file_key,
            action: self.props.action.clone(),
            name: self.props.name.clone(),
            timeout: self.props.timeout,
            with_credentials: self.props.with_credentials,
            headers: self.props.headers.clone(),
            data: self.props.data.clone(),
        }));
        self.in_flight.insert(file.file_key);
        log::debug!("uploading {}", file.file_key);
        self.update_file(FileEntry {
            status: FileStatus::Uploading,
            ..file.clone()
        });
        if let Some(on_upload) = &mut self.callbacks.on_upload {
            on_upload(&file);
        }
    }

    fn update_file(&mut self, next: FileEntry<F>) {
        if next.progress > 0 {
            self.file_map.insert(
                next.file_key,
                Progress {
                    status: next.status,
                    progress: next.progress,
                },
            );
        }
        let key = next.file_key;
        let mut files = self.file_list();
        if let Some(slot) = files.iter_mut().find(|f| f.file_key == key) {
            *slot = next;
        }
        self.file_list.set(files);
    }

    fn known_file(&self, key: FileKey, event: &str) -> Option<FileEntry<F>> {
        let file = self.file(key);
        if file.is_none() {
            log::warn!("{event} for unknown file {key}");
        }
        file
    }

    /// The transport reported progress for `key`.
    pub fn handle_progress(&mut self, key: FileKey, percent: u8) {
        let Some(file) = self.known_file(key, "progress") else {
            return;
        };
        let percent = percent.min(100);
        let next = FileEntry {
            status: FileStatus::Uploading,
            progress: percent,
            ..file
        };
        self.update_file(next.clone());
        if let Some(on_progress) = &mut self.callbacks.on_progress {
            on_progress(percent, &next);
        }
    }

    /// The transport finished `key`.
    pub fn handle_success(&mut self, key: FileKey, response: &R) {
        let Some(file) = self.known_file(key, "success") else {
            return;
        };
        self.in_flight.remove(&key);
        let next = FileEntry {
            status: FileStatus::Finished,
            progress: 100,
            ..file
        };
        log::debug!("uploaded {key}");
        self.update_file(next.clone());
        if let Some(on_success) = &mut self.callbacks.on_success {
            on_success(response, &next);
        }
    }

    /// The transport failed `key`. The file is not retried.
    pub fn handle_error(&mut self, key: FileKey, error: &UploadError) {
        let Some(file) = self.known_file(key, "error") else {
            return;
        };
        self.in_flight.remove(&key);
        let next = FileEntry {
            status: FileStatus::Error,
            ..file
        };
        log::debug!("upload of {key} failed: {error}");
        self.update_file(next.clone());
        if let Some(on_error) = &mut self.callbacks.on_error {
            on_error(error, &next);
        }
    }

    /// The user asked to retry `key`.
    ///
    /// The file is sent again only when `auto_upload` is set; otherwise the host
    /// decides through `on_reupload`.
    pub fn reupload(&mut self, key: FileKey) {
        let Some(file) = self.known_file(key, "reupload") else {
            return;
        };
        if self.props.auto_upload {
            self.upload_file(file.clone());
        }
        if let Some(on_reupload) = &mut self.callbacks.on_reupload {
            on_reupload(&file);
        }
    }

    /// Remove `key` from the list, aborting its transfer if one is in flight.
    pub fn remove(&mut self, key: FileKey) {
        let Some(file) = self.known_file(key, "remove") else {
            return;
        };
        if self.in_flight.remove(&key) {
            self.requests.push(TransportRequest::Abort(key));
        }
        self.file_map.remove(&key);
        let next: Vec<_> = self
            .file_list()
            .into_iter()
            .filter(|f| f.file_key != key)
            .collect();
        self.file_list.set(next.clone());
        if let Some(on_remove) = &mut self.callbacks.on_remove {
            on_remove(&file);
        }
        if let Some(on_change) = &mut self.callbacks.on_change {
            on_change(&next);
        }
    }

    /// Class names: base, list type, and `draggable`.
    pub fn class_names(&self) -> Vec<String> {
        self.classes.with_modifiers(&[
            (self.props.list_type.as_str(), true),
            ("draggable", self.props.draggable),
            ("disabled", self.props.disabled),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::string::ToString;
    use alloc::vec;
    use core::cell::RefCell;

    type Log = Rc<RefCell<Vec<String>>>;

    fn logging(log: &Log) -> UploaderCallbacks<&'static str, String> {
        let upload = Rc::clone(log);
        let success = Rc::clone(log);
        let error = Rc::clone(log);
        let remove = Rc::clone(log);
        UploaderCallbacks {
            on_upload: Some(Box::new(move |f: &FileEntry<&'static str>| {
                upload.borrow_mut().push(alloc::format!("upload:{}", f.name));
            })),
            on_success: Some(Box::new(move |r: &String, f: &FileEntry<&'static str>| {
                success.borrow_mut().push(alloc::format!("success:{}:{r}", f.name));
            })),
            on_error: Some(Box::new(move |e: &UploadError, f: &FileEntry<&'static str>| {
                error.borrow_mut().push(alloc::format!("error:{}:{e}", f.name));
            })),
            on_remove: Some(Box::new(move |f: &FileEntry<&'static str>| {
                remove.borrow_mut().push(alloc::format!("remove:{}", f.name));
            })),
            ..UploaderCallbacks::default()
        }
    }

    fn keys(requests: &[TransportRequest]) -> Vec<FileKey> {
        requests
            .iter()
            .map(|r| match r {
                TransportRequest::Upload(req) => req.file_key,
                TransportRequest::Abort(key) => *key,
            })
            .collect()
    }

    #[test]
    fn auto_upload_sends_new_files() {
        let log: Log = Rc::default();
        let mut up = Uploader::new(UploaderProps::default(), logging(&log));
        let a = FileEntry::new("a.png", "blob-a");
        let key = a.file_key;
        assert!(up.add_files([a]));
        assert_eq!(keys(&up.take_requests()), [key]);
        assert_eq!(up.file(key).map(|f| f.status), Some(FileStatus::Uploading));
        assert!(up.is_in_flight(key));

        up.handle_progress(key, 40);
        assert_eq!(up.file(key).map(|f| f.progress), Some(40));
        up.handle_success(key, &"ok".to_string());
        let file = up.file(key).expect("still listed");
        assert_eq!((file.status, file.progress), (FileStatus::Finished, 100));
        assert!(!up.is_in_flight(key));
        assert_eq!(*log.borrow(), ["upload:a.png", "success:a.png:ok"]);
    }

    #[test]
    fn manual_start_skips_vetoed_and_sent_files() {
        let mut up: Uploader<&str> = Uploader::new(
            UploaderProps {
                auto_upload: false,
                ..UploaderProps::default()
            },
            UploaderCallbacks {
                should_upload: Some(Box::new(|f: &FileEntry<&str>| f.name != "skip.txt")),
                ..UploaderCallbacks::default()
            },
        );
        let a = FileEntry::new("a.txt", "a");
        let skip = FileEntry::new("skip.txt", "s");
        let a_key = a.file_key;
        up.add_files([a, skip]);
        assert!(up.take_requests().is_empty());

        up.start(None);
        assert_eq!(keys(&up.take_requests()), [a_key]);
        up.start(None);
        assert!(up.take_requests().is_empty(), "already uploading");
    }

    #[test]
    fn queue_veto_leaves_list_alone() {
        let mut up: Uploader<&str> = Uploader::new(
            UploaderProps::default(),
            UploaderCallbacks {
                should_queue_update: Some(Box::new(
                    |next: &[FileEntry<&str>], _: &[FileEntry<&str>]| next.len() <= 1,
                )),
                ..UploaderCallbacks::default()
            },
        );
        assert!(up.add_files([FileEntry::new("a", "a")]));
        assert!(!up.add_files([FileEntry::new("b", "b")]));
        assert_eq!(up.file_list().len(), 1);
    }

    #[test]
    fn errors_are_not_retried() {
        let log: Log = Rc::default();
        let mut up = Uploader::new(UploaderProps::default(), logging(&log));
        let a = FileEntry::new("a", "a");
        let key = a.file_key;
        up.add_files([a]);
        up.take_requests();
        up.handle_error(key, &UploadError::Status { status: 500, body: None });
        assert_eq!(up.file(key).map(|f| f.status), Some(FileStatus::Error));
        assert!(up.take_requests().is_empty());

        up.reupload(key);
        assert_eq!(keys(&up.take_requests()), [key]);
        assert_eq!(
            *log.borrow(),
            ["upload:a", "error:a:upload failed with status 500", "upload:a"]
        );
    }

    #[test]
    fn removing_in_flight_file_aborts() {
        let log: Log = Rc::default();
        let mut up = Uploader::new(UploaderProps::default(), logging(&log));
        let a = FileEntry::new("a", "a");
        let key = a.file_key;
        up.add_files([a]);
        up.take_requests();
        up.remove(key);
        assert_eq!(up.take_requests(), [TransportRequest::Abort(key)]);
        assert!(up.file_list().is_empty());
        assert_eq!(*log.borrow(), ["upload:a", "remove:a"]);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut up: Uploader<&str> =
            Uploader::new(UploaderProps::default(), UploaderCallbacks::default());
        up.handle_progress(FileKey(u32::MAX), 10);
        up.remove(FileKey(u32::MAX));
        assert!(up.file_list().is_empty());
        assert!(up.take_requests().is_empty());
    }

    #[test]
    fn controlled_list_overlays_progress() {
        let a = FileEntry::new("a", "a");
        let key = a.file_key;
        let mut up: Uploader<&str> = Uploader::new(
            UploaderProps {
                file_list: Some(vec![a.clone()]),
                auto_upload: false,
                ..UploaderProps::default()
            },
            UploaderCallbacks::default(),
        );
        up.handle_progress(key, 250);
        let file = up.file(key).expect("host file");
        assert_eq!((file.status, file.progress), (FileStatus::Uploading, 100));

        up.set_file_list_prop(Some(Vec::new()));
        assert!(up.file_list().is_empty());
    }

    #[test]
    fn disabled_ignores_files() {
        let mut up: Uploader<&str> = Uploader::new(
            UploaderProps {
                disabled: true,
                draggable: true,
                ..UploaderProps::default()
            },
            UploaderCallbacks::default(),
        );
        assert!(!up.add_files([FileEntry::new("a", "a")]));
        assert_eq!(
            up.class_names(),
            ["rs-uploader", "rs-uploader-text", "rs-uploader-draggable", "rs-uploader-disabled"]
        );
    }
}
