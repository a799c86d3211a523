// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay mount targets.

/// Tracks which container an overlay's content is mounted into.
///
/// `N` is the host's container handle (a node id, a layer index). With no container
/// configured the overlay mounts into the host's default root, reported as `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Portal<N> {
    container: Option<N>,
    mounted: Option<Option<N>>,
}

impl<N> Default for Portal<N> {
    fn default() -> Self {
        Self {
            container: None,
            mounted: None,
        }
    }
}

impl<N: Clone + PartialEq> Portal<N> {
    /// A portal targeting `container`, or the default root for `None`.
    pub fn new(container: Option<N>) -> Self {
        Self {
            container,
            mounted: None,
        }
    }

    /// The configured container.
    pub fn container(&self) -> Option<&N> {
        self.container.as_ref()
    }

    /// Change the configured container. Takes effect on the next [`Portal::mount`].
    pub fn set_container(&mut self, container: Option<N>) {
        self.container = container;
    }

    /// Mount (or remount) into the configured container.
    ///
    /// Returns `true` when the content must be (re)attached: on the first mount and
    /// whenever the container changed since the last mount.
    pub fn mount(&mut self) -> bool {
        let target = self.container.clone();
        if self.mounted.as_ref() == Some(&target) {
            return false;
        }
        self.mounted = Some(target);
        true
    }

    /// Where the content is mounted: `None` while unmounted, `Some(None)` for the default root.
    pub fn mount_node(&self) -> Option<Option<&N>> {
        self.mounted.as_ref().map(Option::as_ref)
    }

    /// Whether the content is mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Detach the content.
    pub fn unmount(&mut self) {
        self.mounted = None;
    }
}
